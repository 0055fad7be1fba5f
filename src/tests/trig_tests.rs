//! Accuracy of the [0, π] sincos kernels against the platform libm.

use wide::f64x4;

use crate::math::{sincos, sincos_strict};
use crate::tests::default_abs;

#[test]
fn windowed_kernel_double() {
    let tol = default_abs::<f64>();
    for n in 0..10_000 {
        let x = core::f64::consts::PI * f64::from(n) / 9_999.0;
        let (s, c) = sincos::<f64, f64>(x);
        assert!((s - x.sin()).abs() < tol, "sin off at x={x}");
        assert!((c - x.cos()).abs() < tol, "cos off at x={x}");
    }
}

#[test]
fn windowed_kernel_single() {
    let tol = default_abs::<f32>();
    for n in 0..10_000_u32 {
        #[allow(
            clippy::cast_precision_loss,
            reason = "Test grid indices are far below the f32 mantissa limit"
        )]
        let x = core::f32::consts::PI * (n as f32) / 9_999.0;
        let (s, c) = sincos::<f32, f32>(x);
        assert!((s - x.sin()).abs() < tol, "sin off at x={x}");
        assert!((c - x.cos()).abs() < tol, "cos off at x={x}");
    }
}

#[test]
fn strict_kernel_double() {
    for n in 0..10_000 {
        let x = core::f64::consts::PI * f64::from(n) / 9_999.0;
        let (s, c) = sincos_strict(x);
        assert!((s - x.sin()).abs() < 5e-16, "sin off at x={x}");
        assert!((c - x.cos()).abs() < 5e-16, "cos off at x={x}");
    }
}

#[test]
fn strict_kernel_single() {
    let tol = default_abs::<f32>();
    for n in 0..10_000_u32 {
        #[allow(
            clippy::cast_precision_loss,
            reason = "Test grid indices are far below the f32 mantissa limit"
        )]
        let x = core::f32::consts::PI * (n as f32) / 9_999.0;
        let (s, c) = sincos_strict(x);
        assert!((s - x.sin()).abs() < tol, "sin off at x={x}");
        assert!((c - x.cos()).abs() < tol, "cos off at x={x}");
    }
}

#[test]
fn strict_kernel_accepts_negative_arguments() {
    for n in 0..1_000 {
        let x = -core::f64::consts::PI * f64::from(n) / 999.0;
        let (s, c) = sincos_strict(x);
        assert!((s - x.sin()).abs() < 5e-16);
        assert!((c - x.cos()).abs() < 5e-16);
    }
}

#[test]
fn batch_lanes_match_scalar_exactly() {
    for n in 0..2_500 {
        let base = core::f64::consts::PI * f64::from(n) / 2_500.0;
        let xs = [
            base,
            base + 1e-4,
            core::f64::consts::PI - base,
            0.5 * base,
        ];
        let (s, c) = sincos::<f64, f64x4>(f64x4::new(xs));
        let s = s.to_array();
        let c = c.to_array();
        for (lane, &x) in xs.iter().enumerate() {
            let (se, ce) = sincos::<f64, f64>(x);
            // Identical arithmetic per lane; only fusion of the multiply-adds
            // may differ between the batch and scalar instruction selections.
            assert!((s[lane] - se).abs() < 5e-16, "sin lane {lane} at x={x}");
            assert!((c[lane] - ce).abs() < 5e-16, "cos lane {lane} at x={x}");
        }
    }
}

#[test]
fn nan_propagates() {
    let (s, c) = sincos::<f64, f64>(f64::NAN);
    assert!(s.is_nan());
    assert!(c.is_nan());
}
