//! Argument range reduction onto [0, π].
//!
//! Kepler's equation is 2π-periodic and odd, so the solver only ever needs
//! the reduced angle M̅ ∈ [0, π] plus one flag saying whether the original
//! angle sat in the upper half-period. The reduction layers by magnitude to
//! preserve precision, following the trigonometric reducers used by the
//! mainstream SIMD math libraries:
//!
//! - x ≤ π/4: the angle is its own reduction.
//! - x ≤ 20π: subtract n·π/2 using the three-way split of π/2.
//! - x ≤ mediumpi: Cody-Waite subtraction with the `pio2_*t` tail terms.
//! - beyond: a Payne-Hanek style exact remainder against 1280 bits of 2/π.
//!
//! All tiers are evaluated lane-parallel with mask selection; only the rare
//! beyond-mediumpi lanes drop to the scalar remainder. NaN propagates through
//! every tier, and +∞ reduces to NaN.

use crate::constants;
use crate::simd::{Scalar, Vector};

/// Words of the binary expansion of 2/π, most significant first.
///
/// 20 × 64 = 1280 fractional bits, enough to absorb the largest finite f64
/// exponent plus 128 guard bits for the accumulator.
const TWO_OVER_PI: [u64; 20] = [
    0xa2f9_836e_4e44_1529,
    0xfc27_57d1_f534_ddc0,
    0xdb62_9599_3c43_9041,
    0xfe51_63ab_debb_c561,
    0xb724_6e3a_424d_d2e0,
    0x0649_2eea_09d1_921c,
    0xfe1d_eb1c_b129_a73e,
    0xe882_35f5_2ebb_4484,
    0xe99c_7026_b45f_7e41,
    0x3991_d639_8353_39f4,
    0x9c84_5f8b_bdf9_283b,
    0x1ff8_97ff_de05_980f,
    0xef2f_118b_5a0a_6d1f,
    0x6d36_7ecf_27cb_09b7,
    0x4f46_3f66_9e5f_ea2d,
    0x7527_bac7_ebe5_f17b,
    0x3d07_39f7_8a52_92ea,
    0x6bfb_5fb1_1f8d_5d08,
    0x5603_3046_fc7b_6bab,
    0xf0cf_bc20_9af4_361d,
];

/// Exact remainder of x modulo π/2 for arbitrarily large finite arguments.
///
/// Multiplies the 53-bit significand against the window of 2/π bits aligned
/// with the argument's exponent, accumulating x·(2/π) mod 4 in a 2.126
/// fixed-point `u128`. The top two bits give the quadrant (rounded to
/// nearest) and the signed fraction scales back by π/2 into [−π/4, π/4].
///
/// Non-finite inputs return (NaN, 0).
#[must_use]
#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "Fixed-point to float conversions are the algorithm; the fraction carries at most 117 significant bits by construction"
)]
pub fn rem_pio2(x: f64) -> (f64, u32) {
    if !x.is_finite() {
        return (f64::NAN, 0);
    }
    let bits = x.to_bits();
    let exponent = ((bits >> 52) & 0x7ff) as i32 - 1075;
    let significand = (bits & ((1_u64 << 52) - 1)) | (1_u64 << 52);

    // Accumulate x·(2/π) mod 4 with 126 fractional bits. Contributions that
    // would land entirely above bit 127 are exact multiples of 4; words more
    // than 117 bits below the accumulator cannot affect the result.
    let mut acc: u128 = 0;
    for (w, &word) in TWO_OVER_PI.iter().enumerate() {
        let shift = exponent - 64 * (w as i32 + 1) + 126;
        if shift >= 128 {
            continue;
        }
        if shift <= -117 {
            break;
        }
        let product = u128::from(significand) * u128::from(word);
        let contribution = if shift >= 0 {
            product << shift
        } else {
            product >> -shift
        };
        acc = acc.wrapping_add(contribution);
    }

    let quadrant = ((acc.wrapping_add(1_u128 << 125) >> 126) & 3) as u32;
    let fraction = acc.wrapping_sub(u128::from(quadrant) << 126) as i128;
    let reduced = fraction as f64 * 2.0_f64.powi(-126) * constants::pio2::<f64>();
    (reduced, quadrant)
}

/// Quadrant of a non-negative multiple-of-π/2 count: n mod 4, as a float.
#[inline]
fn quadrant<T: Scalar, V: Vector<T>>(n: V) -> V {
    let quarter = V::splat(T::cst(0.25));
    let four = V::splat(T::cst(4.0));
    (n * quarter).floor().fnma(four, n)
}

/// Reduce x ≥ 0 to xr with x = n·π/2 + xr, |xr| ≤ π/4; returns (xr, n mod 4).
#[inline]
fn trig_reduce<T: Scalar, V: Vector<T>>(x: V) -> (V, V) {
    let zero = V::splat(T::zero());
    let one = V::splat(T::one());
    let p1 = V::splat(constants::pio2_1());
    let p2 = V::splat(constants::pio2_2());
    let p3 = V::splat(constants::pio2_3());

    // One rounded multiple count per lane; the two lowest tiers pin it to 0
    // or 1 so the plain three-way subtraction reproduces them exactly.
    let n_round = (x * V::splat(constants::twoopi())).round_ties();
    let n = V::select(
        x.le(V::splat(constants::pio4())),
        zero,
        V::select(x.le(V::splat(constants::pio2())), one, n_round),
    );

    // Plain Cody-Waite subtraction, exact up to 20π.
    let plain = ((x - n * p1) - n * p2) - n * p3;

    // Compensated subtraction, good up to mediumpi: the products against the
    // truncated π/2 digits are exact, and the final tail term restores the
    // bits lost in the last cancellation.
    let t1 = n.fnma(p1, x);
    let w1 = n * p2;
    let t2 = t1 - w1;
    let w2 = n * p3;
    let r3 = t2 - w2;
    let c2 = n.fma(V::splat(constants::pio2_3t()), -((t2 - r3) - w2));
    let compensated = r3 - c2;

    let mut xr = V::select(x.le(V::splat(constants::twentypi())), plain, compensated);
    let mut q = quadrant(n);

    // Rare lanes past the Cody-Waite range (and +∞) take the exact remainder.
    let far = x.gt(V::splat(constants::mediumpi()));
    if V::any(far) {
        let mut lanes = [T::zero(); 8];
        let mut reduced = [T::zero(); 8];
        let mut quads = [T::zero(); 8];
        x.write_to(&mut lanes);
        xr.write_to(&mut reduced);
        q.write_to(&mut quads);
        for lane in 0..V::LANES {
            if lanes[lane] > constants::mediumpi() {
                let (r, nq) = lanes[lane].rem_pio2_large();
                reduced[lane] = r;
                quads[lane] = T::cst(f64::from(nq));
            }
        }
        xr = V::from_slice(&reduced);
        q = V::from_slice(&quads);
    }

    (xr, q)
}

/// Map x ≥ 0 into [0, π] with a half-period flag.
///
/// The original angle equals 2π·k + (high ? 2π − xr : xr) for some integer
/// k ≥ 0, so sin(x) = (high ? −1 : 1)·sin(xr) and cos(x) = cos(xr). A width-1
/// vector gives the scalar form; batch lanes return a mask.
#[inline]
#[must_use]
pub fn range_reduce<T: Scalar, V: Vector<T>>(x: V) -> (V, V::Mask) {
    let (reduced, q) = trig_reduce(x);
    let folded = q.fma(V::splat(constants::pio2()), reduced);
    let low = folded.lt(V::splat(T::zero()));
    let high = folded.ge(V::splat(constants::pi()));
    let xr = V::select(high, V::splat(constants::twopi()) - folded, folded.abs());
    (xr, high | low)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check(x: f64, tol: f64) {
        let (xr, high) = range_reduce::<f64, f64>(x);
        assert!((0.0..=core::f64::consts::PI).contains(&xr), "xr={xr} for x={x}");
        let sin_back = if high { -xr.sin() } else { xr.sin() };
        assert!((x.sin() - sin_back).abs() < tol, "sin mismatch at x={x}");
        assert!((x.cos() - xr.cos()).abs() < tol, "cos mismatch at x={x}");
    }

    #[test]
    fn small_angles_are_identity() {
        let (xr, high) = range_reduce::<f64, f64>(0.0);
        assert!(!high);
        assert!(xr == 0.0);
        let (xr, high) = range_reduce::<f64, f64>(0.5);
        assert!(!high);
        assert!((xr - 0.5).abs() < 1e-15);
    }

    #[test]
    fn pi_reduces_to_pi_high() {
        let (xr, high) = range_reduce::<f64, f64>(core::f64::consts::PI);
        assert!(high);
        assert!((xr - core::f64::consts::PI).abs() < 1e-15);
    }

    #[test]
    fn twopi_reduces_to_zero() {
        let (xr, _) = range_reduce::<f64, f64>(2.0 * core::f64::consts::PI);
        assert!(xr.abs() < 5e-15);
    }

    #[test]
    fn hundred_revolutions() {
        let (xr, high) = range_reduce::<f64, f64>(200.0 * core::f64::consts::PI - 1e-8);
        assert!(high);
        assert!((xr - 1e-8).abs() < 5e-15);
    }

    #[test]
    fn all_tiers_preserve_trig_values() {
        // Spans the identity, single-subtraction, 20π, mediumpi, and
        // Payne-Hanek tiers.
        for &x in &[0.3, 1.0, 2.0, 3.0, 6.0, 40.0, 61.0, 1e4, 8e5, 1e10, 1e300] {
            check(x, 1e-9 * x.max(1.0).log10().max(1.0));
        }
    }

    #[test]
    fn single_precision_tiers() {
        for &x in &[0.2_f32, 1.0, 3.0, 40.0, 200.0, 1e3, 1e6] {
            let (xr, high) = range_reduce::<f32, f32>(x);
            let sin_back = if high { -xr.sin() } else { xr.sin() };
            // 1e6 sits beyond the single-precision Cody-Waite range and takes
            // the promoted exact remainder.
            assert!((x.sin() - sin_back).abs() < 1e-4, "sin mismatch at x={x}");
            assert!((x.cos() - xr.cos()).abs() < 1e-4, "cos mismatch at x={x}");
        }
    }

    #[test]
    fn infinity_yields_nan() {
        let (xr, _) = range_reduce::<f64, f64>(f64::INFINITY);
        assert!(xr.is_nan());
    }

    #[test]
    fn nan_propagates() {
        let (xr, _) = range_reduce::<f64, f64>(f64::NAN);
        assert!(xr.is_nan());
    }

    #[test]
    fn exact_remainder_matches_sin() {
        for &x in &[1e6_f64, 1.234_567_89e7, 1e15, 4.0e15] {
            let (r, q) = rem_pio2(x);
            let angle = f64::from(q).mul_add(core::f64::consts::FRAC_PI_2, r);
            assert!(
                (x.sin() - angle.sin()).abs() < 1e-13,
                "sin mismatch at x={x}"
            );
        }
    }
}
