//! The generic-order stepper against hand-written Newton and Halley updates.

use crate::constants;
use crate::householder;
use crate::tests::default_abs;

fn newton_reference(e: f64, m: f64, ecc_anomaly: f64) -> f64 {
    let fi = ecc_anomaly - e * ecc_anomaly.sin() - m;
    let fip = 1.0 - e * ecc_anomaly.cos();
    -fi / fip
}

fn halley_reference(e: f64, m: f64, ecc_anomaly: f64) -> f64 {
    let fi = ecc_anomaly - e * ecc_anomaly.sin() - m;
    let fip = 1.0 - e * ecc_anomaly.cos();
    let fipp = e * ecc_anomaly.sin();
    let fippp = 1.0 - fip;
    let mut d = -fi / fip;
    d = -fi / (fip + d * fipp / 2.0);
    -fi / (fip + d * fipp / 2.0 + d * d * fippp / 6.0)
}

#[test]
fn order_one_is_newton() {
    let tol = default_abs::<f64>();
    let (e, m) = (0.65, 0.123);
    for n in 0..100 {
        let ecc_anomaly = constants::pi::<f64>() * f64::from(n) / 99.0;
        let state = householder::init(e, m, ecc_anomaly);
        let step = householder::step::<1, f64, f64>(&state);
        assert!((step - newton_reference(e, m, ecc_anomaly)).abs() < tol);
    }
}

#[test]
fn order_three_is_halley() {
    let tol = default_abs::<f64>();
    let (e, m) = (0.65, 0.123);
    for n in 0..100 {
        let ecc_anomaly = constants::pi::<f64>() * f64::from(n) / 99.0;
        let state = householder::init(e, m, ecc_anomaly);
        let step = householder::step::<3, f64, f64>(&state);
        assert!((step - halley_reference(e, m, ecc_anomaly)).abs() < tol);
    }
}

#[test]
fn state_respects_pythagoras() {
    // eSin² + eCos² never exceeds e² beyond rounding.
    for n in 0..100 {
        let e = 0.97_f64;
        let ecc_anomaly = constants::pi::<f64>() * f64::from(n) / 99.0;
        let state = householder::init(e, 1.0, ecc_anomaly);
        let norm = state.ecc_sin.mul_add(state.ecc_sin, state.ecc_cos * state.ecc_cos);
        assert!(norm <= e * e + 1e-14);
    }
}

#[test]
fn higher_orders_converge_faster_per_step() {
    // From the same starting point, a higher-order step lands closer to the
    // root (well inside the basin of convergence).
    let (e, m) = (0.4_f64, 1.1_f64);
    let start = m + 0.85 * e;
    let mut previous = f64::INFINITY;
    macro_rules! residual_after {
        ($order:literal) => {{
            let state = householder::init(e, m, start);
            let next = start + householder::step::<$order, f64, f64>(&state);
            (next - e * next.sin() - m).abs()
        }};
    }
    for residual in [
        residual_after!(1),
        residual_after!(2),
        residual_after!(3),
        residual_after!(4),
        residual_after!(5),
    ] {
        assert!(residual < previous || residual < 1e-15);
        previous = residual;
    }
}

#[test]
fn newton_from_scalar_and_batch_agree() {
    use wide::f64x4;

    let (e, m) = (0.3, 0.7);
    let anomalies = [0.5, 1.0, 2.0, 3.0];
    let state = householder::init(e, f64x4::splat(m), f64x4::new(anomalies));
    let batch = householder::step::<2, f64, f64x4>(&state).to_array();
    for (lane, &ecc_anomaly) in anomalies.iter().enumerate() {
        let scalar_state = householder::init(e, m, ecc_anomaly);
        let scalar = householder::step::<2, f64, f64>(&scalar_state);
        assert!((batch[lane] - scalar).abs() < 1e-15);
    }
}
