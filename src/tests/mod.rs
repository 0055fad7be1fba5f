//! Integration-level tests for the solver pipeline.
//!
//! Organised by component, mirroring the module layout; shared tolerances
//! and the reference residual live here.

mod householder_tests;
mod property_tests;
mod trig_tests;

use crate::simd::Scalar;

/// Default absolute tolerance per precision (1e-13 double, 5e-5 single).
pub(crate) fn default_abs<T: Scalar>() -> T {
    if core::mem::size_of::<T>() == 4 {
        T::cst(5e-5)
    } else {
        T::cst(1e-13)
    }
}

/// Reduce a mean anomaly into (−π, π].
pub(crate) fn wrap2pi(m: f64) -> f64 {
    let twopi = 2.0 * core::f64::consts::PI;
    let mut r = m % twopi;
    if r > core::f64::consts::PI {
        r -= twopi;
    }
    if r <= -core::f64::consts::PI {
        r += twopi;
    }
    r
}

/// |E − e·sin E − M| folded modulo 2π.
pub(crate) fn kepler_residual(eccentricity: f64, mean_anomaly: f64, ecc_anomaly: f64) -> f64 {
    let twopi = 2.0 * core::f64::consts::PI;
    let raw = ecc_anomaly - eccentricity * ecc_anomaly.sin() - wrap2pi(mean_anomaly);
    let folded = raw.rem_euclid(twopi);
    folded.min(twopi - folded)
}
