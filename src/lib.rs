#![forbid(unsafe_code)]
//! Fast batch solver for Kepler's equation
//!
//! Solves M = E − e·sin E for the eccentric anomaly E, returning sin E and
//! cos E alongside, over large arrays of mean anomalies at fixed
//! eccentricity. Designed for orbital-mechanics workloads (transit, radial
//! velocity, astrometry) where the same orbit is evaluated at many epochs.
//!
//! # Features
//! - Sub-tolerance residuals across the full domain e ∈ [0, 1), including
//!   the singular corner e → 1, M → 0
//! - One shared code path for scalar and SIMD execution (`wide` batches),
//!   so both agree lane-for-lane
//! - Pluggable starters and refiners built on a generic-order Householder
//!   stepper
//! - Both `f64` and `f32` pipelines, each with bit-exact constant tables
//!
//! # Usage
//!
//! The crate-level [`solve`] uses the default composition (Raposo-Pulido /
//! Brandt starter with the Brandt single-step refiner):
//!
//! ```
//! let eccentricities = [0.3_f64];
//! let mean_anomaly = [0.1, 1.0, 2.5, -4.0, 30.0];
//! let mut ecc_anomaly = [0.0; 5];
//! let mut sin_e = [0.0; 5];
//! let mut cos_e = [0.0; 5];
//!
//! kepler_batch::solve(
//!     &eccentricities,
//!     mean_anomaly.len(),
//!     &mean_anomaly,
//!     &mut ecc_anomaly,
//!     &mut sin_e,
//!     &mut cos_e,
//! );
//!
//! for (&m, &e) in mean_anomaly.iter().zip(ecc_anomaly.iter()) {
//!     let residual = (e - 0.3 * e.sin() - m).rem_euclid(2.0 * std::f64::consts::PI);
//!     let residual = residual.min(2.0 * std::f64::consts::PI - residual);
//!     assert!(residual < 1e-12);
//! }
//! ```
//!
//! Custom compositions go through [`solver::solve`] / [`solver::solve_simd`]
//! with any [`starters::Starter`] and [`refiners::Refiner`] pairing.

pub mod constants;
pub mod householder;
pub mod math;
pub mod reduction;
pub mod refiners;
pub mod simd;
pub mod solver;
pub mod starters;

#[cfg(test)]
mod tests;

pub use refiners::Refiner;
pub use simd::{Scalar, Vector};
pub use starters::Starter;

use refiners::Brandt;
use starters::RaposoPulidoBrandt;

/// Solve Kepler's equation for one or more eccentricities over contiguous
/// windows of mean anomalies.
///
/// For each eccentricity in `eccentricities`, the corresponding
/// `per_eccentricity` elements of `mean_anomaly` are solved with the default
/// composition (Raposo-Pulido / Brandt starter, Brandt refiner) through the
/// SIMD driver, writing E, sin E, and cos E to the same window of the output
/// slices. The starter tables are built once per eccentricity.
///
/// Slice lengths must be at least `eccentricities.len() * per_eccentricity`;
/// this is checked in debug builds only.
pub fn solve<T: Scalar>(
    eccentricities: &[T],
    per_eccentricity: usize,
    mean_anomaly: &[T],
    ecc_anomaly: &mut [T],
    sin_ecc_anomaly: &mut [T],
    cos_ecc_anomaly: &mut [T],
) {
    let total = eccentricities.len() * per_eccentricity;
    debug_assert!(mean_anomaly.len() >= total);
    debug_assert!(ecc_anomaly.len() >= total);
    debug_assert!(sin_ecc_anomaly.len() >= total);
    debug_assert!(cos_ecc_anomaly.len() >= total);

    for (n, &eccentricity) in eccentricities.iter().enumerate() {
        let lo = n * per_eccentricity;
        let hi = lo + per_eccentricity;
        solver::solve_simd::<T, RaposoPulidoBrandt<T>, Brandt>(
            eccentricity,
            &mean_anomaly[lo..hi],
            &mut ecc_anomaly[lo..hi],
            &mut sin_ecc_anomaly[lo..hi],
            &mut cos_ecc_anomaly[lo..hi],
            &Brandt,
        );
    }
}

/// Parallel variant of [`solve`]: eccentricity windows fan out across the
/// rayon thread pool.
///
/// Windows are independent (outputs depend only on (e, M[i])), so this is a
/// pure data decomposition with no synchronisation beyond the join.
#[cfg(feature = "parallel")]
pub fn solve_parallel<T: Scalar>(
    eccentricities: &[T],
    per_eccentricity: usize,
    mean_anomaly: &[T],
    ecc_anomaly: &mut [T],
    sin_ecc_anomaly: &mut [T],
    cos_ecc_anomaly: &mut [T],
) {
    use rayon::prelude::*;

    let total = eccentricities.len() * per_eccentricity;
    debug_assert!(per_eccentricity > 0);
    debug_assert!(mean_anomaly.len() >= total);
    debug_assert!(ecc_anomaly.len() >= total);
    debug_assert!(sin_ecc_anomaly.len() >= total);
    debug_assert!(cos_ecc_anomaly.len() >= total);

    eccentricities
        .par_iter()
        .zip(mean_anomaly.par_chunks(per_eccentricity))
        .zip(ecc_anomaly.par_chunks_mut(per_eccentricity))
        .zip(sin_ecc_anomaly.par_chunks_mut(per_eccentricity))
        .zip(cos_ecc_anomaly.par_chunks_mut(per_eccentricity))
        .for_each(|((((&eccentricity, m), e), s), c)| {
            solver::solve_simd::<T, RaposoPulidoBrandt<T>, Brandt>(
                eccentricity,
                m,
                e,
                s,
                c,
                &Brandt,
            );
        });
}
