//! Batch drivers tying reduction, starter, and refiner together.
//!
//! The per-element pipeline is written once over the lane abstraction:
//! `solve` instantiates it at width 1, `solve_simd` at the scalar's native
//! batch width with the trailing partial batch falling back to width 1.
//! Outputs depend only on (e, M[i]), so callers may split a batch across
//! threads at any width-multiple boundary.

use crate::reduction;
use crate::refiners::Refiner;
use crate::simd::{Scalar, Vector};
use crate::starters::Starter;

/// The full per-lane pipeline: sign split, range reduction, start, refine,
/// and unreduction back to the caller's half-period and sign.
#[inline]
fn pipeline<T, V, S, R>(eccentricity: T, starter: &S, refiner: &R, mean_anomaly: V) -> (V, V, V)
where
    T: Scalar,
    V: Vector<T>,
    S: Starter<T>,
    R: Refiner<T>,
{
    let sigma = V::splat(T::one()).with_sign_of(mean_anomaly);
    let (reduced, high) = reduction::range_reduce(mean_anomaly.abs());
    let guess = starter.start(reduced);
    let (ecc_anomaly, sin, cos) = refiner.refine_full(eccentricity, reduced, guess);

    let twopi = V::splat(crate::constants::twopi());
    let ecc_out = sigma * V::select(high, twopi - ecc_anomaly, ecc_anomaly);
    let sin_out = sigma * V::select(high, -sin, sin);
    (ecc_out, sin_out, cos)
}

/// Solve one (e, M) pair, returning (E, sin E, cos E).
#[inline]
#[must_use]
pub fn solve_one<T, S, R>(eccentricity: T, mean_anomaly: T, starter: &S, refiner: &R) -> (T, T, T)
where
    T: Scalar,
    S: Starter<T>,
    R: Refiner<T>,
{
    pipeline::<T, T, S, R>(eccentricity, starter, refiner, mean_anomaly)
}

/// Solve a batch at fixed eccentricity through the width-1 pipeline.
///
/// The starter is constructed once and reused for every element. Output
/// slices must be at least as long as `mean_anomaly`; lengths are checked in
/// debug builds only.
pub fn solve<T, S, R>(
    eccentricity: T,
    mean_anomaly: &[T],
    ecc_anomaly: &mut [T],
    sin_ecc_anomaly: &mut [T],
    cos_ecc_anomaly: &mut [T],
    refiner: &R,
) where
    T: Scalar,
    S: Starter<T>,
    R: Refiner<T>,
{
    debug_assert!(ecc_anomaly.len() >= mean_anomaly.len());
    debug_assert!(sin_ecc_anomaly.len() >= mean_anomaly.len());
    debug_assert!(cos_ecc_anomaly.len() >= mean_anomaly.len());

    let starter = S::new(eccentricity);
    for (i, &m) in mean_anomaly.iter().enumerate() {
        let (e, s, c) = pipeline::<T, T, S, R>(eccentricity, &starter, refiner, m);
        ecc_anomaly[i] = e;
        sin_ecc_anomaly[i] = s;
        cos_ecc_anomaly[i] = c;
    }
}

/// Solve a batch at fixed eccentricity through the native-width SIMD
/// pipeline.
///
/// Loads are unaligned; any batch length is accepted, with the trailing
/// `len % width` elements handled by the width-1 pipeline. Results agree
/// with [`solve`] within the refiner's tolerance.
pub fn solve_simd<T, S, R>(
    eccentricity: T,
    mean_anomaly: &[T],
    ecc_anomaly: &mut [T],
    sin_ecc_anomaly: &mut [T],
    cos_ecc_anomaly: &mut [T],
    refiner: &R,
) where
    T: Scalar,
    S: Starter<T>,
    R: Refiner<T>,
{
    debug_assert!(ecc_anomaly.len() >= mean_anomaly.len());
    debug_assert!(sin_ecc_anomaly.len() >= mean_anomaly.len());
    debug_assert!(cos_ecc_anomaly.len() >= mean_anomaly.len());

    let width = T::Batch::LANES;
    let starter = S::new(eccentricity);

    let main = mean_anomaly.len() - mean_anomaly.len() % width;
    let mut i = 0;
    while i < main {
        let m = T::Batch::from_slice(&mean_anomaly[i..]);
        let (e, s, c) = pipeline::<T, T::Batch, S, R>(eccentricity, &starter, refiner, m);
        e.write_to(&mut ecc_anomaly[i..]);
        s.write_to(&mut sin_ecc_anomaly[i..]);
        c.write_to(&mut cos_ecc_anomaly[i..]);
        i += width;
    }

    for (j, &m) in mean_anomaly.iter().enumerate().skip(main) {
        let (e, s, c) = pipeline::<T, T, S, R>(eccentricity, &starter, refiner, m);
        ecc_anomaly[j] = e;
        sin_ecc_anomaly[j] = s;
        cos_ecc_anomaly[j] = c;
    }
}
