//! Strategies for refining a starter's guess to a converged eccentric
//! anomaly.
//!
//! Refiners are immutable policy objects built on the Householder stepper.
//! `Iterative` loops a fixed-order update to a residual tolerance;
//! `NonIterative` applies exactly one update and relies on the starter's
//! accuracy; `Brandt` blends a second- and third-order update by region and
//! propagates sin/cos analytically so the whole solve costs a single sincos.
//!
//! There are no failure modes: an iterative refiner that exhausts its
//! iteration budget returns its best iterate, and callers observe the
//! residual rather than an error.

use crate::constants;
use crate::householder;
use crate::math;
use crate::simd::{Scalar, Vector};

/// A root-refinement policy for f(E) = E − e·sin E − M̅ over [0, π].
pub trait Refiner<T: Scalar> {
    /// Refine the initial guess to an eccentric anomaly.
    fn refine<V: Vector<T>>(&self, eccentricity: T, mean_anomaly: V, initial: V) -> V;

    /// Refine and also return (sin E, cos E).
    ///
    /// The default recomputes them from the refined anomaly; refiners with
    /// internal trigonometric state override this to avoid the extra kernel
    /// call.
    #[inline]
    fn refine_full<V: Vector<T>>(
        &self,
        eccentricity: T,
        mean_anomaly: V,
        initial: V,
    ) -> (V, V, V) {
        let ecc_anomaly = self.refine(eccentricity, mean_anomaly, initial);
        let (sin, cos) = math::sincos(ecc_anomaly);
        (ecc_anomaly, sin, cos)
    }
}

/// Pass the starter's guess through unchanged; a testing aid.
#[derive(Debug, Clone, Copy, Default)]
pub struct Noop;

impl<T: Scalar> Refiner<T> for Noop {
    #[inline]
    fn refine<V: Vector<T>>(&self, _eccentricity: T, _mean_anomaly: V, initial: V) -> V {
        initial
    }
}

/// Householder iteration of a fixed order until the residual |f0| drops
/// below the tolerance.
///
/// Lanes converge independently: a converged lane stops updating while the
/// rest keep iterating, and the loop exits once every lane is done or the
/// iteration budget is spent. Non-convergence is not an error; the last
/// iterate is returned as a best effort.
#[derive(Debug, Clone, Copy)]
pub struct Iterative<T, const ORDER: usize> {
    max_iterations: usize,
    tolerance: T,
}

impl<T: Scalar, const ORDER: usize> Iterative<T, ORDER> {
    /// Default budget of 30 iterations at the precision's default tolerance.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            max_iterations: 30,
            tolerance: T::default_tolerance(),
        }
    }

    /// Default iteration budget with a caller-chosen tolerance.
    #[inline]
    #[must_use]
    pub fn with_tolerance(tolerance: T) -> Self {
        Self {
            max_iterations: 30,
            tolerance,
        }
    }

    /// Fully explicit construction.
    #[inline]
    #[must_use]
    pub fn with_limits(max_iterations: usize, tolerance: T) -> Self {
        Self {
            max_iterations,
            tolerance,
        }
    }

    /// The residual threshold treated as converged.
    #[inline]
    #[must_use]
    pub fn tolerance(&self) -> T {
        self.tolerance
    }
}

impl<T: Scalar, const ORDER: usize> Default for Iterative<T, ORDER> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Scalar, const ORDER: usize> Refiner<T> for Iterative<T, ORDER> {
    #[inline]
    fn refine<V: Vector<T>>(&self, eccentricity: T, mean_anomaly: V, initial: V) -> V {
        let tolerance = V::splat(self.tolerance);
        let mut ecc_anomaly = initial;
        for _ in 0..self.max_iterations {
            let state = householder::init(eccentricity, mean_anomaly, ecc_anomaly);
            let active = state.f0.abs().ge(tolerance);
            if !V::any(active) {
                break;
            }
            let delta = householder::step::<ORDER, T, V>(&state);
            ecc_anomaly = V::select(active, ecc_anomaly + delta, ecc_anomaly);
        }
        ecc_anomaly
    }
}

/// Exactly one Householder step of the given order.
///
/// Pair with a high-accuracy starter: `Markley` at order 3 or
/// `RaposoPulidoBrandt` at order 2 or 3 reach machine precision in the one
/// step.
#[derive(Debug, Clone, Copy, Default)]
pub struct NonIterative<const ORDER: usize>;

impl<T: Scalar, const ORDER: usize> Refiner<T> for NonIterative<ORDER> {
    #[inline]
    fn refine<V: Vector<T>>(&self, eccentricity: T, mean_anomaly: V, initial: V) -> V {
        let state = householder::init(eccentricity, mean_anomaly, initial);
        initial + householder::step::<ORDER, T, V>(&state)
    }
}

/// The Brandt et al. (2021) single-step refiner behind the default solver.
///
/// Applies one order-2 step where that already reaches machine precision
/// (e < 0.78, or M̅ > 0.4 away from the singular corner) and one order-3 step
/// otherwise; batch lanes compute both and blend by mask. sin E and cos E
/// are advanced from the guess's values with the series
/// factor = 1 − Δ²/2, corr = Δ·(1 − Δ²/6 at third order), avoiding a second
/// trigonometric evaluation.
///
/// Reference: <https://ui.adsabs.harvard.edu/abs/2021AJ....162..186B/abstract>
#[derive(Debug, Clone, Copy, Default)]
pub struct Brandt;

impl Brandt {
    #[inline]
    fn refine_parts<T: Scalar, V: Vector<T>>(
        eccentricity: T,
        mean_anomaly: V,
        initial: V,
    ) -> (V, V, V) {
        let one = V::splat(T::one());
        let (sin_guess, cos_guess) = math::sincos(initial);
        let state = householder::init_with_sincos(
            eccentricity,
            mean_anomaly,
            initial,
            sin_guess,
            cos_guess,
        );

        let second = householder::step::<2, T, V>(&state);
        let (delta, corr) = if eccentricity < T::cst(0.78) {
            (second, second)
        } else {
            let third = householder::step::<3, T, V>(&state);
            let third_corr = third * (third * third).fnma(V::splat(constants::hh3()), one);
            let away = mean_anomaly.gt(V::splat(T::cst(0.4)));
            (
                V::select(away, second, third),
                V::select(away, second, third_corr),
            )
        };

        let factor = (delta * delta).fnma(V::splat(constants::hh2()), one);
        let sin_out = corr.fma(cos_guess, sin_guess * factor);
        let cos_out = corr.fnma(sin_guess, cos_guess * factor);
        (initial + delta, sin_out, cos_out)
    }
}

impl<T: Scalar> Refiner<T> for Brandt {
    #[inline]
    fn refine<V: Vector<T>>(&self, eccentricity: T, mean_anomaly: V, initial: V) -> V {
        self.refine_full(eccentricity, mean_anomaly, initial).0
    }

    #[inline]
    fn refine_full<V: Vector<T>>(
        &self,
        eccentricity: T,
        mean_anomaly: V,
        initial: V,
    ) -> (V, V, V) {
        if eccentricity < T::default_tolerance() {
            // Effectively circular: the reduced mean anomaly already is the
            // eccentric anomaly.
            let (sin, cos) = math::sincos(initial);
            return (initial, sin, cos);
        }
        Self::refine_parts(eccentricity, mean_anomaly, initial)
    }
}
