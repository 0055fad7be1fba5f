//! Root-finding updates for Kepler's equation by Householder's method to
//! arbitrary order.
//!
//! Nearly every Kepler solver is built from these updates: iterative schemes
//! apply them repeatedly, while two-step schemes pair one high-order update
//! with a high-precision starter. Usage:
//!
//! ```
//! use kepler_batch::householder;
//!
//! let state = householder::init(0.65_f64, 0.123, 0.5);
//! let delta = householder::step::<3, f64, f64>(&state);
//! assert!(delta.is_finite());
//! ```
//!
//! `ORDER = 1` is Newton's method and `ORDER = 3` Halley's rational form. The
//! order is a const generic, so the update recursion unrolls into the same
//! straight-line arithmetic as a hand-written method of that order.
//!
//! The key simplification: for n ≥ 2 every derivative of
//! f(E) = E − e·sin E − M is ±e·sin E (n even) or ±e·cos E (n odd), with the
//! sign flipping on the parity of ⌊n/2⌋, so the state caches just three
//! values.

use crate::constants;
use crate::math;
use crate::simd::{Scalar, Vector};

/// Cached quantities needed to perform an update at the current iterate.
#[derive(Debug, Clone, Copy)]
pub struct State<V> {
    /// `E − e·sin E − M` at the current iterate; the residual driving
    /// convergence tests.
    pub f0: V,
    /// `e·sin E` at the current iterate.
    pub ecc_sin: V,
    /// `e·cos E` at the current iterate.
    pub ecc_cos: V,
}

/// Build the update state from the current eccentric-anomaly iterate.
#[inline]
#[must_use]
pub fn init<T: Scalar, V: Vector<T>>(eccentricity: T, mean_anomaly: V, ecc_anomaly: V) -> State<V> {
    let (sin, cos) = math::sincos(ecc_anomaly);
    init_with_sincos(eccentricity, mean_anomaly, ecc_anomaly, sin, cos)
}

/// Build the update state when sin E and cos E are already in hand.
#[inline]
#[must_use]
pub fn init_with_sincos<T: Scalar, V: Vector<T>>(
    eccentricity: T,
    mean_anomaly: V,
    ecc_anomaly: V,
    sin: V,
    cos: V,
) -> State<V> {
    let ecc = V::splat(eccentricity);
    let ecc_sin = ecc * sin;
    let ecc_cos = ecc * cos;
    State {
        f0: ecc_anomaly - ecc_sin - mean_anomaly,
        ecc_sin,
        ecc_cos,
    }
}

/// The order-`ORDER` Householder correction ΔE for the cached state.
///
/// With a_k = f⁽ᵏ⁾(E)/k!, the update is the recursion
/// d₁ = −f0/a₁, d_k = −f0 / (a₁ + d_{k−1}·(a₂ + d_{k−1}·(… a_k))), and
/// ΔE = d_ORDER. Orders 1 through 7 are supported; the factorial reciprocals
/// come from the bit-exact constant table.
#[inline]
#[must_use]
pub fn step<const ORDER: usize, T: Scalar, V: Vector<T>>(state: &State<V>) -> V {
    const {
        assert!(ORDER >= 1 && ORDER <= 7, "supported Householder orders are 1..=7");
    }
    let factorial_recip: [T; 7] = [
        T::one(),
        constants::hh2(),
        constants::hh3(),
        constants::hh4(),
        constants::hh5(),
        constants::hh6(),
        constants::hh7(),
    ];

    let mut scaled = [state.f0; ORDER];
    let mut order = 1;
    while order <= ORDER {
        let derivative = match order {
            1 => V::splat(T::one()) - state.ecc_cos,
            2 => state.ecc_sin,
            3 => state.ecc_cos,
            even if even % 2 == 0 => {
                if even % 4 < 2 {
                    -state.ecc_sin
                } else {
                    state.ecc_sin
                }
            }
            odd => {
                if odd % 4 < 2 {
                    -state.ecc_cos
                } else {
                    state.ecc_cos
                }
            }
        };
        scaled[order - 1] = derivative * V::splat(factorial_recip[order - 1]);
        order += 1;
    }

    let mut delta = -state.f0 / scaled[0];
    let mut k = 2;
    while k <= ORDER {
        let mut acc = scaled[k - 1];
        let mut j = k - 1;
        while j > 0 {
            j -= 1;
            acc = acc.fma(delta, scaled[j]);
        }
        delta = -state.f0 / acc;
        k += 1;
    }
    delta
}
