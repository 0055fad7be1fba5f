//! Initial-guess strategies for the eccentric anomaly.
//!
//! A starter is constructed once per eccentricity and then queried for every
//! reduced mean anomaly M̅ ∈ [0, π] in the batch. The choice of starter sets
//! how much work the refiner has left to do: `Basic` needs a full iterative
//! refiner behind it, while `Markley` and `RaposoPulidoBrandt` are accurate
//! enough that a single high-order Householder step reaches machine
//! precision.

use crate::constants;
use crate::simd::{Scalar, Vector};

/// An initial-guess generator for a fixed eccentricity.
///
/// Implementations hold only values precomputed from the eccentricity, so a
/// starter can be shared freely across threads and reused for any number of
/// anomalies.
pub trait Starter<T: Scalar> {
    /// Precompute the starter for one eccentricity.
    fn new(eccentricity: T) -> Self;

    /// Initial guess Ẽ for the reduced mean anomaly M̅ ∈ [0, π].
    fn start<V: Vector<T>>(&self, mean_anomaly: V) -> V;
}

/// The identity guess Ẽ = M̅; a testing aid.
#[derive(Debug, Clone, Copy)]
pub struct Noop;

impl<T: Scalar> Starter<T> for Noop {
    #[inline]
    fn new(_eccentricity: T) -> Self {
        Self
    }

    #[inline]
    fn start<V: Vector<T>>(&self, mean_anomaly: V) -> V {
        mean_anomaly
    }
}

/// The classic offset guess Ẽ = M̅ + 0.85·e.
#[derive(Debug, Clone, Copy)]
pub struct Basic<T> {
    offset: T,
}

impl<T: Scalar> Starter<T> for Basic<T> {
    #[inline]
    fn new(eccentricity: T) -> Self {
        Self {
            offset: T::cst(0.85) * eccentricity,
        }
    }

    #[inline]
    fn start<V: Vector<T>>(&self, mean_anomaly: V) -> V {
        mean_anomaly + V::splat(self.offset)
    }
}

/// Mikkola (1987): a cubic-equation approximation accurate to ~2e−3 relative.
///
/// Reference: <https://ui.adsabs.harvard.edu/abs/1987CeMec..40..329M/abstract>
#[derive(Debug, Clone, Copy)]
pub struct Mikkola<T> {
    eccentricity: T,
    half_factor: T,
    alpha: T,
    alpha3: T,
    fifth: T,
}

impl<T: Scalar> Starter<T> for Mikkola<T> {
    #[inline]
    fn new(eccentricity: T) -> Self {
        let factor = T::one() / (T::cst(4.0) * eccentricity + T::cst(0.5));
        let alpha = (T::one() - eccentricity) * factor;
        Self {
            eccentricity,
            half_factor: T::cst(0.5) * factor,
            alpha,
            alpha3: alpha * alpha * alpha,
            fifth: T::cst(0.078) / (T::one() + eccentricity),
        }
    }

    #[inline]
    fn start<V: Vector<T>>(&self, mean_anomaly: V) -> V {
        let beta = V::splat(self.half_factor) * mean_anomaly;
        let root = beta.fma(beta, V::splat(self.alpha3)).sqrt();
        let z = (beta + root.with_sign_of(beta)).cbrt();
        let s = z - V::splat(self.alpha) / z;
        let s2 = s * s;
        let s = s - V::splat(self.fifth) * (s2 * s2 * s);
        let three_minus_4s2 = (V::splat(T::cst(4.0)) * s).fnma(s, V::splat(T::cst(3.0)));
        (V::splat(self.eccentricity) * s).fma(three_minus_4s2, mean_anomaly)
    }
}

/// Markley (1995): a non-iterative starter accurate to ~5e−4 relative,
/// intended to be paired with a single third-order refinement step.
///
/// Reference: <https://ui.adsabs.harvard.edu/abs/1995CeMDA..63..101M/abstract>
#[derive(Debug, Clone, Copy)]
pub struct Markley<T> {
    eccentricity: T,
    ome: T,
}

impl<T: Scalar> Starter<T> for Markley<T> {
    #[inline]
    fn new(eccentricity: T) -> Self {
        Self {
            eccentricity,
            ome: T::one() - eccentricity,
        }
    }

    #[inline]
    fn start<V: Vector<T>>(&self, mean_anomaly: V) -> V {
        let m2 = mean_anomaly * mean_anomaly;

        let alpha_slope = constants::markley_factor2::<T>() / (T::one() + self.eccentricity);
        let alpha = V::splat(alpha_slope).fma(
            V::splat(constants::pi()) - mean_anomaly,
            V::splat(constants::markley_factor1()),
        );

        let d = V::splat(self.eccentricity).fma(alpha, V::splat(T::cst(3.0) * self.ome));
        let alpha = alpha * d;

        let r = mean_anomaly * (V::splat(T::cst(3.0)) * alpha).fma(d - V::splat(self.ome), m2);
        let q = V::splat(T::cst(2.0) * self.ome).fma(alpha, -m2);
        let q2 = q * q;

        let w = (r.abs() + q2.fma(q, r * r).sqrt()).cbrt();
        let w = w * w;

        let denom = w.fma(w + q, q2);
        (V::splat(T::cst(2.0)) * r / denom).fma(w, mean_anomaly) / d
    }
}

/// Raposo-Pulido & Pelaez (2017) / Brandt et al. (2021): a piecewise-quintic
/// fit over twelve segments of [0, π], with a series expansion in the
/// singular corner e → 1, M̅ → 0.
///
/// Accurate enough that one second- or third-order Householder step reaches
/// machine precision at any eccentricity, which is how the default solver
/// composition uses it.
///
/// References:
/// <https://ui.adsabs.harvard.edu/abs/2017MNRAS.467.1702R/abstract>,
/// <https://ui.adsabs.harvard.edu/abs/2021AJ....162..186B/abstract>
#[derive(Debug, Clone)]
pub struct RaposoPulidoBrandt<T> {
    eccentricity: T,
    ome: T,
    sqrt_ome: T,
    chi_scale: T,
    bounds: [T; 13],
    table: [T; 78],
}

impl<T: Scalar> RaposoPulidoBrandt<T> {
    /// Segment boundaries bounds[k] = kπ/12 − e·sin(kπ/12).
    #[inline]
    #[must_use]
    pub fn bounds(&self) -> &[T; 13] {
        &self.bounds
    }

    /// Series solution for the singular corner, valid for small M̅ at high
    /// eccentricity.
    #[inline]
    #[must_use]
    pub fn singular<V: Vector<T>>(&self, mean_anomaly: V) -> V {
        let one = V::splat(T::one());
        let chi = mean_anomaly / V::splat(self.chi_scale);
        let lambda = (V::splat(T::cst(9.0)) * chi)
            .fma(chi, V::splat(T::cst(8.0)))
            .sqrt();
        let s = V::splat(T::cst(3.0)).fma(chi, lambda).cbrt();
        let s = s * s;
        let sigma =
            V::splat(T::cst(6.0)) * chi / (V::splat(T::cst(2.0)) + s + V::splat(T::cst(4.0)) / s);
        let s2 = sigma * sigma;
        let denom = one / (s2 + V::splat(T::cst(2.0)));
        let ome = V::splat(self.ome);
        let arg = ome * s2 * denom * denom
            * s2.fma(
                s2.fma(s2 + V::splat(T::cst(25.0)), V::splat(T::cst(340.0))),
                V::splat(T::cst(840.0)),
            );
        let series = (ome * s2).fma(
            denom
                * ((s2 + V::splat(T::cst(20.0))) / V::splat(T::cst(60.0))
                    + arg / V::splat(T::cst(1400.0))),
            one,
        );
        sigma * V::splat(self.sqrt_ome) * series
    }

    /// Piecewise-quintic lookup: descending masked scan for the segment
    /// holding M̅, then a Horner evaluation of its six coefficients.
    #[inline]
    #[must_use]
    pub fn lookup<V: Vector<T>>(&self, mean_anomaly: V) -> V {
        let zero = V::splat(T::zero());
        let mut result = mean_anomaly;
        // True for every non-NaN lane; NaN lanes keep their input.
        let mut remaining = mean_anomaly.ge(V::splat(T::neg_infinity()));
        for j in (0..12).rev() {
            let dx = mean_anomaly - V::splat(self.bounds[j]);
            let k = 6 * j;
            let mut acc = V::splat(self.table[k + 5]);
            for c in self.table[k..k + 5].iter().rev() {
                acc = acc.fma(dx, V::splat(*c));
            }
            result = V::select(dx.ge(zero) & remaining, acc, result);
            remaining = remaining & dx.lt(zero);
            if !V::any(remaining) {
                break;
            }
        }
        result
    }
}

impl<T: Scalar> Starter<T> for RaposoPulidoBrandt<T> {
    fn new(eccentricity: T) -> Self {
        let ome = T::one() - eccentricity;
        let sqrt_ome = ome.sqrt();

        let g2s_e = constants::rppb_g2s::<T>() * eccentricity;
        let g3s_e = constants::rppb_g3s::<T>() * eccentricity;
        let g4s_e = constants::rppb_g4s::<T>() * eccentricity;
        let g5s_e = constants::rppb_g5s::<T>() * eccentricity;
        let g6s_e = constants::rppb_g6s::<T>() * eccentricity;
        let g2c_e = g6s_e;
        let g3c_e = g5s_e;
        let g4c_e = g4s_e;
        let g5c_e = g3s_e;
        let g6c_e = g2s_e;

        let pio12 = constants::pio12::<T>();
        let mut bounds = [T::zero(); 13];
        bounds[1] = pio12 - g2s_e;
        bounds[2] = constants::pio6::<T>() - g3s_e;
        bounds[3] = constants::pio4::<T>() - g4s_e;
        bounds[4] = constants::pio3::<T>() - g5s_e;
        bounds[5] = constants::fivepio12::<T>() - g6s_e;
        bounds[6] = constants::pio2::<T>() - eccentricity;
        bounds[7] = constants::sevenpio12::<T>() - g6s_e;
        bounds[8] = constants::twopio3::<T>() - g5s_e;
        bounds[9] = constants::threepio4::<T>() - g4s_e;
        bounds[10] = constants::fivepio6::<T>() - g3s_e;
        bounds[11] = constants::elevenpio12::<T>() - g2s_e;
        bounds[12] = constants::pi::<T>();

        // Value and first two derivatives of E(M̅) at each segment endpoint:
        // E = kπ/12, dE/dM̅ = 1/(1 − e·cos(kπ/12)), and the second-derivative
        // seed −½·e·sin(kπ/12)·(dE/dM̅)³.
        let mut table = [T::zero(); 78];
        let half = T::cst(0.5);
        table[1] = T::one() / (T::one() - eccentricity);

        let left = [g2s_e, g3s_e, g4s_e, g5s_e, g6s_e];
        let left_cos = [g2c_e, g3c_e, g4c_e, g5c_e, g6c_e];
        for (i, (&gs, &gc)) in left.iter().zip(left_cos.iter()).enumerate() {
            let x = T::one() / (T::one() - gc);
            table[6 * (i + 1) + 1] = x;
            table[6 * (i + 1) + 2] = -half * gs * x * x * x;
        }

        table[37] = T::one();
        table[38] = -half * eccentricity;

        let right = [g6s_e, g5s_e, g4s_e, g3s_e, g2s_e];
        let right_cos = [g6c_e, g5c_e, g4c_e, g3c_e, g2c_e];
        for (i, (&gs, &gc)) in right.iter().zip(right_cos.iter()).enumerate() {
            let x = T::one() / (T::one() + gc);
            table[6 * (i + 7) + 1] = x;
            table[6 * (i + 7) + 2] = -half * gs * x * x * x;
        }

        table[73] = T::one() / (T::one() + eccentricity);

        // The remaining quintic coefficients come from matching value and
        // derivative at both endpoints plus the second-derivative seeds.
        for i in 0_u8..12 {
            let seg = usize::from(i);
            let k = 6 * seg;
            table[k] = T::cst(f64::from(i)) * pio12;

            let idx = T::one() / (bounds[seg + 1] - bounds[seg]);
            let b0 = idx * (-table[k + 2] - idx * (table[k + 1] - idx * pio12));
            let b1 = idx * (-(table[k + 2] + table[k + 2]) - idx * (table[k + 1] - table[k + 7]));
            let b2 = idx * (table[k + 8] - table[k + 2]);

            table[k + 3] = b2 - T::cst(4.0) * b1 + T::cst(10.0) * b0;
            table[k + 4] = (-(b2 + b2) + T::cst(7.0) * b1 - T::cst(15.0) * b0) * idx;
            table[k + 5] = (b2 - T::cst(3.0) * b1 + T::cst(6.0) * b0) * idx * idx;
        }

        Self {
            eccentricity,
            ome,
            sqrt_ome,
            chi_scale: ome * sqrt_ome,
            bounds,
            table,
        }
    }

    #[inline]
    fn start<V: Vector<T>>(&self, mean_anomaly: V) -> V {
        if self.eccentricity < T::cst(0.78) {
            return self.lookup(mean_anomaly);
        }
        // Branch-lean: both candidates are computed and the corner lanes
        // selected by mask.
        let in_corner = V::splat(T::cst(2.0))
            .fma(mean_anomaly, V::splat(self.ome))
            .le(V::splat(T::cst(0.2)));
        V::select(in_corner, self.singular(mean_anomaly), self.lookup(mean_anomaly))
    }
}
