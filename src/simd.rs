//! Scalar and batch abstractions for the solver kernels.
//!
//! Every numerical kernel in this crate is written once, generically over a
//! [`Vector`] of lanes. A plain `f32`/`f64` is a one-lane vector, and the
//! `wide` batch types provide the native-width lanes, so the scalar and SIMD
//! pipelines share a single code path and agree lane-for-lane by construction.
//!
//! Operations that the batch types do not provide natively (`cbrt`, the
//! large-argument remainder) fall back to per-lane scalar evaluation, which
//! keeps them bit-identical to the one-lane pipeline.

use core::ops::{Add, BitAnd, BitOr, Div, Mul, Neg, Sub};

use num_traits::Float;
use wide::{f32x8, f64x4};

/// Floating-point scalar driving the precision of the whole pipeline.
///
/// Implemented for `f32` and `f64` only; all constants, tables, and
/// intermediates stay in this type with no mixed-precision promotion.
pub trait Scalar: Float + Send + Sync + 'static {
    /// Native-width batch type for this scalar.
    type Batch: Vector<Self>;

    /// Reconstruct a constant from its exact IEEE-754 bit pattern.
    ///
    /// Constants are never produced by runtime arithmetic such as `PI / 12.0`;
    /// the bit patterns pin the values across platforms and precisions.
    fn constant(bits32: u32, bits64: u64) -> Self;

    /// Narrow a literal given as `f64` into this scalar type.
    fn cst(value: f64) -> Self;

    /// Default refiner tolerance: `1e-12` for `f64`, `1e-6` for `f32`.
    fn default_tolerance() -> Self;

    /// Round to the nearest integer, ties to even.
    fn round_ties(self) -> Self;

    /// Exact remainder modulo π/2 for arguments beyond the Cody-Waite range.
    ///
    /// Returns the reduced argument in [−π/4, π/4] and the quadrant in 0..=3.
    /// Non-finite inputs yield (NaN, 0).
    fn rem_pio2_large(self) -> (Self, u32);

    /// Minimax polynomial for sin(x) with z = x², valid for |x| ≤ π/2.
    ///
    /// The coefficient set is precision-specific (degree 7 in single, 13 in
    /// double), which is why this lives on the scalar rather than in the
    /// generic kernel.
    fn sin_eval(z: Self, x: Self) -> Self;

    /// Minimax polynomial for cos(x) with z = x², valid for |x| ≤ π/2.
    fn cos_eval(z: Self) -> Self;
}

impl Scalar for f32 {
    type Batch = f32x8;

    #[inline]
    fn constant(bits32: u32, _bits64: u64) -> Self {
        Self::from_bits(bits32)
    }

    #[inline]
    #[allow(
        clippy::cast_possible_truncation,
        reason = "Narrowing a literal to f32 is the purpose of this method"
    )]
    fn cst(value: f64) -> Self {
        value as f32
    }

    #[inline]
    fn default_tolerance() -> Self {
        1e-6
    }

    #[inline]
    fn round_ties(self) -> Self {
        self.round_ties_even()
    }

    #[inline]
    #[allow(
        clippy::cast_possible_truncation,
        reason = "The f64 remainder is exact for every f32 input before narrowing"
    )]
    fn rem_pio2_large(self) -> (Self, u32) {
        let (r, q) = crate::reduction::rem_pio2(f64::from(self));
        (r as f32, q)
    }

    #[inline]
    fn sin_eval(z: Self, x: Self) -> Self {
        let y = Self::from_bits(0xb94c_a1f9)
            .mul_add(z, Self::from_bits(0x3c08_839d))
            .mul_add(z, Self::from_bits(0xbe2a_aaa2));
        (y * z).mul_add(x, x)
    }

    #[inline]
    fn cos_eval(z: Self) -> Self {
        let y = Self::from_bits(0x37cc_f5ce)
            .mul_add(z, Self::from_bits(0xbab6_0619))
            .mul_add(z, Self::from_bits(0x3d2a_aaa5));
        z.mul_add(-0.5, y * z * z) + 1.0
    }
}

impl Scalar for f64 {
    type Batch = f64x4;

    #[inline]
    fn constant(_bits32: u32, bits64: u64) -> Self {
        Self::from_bits(bits64)
    }

    #[inline]
    fn cst(value: f64) -> Self {
        value
    }

    #[inline]
    fn default_tolerance() -> Self {
        1e-12
    }

    #[inline]
    fn round_ties(self) -> Self {
        self.round_ties_even()
    }

    #[inline]
    fn rem_pio2_large(self) -> (Self, u32) {
        crate::reduction::rem_pio2(self)
    }

    #[inline]
    fn sin_eval(z: Self, x: Self) -> Self {
        let y = Self::from_bits(0x3de5_d8fd_1fcf_0ec1)
            .mul_add(z, Self::from_bits(0xbe5a_e5e5_a929_1691))
            .mul_add(z, Self::from_bits(0x3ec7_1de3_567d_4896))
            .mul_add(z, Self::from_bits(0xbf2a_01a0_19bf_df03))
            .mul_add(z, Self::from_bits(0x3f81_1111_1110_f7d0))
            .mul_add(z, Self::from_bits(0xbfc5_5555_5555_5548));
        (y * z).mul_add(x, x)
    }

    #[inline]
    fn cos_eval(z: Self) -> Self {
        let y = Self::from_bits(0x3da8_ff83_1ad9_b219)
            .mul_add(z, Self::from_bits(0xbe21_eea7_c1e5_14d4))
            .mul_add(z, Self::from_bits(0x3e92_7e4f_8e06_d9a5))
            .mul_add(z, Self::from_bits(0xbefa_01a0_19dd_bcd9))
            .mul_add(z, Self::from_bits(0x3f56_c16c_16c1_5d47))
            .mul_add(z, Self::from_bits(0xbfa5_5555_5555_5551))
            .mul_add(z, Self::from_bits(0x3fe0_0000_0000_0000));
        1.0 - y * z
    }
}

/// A fixed-width vector of [`Scalar`] lanes.
///
/// Width 1 (the scalar itself) is always a valid implementation, which is how
/// hosts without SIMD honour the batch contract and how trailing batch
/// elements are handled.
pub trait Vector<T: Scalar>:
    Copy
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + Neg<Output = Self>
{
    /// Lane-wise boolean mask produced by comparisons.
    type Mask: Copy + BitAnd<Output = Self::Mask> + BitOr<Output = Self::Mask>;

    /// Number of lanes.
    const LANES: usize;

    /// Broadcast one scalar into every lane.
    fn splat(value: T) -> Self;

    /// Load lanes from the front of a slice (unaligned).
    fn from_slice(slice: &[T]) -> Self;

    /// Store lanes to the front of a mutable slice.
    fn write_to(self, out: &mut [T]);

    /// Fused multiply-add `self * b + c`.
    fn fma(self, b: Self, c: Self) -> Self;

    /// Fused negated multiply-add `c - self * b`.
    #[inline]
    fn fnma(self, b: Self, c: Self) -> Self {
        (-self).fma(b, c)
    }

    /// Lane-wise square root.
    fn sqrt(self) -> Self;

    /// Lane-wise absolute value.
    fn abs(self) -> Self;

    /// Lane-wise cube root.
    fn cbrt(self) -> Self;

    /// Lane-wise round to nearest, ties to even.
    fn round_ties(self) -> Self;

    /// Lane-wise floor.
    fn floor(self) -> Self;

    /// `self < rhs` per lane.
    fn lt(self, rhs: Self) -> Self::Mask;

    /// `self <= rhs` per lane.
    fn le(self, rhs: Self) -> Self::Mask;

    /// `self > rhs` per lane.
    fn gt(self, rhs: Self) -> Self::Mask;

    /// `self >= rhs` per lane.
    fn ge(self, rhs: Self) -> Self::Mask;

    /// Pick `if_true` lanes where the mask is set, `if_false` elsewhere.
    fn select(mask: Self::Mask, if_true: Self, if_false: Self) -> Self;

    /// True if any lane of the mask is set.
    fn any(mask: Self::Mask) -> bool;

    /// True if every lane of the mask is set.
    fn all(mask: Self::Mask) -> bool;

    /// Magnitude of `self` with the sign of `sign`, per lane.
    #[inline]
    fn with_sign_of(self, sign: Self) -> Self {
        let mag = self.abs();
        Self::select(sign.lt(Self::splat(T::zero())), -mag, mag)
    }

    /// Apply a scalar function to every lane.
    fn map(self, f: impl FnMut(T) -> T) -> Self;
}

impl<T: Scalar> Vector<T> for T {
    type Mask = bool;

    const LANES: usize = 1;

    #[inline]
    fn splat(value: T) -> Self {
        value
    }

    #[inline]
    fn from_slice(slice: &[T]) -> Self {
        slice[0]
    }

    #[inline]
    fn write_to(self, out: &mut [T]) {
        out[0] = self;
    }

    #[inline]
    fn fma(self, b: Self, c: Self) -> Self {
        self.mul_add(b, c)
    }

    #[inline]
    fn sqrt(self) -> Self {
        Float::sqrt(self)
    }

    #[inline]
    fn abs(self) -> Self {
        Float::abs(self)
    }

    #[inline]
    fn cbrt(self) -> Self {
        Float::cbrt(self)
    }

    #[inline]
    fn round_ties(self) -> Self {
        Scalar::round_ties(self)
    }

    #[inline]
    fn floor(self) -> Self {
        Float::floor(self)
    }

    #[inline]
    fn lt(self, rhs: Self) -> bool {
        self < rhs
    }

    #[inline]
    fn le(self, rhs: Self) -> bool {
        self <= rhs
    }

    #[inline]
    fn gt(self, rhs: Self) -> bool {
        self > rhs
    }

    #[inline]
    fn ge(self, rhs: Self) -> bool {
        self >= rhs
    }

    #[inline]
    fn select(mask: bool, if_true: Self, if_false: Self) -> Self {
        if mask { if_true } else { if_false }
    }

    #[inline]
    fn any(mask: bool) -> bool {
        mask
    }

    #[inline]
    fn all(mask: bool) -> bool {
        mask
    }

    #[inline]
    fn with_sign_of(self, sign: Self) -> Self {
        Float::copysign(self, sign)
    }

    #[inline]
    fn map(self, mut f: impl FnMut(T) -> T) -> Self {
        f(self)
    }
}

impl Vector<f64> for f64x4 {
    type Mask = Self;

    const LANES: usize = 4;

    #[inline]
    fn splat(value: f64) -> Self {
        Self::splat(value)
    }

    #[inline]
    fn from_slice(slice: &[f64]) -> Self {
        Self::new([slice[0], slice[1], slice[2], slice[3]])
    }

    #[inline]
    fn write_to(self, out: &mut [f64]) {
        out[..4].copy_from_slice(&self.to_array());
    }

    #[inline]
    fn fma(self, b: Self, c: Self) -> Self {
        self.mul_add(b, c)
    }

    #[inline]
    fn sqrt(self) -> Self {
        Self::sqrt(self)
    }

    #[inline]
    fn abs(self) -> Self {
        Self::abs(self)
    }

    #[inline]
    fn cbrt(self) -> Self {
        // No native batch cbrt; per-lane keeps parity with the scalar path.
        Vector::<f64>::map(self, f64::cbrt)
    }

    #[inline]
    fn round_ties(self) -> Self {
        self.round()
    }

    #[inline]
    fn floor(self) -> Self {
        Self::floor(self)
    }

    #[inline]
    fn lt(self, rhs: Self) -> Self {
        self.simd_lt(rhs)
    }

    #[inline]
    fn le(self, rhs: Self) -> Self {
        self.simd_le(rhs)
    }

    #[inline]
    fn gt(self, rhs: Self) -> Self {
        self.simd_gt(rhs)
    }

    #[inline]
    fn ge(self, rhs: Self) -> Self {
        self.simd_ge(rhs)
    }

    #[inline]
    fn select(mask: Self, if_true: Self, if_false: Self) -> Self {
        mask.select(if_true, if_false)
    }

    #[inline]
    fn any(mask: Self) -> bool {
        mask.to_array().iter().any(|lane| lane.to_bits() != 0)
    }

    #[inline]
    fn all(mask: Self) -> bool {
        mask.to_array().iter().all(|lane| lane.to_bits() != 0)
    }

    #[inline]
    fn map(self, mut f: impl FnMut(f64) -> f64) -> Self {
        let a = self.to_array();
        Self::new([f(a[0]), f(a[1]), f(a[2]), f(a[3])])
    }
}

impl Vector<f32> for f32x8 {
    type Mask = Self;

    const LANES: usize = 8;

    #[inline]
    fn splat(value: f32) -> Self {
        Self::splat(value)
    }

    #[inline]
    fn from_slice(slice: &[f32]) -> Self {
        Self::new([
            slice[0], slice[1], slice[2], slice[3], slice[4], slice[5], slice[6], slice[7],
        ])
    }

    #[inline]
    fn write_to(self, out: &mut [f32]) {
        out[..8].copy_from_slice(&self.to_array());
    }

    #[inline]
    fn fma(self, b: Self, c: Self) -> Self {
        self.mul_add(b, c)
    }

    #[inline]
    fn sqrt(self) -> Self {
        Self::sqrt(self)
    }

    #[inline]
    fn abs(self) -> Self {
        Self::abs(self)
    }

    #[inline]
    fn cbrt(self) -> Self {
        Vector::<f32>::map(self, f32::cbrt)
    }

    #[inline]
    fn round_ties(self) -> Self {
        self.round()
    }

    #[inline]
    fn floor(self) -> Self {
        Self::floor(self)
    }

    #[inline]
    fn lt(self, rhs: Self) -> Self {
        self.simd_lt(rhs)
    }

    #[inline]
    fn le(self, rhs: Self) -> Self {
        self.simd_le(rhs)
    }

    #[inline]
    fn gt(self, rhs: Self) -> Self {
        self.simd_gt(rhs)
    }

    #[inline]
    fn ge(self, rhs: Self) -> Self {
        self.simd_ge(rhs)
    }

    #[inline]
    fn select(mask: Self, if_true: Self, if_false: Self) -> Self {
        mask.select(if_true, if_false)
    }

    #[inline]
    fn any(mask: Self) -> bool {
        mask.to_array().iter().any(|lane| lane.to_bits() != 0)
    }

    #[inline]
    fn all(mask: Self) -> bool {
        mask.to_array().iter().all(|lane| lane.to_bits() != 0)
    }

    #[inline]
    fn map(self, mut f: impl FnMut(f32) -> f32) -> Self {
        let a = self.to_array();
        Self::new([
            f(a[0]),
            f(a[1]),
            f(a[2]),
            f(a[3]),
            f(a[4]),
            f(a[5]),
            f(a[6]),
            f(a[7]),
        ])
    }
}
