//! Bit-exact numerical constants.
//!
//! Every constant is stored as its IEEE-754 bit pattern for both precisions
//! and reconstructed with `from_bits`, never computed at runtime from π. This
//! pins the solver's arithmetic across platforms: two implementations that
//! agree on these patterns produce bit-identical reductions and starters.
//!
//! Hex patterns can be regenerated in Python with
//! `hex(struct.unpack('!Q', struct.pack('!d', v))[0])` (and `!L`/`!f` for the
//! single-precision column).

use crate::simd::Scalar;

macro_rules! define_constant {
    ($(#[$doc:meta])* $name:ident, $bits32:literal, $bits64:literal) => {
        $(#[$doc])*
        #[inline]
        #[must_use]
        pub fn $name<T: Scalar>() -> T {
            T::constant($bits32, $bits64)
        }
    };
}

define_constant!(
    /// π
    pi, 0x4049_0fdb, 0x4009_21fb_5444_2d18
);
define_constant!(
    /// 2π
    twopi, 0x40c9_0fdb, 0x4019_21fb_5444_2d18
);
define_constant!(
    /// π/2
    pio2, 0x3fc9_0fdb, 0x3ff9_21fb_5444_2d18
);
define_constant!(
    /// π/3
    pio3, 0x3f86_0a92, 0x3ff0_c152_382d_7365
);
define_constant!(
    /// π/4
    pio4, 0x3f49_0fdb, 0x3fe9_21fb_5444_2d18
);
define_constant!(
    /// π/6
    pio6, 0x3f06_0a92, 0x3fe0_c152_382d_7365
);
define_constant!(
    /// π/12
    pio12, 0x3e86_0a92, 0x3fd0_c152_382d_7365
);
define_constant!(
    /// 2π/3
    twopio3, 0x4006_0a92, 0x4000_c152_382d_7365
);
define_constant!(
    /// 3π/4
    threepio4, 0x4016_cbe4, 0x4002_d97c_7f33_21d2
);
define_constant!(
    /// 5π/6
    fivepio6, 0x4027_8d36, 0x4004_f1a6_c638_d03f
);
define_constant!(
    /// 5π/12
    fivepio12, 0x3fa7_8d36, 0x3ff4_f1a6_c638_d03f
);
define_constant!(
    /// 7π/12
    sevenpio12, 0x3fea_927f, 0x3ffd_524f_e24f_89f1
);
define_constant!(
    /// 11π/12
    elevenpio12, 0x4038_4e88, 0x4007_09d1_0d3e_7eab
);

// Limits for range reduction.
define_constant!(
    /// 20π, ceiling of the plain Cody-Waite tier
    twentypi, 0x427b_53d1, 0x404f_6a7a_2955_385e
);
define_constant!(
    /// 2/π
    twoopi, 0x3f22_f983, 0x3fe4_5f30_6dc9_c883
);
define_constant!(
    /// Ceiling of the compensated Cody-Waite tier (2⁷π single, 2¹⁸π double)
    mediumpi, 0x4349_0fdb, 0x4129_21fb_5444_2d18
);

// Higher precision digits of π/2 for extended-precision subtraction.
define_constant!(
    /// π/2, leading digits
    pio2_1, 0x3fc9_0f80, 0x3ff9_21fb_5440_0000
);
define_constant!(
    /// π/2 − pio2_1, full precision
    pio2_1t, 0x3735_4443, 0x3dd0_b461_1a62_6331
);
define_constant!(
    /// pio2_1t, leading digits
    pio2_2, 0x3735_4400, 0x3dd0_b461_1a60_0000
);
define_constant!(
    /// pio2_1t − pio2_2, full precision
    pio2_2t, 0x2e85_a308, 0x3ba3_198a_2e03_7073
);
define_constant!(
    /// pio2_2t, leading digits
    pio2_3, 0x2e85_a300, 0x3ba3_198a_2e00_0000
);
define_constant!(
    /// pio2_2t − pio2_3, full precision
    pio2_3t, 0x248d_3132, 0x397b_839a_2520_49c1
);

// Algorithm-specific constants.
define_constant!(
    /// Markley (1995) factor 3π/(π − 6/π)
    markley_factor1, 0x40f4_da39, 0x401e_9b47_1164_c596
);
define_constant!(
    /// Markley (1995) factor 1.6/(π − 6/π)
    markley_factor2, 0x3fa6_450f, 0x3ff4_c8a1_d518_acbd
);

// Grid seeds sin(kπ/12) for the Raposo-Pulido / Brandt coefficient table.
define_constant!(
    /// sin(π/12)
    rppb_g2s, 0x3e84_83ee, 0x3fd0_907d_c193_0690
);
define_constant!(
    /// sin(2π/12)
    rppb_g3s, 0x3f00_0000, 0x3fe0_0000_0000_0000
);
define_constant!(
    /// sin(3π/12)
    rppb_g4s, 0x3f35_04f3, 0x3fe6_a09e_667f_3bcc
);
define_constant!(
    /// sin(4π/12)
    rppb_g5s, 0x3f5d_b3d7, 0x3feb_b67a_e858_4caa
);
define_constant!(
    /// sin(5π/12)
    rppb_g6s, 0x3f77_46ea, 0x3fee_e8dd_4748_bf15
);

// Coefficients for the series expansion of sin(x): 1/3!, 1/5!, ..., 1/15!.
define_constant!(
    /// 1/3!
    shortsin1, 0x3e2a_aaab, 0x3fc5_5555_5555_5555
);
define_constant!(
    /// 1/5!
    shortsin2, 0x3c08_8889, 0x3f81_1111_1111_1111
);
define_constant!(
    /// 1/7!
    shortsin3, 0x3950_0d01, 0x3f2a_01a0_1a01_a01a
);
define_constant!(
    /// 1/9!
    shortsin4, 0x3638_ef1d, 0x3ec7_1de3_a556_c734
);
define_constant!(
    /// 1/11!
    shortsin5, 0x32d7_322b, 0x3e5a_e645_67f5_44e4
);
define_constant!(
    /// 1/13!
    shortsin6, 0x2f30_9231, 0x3de6_1246_13a8_6d09
);
define_constant!(
    /// 1/15!
    shortsin7, 0x2b57_3f9f, 0x3d6a_e7f3_e733_b81f
);

// Factorial reciprocals for Householder's method.
define_constant!(
    /// 1/2!
    hh2, 0x3f00_0000, 0x3fe0_0000_0000_0000
);
define_constant!(
    /// 1/3!
    hh3, 0x3e2a_aaab, 0x3fc5_5555_5555_5555
);
define_constant!(
    /// 1/4!
    hh4, 0x3d2a_aaab, 0x3fa5_5555_5555_5555
);
define_constant!(
    /// 1/5!
    hh5, 0x3c08_8889, 0x3f81_1111_1111_1111
);
define_constant!(
    /// 1/6!
    hh6, 0x3ab6_0b61, 0x3f56_c16c_16c1_6c17
);
define_constant!(
    /// 1/7!
    hh7, 0x3950_0d01, 0x3f2a_01a0_1a01_a01a
);
