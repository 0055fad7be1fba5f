//! Property-based tests over arbitrary (e, M) pairs.
//!
//! Inputs are mapped into the solver's domain rather than discarded: any
//! finite pair exercises the root property, odd symmetry, and periodicity.

use quickcheck::{QuickCheck, TestResult};

use crate::refiners::Brandt;
use crate::solver;
use crate::starters::{RaposoPulidoBrandt, Starter};
use crate::tests::kepler_residual;

/// Map an arbitrary float into an eccentricity in [0, 0.999].
fn fold_eccentricity(raw: f64) -> f64 {
    (raw.abs() % 1.0) * 0.999
}

fn root_property(raw_e: f64, mean: f64) -> TestResult {
    if !raw_e.is_finite() || !mean.is_finite() || mean.abs() > 50.0 {
        return TestResult::discard();
    }
    let eccentricity = fold_eccentricity(raw_e);
    let starter = RaposoPulidoBrandt::new(eccentricity);
    let (ecc_anom, sin_e, cos_e) = solver::solve_one(eccentricity, mean, &starter, &Brandt);
    let ok = kepler_residual(eccentricity, mean, ecc_anom) < 1e-11
        && (sin_e - ecc_anom.sin()).abs() < 1e-11
        && (cos_e - ecc_anom.cos()).abs() < 1e-11;
    TestResult::from_bool(ok)
}

fn odd_symmetry(raw_e: f64, mean: f64) -> TestResult {
    if !raw_e.is_finite() || !mean.is_finite() || mean.abs() > 50.0 {
        return TestResult::discard();
    }
    let eccentricity = fold_eccentricity(raw_e);
    let starter = RaposoPulidoBrandt::new(eccentricity);
    let (pos_e, pos_sin, pos_cos) = solver::solve_one(eccentricity, mean, &starter, &Brandt);
    let (neg_e, neg_sin, neg_cos) = solver::solve_one(eccentricity, -mean, &starter, &Brandt);
    let ok = (pos_e + neg_e).abs() < 1e-10
        && (pos_sin + neg_sin).abs() < 1e-11
        && (pos_cos - neg_cos).abs() < 1e-11;
    TestResult::from_bool(ok)
}

fn periodicity(raw_e: f64, mean: f64) -> TestResult {
    if !raw_e.is_finite() || !mean.is_finite() || mean.abs() > 50.0 {
        return TestResult::discard();
    }
    let eccentricity = fold_eccentricity(raw_e);
    let starter = RaposoPulidoBrandt::new(eccentricity);
    let (_, sin_a, cos_a) = solver::solve_one(eccentricity, mean, &starter, &Brandt);
    let (_, sin_b, cos_b) = solver::solve_one(
        eccentricity,
        mean + 2.0 * core::f64::consts::PI,
        &starter,
        &Brandt,
    );
    let ok = (sin_a - sin_b).abs() < 1e-11 && (cos_a - cos_b).abs() < 1e-11;
    TestResult::from_bool(ok)
}

#[test]
fn qc_root_property() {
    QuickCheck::new()
        .tests(1_000)
        .quickcheck(root_property as fn(f64, f64) -> TestResult);
}

#[test]
fn qc_odd_symmetry() {
    QuickCheck::new()
        .tests(1_000)
        .quickcheck(odd_symmetry as fn(f64, f64) -> TestResult);
}

#[test]
fn qc_periodicity() {
    QuickCheck::new()
        .tests(1_000)
        .quickcheck(periodicity as fn(f64, f64) -> TestResult);
}

#[test]
fn dense_grid_root_property() {
    use rand::{RngExt, SeedableRng, rngs::StdRng};

    // The deterministic counterpart: 100 eccentricities × 1000 anomalies
    // from a seeded generator.
    let mut rng = StdRng::seed_from_u64(0x517c_c1b7_2722_0a95);
    for n in 0..100 {
        let eccentricity = 0.999 * f64::from(n) / 99.0;
        let starter = RaposoPulidoBrandt::new(eccentricity);
        for _ in 0..1_000 {
            let mean = rng.random_range(-50.0..50.0);
            let (ecc_anom, sin_e, cos_e) =
                solver::solve_one(eccentricity, mean, &starter, &Brandt);
            assert!(
                kepler_residual(eccentricity, mean, ecc_anom) < 1e-11,
                "residual at e={eccentricity}, M={mean}"
            );
            assert!((sin_e - ecc_anom.sin()).abs() < 1e-11);
            assert!((cos_e - ecc_anom.cos()).abs() < 1e-11);
        }
    }
}
