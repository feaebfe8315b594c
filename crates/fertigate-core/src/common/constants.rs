//! Numeric constants of the feedback-compensation pipeline.
//!
//! The EC stage historically existed in two variants that differ only in the
//! floor applied to the estimated conductivity. Both floors are kept here and
//! the active one is chosen through [`crate::common::RecipeSettings`].

/// Share of the target value a single feedback correction may move.
pub const MAX_CORRECTION_RATIO: f64 = 0.6;

/// Cation/anion meq difference tolerated before the balancer intervenes.
pub const NEUTRALITY_TOLERANCE_MEQ: f64 = 0.1;

/// Floor on the cation meq sum before it is converted to an EC estimate.
pub const MEQ_FLOOR: f64 = 0.1;

/// Floor on the estimated EC (dS/m) of the two-floor EC stage.
pub const EC_FLOOR: f64 = 0.2;

/// Floor on the estimated EC (dS/m) of the single-floor EC stage, where the
/// meq sum is not floored separately.
pub const EC_FLOOR_SINGLE_STAGE: f64 = 0.1;

/// Empirical cation meq/L per dS/m used to estimate conductivity.
pub const MEQ_PER_DS_M: f64 = 10.0;

/// Fraction of a cation deficit (by charge) assigned to potassium; calcium
/// receives the remainder.
pub const CATION_SPLIT_POTASSIUM: f64 = 0.5;

/// Dripper EC used when no profile or input document provides one.
pub const DEFAULT_TARGET_EC: f64 = 2.5;

/// Damping factor recommended by Sonneveld to avoid osmotic oscillation.
pub const DEFAULT_CORRECTION_FACTOR: f64 = 0.5;

/// Decimal places used when results are displayed or exported.
pub const DISPLAY_DECIMALS: usize = 2;

#[cfg(test)]
mod tests {
    use super::{
        CATION_SPLIT_POTASSIUM, DEFAULT_CORRECTION_FACTOR, EC_FLOOR, EC_FLOOR_SINGLE_STAGE,
        MAX_CORRECTION_RATIO, MEQ_FLOOR, MEQ_PER_DS_M, NEUTRALITY_TOLERANCE_MEQ,
    };

    #[test]
    fn both_ec_floors_remain_distinct_and_positive() {
        assert!(EC_FLOOR > 0.0);
        assert!(EC_FLOOR_SINGLE_STAGE > 0.0);
        assert!(EC_FLOOR > EC_FLOOR_SINGLE_STAGE);
        assert_eq!(MEQ_FLOOR / MEQ_PER_DS_M, 0.01);
    }

    #[test]
    fn ratios_stay_within_unit_interval() {
        for value in [
            MAX_CORRECTION_RATIO,
            CATION_SPLIT_POTASSIUM,
            DEFAULT_CORRECTION_FACTOR,
        ] {
            assert!((0.0..=1.0).contains(&value));
        }
        assert!(NEUTRALITY_TOLERANCE_MEQ > 0.0);
    }
}
