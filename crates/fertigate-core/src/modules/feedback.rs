use crate::common::constants::MAX_CORRECTION_RATIO;
use crate::common::ions::Ion;
use crate::domain::{ConcentrationVector, RecipeWarning, WarningKind};

/// Moves the uptake-based dosing toward the target by a damped fraction of
/// the measured substrate gap.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeedbackAdjuster {
    pub max_correction_ratio: f64,
}

impl Default for FeedbackAdjuster {
    fn default() -> Self {
        Self {
            max_correction_ratio: MAX_CORRECTION_RATIO,
        }
    }
}

impl FeedbackAdjuster {
    pub fn adjust(
        &self,
        target: &ConcentrationVector,
        analysis: &ConcentrationVector,
        uptake: &ConcentrationVector,
        factor: f64,
    ) -> (ConcentrationVector, Vec<RecipeWarning>) {
        let mut warnings = Vec::new();
        let adjusted = target.map(|ion, target_value| {
            let gap = target_value - analysis.get(ion);
            let correction = self.correction_term(ion, gap, target_value, factor, &mut warnings);

            let base = uptake.get(ion) + correction;
            if base < 0.0 {
                warnings.push(RecipeWarning::new(
                    ion,
                    WarningKind::SupplyCut { shortfall: -base },
                ));
                0.0
            } else {
                base
            }
        });
        (adjusted, warnings)
    }

    /// `gap * factor`, limited in magnitude to `max_correction_ratio` of the
    /// target. The clamped value takes the sign of the gap.
    fn correction_term(
        &self,
        ion: Ion,
        gap: f64,
        target_value: f64,
        factor: f64,
        warnings: &mut Vec<RecipeWarning>,
    ) -> f64 {
        let requested = gap * factor;
        let max_correction = target_value * self.max_correction_ratio;
        if requested.abs() <= max_correction {
            return requested;
        }

        let applied = if gap > 0.0 {
            max_correction
        } else {
            -max_correction
        };
        warnings.push(RecipeWarning::new(
            ion,
            WarningKind::CorrectionCapped { requested, applied },
        ));
        applied
    }
}

#[cfg(test)]
mod tests {
    use super::FeedbackAdjuster;
    use crate::common::ions::Ion;
    use crate::domain::{ConcentrationVector, Severity, WarningKind};
    use approx::assert_relative_eq;

    fn single(ion: Ion, value: f64) -> ConcentrationVector {
        ConcentrationVector::from_pairs([(ion, value)])
    }

    #[test]
    fn damped_gap_is_added_to_uptake() {
        let (adjusted, warnings) = FeedbackAdjuster::default().adjust(
            &single(Ion::Potassium, 6.5),
            &single(Ion::Potassium, 6.0),
            &single(Ion::Potassium, 7.0),
            0.5,
        );

        assert_relative_eq!(adjusted.get(Ion::Potassium), 7.25, epsilon = 1.0e-12);
        assert!(warnings.is_empty());
    }

    #[test]
    fn surplus_in_substrate_lowers_dosing() {
        let (adjusted, warnings) = FeedbackAdjuster::default().adjust(
            &single(Ion::Calcium, 2.75),
            &single(Ion::Calcium, 3.5),
            &single(Ion::Calcium, 2.0),
            0.5,
        );

        assert_relative_eq!(adjusted.get(Ion::Calcium), 1.625, epsilon = 1.0e-12);
        assert!(warnings.is_empty());
    }

    #[test]
    fn oversized_positive_correction_is_capped() {
        let (adjusted, warnings) = FeedbackAdjuster::default().adjust(
            &single(Ion::Nitrate, 10.0),
            &single(Ion::Nitrate, 0.0),
            &single(Ion::Nitrate, 0.0),
            1.0,
        );

        assert_relative_eq!(adjusted.get(Ion::Nitrate), 6.0, epsilon = 1.0e-12);
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].ion, Ion::Nitrate);
        assert_eq!(warnings[0].severity, Severity::Moderate);
        match warnings[0].kind {
            WarningKind::CorrectionCapped { requested, applied } => {
                assert_relative_eq!(requested, 10.0);
                assert_relative_eq!(applied, 6.0, epsilon = 1.0e-12);
            }
            other => panic!("unexpected warning kind: {other:?}"),
        }
    }

    #[test]
    fn negative_base_is_cut_to_zero_after_capping() {
        let (adjusted, warnings) = FeedbackAdjuster::default().adjust(
            &single(Ion::Sulfate, 5.0),
            &single(Ion::Sulfate, 20.0),
            &single(Ion::Sulfate, 0.0),
            1.0,
        );

        assert_eq!(adjusted.get(Ion::Sulfate), 0.0);
        let kinds: Vec<WarningKind> = warnings.iter().map(|warning| warning.kind).collect();
        assert_eq!(kinds.len(), 2);
        assert!(matches!(kinds[0], WarningKind::CorrectionCapped { .. }));
        match kinds[1] {
            WarningKind::SupplyCut { shortfall } => {
                assert_relative_eq!(shortfall, 3.0, epsilon = 1.0e-12)
            }
            other => panic!("unexpected warning kind: {other:?}"),
        }
        assert_eq!(warnings[1].severity, Severity::Critical);
    }

    #[test]
    fn zero_factor_returns_uptake_unchanged() {
        let uptake = ConcentrationVector::from_pairs([(Ion::Nitrate, 13.0), (Ion::Magnesium, 1.0)]);
        let (adjusted, warnings) = FeedbackAdjuster::default().adjust(
            &single(Ion::Nitrate, 12.0),
            &single(Ion::Nitrate, 2.0),
            &uptake,
            0.0,
        );

        assert_eq!(adjusted, uptake);
        assert!(warnings.is_empty());
    }

    #[test]
    fn correction_never_exceeds_configured_share_of_target() {
        let adjuster = FeedbackAdjuster {
            max_correction_ratio: 0.6,
        };
        for (target, analysis) in [(12.0, 0.0), (12.0, 40.0), (1.0, 0.9), (3.0, 3.0)] {
            let (adjusted, _) = adjuster.adjust(
                &single(Ion::Nitrate, target),
                &single(Ion::Nitrate, analysis),
                &single(Ion::Nitrate, 20.0),
                1.0,
            );
            let correction = adjusted.get(Ion::Nitrate) - 20.0;
            assert!(correction.abs() <= 0.6 * target + 1.0e-12);
        }
    }
}
