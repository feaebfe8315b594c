use crate::domain::{ConcentrationVector, RecipeWarning, WarningKind};

/// Removes what the irrigation source already delivers from the drip target.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WaterCompensator;

impl WaterCompensator {
    pub fn subtract_water(
        &self,
        final_drip: &ConcentrationVector,
        water: &ConcentrationVector,
    ) -> (ConcentrationVector, Vec<RecipeWarning>) {
        let mut warnings = Vec::new();
        let need = final_drip.map(|ion, drip| {
            let need = drip - water.get(ion);
            if need < 0.0 {
                warnings.push(RecipeWarning::new(
                    ion,
                    WarningKind::WaterOverload { excess: -need },
                ));
                0.0
            } else {
                need
            }
        });
        (need, warnings)
    }
}

#[cfg(test)]
mod tests {
    use super::WaterCompensator;
    use crate::common::ions::Ion;
    use crate::domain::{ConcentrationVector, Severity, WarningKind};
    use approx::assert_relative_eq;

    #[test]
    fn water_content_is_subtracted_per_ion() {
        let drip = ConcentrationVector::from_pairs([(Ion::Sulfate, 1.26), (Ion::Magnesium, 1.71)]);
        let water = ConcentrationVector::from_pairs([(Ion::Sulfate, 0.5), (Ion::Magnesium, 0.3)]);
        let (need, warnings) = WaterCompensator.subtract_water(&drip, &water);

        assert_relative_eq!(need.get(Ion::Sulfate), 0.76, epsilon = 1.0e-12);
        assert_relative_eq!(need.get(Ion::Magnesium), 1.41, epsilon = 1.0e-12);
        assert!(warnings.is_empty());
    }

    #[test]
    fn overloaded_source_water_zeroes_the_need() {
        let drip = ConcentrationVector::from_pairs([(Ion::Calcium, 1.0)]);
        let water = ConcentrationVector::from_pairs([(Ion::Calcium, 3.0)]);
        let (need, warnings) = WaterCompensator.subtract_water(&drip, &water);

        assert_eq!(need.get(Ion::Calcium), 0.0);
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].ion, Ion::Calcium);
        assert_eq!(warnings[0].severity, Severity::Critical);
        assert_eq!(
            warnings[0].kind,
            WarningKind::WaterOverload { excess: 2.0 }
        );
    }

    #[test]
    fn exact_match_is_not_an_overload() {
        let drip = ConcentrationVector::from_pairs([(Ion::Magnesium, 0.3)]);
        let (need, warnings) = WaterCompensator.subtract_water(&drip, &drip);

        assert_eq!(need, ConcentrationVector::zero());
        assert!(warnings.is_empty());
    }
}
