use crate::common::constants::{CATION_SPLIT_POTASSIUM, NEUTRALITY_TOLERANCE_MEQ};
use crate::common::ions::Ion;
use crate::domain::{ConcentrationVector, RecipeWarning, WarningKind};

/// Restores electrical neutrality by topping up the deficient side.
///
/// An anion deficit is covered with NO3 alone. A cation deficit is shared by
/// charge between K and Ca so neither side of their antagonism is favoured.
/// Values only ever grow here.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IonicBalancer {
    pub tolerance_meq: f64,
    pub potassium_share: f64,
}

impl Default for IonicBalancer {
    fn default() -> Self {
        Self {
            tolerance_meq: NEUTRALITY_TOLERANCE_MEQ,
            potassium_share: CATION_SPLIT_POTASSIUM,
        }
    }
}

impl IonicBalancer {
    pub fn balance(
        &self,
        adjusted: &ConcentrationVector,
    ) -> (ConcentrationVector, Vec<RecipeWarning>) {
        let imbalance = adjusted.charge_imbalance();

        if imbalance > self.tolerance_meq {
            let added = imbalance / Ion::Nitrate.valence();
            let balanced = adjusted.with(Ion::Nitrate, adjusted.get(Ion::Nitrate) + added);
            let note = RecipeWarning::new(Ion::Nitrate, WarningKind::AnionTopUp { added });
            return (balanced, vec![note]);
        }

        if imbalance < -self.tolerance_meq {
            let missing = -imbalance;
            let potassium = missing * self.potassium_share / Ion::Potassium.valence();
            let calcium = missing * (1.0 - self.potassium_share) / Ion::Calcium.valence();
            let balanced = adjusted
                .with(Ion::Potassium, adjusted.get(Ion::Potassium) + potassium)
                .with(Ion::Calcium, adjusted.get(Ion::Calcium) + calcium);
            let notes = vec![
                RecipeWarning::new(Ion::Potassium, WarningKind::CationTopUp { added: potassium }),
                RecipeWarning::new(Ion::Calcium, WarningKind::CationTopUp { added: calcium }),
            ];
            return (balanced, notes);
        }

        (*adjusted, Vec::new())
    }
}
