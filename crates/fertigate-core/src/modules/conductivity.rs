use crate::common::constants::{EC_FLOOR, MEQ_FLOOR, MEQ_PER_DS_M};
use crate::common::ions::Polarity;
use crate::domain::ConcentrationVector;

/// Aggregates behind one EC normalization.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EcScaling {
    pub cation_meq: f64,
    pub estimated_ec: f64,
    pub ratio: f64,
}

/// Rescales the balanced solution so its estimated EC meets the target.
///
/// Conductivity is estimated linearly from the cation meq sum. NH4 and H2PO4
/// keep their balanced values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EcNormalizer {
    pub meq_floor: f64,
    pub ec_floor: f64,
    pub meq_per_ds_m: f64,
}

impl Default for EcNormalizer {
    fn default() -> Self {
        Self {
            meq_floor: MEQ_FLOOR,
            ec_floor: EC_FLOOR,
            meq_per_ds_m: MEQ_PER_DS_M,
        }
    }
}

impl EcNormalizer {
    pub fn scaling(&self, balanced: &ConcentrationVector, target_ec: f64) -> EcScaling {
        let cation_meq = balanced.meq_sum(Polarity::Cation);
        let estimated_ec = (cation_meq.max(self.meq_floor) / self.meq_per_ds_m).max(self.ec_floor);
        EcScaling {
            cation_meq,
            estimated_ec,
            ratio: target_ec / estimated_ec,
        }
    }

    pub fn normalize(
        &self,
        balanced: &ConcentrationVector,
        target_ec: f64,
    ) -> (ConcentrationVector, EcScaling) {
        let scaling = self.scaling(balanced, target_ec);
        let final_drip = balanced.map(|ion, value| {
            if ion.is_held_under_ec_scaling() {
                value
            } else {
                value * scaling.ratio
            }
        });
        (final_drip, scaling)
    }
}
