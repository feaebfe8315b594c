//! The four-stage drip recipe computation.
//!
//! Feedback adjustment, ionic balancing, EC normalization and water
//! compensation run unconditionally in that order. The run is a pure function
//! of its inputs and settings: no clocks, no I/O, no shared state.

use super::balance::IonicBalancer;
use super::conductivity::EcNormalizer;
use super::feedback::FeedbackAdjuster;
use super::water::WaterCompensator;
use crate::common::RecipeSettings;
use crate::domain::{PipelineDiagnostics, RecipeInputs, RecipeResult, WarningCollector};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RecipePipeline {
    feedback: FeedbackAdjuster,
    balancer: IonicBalancer,
    normalizer: EcNormalizer,
    compensator: WaterCompensator,
}

impl Default for RecipePipeline {
    fn default() -> Self {
        Self::new(&RecipeSettings::default())
    }
}

impl RecipePipeline {
    pub fn new(settings: &RecipeSettings) -> Self {
        Self {
            feedback: FeedbackAdjuster {
                max_correction_ratio: settings.max_correction_ratio,
            },
            balancer: IonicBalancer {
                tolerance_meq: settings.neutrality_tolerance,
                potassium_share: settings.cation_split_potassium,
            },
            normalizer: EcNormalizer {
                meq_floor: settings.meq_floor,
                ec_floor: settings.ec_floor,
                meq_per_ds_m: settings.meq_per_ds_m,
            },
            compensator: WaterCompensator,
        }
    }

    pub fn calculate(&self, inputs: &RecipeInputs) -> RecipeResult {
        let mut collector = WarningCollector::new();

        let (partial, feedback_warnings) = self.feedback.adjust(
            &inputs.target,
            &inputs.analysis,
            &inputs.uptake,
            inputs.correction_factor,
        );
        collector.extend(feedback_warnings);

        let imbalance_meq = partial.charge_imbalance();
        let (adjusted, balance_notes) = self.balancer.balance(&partial);
        collector.extend(balance_notes);
        tracing::debug!(
            imbalance_meq,
            residual_meq = adjusted.charge_imbalance(),
            "ionic balance restored"
        );

        let (final_drip, scaling) = self.normalizer.normalize(&adjusted, inputs.target_ec);
        tracing::debug!(
            cation_meq = scaling.cation_meq,
            estimated_ec = scaling.estimated_ec,
            ec_ratio = scaling.ratio,
            "drip solution scaled to target EC"
        );

        let (fertilizer_need, water_warnings) =
            self.compensator.subtract_water(&final_drip, &inputs.water);
        collector.extend(water_warnings);

        RecipeResult {
            adjusted,
            final_drip,
            fertilizer_need,
            warnings: collector.into_vec(),
            diagnostics: PipelineDiagnostics {
                imbalance_meq,
                cation_meq: scaling.cation_meq,
                estimated_ec: scaling.estimated_ec,
                ec_ratio: scaling.ratio,
            },
        }
    }
}

/// Runs the pipeline with the published default heuristics.
pub fn calculate_drip_recipe(inputs: &RecipeInputs) -> RecipeResult {
    RecipePipeline::default().calculate(inputs)
}
