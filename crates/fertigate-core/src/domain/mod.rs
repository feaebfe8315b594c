pub mod concentration;
pub mod errors;
pub mod warnings;

pub use concentration::{ConcentrationParseError, ConcentrationVector};
pub use errors::{ErrorCategory, ExitMapping, FertigateError, FertigateResult};
pub use warnings::{RecipeWarning, Severity, WarningCollector, WarningKind};

use crate::common::constants::{DEFAULT_CORRECTION_FACTOR, DEFAULT_TARGET_EC};
use serde::{Deserialize, Serialize};

fn default_target_ec() -> f64 {
    DEFAULT_TARGET_EC
}

fn default_correction_factor() -> f64 {
    DEFAULT_CORRECTION_FACTOR
}

/// Everything one pipeline run consumes. Vectors absent from an input
/// document are all-zero; scalars fall back to the recommended defaults.
///
/// Neither scalar is validated: a non-positive `target_ec` or a factor
/// outside `[0, 1]` flows through the arithmetic unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RecipeInputs {
    #[serde(default)]
    pub target: ConcentrationVector,
    #[serde(default)]
    pub analysis: ConcentrationVector,
    #[serde(default)]
    pub uptake: ConcentrationVector,
    #[serde(default)]
    pub water: ConcentrationVector,
    #[serde(default = "default_target_ec")]
    pub target_ec: f64,
    #[serde(default = "default_correction_factor")]
    pub correction_factor: f64,
}

impl Default for RecipeInputs {
    fn default() -> Self {
        Self {
            target: ConcentrationVector::zero(),
            analysis: ConcentrationVector::zero(),
            uptake: ConcentrationVector::zero(),
            water: ConcentrationVector::zero(),
            target_ec: DEFAULT_TARGET_EC,
            correction_factor: DEFAULT_CORRECTION_FACTOR,
        }
    }
}

/// Intermediate aggregates recorded while the stages ran.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PipelineDiagnostics {
    /// Cation minus anion meq/L after feedback, before balancing.
    pub imbalance_meq: f64,
    /// Cation meq/L after balancing, before flooring.
    pub cation_meq: f64,
    /// Estimated EC of the balanced solution after flooring, in dS/m.
    pub estimated_ec: f64,
    pub ec_ratio: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecipeResult {
    /// Feedback-adjusted and charge-balanced concentrations.
    pub adjusted: ConcentrationVector,
    /// Concentrations at the dripper after EC normalization.
    pub final_drip: ConcentrationVector,
    /// What the fertilizer stock solutions must inject.
    pub fertilizer_need: ConcentrationVector,
    pub warnings: Vec<RecipeWarning>,
    pub diagnostics: PipelineDiagnostics,
}

impl RecipeResult {
    pub fn warnings_with_severity(
        &self,
        severity: Severity,
    ) -> impl Iterator<Item = &RecipeWarning> + '_ {
        self.warnings
            .iter()
            .filter(move |warning| warning.severity == severity)
    }

    pub fn critical_count(&self) -> usize {
        self.warnings_with_severity(Severity::Critical).count()
    }
}
