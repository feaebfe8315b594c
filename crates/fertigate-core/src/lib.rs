//! Drip recipe engine implementing the Sonneveld & Voogt feedback-compensation
//! scheme for substrate-grown greenhouse crops.
//!
//! The numeric core lives in [`modules::pipeline`]; everything else in the crate
//! feeds it (ion tables, settings, crop profiles) or consumes its result
//! (tabular reports, archival sinks).

pub mod common;
pub mod domain;
pub mod modules;

pub use domain::{ConcentrationVector, RecipeInputs, RecipeResult, RecipeWarning};
pub use modules::pipeline::{RecipePipeline, calculate_drip_recipe};
