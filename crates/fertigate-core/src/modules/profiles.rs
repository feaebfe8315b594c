//! Crop presets: bibliographic targets, reference uptake and a default EC.

use super::traits::CropProfileRepository;
use crate::common::ions::Ion;
use crate::domain::{ConcentrationVector, RecipeInputs};
use crate::common::constants::DEFAULT_CORRECTION_FACTOR;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CropProfile {
    pub name: String,
    pub targets: ConcentrationVector,
    pub uptake: ConcentrationVector,
    pub default_ec: f64,
}

impl CropProfile {
    /// Replaces the crop-specific parts of `inputs` with this preset.
    pub fn apply_to(&self, inputs: &RecipeInputs) -> RecipeInputs {
        RecipeInputs {
            target: self.targets,
            uptake: self.uptake,
            target_ec: self.default_ec,
            ..inputs.clone()
        }
    }
}

fn vector(values: [f64; 7]) -> ConcentrationVector {
    ConcentrationVector::from_pairs(Ion::ALL.into_iter().zip(values))
}

/// Presets shipped with the crate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuiltinProfiles;

impl BuiltinProfiles {
    pub const CUCUMBER: &'static str = "cucumber";

    /// Cucumber on rockwool, Sonneveld & Voogt chapter 12.
    pub fn cucumber() -> CropProfile {
        CropProfile {
            name: Self::CUCUMBER.to_string(),
            targets: vector([12.0, 1.25, 1.5, 6.5, 2.75, 1.5, 1.0]),
            uptake: vector([13.0, 1.0, 1.0, 7.0, 2.0, 1.0, 1.2]),
            default_ec: 2.5,
        }
    }

    /// The cucumber worked example: high Ca and low K in the substrate, with
    /// source water carrying some SO4, Ca and Mg.
    pub fn cucumber_example_inputs() -> RecipeInputs {
        Self::cucumber().apply_to(&RecipeInputs {
            analysis: vector([10.0, 1.0, 1.8, 6.0, 3.5, 1.2, 0.5]),
            water: vector([0.0, 0.0, 0.5, 0.0, 0.6, 0.3, 0.0]),
            correction_factor: DEFAULT_CORRECTION_FACTOR,
            ..RecipeInputs::default()
        })
    }

    fn all() -> Vec<CropProfile> {
        vec![Self::cucumber()]
    }
}

impl CropProfileRepository for BuiltinProfiles {
    fn profile(&self, name: &str) -> Option<CropProfile> {
        Self::all()
            .into_iter()
            .find(|profile| profile.name.eq_ignore_ascii_case(name.trim()))
    }

    fn names(&self) -> Vec<String> {
        Self::all().into_iter().map(|profile| profile.name).collect()
    }
}

/// Presets read from a JSON array of [`CropProfile`] documents.
#[derive(Debug, Clone, PartialEq)]
pub struct JsonProfileRepository {
    profiles: Vec<CropProfile>,
}

#[derive(Debug, thiserror::Error)]
pub enum ProfileRepositoryError {
    #[error("failed to read crop profiles '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse crop profiles '{}': {source}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("crop profile '{name}' is defined more than once")]
    Duplicate { name: String },
}

impl JsonProfileRepository {
    pub fn from_profiles(profiles: Vec<CropProfile>) -> Result<Self, ProfileRepositoryError> {
        for (index, profile) in profiles.iter().enumerate() {
            let repeated = profiles[..index]
                .iter()
                .any(|earlier| earlier.name.eq_ignore_ascii_case(&profile.name));
            if repeated {
                return Err(ProfileRepositoryError::Duplicate {
                    name: profile.name.clone(),
                });
            }
        }
        Ok(Self { profiles })
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ProfileRepositoryError> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|source| ProfileRepositoryError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let profiles: Vec<CropProfile> =
            serde_json::from_str(&source).map_err(|source| ProfileRepositoryError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        tracing::debug!(path = %path.display(), count = profiles.len(), "loaded crop profiles");
        Self::from_profiles(profiles)
    }
}

impl CropProfileRepository for JsonProfileRepository {
    fn profile(&self, name: &str) -> Option<CropProfile> {
        self.profiles
            .iter()
            .find(|profile| profile.name.eq_ignore_ascii_case(name.trim()))
            .cloned()
    }

    fn names(&self) -> Vec<String> {
        self.profiles
            .iter()
            .map(|profile| profile.name.clone())
            .collect()
    }
}
