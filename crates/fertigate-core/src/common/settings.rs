use super::constants::{
    CATION_SPLIT_POTASSIUM, EC_FLOOR, EC_FLOOR_SINGLE_STAGE, MAX_CORRECTION_RATIO, MEQ_FLOOR,
    MEQ_PER_DS_M, NEUTRALITY_TOLERANCE_MEQ,
};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Tunable heuristics of the recipe pipeline. Every field defaults to the
/// published constant, so an empty JSON object is a valid settings file.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct RecipeSettings {
    pub max_correction_ratio: f64,
    pub neutrality_tolerance: f64,
    pub meq_floor: f64,
    pub ec_floor: f64,
    pub meq_per_ds_m: f64,
    pub cation_split_potassium: f64,
}

impl Default for RecipeSettings {
    fn default() -> Self {
        Self {
            max_correction_ratio: MAX_CORRECTION_RATIO,
            neutrality_tolerance: NEUTRALITY_TOLERANCE_MEQ,
            meq_floor: MEQ_FLOOR,
            ec_floor: EC_FLOOR,
            meq_per_ds_m: MEQ_PER_DS_M,
            cation_split_potassium: CATION_SPLIT_POTASSIUM,
        }
    }
}

impl RecipeSettings {
    /// Settings of the EC stage variant that floors only the estimated EC, at
    /// 0.1 dS/m. The meq floor stays but can never bind below that EC floor.
    pub fn single_stage_floor() -> Self {
        Self {
            ec_floor: EC_FLOOR_SINGLE_STAGE,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), RecipeSettingsError> {
        let positive = [
            ("max_correction_ratio", self.max_correction_ratio),
            ("neutrality_tolerance", self.neutrality_tolerance),
            ("meq_floor", self.meq_floor),
            ("ec_floor", self.ec_floor),
            ("meq_per_ds_m", self.meq_per_ds_m),
        ];
        for (field, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(RecipeSettingsError::Invalid {
                    field,
                    value,
                    expected: "a finite value greater than zero",
                });
            }
        }

        if !(0.0..=1.0).contains(&self.cation_split_potassium) {
            return Err(RecipeSettingsError::Invalid {
                field: "cation_split_potassium",
                value: self.cation_split_potassium,
                expected: "a share between 0 and 1",
            });
        }

        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RecipeSettingsError {
    #[error("failed to read recipe settings '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse recipe settings '{}': {source}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("recipe setting '{field}' = {value} is invalid; expected {expected}")]
    Invalid {
        field: &'static str,
        value: f64,
        expected: &'static str,
    },
}

pub fn load_recipe_settings(
    settings_path: impl AsRef<Path>,
) -> Result<RecipeSettings, RecipeSettingsError> {
    let settings_path = settings_path.as_ref();
    let source = fs::read_to_string(settings_path).map_err(|source| RecipeSettingsError::Read {
        path: settings_path.to_path_buf(),
        source,
    })?;
    let settings: RecipeSettings =
        serde_json::from_str(&source).map_err(|source| RecipeSettingsError::Parse {
            path: settings_path.to_path_buf(),
            source,
        })?;
    settings.validate()?;
    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::{RecipeSettings, RecipeSettingsError, load_recipe_settings};
    use crate::common::constants::{EC_FLOOR, EC_FLOOR_SINGLE_STAGE};
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn empty_document_yields_default_settings() {
        let temp = TempDir::new().expect("tempdir should be created");
        let path = temp.path().join("settings.json");
        fs::write(&path, "{}").expect("settings should be written");

        let settings = load_recipe_settings(&path).expect("settings should load");
        assert_eq!(settings, RecipeSettings::default());
        assert_eq!(settings.ec_floor, EC_FLOOR);
    }

    #[test]
    fn partial_document_overrides_selected_fields() {
        let temp = TempDir::new().expect("tempdir should be created");
        let path = temp.path().join("settings.json");
        fs::write(&path, r#"{ "ec_floor": 0.1, "max_correction_ratio": 0.4 }"#)
            .expect("settings should be written");

        let settings = load_recipe_settings(&path).expect("settings should load");
        assert_eq!(settings.ec_floor, 0.1);
        assert_eq!(settings.max_correction_ratio, 0.4);
        assert_eq!(settings.meq_per_ds_m, RecipeSettings::default().meq_per_ds_m);
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let temp = TempDir::new().expect("tempdir should be created");
        let path = temp.path().join("settings.json");
        fs::write(&path, r#"{ "ec_flor": 0.1 }"#).expect("settings should be written");

        let error = load_recipe_settings(&path).expect_err("typo should fail");
        assert!(matches!(error, RecipeSettingsError::Parse { .. }));
    }

    #[test]
    fn non_positive_floor_is_invalid() {
        let temp = TempDir::new().expect("tempdir should be created");
        let path = temp.path().join("settings.json");
        fs::write(&path, r#"{ "meq_floor": 0.0 }"#).expect("settings should be written");

        let error = load_recipe_settings(&path).expect_err("zero floor should fail");
        match error {
            RecipeSettingsError::Invalid { field, .. } => assert_eq!(field, "meq_floor"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn cation_split_outside_unit_interval_is_invalid() {
        let settings = RecipeSettings {
            cation_split_potassium: 1.5,
            ..RecipeSettings::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn missing_file_reports_read_error_with_path() {
        let temp = TempDir::new().expect("tempdir should be created");
        let path = temp.path().join("absent.json");

        let error = load_recipe_settings(&path).expect_err("missing file should fail");
        assert!(matches!(error, RecipeSettingsError::Read { .. }));
        assert!(error.to_string().contains("absent.json"));
    }

    #[test]
    fn single_stage_variant_only_changes_ec_floor() {
        let settings = RecipeSettings::single_stage_floor();
        assert_eq!(settings.ec_floor, EC_FLOOR_SINGLE_STAGE);
        assert_eq!(
            RecipeSettings {
                ec_floor: EC_FLOOR,
                ..settings
            },
            RecipeSettings::default()
        );
    }
}
