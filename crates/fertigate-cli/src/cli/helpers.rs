use super::CliError;
use anyhow::Context;
use chrono::Utc;
use fertigate_core::common::{RecipeSettings, RecipeSettingsError, load_recipe_settings};
use fertigate_core::domain::{FertigateError, RecipeInputs, RecipeResult};
use fertigate_core::modules::serialization::write_text_artifact;
use fertigate_core::modules::{
    ArchivalSink, ArchiveOutcome, ArchiveRecord, BuiltinProfiles, CropProfileRepository,
    JsonLinesArchive, JsonProfileRepository, ProfileRepositoryError, RecipeReport, RecipeTable,
};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default)]
pub(super) struct RecipeCommandConfig {
    pub(super) profile: Option<String>,
    pub(super) profiles_path: Option<PathBuf>,
    pub(super) input_path: Option<PathBuf>,
    pub(super) target_ec: Option<f64>,
    pub(super) correction_factor: Option<f64>,
    pub(super) settings_path: Option<PathBuf>,
    pub(super) csv_path: Option<PathBuf>,
    pub(super) json_path: Option<PathBuf>,
    pub(super) archive_path: Option<PathBuf>,
    pub(super) crop_name: Option<String>,
}

pub(super) fn load_settings(path: Option<&Path>) -> Result<RecipeSettings, CliError> {
    let Some(path) = path else {
        return Ok(RecipeSettings::default());
    };
    load_recipe_settings(path).map_err(|error| {
        CliError::Compute(match error {
            RecipeSettingsError::Read { .. } => {
                FertigateError::io_system("IO.CLI_SETTINGS", error.to_string())
            }
            RecipeSettingsError::Parse { .. } | RecipeSettingsError::Invalid { .. } => {
                FertigateError::input_validation("INPUT.CLI_SETTINGS", error.to_string())
            }
        })
    })
}

pub(super) fn load_repository(
    path: Option<&Path>,
) -> Result<Box<dyn CropProfileRepository>, CliError> {
    let Some(path) = path else {
        return Ok(Box::new(BuiltinProfiles));
    };
    match JsonProfileRepository::load(path) {
        Ok(repository) => Ok(Box::new(repository)),
        Err(error @ ProfileRepositoryError::Read { .. }) => Err(CliError::Compute(
            FertigateError::io_system("IO.CLI_PROFILES", error.to_string()),
        )),
        Err(error) => Err(CliError::Compute(FertigateError::input_validation(
            "INPUT.CLI_PROFILES",
            error.to_string(),
        ))),
    }
}

/// Reads the input document, or falls back to the cucumber worked example.
pub(super) fn load_inputs(path: Option<&Path>) -> Result<RecipeInputs, CliError> {
    let Some(path) = path else {
        return Ok(BuiltinProfiles::cucumber_example_inputs());
    };
    let source = fs::read_to_string(path).map_err(|source| {
        CliError::Compute(FertigateError::io_system(
            "IO.CLI_INPUT",
            format!("failed to read input document '{}': {}", path.display(), source),
        ))
    })?;
    serde_json::from_str(&source).map_err(|source| {
        CliError::Compute(FertigateError::input_validation(
            "INPUT.CLI_INPUT",
            format!("failed to parse input document '{}': {}", path.display(), source),
        ))
    })
}

/// Applies the selected profile, then the scalar overrides from the command line.
pub(super) fn resolve_inputs(
    config: &RecipeCommandConfig,
    repository: &dyn CropProfileRepository,
    base: RecipeInputs,
) -> Result<RecipeInputs, CliError> {
    let mut inputs = match config.profile.as_deref() {
        Some(name) => {
            let profile = repository.profile(name).ok_or_else(|| {
                CliError::Compute(FertigateError::input_validation(
                    "INPUT.CLI_PROFILE",
                    format!(
                        "unknown crop profile '{}'; available: {}",
                        name,
                        repository.names().join(", ")
                    ),
                ))
            })?;
            profile.apply_to(&base)
        }
        None => base,
    };

    if let Some(target_ec) = config.target_ec {
        inputs.target_ec = target_ec;
    }
    if let Some(factor) = config.correction_factor {
        inputs.correction_factor = factor;
    }
    if !(0.0..=1.0).contains(&inputs.correction_factor) {
        tracing::warn!(
            factor = inputs.correction_factor,
            "correction factor outside [0, 1]; feedback will over- or under-shoot"
        );
    }
    Ok(inputs)
}

pub(super) fn crop_name_for(config: &RecipeCommandConfig) -> String {
    if let Some(name) = config.crop_name.as_deref().or(config.profile.as_deref()) {
        return name.trim().to_string();
    }
    config
        .input_path
        .as_deref()
        .and_then(Path::file_stem)
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| BuiltinProfiles::CUCUMBER.to_string())
}

/// Writes the requested CSV and JSON exports and returns one line per file.
pub(super) fn write_exports(
    config: &RecipeCommandConfig,
    inputs: &RecipeInputs,
    result: &RecipeResult,
    table: &RecipeTable,
) -> anyhow::Result<Vec<String>> {
    let mut written = Vec::new();
    if let Some(path) = config.csv_path.as_deref() {
        write_text_artifact(path, &table.render_csv())
            .with_context(|| format!("failed to write CSV export '{}'", path.display()))?;
        written.push(format!("CSV export: {}", path.display()));
    }
    if let Some(path) = config.json_path.as_deref() {
        let report = RecipeReport::new(inputs, result);
        let json = serde_json::to_string_pretty(&report).context("failed to encode JSON report")?;
        write_text_artifact(path, &json)
            .with_context(|| format!("failed to write JSON report '{}'", path.display()))?;
        written.push(format!("JSON report: {}", path.display()));
    }
    Ok(written)
}

pub(super) fn archive_run(
    path: &Path,
    crop_name: &str,
    inputs: &RecipeInputs,
    result: &RecipeResult,
) -> ArchiveOutcome {
    let record = ArchiveRecord::new(crop_name, Utc::now(), inputs, result);
    JsonLinesArchive::new(path).archive(&record)
}
