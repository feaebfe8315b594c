use super::CliError;
use super::helpers::{
    RecipeCommandConfig, archive_run, crop_name_for, load_inputs, load_repository, load_settings,
    resolve_inputs, write_exports,
};
use clap::Args;
use fertigate_core::common::Ion;
use fertigate_core::modules::{RecipePipeline, RecipeTable, render_warnings};
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(super) struct RecipeArgs {
    /// Crop preset supplying targets, reference uptake and default EC
    #[arg(long)]
    profile: Option<String>,

    /// JSON file of crop presets used instead of the built-in ones
    #[arg(long)]
    profiles: Option<PathBuf>,

    /// JSON input document (target, analysis, uptake, water, target_ec, correction_factor)
    #[arg(long)]
    input: Option<PathBuf>,

    /// Dripper EC target in dS/m
    #[arg(long, allow_negative_numbers = true)]
    target_ec: Option<f64>,

    /// Feedback correction factor, normally between 0 and 1
    #[arg(long, allow_negative_numbers = true)]
    factor: Option<f64>,

    /// JSON file overriding pipeline heuristics
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Write the result table as CSV
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Write the full report as JSON
    #[arg(long)]
    json: Option<PathBuf>,

    /// Append the run to a JSON-lines archive
    #[arg(long)]
    archive: Option<PathBuf>,

    /// Crop name recorded in the archive
    #[arg(long)]
    crop_name: Option<String>,
}

#[derive(Args, Debug)]
pub(super) struct ProfilesArgs {
    /// JSON file of crop presets used instead of the built-in ones
    #[arg(long)]
    profiles: Option<PathBuf>,
}

impl RecipeArgs {
    fn into_config(self) -> RecipeCommandConfig {
        RecipeCommandConfig {
            profile: self.profile,
            profiles_path: self.profiles,
            input_path: self.input,
            target_ec: self.target_ec,
            correction_factor: self.factor,
            settings_path: self.settings,
            csv_path: self.csv,
            json_path: self.json,
            archive_path: self.archive,
            crop_name: self.crop_name,
        }
    }
}

pub(super) fn run_recipe_command(args: RecipeArgs) -> Result<i32, CliError> {
    let config = args.into_config();
    let settings = load_settings(config.settings_path.as_deref())?;
    let repository = load_repository(config.profiles_path.as_deref())?;
    let base_inputs = load_inputs(config.input_path.as_deref())?;
    let inputs = resolve_inputs(&config, repository.as_ref(), base_inputs)?;

    let result = RecipePipeline::new(&settings).calculate(&inputs);
    tracing::info!(
        target_ec = inputs.target_ec,
        ec_ratio = result.diagnostics.ec_ratio,
        warnings = result.warnings.len(),
        critical = result.critical_count(),
        "computed drip recipe"
    );

    let table = RecipeTable::new(&inputs, &result);
    println!("{}", table.render_text());
    print!("{}", render_warnings(&result.warnings));

    for written in write_exports(&config, &inputs, &result, &table)? {
        println!("{written}");
    }

    if let Some(path) = config.archive_path.as_deref() {
        let crop_name = crop_name_for(&config);
        let outcome = archive_run(path, &crop_name, &inputs, &result);
        if outcome.success {
            println!("{}", outcome.message);
        } else {
            eprintln!("WARNING: [IO.ARCHIVE] {}", outcome.message);
        }
    }

    Ok(0)
}

pub(super) fn run_profiles_command(args: ProfilesArgs) -> Result<i32, CliError> {
    let repository = load_repository(args.profiles.as_deref())?;
    for name in repository.names() {
        match repository.profile(&name) {
            Some(profile) => println!(
                "{:<16} default EC {:.2} dS/m, NO3 target {:.2} mmol/L",
                profile.name,
                profile.default_ec,
                profile.targets.get(Ion::Nitrate)
            ),
            None => println!("{name}"),
        }
    }
    Ok(0)
}
