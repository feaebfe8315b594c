//! Tabular, CSV and text renderings of a recipe run.

use super::serialization::{format_fixed_f64, round_for_display};
use crate::common::constants::DISPLAY_DECIMALS;
use crate::common::ions::Ion;
use crate::domain::{
    ConcentrationVector, RecipeInputs, RecipeResult, RecipeWarning, Severity, WarningKind,
};
use serde::Serialize;

pub const CSV_HEADER: &str = "ion,target,analysis,adjusted,final_drip,water,fertilizer_need";
pub const NOMINAL_LINE: &str = "No major anomaly detected. Nominal computation.";

const ION_COLUMN_WIDTH: usize = 6;
const VALUE_COLUMN_WIDTH: usize = 11;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RecipeRow {
    pub ion: Ion,
    pub target: f64,
    pub analysis: f64,
    pub adjusted: f64,
    pub final_drip: f64,
    pub water: f64,
    pub fertilizer_need: f64,
}

impl RecipeRow {
    fn values(&self) -> [f64; 6] {
        [
            self.target,
            self.analysis,
            self.adjusted,
            self.final_drip,
            self.water,
            self.fertilizer_need,
        ]
    }
}

/// One row per tracked ion, values rounded for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecipeTable {
    pub rows: Vec<RecipeRow>,
}

impl RecipeTable {
    pub fn new(inputs: &RecipeInputs, result: &RecipeResult) -> Self {
        let rows = Ion::ALL
            .into_iter()
            .map(|ion| RecipeRow {
                ion,
                target: round_for_display(inputs.target.get(ion)),
                analysis: round_for_display(inputs.analysis.get(ion)),
                adjusted: round_for_display(result.adjusted.get(ion)),
                final_drip: round_for_display(result.final_drip.get(ion)),
                water: round_for_display(inputs.water.get(ion)),
                fertilizer_need: round_for_display(result.fertilizer_need.get(ion)),
            })
            .collect();
        Self { rows }
    }

    pub fn row(&self, ion: Ion) -> Option<&RecipeRow> {
        self.rows.iter().find(|row| row.ion == ion)
    }

    pub fn render_text(&self) -> String {
        let headers = ["Target", "Analysis", "Adjusted", "FinalDrip", "Water", "Need"];
        let mut out = format!("{:<width$}", "Ion", width = ION_COLUMN_WIDTH);
        for header in headers {
            out.push_str(&format!("{header:>width$}", width = VALUE_COLUMN_WIDTH));
        }
        out.push('\n');

        for row in &self.rows {
            out.push_str(&format!("{:<width$}", row.ion.symbol(), width = ION_COLUMN_WIDTH));
            for value in row.values() {
                out.push_str(&format_fixed_f64(value, VALUE_COLUMN_WIDTH, DISPLAY_DECIMALS));
            }
            out.push('\n');
        }
        out
    }

    pub fn render_csv(&self) -> String {
        let mut out = String::from(CSV_HEADER);
        out.push('\n');
        for row in &self.rows {
            let cells: Vec<String> = row
                .values()
                .iter()
                .map(|value| format!("{value:.precision$}", precision = DISPLAY_DECIMALS))
                .collect();
            out.push_str(row.ion.symbol());
            out.push(',');
            out.push_str(&cells.join(","));
            out.push('\n');
        }
        out
    }
}

/// A named per-ion series for side-by-side charting.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ComparisonSeries {
    pub label: &'static str,
    pub values: ConcentrationVector,
}

pub fn comparison_series(inputs: &RecipeInputs, result: &RecipeResult) -> [ComparisonSeries; 3] {
    [
        ComparisonSeries {
            label: "target",
            values: inputs.target,
        },
        ComparisonSeries {
            label: "analysis",
            values: inputs.analysis,
        },
        ComparisonSeries {
            label: "final_drip",
            values: result.final_drip,
        },
    ]
}

/// Everything a JSON export carries.
#[derive(Debug, Clone, Serialize)]
pub struct RecipeReport<'a> {
    pub inputs: &'a RecipeInputs,
    pub result: &'a RecipeResult,
    pub table: RecipeTable,
    pub series: [ComparisonSeries; 3],
}

impl<'a> RecipeReport<'a> {
    pub fn new(inputs: &'a RecipeInputs, result: &'a RecipeResult) -> Self {
        Self {
            inputs,
            result,
            table: RecipeTable::new(inputs, result),
            series: comparison_series(inputs, result),
        }
    }
}

pub const fn severity_label(severity: Severity) -> &'static str {
    match severity {
        Severity::Critical => "CRITICAL",
        Severity::Moderate => "CAUTION",
        Severity::Info => "NOTE",
    }
}

pub fn render_warning(warning: &RecipeWarning) -> String {
    let ion = warning.ion;
    let detail = match warning.kind {
        WarningKind::CorrectionCapped { requested, applied } => format!(
            "correction capped at {applied:+.2} mmol/L (requested {requested:+.2}); gap too large for one step"
        ),
        WarningKind::SupplyCut { shortfall } => format!(
            "substrate stock critical, supply cut for now (uptake plus correction was {:.2} mmol/L)",
            -shortfall
        ),
        WarningKind::AnionTopUp { added } => {
            format!("ionic balance, {added:.2} mmol/L added to cover an anion deficit")
        }
        WarningKind::CationTopUp { added } => {
            format!("ionic balance, {added:.2} mmol/L added to cover a cation deficit")
        }
        WarningKind::WaterOverload { excess } => format!(
            "source water overload, raw water exceeds the drip target by {excess:.2} mmol/L"
        ),
    };
    format!("{} {}: {}", severity_label(warning.severity), ion, detail)
}

pub fn render_warnings(warnings: &[RecipeWarning]) -> String {
    if warnings.is_empty() {
        return format!("{NOMINAL_LINE}\n");
    }
    warnings
        .iter()
        .map(|warning| render_warning(warning) + "\n")
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{CSV_HEADER, NOMINAL_LINE, RecipeTable, comparison_series, render_warning, render_warnings};
    use crate::common::ions::Ion;
    use crate::domain::{ConcentrationVector, RecipeInputs, RecipeWarning, WarningKind};
    use crate::modules::pipeline::calculate_drip_recipe;

    fn sample_inputs() -> RecipeInputs {
        RecipeInputs {
            target: ConcentrationVector::from_pairs([(Ion::Nitrate, 12.0), (Ion::Potassium, 6.5)]),
            analysis: ConcentrationVector::from_pairs([(Ion::Nitrate, 10.0), (Ion::Potassium, 6.0)]),
            uptake: ConcentrationVector::from_pairs([(Ion::Nitrate, 8.0), (Ion::Potassium, 8.0)]),
            water: ConcentrationVector::from_pairs([(Ion::Calcium, 0.6)]),
            ..RecipeInputs::default()
        }
    }

    #[test]
    fn table_has_one_rounded_row_per_ion_in_display_order() {
        let inputs = sample_inputs();
        let result = calculate_drip_recipe(&inputs);
        let table = RecipeTable::new(&inputs, &result);

        let ions: Vec<Ion> = table.rows.iter().map(|row| row.ion).collect();
        assert_eq!(ions, Ion::ALL.to_vec());
        for row in &table.rows {
            for value in [row.adjusted, row.final_drip, row.fertilizer_need] {
                assert_eq!(value, (value * 100.0).round() / 100.0);
            }
        }
        assert_eq!(table.row(Ion::Calcium).map(|row| row.water), Some(0.6));
    }

    #[test]
    fn csv_export_has_header_and_seven_rows() {
        let inputs = sample_inputs();
        let result = calculate_drip_recipe(&inputs);
        let csv = RecipeTable::new(&inputs, &result).render_csv();

        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], CSV_HEADER);
        assert_eq!(lines.len(), 8);
        assert!(lines[1].starts_with("NO3,12.00,10.00,"));
        assert!(lines[5].starts_with("Ca,0.00,0.00,"));
        assert!(lines.iter().skip(1).all(|line| line.split(',').count() == 7));
    }

    #[test]
    fn text_table_aligns_columns() {
        let inputs = sample_inputs();
        let result = calculate_drip_recipe(&inputs);
        let text = RecipeTable::new(&inputs, &result).render_text();

        let widths: Vec<usize> = text.lines().map(str::len).collect();
        assert!(widths.iter().all(|width| *width == widths[0]));
        assert!(text.lines().nth(1).is_some_and(|line| line.starts_with("NO3")));
    }

    #[test]
    fn comparison_series_carry_target_analysis_and_drip() {
        let inputs = sample_inputs();
        let result = calculate_drip_recipe(&inputs);
        let series = comparison_series(&inputs, &result);

        let labels: Vec<&str> = series.iter().map(|entry| entry.label).collect();
        assert_eq!(labels, ["target", "analysis", "final_drip"]);
        assert_eq!(series[2].values, result.final_drip);
    }

    #[test]
    fn warnings_render_with_severity_prefix() {
        let overload = RecipeWarning::new(Ion::Calcium, WarningKind::WaterOverload { excess: 2.0 });
        assert_eq!(
            render_warning(&overload),
            "CRITICAL Ca: source water overload, raw water exceeds the drip target by 2.00 mmol/L"
        );

        let capped = RecipeWarning::new(
            Ion::Nitrate,
            WarningKind::CorrectionCapped {
                requested: 10.0,
                applied: 6.0,
            },
        );
        assert!(render_warning(&capped).starts_with("CAUTION NO3: correction capped at +6.00"));

        let note = RecipeWarning::new(Ion::Nitrate, WarningKind::AnionTopUp { added: 0.5 });
        assert!(render_warning(&note).starts_with("NOTE NO3:"));
    }

    #[test]
    fn empty_warning_list_renders_nominal_line() {
        assert_eq!(render_warnings(&[]), format!("{NOMINAL_LINE}\n"));
    }
}
