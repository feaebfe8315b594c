use crate::common::constants::DISPLAY_DECIMALS;
use std::fs;
use std::path::Path;

pub fn format_fixed_f64(value: f64, width: usize, precision: usize) -> String {
    format!(
        "{value:>width$.precision$}",
        width = width,
        precision = precision
    )
}

/// Rounds half away from zero to the display precision.
pub fn round_for_display(value: f64) -> f64 {
    let scale = 10_f64.powi(DISPLAY_DECIMALS as i32);
    let rounded = (value * scale).round() / scale;
    if rounded == 0.0 { 0.0 } else { rounded }
}

pub fn normalize_text_artifact(content: &str) -> String {
    let mut normalized = content.replace("\r\n", "\n").replace('\r', "\n");
    if !normalized.is_empty() && !normalized.ends_with('\n') {
        normalized.push('\n');
    }
    normalized
}

pub fn write_text_artifact(path: &Path, content: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, normalize_text_artifact(content))
}

#[cfg(test)]
mod tests {
    use super::{format_fixed_f64, normalize_text_artifact, round_for_display, write_text_artifact};
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn fixed_width_float_formatting_is_deterministic() {
        let first = format_fixed_f64(1.23, 9, 2);
        let second = format_fixed_f64(1.23, 9, 2);

        assert_eq!(first, "     1.23");
        assert_eq!(first, second);
    }

    #[test]
    fn display_rounding_goes_half_away_from_zero() {
        assert_eq!(round_for_display(1.125), 1.13);
        assert_eq!(round_for_display(20.7996), 20.8);
        assert_eq!(round_for_display(-0.001), 0.0);
        assert!(round_for_display(-0.001).is_sign_positive());
    }

    #[test]
    fn normalize_text_artifact_uses_canonical_line_endings() {
        let normalized = normalize_text_artifact("alpha\r\nbeta\rgamma");
        assert_eq!(normalized, "alpha\nbeta\ngamma\n");
    }

    #[test]
    fn text_writes_create_parents_and_repeat_identically() {
        let temp = TempDir::new().expect("tempdir should be created");
        let path = temp.path().join("exports/recipe.csv");
        let input = "ion,need\r\nNO3,20.80";

        write_text_artifact(&path, input).expect("first write should succeed");
        let first = fs::read(&path).expect("artifact should be readable");

        write_text_artifact(&path, input).expect("second write should succeed");
        let second = fs::read(&path).expect("artifact should be readable");

        assert_eq!(first, second);
        assert_eq!(second, b"ion,need\nNO3,20.80\n");
    }
}
