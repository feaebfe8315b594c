use crate::common::ions::Ion;
use serde::Serialize;
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Info,
    Moderate,
    Critical,
}

impl Severity {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Moderate => "moderate",
            Self::Critical => "critical",
        }
    }
}

impl Display for Severity {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str((*self).as_str())
    }
}

/// What a stage observed, with the quantities needed to explain it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum WarningKind {
    /// The damped correction exceeded the per-ion cap and was clamped.
    CorrectionCapped { requested: f64, applied: f64 },
    /// Uptake plus correction went negative; supply is cut to zero.
    SupplyCut { shortfall: f64 },
    /// NO3 was added to cover an anion deficit (mmol/L).
    AnionTopUp { added: f64 },
    /// K or Ca was added to cover half of a cation deficit (mmol/L).
    CationTopUp { added: f64 },
    /// Source water already carries more than the drip target (mmol/L).
    WaterOverload { excess: f64 },
}

impl WarningKind {
    pub const fn severity(&self) -> Severity {
        match self {
            Self::CorrectionCapped { .. } => Severity::Moderate,
            Self::SupplyCut { .. } | Self::WaterOverload { .. } => Severity::Critical,
            Self::AnionTopUp { .. } | Self::CationTopUp { .. } => Severity::Info,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RecipeWarning {
    pub severity: Severity,
    pub ion: Ion,
    #[serde(flatten)]
    pub kind: WarningKind,
}

impl RecipeWarning {
    pub fn new(ion: Ion, kind: WarningKind) -> Self {
        Self {
            severity: kind.severity(),
            ion,
            kind,
        }
    }
}

/// Append-only, ordered sink for stage warnings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WarningCollector {
    entries: Vec<RecipeWarning>,
}

impl WarningCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, warning: RecipeWarning) {
        self.entries.push(warning);
    }

    pub fn extend(&mut self, warnings: impl IntoIterator<Item = RecipeWarning>) {
        self.entries.extend(warnings);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn into_vec(self) -> Vec<RecipeWarning> {
        self.entries
    }
}
