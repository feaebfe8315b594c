//! Ionic species tables: valences, polarity and molar weights.
//!
//! [`Species`] covers every ion that can appear in a water or substrate
//! analysis. [`Ion`] is the closed subset of seven macro-nutrients the recipe
//! pipeline tracks; sodium, chloride and bicarbonate only exist in the tables.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

pub const TRACKED_ION_COUNT: usize = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Polarity {
    Cation,
    Anion,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Species {
    Potassium,
    Calcium,
    Magnesium,
    Ammonium,
    Sodium,
    Nitrate,
    Sulfate,
    DihydrogenPhosphate,
    Chloride,
    Bicarbonate,
}

impl Species {
    pub const ALL: [Species; 10] = [
        Self::Potassium,
        Self::Calcium,
        Self::Magnesium,
        Self::Ammonium,
        Self::Sodium,
        Self::Nitrate,
        Self::Sulfate,
        Self::DihydrogenPhosphate,
        Self::Chloride,
        Self::Bicarbonate,
    ];

    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Potassium => "K",
            Self::Calcium => "Ca",
            Self::Magnesium => "Mg",
            Self::Ammonium => "NH4",
            Self::Sodium => "Na",
            Self::Nitrate => "NO3",
            Self::Sulfate => "SO4",
            Self::DihydrogenPhosphate => "H2PO4",
            Self::Chloride => "Cl",
            Self::Bicarbonate => "HCO3",
        }
    }

    /// Absolute charge number, i.e. meq per mmol.
    pub const fn valence(self) -> u8 {
        match self {
            Self::Calcium | Self::Magnesium | Self::Sulfate => 2,
            Self::Potassium
            | Self::Ammonium
            | Self::Sodium
            | Self::Nitrate
            | Self::DihydrogenPhosphate
            | Self::Chloride
            | Self::Bicarbonate => 1,
        }
    }

    pub const fn polarity(self) -> Polarity {
        match self {
            Self::Potassium | Self::Calcium | Self::Magnesium | Self::Ammonium | Self::Sodium => {
                Polarity::Cation
            }
            Self::Nitrate
            | Self::Sulfate
            | Self::DihydrogenPhosphate
            | Self::Chloride
            | Self::Bicarbonate => Polarity::Anion,
        }
    }

    /// Molar weight in mg/mmol. Only the tracked macro-nutrients carry one;
    /// fertilizer mass conversion is not part of the recipe computation.
    pub const fn molar_weight(self) -> Option<f64> {
        match self {
            Self::Potassium => Some(39.1),
            Self::Calcium => Some(40.1),
            Self::Magnesium => Some(24.3),
            Self::Ammonium => Some(18.0),
            Self::Nitrate => Some(62.0),
            Self::Sulfate => Some(96.1),
            Self::DihydrogenPhosphate => Some(97.0),
            Self::Sodium | Self::Chloride | Self::Bicarbonate => None,
        }
    }

    pub fn from_symbol(symbol: &str) -> Option<Self> {
        let normalized = symbol.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|species| species.symbol().eq_ignore_ascii_case(normalized))
    }

    pub const fn tracked(self) -> Option<Ion> {
        match self {
            Self::Nitrate => Some(Ion::Nitrate),
            Self::DihydrogenPhosphate => Some(Ion::Phosphate),
            Self::Sulfate => Some(Ion::Sulfate),
            Self::Potassium => Some(Ion::Potassium),
            Self::Calcium => Some(Ion::Calcium),
            Self::Magnesium => Some(Ion::Magnesium),
            Self::Ammonium => Some(Ion::Ammonium),
            Self::Sodium | Self::Chloride | Self::Bicarbonate => None,
        }
    }
}

impl Display for Species {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str((*self).symbol())
    }
}

/// One of the seven macro-nutrient ions carried through the recipe pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum Ion {
    Nitrate,
    Phosphate,
    Sulfate,
    Potassium,
    Calcium,
    Magnesium,
    Ammonium,
}

impl Ion {
    /// Display order used by reports and exports.
    pub const ALL: [Ion; TRACKED_ION_COUNT] = [
        Self::Nitrate,
        Self::Phosphate,
        Self::Sulfate,
        Self::Potassium,
        Self::Calcium,
        Self::Magnesium,
        Self::Ammonium,
    ];

    pub const CATIONS: [Ion; 4] = [
        Self::Potassium,
        Self::Calcium,
        Self::Magnesium,
        Self::Ammonium,
    ];

    pub const ANIONS: [Ion; 3] = [Self::Nitrate, Self::Sulfate, Self::Phosphate];

    pub const fn index(self) -> usize {
        match self {
            Self::Nitrate => 0,
            Self::Phosphate => 1,
            Self::Sulfate => 2,
            Self::Potassium => 3,
            Self::Calcium => 4,
            Self::Magnesium => 5,
            Self::Ammonium => 6,
        }
    }

    pub const fn species(self) -> Species {
        match self {
            Self::Nitrate => Species::Nitrate,
            Self::Phosphate => Species::DihydrogenPhosphate,
            Self::Sulfate => Species::Sulfate,
            Self::Potassium => Species::Potassium,
            Self::Calcium => Species::Calcium,
            Self::Magnesium => Species::Magnesium,
            Self::Ammonium => Species::Ammonium,
        }
    }

    pub const fn symbol(self) -> &'static str {
        self.species().symbol()
    }

    pub fn valence(self) -> f64 {
        f64::from(self.species().valence())
    }

    pub const fn polarity(self) -> Polarity {
        self.species().polarity()
    }

    /// NH4 steers substrate pH and H2PO4 is dosed independently of bulk EC,
    /// so neither follows the EC scaling ratio.
    pub const fn is_held_under_ec_scaling(self) -> bool {
        matches!(self, Self::Ammonium | Self::Phosphate)
    }

    pub fn from_symbol(symbol: &str) -> Option<Self> {
        Species::from_symbol(symbol).and_then(Species::tracked)
    }
}

impl Display for Ion {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str((*self).symbol())
    }
}

impl From<Ion> for Species {
    fn from(ion: Ion) -> Self {
        ion.species()
    }
}

impl From<Ion> for String {
    fn from(ion: Ion) -> Self {
        ion.symbol().to_string()
    }
}

impl TryFrom<String> for Ion {
    type Error = UnknownIonError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_symbol(&value).ok_or(UnknownIonError { symbol: value })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown or untracked ion '{symbol}'; expected one of NO3, H2PO4, SO4, K, Ca, Mg, NH4")]
pub struct UnknownIonError {
    pub symbol: String,
}
