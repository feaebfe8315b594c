use crate::common::ions::{Ion, Polarity, Species, TRACKED_ION_COUNT};
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use std::collections::BTreeMap;

/// Concentrations in mmol/L for the seven tracked ions.
///
/// The vector is total: an ion that was never set reads as 0.0. Stages never
/// mutate their inputs; they derive new vectors through [`Self::map`] or
/// [`Self::with`].
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
#[serde(try_from = "BTreeMap<String, f64>")]
pub struct ConcentrationVector {
    values: [f64; TRACKED_ION_COUNT],
}

impl ConcentrationVector {
    pub const fn zero() -> Self {
        Self {
            values: [0.0; TRACKED_ION_COUNT],
        }
    }

    pub fn from_pairs(pairs: impl IntoIterator<Item = (Ion, f64)>) -> Self {
        let mut vector = Self::zero();
        for (ion, value) in pairs {
            vector.values[ion.index()] = value;
        }
        vector
    }

    pub fn get(&self, ion: Ion) -> f64 {
        self.values[ion.index()]
    }

    #[must_use]
    pub fn with(mut self, ion: Ion, value: f64) -> Self {
        self.values[ion.index()] = value;
        self
    }

    #[must_use]
    pub fn map(&self, mut transform: impl FnMut(Ion, f64) -> f64) -> Self {
        let mut mapped = Self::zero();
        for ion in Ion::ALL {
            mapped.values[ion.index()] = transform(ion, self.get(ion));
        }
        mapped
    }

    pub fn iter(&self) -> impl Iterator<Item = (Ion, f64)> + '_ {
        Ion::ALL.into_iter().map(|ion| (ion, self.get(ion)))
    }

    /// Sum of concentration times valence over one polarity, in meq/L.
    pub fn meq_sum(&self, polarity: Polarity) -> f64 {
        let ions: &[Ion] = match polarity {
            Polarity::Cation => &Ion::CATIONS,
            Polarity::Anion => &Ion::ANIONS,
        };
        ions.iter().map(|ion| self.get(*ion) * ion.valence()).sum()
    }

    /// Cation meq minus anion meq; positive means an anion deficit.
    pub fn charge_imbalance(&self) -> f64 {
        self.meq_sum(Polarity::Cation) - self.meq_sum(Polarity::Anion)
    }

    pub fn min_value(&self) -> f64 {
        self.values.iter().copied().fold(f64::INFINITY, f64::min)
    }
}

impl Serialize for ConcentrationVector {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(TRACKED_ION_COUNT))?;
        for (ion, value) in self.iter() {
            map.serialize_entry(ion.symbol(), &value)?;
        }
        map.end()
    }
}

impl TryFrom<BTreeMap<String, f64>> for ConcentrationVector {
    type Error = ConcentrationParseError;

    fn try_from(entries: BTreeMap<String, f64>) -> Result<Self, Self::Error> {
        let mut vector = Self::zero();
        for (symbol, value) in entries {
            match Species::from_symbol(&symbol) {
                Some(species) => match species.tracked() {
                    Some(ion) => vector.values[ion.index()] = value,
                    None => tracing::debug!(
                        species = species.symbol(),
                        value,
                        "ignoring untracked species in concentration vector"
                    ),
                },
                None => return Err(ConcentrationParseError::UnknownSpecies { symbol }),
            }
        }
        Ok(vector)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConcentrationParseError {
    #[error(
        "unknown ion '{symbol}'; expected one of NO3, H2PO4, SO4, K, Ca, Mg, NH4, Na, Cl, HCO3"
    )]
    UnknownSpecies { symbol: String },
}
