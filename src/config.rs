//! Pipeline configuration.

use crate::idf::IdfTable;

/// Weight used for tokens missing from the IDF table unless configured otherwise.
pub const DEFAULT_UNKNOWN_WEIGHT: f64 = 1.0;

/// How a token missing from the IDF table is weighted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DefaultWeight {
    Fixed(f64),
    /// The table's median IDF; [`DEFAULT_UNKNOWN_WEIGHT`] for an empty table.
    MedianIdf,
}

impl DefaultWeight {
    pub fn resolve(&self, idf: &IdfTable) -> f64 {
        match *self {
            DefaultWeight::Fixed(weight) => weight,
            DefaultWeight::MedianIdf => idf.median().unwrap_or(DEFAULT_UNKNOWN_WEIGHT),
        }
    }
}

/// Settings for a [`Simhasher`](crate::Simhasher).
#[derive(Debug, Clone, PartialEq)]
pub struct SimhashConfig {
    /// Weight of a token the IDF table does not know.
    ///
    /// Changing this changes fingerprints, so every party comparing
    /// fingerprints must use the same value.
    pub default_weight: DefaultWeight,
}

impl Default for SimhashConfig {
    fn default() -> Self {
        Self {
            default_weight: DefaultWeight::Fixed(DEFAULT_UNKNOWN_WEIGHT),
        }
    }
}

impl SimhashConfig {
    pub fn with_default_weight(mut self, weight: f64) -> Self {
        self.default_weight = DefaultWeight::Fixed(weight);
        self
    }

    pub fn with_median_idf(mut self) -> Self {
        self.default_weight = DefaultWeight::MedianIdf;
        self
    }
}
