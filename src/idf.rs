//! IDF weight table.
//!
//! The table file holds one `word idf` pair per line, the format segmentation
//! toolkits ship alongside their dictionaries.

use std::io::BufRead;
use std::path::Path;

use hashbrown::HashMap;

use crate::error::{Error, Result};
use crate::utils;

/// Inverse document frequency per token.
#[derive(Debug, Clone, Default)]
pub struct IdfTable {
    weights: HashMap<String, f64>,
}

impl IdfTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let table = Self::from_reader(utils::open(path)?, &path.display().to_string())?;
        log::debug!("Loaded {} IDF weights from {}", table.len(), path.display());
        Ok(table)
    }

    /// Parses `word idf` lines. A repeated word keeps its last weight.
    pub fn from_reader<R: BufRead>(reader: R, resource: &str) -> Result<Self> {
        let mut weights = HashMap::new();
        utils::for_each_line(reader, resource, |line_no, line| {
            let malformed = |reason: String| Error::Malformed {
                resource: resource.to_string(),
                line: line_no,
                reason,
            };

            let mut fields = line.split_whitespace();
            let (word, idf) = match (fields.next(), fields.next(), fields.next()) {
                (Some(word), Some(idf), None) => (word, idf),
                _ => return Err(malformed(format!("expected `word idf`, got {:?}", line))),
            };
            let idf: f64 = idf
                .parse()
                .map_err(|e| malformed(format!("invalid idf {:?}: {}", idf, e)))?;
            if !idf.is_finite() {
                return Err(malformed(format!("idf {} is not finite", idf)));
            }

            if weights.insert(word.to_string(), idf).is_some() {
                log::warn!("{}:{}: duplicate IDF entry for {:?}", resource, line_no, word);
            }
            Ok(())
        })?;
        Ok(Self { weights })
    }

    #[inline]
    pub fn get(&self, token: &str) -> Option<f64> {
        self.weights.get(token).copied()
    }

    /// Median weight of the table (upper median for even sizes), a common
    /// stand-in weight for unknown tokens.
    pub fn median(&self) -> Option<f64> {
        if self.weights.is_empty() {
            return None;
        }
        let mut values: Vec<f64> = self.weights.values().copied().collect();
        values.sort_by(|a, b| a.total_cmp(b));
        Some(values[values.len() / 2])
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, f64)> for IdfTable {
    fn from_iter<I: IntoIterator<Item = (S, f64)>>(iter: I) -> Self {
        Self {
            weights: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}
