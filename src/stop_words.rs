//! Stop-word set.

use std::io::BufRead;
use std::path::Path;

use hashbrown::HashSet;

use crate::error::Result;
use crate::utils;

/// Tokens excluded from fingerprinting. Matching is exact.
#[derive(Debug, Clone, Default)]
pub struct StopWords {
    words: HashSet<String>,
}

impl StopWords {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads one stop word per line from `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let words = Self::from_reader(utils::open(path)?, &path.display().to_string())?;
        log::debug!("Loaded {} stop words from {}", words.len(), path.display());
        Ok(words)
    }

    /// Reads one stop word per line; surrounding whitespace is ignored.
    pub fn from_reader<R: BufRead>(reader: R, resource: &str) -> Result<Self> {
        let mut words = HashSet::new();
        utils::for_each_line(reader, resource, |_, line| {
            words.insert(line.to_string());
            Ok(())
        })?;
        Ok(Self { words })
    }

    #[inline]
    pub fn contains(&self, token: &str) -> bool {
        self.words.contains(token)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for StopWords {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            words: iter.into_iter().map(Into::into).collect(),
        }
    }
}
