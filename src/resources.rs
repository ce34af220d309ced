//! The immutable resource bundle a [`Simhasher`](crate::Simhasher) reads from.

use std::path::Path;
use std::time::Instant;

use crate::error::Result;
use crate::idf::IdfTable;
use crate::stop_words::StopWords;
use crate::tokenizer::{DictTokenizer, Tokenizer};

/// Tokenizer, IDF table and stop words. Never mutated after construction;
/// share it behind an `Arc` between pipelines and threads.
#[derive(Debug)]
pub struct Resources {
    tokenizer: Box<dyn Tokenizer>,
    idf: IdfTable,
    stop_words: StopWords,
}

impl Resources {
    pub fn new(tokenizer: impl Tokenizer + 'static, idf: IdfTable, stop_words: StopWords) -> Self {
        Self {
            tokenizer: Box::new(tokenizer),
            idf,
            stop_words,
        }
    }

    /// Loads a segmentation dictionary, an IDF table and a stop-word list.
    pub fn load(
        dict_path: impl AsRef<Path>,
        idf_path: impl AsRef<Path>,
        stop_words_path: impl AsRef<Path>,
    ) -> Result<Self> {
        let start = Instant::now();
        let tokenizer = DictTokenizer::load(dict_path)?;
        let idf = IdfTable::load(idf_path)?;
        let stop_words = StopWords::load(stop_words_path)?;

        log::info!(
            "Loaded simhash resources in {:.2?}: {} dictionary words, {} IDF weights, {} stop words",
            start.elapsed(),
            tokenizer.len(),
            idf.len(),
            stop_words.len()
        );
        Ok(Self::new(tokenizer, idf, stop_words))
    }

    pub fn tokenizer(&self) -> &dyn Tokenizer {
        self.tokenizer.as_ref()
    }

    pub fn idf(&self) -> &IdfTable {
        &self.idf
    }

    pub fn stop_words(&self) -> &StopWords {
        &self.stop_words
    }
}
