//! Tokenizers feeding the fingerprint pipeline.
//!
//! [`DictTokenizer`] segments unspaced scripts (CJK and similar) with a word
//! frequency dictionary: every dictionary word starting at each character
//! forms a DAG, and the route with the highest total log-probability wins.
//! ASCII letters and digits form single tokens, every other character stands
//! alone. [`SimpleTokenizer`] just splits on non-alphanumerics.

use std::borrow::Cow;
use std::fmt;
use std::io::BufRead;
use std::path::Path;

use hashbrown::HashMap;

use crate::error::{Error, Result};
use crate::utils;

/// Splits text into tokens, in order. Tokens borrow from the input when possible.
pub trait Tokenizer: fmt::Debug + Send + Sync {
    fn cut<'a>(&self, text: &'a str) -> Vec<Cow<'a, str>>;
}

/// Lower-cased runs of alphanumeric characters.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimpleTokenizer;

impl Tokenizer for SimpleTokenizer {
    fn cut<'a>(&self, text: &'a str) -> Vec<Cow<'a, str>> {
        text.split(|c: char| !c.is_alphanumeric())
            .filter(|w| !w.is_empty())
            .map(|w| {
                if w.chars().any(char::is_uppercase) {
                    Cow::Owned(w.to_lowercase())
                } else {
                    Cow::Borrowed(w)
                }
            })
            .collect()
    }
}

/// Dictionary-driven maximum-probability segmenter.
#[derive(Clone)]
pub struct DictTokenizer {
    /// Word frequencies. Proper prefixes of words are present with frequency 0
    /// so that the DAG scan can stop as soon as a fragment leaves the trie.
    freq: HashMap<String, u64>,
    words: usize,
    log_total: f64,
}

impl fmt::Debug for DictTokenizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DictTokenizer")
            .field("words", &self.words)
            .field("log_total", &self.log_total)
            .finish()
    }
}

impl DictTokenizer {
    /// Builds a segmenter from `(word, frequency)` pairs.
    pub fn from_words<S, I>(words: I) -> Result<Self>
    where
        S: AsRef<str>,
        I: IntoIterator<Item = (S, u64)>,
    {
        let mut builder = Builder::default();
        for (idx, (word, freq)) in words.into_iter().enumerate() {
            builder
                .add(word.as_ref(), freq)
                .ok_or_else(|| total_overflow("dictionary", idx + 1))?;
        }
        builder.finish("dictionary")
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let tokenizer = Self::from_reader(utils::open(path)?, &path.display().to_string())?;
        log::debug!(
            "Loaded {} dictionary words from {}",
            tokenizer.len(),
            path.display()
        );
        Ok(tokenizer)
    }

    /// Parses `word freq [tag]` lines.
    pub fn from_reader<R: BufRead>(reader: R, resource: &str) -> Result<Self> {
        let mut builder = Builder::default();
        utils::for_each_line(reader, resource, |line_no, line| {
            let malformed = |reason: String| Error::Malformed {
                resource: resource.to_string(),
                line: line_no,
                reason,
            };

            let fields: Vec<&str> = line.split_whitespace().collect();
            if !(2..=3).contains(&fields.len()) {
                return Err(malformed(format!("expected `word freq [tag]`, got {:?}", line)));
            }
            let freq: u64 = fields[1]
                .parse()
                .map_err(|e| malformed(format!("invalid frequency {:?}: {}", fields[1], e)))?;

            let duplicate = builder
                .add(fields[0], freq)
                .ok_or_else(|| total_overflow(resource, line_no))?;
            if duplicate {
                log::warn!(
                    "{}:{}: duplicate dictionary entry for {:?}",
                    resource,
                    line_no,
                    fields[0]
                );
            }
            Ok(())
        })?;
        builder.finish(resource)
    }

    /// Number of dictionary words with a non-zero frequency.
    pub fn len(&self) -> usize {
        self.words
    }

    pub fn is_empty(&self) -> bool {
        self.words == 0
    }

    fn word_freq(&self, word: &str) -> Option<u64> {
        self.freq.get(word).copied()
    }

    /// Segments a run of non-ASCII alphanumeric characters.
    fn cut_run<'a>(&self, run: &'a str, tokens: &mut Vec<Cow<'a, str>>) {
        let bounds: Vec<usize> = run
            .char_indices()
            .map(|(i, _)| i)
            .chain(std::iter::once(run.len()))
            .collect();
        let n = bounds.len() - 1;

        // dag[k] holds the exclusive end (in chars) of every word starting at k.
        let dag: Vec<Vec<usize>> = (0..n)
            .map(|k| {
                let mut ends = Vec::new();
                for j in k + 1..=n {
                    match self.word_freq(&run[bounds[k]..bounds[j]]) {
                        Some(0) => {}
                        Some(_) => ends.push(j),
                        None => break,
                    }
                }
                if ends.is_empty() {
                    ends.push(k + 1);
                }
                ends
            })
            .collect();

        // route[k] = (best log-probability of run[k..], end of its first word)
        let mut route = vec![(0.0f64, n); n + 1];
        for k in (0..n).rev() {
            let mut best = (f64::NEG_INFINITY, k + 1);
            for &j in &dag[k] {
                let freq = self
                    .word_freq(&run[bounds[k]..bounds[j]])
                    .unwrap_or(0)
                    .max(1);
                let score = (freq as f64).ln() - self.log_total + route[j].0;
                // ties prefer the longer word
                if score >= best.0 {
                    best = (score, j);
                }
            }
            route[k] = best;
        }

        let mut k = 0;
        while k < n {
            let j = route[k].1;
            tokens.push(Cow::Borrowed(&run[bounds[k]..bounds[j]]));
            k = j;
        }
    }
}

impl Tokenizer for DictTokenizer {
    fn cut<'a>(&self, text: &'a str) -> Vec<Cow<'a, str>> {
        let mut tokens = Vec::new();
        let mut rest = text;
        while let Some(c) = rest.chars().next() {
            let unspaced = c.is_alphanumeric() && !c.is_ascii();
            let len = if c.is_ascii_alphanumeric() {
                run_len(rest, |ch| ch.is_ascii_alphanumeric())
            } else if unspaced {
                run_len(rest, |ch| ch.is_alphanumeric() && !ch.is_ascii())
            } else {
                c.len_utf8()
            };

            let (piece, tail) = rest.split_at(len);
            if unspaced {
                self.cut_run(piece, &mut tokens);
            } else {
                tokens.push(Cow::Borrowed(piece));
            }
            rest = tail;
        }
        tokens
    }
}

fn total_overflow(resource: &str, line: usize) -> Error {
    Error::Malformed {
        resource: resource.to_string(),
        line,
        reason: "frequency total exceeds u64::MAX".to_string(),
    }
}

fn run_len(s: &str, pred: impl Fn(char) -> bool) -> usize {
    s.char_indices()
        .find(|&(_, ch)| !pred(ch))
        .map_or(s.len(), |(i, _)| i)
}

#[derive(Default)]
struct Builder {
    freq: HashMap<String, u64>,
    words: usize,
    total: u64,
}

impl Builder {
    /// Returns whether `word` was already a dictionary word, or `None` when
    /// the frequency total would overflow. Nothing is changed in that case.
    fn add(&mut self, word: &str, freq: u64) -> Option<bool> {
        let previous = self.freq.get(word).copied().unwrap_or(0);
        self.total = (self.total - previous).checked_add(freq)?;
        self.freq.insert(word.to_string(), freq);
        let duplicate = previous > 0;
        match (previous > 0, freq > 0) {
            (false, true) => self.words += 1,
            (true, false) => self.words -= 1,
            _ => {}
        }

        for (idx, _) in word.char_indices().skip(1) {
            self.freq.entry(word[..idx].to_string()).or_insert(0);
        }
        Some(duplicate)
    }

    fn finish(self, resource: &str) -> Result<DictTokenizer> {
        if self.words == 0 {
            return Err(Error::EmptyResource(resource.to_string()));
        }
        Ok(DictTokenizer {
            freq: self.freq,
            words: self.words,
            log_total: (self.total.max(1) as f64).ln(),
        })
    }
}
