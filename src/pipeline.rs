//! Text to fingerprint.
//!
//! text -> tokens -> stop-word filter -> (hash, idf weight) -> bit votes -> fingerprint.
//!
//! [`Simhasher`] owns a shared handle to its [`Resources`] and can be built as
//! many times as needed. The free functions [`load_dictionary`] and
//! [`simhash`] drive a single process-wide instance that is loaded once and
//! never replaced.

use std::path::Path;
use std::sync::{Arc, Mutex, OnceLock};
use std::time::Instant;

use rayon::prelude::*;

use crate::config::SimhashConfig;
use crate::error::{Error, Result};
use crate::hash::hash_token;
use crate::resources::Resources;
use crate::simhash::{cal_weights, fingerprint, truncate, HashWeight, SimHashFingerprint};

/// Stateless fingerprinting pipeline over a read-only resource bundle.
#[derive(Debug, Clone)]
pub struct Simhasher {
    resources: Arc<Resources>,
    config: SimhashConfig,
    unknown_weight: f64,
}

impl Simhasher {
    pub fn new(resources: Arc<Resources>) -> Self {
        Self::with_config(resources, SimhashConfig::default())
    }

    pub fn with_config(resources: Arc<Resources>, config: SimhashConfig) -> Self {
        let unknown_weight = config.default_weight.resolve(resources.idf());
        Self {
            resources,
            config,
            unknown_weight,
        }
    }

    pub fn resources(&self) -> &Resources {
        &self.resources
    }

    pub fn config(&self) -> &SimhashConfig {
        &self.config
    }

    /// Weight given to tokens the IDF table does not know.
    pub fn unknown_weight(&self) -> f64 {
        self.unknown_weight
    }

    /// One pair per token surviving the stop-word filter, in text order.
    ///
    /// Whitespace-only tokens are dropped with the stop words. Tokens missing
    /// from the IDF table get [`Simhasher::unknown_weight`].
    pub fn weighted_hashes(&self, text: &str) -> Vec<HashWeight> {
        let stop_words = self.resources.stop_words();
        let idf = self.resources.idf();

        self.resources
            .tokenizer()
            .cut(text)
            .iter()
            .filter(|token| !token.trim().is_empty() && !stop_words.contains(token))
            .map(|token| {
                let weight = idf.get(token).unwrap_or(self.unknown_weight);
                HashWeight::new(hash_token(token), weight)
            })
            .collect()
    }

    /// Fingerprints `text`, keeping the low `hashbits` bits when `hashbits`
    /// is in `1..64` and all 64 otherwise (see [`truncate`]).
    ///
    /// Text without any surviving token has the all-ones fingerprint.
    pub fn simhash(&self, text: &str, hashbits: i32) -> u64 {
        let scores = cal_weights(&self.weighted_hashes(text));
        truncate(fingerprint(&scores), hashbits)
    }

    pub fn fingerprint(&self, text: &str, hashbits: i32) -> SimHashFingerprint {
        SimHashFingerprint(self.simhash(text, hashbits))
    }

    /// Fingerprints every document in parallel. Output order follows input order.
    pub fn simhash_batch<S>(&self, texts: &[S], hashbits: i32) -> Vec<u64>
    where
        S: AsRef<str> + Sync,
    {
        let start = Instant::now();
        let fingerprints: Vec<u64> = texts
            .par_iter()
            .map(|text| self.simhash(text.as_ref(), hashbits))
            .collect();
        log::debug!(
            "Fingerprinted {} documents in {:.2?}",
            fingerprints.len(),
            start.elapsed()
        );
        fingerprints
    }
}

static GLOBAL: OnceLock<Simhasher> = OnceLock::new();

/// Serializes loaders so concurrent first calls read the files only once.
static LOADING: Mutex<()> = Mutex::new(());

/// Loads the process-wide resources. Must complete before [`simhash`] is used;
/// a second call fails with [`Error::AlreadyInitialized`].
///
/// Concurrent callers wait for the one doing the I/O; the others then get
/// [`Error::AlreadyInitialized`]. A failed load leaves the state unset.
pub fn load_dictionary(
    dict_path: impl AsRef<Path>,
    idf_path: impl AsRef<Path>,
    stop_words_path: impl AsRef<Path>,
) -> Result<()> {
    // the guarded data is (), so a poisoned lock carries no broken state
    let _guard = LOADING.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    if GLOBAL.get().is_some() {
        return Err(Error::AlreadyInitialized);
    }
    let resources = Resources::load(dict_path, idf_path, stop_words_path)?;
    GLOBAL
        .set(Simhasher::new(Arc::new(resources)))
        .map_err(|_| Error::AlreadyInitialized)
}

/// The process-wide pipeline, once [`load_dictionary`] has succeeded.
pub fn global() -> Result<&'static Simhasher> {
    GLOBAL.get().ok_or(Error::NotInitialized)
}

/// Fingerprints `text` with the process-wide resources.
pub fn simhash(text: &str, hashbits: i32) -> Result<u64> {
    Ok(global()?.simhash(text, hashbits))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::idf::IdfTable;
    use crate::simhash::FULL_HASHBITS;
    use crate::stop_words::StopWords;
    use crate::tokenizer::{DictTokenizer, SimpleTokenizer};

    fn simhasher() -> Simhasher {
        let tokenizer = DictTokenizer::from_words([
            ("江南", 300u64),
            ("皮革厂", 20),
            ("倒闭", 150),
            ("了", 5000),
        ])
        .unwrap();
        let idf: IdfTable = [("江南", 9.5), ("皮革厂", 11.75), ("倒闭", 8.0)]
            .into_iter()
            .collect();
        let stop: StopWords = ["了", "，"].into_iter().collect();
        Simhasher::new(Arc::new(Resources::new(tokenizer, idf, stop)))
    }

    #[test]
    fn weighted_hashes_follow_token_order() {
        let pairs = simhasher().weighted_hashes("江南皮革厂倒闭了");
        assert_eq!(
            pairs,
            vec![
                HashWeight::new(hash_token("江南"), 9.5),
                HashWeight::new(hash_token("皮革厂"), 11.75),
                HashWeight::new(hash_token("倒闭"), 8.0),
            ]
        );
    }

    #[test]
    fn simhash_matches_manual_pipeline() {
        let hasher = simhasher();
        let expected = fingerprint(&cal_weights(&[
            HashWeight::new(hash_token("江南"), 9.5),
            HashWeight::new(hash_token("皮革厂"), 11.75),
            HashWeight::new(hash_token("倒闭"), 8.0),
        ]));
        assert_eq!(hasher.simhash("江南皮革厂倒闭了", FULL_HASHBITS), expected);
        assert_eq!(hasher.simhash("江南皮革厂倒闭了", FULL_HASHBITS), expected);
    }

    #[test]
    fn stop_words_and_whitespace_do_not_vote() {
        let hasher = simhasher();
        let plain = hasher.simhash("江南皮革厂倒闭", FULL_HASHBITS);
        assert_eq!(hasher.simhash("江南 皮革厂，倒闭了了", FULL_HASHBITS), plain);
    }

    #[test]
    fn unknown_tokens_use_default_weight() {
        let resources = simhasher().resources;
        let hasher = Simhasher::with_config(
            resources,
            SimhashConfig::default().with_default_weight(0.25),
        );
        let pairs = hasher.weighted_hashes("Hello江南");
        assert_eq!(pairs[0], HashWeight::new(hash_token("Hello"), 0.25));
        assert_eq!(pairs[1].weight, 9.5);
        assert_eq!(simhasher().unknown_weight(), 1.0);
    }

    #[test]
    fn median_idf_weights_unknown_tokens() {
        let hasher =
            Simhasher::with_config(simhasher().resources, SimhashConfig::default().with_median_idf());
        assert_eq!(hasher.unknown_weight(), 9.5);
        let pairs = hasher.weighted_hashes("Hello倒闭");
        assert_eq!(pairs[0], HashWeight::new(hash_token("Hello"), 9.5));
        assert_eq!(pairs[1].weight, 8.0);
    }

    #[test]
    fn empty_or_all_stop_words_is_all_ones() {
        let hasher = simhasher();
        assert_eq!(hasher.simhash("", FULL_HASHBITS), u64::MAX);
        assert_eq!(hasher.simhash("了，了  ", FULL_HASHBITS), u64::MAX);
        assert_eq!(hasher.simhash("", 8), 0xFF);
    }

    #[test]
    fn truncation_keeps_low_bits() {
        let hasher = simhasher();
        let full = hasher.simhash("江南皮革厂倒闭了", FULL_HASHBITS);
        assert_eq!(hasher.simhash("江南皮革厂倒闭了", 64), full);
        assert_eq!(hasher.simhash("江南皮革厂倒闭了", 32), full & 0xFFFF_FFFF);
        assert_eq!(
            hasher.fingerprint("江南皮革厂倒闭了", 16),
            SimHashFingerprint(full & 0xFFFF)
        );
    }

    #[test]
    fn batch_matches_sequential() {
        let hasher = simhasher();
        let docs = vec![
            "江南皮革厂倒闭了".to_string(),
            String::new(),
            "倒闭了江南".to_string(),
            "皮革厂".to_string(),
        ];
        let batch = hasher.simhash_batch(&docs, FULL_HASHBITS);
        let sequential: Vec<u64> = docs
            .iter()
            .map(|d| hasher.simhash(d, FULL_HASHBITS))
            .collect();
        assert_eq!(batch, sequential);
    }

    #[test]
    fn token_order_does_not_matter() {
        let hasher = simhasher();
        assert_eq!(
            hasher.simhash("倒闭江南皮革厂", FULL_HASHBITS),
            hasher.simhash("皮革厂江南倒闭", FULL_HASHBITS)
        );
    }

    #[test]
    fn pipelines_are_independent() {
        let simple = Simhasher::new(Arc::new(Resources::new(
            SimpleTokenizer,
            IdfTable::new(),
            StopWords::new(),
        )));
        let pairs = simple.weighted_hashes("Hello, hello");
        assert_eq!(pairs.len(), 2);
        assert_eq!(pairs[0], pairs[1]);
        assert_eq!(pairs[0].weight, 1.0);
        assert_eq!(
            simple.simhash("HELLO", FULL_HASHBITS),
            simple.simhash("hello", FULL_HASHBITS)
        );
    }
}
