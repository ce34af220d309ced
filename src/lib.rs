//! IDF-weighted SimHash fingerprints for near-duplicate text detection.
//!
//! A document is segmented into tokens, stop words are dropped, and every
//! remaining token votes on each of 64 bits with its IDF weight. Similar
//! documents end up with fingerprints at small Hamming distance.
//!
//! ```no_run
//! use idf_simhash::{load_dictionary, simhash, FULL_HASHBITS};
//!
//! load_dictionary("jieba.dict.txt", "idf.txt", "stop_words.txt")?;
//! let fp = simhash("江南皮革厂倒闭了", FULL_HASHBITS)?;
//! println!("{:016x}", fp);
//! # Ok::<(), idf_simhash::Error>(())
//! ```

pub mod config;
pub mod error;
pub mod hash;
pub mod idf;
pub mod pipeline;
pub mod resources;
pub mod simhash;
pub mod stop_words;
pub mod tokenizer;
mod utils;

#[cfg(feature = "python")]
mod python;

pub use config::{DefaultWeight, SimhashConfig, DEFAULT_UNKNOWN_WEIGHT};
pub use error::{Error, Result};
pub use hash::hash_token;
pub use idf::IdfTable;
pub use pipeline::{global, load_dictionary, simhash, Simhasher};
pub use resources::Resources;
pub use simhash::{
    cal_weights, fingerprint, truncate, BitScores, HashWeight, SimHashFingerprint, FULL_HASHBITS,
    HASH_BITS,
};
pub use stop_words::StopWords;
pub use tokenizer::{DictTokenizer, SimpleTokenizer, Tokenizer};

/// Installs `env_logger` at Info level unless a logger is already set.
pub fn init_logging() {
    let _ = env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .try_init();
}
