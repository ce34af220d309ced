//! Token hashing.
//!
//! Fingerprints are only comparable when every process hashes tokens the same
//! way, so the hash is xxh3-64 with the fixed default seed and never a
//! randomly seeded hasher.

use xxhash_rust::xxh3::xxh3_64;

/// Hashes a token's UTF-8 bytes to 64 bits. Total over all strings, `""` included.
#[inline]
pub fn hash_token(token: &str) -> u64 {
    xxh3_64(token.as_bytes())
}
