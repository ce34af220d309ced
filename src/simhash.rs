//! Weighted bit voting and fingerprint assembly.
//!
//! Every (hash, weight) pair votes on each of the 64 bit positions: `+weight`
//! where its hash has the bit set, `-weight` otherwise. A fingerprint bit is
//! set when the summed vote is non-negative, so an exact tie (including the
//! empty input) resolves to 1.

use std::fmt;

#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::*;

/// Width of a fingerprint in bits.
pub const HASH_BITS: usize = 64;

/// `hashbits` sentinel requesting the full, untruncated fingerprint.
pub const FULL_HASHBITS: i32 = -1;

/// Per-bit vote totals. Index `i` decides the bit with value `1 << i`.
pub type BitScores = [f64; HASH_BITS];

/// A token hash paired with the weight of its vote.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HashWeight {
    pub hash: u64,
    pub weight: f64,
}

impl HashWeight {
    pub fn new(hash: u64, weight: f64) -> Self {
        Self { hash, weight }
    }
}

impl From<(u64, f64)> for HashWeight {
    fn from((hash, weight): (u64, f64)) -> Self {
        Self { hash, weight }
    }
}

/// A 64-bit SimHash fingerprint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SimHashFingerprint(pub u64);

impl SimHashFingerprint {
    /// Hamming distance between two fingerprints (XOR + popcount).
    pub fn hamming_distance(&self, other: &Self) -> u32 {
        (self.0 ^ other.0).count_ones()
    }
}

impl From<SimHashFingerprint> for u64 {
    fn from(fp: SimHashFingerprint) -> Self {
        fp.0
    }
}

impl fmt::Display for SimHashFingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016x}", self.0)
    }
}

/// Sums the signed votes of all pairs per bit position, in input order.
///
/// Duplicate pairs vote once per occurrence. An empty slice yields 64 zeros.
/// On x86_64 CPUs with AVX2 the votes are accumulated four lanes at a time;
/// each lane sees the same additions in the same order as the scalar loop, so
/// both paths agree bit-for-bit.
pub fn cal_weights(pairs: &[HashWeight]) -> BitScores {
    let mut scores = [0.0f64; HASH_BITS];

    #[cfg(target_arch = "x86_64")]
    {
        if is_x86_feature_detected!("avx2") {
            unsafe { avx2_path(pairs, &mut scores) };
            return scores;
        }
    }

    scalar_path(pairs, &mut scores);
    scores
}

fn scalar_path(pairs: &[HashWeight], scores: &mut BitScores) {
    for pair in pairs {
        for (i, score) in scores.iter_mut().enumerate() {
            if (pair.hash >> i) & 1 == 1 {
                *score += pair.weight;
            } else {
                *score -= pair.weight;
            }
        }
    }
}

#[target_feature(enable = "avx2")]
#[cfg(target_arch = "x86_64")]
unsafe fn avx2_path(pairs: &[HashWeight], scores: &mut BitScores) {
    let ones = _mm256_set1_epi64x(1);
    for pair in pairs {
        let hash = _mm256_set1_epi64x(pair.hash as i64);
        let add = _mm256_set1_pd(pair.weight);
        let sub = _mm256_set1_pd(-pair.weight);

        let mut i = 0;
        while i < HASH_BITS {
            let lane = i as i64;
            let shifts = _mm256_set_epi64x(lane + 3, lane + 2, lane + 1, lane);
            let bits = _mm256_and_si256(_mm256_srlv_epi64(hash, shifts), ones);

            // All-ones lanes where the bit is set select `add`.
            let mask = _mm256_castsi256_pd(_mm256_cmpeq_epi64(bits, ones));
            let delta = _mm256_blendv_pd(sub, add, mask);

            let current = _mm256_loadu_pd(scores.as_ptr().add(i));
            _mm256_storeu_pd(scores.as_mut_ptr().add(i), _mm256_add_pd(current, delta));

            i += 4;
        }
    }
}

/// Collapses vote totals into a fingerprint: bit `i` is set iff `scores[i] >= 0`.
///
/// Zero counts as set, so all-zero scores give `u64::MAX`. NaN leaves the bit clear.
pub fn fingerprint(scores: &BitScores) -> u64 {
    let mut fp = 0u64;
    for (i, &score) in scores.iter().enumerate() {
        if score >= 0.0 {
            fp |= 1u64 << i;
        }
    }
    fp
}

/// Keeps the low `hashbits` bits when `hashbits` is in `1..64`.
///
/// Any other value, [`FULL_HASHBITS`] in particular, returns `fp` unchanged.
/// Higher bits are discarded; the vote itself is always 64 wide.
pub fn truncate(fp: u64, hashbits: i32) -> u64 {
    if (1..HASH_BITS as i32).contains(&hashbits) {
        fp & ((1u64 << hashbits) - 1)
    } else {
        fp
    }
}
