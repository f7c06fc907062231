//! Deterministic identifier hashing
//!
//! Maps an original name to a bounded numeric suffix: SHA-256 of the
//! UTF-8 bytes, first 8 hex characters of the digest interpreted as a
//! base-16 integer, reduced modulo 1000. Pure function of the input
//! bytes, so suffixes are stable across runs and across processes.

use sha2::{Digest, Sha256};

/// Number of distinct suffixes per category
pub const SUFFIX_SPACE: u32 = 1000;

/// Derives the numeric suffix for an original name
///
/// Returns a value in `[0, 999]`. The empty string is a valid name and
/// hashes like any other input. Distinct names may collide; with a
/// 1000-wide suffix space collisions are expected (birthday bound) once
/// a category approaches a few dozen distinct names, and are accepted
/// rather than masked.
///
/// # Examples
///
/// ```
/// use ironveil::core::anonymize::hash_suffix;
///
/// assert_eq!(hash_suffix("Acme Industrial Corp"), 109);
/// assert_eq!(hash_suffix("Acme Industrial Corp"), 109);
/// ```
pub fn hash_suffix(original_name: &str) -> u16 {
    let digest = Sha256::digest(original_name.as_bytes());
    // First 4 digest bytes big-endian == first 8 hex characters of the
    // hex digest interpreted base-16.
    let head = u32::from_be_bytes([digest[0], digest[1], digest[2], digest[3]]);
    (head % SUFFIX_SPACE) as u16
}
