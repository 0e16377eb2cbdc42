//! Content fingerprints

use sha2::{Digest, Sha256};

use crate::normalize::normalize;

/// Length in characters of every fingerprint produced by [`fingerprint`].
pub const FINGERPRINT_LEN: usize = 64;

/// Compute the fingerprint of already-normalized text.
///
/// Lowercase hex SHA-256 of the UTF-8 bytes of `text`.
pub fn fingerprint(text: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    let result = hasher.finalize();
    format!("{:x}", result)
}

/// Normalize `raw` and fingerprint the result.
///
/// This is what a baseline fingerprint is computed from at approval time.
pub fn fingerprint_text(raw: &str) -> String {
    fingerprint(&normalize(raw))
}
