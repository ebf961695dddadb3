//! Entry fingerprints.
//!
//! A fingerprint is `hex(SHA-256(content || timestamp || creator))`, where
//! the timestamp is rendered as a decimal string.  The same value serves
//! as the duplicate-detection key and as the per-entry integrity check.

use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

/// Length of a hex-encoded fingerprint (SHA-256 = 32 bytes).
pub const FINGERPRINT_HEX_LEN: usize = 64;

/// Compute the fingerprint of an entry's fields.
pub fn fingerprint(content: &str, timestamp: i64, creator: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    hasher.update(timestamp.to_string().as_bytes());
    hasher.update(creator.as_bytes());
    hex::encode(hasher.finalize())
}

/// Recompute the fingerprint and compare it against `expected`.
pub fn verify_fingerprint(content: &str, timestamp: i64, creator: &str, expected: &str) -> bool {
    let actual = fingerprint(content, timestamp, creator);

    // Use constant-time comparison to avoid timing side channels.
    actual.as_bytes().ct_eq(expected.as_bytes()).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fingerprint_is_deterministic_hex() {
        let a = fingerprint("hello", 1_738_281_600, "0xabc");
        let b = fingerprint("hello", 1_738_281_600, "0xabc");
        assert_eq!(a, b);
        assert_eq!(a.len(), FINGERPRINT_HEX_LEN);
        assert!(a.bytes().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn fingerprint_matches_concatenated_digest() {
        let expected = hex::encode(Sha256::digest(b"hello1738281600alice"));
        assert_eq!(fingerprint("hello", 1_738_281_600, "alice"), expected);
    }

    #[test]
    fn fingerprint_changes_with_each_field() {
        let base = fingerprint("hello", 100, "alice");
        assert_ne!(base, fingerprint("hello!", 100, "alice"));
        assert_ne!(base, fingerprint("hello", 101, "alice"));
        assert_ne!(base, fingerprint("hello", 100, "bob"));
    }

    #[test]
    fn verify_accepts_match_and_rejects_mismatch() {
        let fp = fingerprint("memo", 7, "carol");
        assert!(verify_fingerprint("memo", 7, "carol", &fp));
        assert!(!verify_fingerprint("memo", 8, "carol", &fp));
        assert!(!verify_fingerprint("memo", 7, "carol", "deadbeef"));
    }
}
