//! The `Entry` record stored in a vault.
//!
//! Entries are immutable once admitted: fields are private and only
//! exposed through accessors.

use serde::Serialize;

use crate::crypto::verify_fingerprint;

/// A single recorded memory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Entry {
    creator: String,
    content: String,
    timestamp: i64,
    sequence_id: u64,
    fingerprint: String,
}

impl Entry {
    pub(crate) fn new(
        creator: String,
        content: String,
        timestamp: i64,
        sequence_id: u64,
        fingerprint: String,
    ) -> Self {
        Self {
            creator,
            content,
            timestamp,
            sequence_id,
            fingerprint,
        }
    }

    pub fn creator(&self) -> &str {
        &self.creator
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    /// Admission time, in seconds since the Unix epoch.
    pub fn timestamp(&self) -> i64 {
        self.timestamp
    }

    /// Zero-based admission order.
    pub fn sequence_id(&self) -> u64 {
        self.sequence_id
    }

    /// Hex SHA-256 over content, timestamp and creator.
    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }

    /// Recompute the fingerprint from the stored fields and compare.
    pub fn verify(&self) -> bool {
        verify_fingerprint(
            &self.content,
            self.timestamp,
            &self.creator,
            &self.fingerprint,
        )
    }
}

/// Length of `content` in UTF-16 code units.
///
/// Characters outside the Basic Multilingual Plane (most emoji) count
/// as two units.
pub fn content_len(content: &str) -> usize {
    content.encode_utf16().count()
}
