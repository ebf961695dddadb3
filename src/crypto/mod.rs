//! Hashing primitives for MemVault.
//!
//! This module provides:
//! - SHA-256 entry fingerprints and their verification (`fingerprint`)

pub mod fingerprint;

// Re-export the most commonly used items so callers can write:
//   use crate::crypto::{fingerprint, verify_fingerprint};
pub use fingerprint::{fingerprint, verify_fingerprint, FINGERPRINT_HEX_LEN};
