use thiserror::Error;

/// All errors that can occur in MemVault.
#[derive(Debug, Error)]
pub enum MemVaultError {
    // --- Admission errors ---
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Vault is full — capacity of {capacity} entries reached")]
    CapacityExceeded { capacity: u64 },

    #[error("Duplicate entry — fingerprint {0} already recorded")]
    DuplicateEntry(String),

    #[error("Entry #{0} not found")]
    NotFound(u64),

    // --- Config errors ---
    #[error("Config file error: {0}")]
    ConfigError(String),

    // --- IO errors ---
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // --- Serialization errors ---
    #[error("Serialization error: {0}")]
    SerializationError(String),

    // --- CLI errors ---
    #[error("Command failed: {0}")]
    CommandFailed(String),
}

impl MemVaultError {
    /// Shorthand for building an `InvalidInput` error.
    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }
}

/// Convenience type alias for MemVault results.
pub type Result<T> = std::result::Result<T, MemVaultError>;
