use std::path::PathBuf;
use thiserror::Error;

/// All errors that can occur in IronVault.
#[derive(Debug, Error)]
pub enum VaultError {
    // --- Crypto errors ---
    #[error("Encryption failed: {0}")]
    EncryptionFailed(String),

    /// A wrong passphrase and a corrupted token are indistinguishable.
    #[error("Decryption failed — wrong passphrase or corrupted data")]
    DecryptionFailed,

    #[error("Key derivation failed: {0}")]
    KeyDerivationFailed(String),

    // --- Safe errors ---
    #[error("Invalid safe name '{0}'")]
    InvalidSafeName(String),

    #[error("No such safe: {0}")]
    NoSuchSafe(String),

    #[error("Invalid safe format: {0}")]
    InvalidSafeFormat(String),

    #[error("Entry '{0}' not found")]
    KeyNotFound(String),

    #[error("Entry '{0}' is not valid UTF-8 text")]
    Decode(String),

    // --- Storage errors ---
    #[error("Storage error at {}: {source}", path.display())]
    Storage {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // --- Config errors ---
    #[error("Config file error: {0}")]
    ConfigError(String),

    // --- CLI errors ---
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Command failed: {0}")]
    CommandFailed(String),

    #[error("User cancelled operation")]
    UserCancelled,
}

impl VaultError {
    /// Wrap an I/O failure on `path` as a storage error.
    pub fn storage(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Storage {
            path: path.into(),
            source,
        }
    }
}

/// Convenience type alias for IronVault results.
pub type Result<T> = std::result::Result<T, VaultError>;
