//! Cryptographic primitives for IronVault.
//!
//! This module provides:
//! - PBKDF2-HMAC-SHA256 password-based key derivation (`kdf`)
//! - Fernet authenticated tokens (`fernet`)
//! - The per-entry `Encryptor` built on both (`encryptor`)

pub mod encryptor;
pub mod fernet;
pub mod kdf;

// Re-export the most commonly used items so callers can write:
//   use crate::crypto::{Encryptor, FernetScheme, ...};
pub use encryptor::{
    EncryptionScheme, Encryptor, Entropy, FernetEncryptor, FernetScheme, FixedEntropy,
    SystemEntropy,
};
pub use kdf::{derive_key, derive_key_with_params, Pbkdf2Params};
