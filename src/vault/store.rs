//! High-level vault operations used by CLI commands.
//!
//! `Vault` ties a `Backend` (where encrypted safes live) to an
//! `EncryptionScheme` (how entries are encrypted) so the rest of the
//! application works with plaintext `Safe` values only.

use std::collections::HashMap;

use zeroize::Zeroizing;

use crate::config::Settings;
use crate::crypto::{EncryptionScheme, Encryptor, FernetScheme};
use crate::errors::{Result, VaultError};

use super::backend::{Backend, Entries, JsonBackend};
use super::safe::Safe;

/// Loads and saves whole safes under a single passphrase.
#[derive(Debug, Clone)]
pub struct Vault<B = JsonBackend, S = FernetScheme> {
    backend: B,
    scheme: S,
}

impl Vault<JsonBackend, FernetScheme> {
    /// The standard vault: JSON files under the configured directory,
    /// PBKDF2 + Fernet per entry.
    pub fn from_settings(settings: &Settings) -> Self {
        Self::from_settings_with_scheme(settings, FernetScheme::new())
    }
}

impl<S: EncryptionScheme> Vault<JsonBackend, S> {
    /// JSON files under the configured directory, encrypted with `scheme`.
    pub fn from_settings_with_scheme(settings: &Settings, scheme: S) -> Self {
        let backend = JsonBackend::new(&settings.vault_dir, settings.obfuscate)
            .with_atomic_writes(settings.atomic_writes);
        Self::with_parts(backend, scheme)
    }
}

impl<B: Backend, S: EncryptionScheme> Vault<B, S> {
    pub fn with_parts(backend: B, scheme: S) -> Self {
        Self { backend, scheme }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Whether a safe with this name has been saved.
    pub fn exists(&self, name: &str) -> Result<bool> {
        self.backend.exists(name)
    }

    /// A new, empty safe.  Nothing is written until `save`.
    pub fn create(&self, name: &str) -> Safe {
        Safe::new(name)
    }

    /// Read and decrypt a whole safe.
    ///
    /// Any entry that fails to decrypt aborts the load; there is no
    /// partial result.
    pub fn load(&self, name: &str, passphrase: &str) -> Result<Safe> {
        if !self.backend.exists(name)? {
            return Err(VaultError::NoSuchSafe(name.to_string()));
        }

        let encrypted = self.backend.load(name)?;
        let encryptor = self.scheme.encryptor(passphrase.as_bytes());

        let mut entries = HashMap::with_capacity(encrypted.len());
        for (entry_name, entry) in encrypted {
            let plaintext = Zeroizing::new(encryptor.decrypt(&entry)?);
            entries.insert(entry_name, plaintext);
        }

        Ok(Safe::from_plaintext(name, entries))
    }

    /// Re-encrypt every entry with a fresh salt and rewrite the safe file.
    pub fn save(&self, safe: &Safe, passphrase: &str) -> Result<()> {
        let encryptor = self.scheme.encryptor(passphrase.as_bytes());

        let mut encrypted = Entries::new();
        for (entry_name, plaintext) in safe.plaintext() {
            encrypted.insert(entry_name.to_string(), encryptor.encrypt(plaintext)?);
        }

        self.backend.save(safe.name(), &encrypted)
    }
}
