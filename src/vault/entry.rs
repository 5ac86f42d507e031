//! The encrypted record stored for each secret.

/// One encrypted secret: the KDF salt and the Fernet token.
///
/// Entries are immutable; re-encrypting a secret produces a new one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    salt: Vec<u8>,
    token: Vec<u8>,
}

impl Entry {
    pub fn new(salt: Vec<u8>, token: Vec<u8>) -> Self {
        Self { salt, token }
    }

    /// The per-entry KDF salt.
    pub fn salt(&self) -> &[u8] {
        &self.salt
    }

    /// The opaque ciphertext token.
    pub fn token(&self) -> &[u8] {
        &self.token
    }
}
