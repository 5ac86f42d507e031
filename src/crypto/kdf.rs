//! Password-based key derivation using PBKDF2-HMAC-SHA256.
//!
//! Every entry carries its own random salt, so the KDF runs once per
//! entry on both encrypt and decrypt.  The iteration count is not stored
//! in the safe file; changing the default makes existing safes unreadable.

use pbkdf2::pbkdf2_hmac;
use sha2::Sha256;

use crate::errors::{Result, VaultError};

/// Length of the per-entry salt in bytes (128 bits).
pub const SALT_LEN: usize = 16;

/// Length of the derived key in bytes (signing half + encryption half).
pub const KEY_LEN: usize = 32;

/// Iteration count used for every safe written by the CLI.
pub const DEFAULT_ITERATIONS: u32 = 390_000;

/// Lowest iteration count accepted at all.
const MIN_ITERATIONS: u32 = 1_000;

/// PBKDF2 parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pbkdf2Params {
    /// Number of HMAC-SHA256 rounds (default: 390 000).
    pub iterations: u32,
}

impl Default for Pbkdf2Params {
    fn default() -> Self {
        Self {
            iterations: DEFAULT_ITERATIONS,
        }
    }
}

/// Derive a 32-byte key from a passphrase and salt with the default
/// iteration count.
pub fn derive_key(passphrase: &[u8], salt: &[u8]) -> Result<[u8; KEY_LEN]> {
    derive_key_with_params(passphrase, salt, &Pbkdf2Params::default())
}

/// Derive a 32-byte key with explicit PBKDF2 parameters.
///
/// The same passphrase + salt + params always produce the same key.
pub fn derive_key_with_params(
    passphrase: &[u8],
    salt: &[u8],
    params: &Pbkdf2Params,
) -> Result<[u8; KEY_LEN]> {
    if params.iterations < MIN_ITERATIONS {
        return Err(VaultError::KeyDerivationFailed(format!(
            "PBKDF2 iterations must be at least {MIN_ITERATIONS} (got {})",
            params.iterations
        )));
    }
    if salt.is_empty() {
        return Err(VaultError::KeyDerivationFailed("salt cannot be empty".into()));
    }

    let mut key = [0u8; KEY_LEN];
    pbkdf2_hmac::<Sha256>(passphrase, salt, params.iterations, &mut key);
    Ok(key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_known_vector() {
        // PBKDF2-HMAC-SHA256("mykey", 16 zero bytes, 390 000).
        let key = derive_key(b"mykey", &[0u8; SALT_LEN]).unwrap();
        let hex: String = key.iter().map(|b| format!("{b:02x}")).collect();
        assert_eq!(
            hex,
            "b4083a28a35659a17ae62d4e9a6f9de6d54d9f1395a62aa012cbcee9753f782e"
        );
    }

    #[test]
    fn rejects_weak_iteration_count() {
        let params = Pbkdf2Params { iterations: 10 };
        assert!(derive_key_with_params(b"pw", b"salt", &params).is_err());
    }

    #[test]
    fn rejects_empty_salt() {
        let params = Pbkdf2Params { iterations: 1_000 };
        assert!(derive_key_with_params(b"pw", b"", &params).is_err());
    }
}
