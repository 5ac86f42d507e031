//! Per-entry encryption: PBKDF2 key derivation feeding a Fernet token.
//!
//! An `EncryptionScheme` is bound to KDF parameters and a source of
//! randomness; give it a passphrase and it hands back an `Encryptor`
//! that turns plaintext into `Entry` values and back.

use chrono::Utc;
use rand::RngCore;
use zeroize::Zeroizing;

use super::fernet::{self, IV_LEN};
use super::kdf::{derive_key_with_params, Pbkdf2Params, SALT_LEN};
use crate::errors::{Result, VaultError};
use crate::vault::Entry;

/// Where salts, IVs and token timestamps come from.
pub trait Entropy {
    /// Fill `dest` with random bytes.
    fn fill(&self, dest: &mut [u8]);

    /// Seconds since the Unix epoch.
    fn unix_time(&self) -> u64;
}

/// OS-seeded CSPRNG and the wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemEntropy;

impl Entropy for SystemEntropy {
    fn fill(&self, dest: &mut [u8]) {
        rand::rng().fill_bytes(dest);
    }

    fn unix_time(&self) -> u64 {
        u64::try_from(Utc::now().timestamp()).unwrap_or(0)
    }
}

/// Constant bytes and a frozen clock, for reproducible output.
///
/// Never use this for real safes: every entry gets the same salt and IV.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedEntropy {
    pub byte: u8,
    pub unix_time: u64,
}

impl Entropy for FixedEntropy {
    fn fill(&self, dest: &mut [u8]) {
        dest.fill(self.byte);
    }

    fn unix_time(&self) -> u64 {
        self.unix_time
    }
}

/// Transforms plaintext secrets to and from `Entry` values under one
/// passphrase.
pub trait Encryptor {
    fn encrypt(&self, secret: &[u8]) -> Result<Entry>;

    /// Fails with `DecryptionFailed` on a wrong passphrase or a
    /// tampered/malformed token.
    fn decrypt(&self, entry: &Entry) -> Result<Vec<u8>>;
}

/// Builds an `Encryptor` for a passphrase.
pub trait EncryptionScheme {
    type Encryptor: Encryptor;

    fn encryptor(&self, passphrase: &[u8]) -> Self::Encryptor;
}

/// PBKDF2-HMAC-SHA256 + Fernet.
#[derive(Debug, Clone, Default)]
pub struct FernetScheme<R = SystemEntropy> {
    params: Pbkdf2Params,
    entropy: R,
}

impl FernetScheme<SystemEntropy> {
    /// Default KDF parameters and system randomness.
    pub fn new() -> Self {
        Self::default()
    }
}

impl<R> FernetScheme<R> {
    /// Default KDF parameters with a custom randomness source.
    pub fn with_entropy(entropy: R) -> Self {
        Self {
            params: Pbkdf2Params::default(),
            entropy,
        }
    }

    /// Override the KDF parameters.
    ///
    /// Safes written with one iteration count cannot be read with another.
    pub fn with_params(mut self, params: Pbkdf2Params) -> Self {
        self.params = params;
        self
    }

    pub fn params(&self) -> &Pbkdf2Params {
        &self.params
    }
}

impl<R: Entropy + Clone> EncryptionScheme for FernetScheme<R> {
    type Encryptor = FernetEncryptor<R>;

    fn encryptor(&self, passphrase: &[u8]) -> FernetEncryptor<R> {
        FernetEncryptor {
            passphrase: Zeroizing::new(passphrase.to_vec()),
            params: self.params,
            entropy: self.entropy.clone(),
        }
    }
}

/// A passphrase bound to the Fernet scheme.  The passphrase copy is
/// wiped on drop.
pub struct FernetEncryptor<R = SystemEntropy> {
    passphrase: Zeroizing<Vec<u8>>,
    params: Pbkdf2Params,
    entropy: R,
}

impl FernetEncryptor<SystemEntropy> {
    /// Encryptor with default parameters and system randomness.
    pub fn new(passphrase: &[u8]) -> Self {
        FernetScheme::new().encryptor(passphrase)
    }
}

impl<R: Entropy> Encryptor for FernetEncryptor<R> {
    fn encrypt(&self, secret: &[u8]) -> Result<Entry> {
        let mut salt = [0u8; SALT_LEN];
        self.entropy.fill(&mut salt);

        let key = Zeroizing::new(derive_key_with_params(&self.passphrase, &salt, &self.params)?);

        let mut iv = [0u8; IV_LEN];
        self.entropy.fill(&mut iv);

        let token = fernet::encrypt(&key, secret, &iv, self.entropy.unix_time())?;
        Ok(Entry::new(salt.to_vec(), token))
    }

    fn decrypt(&self, entry: &Entry) -> Result<Vec<u8>> {
        // A salt read from disk is untrusted input: a bad one must look
        // exactly like a wrong passphrase.
        let key = derive_key_with_params(&self.passphrase, entry.salt(), &self.params)
            .map(Zeroizing::new)
            .map_err(|_| VaultError::DecryptionFailed)?;
        fernet::decrypt(&key, entry.token())
    }
}
