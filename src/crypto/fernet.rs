//! Fernet authenticated encryption (AES-128-CBC + HMAC-SHA256).
//!
//! A token is the base64url (padded) encoding of:
//!
//! ```text
//! [0x80: 1 byte][timestamp: 8 bytes BE][IV: 16 bytes][ciphertext: n*16 bytes][HMAC-SHA256: 32 bytes]
//! ```
//!
//! The 32-byte key is split in two: the first half signs, the second
//! half encrypts.  The HMAC covers everything before it.

use aes::Aes128;
use base64::engine::general_purpose::URL_SAFE;
use base64::Engine;
use cbc::cipher::{block_padding::Pkcs7, BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use hmac::{Hmac, Mac};
use sha2::Sha256;

use super::kdf::KEY_LEN;
use crate::errors::{Result, VaultError};

type Aes128CbcEnc = cbc::Encryptor<Aes128>;
type Aes128CbcDec = cbc::Decryptor<Aes128>;

/// Version byte every token starts with.
const VERSION: u8 = 0x80;

/// AES block size, which is also the IV length.
pub const IV_LEN: usize = 16;

const TIMESTAMP_LEN: usize = 8;
const HMAC_LEN: usize = 32;
const HEADER_LEN: usize = 1 + TIMESTAMP_LEN + IV_LEN;

/// Smallest well-formed token: header, one cipher block, tag.
const MIN_TOKEN_LEN: usize = HEADER_LEN + IV_LEN + HMAC_LEN;

/// Encrypt `plaintext` into a Fernet token.
///
/// `iv` and `timestamp` are supplied by the caller so that output can be
/// reproduced exactly when both are fixed.
pub fn encrypt(
    key: &[u8; KEY_LEN],
    plaintext: &[u8],
    iv: &[u8; IV_LEN],
    timestamp: u64,
) -> Result<Vec<u8>> {
    let (signing_key, encryption_key) = key.split_at(KEY_LEN / 2);

    let ciphertext = Aes128CbcEnc::new_from_slices(encryption_key, iv)
        .map_err(|e| VaultError::EncryptionFailed(format!("invalid key length: {e}")))?
        .encrypt_padded_vec_mut::<Pkcs7>(plaintext);

    let mut data = Vec::with_capacity(HEADER_LEN + ciphertext.len() + HMAC_LEN);
    data.push(VERSION);
    data.extend_from_slice(&timestamp.to_be_bytes());
    data.extend_from_slice(iv);
    data.extend_from_slice(&ciphertext);

    let mut mac = Hmac::<Sha256>::new_from_slice(signing_key)
        .map_err(|e| VaultError::EncryptionFailed(format!("invalid HMAC key: {e}")))?;
    mac.update(&data);
    data.extend_from_slice(&mac.finalize().into_bytes());

    Ok(URL_SAFE.encode(&data).into_bytes())
}

/// Verify and decrypt a token produced by `encrypt`.
///
/// Every failure (bad encoding, wrong version, short input, MAC mismatch,
/// bad padding) collapses into `DecryptionFailed`.
pub fn decrypt(key: &[u8; KEY_LEN], token: &[u8]) -> Result<Vec<u8>> {
    let data = URL_SAFE
        .decode(token)
        .map_err(|_| VaultError::DecryptionFailed)?;

    if data.len() < MIN_TOKEN_LEN || data[0] != VERSION {
        return Err(VaultError::DecryptionFailed);
    }

    let (signed, tag) = data.split_at(data.len() - HMAC_LEN);
    let (signing_key, encryption_key) = key.split_at(KEY_LEN / 2);

    // verify_slice compares in constant time.
    let mut mac =
        Hmac::<Sha256>::new_from_slice(signing_key).map_err(|_| VaultError::DecryptionFailed)?;
    mac.update(signed);
    mac.verify_slice(tag)
        .map_err(|_| VaultError::DecryptionFailed)?;

    let iv = &signed[1 + TIMESTAMP_LEN..HEADER_LEN];
    let ciphertext = &signed[HEADER_LEN..];
    if ciphertext.len() % IV_LEN != 0 {
        return Err(VaultError::DecryptionFailed);
    }

    Aes128CbcDec::new_from_slices(encryption_key, iv)
        .map_err(|_| VaultError::DecryptionFailed)?
        .decrypt_padded_vec_mut::<Pkcs7>(ciphertext)
        .map_err(|_| VaultError::DecryptionFailed)
}
