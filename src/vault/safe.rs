//! The in-memory, plaintext side of a safe.
//!
//! A `Safe` only ever exists in memory.  Values are kept as UTF-8 bytes
//! in zeroizing buffers; the public API speaks `&str`/`String` and does
//! the encode/decode at the boundary.

use std::collections::HashMap;
use std::fmt;

use zeroize::Zeroizing;

use crate::errors::{Result, VaultError};

/// A named collection of plaintext secrets.
#[derive(Clone, PartialEq, Eq)]
pub struct Safe {
    name: String,
    entries: HashMap<String, Zeroizing<Vec<u8>>>,
}

impl Safe {
    /// An empty safe.  Nothing touches the disk until it is saved.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            entries: HashMap::new(),
        }
    }

    /// Assemble a safe from already-decrypted plaintext.
    pub(crate) fn from_plaintext(name: &str, entries: HashMap<String, Zeroizing<Vec<u8>>>) -> Self {
        Self {
            name: name.to_string(),
            entries,
        }
    }

    /// The safe name, which also determines its file name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Store `secret` under `name`, replacing any existing value.
    pub fn add(&mut self, name: &str, secret: &str) {
        self.entries
            .insert(name.to_string(), Zeroizing::new(secret.as_bytes().to_vec()));
    }

    /// Indexed write; same as `add`.
    pub fn set(&mut self, name: &str, secret: &str) {
        self.add(name, secret);
    }

    /// Return the value for `name`, or `None` if there is no such entry.
    pub fn get(&self, name: &str) -> Result<Option<String>> {
        self.entries
            .get(name)
            .map(|bytes| decode(name, bytes))
            .transpose()
    }

    /// Return the value for `name`, or `default` if there is no such entry.
    pub fn get_or(&self, name: &str, default: &str) -> Result<String> {
        Ok(self.get(name)?.unwrap_or_else(|| default.to_string()))
    }

    /// Indexed read: like `get`, but a missing entry is an error.
    pub fn fetch(&self, name: &str) -> Result<String> {
        self.get(name)?
            .ok_or_else(|| VaultError::KeyNotFound(name.to_string()))
    }

    /// Remove an entry.
    pub fn delete(&mut self, name: &str) -> Result<()> {
        match self.entries.remove(name) {
            Some(_) => Ok(()),
            None => Err(VaultError::KeyNotFound(name.to_string())),
        }
    }

    /// Entry names, in no particular order.  Call again to restart.
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.keys().map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Raw plaintext bytes per entry, for re-encryption on save.
    pub(crate) fn plaintext(&self) -> impl Iterator<Item = (&str, &[u8])> + '_ {
        self.entries
            .iter()
            .map(|(name, bytes)| (name.as_str(), bytes.as_slice()))
    }
}

// Values are never printed.
impl fmt::Debug for Safe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&str> = self.names().collect();
        names.sort_unstable();
        f.debug_struct("Safe")
            .field("name", &self.name)
            .field("entries", &names)
            .finish()
    }
}

fn decode(name: &str, bytes: &[u8]) -> Result<String> {
    std::str::from_utf8(bytes)
        .map(str::to_string)
        .map_err(|_| VaultError::Decode(name.to_string()))
}
