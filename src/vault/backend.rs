//! On-disk representation of a safe.
//!
//! A safe file is a pretty-printed JSON object keyed by entry name:
//!
//! ```text
//! {
//!     "<entry>": {
//!         "salt": "<base64>",
//!         "token": "<base64>"
//!     }
//! }
//! ```
//!
//! With obfuscation on (the default) the whole text is base64-encoded
//! once more and stored as `<name>.b64`; otherwise it is stored as-is
//! in `<name>.json`.  The outer layer only keeps the file from being
//! read at a glance.  It is not encryption.

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::{Deserialize, Serialize};
use serde_json::ser::PrettyFormatter;

use super::entry::Entry;
use crate::errors::{Result, VaultError};

/// Encrypted entries keyed by name, sorted so files are written
/// deterministically.
pub type Entries = BTreeMap<String, Entry>;

/// Storage for the encrypted form of whole safes.
pub trait Backend {
    /// Read every entry of the named safe.
    fn load(&self, name: &str) -> Result<Entries>;

    /// Replace the named safe with `entries`.
    fn save(&self, name: &str, entries: &Entries) -> Result<()>;

    /// Whether the named safe has a backing file.
    fn exists(&self, name: &str) -> Result<bool>;
}

// ---------------------------------------------------------------------------
// JSON file backend
// ---------------------------------------------------------------------------

/// One file per safe under a root directory.
#[derive(Debug, Clone)]
pub struct JsonBackend {
    root: PathBuf,
    obfuscate: bool,
    atomic_writes: bool,
}

impl JsonBackend {
    pub fn new(root: impl Into<PathBuf>, obfuscate: bool) -> Self {
        Self {
            root: root.into(),
            obfuscate,
            atomic_writes: false,
        }
    }

    /// Write through a temp file + rename instead of truncating in place.
    pub fn with_atomic_writes(mut self, atomic_writes: bool) -> Self {
        self.atomic_writes = atomic_writes;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn obfuscate(&self) -> bool {
        self.obfuscate
    }

    /// Path of the file backing `name`.
    pub fn safe_path(&self, name: &str) -> Result<PathBuf> {
        safe_path(&self.root, name, self.obfuscate)
    }
}

impl Backend for JsonBackend {
    fn load(&self, name: &str) -> Result<Entries> {
        let path = self.safe_path(name)?;
        let data = fs::read(&path).map_err(|e| VaultError::storage(&path, e))?;
        decode(&data, self.obfuscate)
    }

    fn save(&self, name: &str, entries: &Entries) -> Result<()> {
        let path = self.safe_path(name)?;
        let data = encode(entries, self.obfuscate)?;
        if self.atomic_writes {
            write_atomic(&path, &data)
        } else {
            fs::write(&path, &data).map_err(|e| VaultError::storage(&path, e))
        }
    }

    fn exists(&self, name: &str) -> Result<bool> {
        Ok(self.safe_path(name)?.is_file())
    }
}

/// Write to a temp file in the same directory, then rename it over `path`.
///
/// The rename is atomic on the same filesystem, so readers see either
/// the old file or the new one.
fn write_atomic(path: &Path, data: &[u8]) -> Result<()> {
    let parent = path.parent().unwrap_or(Path::new("."));
    let tmp_path = parent.join(format!(
        ".{}.tmp",
        path.file_name().unwrap_or_default().to_string_lossy()
    ));

    fs::write(&tmp_path, data).map_err(|e| VaultError::storage(&tmp_path, e))?;
    if let Err(e) = fs::rename(&tmp_path, path) {
        let _ = fs::remove_file(&tmp_path);
        return Err(VaultError::storage(path, e));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Paths
// ---------------------------------------------------------------------------

/// Resolve the file for safe `name` under `root`.
///
/// The name's own extension, if any, is replaced by `b64` or `json`.
/// Anything that would land outside `root` (separators, `..`, absolute
/// paths) is rejected before the filesystem is touched.
pub fn safe_path(root: &Path, name: &str, obfuscate: bool) -> Result<PathBuf> {
    let invalid = || VaultError::InvalidSafeName(name.to_string());

    if name.is_empty() || name == "." || name == ".." || name.contains(&['/', '\\', '\0'][..]) {
        return Err(invalid());
    }

    let extension = if obfuscate { "b64" } else { "json" };
    let path = root.join(name).with_extension(extension);

    if path.parent() != Some(root) {
        return Err(invalid());
    }

    Ok(path)
}

// ---------------------------------------------------------------------------
// Codec
// ---------------------------------------------------------------------------

/// JSON shape of a single entry.  Both fields are base64 so arbitrary
/// bytes survive the text format.
#[derive(Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct StoredEntry {
    #[serde(serialize_with = "base64_encode", deserialize_with = "base64_decode")]
    salt: Vec<u8>,

    #[serde(serialize_with = "base64_encode", deserialize_with = "base64_decode")]
    token: Vec<u8>,
}

/// Serialize entries to file contents.
pub fn encode(entries: &Entries, obfuscate: bool) -> Result<Vec<u8>> {
    let stored: BTreeMap<&str, StoredEntry> = entries
        .iter()
        .map(|(name, entry)| {
            (
                name.as_str(),
                StoredEntry {
                    salt: entry.salt().to_vec(),
                    token: entry.token().to_vec(),
                },
            )
        })
        .collect();

    let mut json = Vec::new();
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut json, PrettyFormatter::with_indent(b"    "));
    stored
        .serialize(&mut serializer)
        .map_err(|e| VaultError::InvalidSafeFormat(format!("cannot serialize safe: {e}")))?;

    if obfuscate {
        Ok(BASE64.encode(&json).into_bytes())
    } else {
        Ok(json)
    }
}

/// Parse file contents back into entries.  Exact inverse of `encode`.
pub fn decode(data: &[u8], obfuscate: bool) -> Result<Entries> {
    let json: Cow<'_, [u8]> = if obfuscate {
        let text = std::str::from_utf8(data).map_err(|_| {
            VaultError::InvalidSafeFormat("obfuscated safe is not base64 text".into())
        })?;
        let raw = BASE64
            .decode(text.trim())
            .map_err(|e| VaultError::InvalidSafeFormat(format!("outer base64: {e}")))?;
        Cow::Owned(raw)
    } else {
        Cow::Borrowed(data)
    };

    let stored: BTreeMap<String, StoredEntry> = serde_json::from_slice(&json)
        .map_err(|e| VaultError::InvalidSafeFormat(format!("safe JSON: {e}")))?;

    Ok(stored
        .into_iter()
        .map(|(name, e)| (name, Entry::new(e.salt, e.token)))
        .collect())
}

// ---------------------------------------------------------------------------
// Serde helpers for base64-encoded Vec<u8> fields
// ---------------------------------------------------------------------------

fn base64_encode<S>(data: &[u8], serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_str(&BASE64.encode(data))
}

fn base64_decode<'de, D>(deserializer: D) -> std::result::Result<Vec<u8>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    BASE64.decode(&s).map_err(serde::de::Error::custom)
}
