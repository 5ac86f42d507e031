use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::{Result, VaultError};

/// Vault configuration, loaded from `.ironvault.toml`.
///
/// Every field has a default so IronVault works without any config
/// file at all.  CLI flags are applied on top with `with_overrides`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    /// Directory holding the safe files.
    #[serde(default = "default_vault_dir")]
    pub vault_dir: String,

    /// Base64 the whole safe file (`.b64`) instead of plain JSON (`.json`).
    #[serde(default = "default_obfuscate")]
    pub obfuscate: bool,

    /// Safe used when `--safe` is not given.
    #[serde(default = "default_safe")]
    pub default_safe: String,

    /// Replace safe files via temp file + rename.
    #[serde(default)]
    pub atomic_writes: bool,
}

// ── Serde default helpers ────────────────────────────────────────────

fn default_vault_dir() -> String {
    "./vt".to_string()
}

fn default_obfuscate() -> bool {
    true
}

fn default_safe() -> String {
    "safe".to_string()
}

// ── Implementation ───────────────────────────────────────────────────

impl Default for Settings {
    fn default() -> Self {
        Self {
            vault_dir: default_vault_dir(),
            obfuscate: default_obfuscate(),
            default_safe: default_safe(),
            atomic_writes: false,
        }
    }
}

impl Settings {
    /// Name of the config file we look for in the working directory.
    const FILE_NAME: &'static str = ".ironvault.toml";

    /// Load settings from `<dir>/.ironvault.toml`.
    ///
    /// If the file does not exist, defaults are returned.
    /// If it exists but cannot be parsed, an error is returned.
    pub fn load(dir: &Path) -> Result<Self> {
        let config_path = dir.join(Self::FILE_NAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&config_path)?;

        toml::from_str(&contents).map_err(|e| {
            VaultError::ConfigError(format!("Failed to parse {}: {e}", config_path.display()))
        })
    }

    /// Apply command-line overrides.  `None`/`false` keeps the file value.
    pub fn with_overrides(mut self, vault_dir: Option<&str>, no_b64: bool) -> Self {
        if let Some(dir) = vault_dir {
            self.vault_dir = dir.to_string();
        }
        if no_b64 {
            self.obfuscate = false;
        }
        self
    }
}

// ── Tests ────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn default_settings() {
        let s = Settings::default();
        assert_eq!(s.vault_dir, "./vt");
        assert!(s.obfuscate);
        assert_eq!(s.default_safe, "safe");
        assert!(!s.atomic_writes);
    }

    #[test]
    fn load_returns_defaults_when_no_config_file() {
        let tmp = TempDir::new().unwrap();
        let settings = Settings::load(tmp.path()).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn load_parses_toml_file() {
        let tmp = TempDir::new().unwrap();
        let config = r#"
vault_dir = "secrets"
obfuscate = false
default_safe = "work"
atomic_writes = true
"#;
        fs::write(tmp.path().join(".ironvault.toml"), config).unwrap();

        let settings = Settings::load(tmp.path()).unwrap();
        assert_eq!(settings.vault_dir, "secrets");
        assert!(!settings.obfuscate);
        assert_eq!(settings.default_safe, "work");
        assert!(settings.atomic_writes);
    }

    #[test]
    fn load_uses_defaults_for_missing_fields() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(".ironvault.toml"), "obfuscate = false\n").unwrap();

        let settings = Settings::load(tmp.path()).unwrap();
        assert!(!settings.obfuscate);
        assert_eq!(settings.vault_dir, "./vt");
        assert_eq!(settings.default_safe, "safe");
    }

    #[test]
    fn load_errors_on_invalid_toml() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(".ironvault.toml"), "not valid {{toml").unwrap();
        assert!(matches!(
            Settings::load(tmp.path()),
            Err(VaultError::ConfigError(_))
        ));
    }

    #[test]
    fn load_errors_on_unknown_key() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(".ironvault.toml"), "vault_directory = \"x\"\n").unwrap();
        assert!(Settings::load(tmp.path()).is_err());
    }

    #[test]
    fn overrides_win() {
        let s = Settings::default().with_overrides(Some("elsewhere"), true);
        assert_eq!(s.vault_dir, "elsewhere");
        assert!(!s.obfuscate);

        let untouched = Settings::default().with_overrides(None, false);
        assert_eq!(untouched, Settings::default());
    }
}
