//! CLI module — Clap argument parser, prompts, output helpers, and command implementations.

pub mod commands;
pub mod output;
pub mod prompt;

use clap::Parser;

use crate::config::Settings;
use crate::crypto::FernetScheme;
use crate::errors::Result;
use crate::vault::Vault;

/// IronVault CLI: passphrase-protected local secrets.
#[derive(Parser)]
#[command(
    name = "ironvault",
    about = "Passphrase-protected local secrets vault",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Vault directory (default: ./vt, or `vault_dir` in .ironvault.toml)
    #[arg(long, global = true)]
    pub vault: Option<String>,

    /// Safe name (default: safe, or `default_safe` in .ironvault.toml)
    #[arg(long, global = true)]
    pub safe: Option<String>,

    /// Store the safe as plain JSON instead of base64
    #[arg(long, global = true)]
    pub no_b64: bool,

    /// Show debug logging on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// All available subcommands.
#[derive(clap::Subcommand)]
pub enum Commands {
    /// Add an entry to the safe (creates the safe if needed)
    Add {
        /// Entry name
        name: String,
        /// Secret value (omit for a hidden prompt)
        value: Option<String>,
    },

    /// Print an entry's value
    Get {
        /// Entry name
        name: String,
    },

    /// Delete an entry
    Delete {
        /// Entry name
        name: String,
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },

    /// List entry names in the safe
    List,

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Everything a command needs once flags and config are resolved.
#[derive(Debug, Clone)]
pub struct Context {
    pub settings: Settings,
    pub safe: String,
    pub scheme: FernetScheme,
}

impl Context {
    /// Resolve `.ironvault.toml` in the working directory plus CLI flags.
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let cwd = std::env::current_dir()?;
        let settings = Settings::load(&cwd)?.with_overrides(cli.vault.as_deref(), cli.no_b64);
        let safe = cli
            .safe
            .clone()
            .unwrap_or_else(|| settings.default_safe.clone());

        Ok(Self {
            settings,
            safe,
            scheme: FernetScheme::new(),
        })
    }

    /// The vault described by these settings.
    pub fn vault(&self) -> Vault {
        Vault::from_settings_with_scheme(&self.settings, self.scheme.clone())
    }
}
