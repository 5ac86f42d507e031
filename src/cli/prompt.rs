//! Interactive input, injected into commands as a capability.
//!
//! Commands never talk to the terminal directly; they ask a
//! `SecretPrompt`.  The binary uses `TerminalPrompt`, tests script one.

use std::io::{self, BufRead, IsTerminal};

use dialoguer::{Confirm, Password};
use zeroize::Zeroizing;

use crate::errors::{Result, VaultError};

/// Environment variable checked before prompting for a passphrase.
pub const PASSPHRASE_ENV: &str = "IRONVAULT_PASSPHRASE";

/// Source of secrets and yes/no answers.
pub trait SecretPrompt {
    /// Read a secret without echoing it.
    fn read_secret(&self, prompt: &str) -> Result<Zeroizing<String>>;

    /// Ask a yes/no question; `false` by default.
    fn confirm(&self, prompt: &str) -> Result<bool>;
}

/// Hidden terminal prompts, or one line per request from piped stdin.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalPrompt;

impl SecretPrompt for TerminalPrompt {
    fn read_secret(&self, prompt: &str) -> Result<Zeroizing<String>> {
        if !io::stdin().is_terminal() {
            return read_piped_line();
        }

        let value = Password::new()
            .with_prompt(prompt)
            .allow_empty_password(true)
            .interact()
            .map_err(|e| VaultError::CommandFailed(format!("input prompt: {e}")))?;
        Ok(Zeroizing::new(value))
    }

    fn confirm(&self, prompt: &str) -> Result<bool> {
        if !io::stdin().is_terminal() {
            return Err(VaultError::CommandFailed(
                "confirmation needs a terminal — pass --force to skip it".into(),
            ));
        }

        Confirm::new()
            .with_prompt(prompt)
            .default(false)
            .interact()
            .map_err(|e| VaultError::CommandFailed(format!("confirm prompt: {e}")))
    }
}

/// Read one line from stdin, without its line ending.
fn read_piped_line() -> Result<Zeroizing<String>> {
    let mut line = Zeroizing::new(String::new());
    let read = io::stdin().lock().read_line(&mut line)?;
    if read == 0 {
        return Err(VaultError::UserCancelled);
    }

    let trimmed_len = line.trim_end_matches(&['\n', '\r'][..]).len();
    line.truncate(trimmed_len);
    Ok(line)
}

/// Get the passphrase for `safe`, trying in order:
/// 1. `IRONVAULT_PASSPHRASE` (CI/scripts)
/// 2. the prompt
pub fn passphrase_for(prompt: &dyn SecretPrompt, safe: &str) -> Result<Zeroizing<String>> {
    if let Ok(pw) = std::env::var(PASSPHRASE_ENV) {
        if !pw.is_empty() {
            return Ok(Zeroizing::new(pw));
        }
    }

    prompt.read_secret(&format!("Passphrase for safe {safe}"))
}
