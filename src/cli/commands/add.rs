//! `ironvault add` — add or overwrite an entry, creating the safe if needed.

use std::fs;

use tracing::debug;
use zeroize::Zeroizing;

use crate::cli::output;
use crate::cli::prompt::{passphrase_for, SecretPrompt};
use crate::cli::Context;
use crate::errors::{Result, VaultError};

/// Execute the `add` command.
pub fn execute(
    ctx: &Context,
    prompt: &dyn SecretPrompt,
    name: &str,
    value: Option<&str>,
) -> Result<()> {
    let vault = ctx.vault();
    let exists = vault.exists(&ctx.safe)?;

    let passphrase = passphrase_for(prompt, &ctx.safe)?;
    let mut safe = if exists {
        debug!(safe = %ctx.safe, "loading existing safe");
        vault.load(&ctx.safe, &passphrase)?
    } else {
        debug!(safe = %ctx.safe, "creating new safe");
        vault.create(&ctx.safe)
    };

    let secret = match value {
        Some(v) => {
            output::warning("Value provided on command line — it may appear in shell history.");
            Zeroizing::new(v.to_string())
        }
        None => prompt.read_secret(&format!("Secret for entry {name}"))?,
    };

    let existed = safe.contains(name);
    safe.add(name, &secret);

    let root = vault.backend().root();
    fs::create_dir_all(root).map_err(|e| VaultError::storage(root, e))?;
    vault.save(&safe, &passphrase)?;
    debug!(safe = %ctx.safe, entries = safe.len(), "safe saved");

    let verb = if existed { "updated in" } else { "added to" };
    output::success(&format!(
        "Entry '{name}' {verb} safe '{}' ({} total)",
        ctx.safe,
        safe.len()
    ));

    Ok(())
}
