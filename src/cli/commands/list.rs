//! `ironvault list` — display the entry names of a safe.

use crate::cli::output;
use crate::cli::prompt::{passphrase_for, SecretPrompt};
use crate::cli::Context;
use crate::errors::{Result, VaultError};

/// Execute the `list` command.
pub fn execute(ctx: &Context, prompt: &dyn SecretPrompt) -> Result<()> {
    let names = entry_names(ctx, prompt)?;
    let refs: Vec<&str> = names.iter().map(String::as_str).collect();

    output::info(&format!("safe '{}' — {} entr{}", ctx.safe, refs.len(), plural(refs.len())));
    output::print_entries_table(&refs);

    Ok(())
}

/// Unlock the safe and return its entry names, sorted.
pub fn entry_names(ctx: &Context, prompt: &dyn SecretPrompt) -> Result<Vec<String>> {
    let vault = ctx.vault();
    if !vault.exists(&ctx.safe)? {
        return Err(VaultError::NoSuchSafe(ctx.safe.clone()));
    }

    let passphrase = passphrase_for(prompt, &ctx.safe)?;
    let safe = vault.load(&ctx.safe, &passphrase)?;

    let mut names: Vec<String> = safe.names().map(str::to_string).collect();
    names.sort_unstable();
    Ok(names)
}

fn plural(n: usize) -> &'static str {
    if n == 1 {
        "y"
    } else {
        "ies"
    }
}
