//! `ironvault get` — print a single entry's value.

use tracing::debug;
use zeroize::Zeroizing;

use crate::cli::prompt::{passphrase_for, SecretPrompt};
use crate::cli::Context;
use crate::errors::{Result, VaultError};

/// Execute the `get` command.
pub fn execute(ctx: &Context, prompt: &dyn SecretPrompt, name: &str) -> Result<()> {
    let value = read_entry(ctx, prompt, name)?;
    println!("{}", value.as_str());
    Ok(())
}

/// Unlock the safe and return one decrypted value.
///
/// A missing safe is reported before asking for the passphrase.
pub fn read_entry(
    ctx: &Context,
    prompt: &dyn SecretPrompt,
    name: &str,
) -> Result<Zeroizing<String>> {
    let vault = ctx.vault();
    if !vault.exists(&ctx.safe)? {
        return Err(VaultError::NoSuchSafe(ctx.safe.clone()));
    }

    let passphrase = passphrase_for(prompt, &ctx.safe)?;
    debug!(safe = %ctx.safe, "unlocking safe");
    let safe = vault.load(&ctx.safe, &passphrase)?;

    Ok(Zeroizing::new(safe.fetch(name)?))
}
