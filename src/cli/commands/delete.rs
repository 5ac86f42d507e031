//! `ironvault delete` — remove an entry from the safe.

use tracing::debug;

use crate::cli::output;
use crate::cli::prompt::{passphrase_for, SecretPrompt};
use crate::cli::Context;
use crate::errors::{Result, VaultError};

/// Execute the `delete` command.
pub fn execute(ctx: &Context, prompt: &dyn SecretPrompt, name: &str, force: bool) -> Result<()> {
    let vault = ctx.vault();
    if !vault.exists(&ctx.safe)? {
        return Err(VaultError::NoSuchSafe(ctx.safe.clone()));
    }

    // Unless --force is set, ask for confirmation before deleting.
    if !force && !prompt.confirm(&format!("Delete entry '{name}' from safe '{}'?", ctx.safe))? {
        output::info("Cancelled.");
        return Ok(());
    }

    let passphrase = passphrase_for(prompt, &ctx.safe)?;
    let mut safe = vault.load(&ctx.safe, &passphrase)?;

    safe.delete(name)?;
    vault.save(&safe, &passphrase)?;
    debug!(safe = %ctx.safe, entries = safe.len(), "entry deleted");

    output::success(&format!("Deleted entry '{name}'"));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::commands::add;
    use crate::cli::commands::test_support::{context, ScriptedPrompt};

    fn seeded() -> (tempfile::TempDir, Context) {
        let (tmp, ctx) = context(true);
        add::execute(&ctx, &ScriptedPrompt::new(&["pw"]), "gone", Some("1")).unwrap();
        add::execute(&ctx, &ScriptedPrompt::new(&["pw"]), "kept", Some("2")).unwrap();
        (tmp, ctx)
    }

    #[test]
    fn force_deletes_without_confirmation() {
        let (_tmp, ctx) = seeded();
        execute(&ctx, &ScriptedPrompt::new(&["pw"]), "gone", true).unwrap();

        let safe = ctx.vault().load("safe", "pw").unwrap();
        assert!(!safe.contains("gone"));
        assert!(safe.contains("kept"));
    }

    #[test]
    fn declined_confirmation_changes_nothing() {
        let (_tmp, ctx) = seeded();
        let prompt = ScriptedPrompt::new(&["pw"]).confirming(false);
        execute(&ctx, &prompt, "gone", false).unwrap();

        assert_eq!(prompt.asked.get(), 0);
        assert!(ctx.vault().load("safe", "pw").unwrap().contains("gone"));
    }

    #[test]
    fn confirmed_delete() {
        let (_tmp, ctx) = seeded();
        let prompt = ScriptedPrompt::new(&["pw"]).confirming(true);
        execute(&ctx, &prompt, "gone", false).unwrap();
        assert!(!ctx.vault().load("safe", "pw").unwrap().contains("gone"));
    }

    #[test]
    fn missing_entry_is_key_not_found() {
        let (_tmp, ctx) = seeded();
        let result = execute(&ctx, &ScriptedPrompt::new(&["pw"]), "never", true);
        assert!(matches!(result, Err(VaultError::KeyNotFound(_))));
    }

    #[test]
    fn missing_safe_is_no_such_safe() {
        let (_tmp, ctx) = context(true);
        let result = execute(&ctx, &ScriptedPrompt::new(&["pw"]), "k", true);
        assert!(matches!(result, Err(VaultError::NoSuchSafe(_))));
    }
}
