//! `ironvault completions <shell>` — print a completion script.
//!
//! The script is generated from the same clap definition the binary
//! parses with, so new flags and subcommands are picked up automatically.

use std::io::{self, Write};

use clap::CommandFactory;
use clap_complete::{generate, Shell};

use crate::cli::Cli;
use crate::errors::Result;

/// Binary name the completion script registers for.
const BIN_NAME: &str = "ironvault";

/// Execute the `completions` command, writing to stdout.
pub fn execute(shell: Shell) -> Result<()> {
    write_script(shell, &mut io::stdout().lock())
}

/// Write the completion script for `shell` into `out`.
pub fn write_script(shell: Shell, out: &mut dyn Write) -> Result<()> {
    let mut cmd = Cli::command();
    generate(shell, &mut cmd, BIN_NAME, out);
    out.flush()?;
    Ok(())
}
