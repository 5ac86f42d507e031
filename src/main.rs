use clap::Parser;
use tracing_subscriber::EnvFilter;

use ironvault::cli::prompt::TerminalPrompt;
use ironvault::cli::{commands, output, Cli, Commands, Context};
use ironvault::errors::Result;

/// Environment variable holding a tracing filter, e.g. `ironvault=debug`.
const LOG_ENV: &str = "IRONVAULT_LOG";

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(&cli) {
        output::error(&e.to_string());
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    if let Commands::Completions { shell } = cli.command {
        return commands::completions::execute(shell);
    }

    let ctx = Context::from_cli(cli)?;
    tracing::debug!(
        vault_dir = %ctx.settings.vault_dir,
        obfuscate = ctx.settings.obfuscate,
        safe = %ctx.safe,
        "resolved configuration"
    );

    let prompt = TerminalPrompt;
    match cli.command {
        Commands::Add {
            ref name,
            ref value,
        } => commands::add::execute(&ctx, &prompt, name, value.as_deref()),
        Commands::Get { ref name } => commands::get::execute(&ctx, &prompt, name),
        Commands::Delete { ref name, force } => {
            commands::delete::execute(&ctx, &prompt, name, force)
        }
        Commands::List => commands::list::execute(&ctx, &prompt),
        Commands::Completions { .. } => Ok(()),
    }
}

/// Log to stderr so stdout stays clean for `get`.
fn init_logging(verbose: bool) {
    let default = if verbose { "ironvault=debug" } else { "warn" };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}
