//! # apiext CLI Entry Point
//!
//! Assembles subcommands and dispatches to handler modules.

use clap::Parser;

/// Schema document tool for custom resource validation schemas.
#[derive(Parser, Debug)]
#[command(name = "apiext", version, about)]
struct Cli {
    /// Emit logs as JSON lines.
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Decode and re-emit a schema document.
    Fmt(apiext_cli::fmt::FmtArgs),
    /// List vendor extensions in a schema document.
    Extensions(apiext_cli::extensions::ExtensionsArgs),
    /// Check that a schema document decodes.
    Check(apiext_cli::check::CheckArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr);
    if cli.log_json {
        subscriber.json().init();
    } else {
        subscriber.init();
    }

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match cli.command {
        Commands::Fmt(args) => apiext_cli::fmt::run(&args, &mut out)?,
        Commands::Extensions(args) => {
            let count = apiext_cli::extensions::run(&args, &mut out)?;
            tracing::info!(count, "reported extensions");
        }
        Commands::Check(args) => apiext_cli::check::run(&args, &mut out)?,
    }

    Ok(())
}
