use std::io;

use clap::Parser;
use memvault::cli::{Cli, Commands};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();

    setup_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Info => memvault::cli::commands::info::execute(&cli),
        Commands::Replay {
            ref file,
            ref funding,
            ref export,
            ref format,
        } => memvault::cli::commands::replay::execute(
            &cli,
            file,
            funding.as_deref(),
            export.as_deref(),
            format,
        ),
        Commands::Session { ref funding } => {
            memvault::cli::commands::session::execute(&cli, funding.as_deref())
        }
        Commands::Fingerprint {
            ref creator,
            ref content,
            timestamp,
        } => memvault::cli::commands::fingerprint::execute(creator, content, timestamp),
        Commands::Version => memvault::cli::commands::version::execute(),
        Commands::Completions { ref shell } => memvault::cli::commands::completions::execute(shell),
    };

    if let Err(e) = result {
        memvault::cli::output::error(&e.to_string());
        std::process::exit(1);
    }
}

/// Install a stderr subscriber; `RUST_LOG` overrides the `-v` level.
fn setup_tracing(verbose: u8) {
    let filter = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .with_writer(io::stderr)
        .init();
}
