//! CLI module — Clap argument parser, output helpers, and command implementations.

pub mod commands;
pub mod output;
pub mod submissions;

use std::path::Path;
use std::sync::Arc;

use clap::Parser;

use crate::amount::Amount;
use crate::config::VaultConfig;
use crate::errors::{MemVaultError, Result};
use crate::vault::{EntryCreated, ListenerResult, MilestoneReached, Vault};

/// MemVault CLI: in-memory ledger of memory entries.
#[derive(Parser)]
#[command(
    name = "memvault",
    about = "In-memory ledger of short memory entries with fees and milestones",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to a vault config file (default: ./.memvault.toml if present)
    #[arg(short, long, global = true, env = "MEMVAULT_CONFIG")]
    pub config: Option<String>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

/// All available subcommands.
#[derive(clap::Subcommand)]
pub enum Commands {
    /// Show the vault configuration
    Info,

    /// Submit every record from a JSON file into a fresh vault
    Replay {
        /// Path to a JSON array or JSON-lines file of {creator, content, payment?}
        file: String,

        /// Initial funding in wei (default: the configured minimum)
        #[arg(long)]
        funding: Option<String>,

        /// Write the admitted entries to this file after replaying
        #[arg(long)]
        export: Option<String>,

        /// Export format: json (default) or jsonl
        #[arg(long, default_value = "json")]
        format: String,
    },

    /// Interactively submit entries until an empty creator is entered
    Session {
        /// Initial funding in wei (default: the configured minimum)
        #[arg(long)]
        funding: Option<String>,
    },

    /// Compute the fingerprint of an entry's fields
    Fingerprint {
        /// Creator identifier
        creator: String,
        /// Entry content
        content: String,
        /// Admission timestamp in epoch seconds
        #[arg(long)]
        timestamp: i64,
    },

    /// Show version
    Version,

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for (bash, zsh, fish, powershell)
        shell: String,
    },
}

// ---------------------------------------------------------------------------
// Shared helpers used by multiple commands
// ---------------------------------------------------------------------------

/// Resolve the vault config, trying in order:
/// 1. `--config <file>` (or `MEMVAULT_CONFIG`), which must exist
/// 2. `.memvault.toml` in the current directory
/// 3. Built-in defaults
pub fn load_config(cli: &Cli) -> Result<VaultConfig> {
    match &cli.config {
        Some(path) => VaultConfig::load_file(Path::new(path)),
        None => VaultConfig::load(&std::env::current_dir()?),
    }
}

/// Parse a `--funding` value, defaulting to the configured minimum.
pub fn parse_funding(funding: Option<&str>, config: &VaultConfig) -> Result<Amount> {
    match funding {
        Some(raw) => raw.parse(),
        None => Ok(config.min_initial_funding),
    }
}

/// Build a vault whose listeners report to the terminal.
pub fn open_vault(config: VaultConfig, funding: Amount) -> Result<Arc<Vault>> {
    let vault = Arc::new(Vault::new(config, funding)?);

    vault.register_milestone_listener(Arc::new(|m: &MilestoneReached| -> ListenerResult {
        output::milestone(m.threshold);
        Ok(())
    }));
    vault.register_entry_listener(Arc::new(|e: &EntryCreated| -> ListenerResult {
        tracing::debug!(sequence_id = e.sequence_id, fingerprint = %e.fingerprint, "entry created");
        Ok(())
    }));

    Ok(vault)
}

/// Reject output paths that would clobber the input or a config file.
pub fn validate_output_path(dest: &Path, input: Option<&Path>) -> Result<()> {
    if dest
        .file_name()
        .is_some_and(|name| name == VaultConfig::FILE_NAME)
    {
        return Err(MemVaultError::CommandFailed(
            "refusing to write over a vault config file".into(),
        ));
    }
    if let Some(input) = input {
        if dest == input {
            return Err(MemVaultError::CommandFailed(
                "refusing to export over the replay input file".into(),
            ));
        }
    }
    Ok(())
}
