//! `memvault replay` — submit a file of records into a fresh vault.
//!
//! Every record is attempted; rejected records are reported and skipped.
//! The command fails only when the file cannot be read or the vault
//! cannot be built, or when `--export` cannot be written.

use std::path::Path;

use crate::cli::output;
use crate::cli::submissions::{parse_submission_file, Submission};
use crate::cli::{load_config, open_vault, parse_funding, validate_output_path, Cli};
use crate::errors::Result;
use crate::vault::Vault;

use super::export;

/// Outcome counts for a replay run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ReplaySummary {
    pub admitted: usize,
    pub rejected: usize,
}

/// Execute the `replay` command.
pub fn execute(
    cli: &Cli,
    file: &str,
    funding: Option<&str>,
    export_path: Option<&str>,
    format: &str,
) -> Result<()> {
    let source = Path::new(file);
    if let Some(dest) = export_path {
        validate_output_path(Path::new(dest), Some(source))?;
    }

    let submissions = parse_submission_file(source)?;
    if submissions.is_empty() {
        output::warning("No records found in the replay file.");
        return Ok(());
    }

    let config = load_config(cli)?;
    let funding = parse_funding(funding, &config)?;
    let vault = open_vault(config, funding)?;

    let summary = replay_into(&vault, &submissions);

    output::info(&format!(
        "{} admitted, {} rejected",
        summary.admitted, summary.rejected
    ));
    output::print_stats_table(&vault.stats());

    if let Some(dest) = export_path {
        export::write_entries(&vault.entries(), Path::new(dest), format)?;
    }

    Ok(())
}

/// Submit each record in order, printing one line per outcome.
pub fn replay_into(vault: &Vault, submissions: &[Submission]) -> ReplaySummary {
    let fee = vault.config().entry_fee;
    let mut summary = ReplaySummary::default();

    for (idx, sub) in submissions.iter().enumerate() {
        let payment = sub.payment.unwrap_or(fee);
        match vault.submit(&sub.creator, &sub.content, payment) {
            Ok(entry) => {
                summary.admitted += 1;
                output::success(&format!(
                    "#{} by {} ({})",
                    entry.sequence_id(),
                    entry.creator(),
                    &entry.fingerprint()[..12]
                ));
            }
            Err(e) => {
                summary.rejected += 1;
                output::warning(&format!("record {}: {e}", idx + 1));
            }
        }
    }

    summary
}
