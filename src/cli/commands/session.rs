//! `memvault session` — interactive entry submission.
//!
//! Prompts for a creator and content in a loop; an empty creator ends
//! the session.  The vault lives only for the duration of the session.

use dialoguer::Input;

use crate::cli::output;
use crate::cli::{load_config, open_vault, parse_funding, Cli};
use crate::errors::{MemVaultError, Result};

/// Execute the `session` command.
pub fn execute(cli: &Cli, funding: Option<&str>) -> Result<()> {
    let config = load_config(cli)?;
    let funding = parse_funding(funding, &config)?;
    let vault = open_vault(config, funding)?;
    let fee = vault.config().entry_fee;

    output::info(&format!(
        "{} — fee {} ETH per memory",
        vault.info().name,
        fee.to_ether_string()
    ));
    output::tip("Leave the creator empty to finish.");

    loop {
        let creator: String = Input::new()
            .with_prompt("Creator")
            .allow_empty(true)
            .interact_text()
            .map_err(|e| MemVaultError::CommandFailed(format!("creator prompt: {e}")))?;

        if creator.trim().is_empty() {
            break;
        }

        let content: String = Input::new()
            .with_prompt("Memory")
            .allow_empty(true)
            .interact_text()
            .map_err(|e| MemVaultError::CommandFailed(format!("content prompt: {e}")))?;

        match vault.submit(creator.trim(), &content, fee) {
            Ok(entry) => output::success(&format!(
                "Recorded memory #{} ({})",
                entry.sequence_id(),
                entry.fingerprint()
            )),
            Err(e) => output::warning(&e.to_string()),
        }
    }

    output::print_entries_table(&vault.recent(10).unwrap_or_default());
    output::print_stats_table(&vault.stats());

    Ok(())
}
