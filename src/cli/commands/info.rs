//! `memvault info` — show the effective vault configuration.

use crate::cli::output;
use crate::cli::{load_config, Cli};
use crate::errors::Result;
use crate::vault::VaultInfo;

/// Execute the `info` command.
pub fn execute(cli: &Cli) -> Result<()> {
    let config = load_config(cli)?;

    output::print_info_table(&VaultInfo::from_config(&config));
    output::tip(&format!(
        "Minimum initial funding: {} wei ({} ETH)",
        config.min_initial_funding,
        config.min_initial_funding.to_ether_string()
    ));

    Ok(())
}
