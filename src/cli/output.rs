//! Colored terminal output helpers.
//!
//! All user-facing output goes through these functions so we get
//! consistent styling across every command.

use chrono::DateTime;
use comfy_table::{ContentArrangement, Table};
use console::style;

use crate::vault::{Entry, VaultInfo, VaultStats};

/// Print a green success message: "check_mark {msg}"
pub fn success(msg: &str) {
    println!("{} {}", style("\u{2713}").green().bold(), msg);
}

/// Print a red error message: "x_mark {msg}"
pub fn error(msg: &str) {
    eprintln!("{} {}", style("\u{2717}").red().bold(), msg);
}

/// Print a yellow warning: "warning_sign {msg}"
pub fn warning(msg: &str) {
    eprintln!("{} {}", style("\u{26a0}").yellow().bold(), msg);
}

/// Print a blue info message: "info_sign {msg}"
pub fn info(msg: &str) {
    println!("{} {}", style("\u{2139}").blue().bold(), msg);
}

/// Print a dim tip/hint: "arrow {msg}"
pub fn tip(msg: &str) {
    println!("{} {}", style("\u{2192}").dim(), style(msg).dim());
}

/// Print a milestone banner: "star Milestone reached: {threshold} memories"
pub fn milestone(threshold: u64) {
    println!(
        "{} {}",
        style("\u{2605}").magenta().bold(),
        style(format!("Milestone reached: {threshold} memories")).magenta()
    );
}

/// Format an epoch timestamp as `YYYY-MM-DD HH:MM:SS` (UTC).
pub fn format_timestamp(secs: i64) -> String {
    DateTime::from_timestamp(secs, 0)
        .map_or_else(|| secs.to_string(), |dt| dt.format("%Y-%m-%d %H:%M:%S").to_string())
}

/// Print the vault statistics as a two-column table.
pub fn print_stats_table(stats: &VaultStats) {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Stat", "Value"]);

    table.add_row(vec!["Memories".to_string(), stats.count.to_string()]);
    table.add_row(vec![
        "Unique creators".to_string(),
        stats.unique_creators.to_string(),
    ]);
    table.add_row(vec![
        "Total value".to_string(),
        format!(
            "{} wei ({} ETH)",
            stats.total_value,
            stats.total_value.to_ether_string()
        ),
    ]);
    table.add_row(vec![
        "Remaining capacity".to_string(),
        stats.remaining_capacity.to_string(),
    ]);

    for m in &stats.milestones {
        let status = match m.reached_at() {
            Some(at) => format!("reached {}", format_timestamp(at)),
            None => "pending".to_string(),
        };
        table.add_row(vec![format!("Milestone {}", m.threshold), status]);
    }

    println!("{table}");
}

/// Print a table of entries (Id, Creator, Content, Created).
pub fn print_entries_table(entries: &[Entry]) {
    if entries.is_empty() {
        info("No memories in this vault yet.");
        return;
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Id", "Creator", "Content", "Created"]);

    for e in entries {
        table.add_row(vec![
            e.sequence_id().to_string(),
            e.creator().to_string(),
            e.content().to_string(),
            format_timestamp(e.timestamp()),
        ]);
    }

    println!("{table}");
}

/// Print the static vault description.
pub fn print_info_table(info: &VaultInfo) {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Setting", "Value"]);

    table.add_row(vec!["Name".to_string(), info.name.clone()]);
    table.add_row(vec!["Symbol".to_string(), info.symbol.clone()]);
    table.add_row(vec![
        "Genesis".to_string(),
        format_timestamp(info.genesis_timestamp),
    ]);
    table.add_row(vec![
        "Entry fee".to_string(),
        format!(
            "{} wei ({} ETH)",
            info.entry_fee,
            info.entry_fee.to_ether_string()
        ),
    ]);
    table.add_row(vec!["Capacity".to_string(), info.capacity.to_string()]);
    table.add_row(vec![
        "Max content length".to_string(),
        info.max_content_len.to_string(),
    ]);
    table.add_row(vec![
        "Milestones".to_string(),
        info.milestones
            .iter()
            .map(u64::to_string)
            .collect::<Vec<_>>()
            .join(", "),
    ]);

    println!("{table}");
}
