//! Entry export formats, used by `memvault replay --export`.
//!
//! Supported formats:
//! - `json` (default): a pretty-printed JSON array of entries
//! - `jsonl`: one compact JSON entry per line

use std::fs;
use std::path::Path;

use crate::cli::output;
use crate::errors::{MemVaultError, Result};
use crate::vault::Entry;

/// Write `entries` to `dest` in the requested format.
pub fn write_entries(entries: &[Entry], dest: &Path, format: &str) -> Result<()> {
    let content = match format {
        "json" => format_as_json(entries)?,
        "jsonl" => format_as_json_lines(entries)?,
        other => {
            return Err(MemVaultError::CommandFailed(format!(
                "unknown export format '{other}' — use 'json' or 'jsonl'"
            )));
        }
    };

    fs::write(dest, &content).map_err(|e| {
        MemVaultError::CommandFailed(format!("failed to write export file: {e}"))
    })?;

    output::success(&format!(
        "Exported {} memories to {} (format: {})",
        entries.len(),
        dest.display(),
        format
    ));

    Ok(())
}

/// Format entries as a JSON array.
fn format_as_json(entries: &[Entry]) -> Result<String> {
    serde_json::to_string_pretty(entries)
        .map_err(|e| MemVaultError::SerializationError(format!("JSON export: {e}")))
}

/// Format entries as newline-delimited JSON.
fn format_as_json_lines(entries: &[Entry]) -> Result<String> {
    use std::fmt::Write;
    let mut out = String::new();
    for entry in entries {
        let line = serde_json::to_string(entry)
            .map_err(|e| MemVaultError::SerializationError(format!("JSONL export: {e}")))?;
        let _ = writeln!(out, "{line}");
    }
    Ok(out)
}
