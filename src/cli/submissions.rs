//! Parser for replay input files.
//!
//! Two layouts are accepted:
//! - a JSON array of submission objects (`.json`)
//! - one submission object per line (`.jsonl` / `.ndjson`); blank lines
//!   and lines starting with `#` are skipped
//!
//! Each object is `{"creator": "...", "content": "...", "payment": "..."}`
//! where `payment` is optional and defaults to the vault's entry fee.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::amount::Amount;
use crate::errors::{MemVaultError, Result};

/// One record from a replay file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Submission {
    pub creator: String,
    pub content: String,
    #[serde(default)]
    pub payment: Option<Amount>,
}

/// Read and parse a replay file, picking the layout from its extension.
pub fn parse_submission_file(path: &Path) -> Result<Vec<Submission>> {
    if !path.exists() {
        return Err(MemVaultError::CommandFailed(format!(
            "replay file not found: {}",
            path.display()
        )));
    }

    let content = fs::read_to_string(path)?;

    let lines = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("jsonl") || ext.eq_ignore_ascii_case("ndjson"));

    if lines {
        parse_json_lines(&content)
    } else {
        parse_json_array(&content)
    }
}

/// Parse a JSON array of submissions.
pub fn parse_json_array(content: &str) -> Result<Vec<Submission>> {
    serde_json::from_str(content)
        .map_err(|e| MemVaultError::SerializationError(format!("invalid replay JSON: {e}")))
}

/// Parse newline-delimited JSON submissions.
pub fn parse_json_lines(content: &str) -> Result<Vec<Submission>> {
    let mut out = Vec::new();

    for (line_num, line) in content.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let submission = serde_json::from_str(trimmed).map_err(|e| {
            MemVaultError::SerializationError(format!("line {}: {e}", line_num + 1))
        })?;
        out.push(submission);
    }

    Ok(out)
}
