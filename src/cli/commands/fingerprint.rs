//! `memvault fingerprint` — print the fingerprint an entry would get.

use crate::crypto;
use crate::errors::Result;

/// Execute the `fingerprint` command.
pub fn execute(creator: &str, content: &str, timestamp: i64) -> Result<()> {
    println!("{}", crypto::fingerprint(content, timestamp, creator));
    Ok(())
}
