//! One module per subcommand, each exposing an `execute` function.

pub mod completions;
pub mod export;
pub mod fingerprint;
pub mod info;
pub mod replay;
pub mod session;
pub mod version;
