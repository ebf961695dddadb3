pub mod amount;
pub mod cli;
pub mod clock;
pub mod config;
pub mod crypto;
pub mod errors;
pub mod vault;

pub use amount::Amount;
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::VaultConfig;
pub use errors::{MemVaultError, Result};
pub use vault::{Entry, Vault, VaultStats};
