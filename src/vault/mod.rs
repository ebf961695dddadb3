//! Vault module — in-memory entry ledger.
//!
//! This module provides:
//! - The immutable `Entry` record (`entry`)
//! - Listener traits, event payloads, and the channel listener (`events`)
//! - The one-shot milestone state machine (`milestone`)
//! - Stats and info snapshots (`stats`)
//! - The `Vault` store with admission and queries (`store`)

pub mod entry;
pub mod events;
pub mod milestone;
pub mod stats;
pub mod store;

// Re-export the most commonly used items.
pub use entry::{content_len, Entry};
pub use events::{
    ChannelListener, EntryCreated, EntryListener, ListenerError, ListenerResult,
    MilestoneListener, MilestoneReached, VaultEvent,
};
pub use milestone::{Milestone, MilestoneState};
pub use stats::{VaultInfo, VaultStats};
pub use store::Vault;
