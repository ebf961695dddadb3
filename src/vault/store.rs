//! The vault: entry admission and bookkeeping.
//!
//! `Vault` owns every entry and all derived indices behind a single
//! `RwLock`.  `submit` runs validation, duplicate detection, index and
//! counter updates, and milestone evaluation under the write lock, so an
//! admission is all-or-nothing.  Readers share the read lock.
//!
//! Listener dispatch happens after the write lock is released, in
//! `sequence_id` order (see `DispatchTurn`).

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{debug, info, warn};

use crate::amount::Amount;
use crate::clock::{Clock, SystemClock};
use crate::config::VaultConfig;
use crate::crypto::fingerprint;
use crate::errors::{MemVaultError, Result};

use super::entry::{content_len, Entry};
use super::events::{
    DispatchTurn, EntryCreated, EntryListener, MilestoneListener, MilestoneReached, Registry,
};
use super::milestone::MilestoneTracker;
use super::stats::{VaultInfo, VaultStats};

/// Everything guarded by the vault lock.
struct VaultState {
    /// Entries in admission order; index == sequence_id.
    entries: Vec<Entry>,

    /// creator -> sequence ids they authored, in admission order.
    by_creator: HashMap<String, Vec<u64>>,

    /// Every fingerprint admitted so far.
    fingerprints: HashSet<String>,

    /// creator -> number of entries.
    creator_counts: HashMap<String, u64>,

    /// Unique creators in first-seen order.
    creators: Vec<String>,
    creator_set: HashSet<String>,

    total_entries: u64,
    total_creators: u64,
    total_value: Amount,

    milestones: MilestoneTracker,
}

impl VaultState {
    fn new(initial_funding: Amount, thresholds: [u64; 3]) -> Self {
        Self {
            entries: Vec::new(),
            by_creator: HashMap::new(),
            fingerprints: HashSet::new(),
            creator_counts: HashMap::new(),
            creators: Vec::new(),
            creator_set: HashSet::new(),
            total_entries: 0,
            total_creators: 0,
            total_value: initial_funding,
            milestones: MilestoneTracker::new(thresholds),
        }
    }

    /// Apply an admitted entry to every index and counter.
    fn record(&mut self, entry: Entry, new_total_value: Amount) {
        let id = entry.sequence_id();
        let creator = entry.creator().to_string();

        self.fingerprints.insert(entry.fingerprint().to_string());
        self.by_creator.entry(creator.clone()).or_default().push(id);

        if self.creator_set.insert(creator.clone()) {
            self.creators.push(creator.clone());
            self.total_creators += 1;
        }

        *self.creator_counts.entry(creator).or_insert(0) += 1;
        self.total_entries += 1;
        self.total_value = new_total_value;
        self.entries.push(entry);
    }

    fn entry(&self, sequence_id: u64) -> Option<&Entry> {
        usize::try_from(sequence_id)
            .ok()
            .and_then(|i| self.entries.get(i))
    }
}

/// An in-memory, append-only ledger of memory entries.
///
/// Share it across threads with `Arc<Vault>`; every method takes `&self`.
pub struct Vault {
    config: VaultConfig,
    clock: Arc<dyn Clock>,
    state: RwLock<VaultState>,
    entry_listeners: Registry<dyn EntryListener>,
    milestone_listeners: Registry<dyn MilestoneListener>,
    dispatch: DispatchTurn,
    listener_failures: AtomicU64,
}

impl Vault {
    // ------------------------------------------------------------------
    // Construction
    // ------------------------------------------------------------------

    /// Create a vault that reads time from the system clock.
    pub fn new(config: VaultConfig, initial_funding: Amount) -> Result<Self> {
        Self::with_clock(config, initial_funding, Arc::new(SystemClock))
    }

    /// Create a vault with an explicit time source.
    ///
    /// Fails with `ConfigError` for an unusable config and with
    /// `InvalidInput` when `initial_funding` is below the configured minimum.
    pub fn with_clock(
        config: VaultConfig,
        initial_funding: Amount,
        clock: Arc<dyn Clock>,
    ) -> Result<Self> {
        config.validate()?;

        if initial_funding < config.min_initial_funding {
            return Err(MemVaultError::invalid(format!(
                "insufficient initial funding — need at least {} wei, got {}",
                config.min_initial_funding, initial_funding
            )));
        }

        info!(
            name = %config.name,
            funding = %initial_funding,
            capacity = config.capacity,
            "vault created"
        );

        Ok(Self {
            state: RwLock::new(VaultState::new(initial_funding, config.milestones)),
            config,
            clock,
            entry_listeners: Registry::default(),
            milestone_listeners: Registry::default(),
            dispatch: DispatchTurn::default(),
            listener_failures: AtomicU64::new(0),
        })
    }

    // ------------------------------------------------------------------
    // Admission
    // ------------------------------------------------------------------

    /// Admit a new entry.
    ///
    /// Checks, in order: non-empty content, content length, payment,
    /// non-empty creator, capacity, duplicate fingerprint.  On failure the
    /// vault is unchanged.  On success, milestone and entry-created
    /// listeners have all run by the time this returns.
    pub fn submit(&self, creator: &str, content: &str, payment: Amount) -> Result<Entry> {
        self.validate_submission(creator, content, payment)?;

        let mut state = self.state.write();

        if state.total_entries >= self.config.capacity {
            return Err(MemVaultError::CapacityExceeded {
                capacity: self.config.capacity,
            });
        }

        let timestamp = self.clock.now();
        let fp = fingerprint(content, timestamp, creator);
        if state.fingerprints.contains(&fp) {
            return Err(MemVaultError::DuplicateEntry(fp));
        }

        let new_total_value = state
            .total_value
            .checked_add(payment)
            .ok_or_else(|| MemVaultError::invalid("total value overflow"))?;

        let sequence_id = state.total_entries;
        let entry = Entry::new(
            creator.to_string(),
            content.to_string(),
            timestamp,
            sequence_id,
            fp,
        );
        state.record(entry.clone(), new_total_value);

        let count = state.total_entries;
        let reached = state.milestones.evaluate(count, self.clock.now());
        drop(state);

        debug!(sequence_id, creator, "entry admitted");
        for m in &reached {
            info!(threshold = m.threshold, timestamp = m.timestamp, "milestone reached");
        }

        let _turn = self.dispatch.wait_for(sequence_id);
        self.notify_milestones(&reached);
        self.notify_entry_created(&entry);

        Ok(entry)
    }

    /// Argument checks that need no vault state.
    fn validate_submission(&self, creator: &str, content: &str, payment: Amount) -> Result<()> {
        if content.is_empty() {
            return Err(MemVaultError::invalid("empty content"));
        }
        let len = content_len(content);
        if len > self.config.max_content_len {
            return Err(MemVaultError::invalid(format!(
                "content too long — {len} UTF-16 units, maximum is {}",
                self.config.max_content_len
            )));
        }
        if payment < self.config.entry_fee {
            return Err(MemVaultError::invalid(format!(
                "insufficient payment — fee is {} wei, got {payment}",
                self.config.entry_fee
            )));
        }
        if creator.is_empty() {
            return Err(MemVaultError::invalid("empty creator"));
        }
        Ok(())
    }

    /// Add funds to the total value collected.
    ///
    /// `Amount` is unsigned, so the only failure is overflow.
    pub fn add_funds(&self, amount: Amount) -> Result<()> {
        let mut state = self.state.write();
        state.total_value = state
            .total_value
            .checked_add(amount)
            .ok_or_else(|| MemVaultError::invalid("total value overflow"))?;
        debug!(amount = %amount, total = %state.total_value, "funds added");
        Ok(())
    }

    // ------------------------------------------------------------------
    // Listeners
    // ------------------------------------------------------------------

    /// Register an observer for entry admissions.
    ///
    /// Listeners may read the vault and may call `submit`.  A nested
    /// admission is delivered before the outer one finishes notifying.
    pub fn register_entry_listener(&self, listener: Arc<dyn EntryListener>) {
        self.entry_listeners.register(listener);
    }

    /// Register an observer for milestone transitions.
    pub fn register_milestone_listener(&self, listener: Arc<dyn MilestoneListener>) {
        self.milestone_listeners.register(listener);
    }

    /// Number of listener calls that returned an error so far.
    pub fn listener_failures(&self) -> u64 {
        self.listener_failures.load(Ordering::Relaxed)
    }

    pub fn listener_count(&self) -> (usize, usize) {
        (self.entry_listeners.len(), self.milestone_listeners.len())
    }

    fn notify_milestones(&self, reached: &[MilestoneReached]) {
        if reached.is_empty() {
            return;
        }
        let listeners = self.milestone_listeners.snapshot();
        for event in reached {
            for (idx, listener) in listeners.iter().enumerate() {
                if let Err(e) = listener.on_milestone_reached(event) {
                    warn!(listener = idx, threshold = event.threshold, error = %e, "milestone listener failed");
                    self.listener_failures.fetch_add(1, Ordering::Relaxed);
                }
            }
        }
    }

    fn notify_entry_created(&self, entry: &Entry) {
        let listeners = self.entry_listeners.snapshot();
        if listeners.is_empty() {
            return;
        }
        let event = EntryCreated {
            creator: entry.creator().to_string(),
            sequence_id: entry.sequence_id(),
            content: entry.content().to_string(),
            timestamp: entry.timestamp(),
            fingerprint: entry.fingerprint().to_string(),
        };
        for (idx, listener) in listeners.iter().enumerate() {
            if let Err(e) = listener.on_entry_created(&event) {
                warn!(listener = idx, sequence_id = event.sequence_id, error = %e, "entry listener failed");
                self.listener_failures.fetch_add(1, Ordering::Relaxed);
            }
        }
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    /// Fetch an entry by sequence id.
    pub fn get(&self, sequence_id: u64) -> Result<Entry> {
        self.state
            .read()
            .entry(sequence_id)
            .cloned()
            .ok_or(MemVaultError::NotFound(sequence_id))
    }

    /// Sequence ids authored by `creator`, oldest first.  Unknown creators
    /// yield an empty list.
    pub fn entries_by_creator(&self, creator: &str) -> Vec<u64> {
        self.state
            .read()
            .by_creator
            .get(creator)
            .cloned()
            .unwrap_or_default()
    }

    /// The last `min(n, count)` entries, oldest first.
    pub fn recent(&self, n: usize) -> Result<Vec<Entry>> {
        if n == 0 {
            return Err(MemVaultError::invalid("count must be positive"));
        }
        let state = self.state.read();
        let start = state.entries.len().saturating_sub(n);
        Ok(state.entries[start..].to_vec())
    }

    /// Sequence id of the first entry with this fingerprint.
    pub fn find_by_fingerprint(&self, hash: &str) -> Option<u64> {
        self.state
            .read()
            .entries
            .iter()
            .find(|e| e.fingerprint() == hash)
            .map(Entry::sequence_id)
    }

    /// Recompute an entry's fingerprint and compare it to the stored one.
    pub fn verify(&self, sequence_id: u64) -> Result<bool> {
        self.state
            .read()
            .entry(sequence_id)
            .map(Entry::verify)
            .ok_or(MemVaultError::NotFound(sequence_id))
    }

    /// Sequence ids of every entry that fails verification.
    pub fn verify_all(&self) -> Vec<u64> {
        self.state
            .read()
            .entries
            .iter()
            .filter(|e| !e.verify())
            .map(Entry::sequence_id)
            .collect()
    }

    pub fn creator_entry_count(&self, creator: &str) -> u64 {
        self.state
            .read()
            .creator_counts
            .get(creator)
            .copied()
            .unwrap_or(0)
    }

    pub fn is_creator(&self, creator: &str) -> bool {
        self.state.read().creator_set.contains(creator)
    }

    /// Unique creators in first-seen order.
    pub fn unique_creators(&self) -> Vec<String> {
        self.state.read().creators.clone()
    }

    /// Every entry, oldest first.
    pub fn entries(&self) -> Vec<Entry> {
        self.state.read().entries.clone()
    }

    pub fn len(&self) -> u64 {
        self.state.read().total_entries
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn remaining_capacity(&self) -> u64 {
        self.config.capacity.saturating_sub(self.len())
    }

    /// Snapshot of the running totals and milestone flags.
    pub fn stats(&self) -> VaultStats {
        let state = self.state.read();
        let milestones = state.milestones.milestones();
        VaultStats {
            count: state.total_entries,
            unique_creators: state.total_creators,
            total_value: state.total_value,
            remaining_capacity: self.config.capacity.saturating_sub(state.total_entries),
            milestone1: milestones[0].is_reached(),
            milestone2: milestones[1].is_reached(),
            milestone3: milestones[2].is_reached(),
            milestones,
        }
    }

    /// Static vault metadata.
    pub fn info(&self) -> VaultInfo {
        VaultInfo::from_config(&self.config)
    }

    pub fn config(&self) -> &VaultConfig {
        &self.config
    }
}
