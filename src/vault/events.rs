//! Vault notifications: event payloads, listener traits, and registries.
//!
//! Listeners are invoked synchronously, in registration order, from inside
//! `Vault::submit`.  A listener that returns an error is logged and skipped;
//! it never fails the admission and never stops later listeners.

use std::collections::BTreeSet;
use std::sync::mpsc::Sender;
use std::sync::Arc;
use std::thread::{self, ThreadId};

use parking_lot::{Condvar, Mutex, RwLock};
use serde::Serialize;
use thiserror::Error;

/// Payload for a newly admitted entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntryCreated {
    pub creator: String,
    pub sequence_id: u64,
    pub content: String,
    pub timestamp: i64,
    pub fingerprint: String,
}

/// Payload for a milestone transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MilestoneReached {
    pub threshold: u64,
    pub timestamp: i64,
}

/// Either kind of notification, for channel-based consumers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum VaultEvent {
    EntryCreated(EntryCreated),
    MilestoneReached(MilestoneReached),
}

/// Error returned by a listener.  Logged by the vault, never propagated.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct ListenerError(pub String);

/// Result type for listener callbacks.
pub type ListenerResult = std::result::Result<(), ListenerError>;

/// Observer for entry admissions.
pub trait EntryListener: Send + Sync {
    fn on_entry_created(&self, event: &EntryCreated) -> ListenerResult;
}

/// Observer for milestone transitions.
pub trait MilestoneListener: Send + Sync {
    fn on_milestone_reached(&self, event: &MilestoneReached) -> ListenerResult;
}

impl<F> EntryListener for F
where
    F: Fn(&EntryCreated) -> ListenerResult + Send + Sync,
{
    fn on_entry_created(&self, event: &EntryCreated) -> ListenerResult {
        self(event)
    }
}

impl<F> MilestoneListener for F
where
    F: Fn(&MilestoneReached) -> ListenerResult + Send + Sync,
{
    fn on_milestone_reached(&self, event: &MilestoneReached) -> ListenerResult {
        self(event)
    }
}

/// Forwards every event into an mpsc channel.
///
/// Register the same `Arc<ChannelListener>` in both registries to receive
/// a single ordered stream.  A dropped receiver shows up as a listener error.
pub struct ChannelListener {
    tx: Mutex<Sender<VaultEvent>>,
}

impl ChannelListener {
    pub fn new(tx: Sender<VaultEvent>) -> Self {
        Self {
            tx: Mutex::new(tx),
        }
    }

    fn send(&self, event: VaultEvent) -> ListenerResult {
        self.tx
            .lock()
            .send(event)
            .map_err(|_| ListenerError("event receiver disconnected".into()))
    }
}

impl EntryListener for ChannelListener {
    fn on_entry_created(&self, event: &EntryCreated) -> ListenerResult {
        self.send(VaultEvent::EntryCreated(event.clone()))
    }
}

impl MilestoneListener for ChannelListener {
    fn on_milestone_reached(&self, event: &MilestoneReached) -> ListenerResult {
        self.send(VaultEvent::MilestoneReached(*event))
    }
}

/// Append-only, registration-ordered list of listeners.
pub(crate) struct Registry<L: ?Sized> {
    listeners: RwLock<Vec<Arc<L>>>,
}

impl<L: ?Sized> Default for Registry<L> {
    fn default() -> Self {
        Self {
            listeners: RwLock::new(Vec::new()),
        }
    }
}

impl<L: ?Sized> Registry<L> {
    pub(crate) fn register(&self, listener: Arc<L>) {
        self.listeners.write().push(listener);
    }

    /// Snapshot the current listeners so dispatch does not hold the
    /// registry lock while user code runs.
    pub(crate) fn snapshot(&self) -> Vec<Arc<L>> {
        self.listeners.read().clone()
    }

    pub(crate) fn len(&self) -> usize {
        self.listeners.read().len()
    }
}

/// Ticket gate that serializes dispatch in `sequence_id` order.
///
/// An admission with id `n` waits until admissions `0..n` have finished
/// notifying.  The turn advances when the returned guard drops, including
/// during a panic unwinding out of a listener.
///
/// A `submit` made by a listener runs on the thread that already holds the
/// turn.  It is delivered immediately instead of waiting, and its id is
/// skipped when the turn later reaches it.
#[derive(Default)]
pub(crate) struct DispatchTurn {
    state: Mutex<TurnState>,
    turn: Condvar,
}

#[derive(Default)]
struct TurnState {
    next: u64,
    owner: Option<ThreadId>,
    delivered_early: BTreeSet<u64>,
}

impl DispatchTurn {
    pub(crate) fn wait_for(&self, sequence_id: u64) -> TurnGuard<'_> {
        let me = thread::current().id();
        let mut state = self.state.lock();
        if state.owner == Some(me) {
            return TurnGuard {
                gate: self,
                sequence_id,
                nested: true,
            };
        }
        while state.next != sequence_id {
            self.turn.wait(&mut state);
        }
        state.owner = Some(me);
        TurnGuard {
            gate: self,
            sequence_id,
            nested: false,
        }
    }
}

pub(crate) struct TurnGuard<'a> {
    gate: &'a DispatchTurn,
    sequence_id: u64,
    nested: bool,
}

impl Drop for TurnGuard<'_> {
    fn drop(&mut self) {
        let mut guard = self.gate.state.lock();
        let state = &mut *guard;
        if self.nested {
            state.delivered_early.insert(self.sequence_id);
            return;
        }
        state.owner = None;
        state.next = self.sequence_id + 1;
        while state.delivered_early.remove(&state.next) {
            state.next += 1;
        }
        drop(guard);
        self.gate.turn.notify_all();
    }
}
