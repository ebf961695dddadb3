//! Concurrent admission tests: no lost updates, gapless ids, ordered dispatch.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use std::thread;

use memvault::vault::{EntryCreated, ListenerResult, MilestoneReached, Vault};
use memvault::{Amount, ManualClock, VaultConfig};

fn shared_vault(config: VaultConfig) -> Arc<Vault> {
    let funding = config.min_initial_funding;
    // A frozen clock makes every admission share one timestamp, so only
    // distinct content keeps fingerprints apart.
    let clock = Arc::new(ManualClock::new(1_738_281_600));
    Arc::new(Vault::with_clock(config, funding, clock).unwrap())
}

#[test]
fn concurrent_submissions_get_distinct_gapless_ids() {
    const THREADS: u64 = 16;
    const PER_THREAD: u64 = 50;

    let config = VaultConfig::default();
    let fee = config.entry_fee;
    let funding = config.min_initial_funding;
    let vault = shared_vault(config);

    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let vault = Arc::clone(&vault);
            thread::spawn(move || {
                (0..PER_THREAD)
                    .map(|i| {
                        vault
                            .submit(&format!("creator-{t}"), &format!("t{t} m{i}"), fee)
                            .expect("distinct content must be admitted")
                            .sequence_id()
                    })
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    let mut ids: Vec<u64> = handles
        .into_iter()
        .flat_map(|h| h.join().unwrap())
        .collect();
    ids.sort_unstable();

    let total = THREADS * PER_THREAD;
    assert_eq!(ids, (0..total).collect::<Vec<_>>());

    let stats = vault.stats();
    assert_eq!(stats.count, total);
    assert_eq!(stats.unique_creators, THREADS);
    assert_eq!(
        stats.total_value,
        Amount::from_wei(funding.wei() + fee.wei() * u128::from(total))
    );
    for t in 0..THREADS {
        assert_eq!(vault.creator_entry_count(&format!("creator-{t}")), PER_THREAD);
    }
    assert!(vault.verify_all().is_empty());
}

#[test]
fn concurrent_duplicates_admit_exactly_one() {
    let config = VaultConfig::default();
    let fee = config.entry_fee;
    let vault = shared_vault(config);

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let vault = Arc::clone(&vault);
            thread::spawn(move || vault.submit("alice", "contested", fee).is_ok())
        })
        .collect();

    let admitted = handles
        .into_iter()
        .map(|h| h.join().unwrap())
        .filter(|ok| *ok)
        .count();

    assert_eq!(admitted, 1);
    assert_eq!(vault.len(), 1);
}

#[test]
fn concurrent_dispatch_follows_sequence_order() {
    let config = VaultConfig {
        milestones: [10, 100, 150],
        ..VaultConfig::default()
    };
    let fee = config.entry_fee;
    let vault = shared_vault(config);

    let seen = Arc::new(Mutex::new(Vec::new()));
    let milestones = Arc::new(Mutex::new(Vec::new()));

    let sink = Arc::clone(&seen);
    vault.register_entry_listener(Arc::new(move |e: &EntryCreated| -> ListenerResult {
        sink.lock().unwrap().push(e.sequence_id);
        Ok(())
    }));
    let sink = Arc::clone(&milestones);
    vault.register_milestone_listener(Arc::new(move |m: &MilestoneReached| -> ListenerResult {
        sink.lock().unwrap().push(m.threshold);
        Ok(())
    }));

    let handles: Vec<_> = (0..8)
        .map(|t| {
            let vault = Arc::clone(&vault);
            thread::spawn(move || {
                for i in 0..25 {
                    vault.submit("shared", &format!("{t}-{i}"), fee).unwrap();
                }
            })
        })
        .collect();
    for h in handles {
        h.join().unwrap();
    }

    let seen = seen.lock().unwrap();
    assert_eq!(*seen, (0..200).collect::<Vec<u64>>());
    assert_eq!(*milestones.lock().unwrap(), vec![10, 100, 150]);
}

#[test]
fn concurrent_capacity_never_overflows() {
    let config = VaultConfig {
        capacity: 30,
        ..VaultConfig::default()
    };
    let fee = config.entry_fee;
    let vault = shared_vault(config);

    let handles: Vec<_> = (0..6)
        .map(|t| {
            let vault = Arc::clone(&vault);
            thread::spawn(move || {
                (0..10)
                    .filter(|i| vault.submit("bob", &format!("{t}:{i}"), fee).is_ok())
                    .count()
            })
        })
        .collect();

    let admitted: usize = handles.into_iter().map(|h| h.join().unwrap()).sum();
    assert_eq!(admitted, 30);
    assert_eq!(vault.len(), 30);
    assert_eq!(vault.remaining_capacity(), 0);

    let fingerprints: HashSet<String> = vault
        .entries()
        .iter()
        .map(|e| e.fingerprint().to_string())
        .collect();
    assert_eq!(fingerprints.len(), 30);
}
