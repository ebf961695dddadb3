//! One-shot entry-count milestones.
//!
//! Each milestone is `Unreached` until the entry count first reaches its
//! threshold, then `Reached` forever.

use serde::Serialize;

use super::events::MilestoneReached;

/// State of a single milestone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MilestoneState {
    Unreached,
    Reached { at: i64 },
}

/// A threshold and its state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Milestone {
    pub threshold: u64,
    pub state: MilestoneState,
}

impl Milestone {
    pub fn is_reached(&self) -> bool {
        matches!(self.state, MilestoneState::Reached { .. })
    }

    /// Timestamp of the transition, if it has happened.
    pub fn reached_at(&self) -> Option<i64> {
        match self.state {
            MilestoneState::Reached { at } => Some(at),
            MilestoneState::Unreached => None,
        }
    }
}

/// The three milestones of a vault, in ascending threshold order.
#[derive(Debug, Clone)]
pub(crate) struct MilestoneTracker {
    milestones: [Milestone; 3],
}

impl MilestoneTracker {
    pub(crate) fn new(thresholds: [u64; 3]) -> Self {
        Self {
            milestones: thresholds.map(|threshold| Milestone {
                threshold,
                state: MilestoneState::Unreached,
            }),
        }
    }

    /// Transition every unreached milestone whose threshold `count` has
    /// reached, in ascending order, and return the transitions.
    pub(crate) fn evaluate(&mut self, count: u64, now: i64) -> Vec<MilestoneReached> {
        let mut reached = Vec::new();
        for m in &mut self.milestones {
            if count >= m.threshold && !m.is_reached() {
                m.state = MilestoneState::Reached { at: now };
                reached.push(MilestoneReached {
                    threshold: m.threshold,
                    timestamp: now,
                });
            }
        }
        reached
    }

    pub(crate) fn milestones(&self) -> [Milestone; 3] {
        self.milestones
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_once_at_threshold() {
        let mut t = MilestoneTracker::new([2, 4, 6]);
        assert!(t.evaluate(1, 10).is_empty());

        let fired = t.evaluate(2, 11);
        assert_eq!(
            fired,
            vec![MilestoneReached {
                threshold: 2,
                timestamp: 11
            }]
        );

        assert!(t.evaluate(3, 12).is_empty());
        assert_eq!(t.milestones()[0].reached_at(), Some(11));
        assert!(!t.milestones()[1].is_reached());
    }

    #[test]
    fn multiple_thresholds_fire_in_ascending_order() {
        let mut t = MilestoneTracker::new([1, 2, 3]);
        let fired: Vec<u64> = t.evaluate(3, 0).iter().map(|m| m.threshold).collect();
        assert_eq!(fired, vec![1, 2, 3]);
        assert!(t.milestones().iter().all(Milestone::is_reached));
        assert!(t.evaluate(4, 1).is_empty());
    }

    #[test]
    fn reached_state_is_terminal() {
        let mut t = MilestoneTracker::new([1, 5, 9]);
        t.evaluate(1, 100);
        // A lower count never clears a reached milestone.
        t.evaluate(0, 200);
        assert_eq!(t.milestones()[0].reached_at(), Some(100));
    }
}
