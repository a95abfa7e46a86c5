use serde::{Deserialize, Serialize};

use crate::{NodeName, Timestamp};

/// Consecutive polls a node may sit in "requested but not yet applying"
/// before it is evicted from tracking. Fixed policy, not configurable.
pub const MAX_CHECKS: u32 = 5;

/// A node that has been told to run and is not yet confirmed finished.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackedNode {
    pub name: NodeName,
    /// When the run was triggered, as reported by the agent.
    pub initiated_at: Timestamp,
    /// Consecutive polls in which the node was not observed applying.
    pub checks: u32,
}

impl TrackedNode {
    pub fn new(name: impl Into<NodeName>, initiated_at: Timestamp) -> Self {
        Self {
            name: name.into(),
            initiated_at,
            checks: 0,
        }
    }

    /// The node was seen applying, the retry clock restarts.
    pub fn confirm_applying(&mut self) {
        self.checks = 0;
    }

    /// The node was polled but has not started applying yet.
    pub fn record_miss(&mut self) {
        self.checks += 1;
    }

    /// `true` once the node has missed more polls than [`MAX_CHECKS`] allows.
    pub fn exhausted(&self) -> bool {
        self.checks > MAX_CHECKS
    }
}
