use serde::{Deserialize, Serialize};

use crate::{NodeName, Timestamp};

/// One node's reply to a run-once command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunReply {
    pub data: RunData,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunData {
    /// Human-readable outcome line reported by the agent.
    pub summary: String,
    /// When the run started. Agents predating this field do not report it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initiated_at: Option<Timestamp>,
}

impl RunReply {
    /// Start timestamp, degraded to `0` for legacy agents.
    pub fn initiated_at(&self) -> Timestamp {
        self.data.initiated_at.unwrap_or(0)
    }
}

/// One node's status snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusReply {
    pub sender: NodeName,
    pub data: StatusData,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusData {
    /// `true` while a triggered run is actively executing on the node.
    pub applying: bool,
    #[serde(default)]
    pub lastrun: Timestamp,
    #[serde(default)]
    pub initiated_at: Timestamp,
}
