use serde::{Deserialize, Serialize};

/// Parameter set forwarded to the remote agent's run-once command.
///
/// Absent fields are omitted from the serialized payload entirely so the
/// remote agent applies its own defaults instead of seeing `false`/`null`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub force: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub server: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub noop: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub environment: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub splay: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub splaylimit: Option<u64>,
    /// Tag list already joined into one comma-separated value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ignoreschedules: Option<bool>,
}
