//! Scripted in-memory fleet used by coordinator tests.

use std::collections::{HashMap, VecDeque};
use std::time::Duration;

use async_trait::async_trait;

use fleetrun_model::{Filter, NodeName, RunData, RunOptions, RunReply, StatusData, StatusReply};

use super::{ClientError, FleetClient};

/// Calls observed by the fleet, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum FleetEvent {
    Discover,
    Runonce(NodeName),
    Status(NodeName),
}

/// Each node carries a queue of status frames; every status poll against the
/// node consumes one frame. An exhausted queue means the node no longer
/// reports status, i.e. the run finished.
#[derive(Debug, Default)]
pub(crate) struct ScriptedFleet {
    filter: Filter,
    pub nodes: Vec<NodeName>,
    pub frames: HashMap<NodeName, VecDeque<StatusData>>,
    /// Timestamp reported by `runonce` replies; `None` simulates a legacy agent.
    pub run_initiated_at: Option<i64>,
    /// Artificial latency for `discover`, for pass-timing tests.
    pub discover_delay: Option<Duration>,
    pub events: Vec<FleetEvent>,
    pub captured_options: Vec<RunOptions>,
    pub discover_filters: Vec<Filter>,
    pub progress_disabled: bool,
}

impl ScriptedFleet {
    pub fn new() -> Self {
        Self {
            run_initiated_at: Some(100),
            ..Default::default()
        }
    }

    pub fn with_nodes(names: &[&str]) -> Self {
        let mut fleet = Self::new();
        fleet.nodes = names.iter().map(|s| s.to_string()).collect();
        fleet
    }

    pub fn script(&mut self, node: &str, frames: impl IntoIterator<Item = StatusData>) {
        self.frames
            .entry(node.to_string())
            .or_default()
            .extend(frames);
    }

    pub fn seed_compound(&mut self, predicate: &str) {
        self.filter.push_compound(predicate);
    }

    pub fn runonce_count(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, FleetEvent::Runonce(_)))
            .count()
    }

    pub fn status_count(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, FleetEvent::Status(_)))
            .count()
    }
}

/// Status frame for a node actively applying.
pub(crate) fn applying(initiated_at: i64) -> StatusData {
    StatusData {
        applying: true,
        lastrun: 0,
        initiated_at,
    }
}

/// Status frame for a node that was asked to run but has not started.
pub(crate) fn idle() -> StatusData {
    StatusData {
        applying: false,
        lastrun: 0,
        initiated_at: 0,
    }
}

#[async_trait]
impl FleetClient for ScriptedFleet {
    fn filter(&self) -> &Filter {
        &self.filter
    }

    fn compound_filter(&mut self, predicate: &str) {
        self.filter.push_compound(predicate);
    }

    fn identity_filter(&mut self, name: &str) {
        self.filter.push_identity(name);
    }

    fn reset(&mut self) {
        self.filter.clear();
    }

    fn disable_progress(&mut self) {
        self.progress_disabled = true;
    }

    async fn discover(&mut self) -> Result<Vec<NodeName>, ClientError> {
        if let Some(delay) = self.discover_delay {
            tokio::time::sleep(delay).await;
        }
        self.events.push(FleetEvent::Discover);
        self.discover_filters.push(self.filter.clone());
        Ok(self.nodes.clone())
    }

    async fn runonce(&mut self, options: &RunOptions) -> Result<Vec<RunReply>, ClientError> {
        let target = self
            .filter
            .identity
            .first()
            .cloned()
            .ok_or_else(|| ClientError::Transport("runonce without identity filter".into()))?;
        self.events.push(FleetEvent::Runonce(target));
        self.captured_options.push(options.clone());

        Ok(vec![RunReply {
            data: RunData {
                summary: "Run scheduled".to_string(),
                initiated_at: self.run_initiated_at,
            },
        }])
    }

    async fn status(&mut self) -> Result<Vec<StatusReply>, ClientError> {
        let target = self
            .filter
            .identity
            .first()
            .cloned()
            .ok_or_else(|| ClientError::Transport("status without identity filter".into()))?;
        self.events.push(FleetEvent::Status(target.clone()));

        let frame = self.frames.get_mut(&target).and_then(|q| q.pop_front());
        Ok(frame
            .map(|data| StatusReply {
                sender: target,
                data,
            })
            .into_iter()
            .collect())
    }
}
