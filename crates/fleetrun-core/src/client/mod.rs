mod error;
pub use error::ClientError;

#[cfg(test)]
pub(crate) mod mock;

use async_trait::async_trait;

use fleetrun_model::{Filter, NodeName, RunOptions, RunReply, StatusReply};

/// Remote fleet client collaborator.
///
/// Implementations own the transport used to discover nodes and drive the
/// configuration agent; the coordinator depends on this surface only.
/// Filter state is sticky across calls until [`FleetClient::reset`].
#[async_trait]
pub trait FleetClient: Send {
    /// Current filter state.
    fn filter(&self) -> &Filter;

    /// Restrict subsequent discovery with a compound predicate clause.
    fn compound_filter(&mut self, predicate: &str);

    /// Restrict subsequent discovery and status calls to one node.
    fn identity_filter(&mut self, name: &str);

    /// Clear all filter state.
    fn reset(&mut self);

    /// Suppress the client's default progress output.
    fn disable_progress(&mut self);

    /// Discover node identities matching the current filter.
    async fn discover(&mut self) -> Result<Vec<NodeName>, ClientError>;

    /// Trigger a remote agent run on nodes matching the current filter.
    async fn runonce(&mut self, options: &RunOptions) -> Result<Vec<RunReply>, ClientError>;

    /// Per-node status snapshots for nodes matching the current filter.
    async fn status(&mut self) -> Result<Vec<StatusReply>, ClientError>;
}
