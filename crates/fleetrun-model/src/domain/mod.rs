mod filter;
pub use filter::Filter;

mod run_options;
pub use run_options::RunOptions;

mod replies;
pub use replies::{RunData, RunReply, StatusData, StatusReply};

mod tracked;
pub use tracked::{MAX_CHECKS, TrackedNode};

/// Opaque identifier naming a fleet member (typically a hostname).
///
/// Equality is exact string match.
pub type NodeName = String;

/// Agent-reported point in time, integer seconds in the agent's epoch.
pub type Timestamp = i64;
