use std::collections::VecDeque;
use std::time::Duration;

use tokio::time::{Instant, sleep};
use tracing::{debug, info};

use fleetrun_model::{NodeName, Timestamp, TrackedNode};

use crate::client::FleetClient;
use crate::config::RolloutConfig;
use crate::error::CoordinatorError;

/// Compound predicate injected for pass discovery: administratively disabled
/// agents never receive a run.
const ENABLED_PREDICATE: &str = "enabled=true";

/// Backpressure delay between polling attempts while work remains.
const POLL_INTERVAL: Duration = Duration::from_secs(1);

type LogSink = Box<dyn Fn(&str) + Send + Sync>;

/// Bounded-concurrency rollout coordinator.
///
/// Drives a configuration-agent run across the fleet while keeping at most
/// `concurrency` nodes in flight. Completion is detected by polling node
/// status; nodes that never transition into the applying state are evicted
/// after a fixed number of missed polls instead of blocking the pass.
///
/// The coordinator is the single mutator of its tracked set and work queue;
/// concurrency refers strictly to remote nodes in flight, not local tasks.
pub struct Coordinator<C> {
    client: C,
    config: RolloutConfig,
    sink: Option<LogSink>,
}

impl<C: std::fmt::Debug> std::fmt::Debug for Coordinator<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Coordinator")
            .field("client", &self.client)
            .field("config", &self.config)
            .field("sink", &self.sink.as_ref().map(|_| "..."))
            .finish()
    }
}

impl<C: FleetClient> Coordinator<C> {
    /// Construct a coordinator over `client`.
    ///
    /// Fails when `concurrency` is below 1 or when the client already carries
    /// a compound filter clause; the enabled-nodes predicate is injected per
    /// pass and must not compete with caller state. On success the client's
    /// default progress output is suppressed.
    pub fn new(mut client: C, config: RolloutConfig) -> Result<Self, CoordinatorError> {
        if config.concurrency < 1 {
            return Err(CoordinatorError::InvalidConcurrency(config.concurrency));
        }
        let compound = &client.filter().compound;
        if !compound.is_empty() {
            return Err(CoordinatorError::CompoundFilterNotEmpty(compound.clone()));
        }
        client.disable_progress();

        Ok(Self {
            client,
            config,
            sink: None,
        })
    }

    /// Install a diagnostic sink. Lines also reach `tracing` either way;
    /// without a sink the forwarding is a no-op.
    pub fn set_logger(&mut self, sink: impl Fn(&str) + Send + Sync + 'static) {
        self.sink = Some(Box::new(sink));
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    fn log(&self, message: &str) {
        info!("{message}");
        if let Some(sink) = &self.sink {
            sink(message);
        }
    }

    /// Run one pass, or repeat passes forever at `min_interval` cadence.
    pub async fn runall(
        &mut self,
        repeat: bool,
        min_interval: Duration,
    ) -> Result<(), CoordinatorError> {
        if repeat {
            self.runall_forever(min_interval).await
        } else {
            self.runall_once().await
        }
    }

    /// Repeat passes forever, starting a new pass no sooner than
    /// `min_interval` after the previous one began.
    pub async fn runall_forever(&mut self, min_interval: Duration) -> Result<(), CoordinatorError> {
        self.runall_repeated(min_interval, None).await
    }

    /// Bounded variant of [`Coordinator::runall_forever`] so tests can drive
    /// a finite number of passes.
    pub(crate) async fn runall_repeated(
        &mut self,
        min_interval: Duration,
        passes: Option<u32>,
    ) -> Result<(), CoordinatorError> {
        let mut completed = 0u32;
        loop {
            let started = Instant::now();
            self.runall_once().await?;
            let elapsed = started.elapsed();

            completed += 1;
            if let Some(limit) = passes
                && completed >= limit
            {
                return Ok(());
            }

            if elapsed < min_interval {
                let wait = min_interval - elapsed;
                self.log(&format!(
                    "Pass took {:.1} seconds, sleeping {:.1} seconds before the next pass",
                    elapsed.as_secs_f64(),
                    wait.as_secs_f64()
                ));
                sleep(wait).await;
            }
        }
    }

    /// One full sweep: discover enabled nodes, then dispatch runs to all of
    /// them under the concurrency ceiling.
    pub async fn runall_once(&mut self) -> Result<(), CoordinatorError> {
        self.log(&format!(
            "Running all nodes with a concurrency of {}",
            self.config.concurrency
        ));
        self.log("Discovering enabled nodes to manage");

        self.client.compound_filter(ENABLED_PREDICATE);
        let result = self.client.discover().await;
        self.client.reset();
        let nodes = result?;

        self.log(&format!("Found {} enabled nodes", nodes.len()));
        self.run_hosts(nodes.into()).await
    }

    /// Drain the work queue while keeping at most `concurrency` nodes in
    /// flight, polling until every dispatched node has finished or been
    /// evicted. Individual node failures never abort the pass.
    pub async fn run_hosts(&mut self, mut queue: VecDeque<NodeName>) -> Result<(), CoordinatorError> {
        let mut running: Vec<TrackedNode> = Vec::new();

        while !queue.is_empty() || !running.is_empty() {
            while running.len() < self.config.concurrency {
                let Some(name) = queue.pop_front() else { break };
                let initiated_at = self.run_host(&name).await?;
                running.push(TrackedNode::new(name, initiated_at));
            }

            let names: Vec<NodeName> = running.iter().map(|t| t.name.clone()).collect();
            running = self.find_applying_nodes(&names, running).await?;

            if !queue.is_empty() || !running.is_empty() {
                sleep(POLL_INTERVAL).await;
            }
        }

        Ok(())
    }

    /// Trigger a run on one node; returns the agent-reported start timestamp.
    ///
    /// The run is forced so the agent does not defer it to its own schedule.
    /// Agents that predate the `initiated_at` field yield `0`. The client
    /// filter is reset afterwards even when the call fails.
    pub async fn run_host(&mut self, name: &str) -> Result<Timestamp, CoordinatorError> {
        self.client.identity_filter(name);

        let mut options = self.config.runonce_arguments();
        options.force = Some(true);

        let result = self.client.runonce(&options).await;
        self.client.reset();
        let replies = result?;

        match replies.first() {
            Some(reply) => {
                self.log(&format!("{name} schedule status: {}", reply.data.summary));
                Ok(reply.initiated_at())
            }
            None => {
                self.log(&format!("{name} did not reply to the run request"));
                Ok(0)
            }
        }
    }

    /// Poll status for `candidates` and fold the result into the tracked set.
    ///
    /// Nodes observed applying stay tracked with their retry clock reset;
    /// nodes requested but not yet applying advance the clock and are evicted
    /// once it passes the threshold; nodes absent from status are treated as
    /// already finished and dropped. A node started out of band still shows
    /// up here and is tracked under the same rules.
    pub async fn find_applying_nodes(
        &mut self,
        candidates: &[NodeName],
        tracked: Vec<TrackedNode>,
    ) -> Result<Vec<TrackedNode>, CoordinatorError> {
        let mut still_running = Vec::new();

        for name in candidates {
            self.client.identity_filter(name);
            let result = self.client.status().await;
            self.client.reset();
            let statuses = result?;

            let Some(status) = statuses.iter().filter(|s| &s.sender == name).next_back() else {
                debug!(node = %name, "no status reported, assuming finished");
                continue;
            };

            let previous = tracked.iter().find(|t| &t.name == name);
            let mut entry = previous
                .cloned()
                .unwrap_or_else(|| TrackedNode::new(name.clone(), status.data.initiated_at));

            if status.data.applying {
                entry.confirm_applying();
                still_running.push(entry);
            } else {
                entry.record_miss();
                if entry.exhausted() {
                    self.log(&format!(
                        "Host {name} did not move into an applying state. Skipping."
                    ));
                } else {
                    still_running.push(entry);
                }
            }
        }

        Ok(still_running)
    }
}
