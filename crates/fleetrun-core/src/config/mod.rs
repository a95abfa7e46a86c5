use fleetrun_model::RunOptions;

/// Rollout settings.
///
/// Only `concurrency` is mandatory; every run argument is optional and stays
/// absent from the remote command when unset.
#[derive(Debug, Clone)]
pub struct RolloutConfig {
    /// Maximum number of nodes simultaneously in flight. Must be at least 1.
    pub concurrency: usize,
    pub force: Option<bool>,
    pub server: Option<String>,
    pub noop: Option<bool>,
    pub environment: Option<String>,
    pub splay: Option<bool>,
    pub splaylimit: Option<u64>,
    pub tag: Vec<String>,
    pub ignoreschedules: Option<bool>,
}

impl RolloutConfig {
    pub fn new(concurrency: usize) -> Self {
        Self {
            concurrency,
            force: None,
            server: None,
            noop: None,
            environment: None,
            splay: None,
            splaylimit: None,
            tag: Vec::new(),
            ignoreschedules: None,
        }
    }

    pub fn with_force(mut self, force: bool) -> Self {
        self.force = Some(force);
        self
    }

    pub fn with_server(mut self, server: impl Into<String>) -> Self {
        self.server = Some(server.into());
        self
    }

    pub fn with_noop(mut self, noop: bool) -> Self {
        self.noop = Some(noop);
        self
    }

    pub fn with_environment(mut self, environment: impl Into<String>) -> Self {
        self.environment = Some(environment.into());
        self
    }

    pub fn with_splay(mut self, splay: bool) -> Self {
        self.splay = Some(splay);
        self
    }

    pub fn with_splaylimit(mut self, splaylimit: u64) -> Self {
        self.splaylimit = Some(splaylimit);
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tag = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_ignoreschedules(mut self, ignoreschedules: bool) -> Self {
        self.ignoreschedules = Some(ignoreschedules);
        self
    }

    /// Assemble the remote run-once parameter set.
    ///
    /// Present fields pass through unchanged; `tag` entries are joined into a
    /// single comma-separated `tags` value; unset fields stay absent so the
    /// remote agent's own defaults apply.
    pub fn runonce_arguments(&self) -> RunOptions {
        RunOptions {
            force: self.force,
            server: self.server.clone(),
            noop: self.noop,
            environment: self.environment.clone(),
            splay: self.splay,
            splaylimit: self.splaylimit,
            tags: (!self.tag.is_empty()).then(|| self.tag.join(",")),
            ignoreschedules: self.ignoreschedules,
        }
    }
}

impl Default for RolloutConfig {
    fn default() -> Self {
        Self::new(1)
    }
}
