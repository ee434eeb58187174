//! Operation executor
//!
//! The executor runs a batch of [`Operation`]s concurrently and joins on all
//! of them:
//! - every operation is spawned as a tokio task on the configured runtime
//! - an optional semaphore bounds how many are in flight
//! - each operation's handler is invoked with its result as soon as it completes
//! - [`Executor::run`] returns once, with one result per operation, in input order
//!
//! A failing, timed out, or panicking operation still occupies its slot in
//! the output, so callers always receive exactly N results for N operations.

use crate::config::ExecutorConfig;
use crate::probe::{Probe, ProbeError, ProbeResult};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use url::Url;

/// Callback invoked with the result of an operation's probe
pub type ResultHandler = Box<dyn FnOnce(&ProbeResult) + Send + 'static>;

/// A probe paired with the handler that consumes its result
pub struct Operation {
    probe: Probe,
    handler: Option<ResultHandler>,
}

impl Operation {
    pub fn new<F>(probe: Probe, handler: F) -> Self
    where
        F: FnOnce(&ProbeResult) + Send + 'static,
    {
        Self {
            probe,
            handler: Some(Box::new(handler)),
        }
    }

    /// An operation whose result is only consumed through [`Executor::run`]'s output
    pub fn probe_only(probe: Probe) -> Self {
        Self {
            probe,
            handler: None,
        }
    }

    pub fn probe(&self) -> &Probe {
        &self.probe
    }

    pub fn url(&self) -> &Url {
        self.probe.url()
    }

    /// Executes the probe, then hands the result to the handler
    async fn run(self, timeout: Option<Duration>) -> ProbeResult {
        let result = match timeout {
            Some(limit) => match tokio::time::timeout(limit, self.probe.execute()).await {
                Ok(result) => result,
                Err(_) => {
                    tracing::debug!("Probe {} timed out after {:?}", self.probe.url(), limit);
                    ProbeResult::Failed {
                        url: self.probe.url().clone(),
                        error: ProbeError::TimedOut(limit),
                    }
                }
            },
            None => self.probe.execute().await,
        };

        if let Some(handler) = self.handler {
            handler(&result);
        }
        result
    }
}

impl fmt::Debug for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Operation")
            .field("probe", &self.probe)
            .field("has_handler", &self.handler.is_some())
            .finish()
    }
}

/// Runs batches of operations concurrently
#[derive(Debug, Clone, Default)]
pub struct Executor {
    runtime: Option<Handle>,
    limit: Option<Arc<Semaphore>>,
    operation_timeout: Option<Duration>,
}

impl Executor {
    /// An unbounded executor on the current runtime without per-operation timeout
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds an executor from configuration
    pub fn from_config(config: &ExecutorConfig) -> Self {
        Self::new()
            .with_max_concurrency(config.max_concurrent_operations)
            .with_operation_timeout(Duration::from_secs(config.operation_timeout_secs))
    }

    /// Spawns operations on the given runtime instead of the current one
    pub fn with_runtime(mut self, runtime: Handle) -> Self {
        self.runtime = Some(runtime);
        self
    }

    /// Bounds the number of operations in flight (0 = unbounded)
    pub fn with_max_concurrency(mut self, max: usize) -> Self {
        self.limit = (max > 0).then(|| Arc::new(Semaphore::new(max)));
        self
    }

    /// Forces a `TimedOut` failure for operations that run longer than `timeout`
    pub fn with_operation_timeout(mut self, timeout: Duration) -> Self {
        self.operation_timeout = Some(timeout);
        self
    }

    /// Executes all operations concurrently and returns their results in input order
    ///
    /// An empty batch returns immediately without spawning anything.
    pub async fn run(&self, operations: Vec<Operation>) -> Vec<ProbeResult> {
        let total = operations.len();
        if total == 0 {
            tracing::debug!("No operations to execute");
            return Vec::new();
        }

        tracing::debug!("Executing {} operations", total);

        let urls: Vec<Url> = operations.iter().map(|op| op.url().clone()).collect();
        let mut tasks = JoinSet::new();

        for (index, operation) in operations.into_iter().enumerate() {
            let limit = self.limit.clone();
            let timeout = self.operation_timeout;

            let task = async move {
                let _permit = match limit {
                    Some(semaphore) => semaphore.acquire_owned().await.ok(),
                    None => None,
                };
                (index, operation.run(timeout).await)
            };

            match &self.runtime {
                Some(runtime) => tasks.spawn_on(task, runtime),
                None => tasks.spawn(task),
            };
        }

        let mut slots: Vec<Option<ProbeResult>> = (0..total).map(|_| None).collect();
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((index, result)) => slots[index] = Some(result),
                Err(e) => tracing::warn!("Operation task did not complete: {}", e),
            }
        }

        slots
            .into_iter()
            .zip(urls)
            .map(|(slot, url)| {
                slot.unwrap_or(ProbeResult::Failed {
                    url,
                    error: ProbeError::Aborted,
                })
            })
            .collect()
    }
}
