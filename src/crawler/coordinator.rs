//! Batch coordinator - owns the lifecycle of a fetch run
//!
//! This module wires the pipeline together:
//! - One reporter task bound to a bounded result channel
//! - One dispatcher task per valid input, started eagerly with no cap
//! - A pending-count barrier that tells when every dispatcher has exited
//!
//! The result channel is closed only after the barrier reaches zero, and the
//! run ends only after the reporter has signalled that it drained the
//! channel.

use crate::config::{validate, Config};
use crate::crawler::dispatcher::dispatch;
use crate::crawler::fetcher::Fetcher;
use crate::crawler::tracker::PendingTracker;
use crate::output::spawn_reporter;
use crate::url::Target;
use crate::SumiError;
use std::io::Write;
use std::path::Path;
use tokio::sync::mpsc;

/// Counts describing one finished run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Inputs that became targets and got a dispatcher task
    pub dispatched: usize,

    /// Inputs rejected as invalid URLs
    pub rejected: usize,

    /// Dispatcher tasks that ended in `Succeeded`
    pub succeeded: usize,

    /// Dispatcher tasks that ended in `Failed` or panicked
    pub failed: usize,

    /// Records the reporter printed
    pub reported: usize,
}

/// Main coordinator structure
pub struct Coordinator {
    config: Config,
    fetcher: Fetcher,
}

impl Coordinator {
    /// Creates a new coordinator instance
    ///
    /// # Arguments
    ///
    /// * `config` - The run configuration, validated here
    ///
    /// # Returns
    ///
    /// * `Ok(Coordinator)` - Ready to run
    /// * `Err(SumiError::Config)` - The configuration is out of range
    /// * `Err(SumiError::Client)` - The HTTP client could not be built
    pub fn new(config: Config) -> Result<Self, SumiError> {
        validate(&config)?;
        let fetcher = Fetcher::new(&config)?;
        Ok(Self { config, fetcher })
    }

    /// Fetches every input and prints records to stdout
    pub async fn run(&self, inputs: &[String]) -> Result<RunSummary, SumiError> {
        let (summary, _) = self.run_with_output(inputs, std::io::stdout()).await?;
        Ok(summary)
    }

    /// Fetches every input and prints records to `out`
    ///
    /// # Protocol
    ///
    /// 1. Create the result channel and start the reporter
    /// 2. For each input: parse it into a target, register it with the
    ///    tracker, and spawn its dispatcher (invalid inputs are logged and
    ///    never counted)
    /// 3. Wait for the tracker to reach zero
    /// 4. Drop the coordinator's sender; with every dispatcher gone this
    ///    closes the channel
    /// 5. Wait for the reporter's completion signal
    ///
    /// Per-target failures never surface here. The only errors are a
    /// reporter that dies before signalling completion.
    ///
    /// # Returns
    ///
    /// The run summary and the writer handed back by the reporter
    pub async fn run_with_output<W>(
        &self,
        inputs: &[String],
        out: W,
    ) -> Result<(RunSummary, W), SumiError>
    where
        W: Write + Send + 'static,
    {
        let (results_tx, results_rx) = mpsc::channel(self.config.fetch.result_buffer);
        let (reporter, reporter_done) = spawn_reporter(out, results_rx);

        let tracker = PendingTracker::new();
        let output_dir = Path::new(&self.config.output.directory);
        let mut summary = RunSummary::default();
        let mut handles = Vec::with_capacity(inputs.len());

        for input in inputs {
            let target = match Target::parse(input, output_dir) {
                Ok(target) => target,
                Err(e) => {
                    tracing::error!("Invalid url: {}", e);
                    summary.rejected += 1;
                    continue;
                }
            };

            tracing::debug!(
                "Dispatching {} -> {}",
                target.url(),
                target.filename().display()
            );

            let guard = tracker.add();
            let fetcher = self.fetcher.clone();
            let results = results_tx.clone();
            handles.push(tokio::spawn(async move {
                let _guard = guard;
                dispatch(fetcher, target, results).await
            }));
        }

        summary.dispatched = handles.len();
        tracing::info!(
            "Dispatched {} targets ({} rejected)",
            summary.dispatched,
            summary.rejected
        );

        tracker.wait().await;
        drop(results_tx);

        // Every task has already exited; joining only collects its outcome
        for handle in handles {
            match handle.await {
                Ok(state) if state.is_success() => summary.succeeded += 1,
                Ok(_) => summary.failed += 1,
                Err(e) => {
                    tracing::error!("Dispatcher task panicked: {}", e);
                    summary.failed += 1;
                }
            }
        }

        summary.reported = reporter_done.await.map_err(|_| {
            SumiError::Reporter("reporter exited without signalling completion".to_string())
        })?;

        let out = reporter
            .await
            .map_err(|e| SumiError::Reporter(e.to_string()))?;

        tracing::info!(
            "Run finished: {} succeeded, {} failed, {} reported",
            summary.succeeded,
            summary.failed,
            summary.reported
        );

        Ok((summary, out))
    }
}

/// Runs a complete batch with the given configuration
///
/// # Example
///
/// ```no_run
/// use sumi_fetch::config::Config;
/// use sumi_fetch::crawler::run_batch;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let mut config = Config::default();
/// config.fetch.extract_metadata = true;
/// let summary = run_batch(config, &["https://example.com/".to_string()]).await?;
/// println!("{} pages fetched", summary.succeeded);
/// # Ok(())
/// # }
/// ```
pub async fn run_batch(config: Config, inputs: &[String]) -> Result<RunSummary, SumiError> {
    Coordinator::new(config)?.run(inputs).await
}
