//! Single consumer of the result channel
//!
//! The reporter prints one record per `Metadata` it receives, in arrival
//! order, until every sender is gone and the channel is drained. It then
//! fires its completion signal exactly once, carrying the number of records
//! printed.

use crate::output::Metadata;
use std::io::Write;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;

/// Prints metadata records to a writer
pub struct Reporter<W> {
    out: W,
    printed: usize,
}

impl<W: Write> Reporter<W> {
    pub fn new(out: W) -> Self {
        Self { out, printed: 0 }
    }

    /// Writes a single record
    ///
    /// A failed write is logged and the record is not counted.
    pub fn report(&mut self, meta: &Metadata) {
        match write!(self.out, "{}", meta) {
            Ok(()) => self.printed += 1,
            Err(e) => tracing::error!("Failed to print record for {}: {}", meta.host, e),
        }
    }

    /// Drains `results` until it is closed, then signals `done`
    ///
    /// Returns the writer so callers can inspect what was printed.
    pub async fn run(
        mut self,
        mut results: mpsc::Receiver<Metadata>,
        done: oneshot::Sender<usize>,
    ) -> W {
        while let Some(meta) = results.recv().await {
            self.report(&meta);
        }

        if let Err(e) = self.out.flush() {
            tracing::error!("Failed to flush report output: {}", e);
        }

        tracing::debug!("Result channel closed after {} records", self.printed);
        if done.send(self.printed).is_err() {
            tracing::debug!("Nobody is waiting for the reporter to finish");
        }

        self.out
    }
}

/// Starts a reporter task bound to `results`
///
/// # Returns
///
/// * The task handle, which yields the writer back
/// * The completion signal, which yields the number of records printed
pub fn spawn_reporter<W>(
    out: W,
    results: mpsc::Receiver<Metadata>,
) -> (JoinHandle<W>, oneshot::Receiver<usize>)
where
    W: Write + Send + 'static,
{
    let (done_tx, done_rx) = oneshot::channel();
    let handle = tokio::spawn(Reporter::new(out).run(results, done_tx));
    (handle, done_rx)
}
