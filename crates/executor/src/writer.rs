use std::io::Write;
use tokio::select;
use tokio::sync::{mpsc::Receiver, watch};
use tokio::task::JoinHandle;
use tracing::{debug, info};

use super::error::Error;
use super::types::PlanResult;

/// Async consumer that serializes plans as CSV rows.
pub struct Writer<W: Write> {
    receiver: Receiver<Vec<PlanResult>>,
    sink: csv::Writer<W>,
    shutdown: watch::Receiver<()>, // signal for graceful shutdown
}

impl<W> Writer<W>
where
    W: Write + Send + 'static,
{
    pub fn new(
        receiver: Receiver<Vec<PlanResult>>,
        sink: W,
        shutdown: watch::Receiver<()>,
    ) -> Self {
        Self {
            receiver,
            sink: csv::Writer::from_writer(sink),
            shutdown,
        }
    }

    /// Run the writer asynchronously.
    ///
    /// Writes every received batch and flushes after it, so partial output
    /// survives an interrupted run. Exits when the receiver is closed or the
    /// shutdown signal fires. Returns the number of rows written.
    pub async fn process_results(mut self) -> Result<usize, Error> {
        info!("Writer ready.");
        let mut written = 0;

        loop {
            select! {
                results = self.receiver.recv() => {
                    match results {
                        Some(results) => {
                            for result in &results {
                                self.sink.serialize(result)?;
                            }
                            self.sink.flush()?;
                            written += results.len();
                            debug!(rows = results.len(), "Plans written");
                        }
                        None => {
                            info!("Receiver closed, shutting down writer.");
                            break;
                        }
                    }
                }

                _ = self.shutdown.changed() => {
                    info!("Shutdown signal received, stopping writer.");
                    break;
                }
            }
        }

        self.sink.flush()?;
        Ok(written)
    }

    /// Spawns the writer onto the Tokio runtime, consuming it.
    pub fn spawn_task(self) -> JoinHandle<Result<usize, Error>> {
        tokio::spawn(self.process_results())
    }
}
