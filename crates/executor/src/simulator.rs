use async_trait::async_trait;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use tokio::sync::mpsc::Sender;
use tokio::time::{self, Duration};
use tracing::{debug, info, warn};

use super::config::SimulatorConfig;
use super::error::Error;
use super::types::{PlanRequest, SnapshotStreamer};

/// Smallest maximum resource value a simulated snapshot can have.
const MIN_RESOURCE: f64 = 1.0;

/// Produces synthetic snapshots for exercising the planner.
///
/// Emits `batches` batches of `batch_size` randomized requests, one batch per
/// tick, then closes its side of the channel.
pub struct SimulatorStreamer {
    pub batches: usize,
    pub batch_size: usize,
    pub interval_ms: u64,
    pub max_resource: f64,
}

impl SimulatorStreamer {
    pub fn new(config: SimulatorConfig) -> Self {
        SimulatorStreamer {
            batches: config.batches,
            batch_size: config.batch_size,
            interval_ms: config.interval_ms.max(1),
            max_resource: config.max_resource.max(MIN_RESOURCE),
        }
    }

    fn random_request<R: Rng>(&self, rng: &mut R, id: u64) -> PlanRequest {
        let max = rng.random_range(MIN_RESOURCE..=self.max_resource);
        let current = rng.random_range(0.0..=max);
        let desired_gain = rng.random_range(0.0..=max);

        PlanRequest {
            id,
            resistance: rng.random_range(1.0..=100.0),
            growth_stat: rng.random_range(0.01..=1.0),
            global_multiplier: rng.random_range(0.5..=3.0),
            cores: Some(rng.random_range(1..=16u32) as f64),
            current,
            max,
            desired_gain,
        }
    }
}

#[async_trait]
impl SnapshotStreamer for SimulatorStreamer {
    /// Periodically generates batches of snapshots and sends them via `sender`.
    /// Backpressure comes from awaiting `sender.send()`.
    async fn run_stream(self, sender: Sender<Vec<PlanRequest>>) -> Result<(), Error> {
        let mut interval = time::interval(Duration::from_millis(self.interval_ms));
        let mut rng: SmallRng = SmallRng::from_os_rng();
        let mut next_id: u64 = 0;

        for batch_index in 0..self.batches {
            interval.tick().await;

            let requests: Vec<PlanRequest> = (0..self.batch_size)
                .map(|_| {
                    next_id += 1;
                    self.random_request(&mut rng, next_id)
                })
                .collect();

            debug!(batch_index, size = requests.len(), "Simulator sent batch");
            if sender.send(requests).await.is_err() {
                warn!("Simulator shutting down: planner receiver dropped.");
                return Err(Error::ChannelSendFailed);
            }
        }

        info!(batches = self.batches, "Simulator finished.");
        Ok(())
    }
}
