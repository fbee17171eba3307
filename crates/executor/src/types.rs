use serde::{Deserialize, Serialize};
use tokio::sync::mpsc::Sender;

use super::error::Error;

/// A trait defining the contract for any source that produces snapshots
/// for the planning pipeline.
///
/// The trait bounds (`Send`, `Sync`, `'static`) are required so the
/// implementation can run as a task on the multi-threaded Tokio runtime.
#[async_trait::async_trait]
pub trait SnapshotStreamer: Send + Sync + 'static {
    async fn run_stream(self, sender: Sender<Vec<PlanRequest>>) -> Result<(), Error>;
}

/// Where snapshots come from.
#[derive(Debug, Clone, PartialEq)]
pub enum DataSource {
    Sim,
    Csv(String),
}

/// One snapshot handed in by an external collaborator, plus the gain it wants.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct PlanRequest {
    pub id: u64,
    pub resistance: f64,
    pub growth_stat: f64,
    pub global_multiplier: f64,
    /// Falls back to the configured default when absent.
    pub cores: Option<f64>,
    pub current: f64,
    pub max: f64,
    pub desired_gain: f64,
}

/// The planned growth for one snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PlanResult {
    pub id: u64,
    pub rate_per_operation: f64,
    /// Fractional operations solving the growth equation exactly.
    pub required_operations: f64,
    /// `required_operations` rounded up.
    pub whole_operations: f64,
    /// Gain actually produced by `whole_operations`.
    pub realized_gain: f64,
    /// Fractional operations needed to fill the resource to `max`.
    pub operations_to_saturate: f64,
    /// Whether the desired gain was capped by `max`.
    pub capped: bool,
}
