use tokio::sync::mpsc::{Receiver, Sender};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use super::config::ModelConfig;
use super::error::Error;
use super::types::{PlanRequest, PlanResult};
use common::error::Error as KernelError;
use common::types::{GrowthParameters, ResourceState};
use growth_solver_core::{GrowthPlanner, GrowthRequest};

/// Async worker that turns snapshot batches into growth plans.
///
/// Invalid or growthless snapshots are logged and skipped; they never stop
/// the pipeline.
pub struct Planner {
    receiver: Receiver<Vec<PlanRequest>>,
    sender: Sender<Vec<PlanResult>>,
    model: ModelConfig,
}

impl Planner {
    pub fn new(
        receiver: Receiver<Vec<PlanRequest>>,
        sender: Sender<Vec<PlanResult>>,
        model: ModelConfig,
    ) -> Self {
        Self {
            receiver,
            sender,
            model,
        }
    }

    /// Plans a single snapshot.
    ///
    /// With `model.clamp_parameters` set, out-of-range growth parameters are
    /// clamped instead of rejected; infinite values are rejected either way.
    ///
    /// # Errors
    /// `Error::InvalidSnapshot` if the snapshot fails validation and
    /// `Error::NoGrowth` if its per-operation rate does not exceed 1.
    pub fn plan(request: &PlanRequest, model: &ModelConfig) -> Result<PlanResult, Error> {
        let invalid = |source| Error::InvalidSnapshot {
            id: request.id,
            source,
        };

        let cores = request.cores.unwrap_or(model.default_cores);
        let checked = if model.clamp_parameters {
            let clamped = GrowthParameters::clamped(
                request.resistance,
                request.growth_stat,
                request.global_multiplier,
                cores,
                1.0,
            );
            GrowthParameters::new(
                clamped.resistance,
                clamped.base_growth_stat,
                clamped.global_multiplier,
                clamped.parallelism,
                clamped.operation_count,
            )
        } else {
            GrowthParameters::new(
                request.resistance,
                request.growth_stat,
                request.global_multiplier,
                cores,
                1.0,
            )
        };
        let params = checked.map_err(invalid)?;
        let state = ResourceState::new(request.current, request.max).map_err(invalid)?;
        if !request.desired_gain.is_finite() {
            return Err(invalid(KernelError::NonFiniteParameter {
                name: "desired_gain",
            }));
        }

        let planner = GrowthPlanner::new(params, state);
        let rate_per_operation = planner.rate_per_operation();
        if !(rate_per_operation > 1.0) {
            return Err(Error::NoGrowth(request.id));
        }

        let outcome = planner.outcome_for(GrowthRequest::Gain(request.desired_gain));
        let required_operations = outcome.value();
        let whole_operations = outcome
            .required_whole_operations()
            .unwrap_or(required_operations);

        Ok(PlanResult {
            id: request.id,
            rate_per_operation,
            required_operations,
            whole_operations,
            realized_gain: planner.gain(whole_operations),
            operations_to_saturate: planner.operations_to_saturate(),
            capped: request.desired_gain > state.headroom(),
        })
    }

    /// Consumes snapshot batches until the producer side closes, forwarding
    /// one result batch per input batch. Returns the number of plans produced.
    pub async fn process_requests(mut self) -> Result<usize, Error> {
        info!("Planner ready.");
        let mut planned = 0;
        let mut skipped = 0;

        while let Some(batch) = self.receiver.recv().await {
            let mut results = Vec::with_capacity(batch.len());

            for request in &batch {
                match Self::plan(request, &self.model) {
                    Ok(result) => results.push(result),
                    Err(e) => {
                        warn!(id = request.id, error = %e, "Skipping snapshot");
                        skipped += 1;
                    }
                }
            }

            debug!(planned = results.len(), "Planner finished batch");
            planned += results.len();

            if self.sender.send(results).await.is_err() {
                warn!("Planner shutting down: writer receiver dropped.");
                return Err(Error::ChannelSendFailed);
            }
        }

        info!(planned, skipped, "Snapshot stream closed, planner done.");
        Ok(planned)
    }

    pub fn spawn_task(self) -> JoinHandle<Result<usize, Error>> {
        tokio::spawn(self.process_requests())
    }
}
