use super::growth::growth_rate;
use super::solver::LambertSolver;
use super::traits::GrowthSolver;
use common::types::{GrowthOutcome, GrowthParameters, ResourceState};

/// What a caller wants to know about a snapshot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GrowthRequest {
    /// Gain produced by this many operations.
    Operations(f64),
    /// Operations needed for this gain.
    Gain(f64),
}

/// Binds a parameter snapshot and a resource state to a solver.
///
/// The per-operation rate is derived from the snapshot with the operation count
/// forced to one, so the snapshot's own `operation_count` does not leak into
/// either direction of the computation.
#[derive(Debug, Clone, Copy)]
pub struct GrowthPlanner<S = LambertSolver> {
    params: GrowthParameters,
    state: ResourceState,
    solver: S,
}

impl GrowthPlanner<LambertSolver> {
    pub fn new(params: GrowthParameters, state: ResourceState) -> Self {
        Self::with_solver(params, state, LambertSolver)
    }
}

impl<S> GrowthPlanner<S>
where
    S: GrowthSolver,
{
    pub fn with_solver(params: GrowthParameters, state: ResourceState, solver: S) -> Self {
        GrowthPlanner {
            params,
            state,
            solver,
        }
    }

    pub fn params(&self) -> GrowthParameters {
        self.params
    }

    pub fn state(&self) -> ResourceState {
        self.state
    }

    /// Growth factor of a single operation on the snapshot's cores.
    pub fn rate_per_operation(&self) -> f64 {
        growth_rate(self.params.per_operation())
    }

    /// Resource increase after `operation_count` operations.
    pub fn gain(&self, operation_count: f64) -> f64 {
        self.solver
            .gain(self.state, self.rate_per_operation(), operation_count)
    }

    /// Fractional operations needed to add `desired_gain`.
    pub fn required_operations(&self, desired_gain: f64) -> f64 {
        self.solver
            .required_operations(self.state, desired_gain, self.rate_per_operation())
    }

    /// Fractional operations needed to fill the resource up to its maximum.
    pub fn operations_to_saturate(&self) -> f64 {
        self.required_operations(self.state.headroom())
    }

    pub fn outcome_for(&self, request: GrowthRequest) -> GrowthOutcome {
        match request {
            GrowthRequest::Operations(n) => GrowthOutcome::Gain(self.gain(n)),
            GrowthRequest::Gain(g) => GrowthOutcome::Operations(self.required_operations(g)),
        }
    }
}
