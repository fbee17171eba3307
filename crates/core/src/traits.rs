use common::types::ResourceState;

/// Trait for solvers of the capped multiplicative-growth model.
///
/// `rate` is always the single-operation growth factor; implementations derive
/// the multi-operation factor from it.
pub trait GrowthSolver {
    /// Resource increase produced by `operation_count` operations
    /// (floored to a whole number).
    fn gain(&self, state: ResourceState, rate: f64, operation_count: f64) -> f64;

    /// Fractional number of operations needed to add `desired_gain`, capped at
    /// the state's maximum. Returns `NaN` when `rate <= 1`.
    fn required_operations(&self, state: ResourceState, desired_gain: f64, rate: f64) -> f64;
}
