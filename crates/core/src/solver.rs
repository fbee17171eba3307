use super::growth::calculate_gain;
use super::traits::GrowthSolver;
use common::numeric_kernel::lambert_w_log;
use common::types::ResourceState;

/// Fractional operation count that grows `current` by `desired_gain`.
///
/// The target is `clamp(current + desired_gain, 0, max)`. Without the cap the
/// growth equation is
///
/// ```text
/// target = rate^n · (current + n)
/// ```
///
/// which has no algebraic solution in `n`. With `r = ln(rate)` and
/// `u = r · (current + n)` it becomes `u · e^u = target · r · e^(current · r)`,
/// the defining equation of the Lambert W function. The right-hand side is
/// passed in log form,
///
/// ```text
/// log_x = ln(target · r) + current · r
/// n     = W(log_x) / r - current
/// ```
///
/// so large targets and large `current · r` never overflow.
///
/// # Returns
/// - `0` when `desired_gain <= 0` or the resource is already at `max`.
/// - `NaN` when `rate <= 1` (the model has no growth) or any input is `NaN`.
pub fn calculate_required_operations(
    current: f64,
    max: f64,
    desired_gain: f64,
    rate: f64,
) -> f64 {
    if current.is_nan() || max.is_nan() || desired_gain.is_nan() || !(rate > 1.0) {
        return f64::NAN;
    }
    if desired_gain <= 0.0 {
        return 0.0;
    }

    let target = (current + desired_gain).max(0.0).min(max);
    if target <= current {
        return 0.0;
    }

    let r = rate.ln();
    let log_x = (target * r).ln() + current * r;
    (lambert_w_log(log_x) / r - current).max(0.0)
}

/// Analytic solver backed by the log-domain Lambert W evaluation.
#[derive(Debug, Clone, Copy, Default)]
pub struct LambertSolver;

impl GrowthSolver for LambertSolver {
    fn gain(&self, state: ResourceState, rate: f64, operation_count: f64) -> f64 {
        calculate_gain(state.current, state.max, rate, operation_count)
    }

    fn required_operations(&self, state: ResourceState, desired_gain: f64, rate: f64) -> f64 {
        calculate_required_operations(state.current, state.max, desired_gain, rate)
    }
}
