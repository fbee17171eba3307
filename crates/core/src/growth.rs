use common::types::GrowthParameters;

/// Base growth contributed per unit of inverse resistance: `base = 1 + 0.03 / resistance`.
pub const RESISTANCE_GROWTH_COEFF: f64 = 0.03;

/// Ceiling on the per-operation base growth, reached as resistance approaches zero.
pub const MAX_BASE_GROWTH: f64 = 1.0035;

/// Parallelism bonus is `(parallelism + CORE_BONUS_OFFSET) / CORE_BONUS_DIVISOR`.
pub const CORE_BONUS_OFFSET: f64 = 15.0;
pub const CORE_BONUS_DIVISOR: f64 = 16.0;

/// Multiplicative growth factor produced by `operation_count` operations.
///
/// ```text
/// base  = min(1 + 0.03 / resistance, 1.0035)
/// power = base_growth_stat · global_multiplier · (parallelism + 15) / 16
/// rate  = base ^ (power · operation_count)
/// ```
///
/// Since `rate(n) = rate(1)^n`, the single-operation factor is all the gain
/// calculator and the solver need.
///
/// `resistance` must be `> 0`; callers clamp it upstream (see
/// [`GrowthParameters::clamped`]). Any `NaN` argument yields `NaN`.
pub fn growth_percent(
    resistance: f64,
    base_growth_stat: f64,
    global_multiplier: f64,
    parallelism: f64,
    operation_count: f64,
) -> f64 {
    let inputs = [
        resistance,
        base_growth_stat,
        global_multiplier,
        parallelism,
        operation_count,
    ];
    if inputs.iter().any(|v| v.is_nan()) {
        return f64::NAN;
    }

    let base = (1.0 + RESISTANCE_GROWTH_COEFF / resistance).min(MAX_BASE_GROWTH);
    let core_bonus = (parallelism + CORE_BONUS_OFFSET) / CORE_BONUS_DIVISOR;
    let power = base_growth_stat * global_multiplier * core_bonus;
    base.powf(power * operation_count)
}

/// [`growth_percent`] over a parameter snapshot.
pub fn growth_rate(params: GrowthParameters) -> f64 {
    growth_percent(
        params.resistance,
        params.base_growth_stat,
        params.global_multiplier,
        params.parallelism,
        params.operation_count,
    )
}

/// Resource increase after `operation_count` operations at per-operation `rate`.
///
/// The count is floored to a whole, non-negative number before use. The grown
/// value `rate^n · (current + n)` is capped at `max`, so the result lies in
/// `[0, max - current]`. `NaN` inputs yield `NaN`.
pub fn calculate_gain(current: f64, max: f64, rate: f64, operation_count: f64) -> f64 {
    if operation_count.is_nan() {
        return f64::NAN;
    }
    projected_gain(current, max, rate, operation_count.floor().max(0.0))
}

/// Continuous counterpart of [`calculate_gain`]: the same capped growth
/// evaluated at a fractional operation count, without flooring.
///
/// This is the function [`crate::solver::calculate_required_operations`] inverts.
pub fn projected_gain(current: f64, max: f64, rate: f64, operation_count: f64) -> f64 {
    // `NaN.powf(0.0)` is 1, so a NaN rate must be caught before growing.
    if current.is_nan() || max.is_nan() || rate.is_nan() || operation_count.is_nan() {
        return f64::NAN;
    }
    let grown = rate.powf(operation_count) * (current + operation_count);
    if grown.is_nan() {
        return f64::NAN;
    }
    (grown.min(max) - current).max(0.0)
}

/// Recovers the growth-rate calibration implied by an empirical measurement.
///
/// `empirical_factor` is the measured operation count needed to multiply the
/// resource by `e` at unit scale, and `rate_at_unit_scale` is the model's
/// single-operation, single-core factor. The result is
/// `1 / (empirical_factor · ln(rate_at_unit_scale))`, which is `1` when the model
/// already matches the measurement.
///
/// A non-finite measurement means the measurement itself failed; the result is `NaN`.
pub fn estimate_rate_from_empirical(empirical_factor: f64, rate_at_unit_scale: f64) -> f64 {
    if !empirical_factor.is_finite() {
        return f64::NAN;
    }
    1.0 / (empirical_factor * rate_at_unit_scale.ln())
}
