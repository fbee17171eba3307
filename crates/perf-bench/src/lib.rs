// ----------------------------
// Solver benchmark fixtures
// ----------------------------

use growth_solver_core::projected_gain;

/// One inverse-growth query: grow `current` by `desired_gain` at `rate` per operation.
pub struct SolverQuery {
    pub current: f64,
    pub max: f64,
    pub desired_gain: f64,
    pub rate: f64,
}

pub const NUM_QUERIES: usize = 100_000;

/// Iterations of the bisection reference; enough to pin a count below 1e6 to ~1e-9.
pub const BISECTION_STEPS: usize = 64;

/// Generates a deterministic batch of solver queries.
///
/// Inputs vary slightly by index so the compiler cannot hoist the work out of
/// the benchmark loop.
pub fn generate_benchmark_queries() -> Vec<SolverQuery> {
    (0..NUM_QUERIES)
        .map(|i| {
            let t = i as f64 / NUM_QUERIES as f64;
            SolverQuery {
                current: 1_000.0 + 1e6 * t,
                max: 1e12,
                desired_gain: 5_000.0 + 1e7 * t,
                rate: 1.0005 + 0.005 * t,
            }
        })
        .collect()
}

/// Reference solver: bisection on the continuous gain curve.
///
/// The upper bracket doubles until it covers the target, so it works for any
/// `rate > 1`. Returns `NaN` for `rate <= 1` to match the analytic solver.
pub fn bisect_required_operations(current: f64, max: f64, desired_gain: f64, rate: f64) -> f64 {
    if !(rate > 1.0) {
        return f64::NAN;
    }
    let wanted = desired_gain.min(max - current);
    if wanted <= 0.0 {
        return 0.0;
    }

    let mut lo = 0.0;
    let mut hi = 1.0;
    while projected_gain(current, max, rate, hi) < wanted {
        hi *= 2.0;
    }

    for _ in 0..BISECTION_STEPS {
        let mid = 0.5 * (lo + hi);
        if projected_gain(current, max, rate, mid) < wanted {
            lo = mid;
        } else {
            hi = mid;
        }
    }
    hi
}

#[cfg(test)]
mod bench_fixture_tests {
    use super::*;
    use growth_solver_core::calculate_required_operations;

    #[test]
    fn bisection_agrees_with_analytic_solver() {
        for query in generate_benchmark_queries().iter().step_by(997) {
            let analytic = calculate_required_operations(
                query.current,
                query.max,
                query.desired_gain,
                query.rate,
            );
            let bisected =
                bisect_required_operations(query.current, query.max, query.desired_gain, query.rate);

            assert!(
                (analytic - bisected).abs() < 1e-6 * analytic.max(1.0),
                "analytic {} vs bisection {}",
                analytic,
                bisected
            );
        }
    }

    #[test]
    fn bisection_edge_cases() {
        assert!(bisect_required_operations(1.0, 10.0, 5.0, 1.0).is_nan());
        assert_eq!(bisect_required_operations(10.0, 10.0, 5.0, 1.01), 0.0);
        assert_eq!(bisect_required_operations(1.0, 10.0, -5.0, 1.01), 0.0);
    }
}
