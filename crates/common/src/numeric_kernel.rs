use std::f64::consts::E;

/// Rational approximation coefficient `a` of the principal-branch estimate
/// `W0(x) ≈ -1 + a · ln((1 + b·y) / (1 + c·ln(1 + y)))`, with `y = sqrt(1 + e·x)`.
pub const W_COEFF_A: f64 = 2.036;

/// Coefficient `b` of the rational approximation.
pub const W_COEFF_B: f64 = 1.1495613113577325;

/// Coefficient `c` of the rational approximation.
pub const W_COEFF_C: f64 = 0.4549574005654461;

/// `ln(W_COEFF_B)`, used by the log-domain evaluation.
pub const LN_W_COEFF_B: f64 = 0.13938040121300527;

/// `ln(W_COEFF_C)`, used by the log-domain evaluation.
pub const LN_W_COEFF_C: f64 = -0.7875514895451805;

/// Number of fixed-point correction passes applied to the initial estimate.
/// Three passes bring the rational approximation to full double precision.
pub const REFINEMENT_PASSES: usize = 3;

/// Computes `ln(1 + e^x)` (softplus) without overflow.
///
/// For `x <= 0` the exponential is bounded by one, so `ln_1p(e^x)` is safe and keeps
/// precision for very negative `x`. For `x > 0` a single reflection
/// `x + ln(1 + e^-x)` brings the exponent back into the safe range.
///
/// `NaN` propagates.
pub fn log1exp(x: f64) -> f64 {
    if x <= 0.0 {
        x.exp().ln_1p()
    } else {
        x + (-x).exp().ln_1p()
    }
}

/// Principal branch of the Lambert W function evaluated from `ln(x)`.
///
/// Returns `w` with `w · e^w = e^log_x`. Every intermediate stays in log space,
/// so `log_x` may describe values far beyond `f64::MAX` (e.g. `log_x = 1e6`).
/// A `log_x` of `-∞` stands for `x = 0`.
///
/// When the refinement breaks down at the extremes of the domain the result
/// saturates: `0` when `log_x + 1 < 0` (tiny `x`), `+∞` otherwise.
pub fn lambert_w_log(log_x: f64) -> f64 {
    if log_x.is_nan() {
        return f64::NAN;
    }

    let log_xe = log_x + 1.0;
    let log_y = 0.5 * log1exp(log_xe);
    let log_z = log1exp(log_y).ln();
    let log_n = log1exp(LN_W_COEFF_B + log_y);
    let log_d = log1exp(LN_W_COEFF_C + log_z);

    let mut w = -1.0 + W_COEFF_A * (log_n - log_d);
    for _ in 0..REFINEMENT_PASSES {
        w *= (log_xe - w.ln()) / (1.0 + w);
    }

    if w.is_nan() {
        if log_xe < 0.0 { 0.0 } else { f64::INFINITY }
    } else {
        w
    }
}

/// Principal branch of the Lambert W function, `W0(x)`, for `x >= -1/e`.
///
/// Non-negative `x` is delegated to [`lambert_w_log`], which is stable for large
/// arguments. The interval `[-1/e, 0)` uses the direct rational approximation,
/// which is the stable form near the branch point.
///
/// Returns `NaN` for `x < -1/e` and for `NaN` input.
pub fn lambert_w(x: f64) -> f64 {
    if x >= 0.0 {
        return lambert_w_log(x.ln());
    }

    let xe = x * E;
    if x.is_nan() || xe < -1.0 {
        return f64::NAN;
    }

    let y = (1.0 + xe).sqrt();
    let z = (y + 1.0).ln();
    let n = 1.0 + W_COEFF_B * y;
    let d = 1.0 + W_COEFF_C * z;

    let mut w = -1.0 + W_COEFF_A * (n / d).ln();
    for _ in 0..REFINEMENT_PASSES {
        w *= (xe / w).ln() / (1.0 + w);
    }

    if w.is_nan() {
        // End points: the branch point itself, or a vanishing argument.
        if xe < -0.5 { -1.0 } else { x }
    } else {
        w
    }
}

#[cfg(test)]
mod numerical_kernel_tests {
    use super::*;
    use std::f64::consts::LN_2;

    const TOLERANCE: f64 = 1e-9;

    // Helper to check for approximate equality.
    fn assert_approx_eq(a: f64, b: f64, tol: f64) {
        assert!(
            (a - b).abs() < tol,
            "{} is not approximately equal to {}",
            a,
            b
        );
    }

    #[test]
    fn test_log_coefficients_match_linear_ones() {
        assert_approx_eq(W_COEFF_B.ln(), LN_W_COEFF_B, 1e-15);
        assert_approx_eq(W_COEFF_C.ln(), LN_W_COEFF_C, 1e-15);
    }

    #[test]
    fn test_log1exp_at_zero() {
        assert_approx_eq(log1exp(0.0), LN_2, 1e-15);
    }

    /// Large positive input must not overflow; the result tends to `x`.
    #[test]
    fn test_log1exp_large_positive() {
        let result = log1exp(1000.0);
        assert!(result.is_finite());
        assert_approx_eq(result, 1000.0, TOLERANCE);

        assert!(log1exp(f64::MAX.ln()).is_finite());
        assert_eq!(log1exp(1e308), 1e308);
    }

    #[test]
    fn test_log1exp_large_negative() {
        assert_approx_eq(log1exp(-1000.0), 0.0, TOLERANCE);

        // ln(1 + e^-40) ≈ e^-40; the relative error must stay tiny.
        let tiny = log1exp(-40.0);
        assert!(((tiny - (-40.0f64).exp()) / tiny).abs() < 1e-12);
    }

    #[test]
    fn test_log1exp_reflection_identity() {
        for x in [0.5, 3.0, 17.25, 250.0] {
            assert_approx_eq(log1exp(x), x + log1exp(-x), 1e-12);
        }
    }

    #[test]
    fn test_log1exp_nan() {
        assert!(log1exp(f64::NAN).is_nan());
    }

    #[test]
    fn test_lambert_w_zero() {
        assert_eq!(lambert_w(0.0), 0.0);
    }

    #[test]
    fn test_lambert_w_at_e() {
        assert_approx_eq(lambert_w(E), 1.0, TOLERANCE);
    }

    /// Omega constant: W(1) = 0.567143290409783872999...
    #[test]
    fn test_lambert_w_omega_constant() {
        assert_approx_eq(lambert_w(1.0), 0.567_143_290_409_783_8, 1e-12);
    }

    #[test]
    fn test_lambert_w_negative_branch() {
        let x = -0.2;
        let w = lambert_w(x);
        assert_approx_eq(w, -0.259_171_101_819_073_7, 1e-12);
        assert_approx_eq(w * w.exp(), x, 1e-12);
    }

    #[test]
    fn test_lambert_w_branch_point() {
        assert_approx_eq(lambert_w(-1.0 / E), -1.0, 1e-6);
    }

    #[test]
    fn test_lambert_w_tiny_negative_tracks_x() {
        let x = -1e-10;
        assert_approx_eq(lambert_w(x), x, 1e-18);
    }

    #[test]
    fn test_lambert_w_outside_domain_is_nan() {
        assert!(lambert_w(-0.5).is_nan());
        assert!(lambert_w(-1.0).is_nan());
        assert!(lambert_w(f64::NEG_INFINITY).is_nan());
        assert!(lambert_w(f64::NAN).is_nan());
    }

    #[test]
    fn test_lambert_w_log_astronomical_argument() {
        // x = e^1e6 is far beyond f64::MAX, but W stays representable.
        let log_x = 1e6;
        let w = lambert_w_log(log_x);
        assert!(w.is_finite());
        assert_approx_eq(w.ln() + w, log_x, 1e-6);
    }

    #[test]
    fn test_lambert_w_log_end_points() {
        assert_eq!(lambert_w_log(f64::NEG_INFINITY), 0.0);
        assert_eq!(lambert_w_log(-800.0), 0.0);
        assert_eq!(lambert_w_log(f64::INFINITY), f64::INFINITY);
        assert!(lambert_w_log(f64::NAN).is_nan());
    }

    #[test]
    fn test_lambert_w_large_argument() {
        let x = 1e300;
        let w = lambert_w(x);
        assert_approx_eq(w.ln() + w, x.ln(), 1e-9);
        assert_eq!(w, lambert_w_log(x.ln()));
    }
}
