use super::error::Error;

/// Minimum resistance applied by [`GrowthParameters::clamped`].
pub const MIN_RESISTANCE: f64 = 1.0;

/// Inputs that determine one evaluation of the growth factor.
///
/// Fields:
/// - `resistance`: difficulty of growing the resource; must be `> 0`.
/// - `base_growth_stat`: intrinsic growth statistic of the resource.
/// - `global_multiplier`: environment-wide multiplier applied to growth.
/// - `parallelism`: number of cores the operations run on.
/// - `operation_count`: number of growth operations applied at once.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GrowthParameters {
    pub resistance: f64,
    pub base_growth_stat: f64,
    pub global_multiplier: f64,
    pub parallelism: f64,
    pub operation_count: f64,
}

impl GrowthParameters {
    /// Builds a validated parameter set.
    ///
    /// # Errors
    /// `Error::NonFiniteParameter` for `NaN`/infinite fields,
    /// `Error::InvalidResistance` if `resistance <= 0`, and
    /// `Error::NegativeParameter` for any other negative field.
    pub fn new(
        resistance: f64,
        base_growth_stat: f64,
        global_multiplier: f64,
        parallelism: f64,
        operation_count: f64,
    ) -> Result<Self, Error> {
        let fields = [
            ("resistance", resistance),
            ("base_growth_stat", base_growth_stat),
            ("global_multiplier", global_multiplier),
            ("parallelism", parallelism),
            ("operation_count", operation_count),
        ];

        for (name, value) in fields {
            if !value.is_finite() {
                return Err(Error::NonFiniteParameter { name });
            }
        }

        if resistance <= 0.0 {
            return Err(Error::InvalidResistance(resistance));
        }

        for &(name, value) in &fields[1..] {
            if value < 0.0 {
                return Err(Error::NegativeParameter { name, value });
            }
        }

        Ok(Self {
            resistance,
            base_growth_stat,
            global_multiplier,
            parallelism,
            operation_count,
        })
    }

    /// Builds a parameter set the way upstream snapshot readers do: resistance is
    /// raised to at least [`MIN_RESISTANCE`] and negative fields are zeroed.
    /// `NaN` fields take the same floor values.
    pub fn clamped(
        resistance: f64,
        base_growth_stat: f64,
        global_multiplier: f64,
        parallelism: f64,
        operation_count: f64,
    ) -> Self {
        Self {
            resistance: resistance.max(MIN_RESISTANCE),
            base_growth_stat: base_growth_stat.max(0.0),
            global_multiplier: global_multiplier.max(0.0),
            parallelism: parallelism.max(0.0),
            operation_count: operation_count.max(0.0),
        }
    }

    /// Builds parameters from a percentage growth statistic (e.g. `50` for 50%).
    ///
    /// The percentage is normalized by 100 and the environment growth-rate
    /// multiplier is folded together with the actor's own grow multiplier into
    /// `global_multiplier`. The operation count is 1.
    pub fn from_server_growth(
        server_growth_percent: f64,
        growth_rate_multiplier: f64,
        grow_multiplier: f64,
        resistance: f64,
        cores: f64,
    ) -> Result<Self, Error> {
        Self::new(
            resistance,
            server_growth_percent / 100.0,
            growth_rate_multiplier * grow_multiplier,
            cores,
            1.0,
        )
    }

    /// Same parameters with a different operation count.
    pub fn with_operation_count(self, operation_count: f64) -> Self {
        Self {
            operation_count,
            ..self
        }
    }

    /// Same parameters evaluated for a single operation.
    pub fn per_operation(self) -> Self {
        self.with_operation_count(1.0)
    }
}

/// The bounded quantity being grown. Growth results stay within `[0, max]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResourceState {
    pub current: f64,
    pub max: f64,
}

impl ResourceState {
    /// # Errors
    /// `Error::NonFiniteParameter` for `NaN`/infinite values and
    /// `Error::InvalidResourceBounds` unless `0 <= current <= max`.
    pub fn new(current: f64, max: f64) -> Result<Self, Error> {
        if !current.is_finite() {
            return Err(Error::NonFiniteParameter { name: "current" });
        }
        if !max.is_finite() {
            return Err(Error::NonFiniteParameter { name: "max" });
        }
        if current < 0.0 || current > max {
            return Err(Error::InvalidResourceBounds { current, max });
        }
        Ok(Self { current, max })
    }

    /// Room left before the resource saturates.
    pub fn headroom(&self) -> f64 {
        (self.max - self.current).max(0.0)
    }

    pub fn is_saturated(&self) -> bool {
        self.current >= self.max
    }
}

/// Result of a growth computation.
///
/// `Operations` is fractional on purpose; rounding policy belongs to the caller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GrowthOutcome {
    /// Increase in resource value, `0` when already saturated.
    Gain(f64),
    /// Real-valued number of operations, `>= 0`.
    Operations(f64),
}

impl GrowthOutcome {
    pub fn value(&self) -> f64 {
        match self {
            GrowthOutcome::Gain(v) | GrowthOutcome::Operations(v) => *v,
        }
    }

    /// Smallest whole operation count covering an `Operations` outcome.
    /// Returns `None` for gains.
    pub fn required_whole_operations(&self) -> Option<f64> {
        match self {
            GrowthOutcome::Operations(n) => Some(n.ceil()),
            GrowthOutcome::Gain(_) => None,
        }
    }
}

#[cfg(test)]
mod types_tests {
    use super::*;

    #[test]
    fn test_parameters_new_accepts_valid_input() {
        let params = GrowthParameters::new(1.0, 50.0, 1.0, 1.0, 1.0).unwrap();
        assert_eq!(params.resistance, 1.0);
        assert_eq!(params.base_growth_stat, 50.0);
    }

    #[test]
    fn test_parameters_new_rejects_non_positive_resistance() {
        assert_eq!(
            GrowthParameters::new(0.0, 50.0, 1.0, 1.0, 1.0),
            Err(Error::InvalidResistance(0.0))
        );
        assert_eq!(
            GrowthParameters::new(-3.0, 50.0, 1.0, 1.0, 1.0),
            Err(Error::InvalidResistance(-3.0))
        );
    }

    #[test]
    fn test_parameters_new_rejects_negative_fields() {
        let result = GrowthParameters::new(1.0, 50.0, 1.0, -2.0, 1.0);
        assert_eq!(
            result,
            Err(Error::NegativeParameter {
                name: "parallelism",
                value: -2.0
            })
        );
    }

    #[test]
    fn test_parameters_new_rejects_non_finite_fields() {
        let result = GrowthParameters::new(1.0, f64::NAN, 1.0, 1.0, 1.0);
        assert_eq!(
            result,
            Err(Error::NonFiniteParameter {
                name: "base_growth_stat"
            })
        );

        let result = GrowthParameters::new(f64::INFINITY, 1.0, 1.0, 1.0, 1.0);
        assert_eq!(
            result,
            Err(Error::NonFiniteParameter { name: "resistance" })
        );
    }

    #[test]
    fn test_parameters_clamped() {
        let params = GrowthParameters::clamped(0.0, -1.0, 2.0, -4.0, 3.0);
        assert_eq!(params.resistance, MIN_RESISTANCE);
        assert_eq!(params.base_growth_stat, 0.0);
        assert_eq!(params.global_multiplier, 2.0);
        assert_eq!(params.parallelism, 0.0);
        assert_eq!(params.operation_count, 3.0);
    }

    #[test]
    fn test_from_server_growth_normalizes_percentage() {
        let params = GrowthParameters::from_server_growth(50.0, 2.0, 1.5, 10.0, 4.0).unwrap();
        assert_eq!(params.base_growth_stat, 0.5);
        assert_eq!(params.global_multiplier, 3.0);
        assert_eq!(params.parallelism, 4.0);
        assert_eq!(params.operation_count, 1.0);
    }

    #[test]
    fn test_per_operation_resets_count() {
        let params = GrowthParameters::new(1.0, 50.0, 1.0, 1.0, 120.0).unwrap();
        assert_eq!(params.per_operation().operation_count, 1.0);
        assert_eq!(params.with_operation_count(7.0).operation_count, 7.0);
    }

    #[test]
    fn test_resource_state_bounds() {
        assert!(ResourceState::new(10.0, 100.0).is_ok());
        assert_eq!(
            ResourceState::new(200.0, 100.0),
            Err(Error::InvalidResourceBounds {
                current: 200.0,
                max: 100.0
            })
        );
        assert!(ResourceState::new(-1.0, 100.0).is_err());
        assert!(ResourceState::new(1.0, f64::INFINITY).is_err());
    }

    #[test]
    fn test_resource_state_headroom() {
        let state = ResourceState::new(40.0, 100.0).unwrap();
        assert_eq!(state.headroom(), 60.0);
        assert!(!state.is_saturated());

        let full = ResourceState::new(100.0, 100.0).unwrap();
        assert_eq!(full.headroom(), 0.0);
        assert!(full.is_saturated());
    }

    #[test]
    fn test_outcome_whole_operations() {
        let outcome = GrowthOutcome::Operations(647.03);
        assert_eq!(outcome.value(), 647.03);
        assert_eq!(outcome.required_whole_operations(), Some(648.0));
        assert_eq!(GrowthOutcome::Gain(12.0).required_whole_operations(), None);
    }

    #[test]
    fn test_error_display() {
        let err = Error::InvalidResistance(0.0);
        assert_eq!(err.to_string(), "Resistance must be greater than zero, got 0.");
    }
}
