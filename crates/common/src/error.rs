use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Resistance must be strictly positive; the growth model divides by it.
    InvalidResistance(f64),

    /// A parameter that must be non-negative was negative.
    NegativeParameter { name: &'static str, value: f64 },

    /// A parameter was `NaN` or infinite.
    NonFiniteParameter { name: &'static str },

    /// The resource state violates `0 <= current <= max`.
    InvalidResourceBounds { current: f64, max: f64 },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::InvalidResistance(r) => {
                write!(f, "Resistance must be greater than zero, got {}.", r)
            }

            Error::NegativeParameter { name, value } => {
                write!(f, "Parameter '{}' must be non-negative, got {}.", name, value)
            }

            Error::NonFiniteParameter { name } => {
                write!(f, "Parameter '{}' must be a finite number.", name)
            }

            Error::InvalidResourceBounds { current, max } => write!(
                f,
                "Resource state is invalid: current {} must lie within [0, {}].",
                current, max
            ),
        }
    }
}

impl std::error::Error for Error {}
