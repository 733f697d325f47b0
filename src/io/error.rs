//! Error types shared by the spline engine and the distribution estimator

use std::fmt;

/// Main error type for all spline and estimation operations
#[derive(Debug, Clone, PartialEq)]
pub enum SplineError {
    /// Input could not be read as points or samples
    InvalidFormat {
        /// Description of what's wrong with the input shape
        reason: String,
    },

    /// Configuration value validation failed
    InvalidArgument {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// Too few usable knots or samples at recompute time
    InsufficientData {
        /// Minimum number of distinct points needed
        required: usize,
        /// Number of points actually available
        available: usize,
    },

    /// Evaluation argument outside the fitted domain under strict domain checking
    OutOfDomain {
        /// Requested abscissa
        x: f64,
        /// Lower end of the fitted domain
        lower: f64,
        /// Upper end of the fitted domain
        upper: f64,
    },

    /// Tridiagonal elimination hit a zero pivot
    SingularSystem {
        /// Row at which the pivot vanished
        row: usize,
    },

    /// Internal consistency check failed while fitting the model
    ///
    /// Raised when the fitted curve is not well-formed for the requested
    /// tail treatment, for example a non-positive slope at the extreme knot.
    Logic {
        /// Name of the computation that failed
        operation: &'static str,
        /// Description of the failure
        reason: String,
    },
}

impl fmt::Display for SplineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidFormat { reason } => {
                write!(f, "Invalid input format: {reason}")
            }
            Self::InvalidArgument {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::InsufficientData {
                required,
                available,
            } => {
                write!(
                    f,
                    "Insufficient data: require >= {required} points, have {available}"
                )
            }
            Self::OutOfDomain { x, lower, upper } => {
                write!(f, "Argument {x} out of defined range ({lower}, {upper})")
            }
            Self::SingularSystem { row } => {
                write!(f, "Singular tridiagonal system: zero pivot at row {row}")
            }
            Self::Logic { operation, reason } => {
                write!(f, "Logic error in {operation}: {reason}")
            }
        }
    }
}

impl std::error::Error for SplineError {}

/// Convenience type alias for spline results
pub type Result<T> = std::result::Result<T, SplineError>;

/// Create an invalid format error
pub fn invalid_format(reason: &impl ToString) -> SplineError {
    SplineError::InvalidFormat {
        reason: reason.to_string(),
    }
}

/// Create an invalid argument error
pub fn invalid_argument(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> SplineError {
    SplineError::InvalidArgument {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create a logic error for a failed internal consistency check
pub fn logic_error(operation: &'static str, reason: &impl ToString) -> SplineError {
    SplineError::Logic {
        operation,
        reason: reason.to_string(),
    }
}

/// Check that a configuration value is finite
///
/// # Errors
///
/// Returns [`SplineError::InvalidArgument`] naming `parameter` if `value` is NaN or infinite
pub fn require_finite(parameter: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(invalid_argument(parameter, &value, &"must be finite"))
    }
}
