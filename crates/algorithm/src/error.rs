//! Time series error types

use thiserror::Error;

/// Result type alias for algorithm operations
pub type Result<T> = std::result::Result<T, TsError>;

/// Errors that can occur during time series operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TsError {
    /// Insufficient data points for the operation
    #[error("Insufficient data: need at least {required} points, got {actual}")]
    InsufficientData { required: usize, actual: usize },

    /// Invalid parameter value
    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter { name: String, reason: String },

    /// Model has not been fitted yet
    #[error("Model must be fitted before prediction")]
    NotFitted,

    /// Numerical computation error
    #[error("Numerical error: {0}")]
    NumericalError(String),

    /// Invalid time series data
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insufficient_data_display() {
        let error = TsError::InsufficientData {
            required: 17,
            actual: 5,
        };
        assert_eq!(
            error.to_string(),
            "Insufficient data: need at least 17 points, got 5"
        );
    }

    #[test]
    fn test_invalid_parameter_display() {
        let error = TsError::InvalidParameter {
            name: "d".to_string(),
            reason: "Differencing order must be <= 2".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid parameter 'd': Differencing order must be <= 2"
        );
    }

    #[test]
    fn test_not_fitted_display() {
        assert_eq!(
            TsError::NotFitted.to_string(),
            "Model must be fitted before prediction"
        );
    }

    #[test]
    fn test_result_error_propagation() {
        fn inner_function() -> Result<i32> {
            Err(TsError::NotFitted)
        }

        fn outer_function() -> Result<i32> {
            inner_function()?;
            Ok(42)
        }

        assert_eq!(outer_function().unwrap_err(), TsError::NotFitted);
    }
}
