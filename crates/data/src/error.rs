//! Data error types.

use thiserror::Error;

/// Errors raised while requesting or decoding price history.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DataError {
    /// HTTP request failed
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// Failed to parse response
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Invalid date or date range
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    /// No data returned
    #[error("No data returned")]
    NoData,

    /// API error from data provider
    #[error("API error [{code}]: {description}")]
    ApiError { code: String, description: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for data operations.
pub type Result<T> = std::result::Result<T, DataError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_failed_error() {
        let error = DataError::RequestFailed("Connection timeout".to_string());
        assert_eq!(error.to_string(), "Request failed: Connection timeout");
    }

    #[test]
    fn test_invalid_date_error() {
        let error = DataError::InvalidDate("2024-13-45".to_string());
        assert_eq!(error.to_string(), "Invalid date: 2024-13-45");
    }

    #[test]
    fn test_no_data_error() {
        assert_eq!(DataError::NoData.to_string(), "No data returned");
    }

    #[test]
    fn test_api_error() {
        let error = DataError::ApiError {
            code: "Not Found".to_string(),
            description: "No data found, symbol may be delisted".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "API error [Not Found]: No data found, symbol may be delisted"
        );
    }

    #[test]
    fn test_error_is_std_error() {
        let error: Box<dyn std::error::Error> =
            Box::new(DataError::ConfigError("symbol is required".to_string()));
        assert_eq!(error.to_string(), "Configuration error: symbol is required");
    }
}
