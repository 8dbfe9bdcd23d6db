//! Fetch request types.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{DataError, Result};

/// Date format accepted for request bounds.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Daily closes for `symbol` from `start` (inclusive) to `end` (exclusive).
///
/// Doubles as the cache key, so two requests compare equal exactly when they
/// would hit the provider with the same arguments.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FetchRequest {
    /// Stock symbol (e.g., "AAPL", "BRK-B")
    pub symbol: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl FetchRequest {
    /// Create a validated request.
    ///
    /// The symbol is trimmed and upper-cased.
    pub fn new(symbol: &str, start: NaiveDate, end: NaiveDate) -> Result<Self> {
        let symbol = symbol.trim().to_uppercase();
        if symbol.is_empty() {
            return Err(DataError::ConfigError("symbol is required".to_string()));
        }
        if start >= end {
            return Err(DataError::InvalidDate(format!(
                "start date {} must be before end date {}",
                start, end
            )));
        }

        Ok(Self { symbol, start, end })
    }

    /// Create a request from `YYYY-MM-DD` strings.
    pub fn parse(symbol: &str, start: &str, end: &str) -> Result<Self> {
        Self::new(symbol, parse_date(start)?, parse_date(end)?)
    }
}

fn parse_date(date: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(date.trim(), DATE_FORMAT)
        .map_err(|_| DataError::InvalidDate(format!("Expected YYYY-MM-DD, got: {}", date)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_new_normalizes_symbol() {
        let request = FetchRequest::new("  aapl ", date(2024, 1, 1), date(2024, 6, 1)).unwrap();
        assert_eq!(request.symbol, "AAPL");
    }

    #[test]
    fn test_new_rejects_empty_symbol() {
        let result = FetchRequest::new("   ", date(2024, 1, 1), date(2024, 6, 1));
        assert!(matches!(result, Err(DataError::ConfigError(_))));
    }

    #[test]
    fn test_new_rejects_inverted_range() {
        assert!(matches!(
            FetchRequest::new("AAPL", date(2024, 6, 1), date(2024, 1, 1)),
            Err(DataError::InvalidDate(_))
        ));
        assert!(matches!(
            FetchRequest::new("AAPL", date(2024, 6, 1), date(2024, 6, 1)),
            Err(DataError::InvalidDate(_))
        ));
    }

    #[test]
    fn test_parse() {
        let request = FetchRequest::parse("MSFT", "2024-01-01", "2024-12-31").unwrap();
        assert_eq!(request.start, date(2024, 1, 1));
        assert_eq!(request.end, date(2024, 12, 31));
    }

    #[test]
    fn test_parse_invalid_dates() {
        assert!(FetchRequest::parse("MSFT", "2024/01/01", "2024-12-31").is_err());
        assert!(FetchRequest::parse("MSFT", "2024-01-01", "2024-13-01").is_err());
        assert!(FetchRequest::parse("MSFT", "2023-02-29", "2024-01-01").is_err());
    }

    #[test]
    fn test_requests_hash_equal() {
        use std::collections::HashSet;
        let a = FetchRequest::parse("aapl", "2024-01-01", "2024-02-01").unwrap();
        let b = FetchRequest::parse("AAPL", "2024-01-01", "2024-02-01").unwrap();
        let set: HashSet<_> = [a, b].into_iter().collect();
        assert_eq!(set.len(), 1);
    }
}
