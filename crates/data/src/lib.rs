//! Price history for stockcast
//!
//! Retrieves daily closing prices from Yahoo Finance and shapes them into a
//! [`PriceSeries`]: dated, chronologically ordered, one close per date.
//!
//! # Example
//!
//! ```rust,no_run
//! use data::{CachedSource, DataSource, FetchRequest, YahooFinance};
//!
//! let source = CachedSource::new(YahooFinance::new());
//! let request = FetchRequest::parse("AAPL", "2024-01-01", "2024-12-01").unwrap();
//! let series = source.fetch_closes(&request).unwrap();
//! println!("Got {} closes for {}", series.len(), series.symbol);
//! ```

mod cache;
mod error;
mod model;
mod request;
mod source;
pub mod yahoo;

pub use cache::CachedSource;
pub use error::{DataError, Result};
pub use model::{PricePoint, PriceSeries, Quote, SeriesStats};
pub use request::{FetchRequest, DATE_FORMAT};
pub use source::DataSource;
pub use yahoo::YahooFinance;
