//! Time series forecasting for stockcast
//!
//! The dashboard fits a single model family:
//!
//! - [`arima`]: AutoRegressive Integrated Moving Average with a fixed order
//! - [`summary`]: fit statistics and the coefficient table
//! - [`confidence`]: forecast intervals
//! - [`calendar`]: business-day dates for forecast steps
//!
//! ## Example
//!
//! ```rust
//! use algorithm::prelude::*;
//!
//! let data: Vec<f64> = (1..=60).map(|x| 100.0 + x as f64 + (x as f64 * 0.7).sin()).collect();
//! let mut model = Arima::with_order(Order::new(2, 1, 0)).unwrap();
//! model.fit(&data).unwrap();
//! let forecast = model.predict(3).unwrap();
//! assert_eq!(forecast.len(), 3);
//! ```

pub mod arima;
pub mod calendar;
pub mod confidence;
mod error;
mod linalg;
pub mod summary;

pub use error::{Result, TsError};

/// Common trait for time series predictors
pub trait Predictor {
    /// Fit the model to historical data
    fn fit(&mut self, data: &[f64]) -> Result<()>;

    /// Predict future values
    fn predict(&self, steps: usize) -> Result<Vec<f64>>;

    /// Check if the model has been fitted
    fn is_fitted(&self) -> bool;
}

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::arima::{Arima, Order};
    pub use crate::calendar::business_days_after;
    pub use crate::confidence::ForecastWithConfidence;
    pub use crate::summary::{Coefficient, ModelSummary};
    pub use crate::Predictor;
    pub use crate::{Result, TsError};
}
