//! Reusable widgets for the TUI.

mod chart;

pub use chart::{create_forecast_chart, create_price_chart, price_points, ForecastLines};
