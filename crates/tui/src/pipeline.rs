//! One rendering pass: fetch, fit, forecast.
//!
//! Every input change re-runs [`run`] from scratch. Fetch and fit failures
//! never escape as errors; they become [`Message`]s shown next to the output.

use std::ops::RangeInclusive;

use algorithm::arima::{Arima, Order};
use algorithm::calendar::business_days_after;
use algorithm::summary::ModelSummary;
use algorithm::Predictor;
use chrono::NaiveDate;
use data::{DataSource, FetchRequest, PriceSeries};
use tracing::{info, warn};

/// Fewest closes the model is trained on.
pub const MIN_OBSERVATIONS: usize = 30;
/// Allowed forecast horizons, in business days.
pub const HORIZON_RANGE: RangeInclusive<usize> = 1..=30;
pub const DEFAULT_HORIZON: usize = 7;
pub const CONFIDENCE_LEVEL: f64 = 0.95;

pub const EMPTY_DATA_MESSAGE: &str =
    "Unable to fetch valid stock data. Please verify the stock ticker and date range.";
pub const INSUFFICIENT_DATA_MESSAGE: &str =
    "Insufficient data to train the model. Please choose a longer date range or different stock.";

/// Clamp a requested horizon into [`HORIZON_RANGE`].
pub fn clamp_horizon(horizon: usize) -> usize {
    horizon.clamp(*HORIZON_RANGE.start(), *HORIZON_RANGE.end())
}

/// User-controlled inputs of a pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Inputs {
    pub ticker: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub horizon: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

/// Inline message shown with the output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub severity: Severity,
    pub text: String,
}

impl Message {
    pub fn error(text: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            text: text.into(),
        }
    }

    pub fn warning(text: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            text: text.into(),
        }
    }
}

/// One forecast step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForecastPoint {
    pub date: NaiveDate,
    pub value: f64,
    pub lower: f64,
    pub upper: f64,
}

/// A fitted model and its forecast.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastReport {
    pub summary: ModelSummary,
    pub points: Vec<ForecastPoint>,
    pub confidence_level: f64,
}

/// What the model stage produced for a series.
#[derive(Debug, Clone, PartialEq)]
pub enum Analysis {
    /// Nothing to show
    Empty,
    /// Too few closes to fit; the model was skipped
    Insufficient { count: usize },
    /// Fit or forecast failed
    FitFailed(String),
    Forecast(ForecastReport),
}

impl Analysis {
    pub fn message(&self) -> Option<Message> {
        match self {
            Analysis::Empty => Some(Message::error(EMPTY_DATA_MESSAGE)),
            Analysis::Insufficient { .. } => Some(Message::warning(INSUFFICIENT_DATA_MESSAGE)),
            Analysis::FitFailed(reason) => Some(Message::error(reason.clone())),
            Analysis::Forecast(_) => None,
        }
    }

    pub fn report(&self) -> Option<&ForecastReport> {
        match self {
            Analysis::Forecast(report) => Some(report),
            _ => None,
        }
    }
}

/// Fit the dashboard model on `series` and forecast `horizon` business days.
pub fn analyze(series: &PriceSeries, horizon: usize) -> Analysis {
    if series.is_empty() {
        return Analysis::Empty;
    }
    if series.len() < MIN_OBSERVATIONS {
        warn!(symbol = %series.symbol, count = series.len(), "too few closes to fit");
        return Analysis::Insufficient {
            count: series.len(),
        };
    }

    let horizon = clamp_horizon(horizon);
    match fit_and_forecast(series, horizon) {
        Ok(report) => {
            info!(
                symbol = %series.symbol,
                order = %Order::DASHBOARD,
                horizon,
                "forecast ready"
            );
            Analysis::Forecast(report)
        }
        Err(reason) => {
            warn!(symbol = %series.symbol, %reason, "model stage failed");
            Analysis::FitFailed(reason)
        }
    }
}

fn fit_and_forecast(series: &PriceSeries, horizon: usize) -> Result<ForecastReport, String> {
    let closes = series.closes();
    let model = Arima::with_order(Order::DASHBOARD)
        .and_then(|mut m| m.fit(&closes).map(|_| m))
        .map_err(|e| format!("Model training failed: {e}"))?;

    let summary = model
        .summary()
        .map_err(|e| format!("Model training failed: {e}"))?;
    let forecast = model
        .predict_with_confidence(horizon, CONFIDENCE_LEVEL)
        .map_err(|e| format!("Forecast failed: {e}"))?;

    let last = series
        .last()
        .map(|p| p.date)
        .ok_or_else(|| "Forecast failed: no closes".to_string())?;
    let points = business_days_after(last, horizon)
        .into_iter()
        .zip(&forecast.forecast)
        .zip(forecast.lower.iter().zip(&forecast.upper))
        .map(|((date, &value), (&lower, &upper))| ForecastPoint {
            date,
            value,
            lower,
            upper,
        })
        .collect();

    Ok(ForecastReport {
        summary,
        points,
        confidence_level: forecast.confidence_level,
    })
}

/// Everything a rendering pass shows.
#[derive(Debug, Clone, PartialEq)]
pub struct Pass {
    pub inputs: Inputs,
    pub series: PriceSeries,
    /// Why the fetch failed, if it did
    pub fetch_error: Option<String>,
    pub analysis: Analysis,
}

impl Pass {
    /// Messages in display order: fetch problem first, then the model stage.
    pub fn messages(&self) -> Vec<Message> {
        self.fetch_error
            .iter()
            .map(|e| Message::error(format!("Error fetching data: {e}")))
            .chain(self.analysis.message())
            .collect()
    }

    pub fn has_errors(&self) -> bool {
        self.messages().iter().any(|m| m.severity == Severity::Error)
    }
}

/// Run one full pass against `source`.
pub fn run<S: DataSource + ?Sized>(source: &S, inputs: &Inputs) -> Pass {
    let fetched = FetchRequest::new(&inputs.ticker, inputs.start, inputs.end)
        .and_then(|request| source.fetch_closes(&request));

    let (series, fetch_error) = match fetched {
        Ok(series) => (series, None),
        Err(e) => {
            warn!(ticker = %inputs.ticker, error = %e, "fetch failed");
            (PriceSeries::empty(inputs.ticker.trim().to_uppercase()), Some(e.to_string()))
        }
    };

    let analysis = analyze(&series, inputs.horizon);
    Pass {
        inputs: inputs.clone(),
        series,
        fetch_error,
        analysis,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{date, synthetic_series, FailingSource, SyntheticSource};

    fn inputs(ticker: &str, start: NaiveDate, end: NaiveDate, horizon: usize) -> Inputs {
        Inputs {
            ticker: ticker.to_string(),
            start,
            end,
            horizon,
        }
    }

    #[test]
    fn test_empty_series_is_an_error() {
        let analysis = analyze(&PriceSeries::empty("AAPL"), 7);
        assert_eq!(analysis, Analysis::Empty);
        assert_eq!(analysis.message(), Some(Message::error(EMPTY_DATA_MESSAGE)));
    }

    #[test]
    fn test_short_series_warns_and_skips_fit() {
        let series = synthetic_series("AAPL", date(2024, 1, 1), 29);
        let analysis = analyze(&series, 7);
        assert_eq!(analysis, Analysis::Insufficient { count: 29 });
        assert_eq!(
            analysis.message().map(|m| m.severity),
            Some(Severity::Warning)
        );
        assert!(analysis.report().is_none());
    }

    #[test]
    fn test_thirty_closes_are_enough() {
        let series = synthetic_series("AAPL", date(2024, 1, 1), 30);
        let report = analyze(&series, 7).report().cloned().unwrap();
        assert_eq!(report.summary.nobs, 30);
        assert_eq!(report.points.len(), 7);
    }

    #[test]
    fn test_forecast_dates_follow_last_close() {
        let series = synthetic_series("AAPL", date(2024, 1, 1), 120);
        let last = series.last().unwrap().date;
        let report = analyze(&series, 10).report().cloned().unwrap();

        assert_eq!(report.points.len(), 10);
        assert!(report.points[0].date > last);
        assert!(report.points.windows(2).all(|w| w[0].date < w[1].date));
        assert!(report
            .points
            .iter()
            .all(|p| p.lower <= p.value && p.value <= p.upper));
        assert_eq!(report.confidence_level, CONFIDENCE_LEVEL);
    }

    #[test]
    fn test_horizon_is_clamped() {
        let series = synthetic_series("AAPL", date(2024, 1, 1), 60);
        assert_eq!(analyze(&series, 0).report().unwrap().points.len(), 1);
        assert_eq!(analyze(&series, 99).report().unwrap().points.len(), 30);
        assert_eq!(clamp_horizon(15), 15);
    }

    #[test]
    fn test_run_successful_pass() {
        let source = SyntheticSource::default();
        let pass = run(
            &source,
            &inputs("aapl", date(2024, 1, 1), date(2024, 7, 1), 5),
        );

        assert_eq!(pass.series.symbol, "AAPL");
        assert!(pass.fetch_error.is_none());
        assert!(pass.messages().is_empty());
        assert!(!pass.has_errors());
        assert_eq!(pass.analysis.report().unwrap().points.len(), 5);
    }

    #[test]
    fn test_run_fetch_failure_reports_both_messages() {
        let pass = run(
            &FailingSource,
            &inputs("AAPL", date(2024, 1, 1), date(2024, 7, 1), 5),
        );

        let messages = pass.messages();
        assert_eq!(messages.len(), 2);
        assert!(messages[0].text.starts_with("Error fetching data: "));
        assert_eq!(messages[1].text, EMPTY_DATA_MESSAGE);
        assert!(pass.has_errors());
    }

    #[test]
    fn test_run_rejects_inverted_range_without_fetching() {
        let source = SyntheticSource::default();
        let pass = run(
            &source,
            &inputs("AAPL", date(2024, 7, 1), date(2024, 1, 1), 5),
        );

        assert_eq!(source.calls(), 0);
        assert!(pass.fetch_error.unwrap().contains("must be before"));
        assert_eq!(pass.analysis, Analysis::Empty);
    }

    #[test]
    fn test_run_short_window_warns() {
        let source = SyntheticSource::default();
        let pass = run(
            &source,
            &inputs("AAPL", date(2024, 1, 1), date(2024, 1, 20), 5),
        );

        assert!(pass.series.len() < MIN_OBSERVATIONS);
        assert!(!pass.has_errors());
        assert_eq!(pass.messages()[0].severity, Severity::Warning);
    }
}
