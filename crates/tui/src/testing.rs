//! Offline data sources for unit tests.

use std::sync::atomic::{AtomicUsize, Ordering};

use chrono::{Datelike, NaiveDate, Weekday};
use data::{DataError, DataSource, FetchRequest, PricePoint, PriceSeries};

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn close_at(i: usize) -> f64 {
    let t = i as f64;
    150.0 + 0.2 * t + 3.0 * (t / 5.0).sin() + 1.5 * (t / 2.3).cos()
}

/// `count` weekday closes starting at `start`.
pub fn synthetic_series(symbol: &str, start: NaiveDate, count: usize) -> PriceSeries {
    let points = start
        .iter_days()
        .filter(|d| !matches!(d.weekday(), Weekday::Sat | Weekday::Sun))
        .take(count)
        .enumerate()
        .map(|(i, date)| PricePoint {
            date,
            close: close_at(i),
        })
        .collect();
    PriceSeries::from_points(symbol, points)
}

/// Answers any request with weekday closes in `[start, end)`.
#[derive(Default)]
pub struct SyntheticSource {
    calls: AtomicUsize,
}

impl SyntheticSource {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl DataSource for SyntheticSource {
    fn name(&self) -> &str {
        "synthetic"
    }

    fn fetch_closes(&self, request: &FetchRequest) -> data::Result<PriceSeries> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let days = (request.end - request.start).num_days().max(0) as usize;
        let series = synthetic_series(&request.symbol, request.start, days);
        let points = series
            .points()
            .iter()
            .copied()
            .filter(|p| p.date < request.end)
            .collect();
        Ok(PriceSeries::from_points(request.symbol.clone(), points))
    }
}

/// Every fetch fails.
pub struct FailingSource;

impl DataSource for FailingSource {
    fn name(&self) -> &str {
        "failing"
    }

    fn fetch_closes(&self, _request: &FetchRequest) -> data::Result<PriceSeries> {
        Err(DataError::RequestFailed("connection refused".to_string()))
    }
}
