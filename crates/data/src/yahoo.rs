//! Yahoo Finance data fetcher
//!
//! Fetches daily bars from the Yahoo Finance v8 chart API.
//!
//! # Example
//!
//! ```rust,no_run
//! use data::{FetchRequest, YahooFinance};
//!
//! let request = FetchRequest::parse("AAPL", "2024-01-01", "2024-12-01").unwrap();
//! let quotes = YahooFinance::new().fetch_quotes(&request).unwrap();
//! println!("Got {} bars", quotes.len());
//! ```

use std::time::Duration;

use chrono::{DateTime, NaiveDate, NaiveTime};
use serde::Deserialize;
use tracing::{debug, info};

use crate::error::{DataError, Result};
use crate::model::{PriceSeries, Quote};
use crate::request::FetchRequest;
use crate::source::DataSource;

/// Public chart endpoint.
pub const DEFAULT_BASE_URL: &str = "https://query1.finance.yahoo.com/v8/finance/chart";

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Deserialize)]
struct YahooResponse {
    chart: ChartResult,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    result: Option<Vec<ChartData>>,
    error: Option<YahooError>,
}

#[derive(Debug, Deserialize)]
struct YahooError {
    code: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct ChartData {
    meta: Option<ChartMeta>,
    #[serde(default)]
    timestamp: Vec<i64>,
    indicators: Indicators,
}

#[derive(Debug, Deserialize)]
struct ChartMeta {
    #[serde(default)]
    gmtoffset: i64,
}

#[derive(Debug, Deserialize)]
struct Indicators {
    quote: Vec<QuoteData>,
    adjclose: Option<Vec<AdjClose>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct QuoteData {
    open: Vec<Option<f64>>,
    high: Vec<Option<f64>>,
    low: Vec<Option<f64>>,
    close: Vec<Option<f64>>,
    volume: Vec<Option<u64>>,
}

#[derive(Debug, Deserialize)]
struct AdjClose {
    adjclose: Vec<Option<f64>>,
}

/// Yahoo Finance client
#[derive(Debug, Clone)]
pub struct YahooFinance {
    base_url: String,
}

impl Default for YahooFinance {
    fn default() -> Self {
        Self::new()
    }
}

impl YahooFinance {
    /// Create a client for the public endpoint.
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Create a client for another chart endpoint, e.g. a proxy or mirror.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Midnight UTC of `date` as a Unix timestamp.
    fn unix_midnight(date: NaiveDate) -> i64 {
        date.and_time(NaiveTime::MIN).and_utc().timestamp()
    }

    fn build_url(&self, request: &FetchRequest) -> String {
        format!(
            "{}/{}?period1={}&period2={}&interval=1d",
            self.base_url,
            request.symbol,
            Self::unix_midnight(request.start),
            Self::unix_midnight(request.end),
        )
    }

    /// Fetch daily bars, blocking the calling thread.
    pub fn fetch_quotes(&self, request: &FetchRequest) -> Result<Vec<Quote>> {
        let url = self.build_url(request);
        debug!(%url, "requesting chart");

        let client = reqwest::blocking::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| DataError::RequestFailed(e.to_string()))?;

        let response = client
            .get(&url)
            .send()
            .map_err(|e| DataError::RequestFailed(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .map_err(|e| DataError::RequestFailed(e.to_string()))?;

        // Yahoo reports unknown symbols as 404 with a chart error body, so
        // try the body before falling back to the status code.
        match Self::parse_response(&text) {
            Err(DataError::ParseError(_)) if !status.is_success() => Err(
                DataError::RequestFailed(format!("HTTP {} from {}", status, self.base_url)),
            ),
            other => other,
        }
    }

    /// Parse a chart API response into bars.
    ///
    /// Bars without a close are skipped. Missing open/high/low fall back to
    /// the close and a missing volume counts as zero.
    fn parse_response(json: &str) -> Result<Vec<Quote>> {
        let response: YahooResponse =
            serde_json::from_str(json).map_err(|e| DataError::ParseError(e.to_string()))?;

        if let Some(error) = response.chart.error {
            return Err(DataError::ApiError {
                code: error.code,
                description: error.description,
            });
        }

        let results = response.chart.result.ok_or(DataError::NoData)?;
        let data = results.first().ok_or(DataError::NoData)?;
        let quote_data = data.indicators.quote.first().ok_or(DataError::NoData)?;
        let adj_close_data = data.indicators.adjclose.as_ref().and_then(|a| a.first());
        let gmtoffset = data.meta.as_ref().map_or(0, |m| m.gmtoffset);

        let mut quotes = Vec::with_capacity(data.timestamp.len());

        for (i, &timestamp) in data.timestamp.iter().enumerate() {
            let Some(close) = quote_data.close.get(i).copied().flatten() else {
                continue;
            };
            let Some(date) = DateTime::from_timestamp(timestamp + gmtoffset, 0) else {
                return Err(DataError::ParseError(format!(
                    "timestamp out of range: {}",
                    timestamp
                )));
            };
            let field = |values: &[Option<f64>]| values.get(i).copied().flatten().unwrap_or(close);

            quotes.push(Quote {
                date: date.date_naive(),
                open: field(&quote_data.open[..]),
                high: field(&quote_data.high[..]),
                low: field(&quote_data.low[..]),
                close,
                adj_close: adj_close_data.map_or(close, |a| field(&a.adjclose[..])),
                volume: quote_data.volume.get(i).copied().flatten().unwrap_or(0),
            });
        }

        if quotes.is_empty() {
            return Err(DataError::NoData);
        }

        Ok(quotes)
    }
}

impl DataSource for YahooFinance {
    fn name(&self) -> &str {
        "Yahoo Finance"
    }

    fn fetch_closes(&self, request: &FetchRequest) -> Result<PriceSeries> {
        let quotes = self.fetch_quotes(request)?;
        let series = PriceSeries::from_quotes(request.symbol.clone(), &quotes);
        info!(
            symbol = %request.symbol,
            bars = quotes.len(),
            closes = series.len(),
            "fetched price history"
        );
        Ok(series)
    }
}
