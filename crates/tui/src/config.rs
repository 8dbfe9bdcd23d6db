//! Command-line and environment configuration.

use std::path::PathBuf;

use chrono::{Duration, NaiveDate};
use clap::Parser;
use data::DATE_FORMAT;
use thiserror::Error;

use crate::pipeline::{Inputs, DEFAULT_HORIZON, HORIZON_RANGE};

pub const DEFAULT_TICKER: &str = "AAPL";
/// Days of history shown when no start date is given.
pub const DEFAULT_LOOKBACK_DAYS: i64 = 365;
pub const DEFAULT_LOG_FILE: &str = "stockcast.log";

/// Stock price forecasting dashboard
#[derive(Debug, Parser)]
#[command(name = "stockcast", version, about)]
pub struct Args {
    /// Stock ticker to load on startup
    #[arg(short, long, env = "STOCKCAST_TICKER", default_value = DEFAULT_TICKER)]
    pub ticker: String,

    /// First date of the history window, YYYY-MM-DD [default: one year ago]
    #[arg(short, long, env = "STOCKCAST_START", value_parser = parse_date)]
    pub start: Option<NaiveDate>,

    /// End of the history window, exclusive, YYYY-MM-DD [default: today]
    #[arg(short, long, env = "STOCKCAST_END", value_parser = parse_date)]
    pub end: Option<NaiveDate>,

    /// Business days to forecast (1-30)
    #[arg(long, env = "STOCKCAST_HORIZON", default_value_t = DEFAULT_HORIZON, value_parser = parse_horizon)]
    pub horizon: usize,

    /// Chart API endpoint
    #[arg(long, env = "STOCKCAST_API_URL", default_value = data::yahoo::DEFAULT_BASE_URL)]
    pub api_url: String,

    /// Log file; the terminal UI owns stdout
    #[arg(long, env = "STOCKCAST_LOG_FILE", default_value = DEFAULT_LOG_FILE)]
    pub log_file: PathBuf,

    /// Print a text report instead of starting the terminal UI
    #[arg(long)]
    pub headless: bool,

    /// Write the forecast chart as SVG to PATH
    #[arg(long, value_name = "PATH")]
    pub export: Option<PathBuf>,
}

fn parse_date(value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT)
        .map_err(|_| format!("expected YYYY-MM-DD, got '{value}'"))
}

fn parse_horizon(value: &str) -> Result<usize, String> {
    let horizon: usize = value
        .trim()
        .parse()
        .map_err(|_| format!("'{value}' is not a number"))?;
    if HORIZON_RANGE.contains(&horizon) {
        Ok(horizon)
    } else {
        Err(format!(
            "must be between {} and {}",
            HORIZON_RANGE.start(),
            HORIZON_RANGE.end()
        ))
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("start date {start} is after today ({today})")]
    StartInFuture { start: NaiveDate, today: NaiveDate },

    #[error("ticker must not be empty")]
    EmptyTicker,
}

/// Validated startup configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardConfig {
    pub inputs: Inputs,
    pub api_url: String,
    pub log_file: PathBuf,
    pub headless: bool,
    pub export: Option<PathBuf>,
    /// Date the dashboard treats as today
    pub today: NaiveDate,
}

impl DashboardConfig {
    pub fn from_args(args: Args, today: NaiveDate) -> Result<Self, ConfigError> {
        let ticker = args.ticker.trim().to_uppercase();
        if ticker.is_empty() {
            return Err(ConfigError::EmptyTicker);
        }

        let start = args.start.unwrap_or_else(|| default_start(today));
        if start > today {
            return Err(ConfigError::StartInFuture { start, today });
        }

        Ok(Self {
            inputs: Inputs {
                ticker,
                start,
                end: args.end.unwrap_or(today),
                horizon: args.horizon,
            },
            api_url: args.api_url,
            log_file: args.log_file,
            headless: args.headless,
            export: args.export,
            today,
        })
    }
}

pub fn default_start(today: NaiveDate) -> NaiveDate {
    today - Duration::days(DEFAULT_LOOKBACK_DAYS)
}
