//! Price data model.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single daily bar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    /// Trading date in the exchange's local calendar
    pub date: NaiveDate,
    /// Opening price
    pub open: f64,
    /// Highest price
    pub high: f64,
    /// Lowest price
    pub low: f64,
    /// Closing price
    pub close: f64,
    /// Adjusted closing price (for splits/dividends)
    pub adj_close: f64,
    /// Trading volume
    pub volume: u64,
}

/// One observation of a closing-price series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub close: f64,
}

/// Closing prices for one symbol, indexed by date.
///
/// Dates are strictly increasing and every close is finite. The only way to
/// build a non-empty series is [`PriceSeries::from_quotes`] or
/// [`PriceSeries::from_points`], both of which restore that ordering.
/// Deserialization goes through `from_points` as well.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "SeriesParts")]
pub struct PriceSeries {
    pub symbol: String,
    points: Vec<PricePoint>,
}

impl PriceSeries {
    /// An empty series for `symbol`.
    pub fn empty(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            points: Vec::new(),
        }
    }

    /// Build a series from raw bars.
    pub fn from_quotes(symbol: impl Into<String>, quotes: &[Quote]) -> Self {
        let points = quotes
            .iter()
            .map(|q| PricePoint {
                date: q.date,
                close: q.close,
            })
            .collect();
        Self::from_points(symbol, points)
    }

    /// Build a series from points in any order.
    ///
    /// Non-finite closes are dropped. When a date appears more than once the
    /// last occurrence wins.
    pub fn from_points(symbol: impl Into<String>, mut points: Vec<PricePoint>) -> Self {
        points.retain(|p| p.close.is_finite());
        // Stable sort keeps input order among equal dates.
        points.sort_by_key(|p| p.date);

        let mut deduped: Vec<PricePoint> = Vec::with_capacity(points.len());
        for point in points {
            match deduped.last_mut() {
                Some(last) if last.date == point.date => *last = point,
                _ => deduped.push(point),
            }
        }

        Self {
            symbol: symbol.into(),
            points: deduped,
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    /// Closing prices in date order.
    pub fn closes(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.close).collect()
    }

    /// Dates in ascending order.
    pub fn dates(&self) -> Vec<NaiveDate> {
        self.points.iter().map(|p| p.date).collect()
    }

    pub fn first(&self) -> Option<&PricePoint> {
        self.points.first()
    }

    pub fn last(&self) -> Option<&PricePoint> {
        self.points.last()
    }

    /// Summary statistics over the closes.
    pub fn stats(&self) -> SeriesStats {
        SeriesStats::calculate(&self.closes())
    }
}

#[derive(Deserialize)]
struct SeriesParts {
    symbol: String,
    points: Vec<PricePoint>,
}

impl From<SeriesParts> for PriceSeries {
    fn from(parts: SeriesParts) -> Self {
        Self::from_points(parts.symbol, parts.points)
    }
}

/// Statistics for a series of values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SeriesStats {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub std: f64,
    pub count: usize,
}

impl SeriesStats {
    pub fn calculate(data: &[f64]) -> Self {
        if data.is_empty() {
            return Self::default();
        }

        let count = data.len();
        let min = data.iter().cloned().fold(f64::INFINITY, f64::min);
        let max = data.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        let mean = data.iter().sum::<f64>() / count as f64;
        let variance = data.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / count as f64;

        Self {
            min,
            max,
            mean,
            std: variance.sqrt(),
            count,
        }
    }
}
