//! Chart widgets for price and forecast visualization.
//!
//! The x axis is calendar days since the first close, so weekends and
//! holidays show up as gaps rather than being squeezed out.

use chrono::NaiveDate;
use data::{PriceSeries, DATE_FORMAT};
use ratatui::{
    prelude::*,
    symbols::Marker,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType},
};

use crate::pipeline::{ForecastPoint, ForecastReport};

type Point = (f64, f64);

fn day_offset(origin: NaiveDate, date: NaiveDate) -> f64 {
    (date - origin).num_days() as f64
}

fn label(date: NaiveDate) -> Span<'static> {
    Span::raw(date.format(DATE_FORMAT).to_string())
}

/// Pad `[min, max]` by 5% of its span, or by 1.0 for a flat series.
fn padded_bounds(values: impl Iterator<Item = f64>) -> [f64; 2] {
    let (min, max) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });
    if !min.is_finite() || !max.is_finite() {
        return [0.0, 1.0];
    }
    let pad = if max > min { (max - min) * 0.05 } else { 1.0 };
    [min - pad, max + pad]
}

fn y_axis(title: &str, bounds: [f64; 2]) -> Axis<'static> {
    Axis::default()
        .title(title.to_string())
        .style(Style::default().fg(Color::Gray))
        .bounds(bounds)
        .labels(vec![
            Span::raw(format!("{:.1}", bounds[0])),
            Span::raw(format!("{:.1}", (bounds[0] + bounds[1]) / 2.0)),
            Span::raw(format!("{:.1}", bounds[1])),
        ])
}

/// Closing prices as chart points.
pub fn price_points(series: &PriceSeries) -> Vec<Point> {
    let Some(origin) = series.first().map(|p| p.date) else {
        return Vec::new();
    };
    series
        .points()
        .iter()
        .map(|p| (day_offset(origin, p.date), p.close))
        .collect()
}

/// Line chart of the historical closes.
pub fn create_price_chart<'a>(points: &'a [Point], series: &PriceSeries) -> Chart<'a> {
    let dataset = Dataset::default()
        .name("Close")
        .marker(Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(Color::Cyan))
        .data(points);

    let x_max = points.last().map_or(1.0, |p| p.0.max(1.0));
    let y_bounds = padded_bounds(points.iter().map(|p| p.1));

    let x_labels = match (series.first(), series.last()) {
        (Some(first), Some(last)) => {
            let mid = first.date + (last.date - first.date) / 2;
            vec![label(first.date), label(mid), label(last.date)]
        }
        _ => Vec::new(),
    };

    Chart::new(vec![dataset])
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" Closing Prices for {} ", series.symbol)),
        )
        .x_axis(
            Axis::default()
                .title("Date")
                .style(Style::default().fg(Color::Gray))
                .bounds([0.0, x_max])
                .labels(x_labels),
        )
        .y_axis(y_axis("Close", y_bounds))
}

/// Point sets for the combined historical and forecast chart.
#[derive(Debug, Clone, Default)]
pub struct ForecastLines {
    pub history: Vec<Point>,
    /// Starts at the last close so the two lines join
    pub forecast: Vec<Point>,
    pub lower: Vec<Point>,
    pub upper: Vec<Point>,
}

impl ForecastLines {
    pub fn new(series: &PriceSeries, report: &ForecastReport) -> Self {
        let history = price_points(series);
        let (Some(first), Some(last)) = (series.first(), series.last()) else {
            return Self::default();
        };
        let origin = first.date;
        let anchor = (day_offset(origin, last.date), last.close);

        let along = |pick: fn(&ForecastPoint) -> f64| -> Vec<Point> {
            report
                .points
                .iter()
                .map(|p| (day_offset(origin, p.date), pick(p)))
                .collect()
        };

        let mut forecast = vec![anchor];
        forecast.extend(along(|p| p.value));

        Self {
            history,
            forecast,
            lower: along(|p| p.lower),
            upper: along(|p| p.upper),
        }
    }

    fn x_max(&self) -> f64 {
        self.forecast
            .last()
            .or(self.history.last())
            .map_or(1.0, |p| p.0.max(1.0))
    }
}

/// Historical closes joined to the forecast, with interval lines.
pub fn create_forecast_chart<'a>(
    lines: &'a ForecastLines,
    series: &PriceSeries,
    report: &ForecastReport,
) -> Chart<'a> {
    let interval = format!("{:.0}% interval", report.confidence_level * 100.0);
    let datasets = vec![
        Dataset::default()
            .name("Historical")
            .marker(Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(Color::Cyan))
            .data(&lines.history),
        Dataset::default()
            .name("Forecast")
            .marker(Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(Color::Yellow))
            .data(&lines.forecast),
        Dataset::default()
            .name(interval)
            .marker(Marker::Dot)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(Color::DarkGray))
            .data(&lines.lower),
        Dataset::default()
            .marker(Marker::Dot)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(Color::DarkGray))
            .data(&lines.upper),
    ];

    let y_bounds = padded_bounds(
        lines
            .history
            .iter()
            .chain(&lines.forecast)
            .chain(&lines.lower)
            .chain(&lines.upper)
            .map(|p| p.1),
    );

    let x_labels = match (series.first(), series.last(), report.points.last()) {
        (Some(first), Some(last), Some(end)) => vec![
            label(first.date),
            Span::styled(
                last.date.format(DATE_FORMAT).to_string(),
                Style::default().fg(Color::Yellow),
            ),
            label(end.date),
        ],
        _ => Vec::new(),
    };

    Chart::new(datasets)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" Historical and Predicted Prices for {} ", series.symbol)),
        )
        .x_axis(
            Axis::default()
                .title("Date")
                .style(Style::default().fg(Color::Gray))
                .bounds([0.0, lines.x_max()])
                .labels(x_labels),
        )
        .y_axis(y_axis("Price", y_bounds))
}
