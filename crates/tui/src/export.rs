//! SVG export of the historical and forecast chart.

use std::fmt::Display;
use std::path::Path;

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};
use plotters::prelude::*;
use thiserror::Error;
use tracing::info;

use crate::pipeline::Pass;

pub const CHART_SIZE: (u32, u32) = (1200, 700);

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("no closing prices to chart")]
    NoData,

    #[error("failed to draw chart: {0}")]
    Drawing(String),
}

fn drawing_error(e: impl Display) -> ExportError {
    ExportError::Drawing(e.to_string())
}

fn at_midnight(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

/// Draw the closes of `pass` and, when present, its forecast and interval
/// band to an SVG file at `path`.
pub fn write_svg(pass: &Pass, path: &Path) -> Result<(), ExportError> {
    let series = &pass.series;
    let (Some(first), Some(last)) = (series.first(), series.last()) else {
        return Err(ExportError::NoData);
    };
    let report = pass.analysis.report();

    let history: Vec<(DateTime<Utc>, f64)> = series
        .points()
        .iter()
        .map(|p| (at_midnight(p.date), p.close))
        .collect();

    let x_min = at_midnight(first.date);
    let x_max = report
        .and_then(|r| r.points.last())
        .map_or(at_midnight(last.date), |p| at_midnight(p.date))
        .max(x_min + Duration::days(1));

    let (lo, hi) = history
        .iter()
        .map(|p| p.1)
        .chain(
            report
                .into_iter()
                .flat_map(|r| r.points.iter().flat_map(|p| [p.lower, p.value, p.upper])),
        )
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });
    let padding = if hi > lo { (hi - lo) * 0.05 } else { 1.0 };

    {
        let root = SVGBackend::new(path, CHART_SIZE).into_drawing_area();
        root.fill(&WHITE).map_err(drawing_error)?;

        let mut chart = ChartBuilder::on(&root)
            .caption(
                format!("Historical and Predicted Prices for {}", series.symbol),
                ("sans-serif", 28).into_font(),
            )
            .margin(15)
            .x_label_area_size(40)
            .y_label_area_size(60)
            .build_cartesian_2d(x_min..x_max, (lo - padding)..(hi + padding))
            .map_err(drawing_error)?;

        chart
            .configure_mesh()
            .x_desc("Date")
            .y_desc("Price")
            .x_label_formatter(&|d: &DateTime<Utc>| d.format("%Y-%m-%d").to_string())
            .draw()
            .map_err(drawing_error)?;

        chart
            .draw_series(LineSeries::new(history.iter().copied(), &BLUE))
            .map_err(drawing_error)?
            .label("Historical")
            .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], BLUE));

        if let Some(report) = report {
            let band: Vec<(DateTime<Utc>, f64)> = report
                .points
                .iter()
                .map(|p| (at_midnight(p.date), p.upper))
                .chain(report.points.iter().rev().map(|p| (at_midnight(p.date), p.lower)))
                .collect();
            chart
                .draw_series(std::iter::once(Polygon::new(band, RED.mix(0.15).filled())))
                .map_err(drawing_error)?
                .label(format!("{:.0}% interval", report.confidence_level * 100.0))
                .legend(|(x, y)| Rectangle::new([(x, y - 5), (x + 20, y + 5)], RED.mix(0.15).filled()));

            let forecast = std::iter::once((at_midnight(last.date), last.close))
                .chain(report.points.iter().map(|p| (at_midnight(p.date), p.value)));
            chart
                .draw_series(LineSeries::new(forecast, &RED))
                .map_err(drawing_error)?
                .label("Forecast")
                .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], RED));
        }

        chart
            .configure_series_labels()
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()
            .map_err(drawing_error)?;

        root.present().map_err(drawing_error)?;
    }

    info!(path = %path.display(), symbol = %series.symbol, "chart exported");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::{run, Inputs};
    use crate::testing::{date, FailingSource, SyntheticSource};

    fn inputs(end: NaiveDate) -> Inputs {
        Inputs {
            ticker: "AAPL".to_string(),
            start: date(2024, 1, 1),
            end,
            horizon: 7,
        }
    }

    #[test]
    fn test_writes_forecast_chart() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("aapl.svg");
        let pass = run(&SyntheticSource::default(), &inputs(date(2024, 7, 1)));

        write_svg(&pass, &path).unwrap();

        let svg = std::fs::read_to_string(&path).unwrap();
        assert!(svg.contains("<svg"));
        assert!(svg.contains("Historical and Predicted Prices for AAPL"));
        assert!(svg.contains("Forecast"));
        assert!(svg.contains("95% interval"));
    }

    #[test]
    fn test_history_only_chart() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("short.svg");
        let pass = run(&SyntheticSource::default(), &inputs(date(2024, 1, 20)));
        assert!(pass.analysis.report().is_none());

        write_svg(&pass, &path).unwrap();

        let svg = std::fs::read_to_string(&path).unwrap();
        assert!(svg.contains("Historical"));
        assert!(!svg.contains("interval"));
    }

    #[test]
    fn test_empty_pass_is_refused() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("none.svg");
        let pass = run(&FailingSource, &inputs(date(2024, 7, 1)));

        assert!(matches!(write_svg(&pass, &path), Err(ExportError::NoData)));
        assert!(!path.exists());
    }
}
