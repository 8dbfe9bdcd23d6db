//! Plain-text rendering of a pass for `--headless`.

use std::fmt;

use crate::pipeline::{Analysis, Pass, Severity};

/// Render the sections of the dashboard as text, in display order.
pub fn render(pass: &Pass) -> String {
    TextReport(pass).to_string()
}

/// Text form of a pass.
struct TextReport<'a>(pub &'a Pass);

fn heading(f: &mut fmt::Formatter<'_>, title: &str) -> fmt::Result {
    writeln!(f, "{title}")?;
    writeln!(f, "{}", "-".repeat(title.chars().count()))
}

impl fmt::Display for TextReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let pass = self.0;
        let inputs = &pass.inputs;
        writeln!(
            f,
            "Stock Price Prediction: {} from {} to {}, {} business day horizon",
            pass.series.symbol, inputs.start, inputs.end, inputs.horizon
        )?;
        writeln!(f)?;

        for message in pass.messages() {
            let tag = match message.severity {
                Severity::Error => "error",
                Severity::Warning => "warning",
            };
            writeln!(f, "{tag}: {}", message.text)?;
        }

        if pass.series.is_empty() {
            return Ok(());
        }

        heading(f, &format!("Closing Prices for {}", pass.series.symbol))?;
        let stats = pass.series.stats();
        if let (Some(first), Some(last)) = (pass.series.first(), pass.series.last()) {
            writeln!(f, "{} closes, {} to {}", stats.count, first.date, last.date)?;
            writeln!(f, "last close  {:.2}", last.close)?;
        }
        writeln!(
            f,
            "min {:.2}  max {:.2}  mean {:.2}  std {:.2}",
            stats.min, stats.max, stats.mean, stats.std
        )?;
        writeln!(f)?;

        let Analysis::Forecast(report) = &pass.analysis else {
            return Ok(());
        };

        heading(f, "ARIMA Model Training")?;
        writeln!(f, "{}", report.summary)?;
        writeln!(f)?;

        heading(
            f,
            &format!(
                "Predicted Stock Prices ({:.0}% interval)",
                report.confidence_level * 100.0
            ),
        )?;
        writeln!(f, "{:<12}{:>12}{:>12}{:>12}", "Date", "Forecast", "Lower", "Upper")?;
        for p in &report.points {
            writeln!(
                f,
                "{:<12}{:>12.2}{:>12.2}{:>12.2}",
                p.date.to_string(),
                p.value,
                p.lower,
                p.upper
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::{run, Inputs, EMPTY_DATA_MESSAGE};
    use crate::testing::{date, FailingSource, SyntheticSource};
    use chrono::NaiveDate;

    fn inputs(end: NaiveDate, horizon: usize) -> Inputs {
        Inputs {
            ticker: "AAPL".to_string(),
            start: date(2024, 1, 1),
            end,
            horizon,
        }
    }

    #[test]
    fn test_full_report() {
        let pass = run(&SyntheticSource::default(), &inputs(date(2024, 7, 1), 3));
        let text = render(&pass);

        assert!(text.contains("Closing Prices for AAPL"));
        assert!(text.contains("ARIMA(5, 2, 0) Model Results"));
        assert!(text.contains("Predicted Stock Prices (95% interval)"));
        assert!(!text.contains("error:"));

        let table_rows = text
            .lines()
            .skip_while(|l| !l.starts_with("Date"))
            .skip(1)
            .count();
        assert_eq!(table_rows, 3);
    }

    #[test]
    fn test_failed_fetch_report() {
        let pass = run(&FailingSource, &inputs(date(2024, 7, 1), 3));
        let text = render(&pass);

        assert!(text.contains("error: Error fetching data"));
        assert!(text.contains(&format!("error: {EMPTY_DATA_MESSAGE}")));
        assert!(!text.contains("Closing Prices"));
    }

    #[test]
    fn test_short_history_report() {
        let pass = run(&SyntheticSource::default(), &inputs(date(2024, 1, 20), 3));
        let text = render(&pass);

        assert!(text.contains("warning: Insufficient data"));
        assert!(text.contains("Closing Prices for AAPL"));
        assert!(!text.contains("Model Results"));
    }
}
