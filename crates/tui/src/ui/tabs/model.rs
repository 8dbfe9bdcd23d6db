//! Model tab UI.

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};

use super::draw_placeholder;
use crate::app::App;
use crate::pipeline::{Analysis, MIN_OBSERVATIONS};

/// Draw the Model tab: the fit summary of the last pass.
pub fn draw_model_tab(frame: &mut Frame, area: Rect, app: &App) {
    const TITLE: &str = "ARIMA Model Training";

    let Some(pass) = &app.pass else {
        draw_placeholder(frame, area, TITLE, "Fetching prices...");
        return;
    };

    match &pass.analysis {
        Analysis::Forecast(report) => {
            let summary = Paragraph::new(report.summary.to_string())
                .style(Style::default().fg(Color::White))
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .title(format!(" {TITLE} ")),
                );
            frame.render_widget(summary, area);
        }
        Analysis::Insufficient { count } => {
            let hint = format!("{count} closes; at least {MIN_OBSERVATIONS} are needed to fit");
            draw_placeholder(frame, area, TITLE, &hint);
        }
        Analysis::FitFailed(_) => draw_placeholder(frame, area, TITLE, "The model could not be fitted"),
        Analysis::Empty => draw_placeholder(frame, area, TITLE, "No data to fit"),
    }
}
