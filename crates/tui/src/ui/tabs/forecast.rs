//! Forecast tab UI.

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Row, Table},
};

use super::draw_placeholder;
use crate::app::App;
use crate::pipeline::ForecastReport;
use crate::widgets::{create_forecast_chart, ForecastLines};

const TITLE: &str = "Historical and Predicted Prices";

/// Draw the Forecast tab.
pub fn draw_forecast_tab(frame: &mut Frame, area: Rect, app: &App) {
    let Some(pass) = &app.pass else {
        draw_placeholder(frame, area, TITLE, "Fetching prices...");
        return;
    };
    let Some(report) = pass.analysis.report() else {
        draw_placeholder(frame, area, TITLE, "No forecast for the current inputs");
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(40),    // Chart
            Constraint::Length(48), // Forecast table
        ])
        .split(area);

    let lines = ForecastLines::new(&pass.series, report);
    let chart = create_forecast_chart(&lines, &pass.series, report);
    frame.render_widget(chart, chunks[0]);

    draw_forecast_table(frame, chunks[1], report);
}

fn draw_forecast_table(frame: &mut Frame, area: Rect, report: &ForecastReport) {
    let rows: Vec<Row> = report
        .points
        .iter()
        .map(|p| {
            Row::new(vec![
                p.date.to_string(),
                format!("{:.2}", p.value),
                format!("{:.2}", p.lower),
                format!("{:.2}", p.upper),
            ])
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(10),
            Constraint::Length(11),
            Constraint::Length(11),
            Constraint::Length(11),
        ],
    )
    .header(
        Row::new(vec!["Date", "Forecast", "Lower", "Upper"])
            .style(Style::default().add_modifier(Modifier::BOLD)),
    )
    .block(Block::default().borders(Borders::ALL).title(format!(
        " Predicted ({:.0}%) ",
        report.confidence_level * 100.0
    )));

    frame.render_widget(table, area);
}
