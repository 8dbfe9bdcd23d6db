//! Prices tab UI.

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph, Wrap},
};

use super::draw_placeholder;
use crate::app::App;
use crate::widgets::{create_price_chart, price_points};

/// Draw the Prices tab.
pub fn draw_prices_tab(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(10),   // Chart
            Constraint::Length(4), // Stats
        ])
        .split(area);

    draw_price_chart(frame, chunks[0], app);
    draw_stats(frame, chunks[1], app);
}

fn draw_price_chart(frame: &mut Frame, area: Rect, app: &App) {
    match &app.pass {
        Some(pass) if !pass.series.is_empty() => {
            let points = price_points(&pass.series);
            let chart = create_price_chart(&points, &pass.series);
            frame.render_widget(chart, area);
        }
        Some(_) => draw_placeholder(frame, area, "Closing Prices", "No closing prices to show"),
        None => draw_placeholder(frame, area, "Closing Prices", "Fetching prices..."),
    }
}

fn draw_stats(frame: &mut Frame, area: Rect, app: &App) {
    let text = match &app.pass {
        Some(pass) if !pass.series.is_empty() => {
            let s = pass.series.stats();
            let (first, last) = (pass.series.first(), pass.series.last());
            vec![
                Line::from(format!(
                    "{} to {}  ({} closes)",
                    first.map_or_else(String::new, |p| p.date.to_string()),
                    last.map_or_else(String::new, |p| p.date.to_string()),
                    s.count
                )),
                Line::from(format!(
                    "min={:.2}  max={:.2}  mean={:.2}  std={:.2}",
                    s.min, s.max, s.mean, s.std
                )),
            ]
        }
        _ => vec![Line::from("Stats: --")],
    };

    let stats = Paragraph::new(text)
        .wrap(Wrap { trim: true })
        .style(Style::default().fg(Color::Green))
        .block(Block::default().borders(Borders::ALL).title(" Statistics "));

    frame.render_widget(stats, area);
}
