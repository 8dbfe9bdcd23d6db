//! Tab-specific UI modules.

mod forecast;
mod model;
mod prices;

pub use forecast::draw_forecast_tab;
pub use model::draw_model_tab;
pub use prices::draw_prices_tab;

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};

/// Bordered panel with a centered grey hint.
fn draw_placeholder(frame: &mut Frame, area: Rect, title: &str, hint: &str) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {title} "))
        .style(Style::default().fg(Color::DarkGray));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let centered = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(45),
            Constraint::Length(1),
            Constraint::Percentage(45),
        ])
        .split(inner);
    let msg = Paragraph::new(hint.to_string())
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(msg, centered[1]);
}
