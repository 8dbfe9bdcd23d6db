//! Header bar widget.

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};

use crate::app::App;

/// Draw the header bar with title and the active ticker.
pub fn draw_header(frame: &mut Frame, area: Rect, app: &App) {
    let mut spans = vec![Span::styled(
        format!("stockcast v{} - Stock Price Prediction", env!("CARGO_PKG_VERSION")),
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
    )];
    if app.refresh_pending {
        spans.push(Span::styled(
            format!("  Loading {}...", app.inputs.ticker),
            Style::default().fg(Color::Yellow),
        ));
    }

    let title = Paragraph::new(Line::from(spans))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::BOTTOM));

    frame.render_widget(title, area);
}
