//! Footer bar widget with keyboard shortcuts.

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};

use crate::app::{App, InputMode};

/// Draw the footer bar with context-sensitive help.
pub fn draw_footer(frame: &mut Frame, area: Rect, app: &App) {
    let help_text = match app.input_mode {
        InputMode::Editing(field) => format!("Editing {} | Enter: Confirm | Esc: Cancel", field.label()),
        InputMode::Normal => "[t/s/e] Edit  [↑↓] Horizon  [r] Refetch  [x] Export  |  [1-3] Tab  [Tab/←→] Navigate  [q] Quit"
            .to_string(),
    };

    let display_text = if let Some((status, _)) = &app.status_message {
        format!("{} | {}", status, help_text)
    } else {
        help_text
    };

    let footer = Paragraph::new(display_text)
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::TOP));

    frame.render_widget(footer, area);
}
