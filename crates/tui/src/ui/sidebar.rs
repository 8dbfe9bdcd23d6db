//! Sidebar with the dashboard inputs.

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph, Wrap},
};

use data::DATE_FORMAT;

use crate::app::{App, Field, InputMode};
use crate::pipeline::HORIZON_RANGE;

fn input_line<'a>(app: &'a App, field: Field, key: char, value: String) -> Vec<Line<'a>> {
    let editing = app.input_mode == InputMode::Editing(field);
    let value = if editing {
        Span::styled(
            format!("{}_", app.edit_buffer),
            Style::default().fg(Color::Black).bg(Color::Yellow),
        )
    } else {
        Span::styled(value, Style::default().fg(Color::White).add_modifier(Modifier::BOLD))
    };
    vec![
        Line::from(vec![
            Span::styled(format!("[{key}] "), Style::default().fg(Color::DarkGray)),
            Span::styled(field.label(), Style::default().fg(Color::Gray)),
        ]),
        Line::from(vec![Span::raw("    "), value]),
        Line::default(),
    ]
}

/// Draw the input sidebar.
pub fn draw_sidebar(frame: &mut Frame, area: Rect, app: &App) {
    let inputs = &app.inputs;
    let mut lines = Vec::new();
    lines.extend(input_line(app, Field::Ticker, 't', inputs.ticker.clone()));
    lines.extend(input_line(
        app,
        Field::Start,
        's',
        inputs.start.format(DATE_FORMAT).to_string(),
    ));
    lines.extend(input_line(
        app,
        Field::End,
        'e',
        inputs.end.format(DATE_FORMAT).to_string(),
    ));

    let (lo, hi) = (*HORIZON_RANGE.start(), *HORIZON_RANGE.end());
    let filled = inputs.horizon.saturating_sub(lo);
    let slider = format!(
        "{}●{}",
        "─".repeat(filled / 2),
        "─".repeat((hi - lo - filled) / 2)
    );
    lines.push(Line::from(vec![
        Span::styled("[↑↓] ", Style::default().fg(Color::DarkGray)),
        Span::styled("Days to forecast", Style::default().fg(Color::Gray)),
    ]));
    lines.push(Line::from(vec![
        Span::raw(format!("    {lo} ")),
        Span::styled(slider, Style::default().fg(Color::Cyan)),
        Span::raw(format!(" {hi}")),
    ]));
    lines.push(Line::from(vec![
        Span::raw("    "),
        Span::styled(
            inputs.horizon.to_string(),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        ),
        Span::raw(" business days"),
    ]));

    let sidebar = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::ALL).title(" Inputs "));

    frame.render_widget(sidebar, area);
}
