//! Main layout for the TUI.

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph, Tabs, Wrap},
};

use super::footer::draw_footer;
use super::header::draw_header;
use super::sidebar::draw_sidebar;
use super::tabs::{draw_forecast_tab, draw_model_tab, draw_prices_tab};
use crate::app::{App, Tab};
use crate::pipeline::{Message, Severity};

const SIDEBAR_WIDTH: u16 = 30;

/// Draw the main UI layout.
pub fn draw_ui(frame: &mut Frame, app: &App) {
    let size = frame.area();

    // Header, body, footer
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Min(10),
            Constraint::Length(2),
        ])
        .split(size);

    draw_header(frame, rows[0], app);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(40)])
        .split(rows[1]);

    draw_sidebar(frame, columns[0], app);

    let messages = app.pass.as_ref().map(|p| p.messages()).unwrap_or_default();
    let main = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(messages_height(&messages, columns[1].width)),
            Constraint::Min(8),
        ])
        .split(columns[1]);

    draw_tab_bar(frame, main[0], app);
    draw_messages(frame, main[1], &messages);

    let content_area = main[2];
    match app.current_tab {
        Tab::Prices => draw_prices_tab(frame, content_area, app),
        Tab::Model => draw_model_tab(frame, content_area, app),
        Tab::Forecast => draw_forecast_tab(frame, content_area, app),
    }

    draw_footer(frame, rows[2], app);
}

fn severity_tag(severity: Severity) -> (&'static str, Color) {
    match severity {
        Severity::Error => ("Error: ", Color::Red),
        Severity::Warning => ("Warning: ", Color::Yellow),
    }
}

/// Rows the bordered messages panel needs at `width` once lines wrap.
fn messages_height(messages: &[Message], width: u16) -> u16 {
    if messages.is_empty() {
        return 0;
    }
    let inner = usize::from(width.saturating_sub(2)).max(1);
    let lines: usize = messages
        .iter()
        .map(|m| {
            let (tag, _) = severity_tag(m.severity);
            wrapped_line_count(&format!("{tag}{}", m.text), inner)
        })
        .sum();
    u16::try_from(lines + 2).unwrap_or(u16::MAX)
}

/// Lines `text` takes when greedily word-wrapped to `width` columns.
fn wrapped_line_count(text: &str, width: usize) -> usize {
    let mut lines = 1;
    let mut current = 0;
    for word in text.split_whitespace() {
        let len = word.chars().count();
        if current > 0 && current + 1 + len <= width {
            current += 1 + len;
            continue;
        }
        if current > 0 {
            lines += 1;
        }
        // Words wider than a line are broken across lines.
        lines += len.saturating_sub(1) / width;
        current = match len % width {
            0 if len > 0 => width,
            rest => rest,
        };
    }
    lines
}

/// Inline errors and warnings of the last pass.
fn draw_messages(frame: &mut Frame, area: Rect, messages: &[Message]) {
    if messages.is_empty() {
        return;
    }

    let lines: Vec<Line> = messages
        .iter()
        .map(|m| {
            let (tag, color) = severity_tag(m.severity);
            Line::from(vec![
                Span::styled(tag, Style::default().fg(color).add_modifier(Modifier::BOLD)),
                Span::styled(m.text.as_str(), Style::default().fg(color)),
            ])
        })
        .collect();

    let border = if messages.iter().any(|m| m.severity == Severity::Error) {
        Color::Red
    } else {
        Color::Yellow
    };
    let panel = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border)),
        );

    frame.render_widget(panel, area);
}

/// Draw the tab bar.
fn draw_tab_bar(frame: &mut Frame, area: Rect, app: &App) {
    let titles: Vec<Line> = Tab::all()
        .iter()
        .enumerate()
        .map(|(i, tab)| {
            let style = if *tab == app.current_tab {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            Line::from(format!(" {} {} ", i + 1, tab.name())).style(style)
        })
        .collect();

    let tabs = Tabs::new(titles)
        .block(Block::default().borders(Borders::ALL).title(" Tabs "))
        .select(app.current_tab.index())
        .style(Style::default().fg(Color::White))
        .highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .divider("|");

    frame.render_widget(tabs, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DashboardConfig;
    use crate::pipeline::Inputs;
    use crate::testing::{date, FailingSource, SyntheticSource};
    use data::DataSource;
    use ratatui::backend::TestBackend;
    use std::path::PathBuf;

    fn app_with(source: Box<dyn DataSource>, end: chrono::NaiveDate) -> App {
        let config = DashboardConfig {
            inputs: Inputs {
                ticker: "AAPL".to_string(),
                start: date(2024, 1, 1),
                end,
                horizon: 7,
            },
            api_url: String::new(),
            log_file: PathBuf::from("test.log"),
            headless: false,
            export: None,
            today: date(2024, 10, 18),
        };
        let mut app = App::new(&config, source);
        app.refresh();
        app
    }

    fn render(app: &App) -> String {
        render_sized(app, 140, 40)
    }

    fn render_sized(app: &App, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|frame| draw_ui(frame, app)).unwrap();
        let buffer = terminal.backend().buffer();
        buffer
            .content()
            .chunks(buffer.area.width as usize)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_every_tab_renders() {
        let mut app = app_with(Box::new(SyntheticSource::default()), date(2024, 7, 1));
        for tab in Tab::all() {
            app.current_tab = *tab;
            let screen = render(&app);
            assert!(screen.contains("Inputs"));
            assert!(!screen.contains("Error:"));
        }
    }

    #[test]
    fn test_fetch_error_is_shown_inline() {
        let app = app_with(Box::new(FailingSource), date(2024, 7, 1));
        let screen = render(&app);
        assert!(screen.contains("Error: Error fetching data"));
        assert!(screen.contains("Unable to fetch valid stock data"));
    }

    #[test]
    fn test_short_history_warns() {
        let app = app_with(Box::new(SyntheticSource::default()), date(2024, 1, 20));
        let screen = render(&app);
        assert!(screen.contains("Warning: Insufficient data"));
    }

    #[test]
    fn test_long_warning_wraps_without_clipping() {
        let mut app = app_with(Box::new(SyntheticSource::default()), date(2024, 1, 20));
        app.current_tab = Tab::Prices;
        let screen = render_sized(&app, 100, 30);
        assert!(screen.contains("Warning: Insufficient data"));
        assert!(screen.contains("different stock."));
    }

    #[test]
    fn test_both_errors_fit_in_narrow_terminal() {
        let app = app_with(Box::new(FailingSource), date(2024, 7, 1));
        let screen = render_sized(&app, 90, 30);
        assert!(screen.contains("Error fetching data"));
        assert!(screen.contains("date range."));
    }

    #[test]
    fn test_price_stats_fit_at_100_columns() {
        let app = app_with(Box::new(SyntheticSource::default()), date(2024, 7, 1));
        let screen = render_sized(&app, 100, 30);
        assert!(screen.contains("closes)"));
        assert!(screen.contains("std="));
    }

    #[test]
    fn test_wrapped_line_count() {
        assert_eq!(wrapped_line_count("short", 20), 1);
        assert_eq!(wrapped_line_count("aaaa bbbb cccc", 9), 2);
        assert_eq!(wrapped_line_count("aaaa bbbb cccc", 14), 1);
        assert_eq!(wrapped_line_count("abcdefghij", 4), 3);
        assert_eq!(wrapped_line_count("", 10), 1);
    }

    #[test]
    fn test_messages_height_grows_with_wrapping() {
        let warning = [Message::warning(crate::pipeline::INSUFFICIENT_DATA_MESSAGE)];
        assert_eq!(messages_height(&warning, 200), 3);
        assert_eq!(messages_height(&warning, 70), 4);
        assert_eq!(messages_height(&[], 70), 0);
    }
}
