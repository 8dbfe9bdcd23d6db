//! Application state management for the TUI.

use std::path::PathBuf;
use std::time::Instant;

use chrono::NaiveDate;
use data::{CachedSource, DataSource, DATE_FORMAT};
use tracing::{info, warn};

use crate::config::DashboardConfig;
use crate::export;
use crate::pipeline::{self, clamp_horizon, Inputs, Pass};

/// Seconds a status message stays in the footer.
const STATUS_TTL_SECS: u64 = 5;

/// Main application state.
pub struct App {
    /// Current active tab
    pub current_tab: Tab,
    /// Whether the app should quit
    pub should_quit: bool,
    pub input_mode: InputMode,
    /// Text typed into the field being edited
    pub edit_buffer: String,
    /// Committed inputs; the last pass was run with these
    pub inputs: Inputs,
    /// Output of the most recent pass
    pub pass: Option<Pass>,
    /// A pass is due before the next key is read
    pub refresh_pending: bool,
    /// Status message with expiry
    pub status_message: Option<(String, Instant)>,
    pub today: NaiveDate,
    export_path: Option<PathBuf>,
    source: CachedSource<Box<dyn DataSource>>,
}

impl App {
    pub fn new(config: &DashboardConfig, source: Box<dyn DataSource>) -> Self {
        Self {
            current_tab: Tab::default(),
            should_quit: false,
            input_mode: InputMode::Normal,
            edit_buffer: String::new(),
            inputs: config.inputs.clone(),
            pass: None,
            refresh_pending: true,
            status_message: None,
            today: config.today,
            export_path: config.export.clone(),
            source: CachedSource::new(source),
        }
    }

    /// Set a status message that will be displayed temporarily.
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some((message.into(), Instant::now()));
    }

    /// Clear expired status messages.
    pub fn clear_expired_status(&mut self) {
        if let Some((_, instant)) = &self.status_message {
            if instant.elapsed().as_secs() > STATUS_TTL_SECS {
                self.status_message = None;
            }
        }
    }

    pub fn next_tab(&mut self) {
        self.current_tab = self.current_tab.next();
    }

    pub fn previous_tab(&mut self) {
        self.current_tab = self.current_tab.previous();
    }

    /// Jump to a specific tab by number (1-3).
    pub fn goto_tab(&mut self, num: u8) {
        self.current_tab = Tab::from_num(num);
    }

    /// Run a pass with the committed inputs.
    pub fn refresh(&mut self) {
        self.refresh_pending = false;
        let pass = pipeline::run(&self.source, &self.inputs);
        info!(
            ticker = %self.inputs.ticker,
            closes = pass.series.len(),
            cached = self.cached_series(),
            "pass complete"
        );
        self.pass = Some(pass);
    }

    /// Drop cached prices and fetch again on the next tick.
    pub fn reload(&mut self) {
        self.source.clear();
        self.refresh_pending = true;
        self.set_status("Refetching prices...");
    }

    pub fn cached_series(&self) -> usize {
        self.source.len()
    }

    /// Start editing `field`, seeded with its current value.
    pub fn begin_edit(&mut self, field: Field) {
        self.edit_buffer = match field {
            Field::Ticker => self.inputs.ticker.clone(),
            Field::Start => self.inputs.start.format(DATE_FORMAT).to_string(),
            Field::End => self.inputs.end.format(DATE_FORMAT).to_string(),
        };
        self.input_mode = InputMode::Editing(field);
    }

    pub fn cancel_edit(&mut self) {
        self.input_mode = InputMode::Normal;
        self.edit_buffer.clear();
    }

    /// Apply the edit buffer to the field being edited.
    ///
    /// Invalid values are refused with a status message and the previous
    /// value is kept.
    pub fn commit_edit(&mut self) {
        let InputMode::Editing(field) = self.input_mode else {
            return;
        };
        let text = std::mem::take(&mut self.edit_buffer);
        self.input_mode = InputMode::Normal;

        let mut next = self.inputs.clone();
        match field {
            Field::Ticker => {
                let ticker = text.trim().to_uppercase();
                if ticker.is_empty() {
                    self.set_status("Ticker must not be empty");
                    return;
                }
                next.ticker = ticker;
            }
            Field::Start | Field::End => {
                let Ok(date) = NaiveDate::parse_from_str(text.trim(), DATE_FORMAT) else {
                    warn!(field = field.label(), value = %text, "rejected date input");
                    self.set_status(format!("{}: expected YYYY-MM-DD, got '{}'", field.label(), text));
                    return;
                };
                if field == Field::Start {
                    if date > self.today {
                        self.set_status(format!("Start date may not be after {}", self.today));
                        return;
                    }
                    next.start = date;
                } else {
                    next.end = date;
                }
            }
        }

        if next != self.inputs {
            self.inputs = next;
            self.refresh_pending = true;
        }
    }

    /// Move the horizon by `delta` business days within 1-30.
    pub fn adjust_horizon(&mut self, delta: isize) {
        let horizon = clamp_horizon(self.inputs.horizon.saturating_add_signed(delta));
        if horizon != self.inputs.horizon {
            self.inputs.horizon = horizon;
            self.refresh_pending = true;
        }
    }

    /// Where `x` writes the chart.
    pub fn export_path(&self) -> PathBuf {
        self.export_path
            .clone()
            .unwrap_or_else(|| PathBuf::from(format!("stockcast-{}.svg", self.inputs.ticker)))
    }

    /// Write the forecast chart of the last pass as SVG.
    pub fn export_chart(&mut self) {
        let Some(pass) = &self.pass else {
            self.set_status("Nothing to export yet");
            return;
        };
        let path = self.export_path();
        match export::write_svg(pass, &path) {
            Ok(()) => self.set_status(format!("Chart written to {}", path.display())),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "export failed");
                self.set_status(format!("Export failed: {e}"));
            }
        }
    }
}

/// Available tabs in the TUI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Prices,
    Model,
    Forecast,
}

impl Tab {
    pub fn next(self) -> Self {
        match self {
            Tab::Prices => Tab::Model,
            Tab::Model => Tab::Forecast,
            Tab::Forecast => Tab::Prices,
        }
    }

    pub fn previous(self) -> Self {
        match self {
            Tab::Prices => Tab::Forecast,
            Tab::Model => Tab::Prices,
            Tab::Forecast => Tab::Model,
        }
    }

    pub fn from_num(num: u8) -> Self {
        match num {
            2 => Tab::Model,
            3 => Tab::Forecast,
            _ => Tab::Prices,
        }
    }

    pub fn index(self) -> usize {
        match self {
            Tab::Prices => 0,
            Tab::Model => 1,
            Tab::Forecast => 2,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Tab::Prices => "Prices",
            Tab::Model => "Model",
            Tab::Forecast => "Forecast",
        }
    }

    pub fn all() -> &'static [Tab] {
        &[Tab::Prices, Tab::Model, Tab::Forecast]
    }
}

/// Sidebar inputs that take typed text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Ticker,
    Start,
    End,
}

impl Field {
    pub fn label(self) -> &'static str {
        match self {
            Field::Ticker => "Ticker",
            Field::Start => "Start date",
            Field::End => "End date",
        }
    }
}

/// Input mode for the TUI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Normal,
    Editing(Field),
}
