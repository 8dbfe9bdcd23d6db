//! stockcast - terminal dashboard for stock price forecasting.

mod app;
mod config;
mod event;
mod export;
mod logging;
mod pipeline;
mod report;
mod ui;
mod widgets;

#[cfg(test)]
mod testing;

use std::io;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use crossterm::{
    event::{Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use data::{CachedSource, DataSource, YahooFinance};
use ratatui::prelude::*;
use tracing::info;

use app::App;
use config::{Args, DashboardConfig};
use event::{handle_key_event, poll_event};
use ui::draw_ui;

fn main() -> anyhow::Result<()> {
    // Load .env file (optional - won't fail if missing)
    dotenvy::dotenv().ok();

    let args = Args::parse();
    let today = chrono::Local::now().date_naive();
    let config = DashboardConfig::from_args(args, today)?;

    if config.headless {
        logging::init_stderr()?;
    } else {
        logging::init_file(&config.log_file)?;
    }
    info!(
        ticker = %config.inputs.ticker,
        start = %config.inputs.start,
        end = %config.inputs.end,
        horizon = config.inputs.horizon,
        api_url = %config.api_url,
        "starting stockcast"
    );

    let source: Box<dyn DataSource> = Box::new(YahooFinance::with_base_url(config.api_url.as_str()));

    if config.headless {
        return run_headless(&config, source);
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(&config, source);

    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = result {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }

    Ok(())
}

/// One pass printed to stdout; exits non-zero when the pass shows an error.
fn run_headless(config: &DashboardConfig, source: Box<dyn DataSource>) -> anyhow::Result<()> {
    let source = CachedSource::new(source);
    let pass = pipeline::run(&source, &config.inputs);
    print!("{}", report::render(&pass));

    if let Some(path) = &config.export {
        export::write_svg(&pass, path)
            .with_context(|| format!("cannot export chart to {}", path.display()))?;
        println!("\nChart written to {}", path.display());
    }

    if pass.has_errors() {
        std::process::exit(1);
    }
    Ok(())
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> anyhow::Result<()> {
    let tick_rate = Duration::from_millis(100);

    loop {
        terminal.draw(|frame| draw_ui(frame, app))?;

        // Fetch after the loading indicator has been drawn
        if app.refresh_pending {
            app.refresh();
            continue;
        }

        app.clear_expired_status();

        if let Some(event) = poll_event(tick_rate)? {
            match event {
                Event::Key(key) if key.kind == KeyEventKind::Press => handle_key_event(app, key),
                Event::Resize(_, _) => {} // Terminal will redraw automatically
                _ => {}
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
