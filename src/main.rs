//! Results board - live game results and monthly chart in the terminal
//!
//! Fetches results and the monthly chart from an origin, falls back to
//! simulated data when it is unreachable, and refreshes in the background.

use std::io;
use std::panic;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::warn;

use resultboard::app::{App, AppState};
use resultboard::board::Board;
use resultboard::cli::{Cli, StartupConfig};
use resultboard::clock::{Clock, SystemClock, Zone};
use resultboard::data::ResultFetcher;
use resultboard::logging::{self, LogTarget};
use resultboard::refresh::{self, RefreshHandle, UpdateLoop};
use resultboard::ui;

/// Sets up a panic hook that restores the terminal before printing the panic message.
fn setup_panic_hook() {
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));
}

/// Renders the UI based on the current application state
fn render_ui(frame: &mut ratatui::Frame, app: &App) {
    match app.state {
        AppState::Loading => render_loading(frame),
        AppState::Results => ui::render_results_view(frame, app),
        AppState::Chart => ui::render_chart_view(frame, app),
    }

    if app.show_help {
        ui::render_help_overlay(frame);
    }
}

/// Renders a loading message until the first cycle completes
fn render_loading(frame: &mut ratatui::Frame) {
    use ratatui::{
        layout::{Alignment, Constraint, Direction, Layout},
        style::{Color, Style},
        widgets::Paragraph,
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(45),
            Constraint::Length(3),
            Constraint::Percentage(45),
        ])
        .split(frame.area());

    let loading_text = Paragraph::new("Fetching results...")
        .style(Style::default().fg(Color::Cyan))
        .alignment(Alignment::Center);

    frame.render_widget(loading_text, chunks[1]);
}

/// Seeds the board from `--page` or from the catalog
fn initial_board(
    config: &StartupConfig,
    clock: &dyn Clock,
    zone: &Zone,
) -> Result<Board, Box<dyn std::error::Error>> {
    match &config.page {
        Some(path) => {
            let html = std::fs::read_to_string(path)?;
            Ok(Board::from_html(&html)?)
        }
        None => Ok(Board::from_catalog(zone.date_of(clock.now()))),
    }
}

fn build_loop(config: &StartupConfig) -> Result<UpdateLoop, Box<dyn std::error::Error>> {
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let zone = Zone::ist();

    let board = initial_board(config, clock.as_ref(), &zone)?;
    let fetcher = ResultFetcher::new(&config.fetch, clock.clone(), zone.clone())?;

    let mut update_loop =
        UpdateLoop::new(fetcher, board, clock, zone, config.refresh.cycle_timeout);
    if let Some(path) = &config.output {
        update_loop = update_loop.with_snapshot(path.clone());
    }
    Ok(update_loop)
}

/// Runs a single cycle and prints the board
async fn run_once(config: &StartupConfig) -> Result<(), Box<dyn std::error::Error>> {
    logging::init(&LogTarget::Stderr)?;

    let mut update_loop = build_loop(config)?;
    if let Err(e) = update_loop.run_cycle().await {
        warn!(error = %e, "Refresh cycle failed");
    }

    if config.json {
        println!("{}", serde_json::to_string_pretty(update_loop.board())?);
    } else {
        print!("{}", update_loop.board());
    }
    Ok(())
}

/// Runs the interactive board until the user quits
async fn run_tui(config: &StartupConfig) -> Result<(), Box<dyn std::error::Error>> {
    // Logging is best effort; the board still works without it
    if let Err(e) = logging::init(&LogTarget::for_tui(config.log_file.clone())) {
        eprintln!("Logging disabled: {}", e);
    }

    let update_loop = build_loop(config)?;

    setup_panic_hook();

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new();
    let mut handle = RefreshHandle::spawn(update_loop, config.refresh.clone());

    loop {
        while let Some(message) = refresh::try_recv(&mut handle) {
            app.apply(message);
        }

        terminal.draw(|f| render_ui(f, &app))?;

        // Poll for keyboard events with 100ms timeout
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                app.handle_key(key);
            }
        }

        if app.refresh_requested {
            handle.request_refresh();
            app.refresh_requested = false;
        }

        if app.should_quit {
            break;
        }
    }

    handle.shutdown().await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;

    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let config = match StartupConfig::from_cli(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let outcome = if config.once {
        run_once(&config).await
    } else {
        run_tui(&config).await
    };

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
