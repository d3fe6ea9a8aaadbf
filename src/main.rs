//! Spin Wheel - a terminal wheel of names.
//!
//! This application draws a wheel of user-supplied names in the terminal, spins it
//! with an eased random rotation, and records the winner. It uses the ratatui
//! framework for rendering and keeps its state in JSON files next to the config.

use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::{Duration, Instant};
use tokio::time::MissedTickBehavior;

use spin_wheel::app::{App, ModalState};
use spin_wheel::config::Config;
use spin_wheel::logging::init_logging;
use spin_wheel::store::FileStore;
use spin_wheel::ui;

/// Time between frames, roughly 60 per second.
const FRAME_INTERVAL: Duration = Duration::from_millis(16);
/// Longest wait for input while the wheel is at rest.
const IDLE_POLL: Duration = Duration::from_millis(100);

/// Application entry point.
///
/// Loads configuration, sets up logging and the store, initializes the terminal,
/// runs the main event loop, and ensures proper cleanup on exit. The terminal is
/// restored to its original state even if an error occurs.
///
/// # Errors
/// This function will return an error if:
/// - The config file cannot be read or parsed
/// - The log file or data directory cannot be created
/// - Terminal initialization or restoration fails
#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::load()?;
    init_logging(&config.logging, &config.log_file_path()?)?;

    let data_dir = config.data_dir()?;
    let store = FileStore::open(&data_dir)
        .with_context(|| format!("Failed to open data directory: {data_dir:?}"))?;
    tracing::info!(data_dir = ?store.dir(), "starting spin wheel");

    let mut app = App::new(&config, Box::new(store), StdRng::from_os_rng())?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = &res {
        tracing::error!(error = ?err, "exiting with error");
        eprintln!("Error: {err:?}");
    }
    tracing::info!("bye");

    Ok(())
}

/// Runs the main application event loop.
///
/// While the wheel turns, every frame tick draws the UI, drains pending key
/// presses without waiting, and advances the animation. When idle the loop
/// blocks on input for up to [`IDLE_POLL`] instead, so a resting wheel is
/// redrawn about ten times a second.
///
/// # Errors
/// This function will return an error if terminal drawing, event reading, or
/// saving state fails.
async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> Result<()> {
    let mut frames = tokio::time::interval(FRAME_INTERVAL);
    frames.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        frames.tick().await;
        terminal.draw(|f| ui::draw(f, app))?;

        let mut timeout = poll_timeout(app.is_spinning());
        while event::poll(timeout)? {
            timeout = Duration::ZERO;
            let Event::Key(key) = event::read()? else {
                continue;
            };
            if key.kind != KeyEventKind::Press {
                continue;
            }
            if handle_key(app, key.code)? == Control::Quit {
                return Ok(());
            }
        }

        app.on_frame(Instant::now())?;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Control {
    Continue,
    Quit,
}

/// How long to wait for the first key press of a frame.
fn poll_timeout(spinning: bool) -> Duration {
    if spinning {
        Duration::ZERO
    } else {
        IDLE_POLL
    }
}

/// Dispatches one key press according to the current mode: winner dialog,
/// entry editing, or normal.
fn handle_key(app: &mut App, code: KeyCode) -> Result<Control> {
    if matches!(app.modal_state, ModalState::Winner(_)) {
        match code {
            KeyCode::Enter | KeyCode::Esc | KeyCode::Char('c') => app.close_modal(),
            KeyCode::Char('r') => app.remove_winner()?,
            KeyCode::Char('a') => app.remove_winner_everywhere()?,
            _ => {}
        }
    } else if app.editing {
        match code {
            KeyCode::Char(c) => app.insert_char(c)?,
            KeyCode::Enter => app.insert_newline()?,
            KeyCode::Backspace => app.delete_char()?,
            KeyCode::Esc => app.exit_edit_mode(),
            KeyCode::Tab => app.next_tab(),
            _ => {}
        }
    } else {
        match code {
            KeyCode::Char('q') => return Ok(Control::Quit),
            KeyCode::Char('?') => app.toggle_help(),
            KeyCode::Char(' ') | KeyCode::Enter => app.spin(Instant::now()),
            KeyCode::Tab => app.next_tab(),
            KeyCode::Char('e') => app.enter_edit_mode(),
            KeyCode::Char('s') => app.sort_current()?,
            KeyCode::Char('x') => app.shuffle_entries()?,
            KeyCode::Char('c') => app.clear_results()?,
            KeyCode::Esc if app.show_help => app.toggle_help(),
            _ => {}
        }
    }
    Ok(Control::Continue)
}
