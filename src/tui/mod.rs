// TUI module - Terminal User Interface
//
// This module manages the terminal UI using ratatui. It handles:
// - Terminal initialization and cleanup
// - Event loop (keyboard input, timer ticks, completed loads)
// - Mapping keys to App actions

pub mod app;
pub mod clipboard;
pub mod components;
pub mod layout;
pub mod modal;
pub mod theme;
pub mod views;

use crate::config::Config;
use crate::events::LoadEvent;
use crate::logging::LogBuffer;
use crate::source::ChecklistSource;
use anyhow::{Context, Result};
use app::App;
use clipboard::SystemClipboard;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use modal::ModalAction;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

/// Run the TUI
///
/// Sets up the terminal, runs the event loop, and restores the terminal when
/// done. `initial_platform` is selected before the first frame.
pub async fn run_tui(
    config: Config,
    log_buffer: LogBuffer,
    initial_platform: Option<String>,
) -> Result<()> {
    let source = ChecklistSource::new(
        &config.source,
        config.layout,
        Duration::from_secs(config.fetch_timeout_secs),
    )?;
    let (load_tx, mut load_rx) = mpsc::channel(16);

    let mut app = App::new(&config, Arc::new(source), load_tx, log_buffer);
    if let Some(platform) = initial_platform {
        app.select_platform(&platform);
    }

    // Set up terminal
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to setup terminal")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;

    let result = run_event_loop(&mut terminal, &mut app, &mut load_rx).await;

    // Restore terminal
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("Failed to restore terminal")?;
    terminal.show_cursor().context("Failed to show cursor")?;

    result
}

/// Main event loop
///
/// Waits on keyboard input, the redraw tick and completed loads with
/// tokio::select!, redrawing after whichever fires.
async fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    load_rx: &mut mpsc::Receiver<LoadEvent>,
) -> Result<()> {
    // Drives the spinner and toast expiry
    let mut tick_interval = tokio::time::interval(Duration::from_millis(200));

    loop {
        terminal
            .draw(|f| views::draw(f, app))
            .context("Failed to draw terminal")?;

        tokio::select! {
            _ = async {
                if event::poll(Duration::from_millis(10)).unwrap_or(false) {
                    if let Ok(Event::Key(key_event)) = event::read() {
                        handle_key_event(app, key_event);
                    }
                }
            } => {}

            _ = tick_interval.tick() => {
                app.tick_animation();
            }

            Some(load_event) = load_rx.recv() => {
                app.apply_load_event(load_event);
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

/// Handle keyboard input
/// Layered dispatch: Modal → App actions
fn handle_key_event(app: &mut App, key_event: KeyEvent) {
    if key_event.kind != KeyEventKind::Press {
        return;
    }

    // Modal captures all input when active
    if let Some(modal) = app.modal {
        match modal.handle_input(key_event.code) {
            ModalAction::None => {}
            ModalAction::Close => app.modal = None,
            ModalAction::Quit => {
                app.modal = None;
                app.should_quit = true;
            }
        }
        return;
    }

    match key_event.code {
        KeyCode::Char('q') | KeyCode::Char('Q') => app.should_quit = true,
        KeyCode::Char('?') => app.show_help(),

        KeyCode::Up | KeyCode::Char('k') => app.move_up(),
        KeyCode::Down | KeyCode::Char('j') => app.move_down(),
        KeyCode::Home | KeyCode::Char('g') => app.move_to_top(),
        KeyCode::End | KeyCode::Char('G') => app.move_to_bottom(),

        KeyCode::Enter | KeyCode::Right | KeyCode::Char('l') => app.enter(),
        KeyCode::Esc | KeyCode::Backspace | KeyCode::Left | KeyCode::Char('h') => app.back(),

        KeyCode::Char('y') => app.copy_selection(&mut SystemClipboard),
        KeyCode::Char('x') => app.export_csv(),
        KeyCode::Char('r') => app.reload(),
        _ => {}
    }
}
