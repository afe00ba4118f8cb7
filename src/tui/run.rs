//! TUI effects boundary: event loop, terminal lifecycle, key mapping.
//!
//! This is the only module with side effects. It wires the pure layers
//! (state, update, view) and the sequencer to the real terminal via
//! crossterm and ratatui.
//!
//! Architecture: producer threads feed a single mpsc channel.
//! - Key reader thread: forwards crossterm key events
//! - Story loader thread: sends the parsed manifest, or the failure
//! - Media threads: send ticketed ready/ended signals
//!
//! The event loop consumes from the channel and drives the sequencer
//! through a [`TerminalSurface`].

use std::io;
use std::sync::mpsc;
use std::thread;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing::{error, info};

use crate::source::{load_descriptors, StoryLocation};
use crate::types::PlayerConfig;

use super::media::{MediaController, TerminalSurface};
use super::state::{Action, App, AppEvent, Command, LoadState, Transition};
use super::update::update;
use super::view::render;

// ============================================================================
// KEY MAPPING
// ============================================================================

/// Map a crossterm key event to a semantic Action.
///
/// Returns None for keys that don't map to any action, and for key
/// release/repeat events.
pub fn map_key(key: KeyEvent) -> Option<Action> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    // Ctrl+C always quits
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Action::Quit);
    }

    match key.code {
        KeyCode::Enter | KeyCode::Char(' ') => Some(Action::Activate),
        KeyCode::Up | KeyCode::Char('k') => Some(Action::MoveUp),
        KeyCode::Down | KeyCode::Char('j') => Some(Action::MoveDown),
        KeyCode::Char('p') => Some(Action::Resume),
        KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
        _ => None,
    }
}

// ============================================================================
// TERMINAL LIFECYCLE
// ============================================================================

/// Set up the terminal for TUI mode.
fn setup_terminal() -> io::Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;
    io::stdout().execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(io::stdout());
    Terminal::new(backend)
}

/// Restore the terminal to normal mode.
fn restore_terminal() -> io::Result<()> {
    disable_raw_mode()?;
    io::stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}

/// Install a panic hook that restores the terminal before printing the panic.
fn install_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        // Best-effort terminal restoration
        let _ = restore_terminal();
        original_hook(panic_info);
    }));
}

// ============================================================================
// BACKGROUND THREADS
// ============================================================================

/// Spawn a thread that reads crossterm events and forwards key events to the channel.
fn spawn_key_reader(tx: mpsc::Sender<AppEvent>) {
    thread::spawn(move || {
        loop {
            match event::read() {
                Ok(Event::Key(key)) => {
                    if tx.send(AppEvent::Key(key)).is_err() {
                        break; // receiver dropped, TUI is shutting down
                    }
                }
                Ok(_) => {} // ignore mouse, resize, etc.
                Err(_) => break,
            }
        }
    });
}

/// Spawn a thread that resolves the story source once.
fn spawn_story_loader(location: StoryLocation, tx: mpsc::Sender<AppEvent>) {
    thread::spawn(move || {
        let event = match load_descriptors(&location) {
            Ok(descriptors) => AppEvent::StoryLoaded(descriptors),
            Err(e) => AppEvent::StoryFailed(e.to_string()),
        };
        let _ = tx.send(event);
    });
}

// ============================================================================
// EVENT LOOP
// ============================================================================

/// Run the player until the user quits.
///
/// Returns how far the story source got, so the caller can report a
/// startup failure once the terminal is restored.
pub fn run(config: PlayerConfig, location: StoryLocation) -> io::Result<LoadState> {
    install_panic_hook();
    let mut terminal = setup_terminal()?;
    let mut app = App::loading(config.assets);

    let (tx, rx) = mpsc::channel::<AppEvent>();

    spawn_key_reader(tx.clone());
    spawn_story_loader(location, tx.clone());
    let mut media = MediaController::new(config.player_command, tx);

    loop {
        terminal.draw(|frame| render(&app, frame))?;

        if app.should_quit {
            break;
        }

        // Block on next event from any producer
        let event = match rx.recv() {
            Ok(e) => e,
            Err(_) => break, // all senders dropped
        };

        match event {
            AppEvent::Key(key) => {
                if let Some(action) = map_key(key) {
                    let transition = update(&app.stage, app.sequencer.phase(), &action);
                    apply(transition, &mut app, &mut media);
                }
            }
            background_event => handle_background_event(&mut app, &mut media, background_event),
        }
    }

    // Kill any running player before handing the terminal back
    drop(media);
    restore_terminal()?;
    info!("player closed");
    Ok(app.load)
}

// ============================================================================
// EFFECT HANDLING
// ============================================================================

/// Carry out a transition requested by the pure update function.
fn apply(transition: Transition, app: &mut App, media: &mut MediaController) {
    match transition {
        Transition::Stay => {}
        Transition::Cursor(cursor) => app.stage.cursor = cursor,
        Transition::Quit => app.should_quit = true,
        Transition::Command(command) => {
            let mut surface = TerminalSurface::new(&mut app.stage, media);
            match command {
                Command::Reveal => app.sequencer.reveal_scene(&mut surface),
                Command::Resume => app.sequencer.resume_playback(&mut surface),
                Command::Choose(next) => {
                    if let Err(e) = app.sequencer.on_choice_selected(&next, &mut surface) {
                        error!(error = %e, "choice could not be followed");
                    }
                }
            }
        }
    }
}

/// Feed a loader or media event to the sequencer.
fn handle_background_event(app: &mut App, media: &mut MediaController, event: AppEvent) {
    let mut surface = TerminalSurface::new(&mut app.stage, media);
    match event {
        AppEvent::StoryLoaded(descriptors) => {
            app.load = match app.sequencer.initialize(&descriptors, &mut surface) {
                Ok(()) => LoadState::Ready,
                Err(e) => LoadState::Failed(e.to_string()),
            };
        }
        AppEvent::StoryFailed(message) => {
            error!(error = %message, "story source failed to load");
            app.load = LoadState::Failed(message);
        }
        AppEvent::VideoReady(ticket) => app.sequencer.on_video_ready(&ticket, &mut surface),
        AppEvent::VideoEnded(ticket) => app.sequencer.on_video_ended(&ticket, &mut surface),
        AppEvent::Key(_) => {} // handled by the event loop
    }
}

// ============================================================================
// TESTS
// ============================================================================
