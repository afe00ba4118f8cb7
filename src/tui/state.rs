//! TUI state algebra: pure types, zero effects.
//!
//! The [`Stage`] is what the terminal surface draws: the sequencer writes
//! to it through [`super::media::TerminalSurface`], the view reads it.
//! Key handling is mapped to semantic [`Action`]s, and the pure update
//! function turns those into a [`Transition`] for the effects layer.

use crossterm::event::KeyEvent;

use crate::sequencer::Sequencer;
use crate::surface::{Hint, Layer, Ticket};
use crate::types::{AssetConfig, Choice, MediaRef, SceneDescriptor};

/// Hint shown until the story source resolves.
pub const LOADING_HINT: &str = "Loading story...";

// ============================================================================
// APP EVENTS
// ============================================================================

/// Everything the event loop can receive from its channel.
///
/// Producers:
/// - A key reader thread sends `Key` variants
/// - The story loader thread sends `StoryLoaded` or `StoryFailed`, once
/// - Media threads send `VideoReady` / `VideoEnded`, tagged with the
///   ticket they were started for
#[derive(Debug)]
pub enum AppEvent {
    /// A terminal key event from the crossterm reader thread.
    Key(KeyEvent),
    /// Story source resolved.
    StoryLoaded(Vec<SceneDescriptor>),
    /// Story source unreachable or malformed.
    StoryFailed(String),
    /// Video buffered enough to start.
    VideoReady(Ticket),
    /// Player process exited.
    VideoEnded(Ticket),
}

// ============================================================================
// STAGE
// ============================================================================

/// Playback state of the loaded video, as far as the stage knows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Playback {
    Loading,
    Playing,
    /// Loaded but not playing (start was refused).
    Paused,
}

/// The video element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoSlot {
    pub src: MediaRef,
    pub poster: MediaRef,
    pub visible: bool,
    pub playback: Playback,
}

/// Terminal view model of the presentation surface.
#[derive(Debug, Clone, PartialEq)]
pub struct Stage {
    pub image: Option<MediaRef>,
    pub video: Option<VideoSlot>,
    /// Layer drawn in the media panel.
    pub front: Layer,
    /// Scene prompt text.
    pub text: String,
    pub hint: Hint,
    pub choices: Vec<Choice>,
    /// Focused choice index.
    pub cursor: usize,
    /// Transient warning line (playback blocked, ...).
    pub status: Option<String>,
}

impl Default for Stage {
    fn default() -> Self {
        Stage {
            image: None,
            video: None,
            front: Layer::Image,
            text: String::new(),
            hint: Hint {
                text: LOADING_HINT.to_string(),
                opacity: 1.0,
            },
            choices: Vec::new(),
            cursor: 0,
            status: None,
        }
    }
}

impl Stage {
    /// The video, if it is the visible front layer.
    pub fn visible_video(&self) -> Option<&VideoSlot> {
        match (&self.video, self.front) {
            (Some(video), Layer::Video) if video.visible => Some(video),
            _ => None,
        }
    }
}

// ============================================================================
// APPLICATION STATE
// ============================================================================

/// Story source resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    Loading,
    Ready,
    /// Startup stalled. The message is logged and reported on exit.
    Failed(String),
}

/// Top-level TUI model.
#[derive(Debug)]
pub struct App {
    pub stage: Stage,
    pub sequencer: Sequencer,
    pub load: LoadState,
    /// Set to true when the app should exit on the next tick.
    pub should_quit: bool,
}

impl App {
    /// Create an App waiting for the story source.
    pub fn loading(assets: AssetConfig) -> Self {
        App {
            stage: Stage::default(),
            sequencer: Sequencer::new(assets),
            load: LoadState::Loading,
            should_quit: false,
        }
    }
}

// ============================================================================
// ACTIONS
// ============================================================================

/// Semantic user action, decoupled from raw key events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Click: reveal the image, or pick the focused choice.
    Activate,
    MoveUp,
    MoveDown,
    /// Press play on a blocked video.
    Resume,
    Quit,
}

// ============================================================================
// TRANSITIONS
// ============================================================================

/// Result of a pure transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// Nothing to do.
    Stay,
    /// Move the choice cursor.
    Cursor(usize),
    /// Drive the sequencer.
    Command(Command),
    Quit,
}

/// Sequencer operation requested by a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Reveal,
    Resume,
    Choose(String),
}

// ============================================================================
// TESTS
// ============================================================================
