//! The presentation surface the sequencer drives.
//!
//! The sequencer never renders anything itself. It calls into a
//! [`Surface`] and receives media signals back, tagged with the
//! [`Ticket`] it handed out when loading the video.

use thiserror::Error;

use crate::types::{Choice, MediaRef};

/// Hint shown while a scene waits for the image to be activated.
pub const REVEAL_HINT: &str = "Click the image to reveal the scene...";

/// Hint shown once the choices are on screen.
pub const CHOOSE_HINT: &str = "Choose your next move...";

/// Stacking layer that can be brought to front.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Layer {
    #[default]
    Image,
    Video,
}

/// Hint text plus its opacity in `0.0..=1.0`.
#[derive(Debug, Clone, PartialEq)]
pub struct Hint {
    pub text: String,
    pub opacity: f32,
}

impl Hint {
    pub fn reveal() -> Self {
        Hint {
            text: REVEAL_HINT.to_string(),
            opacity: 1.0,
        }
    }

    pub fn choose() -> Self {
        Hint {
            text: CHOOSE_HINT.to_string(),
            opacity: 0.8,
        }
    }

    /// Keep the text, fade it out.
    pub fn hidden(text: &str) -> Self {
        Hint {
            text: text.to_string(),
            opacity: 0.0,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.opacity > 0.0
    }
}

/// Tag for a one-shot media signal registration.
///
/// `entry` is a serial bumped on every scene entry, so a scene that loops
/// to itself still gets a fresh ticket.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Ticket {
    pub scene_id: String,
    pub entry: u64,
}

/// Playback could not be started.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlaybackError {
    /// The platform refused to start playback (policy, missing player, ...).
    #[error("playback refused: {0}")]
    Refused(String),
}

/// Whatever renders image, video, text and choice buttons.
///
/// Signals flow back through [`crate::sequencer::Sequencer::on_video_ready`]
/// and [`crate::sequencer::Sequencer::on_video_ended`], each carrying the
/// ticket passed to [`Surface::load_video`].
pub trait Surface {
    fn show_image(&mut self, src: &MediaRef);
    fn set_text(&mut self, text: &str);
    fn set_hint(&mut self, hint: Hint);

    /// Pause any playback and clear the video source.
    fn stop_video(&mut self);

    /// Set the video source and poster, and start buffering. The surface
    /// reports readiness once, tagged with `ticket`.
    fn load_video(&mut self, src: &MediaRef, poster: &MediaRef, ticket: Ticket);

    /// Start playback of the loaded video.
    ///
    /// # Errors
    /// Returns [`PlaybackError::Refused`] if playback cannot start.
    fn play_video(&mut self) -> Result<(), PlaybackError>;

    fn hide_video(&mut self);
    fn bring_to_front(&mut self, layer: Layer);
    fn clear_choices(&mut self);
    fn render_choices(&mut self, choices: &[Choice]);
}
