//! Terminal presentation surface.
//!
//! Stills and text land on the [`Stage`]. Video is handed to an external
//! player process; a supervisor thread reports its exit on the event
//! channel. Both media signals carry the ticket they were started for.

use std::fs::File;
use std::process::{Child, Command, Stdio};
use std::sync::mpsc::Sender;
use std::sync::{Arc, Mutex, MutexGuard};
use std::thread;
use std::time::Duration;

use tracing::{debug, warn};

use crate::surface::{Hint, Layer, PlaybackError, Surface, Ticket};
use crate::types::{Choice, MediaRef};

use super::state::{AppEvent, Playback, Stage, VideoSlot};

/// How often the supervisor checks the player process.
const POLL_INTERVAL: Duration = Duration::from_millis(100);

// ============================================================================
// MEDIA CONTROLLER
// ============================================================================

/// The running player, shared with its supervisor. `None` once it has
/// exited or been killed.
type PlayerSlot = Arc<Mutex<Option<Child>>>;

fn lock(slot: &PlayerSlot) -> MutexGuard<'_, Option<Child>> {
    // A panicking supervisor leaves the child usable
    slot.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Owns the external player process for the loaded video.
pub struct MediaController {
    command: Vec<String>,
    tx: Sender<AppEvent>,
    loaded: Option<(MediaRef, Ticket)>,
    player: Option<PlayerSlot>,
}

impl MediaController {
    /// `command` is the player program and its leading arguments.
    pub fn new(command: Vec<String>, tx: Sender<AppEvent>) -> Self {
        MediaController {
            command,
            tx,
            loaded: None,
            player: None,
        }
    }

    /// Remember the video and report readiness once it can be opened.
    ///
    /// A local file that cannot be opened is still reported ready: the
    /// player then fails on it and its exit ends the scene.
    pub fn load(&mut self, src: &MediaRef, ticket: Ticket) {
        self.stop();
        self.loaded = Some((src.clone(), ticket.clone()));

        let src = src.clone();
        let tx = self.tx.clone();
        thread::spawn(move || {
            if !src.is_remote() {
                if let Err(e) = File::open(src.as_str()) {
                    warn!(video = %src, error = %e, "video not readable");
                }
            }
            // Best-effort: the receiver is gone only when the TUI is shutting down
            let _ = tx.send(AppEvent::VideoReady(ticket));
        });
    }

    /// Start the player on the loaded video.
    ///
    /// # Errors
    /// Returns [`PlaybackError::Refused`] if nothing is loaded, no player
    /// is configured, or the player cannot be spawned.
    pub fn play(&mut self) -> Result<(), PlaybackError> {
        let (src, ticket) = self
            .loaded
            .clone()
            .ok_or_else(|| PlaybackError::Refused("no video loaded".into()))?;
        let (program, args) = self
            .command
            .split_first()
            .ok_or_else(|| PlaybackError::Refused("no player command configured".into()))?;

        let child = Command::new(program)
            .args(args)
            .arg(src.as_str())
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| PlaybackError::Refused(format!("{}: {}", program, e)))?;
        debug!(player = %program, video = %src, "player started");

        self.stop();
        let slot: PlayerSlot = Arc::new(Mutex::new(Some(child)));
        let tx = self.tx.clone();
        let watched = Arc::clone(&slot);
        thread::spawn(move || supervise(watched, ticket, tx));
        self.player = Some(slot);
        Ok(())
    }

    /// Kill the running player, if any, and wait for it to exit.
    ///
    /// Returns once the process is gone. No ended signal follows.
    pub fn stop(&mut self) {
        let Some(slot) = self.player.take() else {
            return;
        };
        if let Some(mut child) = lock(&slot).take() {
            if let Err(e) = child.kill() {
                debug!(error = %e, "player already gone");
            }
            let _ = child.wait();
            debug!("player stopped");
        }
    }

    /// Stop and forget the loaded video.
    pub fn clear(&mut self) {
        self.stop();
        self.loaded = None;
    }
}

impl Drop for MediaController {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Wait for the player to exit and report it.
///
/// Returns silently if the slot is emptied by [`MediaController::stop`].
fn supervise(slot: PlayerSlot, ticket: Ticket, tx: Sender<AppEvent>) {
    loop {
        let exited = {
            let mut guard = lock(&slot);
            let Some(child) = guard.as_mut() else {
                return;
            };
            match child.try_wait() {
                Ok(Some(status)) => {
                    guard.take();
                    Some(Ok(status))
                }
                Ok(None) => None,
                Err(e) => {
                    guard.take();
                    Some(Err(e))
                }
            }
        };

        match exited {
            None => thread::sleep(POLL_INTERVAL),
            Some(Ok(status)) => {
                if !status.success() {
                    warn!(scene = %ticket.scene_id, %status, "player exited with failure");
                }
                let _ = tx.send(AppEvent::VideoEnded(ticket));
                return;
            }
            Some(Err(e)) => {
                warn!(scene = %ticket.scene_id, error = %e, "lost track of player");
                let _ = tx.send(AppEvent::VideoEnded(ticket));
                return;
            }
        }
    }
}

// ============================================================================
// SURFACE
// ============================================================================

/// [`Surface`] over the stage and the media controller, borrowed for
/// the duration of one sequencer call.
pub struct TerminalSurface<'a> {
    stage: &'a mut Stage,
    media: &'a mut MediaController,
}

impl<'a> TerminalSurface<'a> {
    pub fn new(stage: &'a mut Stage, media: &'a mut MediaController) -> Self {
        TerminalSurface { stage, media }
    }
}

impl Surface for TerminalSurface<'_> {
    fn show_image(&mut self, src: &MediaRef) {
        self.stage.image = Some(src.clone());
        self.stage.status = None;
    }

    fn set_text(&mut self, text: &str) {
        self.stage.text = text.to_string();
    }

    fn set_hint(&mut self, hint: Hint) {
        self.stage.hint = hint;
    }

    fn stop_video(&mut self) {
        self.media.clear();
        self.stage.video = None;
    }

    fn load_video(&mut self, src: &MediaRef, poster: &MediaRef, ticket: Ticket) {
        self.stage.video = Some(VideoSlot {
            src: src.clone(),
            poster: poster.clone(),
            visible: false,
            playback: Playback::Loading,
        });
        self.media.load(src, ticket);
    }

    fn play_video(&mut self) -> Result<(), PlaybackError> {
        let result = self.media.play();
        let playback = match &result {
            Ok(()) => {
                self.stage.status = None;
                Playback::Playing
            }
            Err(e) => {
                self.stage.status = Some(format!("Playback blocked ({}). Press [p] to play.", e));
                Playback::Paused
            }
        };
        if let Some(video) = self.stage.video.as_mut() {
            video.playback = playback;
        }
        result
    }

    fn hide_video(&mut self) {
        if let Some(video) = self.stage.video.as_mut() {
            video.visible = false;
        }
        self.stage.front = Layer::Image;
    }

    fn bring_to_front(&mut self, layer: Layer) {
        self.stage.front = layer;
        if layer == Layer::Video {
            if let Some(video) = self.stage.video.as_mut() {
                video.visible = true;
            }
        }
    }

    fn clear_choices(&mut self) {
        self.stage.choices.clear();
        self.stage.cursor = 0;
    }

    fn render_choices(&mut self, choices: &[Choice]) {
        self.stage.choices = choices.to_vec();
        self.stage.cursor = 0;
    }
}

// ============================================================================
// TESTS
// ============================================================================
