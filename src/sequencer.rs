//! Scene sequencer: the per-scene reveal state machine.
//!
//! ```text
//! Idle ─initialize─▶ Entered ─reveal─▶ Revealing ─ready─▶ Playing ─ended─▶ ChoicesShown
//!                       ▲                   │                 ▲               │
//!                       │                   └─ready, refused─▶ Blocked ─resume┘
//!                       └──────────────────── choice selected ────────────────┘
//! ```
//!
//! Every scene entry hands out a fresh [`Ticket`]. Ready and ended
//! signals carrying any other ticket are stale and ignored, so a slow
//! media load from a previous scene cannot act on the current one.

use thiserror::Error;
use tracing::{debug, error, info, warn};

use crate::story::{Story, StoryError};
use crate::surface::{Hint, Layer, Surface, Ticket, REVEAL_HINT};
use crate::types::{AssetConfig, SceneDescriptor, SceneRecord};

/// Where the current scene is in its reveal sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// No story loaded yet.
    #[default]
    Idle,
    /// Image shown, waiting for activation.
    Entered,
    /// Video loading, waiting for the ready signal.
    Revealing,
    Playing,
    /// Playback was refused. Video is visible but paused.
    Blocked,
    ChoicesShown,
}

/// Mutable player state, reset on every scene entry.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PlayerState {
    /// `None` until the first scene is entered.
    pub current_scene_id: Option<String>,
    /// Set once per scene, on the first reveal.
    pub revealed: bool,
    pub phase: Phase,
    /// Ticket of the pending media signals for the current scene.
    pub ticket: Option<Ticket>,
}

/// Error driving the sequencer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SequencerError {
    #[error(transparent)]
    Story(#[from] StoryError),

    #[error("no story loaded")]
    NotInitialized,

    #[error("unknown scene: {0}")]
    UnknownScene(String),
}

/// Owns the story and the player state. The surface is borrowed per call.
#[derive(Debug)]
pub struct Sequencer {
    assets: AssetConfig,
    story: Option<Story>,
    state: PlayerState,
    entries: u64,
}

impl Sequencer {
    pub fn new(assets: AssetConfig) -> Self {
        Sequencer {
            assets,
            story: None,
            state: PlayerState::default(),
            entries: 0,
        }
    }

    pub fn story(&self) -> Option<&Story> {
        self.story.as_ref()
    }

    pub fn state(&self) -> &PlayerState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    /// Record of the scene currently entered.
    pub fn current_scene(&self) -> Option<&SceneRecord> {
        let id = self.state.current_scene_id.as_deref()?;
        self.story.as_ref()?.get(id)
    }

    // ========================================================================
    // OPERATIONS
    // ========================================================================

    /// Build the story and enter its first scene.
    ///
    /// An empty source is logged and leaves the sequencer idle: nothing is
    /// rendered and nothing is retried.
    ///
    /// # Errors
    /// Returns [`SequencerError::Story`] if `descriptors` is empty.
    pub fn initialize(
        &mut self,
        descriptors: &[SceneDescriptor],
        surface: &mut impl Surface,
    ) -> Result<(), SequencerError> {
        let story = match Story::build(descriptors, &self.assets) {
            Ok(story) => story,
            Err(e) => {
                error!(error = %e, "story cannot start");
                return Err(e.into());
            }
        };

        let first = story.first_id().to_string();
        info!(scenes = story.len(), first = %first, "story initialized");
        self.story = Some(story);
        self.enter_scene(&first, surface)
    }

    /// Show a scene's image and reset the reveal state.
    ///
    /// Stops any playback from the previous scene. Pending signals from it
    /// become stale.
    ///
    /// # Errors
    /// Returns an error if no story is loaded or `id` is not in it. State
    /// and surface are left untouched in that case.
    pub fn enter_scene(
        &mut self,
        id: &str,
        surface: &mut impl Surface,
    ) -> Result<(), SequencerError> {
        let story = self.story.as_ref().ok_or(SequencerError::NotInitialized)?;
        let scene = story
            .get(id)
            .ok_or_else(|| SequencerError::UnknownScene(id.to_string()))?;

        surface.stop_video();
        surface.hide_video();
        surface.show_image(&scene.image);
        surface.bring_to_front(Layer::Image);
        surface.set_hint(Hint::reveal());
        surface.clear_choices();
        surface.set_text(&scene.text);

        self.entries += 1;
        self.state = PlayerState {
            current_scene_id: Some(scene.id.clone()),
            revealed: false,
            phase: Phase::Entered,
            ticket: None,
        };
        debug!(scene = %id, entry = self.entries, "scene entered");
        Ok(())
    }

    /// Load the current scene's video. Playback starts on the ready signal.
    ///
    /// No-op once the scene is revealed, or before any scene is entered.
    pub fn reveal_scene(&mut self, surface: &mut impl Surface) {
        if self.state.revealed {
            debug!("scene already revealed");
            return;
        }
        let Some(id) = self.state.current_scene_id.as_deref() else {
            return;
        };
        let Some(scene) = self.story.as_ref().and_then(|s| s.get(id)) else {
            return;
        };

        let ticket = Ticket {
            scene_id: scene.id.clone(),
            entry: self.entries,
        };

        surface.set_hint(Hint::hidden(REVEAL_HINT));
        surface.load_video(&scene.video, &scene.image, ticket.clone());

        debug!(scene = %scene.id, video = %scene.video, "revealing");
        self.state.revealed = true;
        self.state.phase = Phase::Revealing;
        self.state.ticket = Some(ticket);
    }

    /// The surface has buffered enough to play.
    pub fn on_video_ready(&mut self, ticket: &Ticket, surface: &mut impl Surface) {
        if !self.accepts(ticket) {
            debug!(scene = %ticket.scene_id, entry = ticket.entry, "stale ready signal ignored");
            return;
        }
        if self.state.phase != Phase::Revealing {
            return;
        }

        surface.bring_to_front(Layer::Video);
        self.start_playback(surface);
    }

    /// Retry playback after a refusal. Stands in for the surface's own
    /// play control.
    pub fn resume_playback(&mut self, surface: &mut impl Surface) {
        if self.state.phase == Phase::Blocked {
            self.start_playback(surface);
        }
    }

    /// Playback completed: hide the video and offer the scene's choice.
    ///
    /// Acts once per scene. Repeated or stale signals are ignored.
    pub fn on_video_ended(&mut self, ticket: &Ticket, surface: &mut impl Surface) {
        if !self.accepts(ticket) {
            debug!(scene = %ticket.scene_id, entry = ticket.entry, "stale ended signal ignored");
            return;
        }
        if !matches!(self.state.phase, Phase::Playing | Phase::Blocked) {
            return;
        }
        let Some(scene) = self.current_scene() else {
            return;
        };
        let choices = scene.choices.clone();

        surface.hide_video();
        surface.clear_choices();
        surface.render_choices(&choices);
        surface.set_hint(Hint::choose());

        self.state.phase = Phase::ChoicesShown;
        self.state.ticket = None;
    }

    /// Move to the chosen scene.
    ///
    /// # Errors
    /// Same as [`Sequencer::enter_scene`].
    pub fn on_choice_selected(
        &mut self,
        next_scene_id: &str,
        surface: &mut impl Surface,
    ) -> Result<(), SequencerError> {
        info!(from = ?self.state.current_scene_id, to = %next_scene_id, "choice selected");
        self.enter_scene(next_scene_id, surface)
    }

    // ========================================================================
    // INTERNAL
    // ========================================================================

    fn accepts(&self, ticket: &Ticket) -> bool {
        self.state.ticket.as_ref() == Some(ticket)
    }

    fn start_playback(&mut self, surface: &mut impl Surface) {
        match surface.play_video() {
            Ok(()) => {
                self.state.phase = Phase::Playing;
            }
            Err(e) => {
                warn!(error = %e, "Playback blocked");
                self.state.phase = Phase::Blocked;
            }
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{PlaybackError, CHOOSE_HINT};
    use crate::types::{Choice, MediaRef};
    use std::io;
    use std::sync::{Arc, Mutex};
    use tracing::Level;

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        ShowImage(String),
        SetText(String),
        SetHint(Hint),
        StopVideo,
        LoadVideo { src: String, poster: String, ticket: Ticket },
        Play,
        HideVideo,
        Front(Layer),
        ClearChoices,
        RenderChoices(Vec<Choice>),
    }

    /// Surface fake that records every call.
    #[derive(Default)]
    struct RecordingSurface {
        calls: Vec<Call>,
        refuse_play: bool,
    }

    impl RecordingSurface {
        fn last_ticket(&self) -> Ticket {
            self.calls
                .iter()
                .rev()
                .find_map(|c| match c {
                    Call::LoadVideo { ticket, .. } => Some(ticket.clone()),
                    _ => None,
                })
                .expect("no video loaded")
        }

        fn rendered_choices(&self) -> Vec<Choice> {
            self.calls
                .iter()
                .rev()
                .find_map(|c| match c {
                    Call::RenderChoices(choices) => Some(choices.clone()),
                    _ => None,
                })
                .unwrap_or_default()
        }

        fn count(&self, matcher: impl Fn(&Call) -> bool) -> usize {
            self.calls.iter().filter(|c| matcher(c)).count()
        }
    }

    impl Surface for RecordingSurface {
        fn show_image(&mut self, src: &MediaRef) {
            self.calls.push(Call::ShowImage(src.to_string()));
        }
        fn set_text(&mut self, text: &str) {
            self.calls.push(Call::SetText(text.to_string()));
        }
        fn set_hint(&mut self, hint: Hint) {
            self.calls.push(Call::SetHint(hint));
        }
        fn stop_video(&mut self) {
            self.calls.push(Call::StopVideo);
        }
        fn load_video(&mut self, src: &MediaRef, poster: &MediaRef, ticket: Ticket) {
            self.calls.push(Call::LoadVideo {
                src: src.to_string(),
                poster: poster.to_string(),
                ticket,
            });
        }
        fn play_video(&mut self) -> Result<(), PlaybackError> {
            self.calls.push(Call::Play);
            if self.refuse_play {
                Err(PlaybackError::Refused("autoplay policy".into()))
            } else {
                Ok(())
            }
        }
        fn hide_video(&mut self) {
            self.calls.push(Call::HideVideo);
        }
        fn bring_to_front(&mut self, layer: Layer) {
            self.calls.push(Call::Front(layer));
        }
        fn clear_choices(&mut self) {
            self.calls.push(Call::ClearChoices);
        }
        fn render_choices(&mut self, choices: &[Choice]) {
            self.calls.push(Call::RenderChoices(choices.to_vec()));
        }
    }

    fn scenes(ids: &[&str]) -> Vec<SceneDescriptor> {
        ids.iter()
            .map(|id| SceneDescriptor::new(*id, id.to_uppercase()))
            .collect()
    }

    fn started(ids: &[&str]) -> (Sequencer, RecordingSurface) {
        let mut sequencer = Sequencer::new(AssetConfig::default());
        let mut surface = RecordingSurface::default();
        sequencer.initialize(&scenes(ids), &mut surface).unwrap();
        (sequencer, surface)
    }

    /// Drive the current scene from Entered through ChoicesShown.
    fn play_through(sequencer: &mut Sequencer, surface: &mut RecordingSurface) {
        sequencer.reveal_scene(surface);
        let ticket = surface.last_ticket();
        sequencer.on_video_ready(&ticket, surface);
        sequencer.on_video_ended(&ticket, surface);
    }

    /// Run `f` under a subscriber that records formatted events.
    fn captured_logs(f: impl FnOnce()) -> String {
        let buffer = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&buffer);
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(Level::TRACE)
            .with_ansi(false)
            .without_time()
            .with_writer(move || LogSink(Arc::clone(&sink)))
            .finish();
        tracing::subscriber::with_default(subscriber, f);
        let bytes = buffer.lock().unwrap().clone();
        String::from_utf8(bytes).unwrap()
    }

    struct LogSink(Arc<Mutex<Vec<u8>>>);

    impl io::Write for LogSink {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }
        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn logged_at(logs: &str, level: &str, message: &str) -> bool {
        logs.lines()
            .any(|line| line.contains(level) && line.contains(message))
    }

    fn next_choice(label: &str, next: &str) -> Choice {
        Choice {
            label: label.to_string(),
            next_scene_id: next.to_string(),
        }
    }

    // -- initialize / enter --

    #[test]
    fn new_sequencer_is_idle() {
        let sequencer = Sequencer::new(AssetConfig::default());
        assert_eq!(sequencer.phase(), Phase::Idle);
        assert_eq!(sequencer.state().current_scene_id, None);
        assert!(sequencer.story().is_none());
    }

    #[test]
    fn initialize_enters_first_scene_unrevealed() {
        let (sequencer, _) = started(&["a", "b", "c"]);
        let state = sequencer.state();
        assert_eq!(state.current_scene_id.as_deref(), Some("a"));
        assert!(!state.revealed);
        assert_eq!(state.phase, Phase::Entered);
    }

    #[test]
    fn initialize_with_empty_source_renders_nothing() {
        let mut sequencer = Sequencer::new(AssetConfig::default());
        let mut surface = RecordingSurface::default();

        let mut result = Ok(());
        let logs = captured_logs(|| result = sequencer.initialize(&[], &mut surface));

        assert_eq!(result, Err(SequencerError::Story(StoryError::Empty)));
        assert!(logged_at(&logs, "ERROR", "story cannot start"), "logs: {}", logs);
        assert!(surface.calls.is_empty());
        assert_eq!(sequencer.phase(), Phase::Idle);
        assert_eq!(sequencer.state().current_scene_id, None);
    }

    #[test]
    fn enter_scene_drives_surface_in_order() {
        let (_, surface) = started(&["s1"]);
        assert_eq!(
            surface.calls,
            vec![
                Call::StopVideo,
                Call::HideVideo,
                Call::ShowImage("assets/scenes/s1.png".into()),
                Call::Front(Layer::Image),
                Call::SetHint(Hint::reveal()),
                Call::ClearChoices,
                Call::SetText("S1".into()),
            ]
        );
    }

    #[test]
    fn enter_unknown_scene_changes_nothing() {
        let (mut sequencer, mut surface) = started(&["a", "b"]);
        let before = sequencer.state().clone();
        let calls_before = surface.calls.len();

        let result = sequencer.enter_scene("nope", &mut surface);

        assert_eq!(result, Err(SequencerError::UnknownScene("nope".into())));
        assert_eq!(sequencer.state(), &before);
        assert_eq!(surface.calls.len(), calls_before);
    }

    #[test]
    fn enter_scene_before_initialize_fails() {
        let mut sequencer = Sequencer::new(AssetConfig::default());
        let mut surface = RecordingSurface::default();
        assert_eq!(
            sequencer.enter_scene("a", &mut surface),
            Err(SequencerError::NotInitialized)
        );
    }

    #[test]
    fn enter_scene_stops_playing_video() {
        let (mut sequencer, mut surface) = started(&["a", "b"]);
        sequencer.reveal_scene(&mut surface);
        let ticket = surface.last_ticket();
        sequencer.on_video_ready(&ticket, &mut surface);
        assert_eq!(sequencer.phase(), Phase::Playing);

        surface.calls.clear();
        sequencer.enter_scene("b", &mut surface).unwrap();

        assert_eq!(surface.calls.first(), Some(&Call::StopVideo));
        assert!(!sequencer.state().revealed);
        assert_eq!(sequencer.phase(), Phase::Entered);
    }

    // -- reveal --

    #[test]
    fn reveal_loads_video_with_poster() {
        let (mut sequencer, mut surface) = started(&["s1"]);
        surface.calls.clear();

        sequencer.reveal_scene(&mut surface);

        assert_eq!(surface.calls[0], Call::SetHint(Hint::hidden(REVEAL_HINT)));
        match &surface.calls[1] {
            Call::LoadVideo { src, poster, ticket } => {
                assert_eq!(src, "assets/scenes/s1.mp4");
                assert_eq!(poster, "assets/scenes/s1.png");
                assert_eq!(ticket.scene_id, "s1");
            }
            other => panic!("Expected LoadVideo, got {:?}", other),
        }
        assert!(sequencer.state().revealed);
        assert_eq!(sequencer.phase(), Phase::Revealing);
    }

    #[test]
    fn reveal_does_not_play_before_ready() {
        let (mut sequencer, mut surface) = started(&["s1"]);
        sequencer.reveal_scene(&mut surface);
        assert_eq!(surface.count(|c| *c == Call::Play), 0);
    }

    #[test]
    fn reveal_twice_equals_reveal_once() {
        let (mut once, mut surface_once) = started(&["a", "b"]);
        once.reveal_scene(&mut surface_once);

        let (mut twice, mut surface_twice) = started(&["a", "b"]);
        twice.reveal_scene(&mut surface_twice);
        twice.reveal_scene(&mut surface_twice);

        assert_eq!(once.state(), twice.state());
        assert_eq!(
            surface_twice.count(|c| matches!(c, Call::LoadVideo { .. })),
            1
        );
    }

    #[test]
    fn reveal_after_choices_is_noop() {
        let (mut sequencer, mut surface) = started(&["a", "b"]);
        play_through(&mut sequencer, &mut surface);
        let before = sequencer.state().clone();

        sequencer.reveal_scene(&mut surface);

        assert_eq!(sequencer.state(), &before);
    }

    #[test]
    fn reveal_before_initialize_is_noop() {
        let mut sequencer = Sequencer::new(AssetConfig::default());
        let mut surface = RecordingSurface::default();
        sequencer.reveal_scene(&mut surface);
        assert!(surface.calls.is_empty());
        assert!(!sequencer.state().revealed);
    }

    // -- ready / play --

    #[test]
    fn ready_brings_video_to_front_and_plays() {
        let (mut sequencer, mut surface) = started(&["a"]);
        sequencer.reveal_scene(&mut surface);
        let ticket = surface.last_ticket();
        surface.calls.clear();

        sequencer.on_video_ready(&ticket, &mut surface);

        assert_eq!(surface.calls, vec![Call::Front(Layer::Video), Call::Play]);
        assert_eq!(sequencer.phase(), Phase::Playing);
    }

    #[test]
    fn duplicate_ready_plays_once() {
        let (mut sequencer, mut surface) = started(&["a"]);
        sequencer.reveal_scene(&mut surface);
        let ticket = surface.last_ticket();

        sequencer.on_video_ready(&ticket, &mut surface);
        sequencer.on_video_ready(&ticket, &mut surface);

        assert_eq!(surface.count(|c| *c == Call::Play), 1);
    }

    #[test]
    fn refused_playback_blocks_with_video_visible() {
        let (mut sequencer, mut surface) = started(&["a", "b"]);
        surface.refuse_play = true;
        sequencer.reveal_scene(&mut surface);
        let ticket = surface.last_ticket();

        let logs = captured_logs(|| sequencer.on_video_ready(&ticket, &mut surface));

        assert!(logged_at(&logs, "WARN", "Playback blocked"), "logs: {}", logs);
        assert_eq!(sequencer.phase(), Phase::Blocked);
        assert!(sequencer.state().revealed);
        assert_eq!(surface.calls.last(), Some(&Call::Play));
        assert_eq!(surface.count(|c| *c == Call::HideVideo), 1); // only from entry
    }

    #[test]
    fn resume_after_refusal_plays() {
        let (mut sequencer, mut surface) = started(&["a"]);
        surface.refuse_play = true;
        sequencer.reveal_scene(&mut surface);
        let ticket = surface.last_ticket();
        sequencer.on_video_ready(&ticket, &mut surface);

        surface.refuse_play = false;
        sequencer.resume_playback(&mut surface);

        assert_eq!(sequencer.phase(), Phase::Playing);
        assert_eq!(surface.count(|c| *c == Call::Play), 2);
    }

    #[test]
    fn resume_outside_blocked_is_noop() {
        let (mut sequencer, mut surface) = started(&["a"]);
        sequencer.resume_playback(&mut surface);
        assert_eq!(sequencer.phase(), Phase::Entered);
        assert_eq!(surface.count(|c| *c == Call::Play), 0);
    }

    #[test]
    fn ended_while_blocked_shows_choices() {
        let (mut sequencer, mut surface) = started(&["a", "b"]);
        surface.refuse_play = true;
        sequencer.reveal_scene(&mut surface);
        let ticket = surface.last_ticket();
        sequencer.on_video_ready(&ticket, &mut surface);

        sequencer.on_video_ended(&ticket, &mut surface);

        assert_eq!(sequencer.phase(), Phase::ChoicesShown);
    }

    // -- ended / choices --

    #[test]
    fn ended_hides_video_and_renders_choice() {
        let (mut sequencer, mut surface) = started(&["a", "b"]);
        sequencer.reveal_scene(&mut surface);
        let ticket = surface.last_ticket();
        sequencer.on_video_ready(&ticket, &mut surface);
        surface.calls.clear();

        sequencer.on_video_ended(&ticket, &mut surface);

        assert_eq!(
            surface.calls,
            vec![
                Call::HideVideo,
                Call::ClearChoices,
                Call::RenderChoices(vec![next_choice("Next Scene", "b")]),
                Call::SetHint(Hint::choose()),
            ]
        );
        assert_eq!(sequencer.phase(), Phase::ChoicesShown);
    }

    #[test]
    fn ended_fires_once() {
        let (mut sequencer, mut surface) = started(&["a", "b"]);
        play_through(&mut sequencer, &mut surface);
        let ticket = surface.last_ticket();

        sequencer.on_video_ended(&ticket, &mut surface);

        assert_eq!(surface.count(|c| matches!(c, Call::RenderChoices(_))), 1);
    }

    #[test]
    fn ended_before_ready_is_ignored() {
        let (mut sequencer, mut surface) = started(&["a"]);
        sequencer.reveal_scene(&mut surface);
        let ticket = surface.last_ticket();

        sequencer.on_video_ended(&ticket, &mut surface);

        assert_eq!(sequencer.phase(), Phase::Revealing);
    }

    #[test]
    fn choose_hint_follows_choices() {
        let (mut sequencer, mut surface) = started(&["a"]);
        play_through(&mut sequencer, &mut surface);
        match surface.calls.last() {
            Some(Call::SetHint(hint)) => assert_eq!(hint.text, CHOOSE_HINT),
            other => panic!("Expected SetHint, got {:?}", other),
        }
    }

    // -- stale signals --

    #[test]
    fn stale_ready_from_previous_scene_is_ignored() {
        let (mut sequencer, mut surface) = started(&["a", "b"]);
        sequencer.reveal_scene(&mut surface);
        let stale = surface.last_ticket();

        sequencer.enter_scene("b", &mut surface).unwrap();
        sequencer.reveal_scene(&mut surface);
        sequencer.on_video_ready(&stale, &mut surface);

        assert_eq!(sequencer.phase(), Phase::Revealing);
        assert_eq!(surface.count(|c| *c == Call::Play), 0);
    }

    #[test]
    fn stale_ended_from_previous_entry_of_same_scene_is_ignored() {
        let (mut sequencer, mut surface) = started(&["solo"]);
        sequencer.reveal_scene(&mut surface);
        let first_entry = surface.last_ticket();
        sequencer.on_video_ready(&first_entry, &mut surface);

        sequencer.enter_scene("solo", &mut surface).unwrap();
        sequencer.reveal_scene(&mut surface);
        let second_entry = surface.last_ticket();
        sequencer.on_video_ready(&second_entry, &mut surface);

        sequencer.on_video_ended(&first_entry, &mut surface);
        assert_eq!(sequencer.phase(), Phase::Playing);

        sequencer.on_video_ended(&second_entry, &mut surface);
        assert_eq!(sequencer.phase(), Phase::ChoicesShown);
    }

    // -- full scenarios --

    #[test]
    fn two_scene_story_loops() {
        let (mut sequencer, mut surface) = started(&["a", "b"]);
        assert_eq!(sequencer.state().current_scene_id.as_deref(), Some("a"));

        play_through(&mut sequencer, &mut surface);
        let choices = surface.rendered_choices();
        assert_eq!(choices, vec![next_choice("Next Scene", "b")]);

        sequencer
            .on_choice_selected(&choices[0].next_scene_id, &mut surface)
            .unwrap();
        assert_eq!(sequencer.state().current_scene_id.as_deref(), Some("b"));
        assert!(!sequencer.state().revealed);

        play_through(&mut sequencer, &mut surface);
        assert_eq!(
            surface.rendered_choices(),
            vec![next_choice("Next Scene", "a")]
        );
    }

    #[test]
    fn single_scene_story_loops_to_itself() {
        let (mut sequencer, mut surface) = started(&["only"]);
        play_through(&mut sequencer, &mut surface);
        let choices = surface.rendered_choices();
        assert_eq!(choices, vec![next_choice("Next Scene", "only")]);

        sequencer.on_choice_selected("only", &mut surface).unwrap();
        assert_eq!(sequencer.phase(), Phase::Entered);
        assert!(!sequencer.state().revealed);
    }

    #[test]
    fn current_scene_tracks_entry() {
        let (mut sequencer, mut surface) = started(&["a", "b"]);
        assert_eq!(sequencer.current_scene().map(|s| s.id.as_str()), Some("a"));
        sequencer.enter_scene("b", &mut surface).unwrap();
        assert_eq!(sequencer.current_scene().map(|s| s.text.as_str()), Some("B"));
    }
}
