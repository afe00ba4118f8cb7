//! Pure state transitions: (Stage, Phase, Action) → Transition.
//!
//! Fully testable without a terminal. Each phase decides which actions it
//! accepts. Unhandled actions are no-ops.

use crate::sequencer::Phase;

use super::state::{Action, Command, Stage, Transition};

/// Pure transition function.
///
/// Reads the stage (for the choice cursor) and the sequencer phase, and
/// describes what should happen. The effects boundary carries it out.
pub fn update(stage: &Stage, phase: Phase, action: &Action) -> Transition {
    if *action == Action::Quit {
        return Transition::Quit;
    }

    match phase {
        Phase::Entered => update_entered(action),
        Phase::Blocked => update_blocked(action),
        Phase::ChoicesShown => update_choices(stage, action),
        // Loading, buffering and playing only listen for Quit
        Phase::Idle | Phase::Revealing | Phase::Playing => Transition::Stay,
    }
}

// ============================================================================
// PER-PHASE HANDLERS
// ============================================================================

/// Entered: activating the image reveals the scene.
fn update_entered(action: &Action) -> Transition {
    match action {
        Action::Activate => Transition::Command(Command::Reveal),
        _ => Transition::Stay,
    }
}

/// Blocked: the video is visible but paused; play resumes it.
fn update_blocked(action: &Action) -> Transition {
    match action {
        Action::Resume | Action::Activate => Transition::Command(Command::Resume),
        _ => Transition::Stay,
    }
}

/// ChoicesShown: cursor movement and selection.
fn update_choices(stage: &Stage, action: &Action) -> Transition {
    let len = stage.choices.len();

    match action {
        Action::MoveUp => Transition::Cursor(stage.cursor.saturating_sub(1)),
        Action::MoveDown => {
            let new_cursor = if len == 0 { 0 } else { (stage.cursor + 1).min(len - 1) };
            Transition::Cursor(new_cursor)
        }
        Action::Activate => match stage.choices.get(stage.cursor) {
            Some(choice) => Transition::Command(Command::Choose(choice.next_scene_id.clone())),
            None => Transition::Stay,
        },
        _ => Transition::Stay,
    }
}

// ============================================================================
// TESTS
// ============================================================================
