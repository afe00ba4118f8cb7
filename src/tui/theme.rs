//! TUI color semantics and style constants.
//!
//! Color semantics:
//! - Cyan: interactive elements (choices, keybinding hints)
//! - Yellow: warnings (blocked playback, stalled loading)
//! - Green: media that is playing
//! - Dim: de-emphasized (asset paths, faded hints)
//! - Bold: scene text

use ratatui::style::{Color, Modifier, Style};

// ============================================================================
// SEMANTIC STYLES
// ============================================================================

/// Warning / attention needed: yellow.
pub const STYLE_WARNING: Style = Style::new().fg(Color::Yellow);

/// Playing media: green.
pub const STYLE_PLAYING: Style = Style::new().fg(Color::Green);

/// Interactive element / keybinding hint: cyan.
pub const STYLE_INTERACTIVE: Style = Style::new().fg(Color::Cyan);

/// De-emphasized metadata: dark gray.
pub const STYLE_DIM: Style = Style::new().fg(Color::DarkGray);

/// Important text: bold white.
pub const STYLE_IMPORTANT: Style = Style::new().add_modifier(Modifier::BOLD);

// ============================================================================
// UI ELEMENT STYLES
// ============================================================================

/// Title bar / header.
pub const STYLE_TITLE: Style = Style::new().fg(Color::White).add_modifier(Modifier::BOLD);

/// Focused choice button.
pub const STYLE_CURSOR: Style = Style::new().add_modifier(Modifier::REVERSED);

/// Media panel border.
pub const STYLE_FRAME: Style = Style::new().fg(Color::Gray);

/// Footer / help line.
pub const STYLE_HELP: Style = Style::new().fg(Color::DarkGray);

/// Style for a hint at the given opacity.
///
/// Terminals have no alpha, so opacity is bucketed: fully opaque is
/// plain, translucent is dimmed, zero is not drawn at all.
pub fn hint_style(opacity: f32) -> Option<Style> {
    if opacity <= 0.0 {
        None
    } else if opacity >= 1.0 {
        Some(STYLE_INTERACTIVE)
    } else {
        Some(STYLE_INTERACTIVE.add_modifier(Modifier::DIM))
    }
}

// ============================================================================
// TESTS
// ============================================================================
