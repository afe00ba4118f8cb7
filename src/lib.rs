//! scene-player: A linear interactive-fiction video scene player.

pub mod assets;
pub mod logging;
pub mod report;
pub mod sequencer;
pub mod source;
pub mod story;
pub mod surface;
pub mod tui;
pub mod types;
