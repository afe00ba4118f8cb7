//! Interactive terminal player.
//!
//! Organized along FP/Unix boundaries:
//! - `state`: Pure data types (Stage, Action, Transition)
//! - `update`: Pure transitions
//! - `view`: Pure rendering
//! - `theme`: Style constants
//! - `media`: The terminal presentation surface and player process
//! - `run`: Effects (terminal, threads, event loop)

pub mod media;
pub mod run;
pub mod state;
pub mod theme;
pub mod update;
pub mod view;
