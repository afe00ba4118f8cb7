//! Domain types for scene-player.
//!
//! Scene data as it arrives from the story manifest, scene data as the
//! player uses it, and the configuration structs built from the CLI.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

// ============================================================================
// PRIMITIVES
// ============================================================================

/// Reference to a media asset: a filesystem path or a URL.
///
/// Kept as a string because the same reference is handed to an external
/// player, which accepts either form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MediaRef(pub String);

impl MediaRef {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True for `http://` and `https://` references.
    pub fn is_remote(&self) -> bool {
        is_url(&self.0)
    }
}

impl fmt::Display for MediaRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Whether a location string names an http(s) resource.
pub fn is_url(location: &str) -> bool {
    location.starts_with("http://") || location.starts_with("https://")
}

// ============================================================================
// SCENES
// ============================================================================

/// One raw entry of the story manifest.
///
/// Only `id` and `image_prompt` are required. Other fields written by the
/// asset pipeline are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SceneDescriptor {
    /// Scene identifier, also the asset file stem.
    pub id: String,
    /// Prompt text, displayed verbatim.
    pub image_prompt: String,
    /// Prompt the video was generated from. Informational only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_prompt: Option<String>,
}

impl SceneDescriptor {
    pub fn new(id: impl Into<String>, image_prompt: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            image_prompt: image_prompt.into(),
            video_prompt: None,
        }
    }
}

/// An outgoing link from a scene.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Choice {
    /// Button label.
    pub label: String,
    /// Target scene. Always a key of the story it was built for.
    pub next_scene_id: String,
}

/// A scene as the player uses it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SceneRecord {
    pub id: String,
    /// Display text (the descriptor's `image_prompt`).
    pub text: String,
    pub video: MediaRef,
    /// Poster still: the video reference with the image extension.
    pub image: MediaRef,
    /// Exactly one entry, computed positionally.
    pub choices: Vec<Choice>,
}

// ============================================================================
// INSPECTION
// ============================================================================

/// What was found at an asset reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum Presence {
    /// Local file exists.
    Present { size_bytes: u64 },
    /// Local file does not exist or cannot be read.
    Missing,
    /// URL reference, not checked.
    Remote,
}

/// An asset reference and its presence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssetStatus {
    pub reference: MediaRef,
    #[serde(flatten)]
    pub presence: Presence,
}

/// One scene as listed by `inspect`.
#[derive(Debug, Clone, Serialize)]
pub struct SceneEntry {
    pub id: String,
    pub prompt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_prompt: Option<String>,
    pub next_scene_id: String,
    pub video: AssetStatus,
    pub image: AssetStatus,
}

/// Complete inspection results for a story.
#[derive(Debug, Clone, Default, Serialize)]
pub struct StoryReport {
    /// Manifest location as given.
    pub source: String,
    /// Distinct scenes in source order.
    pub scenes: Vec<SceneEntry>,
    /// Ids that appear more than once in the manifest.
    pub duplicate_ids: Vec<String>,
    /// Media files in the asset directory that no scene references.
    pub unreferenced_assets: Vec<PathBuf>,
    /// Number of scene assets (videos and images) that are missing.
    pub missing_assets: usize,
    /// Total size of the assets found.
    pub bytes_present: u64,
}

// ============================================================================
// CONFIGURATION
// ============================================================================

/// Output format for reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable pretty output.
    #[default]
    Human,
    /// Machine-readable JSON.
    Json,
}

/// Where scene assets live and how they are named.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetConfig {
    /// Directory or base URL holding `<id>.<ext>` files.
    pub base: String,
    /// Video extension, without the dot.
    pub video_ext: String,
    /// Still image extension, without the dot.
    pub image_ext: String,
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self {
            base: String::from("assets/scenes"),
            video_ext: String::from("mp4"),
            image_ext: String::from("png"),
        }
    }
}

/// Configuration for an interactive `play` session.
#[derive(Debug, Clone)]
pub struct PlayerConfig {
    pub assets: AssetConfig,
    /// External player program and its leading arguments. The video
    /// reference is appended as the last argument.
    pub player_command: Vec<String>,
    /// File receiving tracing output while the terminal is in TUI mode.
    pub log_file: PathBuf,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            assets: AssetConfig::default(),
            player_command: vec![String::from("mpv"), String::from("--really-quiet")],
            log_file: PathBuf::new(), // Will be set at runtime
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
