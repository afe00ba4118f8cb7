//! Story source loading.
//!
//! A story manifest is a JSON array of scene descriptors, or an object
//! with a `scenes` array. It is read from a local file or fetched with a
//! single GET. No retries, no auth.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use reqwest::Url;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, info};

use crate::types::{is_url, SceneDescriptor};

/// Asset directory relative to the story manifest.
pub const DEFAULT_ASSET_DIR: &str = "assets/scenes";

/// Error loading a story source.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("failed to read {path}: {source}")]
    Io { path: PathBuf, source: io::Error },

    #[error("failed to fetch {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("invalid story URL {url}: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("malformed story manifest: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Where a story manifest lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoryLocation {
    File(PathBuf),
    Url(Url),
}

/// Accepted manifest shapes.
#[derive(Deserialize)]
#[serde(untagged)]
enum Manifest {
    List(Vec<SceneDescriptor>),
    Wrapped { scenes: Vec<SceneDescriptor> },
}

impl StoryLocation {
    /// Classify a CLI argument as a URL or a file path.
    ///
    /// # Errors
    /// Returns [`SourceError::InvalidUrl`] for an http(s) string that does not parse.
    pub fn parse(location: &str) -> Result<StoryLocation, SourceError> {
        if is_url(location) {
            let url = Url::parse(location).map_err(|e| SourceError::InvalidUrl {
                url: location.to_string(),
                reason: e.to_string(),
            })?;
            Ok(StoryLocation::Url(url))
        } else {
            Ok(StoryLocation::File(PathBuf::from(location)))
        }
    }

    /// Asset base used when none is given: `assets/scenes` next to the manifest.
    pub fn default_asset_base(&self) -> String {
        match self {
            StoryLocation::File(path) => match path.parent() {
                Some(parent) if !parent.as_os_str().is_empty() => {
                    parent.join(DEFAULT_ASSET_DIR).display().to_string()
                }
                _ => DEFAULT_ASSET_DIR.to_string(),
            },
            StoryLocation::Url(url) => url
                .join(DEFAULT_ASSET_DIR)
                .map(|u| u.to_string())
                .unwrap_or_else(|_| DEFAULT_ASSET_DIR.to_string()),
        }
    }
}

impl std::fmt::Display for StoryLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoryLocation::File(path) => write!(f, "{}", path.display()),
            StoryLocation::Url(url) => write!(f, "{}", url),
        }
    }
}

/// Load scene descriptors in source order.
///
/// An empty list is returned as-is; rejecting it is the sequencer's job.
///
/// # Errors
/// Returns an error if the source is unreachable or not a valid manifest.
pub fn load_descriptors(location: &StoryLocation) -> Result<Vec<SceneDescriptor>, SourceError> {
    let body = match location {
        StoryLocation::File(path) => read_file(path)?,
        StoryLocation::Url(url) => fetch(url)?,
    };
    let descriptors = parse_manifest(&body)?;
    info!(source = %location, scenes = descriptors.len(), "story source loaded");
    Ok(descriptors)
}

/// Parse manifest text into descriptors.
///
/// # Errors
/// Returns [`SourceError::Malformed`] if the text matches neither shape.
pub fn parse_manifest(body: &str) -> Result<Vec<SceneDescriptor>, SourceError> {
    let manifest: Manifest = serde_json::from_str(body)?;
    Ok(match manifest {
        Manifest::List(scenes) | Manifest::Wrapped { scenes } => scenes,
    })
}

fn read_file(path: &Path) -> Result<String, SourceError> {
    debug!(path = %path.display(), "reading story manifest");
    fs::read_to_string(path).map_err(|source| SourceError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn fetch(url: &Url) -> Result<String, SourceError> {
    debug!(%url, "fetching story manifest");
    let http_err = |source: reqwest::Error| SourceError::Http {
        url: url.to_string(),
        source,
    };
    reqwest::blocking::get(url.clone())
        .and_then(|response| response.error_for_status())
        .and_then(|response| response.text())
        .map_err(http_err)
}

// ============================================================================
// TESTS
// ============================================================================
