//! Story construction from an ordered list of scene descriptors.
//!
//! Pure functions, no I/O.

use std::collections::{HashMap, HashSet};

use thiserror::Error;
use tracing::warn;

use crate::types::{AssetConfig, Choice, MediaRef, SceneDescriptor, SceneRecord};

/// Label of the single computed choice of every scene.
pub const NEXT_SCENE_LABEL: &str = "Next Scene";

/// Error building a story.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoryError {
    #[error("story source contains no scenes")]
    Empty,
}

/// Scene lookup table built once from the story source.
///
/// Source order is used to compute the "next" links and to remember the
/// entry scene, then discarded.
#[derive(Debug, Clone)]
pub struct Story {
    scenes: HashMap<String, SceneRecord>,
    first: String,
    duplicates: Vec<String>,
}

impl Story {
    /// Build the story from descriptors in source order.
    ///
    /// Duplicate ids are last-write-wins. They are recorded in
    /// [`Story::duplicates`] and logged, not rejected.
    ///
    /// # Errors
    /// Returns [`StoryError::Empty`] if `descriptors` is empty.
    pub fn build(
        descriptors: &[SceneDescriptor],
        assets: &AssetConfig,
    ) -> Result<Story, StoryError> {
        let first = descriptors.first().ok_or(StoryError::Empty)?.id.clone();

        let mut scenes = HashMap::with_capacity(descriptors.len());
        for descriptor in descriptors {
            let next = next_scene_id(&descriptor.id, descriptors).unwrap_or(first.as_str());
            let video = video_ref(&descriptor.id, assets);
            let image = image_ref(&video, &assets.image_ext);

            scenes.insert(
                descriptor.id.clone(),
                SceneRecord {
                    id: descriptor.id.clone(),
                    text: descriptor.image_prompt.clone(),
                    video,
                    image,
                    choices: vec![Choice {
                        label: NEXT_SCENE_LABEL.to_string(),
                        next_scene_id: next.to_string(),
                    }],
                },
            );
        }

        let duplicates = duplicate_ids(descriptors);
        for id in &duplicates {
            warn!(scene = %id, "duplicate scene id in story source, last entry wins");
        }

        Ok(Story {
            scenes,
            first,
            duplicates,
        })
    }

    pub fn get(&self, id: &str) -> Option<&SceneRecord> {
        self.scenes.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.scenes.contains_key(id)
    }

    /// Id of the first scene in source order.
    pub fn first_id(&self) -> &str {
        &self.first
    }

    /// Ids that appeared more than once in the source, in order of first repeat.
    pub fn duplicates(&self) -> &[String] {
        &self.duplicates
    }

    /// Number of distinct scenes.
    pub fn len(&self) -> usize {
        self.scenes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scenes.is_empty()
    }
}

// ============================================================================
// NEXT-SCENE RULE
// ============================================================================

/// Compute the scene following `current` in source order.
///
/// Position is that of the first descriptor with id `current`. The last
/// scene, and any id not present, wrap to the first scene. Returns `None`
/// only for an empty list.
pub fn next_scene_id<'a>(current: &str, descriptors: &'a [SceneDescriptor]) -> Option<&'a str> {
    let first = descriptors.first()?;
    let next = descriptors
        .iter()
        .position(|d| d.id == current)
        .and_then(|index| descriptors.get(index + 1))
        .unwrap_or(first);
    Some(&next.id)
}

// ============================================================================
// ASSET REFERENCES
// ============================================================================

/// Video reference for a scene: `<base>/<id>.<video_ext>`.
pub fn video_ref(id: &str, assets: &AssetConfig) -> MediaRef {
    let base = assets.base.trim_end_matches('/');
    if base.is_empty() {
        MediaRef(format!("{}.{}", id, assets.video_ext))
    } else {
        MediaRef(format!("{}/{}.{}", base, id, assets.video_ext))
    }
}

/// Still image reference: `video` with its trailing extension replaced.
///
/// Only the extension of the last path segment is touched, so a `.mp4`
/// elsewhere in the reference is left alone. A reference without an
/// extension gets one appended.
pub fn image_ref(video: &MediaRef, image_ext: &str) -> MediaRef {
    let s = video.as_str();
    let segment_start = s.rfind('/').map(|i| i + 1).unwrap_or(0);
    let stem_end = match s[segment_start..].rfind('.') {
        Some(0) | None => s.len(),
        Some(dot) => segment_start + dot,
    };
    MediaRef(format!("{}.{}", &s[..stem_end], image_ext))
}

fn duplicate_ids(descriptors: &[SceneDescriptor]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut duplicates = Vec::new();
    for descriptor in descriptors {
        if !seen.insert(descriptor.id.as_str()) && !duplicates.contains(&descriptor.id) {
            duplicates.push(descriptor.id.clone());
        }
    }
    duplicates
}

// ============================================================================
// TESTS
// ============================================================================
