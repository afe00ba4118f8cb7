//! Asset probing for story inspection.
//!
//! Checks which scene videos and stills exist locally, and walks the
//! asset directory for media no scene points to.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use walkdir::WalkDir;

use crate::story::Story;
use crate::types::{
    AssetConfig, AssetStatus, MediaRef, Presence, SceneDescriptor, SceneEntry, StoryReport,
};

/// Check a single asset reference.
///
/// URLs are not fetched; they report [`Presence::Remote`].
pub fn probe(reference: &MediaRef) -> AssetStatus {
    let presence = if reference.is_remote() {
        Presence::Remote
    } else {
        match fs::metadata(reference.as_str()) {
            Ok(meta) if meta.is_file() => Presence::Present {
                size_bytes: meta.len(),
            },
            _ => Presence::Missing,
        }
    };
    AssetStatus {
        reference: reference.clone(),
        presence,
    }
}

/// Build the inspection report for a loaded story.
///
/// Scenes are listed once each, in the order their id first appears in
/// `descriptors`. Probing runs in parallel.
pub fn build_report(
    source: &str,
    descriptors: &[SceneDescriptor],
    story: &Story,
    assets: &AssetConfig,
) -> StoryReport {
    let mut seen = HashSet::new();
    let ordered: Vec<&SceneDescriptor> = descriptors
        .iter()
        .filter(|d| seen.insert(d.id.as_str()))
        .collect();

    let scenes: Vec<SceneEntry> = ordered
        .par_iter()
        .filter_map(|descriptor| {
            let record = story.get(&descriptor.id)?;
            Some(SceneEntry {
                id: record.id.clone(),
                prompt: record.text.clone(),
                video_prompt: descriptor.video_prompt.clone(),
                next_scene_id: record
                    .choices
                    .first()
                    .map(|c| c.next_scene_id.clone())
                    .unwrap_or_default(),
                video: probe(&record.video),
                image: probe(&record.image),
            })
        })
        .collect();

    let mut report = StoryReport {
        source: source.to_string(),
        duplicate_ids: story.duplicates().to_vec(),
        ..Default::default()
    };

    for status in scenes.iter().flat_map(|s| [&s.video, &s.image]) {
        match status.presence {
            Presence::Present { size_bytes } => report.bytes_present += size_bytes,
            Presence::Missing => report.missing_assets += 1,
            Presence::Remote => {}
        }
    }

    let referenced: HashSet<PathBuf> = scenes
        .iter()
        .flat_map(|s| [&s.video.reference, &s.image.reference])
        .map(|r| PathBuf::from(r.as_str()))
        .collect();
    report.unreferenced_assets = find_unreferenced(assets, &referenced);
    report.scenes = scenes;

    report
}

/// Media files under the local asset directory not in `referenced`.
///
/// Only files with the configured video or image extension count. A
/// remote or missing asset directory yields nothing.
pub fn find_unreferenced(assets: &AssetConfig, referenced: &HashSet<PathBuf>) -> Vec<PathBuf> {
    if crate::types::is_url(&assets.base) {
        return Vec::new();
    }
    let root = Path::new(&assets.base);
    if !root.is_dir() {
        return Vec::new();
    }

    let mut unreferenced: Vec<PathBuf> = WalkDir::new(root)
        .follow_links(false)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| has_media_extension(path, assets))
        .filter(|path| !referenced.contains(path))
        .collect();

    unreferenced.sort();
    unreferenced
}

fn has_media_extension(path: &Path, assets: &AssetConfig) -> bool {
    path.extension().and_then(|e| e.to_str()).is_some_and(|ext| {
        ext.eq_ignore_ascii_case(&assets.video_ext)
            || ext.eq_ignore_ascii_case(&assets.image_ext)
    })
}

// ============================================================================
// TESTS
// ============================================================================
