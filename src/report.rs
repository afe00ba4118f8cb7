//! Report formatting for story inspection.
//!
//! Pure functions: (StoryReport, OutputFormat) → String.
//! No I/O, no side effects.

use humansize::{format_size, BINARY};

use crate::types::{AssetStatus, OutputFormat, Presence, StoryReport};

/// Format an inspection report for output.
pub fn format_report(report: &StoryReport, format: OutputFormat) -> String {
    match format {
        OutputFormat::Human => format_human(report),
        OutputFormat::Json => format_json(report),
    }
}

// ============================================================================
// HUMAN FORMAT
// ============================================================================

fn format_human(report: &StoryReport) -> String {
    let mut out = String::new();

    out.push_str(&format!("=== Story: {} ===\n", report.source));
    for (i, scene) in report.scenes.iter().enumerate() {
        out.push_str(&format!("{:>2}. {}  →  {}\n", i + 1, scene.id, scene.next_scene_id));
        out.push_str(&format!("    \"{}\"\n", scene.prompt));
        if let Some(video_prompt) = &scene.video_prompt {
            out.push_str(&format!("    motion: \"{}\"\n", video_prompt));
        }
        out.push_str(&format!("    video: {}\n", format_asset(&scene.video)));
        out.push_str(&format!("    image: {}\n", format_asset(&scene.image)));
    }
    out.push('\n');

    if !report.duplicate_ids.is_empty() {
        out.push_str("=== Duplicate Ids (last entry wins) ===\n");
        for id in &report.duplicate_ids {
            out.push_str(&format!("  {}\n", id));
        }
        out.push('\n');
    }

    if !report.unreferenced_assets.is_empty() {
        out.push_str("=== Unreferenced Assets ===\n");
        for path in &report.unreferenced_assets {
            out.push_str(&format!("  {}\n", path.display()));
        }
        out.push('\n');
    }

    out.push_str(&format_summary(report));
    out
}

fn format_asset(status: &AssetStatus) -> String {
    match status.presence {
        Presence::Present { size_bytes } => {
            format!("{} ({})", status.reference, format_size(size_bytes, BINARY))
        }
        Presence::Missing => format!("{} (MISSING)", status.reference),
        Presence::Remote => format!("{} (remote)", status.reference),
    }
}

fn format_summary(report: &StoryReport) -> String {
    let mut out = String::new();
    out.push_str("=== Summary ===\n");
    out.push_str(&format!("Scenes:             {}\n", report.scenes.len()));
    out.push_str(&format!("Duplicate ids:      {}\n", report.duplicate_ids.len()));
    out.push_str(&format!("Missing assets:     {}\n", report.missing_assets));
    out.push_str(&format!(
        "Unreferenced files: {}\n",
        report.unreferenced_assets.len()
    ));
    out.push_str(&format!(
        "Asset size:         {}\n",
        format_size(report.bytes_present, BINARY)
    ));
    out
}

// ============================================================================
// JSON FORMAT
// ============================================================================

fn format_json(report: &StoryReport) -> String {
    serde_json::to_string_pretty(report).unwrap_or_else(|e| {
        // This should never happen with our types, but fail explicitly
        panic!("Failed to serialize report to JSON: {}", e)
    })
}

// ============================================================================
// TESTS
// ============================================================================
