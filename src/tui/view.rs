//! Pure rendering: map App state to ratatui widget trees.
//!
//! Layout, top to bottom: title, media panel, scene text, choices, hint,
//! status and help. The media panel shows whichever layer is in front.

use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

use crate::sequencer::Phase;
use crate::surface::Layer;

use super::state::{App, LoadState, Playback, Stage, VideoSlot};
use super::theme;

/// Rows reserved for the scene text.
const TEXT_HEIGHT: u16 = 3;

// ============================================================================
// DISPATCH
// ============================================================================

/// Render the stage to the terminal frame.
pub fn render(app: &App, frame: &mut Frame) {
    let area = frame.area();
    let stage = &app.stage;

    let choices_height = stage.choices.len().min(u16::MAX as usize) as u16;
    let chunks = Layout::vertical([
        Constraint::Length(1),              // title
        Constraint::Min(3),                 // media panel
        Constraint::Length(TEXT_HEIGHT),    // scene text
        Constraint::Length(choices_height), // choices
        Constraint::Length(1),              // hint
        Constraint::Length(1),              // status
        Constraint::Length(1),              // help
    ])
    .split(area);

    frame.render_widget(render_title(app), chunks[0]);
    render_media(stage, frame, chunks[1]);
    frame.render_widget(render_text(stage), chunks[2]);
    render_choices(stage, frame, chunks[3]);
    frame.render_widget(render_hint(stage), chunks[4]);
    frame.render_widget(render_status(app), chunks[5]);
    frame.render_widget(render_help(app.sequencer.phase()), chunks[6]);
}

// ============================================================================
// SHARED LAYOUT
// ============================================================================

/// Title bar: app name and the current scene id.
fn render_title(app: &App) -> Paragraph<'static> {
    let mut spans = vec![Span::styled("scene-player", theme::STYLE_TITLE)];
    if let Some(id) = &app.sequencer.state().current_scene_id {
        spans.push(Span::styled("  ·  ", theme::STYLE_DIM));
        spans.push(Span::styled(id.clone(), theme::STYLE_IMPORTANT));
    }
    Paragraph::new(Line::from(spans))
}

/// Help line showing available keybindings for the current phase.
fn render_help(phase: Phase) -> Paragraph<'static> {
    let help_text = match phase {
        Phase::Idle | Phase::Revealing | Phase::Playing => "[q] quit",
        Phase::Entered => "[Enter] reveal  [q] quit",
        Phase::Blocked => "[p] play  [q] quit",
        Phase::ChoicesShown => "[j/k] move  [Enter] choose  [q] quit",
    };

    Paragraph::new(Span::styled(help_text, theme::STYLE_HELP))
}

// ============================================================================
// MEDIA PANEL
// ============================================================================

fn render_media(stage: &Stage, frame: &mut Frame, area: Rect) {
    let (title, lines) = match (stage.front, stage.visible_video()) {
        (Layer::Video, Some(video)) => (" Video ", video_lines(video)),
        _ => (" Image ", image_lines(stage)),
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::STYLE_FRAME)
        .title(Span::styled(title, theme::STYLE_DIM));

    // Vertically center the content inside the border
    let inner_height = area.height.saturating_sub(2) as usize;
    let pad = inner_height.saturating_sub(lines.len()) / 2;
    let mut padded = vec![Line::from(""); pad];
    padded.extend(lines);

    let paragraph = Paragraph::new(padded)
        .block(block)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

fn image_lines(stage: &Stage) -> Vec<Line<'static>> {
    match &stage.image {
        Some(image) => vec![
            Line::from(Span::styled("[ still ]", theme::STYLE_IMPORTANT)),
            Line::from(Span::styled(image.to_string(), theme::STYLE_DIM)),
        ],
        None => vec![Line::from(Span::styled("(no scene)", theme::STYLE_DIM))],
    }
}

fn video_lines(video: &VideoSlot) -> Vec<Line<'static>> {
    let state = match video.playback {
        Playback::Loading => Span::styled("Buffering...", theme::STYLE_DIM),
        Playback::Playing => Span::styled("▶ Playing", theme::STYLE_PLAYING),
        Playback::Paused => Span::styled("❚❚ Paused", theme::STYLE_WARNING),
    };
    let mut lines = vec![Line::from(state)];
    // The poster stands in for the frame until playback starts
    if video.playback != Playback::Playing {
        lines.push(Line::from(Span::styled(
            format!("poster: {}", video.poster),
            theme::STYLE_DIM,
        )));
    }
    lines.push(Line::from(Span::styled(video.src.to_string(), theme::STYLE_DIM)));
    lines
}

// ============================================================================
// TEXT, CHOICES, HINT
// ============================================================================

fn render_text(stage: &Stage) -> Paragraph<'static> {
    Paragraph::new(Line::from(Span::styled(
        stage.text.clone(),
        theme::STYLE_IMPORTANT,
    )))
    .wrap(Wrap { trim: true })
}

fn render_choices(stage: &Stage, frame: &mut Frame, area: Rect) {
    let lines: Vec<Line> = stage
        .choices
        .iter()
        .enumerate()
        .map(|(i, choice)| {
            if i == stage.cursor {
                Line::from(format!("  > {}", choice.label)).style(theme::STYLE_CURSOR)
            } else {
                Line::from(Span::styled(
                    format!("    {}", choice.label),
                    theme::STYLE_INTERACTIVE,
                ))
            }
        })
        .collect();

    // Scroll: keep the cursor row visible
    let visible_height = area.height as usize;
    let scroll_offset = if visible_height > 0 && stage.cursor >= visible_height {
        stage.cursor - visible_height + 1
    } else {
        0
    };

    let paragraph = Paragraph::new(lines).scroll((scroll_offset as u16, 0));
    frame.render_widget(paragraph, area);
}

fn render_hint(stage: &Stage) -> Paragraph<'static> {
    match theme::hint_style(stage.hint.opacity) {
        Some(style) => Paragraph::new(Span::styled(stage.hint.text.clone(), style))
            .alignment(Alignment::Center),
        None => Paragraph::new(""),
    }
}

fn render_status(app: &App) -> Paragraph<'static> {
    let text = match (&app.load, &app.stage.status) {
        (_, Some(status)) => status.clone(),
        (LoadState::Failed(_), None) => "Story unavailable (see log). [q] quit".to_string(),
        _ => String::new(),
    };
    Paragraph::new(Span::styled(text, theme::STYLE_WARNING))
}

// ============================================================================
// TESTS
// ============================================================================
