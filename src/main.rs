//! scene-player CLI
//!
//! Play a linear video story in the terminal, or inspect its manifest
//! and assets.

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};

use scene_player::assets::build_report;
use scene_player::logging::{self, default_log_file};
use scene_player::report::format_report;
use scene_player::source::{load_descriptors, StoryLocation};
use scene_player::story::Story;
use scene_player::tui::run::run;
use scene_player::tui::state::LoadState;
use scene_player::types::{AssetConfig, OutputFormat, PlayerConfig};

#[derive(Parser)]
#[command(name = "scene-player")]
#[command(about = "Play a linear interactive video story in the terminal")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a story interactively
    Play {
        /// Story manifest: a JSON file path or an http(s) URL
        story: String,

        /// Asset directory or base URL (default: assets/scenes next to the story)
        #[arg(long)]
        assets: Option<String>,

        /// Media player command; the video path is appended
        #[arg(long)]
        player: Option<String>,

        /// Log file (default: in the user data directory)
        #[arg(long)]
        log_file: Option<PathBuf>,
    },

    /// List scenes, links and asset status (no playback)
    Inspect {
        /// Story manifest: a JSON file path or an http(s) URL
        story: String,

        /// Asset directory or base URL (default: assets/scenes next to the story)
        #[arg(long)]
        assets: Option<String>,

        /// Output format
        #[arg(long, value_enum, default_value = "human")]
        format: OutputFormatArg,
    },
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum OutputFormatArg {
    Human,
    Json,
}

impl From<OutputFormatArg> for OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Human => OutputFormat::Human,
            OutputFormatArg::Json => OutputFormat::Json,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Play {
            story,
            assets,
            player,
            log_file,
        } => cmd_play(story, assets, player, log_file),
        Commands::Inspect { story, assets, format } => cmd_inspect(story, assets, format.into()),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

// ============================================================================
// CONFIG RESOLUTION
// ============================================================================

/// Parse the story argument and pick the asset base.
fn resolve_story(
    story: &str,
    assets: Option<String>,
) -> Result<(StoryLocation, AssetConfig), String> {
    let location = StoryLocation::parse(story).map_err(|e| e.to_string())?;
    let base = assets.unwrap_or_else(|| location.default_asset_base());
    let config = AssetConfig {
        base,
        ..Default::default()
    };
    Ok((location, config))
}

/// Split a `--player` value into program and arguments.
fn resolve_player(player: Option<String>) -> Result<Vec<String>, String> {
    let Some(player) = player else {
        return Ok(PlayerConfig::default().player_command);
    };
    let command: Vec<String> = player.split_whitespace().map(String::from).collect();
    if command.is_empty() {
        return Err("--player must name a program".to_string());
    }
    Ok(command)
}

// ============================================================================
// PROGRESS HELPERS
// ============================================================================

fn spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .unwrap(),
    );
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

// ============================================================================
// COMMAND HANDLERS
// ============================================================================

fn cmd_play(
    story: String,
    assets: Option<String>,
    player: Option<String>,
    log_file: Option<PathBuf>,
) -> Result<(), String> {
    let (location, assets) = resolve_story(&story, assets)?;
    let player_command = resolve_player(player)?;

    let log_file = log_file.unwrap_or_else(default_log_file);
    logging::init_file(&log_file)
        .map_err(|e| format!("Cannot open log file {}: {}", log_file.display(), e))?;

    let config = PlayerConfig {
        assets,
        player_command,
        log_file,
    };
    let log_path = config.log_file.clone();

    let load = run(config, location).map_err(|e| format!("Terminal error: {}", e))?;

    match load {
        LoadState::Failed(reason) => Err(format!(
            "Story did not start: {}\nSee log: {}",
            reason,
            log_path.display()
        )),
        LoadState::Loading | LoadState::Ready => Ok(()),
    }
}

fn cmd_inspect(story: String, assets: Option<String>, format: OutputFormat) -> Result<(), String> {
    logging::init_stderr();
    let (location, assets) = resolve_story(&story, assets)?;

    // Spinner goes to stderr, but stays off for JSON to keep output scriptable
    let show_progress = format == OutputFormat::Human;
    let sp = show_progress.then(|| spinner("Loading story..."));

    let descriptors = match load_descriptors(&location) {
        Ok(d) => d,
        Err(e) => {
            if let Some(sp) = &sp {
                sp.finish_and_clear();
            }
            return Err(e.to_string());
        }
    };

    let story = match Story::build(&descriptors, &assets) {
        Ok(s) => s,
        Err(e) => {
            if let Some(sp) = &sp {
                sp.finish_and_clear();
            }
            return Err(e.to_string());
        }
    };

    if let Some(sp) = &sp {
        sp.set_message(format!("Probing assets for {} scenes...", story.len()));
    }
    let report = build_report(&location.to_string(), &descriptors, &story, &assets);
    if let Some(sp) = sp {
        sp.finish_and_clear();
    }

    print!("{}", format_report(&report, format));

    Ok(())
}
