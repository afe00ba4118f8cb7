//! Tracing subscriber setup.
//!
//! The TUI owns the terminal, so `play` logs to a file. `inspect` logs
//! to stderr, keeping stdout clean for JSON output.

use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter (e.g. `scene_player=debug`).
pub const LOG_ENV: &str = "SCENE_PLAYER_LOG";

/// Log file name inside the data directory.
const LOG_FILENAME: &str = "scene-player.log";

/// Default log file: `<data dir>/scene-player/scene-player.log`.
pub fn default_log_file() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("scene-player")
        .join(LOG_FILENAME)
}

fn filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Send tracing output to `path`, appending. Parent directories are created.
///
/// # Errors
/// Returns an error if the file cannot be opened.
pub fn init_file(path: &Path) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let file: File = OpenOptions::new().create(true).append(true).open(path)?;

    // A second init (tests, embedding) keeps the first subscriber.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter())
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init();
    Ok(())
}

/// Send tracing output to stderr.
pub fn init_stderr() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter())
        .with_target(false)
        .with_writer(io::stderr)
        .try_init();
}
