use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::Path;

use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;

const ROTATE_ABOVE: usize = 1000;
const KEEP_LINES: usize = 750;

/// Trim the log file to its newest 750 lines once it grows past 1000.
pub fn rotate_log(path: &Path) {
    let Ok(content) = fs::read_to_string(path) else {
        return;
    };
    let lines: Vec<&str> = content.lines().collect();
    if lines.len() <= ROTATE_ABOVE {
        return;
    }
    let trimmed = lines[lines.len() - KEEP_LINES..].join("\n");
    let _ = fs::write(path, format!("{}\n", trimmed));
}

/// Set up file-based logging with tracing-subscriber.
///
/// Nothing is written to stderr so the TUI is not disturbed. The filter
/// comes from `level` when given, then `RUST_LOG`, then `tuido=info,warn`.
pub fn setup_logging(path: &Path, level: Option<&str>) -> io::Result<()> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }
    rotate_log(path);
    let log_file = open_log_file(path)?;

    let env_filter = match level {
        Some(level) => EnvFilter::new(format!("tuido={},warn", level)),
        None => EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("tuido=info,warn")),
    };

    let file_layer = fmt::layer()
        .with_writer(log_file)
        .with_ansi(false)
        .with_target(true)
        .with_level(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .init();

    tracing::debug!("logging to {}", path.display());
    Ok(())
}

fn open_log_file(path: &Path) -> io::Result<File> {
    OpenOptions::new().create(true).append(true).open(path)
}
