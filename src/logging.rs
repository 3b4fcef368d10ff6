use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

pub const LOG_FILE: &str = "dreamjob.log";

/// Sends tracing output to `<data_dir>/dreamjob.log`; the terminal belongs to the UI.
///
/// Returns the log path on success. Logging is optional, so any failure here
/// (unwritable directory, subscriber already installed) leaves it disabled.
pub fn init(data_dir: &Path, level: &str) -> Option<PathBuf> {
    std::fs::create_dir_all(data_dir).ok()?;
    let path = data_dir.join(LOG_FILE);
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .ok()?;

    let filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .try_init()
        .ok()?;

    Some(path)
}
