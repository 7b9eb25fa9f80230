use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

pub const LOG_FILE: &str = "tiered.log";

#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    #[error("could not open log file {path}: {source}")]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not install log subscriber: {0}")]
    Init(#[from] tracing_subscriber::util::TryInitError),
}

/// Send logs to `tiered.log` in the data directory. The terminal belongs
/// to the UI, so nothing goes to stderr. `RUST_LOG` overrides the default
/// `info` level.
pub fn init(dir: &Path) -> Result<PathBuf, LoggingError> {
    let path = dir.join(LOG_FILE);
    let open_err = |e| LoggingError::Open {
        path: path.clone(),
        source: e,
    };
    fs::create_dir_all(dir).map_err(open_err)?;
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .map_err(open_err)?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(Mutex::new(file)).with_ansi(false))
        .try_init()?;
    Ok(path)
}
