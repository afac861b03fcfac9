// Error type shared by config loading, logging setup and the worker/GUI startup path.
// The signal math, sampler, clock and planner never fail.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to read config file {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    ConfigParse(#[from] serde_json::Error),

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("failed to open log file {path}: {source}")]
    LogFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to install logger: {0}")]
    Logger(#[from] log::SetLoggerError),

    #[error("failed to build animation runtime: {0}")]
    Runtime(#[source] std::io::Error),

    #[error("gui failed: {0}")]
    Gui(String),

    #[error("animation worker panicked")]
    WorkerPanicked,
}

pub type Result<T> = std::result::Result<T, Error>;
