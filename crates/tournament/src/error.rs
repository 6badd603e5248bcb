//! Error type shared by the driver, the aggregator and config loading

use std::path::PathBuf;
use std::process::ExitStatus;
use std::time::Duration;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TournamentError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to launch `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed waiting on tournament run {run}: {source}")]
    Wait {
        run: u32,
        #[source]
        source: std::io::Error,
    },

    #[error("tournament run {run} exited with {status}")]
    RunFailed { run: u32, status: ExitStatus },

    #[error("tournament run {run} did not finish within {timeout:?}")]
    Timeout { run: u32, timeout: Duration },

    #[error("invalid config {path}: {message}")]
    Config { path: PathBuf, message: String },

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("summary JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl TournamentError {
    /// Wrap an I/O error with the path it happened on
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, TournamentError>;
