use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LogError {
    #[error("failed to open log file {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write log file {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("log file {} is disabled: {reason}", .path.display())]
    Disabled { path: PathBuf, reason: String },
    #[error("stderr is already captured into {}", .path.display())]
    AlreadyBound { path: PathBuf },
    #[error("stderr redirection failed: {0}")]
    Redirect(#[from] std::io::Error),
    #[error("stderr capture is not supported on this platform")]
    Unsupported,
}

pub type Result<T> = std::result::Result<T, LogError>;
