use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading data or talking to the outside world.
/// The filter/sort core never fails; it degrades to defaults instead.
#[derive(Error, Debug)]
pub enum ExplorerError {
    #[error("Stats file not found: {}", .0.display())]
    StatsNotFound(PathBuf),

    #[error("Could not determine a home directory")]
    NoHomeDirectory,

    #[error("Download failed: {reason}")]
    Download { reason: String },

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),
}

impl ExplorerError {
    /// Get a user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            ExplorerError::StatsNotFound(path) => format!(
                "No instance stats at {}. Pass --stats or --stats-url.",
                path.display()
            ),
            ExplorerError::NoHomeDirectory => {
                "Could not determine your home directory".to_string()
            }
            ExplorerError::Download { reason } => format!("Download failed: {}", reason),
            ExplorerError::Configuration(msg) => format!("Configuration error: {}", msg),
            ExplorerError::Io(e) => format!("File system error: {}", e),
            ExplorerError::Json(e) => format!("Data format error: {}", e),
            ExplorerError::Http(e) => format!("Network error: {}", e),
        }
    }
}
