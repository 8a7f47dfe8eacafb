use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the download server
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Extractor error: {0}")]
    Extract(#[from] ExtractError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Output file missing after download: {}", .0.display())]
    MissingOutput(PathBuf),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Errors reported at the extractor boundary
#[derive(Error, Debug)]
pub enum ExtractError {
    /// The extractor ran but reported the operation itself failed:
    /// bad URL, restricted video, unavailable format. Client-caused.
    #[error("Download failed: {0}")]
    Download(String),

    #[error("Failed to launch {binary}: {source}")]
    Spawn {
        binary: String,
        source: std::io::Error,
    },

    #[error("Failed to parse extractor output: {0}")]
    Parse(String),
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, ServerError>;
