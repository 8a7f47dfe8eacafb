//! Application state management
//!
//! This module defines the AppState structure that holds:
//! - The extractor capability behind its narrow interface
//! - The startup readiness report
//! - Server configuration

use std::path::Path;
use std::sync::Arc;

use crate::config::ServerConfig;
use crate::extractor::ytdlp::YtDlpExtractor;
use crate::extractor::MediaExtractor;

/// Startup readiness report: non-fatal findings surfaced before serving
#[derive(Debug, Clone, Default)]
pub struct Readiness {
    pub warnings: Vec<String>,
}

impl Readiness {
    /// Probe the external binaries the extractor depends on. A missing
    /// binary degrades the endpoints that need it but does not prevent the
    /// server from starting.
    pub fn probe(config: &ServerConfig) -> Self {
        let mut warnings = Vec::new();
        for (name, path) in [
            ("yt-dlp", &config.extractor.ytdlp_path),
            ("ffmpeg", &config.extractor.ffmpeg_path),
        ] {
            if !binary_exists(path) {
                warnings.push(format!("{} not found at {}", name, path.display()));
            }
        }
        Self { warnings }
    }

    pub fn is_ready(&self) -> bool {
        self.warnings.is_empty()
    }
}

/// Explicit paths are checked on disk; a bare command name is resolved
/// through PATH.
fn binary_exists(path: &Path) -> bool {
    if path.is_absolute() || path.components().count() > 1 {
        return path.exists();
    }
    match std::env::var_os("PATH") {
        Some(paths) => std::env::split_paths(&paths).any(|dir| dir.join(path).is_file()),
        None => false,
    }
}

/// Application state shared across all handlers
pub struct AppState {
    /// Extraction capability
    pub extractor: Arc<dyn MediaExtractor>,

    /// Startup readiness report
    pub readiness: Readiness,

    /// Server configuration
    pub config: ServerConfig,
}

impl AppState {
    /// Create state backed by the real yt-dlp extractor
    pub fn new(config: ServerConfig) -> Self {
        let readiness = Readiness::probe(&config);
        let extractor = Arc::new(YtDlpExtractor::new(config.extractor.clone()));
        Self {
            extractor,
            readiness,
            config,
        }
    }

    /// Create state with an explicit extractor (used by tests)
    pub fn with_extractor(config: ServerConfig, extractor: Arc<dyn MediaExtractor>) -> Self {
        let readiness = Readiness::probe(&config);
        Self {
            extractor,
            readiness,
            config,
        }
    }

    /// Create the scratch directory finished downloads are written into
    pub fn prepare_scratch_dir(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.config.extractor.scratch_dir)
    }
}
