//! Server configuration

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Extractor configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractorConfig {
    /// Path to the yt-dlp binary (bare name resolves through PATH)
    pub ytdlp_path: PathBuf,

    /// Path to the ffmpeg binary used for post-processing
    pub ffmpeg_path: PathBuf,

    /// Directory finished downloads are written to
    pub scratch_dir: PathBuf,

    /// Socket timeout for metadata lookups in seconds
    pub socket_timeout_secs: u64,

    /// MP3 bitrate handed to the audio extractor (e.g. "192K")
    pub audio_quality: String,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            ytdlp_path: PathBuf::from("yt-dlp"),
            ffmpeg_path: PathBuf::from("ffmpeg"),
            scratch_dir: PathBuf::from("downloads"),
            socket_timeout_secs: 10,
            audio_quality: "192K".to_string(),
        }
    }
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host address to bind to
    pub host: String,

    /// Port to listen on
    pub port: u16,

    /// Extractor configuration
    pub extractor: ExtractorConfig,

    /// Enable CORS
    pub cors_enabled: bool,

    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            extractor: ExtractorConfig::default(),
            cors_enabled: true,
            log_level: "info".to_string(),
        }
    }
}

impl ServerConfig {
    /// Get the socket address string
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
