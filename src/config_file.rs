//! Configuration file support
//!
//! Loads server configuration from TOML files.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::config::{ExtractorConfig, ServerConfig};

/// Configuration file format
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigFile {
    /// Server settings
    pub server: ServerSettings,
    /// Extractor settings
    pub extractor: Option<ExtractorSettings>,
    /// Logging settings
    pub logging: Option<LoggingSettings>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSettings {
    /// Host address to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Enable CORS
    pub cors_enabled: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractorSettings {
    /// Path to the yt-dlp binary
    pub ytdlp_path: Option<PathBuf>,
    /// Path to the ffmpeg binary
    pub ffmpeg_path: Option<PathBuf>,
    /// Directory finished downloads are written to
    pub scratch_dir: Option<PathBuf>,
    /// Socket timeout for metadata lookups in seconds
    pub socket_timeout_secs: Option<u64>,
    /// MP3 bitrate for audio extraction
    pub audio_quality: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
    /// Output format (json, pretty)
    pub format: Option<String>,
}

impl ConfigFile {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn std::error::Error>> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config: ConfigFile = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), Box<dyn std::error::Error>> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path.as_ref(), content)?;
        Ok(())
    }

    /// Generate default configuration file
    pub fn default_config() -> Self {
        let defaults = ExtractorConfig::default();
        Self {
            server: ServerSettings {
                host: "0.0.0.0".to_string(),
                port: 5000,
                cors_enabled: Some(true),
            },
            extractor: Some(ExtractorSettings {
                ytdlp_path: Some(defaults.ytdlp_path),
                ffmpeg_path: Some(defaults.ffmpeg_path),
                scratch_dir: Some(defaults.scratch_dir),
                socket_timeout_secs: Some(defaults.socket_timeout_secs),
                audio_quality: Some(defaults.audio_quality),
            }),
            logging: Some(LoggingSettings {
                level: "info".to_string(),
                format: Some("pretty".to_string()),
            }),
        }
    }

    /// Convert to ServerConfig
    pub fn into_server_config(self) -> ServerConfig {
        let defaults = ExtractorConfig::default();
        let extractor = match self.extractor {
            Some(e) => ExtractorConfig {
                ytdlp_path: e.ytdlp_path.unwrap_or(defaults.ytdlp_path),
                ffmpeg_path: e.ffmpeg_path.unwrap_or(defaults.ffmpeg_path),
                scratch_dir: e.scratch_dir.unwrap_or(defaults.scratch_dir),
                socket_timeout_secs: e.socket_timeout_secs.unwrap_or(defaults.socket_timeout_secs),
                audio_quality: e.audio_quality.unwrap_or(defaults.audio_quality),
            },
            None => defaults,
        };

        ServerConfig {
            host: self.server.host,
            port: self.server.port,
            extractor,
            cors_enabled: self.server.cors_enabled.unwrap_or(true),
            log_level: self
                .logging
                .map(|l| l.level)
                .unwrap_or_else(|| "info".to_string()),
        }
    }
}

/// Generate default configuration file at the specified path
pub fn generate_default_config<P: AsRef<Path>>(path: P) -> Result<(), Box<dyn std::error::Error>> {
    let config = ConfigFile::default_config();
    config.to_file(path)?;
    Ok(())
}
