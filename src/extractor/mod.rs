//! Extraction boundary
//!
//! All media knowledge lives on the other side of the [`MediaExtractor`]
//! trait: resolving a video URL into display metadata, and fetching plus
//! post-processing the media into a local file. The HTTP layer only ever
//! sees this narrow interface, so the concrete yt-dlp invocation can be
//! swapped for a fake in tests.

pub mod ytdlp;

use async_trait::async_trait;
use std::path::PathBuf;

use crate::error::ExtractError;

/// Display metadata for a resolved video URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoMetadata {
    pub title: String,
    pub thumbnail: String,
}

/// Output container requested by the client
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Best-audio stream, extracted to MP3
    Mp3,
    /// Best video+audio, merged into MP4
    Mp4,
}

impl OutputFormat {
    /// Only the literal "mp3" selects audio extraction; every other format
    /// string falls through to the merged MP4 path.
    pub fn from_request(format: &str) -> Self {
        if format == "mp3" {
            Self::Mp3
        } else {
            Self::Mp4
        }
    }

    /// File extension of the finished download
    pub fn extension(self) -> &'static str {
        match self {
            Self::Mp3 => "mp3",
            Self::Mp4 => "mp4",
        }
    }

    /// Content-Type the finished download is served with
    pub fn content_type(self) -> &'static str {
        match self {
            Self::Mp3 => "audio/mpeg",
            Self::Mp4 => "video/mp4",
        }
    }
}

/// Capability interface for the video extractor
#[async_trait]
pub trait MediaExtractor: Send + Sync {
    /// Resolve display metadata without downloading anything
    async fn resolve_metadata(&self, url: &str) -> Result<VideoMetadata, ExtractError>;

    /// Download the media and post-process it into `format`.
    /// Returns the path of the finished file.
    async fn fetch_media(&self, url: &str, format: OutputFormat)
        -> Result<PathBuf, ExtractError>;
}
