//! yt-dlp process invocation
//!
//! Each operation is a single run of the yt-dlp binary. Metadata lookups
//! use `--dump-json` in simulate mode; downloads add `--no-simulate` so the
//! same run fetches the media, drives ffmpeg post-processing, and still
//! emits the info JSON the output path is derived from.

use async_trait::async_trait;
use regex::Regex;
use serde_json::Value;
use std::path::PathBuf;
use tokio::process::Command;

use super::{MediaExtractor, OutputFormat, VideoMetadata};
use crate::config::ExtractorConfig;
use crate::error::ExtractError;

/// Fallback title when the extractor reports none
const DEFAULT_TITLE: &str = "Video";

/// Output filename template inside the scratch directory
const OUTPUT_TEMPLATE: &str = "%(title)s.%(ext)s";

/// Extractor backed by the yt-dlp binary
pub struct YtDlpExtractor {
    config: ExtractorConfig,
}

impl YtDlpExtractor {
    pub fn new(config: ExtractorConfig) -> Self {
        Self { config }
    }

    /// Run yt-dlp with the given arguments and parse its info JSON.
    async fn run(&self, args: &[String]) -> Result<Value, ExtractError> {
        tracing::debug!("Invoking {} {:?}", self.config.ytdlp_path.display(), args);

        let output = Command::new(&self.config.ytdlp_path)
            .args(args)
            .output()
            .await
            .map_err(|e| ExtractError::Spawn {
                binary: self.config.ytdlp_path.display().to_string(),
                source: e,
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ExtractError::Download(error_line(&stderr)));
        }

        serde_json::from_slice(&output.stdout).map_err(|e| ExtractError::Parse(e.to_string()))
    }

    fn metadata_args(&self, url: &str) -> Vec<String> {
        vec![
            "--dump-json".to_string(),
            "--no-playlist".to_string(),
            "--no-warnings".to_string(),
            "--socket-timeout".to_string(),
            self.config.socket_timeout_secs.to_string(),
            url.to_string(),
        ]
    }

    fn download_args(&self, url: &str, format: OutputFormat) -> Vec<String> {
        let mut args = vec![
            "--dump-json".to_string(),
            "--no-simulate".to_string(),
            "--no-playlist".to_string(),
            "--no-warnings".to_string(),
            "--ffmpeg-location".to_string(),
            self.config.ffmpeg_path.display().to_string(),
            "-P".to_string(),
            self.config.scratch_dir.display().to_string(),
            "-o".to_string(),
            OUTPUT_TEMPLATE.to_string(),
        ];

        match format {
            OutputFormat::Mp3 => args.extend([
                "-f".to_string(),
                "bestaudio/best".to_string(),
                "-x".to_string(),
                "--audio-format".to_string(),
                "mp3".to_string(),
                "--audio-quality".to_string(),
                self.config.audio_quality.clone(),
            ]),
            OutputFormat::Mp4 => args.extend([
                "-f".to_string(),
                "bestvideo+bestaudio/best".to_string(),
                "--merge-output-format".to_string(),
                "mp4".to_string(),
            ]),
        }

        args.push(url.to_string());
        args
    }
}

#[async_trait]
impl MediaExtractor for YtDlpExtractor {
    async fn resolve_metadata(&self, url: &str) -> Result<VideoMetadata, ExtractError> {
        let info = self.run(&self.metadata_args(url)).await?;
        Ok(parse_metadata(&info))
    }

    async fn fetch_media(
        &self,
        url: &str,
        format: OutputFormat,
    ) -> Result<PathBuf, ExtractError> {
        let info = self.run(&self.download_args(url, format)).await?;
        output_path(&info, format)
    }
}

/// Read display metadata out of the info JSON, applying field defaults.
fn parse_metadata(info: &Value) -> VideoMetadata {
    VideoMetadata {
        title: info["title"].as_str().unwrap_or(DEFAULT_TITLE).to_string(),
        thumbnail: info["thumbnail"].as_str().unwrap_or("").to_string(),
    }
}

/// Derive the finished file's path from the info JSON. yt-dlp reports the
/// download target in `_filename`; audio extraction swaps the container
/// afterwards, so the extension is substituted for MP3 output.
fn output_path(info: &Value, format: OutputFormat) -> Result<PathBuf, ExtractError> {
    let reported = info["_filename"]
        .as_str()
        .ok_or_else(|| ExtractError::Parse("no _filename in extractor output".to_string()))?;

    let mut path = PathBuf::from(reported);
    if format == OutputFormat::Mp3 {
        path.set_extension("mp3");
    }
    Ok(path)
}

/// Pull the first "ERROR: ..." line out of yt-dlp's stderr, falling back to
/// the last non-empty line when there is none.
fn error_line(stderr: &str) -> String {
    let re = Regex::new(r"(?m)^ERROR:\s*(.+)$").expect("valid regex");
    if let Some(caps) = re.captures(stderr) {
        return caps[1].trim().to_string();
    }
    stderr
        .lines()
        .rev()
        .find(|l| !l.trim().is_empty())
        .unwrap_or("unknown extractor failure")
        .trim()
        .to_string()
}
