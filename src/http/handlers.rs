//! HTTP request handlers
//!
//! Implements the metadata-lookup and download endpoints plus the
//! health/version surface.

use axum::{
    extract::State,
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use tokio_util::io::ReaderStream;

use crate::error::{ExtractError, ServerError};
use crate::extractor::OutputFormat;
use crate::state::AppState;

/// Request body for metadata lookup. Fields are optional so a missing key
/// reaches the validation path instead of the deserializer.
#[derive(Debug, Deserialize)]
pub struct VideoInfoRequest {
    pub url: Option<String>,
}

/// Response body for a successful metadata lookup
#[derive(Debug, Serialize)]
pub struct VideoInfoResponse {
    pub title: String,
    pub thumbnail: String,
}

/// Request body for a download
#[derive(Debug, Deserialize)]
pub struct DownloadRequest {
    pub url: Option<String>,
    pub format: Option<String>,
}

/// Error body returned to clients. Always a generic message; the
/// underlying detail stays in the server log.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// HTTP error type: the two response tiers
#[derive(Debug)]
pub enum HttpError {
    /// Missing request fields or an extractor-reported download failure
    BadRequest(String),
    /// Everything else
    InternalError(String),
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            HttpError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            HttpError::InternalError(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

impl From<ServerError> for HttpError {
    fn from(err: ServerError) -> Self {
        match err {
            ServerError::Extract(ExtractError::Download(_)) => HttpError::BadRequest(
                "Video download failed. URL may be invalid or restricted.".to_string(),
            ),
            ServerError::MissingOutput(_) => {
                HttpError::InternalError("Download failed. Please try again.".to_string())
            }
            _ => HttpError::InternalError("Internal Server Error".to_string()),
        }
    }
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "OK"
}

/// Version endpoint
pub async fn version_check() -> &'static str {
    concat!("ytdl-server v", env!("CARGO_PKG_VERSION"))
}

/// Metadata lookup endpoint
/// POST /video_info
pub async fn video_info(
    State(state): State<Arc<AppState>>,
    Json(request): Json<VideoInfoRequest>,
) -> Response {
    let url = match request.url.as_deref().filter(|u| !u.is_empty()) {
        Some(u) => u.to_string(),
        None => return HttpError::BadRequest("No URL provided".to_string()).into_response(),
    };

    match state.extractor.resolve_metadata(&url).await {
        Ok(meta) => Json(VideoInfoResponse {
            title: meta.title,
            thumbnail: meta.thumbnail,
        })
        .into_response(),
        Err(err) => {
            tracing::error!("Error fetching video info for {}: {}", url, err);
            // Lookup failures keep the 200 status with an error payload;
            // deployed frontends depend on this response shape.
            Json(ErrorResponse {
                error: "Failed to retrieve video info. Please check the URL.".to_string(),
            })
            .into_response()
        }
    }
}

/// Download endpoint
/// POST /download
pub async fn download(
    State(state): State<Arc<AppState>>,
    Json(request): Json<DownloadRequest>,
) -> Result<Response, HttpError> {
    let (url, format) = match (
        request.url.as_deref().filter(|u| !u.is_empty()),
        request.format.as_deref().filter(|f| !f.is_empty()),
    ) {
        (Some(u), Some(f)) => (u.to_string(), OutputFormat::from_request(f)),
        _ => {
            return Err(HttpError::BadRequest(
                "Missing URL or format selection".to_string(),
            ))
        }
    };

    // One fetch-and-encode per request; the call holds the request for the
    // whole network transfer and local encode.
    let path = state.extractor.fetch_media(&url, format).await.map_err(|err| {
        tracing::error!("Download error for {}: {}", url, err);
        HttpError::from(ServerError::Extract(err))
    })?;

    let file = match tokio::fs::File::open(&path).await {
        Ok(f) => f,
        Err(_) => {
            let err = ServerError::MissingOutput(path.clone());
            tracing::error!("{}", err);
            return Err(HttpError::from(err));
        }
    };

    serve_attachment(file, &path, format).await
}

/// Stream a finished download back as an attachment
async fn serve_attachment(
    file: tokio::fs::File,
    path: &Path,
    format: OutputFormat,
) -> Result<Response, HttpError> {
    let len = file
        .metadata()
        .await
        .map(|m| m.len())
        .map_err(|err| {
            tracing::error!("Failed to stat {}: {}", path.display(), err);
            HttpError::InternalError("Internal Server Error".to_string())
        })?;

    let filename = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| format!("download.{}", format.extension()));

    let mut headers = HeaderMap::new();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static(format.content_type()),
    );
    headers.insert(header::CONTENT_LENGTH, HeaderValue::from(len));
    // The filename comes from the video title; strip quotes so the header
    // value stays parseable.
    if let Ok(value) = HeaderValue::from_str(&format!(
        "attachment; filename=\"{}\"",
        filename.replace('"', "")
    )) {
        headers.insert(header::CONTENT_DISPOSITION, value);
    }

    let body = axum::body::Body::from_stream(ReaderStream::new(file));
    Ok((headers, body).into_response())
}
