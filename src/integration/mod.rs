//! End-to-end tests
//!
//! Exercise the full HTTP surface over a real listener with a scripted
//! extractor behind the capability seam.

use std::path::PathBuf;
use std::sync::Arc;

use crate::config::ServerConfig;
use crate::extractor::testing::FakeExtractor;
use crate::extractor::VideoMetadata;
use crate::http::create_router;
use crate::state::AppState;

/// Bind the router on an ephemeral port and return its base URL.
async fn spawn_server(extractor: FakeExtractor) -> String {
    let state = Arc::new(AppState::with_extractor(
        ServerConfig::default(),
        Arc::new(extractor),
    ));
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral port");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve");
    });

    format!("http://{}", addr)
}

fn resolved_extractor() -> FakeExtractor {
    FakeExtractor {
        metadata: Some(VideoMetadata {
            title: "Video".to_string(),
            thumbnail: String::new(),
        }),
        ..Default::default()
    }
}

#[tokio::test]
async fn test_video_info_end_to_end() {
    let base = spawn_server(resolved_extractor()).await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{}/video_info", base))
        .json(&serde_json::json!({ "url": "https://example.com/v" }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["title"], "Video");
    assert_eq!(body["thumbnail"], "");
}

#[tokio::test]
async fn test_video_info_missing_url_end_to_end() {
    let base = spawn_server(resolved_extractor()).await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{}/video_info", base))
        .json(&serde_json::json!({}))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 400);
    let body: serde_json::Value = response.json().await.unwrap();
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_download_extension_follows_format() {
    let dir = tempfile::tempdir().unwrap();

    for (format, expected_name, expected_type) in [
        ("mp3", "sample.mp3", "audio/mpeg"),
        ("mp4", "sample.mp4", "video/mp4"),
        ("flac", "sample.mp4", "video/mp4"), // anything but "mp3" merges to MP4
    ] {
        let extractor = FakeExtractor {
            media_dir: Some(dir.path().to_path_buf()),
            ..Default::default()
        };
        let base = spawn_server(extractor).await;
        let client = reqwest::Client::new();

        let response = client
            .post(format!("{}/download", base))
            .json(&serde_json::json!({ "url": "https://example.com/v", "format": format }))
            .send()
            .await
            .unwrap();

        assert_eq!(response.status(), 200, "format {}", format);
        assert_eq!(
            response.headers()["content-type"],
            expected_type,
            "format {}",
            format
        );
        let disposition = response.headers()["content-disposition"]
            .to_str()
            .unwrap()
            .to_string();
        assert!(
            disposition.contains(expected_name),
            "format {}: {}",
            format,
            disposition
        );
        assert_eq!(response.bytes().await.unwrap().as_ref(), b"media bytes");
    }
}

#[tokio::test]
async fn test_download_failure_tiers_end_to_end() {
    // Extractor-reported failure -> 400
    let base = spawn_server(FakeExtractor::default()).await;
    let client = reqwest::Client::new();
    let response = client
        .post(format!("{}/download", base))
        .json(&serde_json::json!({ "url": "https://example.com/v", "format": "mp3" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 400);

    // Reported-successful download with a vanished file -> 500
    let extractor = FakeExtractor {
        media_path: Some(PathBuf::from("/nonexistent/gone.mp4")),
        ..Default::default()
    };
    let base = spawn_server(extractor).await;
    let response = client
        .post(format!("{}/download", base))
        .json(&serde_json::json!({ "url": "https://example.com/v", "format": "mp4" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 500);
}

#[tokio::test]
async fn test_parallel_requests_all_served() {
    let base = spawn_server(resolved_extractor()).await;
    let client = reqwest::Client::new();

    let mut handles = Vec::new();
    for _ in 0..8 {
        let client = client.clone();
        let base = base.clone();
        handles.push(tokio::spawn(async move {
            client
                .post(format!("{}/video_info", base))
                .json(&serde_json::json!({ "url": "https://example.com/v" }))
                .send()
                .await
                .unwrap()
                .status()
        }));
    }

    for handle in handles {
        assert_eq!(handle.await.unwrap(), 200);
    }
}
