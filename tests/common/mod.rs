/*!
 * Common test utilities for the capsync test suite
 */

use std::path::{Path, PathBuf};
use std::fs;
use anyhow::Result;
use tempfile::TempDir;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use url::Url;

use capsync::app_config::CaptionMessages;
use capsync::caption_sync::CaptionSync;
use capsync::caption_track::{CaptionTrack, Cue};
use capsync::display::RecordingDisplay;

/// A short caption file with a header, cue identifiers and a multi-line cue
pub const SAMPLE_VTT: &str = "WEBVTT
Kind: captions

1
00:00:01.000 --> 00:00:03.000
Welcome to the
database cheatsheet.

2
00:00:05.000 --> 00:00:08.000
Let's start with SELECT.

3
00:00:08.500 --> 00:00:10.000 align:start
Filtering with WHERE.
";

/// Routes library logs to the test output; safe to call from every test
pub fn init_test_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &Path, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// Creates the sample caption file in the specified directory
pub fn create_sample_captions(dir: &Path) -> Result<PathBuf> {
    create_test_file(dir, "captions.vtt", SAMPLE_VTT)
}

/// A sync that is ready with the given cues and records what it shows
pub fn ready_sync(cues: Vec<Cue>) -> CaptionSync<RecordingDisplay> {
    CaptionSync::with_track(
        RecordingDisplay::new(),
        CaptionMessages::default(),
        CaptionTrack::from_cues(cues),
    )
}

/// Serves one scripted HTTP response per connection, in order, then stops.
/// Returns the URL of the caption resource on that server.
pub async fn spawn_http_server(responses: Vec<(u16, &'static str)>) -> Result<Url> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;

    tokio::spawn(async move {
        for (status, body) in responses {
            let Ok((mut socket, _)) = listener.accept().await else {
                return;
            };

            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.ends_with(b"\r\n\r\n") {
                match socket.read(&mut buf).await {
                    Ok(0) | Err(_) => break,
                    Ok(n) => request.extend_from_slice(&buf[..n]),
                }
            }

            let reason = if status == 200 { "OK" } else { "Not Found" };
            let response = format!(
                "HTTP/1.1 {} {}\r\nContent-Type: text/vtt\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                reason,
                body.len(),
                body
            );
            let _ = socket.write_all(response.as_bytes()).await;
            let _ = socket.shutdown().await;
        }
    });

    Ok(Url::parse(&format!("http://{}/audio/captions.vtt", addr))?)
}
