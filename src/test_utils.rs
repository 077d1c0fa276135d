use crate::playback::NowPlayingTrack;
use crate::services::credentials::SpotifySecrets;

/// A currently-playing body trimmed down to the fields Spotify always sends for a track.
pub const SAMPLE_PLAYING_BODY: &str = r#"{
    "is_playing": true,
    "progress_ms": 50000,
    "item": {
        "name": "X",
        "artists": [{ "name": "A" }, { "name": "B" }],
        "album": { "name": "Alb", "images": [{ "url": "http://img", "width": 640, "height": 640 }] },
        "external_urls": { "spotify": "http://t" },
        "duration_ms": 200000
    }
}"#;

pub fn sample_track() -> NowPlayingTrack {
    NowPlayingTrack {
        title: "X".into(),
        artist: "A, B".into(),
        album: "Alb".into(),
        album_image_url: Some("http://img".into()),
        track_url: Some("http://t".into()),
        progress_ms: 50_000,
        duration_ms: 200_000,
    }
}

pub fn test_secrets() -> SpotifySecrets {
    SpotifySecrets {
        client_id: Some("client-id".into()),
        client_secret: Some("client-secret".into()),
        refresh_token: Some("refresh-token".into()),
    }
}

/// What a [`serve_once`] server received.
#[derive(Debug, Clone)]
pub struct CapturedRequest {
    /// Request line and headers, header names lowercased
    pub head: String,
    pub body: String,
}

/// Accepts one connection on `127.0.0.1`, waits `delay`, then writes `response` verbatim.
///
/// Returns the base URL and a handle resolving to the request that was received.
pub async fn serve_once(
    response: Vec<u8>,
    delay: std::time::Duration,
) -> (String, tokio::task::JoinHandle<CapturedRequest>) {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base_url = format!("http://{}", listener.local_addr().unwrap());

    let handle = tokio::spawn(async move {
        let (mut stream, _) = listener.accept().await.unwrap();

        let mut received = Vec::new();
        let mut buf = [0u8; 4096];
        let head_end = loop {
            let read = stream.read(&mut buf).await.unwrap();
            received.extend_from_slice(&buf[..read]);
            if let Some(pos) = received.windows(4).position(|w| w == b"\r\n\r\n") {
                break pos + 4;
            }
            assert!(read > 0, "connection closed before the request head ended");
        };

        let head = String::from_utf8_lossy(&received[..head_end]).to_lowercase();
        let content_length = head
            .lines()
            .find_map(|line| line.strip_prefix("content-length:"))
            .and_then(|value| value.trim().parse::<usize>().ok())
            .unwrap_or(0);
        while received.len() < head_end + content_length {
            let read = stream.read(&mut buf).await.unwrap();
            if read == 0 {
                break;
            }
            received.extend_from_slice(&buf[..read]);
        }
        let body_end = received.len().min(head_end + content_length);
        let body = String::from_utf8_lossy(&received[head_end..body_end]).into_owned();

        tokio::time::sleep(delay).await;
        // The client may already have given up
        let _ = stream.write_all(&response).await;
        let _ = stream.shutdown().await;

        CapturedRequest { head, body }
    });

    (base_url, handle)
}

/// A `Connection: close` response with a `Content-Length` body.
pub fn http_response(status_line: &str, headers: &[(&str, &str)], body: &[u8]) -> Vec<u8> {
    let mut response = format!("HTTP/1.1 {status_line}\r\nconnection: close\r\n");
    for (name, value) in headers {
        response.push_str(&format!("{name}: {value}\r\n"));
    }
    response.push_str(&format!("content-length: {}\r\n\r\n", body.len()));
    let mut response = response.into_bytes();
    response.extend_from_slice(body);
    response
}

/// A `200 OK` using chunked transfer encoding, so the client never sees a length up front.
pub fn chunked_response(content_type: &str, chunks: &[&[u8]]) -> Vec<u8> {
    let mut response = format!(
        "HTTP/1.1 200 OK\r\nconnection: close\r\ncontent-type: {content_type}\r\ntransfer-encoding: chunked\r\n\r\n"
    )
    .into_bytes();
    for chunk in chunks {
        response.extend_from_slice(format!("{:x}\r\n", chunk.len()).as_bytes());
        response.extend_from_slice(chunk);
        response.extend_from_slice(b"\r\n");
    }
    response.extend_from_slice(b"0\r\n\r\n");
    response
}
