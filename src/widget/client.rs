use std::time::Duration;

use reqwest::Client;
use url::Url;

use crate::http_server::http_routes::now_playing::{NowPlayingResponse, PlayingPayload};

const FALLBACK_ERROR: &str = "An unexpected error occurred.";

/// Result of one poll of the JSON route, already reduced to what the widget shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollOutcome {
    Playing(PlayingPayload),
    Idle,
    Failed(String),
}

/// Polls a running server's `/api/now-playing` route.
pub struct NowPlayingClient {
    client: Client,
    endpoint: Url,
    timeout: Duration,
}

impl NowPlayingClient {
    pub fn new(client: Client, server_url: &Url, timeout: Duration) -> color_eyre::Result<Self> {
        let endpoint = server_url.join("/api/now-playing")?;
        Ok(Self {
            client,
            endpoint,
            timeout,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    pub async fn poll(&self) -> PollOutcome {
        let response = match self
            .client
            .get(self.endpoint.clone())
            .timeout(self.timeout)
            .send()
            .await
        {
            Ok(response) => response,
            Err(error) => return PollOutcome::Failed(error.to_string()),
        };

        let status = response.status();
        match response.text().await {
            Ok(body) => interpret(status.as_u16(), &body),
            Err(error) => PollOutcome::Failed(error.to_string()),
        }
    }
}

/// Maps a status and body from the JSON route onto a [`PollOutcome`].
///
/// Error bodies carry their message in `error`; anything unreadable gets a generic message.
pub fn interpret(status: u16, body: &str) -> PollOutcome {
    match serde_json::from_str::<NowPlayingResponse>(body) {
        Ok(NowPlayingResponse::Error { error }) => PollOutcome::Failed(error),
        Ok(_) if !(200..300).contains(&status) => {
            PollOutcome::Failed(format!("Server returned {status}"))
        }
        Ok(NowPlayingResponse::Playing(payload)) if payload.is_playing => {
            PollOutcome::Playing(payload)
        }
        Ok(_) => PollOutcome::Idle,
        Err(_) if (200..300).contains(&status) => PollOutcome::Failed(FALLBACK_ERROR.to_string()),
        Err(_) => PollOutcome::Failed(format!("Server returned {status}")),
    }
}
