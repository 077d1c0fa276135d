use std::sync::Arc;

use axum::{
    Json,
    extract::State,
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::http_server::http_routes::random_badge::NO_STORE;
use crate::http_server::state::AppState;
use crate::playback::PlaybackState;

/// Body of `GET /api/now-playing`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NowPlayingResponse {
    Playing(PlayingPayload),
    Idle {
        #[serde(rename = "isPlaying")]
        is_playing: bool,
    },
    Error {
        error: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayingPayload {
    pub is_playing: bool,
    pub title: String,
    pub artist: String,
    pub album: String,
    pub album_image_url: Option<String>,
    pub song_url: Option<String>,
    pub progress: u64,
    pub duration: u64,
}

impl From<&PlaybackState> for NowPlayingResponse {
    fn from(state: &PlaybackState) -> Self {
        match state {
            PlaybackState::Playing(track) => NowPlayingResponse::Playing(PlayingPayload {
                is_playing: true,
                title: track.title.clone(),
                artist: track.artist.clone(),
                album: track.album.clone(),
                album_image_url: track.album_image_url.clone(),
                song_url: track.track_url.clone(),
                progress: track.progress_ms,
                duration: track.duration_ms,
            }),
            PlaybackState::NotPlaying => NowPlayingResponse::Idle { is_playing: false },
            PlaybackState::Error { message } => NowPlayingResponse::Error {
                error: message.clone(),
            },
        }
    }
}

pub async fn get_now_playing(State(app_state): State<Arc<AppState>>) -> Response {
    let state = app_state.now_playing.get_now_playing().await;
    // Failures must not be held by shared caches
    let (status, cache_control) = match state {
        PlaybackState::Error { .. } => (
            StatusCode::INTERNAL_SERVER_ERROR,
            HeaderValue::from_static(NO_STORE),
        ),
        _ => (StatusCode::OK, app_state.cache_control.clone()),
    };

    (
        status,
        [(header::CACHE_CONTROL, cache_control)],
        Json(NowPlayingResponse::from(&state)),
    )
        .into_response()
}
