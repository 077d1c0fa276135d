use std::sync::Arc;

use tracing::instrument;

use crate::playback::{NowPlayingTrack, PlaybackState};
use crate::ports::spotify::SpotifyApi;
use crate::services::credentials::CredentialStore;
use crate::spotify_rs::types::{SpotifyCurrentlyPlaying, UpstreamReply};

const PARSE_ERROR_MESSAGE: &str = "Error parsing Spotify data.";

/// Fetches and normalizes the account's playback state.
///
/// Nothing is cached here; every call checks the credential and performs a fresh GET.
pub struct NowPlayingService {
    credentials: Arc<CredentialStore>,
    api: Arc<dyn SpotifyApi>,
}

impl NowPlayingService {
    pub fn new(credentials: Arc<CredentialStore>, api: Arc<dyn SpotifyApi>) -> Self {
        Self { credentials, api }
    }

    #[instrument(skip(self))]
    pub async fn get_now_playing(&self) -> PlaybackState {
        let access_token = match self.credentials.access_token().await {
            Ok(access_token) => access_token,
            Err(error) => {
                tracing::error!(error = %error, "Could not obtain a Spotify access token");
                return PlaybackState::error(error.to_string());
            }
        };

        let reply = match self.api.currently_playing(&access_token).await {
            Ok(reply) => reply,
            Err(error) => {
                tracing::error!(error = %error, "Currently playing request failed");
                return PlaybackState::error(error.to_string());
            }
        };

        if reply.status == 401 {
            // Revoked or expired early; make the next request mint a new one
            self.credentials.invalidate().await;
        }

        let state = classify(&reply);
        tracing::debug!(
            status = reply.status,
            playing = state.is_playing(),
            "Classified Spotify reply"
        );
        state
    }
}

/// Maps a raw currently-playing reply onto a [`PlaybackState`].
pub fn classify(reply: &UpstreamReply) -> PlaybackState {
    match reply.status {
        204 => PlaybackState::NotPlaying,
        401 | 403 => PlaybackState::error(format!(
            "Spotify rejected the access token ({}).",
            reply.status
        )),
        status if status >= 500 => {
            PlaybackState::error(format!("Spotify is unavailable ({status})."))
        }
        status if !(200..300).contains(&status) => PlaybackState::NotPlaying,
        _ if reply.body.trim().is_empty() => PlaybackState::NotPlaying,
        _ => match serde_json::from_str::<SpotifyCurrentlyPlaying>(&reply.body) {
            Ok(payload) => normalize(payload),
            Err(error) => {
                tracing::warn!(error = %error, "Failed to parse currently playing body");
                PlaybackState::error(PARSE_ERROR_MESSAGE)
            }
        },
    }
}

/// Projects the upstream payload onto the fields the badge and JSON route use.
pub fn normalize(payload: SpotifyCurrentlyPlaying) -> PlaybackState {
    let item = match payload.item {
        Some(item) if payload.is_playing => item,
        _ => return PlaybackState::NotPlaying,
    };

    let artist = item
        .artists
        .iter()
        .map(|artist| artist.name.as_str())
        .collect::<Vec<_>>()
        .join(", ");
    let (album, album_image_url) = match item.album {
        Some(album) => (
            album.name,
            album.images.into_iter().next().map(|image| image.url),
        ),
        None => (String::new(), None),
    };

    PlaybackState::Playing(NowPlayingTrack {
        title: item.name,
        artist,
        album,
        album_image_url,
        track_url: item.external_urls.spotify,
        progress_ms: payload.progress_ms.unwrap_or(0),
        duration_ms: item.duration_ms,
    })
}
