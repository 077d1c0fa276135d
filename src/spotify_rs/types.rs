use serde::{Deserialize, Serialize};

/// Spotify OAuth token response for the refresh-token grant
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpotifyTokenResponse {
    #[serde(default)]
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
    #[serde(default)]
    pub expires_in: u64,
    #[serde(default)]
    pub scope: Option<String>,
}

/// Body of a rejected token request
/// https://datatracker.ietf.org/doc/html/rfc6749#section-5.2
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SpotifyAuthErrorBody {
    pub error: Option<String>,
    pub error_description: Option<String>,
}

/// `GET /v1/me/player/currently-playing`
///
/// Only the fields the badge needs are modelled. Episodes and local files leave most of the
/// track fields empty, so everything below `item` is lenient.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SpotifyCurrentlyPlaying {
    #[serde(default)]
    pub is_playing: bool,
    #[serde(default)]
    pub progress_ms: Option<u64>,
    #[serde(default)]
    pub item: Option<SpotifyPlayingItem>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SpotifyPlayingItem {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub artists: Vec<SpotifyArtist>,
    #[serde(default)]
    pub album: Option<SpotifyAlbum>,
    #[serde(default)]
    pub external_urls: SpotifyExternalUrls,
    #[serde(default)]
    pub duration_ms: u64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SpotifyArtist {
    pub name: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SpotifyAlbum {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub images: Vec<SpotifyImage>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SpotifyImage {
    pub url: String,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SpotifyExternalUrls {
    #[serde(default)]
    pub spotify: Option<String>,
}

/// Raw outcome of the currently-playing call, before classification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamReply {
    pub status: u16,
    pub body: String,
}
