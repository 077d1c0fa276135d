use crate::spotify_rs::auth::RefreshTokenError;
use crate::spotify_rs::types::UpstreamReply;

/// A freshly minted bearer token and its lifetime in seconds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessToken {
    pub access_token: String,
    pub expires_in: u64,
}

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("Timed out waiting for Spotify")]
    Timeout,
    #[error("Failed to reach Spotify: {0}")]
    Request(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            FetchError::Timeout
        } else {
            FetchError::Request(error.to_string())
        }
    }
}

/// Port trait wrapping the Spotify Web API calls used by the now-playing pipeline.
///
/// Implementations live in `services::spotify_client` (production) or test mocks.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait SpotifyApi: Send + Sync {
    async fn refresh_access_token(
        &self,
        client_id: &str,
        client_secret: &str,
        refresh_token: &str,
    ) -> Result<AccessToken, RefreshTokenError>;

    async fn currently_playing(&self, access_token: &str) -> Result<UpstreamReply, FetchError>;
}
