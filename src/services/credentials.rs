use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::instrument;

use crate::ports::spotify::SpotifyApi;
use crate::spotify_rs::auth::RefreshTokenError;

/// Tokens with less than this much lifetime left are refreshed before use.
pub const REFRESH_MARGIN: Duration = Duration::from_secs(60);

pub const CLIENT_ID_ENV: &str = "SPOTIFY_CLIENT_ID";
pub const CLIENT_SECRET_ENV: &str = "SPOTIFY_CLIENT_SECRET";
pub const REFRESH_TOKEN_ENV: &str = "SPOTIFY_REFRESH_TOKEN";

/// The three long-lived secrets needed to mint access tokens.
///
/// Any of them may be missing at startup; that only becomes an error when a token is requested.
#[derive(Clone, Default)]
pub struct SpotifySecrets {
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    pub refresh_token: Option<String>,
}

impl fmt::Debug for SpotifySecrets {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let redact = |value: &Option<String>| value.as_ref().map(|_| "<redacted>");
        f.debug_struct("SpotifySecrets")
            .field("client_id", &self.client_id)
            .field("client_secret", &redact(&self.client_secret))
            .field("refresh_token", &redact(&self.refresh_token))
            .finish()
    }
}

struct ResolvedSecrets<'a> {
    client_id: &'a str,
    client_secret: &'a str,
    refresh_token: &'a str,
}

impl SpotifySecrets {
    fn resolve(&self) -> Result<ResolvedSecrets<'_>, CredentialError> {
        fn present(value: &Option<String>) -> Option<&str> {
            value.as_deref().filter(|value| !value.trim().is_empty())
        }

        match (
            present(&self.client_id),
            present(&self.client_secret),
            present(&self.refresh_token),
        ) {
            (Some(client_id), Some(client_secret), Some(refresh_token)) => Ok(ResolvedSecrets {
                client_id,
                client_secret,
                refresh_token,
            }),
            (client_id, client_secret, refresh_token) => {
                let names = [
                    (client_id, CLIENT_ID_ENV),
                    (client_secret, CLIENT_SECRET_ENV),
                    (refresh_token, REFRESH_TOKEN_ENV),
                ]
                .into_iter()
                .filter(|(value, _)| value.is_none())
                .map(|(_, name)| name)
                .collect();
                Err(CredentialError::MissingConfig { names })
            }
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CredentialError {
    #[error("{} not set in environment variables.", .names.join(", "))]
    MissingConfig { names: Vec<&'static str> },
    #[error("{message}")]
    UpstreamAuth { status: u16, message: String },
    #[error("Failed to reach Spotify token endpoint: {0}")]
    Request(String),
    #[error("Invalid token response from Spotify: {0}")]
    InvalidResponse(String),
    #[error("Access Token not found in Spotify's response.")]
    MissingAccessToken,
}

impl From<RefreshTokenError> for CredentialError {
    fn from(error: RefreshTokenError) -> Self {
        match error {
            RefreshTokenError::InvalidRefreshToken { status, reason } => {
                CredentialError::UpstreamAuth {
                    status,
                    message: reason,
                }
            }
            RefreshTokenError::FailedToSendRequest(error) => {
                CredentialError::Request(error.to_string())
            }
            RefreshTokenError::FailedToParseResponse(error) => {
                CredentialError::InvalidResponse(error.to_string())
            }
        }
    }
}

#[derive(Debug, Clone)]
struct Credential {
    access_token: String,
    expires_in: Duration,
    obtained_at: Instant,
}

impl Credential {
    fn remaining(&self, now: Instant) -> Duration {
        self.expires_in
            .saturating_sub(now.saturating_duration_since(self.obtained_at))
    }

    fn is_usable(&self, now: Instant) -> bool {
        !self.access_token.is_empty() && self.remaining(now) > REFRESH_MARGIN
    }
}

/// Process-wide access token cache.
///
/// The lock is held across the refresh call, so concurrent requests that find the token stale
/// wait for the single in-flight refresh and then reuse its result.
pub struct CredentialStore {
    api: Arc<dyn SpotifyApi>,
    secrets: SpotifySecrets,
    cached: Mutex<Option<Credential>>,
}

impl CredentialStore {
    pub fn new(api: Arc<dyn SpotifyApi>, secrets: SpotifySecrets) -> Self {
        Self {
            api,
            secrets,
            cached: Mutex::new(None),
        }
    }

    /// Returns a bearer token with more than [`REFRESH_MARGIN`] of lifetime left.
    #[instrument(skip(self))]
    pub async fn access_token(&self) -> Result<String, CredentialError> {
        let secrets = self.secrets.resolve()?;

        let mut cached = self.cached.lock().await;
        if let Some(credential) = cached.as_ref() {
            if credential.is_usable(Instant::now()) {
                return Ok(credential.access_token.clone());
            }
        }

        tracing::debug!("Refreshing Spotify access token");
        let token = self
            .api
            .refresh_access_token(
                secrets.client_id,
                secrets.client_secret,
                secrets.refresh_token,
            )
            .await
            .map_err(|error| {
                tracing::warn!(error = %error, "Spotify token refresh failed");
                CredentialError::from(error)
            })?;

        if token.access_token.is_empty() {
            return Err(CredentialError::MissingAccessToken);
        }

        tracing::info!(expires_in = token.expires_in, "Obtained Spotify access token");
        let credential = Credential {
            access_token: token.access_token,
            expires_in: Duration::from_secs(token.expires_in),
            obtained_at: Instant::now(),
        };
        let access_token = credential.access_token.clone();
        *cached = Some(credential);

        Ok(access_token)
    }

    /// Drops the cached token so the next caller refreshes.
    pub async fn invalidate(&self) {
        self.cached.lock().await.take();
    }
}
