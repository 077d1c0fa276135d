use reqwest::Client;

use crate::config::UpstreamConfig;
use crate::ports::spotify::{AccessToken, FetchError, SpotifyApi};
use crate::spotify_rs::auth::{RefreshTokenError, refresh_access_token};
use crate::spotify_rs::player::get_currently_playing;
use crate::spotify_rs::types::UpstreamReply;

pub struct SpotifyHttpAdapter {
    client: Client,
    upstream: UpstreamConfig,
}

impl SpotifyHttpAdapter {
    pub fn new(client: Client, upstream: UpstreamConfig) -> Self {
        Self { client, upstream }
    }
}

#[async_trait::async_trait]
impl SpotifyApi for SpotifyHttpAdapter {
    async fn refresh_access_token(
        &self,
        client_id: &str,
        client_secret: &str,
        refresh_token: &str,
    ) -> Result<AccessToken, RefreshTokenError> {
        let response = refresh_access_token(
            &self.client,
            &self.upstream.token_url,
            client_id,
            client_secret,
            refresh_token,
            self.upstream.timeout(),
        )
        .await?;

        Ok(AccessToken {
            access_token: response.access_token,
            expires_in: response.expires_in,
        })
    }

    async fn currently_playing(&self, access_token: &str) -> Result<UpstreamReply, FetchError> {
        get_currently_playing(
            &self.client,
            &self.upstream.now_playing_url,
            access_token,
            self.upstream.timeout(),
        )
        .await
        .map_err(FetchError::from)
    }
}
