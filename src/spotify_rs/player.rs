use std::time::Duration;

use reqwest::Client;

use crate::spotify_rs::types::UpstreamReply;

/// Get the track currently playing on the user's account
/// https://developer.spotify.com/documentation/web-api/reference/get-the-users-currently-playing-track
///
/// The status is returned as-is: Spotify signals "nothing playing" with `204 No Content`, so
/// deciding what a status means is left to the caller.
pub async fn get_currently_playing(
    client: &Client,
    now_playing_url: &str,
    access_token: &str,
    timeout: Duration,
) -> Result<UpstreamReply, reqwest::Error> {
    let response = client
        .get(now_playing_url)
        .bearer_auth(access_token)
        .timeout(timeout)
        .send()
        .await?;

    let status = response.status().as_u16();
    let body = response.text().await?;

    Ok(UpstreamReply { status, body })
}
