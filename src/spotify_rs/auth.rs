use std::time::Duration;

use base64::{
    Engine, alphabet,
    engine::{self, general_purpose},
};
use reqwest::Client;

use crate::spotify_rs::types::{SpotifyAuthErrorBody, SpotifyTokenResponse};

const BASIC_AUTH_ENGINE: engine::GeneralPurpose =
    engine::GeneralPurpose::new(&alphabet::STANDARD, general_purpose::PAD);

const FALLBACK_AUTH_ERROR: &str = "Failed to fetch access token from Spotify.";

#[derive(Debug, thiserror::Error)]
pub enum RefreshTokenError {
    #[error("Spotify rejected the refresh token ({status}): {reason}")]
    InvalidRefreshToken { status: u16, reason: String },
    #[error("Failed to send http request: {0}")]
    FailedToSendRequest(reqwest::Error),
    #[error("Failed to parse response: {0}")]
    FailedToParseResponse(reqwest::Error),
}

/// `Authorization` header value for the client-credentials part of the token request
pub fn basic_authorization(client_id: &str, client_secret: &str) -> String {
    format!(
        "Basic {}",
        BASIC_AUTH_ENGINE.encode(format!("{}:{}", client_id, client_secret))
    )
}

/// Picks the message shown to users for a rejected token request.
///
/// Spotify puts a readable sentence in `error_description`; anything else (HTML error pages,
/// empty bodies) collapses to a generic message.
pub fn auth_error_reason(body: &str) -> String {
    serde_json::from_str::<SpotifyAuthErrorBody>(body)
        .ok()
        .and_then(|parsed| parsed.error_description.or(parsed.error))
        .filter(|reason| !reason.trim().is_empty())
        .unwrap_or_else(|| FALLBACK_AUTH_ERROR.to_string())
}

/// Refresh an access token using a refresh token
/// https://developer.spotify.com/documentation/web-api/tutorials/refreshing-tokens
pub async fn refresh_access_token(
    client: &Client,
    token_url: &str,
    client_id: &str,
    client_secret: &str,
    refresh_token: &str,
    timeout: Duration,
) -> Result<SpotifyTokenResponse, RefreshTokenError> {
    let params = [
        ("grant_type", "refresh_token"),
        ("refresh_token", refresh_token),
    ];

    let response = client
        .post(token_url)
        // Serializes to x-www-form-urlencoded and sets the content type
        .form(&params)
        .header(
            reqwest::header::AUTHORIZATION,
            basic_authorization(client_id, client_secret),
        )
        .timeout(timeout)
        .send()
        .await
        .map_err(RefreshTokenError::FailedToSendRequest)?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(RefreshTokenError::InvalidRefreshToken {
            status: status.as_u16(),
            reason: auth_error_reason(&body),
        });
    }

    response
        .json::<SpotifyTokenResponse>()
        .await
        .map_err(RefreshTokenError::FailedToParseResponse)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_authorization() {
        // base64("id:secret")
        assert_eq!(basic_authorization("id", "secret"), "Basic aWQ6c2VjcmV0");
    }

    #[test]
    fn test_auth_error_reason_prefers_description() {
        let body = r#"{"error":"invalid_grant","error_description":"Invalid refresh token"}"#;
        assert_eq!(auth_error_reason(body), "Invalid refresh token");
    }

    #[test]
    fn test_auth_error_reason_falls_back_to_error_code() {
        let body = r#"{"error":"invalid_client"}"#;
        assert_eq!(auth_error_reason(body), "invalid_client");
    }

    #[test]
    fn test_auth_error_reason_generic_fallback() {
        assert_eq!(auth_error_reason("<html>502</html>"), FALLBACK_AUTH_ERROR);
        assert_eq!(auth_error_reason(""), FALLBACK_AUTH_ERROR);
        assert_eq!(
            auth_error_reason(r#"{"error_description":"  "}"#),
            FALLBACK_AUTH_ERROR
        );
    }

    mod token_endpoint {
        use std::time::Duration;

        use super::super::*;
        use crate::test_utils::{http_response, serve_once};

        #[tokio::test]
        async fn test_posts_refresh_grant_with_basic_auth() {
            let response = http_response(
                "200 OK",
                &[("content-type", "application/json")],
                br#"{"access_token":"at","token_type":"Bearer","expires_in":3600}"#,
            );
            let (base_url, server) = serve_once(response, Duration::ZERO).await;

            let token = refresh_access_token(
                &Client::new(),
                &format!("{base_url}/api/token"),
                "id",
                "secret",
                "rt",
                Duration::from_secs(5),
            )
            .await
            .unwrap();

            assert_eq!(token.access_token, "at");
            assert_eq!(token.expires_in, 3600);

            let request = server.await.unwrap();
            assert!(request.head.starts_with("post /api/token http/1.1"));
            // Header names and values are lowercased by the capture
            assert!(request.head.contains("authorization: basic awq6c2vjcmv0"));
            assert!(
                request
                    .head
                    .contains("content-type: application/x-www-form-urlencoded")
            );
            assert_eq!(request.body, "grant_type=refresh_token&refresh_token=rt");
        }

        #[tokio::test]
        async fn test_rejection_carries_error_description() {
            let response = http_response(
                "400 Bad Request",
                &[("content-type", "application/json")],
                br#"{"error":"invalid_grant","error_description":"Invalid refresh token"}"#,
            );
            let (base_url, _server) = serve_once(response, Duration::ZERO).await;

            let error = refresh_access_token(
                &Client::new(),
                &format!("{base_url}/api/token"),
                "id",
                "secret",
                "rt",
                Duration::from_secs(5),
            )
            .await
            .unwrap_err();

            match error {
                RefreshTokenError::InvalidRefreshToken { status, reason } => {
                    assert_eq!(status, 400);
                    assert_eq!(reason, "Invalid refresh token");
                }
                other => panic!("unexpected error: {other:?}"),
            }
        }

        #[tokio::test]
        async fn test_slow_token_endpoint_times_out() {
            let response = http_response("200 OK", &[], b"{}");
            let (base_url, server) = serve_once(response, Duration::from_secs(2)).await;

            let error = refresh_access_token(
                &Client::new(),
                &format!("{base_url}/api/token"),
                "id",
                "secret",
                "rt",
                Duration::from_millis(200),
            )
            .await
            .unwrap_err();
            server.abort();

            match error {
                RefreshTokenError::FailedToSendRequest(error) => assert!(error.is_timeout()),
                other => panic!("unexpected error: {other:?}"),
            }
        }
    }
}
