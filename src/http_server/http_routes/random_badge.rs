use std::sync::Arc;

use axum::{
    extract::State,
    http::{HeaderMap, HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use color_eyre::eyre::{Context, Result};
use url::Url;

use crate::badge::BadgeVariant;
use crate::http_server::error::Report;
use crate::http_server::state::AppState;

pub const NO_STORE: &str = "no-cache, no-store, must-revalidate";

/// Redirects to one of the badge routes, picked uniformly at random on every request.
pub async fn get_random_badge(
    State(app_state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Response, Report> {
    let variant = BadgeVariant::random(&mut rand::rng());
    let location = badge_location(app_state.base_url.as_ref(), &headers, variant)?;
    tracing::debug!(%location, "Redirecting to random badge");

    let location = HeaderValue::from_str(&location).wrap_err("Invalid redirect location")?;
    Ok((
        StatusCode::FOUND,
        [
            (header::LOCATION, location),
            (header::CACHE_CONTROL, HeaderValue::from_static(NO_STORE)),
        ],
    )
        .into_response())
}

/// Absolute URL of `variant`'s badge.
///
/// Uses the configured base URL when present, otherwise the request's `Host` (and
/// `X-Forwarded-Proto`, when a proxy set it). Falls back to a relative path without either.
pub fn badge_location(
    base_url: Option<&Url>,
    headers: &HeaderMap,
    variant: BadgeVariant,
) -> Result<String> {
    let base = match base_url {
        Some(base_url) => base_url.clone(),
        None => match headers.get(header::HOST) {
            Some(host) => {
                let host = host.to_str().wrap_err("Host header is not valid ASCII")?;
                Url::parse(&format!("{}://{}", request_scheme(headers), host))
                    .wrap_err_with(|| format!("Invalid Host header: {host}"))?
            }
            None => return Ok(format!("/api/now-playing/{}", variant.route_segment())),
        },
    };

    let mut url = base;
    let path = format!(
        "{}/api/now-playing/{}",
        url.path().trim_end_matches('/'),
        variant.route_segment()
    );
    url.set_path(&path);
    url.set_query(None);
    Ok(url.to_string())
}

fn request_scheme(headers: &HeaderMap) -> &'static str {
    match headers
        .get("x-forwarded-proto")
        .and_then(|value| value.to_str().ok())
    {
        Some("http") => "http",
        Some("https") => "https",
        _ if cfg!(debug_assertions) => "http",
        _ => "https",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(pairs: &[(&'static str, &'static str)]) -> HeaderMap {
        let mut headers = HeaderMap::new();
        for (name, value) in pairs {
            headers.insert(*name, HeaderValue::from_static(value));
        }
        headers
    }

    #[test]
    fn test_location_from_base_url() {
        let base = Url::parse("https://badges.example.com/widgets/").unwrap();
        let location = badge_location(Some(&base), &HeaderMap::new(), BadgeVariant::Dvd).unwrap();
        assert_eq!(
            location,
            "https://badges.example.com/widgets/api/now-playing/dvd"
        );
    }

    #[test]
    fn test_location_from_forwarded_host() {
        let headers = headers(&[("host", "np.example.com"), ("x-forwarded-proto", "https")]);
        let location = badge_location(None, &headers, BadgeVariant::Card).unwrap();
        assert_eq!(location, "https://np.example.com/api/now-playing/card");
    }

    #[test]
    fn test_location_keeps_port() {
        let headers = headers(&[("host", "localhost:3000"), ("x-forwarded-proto", "http")]);
        let location = badge_location(None, &headers, BadgeVariant::Card).unwrap();
        assert_eq!(location, "http://localhost:3000/api/now-playing/card");
    }

    #[test]
    fn test_location_without_host_is_relative() {
        let location = badge_location(None, &HeaderMap::new(), BadgeVariant::Dvd).unwrap();
        assert_eq!(location, "/api/now-playing/dvd");
    }

    #[test]
    fn test_location_rejects_garbage_host() {
        let headers = headers(&[("host", "bad host/with spaces")]);
        assert!(badge_location(None, &headers, BadgeVariant::Card).is_err());
    }
}
