use std::sync::Arc;

use axum::{
    extract::State,
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};

use crate::badge::{BadgeVariant, RenderInput};
use crate::http_server::state::AppState;
use crate::playback::PlaybackState;

pub const SVG_CONTENT_TYPE: &str = "image/svg+xml";

pub async fn get_card_badge(State(app_state): State<Arc<AppState>>) -> Response {
    render_badge(&app_state, BadgeVariant::Card).await
}

pub async fn get_dvd_badge(State(app_state): State<Arc<AppState>>) -> Response {
    render_badge(&app_state, BadgeVariant::Dvd).await
}

/// Always answers 200 so embedding pages show the idle or error badge instead of a broken image.
async fn render_badge(app_state: &AppState, variant: BadgeVariant) -> Response {
    let state = app_state.now_playing.get_now_playing().await;

    let album_art = match &state {
        PlaybackState::Playing(track) => match track.album_image_url.as_deref() {
            Some(url) => app_state.images.inline(url).await,
            None => None,
        },
        _ => None,
    };

    let svg = variant.render(&RenderInput::new(&state, album_art.as_deref()));

    (
        StatusCode::OK,
        [
            (
                header::CONTENT_TYPE,
                HeaderValue::from_static(SVG_CONTENT_TYPE),
            ),
            (header::CACHE_CONTROL, app_state.cache_control.clone()),
        ],
        svg,
    )
        .into_response()
}
