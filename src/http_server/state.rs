use axum::http::HeaderValue;
use url::Url;

use crate::services::image_inliner::ImageInliner;
use crate::services::now_playing::NowPlayingService;

pub struct AppState {
    pub now_playing: NowPlayingService,
    pub images: ImageInliner,
    /// `Cache-Control` for the JSON and badge routes
    pub cache_control: HeaderValue,
    /// Public origin used for redirects; the request's `Host` is used when unset
    pub base_url: Option<Url>,
}
