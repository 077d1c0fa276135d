use std::sync::Arc;

use axum::{Router, http::HeaderValue, routing::get};
use clap::ValueEnum;
use color_eyre::eyre::{Context, eyre};
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use url::Url;

use crate::{
    config::Config,
    http_server::{
        http_routes::{
            badge::{get_card_badge, get_dvd_badge},
            now_playing::get_now_playing,
            random_badge::get_random_badge,
        },
        state::AppState,
    },
    ports::{image::ImageSource, spotify::SpotifyApi},
    services::{
        credentials::{CredentialStore, SpotifySecrets},
        image_inliner::{HttpImageSource, ImageInliner},
        now_playing::NowPlayingService,
        spotify_client::SpotifyHttpAdapter,
    },
};

/// Which handler answers the bare `/api/now-playing` route.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum RootRoute {
    /// The JSON now-playing payload
    #[default]
    Json,
    /// A redirect to a randomly picked badge
    Redirect,
}

pub struct HttpServerConfig {
    pub port: u16,
    pub config: Config,
    pub secrets: SpotifySecrets,
    pub base_url: Option<Url>,
    pub root_route: RootRoute,
}

async fn health() -> &'static str {
    "ok"
}

/// Wires the ports into the services behind the routes.
pub fn build_state(
    config: &Config,
    secrets: SpotifySecrets,
    spotify: Arc<dyn SpotifyApi>,
    images: Arc<dyn ImageSource>,
    base_url: Option<Url>,
) -> color_eyre::Result<AppState> {
    let credentials = Arc::new(CredentialStore::new(spotify.clone(), secrets));
    let cache_control = HeaderValue::from_str(&config.cache.header_value())
        .wrap_err("Invalid cache configuration")?;

    Ok(AppState {
        now_playing: NowPlayingService::new(credentials, spotify),
        images: ImageInliner::new(images, config.image.max_bytes),
        cache_control,
        base_url,
    })
}

pub fn router(app_state: Arc<AppState>, root_route: RootRoute) -> Router {
    let root = match root_route {
        RootRoute::Json => get(get_now_playing),
        RootRoute::Redirect => get(get_random_badge),
    };

    Router::new()
        .route("/health", get(health))
        .route("/api/now-playing", root)
        .route("/api/now-playing/random", get(get_random_badge))
        .route("/api/now-playing/card", get(get_card_badge))
        .route("/api/now-playing/dvd", get(get_dvd_badge))
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}

pub async fn start(server_config: HttpServerConfig) -> color_eyre::Result<()> {
    let HttpServerConfig {
        port,
        config,
        secrets,
        base_url,
        root_route,
    } = server_config;

    let client = reqwest::Client::builder()
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .build()
        .wrap_err("Failed to build HTTP client")?;

    let spotify: Arc<dyn SpotifyApi> = Arc::new(SpotifyHttpAdapter::new(
        client.clone(),
        config.upstream.clone(),
    ));
    let images: Arc<dyn ImageSource> =
        Arc::new(HttpImageSource::new(client, config.image.timeout()));
    let app_state = Arc::new(build_state(&config, secrets, spotify, images, base_url)?);

    #[cfg(debug_assertions)]
    let cors_layer = CorsLayer::permissive();

    #[cfg(not(debug_assertions))]
    let cors_layer = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([axum::http::Method::GET]);

    let app = router(app_state, root_route).layer(ServiceBuilder::new().layer(cors_layer));

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port))
        .await
        .wrap_err_with(|| eyre!("Failed to bind to port {}", port))?;
    tracing::info!("Listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .wrap_err("Failed to start HTTP server")?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %error, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down HTTP server");
}
