mod badge;
mod config;
mod http_server;
mod logging;
mod playback;
mod ports;
mod services;
mod spotify_rs;
#[cfg(test)]
mod test_utils;
mod widget;

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};
use color_eyre::{Result, eyre::Context};
use url::Url;

use crate::{
    config::Config,
    http_server::app::{HttpServerConfig, RootRoute},
    logging::{init_tracing, shutdown_tracing},
    services::credentials::SpotifySecrets,
};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// The config file to use
    #[arg(short, long, env = "NOW_PLAYING_CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Tracing filter directive, e.g. `info` or `now_playing_badge=debug`
    #[arg(long, default_value = "info", global = true, env = "LOG_LEVEL")]
    log_level: String,

    /// OTLP/gRPC endpoint to export spans to
    #[arg(long, global = true, env = "OTLP_ENDPOINT")]
    otlp_endpoint: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Serve the now-playing JSON route and SVG badges
    Serve {
        /// The port to run the server on
        #[arg(short, long, default_value = "3000", env = "NOW_PLAYING_HTTP_PORT")]
        port: u16,

        /// Spotify application client id
        #[arg(long, env = "SPOTIFY_CLIENT_ID", hide_env_values = true)]
        spotify_client_id: Option<String>,

        /// Spotify application client secret
        #[arg(long, env = "SPOTIFY_CLIENT_SECRET", hide_env_values = true)]
        spotify_client_secret: Option<String>,

        /// Long-lived Spotify refresh token
        #[arg(long, env = "SPOTIFY_REFRESH_TOKEN", hide_env_values = true)]
        spotify_refresh_token: Option<String>,

        /// Public base URL, used to build the random badge redirect
        #[arg(long, env = "BASE_URL")]
        base_url: Option<Url>,

        /// What the bare `/api/now-playing` route answers with
        #[arg(long, value_enum, default_value_t = RootRoute::Json)]
        root_route: RootRoute,
    },
    /// Show what a running server reports as playing, in the terminal
    Watch {
        /// Base URL of the running server
        #[arg(short, long, default_value = "http://localhost:3000", env = "NOW_PLAYING_URL")]
        url: Url,

        /// Seconds between polls of the server
        #[arg(long, default_value = "10", value_parser = clap::value_parser!(u64).range(1..))]
        poll_interval: u64,
    },
    #[command(subcommand)]
    Config(ConfigCommands),
}

#[derive(Subcommand, Debug)]
enum ConfigCommands {
    /// Create a default config file, if it doesn't exist
    CreateDefault,
    /// Print the path to the config file
    Path,
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let args = Args::parse();

    // The widget owns the terminal, so log lines would tear its frames
    let tracer_provider = if matches!(args.command, Commands::Watch { .. }) {
        None
    } else {
        init_tracing(
            env!("CARGO_PKG_NAME"),
            args.otlp_endpoint.as_deref(),
            &args.log_level,
        )?
    };

    let result = run_command(args.command, args.config).await;
    shutdown_tracing(tracer_provider);
    result
}

async fn run_command(command: Commands, config_path: Option<PathBuf>) -> Result<()> {
    match command {
        Commands::Config(config_commands) => match config_commands {
            ConfigCommands::CreateDefault => {
                tracing::debug!("Creating default config");
                let path = Config::create_default()?;
                tracing::info!(path = %path.display(), "Default config created successfully");
            }
            ConfigCommands::Path => match Config::config_path() {
                Some(path) => println!("{}", path.display()),
                None => println!("No default config path found"),
            },
        },
        Commands::Serve {
            port,
            spotify_client_id,
            spotify_client_secret,
            spotify_refresh_token,
            base_url,
            root_route,
        } => {
            tracing::debug!("Loading configuration");
            let config = match config_path {
                Some(path) => Config::from_file(&path),
                None => Config::load(),
            }
            .wrap_err("Failed to load now-playing config")?;

            let secrets = SpotifySecrets {
                client_id: spotify_client_id,
                client_secret: spotify_client_secret,
                refresh_token: spotify_refresh_token,
            };
            tracing::debug!(?secrets, ?root_route, "Resolved server settings");

            http_server::app::start(HttpServerConfig {
                port,
                config,
                secrets,
                base_url,
                root_route,
            })
            .await?;
        }
        Commands::Watch { url, poll_interval } => {
            widget::run(url, Duration::from_secs(poll_interval)).await?;
        }
    }

    Ok(())
}
