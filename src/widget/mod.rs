pub mod app;
pub mod client;
pub mod clock;
pub mod event;
pub mod ui;

use std::future::Future;
use std::io;
use std::sync::Arc;
use std::time::Duration;

use color_eyre::Result;
use crossterm::{
    cursor, execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::prelude::*;
use url::Url;

use crate::widget::client::NowPlayingClient;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Polls a running server and shows the current track in the terminal until the user quits.
pub async fn run(server_url: Url, poll_interval: Duration) -> Result<()> {
    let http_client = reqwest::Client::builder()
        .user_agent(concat!(
            env!("CARGO_PKG_NAME"),
            "/",
            env!("CARGO_PKG_VERSION")
        ))
        .build()?;
    let client = Arc::new(NowPlayingClient::new(
        http_client,
        &server_url,
        REQUEST_TIMEOUT,
    )?);

    in_terminal_session(
        || Ok(enable_raw_mode()?),
        || run_app(client, poll_interval),
        restore_terminal,
    )
    .await
}

/// Runs `body` between `enter` and `leave`.
///
/// `leave` runs whenever `enter` succeeded, including when `body` fails part way through its
/// own setup. The body's error wins over a failure to leave.
async fn in_terminal_session<Fut>(
    enter: impl FnOnce() -> Result<()>,
    body: impl FnOnce() -> Fut,
    leave: impl FnOnce() -> Result<()>,
) -> Result<()>
where
    Fut: Future<Output = Result<()>>,
{
    enter()?;
    let result = body().await;
    let left = leave();
    result?;
    left
}

async fn run_app(client: Arc<NowPlayingClient>, poll_interval: Duration) -> Result<()> {
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = app::App::new(client, poll_interval);
    app.run(&mut terminal).await
}

fn restore_terminal() -> Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen, cursor::Show)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use color_eyre::eyre::eyre;

    use super::*;

    #[tokio::test]
    async fn test_session_restores_after_setup_failure() {
        let left = Cell::new(false);

        let result = in_terminal_session(
            || Ok(()),
            || async { Err(eyre!("no terminal")) },
            || {
                left.set(true);
                Ok(())
            },
        )
        .await;

        assert_eq!(result.unwrap_err().to_string(), "no terminal");
        assert!(left.get());
    }

    #[tokio::test]
    async fn test_session_restores_after_clean_exit() {
        let left = Cell::new(false);

        in_terminal_session(
            || Ok(()),
            || async { Ok(()) },
            || {
                left.set(true);
                Ok(())
            },
        )
        .await
        .unwrap();

        assert!(left.get());
    }

    #[tokio::test]
    async fn test_session_skips_body_when_enter_fails() {
        let ran = Cell::new(false);
        let left = Cell::new(false);

        let result = in_terminal_session(
            || Err(eyre!("not a tty")),
            || {
                ran.set(true);
                async { Ok(()) }
            },
            || {
                left.set(true);
                Ok(())
            },
        )
        .await;

        assert!(result.is_err());
        assert!(!ran.get());
        assert!(!left.get());
    }

    #[tokio::test]
    async fn test_body_error_wins_over_leave_error() {
        let result = in_terminal_session(
            || Ok(()),
            || async { Err(eyre!("app failed")) },
            || Err(eyre!("restore failed")),
        )
        .await;

        assert_eq!(result.unwrap_err().to_string(), "app failed");
    }
}
