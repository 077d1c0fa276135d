use std::{sync::Arc, thread, time::Duration};

use color_eyre::eyre::{OptionExt, Result, WrapErr};
use ratatui::crossterm::event::{self, Event as CrosstermEvent};
use tokio::sync::mpsc;

use crate::widget::client::{NowPlayingClient, PollOutcome};

const INPUT_POLL_TIMEOUT: Duration = Duration::from_millis(250);

/// How often the displayed progress advances between polls.
pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Representation of all possible events.
#[derive(Clone, Debug)]
pub enum Event {
    /// Crossterm events.
    ///
    /// These events are emitted by the terminal.
    Crossterm(CrosstermEvent),
    /// Fixed-rate tick driving the local progress clock.
    Tick,
    /// A poll of the server finished.
    Poll(PollOutcome),
}

/// Terminal, tick and poll events merged into one channel.
pub struct EventHandler {
    receiver: mpsc::UnboundedReceiver<Event>,
}

impl EventHandler {
    /// Spawns the input thread and the tick and poll tasks.
    pub fn new(client: Arc<NowPlayingClient>, poll_interval: Duration) -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();

        let input_sender = sender.clone();
        thread::spawn(move || {
            if let Err(error) = read_terminal_events(input_sender) {
                tracing::error!(error = %error, "Terminal event thread stopped");
            }
        });

        let tick_sender = sender.clone();
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(TICK_INTERVAL);
            // The first tick completes immediately
            interval.tick().await;
            loop {
                interval.tick().await;
                if tick_sender.send(Event::Tick).is_err() {
                    break;
                }
            }
        });

        tokio::spawn(async move {
            let mut interval = tokio::time::interval(poll_interval);
            interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                let outcome = client.poll().await;
                if sender.send(Event::Poll(outcome)).is_err() {
                    break;
                }
            }
        });

        Self { receiver }
    }

    /// Waits for the next event.
    ///
    /// Fails only when every producer has stopped, which means the terminal went away.
    pub async fn next(&mut self) -> Result<Event> {
        self.receiver
            .recv()
            .await
            .ok_or_eyre("All event producers stopped")
    }
}

/// Blocking loop forwarding crossterm events until the receiver is dropped.
fn read_terminal_events(sender: mpsc::UnboundedSender<Event>) -> Result<()> {
    loop {
        if event::poll(INPUT_POLL_TIMEOUT).wrap_err("failed to poll for crossterm events")? {
            let event = event::read().wrap_err("failed to read crossterm event")?;
            if sender.send(Event::Crossterm(event)).is_err() {
                return Ok(());
            }
        } else if sender.is_closed() {
            return Ok(());
        }
    }
}
