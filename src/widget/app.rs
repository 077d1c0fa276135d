use std::sync::Arc;
use std::time::Duration;

use color_eyre::Result;
use ratatui::crossterm::event::{
    Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers,
};
use ratatui::{DefaultTerminal, Frame};

use crate::http_server::http_routes::now_playing::PlayingPayload;
use crate::widget::client::{NowPlayingClient, PollOutcome};
use crate::widget::clock::ProgressClock;
use crate::widget::event::{Event, EventHandler, TICK_INTERVAL};

/// What the widget currently shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
    /// No poll has finished yet
    Loading,
    Error(String),
    Idle,
    Playing(PlayingPayload),
}

/// How a playing track is laid out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TrackLayout {
    /// Details with a progress gauge
    #[default]
    Card,
    /// Centred title and artist around a spinning disc, no progress
    Disc,
}

impl TrackLayout {
    pub fn toggled(self) -> Self {
        match self {
            TrackLayout::Card => TrackLayout::Disc,
            TrackLayout::Disc => TrackLayout::Card,
        }
    }
}

/// What a key press asks the widget to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    ToggleLayout,
}

impl Action {
    pub fn from_key(key: KeyEvent) -> Option<Self> {
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(Action::Quit)
            }
            KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
            KeyCode::Tab | KeyCode::Char('v') => Some(Action::ToggleLayout),
            _ => None,
        }
    }
}

/// Everything the UI renders, kept apart from the terminal plumbing.
#[derive(Debug, Clone)]
pub struct WidgetState {
    pub view: View,
    pub layout: TrackLayout,
    pub clock: ProgressClock,
    /// Advances once per tick; drives the loading spinner
    pub frame_count: usize,
    pub endpoint: String,
}

impl WidgetState {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            view: View::Loading,
            layout: TrackLayout::default(),
            clock: ProgressClock::stopped(),
            frame_count: 0,
            endpoint: endpoint.into(),
        }
    }

    pub fn apply_poll(&mut self, outcome: PollOutcome) {
        match outcome {
            PollOutcome::Playing(payload) => {
                self.clock = ProgressClock::playing(payload.progress, payload.duration);
                self.view = View::Playing(payload);
            }
            PollOutcome::Idle => {
                self.clock = ProgressClock::stopped();
                self.view = View::Idle;
            }
            PollOutcome::Failed(message) => {
                tracing::warn!(%message, "Now playing poll failed");
                self.clock = ProgressClock::stopped();
                self.view = View::Error(message);
            }
        }
    }

    pub fn toggle_layout(&mut self) {
        self.layout = self.layout.toggled();
    }

    pub fn tick(&mut self, elapsed: Duration) {
        self.frame_count = self.frame_count.wrapping_add(1);
        self.clock.advance(elapsed.as_millis() as u64);
    }
}

pub struct App {
    pub state: WidgetState,
    pub running: bool,
    events: EventHandler,
}

impl App {
    pub fn new(client: Arc<NowPlayingClient>, poll_interval: Duration) -> Self {
        let state = WidgetState::new(client.endpoint().as_str());
        Self {
            state,
            running: true,
            events: EventHandler::new(client, poll_interval),
        }
    }

    pub async fn run(&mut self, terminal: &mut DefaultTerminal) -> Result<()> {
        while self.running {
            terminal.draw(|frame: &mut Frame| crate::widget::ui::render(frame, &self.state))?;
            self.handle_event().await?;
        }

        Ok(())
    }

    async fn handle_event(&mut self) -> Result<()> {
        match self.events.next().await? {
            Event::Crossterm(CrosstermEvent::Key(key_event))
                if key_event.kind == KeyEventKind::Press =>
            {
                self.handle_key_event(key_event)
            }
            Event::Crossterm(_) => {}
            Event::Tick => self.state.tick(TICK_INTERVAL),
            Event::Poll(outcome) => self.state.apply_poll(outcome),
        }
        Ok(())
    }

    fn handle_key_event(&mut self, key: KeyEvent) {
        match Action::from_key(key) {
            Some(Action::Quit) => self.quit(),
            Some(Action::ToggleLayout) => self.state.toggle_layout(),
            None => {}
        }
    }

    pub fn quit(&mut self) {
        self.running = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(progress: u64, duration: u64) -> PlayingPayload {
        PlayingPayload {
            is_playing: true,
            title: "X".into(),
            artist: "A, B".into(),
            album: "Alb".into(),
            album_image_url: None,
            song_url: Some("http://t".into()),
            progress,
            duration,
        }
    }

    #[test]
    fn test_starts_loading() {
        let state = WidgetState::new("http://localhost:3000/api/now-playing");
        assert_eq!(state.view, View::Loading);
    }

    #[test]
    fn test_poll_resets_clock() {
        let mut state = WidgetState::new("");
        state.apply_poll(PollOutcome::Playing(payload(10_000, 200_000)));
        state.tick(TICK_INTERVAL);
        assert_eq!(state.clock.progress_ms(), 11_000);

        state.apply_poll(PollOutcome::Playing(payload(20_000, 200_000)));
        assert_eq!(state.clock.progress_ms(), 20_000);
    }

    #[test]
    fn test_ticks_stop_at_duration() {
        let mut state = WidgetState::new("");
        state.apply_poll(PollOutcome::Playing(payload(198_500, 200_000)));
        for _ in 0..5 {
            state.tick(TICK_INTERVAL);
        }
        assert_eq!(state.clock.progress_ms(), 200_000);
    }

    #[test]
    fn test_idle_and_error_stop_clock() {
        let mut state = WidgetState::new("");
        state.apply_poll(PollOutcome::Playing(payload(10_000, 200_000)));
        state.apply_poll(PollOutcome::Idle);
        state.tick(TICK_INTERVAL);
        assert_eq!(state.view, View::Idle);
        assert_eq!(state.clock.progress_ms(), 0);

        state.apply_poll(PollOutcome::Failed("boom".into()));
        assert_eq!(state.view, View::Error("boom".into()));
    }

    #[test]
    fn test_key_bindings() {
        let press = |code| Action::from_key(KeyEvent::new(code, KeyModifiers::NONE));
        assert_eq!(press(KeyCode::Char('q')), Some(Action::Quit));
        assert_eq!(press(KeyCode::Esc), Some(Action::Quit));
        assert_eq!(press(KeyCode::Tab), Some(Action::ToggleLayout));
        assert_eq!(press(KeyCode::Char('v')), Some(Action::ToggleLayout));
        assert_eq!(press(KeyCode::Char('c')), None);
        assert_eq!(
            Action::from_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(Action::Quit)
        );
    }

    #[test]
    fn test_layout_toggles_and_survives_polls() {
        let mut state = WidgetState::new("");
        assert_eq!(state.layout, TrackLayout::Card);
        state.toggle_layout();
        assert_eq!(state.layout, TrackLayout::Disc);

        state.apply_poll(PollOutcome::Playing(payload(0, 1000)));
        assert_eq!(state.layout, TrackLayout::Disc);

        state.toggle_layout();
        assert_eq!(state.layout, TrackLayout::Card);
    }

    #[test]
    fn test_error_recovers_on_next_poll() {
        let mut state = WidgetState::new("");
        state.apply_poll(PollOutcome::Failed("boom".into()));
        state.apply_poll(PollOutcome::Playing(payload(0, 1000)));
        assert!(matches!(state.view, View::Playing(_)));
    }
}
