use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Gauge, Paragraph, Wrap},
};

use crate::http_server::http_routes::now_playing::PlayingPayload;
use crate::playback::{format_duration, progress_percent};
use crate::widget::app::{TrackLayout, View, WidgetState};

const SPINNER: [&str; 4] = ["|", "/", "-", "\\"];
const DISC_FRAMES: [&str; 4] = ["◐", "◓", "◑", "◒"];
const HELP: &str = "[Tab/v: Switch view] [q/Esc: Quit]";
const SPOTIFY_GREEN: Color = Color::Rgb(0x1D, 0xB9, 0x54);

pub fn render(frame: &mut Frame, state: &WidgetState) {
    let area = frame.area();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Header
            Constraint::Min(0),    // Body
            Constraint::Length(1), // Help text
        ])
        .split(area);

    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            "Now Playing",
            Style::default()
                .fg(SPOTIFY_GREEN)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("  {}", state.endpoint),
            Style::default().fg(Color::DarkGray),
        ),
    ]));
    frame.render_widget(header, chunks[0]);

    match &state.view {
        View::Loading => render_loading(frame, chunks[1], state.frame_count),
        View::Error(message) => render_error(frame, chunks[1], message),
        View::Idle => render_idle(frame, chunks[1]),
        View::Playing(payload) => match state.layout {
            TrackLayout::Card => render_playing(frame, chunks[1], payload, state),
            TrackLayout::Disc => render_disc(frame, chunks[1], payload, state.frame_count),
        },
    }

    let help = Paragraph::new(HELP).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(help, chunks[2]);
}

fn render_loading(frame: &mut Frame, area: Rect, frame_count: usize) {
    let spinner = SPINNER[frame_count % SPINNER.len()];
    let loading = Paragraph::new(format!("{spinner} Loading..."))
        .block(Block::default().borders(Borders::ALL))
        .style(Style::default().fg(Color::Gray));
    frame.render_widget(loading, area);
}

fn render_error(frame: &mut Frame, area: Rect, message: &str) {
    let error_para = Paragraph::new(message)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Error")
                .title_style(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)),
        )
        .style(Style::default().fg(Color::Red))
        .wrap(Wrap { trim: true });
    frame.render_widget(error_para, area);
}

fn render_idle(frame: &mut Frame, area: Rect) {
    let idle = Paragraph::new("No track is currently playing.")
        .block(Block::default().borders(Borders::ALL))
        .style(Style::default().fg(Color::Gray));
    frame.render_widget(idle, area);
}

fn render_playing(frame: &mut Frame, area: Rect, payload: &PlayingPayload, state: &WidgetState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(6), // Track details
            Constraint::Length(3), // Progress
            Constraint::Min(0),    // Spacer
        ])
        .split(area);

    let mut lines = vec![
        Line::from(Span::styled(
            payload.title.as_str(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(payload.artist.as_str()),
        Line::from(Span::styled(
            payload.album.as_str(),
            Style::default().fg(Color::Gray),
        )),
    ];
    if let Some(song_url) = &payload.song_url {
        lines.push(Line::from(Span::styled(
            song_url.as_str(),
            Style::default()
                .fg(SPOTIFY_GREEN)
                .add_modifier(Modifier::UNDERLINED),
        )));
    }
    let details = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title("Track"))
        .wrap(Wrap { trim: true });
    frame.render_widget(details, chunks[0]);

    let progress_ms = state.clock.progress_ms();
    let duration_ms = state.clock.duration_ms();
    let label = format!(
        "{} / {}",
        format_duration(progress_ms),
        format_duration(duration_ms)
    );
    let gauge = Gauge::default()
        .label(label)
        .block(Block::bordered().title("Progress"))
        .gauge_style(Style::default().fg(SPOTIFY_GREEN))
        .ratio(progress_percent(progress_ms, duration_ms) / 100.0);
    frame.render_widget(gauge, chunks[1]);
}

fn render_disc(frame: &mut Frame, area: Rect, payload: &PlayingPayload, frame_count: usize) {
    let glyph = DISC_FRAMES[frame_count % DISC_FRAMES.len()];
    let lines = vec![
        Line::from(Span::styled(glyph, Style::default().fg(SPOTIFY_GREEN))),
        Line::from(""),
        Line::from(Span::styled(
            payload.title.as_str(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(payload.artist.as_str()),
        Line::from(Span::styled(
            payload.album.as_str(),
            Style::default().fg(Color::Gray),
        )),
    ];

    let block = Block::default().borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    // Vertically centre the five lines inside the border
    let [_, middle, _] = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(lines.len() as u16),
        Constraint::Fill(1),
    ])
    .areas(inner);
    let disc = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(disc, middle);
}
