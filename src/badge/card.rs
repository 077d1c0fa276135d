use crate::badge::escape::escape_xml;
use crate::badge::{ERROR_ACCENT, FONT_STACK, RenderInput, SPOTIFY_GREEN, spotify_icon};
use crate::playback::{NowPlayingTrack, PlaybackState, format_duration};

pub const CARD_WIDTH: u32 = 400;
pub const CARD_HEIGHT: u32 = 185;

const IDLE_MESSAGE: &str = "No track is currently playing.";
const BORDER: &str = "1px solid rgba(107, 114, 128, 0.5)";

/// Flat card: album art, track details and a linear progress bar.
pub fn render_card(input: &RenderInput<'_>) -> String {
    let (content, centered) = match input.state {
        PlaybackState::Playing(track) => (playing_content(track, input.album_art), false),
        PlaybackState::NotPlaying => (status_content(IDLE_MESSAGE, false), true),
        PlaybackState::Error { message } => (status_content(&escape_xml(message), true), true),
    };

    let centering = if centered {
        " display: flex; align-items: center; justify-content: center;"
    } else {
        ""
    };

    format!(
        r#"<svg width="{CARD_WIDTH}" height="{CARD_HEIGHT}" viewBox="0 0 {CARD_WIDTH} {CARD_HEIGHT}" fill="none" xmlns="http://www.w3.org/2000/svg">
    <foreignObject width="{CARD_WIDTH}" height="{CARD_HEIGHT}">
        <div xmlns="http://www.w3.org/1999/xhtml" style="font-family: {FONT_STACK}; width: 100%; height: 100%; overflow: hidden; background-image: linear-gradient(to bottom right, #030712, #111827, #000000); padding: 1rem 1.25rem; border-radius: 0.75rem; border: {BORDER}; box-sizing: border-box;{centering}">
            {content}
        </div>
    </foreignObject>
</svg>"#
    )
}

fn status_content(message: &str, is_error: bool) -> String {
    let (accent, text_color, font_size) = if is_error {
        (ERROR_ACCENT, ERROR_ACCENT, "0.75rem")
    } else {
        (SPOTIFY_GREEN, "#D1D5DB", "0.875rem")
    };
    let icon = spotify_icon(20, accent);

    format!(
        r#"<div style="display: flex; flex-direction: column; align-items: center; justify-content: center; gap: 0.75rem; text-align: center; color: {text_color};">
                <div style="display: flex; align-items: center; gap: 0.5rem;">
                    {icon}
                    <span style="font-size: 0.875rem; font-weight: 600;">Spotify</span>
                </div>
                <p style="font-size: {font_size}; margin: 0;">{message}</p>
            </div>"#
    )
}

fn album_art(track: &NowPlayingTrack, album_art: Option<&str>) -> String {
    let style = format!(
        "width: 72px; height: 72px; flex-shrink: 0; border-radius: 0.5rem; border: {BORDER};"
    );
    match album_art {
        Some(src) => format!(
            r#"<img src="{src}" alt="{alt}" style="{style} object-fit: cover;" />"#,
            alt = escape_xml(&track.album),
        ),
        None => format!(r#"<div style="{style} background-color: #1F2937;"></div>"#),
    }
}

fn playing_content(track: &NowPlayingTrack, art: Option<&str>) -> String {
    let art = album_art(track, art);
    let title = escape_xml(&track.title);
    let artist = escape_xml(&track.artist);
    let album = escape_xml(&track.album);
    let percent = track.progress_percent();
    let elapsed = format_duration(track.progress_ms);
    let total = format_duration(track.duration_ms);
    let icon = spotify_icon(14, SPOTIFY_GREEN);
    let ellipsis = "margin: 0; overflow: hidden; text-overflow: ellipsis; white-space: nowrap;";

    format!(
        r#"<div style="display: flex; flex-direction: column; gap: 0.6rem; height: 100%; justify-content: space-between;">
                <div style="display: flex; gap: 1rem;">
                    {art}
                    <div style="flex: 1; display: flex; flex-direction: column; justify-content: space-between; min-width: 0;">
                        <p style="font-size: 1rem; font-weight: 700; color: #FFFFFF; {ellipsis}">{title}</p>
                        <p style="font-size: 0.875rem; color: #D1D5DB; {ellipsis}">{artist}</p>
                        <p style="font-size: 0.75rem; color: #9CA3AF; {ellipsis}">{album}</p>
                    </div>
                </div>
                <div>
                    <div style="width: 100%; height: 4px; border-radius: 9999px; background-color: rgba(55, 65, 81, 0.5); overflow: hidden;">
                        <div style="width: {percent:.1}%; height: 100%; border-radius: 9999px; background-image: linear-gradient(to right, #4ADE80, #86EFAC);"></div>
                    </div>
                    <div style="display: flex; justify-content: space-between; margin-top: 0.25rem; font-size: 0.7rem; color: #9CA3AF;">
                        <span>{elapsed}</span>
                        <span>{total}</span>
                    </div>
                </div>
                <div style="display: flex; align-items: center; gap: 0.375rem; padding-top: 0.4rem; border-top: {BORDER};">
                    {icon}
                    <span style="font-size: 0.75rem; color: #9CA3AF;">Now Playing on Spotify</span>
                </div>
            </div>"#
    )
}
