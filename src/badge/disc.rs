use crate::badge::escape::escape_xml;
use crate::badge::{ERROR_ACCENT, FONT_STACK, RenderInput, SPOTIFY_GREEN, spotify_icon};
use crate::playback::{NowPlayingTrack, PlaybackState};

pub const DISC_WIDTH: u32 = 600;
pub const DISC_HEIGHT: u32 = 500;

const IDLE_MESSAGE: &str = "Not currently playing a track.";
/// One full turn of the disc
const SPIN_SECONDS: u32 = 30;

/// Spinning disc: the album art rotates client-side via a CSS animation; no progress bar.
pub fn render_disc(input: &RenderInput<'_>) -> String {
    let content = match input.state {
        PlaybackState::Playing(track) => playing_content(track, input.album_art),
        PlaybackState::NotPlaying => status_content(IDLE_MESSAGE, false),
        PlaybackState::Error { message } => status_content(&escape_xml(message), true),
    };

    format!(
        r#"<svg width="{DISC_WIDTH}" height="{DISC_HEIGHT}" viewBox="0 0 {DISC_WIDTH} {DISC_HEIGHT}" fill="none" xmlns="http://www.w3.org/2000/svg">
    <style>
        @keyframes spin-slow {{
            from {{ transform: rotate(0deg); }}
            to {{ transform: rotate(360deg); }}
        }}
        .animate-spin-slow {{
            animation: spin-slow {SPIN_SECONDS}s linear infinite;
        }}
    </style>
    <foreignObject width="{DISC_WIDTH}" height="{DISC_HEIGHT}">
        <div xmlns="http://www.w3.org/1999/xhtml" style="font-family: {FONT_STACK}; width: 100%; height: 100%; overflow: hidden; background-color: #000000; padding: 2rem; display: flex; align-items: center; justify-content: center; box-sizing: border-box;">
            {content}
        </div>
    </foreignObject>
</svg>"#
    )
}

fn status_content(message: &str, is_error: bool) -> String {
    let (accent, text_color) = if is_error {
        (ERROR_ACCENT, ERROR_ACCENT)
    } else {
        (SPOTIFY_GREEN, "#9CA3AF")
    };
    let icon = spotify_icon(20, accent);

    format!(
        r#"<div style="display: flex; flex-direction: column; align-items: center; justify-content: center; text-align: center; height: 100%; color: {text_color};">
                <div style="display: flex; align-items: center; gap: 0.5rem;">
                    {icon}
                    <span style="font-size: 1rem; font-weight: 600; color: #D1D5DB;">Spotify</span>
                </div>
                <p style="font-size: 0.875rem; margin-top: 0.5rem;">{message}</p>
            </div>"#
    )
}

fn playing_content(track: &NowPlayingTrack, album_art: Option<&str>) -> String {
    let title = escape_xml(&track.title);
    let artist = escape_xml(&track.artist);
    let album = escape_xml(&track.album);
    let face = match album_art {
        Some(src) => format!(
            r#"<img src="{src}" alt="{title}" style="width: 100%; height: 100%; object-fit: cover;" />"#
        ),
        None => r#"<div style="width: 100%; height: 100%; background-image: repeating-radial-gradient(circle, #111827 0, #111827 4px, #1F2937 5px, #111827 6px);"></div>"#.to_string(),
    };
    let ellipsis = "white-space: nowrap; overflow: hidden; text-overflow: ellipsis;";

    format!(
        r#"<div style="display: flex; flex-direction: column; align-items: center; justify-content: center; gap: 1.5rem; width: 100%;">
                <div style="position: relative; width: 320px; height: 320px; display: flex; align-items: center; justify-content: center;">
                    <div style="position: absolute; inset: 0; border-radius: 9999px; background-image: linear-gradient(to bottom right, #1F2937, #111827, #000000); border: 8px solid #374151;"></div>
                    <div class="animate-spin-slow" style="position: relative; width: 288px; height: 288px; border-radius: 9999px; overflow: hidden;">
                        {face}
                    </div>
                    <div style="position: absolute; width: 48px; height: 48px; border-radius: 9999px; background-image: linear-gradient(to bottom right, #4B5563, #111827); border: 2px solid #6B7280; z-index: 10;"></div>
                    <div style="position: absolute; width: 32px; height: 32px; border-radius: 9999px; background-image: linear-gradient(to bottom right, #374151, #1F2937); z-index: 10;"></div>
                </div>
                <div style="text-align: center; max-width: 448px;">
                    <h2 style="font-size: 1.5rem; font-weight: 700; color: #FFFFFF; margin: 0; {ellipsis}">{title}</h2>
                    <p style="font-size: 1.125rem; color: #D1D5DB; margin: 0.5rem 0 0; {ellipsis}">{artist}</p>
                    <p style="font-size: 0.875rem; color: #9CA3AF; margin: 0.25rem 0 0; {ellipsis}">{album}</p>
                </div>
            </div>"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::sample_track;

    fn render(state: &PlaybackState, art: Option<&str>) -> String {
        render_disc(&RenderInput::new(state, art))
    }

    #[test]
    fn test_disc_dimensions_and_animation() {
        let svg = render(&PlaybackState::NotPlaying, None);
        assert!(svg.starts_with(r#"<svg width="600" height="500""#));
        assert!(svg.contains("@keyframes spin-slow {"));
        assert!(svg.contains("animation: spin-slow 30s linear infinite;"));
    }

    #[test]
    fn test_disc_idle() {
        let svg = render(&PlaybackState::NotPlaying, None);
        assert!(svg.contains(IDLE_MESSAGE));
        assert!(!svg.contains(ERROR_ACCENT));
        assert!(!svg.contains(r#"class="animate-spin-slow""#));
    }

    #[test]
    fn test_disc_error() {
        let svg = render(&PlaybackState::error("Error parsing Spotify data."), None);
        assert!(svg.contains(ERROR_ACCENT));
        assert!(svg.contains("Error parsing Spotify data."));
        assert!(!svg.contains(IDLE_MESSAGE));
    }

    #[test]
    fn test_disc_playing_spins_without_progress_bar() {
        let state = PlaybackState::Playing(sample_track());
        let svg = render(&state, Some("data:image/jpeg;base64,YWJj"));

        assert!(svg.contains(r#"class="animate-spin-slow""#));
        assert!(svg.contains(r#"<img src="data:image/jpeg;base64,YWJj" alt="X""#));
        assert!(svg.contains(">A, B</p>"));
        assert!(svg.contains(">Alb</p>"));
        assert!(!svg.contains("0:50"));
    }

    #[test]
    fn test_disc_missing_art_renders_placeholder() {
        let svg = render(&PlaybackState::Playing(sample_track()), None);
        assert!(!svg.contains("<img"));
        assert!(svg.contains("repeating-radial-gradient"));
    }

    #[test]
    fn test_disc_escapes_track_fields() {
        let mut track = sample_track();
        track.title = r#"<b>"Loud"</b>"#.into();
        track.artist = "AC/DC & Friends".into();
        let svg = render(&PlaybackState::Playing(track), Some("data:image/png;base64,AA=="));

        assert!(!svg.contains("<b>"));
        assert!(!svg.contains("AC/DC & Friends"));
        assert!(svg.contains(r#"alt="&lt;b&gt;&quot;Loud&quot;&lt;/b&gt;""#));
        assert!(svg.contains("AC/DC &amp; Friends"));
    }
}
