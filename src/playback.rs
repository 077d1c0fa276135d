use serde::{Deserialize, Serialize};

/// Normalized view of whatever Spotify reports for the account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaybackState {
    Playing(NowPlayingTrack),
    NotPlaying,
    Error { message: String },
}

impl PlaybackState {
    pub fn error(message: impl Into<String>) -> Self {
        PlaybackState::Error {
            message: message.into(),
        }
    }

    pub fn is_playing(&self) -> bool {
        matches!(self, PlaybackState::Playing(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NowPlayingTrack {
    pub title: String,
    /// Artist names joined with `", "`
    pub artist: String,
    pub album: String,
    pub album_image_url: Option<String>,
    pub track_url: Option<String>,
    pub progress_ms: u64,
    pub duration_ms: u64,
}

impl NowPlayingTrack {
    pub fn progress_percent(&self) -> f64 {
        progress_percent(self.progress_ms, self.duration_ms)
    }
}

/// Share of the track already played, in `0.0..=100.0`.
///
/// A zero duration (podcasts, local files) yields 0 rather than NaN.
pub fn progress_percent(progress_ms: u64, duration_ms: u64) -> f64 {
    if duration_ms == 0 {
        return 0.0;
    }
    (progress_ms as f64 / duration_ms as f64 * 100.0).clamp(0.0, 100.0)
}

/// Format milliseconds as `m:ss`
pub fn format_duration(ms: u64) -> String {
    let minutes = ms / 60_000;
    let seconds = (ms % 60_000) / 1000;
    format!("{}:{:02}", minutes, seconds)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_percent_zero_duration() {
        assert_eq!(progress_percent(0, 0), 0.0);
        assert_eq!(progress_percent(50_000, 0), 0.0);
    }

    #[test]
    fn test_progress_percent() {
        assert_eq!(progress_percent(50_000, 200_000), 25.0);
        assert_eq!(progress_percent(200_000, 200_000), 100.0);
    }

    #[test]
    fn test_progress_percent_clamps_overshoot() {
        assert_eq!(progress_percent(250_000, 200_000), 100.0);
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(125_000), "2:05");
        assert_eq!(format_duration(65_000), "1:05");
        assert_eq!(format_duration(0), "0:00");
        assert_eq!(format_duration(59_999), "0:59");
        assert_eq!(format_duration(3_600_000), "60:00");
    }
}
