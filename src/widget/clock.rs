/// Locally advancing playback position between polls.
///
/// Only ever moves forward while the last poll said a track is playing, and never past its
/// duration. Every poll overwrites it with the server's numbers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProgressClock {
    progress_ms: u64,
    duration_ms: u64,
    playing: bool,
}

impl ProgressClock {
    pub fn playing(progress_ms: u64, duration_ms: u64) -> Self {
        Self {
            progress_ms: progress_ms.min(duration_ms),
            duration_ms,
            playing: true,
        }
    }

    pub fn stopped() -> Self {
        Self::default()
    }

    pub fn advance(&mut self, elapsed_ms: u64) {
        if self.playing && self.progress_ms < self.duration_ms {
            self.progress_ms = self
                .progress_ms
                .saturating_add(elapsed_ms)
                .min(self.duration_ms);
        }
    }

    pub fn progress_ms(&self) -> u64 {
        self.progress_ms
    }

    pub fn duration_ms(&self) -> u64 {
        self.duration_ms
    }
}
