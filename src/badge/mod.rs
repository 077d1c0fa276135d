//! SVG badges for embedding the playback state in READMEs and other pages.
//!
//! Each badge is a fixed-size `<svg>` wrapping an XHTML block in a `<foreignObject>`. All
//! styling is inline so the output doesn't depend on the embedding page.

pub mod card;
pub mod disc;
pub mod escape;

use rand::Rng;

use crate::playback::PlaybackState;

pub const SPOTIFY_GREEN: &str = "#1DB954";
pub const ERROR_ACCENT: &str = "#F87171";

pub const FONT_STACK: &str =
    "-apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, Helvetica, Arial, sans-serif";

/// What a renderer needs: the state plus the album art already inlined as a data URI.
#[derive(Debug, Clone, Copy)]
pub struct RenderInput<'a> {
    pub state: &'a PlaybackState,
    pub album_art: Option<&'a str>,
}

impl<'a> RenderInput<'a> {
    pub fn new(state: &'a PlaybackState, album_art: Option<&'a str>) -> Self {
        Self { state, album_art }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadgeVariant {
    Card,
    Dvd,
}

impl BadgeVariant {
    pub const ALL: [BadgeVariant; 2] = [BadgeVariant::Card, BadgeVariant::Dvd];

    /// Last path segment of the badge's route
    pub fn route_segment(self) -> &'static str {
        match self {
            BadgeVariant::Card => "card",
            BadgeVariant::Dvd => "dvd",
        }
    }

    pub fn render(self, input: &RenderInput<'_>) -> String {
        match self {
            BadgeVariant::Card => card::render_card(input),
            BadgeVariant::Dvd => disc::render_disc(input),
        }
    }

    /// Uniform pick between the variants.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }
}

/// Spotify logo as a standalone `<svg>` element.
pub(crate) fn spotify_icon(size: u32, fill: &str) -> String {
    format!(
        r#"<svg role="img" width="{size}" height="{size}" viewBox="0 0 24 24" fill="{fill}" xmlns="http://www.w3.org/2000/svg"><path d="M12 0C5.4 0 0 5.4 0 12s5.4 12 12 12 12-5.4 12-12S18.66 0 12 0zm5.521 17.34c-.24.359-.66.48-1.021.24-2.82-1.74-6.36-2.101-10.561-1.141-.418.122-.779-.179-.899-.539-.12-.421.18-.78.54-.9 4.56-1.021 8.52-.6 11.64 1.32.42.18.479.659.301 1.02zm1.44-3.3c-.301.42-.841.6-1.262.3-3.239-1.98-8.159-2.58-11.939-1.38-.479.12-1.02-.12-1.14-.6-.12-.48.12-1.021.6-1.141C9.6 9.9 15 10.561 18.72 12.84c.361.181.54.78.241 1.2zm.12-3.36C15.24 8.4 8.82 8.16 5.16 9.301c-.6.179-1.2-.181-1.38-.721-.18-.601.18-1.2.72-1.381 4.26-1.26 11.28-1.02 15.721 1.621.539.3.719 1.02.419 1.56-.299.421-1.02.599-1.559.3z"/></svg>"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_route_segments() {
        assert_eq!(BadgeVariant::Card.route_segment(), "card");
        assert_eq!(BadgeVariant::Dvd.route_segment(), "dvd");
    }

    #[test]
    fn test_random_variant_is_roughly_uniform() {
        let mut rng = StdRng::seed_from_u64(0x5eed);
        let draws = 1000;
        let cards = (0..draws)
            .filter(|_| BadgeVariant::random(&mut rng) == BadgeVariant::Card)
            .count();

        // Five standard deviations of a fair coin over 1000 flips is ~79
        assert!((421..=579).contains(&cards), "cards = {cards}");
    }

    #[test]
    fn test_random_variant_hits_both() {
        let mut rng = rand::rng();
        let seen: Vec<_> = (0..200).map(|_| BadgeVariant::random(&mut rng)).collect();
        assert!(seen.contains(&BadgeVariant::Card));
        assert!(seen.contains(&BadgeVariant::Dvd));
    }
}
