pub mod credentials;
pub mod image_inliner;
pub mod now_playing;
pub mod spotify_client;
