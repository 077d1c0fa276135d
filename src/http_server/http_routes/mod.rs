pub mod badge;
pub mod now_playing;
pub mod random_badge;
