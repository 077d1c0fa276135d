pub mod image;
pub mod spotify;
