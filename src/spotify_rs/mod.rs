//! Thin wrappers over the two Spotify Web API endpoints this service talks to.
//!
//! Docs:
//! https://developer.spotify.com/documentation/web-api

pub mod auth;
pub mod player;
pub mod types;
