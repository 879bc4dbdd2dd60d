//! HTTP surface for the participant roster.

pub mod api;
pub mod config;
pub mod transport;

pub use config::ServerConfig;
pub use transport::{router, serve_http, AppState};
