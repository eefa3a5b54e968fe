//! Web interface for userboard.
//!
//! This crate provides the HTTP server that exposes the user registry
//! through a browser UI driven by partial-page updates (htmx).  It includes:
//!
//! - HTML fragment endpoints for the user list, profile/edit forms,
//!   username availability, and type-dependent extra fields.
//! - A JSON status endpoint at `/api/status`.
//! - An embedded page shell served at `/` — no external assets.

pub mod frontend;
pub mod handlers;
pub mod render;
pub mod server;
pub mod state;

pub use server::WebServer;
pub use state::AppState;

/// Web server configuration.
#[derive(Debug, Clone)]
pub struct WebConfig {
    /// The address to bind the HTTP server to.
    pub bind_addr: String,
    /// The port to listen on.
    pub port: u16,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1".into(),
            port: 3000,
        }
    }
}
