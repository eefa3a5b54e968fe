//! Shared application state for the web server.
//!
//! [`AppState`] is wrapped in an `Arc` and shared across all request
//! handlers.  It holds the user registry and the server configuration.
//! The registry is injected at construction time so tests can build the
//! router around a fresh, isolated store.

use userboard_store::UserStore;

use crate::WebConfig;

/// Shared state accessible from every Axum handler.
#[derive(Clone)]
pub struct AppState {
    /// The user registry all handlers read and mutate.
    pub users: UserStore,

    /// Web server configuration.
    pub config: WebConfig,
}
