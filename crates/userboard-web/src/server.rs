//! Main web server setup and startup.
//!
//! [`WebServer`] composes the Axum router, registers all routes, and starts
//! the HTTP listener.  The user registry is injected at construction time
//! rather than pulled from a global, so tests can drive the router against
//! a fresh store.

use std::sync::Arc;

use axum::Router;
use axum::http::{HeaderValue, Method};
use axum::routing::{delete, get, post, put};
use tower_http::cors::CorsLayer;

use userboard_store::UserStore;

use crate::WebConfig;
use crate::handlers;
use crate::state::AppState;

/// The userboard web server.
pub struct WebServer {
    config: WebConfig,
    state: Arc<AppState>,
}

impl WebServer {
    /// Create a new web server.
    ///
    /// # Arguments
    ///
    /// * `config` - Bind address and port configuration.
    /// * `users` - The user registry shared across all requests.
    pub fn new(config: WebConfig, users: UserStore) -> Self {
        let state = Arc::new(AppState {
            users,
            config: config.clone(),
        });
        Self { config, state }
    }

    /// Return the `host:port` string this server will bind to.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.config.bind_addr, self.config.port)
    }

    /// Build the Axum router with all routes registered.
    pub fn router(&self) -> Router {
        let cors = CorsLayer::new()
            .allow_origin("*".parse::<HeaderValue>().unwrap())
            .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
            .allow_headers(tower_http::cors::Any);

        Router::new()
            // Full page.
            .route("/", get(handlers::index))
            .route("/profile-form", get(handlers::profile_form))
            // Fragment endpoints.
            .route("/check-username", post(handlers::check_username))
            .route("/users", get(handlers::list_users))
            .route("/users", post(handlers::add_user))
            .route("/users/{id}/edit", get(handlers::edit_user))
            .route("/users/{id}", put(handlers::update_user))
            .route("/users/{id}", delete(handlers::delete_user))
            .route("/user-type-fields", get(handlers::user_type_fields))
            // JSON status.
            .route("/api/status", get(handlers::status))
            .layer(cors)
            .with_state(Arc::clone(&self.state))
    }

    /// Start the server and block until it is shut down.
    ///
    /// # Errors
    ///
    /// Returns an error if the TCP listener cannot be bound.
    pub async fn start(self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let addr = self.addr();
        let router = self.router();

        handlers::init_startup_time();
        tracing::info!(addr = %addr, "starting web server");

        let listener = tokio::net::TcpListener::bind(&addr).await?;
        axum::serve(listener, router).await?;

        Ok(())
    }
}
