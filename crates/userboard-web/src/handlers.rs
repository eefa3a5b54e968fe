//! HTTP route handlers.
//!
//! HTML endpoints respond with fragments from [`crate::render`]; every
//! mutation response re-renders the form panel and appends an out-of-band
//! user list, plus an `HX-Trigger` header announcing the refresh events.

use std::sync::Arc;
use std::time::{Duration, SystemTime};

use axum::Json;
use axum::extract::{Form, Path, Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use userboard_store::{AdminScope, NewUser, StoreError, UserKind, UserPatch};

use crate::frontend;
use crate::render;
use crate::state::AppState;

/// Events fired at the browser after a successful mutation.
const REFRESH_EVENTS: &str = r#"{"userListUpdate": "", "resetForm": ""}"#;

// ---------------------------------------------------------------------------
// GET /
// ---------------------------------------------------------------------------

/// Render the full page: add-user form plus the current user list.
pub async fn index(State(state): State<Arc<AppState>>) -> Html<String> {
    let body = format!(
        "{}\n{}",
        render::profile_form(""),
        render::user_list_panel(&state.users.list()),
    );
    Html(frontend::base_layout(&body))
}

// ---------------------------------------------------------------------------
// GET /profile-form
// ---------------------------------------------------------------------------

/// Render a blank add-user form panel (used by the edit form's Cancel).
pub async fn profile_form() -> Html<String> {
    Html(render::profile_form(""))
}

// ---------------------------------------------------------------------------
// POST /check-username
// ---------------------------------------------------------------------------

/// Form body for the username availability check.
#[derive(Deserialize)]
pub struct CheckUsernameForm {
    #[serde(default)]
    pub username: String,
}

/// Render the availability fragment for the typed username.
pub async fn check_username(
    State(state): State<Arc<AppState>>,
    Form(form): Form<CheckUsernameForm>,
) -> Html<String> {
    let available = !state.users.username_exists(&form.username);
    Html(render::availability(available))
}

// ---------------------------------------------------------------------------
// GET /users
// ---------------------------------------------------------------------------

/// Render the user list fragment.
pub async fn list_users(State(state): State<Arc<AppState>>) -> Html<String> {
    Html(render::user_list(&state.users.list()))
}

// ---------------------------------------------------------------------------
// POST /users
// ---------------------------------------------------------------------------

/// Form body for creating a user.
#[derive(Deserialize)]
pub struct AddUserForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default = "default_user_type")]
    pub user_type: String,
    /// Checkbox; present as `"on"` when checked.
    pub console_access: Option<String>,
    /// Checkbox; present as `"on"` when checked.
    pub logs_access: Option<String>,
}

fn default_user_type() -> String {
    "regular".into()
}

/// Create a user from the submitted form and re-render form + list.
pub async fn add_user(
    State(state): State<Arc<AppState>>,
    Form(form): Form<AddUserForm>,
) -> Response {
    if form.username.is_empty() || form.email.is_empty() {
        return add_error(&state, "Username and email are required");
    }

    let kind = match UserKind::from_str(&form.user_type) {
        Ok(kind) => kind,
        Err(e) => {
            warn!(user_type = %form.user_type, "rejected user creation");
            return add_error(&state, &e.to_string());
        }
    };

    let scope = match kind {
        UserKind::Admin => Some(AdminScope {
            console_access: form.console_access.as_deref() == Some("on"),
            logs_access: form.logs_access.as_deref() == Some("on"),
        }),
        UserKind::Regular => None,
    };

    match state.users.add(NewUser {
        username: form.username,
        email: form.email,
        kind,
        scope,
    }) {
        Ok(user) => {
            debug!(user_id = %user.id, "user created via form");
            mutation_ok(&state)
        }
        Err(e) => add_error(&state, &e.to_string()),
    }
}

// ---------------------------------------------------------------------------
// GET /users/{id}/edit
// ---------------------------------------------------------------------------

/// Render the edit form for one record.
pub async fn edit_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Response {
    match state.users.get(&id) {
        Some(user) => Html(render::edit_form(&user, "")).into_response(),
        None => {
            warn!(user_id = %id, "edit form requested for missing user");
            (StatusCode::NOT_FOUND, "User not found").into_response()
        }
    }
}

// ---------------------------------------------------------------------------
// PUT /users/{id}
// ---------------------------------------------------------------------------

/// Form body for updating a user.  Empty fields are left unchanged.
#[derive(Deserialize)]
pub struct UpdateUserForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
}

/// Apply a partial update and re-render form + list.
pub async fn update_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Form(form): Form<UpdateUserForm>,
) -> Response {
    let patch = UserPatch {
        username: form.username,
        email: form.email,
    };
    match state.users.update(&id, patch) {
        Ok(user) => {
            debug!(user_id = %user.id, "user updated via form");
            mutation_ok(&state)
        }
        Err(e @ StoreError::NotFound { .. }) => {
            warn!(user_id = %id, "update requested for missing user");
            not_found_panel(&state, &e.to_string())
        }
        Err(e) => {
            // Re-render the edit form so the user can correct the input.
            let body = match state.users.get(&id) {
                Some(user) => render::edit_form(&user, &e.to_string()),
                None => render::profile_form(&e.to_string()),
            };
            (
                StatusCode::BAD_REQUEST,
                Html(format!("{body}{}", render::user_list_oob(&state.users.list()))),
            )
                .into_response()
        }
    }
}

// ---------------------------------------------------------------------------
// DELETE /users/{id}
// ---------------------------------------------------------------------------

/// Delete a record and re-render form + list.
pub async fn delete_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Response {
    match state.users.delete(&id) {
        Ok(()) => {
            debug!(user_id = %id, "user deleted via form");
            mutation_ok(&state)
        }
        Err(e) => {
            warn!(user_id = %id, error = %e, "user deletion failed");
            not_found_panel(&state, &e.to_string())
        }
    }
}

// ---------------------------------------------------------------------------
// GET /user-type-fields
// ---------------------------------------------------------------------------

/// Query string for the extra-fields fragment.
#[derive(Deserialize)]
pub struct UserTypeQuery {
    pub user_type: Option<String>,
}

/// Render the type-dependent extra form fields.
pub async fn user_type_fields(Query(query): Query<UserTypeQuery>) -> Html<String> {
    let kind = query
        .user_type
        .as_deref()
        .and_then(|t| UserKind::from_str(t).ok())
        .unwrap_or(UserKind::Regular);
    Html(render::extra_fields(kind))
}

// ---------------------------------------------------------------------------
// GET /api/status
// ---------------------------------------------------------------------------

/// Response payload for the `/api/status` endpoint.
#[derive(Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub user_count: usize,
    pub uptime_seconds: u64,
}

// Global startup time for uptime calculation.
static STARTUP_TIME: std::sync::OnceLock<SystemTime> = std::sync::OnceLock::new();

/// Initialize the startup time (call this once at server start).
pub fn init_startup_time() {
    STARTUP_TIME.set(SystemTime::now()).ok();
}

/// Return basic service status information.
pub async fn status(State(state): State<Arc<AppState>>) -> Json<StatusResponse> {
    let startup_time = STARTUP_TIME.get().copied().unwrap_or_else(SystemTime::now);
    let uptime = SystemTime::now()
        .duration_since(startup_time)
        .unwrap_or(Duration::ZERO)
        .as_secs();

    Json(StatusResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        user_count: state.users.count(),
        uptime_seconds: uptime,
    })
}

// ---------------------------------------------------------------------------
// Response helpers
// ---------------------------------------------------------------------------

/// Successful mutation: refresh events + fresh form + out-of-band list.
fn mutation_ok(state: &AppState) -> Response {
    (
        [("hx-trigger", REFRESH_EVENTS)],
        Html(format!(
            "{}{}",
            render::profile_form(""),
            render::user_list_oob(&state.users.list())
        )),
    )
        .into_response()
}

/// Failed creation: 400 + form with error banner + out-of-band list.
fn add_error(state: &AppState, message: &str) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Html(format!(
            "{}{}",
            render::profile_form(message),
            render::user_list_oob(&state.users.list())
        )),
    )
        .into_response()
}

/// Missing record: 404 + form with error banner + out-of-band list.
fn not_found_panel(state: &AppState, message: &str) -> Response {
    (
        StatusCode::NOT_FOUND,
        Html(format!(
            "{}{}",
            render::profile_form(message),
            render::user_list_oob(&state.users.list())
        )),
    )
        .into_response()
}
