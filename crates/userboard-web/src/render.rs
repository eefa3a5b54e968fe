//! HTML fragment builders.
//!
//! Every endpoint that talks to the browser responds with one or more of
//! these fragments.  Mutation responses pair the form panel with an
//! out-of-band copy of the user list so htmx refreshes both in one swap.
//! All user-supplied strings pass through [`escape`] before interpolation.

use userboard_store::{User, UserKind};

/// Escape a string for safe interpolation into HTML text or attributes.
pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// The red error banner shown above the form.
pub fn error_banner(message: &str) -> String {
    format!(
        r#"<div id="error-message">{}</div>"#,
        escape(message)
    )
}

/// The user list table.
///
/// The store promises no ordering, so rows are sorted by creation time
/// here to keep the display stable across refreshes.
pub fn user_list(users: &[User]) -> String {
    if users.is_empty() {
        return r#"<div class="empty">No users yet.</div>"#.into();
    }

    let mut users = users.to_vec();
    users.sort_by(|a, b| a.created_at.cmp(&b.created_at));

    let mut rows = String::new();
    for user in &users {
        let scope = match (&user.kind, &user.scope) {
            (UserKind::Admin, Some(s)) => {
                let mut flags = Vec::new();
                if s.console_access {
                    flags.push("console");
                }
                if s.logs_access {
                    flags.push("logs");
                }
                if flags.is_empty() {
                    "none".to_string()
                } else {
                    flags.join(", ")
                }
            }
            _ => "&mdash;".to_string(),
        };
        rows.push_str(&format!(
            r##"<tr>
<td>{username}</td>
<td>{email}</td>
<td><span class="badge {kind}">{kind}</span></td>
<td>{scope}</td>
<td>{created}</td>
<td>
<button class="ghost" hx-get="/users/{id}/edit" hx-target="#form-panel" hx-swap="outerHTML">Edit</button>
<button hx-delete="/users/{id}" hx-target="#form-panel" hx-swap="outerHTML" hx-confirm="Delete {username}?">Delete</button>
</td>
</tr>
"##,
            username = escape(&user.username),
            email = escape(&user.email),
            kind = user.kind,
            scope = scope,
            created = user.created_at.format("%Y-%m-%d %H:%M"),
            id = user.id,
        ));
    }

    format!(
        r#"<table>
<thead><tr><th>Username</th><th>Email</th><th>Type</th><th>Scope</th><th>Created</th><th></th></tr></thead>
<tbody>
{rows}</tbody>
</table>"#
    )
}

// The list container re-fetches itself whenever a userListUpdate event
// reaches the body (fired via the HX-Trigger response header).
const LIST_PANEL_ATTRS: &str =
    r#"id="user-list" class="panel" hx-get="/users" hx-trigger="userListUpdate from:body" hx-swap="innerHTML""#;

/// The user list wrapped in its container, as placed on the full page.
pub fn user_list_panel(users: &[User]) -> String {
    format!(
        r#"<div {LIST_PANEL_ATTRS}><h2>Users</h2>{}</div>"#,
        user_list(users)
    )
}

/// The user list container marked for out-of-band swap.
///
/// Appended to mutation responses so the list refreshes alongside the form.
pub fn user_list_oob(users: &[User]) -> String {
    format!(
        r#"<div {LIST_PANEL_ATTRS} hx-swap-oob="true"><h2>Users</h2>{}</div>"#,
        user_list(users)
    )
}

/// The blank add-user form panel.  `error` is rendered as a banner above
/// the form when non-empty.
pub fn profile_form(error: &str) -> String {
    let banner = if error.is_empty() {
        String::new()
    } else {
        error_banner(error)
    };
    format!(
        r##"<div id="form-panel" class="panel">
<h2>Add user</h2>
{banner}
<form hx-post="/users" hx-target="#form-panel" hx-swap="outerHTML">
<label for="username">Username</label>
<input type="text" id="username" name="username" autocomplete="off"
 hx-post="/check-username" hx-trigger="keyup changed delay:300ms" hx-target="#username-status">
<div id="username-status"></div>
<label for="email">Email</label>
<input type="email" id="email" name="email">
<label for="user_type">Type</label>
<select id="user_type" name="user_type" hx-get="/user-type-fields" hx-trigger="change" hx-target="#extra-fields">
<option value="regular">regular</option>
<option value="admin">admin</option>
</select>
<div id="extra-fields"></div>
<button type="submit">Add user</button>
</form>
</div>"##
    )
}

/// The edit form panel for one record, prefilled with its current values.
pub fn edit_form(user: &User, error: &str) -> String {
    let banner = if error.is_empty() {
        String::new()
    } else {
        error_banner(error)
    };
    format!(
        r##"<div id="form-panel" class="panel">
<h2>Edit user</h2>
{banner}
<form hx-put="/users/{id}" hx-target="#form-panel" hx-swap="outerHTML">
<label for="username">Username</label>
<input type="text" id="username" name="username" value="{username}" autocomplete="off">
<label for="email">Email</label>
<input type="email" id="email" name="email" value="{email}">
<label>Type</label>
<div class="badge {kind}">{kind}</div>
<button type="submit">Save</button>
<button type="button" class="ghost" hx-get="/profile-form" hx-target="#form-panel" hx-swap="outerHTML">Cancel</button>
</form>
</div>"##,
        id = user.id,
        username = escape(&user.username),
        email = escape(&user.email),
        kind = user.kind,
    )
}

/// The username-availability fragment shown under the username input.
pub fn availability(available: bool) -> String {
    if available {
        r#"<span class="available">username is available</span>"#.into()
    } else {
        r#"<span class="taken">username is taken</span>"#.into()
    }
}

/// Extra form fields that depend on the selected user type: admins get the
/// two scope checkboxes, regular users get nothing.
pub fn extra_fields(kind: UserKind) -> String {
    match kind {
        UserKind::Admin => r#"<div class="checkbox-row">
<input type="checkbox" id="console_access" name="console_access">
<label for="console_access">Console access</label>
</div>
<div class="checkbox-row">
<input type="checkbox" id="logs_access" name="logs_access">
<label for="logs_access">Logs access</label>
</div>"#
            .into(),
        UserKind::Regular => String::new(),
    }
}

// ── tests ────────────────────────────────────────────────────────────
