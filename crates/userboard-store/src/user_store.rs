//! In-memory user registry.
//!
//! [`UserStore`] keeps the whole collection behind one reader/writer lock:
//! a primary id → record map plus a lowercase username → id index. Readers
//! run concurrently; every mutation holds the write lock for its full
//! duration, so the two maps are never observed out of agreement.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};
use uuid::Uuid;

use crate::error::{StoreError, StoreResult};

// ═══════════════════════════════════════════════════════════════════════
//  Types
// ═══════════════════════════════════════════════════════════════════════

/// A user record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier (UUID v7), assigned by the store.
    pub id: String,
    /// Unique login name (case-insensitive uniqueness).
    pub username: String,
    /// Contact email. No format validation is enforced.
    pub email: String,
    /// Whether this is an admin or a regular user.
    pub kind: UserKind,
    /// Admin-only capability flags. Always `None` for regular users.
    pub scope: Option<AdminScope>,
    /// Creation time, set once and immutable thereafter.
    pub created_at: DateTime<Utc>,
}

/// User categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserKind {
    /// May carry an [`AdminScope`].
    Admin,
    /// Standard user, never carries a scope.
    Regular,
}

impl UserKind {
    /// Convert from a form/wire string representation.
    pub fn from_str(s: &str) -> StoreResult<Self> {
        match s {
            "admin" => Ok(Self::Admin),
            "regular" => Ok(Self::Regular),
            other => Err(StoreError::InvalidInput(format!(
                "unknown user type: {other}"
            ))),
        }
    }

    /// Convert to a form/wire string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Regular => "regular",
        }
    }
}

impl std::fmt::Display for UserKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Admin capability flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminScope {
    /// Access to the operations console.
    pub console_access: bool,
    /// Access to system logs.
    pub logs_access: bool,
}

/// Candidate record for [`UserStore::add`].
///
/// The id and creation timestamp are assigned by the store; a supplied
/// `scope` is only honored when `kind` is [`UserKind::Admin`].
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub kind: UserKind,
    pub scope: Option<AdminScope>,
}

/// Partial update for [`UserStore::update`].
///
/// Empty fields mean "leave unchanged" — a caller cannot clear a field
/// through this type. Kind and scope are fixed at creation and cannot be
/// patched.
#[derive(Debug, Clone, Default)]
pub struct UserPatch {
    pub username: String,
    pub email: String,
}

// ═══════════════════════════════════════════════════════════════════════
//  UserStore
// ═══════════════════════════════════════════════════════════════════════

/// Paired maps guarded together by the store's lock.
///
/// Invariant: every entry in `usernames` maps a lowercased username to an
/// id present in `users` whose record carries that username, and every
/// record's lowercased username appears in `usernames`.
#[derive(Debug, Default)]
struct Inner {
    users: HashMap<String, User>,
    /// Lowercase username → id.
    usernames: HashMap<String, String>,
}

/// Concurrency-safe CRUD over the user collection with case-insensitive
/// username uniqueness.
///
/// Cheap to clone; all clones share the same underlying registry. Construct
/// one instance at startup and pass it to whatever needs it — there is no
/// process-wide singleton.
#[derive(Debug, Clone, Default)]
pub struct UserStore {
    inner: Arc<RwLock<Inner>>,
}

impl UserStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new user record.
    ///
    /// Assigns a fresh id and creation timestamp. Returns
    /// [`StoreError::InvalidInput`] if the username is empty and
    /// [`StoreError::DuplicateUsername`] if it collides case-insensitively
    /// with an existing record. A `None` scope on an admin candidate is
    /// preserved as `None`; any scope on a regular candidate is dropped.
    #[instrument(skip(self, candidate), fields(username = %candidate.username))]
    pub fn add(&self, candidate: NewUser) -> StoreResult<User> {
        if candidate.username.is_empty() {
            return Err(StoreError::InvalidInput(
                "username must not be empty".into(),
            ));
        }

        let mut inner = self.write();
        let key = candidate.username.to_lowercase();
        if inner.usernames.contains_key(&key) {
            debug!(username = %candidate.username, "add rejected: username taken");
            return Err(StoreError::DuplicateUsername(candidate.username));
        }

        let user = User {
            id: Uuid::now_v7().to_string(),
            username: candidate.username,
            email: candidate.email,
            kind: candidate.kind,
            scope: match candidate.kind {
                UserKind::Admin => candidate.scope,
                UserKind::Regular => None,
            },
            created_at: Utc::now(),
        };

        inner.usernames.insert(key, user.id.clone());
        inner.users.insert(user.id.clone(), user.clone());

        debug!(user_id = %user.id, username = %user.username, "user created");
        Ok(user)
    }

    /// Case-insensitive membership check against the username index.
    pub fn username_exists(&self, username: &str) -> bool {
        self.read().usernames.contains_key(&username.to_lowercase())
    }

    /// Snapshot of all current records. Order is unspecified.
    pub fn list(&self) -> Vec<User> {
        self.read().users.values().cloned().collect()
    }

    /// Fetch a single record by id.
    pub fn get(&self, id: &str) -> Option<User> {
        self.read().users.get(id).cloned()
    }

    /// Apply a partial update to an existing record.
    ///
    /// A non-empty `patch.username` that differs from the current name is
    /// re-validated for uniqueness against all *other* records, then the
    /// index entry is swapped atomically with the rename. A non-empty
    /// `patch.email` replaces the email. Empty fields are no-ops. Returns
    /// the updated record.
    #[instrument(skip(self, patch))]
    pub fn update(&self, id: &str, patch: UserPatch) -> StoreResult<User> {
        let mut guard = self.write();
        let inner = &mut *guard;
        let Some(user) = inner.users.get_mut(id) else {
            debug!(user_id = %id, "update rejected: not found");
            return Err(StoreError::NotFound { id: id.to_string() });
        };

        if !patch.username.is_empty() && patch.username != user.username {
            let new_key = patch.username.to_lowercase();
            if let Some(existing_id) = inner.usernames.get(&new_key)
                && existing_id != id
            {
                debug!(username = %patch.username, "update rejected: username taken");
                return Err(StoreError::DuplicateUsername(patch.username));
            }
            inner.usernames.remove(&user.username.to_lowercase());
            inner.usernames.insert(new_key, id.to_string());
            user.username = patch.username;
        }
        if !patch.email.is_empty() {
            user.email = patch.email;
        }

        debug!(user_id = %id, "user updated");
        Ok(user.clone())
    }

    /// Permanently remove a record from both the primary map and the
    /// username index.
    #[instrument(skip(self))]
    pub fn delete(&self, id: &str) -> StoreResult<()> {
        let mut inner = self.write();
        let Some(user) = inner.users.remove(id) else {
            debug!(user_id = %id, "delete rejected: not found");
            return Err(StoreError::NotFound { id: id.to_string() });
        };
        inner.usernames.remove(&user.username.to_lowercase());
        debug!(user_id = %id, username = %user.username, "user deleted");
        Ok(())
    }

    /// Number of live records.
    pub fn count(&self) -> usize {
        self.read().users.len()
    }

    // Mutations never unwind between touching the two maps, so a poisoned
    // lock still guards structurally consistent state; recover rather than
    // propagate.
    fn read(&self) -> std::sync::RwLockReadGuard<'_, Inner> {
        self.inner.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, Inner> {
        self.inner.write().unwrap_or_else(|e| e.into_inner())
    }
}

// ── tests ────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn regular(username: &str, email: &str) -> NewUser {
        NewUser {
            username: username.into(),
            email: email.into(),
            kind: UserKind::Regular,
            scope: None,
        }
    }

    fn admin(username: &str, scope: Option<AdminScope>) -> NewUser {
        NewUser {
            username: username.into(),
            email: format!("{username}@example.com"),
            kind: UserKind::Admin,
            scope,
        }
    }

    #[test]
    fn add_and_get_user() {
        let store = UserStore::new();
        let before = Utc::now();

        let user = store.add(regular("alice", "alice@example.com")).unwrap();

        assert!(!user.id.is_empty());
        assert_eq!(user.username, "alice");
        assert_eq!(user.email, "alice@example.com");
        assert_eq!(user.kind, UserKind::Regular);
        assert!(user.scope.is_none());
        assert!(user.created_at >= before);

        let fetched = store.get(&user.id).unwrap();
        assert_eq!(fetched.id, user.id);
        assert_eq!(fetched.username, "alice");
    }

    #[test]
    fn get_nonexistent_user_returns_none() {
        let store = UserStore::new();
        assert!(store.get("nonexistent-id").is_none());
    }

    #[test]
    fn distinct_usernames_all_succeed() {
        let store = UserStore::new();
        for i in 0..5 {
            store
                .add(regular(&format!("user{i}"), "u@example.com"))
                .unwrap();
        }
        assert_eq!(store.list().len(), 5);
        assert_eq!(store.count(), 5);
    }

    #[test]
    fn duplicate_username_rejected_case_insensitively() {
        let store = UserStore::new();
        store.add(regular("Alice", "a@x.com")).unwrap();

        let result = store.add(regular("alice", "a2@x.com"));
        assert_eq!(
            result.unwrap_err(),
            StoreError::DuplicateUsername("alice".into())
        );
        assert_eq!(store.list().len(), 1);
    }

    #[test]
    fn empty_username_rejected_and_store_unchanged() {
        let store = UserStore::new();
        let result = store.add(regular("", "a@x.com"));
        assert!(matches!(result.unwrap_err(), StoreError::InvalidInput(_)));
        assert_eq!(store.count(), 0);
    }

    #[test]
    fn username_exists_is_case_insensitive() {
        let store = UserStore::new();
        store.add(regular("Bob", "b@x.com")).unwrap();

        assert!(store.username_exists("bob"));
        assert!(store.username_exists("BOB"));
        assert!(!store.username_exists("carol"));
    }

    #[test]
    fn admin_scope_is_copied() {
        let store = UserStore::new();
        let user = store
            .add(admin(
                "root",
                Some(AdminScope {
                    console_access: true,
                    logs_access: false,
                }),
            ))
            .unwrap();

        let scope = user.scope.unwrap();
        assert!(scope.console_access);
        assert!(!scope.logs_access);
    }

    #[test]
    fn admin_without_scope_stays_none() {
        let store = UserStore::new();
        let user = store.add(admin("root", None)).unwrap();
        assert!(user.scope.is_none());
    }

    #[test]
    fn regular_user_scope_is_dropped() {
        let store = UserStore::new();
        let user = store
            .add(NewUser {
                username: "plain".into(),
                email: "p@x.com".into(),
                kind: UserKind::Regular,
                scope: Some(AdminScope::default()),
            })
            .unwrap();
        assert!(user.scope.is_none());
    }

    #[test]
    fn update_nonexistent_returns_not_found() {
        let store = UserStore::new();
        let result = store.update("nonexistent-id", UserPatch::default());
        assert_eq!(
            result.unwrap_err(),
            StoreError::NotFound {
                id: "nonexistent-id".into()
            }
        );
    }

    #[test]
    fn update_email_only_leaves_username_and_index_alone() {
        let store = UserStore::new();
        let user = store.add(regular("dana", "old@x.com")).unwrap();

        let updated = store
            .update(
                &user.id,
                UserPatch {
                    username: String::new(),
                    email: "new@x.com".into(),
                },
            )
            .unwrap();

        assert_eq!(updated.username, "dana");
        assert_eq!(updated.email, "new@x.com");
        assert!(store.username_exists("dana"));
    }

    #[test]
    fn update_rename_swaps_index_entry() {
        let store = UserStore::new();
        let user = store.add(regular("erin", "e@x.com")).unwrap();

        store
            .update(
                &user.id,
                UserPatch {
                    username: "erin2".into(),
                    email: String::new(),
                },
            )
            .unwrap();

        assert!(!store.username_exists("erin"));
        assert!(store.username_exists("erin2"));
        assert_eq!(store.get(&user.id).unwrap().username, "erin2");
        // The freed name is available again.
        store.add(regular("erin", "e2@x.com")).unwrap();
    }

    #[test]
    fn update_rename_to_taken_name_rejected() {
        let store = UserStore::new();
        store.add(regular("frank", "f@x.com")).unwrap();
        let user = store.add(regular("grace", "g@x.com")).unwrap();

        let result = store.update(
            &user.id,
            UserPatch {
                username: "Frank".into(),
                email: String::new(),
            },
        );
        assert_eq!(
            result.unwrap_err(),
            StoreError::DuplicateUsername("Frank".into())
        );
        // Unchanged on failure.
        assert_eq!(store.get(&user.id).unwrap().username, "grace");
        assert!(store.username_exists("grace"));
    }

    #[test]
    fn update_rename_to_own_name_different_case_succeeds() {
        let store = UserStore::new();
        let user = store.add(regular("heidi", "h@x.com")).unwrap();

        let updated = store
            .update(
                &user.id,
                UserPatch {
                    username: "HEIDI".into(),
                    email: String::new(),
                },
            )
            .unwrap();

        assert_eq!(updated.username, "HEIDI");
        assert!(store.username_exists("heidi"));
        assert_eq!(store.count(), 1);
    }

    #[test]
    fn update_empty_patch_is_noop() {
        let store = UserStore::new();
        let user = store.add(regular("ivan", "i@x.com")).unwrap();

        let updated = store.update(&user.id, UserPatch::default()).unwrap();
        assert_eq!(updated.username, "ivan");
        assert_eq!(updated.email, "i@x.com");
    }

    #[test]
    fn delete_frees_username_for_reuse() {
        let store = UserStore::new();
        let user = store.add(regular("judy", "j@x.com")).unwrap();

        store.delete(&user.id).unwrap();

        assert!(store.get(&user.id).is_none());
        assert!(!store.username_exists("judy"));
        store.add(regular("Judy", "j2@x.com")).unwrap();
        assert_eq!(store.count(), 1);
    }

    #[test]
    fn delete_nonexistent_returns_not_found() {
        let store = UserStore::new();
        let result = store.delete("nonexistent-id");
        assert_eq!(
            result.unwrap_err(),
            StoreError::NotFound {
                id: "nonexistent-id".into()
            }
        );
    }

    #[test]
    fn concurrent_adds_with_same_username_admit_exactly_one() {
        let store = UserStore::new();
        let mut handles = Vec::new();

        for i in 0..8 {
            let store = store.clone();
            handles.push(std::thread::spawn(move || {
                store.add(regular("contested", &format!("c{i}@x.com")))
            }));
        }

        let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        let winners = results.iter().filter(|r| r.is_ok()).count();
        let losers = results
            .iter()
            .filter(|r| matches!(r, Err(StoreError::DuplicateUsername(_))))
            .count();

        assert_eq!(winners, 1);
        assert_eq!(losers, 7);
        assert_eq!(store.count(), 1);
        assert!(store.username_exists("contested"));
    }

    #[test]
    fn user_serializes_kind_lowercase() {
        let store = UserStore::new();
        let user = store.add(admin("kim", None)).unwrap();

        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json["kind"], "admin");
        assert_eq!(json["scope"], serde_json::Value::Null);
    }
}
