//! # userboard-store
//!
//! In-memory user registry for userboard.
//!
//! Provides [`UserStore`], a concurrency-safe CRUD collection of user
//! records keyed by a store-assigned id, with a secondary case-insensitive
//! username index enforcing uniqueness in O(1).
//!
//! ## Quick start
//!
//! ```ignore
//! use userboard_store::{NewUser, UserKind, UserStore};
//!
//! let store = UserStore::new();
//! let user = store.add(NewUser {
//!     username: "alice".into(),
//!     email: "alice@example.com".into(),
//!     kind: UserKind::Regular,
//!     scope: None,
//! })?;
//! assert!(store.username_exists("ALICE"));
//! ```

pub mod error;
pub mod user_store;

// ── re-exports ───────────────────────────────────────────────────────

pub use error::{StoreError, StoreResult};
pub use user_store::{AdminScope, NewUser, User, UserKind, UserPatch, UserStore};
