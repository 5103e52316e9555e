//! Ephemeral session slot for the authenticated user.
//!
//! Lives in its own in-memory backend, independent of the persistent
//! collections — the tab-scoped sessionStorage analog. Cleared on logout and
//! never survives a fresh process. Role checks take the `Role` enum resolved
//! once at login; no role-string dispatch.

use std::sync::Arc;

use crate::config;
use crate::models::{Role, User};
use crate::storage::{MemoryBackend, Store};

#[derive(Clone)]
pub struct SessionStore {
    store: Store,
}

impl SessionStore {
    /// Session over a fresh in-memory slot.
    pub fn new() -> Self {
        Self::with_store(Store::new(Arc::new(MemoryBackend::new())))
    }

    /// Session over an injected store (tests, embedding hosts).
    pub fn with_store(store: Store) -> Self {
        Self { store }
    }

    /// Stores the full user record as the current session.
    pub fn set_current_user(&self, user: &User) -> bool {
        self.store.set_item(config::SESSION_KEY, user)
    }

    pub fn current_user(&self) -> Option<User> {
        self.store.get_item(config::SESSION_KEY)
    }

    pub fn is_authenticated(&self) -> bool {
        self.current_user().is_some()
    }

    /// Clears the session (logout).
    pub fn clear(&self) -> bool {
        self.store.remove_item(config::SESSION_KEY)
    }

    pub fn has_role(&self, role: Role) -> bool {
        self.current_user().is_some_and(|user| user.role == role)
    }

    pub fn has_any_role(&self, roles: &[Role]) -> bool {
        self.current_user()
            .is_some_and(|user| roles.contains(&user.role))
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    fn user(role: Role) -> User {
        User {
            id: "user-1".into(),
            username: "ana".into(),
            password: "patient123".into(),
            role,
            name: "Ana López".into(),
            email: "ana@email.com".into(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn fresh_session_is_unauthenticated() {
        let session = SessionStore::new();
        assert!(!session.is_authenticated());
        assert!(session.current_user().is_none());
    }

    #[test]
    fn set_and_read_back_full_record() {
        let session = SessionStore::new();
        let u = user(Role::Patient);
        assert!(session.set_current_user(&u));
        assert_eq!(session.current_user().unwrap(), u);
        assert!(session.is_authenticated());
    }

    #[test]
    fn clear_ends_the_session() {
        let session = SessionStore::new();
        session.set_current_user(&user(Role::Admin));
        assert!(session.clear());
        assert!(!session.is_authenticated());
    }

    #[test]
    fn role_checks() {
        let session = SessionStore::new();
        session.set_current_user(&user(Role::Doctor));
        assert!(session.has_role(Role::Doctor));
        assert!(!session.has_role(Role::Admin));
        assert!(session.has_any_role(&[Role::Admin, Role::Doctor]));
        assert!(!session.has_any_role(&[Role::Admin, Role::Patient]));
    }

    #[test]
    fn role_checks_without_session_are_false() {
        let session = SessionStore::new();
        assert!(!session.has_role(Role::Admin));
        assert!(!session.has_any_role(&[Role::Admin, Role::Doctor, Role::Patient]));
    }

    #[test]
    fn sessions_are_independent() {
        let a = SessionStore::new();
        let b = SessionStore::new();
        a.set_current_user(&user(Role::Patient));
        assert!(!b.is_authenticated());
    }
}
