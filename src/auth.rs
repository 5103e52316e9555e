//! Login, registration and the session-backed current user.
//!
//! Credentials are compared in plaintext against the stored user record,
//! matching the persisted account format exactly.

use crate::models::{Role, User};
use crate::repository::{NewUser, UserRepository};
use crate::session::SessionStore;

#[derive(Clone)]
pub struct AuthService {
    users: UserRepository,
    session: SessionStore,
}

impl AuthService {
    pub fn new(users: UserRepository, session: SessionStore) -> Self {
        Self { users, session }
    }

    /// Exact username/password match; on success the user becomes the
    /// session's current user.
    pub fn login(&self, username: &str, password: &str) -> Option<User> {
        let user = self
            .users
            .find_by_username(username)
            .filter(|user| user.password == password);
        match &user {
            Some(user) => {
                self.session.set_current_user(user);
                tracing::info!(username, role = user.role.as_str(), "login succeeded");
            }
            None => tracing::warn!(username, "login rejected"),
        }
        user
    }

    pub fn logout(&self) {
        self.session.clear();
        tracing::info!("session cleared");
    }

    /// Creates the account; `None` when the username is already taken.
    /// Registration does not log the new user in.
    pub fn register(&self, new_user: NewUser) -> Option<User> {
        if self.users.find_by_username(&new_user.username).is_some() {
            tracing::warn!(username = %new_user.username, "registration rejected, username taken");
            return None;
        }
        Some(self.users.create(new_user))
    }

    /// Patches a user record and refreshes the session copy when the patched
    /// user is the one currently logged in.
    pub fn update_user(&self, id: &str, patch: impl FnOnce(&mut User)) -> Option<User> {
        let updated = self.users.update(id, patch)?;
        if self
            .session
            .current_user()
            .is_some_and(|current| current.id == updated.id)
        {
            self.session.set_current_user(&updated);
        }
        Some(updated)
    }

    pub fn current_user(&self) -> Option<User> {
        self.session.current_user()
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    pub fn has_role(&self, role: Role) -> bool {
        self.session.has_role(role)
    }

    pub fn has_any_role(&self, roles: &[Role]) -> bool {
        self.session.has_any_role(roles)
    }
}
