use chrono::Utc;

use crate::config;
use crate::ids;
use crate::models::{Role, User};
use crate::storage::Store;

/// Fields supplied by registration or an admin add.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub password: String,
    /// Defaults to patient when unset.
    pub role: Option<Role>,
    pub name: String,
    pub email: String,
}

/// Aggregate user counts by role.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct UserStats {
    pub total: usize,
    pub doctors: usize,
    pub patients: usize,
    pub admins: usize,
}

#[derive(Clone)]
pub struct UserRepository {
    store: Store,
}

impl UserRepository {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    /// Inserts a new user record. Username uniqueness is the caller's
    /// concern (see `AuthService::register`).
    pub fn create(&self, new_user: NewUser) -> User {
        let user = User {
            id: ids::generate_id("user"),
            username: new_user.username,
            password: new_user.password,
            role: new_user.role.unwrap_or(Role::Patient),
            name: new_user.name,
            email: new_user.email,
            created_at: Utc::now(),
        };
        self.store.add_to_collection(config::USERS_KEY, &user);
        tracing::info!(id = %user.id, name = %user.name, "user created");
        user
    }

    pub fn get_by_id(&self, id: &str) -> Option<User> {
        self.store.find_in_collection(config::USERS_KEY, id)
    }

    pub fn list(&self) -> Vec<User> {
        self.store.get_collection(config::USERS_KEY)
    }

    pub fn list_where(&self, predicate: impl Fn(&User) -> bool) -> Vec<User> {
        self.store.filter_collection(config::USERS_KEY, predicate)
    }

    pub fn by_role(&self, role: Role) -> Vec<User> {
        self.list_where(|user| user.role == role)
    }

    pub fn find_by_username(&self, username: &str) -> Option<User> {
        self.list_where(|user| user.username == username)
            .into_iter()
            .next()
    }

    /// Applies a patch to the user with `id`; `None` when the id is unknown.
    pub fn update(&self, id: &str, patch: impl FnOnce(&mut User)) -> Option<User> {
        let updated = self
            .store
            .update_in_collection(config::USERS_KEY, id, patch)?;
        tracing::info!(id = %updated.id, name = %updated.name, "user updated");
        Some(updated)
    }

    pub fn delete(&self, id: &str) -> bool {
        let removed = self
            .store
            .remove_from_collection::<User>(config::USERS_KEY, id);
        if removed {
            tracing::info!(id, "user deleted");
        }
        removed
    }

    pub fn statistics(&self) -> UserStats {
        let users = self.list();
        UserStats {
            total: users.len(),
            doctors: users.iter().filter(|u| u.role == Role::Doctor).count(),
            patients: users.iter().filter(|u| u.role == Role::Patient).count(),
            admins: users.iter().filter(|u| u.role == Role::Admin).count(),
        }
    }
}
