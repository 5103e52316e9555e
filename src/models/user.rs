use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::enums::Role;
use super::HasId;

/// A system account. Passwords are stored and compared in plaintext — the
/// backing store is assumed private to the user's browser profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub username: String,
    pub password: String,
    pub role: Role,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl HasId for User {
    fn id(&self) -> &str {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_camel_case_keys() {
        let user = User {
            id: "user-1".into(),
            username: "juan".into(),
            password: "patient123".into(),
            role: Role::Patient,
            name: "Juan Pérez".into(),
            email: "juan@email.com".into(),
            created_at: Utc::now(),
        };
        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json["role"], "patient");
        assert!(json.get("createdAt").is_some());
        assert!(json.get("created_at").is_none());
    }
}
