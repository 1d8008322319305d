//! User account models
//!
//! Mirrors the backend's user records. The password travels under the wire
//! name `password_hash` for historical reasons, but it is the raw password;
//! hashing happens server-side.

use serde::{Deserialize, Serialize};

/// User roles, client-trusted for display gating only
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    User,
}

impl Default for UserRole {
    fn default() -> Self {
        UserRole::User
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UserRole::Admin => write!(f, "admin"),
            UserRole::User => write!(f, "user"),
        }
    }
}

impl std::str::FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "admin" => Ok(UserRole::Admin),
            "user" => Ok(UserRole::User),
            other => Err(format!("unknown role '{}', expected admin or user", other)),
        }
    }
}

/// A registered dashboard user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserAccount {
    pub id: i64,
    pub username: String,
    #[serde(default)]
    pub role: UserRole,
}

/// Payload for registering a new user
#[derive(Debug, Clone, Serialize)]
pub struct NewUser {
    pub username: String,
    #[serde(rename = "password_hash")]
    pub password: String,
    pub role: UserRole,
}

/// Partial update for an existing user.
///
/// `None` fields are omitted from the JSON entirely. The facade downgrades an
/// empty-string password to `None` before sending, so an edit that leaves the
/// password box blank can never clear the stored credential.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UserUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(rename = "password_hash", skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<UserRole>,
}

impl UserUpdate {
    /// Drop a blank password so it is never transmitted.
    pub(crate) fn without_blank_password(mut self) -> Self {
        self.password = self.password.filter(|p| !p.is_empty());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_new_user_wire_field_names() {
        let payload = NewUser {
            username: "ops".to_string(),
            password: "hunter2".to_string(),
            role: UserRole::Admin,
        };
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "username": "ops",
                "password_hash": "hunter2",
                "role": "admin"
            })
        );
    }

    #[test]
    fn test_blank_password_is_omitted() {
        let update = UserUpdate {
            username: Some("ops".to_string()),
            password: Some(String::new()),
            role: None,
        }
        .without_blank_password();

        let json = serde_json::to_value(&update).unwrap();
        assert_eq!(json, serde_json::json!({ "username": "ops" }));
    }

    #[test]
    fn test_real_password_survives() {
        let update = UserUpdate {
            password: Some("n3w-pass".to_string()),
            ..Default::default()
        }
        .without_blank_password();

        let json = serde_json::to_value(&update).unwrap();
        assert_eq!(json, serde_json::json!({ "password_hash": "n3w-pass" }));
    }

    #[test]
    fn test_user_account_defaults_role() {
        let user: UserAccount =
            serde_json::from_value(serde_json::json!({ "id": 7, "username": "joao" })).unwrap();
        assert_eq!(user.role, UserRole::User);
    }
}
