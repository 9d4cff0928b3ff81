use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::crypto::SecretString;
use crate::roles::ADMIN_ROLE;
use crate::AuthError;

use super::Role;

/// A user account.
///
/// Tenant membership is not stored: it is derived from the alias segment of
/// the user's role names. A user holds at least one role at all times; no
/// public operation can leave it role-less.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub login: String,
    #[serde(skip_serializing)]
    pub hashed_password: String,
    pub enabled: bool,
    pub roles: Vec<Role>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Whether this user holds the global administrator role.
    pub fn is_admin(&self) -> bool {
        self.roles.iter().any(|r| r.name == ADMIN_ROLE)
    }

    /// Names of the roles this user holds.
    pub fn role_names(&self) -> impl Iterator<Item = &str> {
        self.roles.iter().map(|r| r.name.as_str())
    }
}

/// Inbound payload for creating a user.
///
/// Carries the plaintext password (redacted in logs via [`SecretString`])
/// and the requested role *names*; resolution against the role model happens
/// in the create action.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub login: String,
    pub password: SecretString,
    pub role_names: Vec<String>,
}

impl NewUser {
    pub fn new(
        login: impl Into<String>,
        password: SecretString,
        role_names: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            login: login.into(),
            password,
            role_names: role_names.into_iter().map(Into::into).collect(),
        }
    }
}

/// A fully validated, ready-to-persist user row.
///
/// Building a candidate is a pure step separate from persistence: all
/// validation and hashing has already happened, and the repository only has
/// to assign an id and timestamps.
#[derive(Debug, Clone)]
pub struct UserCandidate {
    pub login: String,
    pub hashed_password: String,
    pub enabled: bool,
    pub roles: Vec<Role>,
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, AuthError>;

    async fn find_by_login(&self, login: &str) -> Result<Option<User>, AuthError>;

    async fn find_all(&self) -> Result<Vec<User>, AuthError>;

    async fn create(&self, candidate: UserCandidate) -> Result<User, AuthError>;

    async fn update_password(&self, user_id: i64, hashed_password: &str)
        -> Result<(), AuthError>;

    async fn set_enabled(&self, user_id: i64, enabled: bool) -> Result<(), AuthError>;

    async fn delete(&self, user_id: i64) -> Result<(), AuthError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn role(name: &str) -> Role {
        Role {
            id: 1,
            name: name.to_owned(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_is_admin() {
        let now = Utc::now();
        let user = User {
            id: 1,
            login: "root".to_owned(),
            hashed_password: "hash".to_owned(),
            enabled: true,
            roles: vec![role(ADMIN_ROLE), role("ROLE_ACME_LOCAL_ADMIN")],
            created_at: now,
            updated_at: now,
        };
        assert!(user.is_admin());

        let local = User {
            roles: vec![role("ROLE_ACME_LOCAL_ADMIN")],
            ..user
        };
        assert!(!local.is_admin());
    }

    #[test]
    fn test_hashed_password_is_not_serialized() {
        let now = Utc::now();
        let user = User {
            id: 1,
            login: "jdoe".to_owned(),
            hashed_password: "supersecret".to_owned(),
            enabled: true,
            roles: vec![role("ROLE_ACME_LOCAL_USER")],
            created_at: now,
            updated_at: now,
        };

        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("supersecret"));
        assert!(json.contains("jdoe"));
    }
}
