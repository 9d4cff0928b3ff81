use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::AuthError;

/// A tenant.
///
/// `role_alias` is fixed at creation time: the company's two roles embed it
/// in their names, and renaming it would orphan them. Updates that change it
/// are rejected with `ImmutableFieldViolation`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Company {
    pub id: i64,
    pub name: String,
    pub role_alias: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Payload for provisioning a new company.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewCompany {
    pub name: String,
    pub role_alias: String,
}

impl NewCompany {
    pub fn new(name: impl Into<String>, role_alias: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            role_alias: role_alias.into(),
        }
    }
}

#[async_trait]
pub trait CompanyRepository: Send + Sync {
    async fn find_by_id(&self, id: i64) -> Result<Option<Company>, AuthError>;

    async fn find_all(&self) -> Result<Vec<Company>, AuthError>;

    async fn update(&self, company: Company) -> Result<Company, AuthError>;

    async fn delete(&self, id: i64) -> Result<(), AuthError>;

    /// Whether [`create_with_roles`](Self::create_with_roles) runs in one
    /// transaction. Provisioning refuses stores that answer `false` rather
    /// than risk a tenant without its roles.
    fn supports_atomic_provisioning(&self) -> bool;

    /// Persists the company and its roles in a single transaction scope:
    /// either all rows exist afterwards or none do.
    async fn create_with_roles(
        &self,
        company: NewCompany,
        role_names: &[String],
    ) -> Result<Company, AuthError>;
}
