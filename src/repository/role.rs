use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::AuthError;

/// A named permission role.
///
/// Names are globally unique and immutable once created. Tenant-scoped roles
/// follow the `ROLE_<ALIAS>_<KIND>` template from [`crate::roles`]; the
/// global administrator role does not.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Role {
    pub id: i64,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

#[async_trait]
pub trait RoleRepository: Send + Sync {
    async fn find_by_name(&self, name: &str) -> Result<Option<Role>, AuthError>;

    async fn find_all(&self) -> Result<Vec<Role>, AuthError>;
}
