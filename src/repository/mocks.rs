#![allow(clippy::unwrap_used)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use chrono::Utc;

use crate::AuthError;

use super::company::{Company, CompanyRepository, NewCompany};
use super::role::{Role, RoleRepository};
use super::user::{User, UserCandidate, UserRepository};

/// In-memory entity store implementing all three repository traits.
///
/// Users, companies, and roles share one store so provisioning's multi-write
/// lands roles where `RoleRepository` reads them, the way a single database
/// would. Unique constraints (login, role name) are enforced and surface as
/// `StorageError`.
///
/// Clones share state, so tests can keep a handle for inspection after
/// handing the store to an action.
#[derive(Clone)]
pub struct MockStore {
    users: Arc<RwLock<HashMap<i64, User>>>,
    companies: Arc<RwLock<HashMap<i64, Company>>>,
    roles: Arc<RwLock<HashMap<i64, Role>>>,
    next_id: Arc<AtomicI64>,
    atomic_provisioning: bool,
}

impl MockStore {
    pub fn new() -> Self {
        Self {
            users: Arc::new(RwLock::new(HashMap::new())),
            companies: Arc::new(RwLock::new(HashMap::new())),
            roles: Arc::new(RwLock::new(HashMap::new())),
            next_id: Arc::new(AtomicI64::new(1)),
            atomic_provisioning: true,
        }
    }

    /// A store that reports no multi-write transaction support, for
    /// exercising the provisioning fail-fast path.
    pub fn without_atomic_provisioning() -> Self {
        Self {
            atomic_provisioning: false,
            ..Self::new()
        }
    }

    fn alloc_id(&self) -> i64 {
        self.next_id.fetch_add(1, Ordering::SeqCst)
    }

    /// Seeds a role directly, bypassing company provisioning.
    ///
    /// Intended for test setup (e.g. the global `ROLE_ADMIN`, which no
    /// tenant owns).
    pub fn insert_role(&self, name: &str) -> Role {
        let role = Role {
            id: self.alloc_id(),
            name: name.to_owned(),
            created_at: Utc::now(),
        };
        self.roles.write().unwrap().insert(role.id, role.clone());
        role
    }
}

impl Default for MockStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserRepository for MockStore {
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, AuthError> {
        let users = self.users.read().unwrap();
        Ok(users.get(&id).cloned())
    }

    async fn find_by_login(&self, login: &str) -> Result<Option<User>, AuthError> {
        let users = self.users.read().unwrap();
        Ok(users.values().find(|u| u.login == login).cloned())
    }

    async fn find_all(&self) -> Result<Vec<User>, AuthError> {
        let users = self.users.read().unwrap();
        let mut all: Vec<User> = users.values().cloned().collect();
        all.sort_by_key(|u| u.id);
        Ok(all)
    }

    async fn create(&self, candidate: UserCandidate) -> Result<User, AuthError> {
        let mut users = self.users.write().unwrap();
        if users.values().any(|u| u.login == candidate.login) {
            return Err(AuthError::StorageError(format!(
                "unique constraint violated: login {}",
                candidate.login
            )));
        }

        let now = Utc::now();
        let user = User {
            id: self.alloc_id(),
            login: candidate.login,
            hashed_password: candidate.hashed_password,
            enabled: candidate.enabled,
            roles: candidate.roles,
            created_at: now,
            updated_at: now,
        };
        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn update_password(
        &self,
        user_id: i64,
        hashed_password: &str,
    ) -> Result<(), AuthError> {
        let mut users = self.users.write().unwrap();
        match users.get_mut(&user_id) {
            Some(user) => {
                hashed_password.clone_into(&mut user.hashed_password);
                user.updated_at = Utc::now();
                Ok(())
            }
            None => Err(AuthError::NotFound),
        }
    }

    async fn set_enabled(&self, user_id: i64, enabled: bool) -> Result<(), AuthError> {
        let mut users = self.users.write().unwrap();
        match users.get_mut(&user_id) {
            Some(user) => {
                user.enabled = enabled;
                user.updated_at = Utc::now();
                Ok(())
            }
            None => Err(AuthError::NotFound),
        }
    }

    async fn delete(&self, user_id: i64) -> Result<(), AuthError> {
        let mut users = self.users.write().unwrap();
        match users.remove(&user_id) {
            Some(_) => Ok(()),
            None => Err(AuthError::NotFound),
        }
    }
}

#[async_trait]
impl RoleRepository for MockStore {
    async fn find_by_name(&self, name: &str) -> Result<Option<Role>, AuthError> {
        let roles = self.roles.read().unwrap();
        Ok(roles.values().find(|r| r.name == name).cloned())
    }

    async fn find_all(&self) -> Result<Vec<Role>, AuthError> {
        let roles = self.roles.read().unwrap();
        let mut all: Vec<Role> = roles.values().cloned().collect();
        all.sort_by_key(|r| r.id);
        Ok(all)
    }
}

#[async_trait]
impl CompanyRepository for MockStore {
    async fn find_by_id(&self, id: i64) -> Result<Option<Company>, AuthError> {
        let companies = self.companies.read().unwrap();
        Ok(companies.get(&id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<Company>, AuthError> {
        let companies = self.companies.read().unwrap();
        let mut all: Vec<Company> = companies.values().cloned().collect();
        all.sort_by_key(|c| c.id);
        Ok(all)
    }

    async fn update(&self, company: Company) -> Result<Company, AuthError> {
        let mut companies = self.companies.write().unwrap();
        match companies.get_mut(&company.id) {
            Some(existing) => {
                existing.name = company.name;
                existing.role_alias = company.role_alias;
                existing.updated_at = Utc::now();
                Ok(existing.clone())
            }
            None => Err(AuthError::NotFound),
        }
    }

    async fn delete(&self, id: i64) -> Result<(), AuthError> {
        let mut companies = self.companies.write().unwrap();
        match companies.remove(&id) {
            Some(_) => Ok(()),
            None => Err(AuthError::NotFound),
        }
    }

    fn supports_atomic_provisioning(&self) -> bool {
        self.atomic_provisioning
    }

    async fn create_with_roles(
        &self,
        company: NewCompany,
        role_names: &[String],
    ) -> Result<Company, AuthError> {
        let mut companies = self.companies.write().unwrap();
        let mut roles = self.roles.write().unwrap();

        // Uniqueness is checked up front so the in-memory "transaction"
        // really is both-or-neither.
        for name in role_names {
            if roles.values().any(|r| &r.name == name) {
                return Err(AuthError::StorageError(format!(
                    "unique constraint violated: role name {name}"
                )));
            }
        }

        let now = Utc::now();
        let record = Company {
            id: self.alloc_id(),
            name: company.name,
            role_alias: company.role_alias,
            created_at: now,
            updated_at: now,
        };
        companies.insert(record.id, record.clone());

        for name in role_names {
            let role = Role {
                id: self.alloc_id(),
                name: name.clone(),
                created_at: now,
            };
            roles.insert(role.id, role);
        }

        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(login: &str) -> UserCandidate {
        UserCandidate {
            login: login.to_owned(),
            hashed_password: "hash".to_owned(),
            enabled: true,
            roles: vec![],
        }
    }

    #[tokio::test]
    async fn test_create_and_find_user() {
        let store = MockStore::new();

        let user = store.create(candidate("jdoe")).await.unwrap();
        assert!(user.enabled);

        let by_id = UserRepository::find_by_id(&store, user.id).await.unwrap();
        assert!(by_id.is_some());

        let by_login = store.find_by_login("jdoe").await.unwrap();
        assert_eq!(by_login.unwrap().id, user.id);
    }

    #[tokio::test]
    async fn test_duplicate_login_rejected() {
        let store = MockStore::new();

        store.create(candidate("jdoe")).await.unwrap();
        let result = store.create(candidate("jdoe")).await;

        assert!(matches!(result, Err(AuthError::StorageError(_))));
    }

    #[tokio::test]
    async fn test_set_enabled_and_delete() {
        let store = MockStore::new();
        let user = store.create(candidate("jdoe")).await.unwrap();

        store.set_enabled(user.id, false).await.unwrap();
        assert!(
            !UserRepository::find_by_id(&store, user.id)
                .await
                .unwrap()
                .unwrap()
                .enabled
        );

        UserRepository::delete(&store, user.id).await.unwrap();
        assert!(UserRepository::find_by_id(&store, user.id)
            .await
            .unwrap()
            .is_none());
        assert_eq!(
            UserRepository::delete(&store, user.id).await,
            Err(AuthError::NotFound)
        );
    }

    #[tokio::test]
    async fn test_create_with_roles_is_both_or_neither() {
        let store = MockStore::new();
        store.insert_role("ROLE_ACME_LOCAL_ADMIN");

        let names = vec![
            "ROLE_ACME_LOCAL_ADMIN".to_owned(),
            "ROLE_ACME_LOCAL_USER".to_owned(),
        ];
        let result = store
            .create_with_roles(NewCompany::new("Acme", "ACME"), &names)
            .await;

        assert!(matches!(result, Err(AuthError::StorageError(_))));
        // Nothing was written: no company, no sibling role
        assert!(CompanyRepository::find_all(&store).await.unwrap().is_empty());
        assert!(store
            .find_by_name("ROLE_ACME_LOCAL_USER")
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_company_update_rewrites_fields() {
        let store = MockStore::new();
        let company = store
            .create_with_roles(NewCompany::new("Acme", "ACME"), &[])
            .await
            .unwrap();

        let renamed = Company {
            name: "Acme Holdings".to_owned(),
            ..company.clone()
        };
        let updated = store.update(renamed).await.unwrap();
        assert_eq!(updated.name, "Acme Holdings");
        assert_eq!(updated.role_alias, "ACME");
    }
}
