use chrono::Utc;

use crate::acl::{AclPermission, AclStore, ObjectRef};
use crate::authz::{authorize_user_create, ActorContext};
use crate::config::AccessConfig;
use crate::crypto::{Argon2Hasher, PasswordHasher};
use crate::events::{dispatch, AccessEvent};
use crate::repository::{NewUser, Role, RoleRepository, User, UserCandidate, UserRepository};
use crate::validators::{validate_login, PasswordPolicy};
use crate::AuthError;

/// Creates a user under the role-provisioning rules.
///
/// The flow: password policy, role resolution, role-based create rules,
/// structural validation, candidate build, persist, then the self-service
/// READ + WRITE grants on the new record.
pub struct CreateUserAction<U, R, A, H = Argon2Hasher>
where
    U: UserRepository,
    R: RoleRepository,
    A: AclStore,
{
    users: U,
    roles: R,
    acl: A,
    policy: PasswordPolicy,
    hasher: H,
}

impl<U: UserRepository, R: RoleRepository, A: AclStore> CreateUserAction<U, R, A, Argon2Hasher> {
    /// Creates a new `CreateUserAction` with the default password policy and hasher.
    pub fn new(users: U, roles: R, acl: A) -> Self {
        Self {
            users,
            roles,
            acl,
            policy: PasswordPolicy::default(),
            hasher: Argon2Hasher::default(),
        }
    }

    /// Creates a new `CreateUserAction` with a custom password policy.
    pub fn with_policy(users: U, roles: R, acl: A, policy: PasswordPolicy) -> Self {
        Self {
            users,
            roles,
            acl,
            policy,
            hasher: Argon2Hasher::default(),
        }
    }

    /// Creates a new `CreateUserAction` from an [`AccessConfig`].
    pub fn with_config(users: U, roles: R, acl: A, config: &AccessConfig) -> Self {
        Self {
            users,
            roles,
            acl,
            policy: config.password_policy.clone(),
            hasher: config.hasher.clone(),
        }
    }
}

impl<U, R, A, H> CreateUserAction<U, R, A, H>
where
    U: UserRepository,
    R: RoleRepository,
    A: AclStore,
    H: PasswordHasher,
{
    /// Creates a new `CreateUserAction` with a custom password policy and hasher.
    pub fn with_hasher(users: U, roles: R, acl: A, policy: PasswordPolicy, hasher: H) -> Self {
        Self {
            users,
            roles,
            acl,
            policy,
            hasher,
        }
    }

    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "create_user", skip_all, err)
    )]
    pub async fn execute(
        &self,
        actor: &ActorContext,
        request: NewUser,
    ) -> Result<User, AuthError> {
        self.policy
            .validate(request.password.expose_secret())
            .map_err(AuthError::WeakCredential)?;

        // Resolve requested names against the role model; duplicates collapse
        let mut resolved: Vec<Role> = Vec::new();
        for name in &request.role_names {
            let name = name.to_uppercase();
            let role = self
                .roles
                .find_by_name(&name)
                .await?
                .ok_or(AuthError::UnknownRole(name))?;
            if !resolved.iter().any(|r| r.name == role.name) {
                resolved.push(role);
            }
        }

        let names: Vec<&str> = resolved.iter().map(|r| r.name.as_str()).collect();
        authorize_user_create(actor, &names)?;

        validate_login(&request.login).map_err(AuthError::Validation)?;
        if self.users.find_by_login(request.login.trim()).await?.is_some() {
            return Err(AuthError::UserAlreadyExists);
        }

        let candidate = build_candidate(&request, resolved, &self.hasher)?;
        let user = self.users.create(candidate).await?;

        // Let the new user read and edit itself
        let object = ObjectRef::user(user.id);
        self.acl
            .grant(&user.login, &object, AclPermission::Read)
            .await?;
        self.acl
            .grant(&user.login, &object, AclPermission::Write)
            .await?;

        dispatch(AccessEvent::UserCreated {
            user_id: user.id,
            login: user.login.clone(),
            at: Utc::now(),
        })
        .await;

        log::info!(
            target: "palisade_auth",
            "msg=\"user created\", user_id={}, login={}, actor={}",
            user.id,
            user.login,
            actor.login
        );

        Ok(user)
    }
}

/// Builds a ready-to-persist row from a validated request.
///
/// Pure apart from salting: no store is touched, so candidate construction
/// is testable without a repository.
fn build_candidate<H: PasswordHasher>(
    request: &NewUser,
    roles: Vec<Role>,
    hasher: &H,
) -> Result<UserCandidate, AuthError> {
    let hashed = hasher.hash(request.password.expose_secret())?;
    Ok(UserCandidate {
        login: request.login.trim().to_owned(),
        hashed_password: hashed,
        enabled: true,
        roles,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::acl::MemoryAclStore;
    use crate::crypto::SecretString;
    use crate::repository::MockStore;
    use crate::roles::ADMIN_ROLE;
    use crate::validators::ValidationError;

    const GOOD_PASSWORD: &str = "Ab1!Ab1!cde";

    fn admin() -> ActorContext {
        ActorContext::new("root", [ADMIN_ROLE])
    }

    fn action(
        store: &MockStore,
        acl: &MemoryAclStore,
    ) -> CreateUserAction<MockStore, MockStore, MemoryAclStore> {
        CreateUserAction::new(store.clone(), store.clone(), acl.clone())
    }

    fn request(login: &str, roles: &[&str]) -> NewUser {
        NewUser::new(login, SecretString::new(GOOD_PASSWORD), roles.to_vec())
    }

    #[tokio::test]
    async fn test_create_user_success() {
        let store = MockStore::new();
        let acl = MemoryAclStore::new();
        store.insert_role("ROLE_ACME_LOCAL_USER");

        let user = action(&store, &acl)
            .execute(&admin(), request("jdoe", &["ROLE_ACME_LOCAL_USER"]))
            .await
            .unwrap();

        assert_eq!(user.login, "jdoe");
        assert!(user.enabled);
        assert_eq!(user.roles.len(), 1);
        assert_ne!(user.hashed_password, GOOD_PASSWORD);
    }

    #[tokio::test]
    async fn test_create_user_grants_read_write_on_self() {
        let store = MockStore::new();
        let acl = MemoryAclStore::new();
        store.insert_role("ROLE_ACME_LOCAL_USER");

        let user = action(&store, &acl)
            .execute(&admin(), request("jdoe", &["ROLE_ACME_LOCAL_USER"]))
            .await
            .unwrap();

        let grants = acl
            .grants_for("jdoe", &ObjectRef::user(user.id))
            .await
            .unwrap();
        assert!(grants.contains(&AclPermission::Read));
        assert!(grants.contains(&AclPermission::Write));
    }

    #[tokio::test]
    async fn test_weak_password_rejected_before_anything_else() {
        let store = MockStore::new();
        let acl = MemoryAclStore::new();

        let result = action(&store, &acl)
            .execute(
                &admin(),
                NewUser::new("jdoe", SecretString::new("abcdefgh"), ["ROLE_X"]),
            )
            .await;

        assert_eq!(
            result.unwrap_err(),
            AuthError::WeakCredential(ValidationError::PasswordTooFewUppercase(2))
        );
    }

    #[tokio::test]
    async fn test_empty_role_set_rejected() {
        let store = MockStore::new();
        let acl = MemoryAclStore::new();

        let result = action(&store, &acl)
            .execute(&admin(), request("jdoe", &[]))
            .await;

        assert_eq!(result.unwrap_err(), AuthError::InvalidRoleSet);
    }

    #[tokio::test]
    async fn test_unknown_role_rejected() {
        let store = MockStore::new();
        let acl = MemoryAclStore::new();

        let result = action(&store, &acl)
            .execute(&admin(), request("jdoe", &["ROLE_NOWHERE_LOCAL_USER"]))
            .await;

        assert_eq!(
            result.unwrap_err(),
            AuthError::UnknownRole("ROLE_NOWHERE_LOCAL_USER".to_owned())
        );
    }

    #[tokio::test]
    async fn test_admin_role_in_set_rejected_even_for_admin_actor() {
        let store = MockStore::new();
        let acl = MemoryAclStore::new();
        store.insert_role(ADMIN_ROLE);

        let result = action(&store, &acl)
            .execute(&admin(), request("jdoe", &[ADMIN_ROLE]))
            .await;

        assert_eq!(result.unwrap_err(), AuthError::ForbiddenRoleGrant);
    }

    #[tokio::test]
    async fn test_local_admin_blocked_from_own_local_user_role() {
        let store = MockStore::new();
        let acl = MemoryAclStore::new();
        store.insert_role("ROLE_ACME_LOCAL_USER");

        let actor = ActorContext::new("acme-admin", ["ROLE_ACME_LOCAL_ADMIN"]);
        let result = action(&store, &acl)
            .execute(&actor, request("jdoe", &["ROLE_ACME_LOCAL_USER"]))
            .await;

        assert_eq!(result.unwrap_err(), AuthError::CrossTenantCreationForbidden);
    }

    #[tokio::test]
    async fn test_local_admin_may_create_in_other_tenant() {
        let store = MockStore::new();
        let acl = MemoryAclStore::new();
        store.insert_role("ROLE_OTHER_LOCAL_USER");

        let actor = ActorContext::new("acme-admin", ["ROLE_ACME_LOCAL_ADMIN"]);
        let user = action(&store, &acl)
            .execute(&actor, request("jdoe", &["ROLE_OTHER_LOCAL_USER"]))
            .await
            .unwrap();

        assert_eq!(user.roles[0].name, "ROLE_OTHER_LOCAL_USER");
    }

    #[tokio::test]
    async fn test_duplicate_login_rejected() {
        let store = MockStore::new();
        let acl = MemoryAclStore::new();
        store.insert_role("ROLE_ACME_LOCAL_USER");

        let action = action(&store, &acl);
        action
            .execute(&admin(), request("jdoe", &["ROLE_ACME_LOCAL_USER"]))
            .await
            .unwrap();

        let result = action
            .execute(&admin(), request("jdoe", &["ROLE_ACME_LOCAL_USER"]))
            .await;

        assert_eq!(result.unwrap_err(), AuthError::UserAlreadyExists);
    }

    #[tokio::test]
    async fn test_requested_role_names_are_case_normalized() {
        let store = MockStore::new();
        let acl = MemoryAclStore::new();
        store.insert_role("ROLE_ACME_LOCAL_USER");

        let user = action(&store, &acl)
            .execute(&admin(), request("jdoe", &["role_acme_local_user"]))
            .await
            .unwrap();

        assert_eq!(user.roles[0].name, "ROLE_ACME_LOCAL_USER");
    }

    #[tokio::test]
    async fn test_duplicate_role_names_collapse() {
        let store = MockStore::new();
        let acl = MemoryAclStore::new();
        store.insert_role("ROLE_ACME_LOCAL_USER");

        let user = action(&store, &acl)
            .execute(
                &admin(),
                request("jdoe", &["ROLE_ACME_LOCAL_USER", "role_acme_local_user"]),
            )
            .await
            .unwrap();

        assert_eq!(user.roles.len(), 1);
    }

    #[test]
    fn test_build_candidate_hashes_and_enables() {
        let request = NewUser::new(
            "  jdoe  ",
            SecretString::new(GOOD_PASSWORD),
            Vec::<String>::new(),
        );
        let candidate =
            build_candidate(&request, vec![], &Argon2Hasher::default()).unwrap();

        assert_eq!(candidate.login, "jdoe");
        assert!(candidate.enabled);
        assert!(Argon2Hasher::default()
            .verify(GOOD_PASSWORD, &candidate.hashed_password)
            .unwrap());
    }
}
