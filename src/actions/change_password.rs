use chrono::Utc;

use crate::acl::{AclStore, ObjectRef};
use crate::authz::{require_write, ActorContext};
use crate::config::AccessConfig;
use crate::crypto::{Argon2Hasher, PasswordHasher, SecretString};
use crate::events::{dispatch, AccessEvent};
use crate::repository::UserRepository;
use crate::validators::PasswordPolicy;
use crate::AuthError;

/// Edits a user's password.
///
/// Any edit requires a WRITE grant on the target — self-edit works because
/// creation grants it — and the supplied password must pass the policy even
/// if the caller considers it unchanged.
pub struct ChangePasswordAction<U, A, H = Argon2Hasher>
where
    U: UserRepository,
    A: AclStore,
{
    users: U,
    acl: A,
    policy: PasswordPolicy,
    hasher: H,
}

impl<U: UserRepository, A: AclStore> ChangePasswordAction<U, A, Argon2Hasher> {
    /// Creates a new `ChangePasswordAction` with the default password policy and hasher.
    pub fn new(users: U, acl: A) -> Self {
        Self {
            users,
            acl,
            policy: PasswordPolicy::default(),
            hasher: Argon2Hasher::default(),
        }
    }

    /// Creates a new `ChangePasswordAction` with a custom password policy.
    pub fn with_policy(users: U, acl: A, policy: PasswordPolicy) -> Self {
        Self {
            users,
            acl,
            policy,
            hasher: Argon2Hasher::default(),
        }
    }

    /// Creates a new `ChangePasswordAction` from an [`AccessConfig`].
    pub fn with_config(users: U, acl: A, config: &AccessConfig) -> Self {
        Self {
            users,
            acl,
            policy: config.password_policy.clone(),
            hasher: config.hasher.clone(),
        }
    }
}

impl<U, A, H> ChangePasswordAction<U, A, H>
where
    U: UserRepository,
    A: AclStore,
    H: PasswordHasher,
{
    /// Creates a new `ChangePasswordAction` with a custom password policy and hasher.
    pub fn with_hasher(users: U, acl: A, policy: PasswordPolicy, hasher: H) -> Self {
        Self {
            users,
            acl,
            policy,
            hasher,
        }
    }

    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "change_password", skip_all, err)
    )]
    pub async fn execute(
        &self,
        actor: &ActorContext,
        user_id: i64,
        new_password: &SecretString,
    ) -> Result<(), AuthError> {
        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or(AuthError::NotFound)?;

        require_write(actor, &ObjectRef::user(user.id), &self.acl).await?;

        self.policy
            .validate(new_password.expose_secret())
            .map_err(AuthError::WeakCredential)?;

        let hashed = self.hasher.hash(new_password.expose_secret())?;
        self.users.update_password(user.id, &hashed).await?;

        dispatch(AccessEvent::PasswordChanged {
            user_id: user.id,
            at: Utc::now(),
        })
        .await;

        log::info!(
            target: "palisade_auth",
            "msg=\"password changed\", user_id={}, actor={}",
            user.id,
            actor.login
        );

        Ok(())
    }
}
