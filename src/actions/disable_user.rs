use chrono::Utc;

use crate::acl::{AclStore, ObjectRef};
use crate::authz::{ensure_target_not_admin, require_write, ActorContext};
use crate::events::{dispatch, AccessEvent};
use crate::repository::UserRepository;
use crate::AuthError;

/// Soft-locks a user account.
///
/// Only the `enabled` flag changes: roles stay, ACL grants stay, and the
/// record remains deletable. Administrator accounts can never be disabled,
/// no matter who asks.
pub struct DisableUserAction<U, A>
where
    U: UserRepository,
    A: AclStore,
{
    users: U,
    acl: A,
}

impl<U: UserRepository, A: AclStore> DisableUserAction<U, A> {
    pub fn new(users: U, acl: A) -> Self {
        Self { users, acl }
    }

    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "disable_user", skip_all, err)
    )]
    pub async fn execute(&self, actor: &ActorContext, user_id: i64) -> Result<(), AuthError> {
        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or(AuthError::NotFound)?;

        require_write(actor, &ObjectRef::user(user.id), &self.acl).await?;
        ensure_target_not_admin(&user)?;

        self.users.set_enabled(user.id, false).await?;

        dispatch(AccessEvent::UserDisabled {
            user_id: user.id,
            at: Utc::now(),
        })
        .await;

        log::info!(
            target: "palisade_auth",
            "msg=\"user disabled\", user_id={}, actor={}",
            user.id,
            actor.login
        );

        Ok(())
    }
}
