use chrono::Utc;

use crate::acl::{AclPermission, AclStore, ObjectRef};
use crate::authz::{ensure_target_not_admin, require_write, ActorContext};
use crate::events::{dispatch, AccessEvent};
use crate::repository::UserRepository;
use crate::AuthError;

/// Hard-deletes a user account.
///
/// The self-service grants come out of the ACL store after the row is gone.
/// The two writes are not one transaction: if the revoke fails the error
/// propagates and the operation is incomplete — there is no compensating
/// re-insert of the row.
pub struct DeleteUserAction<U, A>
where
    U: UserRepository,
    A: AclStore,
{
    users: U,
    acl: A,
}

impl<U: UserRepository, A: AclStore> DeleteUserAction<U, A> {
    pub fn new(users: U, acl: A) -> Self {
        Self { users, acl }
    }

    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "delete_user", skip_all, err)
    )]
    pub async fn execute(&self, actor: &ActorContext, user_id: i64) -> Result<(), AuthError> {
        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or(AuthError::NotFound)?;

        require_write(actor, &ObjectRef::user(user.id), &self.acl).await?;
        ensure_target_not_admin(&user)?;

        self.users.delete(user.id).await?;

        let object = ObjectRef::user(user.id);
        self.acl
            .revoke(&user.login, &object, AclPermission::Read)
            .await?;
        self.acl
            .revoke(&user.login, &object, AclPermission::Write)
            .await?;

        dispatch(AccessEvent::UserDeleted {
            user_id: user.id,
            login: user.login.clone(),
            at: Utc::now(),
        })
        .await;

        log::info!(
            target: "palisade_auth",
            "msg=\"user deleted\", user_id={}, login={}, actor={}",
            user.id,
            user.login,
            actor.login
        );

        Ok(())
    }
}
