use serde::Serialize;

use crate::acl::{AclPermission, AclStore, ObjectRef};
use crate::authz::{require_read, ActorContext};
use crate::repository::{User, UserRepository};
use crate::AuthError;

/// A user record decorated with the ACL facts a caller may act on.
#[derive(Debug, Clone, Serialize)]
pub struct UserView {
    pub user: User,
    /// Owner of the record in the ACL store, if one is recorded.
    pub owner: Option<String>,
    /// The requesting actor's own grants on this record, sorted.
    pub acls: Vec<AclPermission>,
}

/// Reads a single user record.
///
/// A record the actor may not read and a record that does not exist produce
/// the same `NotFound`, so probing for ids leaks nothing.
pub struct GetUserAction<U, A>
where
    U: UserRepository,
    A: AclStore,
{
    users: U,
    acl: A,
}

impl<U: UserRepository, A: AclStore> GetUserAction<U, A> {
    pub fn new(users: U, acl: A) -> Self {
        Self { users, acl }
    }

    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "get_user", skip_all, err)
    )]
    pub async fn execute(
        &self,
        actor: &ActorContext,
        user_id: i64,
    ) -> Result<UserView, AuthError> {
        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or(AuthError::NotFound)?;

        let object = ObjectRef::user(user.id);
        require_read(actor, &object, &self.acl).await?;

        let owner = self.acl.owner_of(&object).await?;
        let mut acls: Vec<AclPermission> = self
            .acl
            .grants_for(&actor.login, &object)
            .await?
            .into_iter()
            .collect();
        acls.sort_by_key(|p| p.as_str());

        Ok(UserView { user, owner, acls })
    }

    /// Loads the actor's own record by login.
    #[cfg_attr(feature = "tracing", tracing::instrument(name = "me", skip_all, err))]
    pub async fn me(&self, actor: &ActorContext) -> Result<User, AuthError> {
        self.users
            .find_by_login(&actor.login)
            .await?
            .ok_or(AuthError::NotFound)
    }
}
