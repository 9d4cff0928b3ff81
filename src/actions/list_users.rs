use crate::acl::{AclStore, ObjectRef};
use crate::authz::{can_read, ActorContext};
use crate::repository::{User, UserRepository};
use crate::AuthError;

/// Lists the user records the actor may read.
///
/// Entries the actor holds no READ grant on are filtered out silently —
/// omission is the policy here, not an error.
pub struct ListUsersAction<U, A>
where
    U: UserRepository,
    A: AclStore,
{
    users: U,
    acl: A,
}

impl<U: UserRepository, A: AclStore> ListUsersAction<U, A> {
    pub fn new(users: U, acl: A) -> Self {
        Self { users, acl }
    }

    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "list_users", skip_all, err)
    )]
    pub async fn execute(&self, actor: &ActorContext) -> Result<Vec<User>, AuthError> {
        let all = self.users.find_all().await?;

        let mut visible = Vec::with_capacity(all.len());
        for user in all {
            if can_read(actor, &ObjectRef::user(user.id), &self.acl).await? {
                visible.push(user);
            }
        }

        Ok(visible)
    }
}
