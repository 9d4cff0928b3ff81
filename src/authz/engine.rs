//! Object-level checks backed by the ACL store.

use crate::acl::{AclPermission, AclStore, ObjectRef};
use crate::AuthError;

use super::ActorContext;

/// Whether `actor` may read `object`.
///
/// Global admins read everything; everyone else needs a READ grant.
pub async fn can_read<A>(
    actor: &ActorContext,
    object: &ObjectRef,
    acl: &A,
) -> Result<bool, AuthError>
where
    A: AclStore + ?Sized,
{
    if actor.is_admin() {
        return Ok(true);
    }

    let grants = acl.grants_for(&actor.login, object).await?;
    Ok(grants.contains(&AclPermission::Read))
}

/// Whether `actor` may write `object`.
///
/// Write access comes from an explicit WRITE grant only — holding the admin
/// role does not bypass it. A new user is granted WRITE on itself at
/// creation time, which is what makes self-service edits work.
pub async fn can_write<A>(
    actor: &ActorContext,
    object: &ObjectRef,
    acl: &A,
) -> Result<bool, AuthError>
where
    A: AclStore + ?Sized,
{
    let grants = acl.grants_for(&actor.login, object).await?;
    Ok(grants.contains(&AclPermission::Write))
}

/// Requires read access on a single record.
///
/// Denial surfaces as [`AuthError::NotFound`], the same outcome as a missing
/// id, so a caller cannot distinguish "exists but forbidden" from "does not
/// exist".
pub async fn require_read<A>(
    actor: &ActorContext,
    object: &ObjectRef,
    acl: &A,
) -> Result<(), AuthError>
where
    A: AclStore + ?Sized,
{
    if can_read(actor, object, acl).await? {
        Ok(())
    } else {
        Err(AuthError::NotFound)
    }
}

/// Requires write access on a record.
pub async fn require_write<A>(
    actor: &ActorContext,
    object: &ObjectRef,
    acl: &A,
) -> Result<(), AuthError>
where
    A: AclStore + ?Sized,
{
    if can_write(actor, object, acl).await? {
        Ok(())
    } else {
        Err(AuthError::AccessDenied(format!(
            "write permission on {object} is required"
        )))
    }
}
