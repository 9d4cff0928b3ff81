//! Pure role-based decision rules.
//!
//! These functions see only the actor and the proposed operation — no
//! stores, no I/O — so each rule in the decision table can be tested on its
//! own.

use crate::repository::User;
use crate::roles::{sibling_role, RoleKind, ADMIN_ROLE};
use crate::AuthError;

use super::ActorContext;

/// Decides whether `actor` may create a user holding `requested` roles.
///
/// The requested names must already be resolved against the role model
/// (unknown names are rejected upstream, where the role store is
/// available). The rule table, in order:
///
/// 1. an empty role set is invalid;
/// 2. nobody mints new `ROLE_ADMIN` holders through this path, not even an
///    admin;
/// 3. a global admin may grant any remaining combination;
/// 4. otherwise the actor needs at least one `LOCAL_ADMIN` role;
/// 5. the target set must not contain the sibling `LOCAL_USER` name derived
///    from the actor's first `LOCAL_ADMIN` role.
///
/// Rule 5 compares a substituted role *name*, not tenant identity. The
/// upshot is that a local admin is blocked from granting its own tenant's
/// LOCAL_USER role but not its own LOCAL_ADMIN role, and other tenants'
/// roles pass freely. That asymmetry is observable behavior and is kept
/// exactly as-is; see the tests below.
pub fn authorize_user_create(
    actor: &ActorContext,
    requested: &[&str],
) -> Result<(), AuthError> {
    if requested.is_empty() {
        return Err(AuthError::InvalidRoleSet);
    }

    if requested.iter().any(|name| *name == ADMIN_ROLE) {
        return Err(AuthError::ForbiddenRoleGrant);
    }

    if actor.is_admin() {
        return Ok(());
    }

    let local_admin = actor
        .first_local_admin_role()
        .ok_or(AuthError::InsufficientPrivilege)?;

    let own_local_user = sibling_role(local_admin, RoleKind::LocalAdmin, RoleKind::LocalUser);
    if requested.iter().any(|name| *name == own_local_user) {
        return Err(AuthError::CrossTenantCreationForbidden);
    }

    Ok(())
}

/// Refuses disable/delete when the target holds the administrator role.
///
/// This holds regardless of the actor and regardless of ACL grants — it is
/// the rule that keeps a sole administrator from locking itself out.
pub fn ensure_target_not_admin(target: &User) -> Result<(), AuthError> {
    if target.is_admin() {
        return Err(AuthError::AccessDenied(
            "administrator accounts cannot be disabled or deleted".to_owned(),
        ));
    }
    Ok(())
}
