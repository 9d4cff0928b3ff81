//! Multi-tenant identity and access-control core.
//!
//! Palisade manages companies (tenants), users, and the tenant-scoped roles
//! derived from each company's alias, and decides who may create, read, edit,
//! disable, or delete which records. It exposes an in-process API: an HTTP or
//! RPC layer in front of it is expected to map the error kinds in
//! [`AuthError`] to transport status codes.
//!
//! The crate is storage-agnostic. Persistence and object-level permissions
//! are reached through the traits in [`repository`] and [`acl`]; in-memory
//! implementations are bundled for tests and single-process embedders.
//!
//! # Example
//!
//! ```rust,ignore
//! use palisade::actions::{CreateUserAction, ProvisionCompanyAction};
//! use palisade::repository::{MockStore, NewCompany, NewUser};
//! use palisade::{ActorContext, MemoryAclStore, SecretString};
//!
//! let store = MockStore::new();
//! let acl = MemoryAclStore::new();
//!
//! let provision = ProvisionCompanyAction::new(store.clone());
//! provision.execute(NewCompany::new("Acme Corp", "ACME")).await?;
//!
//! let admin = ActorContext::new("root", ["ROLE_ADMIN"]);
//! let create = CreateUserAction::new(store.clone(), store, acl);
//! create
//!     .execute(
//!         &admin,
//!         NewUser::new("jdoe", SecretString::new("Ab1!Ab1!cde"), ["ROLE_ACME_LOCAL_ADMIN"]),
//!     )
//!     .await?;
//! ```

pub mod acl;
pub mod actions;
pub mod authz;
pub mod config;
pub mod crypto;
pub mod events;
pub mod repository;
pub mod roles;
pub mod validators;

pub use acl::{AclPermission, AclStore, MemoryAclStore, ObjectRef};
pub use authz::ActorContext;
pub use config::AccessConfig;
pub use crypto::SecretString;
pub use events::register_event_listeners;
pub use repository::{
    Company, CompanyRepository, MockStore, NewCompany, NewUser, Role, RoleRepository, User,
    UserCandidate, UserRepository,
};
pub use validators::ValidationError;

use std::fmt;

/// Error kinds surfaced by the access core.
///
/// Every kind is distinguishable here so rules can be tested and logged
/// individually. A transport layer is expected to collapse all kinds for
/// which [`AuthError::is_denial`] returns `true` into one uniform
/// "forbidden" response so callers cannot probe which rule rejected them.
#[derive(Debug, Clone, PartialEq)]
pub enum AuthError {
    /// The record does not exist — or the actor may not know whether it does.
    NotFound,
    /// A user with the requested login already exists.
    UserAlreadyExists,
    /// The password failed the credential-strength policy.
    WeakCredential(ValidationError),
    /// A field-level (structural) constraint failed.
    Validation(ValidationError),
    /// A new user was requested with no roles at all.
    InvalidRoleSet,
    /// A requested role name is not present in the role model.
    UnknownRole(String),
    /// The requested role set includes the global administrator role.
    ForbiddenRoleGrant,
    /// The actor holds neither the global admin role nor any local admin role.
    InsufficientPrivilege,
    /// A local admin tried to grant its own tenant's local user role.
    CrossTenantCreationForbidden,
    /// A permission rule at edit/disable/delete rejected the operation.
    AccessDenied(String),
    /// An update attempted to change a field that is immutable after creation.
    ImmutableFieldViolation(&'static str),
    /// The backing store cannot provide the multi-write transaction scope
    /// that company provisioning requires.
    TransactionUnsupported,
    /// Password hashing failed.
    PasswordHashError,
    /// The persistence or ACL collaborator reported a failure.
    StorageError(String),
}

impl AuthError {
    /// Whether this kind belongs to the permission-failure category.
    ///
    /// The HTTP-facing caller must present every denial kind identically;
    /// only the message may differ.
    pub fn is_denial(&self) -> bool {
        matches!(
            self,
            AuthError::InvalidRoleSet
                | AuthError::UnknownRole(_)
                | AuthError::ForbiddenRoleGrant
                | AuthError::InsufficientPrivilege
                | AuthError::CrossTenantCreationForbidden
                | AuthError::AccessDenied(_)
        )
    }
}

impl std::error::Error for AuthError {}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthError::NotFound => write!(f, "Record not found"),
            AuthError::UserAlreadyExists => write!(f, "User already exists"),
            AuthError::WeakCredential(e) => write!(f, "Weak credential: {e}"),
            AuthError::Validation(e) => write!(f, "Validation failed: {e}"),
            AuthError::InvalidRoleSet => {
                write!(f, "A new user must hold at least one valid role")
            }
            AuthError::UnknownRole(name) => {
                write!(f, "Role with name {name} does not exist")
            }
            AuthError::ForbiddenRoleGrant => {
                write!(f, "A new user cannot be granted the administrator role")
            }
            AuthError::InsufficientPrivilege => {
                write!(f, "Creating users requires an admin or local admin role")
            }
            AuthError::CrossTenantCreationForbidden => {
                write!(f, "A local admin may not grant its own tenant's local user role")
            }
            AuthError::AccessDenied(msg) => write!(f, "Access denied: {msg}"),
            AuthError::ImmutableFieldViolation(field) => {
                write!(f, "Field {field} cannot be changed after creation")
            }
            AuthError::TransactionUnsupported => {
                write!(f, "The backing store does not support atomic multi-entity writes")
            }
            AuthError::PasswordHashError => write!(f, "Failed to hash password"),
            AuthError::StorageError(msg) => write!(f, "Storage error: {msg}"),
        }
    }
}

impl From<ValidationError> for AuthError {
    fn from(e: ValidationError) -> Self {
        AuthError::Validation(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_denial_kinds_are_flagged() {
        assert!(AuthError::InvalidRoleSet.is_denial());
        assert!(AuthError::UnknownRole("ROLE_X".to_owned()).is_denial());
        assert!(AuthError::ForbiddenRoleGrant.is_denial());
        assert!(AuthError::InsufficientPrivilege.is_denial());
        assert!(AuthError::CrossTenantCreationForbidden.is_denial());
        assert!(AuthError::AccessDenied("no write grant".to_owned()).is_denial());
    }

    #[test]
    fn test_non_denial_kinds_are_not_flagged() {
        assert!(!AuthError::NotFound.is_denial());
        assert!(!AuthError::UserAlreadyExists.is_denial());
        assert!(!AuthError::ImmutableFieldViolation("role_alias").is_denial());
        assert!(!AuthError::TransactionUnsupported.is_denial());
        assert!(!AuthError::PasswordHashError.is_denial());
        assert!(!AuthError::StorageError("down".to_owned()).is_denial());
    }

    #[test]
    fn test_display_includes_role_name() {
        let err = AuthError::UnknownRole("ROLE_ACME_LOCAL_USER".to_owned());
        assert!(err.to_string().contains("ROLE_ACME_LOCAL_USER"));
    }

    #[test]
    fn test_validation_error_converts() {
        let err: AuthError = ValidationError::LoginEmpty.into();
        assert_eq!(err, AuthError::Validation(ValidationError::LoginEmpty));
    }
}
