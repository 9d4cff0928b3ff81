//! Role-name synthesis and classification.
//!
//! Role names are plain uppercase strings following the template
//! `ROLE_<ALIAS>_<KIND>`, where `<ALIAS>` is the owning company's role alias
//! and `<KIND>` is one of the two local kinds. The global administrator role
//! [`ADMIN_ROLE`] sits outside the template. Everything here is a pure
//! string function; persistence of roles lives in
//! [`RoleRepository`](crate::repository::RoleRepository).

/// The global administrator role name.
pub const ADMIN_ROLE: &str = "ROLE_ADMIN";

/// The two tenant-scoped role kinds every company owns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleKind {
    LocalAdmin,
    LocalUser,
}

impl RoleKind {
    /// The kind segment as it appears inside a role name.
    pub fn as_str(self) -> &'static str {
        match self {
            RoleKind::LocalAdmin => "LOCAL_ADMIN",
            RoleKind::LocalUser => "LOCAL_USER",
        }
    }
}

/// Derives a tenant role name from a company alias and a kind.
///
/// The alias is upper-cased before formatting, so the alias segment of the
/// resulting name always matches an upper-case stored alias exactly.
///
/// ```rust
/// use palisade::roles::{role_name, RoleKind};
///
/// assert_eq!(role_name("ACME", RoleKind::LocalAdmin), "ROLE_ACME_LOCAL_ADMIN");
/// assert_eq!(role_name("acme", RoleKind::LocalUser), "ROLE_ACME_LOCAL_USER");
/// ```
pub fn role_name(alias: &str, kind: RoleKind) -> String {
    format!("ROLE_{}_{}", alias.to_uppercase(), kind.as_str())
}

/// Classifies an arbitrary role name by kind with a substring test.
///
/// This deliberately does not parse the alias segment; classification must
/// work for any name without knowing which tenant owns it.
pub fn role_is_kind(name: &str, kind: RoleKind) -> bool {
    name.contains(kind.as_str())
}

/// Rewrites the kind segment of a role name, e.g. a tenant's `LOCAL_ADMIN`
/// name into its sibling `LOCAL_USER` name.
///
/// This is a literal substring substitution, not a parse-and-rebuild: the
/// same-tenant creation rule is specified in terms of this substitution and
/// its observable behavior is preserved as-is (see
/// [`authorize_user_create`](crate::authz::authorize_user_create)).
pub fn sibling_role(name: &str, from: RoleKind, to: RoleKind) -> String {
    name.replace(from.as_str(), to.as_str())
}

/// Recovers the alias segment from a local role name.
///
/// Returns `None` for names that do not follow the `ROLE_<ALIAS>_<KIND>`
/// template, including [`ADMIN_ROLE`]. Tenant membership is derived from a
/// user's role names through this function; it is never stored directly.
///
/// ```rust
/// use palisade::roles::tenant_alias;
///
/// assert_eq!(tenant_alias("ROLE_ACME_LOCAL_ADMIN"), Some("ACME"));
/// assert_eq!(tenant_alias("ROLE_ADMIN"), None);
/// ```
pub fn tenant_alias(name: &str) -> Option<&str> {
    let rest = name.strip_prefix("ROLE_")?;
    let alias = rest
        .strip_suffix("_LOCAL_ADMIN")
        .or_else(|| rest.strip_suffix("_LOCAL_USER"))?;
    (!alias.is_empty()).then_some(alias)
}
