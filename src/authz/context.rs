use serde::{Deserialize, Serialize};

use crate::roles::{role_is_kind, RoleKind, ADMIN_ROLE};

/// The authenticated caller for the duration of one operation.
///
/// Built per request by the authentication collaborator (which has already
/// verified credentials or a token) and passed explicitly into every
/// decision. Never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActorContext {
    pub login: String,
    /// Role names held by the actor, normalized to upper-case.
    pub roles: Vec<String>,
}

impl ActorContext {
    /// Creates a context, upper-casing role names so later comparisons are
    /// case-insensitive without repeating the normalization everywhere.
    pub fn new(
        login: impl Into<String>,
        roles: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            login: login.into(),
            roles: roles
                .into_iter()
                .map(|r| r.into().to_uppercase())
                .collect(),
        }
    }

    pub fn has_role(&self, name: &str) -> bool {
        self.roles.iter().any(|r| r == name)
    }

    /// Whether the actor holds the global administrator role.
    pub fn is_admin(&self) -> bool {
        self.has_role(ADMIN_ROLE)
    }

    /// The actor's `LOCAL_ADMIN` roles, in held order.
    pub fn local_admin_roles(&self) -> impl Iterator<Item = &str> {
        self.roles
            .iter()
            .map(String::as_str)
            .filter(|r| role_is_kind(r, RoleKind::LocalAdmin))
    }

    /// The first `LOCAL_ADMIN` role the actor holds, if any.
    ///
    /// "First" is the order roles were handed to [`ActorContext::new`]; the
    /// create rule is defined against that first entry.
    pub fn first_local_admin_role(&self) -> Option<&str> {
        self.local_admin_roles().next()
    }
}
