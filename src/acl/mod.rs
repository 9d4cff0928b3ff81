//! Object-level permission store contract.
//!
//! Role-based rules decide *what kind* of operation an actor may attempt;
//! the ACL store is the single source of truth for *which records* the actor
//! may read or write. The core consults it through [`AclStore`] and updates
//! it as a side effect of entity lifecycle (a freshly created user is granted
//! READ and WRITE on itself).
//!
//! Calls are synchronous from the core's point of view: no internal retry,
//! no queueing. A failed ACL write after the primary store has committed is
//! surfaced to the caller as an incomplete operation.

mod memory;

pub use memory::MemoryAclStore;

use std::collections::{HashMap, HashSet};
use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::AuthError;

/// Object-level permission granted to a subject.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AclPermission {
    Read,
    Write,
}

impl AclPermission {
    /// Convert to string for storage.
    pub fn as_str(self) -> &'static str {
        match self {
            AclPermission::Read => "READ",
            AclPermission::Write => "WRITE",
        }
    }

    /// Parse from storage string.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "READ" => Some(AclPermission::Read),
            "WRITE" => Some(AclPermission::Write),
            _ => None,
        }
    }
}

impl fmt::Display for AclPermission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The kind of domain entity an ACL entry points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjectKind {
    User,
    Company,
}

impl ObjectKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ObjectKind::User => "user",
            ObjectKind::Company => "company",
        }
    }
}

/// Reference to a domain object in the ACL store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ObjectRef {
    pub kind: ObjectKind,
    pub id: i64,
}

impl ObjectRef {
    pub fn user(id: i64) -> Self {
        Self {
            kind: ObjectKind::User,
            id,
        }
    }

    pub fn company(id: i64) -> Self {
        Self {
            kind: ObjectKind::Company,
            id,
        }
    }

    /// Stable string form used as a storage key, e.g. `user:42`.
    pub fn storage_key(&self) -> String {
        format!("{}:{}", self.kind.as_str(), self.id)
    }
}

impl fmt::Display for ObjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind.as_str(), self.id)
    }
}

/// A subject's object-level grants as a compact map.
///
/// Grants are keyed by object storage key for efficient lookup and compact
/// JSON storage.
///
/// # Example
///
/// ```rust
/// use palisade::acl::{AclPermission, GrantSet, ObjectRef};
///
/// let mut grants = GrantSet::new();
/// grants.grant(&ObjectRef::user(1), AclPermission::Read);
/// grants.grant(&ObjectRef::user(1), AclPermission::Write);
///
/// assert!(grants.can(&ObjectRef::user(1), AclPermission::Write));
/// assert!(!grants.can(&ObjectRef::user(2), AclPermission::Read));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GrantSet {
    /// Map of object key -> granted permissions.
    grants: HashMap<String, HashSet<AclPermission>>,
}

impl GrantSet {
    /// Create an empty grant set.
    pub fn new() -> Self {
        Self {
            grants: HashMap::new(),
        }
    }

    /// Grant a permission on an object.
    pub fn grant(&mut self, object: &ObjectRef, perm: AclPermission) {
        self.grants
            .entry(object.storage_key())
            .or_default()
            .insert(perm);
    }

    /// Remove a permission on an object.
    pub fn revoke(&mut self, object: &ObjectRef, perm: AclPermission) {
        if let Some(perms) = self.grants.get_mut(&object.storage_key()) {
            perms.remove(&perm);
            if perms.is_empty() {
                self.grants.remove(&object.storage_key());
            }
        }
    }

    /// Check whether a permission is granted on an object.
    pub fn can(&self, object: &ObjectRef, perm: AclPermission) -> bool {
        self.grants
            .get(&object.storage_key())
            .is_some_and(|perms| perms.contains(&perm))
    }

    /// All permissions granted on an object.
    pub fn permissions(&self, object: &ObjectRef) -> HashSet<AclPermission> {
        self.grants
            .get(&object.storage_key())
            .cloned()
            .unwrap_or_default()
    }

    /// Check if the grant set is empty.
    pub fn is_empty(&self) -> bool {
        self.grants.is_empty()
    }

    /// Number of objects with at least one grant.
    pub fn len(&self) -> usize {
        self.grants.len()
    }

    /// Serialize to JSON for database storage.
    ///
    /// Format: `{"user:1": ["READ", "WRITE"], "user:7": ["READ"]}`
    pub fn to_json(&self) -> String {
        let map: HashMap<&str, Vec<&str>> = self
            .grants
            .iter()
            .map(|(key, perms)| {
                (
                    key.as_str(),
                    perms.iter().map(|p| p.as_str()).collect(),
                )
            })
            .collect();

        serde_json::to_string(&map).unwrap_or_else(|_| "{}".to_owned())
    }

    /// Deserialize from JSON.
    ///
    /// Returns None if parsing fails or if any permission is unrecognized.
    pub fn from_json(json: &str) -> Option<Self> {
        let map: HashMap<String, Vec<String>> = serde_json::from_str(json).ok()?;

        let mut grants = HashMap::new();
        for (key, perm_strs) in map {
            let mut perms = HashSet::new();
            for perm_str in perm_strs {
                perms.insert(AclPermission::parse(&perm_str)?);
            }
            grants.insert(key, perms);
        }

        Some(Self { grants })
    }
}

/// Contract of the external ACL store.
///
/// Grants are `(subject login, object, permission)` facts, independent of
/// role membership. The `owner_of` query reports which subject owns an
/// object, for display purposes.
#[async_trait]
pub trait AclStore: Send + Sync {
    async fn grant(
        &self,
        subject: &str,
        object: &ObjectRef,
        perm: AclPermission,
    ) -> Result<(), AuthError>;

    async fn revoke(
        &self,
        subject: &str,
        object: &ObjectRef,
        perm: AclPermission,
    ) -> Result<(), AuthError>;

    async fn owner_of(&self, object: &ObjectRef) -> Result<Option<String>, AuthError>;

    async fn grants_for(
        &self,
        subject: &str,
        object: &ObjectRef,
    ) -> Result<HashSet<AclPermission>, AuthError>;
}
