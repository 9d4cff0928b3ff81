//! In-memory ACL storage.
//!
//! Suitable for tests and single-instance deployments. Grants are lost when
//! the process restarts.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, RwLock};

use async_trait::async_trait;

use crate::AuthError;

use super::{AclPermission, AclStore, GrantSet, ObjectRef};

/// In-memory [`AclStore`] implementation.
///
/// Grants are kept as one [`GrantSet`] per subject login behind an `RwLock`.
/// The first subject granted anything on an object is recorded as that
/// object's owner.
#[derive(Clone, Default)]
pub struct MemoryAclStore {
    grants: Arc<RwLock<HashMap<String, GrantSet>>>,
    owners: Arc<RwLock<HashMap<String, String>>>,
}

impl MemoryAclStore {
    /// Creates a new, empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of subjects holding at least one grant.
    pub fn len(&self) -> usize {
        self.grants.read().unwrap().len()
    }

    /// Whether no grants are stored at all.
    pub fn is_empty(&self) -> bool {
        self.grants.read().unwrap().is_empty()
    }
}

#[async_trait]
impl AclStore for MemoryAclStore {
    async fn grant(
        &self,
        subject: &str,
        object: &ObjectRef,
        perm: AclPermission,
    ) -> Result<(), AuthError> {
        self.owners
            .write()
            .unwrap()
            .entry(object.storage_key())
            .or_insert_with(|| subject.to_owned());

        self.grants
            .write()
            .unwrap()
            .entry(subject.to_owned())
            .or_default()
            .grant(object, perm);

        Ok(())
    }

    async fn revoke(
        &self,
        subject: &str,
        object: &ObjectRef,
        perm: AclPermission,
    ) -> Result<(), AuthError> {
        let mut grants = self.grants.write().unwrap();
        if let Some(set) = grants.get_mut(subject) {
            set.revoke(object, perm);
            if set.is_empty() {
                grants.remove(subject);
            }
        }
        Ok(())
    }

    async fn owner_of(&self, object: &ObjectRef) -> Result<Option<String>, AuthError> {
        Ok(self.owners.read().unwrap().get(&object.storage_key()).cloned())
    }

    async fn grants_for(
        &self,
        subject: &str,
        object: &ObjectRef,
    ) -> Result<HashSet<AclPermission>, AuthError> {
        let grants = self.grants.read().unwrap();
        Ok(grants
            .get(subject)
            .map(|set| set.permissions(object))
            .unwrap_or_default())
    }
}
