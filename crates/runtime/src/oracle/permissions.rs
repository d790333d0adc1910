//! [`PermissionOracle`] backed by per-player grant sets.
use std::collections::{HashMap, HashSet};
use std::sync::{PoisonError, RwLock};

use spell_core::{PermissionOracle, PlayerId};

/// Exact-match permission grants. Wildcard nodes are stored and matched as
/// plain strings.
#[derive(Debug, Default)]
pub struct MemoryPermissions {
    grants: RwLock<HashMap<PlayerId, HashSet<String>>>,
}

impl MemoryPermissions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn grant(&self, player: PlayerId, node: impl Into<String>) {
        self.grants
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(player)
            .or_default()
            .insert(node.into());
    }

    pub fn revoke(&self, player: PlayerId, node: &str) {
        if let Some(nodes) = self
            .grants
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .get_mut(&player)
        {
            nodes.remove(node);
        }
    }
}

impl PermissionOracle for MemoryPermissions {
    fn has_permission(&self, player: PlayerId, node: &str) -> bool {
        self.grants
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&player)
            .is_some_and(|nodes| nodes.contains(node))
    }
}
