//! [`InventoryOracle`] backed by per-player item sets.
use std::collections::{HashMap, HashSet};
use std::sync::{PoisonError, RwLock};

use spell_core::{InventoryOracle, PlayerId};

#[derive(Debug, Default)]
pub struct MemoryInventory {
    items: RwLock<HashMap<PlayerId, HashSet<String>>>,
}

impl MemoryInventory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn give(&self, player: PlayerId, item: impl Into<String>) {
        self.items
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(player)
            .or_default()
            .insert(item.into());
    }

    pub fn take(&self, player: PlayerId, item: &str) {
        if let Some(items) = self
            .items
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .get_mut(&player)
        {
            items.remove(item);
        }
    }
}

impl InventoryOracle for MemoryInventory {
    fn has_item(&self, player: PlayerId, item: &str) -> bool {
        self.items
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&player)
            .is_some_and(|items| items.contains(item))
    }
}
