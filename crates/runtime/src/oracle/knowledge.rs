//! [`KnowledgeOracle`] backed by an in-memory map.
use std::collections::{BTreeSet, HashMap};
use std::sync::{PoisonError, RwLock};

use spell_core::{KnowledgeOracle, PlayerId};

/// Per-player known spell names.
#[derive(Debug, Default)]
pub struct MemoryKnowledge {
    known: RwLock<HashMap<PlayerId, BTreeSet<String>>>,
}

impl MemoryKnowledge {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn teach(&self, player: PlayerId, spell: impl Into<String>) {
        self.known
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(player)
            .or_default()
            .insert(spell.into());
    }

    /// Returns whether the player knew `spell` (exact name).
    pub fn forget(&self, player: PlayerId, spell: &str) -> bool {
        let mut known = self.known.write().unwrap_or_else(PoisonError::into_inner);
        let Some(spells) = known.get_mut(&player) else {
            return false;
        };
        let removed = spells.remove(spell);
        if spells.is_empty() {
            known.remove(&player);
        }
        removed
    }
}

impl KnowledgeOracle for MemoryKnowledge {
    fn known_spells(&self, player: PlayerId) -> Vec<String> {
        self.known
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&player)
            .map(|spells| spells.iter().cloned().collect())
            .unwrap_or_default()
    }
}
