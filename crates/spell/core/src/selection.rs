//! Per-player cursor over the spells a player knows.
//!
//! The known set comes from the [`KnowledgeOracle`] on every call and is
//! sorted lexicographically (duplicates removed) so that an index keeps
//! pointing at the same spell while the set is unchanged.

use std::collections::{BTreeSet, HashMap};

use crate::catalog::SpellCatalog;
use crate::env::KnowledgeOracle;
use crate::error::{ErrorSeverity, SpellError};
use crate::spell::Spell;
use crate::state::PlayerId;

/// Rejected selection request.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SelectionError {
    #[error("selection {index} is outside the {known} known spells")]
    InvalidSelection { index: isize, known: usize },

    #[error("player does not know {spell}")]
    UnknownToPlayer { spell: String },

    #[error("no spell named {name}")]
    UnknownSpell { name: String },
}

impl SpellError for SelectionError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidSelection { .. } => "INVALID_SELECTION",
            Self::UnknownToPlayer { .. } => "UNKNOWN_TO_PLAYER",
            Self::UnknownSpell { .. } => "UNKNOWN_SPELL",
        }
    }
}

/// Selection cursors keyed by player.
#[derive(Clone, Debug, Default)]
pub struct SelectionState {
    cursors: HashMap<PlayerId, usize>,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index of the selected spell, `None` when the player knows nothing.
    ///
    /// Defaults to 0 when never set, and when the stored index no longer fits
    /// the (shrunken) known set.
    pub fn current_index(&self, player: PlayerId, knowledge: &dyn KnowledgeOracle) -> Option<usize> {
        let known = known_spells(knowledge, player);
        self.index_within(player, known.len())
    }

    /// The selected spell, resolved through the catalog.
    pub fn current_spell(
        &self,
        player: PlayerId,
        knowledge: &dyn KnowledgeOracle,
        catalog: &SpellCatalog,
    ) -> Option<Spell> {
        let known = known_spells(knowledge, player);
        let index = self.index_within(player, known.len())?;
        catalog.lookup(&known[index]).cloned()
    }

    /// Selects the spell at `index` in the player's sorted known set.
    pub fn set_index(
        &mut self,
        player: PlayerId,
        index: isize,
        knowledge: &dyn KnowledgeOracle,
        catalog: &SpellCatalog,
    ) -> Result<Spell, SelectionError> {
        let known = known_spells(knowledge, player);
        let position = usize::try_from(index)
            .ok()
            .filter(|&position| position < known.len())
            .ok_or(SelectionError::InvalidSelection {
                index,
                known: known.len(),
            })?;

        let name = &known[position];
        let spell = catalog
            .lookup(name)
            .cloned()
            .ok_or_else(|| SelectionError::UnknownSpell { name: name.clone() })?;

        self.cursors.insert(player, position);
        Ok(spell)
    }

    /// Selects `spell`, which must be in the player's known set.
    pub fn set_spell(
        &mut self,
        player: PlayerId,
        spell: &Spell,
        knowledge: &dyn KnowledgeOracle,
        catalog: &SpellCatalog,
    ) -> Result<Spell, SelectionError> {
        let known = known_spells(knowledge, player);
        let position = known
            .iter()
            .position(|name| spell.is_named(name))
            .ok_or_else(|| SelectionError::UnknownToPlayer {
                spell: spell.name().to_owned(),
            })?;

        self.set_index(player, position as isize, knowledge, catalog)
    }

    /// Selects a spell by (case-insensitive) name.
    pub fn select_by_name(
        &mut self,
        player: PlayerId,
        name: &str,
        knowledge: &dyn KnowledgeOracle,
        catalog: &SpellCatalog,
    ) -> Result<Spell, SelectionError> {
        let spell = catalog
            .lookup(name)
            .cloned()
            .ok_or_else(|| SelectionError::UnknownSpell {
                name: name.to_owned(),
            })?;
        self.set_spell(player, &spell, knowledge, catalog)
    }

    /// Moves the cursor forward, wrapping past the last known spell.
    pub fn select_next(
        &mut self,
        player: PlayerId,
        knowledge: &dyn KnowledgeOracle,
        catalog: &SpellCatalog,
    ) -> Result<Spell, SelectionError> {
        self.step(player, 1, knowledge, catalog)
    }

    /// Moves the cursor backward, wrapping before the first known spell.
    pub fn select_previous(
        &mut self,
        player: PlayerId,
        knowledge: &dyn KnowledgeOracle,
        catalog: &SpellCatalog,
    ) -> Result<Spell, SelectionError> {
        self.step(player, -1, knowledge, catalog)
    }

    /// Forgets the player's cursor.
    pub fn clear(&mut self, player: PlayerId) {
        self.cursors.remove(&player);
    }

    fn step(
        &mut self,
        player: PlayerId,
        offset: isize,
        knowledge: &dyn KnowledgeOracle,
        catalog: &SpellCatalog,
    ) -> Result<Spell, SelectionError> {
        let count = known_spells(knowledge, player).len();
        let current = self
            .index_within(player, count)
            .ok_or(SelectionError::InvalidSelection { index: 0, known: 0 })?;

        let next = (current as isize + offset).rem_euclid(count as isize);
        self.set_index(player, next, knowledge, catalog)
    }

    fn index_within(&self, player: PlayerId, count: usize) -> Option<usize> {
        if count == 0 {
            return None;
        }
        match self.cursors.get(&player) {
            Some(&index) if index < count => Some(index),
            _ => Some(0),
        }
    }
}

/// The player's known spell names, sorted and deduplicated.
pub fn known_spells(knowledge: &dyn KnowledgeOracle, player: PlayerId) -> Vec<String> {
    knowledge
        .known_spells(player)
        .into_iter()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::CastEnv;
    use crate::spell::{EffectError, SpellEffect, SpellInfo};
    use std::sync::{Arc, Mutex};

    struct Named(SpellInfo);

    impl SpellEffect for Named {
        fn info(&self) -> &SpellInfo {
            &self.0
        }

        fn cast(&self, _caster: PlayerId, _env: &CastEnv<'_>) -> Result<bool, EffectError> {
            Ok(true)
        }
    }

    #[derive(Default)]
    struct Knowledge(Mutex<HashMap<PlayerId, Vec<String>>>);

    impl Knowledge {
        fn teach(&self, player: PlayerId, spells: &[&str]) {
            self.0
                .lock()
                .unwrap()
                .insert(player, spells.iter().map(|s| s.to_string()).collect());
        }
    }

    impl KnowledgeOracle for Knowledge {
        fn known_spells(&self, player: PlayerId) -> Vec<String> {
            self.0.lock().unwrap().get(&player).cloned().unwrap_or_default()
        }
    }

    const P: PlayerId = PlayerId(7);

    fn catalog() -> SpellCatalog {
        let mut catalog = SpellCatalog::new();
        for name in ["Accio", "Confundo", "Lumos", "Stupefy"] {
            catalog.register(Spell::new(Arc::new(Named(SpellInfo::new(name, "")))));
        }
        catalog
    }

    #[test]
    fn nothing_known_reads_as_none() {
        let selection = SelectionState::new();
        let knowledge = Knowledge::default();

        assert_eq!(selection.current_index(P, &knowledge), None);
        assert_eq!(selection.current_spell(P, &knowledge, &catalog()), None);
    }

    #[test]
    fn unset_cursor_resolves_to_first_sorted_spell() {
        let selection = SelectionState::new();
        let knowledge = Knowledge::default();
        knowledge.teach(P, &["Stupefy", "Confundo"]);

        assert_eq!(selection.current_index(P, &knowledge), Some(0));
        let spell = selection.current_spell(P, &knowledge, &catalog()).unwrap();
        assert_eq!(spell.name(), "Confundo");
    }

    #[test]
    fn set_index_bounds() {
        let mut selection = SelectionState::new();
        let knowledge = Knowledge::default();
        let catalog = catalog();
        knowledge.teach(P, &["Confundo", "Stupefy"]);

        assert_eq!(
            selection.set_index(P, -1, &knowledge, &catalog),
            Err(SelectionError::InvalidSelection { index: -1, known: 2 })
        );
        assert_eq!(
            selection.set_index(P, 2, &knowledge, &catalog),
            Err(SelectionError::InvalidSelection { index: 2, known: 2 })
        );

        let spell = selection.set_index(P, 1, &knowledge, &catalog).unwrap();
        assert_eq!(spell.name(), "Stupefy");
        assert_eq!(selection.current_index(P, &knowledge), Some(1));

        let spell = selection.set_index(P, 0, &knowledge, &catalog).unwrap();
        assert_eq!(spell.name(), "Confundo");
        assert_eq!(selection.current_index(P, &knowledge), Some(0));
    }

    #[test]
    fn set_index_without_knowledge_fails() {
        let mut selection = SelectionState::new();
        let knowledge = Knowledge::default();

        assert!(matches!(
            selection.set_index(P, 0, &knowledge, &catalog()),
            Err(SelectionError::InvalidSelection { known: 0, .. })
        ));
    }

    #[test]
    fn set_spell_requires_knowledge() {
        let mut selection = SelectionState::new();
        let knowledge = Knowledge::default();
        let catalog = catalog();
        knowledge.teach(P, &["Confundo"]);

        let lumos = catalog.lookup("Lumos").cloned().unwrap();
        assert_eq!(
            selection.set_spell(P, &lumos, &knowledge, &catalog),
            Err(SelectionError::UnknownToPlayer {
                spell: "Lumos".into()
            })
        );
    }

    #[test]
    fn select_by_name_ignores_case() {
        let mut selection = SelectionState::new();
        let knowledge = Knowledge::default();
        let catalog = catalog();
        knowledge.teach(P, &["Accio", "Lumos", "Stupefy"]);

        let spell = selection
            .select_by_name(P, "lumos", &knowledge, &catalog)
            .unwrap();
        assert_eq!(spell.name(), "Lumos");
        assert_eq!(selection.current_index(P, &knowledge), Some(1));

        assert!(matches!(
            selection.select_by_name(P, "Avada", &knowledge, &catalog),
            Err(SelectionError::UnknownSpell { .. })
        ));
    }

    #[test]
    fn next_and_previous_wrap() {
        let mut selection = SelectionState::new();
        let knowledge = Knowledge::default();
        let catalog = catalog();
        knowledge.teach(P, &["Accio", "Confundo", "Lumos"]);

        let previous = selection.select_previous(P, &knowledge, &catalog).unwrap();
        assert_eq!(previous.name(), "Lumos");

        let next = selection.select_next(P, &knowledge, &catalog).unwrap();
        assert_eq!(next.name(), "Accio");

        let next = selection.select_next(P, &knowledge, &catalog).unwrap();
        assert_eq!(next.name(), "Confundo");
    }

    #[test]
    fn stepping_without_knowledge_reports_empty_cursor() {
        let mut selection = SelectionState::new();
        let knowledge = Knowledge::default();
        let catalog = catalog();

        let empty = Err(SelectionError::InvalidSelection { index: 0, known: 0 });
        assert_eq!(selection.select_next(P, &knowledge, &catalog), empty);
        assert_eq!(selection.select_previous(P, &knowledge, &catalog), empty);
    }

    #[test]
    fn shrunken_knowledge_falls_back_to_first() {
        let mut selection = SelectionState::new();
        let knowledge = Knowledge::default();
        let catalog = catalog();
        knowledge.teach(P, &["Accio", "Confundo", "Lumos"]);
        selection.set_index(P, 2, &knowledge, &catalog).unwrap();

        knowledge.teach(P, &["Stupefy"]);
        assert_eq!(selection.current_index(P, &knowledge), Some(0));

        knowledge.teach(P, &[]);
        assert_eq!(selection.current_index(P, &knowledge), None);
    }
}
