//! Built-in spell variants and their static registration list.
//!
//! Adding a spell means adding a [`SpellKind`] variant and its arm in
//! [`SpellKind::instantiate`]; [`builtin_spells`] picks it up through
//! `EnumIter`.

mod confundo;
mod stupefy;

pub use confundo::Confundo;
pub use stupefy::Stupefy;

use std::sync::Arc;

use spell_core::{RegistrationError, SpellConfig, SpellEffect};
use strum::IntoEnumIterator;

use crate::tuning::{DurationError, SpellTuning};

/// Every built-in spell variant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::EnumIter, strum::Display, strum::AsRefStr)]
pub enum SpellKind {
    Confundo,
    Stupefy,
}

impl SpellKind {
    /// Builds one instance of this variant bound to the given tuning.
    pub fn instantiate(
        self,
        tuning: &SpellTuning,
        config: &SpellConfig,
    ) -> Result<Arc<dyn SpellEffect>, RegistrationError> {
        let ticks_per_second = config.ticks_per_second;
        let fail = |err: DurationError| RegistrationError::new(self.as_ref(), err.to_string());

        let effect: Arc<dyn SpellEffect> = match self {
            SpellKind::Confundo => {
                Arc::new(Confundo::from_tuning(&tuning.confundo, ticks_per_second).map_err(fail)?)
            }
            SpellKind::Stupefy => {
                Arc::new(Stupefy::from_tuning(&tuning.stupefy, ticks_per_second).map_err(fail)?)
            }
        };
        tracing::debug!(target: "spell::content", variant = %self, "spell variant instantiated");
        Ok(effect)
    }
}

/// One instantiation result per built-in variant, in declaration order.
pub fn builtin_spells(
    tuning: &SpellTuning,
    config: &SpellConfig,
) -> Vec<Result<Arc<dyn SpellEffect>, RegistrationError>> {
    SpellKind::iter()
        .map(|kind| kind.instantiate(tuning, config))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use spell_core::SpellCatalog;

    #[test]
    fn builtin_catalog_is_sorted_and_complete() {
        let mut catalog = SpellCatalog::new();
        catalog.populate(builtin_spells(&SpellTuning::default(), &SpellConfig::default()));

        let names: Vec<_> = catalog.all().map(|s| s.name().to_owned()).collect();
        assert_eq!(names, ["Confundo", "Stupefy"]);

        let stupefy = catalog.lookup("stupefy").unwrap();
        assert_eq!(stupefy.range(), 50);
        assert_eq!(stupefy.info().cooldown, 60);
        assert!(!stupefy.through_walls());
        assert_eq!(catalog.lookup("CONFUNDO").unwrap().info().cooldown, 0);
    }

    #[test]
    fn bad_tuning_skips_only_that_spell() {
        let mut tuning = SpellTuning::default();
        tuning.stupefy.weakness_duration = "forever".to_owned();

        let results = builtin_spells(&tuning, &SpellConfig::default());
        let failure = results
            .iter()
            .find_map(|r| r.as_ref().err())
            .expect("stupefy should fail");
        assert_eq!(failure.variant, "Stupefy");

        let mut catalog = SpellCatalog::new();
        catalog.populate(results);
        assert!(catalog.contains("Confundo"));
        assert!(!catalog.contains("Stupefy"));
    }
}
