//! Registry of every castable spell, ordered by name.

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::error::{ErrorSeverity, SpellError};
use crate::event::SpellObserver;
use crate::spell::{Spell, SpellEffect};

/// A spell variant could not be instantiated at startup.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("spell variant {variant} failed to initialize: {reason}")]
pub struct RegistrationError {
    pub variant: String,
    pub reason: String,
}

impl RegistrationError {
    pub fn new(variant: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            variant: variant.into(),
            reason: reason.into(),
        }
    }
}

impl SpellError for RegistrationError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Content
    }

    fn error_code(&self) -> &'static str {
        "REGISTRATION_FAILED"
    }
}

/// Immutable-after-startup set of spells, unique by exact name.
///
/// Iteration order is lexicographic by name (byte order, so uppercase sorts
/// before lowercase). Name lookups are case-insensitive.
#[derive(Clone, Debug, Default)]
pub struct SpellCatalog {
    spells: BTreeMap<String, Spell>,
}

impl SpellCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a spell.
    ///
    /// Returns `false` (and keeps the existing entry) if a spell with the exact
    /// same name is already registered. Names differing only by case are both
    /// kept; callers are responsible for avoiding that.
    pub fn register(&mut self, spell: Spell) -> bool {
        let name = spell.name().to_owned();
        if self.spells.contains_key(&name) {
            warn!(target: "spell::catalog", spell = %name, "duplicate spell name ignored");
            return false;
        }
        debug!(target: "spell::catalog", spell = %name, "spell registered");
        self.spells.insert(name, spell);
        true
    }

    /// Registers the outcome of instantiating each variant.
    ///
    /// Failed variants are logged and skipped. Observers exposed by the
    /// registered variants are returned so the caller can subscribe them.
    pub fn populate<I>(&mut self, variants: I) -> Vec<Arc<dyn SpellObserver>>
    where
        I: IntoIterator<Item = Result<Arc<dyn SpellEffect>, RegistrationError>>,
    {
        let mut observers = Vec::new();
        for variant in variants {
            let effect = match variant {
                Ok(effect) => effect,
                Err(error) => {
                    warn!(
                        target: "spell::catalog",
                        variant = %error.variant,
                        code = error.error_code(),
                        severity = error.severity().as_str(),
                        "{error}"
                    );
                    continue;
                }
            };

            let spell = Spell::new(effect);
            if self.register(spell.clone())
                && let Some(observer) = spell.observer()
            {
                observers.push(observer);
            }
        }
        observers
    }

    /// Case-insensitive exact-name lookup; first match in sorted order.
    pub fn lookup(&self, name: &str) -> Option<&Spell> {
        self.spells.values().find(|spell| spell.is_named(name))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.lookup(name).is_some()
    }

    /// All spells in lexicographic name order.
    pub fn all(&self) -> impl Iterator<Item = &Spell> + '_ {
        self.spells.values()
    }

    pub fn len(&self) -> usize {
        self.spells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spells.is_empty()
    }
}
