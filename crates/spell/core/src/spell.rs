//! Spell definitions and the effect capability every variant implements.
//!
//! A spell variant is a self-contained value implementing [`SpellEffect`]. The
//! catalog wraps each instance in a [`Spell`] handle: a cheap, shareable,
//! read-only reference whose identity (equality, ordering, hashing) is its
//! exact name.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use crate::env::CastEnv;
use crate::error::{ErrorSeverity, SpellError};
use crate::event::SpellObserver;
use crate::state::PlayerId;

/// Static metadata declared by a spell variant.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpellInfo {
    pub name: String,
    pub description: String,
    /// Maximum target acquisition distance in blocks.
    pub range: u32,
    /// Whether targets behind solid obstructions can be acquired.
    pub through_walls: bool,
    /// Base cooldown in seconds. Zero disables the cooldown.
    pub cooldown: u32,
}

impl SpellInfo {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            range: 0,
            through_walls: false,
            cooldown: 0,
        }
    }

    #[must_use]
    pub fn with_range(mut self, range: u32) -> Self {
        self.range = range;
        self
    }

    #[must_use]
    pub fn with_through_walls(mut self, through_walls: bool) -> Self {
        self.through_walls = through_walls;
        self
    }

    #[must_use]
    pub fn with_cooldown(mut self, cooldown: u32) -> Self {
        self.cooldown = cooldown;
        self
    }
}

/// Behaviour of a castable spell.
pub trait SpellEffect: Send + Sync {
    /// Metadata used for registration, listing and targeting.
    fn info(&self) -> &SpellInfo;

    /// Runs the effect with `caster` as the target origin.
    ///
    /// `Ok(false)` is a legitimate in-effect failure (no target in range,
    /// wrong target kind). `Err` is reserved for unexpected faults; the
    /// pipeline logs it and treats the cast as failed.
    fn cast(&self, caster: PlayerId, env: &CastEnv<'_>) -> Result<bool, EffectError>;

    /// Cooldown applied to `player` after a successful cast.
    fn cooldown_for(&self, _player: PlayerId) -> u32 {
        self.info().cooldown
    }

    /// Variants that also react to cast events return themselves here.
    fn observer(self: Arc<Self>) -> Option<Arc<dyn SpellObserver>> {
        None
    }
}

/// Unexpected failure inside a spell effect.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EffectError {
    #[error("host rejected {operation}: {reason}")]
    Host {
        operation: &'static str,
        reason: String,
    },

    #[error("effect state invalid: {0}")]
    Internal(String),
}

impl SpellError for EffectError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Internal
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Host { .. } => "EFFECT_HOST",
            Self::Internal(_) => "EFFECT_INTERNAL",
        }
    }
}

/// Shared, immutable handle to a registered spell.
#[derive(Clone)]
pub struct Spell {
    effect: Arc<dyn SpellEffect>,
}

impl Spell {
    pub fn new(effect: Arc<dyn SpellEffect>) -> Self {
        Self { effect }
    }

    pub fn info(&self) -> &SpellInfo {
        self.effect.info()
    }

    pub fn name(&self) -> &str {
        &self.info().name
    }

    pub fn description(&self) -> &str {
        &self.info().description
    }

    pub fn range(&self) -> u32 {
        self.info().range
    }

    pub fn through_walls(&self) -> bool {
        self.info().through_walls
    }

    /// Resolved cooldown for `player`, honouring variant overrides.
    pub fn cooldown_for(&self, player: PlayerId) -> u32 {
        self.effect.cooldown_for(player)
    }

    pub fn cast(&self, caster: PlayerId, env: &CastEnv<'_>) -> Result<bool, EffectError> {
        self.effect.cast(caster, env)
    }

    /// Case-insensitive name comparison.
    pub fn is_named(&self, name: &str) -> bool {
        self.name().eq_ignore_ascii_case(name)
    }

    pub(crate) fn observer(&self) -> Option<Arc<dyn SpellObserver>> {
        Arc::clone(&self.effect).observer()
    }
}

impl fmt::Debug for Spell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Spell")
            .field("name", &self.name())
            .field("range", &self.range())
            .field("cooldown", &self.info().cooldown)
            .finish()
    }
}

impl fmt::Display for Spell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl PartialEq for Spell {
    fn eq(&self, other: &Self) -> bool {
        self.name() == other.name()
    }
}

impl Eq for Spell {}

impl PartialOrd for Spell {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Spell {
    fn cmp(&self, other: &Self) -> Ordering {
        self.name().cmp(other.name())
    }
}

impl Hash for Spell {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name().hash(state);
    }
}
