//! Topic-based event bus for outward runtime notifications.
//!
//! Subscribers observe what the worker already decided; they cannot veto a
//! cast. Vetoes go through [`spell_core::SpellObserver`] instead.

mod bus;
mod types;

pub use bus::{EventBus, Topic};
pub use types::{CastResolved, CooldownExpired, RuntimeEvent, SelectionChanged};
