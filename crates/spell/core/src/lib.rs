//! Deterministic spell-casting rules shared by the runtime and content crates.
//!
//! `spell-core` defines the spell catalog, per-player cooldown and selection
//! state, the cancelable cast event protocol, and the cast pipeline that ties
//! them together. It performs no I/O: every host service (permissions,
//! knowledge, world, messaging, scheduling) is reached through the traits in
//! [`env`], and all mutable state is owned by the caller.
pub mod cast;
pub mod catalog;
pub mod config;
pub mod cooldown;
pub mod env;
pub mod error;
pub mod event;
pub mod selection;
pub mod spell;
pub mod state;

pub use cast::{CastOutcome, CastPipeline, FailReason, RejectReason, is_cooldown_exempt};
pub use catalog::{RegistrationError, SpellCatalog};
pub use config::SpellConfig;
pub use cooldown::CooldownTracker;
pub use env::{
    CastEnv, DeferredTask, DeliveryError, InventoryOracle, KnowledgeOracle, Messenger,
    PermissionOracle, Scheduler, StatusEffect, StatusKind, Target, WorldOracle,
};
pub use error::{ErrorSeverity, SpellError};
pub use event::{CastEvent, ObserverRegistry, PostCastEvent, PreCastEvent, SpellObserver};
pub use selection::{SelectionError, SelectionState, known_spells};
pub use spell::{EffectError, Spell, SpellEffect, SpellInfo};
pub use state::{PlayerId, Tick};
