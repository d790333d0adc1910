//! Runtime orchestration for the spell-casting engine.
//!
//! This crate wraps the deterministic rules in `spell-core` with a host shell:
//! a tick-driven scheduler for deferred tasks, a service that owns every piece
//! of mutable casting state, and a single worker task that applies commands
//! in arrival order. Hosts embed [`Runtime`] and interact with it through
//! [`RuntimeHandle`].
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the orchestrator, builder, and configuration
//! - [`api`] exposes the types downstream clients interact with
//! - [`events`] provides topic-based event bus for outward notifications
//! - [`service`] owns catalog, cooldowns, selection, and observers
//! - [`scheduler`] implements tick-based deferred execution
//! - [`oracle`] provides host collaborator bundles and in-memory adapters
//! - `workers` keeps background tasks internal to the crate
pub mod api;
pub mod events;
pub mod oracle;
pub mod runtime;
pub mod scheduler;
pub mod service;

mod workers;

pub use api::{Result, RuntimeError, RuntimeHandle};
pub use events::{
    CastResolved, CooldownExpired, EventBus, RuntimeEvent, SelectionChanged, Topic,
};
pub use oracle::{
    HeadlessWorld, HostServices, MemoryHost, MemoryInventory, MemoryKnowledge, MemoryPermissions,
    Sighting, TracingMessenger, WorldEffect,
};
pub use runtime::{Runtime, RuntimeBuilder, RuntimeConfig};
pub use scheduler::TickScheduler;
pub use service::{SelectTarget, SpellService, SpellStatus};
