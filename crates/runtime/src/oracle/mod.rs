//! Host collaborator adapters.
//!
//! [`HostServices`] bundles the `spell-core` collaborator traits behind `Arc`s
//! so the worker can build a [`CastEnv`] for every attempt. The in-memory
//! implementations back headless servers and tests; a game host supplies its
//! own implementations instead.
mod inventory;
mod knowledge;
mod messenger;
mod permissions;
mod world;

use std::sync::Arc;

use spell_core::{
    CastEnv, InventoryOracle, KnowledgeOracle, Messenger, PermissionOracle, WorldOracle,
};

pub use inventory::MemoryInventory;
pub use knowledge::MemoryKnowledge;
pub use messenger::TracingMessenger;
pub use permissions::MemoryPermissions;
pub use world::{HeadlessWorld, Sighting, WorldEffect};

/// Shared handles to every host collaborator.
#[derive(Clone)]
pub struct HostServices {
    pub(crate) permissions: Arc<dyn PermissionOracle>,
    pub(crate) knowledge: Arc<dyn KnowledgeOracle>,
    pub(crate) inventory: Arc<dyn InventoryOracle>,
    pub(crate) world: Arc<dyn WorldOracle>,
    pub(crate) messenger: Arc<dyn Messenger>,
}

impl HostServices {
    pub fn new(
        permissions: Arc<dyn PermissionOracle>,
        knowledge: Arc<dyn KnowledgeOracle>,
        inventory: Arc<dyn InventoryOracle>,
        world: Arc<dyn WorldOracle>,
        messenger: Arc<dyn Messenger>,
    ) -> Self {
        Self {
            permissions,
            knowledge,
            inventory,
            world,
            messenger,
        }
    }

    /// Borrows the bundle as the environment a cast runs against.
    pub fn as_cast_env(&self) -> CastEnv<'_> {
        CastEnv::new(
            self.permissions.as_ref(),
            self.knowledge.as_ref(),
            self.inventory.as_ref(),
            self.world.as_ref(),
            self.messenger.as_ref(),
        )
    }

    pub fn knowledge(&self) -> &dyn KnowledgeOracle {
        self.knowledge.as_ref()
    }
}

/// Concrete in-memory adapters, kept alongside the [`HostServices`] built
/// from them so callers can still seed and inspect host state.
#[derive(Clone, Default)]
pub struct MemoryHost {
    pub permissions: Arc<MemoryPermissions>,
    pub knowledge: Arc<MemoryKnowledge>,
    pub inventory: Arc<MemoryInventory>,
    pub world: Arc<HeadlessWorld>,
    pub messenger: Arc<TracingMessenger>,
}

impl MemoryHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn services(&self) -> HostServices {
        HostServices::new(
            self.permissions.clone(),
            self.knowledge.clone(),
            self.inventory.clone(),
            self.world.clone(),
            self.messenger.clone(),
        )
    }
}
