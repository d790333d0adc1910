//! Traits describing the host services the casting core consumes.
//!
//! Oracles answer read-only questions (permissions, knowledge, inventory);
//! sinks accept side effects (world effects, messages, deferred work). The
//! [`CastEnv`] aggregate bundles them so the pipeline can reach everything it
//! needs without hard coupling to concrete implementations.
mod scheduler;
mod world;

pub use scheduler::{DeferredTask, Scheduler};
pub use world::{StatusEffect, StatusKind, Target, WorldOracle};

use crate::error::{ErrorSeverity, SpellError};
use crate::state::PlayerId;

/// Permission service (`player.hasPermission(node)`).
pub trait PermissionOracle: Send + Sync {
    fn has_permission(&self, player: PlayerId, node: &str) -> bool;
}

/// Per-player spell knowledge store.
///
/// Must be queried on every use: the host may change a player's known set
/// between two calls.
pub trait KnowledgeOracle: Send + Sync {
    /// Names of the spells the player knows. Empty when the player is unknown.
    fn known_spells(&self, player: PlayerId) -> Vec<String>;
}

/// Player inventory lookups.
pub trait InventoryOracle: Send + Sync {
    fn has_item(&self, player: PlayerId, item: &str) -> bool;
}

/// Best-effort text delivery to a player.
pub trait Messenger: Send + Sync {
    fn tell(&self, player: PlayerId, message: &str) -> Result<(), DeliveryError>;
}

/// Failure to deliver a notice. Never aborts the operation that sent it.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum DeliveryError {
    #[error("{player} is not connected")]
    Offline { player: PlayerId },

    #[error("message to {player} rejected: {reason}")]
    Rejected { player: PlayerId, reason: String },
}

impl SpellError for DeliveryError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Degraded
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Offline { .. } => "DELIVERY_OFFLINE",
            Self::Rejected { .. } => "DELIVERY_REJECTED",
        }
    }
}

/// Aggregates the host services required by the cast pipeline and spell effects.
#[derive(Clone, Copy)]
pub struct CastEnv<'a> {
    pub permissions: &'a dyn PermissionOracle,
    pub knowledge: &'a dyn KnowledgeOracle,
    pub inventory: &'a dyn InventoryOracle,
    pub world: &'a dyn WorldOracle,
    pub messenger: &'a dyn Messenger,
}

impl<'a> CastEnv<'a> {
    pub fn new(
        permissions: &'a dyn PermissionOracle,
        knowledge: &'a dyn KnowledgeOracle,
        inventory: &'a dyn InventoryOracle,
        world: &'a dyn WorldOracle,
        messenger: &'a dyn Messenger,
    ) -> Self {
        Self {
            permissions,
            knowledge,
            inventory,
            world,
            messenger,
        }
    }

    /// Sends a notice, logging and swallowing delivery failures.
    pub fn notify(&self, player: PlayerId, message: &str) {
        if let Err(error) = self.messenger.tell(player, message) {
            tracing::debug!(
                target: "spell::env",
                %player,
                code = error.error_code(),
                error = %error,
                "notice not delivered"
            );
        }
    }
}
