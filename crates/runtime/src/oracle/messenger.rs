//! [`Messenger`] that logs notices and keeps a per-player inbox.
use std::collections::{HashMap, HashSet};
use std::sync::{PoisonError, RwLock};

use spell_core::{DeliveryError, Messenger, PlayerId};

#[derive(Debug, Default)]
pub struct TracingMessenger {
    inboxes: RwLock<HashMap<PlayerId, Vec<String>>>,
    offline: RwLock<HashSet<PlayerId>>,
}

impl TracingMessenger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Notices delivered to `player`, oldest first.
    pub fn inbox(&self, player: PlayerId) -> Vec<String> {
        self.inboxes
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&player)
            .cloned()
            .unwrap_or_default()
    }

    /// Marks the player unreachable; later notices fail with
    /// [`DeliveryError::Offline`].
    pub fn disconnect(&self, player: PlayerId) {
        self.offline
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(player);
    }

    pub fn connect(&self, player: PlayerId) {
        self.offline
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&player);
    }
}

impl Messenger for TracingMessenger {
    fn tell(&self, player: PlayerId, message: &str) -> Result<(), DeliveryError> {
        if self
            .offline
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(&player)
        {
            return Err(DeliveryError::Offline { player });
        }

        tracing::info!(target: "spell::chat", %player, message);
        self.inboxes
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(player)
            .or_default()
            .push(message.to_owned());
        Ok(())
    }
}
