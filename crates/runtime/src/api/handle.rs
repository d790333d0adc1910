//! Cloneable façade for issuing commands to the runtime.
//!
//! [`RuntimeHandle`] hides channel plumbing and offers async helpers for
//! casting, moving selection cursors, or streaming events from specific
//! topics.
use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{broadcast, mpsc, oneshot};

use spell_core::{CastOutcome, PlayerId, Spell, SpellConfig, SpellInfo, SpellObserver, Tick};

use super::errors::{Result, RuntimeError};
use crate::events::{EventBus, RuntimeEvent, Topic};
use crate::service::{SelectTarget, SpellStatus};
use crate::workers::Command;

/// Client-facing handle to interact with the runtime
#[derive(Clone)]
pub struct RuntimeHandle {
    command_tx: mpsc::Sender<Command>,
    event_bus: EventBus,
}

impl RuntimeHandle {
    pub(crate) fn new(command_tx: mpsc::Sender<Command>, event_bus: EventBus) -> Self {
        Self {
            command_tx,
            event_bus,
        }
    }

    /// Cast a spell by (case-insensitive) name
    pub async fn cast(&self, player: PlayerId, spell: impl Into<String>) -> Result<CastOutcome> {
        let spell = spell.into();
        self.request(|reply| Command::Cast {
            player,
            spell,
            reply,
        })
        .await
    }

    /// Cast the player's selected spell; `None` when nothing is selectable
    pub async fn cast_selected(&self, player: PlayerId) -> Result<Option<CastOutcome>> {
        self.request(|reply| Command::CastSelected { player, reply })
            .await
    }

    pub async fn select_next(&self, player: PlayerId) -> Result<Spell> {
        self.select(player, SelectTarget::Next).await
    }

    pub async fn select_previous(&self, player: PlayerId) -> Result<Spell> {
        self.select(player, SelectTarget::Previous).await
    }

    pub async fn select_by_name(&self, player: PlayerId, name: impl Into<String>) -> Result<Spell> {
        self.select(player, SelectTarget::Named(name.into())).await
    }

    pub async fn current_spell(&self, player: PlayerId) -> Result<Option<Spell>> {
        self.request(|reply| Command::CurrentSpell { player, reply })
            .await
    }

    pub async fn list_spells(&self, player: PlayerId) -> Result<Vec<SpellStatus>> {
        self.request(|reply| Command::ListSpells { player, reply })
            .await
    }

    /// Every spell in the catalog, including ones no player knows yet
    pub async fn list_abilities(&self) -> Result<Vec<SpellInfo>> {
        self.request(|reply| Command::ListAbilities { reply }).await
    }

    /// Drop a departing player's cooldowns and selection
    pub async fn player_quit(&self, player: PlayerId) -> Result<()> {
        self.request(|reply| Command::PlayerQuit { player, reply })
            .await
    }

    pub async fn reload_config(&self, config: SpellConfig) -> Result<()> {
        self.request(|reply| Command::ReloadConfig { config, reply })
            .await
    }

    pub async fn register_observer(&self, observer: Arc<dyn SpellObserver>) -> Result<()> {
        self.request(|reply| Command::RegisterObserver { observer, reply })
            .await
    }

    /// Advance the clock immediately, running every task that becomes due
    pub async fn advance(&self, ticks: u64) -> Result<Tick> {
        self.request(|reply| Command::Advance { ticks, reply })
            .await
    }

    pub async fn now(&self) -> Result<Tick> {
        self.request(|reply| Command::Now { reply }).await
    }

    /// Subscribe to events from a specific topic
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use spell_runtime::Topic;
    ///
    /// let mut casts = handle.subscribe(Topic::Cast);
    /// while let Ok(event) = casts.recv().await {
    ///     // Handle resolved casts
    /// }
    /// ```
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<RuntimeEvent> {
        self.event_bus.subscribe(topic)
    }

    /// Subscribe to multiple topics at once
    pub fn subscribe_multiple(
        &self,
        topics: &[Topic],
    ) -> HashMap<Topic, broadcast::Receiver<RuntimeEvent>> {
        self.event_bus.subscribe_multiple(topics)
    }

    /// Get a reference to the event bus for advanced usage
    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }

    pub(crate) async fn shutdown(&self) -> Result<()> {
        self.request(|reply| Command::Shutdown { reply }).await
    }

    async fn select(&self, player: PlayerId, target: SelectTarget) -> Result<Spell> {
        let selected = self
            .request(|reply| Command::Select {
                player,
                target,
                reply,
            })
            .await?;
        Ok(selected?)
    }

    async fn request<T>(&self, command: impl FnOnce(oneshot::Sender<T>) -> Command) -> Result<T> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(command(reply_tx))
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }
}
