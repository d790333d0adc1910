//! Spell worker that owns the authoritative [`SpellService`].
//!
//! Receives commands from [`crate::RuntimeHandle`], applies them in arrival
//! order, and advances the tick clock on a fixed interval.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, oneshot};
use tokio::time::{Interval, MissedTickBehavior};
use tracing::{debug, info};

use spell_core::{
    CastOutcome, PlayerId, SelectionError, Spell, SpellConfig, SpellInfo, SpellObserver, Tick,
};

use crate::service::{SelectTarget, SpellService, SpellStatus};

/// Commands that can be sent to the spell worker
pub enum Command {
    /// Cast a spell by name.
    Cast {
        player: PlayerId,
        spell: String,
        reply: oneshot::Sender<CastOutcome>,
    },
    /// Cast the player's selected spell.
    CastSelected {
        player: PlayerId,
        reply: oneshot::Sender<Option<CastOutcome>>,
    },
    /// Move the player's selection cursor.
    Select {
        player: PlayerId,
        target: SelectTarget,
        reply: oneshot::Sender<Result<Spell, SelectionError>>,
    },
    CurrentSpell {
        player: PlayerId,
        reply: oneshot::Sender<Option<Spell>>,
    },
    ListSpells {
        player: PlayerId,
        reply: oneshot::Sender<Vec<SpellStatus>>,
    },
    /// Whole catalog in name order.
    ListAbilities {
        reply: oneshot::Sender<Vec<SpellInfo>>,
    },
    /// Drop all per-player state.
    PlayerQuit {
        player: PlayerId,
        reply: oneshot::Sender<()>,
    },
    ReloadConfig {
        config: SpellConfig,
        reply: oneshot::Sender<()>,
    },
    RegisterObserver {
        observer: Arc<dyn SpellObserver>,
        reply: oneshot::Sender<()>,
    },
    /// Advance the clock by the given number of ticks immediately.
    Advance {
        ticks: u64,
        reply: oneshot::Sender<Tick>,
    },
    Now {
        reply: oneshot::Sender<Tick>,
    },
    /// Stop the worker loop after replying.
    Shutdown { reply: oneshot::Sender<()> },
}

/// Background task that processes spell commands.
pub struct SpellWorker {
    service: SpellService,
    command_rx: mpsc::Receiver<Command>,
    auto_tick: bool,
}

impl SpellWorker {
    pub fn new(service: SpellService, command_rx: mpsc::Receiver<Command>, auto_tick: bool) -> Self {
        Self {
            service,
            command_rx,
            auto_tick,
        }
    }

    /// Main worker loop.
    pub async fn run(mut self) {
        let mut ticks_per_second = self.service.config().ticks_per_second;
        let mut interval = tick_interval(ticks_per_second);

        loop {
            tokio::select! {
                command = self.command_rx.recv() => {
                    let Some(command) = command else { break };
                    if !self.handle_command(command) {
                        break;
                    }

                    let configured = self.service.config().ticks_per_second;
                    if configured != ticks_per_second {
                        ticks_per_second = configured;
                        interval = tick_interval(ticks_per_second);
                    }
                }
                _ = interval.tick(), if self.auto_tick => {
                    self.service.tick();
                }
            }
        }

        info!(target: "spell::worker", tick = %self.service.now(), "spell worker stopped");
    }

    /// Applies one command; returns `false` when the worker should stop.
    fn handle_command(&mut self, command: Command) -> bool {
        match command {
            Command::Cast {
                player,
                spell,
                reply,
            } => {
                let outcome = self.service.cast_spell(player, &spell);
                if reply.send(outcome).is_err() {
                    debug!("Cast reply channel closed (caller dropped)");
                }
            }
            Command::CastSelected { player, reply } => {
                let outcome = self.service.cast_selected(player);
                if reply.send(outcome).is_err() {
                    debug!("CastSelected reply channel closed (caller dropped)");
                }
            }
            Command::Select {
                player,
                target,
                reply,
            } => {
                let result = self.service.select(player, &target);
                if reply.send(result).is_err() {
                    debug!("Select reply channel closed (caller dropped)");
                }
            }
            Command::CurrentSpell { player, reply } => {
                if reply.send(self.service.current_spell(player)).is_err() {
                    debug!("CurrentSpell reply channel closed (caller dropped)");
                }
            }
            Command::ListSpells { player, reply } => {
                if reply.send(self.service.list_spells(player)).is_err() {
                    debug!("ListSpells reply channel closed (caller dropped)");
                }
            }
            Command::ListAbilities { reply } => {
                if reply.send(self.service.list_abilities()).is_err() {
                    debug!("ListAbilities reply channel closed (caller dropped)");
                }
            }
            Command::PlayerQuit { player, reply } => {
                self.service.player_quit(player);
                let _ = reply.send(());
            }
            Command::ReloadConfig { config, reply } => {
                self.service.reload_config(config);
                let _ = reply.send(());
            }
            Command::RegisterObserver { observer, reply } => {
                self.service.register_observer(observer);
                let _ = reply.send(());
            }
            Command::Advance { ticks, reply } => {
                let now = self.service.advance(ticks);
                if reply.send(now).is_err() {
                    debug!("Advance reply channel closed (caller dropped)");
                }
            }
            Command::Now { reply } => {
                let _ = reply.send(self.service.now());
            }
            Command::Shutdown { reply } => {
                let _ = reply.send(());
                return false;
            }
        }
        true
    }
}

fn tick_interval(ticks_per_second: u32) -> Interval {
    let millis = (1000 / u64::from(ticks_per_second.max(1))).max(1);
    let mut interval = tokio::time::interval(Duration::from_millis(millis));
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    interval
}
