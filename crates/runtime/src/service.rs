//! Owner of every piece of mutable casting state.
//!
//! [`SpellService`] is synchronous and single-threaded: the spell worker owns
//! one instance and applies commands to it in arrival order, so cast attempts,
//! selection changes and cooldown expiries never interleave.
use std::sync::Arc;

use tracing::{debug, info};

use spell_core::{
    CastOutcome, CastPipeline, CooldownTracker, DeferredTask, ObserverRegistry, PlayerId,
    RejectReason, SelectionError, SelectionState, Spell, SpellCatalog, SpellConfig,
    SpellInfo, SpellObserver, Tick, known_spells,
};

use crate::events::{CastResolved, CooldownExpired, EventBus, RuntimeEvent, SelectionChanged};
use crate::oracle::HostServices;
use crate::scheduler::TickScheduler;

/// Where a selection command moves the cursor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SelectTarget {
    Next,
    Previous,
    Named(String),
}

/// One row of a player's spell list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SpellStatus {
    pub name: String,
    pub description: String,
    /// Stored cooldown value while the spell is cooling down.
    pub cooldown: Option<u32>,
    pub selected: bool,
}

pub struct SpellService {
    catalog: SpellCatalog,
    cooldowns: CooldownTracker,
    selection: SelectionState,
    observers: ObserverRegistry,
    scheduler: TickScheduler,
    config: SpellConfig,
    host: HostServices,
    event_bus: EventBus,
}

impl SpellService {
    pub fn new(
        catalog: SpellCatalog,
        observers: ObserverRegistry,
        config: SpellConfig,
        host: HostServices,
        event_bus: EventBus,
    ) -> Self {
        info!(
            target: "spell::service",
            spells = catalog.len(),
            observers = observers.len(),
            ticks_per_second = config.ticks_per_second,
            "spell service initialized"
        );

        Self {
            catalog,
            cooldowns: CooldownTracker::new(),
            selection: SelectionState::new(),
            observers,
            scheduler: TickScheduler::new(),
            config,
            host,
            event_bus,
        }
    }

    pub fn catalog(&self) -> &SpellCatalog {
        &self.catalog
    }

    pub fn config(&self) -> &SpellConfig {
        &self.config
    }

    pub fn cooldowns(&self) -> &CooldownTracker {
        &self.cooldowns
    }

    pub fn now(&self) -> Tick {
        self.scheduler.now()
    }

    /// Number of deferred tasks still waiting to fire.
    pub fn pending_tasks(&self) -> usize {
        self.scheduler.len()
    }

    /// Attempts to cast the spell named `name` (case-insensitive).
    pub fn cast_spell(&mut self, player: PlayerId, name: &str) -> CastOutcome {
        let Some(spell) = self.catalog.lookup(name).cloned() else {
            debug!(target: "spell::service", %player, name, "cast of unknown spell");
            let outcome = CastOutcome::Rejected(RejectReason::UnknownSpell);
            self.publish_cast(player, name.to_owned(), outcome);
            return outcome;
        };
        self.cast(player, &spell)
    }

    /// Attempts to cast the player's selected spell; `None` when the player
    /// knows no castable spell.
    pub fn cast_selected(&mut self, player: PlayerId) -> Option<CastOutcome> {
        let spell = self.current_spell(player)?;
        Some(self.cast(player, &spell))
    }

    pub fn select(
        &mut self,
        player: PlayerId,
        target: &SelectTarget,
    ) -> Result<Spell, SelectionError> {
        match target {
            SelectTarget::Next => self.select_next(player),
            SelectTarget::Previous => self.select_previous(player),
            SelectTarget::Named(name) => self.select_by_name(player, name),
        }
    }

    pub fn select_next(&mut self, player: PlayerId) -> Result<Spell, SelectionError> {
        let spell =
            self.selection
                .select_next(player, self.host.knowledge(), &self.catalog)?;
        self.publish_selection(player, &spell);
        Ok(spell)
    }

    pub fn select_previous(&mut self, player: PlayerId) -> Result<Spell, SelectionError> {
        let spell =
            self.selection
                .select_previous(player, self.host.knowledge(), &self.catalog)?;
        self.publish_selection(player, &spell);
        Ok(spell)
    }

    pub fn select_by_name(&mut self, player: PlayerId, name: &str) -> Result<Spell, SelectionError> {
        let spell =
            self.selection
                .select_by_name(player, name, self.host.knowledge(), &self.catalog)?;
        self.publish_selection(player, &spell);
        Ok(spell)
    }

    pub fn current_spell(&self, player: PlayerId) -> Option<Spell> {
        self.selection
            .current_spell(player, self.host.knowledge(), &self.catalog)
    }

    /// Every registered spell in name order, known or not.
    pub fn list_abilities(&self) -> Vec<SpellInfo> {
        self.catalog.all().map(|spell| spell.info().clone()).collect()
    }

    /// The player's known spells that resolve in the catalog, in selection
    /// order.
    pub fn list_spells(&self, player: PlayerId) -> Vec<SpellStatus> {
        let knowledge = self.host.knowledge();
        let selected = self.selection.current_index(player, knowledge);

        known_spells(knowledge, player)
            .iter()
            .enumerate()
            .filter_map(|(index, name)| {
                let spell = self.catalog.lookup(name)?;
                Some(SpellStatus {
                    name: spell.name().to_owned(),
                    description: spell.description().to_owned(),
                    cooldown: self.cooldowns.get(player, spell),
                    selected: selected == Some(index),
                })
            })
            .collect()
    }

    /// Advances the clock by one tick and runs every task that became due.
    pub fn tick(&mut self) -> Tick {
        self.advance(1)
    }

    /// Advances the clock by `ticks` and runs every task that became due.
    pub fn advance(&mut self, ticks: u64) -> Tick {
        let now = self.scheduler.now() + ticks;
        for task in self.scheduler.advance(now) {
            self.run_task(task, now);
        }
        now
    }

    /// Drops all per-player state.
    ///
    /// Expiry tasks already scheduled for the player still fire and find
    /// nothing to remove.
    pub fn player_quit(&mut self, player: PlayerId) {
        self.cooldowns.clear_player(player);
        self.selection.clear(player);
        debug!(target: "spell::service", %player, "player state cleared");
    }

    /// Replaces the engine configuration. Cooldowns already running keep the
    /// delay they were scheduled with.
    pub fn reload_config(&mut self, config: SpellConfig) {
        info!(
            target: "spell::service",
            particle_feedback = config.particle_feedback,
            ticks_per_second = config.ticks_per_second,
            casting_item = %config.casting_item,
            "configuration reloaded"
        );
        self.config = config;
    }

    pub fn register_observer(&mut self, observer: Arc<dyn SpellObserver>) {
        debug!(target: "spell::service", observer = observer.name(), "observer registered");
        self.observers.register(observer);
    }

    fn cast(&mut self, player: PlayerId, spell: &Spell) -> CastOutcome {
        let env = self.host.as_cast_env();
        let outcome = CastPipeline::new(&mut self.cooldowns, &self.observers, &self.config).cast(
            &env,
            &mut self.scheduler,
            player,
            spell,
        );
        self.publish_cast(player, spell.name().to_owned(), outcome);
        outcome
    }

    fn run_task(&mut self, task: DeferredTask, now: Tick) {
        match task {
            DeferredTask::ExpireCooldown { player, spell } => {
                self.cooldowns.expire(player, &spell);
                debug!(target: "spell::service", %player, %spell, tick = %now, "cooldown expired");
                self.event_bus
                    .publish(RuntimeEvent::CooldownExpired(CooldownExpired {
                        player,
                        spell: spell.name().to_owned(),
                        tick: now,
                    }));
            }
        }
    }

    fn publish_cast(&self, player: PlayerId, spell: String, outcome: CastOutcome) {
        self.event_bus.publish(RuntimeEvent::CastResolved(CastResolved {
            player,
            spell,
            outcome,
            tick: self.scheduler.now(),
        }));
    }

    fn publish_selection(&self, player: PlayerId, spell: &Spell) {
        let index = self
            .selection
            .current_index(player, self.host.knowledge())
            .unwrap_or_default();
        self.event_bus
            .publish(RuntimeEvent::SelectionChanged(SelectionChanged {
                player,
                spell: spell.name().to_owned(),
                index,
            }));
    }
}
