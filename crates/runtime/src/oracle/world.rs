//! [`WorldOracle`] without a world: targets are scripted per caster and every
//! effect is recorded instead of applied.
use std::collections::HashMap;
use std::sync::{Mutex, PoisonError, RwLock};

use spell_core::{PlayerId, StatusEffect, Target, WorldOracle};

/// What a caster is currently looking at.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sighting {
    pub target: Target,
    /// Distance in blocks.
    pub distance: u32,
    /// Whether a wall stands between caster and target.
    pub obstructed: bool,
}

impl Sighting {
    pub fn clear(target: Target, distance: u32) -> Self {
        Self {
            target,
            distance,
            obstructed: false,
        }
    }
}

/// A world mutation requested by a cast.
#[derive(Clone, Debug, PartialEq)]
pub enum WorldEffect {
    CastEffect {
        player: PlayerId,
    },
    Status {
        target: Target,
        effect: StatusEffect,
    },
    Knockback {
        origin: PlayerId,
        target: Target,
        horizontal: f64,
        vertical: f64,
    },
    Damage {
        target: Target,
        amount: u32,
    },
}

#[derive(Debug, Default)]
pub struct HeadlessWorld {
    sightings: RwLock<HashMap<PlayerId, Sighting>>,
    effects: Mutex<Vec<WorldEffect>>,
}

impl HeadlessWorld {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets (or with `None`, clears) what `player` is looking at.
    pub fn set_sighting(&self, player: PlayerId, sighting: Option<Sighting>) {
        let mut sightings = self
            .sightings
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        match sighting {
            Some(sighting) => sightings.insert(player, sighting),
            None => sightings.remove(&player),
        };
    }

    /// Drains the recorded effects.
    pub fn take_effects(&self) -> Vec<WorldEffect> {
        std::mem::take(&mut *self.effects.lock().unwrap_or_else(PoisonError::into_inner))
    }

    fn record(&self, effect: WorldEffect) {
        tracing::trace!(target: "spell::world", ?effect, "world effect");
        self.effects
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(effect);
    }
}

impl WorldOracle for HeadlessWorld {
    fn nearest_target(&self, origin: PlayerId, range: u32, through_walls: bool) -> Option<Target> {
        self.sightings
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&origin)
            .filter(|sighting| sighting.distance <= range)
            .filter(|sighting| through_walls || !sighting.obstructed)
            .map(|sighting| sighting.target)
    }

    fn play_cast_effect(&self, player: PlayerId) {
        self.record(WorldEffect::CastEffect { player });
    }

    fn apply_status(&self, target: Target, effect: StatusEffect) {
        self.record(WorldEffect::Status { target, effect });
    }

    fn knockback(&self, origin: PlayerId, target: Target, horizontal: f64, vertical: f64) {
        self.record(WorldEffect::Knockback {
            origin,
            target,
            horizontal,
            vertical,
        });
    }

    fn damage(&self, target: Target, amount: u32) {
        self.record(WorldEffect::Damage { target, amount });
    }
}
