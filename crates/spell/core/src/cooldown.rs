//! Per-player, per-spell cooldown store with scheduled expiry.
//!
//! An entry exists only while the cooldown is active; absence means the spell
//! is ready. Expiry is a one-shot deferred removal rather than a countdown:
//! the stored value is what was set, and the scheduled task deletes the entry
//! outright when it fires, even if the value was overwritten in between.

use std::collections::HashMap;

use tracing::trace;

use crate::env::{DeferredTask, Scheduler};
use crate::spell::Spell;
use crate::state::PlayerId;

/// Cooldowns keyed by player, then spell.
///
/// The nested layout lets a departing player's entries be dropped in one step.
#[derive(Clone, Debug, Default)]
pub struct CooldownTracker {
    cooldowns: HashMap<PlayerId, HashMap<Spell, u32>>,
}

impl CooldownTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stored cooldown for the pair, or `None` when the spell is ready.
    pub fn get(&self, player: PlayerId, spell: &Spell) -> Option<u32> {
        self.cooldowns.get(&player)?.get(spell).copied()
    }

    /// Creates, overwrites (`Some`) or clears (`None`) the entry.
    ///
    /// Values are stored as given; callers starting a cooldown pass a positive
    /// duration. Clearing an absent entry is a no-op.
    pub fn set(&mut self, player: PlayerId, spell: &Spell, cooldown: Option<u32>) {
        match cooldown {
            Some(value) => {
                self.cooldowns
                    .entry(player)
                    .or_default()
                    .insert(spell.clone(), value);
            }
            None => self.remove(player, spell),
        }
    }

    /// Sets the entry and schedules its removal once `seconds` have elapsed.
    pub fn start(
        &mut self,
        player: PlayerId,
        spell: &Spell,
        seconds: u32,
        delay_ticks: u64,
        scheduler: &mut dyn Scheduler,
    ) {
        self.set(player, spell, Some(seconds));
        scheduler.schedule_after(
            delay_ticks,
            DeferredTask::ExpireCooldown {
                player,
                spell: spell.clone(),
            },
        );
        trace!(
            target: "spell::cooldown",
            %player,
            %spell,
            seconds,
            delay_ticks,
            "cooldown started"
        );
    }

    /// Deferred expiry: removes the entry unconditionally.
    pub fn expire(&mut self, player: PlayerId, spell: &Spell) {
        self.remove(player, spell);
        trace!(target: "spell::cooldown", %player, %spell, "cooldown expired");
    }

    /// Drops every cooldown the player holds.
    pub fn clear_player(&mut self, player: PlayerId) {
        self.cooldowns.remove(&player);
    }

    /// Active cooldowns for a player, in no particular order.
    pub fn active_for(&self, player: PlayerId) -> impl Iterator<Item = (&Spell, u32)> + '_ {
        self.cooldowns
            .get(&player)
            .into_iter()
            .flat_map(|spells| spells.iter().map(|(spell, &value)| (spell, value)))
    }

    pub fn is_empty(&self) -> bool {
        self.cooldowns.is_empty()
    }

    fn remove(&mut self, player: PlayerId, spell: &Spell) {
        if let Some(spells) = self.cooldowns.get_mut(&player) {
            spells.remove(spell);
            if spells.is_empty() {
                self.cooldowns.remove(&player);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::CastEnv;
    use crate::spell::{EffectError, SpellEffect, SpellInfo};
    use std::sync::Arc;

    struct Named(SpellInfo);

    impl SpellEffect for Named {
        fn info(&self) -> &SpellInfo {
            &self.0
        }

        fn cast(&self, _caster: PlayerId, _env: &CastEnv<'_>) -> Result<bool, EffectError> {
            Ok(true)
        }
    }

    #[derive(Default)]
    struct Recorded(Vec<(u64, DeferredTask)>);

    impl Scheduler for Recorded {
        fn schedule_after(&mut self, ticks: u64, task: DeferredTask) {
            self.0.push((ticks, task));
        }
    }

    fn spell(name: &str) -> Spell {
        Spell::new(Arc::new(Named(SpellInfo::new(name, "").with_cooldown(60))))
    }

    #[test]
    fn unknown_player_reads_as_ready() {
        let tracker = CooldownTracker::new();
        assert_eq!(tracker.get(PlayerId(9), &spell("Stupefy")), None);
    }

    #[test]
    fn set_then_clear() {
        let mut tracker = CooldownTracker::new();
        let stupefy = spell("Stupefy");

        tracker.set(PlayerId(1), &stupefy, Some(5));
        assert_eq!(tracker.get(PlayerId(1), &stupefy), Some(5));

        tracker.set(PlayerId(1), &stupefy, None);
        assert_eq!(tracker.get(PlayerId(1), &stupefy), None);
        assert!(tracker.is_empty());
    }

    #[test]
    fn clearing_twice_is_a_no_op() {
        let mut tracker = CooldownTracker::new();
        let stupefy = spell("Stupefy");

        tracker.set(PlayerId(1), &stupefy, None);
        tracker.set(PlayerId(1), &stupefy, None);
        assert_eq!(tracker.get(PlayerId(1), &stupefy), None);
    }

    #[test]
    fn overwrite_replaces_value() {
        let mut tracker = CooldownTracker::new();
        let stupefy = spell("Stupefy");

        tracker.set(PlayerId(1), &stupefy, Some(5));
        tracker.set(PlayerId(1), &stupefy, Some(30));
        assert_eq!(tracker.get(PlayerId(1), &stupefy), Some(30));
    }

    #[test]
    fn start_schedules_expiry_for_exact_pair() {
        let mut tracker = CooldownTracker::new();
        let mut scheduler = Recorded::default();
        let stupefy = spell("Stupefy");

        tracker.start(PlayerId(1), &stupefy, 60, 1200, &mut scheduler);

        assert_eq!(tracker.get(PlayerId(1), &stupefy), Some(60));
        assert_eq!(
            scheduler.0,
            vec![(
                1200,
                DeferredTask::ExpireCooldown {
                    player: PlayerId(1),
                    spell: stupefy.clone(),
                }
            )]
        );
    }

    #[test]
    fn expire_ignores_overwritten_value() {
        let mut tracker = CooldownTracker::new();
        let stupefy = spell("Stupefy");

        tracker.set(PlayerId(1), &stupefy, Some(60));
        tracker.set(PlayerId(1), &stupefy, Some(999));
        tracker.expire(PlayerId(1), &stupefy);

        assert_eq!(tracker.get(PlayerId(1), &stupefy), None);
    }

    #[test]
    fn clear_player_leaves_others_untouched() {
        let mut tracker = CooldownTracker::new();
        let stupefy = spell("Stupefy");
        let confundo = spell("Confundo");

        tracker.set(PlayerId(1), &stupefy, Some(60));
        tracker.set(PlayerId(1), &confundo, Some(10));
        tracker.set(PlayerId(2), &stupefy, Some(60));

        assert_eq!(tracker.active_for(PlayerId(1)).count(), 2);
        tracker.clear_player(PlayerId(1));

        assert_eq!(tracker.active_for(PlayerId(1)).count(), 0);
        assert_eq!(tracker.get(PlayerId(2), &stupefy), Some(60));
    }
}
