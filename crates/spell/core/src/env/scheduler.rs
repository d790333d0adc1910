//! Deferred work submitted to the host scheduler.

use crate::spell::Spell;
use crate::state::PlayerId;

/// Work item executed later on the same logical thread as the pipeline.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DeferredTask {
    /// Remove the `(player, spell)` cooldown entry, whatever its value.
    ExpireCooldown { player: PlayerId, spell: Spell },
}

/// Host scheduler (`scheduleAfter(ticks, action)`).
///
/// Fire-and-forget: nothing is returned and a scheduled task cannot be revoked.
pub trait Scheduler {
    fn schedule_after(&mut self, ticks: u64, task: DeferredTask);
}
