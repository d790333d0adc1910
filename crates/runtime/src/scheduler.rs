//! Tick-driven deferred task queue.
//!
//! [`TickScheduler`] is the runtime's implementation of
//! [`spell_core::Scheduler`]. Tasks fire on the first [`TickScheduler::advance`]
//! whose tick reaches their due tick; tasks due on the same tick fire in the
//! order they were scheduled.
use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use spell_core::{DeferredTask, Scheduler, Tick};

#[derive(Debug)]
struct Entry {
    due: Tick,
    sequence: u64,
    task: DeferredTask,
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Entry {}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Entry {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.due, self.sequence).cmp(&(other.due, other.sequence))
    }
}

/// Min-heap of deferred tasks keyed by due tick.
#[derive(Debug, Default)]
pub struct TickScheduler {
    now: Tick,
    sequence: u64,
    queue: BinaryHeap<Reverse<Entry>>,
}

impl TickScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last tick passed to [`Self::advance`].
    pub fn now(&self) -> Tick {
        self.now
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Tick at which the earliest pending task is due.
    pub fn next_due(&self) -> Option<Tick> {
        self.queue.peek().map(|Reverse(entry)| entry.due)
    }

    /// Moves the clock to `now` and drains every task due at or before it.
    ///
    /// The clock never moves backwards.
    pub fn advance(&mut self, now: Tick) -> Vec<DeferredTask> {
        self.now = self.now.max(now);

        let mut due = Vec::new();
        while let Some(Reverse(entry)) = self.queue.peek() {
            if entry.due > self.now {
                break;
            }
            if let Some(Reverse(entry)) = self.queue.pop() {
                due.push(entry.task);
            }
        }
        due
    }
}

impl Scheduler for TickScheduler {
    fn schedule_after(&mut self, ticks: u64, task: DeferredTask) {
        let due = self.now + ticks;
        self.sequence += 1;
        tracing::trace!(target: "spell::scheduler", %due, ?task, "task scheduled");
        self.queue.push(Reverse(Entry {
            due,
            sequence: self.sequence,
            task,
        }));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use spell_core::{CastEnv, EffectError, PlayerId, Spell, SpellEffect, SpellInfo};
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

    fn expire(player: u64, name: &str) -> DeferredTask {
        DeferredTask::ExpireCooldown {
            player: PlayerId(player),
            spell: Spell::new(Arc::new(Named(SpellInfo::new(name, "")))),
        }
    }

    #[test]
    fn nothing_fires_before_due() {
        let mut scheduler = TickScheduler::new();
        scheduler.schedule_after(10, expire(1, "Stupefy"));

        assert!(scheduler.advance(Tick(9)).is_empty());
        assert_eq!(scheduler.next_due(), Some(Tick(10)));
        assert_eq!(scheduler.advance(Tick(10)), vec![expire(1, "Stupefy")]);
        assert!(scheduler.is_empty());
    }

    #[test]
    fn equal_due_ticks_fire_in_schedule_order() {
        let mut scheduler = TickScheduler::new();
        scheduler.schedule_after(5, expire(2, "B"));
        scheduler.schedule_after(3, expire(1, "A"));
        scheduler.schedule_after(5, expire(3, "C"));

        let fired = scheduler.advance(Tick(100));
        assert_eq!(fired, vec![expire(1, "A"), expire(2, "B"), expire(3, "C")]);
    }

    #[test]
    fn delay_is_relative_to_current_clock() {
        let mut scheduler = TickScheduler::new();
        scheduler.advance(Tick(50));
        scheduler.schedule_after(1, expire(1, "A"));

        assert!(scheduler.advance(Tick(50)).is_empty());
        assert_eq!(scheduler.advance(Tick(51)).len(), 1);
    }

    #[test]
    fn clock_never_rewinds() {
        let mut scheduler = TickScheduler::new();
        scheduler.advance(Tick(20));
        scheduler.advance(Tick(5));
        assert_eq!(scheduler.now(), Tick(20));
    }
}
