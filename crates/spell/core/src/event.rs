//! Cast events and the synchronous observer registry.
//!
//! Every cast attempt that passes the eligibility gate produces a
//! [`PreCastEvent`], which observers may cancel, and (unless cancelled) a
//! [`PostCastEvent`] reporting whether the effect succeeded. Observers run on
//! the caller's thread, in registration order, and must return before the
//! pipeline continues.

use std::sync::Arc;

use tracing::trace;

use crate::spell::Spell;
use crate::state::PlayerId;

/// Cancelable event dispatched before the cooldown gate.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PreCastEvent {
    pub spell: Spell,
    pub player: PlayerId,
    cancelled: bool,
}

impl PreCastEvent {
    pub fn new(spell: Spell, player: PlayerId) -> Self {
        Self {
            spell,
            player,
            cancelled: false,
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    pub fn set_cancelled(&mut self, cancelled: bool) {
        self.cancelled = cancelled;
    }

    pub fn cancel(&mut self) {
        self.cancelled = true;
    }
}

/// Non-cancelable event dispatched once the attempt is resolved.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PostCastEvent {
    pub spell: Spell,
    pub player: PlayerId,
    /// `false` when the cooldown gate blocked the attempt or the effect failed.
    pub successful: bool,
}

impl PostCastEvent {
    pub fn new(spell: Spell, player: PlayerId, successful: bool) -> Self {
        Self {
            spell,
            player,
            successful,
        }
    }
}

/// Either kind of cast event, for consumers that record both.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CastEvent {
    Pre(PreCastEvent),
    Post(PostCastEvent),
}

impl CastEvent {
    pub fn spell(&self) -> &Spell {
        match self {
            CastEvent::Pre(event) => &event.spell,
            CastEvent::Post(event) => &event.spell,
        }
    }

    pub fn player(&self) -> PlayerId {
        match self {
            CastEvent::Pre(event) => event.player,
            CastEvent::Post(event) => event.player,
        }
    }
}

/// Extension point reacting to cast attempts.
///
/// Both callbacks default to no-ops so observers only implement what they need.
pub trait SpellObserver: Send + Sync {
    /// Name used in logs.
    fn name(&self) -> &'static str;

    /// May veto the attempt via [`PreCastEvent::cancel`].
    fn on_pre_cast(&self, _event: &mut PreCastEvent) {}

    fn on_post_cast(&self, _event: &PostCastEvent) {}
}

/// Ordered list of observers invoked synchronously.
#[derive(Clone, Default)]
pub struct ObserverRegistry {
    observers: Vec<Arc<dyn SpellObserver>>,
}

impl ObserverRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an observer; it runs after every previously registered one.
    pub fn register(&mut self, observer: Arc<dyn SpellObserver>) {
        self.observers.push(observer);
    }

    pub fn len(&self) -> usize {
        self.observers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }

    /// Observer names in dispatch order (for debugging).
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.observers.iter().map(|o| o.name())
    }

    /// Dispatches a pre-cast event to every observer.
    ///
    /// Later observers see, and may clear, a cancellation set by earlier ones.
    /// Returns `true` if the event is still cancelled after the last observer.
    pub fn dispatch_pre(&self, event: &mut PreCastEvent) -> bool {
        for observer in &self.observers {
            let was_cancelled = event.is_cancelled();
            observer.on_pre_cast(event);
            if event.is_cancelled() != was_cancelled {
                trace!(
                    target: "spell::event",
                    observer = observer.name(),
                    spell = %event.spell,
                    player = %event.player,
                    cancelled = event.is_cancelled(),
                    "pre-cast cancellation changed"
                );
            }
        }
        event.is_cancelled()
    }

    /// Dispatches a post-cast event to every observer.
    pub fn dispatch_post(&self, event: &PostCastEvent) {
        for observer in &self.observers {
            observer.on_post_cast(event);
        }
    }
}
