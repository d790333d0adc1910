//! Event payloads published by the spell worker.

use serde::{Deserialize, Serialize};
use spell_core::{CastOutcome, PlayerId, Tick};

/// Every event the runtime publishes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RuntimeEvent {
    CastResolved(CastResolved),
    CooldownExpired(CooldownExpired),
    SelectionChanged(SelectionChanged),
}

/// A cast attempt reached its terminal outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CastResolved {
    pub player: PlayerId,
    /// Requested name as typed when it did not resolve, canonical name otherwise.
    pub spell: String,
    pub outcome: CastOutcome,
    pub tick: Tick,
}

/// A cooldown entry was removed by its scheduled expiry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CooldownExpired {
    pub player: PlayerId,
    pub spell: String,
    pub tick: Tick,
}

/// A player's selection cursor moved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectionChanged {
    pub player: PlayerId,
    pub spell: String,
    pub index: usize,
}
