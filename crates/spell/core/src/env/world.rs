//! World access used by spell effects: target acquisition and effect application.

use crate::state::PlayerId;

/// Entity picked by target acquisition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Target {
    /// Another player.
    Player(PlayerId),
    /// Any other living entity (mobs, animals), identified by host entity id.
    Creature(u64),
}

impl Target {
    pub fn is_player(&self) -> bool {
        matches!(self, Target::Player(_))
    }
}

/// Status effects spells can apply.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum StatusKind {
    Confusion,
    Weakness,
}

/// A timed status effect application.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusEffect {
    pub kind: StatusKind,
    /// Duration in host ticks.
    pub ticks: u32,
    pub amplifier: u8,
}

impl StatusEffect {
    pub fn new(kind: StatusKind, ticks: u32, amplifier: u8) -> Self {
        Self {
            kind,
            ticks,
            amplifier,
        }
    }
}

/// Host world services.
///
/// The casting pipeline itself only uses [`WorldOracle::play_cast_effect`];
/// everything else is reserved for individual spell effects.
pub trait WorldOracle: Send + Sync {
    /// Nearest valid target in front of `origin` within `range`, or `None`.
    fn nearest_target(&self, origin: PlayerId, range: u32, through_walls: bool) -> Option<Target>;

    /// Purely cosmetic feedback at the caster's location.
    fn play_cast_effect(&self, player: PlayerId);

    fn apply_status(&self, target: Target, effect: StatusEffect);

    /// Pushes `target` away from `origin`.
    fn knockback(&self, origin: PlayerId, target: Target, horizontal: f64, vertical: f64);

    fn damage(&self, target: Target, amount: u32);
}
