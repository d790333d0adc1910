//! Confundo: confuses another player.

use spell_core::{
    CastEnv, EffectError, PlayerId, SpellEffect, SpellInfo, StatusEffect, StatusKind, Target,
};

use crate::tuning::{ConfundoTuning, DurationError, parse_duration};

pub struct Confundo {
    info: SpellInfo,
    /// Confusion duration in ticks.
    duration: u32,
}

impl Confundo {
    pub const NAME: &'static str = "Confundo";

    /// Amplifier applied to the confusion effect.
    const AMPLIFIER: u8 = 1;

    pub fn new(duration: u32) -> Self {
        Self {
            info: SpellInfo::new(Self::NAME, "Confuses your target").with_range(20),
            duration,
        }
    }

    pub fn from_tuning(tuning: &ConfundoTuning, ticks_per_second: u32) -> Result<Self, DurationError> {
        Ok(Self::new(parse_duration(&tuning.duration, ticks_per_second)?))
    }
}

impl SpellEffect for Confundo {
    fn info(&self) -> &SpellInfo {
        &self.info
    }

    fn cast(&self, caster: PlayerId, env: &CastEnv<'_>) -> Result<bool, EffectError> {
        match env
            .world
            .nearest_target(caster, self.info.range, self.info.through_walls)
        {
            Some(target @ Target::Player(_)) => {
                env.world.apply_status(
                    target,
                    StatusEffect::new(StatusKind::Confusion, self.duration, Self::AMPLIFIER),
                );
                Ok(true)
            }
            _ => {
                env.notify(caster, "This can only be used on a player.");
                Ok(false)
            }
        }
    }
}
