//! Stupefy: stuns, weakens, knocks back and damages any living target.

use spell_core::{CastEnv, EffectError, PlayerId, SpellEffect, SpellInfo, StatusEffect, StatusKind};

use crate::tuning::{DurationError, StupefyTuning, parse_duration};

pub struct Stupefy {
    info: SpellInfo,
    confusion: u32,
    weakness: u32,
    horizontal_knockback: f64,
    vertical_knockback: f64,
    damage: u32,
}

impl Stupefy {
    pub const NAME: &'static str = "Stupefy";

    const AMPLIFIER: u8 = 1;

    pub fn from_tuning(tuning: &StupefyTuning, ticks_per_second: u32) -> Result<Self, DurationError> {
        Ok(Self {
            info: SpellInfo::new(Self::NAME, "Stuns the target")
                .with_range(50)
                .with_cooldown(60),
            confusion: parse_duration(&tuning.confusion_duration, ticks_per_second)?,
            weakness: parse_duration(&tuning.weakness_duration, ticks_per_second)?,
            horizontal_knockback: tuning.horizontal_knockback,
            vertical_knockback: tuning.vertical_knockback,
            damage: tuning.damage,
        })
    }
}

impl SpellEffect for Stupefy {
    fn info(&self) -> &SpellInfo {
        &self.info
    }

    fn cast(&self, caster: PlayerId, env: &CastEnv<'_>) -> Result<bool, EffectError> {
        let Some(target) = env
            .world
            .nearest_target(caster, self.info.range, self.info.through_walls)
        else {
            env.notify(caster, "This can only be used on a player or a mob.");
            return Ok(false);
        };

        env.world.apply_status(
            target,
            StatusEffect::new(StatusKind::Confusion, self.confusion, Self::AMPLIFIER),
        );
        env.world.apply_status(
            target,
            StatusEffect::new(StatusKind::Weakness, self.weakness, Self::AMPLIFIER),
        );
        env.world.knockback(
            caster,
            target,
            self.horizontal_knockback,
            self.vertical_knockback,
        );
        env.world.damage(target, self.damage);

        Ok(true)
    }
}
