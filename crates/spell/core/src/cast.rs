//! Cast attempt orchestration.
//!
//! A single attempt flows through:
//! 1. Eligibility gate (permission, knowledge, casting item) → `Rejected`
//! 2. Cosmetic cast effect (config-gated, never affects the outcome)
//! 3. Pre-cast event → `Cancelled` if still vetoed after every observer ran
//! 4. Cooldown gate (blocked attempts still emit the post-cast event)
//! 5. Effect invocation
//! 6. Post-cast event
//! 7. Cooldown commit and deferred expiry
//!
//! Gameplay edge cases are outcomes, not errors: [`CastPipeline::cast`] always
//! returns a [`CastOutcome`].

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use tracing::{debug, error};

use crate::config::SpellConfig;
use crate::cooldown::CooldownTracker;
use crate::env::{CastEnv, Scheduler};
use crate::error::SpellError;
use crate::event::{ObserverRegistry, PostCastEvent, PreCastEvent};
use crate::spell::Spell;
use crate::state::PlayerId;

/// Terminal state of a cast attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CastOutcome {
    /// Stopped at the eligibility gate; no events were emitted.
    Rejected(RejectReason),
    /// A pre-cast observer vetoed the attempt; no post-cast event, no cooldown.
    Cancelled,
    /// The post-cast event fired with `successful = false`.
    Failed(FailReason),
    Succeeded,
}

impl CastOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, CastOutcome::Succeeded)
    }

    /// Short label for logs and metrics.
    pub const fn as_str(&self) -> &'static str {
        match self {
            CastOutcome::Rejected(_) => "rejected",
            CastOutcome::Cancelled => "cancelled",
            CastOutcome::Failed(_) => "failed",
            CastOutcome::Succeeded => "succeeded",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum RejectReason {
    /// The name does not resolve to a registered spell.
    UnknownSpell,
    MissingPermission,
    UnknownToPlayer,
    MissingCastingItem,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FailReason {
    /// The cooldown gate blocked the attempt; `remaining` is the stored value.
    OnCooldown { remaining: u32 },
    /// The effect ran and reported failure (e.g. no valid target).
    NoEffect,
    /// The effect returned an unexpected error.
    EffectError,
}

/// Runs cast attempts against borrowed engine state.
pub struct CastPipeline<'a> {
    cooldowns: &'a mut CooldownTracker,
    observers: &'a ObserverRegistry,
    config: &'a SpellConfig,
}

impl<'a> CastPipeline<'a> {
    pub fn new(
        cooldowns: &'a mut CooldownTracker,
        observers: &'a ObserverRegistry,
        config: &'a SpellConfig,
    ) -> Self {
        Self {
            cooldowns,
            observers,
            config,
        }
    }

    /// Runs one attempt by `player` to cast `spell` to a terminal outcome.
    pub fn cast(
        &mut self,
        env: &CastEnv<'_>,
        scheduler: &mut dyn Scheduler,
        player: PlayerId,
        spell: &Spell,
    ) -> CastOutcome {
        // 1. Eligibility gate
        if let Err(reason) = self.check_eligibility(env, player, spell) {
            debug!(target: "spell::cast", %player, %spell, %reason, "cast rejected");
            return CastOutcome::Rejected(reason);
        }

        // 2. Cosmetic feedback
        if self.config.particle_feedback {
            env.world.play_cast_effect(player);
        }

        // 3. Pre-cast event
        let mut pre = PreCastEvent::new(spell.clone(), player);
        if self.observers.dispatch_pre(&mut pre) {
            debug!(target: "spell::cast", %player, %spell, "cast cancelled by observer");
            return CastOutcome::Cancelled;
        }

        // 4. Cooldown gate
        let blocked = if is_cooldown_exempt(env, player) {
            None
        } else {
            self.cooldowns.get(player, spell)
        };
        if let Some(remaining) = blocked {
            env.notify(player, &self.config.render_cooldown_notice(remaining));
        }

        // 5. Effect invocation
        let outcome = match blocked {
            Some(remaining) => CastOutcome::Failed(FailReason::OnCooldown { remaining }),
            None => match panic::catch_unwind(AssertUnwindSafe(|| spell.cast(player, env))) {
                Ok(Ok(true)) => CastOutcome::Succeeded,
                Ok(Ok(false)) => CastOutcome::Failed(FailReason::NoEffect),
                Ok(Err(err)) => {
                    error!(
                        target: "spell::cast",
                        %player,
                        %spell,
                        code = err.error_code(),
                        error = %err,
                        "spell effect failed unexpectedly"
                    );
                    CastOutcome::Failed(FailReason::EffectError)
                }
                Err(payload) => {
                    error!(
                        target: "spell::cast",
                        %player,
                        %spell,
                        panic = panic_message(payload.as_ref()),
                        "spell effect panicked"
                    );
                    CastOutcome::Failed(FailReason::EffectError)
                }
            },
        };

        // 6. Post-cast event
        self.observers.dispatch_post(&PostCastEvent::new(
            spell.clone(),
            player,
            outcome.is_success(),
        ));

        // 7. Cooldown commit (exemption re-checked: it may have changed mid-cast)
        if outcome.is_success() && !is_cooldown_exempt(env, player) {
            let seconds = spell.cooldown_for(player);
            if seconds > 0 {
                let delay = self.config.cooldown_ticks(seconds).max(1);
                self.cooldowns
                    .start(player, spell, seconds, delay, scheduler);
            }
        }

        debug!(target: "spell::cast", %player, %spell, outcome = outcome.as_str(), "cast resolved");
        outcome
    }

    fn check_eligibility(
        &self,
        env: &CastEnv<'_>,
        player: PlayerId,
        spell: &Spell,
    ) -> Result<(), RejectReason> {
        if !env
            .permissions
            .has_permission(player, SpellConfig::CAST_PERMISSION)
        {
            return Err(RejectReason::MissingPermission);
        }

        let known = env.knowledge.known_spells(player);
        if !known.iter().any(|name| spell.is_named(name)) {
            return Err(RejectReason::UnknownToPlayer);
        }

        if !env.inventory.has_item(player, &self.config.casting_item) {
            return Err(RejectReason::MissingCastingItem);
        }

        Ok(())
    }
}

/// Either form of the no-cooldown grant exempts the player.
pub fn is_cooldown_exempt(env: &CastEnv<'_>, player: PlayerId) -> bool {
    env.permissions
        .has_permission(player, SpellConfig::NO_COOLDOWN_PERMISSION)
        || env
            .permissions
            .has_permission(player, SpellConfig::NO_COOLDOWN_WILDCARD)
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("non-string panic payload")
}
