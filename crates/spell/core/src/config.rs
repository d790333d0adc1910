/// Engine configuration and permission node names.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SpellConfig {
    /// Play a cosmetic world effect at the caster on every eligible cast.
    pub particle_feedback: bool,

    /// Host ticks per second; converts declared cooldowns into scheduler delays.
    pub ticks_per_second: u32,

    /// Item the caster must carry for a cast to be eligible.
    pub casting_item: String,

    /// Notice sent while a spell is still cooling down. `{remaining}` is
    /// replaced with the stored cooldown value.
    pub cooldown_notice: String,
}

impl SpellConfig {
    /// Grant required to cast anything.
    pub const CAST_PERMISSION: &'static str = "spells.use";
    /// Grant exempting the holder from cooldowns.
    pub const NO_COOLDOWN_PERMISSION: &'static str = "spells.nocooldown";
    /// Wildcard form of [`Self::NO_COOLDOWN_PERMISSION`].
    pub const NO_COOLDOWN_WILDCARD: &'static str = "spells.nocooldown.*";

    pub const DEFAULT_TICKS_PER_SECOND: u32 = 20;
    pub const DEFAULT_CASTING_ITEM: &'static str = "stick";
    pub const DEFAULT_COOLDOWN_NOTICE: &'static str =
        "You must wait {remaining} seconds before casting that spell again.";

    pub fn new() -> Self {
        Self {
            particle_feedback: true,
            ticks_per_second: Self::DEFAULT_TICKS_PER_SECOND,
            casting_item: Self::DEFAULT_CASTING_ITEM.to_owned(),
            cooldown_notice: Self::DEFAULT_COOLDOWN_NOTICE.to_owned(),
        }
    }

    pub fn with_particle_feedback(mut self, enabled: bool) -> Self {
        self.particle_feedback = enabled;
        self
    }

    pub fn with_ticks_per_second(mut self, ticks_per_second: u32) -> Self {
        self.ticks_per_second = ticks_per_second.max(1);
        self
    }

    /// Converts a cooldown in seconds into host ticks.
    pub fn cooldown_ticks(&self, seconds: u32) -> u64 {
        u64::from(seconds) * u64::from(self.ticks_per_second.max(1))
    }

    /// Renders the cooldown notice for the given remaining value.
    pub fn render_cooldown_notice(&self, remaining: u32) -> String {
        self.cooldown_notice
            .replace("{remaining}", &remaining.to_string())
    }
}

impl Default for SpellConfig {
    fn default() -> Self {
        Self::new()
    }
}
