//! Spell tuning loader.

use std::path::Path;

use crate::loaders::{LoadResult, read_file};
use crate::tuning::SpellTuning;

/// Loader for [`SpellTuning`] from TOML files.
pub struct TuningLoader;

impl TuningLoader {
    /// Load tuning from a TOML file with one table per spell.
    ///
    /// Durations are validated when the spells are instantiated, so a bad
    /// value disables only the spell that uses it.
    pub fn load(path: &Path) -> LoadResult<SpellTuning> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<SpellTuning> {
        toml::from_str(content).map_err(|e| anyhow::anyhow!("Failed to parse tuning TOML: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shipped_tuning_matches_defaults() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("data/spells.toml");
        assert_eq!(TuningLoader::load(&path).unwrap(), SpellTuning::default());
    }

    #[test]
    fn reads_kebab_case_tables() {
        let tuning = TuningLoader::parse(
            r#"
            [confundo]
            duration = "40t"

            [stupefy]
            damage = 4
            confusion-duration = "3"
            "#,
        )
        .unwrap();

        assert_eq!(tuning.confundo.duration, "40t");
        assert_eq!(tuning.stupefy.damage, 4);
        assert_eq!(tuning.stupefy.confusion_duration, "3");
        assert_eq!(tuning.stupefy.weakness_duration, "10");
    }
}
