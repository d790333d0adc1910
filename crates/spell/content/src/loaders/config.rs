//! Engine configuration loader.

use std::path::Path;

use spell_core::SpellConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for [`SpellConfig`] from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file.
    ///
    /// Missing keys fall back to [`SpellConfig::default`].
    pub fn load(path: &Path) -> LoadResult<SpellConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<SpellConfig> {
        let config: SpellConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;

        if config.ticks_per_second == 0 {
            anyhow::bail!("ticks_per_second must be positive");
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "particle_feedback = false\ncasting_item = \"wand\"").unwrap();

        let config = ConfigLoader::load(file.path()).unwrap();
        assert!(!config.particle_feedback);
        assert_eq!(config.casting_item, "wand");
        assert_eq!(config.ticks_per_second, SpellConfig::DEFAULT_TICKS_PER_SECOND);
    }

    #[test]
    fn shipped_config_matches_defaults() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("data/config.toml");
        assert_eq!(ConfigLoader::load(&path).unwrap(), SpellConfig::default());
    }

    #[test]
    fn zero_tick_rate_is_rejected() {
        assert!(ConfigLoader::parse("ticks_per_second = 0").is_err());
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(ConfigLoader::load(&dir.path().join("absent.toml")).is_err());
    }
}
