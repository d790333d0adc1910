//! Assembles the runtime from configuration files and built-in content.
use std::sync::Arc;

use anyhow::{Context, Result};
use spell_content::{ConfigLoader, SpellTuning, TuningLoader, builtin_spells};
use spell_core::{SpellCatalog, SpellConfig, SpellObserver};
use spell_runtime::{HostServices, Runtime, RuntimeConfig};

use crate::config::ServerConfig;

/// Loads the engine config file (if any) and applies env overrides on top.
pub fn load_runtime_config(config: &ServerConfig) -> Result<RuntimeConfig> {
    let spell_config = match &config.config_path {
        Some(path) => ConfigLoader::load(path)
            .with_context(|| format!("loading engine config {}", path.display()))?,
        None => SpellConfig::default(),
    };

    Ok(RuntimeConfig {
        spell_config,
        ..config.runtime.clone()
    }
    .with_env_overrides())
}

pub fn load_tuning(config: &ServerConfig) -> Result<SpellTuning> {
    match &config.tuning_path {
        Some(path) => TuningLoader::load(path)
            .with_context(|| format!("loading spell tuning {}", path.display())),
        None => Ok(SpellTuning::default()),
    }
}

/// Registers every built-in spell that instantiates; failed variants are
/// logged and left out.
pub fn build_catalog(
    tuning: &SpellTuning,
    config: &SpellConfig,
) -> (SpellCatalog, Vec<Arc<dyn SpellObserver>>) {
    let mut catalog = SpellCatalog::new();
    let observers = catalog.populate(builtin_spells(tuning, config));
    tracing::info!(
        spells = catalog.len(),
        names = ?catalog.all().map(|spell| spell.name()).collect::<Vec<_>>(),
        "spell catalog populated"
    );
    (catalog, observers)
}

pub async fn start_runtime(config: &ServerConfig, host: HostServices) -> Result<Runtime> {
    let runtime_config = load_runtime_config(config)?;
    let tuning = load_tuning(config)?;
    let (catalog, observers) = build_catalog(&tuning, &runtime_config.spell_config);

    let runtime = Runtime::builder()
        .config(runtime_config)
        .catalog(catalog)
        .observers(observers)
        .host(host)
        .build()
        .await?;
    Ok(runtime)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn missing_paths_fall_back_to_defaults() {
        let config = ServerConfig::default();
        assert_eq!(load_tuning(&config).unwrap(), SpellTuning::default());
        assert!(load_runtime_config(&config).is_ok());
    }

    #[test]
    fn unreadable_config_is_reported_with_path() {
        let config = ServerConfig {
            config_path: Some("/nonexistent/spells.toml".into()),
            ..ServerConfig::default()
        };
        let err = load_runtime_config(&config).unwrap_err();
        assert!(format!("{err:#}").contains("/nonexistent/spells.toml"));
    }

    #[test]
    fn invalid_tuning_drops_only_that_spell() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[confundo]\nduration = \"soon\"").unwrap();
        let config = ServerConfig {
            tuning_path: Some(file.path().to_path_buf()),
            ..ServerConfig::default()
        };

        let tuning = load_tuning(&config).unwrap();
        let (catalog, _) = build_catalog(&tuning, &SpellConfig::default());
        assert!(!catalog.contains("Confundo"));
        assert!(catalog.contains("Stupefy"));
    }

    #[tokio::test]
    async fn runtime_consults_the_supplied_host() {
        use spell_core::{CastOutcome, PlayerId, RejectReason, Target};
        use spell_runtime::{MemoryHost, Sighting};

        let caster = PlayerId(4);
        let host = MemoryHost::new();
        let runtime = start_runtime(&ServerConfig::default(), host.services())
            .await
            .unwrap();
        let handle = runtime.handle();

        assert_eq!(
            handle.cast(caster, "Stupefy").await.unwrap(),
            CastOutcome::Rejected(RejectReason::MissingPermission)
        );

        host.permissions.grant(caster, SpellConfig::CAST_PERMISSION);
        host.inventory.give(caster, SpellConfig::DEFAULT_CASTING_ITEM);
        host.knowledge.teach(caster, "Stupefy");
        host.world
            .set_sighting(caster, Some(Sighting::clear(Target::Creature(9), 5)));
        assert_eq!(
            handle.cast(caster, "Stupefy").await.unwrap(),
            CastOutcome::Succeeded
        );

        runtime.shutdown().await.unwrap();
    }
}
