//! Server configuration read from the process environment.
use std::env;
use std::path::PathBuf;

use spell_runtime::RuntimeConfig;

/// Everything the composition root needs before the runtime starts.
#[derive(Clone, Debug, Default)]
pub struct ServerConfig {
    pub runtime: RuntimeConfig,
    /// Engine config TOML; built-in defaults when unset.
    pub config_path: Option<PathBuf>,
    /// Spell tuning TOML; built-in defaults when unset.
    pub tuning_path: Option<PathBuf>,
    /// Overrides the platform log directory.
    pub log_dir: Option<PathBuf>,
    pub session_id: Option<String>,
}

impl ServerConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `SPELL_CONFIG_PATH` - Engine config file (default: built-in)
    /// - `SPELL_TUNING_PATH` - Spell tuning file (default: built-in)
    /// - `SPELL_LOG_DIR` - Log directory (default: platform cache dir)
    /// - `SPELL_SESSION_ID` - Log session name (default: timestamp)
    ///
    /// Runtime variables are documented on [`RuntimeConfig::with_env_overrides`];
    /// they are applied after the config file is loaded.
    pub fn from_env() -> Self {
        Self {
            runtime: RuntimeConfig::default(),
            config_path: env::var_os("SPELL_CONFIG_PATH").map(PathBuf::from),
            tuning_path: env::var_os("SPELL_TUNING_PATH").map(PathBuf::from),
            log_dir: env::var_os("SPELL_LOG_DIR").map(PathBuf::from),
            session_id: env::var("SPELL_SESSION_ID").ok(),
        }
    }
}
