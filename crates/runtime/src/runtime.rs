//! High-level runtime orchestrator.
//!
//! The runtime owns the spell worker, wires up command/event channels, and
//! exposes a builder-based API for hosts to drive casting.

use std::env;
use std::sync::Arc;

use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;

use spell_core::{ObserverRegistry, SpellCatalog, SpellConfig, SpellObserver};

use crate::api::{Result, RuntimeError, RuntimeHandle};
use crate::events::{EventBus, RuntimeEvent, Topic};
use crate::oracle::HostServices;
use crate::service::SpellService;
use crate::workers::{Command, SpellWorker};

/// Runtime configuration shared across the orchestrator and workers.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub spell_config: SpellConfig,
    pub event_buffer_size: usize,
    pub command_buffer_size: usize,
    /// Advance the tick clock on a timer (default: true). When disabled the
    /// clock only moves through [`RuntimeHandle::advance`].
    pub auto_tick: bool,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            spell_config: SpellConfig::default(),
            event_buffer_size: 100,
            command_buffer_size: 32,
            auto_tick: true,
        }
    }
}

impl RuntimeConfig {
    /// Construct configuration from process environment variables.
    ///
    /// See [`Self::with_env_overrides`] for the variables read.
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    /// Apply process environment variables on top of this configuration.
    ///
    /// Environment variables:
    /// - `SPELL_TICKS_PER_SECOND` - Host tick rate (default: 20)
    /// - `SPELL_PARTICLES` - Cosmetic cast effect (default: true)
    /// - `SPELL_COMMAND_BUFFER` - Worker command queue size (default: 32)
    /// - `SPELL_EVENT_BUFFER` - Per-topic event capacity (default: 100)
    /// - `SPELL_AUTO_TICK` - Timer-driven clock (default: true)
    pub fn with_env_overrides(mut self) -> Self {
        if let Some(rate) = read_env::<u32>("SPELL_TICKS_PER_SECOND") {
            self.spell_config = self.spell_config.with_ticks_per_second(rate);
        }

        if let Some(enabled) = read_env::<bool>("SPELL_PARTICLES") {
            self.spell_config.particle_feedback = enabled;
        }

        if let Some(capacity) = read_env::<usize>("SPELL_COMMAND_BUFFER") {
            self.command_buffer_size = capacity.max(1);
        }

        if let Some(capacity) = read_env::<usize>("SPELL_EVENT_BUFFER") {
            self.event_buffer_size = capacity.max(1);
        }

        if let Some(enabled) = read_env::<bool>("SPELL_AUTO_TICK") {
            self.auto_tick = enabled;
        }

        self
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}

/// Main runtime that orchestrates spell casting
///
/// Runtime owns the worker task; [`RuntimeHandle`] provides a cloneable
/// façade for hosts.
pub struct Runtime {
    handle: RuntimeHandle,
    worker_handle: JoinHandle<()>,
}

impl Runtime {
    /// Create a new runtime builder
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    /// Get a cloneable handle to this runtime
    ///
    /// The handle can be shared across clients and async tasks.
    pub fn handle(&self) -> RuntimeHandle {
        self.handle.clone()
    }

    /// Subscribe to runtime events of one topic
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<RuntimeEvent> {
        self.handle.subscribe(topic)
    }

    /// Stop the worker and wait for it to finish
    ///
    /// Commands already queued are applied first. Outstanding handles fail
    /// with [`RuntimeError::CommandChannelClosed`] afterwards.
    pub async fn shutdown(self) -> Result<()> {
        self.handle.shutdown().await?;
        self.worker_handle
            .await
            .map_err(RuntimeError::WorkerJoin)?;
        Ok(())
    }
}

/// Builder for [`Runtime`] with flexible configuration.
pub struct RuntimeBuilder {
    config: RuntimeConfig,
    catalog: SpellCatalog,
    observers: ObserverRegistry,
    host: Option<HostServices>,
}

impl RuntimeBuilder {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            catalog: SpellCatalog::new(),
            observers: ObserverRegistry::new(),
            host: None,
        }
    }

    /// Override runtime configuration
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Provide the populated spell catalog
    pub fn catalog(mut self, catalog: SpellCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    /// Register a cast observer; observers run in registration order
    pub fn observer(mut self, observer: Arc<dyn SpellObserver>) -> Self {
        self.observers.register(observer);
        self
    }

    /// Register several cast observers, e.g. the ones returned by
    /// [`SpellCatalog::populate`]
    pub fn observers(mut self, observers: impl IntoIterator<Item = Arc<dyn SpellObserver>>) -> Self {
        for observer in observers {
            self.observers.register(observer);
        }
        self
    }

    /// Set required host services
    pub fn host(mut self, host: HostServices) -> Self {
        self.host = Some(host);
        self
    }

    /// Spawn the spell worker and return the running runtime
    ///
    /// Must be called from within a tokio runtime.
    pub async fn build(self) -> Result<Runtime> {
        let host = self.host.ok_or(RuntimeError::MissingHost)?;

        let event_bus = EventBus::with_capacity(self.config.event_buffer_size);
        let (command_tx, command_rx) =
            mpsc::channel::<Command>(self.config.command_buffer_size.max(1));

        let service = SpellService::new(
            self.catalog,
            self.observers,
            self.config.spell_config,
            host,
            event_bus.clone(),
        );
        let worker = SpellWorker::new(service, command_rx, self.config.auto_tick);
        let worker_handle = tokio::spawn(worker.run());

        Ok(Runtime {
            handle: RuntimeHandle::new(command_tx, event_bus),
            worker_handle,
        })
    }
}
