//! Headless spell server entry point.
//!
//! Loads configuration, populates the spell catalog, and runs the spell
//! worker against in-memory host adapters until interrupted.
//!
//! A game server embedding the runtime passes its own [`HostServices`]
//! (permissions, knowledge, inventory, world, messaging) and drives it through
//! [`RuntimeHandle`]. The empty [`MemoryHost`] here is a headless stand-in that
//! only exercises startup and shutdown.
//!
//! [`HostServices`]: spell_runtime::HostServices
//! [`RuntimeHandle`]: spell_runtime::RuntimeHandle
mod bootstrap;
mod config;

use std::path::PathBuf;

use anyhow::Result;
use config::ServerConfig;
use spell_runtime::{MemoryHost, RuntimeEvent, Topic};
use tokio::sync::broadcast::error::RecvError;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let config = ServerConfig::from_env();
    let _guard = setup_logging(&config)?;

    // Headless stand-in; a real host supplies its own adapters here.
    let host = MemoryHost::new();
    let runtime = bootstrap::start_runtime(&config, host.services()).await?;
    let handle = runtime.handle();

    let mut receivers = handle.subscribe_multiple(&Topic::ALL);
    for topic in Topic::ALL {
        if let Some(mut rx) = receivers.remove(&topic) {
            tokio::spawn(async move {
                loop {
                    match rx.recv().await {
                        Ok(event) => log_event(&event),
                        Err(RecvError::Lagged(skipped)) => {
                            tracing::warn!(?topic, skipped, "event logger lagged");
                        }
                        Err(RecvError::Closed) => break,
                    }
                }
            });
        }
    }

    tracing::info!("spell server running; press Ctrl-C to stop");
    tokio::signal::ctrl_c().await?;

    tracing::info!("shutting down");
    runtime.shutdown().await?;
    Ok(())
}

fn log_event(event: &RuntimeEvent) {
    match event {
        RuntimeEvent::CastResolved(cast) => tracing::info!(
            target: "spell::events",
            player = %cast.player,
            spell = %cast.spell,
            outcome = ?cast.outcome,
            tick = %cast.tick,
            "cast resolved"
        ),
        RuntimeEvent::CooldownExpired(expired) => tracing::debug!(
            target: "spell::events",
            player = %expired.player,
            spell = %expired.spell,
            tick = %expired.tick,
            "cooldown expired"
        ),
        RuntimeEvent::SelectionChanged(changed) => tracing::debug!(
            target: "spell::events",
            player = %changed.player,
            spell = %changed.spell,
            index = changed.index,
            "selection changed"
        ),
    }
}

/// Setup logging to both stderr and a per-session file
fn setup_logging(config: &ServerConfig) -> Result<tracing_appender::non_blocking::WorkerGuard> {
    use std::time::{SystemTime, UNIX_EPOCH};

    let log_dir = config.log_dir.clone().unwrap_or_else(log_directory);

    let session_id = config.session_id.clone().unwrap_or_else(|| {
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_secs())
            .unwrap_or_default();
        format!("session_{}", timestamp)
    });

    let session_log_dir = log_dir.join(&session_id);
    std::fs::create_dir_all(&session_log_dir)?;

    let file_appender = tracing_appender::rolling::never(&session_log_dir, "server.log");
    let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(false);
    let stderr_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(stderr_layer)
        .init();

    tracing::info!("Logging initialized: session={}", session_id);
    tracing::info!("Log file: {}/server.log", session_log_dir.display());

    Ok(guard)
}

/// Get the platform-specific log directory
fn log_directory() -> PathBuf {
    directories::ProjectDirs::from("", "", "spell-server")
        .map(|dirs| dirs.cache_dir().join("logs"))
        .unwrap_or_else(|| PathBuf::from("/tmp/spell-server/logs"))
}
