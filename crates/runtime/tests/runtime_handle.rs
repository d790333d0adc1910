//! Runtime lifecycle through the async handle.

use std::sync::{Arc, Mutex};

use spell_content::{SpellTuning, builtin_spells};
use spell_core::{
    CastEnv, CastOutcome, EffectError, FailReason, PlayerId, PostCastEvent, Spell, SpellCatalog,
    SpellConfig, SpellEffect, SpellInfo, SpellObserver, Target,
};
use spell_runtime::{
    MemoryHost, Runtime, RuntimeConfig, RuntimeError, RuntimeEvent, Sighting, Topic,
};

const CASTER: PlayerId = PlayerId(7);

fn manual_clock() -> RuntimeConfig {
    RuntimeConfig {
        auto_tick: false,
        ..RuntimeConfig::default()
    }
}

fn catalog() -> SpellCatalog {
    let mut catalog = SpellCatalog::new();
    catalog.populate(builtin_spells(
        &SpellTuning::default(),
        &SpellConfig::default(),
    ));
    catalog
}

fn armed_host() -> MemoryHost {
    let host = MemoryHost::new();
    host.permissions.grant(CASTER, SpellConfig::CAST_PERMISSION);
    host.inventory.give(CASTER, SpellConfig::DEFAULT_CASTING_ITEM);
    host.knowledge.teach(CASTER, "Confundo");
    host.knowledge.teach(CASTER, "Stupefy");
    host.world
        .set_sighting(CASTER, Some(Sighting::clear(Target::Creature(3), 12)));
    host
}

async fn start(host: &MemoryHost) -> Runtime {
    Runtime::builder()
        .config(manual_clock())
        .catalog(catalog())
        .host(host.services())
        .build()
        .await
        .expect("runtime should start")
}

#[tokio::test]
async fn build_without_host_fails() {
    let result = Runtime::builder().catalog(catalog()).build().await;
    assert!(matches!(result, Err(RuntimeError::MissingHost)));
}

#[tokio::test]
async fn cast_resolves_and_publishes() {
    let host = armed_host();
    let runtime = start(&host).await;
    let handle = runtime.handle();
    let mut casts = handle.subscribe(Topic::Cast);

    let outcome = handle.cast(CASTER, "stupefy").await.unwrap();
    assert_eq!(outcome, CastOutcome::Succeeded);

    match casts.recv().await.unwrap() {
        RuntimeEvent::CastResolved(resolved) => {
            assert_eq!(resolved.player, CASTER);
            assert_eq!(resolved.spell, "Stupefy");
            assert_eq!(resolved.outcome, CastOutcome::Succeeded);
        }
        other => panic!("unexpected event {other:?}"),
    }

    runtime.shutdown().await.unwrap();
}

#[tokio::test]
async fn manual_advance_expires_cooldown() {
    let host = armed_host();
    let runtime = start(&host).await;
    let handle = runtime.handle();
    let mut expiries = handle.subscribe(Topic::Cooldown);

    assert!(handle.cast(CASTER, "Stupefy").await.unwrap().is_success());
    assert!(!handle.cast(CASTER, "Stupefy").await.unwrap().is_success());

    let now = handle.advance(1200).await.unwrap();
    assert_eq!(now.0, 1200);
    assert_eq!(handle.now().await.unwrap(), now);
    assert!(matches!(
        expiries.recv().await.unwrap(),
        RuntimeEvent::CooldownExpired(_)
    ));

    let listed = handle.list_spells(CASTER).await.unwrap();
    assert!(listed.iter().all(|row| row.cooldown.is_none()));
    assert!(handle.cast(CASTER, "Stupefy").await.unwrap().is_success());

    runtime.shutdown().await.unwrap();
}

#[tokio::test]
async fn selection_round_trip() {
    let host = armed_host();
    let runtime = start(&host).await;
    let handle = runtime.handle();

    assert_eq!(
        handle.current_spell(CASTER).await.unwrap().unwrap().name(),
        "Confundo"
    );
    assert_eq!(handle.select_next(CASTER).await.unwrap().name(), "Stupefy");
    assert_eq!(
        handle.select_previous(CASTER).await.unwrap().name(),
        "Confundo"
    );

    let err = handle.select_by_name(CASTER, "Lumos").await.unwrap_err();
    assert!(matches!(err, RuntimeError::Selection(_)));

    handle.select_by_name(CASTER, "stupefy").await.unwrap();
    assert_eq!(
        handle.cast_selected(CASTER).await.unwrap(),
        Some(CastOutcome::Succeeded)
    );

    let abilities = handle.list_abilities().await.unwrap();
    assert_eq!(abilities.len(), 2);
    assert_eq!(abilities[0].name, "Confundo");

    handle.player_quit(CASTER).await.unwrap();
    assert_eq!(
        handle.current_spell(CASTER).await.unwrap().unwrap().name(),
        "Confundo"
    );

    runtime.shutdown().await.unwrap();
}

#[derive(Default)]
struct Tally(Mutex<Vec<bool>>);

impl SpellObserver for Tally {
    fn name(&self) -> &'static str {
        "tally"
    }

    fn on_post_cast(&self, event: &PostCastEvent) {
        self.0.lock().unwrap().push(event.successful);
    }
}

#[tokio::test]
async fn observers_and_config_can_change_while_running() {
    let host = armed_host();
    let runtime = start(&host).await;
    let handle = runtime.handle();
    let tally = Arc::new(Tally::default());

    handle.register_observer(tally.clone()).await.unwrap();
    handle
        .reload_config(SpellConfig::default().with_particle_feedback(false))
        .await
        .unwrap();
    host.world.take_effects();

    handle.cast(CASTER, "Confundo").await.unwrap();
    handle.cast(CASTER, "Stupefy").await.unwrap();

    assert_eq!(*tally.0.lock().unwrap(), [false, true]);
    assert!(
        host.world
            .take_effects()
            .iter()
            .all(|effect| !matches!(effect, spell_runtime::WorldEffect::CastEffect { .. }))
    );

    runtime.shutdown().await.unwrap();
}

struct Backfire(SpellInfo);

impl SpellEffect for Backfire {
    fn info(&self) -> &SpellInfo {
        &self.0
    }

    fn cast(&self, _caster: PlayerId, _env: &CastEnv<'_>) -> Result<bool, EffectError> {
        panic!("wand snapped")
    }
}

#[tokio::test]
async fn panicking_spell_leaves_worker_running() {
    let host = armed_host();
    host.knowledge.teach(CASTER, "Backfire");
    let mut catalog = catalog();
    catalog.register(Spell::new(Arc::new(Backfire(SpellInfo::new(
        "Backfire",
        "Always explodes",
    )))));
    let runtime = Runtime::builder()
        .config(manual_clock())
        .catalog(catalog)
        .host(host.services())
        .build()
        .await
        .unwrap();
    let handle = runtime.handle();

    assert_eq!(
        handle.cast(CASTER, "Backfire").await.unwrap(),
        CastOutcome::Failed(FailReason::EffectError)
    );
    assert_eq!(
        handle.cast(CASTER, "Stupefy").await.unwrap(),
        CastOutcome::Succeeded
    );

    runtime.shutdown().await.unwrap();
}

#[tokio::test]
async fn handle_fails_after_shutdown() {
    let host = armed_host();
    let runtime = start(&host).await;
    let handle = runtime.handle();

    runtime.shutdown().await.unwrap();

    assert!(matches!(
        handle.cast(CASTER, "Confundo").await,
        Err(RuntimeError::CommandChannelClosed)
    ));
}

#[tokio::test(start_paused = true)]
async fn timer_drives_the_clock() {
    let host = armed_host();
    let runtime = Runtime::builder()
        .catalog(catalog())
        .host(host.services())
        .build()
        .await
        .unwrap();
    let handle = runtime.handle();

    tokio::time::sleep(std::time::Duration::from_millis(1000)).await;
    let now = handle.now().await.unwrap();
    assert!(now.0 >= 19, "clock only reached {now}");

    runtime.shutdown().await.unwrap();
}
