//! Runs one game session and reports progress.
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tokio::sync::broadcast::error::RecvError;
use tokio::time::{Instant, interval_at, sleep_until};
use tracing::{info, warn};

use game_content::{ContentFactory, ContentCatalog, LootTable};
use game_core::GameState;
use runtime::{
    Event, FileSaveRepository, LootOracleImpl, OracleManager, ProgressionEvent, RandomSpawner,
    Runtime, RuntimeConfig, SaveRepository, Topic,
};

use crate::autopilot;
use crate::config::ClientConfig;

pub async fn run(config: ClientConfig) -> Result<()> {
    let catalog = match &config.content_dir {
        Some(dir) => ContentFactory::new(dir)
            .load_catalog()
            .with_context(|| format!("failed to load content from {}", dir.display()))?,
        None => ContentCatalog::builtin(),
    };
    info!(
        skills = catalog.skills.len(),
        supports = catalog.supports.len(),
        passives = catalog.passive_tree.nodes.len(),
        "content loaded"
    );

    let loot = match config.seed {
        Some(seed) => LootOracleImpl::seeded(LootTable::default(), seed),
        None => LootOracleImpl::from_entropy(LootTable::default()),
    };
    let spawner = match config.seed {
        Some(seed) => RandomSpawner::seeded(seed.wrapping_add(1)),
        None => RandomSpawner::from_entropy(),
    };

    let repository = Arc::new(
        FileSaveRepository::new(&config.save_dir, config.session_id.as_str())
            .context("failed to open save directory")?,
    );
    if config.fresh {
        repository.clear().context("failed to delete old save")?;
        info!("starting a fresh game");
    }

    let runtime = Runtime::builder()
        .config(RuntimeConfig {
            persist_on_mutation: config.persist,
            ..RuntimeConfig::default()
        })
        .oracles(OracleManager::from_content(catalog, loot))
        .repository(repository.clone())
        .spawner(spawner)
        .build()
        .await
        .context("failed to start runtime")?;
    info!(save = %repository.path().display(), "session running");

    let outcome = drive(&runtime, &config).await;
    let final_state = runtime.handle().query_state().await;
    runtime.shutdown().await.context("runtime shutdown failed")?;

    if let Ok(state) = final_state {
        report(&state);
    }
    outcome
}

const AUTOPILOT_PERIOD: Duration = Duration::from_millis(500);

/// Streams progression events and periodic reports until the session ends.
async fn drive(runtime: &Runtime, config: &ClientConfig) -> Result<()> {
    let handle = runtime.handle();
    let mut progression = runtime.subscribe(Topic::Progression);
    let mut reports = interval_at(Instant::now() + config.report_every, config.report_every);
    let mut moves = interval_at(Instant::now() + AUTOPILOT_PERIOD, AUTOPILOT_PERIOD);
    let deadline = wait_until(config.run_for.map(|duration| Instant::now() + duration));
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(deadline, ctrl_c);

    loop {
        tokio::select! {
            _ = &mut ctrl_c => {
                info!("interrupted");
                return Ok(());
            }
            _ = &mut deadline => {
                info!("run time elapsed");
                return Ok(());
            }
            _ = reports.tick() => {
                let state = handle.query_state().await?;
                report(&state);
            }
            _ = moves.tick(), if config.autopilot => {
                let state = handle.query_state().await?;
                for action in autopilot::plan(&state) {
                    handle.enqueue(action).await?;
                }
            }
            event = progression.recv() => match event {
                Ok(Event::Progression(event)) => announce(&event),
                Ok(_) => {}
                Err(RecvError::Lagged(missed)) => warn!(missed, "progression events dropped"),
                Err(RecvError::Closed) => return Ok(()),
            }
        }
    }
}

async fn wait_until(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}

fn announce(event: &ProgressionEvent) {
    match event {
        ProgressionEvent::LevelUp {
            level,
            levels_gained,
        } => info!("Level up! Now level {level} (+{levels_gained})"),
        ProgressionEvent::EnemiesDefeated { count, bosses, xp } if *bosses > 0 => {
            info!("Defeated {count} enemies including {bosses} boss(es) for {xp} xp")
        }
        ProgressionEvent::EnemiesDefeated { .. } => {}
        ProgressionEvent::LootConverted { items, gold } => {
            info!("Inventory full: {items} item(s) converted to {gold} gold")
        }
    }
}

fn report(state: &GameState) {
    let player = &state.player;
    info!(
        level = player.level,
        xp = player.xp,
        next = player.next_level_xp,
        hp = %format!("{:.0}/{:.0}", player.hp, player.max_hp),
        mana = %format!("{:.0}/{:.0}", player.mana, player.max_mana),
        gold = player.gold,
        skill_points = player.skill_points,
        enemies = state.living_enemies().count(),
        inventory = state.inventory.len(),
        "progress"
    );
}
