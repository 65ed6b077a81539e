//! Save loading at startup and the file repository.
use std::fs;
use std::sync::Arc;

use game_core::{Action, GameConfig, GameState, Player, SaveSnapshot, SkillId};
use runtime::{
    CatalogOracleImpl, Event, FileSaveRepository, GameStateEvent, InMemorySaveRepository,
    OracleManager, RepositoryError, Runtime, RuntimeConfig, RuntimeError, SaveEnvelope,
    SaveRepository, Topic,
};

fn manual_config() -> RuntimeConfig {
    RuntimeConfig {
        enable_timers: false,
        ..RuntimeConfig::default()
    }
}

async fn start(repo: Arc<dyn SaveRepository>) -> runtime::Result<Runtime> {
    Runtime::builder()
        .config(manual_config())
        .oracles(OracleManager::builtin())
        .repository(repo)
        .build()
        .await
}

#[tokio::test]
async fn stored_save_is_loaded_and_repaired() {
    let snapshot = SaveSnapshot {
        player: Some(Player {
            level: 7,
            gold: 250,
            ..Player::default()
        }),
        ..SaveSnapshot::default()
    };
    let repo = Arc::new(InMemorySaveRepository::with_snapshot(snapshot));
    let runtime = start(repo.clone()).await.unwrap();

    let state = runtime.handle().query_state().await.unwrap();
    assert_eq!(state.player.level, 7);
    assert_eq!(state.player.gold, 250);
    assert_eq!(state.log.latest(), Some("Game loaded"));
    // the catalog is backfilled into a save without gems
    assert!(state.player.skill(&SkillId::from("fireball")).is_some());
    assert_eq!(state.player.skill_bar.slots().len(), 6);

    runtime.shutdown().await.unwrap();
}

#[tokio::test]
async fn load_can_be_disabled() {
    let snapshot = SaveSnapshot {
        player: Some(Player {
            level: 9,
            ..Player::default()
        }),
        ..SaveSnapshot::default()
    };
    let runtime = Runtime::builder()
        .config(RuntimeConfig {
            load_on_start: false,
            ..manual_config()
        })
        .oracles(OracleManager::builtin())
        .repository(Arc::new(InMemorySaveRepository::with_snapshot(snapshot)))
        .build()
        .await
        .unwrap();

    assert_eq!(runtime.handle().query_state().await.unwrap().player.level, 1);
    runtime.shutdown().await.unwrap();
}

#[tokio::test]
async fn file_repository_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    let repo = Arc::new(FileSaveRepository::new(dir.path(), "hero").unwrap());

    let runtime = start(repo.clone()).await.unwrap();
    runtime
        .handle()
        .dispatch(Action::UnlockSkillGem(SkillId::from("whirlwind")))
        .await
        .unwrap();
    runtime.shutdown().await.unwrap();
    assert!(repo.path().exists());

    let reopened = Arc::new(FileSaveRepository::new(dir.path(), "hero").unwrap());
    let runtime = start(reopened).await.unwrap();
    let state = runtime.handle().query_state().await.unwrap();
    assert!(
        state
            .player
            .skill(&SkillId::from("whirlwind"))
            .is_some_and(|gem| gem.is_unlocked)
    );
    runtime.shutdown().await.unwrap();
}

#[test]
fn missing_file_loads_as_none() {
    let dir = tempfile::tempdir().unwrap();
    let repo = FileSaveRepository::new(dir.path().join("nested"), "fresh").unwrap();
    assert!(repo.load_save().unwrap().is_none());
    repo.clear().unwrap();
}

#[test]
fn save_then_clear() {
    let dir = tempfile::tempdir().unwrap();
    let repo = FileSaveRepository::new(dir.path(), "slot").unwrap();
    repo.save_state(&SaveSnapshot::default()).unwrap();
    assert_eq!(repo.load_save().unwrap(), Some(SaveSnapshot::default()));
    assert!(!repo.path().with_extension("json.tmp").exists());

    repo.clear().unwrap();
    assert!(repo.load_save().unwrap().is_none());
}

#[tokio::test]
async fn corrupt_save_fails_the_build() {
    let dir = tempfile::tempdir().unwrap();
    let repo = FileSaveRepository::new(dir.path(), "broken").unwrap();
    fs::write(repo.path(), b"{ not json").unwrap();

    let result = start(Arc::new(repo)).await;
    assert!(matches!(
        result,
        Err(RuntimeError::Repository(RepositoryError::CorruptedData { .. }))
    ));
}

#[tokio::test]
async fn queued_saves_are_written_in_order_before_shutdown_returns() {
    let repo = Arc::new(InMemorySaveRepository::new());
    let runtime = start(repo.clone()).await.unwrap();
    let handle = runtime.handle();

    for _ in 0..5 {
        handle.enqueue(Action::ToggleAuto).await.unwrap();
    }
    let last = handle.query_state().await.unwrap();
    runtime.shutdown().await.unwrap();

    assert_eq!(repo.save_count(), 5);
    assert_eq!(repo.load_save().unwrap(), Some(SaveSnapshot::capture(&last)));
}

struct ReadOnlyRepository;

impl SaveRepository for ReadOnlyRepository {
    fn load_save(&self) -> Result<Option<SaveSnapshot>, RepositoryError> {
        Ok(None)
    }

    fn save_state(&self, _: &SaveSnapshot) -> Result<(), RepositoryError> {
        Err(RepositoryError::Io(std::io::Error::other("read-only medium")))
    }

    fn clear(&self) -> Result<(), RepositoryError> {
        Ok(())
    }
}

#[tokio::test]
async fn failed_save_is_reported_and_play_continues() {
    let runtime = start(Arc::new(ReadOnlyRepository)).await.unwrap();
    let handle = runtime.handle();
    let mut events = handle.subscribe(Topic::GameState);

    let receipt = handle.dispatch(Action::ToggleAuto).await.unwrap();
    assert!(!receipt.persisted);

    let error = loop {
        match events.recv().await.unwrap() {
            Event::GameState(GameStateEvent::PersistFailed { error }) => break error,
            _ => continue,
        }
    };
    assert!(error.contains("read-only medium"), "{error}");

    let receipt = handle.dispatch(Action::ToggleAuto).await.unwrap();
    assert_eq!(receipt.kind, game_core::ActionKind::ToggleAuto);
    runtime.shutdown().await.unwrap();
}

#[tokio::test]
async fn save_with_overfull_support_list_still_loads() {
    let dir = tempfile::tempdir().unwrap();
    let repo = FileSaveRepository::new(dir.path(), "overfull").unwrap();

    let mut state = GameState::new_game(&CatalogOracleImpl::default());
    state.player.level = 4;
    let mut json = serde_json::to_value(SaveEnvelope::new(SaveSnapshot::capture(&state))).unwrap();
    let supports: Vec<String> = state
        .player
        .support_gems
        .iter()
        .take(7)
        .map(|gem| gem.id.to_string())
        .collect();
    assert_eq!(supports.len(), 7);
    json["snapshot"]["skills"]["skill_gems"][0]["supports"] = serde_json::json!(supports);
    fs::write(repo.path(), serde_json::to_vec(&json).unwrap()).unwrap();

    let runtime = start(Arc::new(repo)).await.unwrap();
    let loaded = runtime.handle().query_state().await.unwrap();
    assert_eq!(loaded.player.level, 4);
    let first = loaded.player.skill_gems.iter().next().unwrap();
    assert_eq!(first.supports.len(), GameConfig::MAX_SUPPORTS_PER_SKILL);
    runtime.shutdown().await.unwrap();
}
