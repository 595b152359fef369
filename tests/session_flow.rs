//! End-to-end sessions driven through the effectful shell.

use chainle::core::{Chain, Command, Outcome, Rejection, Status};
use chainle::effects::{
    GameEnv, JsonFileChainSource, Rollover, Session, SessionLoad, StaticChainSource,
};
use chainle::persistence::{FileStore, MemoryStore, SnapshotFormat, SnapshotStore};
use chainle::{GameConfig, MAX_GUESSES};
use chrono::NaiveDate;
use std::sync::Arc;
use std::time::Duration;

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, d).unwrap()
}

fn source() -> StaticChainSource {
    StaticChainSource::new()
        .with_chain(day(1), Chain::new(["BOARD", "BOAT", "GOAT", "COATS"]).unwrap())
        .with_chain(day(2), Chain::new(["sun", "flower", "pot", "luck"]).unwrap())
}

fn config() -> GameConfig {
    GameConfig::default().with_reveal_delay(Duration::from_millis(1))
}

fn game_env(store: Arc<dyn SnapshotStore>, config: GameConfig) -> GameEnv {
    GameEnv::new(Arc::new(source()), store, config).unwrap()
}

async fn open(env: &GameEnv, date: NaiveDate) -> Session {
    match Session::open(env, date).await {
        SessionLoad::Ready(session) => session,
        SessionLoad::Unavailable { date } => panic!("no chain for {date}"),
    }
}

fn set(index: usize, text: &str) -> Command {
    Command::SetLetters {
        index,
        text: text.to_string(),
    }
}

#[tokio::test]
async fn win_after_revealing_hints() {
    let env = game_env(Arc::new(MemoryStore::new()), config());
    let mut session = open(&env, day(1)).await;

    // Three hints show all of "boat"; the last word is typed.
    for _ in 0..3 {
        session.dispatch(&env, Command::ConfirmGuess).await;
        session.dispatch(&env, Command::SelectHint { index: 1 }).await;
    }
    assert_eq!(session.view().current_chain[1], "boat");
    assert!(!session.view().solved_by_index[1]);

    session.dispatch(&env, set(2, "goat")).await;
    session.dispatch(&env, Command::ConfirmGuess).await;

    let view = session.view();
    assert_eq!(session.game().status(), Status::Winner);
    assert_eq!(view.current_chain, ["board", "boat", "goat", "coats"]);
    assert_eq!(view.solved_by_index, [true, true, true, true]);
    assert_eq!(view.guesses_remaining, 1);
}

#[tokio::test]
async fn win_by_typing_the_chain() {
    let env = game_env(Arc::new(MemoryStore::new()), config());
    let mut session = open(&env, day(1)).await;

    session.dispatch(&env, set(1, "boat")).await;
    session.dispatch(&env, set(2, "Goat")).await;
    session.dispatch(&env, Command::ConfirmGuess).await;

    assert_eq!(session.game().status(), Status::Winner);
    assert_eq!(
        session.game().user_guesses(),
        [vec!["board", "boat", "goat", "coats"]]
    );
}

#[tokio::test]
async fn five_misses_lose() {
    let env = game_env(Arc::new(MemoryStore::new()), config());
    let mut session = open(&env, day(1)).await;

    for round in 0..MAX_GUESSES {
        assert_eq!(session.game().status(), Status::Guessing);
        session.dispatch(&env, set(2, "gxxx")).await;
        session.dispatch(&env, Command::ConfirmGuess).await;
        if round + 1 < MAX_GUESSES {
            let index = 1 + round % 2;
            session.dispatch(&env, Command::SelectHint { index }).await;
        }
    }

    let view = session.view();
    assert_eq!(session.game().status(), Status::Loser);
    assert_eq!(view.guesses_remaining, 0);
    assert_eq!(view.displayed_word(2), Some("goat"));
}

#[tokio::test]
async fn short_edit_is_rejected() {
    let env = game_env(Arc::new(MemoryStore::new()), config());
    let mut session = open(&env, day(1)).await;

    session.dispatch(&env, Command::ConfirmGuess).await;
    session.dispatch(&env, Command::SelectHint { index: 1 }).await;
    session.dispatch(&env, set(1, "bol")).await;
    assert_eq!(session.view().current_chain[1], "bo");

    let outcome = session.dispatch(&env, set(1, "b")).await;

    assert!(matches!(
        outcome,
        Outcome::Rejected(Rejection::ShorterThanRevealed { index: 1, .. })
    ));
    assert_eq!(session.game().current_suffixes()[1], "l");
}

#[tokio::test]
async fn hints_accumulate_on_one_word() {
    let env = game_env(Arc::new(MemoryStore::new()), config());
    let mut session = open(&env, day(1)).await;

    for _ in 0..2 {
        session.dispatch(&env, Command::ConfirmGuess).await;
        session.dispatch(&env, Command::SelectHint { index: 2 }).await;
    }

    let view = session.view();
    assert_eq!(view.hints_by_index[2], 2);
    assert_eq!(view.current_chain[2], "goa");
}

#[tokio::test]
async fn progress_survives_restart_with_file_store() {
    let dir = std::env::temp_dir().join(format!("chainle-flow-{}", uuid::Uuid::new_v4()));

    for format in [SnapshotFormat::Json, SnapshotFormat::Binary] {
        let config = config().with_format(format);
        let env = game_env(Arc::new(FileStore::new(&dir)), config.clone());
        let mut session = open(&env, day(2)).await;
        session.dispatch(&env, set(1, "flower")).await;
        session.dispatch(&env, Command::ConfirmGuess).await;
        let before = session.view();
        drop(session);

        let env = game_env(Arc::new(FileStore::new(&dir)), config);
        let session = open(&env, day(2)).await;
        assert_eq!(session.view(), before);
        assert_eq!(session.game().status(), Status::Selecting);
        assert!(session.view().solved_by_index[1]);

        env.persistence.clear(day(2)).unwrap();
    }

    std::fs::remove_dir_all(&dir).ok();
}

#[tokio::test]
async fn corrupt_snapshot_starts_fresh() {
    let store = Arc::new(MemoryStore::new());
    store.write("chain-2025-06-01", b"\x00garbage").unwrap();
    let env = game_env(store, config());

    let session = open(&env, day(1)).await;
    assert_eq!(session.game().status(), Status::Guessing);
    assert!(session.game().user_guesses().is_empty());
}

#[tokio::test]
async fn rollover_moves_to_next_day() {
    let env = game_env(Arc::new(MemoryStore::new()), config());
    let mut session = open(&env, day(1)).await;
    session.dispatch(&env, set(1, "boat")).await;
    session.dispatch(&env, Command::ConfirmGuess).await;

    assert_eq!(
        session.rollover(&env, day(2)).await,
        Rollover::Started
    );
    assert_eq!(session.view().current_chain, ["sun", "f", "p", "luck"]);
    assert!(session.revealed().is_empty());
}

#[tokio::test]
async fn unreadable_chain_table_is_unavailable() {
    let dir = std::env::temp_dir().join(format!("chainle-table-{}", uuid::Uuid::new_v4()));
    std::fs::create_dir_all(&dir).unwrap();
    let malformed = dir.join("malformed.json");
    std::fs::write(&malformed, b"{ not a table").unwrap();

    for path in [dir.join("missing.json"), malformed] {
        let env = GameEnv::new(
            Arc::new(JsonFileChainSource::new(path)),
            Arc::new(MemoryStore::new()),
            config(),
        )
        .unwrap();

        let load = Session::open(&env, day(1)).await;
        assert!(matches!(load, SessionLoad::Unavailable { date } if date == day(1)));
    }

    std::fs::remove_dir_all(&dir).ok();
}

#[tokio::test]
async fn rollover_keeps_the_day_when_the_table_breaks() {
    let dir = std::env::temp_dir().join(format!("chainle-table-{}", uuid::Uuid::new_v4()));
    std::fs::create_dir_all(&dir).unwrap();
    let table = dir.join("chains.json");
    std::fs::write(
        &table,
        br#"[{"date": "2025-06-01", "chain": ["board", "boat", "goat", "coats"]}]"#,
    )
    .unwrap();
    let env = GameEnv::new(
        Arc::new(JsonFileChainSource::new(&table)),
        Arc::new(MemoryStore::new()),
        config(),
    )
    .unwrap();
    let mut session = open(&env, day(1)).await;
    session.dispatch(&env, Command::ConfirmGuess).await;

    std::fs::remove_file(&table).unwrap();

    assert_eq!(session.rollover(&env, day(2)).await, Rollover::Unavailable);
    assert_eq!(session.date(), day(1));
    assert_eq!(session.game().user_guesses().len(), 1);

    std::fs::remove_dir_all(&dir).ok();
}
