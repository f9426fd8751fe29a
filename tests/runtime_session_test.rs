use std::time::Duration;

use braintwist::core::{
    MemoryProgressStore, Notice, PuzzleGenerator, Session, SessionOptions, Solution,
};
use braintwist::runtime::{BoxedStore, RuntimeConfig, SessionRuntime};
use braintwist::types::{Category, Difficulty, Phase, SessionCommand};

const SEED: u32 = 2024;

fn answer_for(category: Category, difficulty: Difficulty, nth: usize) -> String {
    let mut generator = PuzzleGenerator::with_seed(SEED);
    let mut puzzle = generator.generate(category, difficulty);
    for _ in 0..nth {
        puzzle = generator.generate(category, difficulty);
    }
    match puzzle.solution() {
        Solution::Number(n) => n.to_string(),
        Solution::Choice(c) | Solution::Word(c) => c,
        Solution::Sequence(cells) => cells.last().cloned().unwrap_or_default(),
    }
}

#[tokio::test(start_paused = true)]
async fn load_delay_gates_start() {
    let session = Session::with_generator(
        "math",
        SessionOptions::default(),
        PuzzleGenerator::with_seed(SEED),
    );
    let mut handle = SessionRuntime::spawn(session, None, "player");

    // Start during the load is ignored.
    handle.send(SessionCommand::Start).await.unwrap();
    tokio::time::sleep(Duration::from_millis(400)).await;
    let snap = handle.snapshot();
    assert!(snap.loading);
    assert_eq!(snap.phase, Phase::Setup);

    let snap = handle.wait_for(|s| !s.loading).await.unwrap();
    assert!(snap.puzzle.is_some());
    handle.send(SessionCommand::Start).await.unwrap();
    let snap = handle.wait_for(|s| s.phase == Phase::Playing).await.unwrap();
    assert_eq!(snap.time_remaining, Some(60));
    handle.shutdown().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn reselecting_during_load_keeps_latest() {
    let session = Session::with_generator(
        "word",
        SessionOptions::default(),
        PuzzleGenerator::with_seed(SEED),
    );
    let mut handle = SessionRuntime::spawn(session, None, "player");

    tokio::time::sleep(Duration::from_millis(500)).await;
    handle
        .send(SessionCommand::SetCategory {
            category: Category::Logic,
        })
        .await
        .unwrap();

    // The first load would have landed at 800ms; the second lands at 1300ms.
    tokio::time::sleep(Duration::from_millis(400)).await;
    assert!(handle.snapshot().loading);

    let snap = handle.wait_for(|s| !s.loading).await.unwrap();
    let puzzle = snap.puzzle.unwrap();
    assert_eq!(puzzle.category, Some(Category::Logic));
    assert!(puzzle.options.is_some());
    handle.shutdown().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn rounds_are_reported_to_the_store() {
    let config = RuntimeConfig {
        category: "math".into(),
        options: SessionOptions::immediate(),
        seed: Some(SEED),
        user_id: "player".into(),
        ..RuntimeConfig::default()
    };
    let store: BoxedStore = Box::new(MemoryProgressStore::new());
    let mut handle = SessionRuntime::spawn(config.build_session(), Some(store), &config.user_id);
    handle.wait_for(|s| s.puzzle.is_some()).await.unwrap();

    // Round 1: solved.
    handle.send(SessionCommand::Start).await.unwrap();
    handle
        .send(SessionCommand::ChangeAnswer {
            slot: 0,
            value: answer_for(Category::Math, Difficulty::Easy, 0),
        })
        .await
        .unwrap();
    handle.send(SessionCommand::Submit).await.unwrap();
    handle.wait_for(|s| s.phase == Phase::Success).await.unwrap();
    assert!(matches!(
        handle.next_notice().await,
        Some(Notice::Correct { points: 40 })
    ));

    // Round 2: times out.
    handle.send(SessionCommand::Next).await.unwrap();
    handle.wait_for(|s| s.phase == Phase::Setup).await.unwrap();
    handle.send(SessionCommand::Start).await.unwrap();
    let snap = handle.wait_for(|s| s.phase == Phase::Failed).await.unwrap();
    assert_eq!(snap.lives, 2);
    assert_eq!(handle.next_notice().await, Some(Notice::TimeUp));

    let store = handle.shutdown().await.unwrap().unwrap();
    let records = store.list("player").unwrap();
    assert_eq!(records.len(), 1);
    let record = &records[0];
    assert_eq!(record.puzzle_id, "math-easy");
    assert_eq!(record.attempts, 2);
    assert!(!record.completed);
    assert_eq!(record.time_taken, 60);
    assert_eq!(record.score, 0);
}
