//! Wire shapes other layers depend on: camelCase keys, tagged enums.

use serde_json::{json, Value};

use braintwist::core::{
    MathPuzzle, Notice, Operator, Puzzle, PuzzleKind, RoundReport, Session, SessionOptions,
    Solution, TaskKind, TaskSlot, TimerCommand,
};
use braintwist::types::{Category, Difficulty, SessionCommand};

#[test]
fn round_report_keys() {
    let report = RoundReport {
        completed: false,
        score: 0,
        time_taken: 45,
    };
    assert_eq!(
        serde_json::to_value(report).unwrap(),
        json!({"completed": false, "score": 0, "timeTaken": 45})
    );
}

#[test]
fn snapshot_keys() {
    let mut session = Session::for_category(Category::Math, SessionOptions::immediate());
    session.open();
    let value = serde_json::to_value(session.snapshot()).unwrap();
    let Value::Object(map) = value else {
        panic!("snapshot should serialize to an object");
    };
    for key in [
        "category",
        "categoryTag",
        "difficulty",
        "phase",
        "loading",
        "puzzle",
        "answers",
        "attempts",
        "lives",
        "score",
        "timeRemaining",
        "lastPoints",
        "roundId",
    ] {
        assert!(map.contains_key(key), "missing {key}");
    }
    assert_eq!(map["category"], json!("math"));
    assert_eq!(map["phase"], json!("setup"));
    assert_eq!(map["timeRemaining"], Value::Null);
    assert!(map["puzzle"].get("solution").is_none());
}

#[test]
fn commands_parse_from_json() {
    let cases = [
        (
            json!({"type": "setDifficulty", "difficulty": "hard"}),
            SessionCommand::SetDifficulty {
                difficulty: Difficulty::Hard,
            },
        ),
        (
            json!({"type": "setCategory", "category": "logic"}),
            SessionCommand::SetCategory {
                category: Category::Logic,
            },
        ),
        (
            json!({"type": "changeAnswer", "slot": 2, "value": "4"}),
            SessionCommand::ChangeAnswer {
                slot: 2,
                value: "4".into(),
            },
        ),
        (json!({"type": "submit"}), SessionCommand::Submit),
        (json!({"type": "retry"}), SessionCommand::Retry),
    ];
    for (value, expected) in cases {
        let parsed: SessionCommand = serde_json::from_value(value).unwrap();
        assert_eq!(parsed, expected);
    }
}

#[test]
fn timer_commands_are_tagged() {
    let mut slot = TaskSlot::new(TaskKind::Load);
    let ticket = slot.arm();
    let value = serde_json::to_value(TimerCommand::ScheduleLoad {
        ticket,
        delay_ms: 800,
    })
    .unwrap();
    assert_eq!(value["type"], json!("scheduleLoad"));
    assert_eq!(value["delayMs"], json!(800));
    assert_eq!(
        serde_json::to_value(TimerCommand::StopCountdown).unwrap(),
        json!({"type": "stopCountdown"})
    );
}

#[test]
fn notices_and_solutions() {
    assert_eq!(
        serde_json::to_value(Notice::Correct { points: 15 }).unwrap(),
        json!({"type": "correct", "points": 15})
    );
    let puzzle = Puzzle::new(
        Difficulty::Easy,
        PuzzleKind::Math(MathPuzzle::new(6, Operator::Mul, 7).unwrap()),
    );
    assert_eq!(serde_json::to_value(puzzle.solution()).unwrap(), json!(42));
    assert_eq!(
        serde_json::to_value(Solution::Sequence(vec!["".into(), "3".into()])).unwrap(),
        json!(["", "3"])
    );
    let value = serde_json::to_value(&puzzle).unwrap();
    assert_eq!(value["kind"]["type"], json!("math"));
}
