use proptest::prelude::*;

use braintwist::core::{
    bank, MathPuzzle, Notice, Operator, PatternPuzzle, Puzzle, PuzzleKind, Session,
    SessionEvent, SessionOptions, TaskTicket, TimerCommand, WordPuzzle,
};
use braintwist::types::{Category, Difficulty, Phase, SessionCommand, MAX_LIVES};

fn session_with(puzzle: Puzzle) -> Session {
    let category = puzzle.category().unwrap_or(Category::Pattern);
    let mut session = Session::for_category(category, SessionOptions::immediate());
    session.open();
    assert!(session.install_puzzle(puzzle).applied);
    session
}

fn math(lhs: i64, op: Operator, rhs: i64, d: Difficulty) -> Puzzle {
    Puzzle::new(d, PuzzleKind::Math(MathPuzzle::new(lhs, op, rhs).unwrap()))
}

fn start(session: &mut Session) -> TaskTicket {
    let out = session.dispatch(SessionCommand::Start.into());
    assert!(out.applied);
    out.commands
        .iter()
        .find_map(|c| match c {
            TimerCommand::StartCountdown { ticket, .. } => Some(*ticket),
            _ => None,
        })
        .expect("countdown armed")
}

fn answer(session: &mut Session, slot: usize, value: &str) {
    let out = session.dispatch(
        SessionCommand::ChangeAnswer {
            slot,
            value: value.to_string(),
        }
        .into(),
    );
    assert!(out.applied, "answer {value:?} into slot {slot} rejected");
}

fn submit(session: &mut Session) -> Option<Notice> {
    session.dispatch(SessionCommand::Submit.into()).notice
}

#[test]
fn math_round_scores_base_plus_bonus() {
    let mut s = session_with(math(3, Operator::Add, 4, Difficulty::Easy));
    start(&mut s);
    answer(&mut s, 0, "7");
    assert_eq!(submit(&mut s), Some(Notice::Correct { points: 40 }));
    assert_eq!(s.phase(), Phase::Success);
    assert_eq!(s.score(), 40);
    assert_eq!(s.lives(), MAX_LIVES);
}

#[test]
fn hard_division_scores_thirty_base() {
    let mut s = session_with(math(48, Operator::Div, 6, Difficulty::Hard));
    let ticket = start(&mut s);
    assert_eq!(s.time_remaining(), Some(30));
    for _ in 0..10 {
        s.dispatch(SessionEvent::CountdownTick(ticket));
    }
    answer(&mut s, 0, " 8 apples");
    assert_eq!(submit(&mut s), Some(Notice::Correct { points: 30 + 10 }));
}

#[test]
fn word_answer_is_case_insensitive_across_slots() {
    let puzzle = Puzzle::new(
        Difficulty::Easy,
        PuzzleKind::Word(WordPuzzle::new("ELPPA".chars().collect(), "APPLE")),
    );
    let mut s = session_with(puzzle);
    start(&mut s);
    for (slot, letter) in ["a", "P", "p", "L", "e"].iter().enumerate() {
        answer(&mut s, slot, letter);
    }
    assert!(matches!(submit(&mut s), Some(Notice::Correct { .. })));
}

#[test]
fn easy_logic_items_accept_only_their_answer() {
    for item in bank::logic_items(Difficulty::Easy) {
        let puzzle = Puzzle::new(Difficulty::Easy, PuzzleKind::Logic(item.into()));

        for option in item.options.iter().filter(|o| **o != item.answer) {
            let mut s = session_with(puzzle.clone());
            start(&mut s);
            answer(&mut s, 0, option);
            assert_eq!(submit(&mut s), Some(Notice::Incorrect), "{option:?} accepted");
            assert_eq!(s.phase(), Phase::Failed);
            assert_eq!(s.lives(), MAX_LIVES - 1);
        }

        let mut s = session_with(puzzle);
        start(&mut s);
        answer(&mut s, 0, item.answer);
        assert!(matches!(submit(&mut s), Some(Notice::Correct { .. })));
        assert_eq!(s.phase(), Phase::Success);
        assert_eq!(s.lives(), MAX_LIVES);
    }
}

#[test]
fn pattern_only_takes_last_cell() {
    let puzzle = Puzzle::new(
        Difficulty::Easy,
        PuzzleKind::Pattern(PatternPuzzle::new(vec![3, 1, 5])),
    );
    let mut s = session_with(puzzle);
    start(&mut s);
    let first = s.dispatch(
        SessionCommand::ChangeAnswer {
            slot: 0,
            value: "3".into(),
        }
        .into(),
    );
    assert!(!first.applied);
    answer(&mut s, 2, "5");
    assert!(matches!(submit(&mut s), Some(Notice::Correct { .. })));
}

#[test]
fn three_wrong_answers_end_the_game_and_retry_resets() {
    let mut s = session_with(math(3, Operator::Add, 4, Difficulty::Easy));
    start(&mut s);
    answer(&mut s, 0, "7");
    submit(&mut s);
    let banked = s.score();
    assert!(banked > 0);
    assert!(s.dispatch(SessionCommand::Next.into()).applied);

    for expected_lives in (0..MAX_LIVES).rev() {
        assert_eq!(s.phase(), Phase::Setup);
        start(&mut s);
        answer(&mut s, 0, "-999999");
        assert_eq!(submit(&mut s), Some(Notice::Incorrect));
        assert_eq!(s.lives(), expected_lives);
        assert_eq!(s.phase(), Phase::Failed);
        if expected_lives > 0 {
            assert!(s.dispatch(SessionCommand::Retry.into()).applied);
            assert_eq!(s.score(), banked, "retry with lives left keeps the score");
        }
    }

    assert!(s.dispatch(SessionCommand::Retry.into()).applied);
    assert_eq!(s.lives(), MAX_LIVES);
    assert_eq!(s.score(), 0);
    assert_eq!(s.phase(), Phase::Setup);
    assert!(s.puzzle().is_some());
    assert_eq!(s.attempts(), 4);
}

#[test]
fn selection_change_after_game_over_starts_a_new_game() {
    for change in [
        SessionCommand::SetDifficulty {
            difficulty: Difficulty::Medium,
        },
        SessionCommand::SetCategory {
            category: Category::Logic,
        },
    ] {
        let mut s = session_with(math(3, Operator::Add, 4, Difficulty::Easy));
        start(&mut s);
        answer(&mut s, 0, "7");
        submit(&mut s);
        assert!(s.score() > 0);
        s.dispatch(SessionCommand::Next.into());

        while s.lives() > 0 {
            if s.phase() == Phase::Failed {
                s.dispatch(SessionCommand::Retry.into());
            }
            start(&mut s);
            answer(&mut s, 0, "-999999");
            submit(&mut s);
        }
        assert_eq!(s.phase(), Phase::Failed);

        assert!(s.dispatch(change.into()).applied);
        assert_eq!(s.phase(), Phase::Setup);
        assert_eq!(s.lives(), MAX_LIVES);
        assert_eq!(s.score(), 0);
        start(&mut s);
        assert_eq!(s.lives(), MAX_LIVES);
    }
}

#[test]
fn commands_outside_their_phase_are_ignored() {
    let mut s = session_with(math(3, Operator::Add, 4, Difficulty::Easy));
    for command in [SessionCommand::Submit, SessionCommand::Next, SessionCommand::Retry] {
        assert!(!s.dispatch(command.into()).applied);
    }
    start(&mut s);
    assert!(!s.dispatch(SessionCommand::Start.into()).applied);
    assert!(!s.dispatch(SessionCommand::Next.into()).applied);
    assert_eq!(s.attempts(), 0);
}

#[test]
fn selection_change_regenerates_in_setup() {
    let mut s = Session::for_category(Category::Math, SessionOptions::immediate());
    s.open();
    let out = s.dispatch(
        SessionCommand::SetDifficulty {
            difficulty: Difficulty::Hard,
        }
        .into(),
    );
    assert!(out.applied);
    assert_eq!(s.puzzle().map(|p| p.difficulty), Some(Difficulty::Hard));

    let out = s.dispatch(
        SessionCommand::SetCategory {
            category: Category::Logic,
        }
        .into(),
    );
    assert!(out.applied);
    assert_eq!(s.puzzle().and_then(Puzzle::category), Some(Category::Logic));
    assert_eq!(s.answers().len(), 1);

    // Same selection again is a no-op.
    let out = s.dispatch(
        SessionCommand::SetCategory {
            category: Category::Logic,
        }
        .into(),
    );
    assert!(!out.applied);
}

#[test]
fn superseded_countdown_ticks_are_ignored() {
    let mut s = session_with(math(3, Operator::Add, 4, Difficulty::Easy));
    let old = start(&mut s);
    answer(&mut s, 0, "7");
    submit(&mut s);
    s.dispatch(SessionCommand::Next.into());
    let current = start(&mut s);
    assert_ne!(old, current);

    assert!(!s.dispatch(SessionEvent::CountdownTick(old)).applied);
    assert_eq!(s.time_remaining(), Some(60));
    assert!(s.dispatch(SessionEvent::CountdownTick(current)).applied);
    assert_eq!(s.time_remaining(), Some(59));
}

fn difficulty() -> impl Strategy<Value = Difficulty> {
    prop_oneof![
        Just(Difficulty::Easy),
        Just(Difficulty::Medium),
        Just(Difficulty::Hard)
    ]
}

proptest! {
    #[test]
    fn budget_ticks_always_time_out(d in difficulty()) {
        let mut s = session_with(math(3, Operator::Add, 4, d));
        let ticket = start(&mut s);
        let budget = d.time_budget_secs();
        for _ in 1..budget {
            let out = s.dispatch(SessionEvent::CountdownTick(ticket));
            prop_assert!(out.notice.is_none());
        }
        let out = s.dispatch(SessionEvent::CountdownTick(ticket));
        prop_assert_eq!(out.notice, Some(Notice::TimeUp));
        prop_assert_eq!(s.lives(), MAX_LIVES - 1);
        prop_assert_eq!(s.round_report().map(|r| r.time_taken), Some(budget));
    }

    #[test]
    fn score_matches_formula(d in difficulty(), elapsed in 0u32..30) {
        let mut s = session_with(math(3, Operator::Add, 4, d));
        let ticket = start(&mut s);
        for _ in 0..elapsed {
            s.dispatch(SessionEvent::CountdownTick(ticket));
        }
        answer(&mut s, 0, "7");
        submit(&mut s);
        let remaining = d.time_budget_secs() - elapsed;
        prop_assert_eq!(s.score(), d.base_points() + remaining / 2);
    }
}
