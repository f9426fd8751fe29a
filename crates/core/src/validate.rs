//! Answer validation, one rule per puzzle kind.

use crate::puzzle::{Puzzle, PuzzleKind};

/// Decide whether `answers` solve `puzzle`. Pure, so repeated checks agree.
pub fn check(puzzle: &Puzzle, answers: &[String]) -> bool {
    match &puzzle.kind {
        PuzzleKind::Pattern(p) => {
            let expected = p.expected();
            answers.len() == expected.len()
                && answers.iter().zip(expected.iter()).all(|(a, e)| a == e)
        }
        PuzzleKind::Word(w) => answers.concat().to_lowercase() == w.word().to_lowercase(),
        PuzzleKind::Math(m) => answers
            .first()
            .and_then(|a| parse_leading_int(a))
            .is_some_and(|n| n == m.answer),
        PuzzleKind::Logic(l) => answers.first().is_some_and(|a| *a == l.answer),
        PuzzleKind::Fallback(_) => false,
    }
}

/// Lenient integer parse: leading whitespace, optional sign, then digits.
/// Trailing garbage is ignored (`"7x"` reads as 7); no digits means `None`.
pub fn parse_leading_int(input: &str) -> Option<i64> {
    let s = input.trim_start();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let digits = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }
    let value: i64 = rest[..digits].parse().ok()?;
    Some(if negative { -value } else { value })
}
