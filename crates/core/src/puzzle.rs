//! Puzzle values - one generated challenge per round
//!
//! A [`Puzzle`] is immutable once created. Each category carries its own
//! prompt/solution payload, so validation and rendering match exhaustively
//! instead of branching on a string tag.

use serde::{Deserialize, Serialize};

use crate::bank::LogicItem;
use crate::types::{Category, Difficulty};

/// Arithmetic operator for math puzzles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operator {
    Add,
    Sub,
    Mul,
    Div,
}

impl Operator {
    pub fn symbol(&self) -> char {
        match self {
            Operator::Add => '+',
            Operator::Sub => '-',
            Operator::Mul => '*',
            Operator::Div => '/',
        }
    }

    /// Integer result, `None` when division is not exact.
    pub fn apply(&self, lhs: i64, rhs: i64) -> Option<i64> {
        match self {
            Operator::Add => Some(lhs + rhs),
            Operator::Sub => Some(lhs - rhs),
            Operator::Mul => Some(lhs * rhs),
            Operator::Div => {
                if rhs == 0 || lhs % rhs != 0 {
                    None
                } else {
                    Some(lhs / rhs)
                }
            }
        }
    }
}

/// Grid of values where only the last cell asks for input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternPuzzle {
    cells: Vec<u32>,
    /// One entry per answer slot; `None` slots are pre-filled and expect no input.
    solution: Vec<Option<u32>>,
}

impl PatternPuzzle {
    /// Build from displayed cells; the last cell is the one to re-enter.
    pub fn new(cells: Vec<u32>) -> Self {
        let last = cells.len().saturating_sub(1);
        let solution = cells
            .iter()
            .enumerate()
            .map(|(i, &v)| if i == last { Some(v) } else { None })
            .collect();
        Self { cells, solution }
    }

    /// Degenerate puzzle shown for unrecognized categories.
    pub fn degenerate() -> Self {
        Self {
            cells: vec![1, 2, 3],
            solution: vec![Some(4)],
        }
    }

    pub fn cells(&self) -> &[u32] {
        &self.cells
    }

    pub fn solution(&self) -> &[Option<u32>] {
        &self.solution
    }

    /// Solution rendered slot by slot; pre-filled slots expect an empty string.
    pub fn expected(&self) -> Vec<String> {
        self.solution
            .iter()
            .map(|v| v.map(|n| n.to_string()).unwrap_or_default())
            .collect()
    }
}

/// Scrambled letters of a hidden word.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordPuzzle {
    letters: Vec<char>,
    word: String,
}

impl WordPuzzle {
    pub fn new(letters: Vec<char>, word: impl Into<String>) -> Self {
        Self {
            letters,
            word: word.into(),
        }
    }

    pub fn letters(&self) -> &[char] {
        &self.letters
    }

    pub fn word(&self) -> &str {
        &self.word
    }
}

/// `lhs op rhs = ?`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MathPuzzle {
    pub lhs: i64,
    pub op: Operator,
    pub rhs: i64,
    pub answer: i64,
}

impl MathPuzzle {
    /// `None` when the expression has no integer result.
    pub fn new(lhs: i64, op: Operator, rhs: i64) -> Option<Self> {
        let answer = op.apply(lhs, rhs)?;
        Some(Self {
            lhs,
            op,
            rhs,
            answer,
        })
    }

    pub fn question(&self) -> String {
        format!("{} {} {} = ?", self.lhs, self.op.symbol(), self.rhs)
    }
}

/// Multiple-choice deduction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogicPuzzle {
    pub question: String,
    pub options: Vec<String>,
    pub answer: String,
}

impl From<&LogicItem> for LogicPuzzle {
    fn from(item: &LogicItem) -> Self {
        Self {
            question: item.question.to_string(),
            options: item.options.iter().map(|s| s.to_string()).collect(),
            answer: item.answer.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum PuzzleKind {
    Pattern(PatternPuzzle),
    Word(WordPuzzle),
    Math(MathPuzzle),
    Logic(LogicPuzzle),
    /// Stand-in for an unrecognized category; renders as a pattern grid, never validates.
    Fallback(PatternPuzzle),
}

/// Expected answer, shaped per category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Solution {
    Sequence(Vec<String>),
    Word(String),
    Number(i64),
    Choice(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Puzzle {
    pub difficulty: Difficulty,
    pub kind: PuzzleKind,
}

impl Puzzle {
    pub fn new(difficulty: Difficulty, kind: PuzzleKind) -> Self {
        Self { difficulty, kind }
    }

    pub fn fallback(difficulty: Difficulty) -> Self {
        Self::new(difficulty, PuzzleKind::Fallback(PatternPuzzle::degenerate()))
    }

    /// `None` for the fallback puzzle.
    pub fn category(&self) -> Option<Category> {
        match self.kind {
            PuzzleKind::Pattern(_) => Some(Category::Pattern),
            PuzzleKind::Word(_) => Some(Category::Word),
            PuzzleKind::Math(_) => Some(Category::Math),
            PuzzleKind::Logic(_) => Some(Category::Logic),
            PuzzleKind::Fallback(_) => None,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self.kind, PuzzleKind::Fallback(_))
    }

    pub fn instructions(&self) -> &'static str {
        self.category().unwrap_or(Category::Pattern).instructions()
    }

    /// Display tokens, one per answer slot.
    pub fn prompt(&self) -> Vec<String> {
        match &self.kind {
            PuzzleKind::Pattern(p) | PuzzleKind::Fallback(p) => {
                p.cells().iter().map(u32::to_string).collect()
            }
            PuzzleKind::Word(w) => w.letters().iter().map(char::to_string).collect(),
            PuzzleKind::Math(m) => vec![m.question()],
            PuzzleKind::Logic(l) => vec![l.question.clone()],
        }
    }

    /// Selectable options (logic only).
    pub fn options(&self) -> Option<&[String]> {
        match &self.kind {
            PuzzleKind::Logic(l) => Some(&l.options),
            _ => None,
        }
    }

    pub fn solution(&self) -> Solution {
        match &self.kind {
            PuzzleKind::Pattern(p) | PuzzleKind::Fallback(p) => Solution::Sequence(p.expected()),
            PuzzleKind::Word(w) => Solution::Word(w.word().to_string()),
            PuzzleKind::Math(m) => Solution::Number(m.answer),
            PuzzleKind::Logic(l) => Solution::Choice(l.answer.clone()),
        }
    }

    /// Length of the player's answer array.
    pub fn slot_count(&self) -> usize {
        match &self.kind {
            PuzzleKind::Pattern(p) | PuzzleKind::Fallback(p) => p.cells().len(),
            PuzzleKind::Word(w) => w.letters().len(),
            PuzzleKind::Math(_) | PuzzleKind::Logic(_) => 1,
        }
    }

    /// Whether the player may type into `slot`.
    ///
    /// Pattern grids only take input in the last cell; word answers may be
    /// spread over the letter slots.
    pub fn is_editable(&self, slot: usize) -> bool {
        match &self.kind {
            PuzzleKind::Pattern(p) | PuzzleKind::Fallback(p) => {
                slot + 1 == p.cells().len()
            }
            _ => slot < self.slot_count(),
        }
    }
}
