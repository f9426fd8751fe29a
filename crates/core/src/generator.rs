//! Puzzle generator - procedural content per category and difficulty
//!
//! Generation is total: every `(Category, Difficulty)` pair yields a puzzle,
//! and unrecognized category tags degrade to [`Puzzle::fallback`].
//!
//! Pattern grids are independent random values in `[1, 5]`; the player only
//! re-enters the last one. There is no sequence rule behind them.

use crate::bank;
use crate::puzzle::{
    LogicPuzzle, MathPuzzle, Operator, PatternPuzzle, Puzzle, PuzzleKind, WordPuzzle,
};
use crate::rng::SimpleRng;
use crate::types::{Category, Difficulty, PATTERN_MAX, PATTERN_MIN};

const MEDIUM_OPS: [Operator; 3] = [Operator::Add, Operator::Sub, Operator::Mul];
const HARD_OPS: [Operator; 4] = [Operator::Add, Operator::Sub, Operator::Mul, Operator::Div];

#[derive(Debug, Clone, Default)]
pub struct PuzzleGenerator {
    rng: SimpleRng,
}

impl PuzzleGenerator {
    pub fn new(rng: SimpleRng) -> Self {
        Self { rng }
    }

    pub fn with_seed(seed: u32) -> Self {
        Self::new(SimpleRng::new(seed))
    }

    pub fn generate(&mut self, category: Category, difficulty: Difficulty) -> Puzzle {
        let kind = match category {
            Category::Pattern => PuzzleKind::Pattern(self.pattern(difficulty)),
            Category::Word => PuzzleKind::Word(self.word(difficulty)),
            Category::Math => PuzzleKind::Math(self.math(difficulty)),
            Category::Logic => PuzzleKind::Logic(self.logic(difficulty)),
        };
        Puzzle::new(difficulty, kind)
    }

    /// Generate from a raw category tag, falling back to the degenerate puzzle.
    pub fn generate_tagged(&mut self, tag: &str, difficulty: Difficulty) -> Puzzle {
        match Category::from_str(tag) {
            Some(category) => self.generate(category, difficulty),
            None => {
                log::warn!("unrecognized puzzle category {tag:?}, using fallback puzzle");
                Puzzle::fallback(difficulty)
            }
        }
    }

    fn pattern(&mut self, difficulty: Difficulty) -> PatternPuzzle {
        let cells = (0..difficulty.pattern_len())
            .map(|_| self.rng.range_inclusive(PATTERN_MIN, PATTERN_MAX))
            .collect();
        PatternPuzzle::new(cells)
    }

    fn word(&mut self, difficulty: Difficulty) -> WordPuzzle {
        let words = bank::words(difficulty);
        let word = self.rng.pick(words).copied().unwrap_or(words[0]);
        let mut letters: Vec<char> = word.chars().collect();
        // A no-op shuffle is allowed; distinctness is not forced.
        self.rng.shuffle(&mut letters);
        WordPuzzle::new(letters, word)
    }

    fn math(&mut self, difficulty: Difficulty) -> MathPuzzle {
        let (lhs, op, rhs) = match difficulty {
            Difficulty::Easy => {
                let lhs = self.rng.range_inclusive(1, 10);
                let rhs = self.rng.range_inclusive(1, 10);
                (lhs, Operator::Add, rhs)
            }
            Difficulty::Medium => {
                let lhs = self.rng.range_inclusive(10, 29);
                let rhs = self.rng.range_inclusive(1, 10);
                let op = *self.rng.pick(&MEDIUM_OPS).unwrap_or(&Operator::Add);
                (lhs, op, rhs)
            }
            Difficulty::Hard => {
                let lhs = self.rng.range_inclusive(20, 69);
                let mut rhs = self.rng.range_inclusive(10, 39);
                let op = *self.rng.pick(&HARD_OPS).unwrap_or(&Operator::Add);
                if op == Operator::Div {
                    rhs = self.exact_divisor(lhs);
                }
                (lhs, op, rhs)
            }
        };

        let (lhs, rhs) = (lhs as i64, rhs as i64);
        MathPuzzle::new(lhs, op, rhs).unwrap_or_else(|| {
            // Only reachable for an inexact division, which exact_divisor rules out.
            MathPuzzle {
                lhs,
                op: Operator::Add,
                rhs,
                answer: lhs + rhs,
            }
        })
    }

    /// Second operand for hard division: roughly `lhs / q` for `q` in `[2, 10]`,
    /// lowered to the nearest value that divides `lhs` exactly.
    fn exact_divisor(&mut self, lhs: u32) -> u32 {
        let quotient = self.rng.range_inclusive(2, 10);
        let mut divisor = (lhs / quotient).max(1);
        while lhs % divisor != 0 {
            divisor -= 1;
        }
        divisor
    }

    fn logic(&mut self, difficulty: Difficulty) -> LogicPuzzle {
        let items = bank::logic_items(difficulty);
        let item = self.rng.pick(items).unwrap_or(&items[0]);
        LogicPuzzle::from(item)
    }
}
