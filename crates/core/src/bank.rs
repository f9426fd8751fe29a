//! Static content pools for word and logic puzzles.

use crate::types::Difficulty;

/// One syllogism-style logic item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogicItem {
    pub question: &'static str,
    pub options: [&'static str; 4],
    pub answer: &'static str,
}

const EASY_WORDS: [&str; 5] = ["APPLE", "HOUSE", "SMILE", "BEACH", "MUSIC"];
const MEDIUM_WORDS: [&str; 5] = ["ELEPHANT", "COMPUTER", "SUNSHINE", "MOUNTAIN", "VACATION"];
const HARD_WORDS: [&str; 5] = ["XYLOPHONE", "JUXTAPOSE", "LABYRINTH", "NIGHTFALL", "QUADRUPLE"];

const EASY_LOGIC: [LogicItem; 2] = [
    LogicItem {
        question: "If all roses are flowers, and some flowers fade quickly, then:",
        options: [
            "All roses fade quickly",
            "Some roses may fade quickly",
            "No roses fade quickly",
            "Roses never fade",
        ],
        answer: "Some roses may fade quickly",
    },
    LogicItem {
        question: "If it is raining, then the ground is wet. The ground is wet. Therefore:",
        options: [
            "It must be raining",
            "It might be raining, but there could be other reasons for the wet ground",
            "It is not raining",
            "The ground is always wet",
        ],
        answer: "It might be raining, but there could be other reasons for the wet ground",
    },
];

const MEDIUM_LOGIC: [LogicItem; 1] = [LogicItem {
    question: "All scientists are researchers. Some researchers are professors. Therefore:",
    options: [
        "All scientists are professors",
        "Some scientists might be professors",
        "No scientists are professors",
        "All professors are scientists",
    ],
    answer: "Some scientists might be professors",
}];

const HARD_LOGIC: [LogicItem; 1] = [LogicItem {
    question: "If no heroes are cowards, and some soldiers are cowards, then:",
    options: [
        "All soldiers are heroes",
        "No soldiers are heroes",
        "Some soldiers are not heroes",
        "Some heroes are soldiers",
    ],
    answer: "Some soldiers are not heroes",
}];

pub fn words(difficulty: Difficulty) -> &'static [&'static str] {
    match difficulty {
        Difficulty::Easy => &EASY_WORDS,
        Difficulty::Medium => &MEDIUM_WORDS,
        Difficulty::Hard => &HARD_WORDS,
    }
}

pub fn logic_items(difficulty: Difficulty) -> &'static [LogicItem] {
    match difficulty {
        Difficulty::Easy => &EASY_LOGIC,
        Difficulty::Medium => &MEDIUM_LOGIC,
        Difficulty::Hard => &HARD_LOGIC,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_tier_has_five_words() {
        for d in Difficulty::ALL {
            assert_eq!(words(d).len(), 5);
        }
    }

    #[test]
    fn logic_answers_are_listed_options() {
        for d in Difficulty::ALL {
            assert!(!logic_items(d).is_empty());
            for item in logic_items(d) {
                assert!(item.options.contains(&item.answer), "{}", item.question);
            }
        }
    }
}
