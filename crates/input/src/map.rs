//! Key mapping from terminal events to session commands.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use braintwist_core::SessionSnapshot;

use crate::cursor::AnswerCursor;
use crate::types::{Category, Difficulty, Phase, SessionCommand};

/// Map keyboard input to a session command for the current snapshot.
///
/// Cursor-only keys (arrows across word slots) move `cursor` and return `None`.
pub fn map_key(
    key: KeyEvent,
    snapshot: &SessionSnapshot,
    cursor: &mut AnswerCursor,
) -> Option<SessionCommand> {
    if snapshot.loading {
        return None;
    }
    cursor.sync(snapshot);

    match snapshot.phase {
        Phase::Setup => setup_key(key, snapshot),
        Phase::Playing => playing_key(key, snapshot, cursor),
        Phase::Success => match key.code {
            KeyCode::Enter | KeyCode::Char('n') | KeyCode::Char('N') => Some(SessionCommand::Next),
            _ => None,
        },
        Phase::Failed => match key.code {
            KeyCode::Enter | KeyCode::Char('r') | KeyCode::Char('R') => {
                Some(SessionCommand::Retry)
            }
            _ => None,
        },
    }
}

/// Check if key should quit.
///
/// `q` types into word answers while a round is running, so it only quits outside play.
pub fn should_quit(key: KeyEvent, snapshot: &SessionSnapshot) -> bool {
    key.code == KeyCode::Esc
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
        || (matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
            && snapshot.phase != Phase::Playing)
}

fn setup_key(key: KeyEvent, snapshot: &SessionSnapshot) -> Option<SessionCommand> {
    match key.code {
        KeyCode::Char('1') => Some(SessionCommand::SetDifficulty {
            difficulty: Difficulty::Easy,
        }),
        KeyCode::Char('2') => Some(SessionCommand::SetDifficulty {
            difficulty: Difficulty::Medium,
        }),
        KeyCode::Char('3') => Some(SessionCommand::SetDifficulty {
            difficulty: Difficulty::Hard,
        }),
        KeyCode::Tab => Some(SessionCommand::SetCategory {
            category: snapshot
                .category
                .map(|c| c.next())
                .unwrap_or(Category::Pattern),
        }),
        KeyCode::Enter | KeyCode::Char(' ') if snapshot.puzzle.is_some() => {
            Some(SessionCommand::Start)
        }
        _ => None,
    }
}

fn playing_key(
    key: KeyEvent,
    snapshot: &SessionSnapshot,
    cursor: &mut AnswerCursor,
) -> Option<SessionCommand> {
    if key.code == KeyCode::Enter {
        return Some(SessionCommand::Submit);
    }
    let puzzle = snapshot.puzzle.as_ref()?;

    if let Some(options) = &puzzle.options {
        let picked = match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                cursor.cycle_choice(options.len(), false);
                true
            }
            KeyCode::Down | KeyCode::Char('j') => {
                cursor.cycle_choice(options.len(), true);
                true
            }
            KeyCode::Char(c) => c
                .to_digit(10)
                .and_then(|d| (d as usize).checked_sub(1))
                .is_some_and(|index| cursor.select(index, options.len())),
            _ => false,
        };
        return picked.then(|| SessionCommand::ChangeAnswer {
            slot: 0,
            value: options[cursor.choice()].clone(),
        });
    }

    let multi_slot = puzzle.editable.iter().filter(|e| **e).count() > 1;
    let slot = cursor.slot();
    let current = snapshot.answers.get(slot)?;

    match key.code {
        KeyCode::Left if multi_slot => {
            cursor.retreat(snapshot);
            None
        }
        KeyCode::Right if multi_slot => {
            cursor.advance(snapshot);
            None
        }
        KeyCode::Backspace if multi_slot => {
            if current.is_empty() {
                cursor.retreat(snapshot);
            }
            Some(SessionCommand::ChangeAnswer {
                slot: cursor.slot(),
                value: String::new(),
            })
        }
        KeyCode::Backspace => {
            let mut value = current.clone();
            value.pop()?;
            Some(SessionCommand::ChangeAnswer { slot, value })
        }
        KeyCode::Char(c) if multi_slot && c.is_alphabetic() => {
            cursor.advance(snapshot);
            Some(SessionCommand::ChangeAnswer {
                slot,
                value: c.to_uppercase().collect(),
            })
        }
        KeyCode::Char(c)
            if !multi_slot && (c.is_ascii_digit() || (c == '-' && current.is_empty())) =>
        {
            let mut value = current.clone();
            value.push(c);
            Some(SessionCommand::ChangeAnswer { slot, value })
        }
        _ => None,
    }
}
