//! Session state machine - one play-through of timed puzzle rounds
//!
//! ```text
//! setup --start--> playing --submit/timeout--> success | failed
//! success --next--> setup          (new puzzle, lives/score kept)
//! failed  --retry--> setup         (lives == 0 resets lives and score)
//! ```
//!
//! The session never owns a real timer. Every transition returns a
//! [`Dispatch`] whose [`TimerCommand`]s tell the host which countdown or load
//! task to start or cancel; completions come back as [`SessionEvent`]s carrying
//! the ticket they were scheduled with, and anything from a superseded
//! generation is ignored.

use arrayvec::ArrayVec;
use serde::{Deserialize, Serialize};

use crate::generator::PuzzleGenerator;
use crate::puzzle::Puzzle;
use crate::scoring::points_for;
use crate::snapshot::{PuzzleView, RoundReport, SessionSnapshot};
use crate::task::{TaskKind, TaskSlot, TaskTicket, TimerCommand};
use crate::types::{
    Category, Difficulty, Phase, SessionCommand, COUNTDOWN_PERIOD_MS, LOAD_DELAY_MS, MAX_LIVES,
};
use crate::validate;

/// Timing knobs for a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionOptions {
    /// Simulated fetch latency before a regenerated puzzle appears. Zero applies it synchronously.
    pub load_delay_ms: u32,
    pub countdown_period_ms: u32,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            load_delay_ms: LOAD_DELAY_MS,
            countdown_period_ms: COUNTDOWN_PERIOD_MS,
        }
    }
}

impl SessionOptions {
    /// No load latency; puzzles swap in during the same dispatch.
    pub fn immediate() -> Self {
        Self {
            load_delay_ms: 0,
            ..Self::default()
        }
    }
}

/// Input to [`Session::dispatch`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    Command(SessionCommand),
    CountdownTick(TaskTicket),
    LoadElapsed(TaskTicket),
}

impl From<SessionCommand> for SessionEvent {
    fn from(value: SessionCommand) -> Self {
        SessionEvent::Command(value)
    }
}

/// Player-facing outcome messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Notice {
    Correct { points: u32 },
    Incorrect,
    TimeUp,
}

impl Notice {
    pub fn message(&self) -> String {
        match self {
            Notice::Correct { points } => format!("Correct! You earned {points} points."),
            Notice::Incorrect => "Incorrect solution. You lost a life.".to_string(),
            Notice::TimeUp => "Time's up! You lost a life.".to_string(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Notice::Correct { .. })
    }
}

/// Result of one dispatch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dispatch {
    /// False when the event was not valid in the current state.
    pub applied: bool,
    pub commands: ArrayVec<TimerCommand, 4>,
    pub notice: Option<Notice>,
}

impl Dispatch {
    fn ignored() -> Self {
        Self::default()
    }

    fn applied() -> Self {
        Self {
            applied: true,
            ..Self::default()
        }
    }

    fn push(&mut self, command: TimerCommand) {
        // Capacity covers the longest path (stop countdown, cancel load, schedule load).
        let _ = self.commands.try_push(command);
    }
}

#[derive(Debug, Clone)]
pub struct Session {
    category_tag: String,
    category: Option<Category>,
    difficulty: Difficulty,
    options: SessionOptions,
    generator: PuzzleGenerator,
    puzzle: Option<Puzzle>,
    loading: bool,
    answers: Vec<String>,
    /// Submissions over the whole session; timeouts do not count.
    attempts: u32,
    lives: u8,
    score: u32,
    time_remaining: Option<u32>,
    round_budget: u32,
    /// Points from the most recently finished round.
    last_points: u32,
    /// Monotonic id, bumped whenever a round starts.
    round_id: u64,
    phase: Phase,
    countdown: TaskSlot,
    load: TaskSlot,
}

impl Session {
    /// Create a session for a category tag coming from the presentation layer.
    ///
    /// Unrecognized tags are kept and produce the fallback puzzle.
    pub fn new(category_tag: &str, options: SessionOptions) -> Self {
        Self::with_generator(category_tag, options, PuzzleGenerator::default())
    }

    pub fn with_generator(
        category_tag: &str,
        options: SessionOptions,
        generator: PuzzleGenerator,
    ) -> Self {
        Self {
            category_tag: category_tag.trim().to_lowercase(),
            category: Category::from_str(category_tag),
            difficulty: Difficulty::default(),
            options,
            generator,
            puzzle: None,
            loading: false,
            answers: Vec::new(),
            attempts: 0,
            lives: MAX_LIVES,
            score: 0,
            time_remaining: None,
            round_budget: 0,
            last_points: 0,
            round_id: 0,
            phase: Phase::Setup,
            countdown: TaskSlot::new(TaskKind::Countdown),
            load: TaskSlot::new(TaskKind::Load),
        }
    }

    pub fn for_category(category: Category, options: SessionOptions) -> Self {
        Self::new(category.as_str(), options)
    }

    /// Preselect the difficulty used by the first puzzle.
    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = difficulty;
        self
    }

    /// Request the first puzzle (the initial load when the view mounts).
    pub fn open(&mut self) -> Dispatch {
        let mut out = Dispatch::applied();
        self.request_puzzle(&mut out);
        out
    }

    pub fn category(&self) -> Option<Category> {
        self.category
    }

    pub fn category_tag(&self) -> &str {
        &self.category_tag
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn options(&self) -> SessionOptions {
        self.options
    }

    pub fn puzzle(&self) -> Option<&Puzzle> {
        self.puzzle.as_ref()
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn answers(&self) -> &[String] {
        &self.answers
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    pub fn lives(&self) -> u8 {
        self.lives
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn time_remaining(&self) -> Option<u32> {
        self.time_remaining
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn round_id(&self) -> u64 {
        self.round_id
    }

    pub fn countdown_active(&self) -> bool {
        self.countdown.is_armed()
    }

    pub fn load_pending(&self) -> bool {
        self.load.is_armed()
    }

    /// Outcome of the round that just ended, for the progress collaborator.
    pub fn round_report(&self) -> Option<RoundReport> {
        if !self.phase.is_terminal() {
            return None;
        }
        Some(RoundReport {
            completed: self.phase == Phase::Success,
            score: self.last_points,
            time_taken: self
                .round_budget
                .saturating_sub(self.time_remaining.unwrap_or(0)),
        })
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            category: self.category,
            category_tag: self.category_tag.clone(),
            difficulty: self.difficulty,
            phase: self.phase,
            loading: self.loading,
            puzzle: self.puzzle.as_ref().map(PuzzleView::from),
            answers: self.answers.clone(),
            attempts: self.attempts,
            lives: self.lives,
            score: self.score,
            time_remaining: self.time_remaining,
            last_points: self.last_points,
            round_id: self.round_id,
        }
    }

    /// Apply a prebuilt puzzle (catalog entry or fixture). Not allowed mid-round.
    pub fn install_puzzle(&mut self, puzzle: Puzzle) -> Dispatch {
        if self.phase == Phase::Playing {
            return Dispatch::ignored();
        }
        let mut out = Dispatch::applied();
        self.stop_countdown(&mut out);
        if self.load.cancel() {
            out.push(TimerCommand::CancelLoad);
        }
        if let Some(category) = puzzle.category() {
            self.category = Some(category);
            self.category_tag = category.as_str().to_string();
        }
        self.difficulty = puzzle.difficulty;
        self.apply_puzzle(puzzle);
        out
    }

    pub fn dispatch(&mut self, event: SessionEvent) -> Dispatch {
        match event {
            SessionEvent::Command(command) => self.handle_command(command),
            SessionEvent::CountdownTick(ticket) => self.on_countdown_tick(ticket),
            SessionEvent::LoadElapsed(ticket) => self.on_load_elapsed(ticket),
        }
    }

    fn handle_command(&mut self, command: SessionCommand) -> Dispatch {
        let tag = command.as_str();
        let out = match command {
            SessionCommand::SetDifficulty { difficulty } => self.set_difficulty(difficulty),
            SessionCommand::SetCategory { category } => self.set_category(category),
            SessionCommand::Start => self.start(),
            SessionCommand::ChangeAnswer { slot, value } => self.change_answer(slot, value),
            SessionCommand::Submit => self.submit(),
            SessionCommand::Next => self.next_puzzle(),
            SessionCommand::Retry => self.retry(),
        };
        if !out.applied {
            log::debug!("ignored {tag} in phase {}", self.phase.as_str());
        }
        out
    }

    fn set_difficulty(&mut self, difficulty: Difficulty) -> Dispatch {
        if self.phase == Phase::Playing {
            return Dispatch::ignored();
        }
        if difficulty == self.difficulty && (self.puzzle.is_some() || self.loading) {
            return Dispatch::ignored();
        }
        self.difficulty = difficulty;
        self.reset_if_game_over();
        let mut out = Dispatch::applied();
        self.request_puzzle(&mut out);
        out
    }

    fn set_category(&mut self, category: Category) -> Dispatch {
        if self.phase == Phase::Playing {
            return Dispatch::ignored();
        }
        if self.category == Some(category) && (self.puzzle.is_some() || self.loading) {
            return Dispatch::ignored();
        }
        self.category = Some(category);
        self.category_tag = category.as_str().to_string();
        self.reset_if_game_over();
        let mut out = Dispatch::applied();
        self.request_puzzle(&mut out);
        out
    }

    fn start(&mut self) -> Dispatch {
        if self.phase != Phase::Setup || self.loading || self.puzzle.is_none() {
            return Dispatch::ignored();
        }
        let mut out = Dispatch::applied();
        // Arming supersedes any countdown still in flight.
        self.countdown.cancel();
        let budget = self.difficulty.time_budget_secs();
        self.round_budget = budget;
        self.time_remaining = Some(budget);
        self.round_id += 1;
        self.phase = Phase::Playing;
        let ticket = self.countdown.arm();
        out.push(TimerCommand::StartCountdown {
            ticket,
            period_ms: self.options.countdown_period_ms,
        });
        log::debug!(
            "round {} started: {} {} with {budget}s",
            self.round_id,
            self.category_tag,
            self.difficulty.as_str()
        );
        out
    }

    fn change_answer(&mut self, slot: usize, value: String) -> Dispatch {
        if self.phase != Phase::Playing {
            return Dispatch::ignored();
        }
        let editable = self.puzzle.as_ref().is_some_and(|p| p.is_editable(slot));
        match self.answers.get_mut(slot) {
            Some(answer) if editable => {
                *answer = value;
                Dispatch::applied()
            }
            _ => Dispatch::ignored(),
        }
    }

    fn submit(&mut self) -> Dispatch {
        if self.phase != Phase::Playing {
            return Dispatch::ignored();
        }
        let mut out = Dispatch::applied();
        self.attempts += 1;
        self.stop_countdown(&mut out);

        let correct = self
            .puzzle
            .as_ref()
            .is_some_and(|p| validate::check(p, &self.answers));

        if correct {
            let points = points_for(self.difficulty, self.time_remaining.unwrap_or(0));
            self.score = self.score.saturating_add(points);
            self.last_points = points;
            self.phase = Phase::Success;
            out.notice = Some(Notice::Correct { points });
            log::info!(
                "round {} solved: +{points} (score {}, attempts {})",
                self.round_id,
                self.score,
                self.attempts
            );
        } else {
            self.lose_life();
            out.notice = Some(Notice::Incorrect);
            log::info!(
                "round {} failed: wrong answer (lives {}, attempts {})",
                self.round_id,
                self.lives,
                self.attempts
            );
        }
        out
    }

    fn next_puzzle(&mut self) -> Dispatch {
        if self.phase != Phase::Success {
            return Dispatch::ignored();
        }
        let mut out = Dispatch::applied();
        self.request_puzzle(&mut out);
        out
    }

    fn retry(&mut self) -> Dispatch {
        if self.phase != Phase::Failed {
            return Dispatch::ignored();
        }
        self.reset_if_game_over();
        let mut out = Dispatch::applied();
        self.request_puzzle(&mut out);
        out
    }

    /// Leaving a lost game always starts a new one.
    fn reset_if_game_over(&mut self) {
        if self.phase == Phase::Failed && self.lives == 0 {
            log::info!("game over with score {}, starting a new game", self.score);
            self.lives = MAX_LIVES;
            self.score = 0;
        }
    }

    fn on_countdown_tick(&mut self, ticket: TaskTicket) -> Dispatch {
        if !self.countdown.accepts(ticket) || self.phase != Phase::Playing {
            log::debug!("discarding stale countdown tick (generation {})", ticket.generation);
            return Dispatch::ignored();
        }
        let mut out = Dispatch::applied();
        let remaining = self.time_remaining.unwrap_or(0);
        if remaining > 1 {
            self.time_remaining = Some(remaining - 1);
            return out;
        }

        self.time_remaining = Some(0);
        self.stop_countdown(&mut out);
        self.lose_life();
        out.notice = Some(Notice::TimeUp);
        log::info!("round {} timed out (lives {})", self.round_id, self.lives);
        out
    }

    fn on_load_elapsed(&mut self, ticket: TaskTicket) -> Dispatch {
        if !self.load.accepts(ticket) {
            log::debug!("discarding stale puzzle load (generation {})", ticket.generation);
            return Dispatch::ignored();
        }
        self.load.cancel();
        let puzzle = self.generate();
        self.apply_puzzle(puzzle);
        Dispatch::applied()
    }

    fn lose_life(&mut self) {
        self.lives = self.lives.saturating_sub(1);
        self.last_points = 0;
        self.phase = Phase::Failed;
    }

    fn stop_countdown(&mut self, out: &mut Dispatch) {
        if self.countdown.cancel() {
            out.push(TimerCommand::StopCountdown);
        }
    }

    /// Throw away the current puzzle and fetch a new one for the current selection.
    fn request_puzzle(&mut self, out: &mut Dispatch) {
        self.stop_countdown(out);
        self.phase = Phase::Setup;
        self.time_remaining = None;

        if self.options.load_delay_ms == 0 {
            if self.load.cancel() {
                out.push(TimerCommand::CancelLoad);
            }
            let puzzle = self.generate();
            self.apply_puzzle(puzzle);
            return;
        }

        // Re-arming replaces whatever load was pending.
        self.loading = true;
        let ticket = self.load.arm();
        out.push(TimerCommand::ScheduleLoad {
            ticket,
            delay_ms: self.options.load_delay_ms,
        });
    }

    fn generate(&mut self) -> Puzzle {
        match self.category {
            Some(category) => self.generator.generate(category, self.difficulty),
            None => self
                .generator
                .generate_tagged(&self.category_tag, self.difficulty),
        }
    }

    fn apply_puzzle(&mut self, puzzle: Puzzle) {
        self.answers = vec![String::new(); puzzle.slot_count()];
        self.puzzle = Some(puzzle);
        self.loading = false;
        self.phase = Phase::Setup;
        self.time_remaining = None;
    }
}
