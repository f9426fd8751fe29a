//! SessionView: maps a `SessionSnapshot` into styled text lines and a framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::{format_clock, Notice, PuzzleView, SessionSnapshot};
use crate::fb::{FrameBuffer, Tone};
use crate::types::{Category, Difficulty, Phase, MAX_LIVES};

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub text: String,
    pub tone: Tone,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewLine {
    pub spans: Vec<Span>,
}

impl ViewLine {
    fn blank() -> Self {
        Self::default()
    }

    fn of(text: impl Into<String>, tone: Tone) -> Self {
        Self::default().push(text, tone)
    }

    fn push(mut self, text: impl Into<String>, tone: Tone) -> Self {
        self.spans.push(Span {
            text: text.into(),
            tone,
        });
        self
    }

    pub fn text(&self) -> String {
        self.spans.iter().map(|s| s.text.as_str()).collect()
    }

    pub fn width(&self) -> usize {
        self.spans.iter().map(|s| s.text.chars().count()).sum()
    }
}

/// Input-side state the snapshot does not carry.
#[derive(Debug, Clone, Copy, Default)]
pub struct Overlay<'a> {
    /// Focused answer slot.
    pub focus: Option<usize>,
    pub toast: Option<&'a Notice>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SessionView;

impl SessionView {
    pub fn lines(&self, snap: &SessionSnapshot, overlay: Overlay<'_>) -> Vec<ViewLine> {
        let mut lines = vec![
            title_line(snap),
            ViewLine::blank(),
            difficulty_line(snap),
            status_line(snap),
            ViewLine::blank(),
        ];

        match (&snap.puzzle, snap.loading) {
            (Some(puzzle), false) => {
                lines.push(ViewLine::of(puzzle.instructions.clone(), Tone::Muted));
                lines.push(ViewLine::blank());
                if snap.phase == Phase::Setup {
                    lines.push(ViewLine::of("Ready when you are.", Tone::Plain));
                } else {
                    puzzle_lines(snap, puzzle, overlay.focus, &mut lines);
                }
            }
            _ => lines.push(ViewLine::of("Loading puzzle...", Tone::Muted)),
        }

        lines.push(ViewLine::blank());
        if let Some(line) = result_line(snap) {
            lines.push(line);
        }
        if let Some(notice) = overlay.toast {
            let tone = if notice.is_success() {
                Tone::Good
            } else {
                Tone::Bad
            };
            lines.push(ViewLine::of(notice.message(), tone));
        }
        lines.push(ViewLine::of(help_text(snap), Tone::Muted));
        lines
    }

    /// Render into an existing framebuffer, centered in the viewport.
    pub fn render_into(
        &self,
        snap: &SessionSnapshot,
        overlay: Overlay<'_>,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.reset(viewport.width, viewport.height);
        let lines = self.lines(snap, overlay);

        let card_w = lines.iter().map(ViewLine::width).max().unwrap_or(0) as u16;
        let start_x = viewport.width.saturating_sub(card_w) / 2;
        let start_y = viewport.height.saturating_sub(lines.len() as u16) / 2;

        for (row, line) in lines.iter().enumerate() {
            let y = start_y.saturating_add(row as u16);
            let mut x = start_x;
            for span in &line.spans {
                x = fb.put_str(x, y, &span.text, span.tone.into());
            }
        }
    }

    pub fn render(
        &self,
        snap: &SessionSnapshot,
        overlay: Overlay<'_>,
        viewport: Viewport,
    ) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, overlay, viewport, &mut fb);
        fb
    }
}

fn category_label(snap: &SessionSnapshot) -> String {
    match snap.category {
        Some(Category::Pattern) => "Pattern Recognition".to_string(),
        Some(Category::Word) => "Word Scramble".to_string(),
        Some(Category::Math) => "Math Challenge".to_string(),
        Some(Category::Logic) => "Logic Puzzle".to_string(),
        None => format!("Unknown category \"{}\"", snap.category_tag),
    }
}

fn title_line(snap: &SessionSnapshot) -> ViewLine {
    ViewLine::of("BrainTwist", Tone::Title)
        .push("  ", Tone::Plain)
        .push(category_label(snap), Tone::Accent)
}

fn difficulty_line(snap: &SessionSnapshot) -> ViewLine {
    let mut line = ViewLine::of("Difficulty ", Tone::Plain);
    for (i, d) in Difficulty::ALL.iter().enumerate() {
        let tone = if *d == snap.difficulty {
            Tone::Highlight
        } else if snap.selectable() {
            Tone::Plain
        } else {
            Tone::Muted
        };
        line = line
            .push(" ", Tone::Plain)
            .push(format!(" {} {} ", i + 1, capitalize(d.as_str())), tone);
    }
    line
}

fn status_line(snap: &SessionSnapshot) -> ViewLine {
    let lost = MAX_LIVES.saturating_sub(snap.lives);
    let hearts = "\u{2665}".repeat(snap.lives as usize) + &"\u{2661}".repeat(lost as usize);
    let seconds = snap
        .time_remaining
        .unwrap_or_else(|| snap.difficulty.time_budget_secs());
    let clock_tone = if snap.phase == Phase::Playing && seconds <= 10 {
        Tone::Bad
    } else {
        Tone::Plain
    };

    ViewLine::of("Lives ", Tone::Plain)
        .push(hearts, Tone::Bad)
        .push("   Score ", Tone::Plain)
        .push(snap.score.to_string(), Tone::Accent)
        .push("   Time ", Tone::Plain)
        .push(format_clock(seconds), clock_tone)
        .push("   Attempts ", Tone::Plain)
        .push(snap.attempts.to_string(), Tone::Plain)
}

fn puzzle_lines(
    snap: &SessionSnapshot,
    puzzle: &PuzzleView,
    focus: Option<usize>,
    lines: &mut Vec<ViewLine>,
) {
    let playing = snap.phase == Phase::Playing;
    let answer = |slot: usize| snap.answers.get(slot).map(String::as_str).unwrap_or("");
    let slot_tone = |slot: usize| {
        if playing && focus == Some(slot) {
            Tone::Highlight
        } else {
            Tone::Accent
        }
    };

    if let Some(options) = &puzzle.options {
        lines.push(ViewLine::of(puzzle.prompt.join(" "), Tone::Plain));
        lines.push(ViewLine::blank());
        for (i, option) in options.iter().enumerate() {
            let chosen = answer(0) == option;
            let (marker, tone) = if chosen {
                ("(*)", Tone::Highlight)
            } else {
                ("( )", Tone::Plain)
            };
            lines.push(ViewLine::of(format!("{marker} {}. {option}", i + 1), tone));
        }
        return;
    }

    match puzzle.category {
        Some(Category::Word) => {
            lines.push(
                ViewLine::of("Letters ", Tone::Plain).push(puzzle.prompt.join(" "), Tone::Accent),
            );
            let mut slots = ViewLine::of("Answer  ", Tone::Plain);
            for slot in 0..puzzle.editable.len() {
                let text = match answer(slot) {
                    "" => "_".to_string(),
                    s => s.to_string(),
                };
                slots = slots.push(format!("[{text}]"), slot_tone(slot));
            }
            lines.push(slots);
        }
        Some(Category::Math) => {
            lines.push(ViewLine::of(puzzle.prompt.join(" "), Tone::Accent));
            let text = match answer(0) {
                "" => "_",
                s => s,
            };
            lines.push(
                ViewLine::of("Answer  ", Tone::Plain).push(format!(" {text} "), slot_tone(0)),
            );
        }
        // Pattern grids and the fallback share a layout.
        _ => {
            let mut grid = ViewLine::default();
            for (slot, token) in puzzle.prompt.iter().enumerate() {
                if slot > 0 {
                    grid = grid.push(" ", Tone::Plain);
                }
                if puzzle.editable.get(slot).copied().unwrap_or(false) {
                    let text = match answer(slot) {
                        "" => "?",
                        s => s,
                    };
                    grid = grid.push(format!("[{text:^3}]"), slot_tone(slot));
                } else {
                    grid = grid.push(format!("[{token:^3}]"), Tone::Plain);
                }
            }
            lines.push(grid);
        }
    }
}

fn result_line(snap: &SessionSnapshot) -> Option<ViewLine> {
    match snap.phase {
        Phase::Success => Some(ViewLine::of(
            format!("Solved! +{} points", snap.last_points),
            Tone::Good,
        )),
        Phase::Failed if snap.lives == 0 => Some(ViewLine::of(
            format!("Game over. Final score {}", snap.score),
            Tone::Bad,
        )),
        Phase::Failed => Some(ViewLine::of("Not this time.", Tone::Bad)),
        _ => None,
    }
}

fn help_text(snap: &SessionSnapshot) -> &'static str {
    if snap.loading {
        return "Esc: quit";
    }
    match snap.phase {
        Phase::Setup => "Enter: start   1-3: difficulty   Tab: category   q: quit",
        Phase::Playing => match snap.puzzle.as_ref().and_then(|p| p.options.as_ref()) {
            Some(_) => "Up/Down or 1-4: choose   Enter: submit   Esc: quit",
            None => "Type your answer   Enter: submit   Esc: quit",
        },
        Phase::Success => "Enter: next puzzle   q: quit",
        Phase::Failed if snap.lives == 0 => "Enter: new game   q: quit",
        Phase::Failed => "Enter: try again   q: quit",
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
