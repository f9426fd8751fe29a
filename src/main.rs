//! Terminal BrainTwist runner (default binary).
//!
//! Draws the session with the framebuffer renderer and forwards key presses to
//! the session runtime. Progress is kept in memory for the run and summarized
//! on exit.

use std::fs::OpenOptions;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEventKind};

use braintwist::core::{
    default_catalog, unlocked, MemoryProgressStore, Notice, ProgressStats, ProgressStore,
    SessionSnapshot,
};
use braintwist::input::{map_key, should_quit, AnswerCursor};
use braintwist::runtime::{BoxedStore, RuntimeConfig, SessionHost};
use braintwist::term::{FrameBuffer, Overlay, SessionView, TerminalRenderer, Viewport};
use braintwist::types::SessionCommand;

const FRAME: Duration = Duration::from_millis(50);
const TOAST: Duration = Duration::from_secs(3);

fn main() -> Result<()> {
    let config = RuntimeConfig::from_env();
    init_logging(&config)?;

    let store: BoxedStore = Box::new(MemoryProgressStore::new());
    let mut host = SessionHost::start(&config, Some(store))?;

    let mut term = TerminalRenderer::new();
    term.enter()?;
    let result = run(&mut term, &mut host);
    // Always try to restore terminal state.
    let _ = term.exit();

    if let Some(store) = host.shutdown()? {
        print_progress(store.as_ref(), &config.user_id)?;
    }
    result
}

/// Log to `BRAINTWIST_LOG_PATH` when set; stderr would tear the alternate screen.
fn init_logging(config: &RuntimeConfig) -> Result<()> {
    let Some(path) = config.log_path.as_deref() else {
        return Ok(());
    };
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("failed to open log file {path}"))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .try_init()
        .context("logger already initialized")?;
    Ok(())
}

fn run(term: &mut TerminalRenderer, host: &mut SessionHost) -> Result<()> {
    let view = SessionView;
    let mut cursor = AnswerCursor::new();
    let mut fb = FrameBuffer::new(0, 0);
    let mut toast: Option<(Notice, Instant)> = None;

    loop {
        while let Some(notice) = host.try_notice() {
            toast = Some((notice, Instant::now()));
        }
        if toast.as_ref().is_some_and(|(_, at)| at.elapsed() >= TOAST) {
            toast = None;
        }

        let mut snapshot = host.snapshot();
        cursor.sync(&snapshot);

        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        let overlay = Overlay {
            focus: Some(cursor.slot()),
            toast: toast.as_ref().map(|(notice, _)| notice),
        };
        view.render_into(&snapshot, overlay, Viewport::new(w, h), &mut fb);
        term.draw(&fb)?;

        let mut timeout = FRAME;
        while event::poll(timeout)? {
            timeout = Duration::ZERO;
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if should_quit(key, &snapshot) {
                        return Ok(());
                    }
                    if let Some(command) = map_key(key, &snapshot, &mut cursor) {
                        apply_local(&mut snapshot, &command);
                        host.send(command);
                    }
                }
                Event::Resize(..) => term.invalidate(),
                _ => {}
            }
        }
    }
}

/// Mirror an answer edit into the local snapshot so keys read in the same
/// frame build on it.
fn apply_local(snapshot: &mut SessionSnapshot, command: &SessionCommand) {
    if let SessionCommand::ChangeAnswer { slot, value } = command {
        if let Some(answer) = snapshot.answers.get_mut(*slot) {
            answer.clone_from(value);
        }
    }
}

fn print_progress(store: &dyn ProgressStore, user_id: &str) -> Result<()> {
    let records = store.list(user_id)?;
    let stats = ProgressStats::from_records(&records);
    println!(
        "Puzzles completed: {}  Points: {}  Attempts: {}",
        stats.completed, stats.points, stats.attempts
    );

    let catalog = default_catalog();
    for achievement in unlocked(&catalog, &records) {
        println!(
            "Achievement unlocked: {} ({} pts) - {}",
            achievement.title, achievement.points, achievement.description
        );
    }
    log::info!(
        "session ended for {user_id}: {} completed, {} points",
        stats.completed,
        stats.points
    );
    Ok(())
}
