//! Async session driver.
//!
//! Owns the [`Session`] on a single task: player commands arrive over an mpsc
//! channel, timer completions over another, and every applied dispatch is
//! published as a [`SessionSnapshot`] on a watch channel.

use anyhow::{anyhow, Context, Result};
use tokio::runtime::Runtime;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

use braintwist_core::{Dispatch, Notice, ProgressStore, Session, SessionEvent, SessionSnapshot};

use crate::config::RuntimeConfig;
use crate::scheduler::Scheduler;
use crate::types::SessionCommand;

/// Boxed progress collaborator handed back on shutdown.
pub type BoxedStore = Box<dyn ProgressStore + Send>;

/// Bound on queued player commands.
const COMMAND_QUEUE: usize = 64;

pub struct SessionRuntime {
    session: Session,
    scheduler: Scheduler,
    commands: mpsc::Receiver<SessionCommand>,
    timers: mpsc::UnboundedReceiver<SessionEvent>,
    snapshots: watch::Sender<SessionSnapshot>,
    notices: mpsc::UnboundedSender<Notice>,
    store: Option<BoxedStore>,
    user_id: String,
    reported_round: u64,
}

impl SessionRuntime {
    /// Spawn the driver on the current tokio runtime and return its handle.
    pub fn spawn(session: Session, store: Option<BoxedStore>, user_id: &str) -> SessionHandle {
        let (cmd_tx, cmd_rx) = mpsc::channel(COMMAND_QUEUE);
        let (timer_tx, timer_rx) = mpsc::unbounded_channel();
        let (notice_tx, notice_rx) = mpsc::unbounded_channel();
        let (snap_tx, snap_rx) = watch::channel(session.snapshot());

        let runtime = SessionRuntime {
            session,
            scheduler: Scheduler::new(timer_tx),
            commands: cmd_rx,
            timers: timer_rx,
            snapshots: snap_tx,
            notices: notice_tx,
            store,
            user_id: user_id.to_string(),
            reported_round: 0,
        };
        let task = tokio::spawn(runtime.run());

        SessionHandle {
            commands: cmd_tx,
            snapshots: snap_rx,
            notices: notice_rx,
            task,
        }
    }

    async fn run(mut self) -> Option<BoxedStore> {
        let opened = self.session.open();
        self.apply(opened);

        loop {
            tokio::select! {
                command = self.commands.recv() => match command {
                    Some(command) => {
                        let out = self.session.dispatch(command.into());
                        self.apply(out);
                    }
                    None => break,
                },
                Some(event) = self.timers.recv() => {
                    let out = self.session.dispatch(event);
                    self.apply(out);
                }
            }
        }

        log::debug!("session runtime stopped at round {}", self.session.round_id());
        self.scheduler.shutdown();
        self.store
    }

    fn apply(&mut self, out: Dispatch) {
        for command in out.commands {
            self.scheduler.apply(command);
        }
        if let Some(notice) = out.notice {
            log::info!("{}", notice.message());
            let _ = self.notices.send(notice);
        }
        self.report_round();
        if out.applied {
            self.snapshots.send_replace(self.session.snapshot());
        }
    }

    /// Record each finished round once.
    fn report_round(&mut self) {
        let Some(report) = self.session.round_report() else {
            return;
        };
        let round = self.session.round_id();
        if round == self.reported_round {
            return;
        }
        self.reported_round = round;

        let Some(store) = self.store.as_mut() else {
            return;
        };
        let puzzle_id = format!(
            "{}-{}",
            self.session.category_tag(),
            self.session.difficulty().as_str()
        );
        if let Err(err) = store.record(
            &self.user_id,
            &puzzle_id,
            self.session.category(),
            &report,
        ) {
            log::warn!("failed to record progress for {puzzle_id}: {err:#}");
        }
    }
}

/// Client side of a running [`SessionRuntime`].
pub struct SessionHandle {
    commands: mpsc::Sender<SessionCommand>,
    snapshots: watch::Receiver<SessionSnapshot>,
    notices: mpsc::UnboundedReceiver<Notice>,
    task: JoinHandle<Option<BoxedStore>>,
}

impl SessionHandle {
    pub async fn send(&self, command: SessionCommand) -> Result<()> {
        self.commands
            .send(command)
            .await
            .map_err(|_| anyhow!("session runtime has stopped"))
    }

    /// Non-blocking send for sync callers. Fails when the queue is full or closed.
    pub fn try_send(&self, command: SessionCommand) -> Result<()> {
        self.commands
            .try_send(command)
            .map_err(|err| anyhow!("command not queued: {err}"))
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        self.snapshots.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.snapshots.clone()
    }

    pub fn try_notice(&mut self) -> Option<Notice> {
        self.notices.try_recv().ok()
    }

    pub async fn next_notice(&mut self) -> Option<Notice> {
        self.notices.recv().await
    }

    /// Wait until a published snapshot satisfies `predicate`.
    pub async fn wait_for(
        &mut self,
        predicate: impl FnMut(&SessionSnapshot) -> bool,
    ) -> Result<SessionSnapshot> {
        let snapshot = self
            .snapshots
            .wait_for(predicate)
            .await
            .context("session runtime has stopped")?;
        Ok(snapshot.clone())
    }

    /// Stop the driver and return the progress store it was given.
    pub async fn shutdown(self) -> Result<Option<BoxedStore>> {
        let SessionHandle { commands, task, .. } = self;
        drop(commands);
        task.await.context("session runtime panicked")
    }
}

/// Session driver for synchronous callers (the terminal loop).
///
/// Owns its own tokio runtime.
pub struct SessionHost {
    rt: Runtime,
    handle: SessionHandle,
}

impl SessionHost {
    pub fn start(config: &RuntimeConfig, store: Option<BoxedStore>) -> Result<Self> {
        let rt = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()
            .context("failed to create tokio runtime")?;

        let session = config.build_session();
        let handle = {
            let _guard = rt.enter();
            SessionRuntime::spawn(session, store, &config.user_id)
        };
        log::info!(
            "session started: category={} difficulty={}",
            config.category,
            config.difficulty.as_str()
        );
        Ok(Self { rt, handle })
    }

    /// Returns false if the command was dropped.
    pub fn send(&self, command: SessionCommand) -> bool {
        match self.handle.try_send(command) {
            Ok(()) => true,
            Err(err) => {
                log::warn!("{err:#}");
                false
            }
        }
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        self.handle.snapshot()
    }

    pub fn try_notice(&mut self) -> Option<Notice> {
        self.handle.try_notice()
    }

    pub fn shutdown(self) -> Result<Option<BoxedStore>> {
        let SessionHost { rt, handle } = self;
        rt.block_on(handle.shutdown())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use braintwist_core::{MemoryProgressStore, PuzzleGenerator, SessionOptions, Solution};
    use crate::types::{Category, Difficulty, Phase};
    use std::time::Duration;

    fn seeded(category: Category, options: SessionOptions) -> Session {
        Session::with_generator(category.as_str(), options, PuzzleGenerator::with_seed(11))
    }

    fn math_answer() -> String {
        match PuzzleGenerator::with_seed(11)
            .generate(Category::Math, Difficulty::Easy)
            .solution()
        {
            Solution::Number(n) => n.to_string(),
            other => panic!("unexpected solution {other:?}"),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn first_puzzle_appears_after_load_delay() {
        let session = seeded(Category::Math, SessionOptions::default());
        let mut handle = SessionRuntime::spawn(session, None, "tester");

        let snap = handle.wait_for(|s| s.loading).await.unwrap();
        assert!(snap.puzzle.is_none());

        let snap = handle.wait_for(|s| s.puzzle.is_some()).await.unwrap();
        assert!(!snap.loading);
        assert_eq!(snap.phase, Phase::Setup);
        handle.shutdown().await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn countdown_runs_out() {
        let session = seeded(Category::Math, SessionOptions::immediate());
        let mut handle = SessionRuntime::spawn(session, None, "tester");
        handle.wait_for(|s| s.puzzle.is_some()).await.unwrap();

        handle.send(SessionCommand::Start).await.unwrap();
        let snap = handle.wait_for(|s| s.time_remaining == Some(59)).await.unwrap();
        assert_eq!(snap.phase, Phase::Playing);

        let snap = handle.wait_for(|s| s.phase == Phase::Failed).await.unwrap();
        assert_eq!(snap.time_remaining, Some(0));
        assert_eq!(snap.lives, 2);
        assert_eq!(handle.next_notice().await, Some(Notice::TimeUp));
        handle.shutdown().await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn solved_round_is_recorded_once() {
        let session = seeded(Category::Math, SessionOptions::immediate());
        let store: BoxedStore = Box::new(MemoryProgressStore::new());
        let mut handle = SessionRuntime::spawn(session, Some(store), "tester");
        handle.wait_for(|s| s.puzzle.is_some()).await.unwrap();

        handle.send(SessionCommand::Start).await.unwrap();
        tokio::time::sleep(Duration::from_millis(3500)).await;
        handle
            .send(SessionCommand::ChangeAnswer {
                slot: 0,
                value: math_answer(),
            })
            .await
            .unwrap();
        handle.send(SessionCommand::Submit).await.unwrap();
        let snap = handle.wait_for(|s| s.phase == Phase::Success).await.unwrap();
        assert_eq!(snap.score, 10 + 57 / 2);

        // Ignored commands after the round must not record it again.
        handle.send(SessionCommand::Submit).await.unwrap();
        let store = handle.shutdown().await.unwrap().unwrap();
        let records = store.list("tester").unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].puzzle_id, "math-easy");
        assert_eq!(records[0].attempts, 1);
        assert_eq!(records[0].time_taken, 3);
        assert!(records[0].completed);
    }

    #[test]
    fn host_drives_session_from_sync_code() {
        let config = RuntimeConfig {
            category: "logic".to_string(),
            options: SessionOptions::immediate(),
            seed: Some(5),
            ..RuntimeConfig::default()
        };
        let host = SessionHost::start(&config, None).unwrap();
        assert!(host.send(SessionCommand::SetDifficulty {
            difficulty: Difficulty::Hard
        }));
        let store = host.shutdown().unwrap();
        assert!(store.is_none());
    }
}
