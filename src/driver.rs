use std::sync::mpsc::Receiver;
use std::thread;
use std::time::{Duration, Instant};

use image::RgbaImage;

use crate::clock::TimerState;
use crate::session::{FrameReport, Session};
use crate::socket::Command;

/// Yields control between frames, standing in for a display refresh
/// callback. Keeps the loop testable without a real display.
pub trait FrameScheduler {
    /// Wait for the next frame opportunity. Returns false once the
    /// host cancelled the loop; no further frames run after that.
    fn next_frame(&mut self) -> bool;

    /// Stop granting frames.
    fn cancel(&mut self);
}

/// Fixed-interval scheduler for hosts without a vsync callback.
#[derive(Debug)]
pub struct IntervalScheduler {
    interval: Duration,
    cancelled: bool,
}

impl IntervalScheduler {
    pub fn new(interval: Duration) -> Self {
        IntervalScheduler {
            interval,
            cancelled: false,
        }
    }
}

impl FrameScheduler for IntervalScheduler {
    fn next_frame(&mut self) -> bool {
        if self.cancelled {
            return false;
        }
        thread::sleep(self.interval);
        !self.cancelled
    }

    fn cancel(&mut self) {
        self.cancelled = true;
    }
}

/// Grants a fixed number of frames, then stops. Used by tests and
/// bounded runs.
#[derive(Debug)]
pub struct CountedScheduler {
    remaining: usize,
}

impl CountedScheduler {
    pub fn new(frames: usize) -> Self {
        CountedScheduler { remaining: frames }
    }
}

impl FrameScheduler for CountedScheduler {
    fn next_frame(&mut self) -> bool {
        if self.remaining == 0 {
            return false;
        }
        self.remaining -= 1;
        true
    }

    fn cancel(&mut self) {
        self.remaining = 0;
    }
}

/// Why the animation loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The window completed; a final fully-painted frame was reported.
    Completed,
    /// The scheduler stopped granting frames first.
    Cancelled,
}

/// One frame handed to the host callback.
#[derive(Debug)]
pub struct Frame<'a> {
    pub report: FrameReport,
    pub surface: &'a RgbaImage,
    /// Set when a snapshot was requested over the control channel.
    pub snapshot: bool,
}

/// Drives a session frame by frame until its window completes.
///
/// Pausing freezes painting but not the wall clock: the fill is a pure
/// function of time, so resuming jumps to the current progress.
pub struct Driver<S> {
    session: Session,
    scheduler: S,
    commands: Option<Receiver<Command>>,
    paused: bool,
}

impl<S: FrameScheduler> Driver<S> {
    pub fn new(session: Session, scheduler: S) -> Self {
        Driver {
            session,
            scheduler,
            commands: None,
            paused: false,
        }
    }

    /// Attach a control channel; commands are drained at each frame.
    pub fn with_commands(mut self, commands: Receiver<Command>) -> Self {
        self.commands = Some(commands);
        self
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    fn drain_commands(&mut self) -> bool {
        let mut snapshot = false;
        if let Some(commands) = &self.commands {
            while let Ok(command) = commands.try_recv() {
                tracing::debug!(?command, "control command");
                match command {
                    Command::Pause => self.paused = true,
                    Command::Resume => self.paused = false,
                    Command::Toggle => self.paused = !self.paused,
                    Command::Snapshot => snapshot = true,
                }
            }
        }
        snapshot
    }

    /// The frame loop: evaluate, paint, report, reschedule until the
    /// window completes. Completion cancels the scheduler so nothing
    /// fires after the final frame.
    pub fn run<F>(&mut self, mut on_frame: F) -> Outcome
    where
        F: FnMut(Frame<'_>),
    {
        loop {
            let snapshot = self.drain_commands();

            if self.paused {
                if snapshot {
                    let report = self.session.report(Instant::now());
                    on_frame(Frame {
                        report,
                        surface: self.session.surface(),
                        snapshot: true,
                    });
                }
            } else {
                let report = self.session.step(Instant::now());
                let state = report.state;
                on_frame(Frame {
                    report,
                    surface: self.session.surface(),
                    snapshot,
                });
                if state == TimerState::Complete {
                    self.scheduler.cancel();
                    tracing::info!("fill complete");
                    return Outcome::Completed;
                }
            }

            if !self.scheduler.next_frame() {
                return Outcome::Cancelled;
            }
        }
    }
}
