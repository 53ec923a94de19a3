use std::time::{Duration, Instant};

use crate::error::{Error, Result};

/// Where a point in time falls relative to a timer window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerState {
    /// Before the window opens.
    Pending,
    /// Inside the window.
    Running,
    /// At or past the window end.
    Complete,
}

/// The fixed wall-clock interval a fill animates across.
///
/// Immutable once built; changing the window means building a new
/// session around a new one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    start: Instant,
    end: Instant,
}

/// Result of evaluating a window at one instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Evaluation {
    pub state: TimerState,
    /// Fraction of the window elapsed, in [0, 1].
    pub progress: f64,
    pub remaining: Duration,
}

impl TimeWindow {
    pub fn new(start: Instant, end: Instant) -> Result<Self> {
        if end <= start {
            return Err(Error::InvalidWindow);
        }
        Ok(TimeWindow { start, end })
    }

    /// Window of `duration` total that already ran for `elapsed` when
    /// observed at `now`. `elapsed = 0` gives a timer starting now.
    pub fn starting_at(now: Instant, elapsed: Duration, duration: Duration) -> Result<Self> {
        let start = now.checked_sub(elapsed).unwrap_or(now);
        Self::new(start, start + duration)
    }

    pub fn start(&self) -> Instant {
        self.start
    }

    pub fn end(&self) -> Instant {
        self.end
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// The instant at which the window reaches `progress` (clamped to [0, 1]).
    pub fn instant_at(&self, progress: f64) -> Instant {
        let offset = self.duration().as_secs_f64() * progress.clamp(0.0, 1.0);
        self.start + Duration::from_secs_f64(offset)
    }

    /// Classify `now` against the window. Stateless: repeated calls
    /// with the same `now` return identical results.
    pub fn evaluate(&self, now: Instant) -> Evaluation {
        if now >= self.end {
            Evaluation {
                state: TimerState::Complete,
                progress: 1.0,
                remaining: Duration::ZERO,
            }
        } else if now <= self.start {
            Evaluation {
                state: TimerState::Pending,
                progress: 0.0,
                remaining: self.duration(),
            }
        } else {
            let elapsed = now - self.start;
            Evaluation {
                state: TimerState::Running,
                progress: elapsed.as_secs_f64() / self.duration().as_secs_f64(),
                remaining: self.end - now,
            }
        }
    }
}

/// Format a remaining duration as day/hour/minute/second components,
/// collapsing leading zero units: `2d 3h 4m`, `3h 4m 5s`, `4m 5s`, `5s`.
pub fn format_remaining(remaining: Duration) -> String {
    if remaining.is_zero() {
        return "Completed".to_string();
    }

    let total_secs = remaining.as_secs();
    let days = total_secs / 86_400;
    let hours = (total_secs % 86_400) / 3600;
    let minutes = (total_secs % 3600) / 60;
    let seconds = total_secs % 60;

    if days > 0 {
        format!("{days}d {hours}h {minutes}m")
    } else if hours > 0 {
        format!("{hours}h {minutes}m {seconds}s")
    } else if minutes > 0 {
        format!("{minutes}m {seconds}s")
    } else {
        format!("{seconds}s")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn window(now: Instant, secs: u64) -> TimeWindow {
        TimeWindow::new(now, now + Duration::from_secs(secs)).unwrap()
    }

    #[test]
    fn test_rejects_degenerate_window() {
        let now = Instant::now();
        assert!(matches!(
            TimeWindow::new(now, now),
            Err(Error::InvalidWindow)
        ));
        assert!(matches!(
            TimeWindow::new(now + Duration::from_secs(1), now),
            Err(Error::InvalidWindow)
        ));
    }

    #[test]
    fn test_pending_before_start() -> crate::error::Result<()> {
        let now = Instant::now();
        let w = TimeWindow::new(now + Duration::from_secs(5), now + Duration::from_secs(15))?;

        let eval = w.evaluate(now);
        assert_eq!(eval.state, TimerState::Pending);
        assert_eq!(eval.progress, 0.0);
        assert_eq!(eval.remaining, Duration::from_secs(10));

        // exactly at start still counts as pending
        let at_start = w.evaluate(now + Duration::from_secs(5));
        assert_eq!(at_start.state, TimerState::Pending);
        Ok(())
    }

    #[test]
    fn test_running_midway() -> crate::error::Result<()> {
        let now = Instant::now();
        let w = window(now, 10);

        let eval = w.evaluate(now + Duration::from_secs(5));
        assert_eq!(eval.state, TimerState::Running);
        assert_eq!(eval.progress, 0.5);
        assert_eq!(eval.remaining, Duration::from_secs(5));
        Ok(())
    }

    #[test]
    fn test_complete_at_and_after_end() -> crate::error::Result<()> {
        let now = Instant::now();
        let w = window(now, 10);

        for at in [10, 11, 1000] {
            let eval = w.evaluate(now + Duration::from_secs(at));
            assert_eq!(eval.state, TimerState::Complete);
            assert_eq!(eval.progress, 1.0);
            assert_eq!(eval.remaining, Duration::ZERO);
        }
        Ok(())
    }

    #[test]
    fn test_evaluate_is_idempotent() -> crate::error::Result<()> {
        let now = Instant::now();
        let w = window(now, 30);
        let at = now + Duration::from_secs(7);

        let first = w.evaluate(at);
        for _ in 0..10 {
            assert_eq!(w.evaluate(at), first);
        }
        Ok(())
    }

    #[test]
    fn test_starting_at_backdates_window() -> crate::error::Result<()> {
        let now = Instant::now();
        let w = TimeWindow::starting_at(now, Duration::from_secs(3), Duration::from_secs(10))?;

        let eval = w.evaluate(now);
        assert_eq!(eval.state, TimerState::Running);
        assert!((eval.progress - 0.3).abs() < 1e-9);
        Ok(())
    }

    #[test]
    fn test_instant_at_maps_progress() -> crate::error::Result<()> {
        let now = Instant::now();
        let w = window(now, 10);

        assert_eq!(w.instant_at(0.0), w.start());
        assert_eq!(w.instant_at(1.0), w.end());
        assert_eq!(w.instant_at(2.5), w.end());
        assert_eq!(w.evaluate(w.instant_at(0.5)).progress, 0.5);
        Ok(())
    }

    #[test]
    fn test_format_remaining_collapses_units() {
        assert_eq!(format_remaining(Duration::ZERO), "Completed");
        assert_eq!(format_remaining(Duration::from_secs(5)), "5s");
        assert_eq!(format_remaining(Duration::from_secs(4 * 60 + 5)), "4m 5s");
        assert_eq!(
            format_remaining(Duration::from_secs(3 * 3600 + 4 * 60 + 5)),
            "3h 4m 5s"
        );
        assert_eq!(
            format_remaining(Duration::from_secs(2 * 86_400 + 3 * 3600 + 4 * 60 + 5)),
            "2d 3h 4m"
        );
    }

    #[test]
    fn test_format_remaining_subsecond() {
        // under a second rounds down to whole seconds, not "Completed"
        assert_eq!(format_remaining(Duration::from_millis(400)), "0s");
    }
}
