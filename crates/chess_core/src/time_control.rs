//! Search limits and cooperative cancellation.
//!
//! A search never gets preempted. It polls a `TimeControl` at recursive-call
//! boundaries and unwinds on its own once the token reports stopped. Clones
//! share the stop flag, so another thread (a UCI `stop`, a match runner) can
//! end a search through its own copy.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, Instant};

/// Poll the clock once per this many nodes.
pub const CHECK_INTERVAL: u64 = 1024;

/// What bounds one `Engine::search` call.
#[derive(Debug, Clone)]
pub struct SearchLimits {
    /// Deepest iteration to run, in plies
    pub depth: u8,
    /// Wall-clock budget for this move (None = unbounded)
    pub move_time: Option<Duration>,
    pub time_control: TimeControl,
}

impl SearchLimits {
    pub fn depth(depth: u8) -> Self {
        Self {
            depth,
            move_time: None,
            time_control: TimeControl::new(None),
        }
    }

    pub fn depth_and_time(depth: u8, move_time: Duration) -> Self {
        Self {
            depth,
            move_time: Some(move_time),
            time_control: TimeControl::new(Some(move_time)),
        }
    }

    /// Deepen until the clock runs out.
    pub fn time(move_time: Duration) -> Self {
        Self::depth_and_time(u8::MAX, move_time)
    }

    /// Share an existing token, e.g. one a caller keeps to stop the search.
    pub fn with_time_control(mut self, time_control: TimeControl) -> Self {
        self.time_control = time_control;
        self
    }

    #[inline]
    pub fn should_stop(&self) -> bool {
        self.time_control.is_stopped()
    }

    pub fn start(&self) {
        self.time_control.start();
    }
}

impl Default for SearchLimits {
    fn default() -> Self {
        Self::depth(3)
    }
}

/// Shared stop flag plus an optional deadline.
#[derive(Debug, Clone)]
pub struct TimeControl {
    stopped: Arc<AtomicBool>,
    started_at: Arc<Mutex<Option<Instant>>>,
    time_limit: Option<Duration>,
}

impl TimeControl {
    pub fn new(time_limit: Option<Duration>) -> Self {
        Self {
            stopped: Arc::new(AtomicBool::new(false)),
            started_at: Arc::new(Mutex::new(None)),
            time_limit,
        }
    }

    /// Start the clock and clear any earlier stop.
    pub fn start(&self) {
        *self.lock_start() = Some(Instant::now());
        self.stopped.store(false, Ordering::SeqCst);
    }

    pub fn stop(&self) {
        self.stopped.store(true, Ordering::SeqCst);
    }

    #[inline]
    pub fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::Relaxed)
    }

    /// Read the clock and raise the stop flag if the budget is spent.
    pub fn check_time(&self) -> bool {
        if self.is_stopped() {
            return true;
        }
        let expired = match (self.time_limit, *self.lock_start()) {
            (Some(limit), Some(start)) => start.elapsed() >= limit,
            _ => false,
        };
        if expired {
            self.stop();
        }
        expired
    }

    /// Cheap per-node poll: reads the clock only every `CHECK_INTERVAL` nodes.
    #[inline]
    pub fn poll(&self, nodes: u64) -> bool {
        if nodes % CHECK_INTERVAL == 0 {
            self.check_time()
        } else {
            self.is_stopped()
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.lock_start()
            .map(|s| s.elapsed())
            .unwrap_or(Duration::ZERO)
    }

    /// None if there is no limit.
    pub fn remaining(&self) -> Option<Duration> {
        let limit = self.time_limit?;
        Some(limit.saturating_sub(self.elapsed()))
    }

    fn lock_start(&self) -> std::sync::MutexGuard<'_, Option<Instant>> {
        // The guarded value is a plain Instant, valid even after a panic elsewhere
        self.started_at.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for TimeControl {
    fn default() -> Self {
        Self::new(None)
    }
}

#[cfg(test)]
#[path = "time_control_tests.rs"]
mod time_control_tests;
