//! Cooperative time management for the search strategies.
//!
//! A search checks the shared stop flag as it descends and returns the best
//! move found so far once the budget is spent. The flag is an atomic, so
//! polling it per node is cheap; the actual clock read happens only every
//! `check_interval` nodes.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

/// Depth and time bounds for one search. Time wins: when the clock expires
/// the search must back out with whatever it has.
#[derive(Debug, Clone)]
pub struct SearchLimits {
    /// Maximum depth in plies.
    pub depth: u8,
    /// Wall-clock budget for this move (None = unbounded).
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

    pub fn time(move_time: Duration) -> Self {
        Self {
            depth: u8::MAX,
            move_time: Some(move_time),
            time_control: TimeControl::new(Some(move_time)),
        }
    }

    #[inline]
    pub fn should_stop(&self) -> bool {
        self.time_control.is_stopped()
    }

    /// Arm the clock. Call once when the search begins.
    pub fn start(&self) {
        self.time_control.start();
    }
}

impl Default for SearchLimits {
    fn default() -> Self {
        Self::depth(4)
    }
}

/// Cheaply cloneable stop signal shared between a search and whoever might
/// want to interrupt it.
#[derive(Debug, Clone)]
pub struct TimeControl {
    stopped: Arc<AtomicBool>,
    start_time: Arc<std::sync::RwLock<Option<Instant>>>,
    time_limit: Option<Duration>,
    /// Clock-read cadence in nodes.
    check_interval: u64,
}

impl TimeControl {
    pub fn new(time_limit: Option<Duration>) -> Self {
        Self {
            stopped: Arc::new(AtomicBool::new(false)),
            start_time: Arc::new(std::sync::RwLock::new(None)),
            time_limit,
            check_interval: 1024,
        }
    }

    pub fn start(&self) {
        *self.start_time.write().unwrap() = Some(Instant::now());
        self.stopped.store(false, Ordering::SeqCst);
    }

    pub fn stop(&self) {
        self.stopped.store(true, Ordering::SeqCst);
    }

    #[inline]
    pub fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::Relaxed)
    }

    /// Read the clock and latch the stop flag if the budget is spent.
    pub fn check_time(&self) -> bool {
        if self.is_stopped() {
            return true;
        }

        if let Some(limit) = self.time_limit
            && let Some(start) = *self.start_time.read().unwrap()
            && start.elapsed() >= limit
        {
            self.stop();
            return true;
        }

        false
    }

    #[inline]
    pub fn should_check_time(&self, nodes: u64) -> bool {
        nodes.is_multiple_of(self.check_interval)
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time
            .read()
            .unwrap()
            .map(|s| s.elapsed())
            .unwrap_or(Duration::ZERO)
    }
}

impl Default for TimeControl {
    fn default() -> Self {
        Self::new(None)
    }
}
