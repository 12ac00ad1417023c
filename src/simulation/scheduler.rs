//! Tick scheduling, decoupled from the simulation itself.
//!
//! The scheduler only answers "how many ticks are due now?". Whoever owns it
//! runs that many `update` calls, so the same transition function serves both
//! the on-screen real-time mode and fast headless training.

use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

/// Tick rate preset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SpeedMode {
    /// Normal viewing speed.
    #[default]
    Standard,
    /// Faster preset for watching training progress.
    Accelerated,
}

/// How many ticks a single scheduler firing executes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ScheduleMode {
    /// One tick per firing.
    #[default]
    RealTime,
    /// Many ticks per firing, for training without visual feedback.
    Batch {
        /// Ticks executed synchronously per firing.
        ticks_per_fire: usize,
    },
}

impl ScheduleMode {
    /// Ticks executed per firing.
    pub fn ticks_per_fire(self) -> usize {
        match self {
            ScheduleMode::RealTime => 1,
            ScheduleMode::Batch { ticks_per_fire } => ticks_per_fire,
        }
    }
}

/// Fixed-rate firing clock that can be stopped and restarted.
#[derive(Debug, Clone)]
pub struct TickScheduler {
    interval: Duration,
    mode: ScheduleMode,
    max_catch_up: usize,
    /// Reference point of the last accounted firing; `None` while stopped.
    last_fire: Option<Instant>,
}

impl TickScheduler {
    /// Creates a stopped scheduler firing `rate` times per second.
    ///
    /// # Panics
    ///
    /// Panics if `rate` is not positive and finite.
    pub fn new(rate: f64, mode: ScheduleMode, max_catch_up: usize) -> Self {
        Self {
            interval: Duration::from_secs_f64(1.0 / rate),
            mode,
            max_catch_up: max_catch_up.max(1),
            last_fire: None,
        }
    }

    /// Time between firings.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Scheduling mode.
    pub fn mode(&self) -> ScheduleMode {
        self.mode
    }

    /// Starts (or restarts) firing, with the first firing one interval after `now`.
    ///
    /// Any firing pending from a previous start is discarded.
    pub fn start(&mut self, now: Instant) {
        self.last_fire = Some(now);
    }

    /// Stops firing. Pending firings are discarded.
    pub fn stop(&mut self) {
        self.last_fire = None;
    }

    /// Whether the scheduler is firing.
    pub fn is_running(&self) -> bool {
        self.last_fire.is_some()
    }

    /// Returns the number of ticks due at `now` and marks them as consumed.
    ///
    /// At most `max_catch_up` firings are reported at once in real-time mode
    /// and a single firing in batch mode; a larger backlog is dropped rather
    /// than replayed.
    pub fn due_ticks(&mut self, now: Instant) -> usize {
        let Some(last) = self.last_fire else {
            return 0;
        };

        let elapsed = now.saturating_duration_since(last);
        let firings = (elapsed.as_secs_f64() / self.interval.as_secs_f64()).floor() as usize;
        if firings == 0 {
            return 0;
        }

        let cap = match self.mode {
            ScheduleMode::RealTime => self.max_catch_up,
            ScheduleMode::Batch { .. } => 1,
        };
        let fired = if firings > cap {
            self.last_fire = Some(now);
            cap
        } else {
            self.last_fire = Some(last + self.interval.mul_f64(firings as f64));
            firings
        };

        fired * self.mode.ticks_per_fire()
    }
}
