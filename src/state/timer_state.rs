//! Timer state structure and derived display helpers

use serde::{Deserialize, Serialize};

/// Length of one dial interval in seconds
pub const INTERVAL_SECONDS: u32 = 30;
/// Shortest configurable duration
pub const MIN_TOTAL_SECONDS: u32 = 30;
/// Longest configurable duration (one full turn of the dial)
pub const MAX_TOTAL_SECONDS: u32 = 3600;
/// Number of intervals around the dial
pub const DIAL_INTERVALS: u32 = MAX_TOTAL_SECONDS / INTERVAL_SECONDS;
/// Duration the timer starts with
pub const DEFAULT_TOTAL_SECONDS: u32 = 300;

/// Coarse phase of the countdown state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerPhase {
    Idle,
    Running,
    Paused,
}

/// Timer state for the dial countdown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerState {
    /// Configured duration, a multiple of 30 in [30, 3600]
    pub total_seconds: u32,
    /// Seconds left in the active countdown
    pub remaining_seconds: u32,
    /// A countdown tick is armed
    pub running: bool,
    /// Countdown suspended while the dial is re-dragged
    pub paused: bool,
    /// Between drag-begin and drag-end
    pub dragging: bool,
}

impl TimerState {
    /// Create an idle timer state with the default duration
    pub fn new() -> Self {
        Self::with_total(DEFAULT_TOTAL_SECONDS as i64)
    }

    /// Create an idle timer state, rounding and clamping the duration
    pub fn with_total(seconds: i64) -> Self {
        Self {
            total_seconds: clamp_total_seconds(seconds),
            remaining_seconds: 0,
            running: false,
            paused: false,
            dragging: false,
        }
    }

    pub fn phase(&self) -> TimerPhase {
        if self.running {
            TimerPhase::Running
        } else if self.paused {
            TimerPhase::Paused
        } else {
            TimerPhase::Idle
        }
    }

    /// Seconds shown on the time label
    pub fn display_seconds(&self) -> u32 {
        if self.running {
            self.remaining_seconds
        } else {
            self.total_seconds
        }
    }

    /// Zero-padded `MM:SS` label
    pub fn label(&self) -> String {
        let seconds = self.display_seconds();
        format!("{:02}:{:02}", seconds / 60, seconds % 60)
    }

    /// Label of the start/stop button
    pub fn action_label(&self) -> &'static str {
        if self.running { "Stop" } else { "Start Timer" }
    }

    pub fn can_add_time(&self) -> bool {
        self.total_seconds < MAX_TOTAL_SECONDS
    }

    pub fn can_remove_time(&self) -> bool {
        self.total_seconds > MIN_TOTAL_SECONDS
    }

    /// Fraction of a full dial turn covered by the configured duration
    pub fn progress_fraction(&self) -> f64 {
        self.total_seconds as f64 / MAX_TOTAL_SECONDS as f64
    }
}

impl Default for TimerState {
    fn default() -> Self {
        Self::new()
    }
}

/// Round a duration to the nearest interval step and clamp it into range
pub fn clamp_total_seconds(seconds: i64) -> u32 {
    let step = INTERVAL_SECONDS as i64;
    let clamped = seconds.clamp(MIN_TOTAL_SECONDS as i64, MAX_TOTAL_SECONDS as i64);
    (((clamped + step / 2) / step) * step) as u32
}
