//! State management module
//!
//! This module contains the timer state, the engine that mutates it and the
//! shared application state used by the HTTP shell.

pub mod app_state;
pub mod engine;
pub mod events;
pub mod tick;
pub mod timer_state;

// Re-export main types
pub use app_state::{AppState, TimerCommand, TimerRequest};
pub use engine::TimerEngine;
pub use events::{Notification, NoopHooks, SessionHooks, TimerEvent};
pub use tick::TickHandle;
pub use timer_state::{
    clamp_total_seconds, TimerPhase, TimerState, DEFAULT_TOTAL_SECONDS, DIAL_INTERVALS,
    INTERVAL_SECONDS, MAX_TOTAL_SECONDS, MIN_TOTAL_SECONDS,
};
