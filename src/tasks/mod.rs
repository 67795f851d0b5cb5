//! Background tasks module
//!
//! This module contains the task that owns the timer engine alongside the
//! HTTP server.

pub mod timer_loop;

// Re-export main functions
pub use timer_loop::{apply_command, timer_loop, TICK_PERIOD};
