//! Dial Timer - A single-session countdown timer driven by a circular dial
//!
//! This library provides the timer engine, the dial interaction and rendering
//! logic, and an HTTP shell that drives them from a single timer loop.

pub mod config;
pub mod state;
pub mod dial;
pub mod api;
pub mod services;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use state::{AppState, TimerEngine, TimerState};
pub use dial::{DialInteraction, DialStyle};
pub use api::create_router;
pub use utils::signals::shutdown_signal;
