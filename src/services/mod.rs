//! Desktop service module
//!
//! This module contains the external programs the shell drives: alarm
//! playback, notifications and tool availability checks.

pub mod alarm;
pub mod hooks;
pub mod notification;
pub mod system;

// Re-export main types and functions
pub use alarm::{AlarmPlayer, AlarmStatus, ALARM_PROGRAM};
pub use hooks::{DesktopHooks, LogHooks};
pub use notification::{send_notification, NOTIFY_PROGRAM};
pub use system::check_command_available;
