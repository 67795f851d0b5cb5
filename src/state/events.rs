//! Events emitted by the timer engine and the shell callbacks it drives

use serde::{Deserialize, Serialize};

use super::TimerState;

/// Event broadcast to state listeners
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "state", rename_all = "snake_case")]
pub enum TimerEvent {
    /// Fired after every mutation
    StateChanged(TimerState),
    /// Fired once when a countdown naturally reaches zero
    Completed,
}

/// Desktop notification posted when a session finishes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub id: String,
    pub title: String,
    pub action_id: String,
    pub action_label: String,
    pub urgent: bool,
}

impl Notification {
    pub fn session_finished() -> Self {
        Self {
            id: "session-finished".to_string(),
            title: "Session Finished".to_string(),
            action_id: "stop-alarm".to_string(),
            action_label: "Stop Alarm".to_string(),
            urgent: true,
        }
    }
}

/// Callbacks into the host shell.
///
/// Called synchronously from the engine on the event loop, so
/// implementations must not block.
pub trait SessionHooks: Send {
    /// Begin alarm playback
    fn start_alarm(&mut self);

    /// Silence alarm playback if it is playing
    fn stop_alarm(&mut self);

    /// Post a user notification
    fn post_notification(&mut self, notification: &Notification);
}

/// Hooks that do nothing
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopHooks;

impl SessionHooks for NoopHooks {
    fn start_alarm(&mut self) {}

    fn stop_alarm(&mut self) {}

    fn post_notification(&mut self, _notification: &Notification) {}
}
