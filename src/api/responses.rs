//! API request and response structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::state::{TimerPhase, TimerState};

/// Timer state plus everything the shell needs to refresh its controls
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimerView {
    pub phase: TimerPhase,
    pub total_seconds: u32,
    pub remaining_seconds: u32,
    pub running: bool,
    pub paused: bool,
    pub dragging: bool,
    /// `MM:SS` time label
    pub label: String,
    /// Start/stop button label
    pub action: String,
    pub can_add_time: bool,
    pub can_remove_time: bool,
}

impl From<TimerState> for TimerView {
    fn from(state: TimerState) -> Self {
        Self {
            phase: state.phase(),
            total_seconds: state.total_seconds,
            remaining_seconds: state.remaining_seconds,
            running: state.running,
            paused: state.paused,
            dragging: state.dragging,
            label: state.label(),
            action: state.action_label().to_string(),
            can_add_time: state.can_add_time(),
            can_remove_time: state.can_remove_time(),
        }
    }
}

/// API response structure for state change endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse {
    pub status: TimerPhase,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub timer: TimerView,
}

impl ApiResponse {
    /// Create a new API response; the status follows the timer phase
    pub fn new(message: impl Into<String>, state: TimerState) -> Self {
        Self {
            status: state.phase(),
            message: message.into(),
            timestamp: Utc::now(),
            timer: state.into(),
        }
    }
}

/// Status response with shell information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub timer: TimerView,
    pub alarm_playing: bool,
    pub dial_width: f64,
    pub dial_height: f64,
    pub uptime: String,
    pub port: u16,
    pub host: String,
    pub last_action: Option<String>,
    pub last_action_time: Option<DateTime<Utc>>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
}

impl HealthResponse {
    /// Create a new health response
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            timestamp: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// Body of `POST /timer/duration`
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DurationRequest {
    Intervals { intervals: i64 },
    Seconds { seconds: i64 },
}

/// Pointer position in dial-local pixels
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PointerRequest {
    pub x: f64,
    pub y: f64,
}

/// Body of `POST /dial/resize`
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ResizeRequest {
    pub width: f64,
    pub height: f64,
}

/// Optional render size for dial rendering endpoints
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct RenderQuery {
    pub width: Option<f64>,
    pub height: Option<f64>,
}
