//! Shared state of the HTTP shell

use std::{
    sync::{Arc, Mutex},
    time::Instant,
};
use chrono::{DateTime, Utc};
use tokio::sync::{mpsc, oneshot, watch};
use tracing::{debug, warn};

use super::TimerState;
use crate::dial::DialStyle;
use crate::services::AlarmStatus;

/// Operations the timer loop applies on behalf of the shell
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TimerCommand {
    Start,
    Stop,
    Toggle,
    AddTime,
    RemoveTime,
    SetDuration { intervals: i64 },
    SetTotalSeconds { seconds: i64 },
    StopAlarm,
    Press { x: f64, y: f64 },
    DragBegin { x: f64, y: f64 },
    DragUpdate { x: f64, y: f64 },
    DragEnd,
    Resize { width: f64, height: f64 },
}

/// A command plus an optional reply carrying the resulting state
#[derive(Debug)]
pub struct TimerRequest {
    pub command: TimerCommand,
    pub reply: Option<oneshot::Sender<TimerState>>,
}

impl TimerRequest {
    /// Request that nobody waits on
    pub fn fire(command: TimerCommand) -> Self {
        Self {
            command,
            reply: None,
        }
    }
}

/// State shared by the HTTP handlers
#[derive(Debug)]
pub struct AppState {
    /// Requests into the timer loop
    pub commands: mpsc::Sender<TimerRequest>,
    /// Latest timer state published by the engine
    pub timer_rx: watch::Receiver<TimerState>,
    /// Whether the alarm is currently sounding
    pub alarm: AlarmStatus,
    /// Rendering configuration
    pub style: DialStyle,
    pub dial_size: Arc<Mutex<(f64, f64)>>,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    /// Last action tracking
    pub last_action: Arc<Mutex<Option<String>>>,
    pub last_action_time: Arc<Mutex<Option<DateTime<Utc>>>>,
}

impl AppState {
    pub fn new(
        commands: mpsc::Sender<TimerRequest>,
        timer_rx: watch::Receiver<TimerState>,
        alarm: AlarmStatus,
        style: DialStyle,
        dial_size: (f64, f64),
        port: u16,
        host: String,
    ) -> Self {
        Self {
            commands,
            timer_rx,
            alarm,
            style,
            dial_size: Arc::new(Mutex::new(dial_size)),
            start_time: Instant::now(),
            port,
            host,
            last_action: Arc::new(Mutex::new(None)),
            last_action_time: Arc::new(Mutex::new(None)),
        }
    }

    /// Send a command to the timer loop and wait for the resulting state
    pub async fn dispatch(&self, action: &str, command: TimerCommand) -> Result<TimerState, String> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.commands
            .send(TimerRequest {
                command,
                reply: Some(reply_tx),
            })
            .await
            .map_err(|e| format!("Timer loop is not running: {}", e))?;

        let state = reply_rx
            .await
            .map_err(|e| format!("Timer loop dropped the reply: {}", e))?;

        if let TimerCommand::Resize { width, height } = command {
            match self.dial_size.lock() {
                Ok(mut size) => *size = (width, height),
                Err(e) => warn!("Failed to record dial size: {}", e),
            }
        }

        // Update last action tracking
        if let Ok(mut last_action) = self.last_action.lock() {
            *last_action = Some(action.to_string());
        }
        if let Ok(mut last_time) = self.last_action_time.lock() {
            *last_time = Some(Utc::now());
        }

        debug!("Applied {} -> {:?}", action, state.phase());
        Ok(state)
    }

    /// Get current timer state
    pub fn get_timer_state(&self) -> TimerState {
        *self.timer_rx.borrow()
    }

    /// Dial widget size used when no explicit size is requested
    pub fn get_dial_size(&self) -> Result<(f64, f64), String> {
        self.dial_size.lock()
            .map(|size| *size)
            .map_err(|e| format!("Failed to lock dial size: {}", e))
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }

    /// Get last action information
    pub fn get_last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        let last_action = self.last_action.lock().ok().and_then(|a| a.clone());
        let last_action_time = self.last_action_time.lock().ok().and_then(|t| *t);
        (last_action, last_action_time)
    }
}
