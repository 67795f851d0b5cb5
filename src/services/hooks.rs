//! Session hooks backed by desktop services

use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use super::{
    alarm::{AlarmPlayer, AlarmStatus},
    notification::{is_stop_alarm_action, send_notification},
};
use crate::state::{Notification, SessionHooks, TimerCommand, TimerRequest};

/// Plays the alarm sound and posts a notification whose action feeds a
/// `StopAlarm` command back into the timer loop
pub struct DesktopHooks {
    alarm: AlarmPlayer,
    commands: mpsc::WeakSender<TimerRequest>,
}

impl DesktopHooks {
    /// The weak sender keeps the hooks from holding the timer loop open
    pub fn new(status: AlarmStatus, commands: mpsc::WeakSender<TimerRequest>) -> Self {
        Self {
            alarm: AlarmPlayer::new(status),
            commands,
        }
    }
}

impl SessionHooks for DesktopHooks {
    fn start_alarm(&mut self) {
        self.alarm.play();
    }

    fn stop_alarm(&mut self) {
        self.alarm.stop();
    }

    fn post_notification(&mut self, notification: &Notification) {
        let notification = notification.clone();
        let commands = self.commands.clone();

        tokio::spawn(async move {
            let action = match send_notification(&notification).await {
                Ok(Some(action)) => action,
                Ok(None) => return,
                Err(e) => {
                    warn!("Failed to post notification: {}", e);
                    return;
                }
            };

            if !is_stop_alarm_action(&notification, &action) {
                debug!("Ignoring notification action: {}", action);
                return;
            }

            let Some(commands) = commands.upgrade() else {
                debug!("Timer loop gone, dropping notification action");
                return;
            };
            if let Err(e) = commands.send(TimerRequest::fire(TimerCommand::StopAlarm)).await {
                warn!("Failed to forward stop-alarm action: {}", e);
            }
        });
    }
}

/// Hooks that only log, for running without desktop services
#[derive(Debug, Default)]
pub struct LogHooks {
    status: AlarmStatus,
}

impl LogHooks {
    pub fn new(status: AlarmStatus) -> Self {
        Self { status }
    }
}

impl SessionHooks for LogHooks {
    fn start_alarm(&mut self) {
        info!("Alarm ringing");
        self.status.mark_playing(1);
    }

    fn stop_alarm(&mut self) {
        if self.status.is_playing() {
            info!("Alarm silenced");
        }
        self.status.mark_stopped(1);
    }

    fn post_notification(&mut self, notification: &Notification) {
        info!("Notification: {} [{}]", notification.title, notification.action_label);
    }
}
