//! Desktop notifications through notify-send

use tokio::process::Command;
use tracing::{debug, info};

use crate::state::Notification;

/// Program used to post notifications
pub const NOTIFY_PROGRAM: &str = "notify-send";
const APP_NAME: &str = "dial-timer";

/// Post a notification and wait for the user to act on it.
///
/// Returns the id of the invoked action, `None` if the notification was
/// dismissed.
pub async fn send_notification(notification: &Notification) -> Result<Option<String>, String> {
    debug!("Posting notification: {}", notification.title);

    let output = Command::new(NOTIFY_PROGRAM)
        .args(notify_args(notification))
        .output()
        .await
        .map_err(|e| format!("Failed to execute {}: {}", NOTIFY_PROGRAM, e))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(format!("{} failed: {}", NOTIFY_PROGRAM, stderr));
    }

    let action = parse_action(&String::from_utf8_lossy(&output.stdout));
    info!("Notification closed (action: {:?})", action);
    Ok(action)
}

/// Whether an invoked action asks to silence the alarm
pub fn is_stop_alarm_action(notification: &Notification, action: &str) -> bool {
    action == notification.action_id
}

/// Arguments for notify-send; the notification's action is its only button
fn notify_args(notification: &Notification) -> Vec<String> {
    let urgency = if notification.urgent { "critical" } else { "normal" };
    vec![
        format!("--app-name={}", APP_NAME),
        format!("--urgency={}", urgency),
        format!("--action={}={}", notification.action_id, notification.action_label),
        notification.title.clone(),
    ]
}

fn parse_action(stdout: &str) -> Option<String> {
    stdout
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_action() {
        assert_eq!(parse_action("stop-alarm\n"), Some("stop-alarm".to_string()));
        assert_eq!(parse_action("\n  \n"), None);
    }

    #[test]
    fn test_stop_actions() {
        let notification = Notification::session_finished();
        assert!(is_stop_alarm_action(&notification, "stop-alarm"));
        assert!(!is_stop_alarm_action(&notification, "default"));
        assert!(!is_stop_alarm_action(&notification, "snooze"));
    }

    #[test]
    fn test_single_stop_alarm_button() {
        let args = notify_args(&Notification::session_finished());
        let actions: Vec<_> = args.iter().filter(|arg| arg.starts_with("--action=")).collect();
        assert_eq!(actions, vec!["--action=stop-alarm=Stop Alarm"]);
        assert!(args.contains(&"--urgency=critical".to_string()));
        assert_eq!(args.last().map(String::as_str), Some("Session Finished"));
    }
}
