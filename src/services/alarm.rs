//! Alarm playback through the desktop sound theme

use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};
use tokio::{process::Command, sync::oneshot};
use tracing::{debug, info, warn};

/// Program used to play the alarm sound
pub const ALARM_PROGRAM: &str = "canberra-gtk-play";
const ALARM_ARGS: [&str; 2] = ["--id=alarm-clock-elapsed", "--description=Session Finished"];

/// Shared view of whether an alarm is sounding.
///
/// Holds the generation of the playing alarm, zero when silent, so a
/// finished older playback cannot clear a newer one.
#[derive(Debug, Clone, Default)]
pub struct AlarmStatus(Arc<AtomicU64>);

impl AlarmStatus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_playing(&self) -> bool {
        self.0.load(Ordering::SeqCst) != 0
    }

    pub(crate) fn mark_playing(&self, generation: u64) {
        self.0.store(generation, Ordering::SeqCst);
    }

    pub(crate) fn mark_stopped(&self, generation: u64) {
        let _ = self
            .0
            .compare_exchange(generation, 0, Ordering::SeqCst, Ordering::SeqCst);
    }
}

/// Plays the alarm as a child process and kills it on request
#[derive(Debug, Default)]
pub struct AlarmPlayer {
    status: AlarmStatus,
    generation: u64,
    stop_tx: Option<oneshot::Sender<()>>,
}

impl AlarmPlayer {
    pub fn new(status: AlarmStatus) -> Self {
        Self {
            status,
            generation: 0,
            stop_tx: None,
        }
    }

    pub fn status(&self) -> &AlarmStatus {
        &self.status
    }

    /// Start playback, replacing any alarm still sounding.
    ///
    /// Must be called from within a tokio runtime.
    pub fn play(&mut self) {
        self.stop();

        let mut child = match Command::new(ALARM_PROGRAM)
            .args(ALARM_ARGS)
            .kill_on_drop(true)
            .spawn()
        {
            Ok(child) => child,
            Err(e) => {
                warn!("Failed to start alarm playback with {}: {}", ALARM_PROGRAM, e);
                return;
            }
        };

        self.generation += 1;
        let generation = self.generation;
        let status = self.status.clone();
        let (stop_tx, stop_rx) = oneshot::channel();
        self.stop_tx = Some(stop_tx);
        status.mark_playing(generation);
        info!("Alarm playing");

        tokio::spawn(async move {
            tokio::select! {
                result = child.wait() => match result {
                    Ok(exit) => debug!("Alarm playback finished ({})", exit),
                    Err(e) => warn!("Failed to wait for alarm playback: {}", e),
                },
                _ = stop_rx => {
                    if let Err(e) = child.kill().await {
                        warn!("Failed to kill alarm playback: {}", e);
                    }
                    debug!("Alarm playback killed");
                }
            }
            status.mark_stopped(generation);
        });
    }

    pub fn stop(&mut self) {
        if let Some(stop_tx) = self.stop_tx.take() {
            // The playback task may already have finished on its own
            let _ = stop_tx.send(());
            self.status.mark_stopped(self.generation);
            info!("Alarm stopped");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_ignores_stale_generation() {
        let status = AlarmStatus::new();
        status.mark_playing(2);
        status.mark_stopped(1);
        assert!(status.is_playing());
        status.mark_stopped(2);
        assert!(!status.is_playing());
    }

    #[test]
    fn test_stop_without_playback_is_noop() {
        let mut player = AlarmPlayer::new(AlarmStatus::new());
        player.stop();
        assert!(!player.status().is_playing());
    }
}
