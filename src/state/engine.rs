//! Countdown state machine
//!
//! The engine owns the single [`TimerState`] and the handle of the single
//! live tick source. `running` is only ever changed by arming or disarming
//! that handle, so a running timer always has exactly one tick source.

use tokio::sync::{broadcast, watch};
use tracing::{debug, info, trace, warn};

use super::{
    clamp_total_seconds, Notification, SessionHooks, TickHandle, TimerEvent, TimerPhase,
    TimerState, DIAL_INTERVALS, INTERVAL_SECONDS, MAX_TOTAL_SECONDS, MIN_TOTAL_SECONDS,
};

const EVENT_CHANNEL_CAPACITY: usize = 256;

/// Owner of the timer state, the tick handle and the shell callbacks
pub struct TimerEngine {
    state: TimerState,
    tick: Option<TickHandle>,
    next_generation: u64,
    hooks: Box<dyn SessionHooks>,
    event_tx: broadcast::Sender<TimerEvent>,
    state_tx: watch::Sender<TimerState>,
    /// Keep the receiver alive so the watch channel never closes
    _state_rx: watch::Receiver<TimerState>,
}

impl TimerEngine {
    /// Create an idle engine; the duration is rounded and clamped
    pub fn new(total_seconds: i64, hooks: Box<dyn SessionHooks>) -> Self {
        let state = TimerState::with_total(total_seconds);
        let (event_tx, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        let (state_tx, state_rx) = watch::channel(state);

        Self {
            state,
            tick: None,
            next_generation: 0,
            hooks,
            event_tx,
            state_tx,
            _state_rx: state_rx,
        }
    }

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn phase(&self) -> TimerPhase {
        self.state.phase()
    }

    /// Handle of the armed tick source, if any
    pub fn active_tick(&self) -> Option<TickHandle> {
        self.tick
    }

    /// Subscribe to state-changed and completion events
    pub fn subscribe(&self) -> broadcast::Receiver<TimerEvent> {
        self.event_tx.subscribe()
    }

    /// Receiver that always holds the latest state
    pub fn watch(&self) -> watch::Receiver<TimerState> {
        self.state_tx.subscribe()
    }

    /// Set the duration from a number of dial intervals
    pub fn set_duration(&mut self, intervals: i64) {
        let intervals = intervals.clamp(1, DIAL_INTERVALS as i64) as u32;
        self.apply_total(intervals * INTERVAL_SECONDS);
    }

    /// Set the duration in seconds, rounded to the nearest interval
    pub fn set_total_seconds(&mut self, seconds: i64) {
        self.apply_total(clamp_total_seconds(seconds));
    }

    pub fn add_time(&mut self) {
        if self.state.total_seconds >= MAX_TOTAL_SECONDS {
            debug!("Duration already at maximum, ignoring add");
            return;
        }
        self.apply_total(self.state.total_seconds + INTERVAL_SECONDS);
    }

    pub fn remove_time(&mut self) {
        if self.state.total_seconds <= MIN_TOTAL_SECONDS {
            debug!("Duration already at minimum, ignoring remove");
            return;
        }
        self.apply_total(self.state.total_seconds - INTERVAL_SECONDS);
    }

    /// Start a fresh countdown of the configured duration
    pub fn start(&mut self) {
        self.hooks.stop_alarm();

        self.state.paused = false;
        self.state.remaining_seconds = self.state.total_seconds;
        self.arm_tick();

        info!("Timer started for {}s", self.state.total_seconds);
        self.emit_state();
    }

    pub fn stop(&mut self) {
        if !self.state.running && !self.state.paused {
            debug!("Timer not running, ignoring stop");
            return;
        }

        self.disarm_tick();
        self.state.paused = false;

        info!("Timer stopped with {}s remaining", self.state.remaining_seconds);
        self.emit_state();
    }

    pub fn toggle(&mut self) {
        if self.state.running {
            self.stop();
        } else if self.state.total_seconds > 0 {
            self.start();
        }
    }

    /// Suspend a running countdown while the dial is re-dragged.
    ///
    /// Returns whether the timer was paused.
    pub fn pause_for_drag(&mut self) -> bool {
        if !self.state.running || self.state.dragging {
            debug!("Pause requested outside of a running countdown, ignoring");
            return false;
        }

        self.disarm_tick();
        self.state.paused = true;

        info!("Timer paused at {}s for dial drag", self.state.remaining_seconds);
        self.emit_state();
        true
    }

    pub fn resume_after_drag(&mut self) {
        if !self.state.paused {
            debug!("Timer not paused, ignoring resume");
            return;
        }

        self.state.paused = false;
        if self.state.remaining_seconds > 0 {
            self.arm_tick();
            info!("Timer resumed with {}s remaining", self.state.remaining_seconds);
        } else {
            info!("Nothing left to count down, timer idle");
        }
        self.emit_state();
    }

    /// A tap or drag finished on an idle dial: begin counting immediately
    pub fn on_drag_committed(&mut self) {
        if self.state.paused || self.state.running || self.state.total_seconds == 0 {
            return;
        }
        self.start();
    }

    /// Restart a paused countdown at the newly chosen duration
    pub fn restart_paused_countdown(&mut self) {
        if !self.state.paused || self.state.remaining_seconds == self.state.total_seconds {
            return;
        }
        self.state.remaining_seconds = self.state.total_seconds;
        self.emit_state();
    }

    pub fn set_dragging(&mut self, dragging: bool) {
        if self.state.dragging == dragging {
            return;
        }
        self.state.dragging = dragging;
        self.emit_state();
    }

    /// Advance the countdown by one second
    pub fn tick(&mut self) {
        let Some(handle) = self.tick else {
            trace!("Tick with no armed source, ignoring");
            return;
        };

        self.state.remaining_seconds = self.state.remaining_seconds.saturating_sub(1);
        trace!("{} remaining={}s", handle, self.state.remaining_seconds);

        if self.state.remaining_seconds > 0 {
            self.emit_state();
            return;
        }

        self.disarm_tick();
        info!("Session finished after {}s", self.state.total_seconds);

        self.hooks.start_alarm();
        self.hooks.post_notification(&Notification::session_finished());

        self.emit_state();
        self.emit(TimerEvent::Completed);
    }

    /// Silence the alarm without touching the timer state
    pub fn request_stop_alarm(&mut self) {
        info!("Alarm stop requested");
        self.hooks.stop_alarm();
    }

    fn apply_total(&mut self, total_seconds: u32) {
        self.state.total_seconds = total_seconds;
        // Paused countdowns resume at the new duration
        if self.state.running || self.state.paused {
            self.state.remaining_seconds = total_seconds;
        }
        debug!("Duration set to {}s", total_seconds);
        self.emit_state();
    }

    fn arm_tick(&mut self) {
        self.disarm_tick();

        self.next_generation += 1;
        let handle = TickHandle::new(self.next_generation);
        self.tick = Some(handle);
        self.state.running = true;
        debug!("Armed {}", handle);
    }

    fn disarm_tick(&mut self) {
        if let Some(handle) = self.tick.take() {
            debug!("Disarmed {}", handle);
        }
        self.state.running = false;
    }

    fn emit_state(&self) {
        self.state_tx.send_replace(self.state);
        self.emit(TimerEvent::StateChanged(self.state));
    }

    fn emit(&self, event: TimerEvent) {
        if self.event_tx.receiver_count() == 0 {
            return;
        }
        if let Err(e) = self.event_tx.send(event) {
            warn!("Failed to send timer event: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct Recorder(Arc<Mutex<Vec<String>>>);

    impl Recorder {
        fn calls(&self) -> Vec<String> {
            self.0.lock().unwrap().clone()
        }
    }

    impl SessionHooks for Recorder {
        fn start_alarm(&mut self) {
            self.0.lock().unwrap().push("start_alarm".into());
        }

        fn stop_alarm(&mut self) {
            self.0.lock().unwrap().push("stop_alarm".into());
        }

        fn post_notification(&mut self, notification: &Notification) {
            self.0.lock().unwrap().push(format!("notify:{}", notification.title));
        }
    }

    fn engine() -> (TimerEngine, Recorder) {
        let recorder = Recorder::default();
        (TimerEngine::new(300, Box::new(recorder.clone())), recorder)
    }

    fn drain(rx: &mut broadcast::Receiver<TimerEvent>) -> Vec<TimerEvent> {
        let mut events = Vec::new();
        while let Ok(event) = rx.try_recv() {
            events.push(event);
        }
        events
    }

    #[test]
    fn test_set_duration_clamps_intervals() {
        let (mut engine, _) = engine();
        engine.set_duration(0);
        assert_eq!(engine.state().total_seconds, 30);
        engine.set_duration(500);
        assert_eq!(engine.state().total_seconds, 3600);
        engine.set_duration(7);
        assert_eq!(engine.state().total_seconds, 210);
    }

    #[test]
    fn test_set_duration_while_running_resets_remaining() {
        let (mut engine, _) = engine();
        engine.start();
        engine.tick();
        assert_eq!(engine.state().remaining_seconds, 299);

        engine.set_duration(4);
        assert_eq!(engine.state().remaining_seconds, 120);
        assert!(engine.state().running);
    }

    #[test]
    fn test_start_arms_single_tick_source() {
        let (mut engine, recorder) = engine();
        engine.start();
        let first = engine.active_tick().unwrap();

        engine.start();
        let second = engine.active_tick().unwrap();

        assert_ne!(first, second);
        assert_eq!(engine.phase(), TimerPhase::Running);
        assert_eq!(recorder.calls(), vec!["stop_alarm", "stop_alarm"]);
    }

    #[test]
    fn test_full_countdown_completes_once() {
        let (mut engine, recorder) = engine();
        let mut rx = engine.subscribe();
        engine.start();

        let mut completions = 0;
        for _ in 0..300 {
            engine.tick();
            completions += drain(&mut rx)
                .iter()
                .filter(|e| **e == TimerEvent::Completed)
                .count();
        }

        let state = engine.state();
        assert!(!state.running);
        assert_eq!(state.remaining_seconds, 0);
        assert_eq!(engine.active_tick(), None);
        assert_eq!(completions, 1);
        assert_eq!(
            recorder.calls(),
            vec!["stop_alarm", "start_alarm", "notify:Session Finished"]
        );

        engine.tick();
        assert_eq!(engine.state().remaining_seconds, 0);
        assert!(drain(&mut rx).is_empty());
    }

    #[test]
    fn test_completion_emits_terminal_state_before_completed() {
        let (mut engine, _) = engine();
        engine.set_duration(1);
        engine.start();
        for _ in 0..29 {
            engine.tick();
        }

        let mut rx = engine.subscribe();
        engine.tick();
        let events = drain(&mut rx);
        assert_eq!(events.len(), 2);
        assert!(matches!(events[0], TimerEvent::StateChanged(s) if !s.running));
        assert_eq!(events[1], TimerEvent::Completed);
    }

    #[test]
    fn test_stop_is_idempotent() {
        let (mut engine, _) = engine();
        engine.start();
        let mut rx = engine.subscribe();

        engine.stop();
        let once = engine.state();
        assert_eq!(drain(&mut rx).len(), 1);

        engine.stop();
        assert_eq!(engine.state(), once);
        assert!(drain(&mut rx).is_empty());
    }

    #[test]
    fn test_stop_while_idle_emits_nothing() {
        let (mut engine, _) = engine();
        let mut rx = engine.subscribe();
        engine.stop();
        assert!(drain(&mut rx).is_empty());
    }

    #[test]
    fn test_pause_resume_keeps_remaining() {
        let (mut engine, _) = engine();
        engine.start();
        for _ in 0..10 {
            engine.tick();
        }

        assert!(engine.pause_for_drag());
        let paused = engine.state();
        assert!(paused.paused);
        assert!(!paused.running);
        assert_eq!(engine.active_tick(), None);

        engine.tick();
        assert_eq!(engine.state().remaining_seconds, 290);

        engine.resume_after_drag();
        assert_eq!(engine.phase(), TimerPhase::Running);
        assert_eq!(engine.state().remaining_seconds, 290);
        assert!(engine.active_tick().is_some());
    }

    #[test]
    fn test_pause_requires_running_and_not_dragging() {
        let (mut engine, _) = engine();
        assert!(!engine.pause_for_drag());

        engine.start();
        engine.set_dragging(true);
        assert!(!engine.pause_for_drag());
        assert_eq!(engine.phase(), TimerPhase::Running);
    }

    #[test]
    fn test_resume_with_nothing_remaining_goes_idle() {
        let (mut engine, _) = engine();
        engine.set_duration(1);
        engine.start();
        for _ in 0..29 {
            engine.tick();
        }
        engine.pause_for_drag();
        engine.state.remaining_seconds = 0;

        engine.resume_after_drag();
        assert_eq!(engine.phase(), TimerPhase::Idle);
        assert_eq!(engine.active_tick(), None);
    }

    #[test]
    fn test_duration_changes_while_paused_keep_remaining_within_total() {
        let (mut engine, _) = engine();
        engine.start();
        for _ in 0..5 {
            engine.tick();
        }
        assert!(engine.pause_for_drag());

        engine.set_duration(1);
        assert_eq!(engine.state().total_seconds, 30);
        assert_eq!(engine.state().remaining_seconds, 30);

        engine.add_time();
        assert_eq!(engine.state().remaining_seconds, 60);

        engine.remove_time();
        assert_eq!(engine.state().remaining_seconds, 30);

        engine.set_total_seconds(610);
        let state = engine.state();
        assert_eq!(state.total_seconds, 600);
        assert_eq!(state.remaining_seconds, 600);
        assert_eq!(engine.phase(), TimerPhase::Paused);

        engine.resume_after_drag();
        let state = engine.state();
        assert!(state.running);
        assert!(state.remaining_seconds <= state.total_seconds);
        assert_eq!(state.remaining_seconds, 600);
    }

    #[test]
    fn test_restart_paused_countdown_skips_when_in_sync() {
        let (mut engine, _) = engine();
        engine.start();
        engine.pause_for_drag();
        engine.set_duration(4);

        let mut rx = engine.subscribe();
        engine.restart_paused_countdown();
        assert!(drain(&mut rx).is_empty());
        assert_eq!(engine.state().remaining_seconds, 120);
    }

    #[test]
    fn test_stop_mid_drag_leaves_timer_idle() {
        let (mut engine, _) = engine();
        engine.start();
        engine.pause_for_drag();
        engine.set_dragging(true);

        engine.stop();
        assert_eq!(engine.phase(), TimerPhase::Idle);
        assert_eq!(engine.active_tick(), None);

        engine.resume_after_drag();
        assert_eq!(engine.phase(), TimerPhase::Idle);
        assert!(engine.state().dragging);
    }

    #[test]
    fn test_start_mid_drag_runs_fresh_countdown() {
        let (mut engine, _) = engine();
        engine.start();
        engine.tick();
        engine.pause_for_drag();
        engine.set_dragging(true);

        engine.start();
        let state = engine.state();
        assert_eq!(engine.phase(), TimerPhase::Running);
        assert!(!state.paused);
        assert_eq!(state.remaining_seconds, state.total_seconds);
        assert!(engine.active_tick().is_some());
    }

    #[test]
    fn test_add_remove_are_noops_at_bounds() {
        let (mut engine, _) = engine();
        engine.set_duration(120);
        let mut rx = engine.subscribe();
        engine.add_time();
        assert_eq!(engine.state().total_seconds, 3600);
        assert!(drain(&mut rx).is_empty());

        engine.set_duration(1);
        drain(&mut rx);
        engine.remove_time();
        assert_eq!(engine.state().total_seconds, 30);
        assert!(drain(&mut rx).is_empty());
    }

    #[test]
    fn test_add_time_while_running_syncs_remaining() {
        let (mut engine, _) = engine();
        engine.start();
        engine.tick();
        engine.add_time();
        assert_eq!(engine.state().total_seconds, 330);
        assert_eq!(engine.state().remaining_seconds, 330);
    }

    #[test]
    fn test_drag_committed_starts_only_when_idle() {
        let (mut engine, _) = engine();
        engine.on_drag_committed();
        assert_eq!(engine.phase(), TimerPhase::Running);
        let handle = engine.active_tick();

        engine.on_drag_committed();
        assert_eq!(engine.active_tick(), handle);
    }

    #[test]
    fn test_request_stop_alarm_leaves_state_alone() {
        let (mut engine, recorder) = engine();
        let before = engine.state();
        let mut rx = engine.subscribe();

        engine.request_stop_alarm();
        assert_eq!(engine.state(), before);
        assert!(drain(&mut rx).is_empty());
        assert_eq!(recorder.calls(), vec!["stop_alarm"]);
    }

    #[test]
    fn test_watch_tracks_latest_state() {
        let (mut engine, _) = engine();
        let rx = engine.watch();
        engine.start();
        engine.tick();
        assert_eq!(rx.borrow().remaining_seconds, 299);
    }

    #[test]
    fn test_toggle() {
        let (mut engine, _) = engine();
        engine.toggle();
        assert!(engine.state().running);
        engine.toggle();
        assert_eq!(engine.phase(), TimerPhase::Idle);
    }
}
