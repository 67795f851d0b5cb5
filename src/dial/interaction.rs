//! Pointer gestures on the dial
//!
//! Translates press and drag events in widget-local pixels into duration
//! changes on the engine passed in by the caller.

use tracing::debug;

use crate::state::{TimerEngine, TimerPhase};

use super::geometry::{dial_center, intervals_for_point, Point};

/// Gesture state for one dial widget
#[derive(Debug, Clone)]
pub struct DialInteraction {
    width: f64,
    height: f64,
    drag_origin: Option<Point>,
    /// Whether the current gesture paused a running countdown
    paused_by_drag: bool,
}

impl DialInteraction {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            drag_origin: None,
            paused_by_drag: false,
        }
    }

    pub fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        debug!("Dial resized to {}x{}", width, height);
        self.width = width;
        self.height = height;
    }

    pub fn is_dragging(&self) -> bool {
        self.drag_origin.is_some()
    }

    /// Single press; ignored entirely inside the dead-zone.
    ///
    /// Returns whether the press changed the duration.
    pub fn on_press(&mut self, engine: &mut TimerEngine, x: f64, y: f64) -> bool {
        self.drag_step(engine, Point::new(x, y))
    }

    pub fn on_drag_begin(&mut self, engine: &mut TimerEngine, x: f64, y: f64) {
        let origin = Point::new(x, y);
        self.drag_origin = Some(origin);

        // Pause before raising the drag flag; pausing is refused mid-drag.
        self.paused_by_drag = engine.phase() == TimerPhase::Running && engine.pause_for_drag();
        engine.set_dragging(true);

        self.drag_step(engine, origin);
    }

    /// Drag moved to an absolute widget position
    pub fn on_drag_update(&mut self, engine: &mut TimerEngine, x: f64, y: f64) {
        if !self.is_dragging() {
            debug!("Drag update without drag begin, ignoring");
            return;
        }
        self.drag_step(engine, Point::new(x, y));
    }

    /// Drag moved by an offset from where the gesture began
    pub fn on_drag_offset(&mut self, engine: &mut TimerEngine, dx: f64, dy: f64) {
        let Some(origin) = self.drag_origin else {
            debug!("Drag offset without drag begin, ignoring");
            return;
        };
        self.drag_step(engine, Point::new(origin.x + dx, origin.y + dy));
    }

    /// Release: resume a paused countdown or start one on an idle dial.
    ///
    /// A countdown this gesture paused and that was stopped mid-drag stays
    /// stopped.
    pub fn on_drag_end(&mut self, engine: &mut TimerEngine) {
        self.drag_origin = None;
        let paused_by_drag = std::mem::take(&mut self.paused_by_drag);
        engine.set_dragging(false);

        match engine.phase() {
            TimerPhase::Paused => engine.resume_after_drag(),
            TimerPhase::Idle if paused_by_drag => {
                debug!("Countdown stopped during drag, not restarting");
            }
            _ => engine.on_drag_committed(),
        }
    }

    fn drag_step(&self, engine: &mut TimerEngine, point: Point) -> bool {
        let center = dial_center(self.width, self.height);
        let Some(intervals) = intervals_for_point(center, point) else {
            return false;
        };

        engine.set_duration(intervals as i64);
        // Live preview: a paused re-drag restarts at the chosen duration.
        if engine.phase() == TimerPhase::Paused {
            engine.restart_paused_countdown();
        }
        true
    }
}
