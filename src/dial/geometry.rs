//! Dial geometry: pointer angle math and the derived drawing positions

use std::f64::consts::{FRAC_PI_2, PI, TAU};

use serde::{Deserialize, Serialize};

use crate::state::{TimerState, DIAL_INTERVALS};

/// Radius around the center where pointer input is ignored
pub const DEAD_ZONE_RADIUS: f64 = 15.0;
/// Distance between the widget edge and the ring
pub const RING_INSET: f64 = 15.0;
/// Angle of the 12 o'clock position
pub const START_ANGLE: f64 = -FRAC_PI_2;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Point at `radius` from `self` in direction `angle` (screen coordinates)
    pub fn polar(&self, radius: f64, angle: f64) -> Point {
        Point::new(self.x + radius * angle.cos(), self.y + radius * angle.sin())
    }
}

/// A clockwise arc of a circle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Arc {
    pub center: Point,
    pub radius: f64,
    pub start_angle: f64,
    /// Clockwise sweep in radians, within [0, 2π]
    pub sweep: f64,
}

impl Arc {
    pub fn end_angle(&self) -> f64 {
        self.start_angle + self.sweep
    }

    pub fn start_point(&self) -> Point {
        self.center.polar(self.radius, self.start_angle)
    }

    pub fn end_point(&self) -> Point {
        self.center.polar(self.radius, self.end_angle())
    }

    pub fn is_large(&self) -> bool {
        self.sweep > PI
    }

    /// Same arc at a different radius
    pub fn with_radius(&self, radius: f64) -> Arc {
        Arc { radius, ..*self }
    }
}

/// Which of the two visual modes the progress arc is drawn in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArcMode {
    /// Counting down: arc shrinks with remaining time
    Active,
    /// Configuring or idle: arc shows the configured duration
    Configuring,
}

/// Positions derived from the widget size and timer state for one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DialGeometry {
    pub center: Point,
    pub radius: f64,
    pub progress: Option<Progress>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Progress {
    pub arc: Arc,
    pub mode: ArcMode,
    pub handle: Point,
}

impl DialGeometry {
    pub fn compute(state: &TimerState, width: f64, height: f64) -> Self {
        let center = dial_center(width, height);
        let radius = (center.x.min(center.y) - RING_INSET).max(0.0);

        let progress = (state.total_seconds > 0).then(|| {
            let fraction = state.progress_fraction();
            let (turns, mode) = if state.running && state.remaining_seconds > 0 {
                let ratio = state.remaining_seconds as f64 / state.total_seconds as f64;
                (fraction * ratio, ArcMode::Active)
            } else {
                (fraction, ArcMode::Configuring)
            };

            let arc = Arc {
                center,
                radius,
                start_angle: START_ANGLE,
                sweep: (turns * TAU).clamp(0.0, TAU),
            };
            Progress {
                arc,
                mode,
                handle: arc.end_point(),
            }
        });

        Self {
            center,
            radius,
            progress,
        }
    }
}

pub fn dial_center(width: f64, height: f64) -> Point {
    Point::new(width / 2.0, height / 2.0)
}

/// Clockwise angle of `point` from 12 o'clock, in [0, 2π)
pub fn pointer_angle(center: Point, point: Point) -> f64 {
    let angle = (point.y - center.y).atan2(point.x - center.x) + FRAC_PI_2;
    if angle < 0.0 {
        angle + TAU
    } else {
        angle
    }
}

/// Quantize a dial angle into a number of intervals in [1, 120].
///
/// 12 o'clock maps to the full dial, never to zero.
pub fn intervals_for_angle(angle: f64) -> u32 {
    let intervals = ((angle / TAU) * DIAL_INTERVALS as f64).floor() as u32;
    match intervals {
        0 => DIAL_INTERVALS,
        n => n.min(DIAL_INTERVALS),
    }
}

/// Intervals selected by a pointer, or `None` inside the dead-zone
pub fn intervals_for_point(center: Point, point: Point) -> Option<u32> {
    if center.distance_to(point) < DEAD_ZONE_RADIUS {
        return None;
    }
    Some(intervals_for_angle(pointer_angle(center, point)))
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_pointer_due_north_is_zero_angle() {
        let center = Point::new(100.0, 100.0);
        let angle = pointer_angle(center, Point::new(100.0, 20.0));
        assert!(angle.abs() < EPS);
    }

    #[test]
    fn test_pointer_angles_go_clockwise() {
        let center = Point::new(100.0, 100.0);
        let east = pointer_angle(center, Point::new(180.0, 100.0));
        let south = pointer_angle(center, Point::new(100.0, 180.0));
        let west = pointer_angle(center, Point::new(20.0, 100.0));
        assert!((east - FRAC_PI_2).abs() < EPS);
        assert!((south - PI).abs() < EPS);
        assert!((west - 3.0 * FRAC_PI_2).abs() < EPS);
    }

    #[test]
    fn test_north_maps_to_full_dial() {
        assert_eq!(intervals_for_angle(0.0), 120);
        let first_boundary = TAU / 120.0;
        assert_eq!(intervals_for_angle(first_boundary * 0.5), 120);
        assert_eq!(intervals_for_angle(first_boundary + 1e-6), 1);
        assert_eq!(intervals_for_angle(TAU - 1e-9), 119);
    }

    #[test]
    fn test_points_past_quarters_map_to_quarters() {
        let center = Point::new(150.0, 150.0);
        assert_eq!(intervals_for_point(center, Point::new(250.0, 151.0)), Some(30));
        assert_eq!(intervals_for_point(center, Point::new(149.0, 250.0)), Some(60));
        assert_eq!(intervals_for_point(center, Point::new(50.0, 149.0)), Some(90));
    }

    #[test]
    fn test_dead_zone_is_ignored() {
        let center = Point::new(150.0, 150.0);
        assert_eq!(intervals_for_point(center, Point::new(150.0, 150.0)), None);
        assert_eq!(intervals_for_point(center, Point::new(160.0, 160.0)), None);
        assert!(intervals_for_point(center, Point::new(150.0, 135.0)).is_some());
    }

    #[test]
    fn test_geometry_radius_and_handle() {
        let state = TimerState::with_total(900);
        let geometry = DialGeometry::compute(&state, 300.0, 200.0);
        assert_eq!(geometry.center, Point::new(150.0, 100.0));
        assert!((geometry.radius - 85.0).abs() < EPS);

        let progress = geometry.progress.unwrap();
        assert_eq!(progress.mode, ArcMode::Configuring);
        assert!((progress.arc.sweep - FRAC_PI_2).abs() < EPS);
        assert!((progress.handle.x - 235.0).abs() < 1e-6);
        assert!((progress.handle.y - 100.0).abs() < 1e-6);
    }

    #[test]
    fn test_tiny_widget_radius_is_not_negative() {
        let geometry = DialGeometry::compute(&TimerState::new(), 10.0, 10.0);
        assert_eq!(geometry.radius, 0.0);
    }
}
