use std::f64::consts::TAU;

use proptest::prelude::*;

use dial_timer::dial::geometry::{dial_center, intervals_for_angle, intervals_for_point, Point};
use dial_timer::dial::{render, DialStyle};
use dial_timer::state::{
    clamp_total_seconds, NoopHooks, TimerEngine, DIAL_INTERVALS, INTERVAL_SECONDS,
    MAX_TOTAL_SECONDS, MIN_TOTAL_SECONDS,
};

/// Generate widget sizes from tiny to large
fn size_strategy() -> impl Strategy<Value = f64> {
    1.0..2000.0
}

proptest! {
    /// Every dial angle selects between one and a full dial of intervals
    #[test]
    fn test_angle_always_selects_valid_intervals(angle in 0.0..TAU) {
        let intervals = intervals_for_angle(angle);
        prop_assert!((1..=DIAL_INTERVALS).contains(&intervals));
    }

    /// Any requested duration ends up on an interval step inside the range
    #[test]
    fn test_clamped_duration_is_on_a_step(seconds in any::<i64>()) {
        let total = clamp_total_seconds(seconds);
        prop_assert_eq!(total % INTERVAL_SECONDS, 0);
        prop_assert!((MIN_TOTAL_SECONDS..=MAX_TOTAL_SECONDS).contains(&total));
    }

    #[test]
    fn test_set_duration_matches_intervals(intervals in 1i64..=120) {
        let mut engine = TimerEngine::new(300, Box::new(NoopHooks));
        engine.set_duration(intervals);
        prop_assert_eq!(engine.state().total_seconds as i64, intervals * INTERVAL_SECONDS as i64);
    }

    /// Pointers outside the dead-zone always resolve to a duration
    #[test]
    fn test_points_outside_dead_zone_resolve(
        width in size_strategy(),
        height in size_strategy(),
        distance in 16.0..500.0,
        angle in 0.0..TAU,
    ) {
        let center = dial_center(width, height);
        let point = center.polar(distance, angle);
        let intervals = intervals_for_point(center, point);
        prop_assert!(intervals.is_some());
    }

    /// Rendering is a pure function of its inputs
    #[test]
    fn test_render_is_deterministic(
        total in 30i64..=3600,
        width in size_strategy(),
        height in size_strategy(),
        high_contrast in any::<bool>(),
    ) {
        let mut engine = TimerEngine::new(total, Box::new(NoopHooks));
        engine.start();
        let style = DialStyle::default().high_contrast(high_contrast);

        let first = render(&engine.state(), width, height, &style);
        let second = render(&engine.state(), width, height, &style);
        prop_assert_eq!(first, second);
    }
}

#[test]
fn test_dead_zone_rejects_center() {
    let center = dial_center(300.0, 300.0);
    assert_eq!(intervals_for_point(center, Point::new(155.0, 155.0)), None);
}
