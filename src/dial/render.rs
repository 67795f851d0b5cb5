//! Dial rendering as a pure function of timer state
//!
//! Nothing here holds state between frames: every state change or resize
//! re-derives the full drawing from [`TimerState`] and the widget size.

use std::f64::consts::PI;

use crate::state::TimerState;

use super::canvas::{DialCanvas, Scene};
use super::geometry::{Arc, ArcMode, DialGeometry, Point};
use super::style::{DialStyle, Rgba};

/// Stroke width of the background ring and the progress arc
pub const RING_WIDTH: f64 = 10.0;
/// Radius of the drag handle
pub const HANDLE_RADIUS: f64 = 8.0;
/// Fill alpha of the wedge while counting down
pub const ACTIVE_FILL_ALPHA: f32 = 0.3;

const OUTLINE_WIDTH: f64 = 1.0;
const OUTLINE_OFFSET: f64 = RING_WIDTH / 2.0;

/// Render the dial into a retained scene
pub fn render(state: &TimerState, width: f64, height: f64, style: &DialStyle) -> Scene {
    let mut scene = Scene::new(width, height);
    draw(state, width, height, style, &mut scene);
    scene
}

/// Issue the dial's drawing operations against `canvas`
pub fn draw<C: DialCanvas>(
    state: &TimerState,
    width: f64,
    height: f64,
    style: &DialStyle,
    canvas: &mut C,
) {
    let geometry = DialGeometry::compute(state, width, height);
    let (center, radius) = (geometry.center, geometry.radius);

    canvas.stroke_circle(center, radius, RING_WIDTH, style.track);
    if style.high_contrast {
        outline_circle(canvas, style, center, radius + OUTLINE_OFFSET);
        outline_circle(canvas, style, center, (radius - OUTLINE_OFFSET).max(0.0));
    }

    let Some(progress) = geometry.progress else {
        return;
    };

    let (line, fill) = arc_colors(progress.mode, style);

    canvas.fill_wedge(&progress.arc, fill);
    canvas.stroke_arc(&progress.arc, RING_WIDTH, line, true);

    if style.high_contrast {
        canvas.stroke_wedge(&progress.arc, OUTLINE_WIDTH, style.outline);
        canvas.stroke_arc(&start_cap(&progress.arc), OUTLINE_WIDTH, style.outline, false);
        for radius in [radius + OUTLINE_OFFSET, (radius - OUTLINE_OFFSET).max(0.0)] {
            let band = progress.arc.with_radius(radius);
            canvas.stroke_arc(&band, OUTLINE_WIDTH, style.outline, false);
        }
    }

    canvas.fill_circle(progress.handle, HANDLE_RADIUS, line);
    if style.high_contrast {
        outline_circle(canvas, style, progress.handle, HANDLE_RADIUS);
    }
}

/// Line and wedge fill colors for an arc mode
pub fn arc_colors(mode: ArcMode, style: &DialStyle) -> (Rgba, Rgba) {
    match mode {
        ArcMode::Active => (style.alert.opaque(), style.alert.with_alpha(ACTIVE_FILL_ALPHA)),
        ArcMode::Configuring => (style.accent.opaque(), style.idle_fill),
    }
}

/// Half circle closing the band behind the arc's rounded start cap
fn start_cap(arc: &Arc) -> Arc {
    Arc {
        center: arc.start_point(),
        radius: OUTLINE_OFFSET,
        start_angle: arc.start_angle + PI,
        sweep: PI,
    }
}

fn outline_circle<C: DialCanvas>(canvas: &mut C, style: &DialStyle, center: Point, radius: f64) {
    canvas.stroke_circle(center, radius, OUTLINE_WIDTH, style.outline);
}
