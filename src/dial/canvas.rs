//! Drawing interface the dial renders against, and the retained backend

use serde::{Deserialize, Serialize};

use super::geometry::{Arc, Point};
use super::style::Rgba;

/// Minimal set of primitives needed to draw the dial
pub trait DialCanvas {
    fn stroke_circle(&mut self, center: Point, radius: f64, width: f64, color: Rgba);

    fn fill_circle(&mut self, center: Point, radius: f64, color: Rgba);

    /// Pie slice from the arc's center out to the arc
    fn fill_wedge(&mut self, arc: &Arc, color: Rgba);

    /// Outline of the same pie slice
    fn stroke_wedge(&mut self, arc: &Arc, width: f64, color: Rgba);

    /// Arc outline; `round_caps` rounds both ends
    fn stroke_arc(&mut self, arc: &Arc, width: f64, color: Rgba, round_caps: bool);
}

/// One recorded drawing operation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawOp {
    StrokeCircle {
        center: Point,
        radius: f64,
        width: f64,
        color: Rgba,
    },
    FillCircle {
        center: Point,
        radius: f64,
        color: Rgba,
    },
    FillWedge {
        arc: Arc,
        color: Rgba,
    },
    StrokeWedge {
        arc: Arc,
        width: f64,
        color: Rgba,
    },
    StrokeArc {
        arc: Arc,
        width: f64,
        color: Rgba,
        round_caps: bool,
    },
}

/// Retained list of drawing operations
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    pub width: f64,
    pub height: f64,
    pub ops: Vec<DrawOp>,
}

impl Scene {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            ops: Vec::new(),
        }
    }

    /// Issue every recorded operation against another canvas
    pub fn replay<C: DialCanvas>(&self, canvas: &mut C) {
        for op in &self.ops {
            match op {
                DrawOp::StrokeCircle {
                    center,
                    radius,
                    width,
                    color,
                } => canvas.stroke_circle(*center, *radius, *width, *color),
                DrawOp::FillCircle {
                    center,
                    radius,
                    color,
                } => canvas.fill_circle(*center, *radius, *color),
                DrawOp::FillWedge { arc, color } => canvas.fill_wedge(arc, *color),
                DrawOp::StrokeWedge { arc, width, color } => {
                    canvas.stroke_wedge(arc, *width, *color)
                }
                DrawOp::StrokeArc {
                    arc,
                    width,
                    color,
                    round_caps,
                } => canvas.stroke_arc(arc, *width, *color, *round_caps),
            }
        }
    }
}

impl DialCanvas for Scene {
    fn stroke_circle(&mut self, center: Point, radius: f64, width: f64, color: Rgba) {
        self.ops.push(DrawOp::StrokeCircle {
            center,
            radius,
            width,
            color,
        });
    }

    fn fill_circle(&mut self, center: Point, radius: f64, color: Rgba) {
        self.ops.push(DrawOp::FillCircle {
            center,
            radius,
            color,
        });
    }

    fn fill_wedge(&mut self, arc: &Arc, color: Rgba) {
        self.ops.push(DrawOp::FillWedge { arc: *arc, color });
    }

    fn stroke_wedge(&mut self, arc: &Arc, width: f64, color: Rgba) {
        self.ops.push(DrawOp::StrokeWedge {
            arc: *arc,
            width,
            color,
        });
    }

    fn stroke_arc(&mut self, arc: &Arc, width: f64, color: Rgba, round_caps: bool) {
        self.ops.push(DrawOp::StrokeArc {
            arc: *arc,
            width,
            color,
            round_caps,
        });
    }
}
