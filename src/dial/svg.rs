//! Immediate-mode SVG backend

use std::f64::consts::{PI, TAU};

use super::canvas::DialCanvas;
use super::geometry::{Arc, Point};
use super::style::Rgba;

/// Sweeps this close to a full turn are drawn as a closed circle
const FULL_TURN_EPSILON: f64 = 1e-9;

/// Writes SVG elements as operations are issued
#[derive(Debug, Clone)]
pub struct SvgCanvas {
    width: f64,
    height: f64,
    body: String,
}

impl SvgCanvas {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            body: String::new(),
        }
    }

    /// Wrap the drawn elements in an `<svg>` document
    pub fn finish(self) -> String {
        format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\">\n{body}</svg>\n",
            w = num(self.width),
            h = num(self.height),
            body = self.body,
        )
    }

    fn push(&mut self, element: String) {
        self.body.push_str("  ");
        self.body.push_str(&element);
        self.body.push('\n');
    }
}

impl DialCanvas for SvgCanvas {
    fn stroke_circle(&mut self, center: Point, radius: f64, width: f64, color: Rgba) {
        self.push(format!(
            "<circle cx=\"{}\" cy=\"{}\" r=\"{}\" fill=\"none\" {}/>",
            num(center.x),
            num(center.y),
            num(radius),
            stroke_attrs(width, color, false),
        ));
    }

    fn fill_circle(&mut self, center: Point, radius: f64, color: Rgba) {
        self.push(format!(
            "<circle cx=\"{}\" cy=\"{}\" r=\"{}\" {}/>",
            num(center.x),
            num(center.y),
            num(radius),
            fill_attrs(color),
        ));
    }

    fn fill_wedge(&mut self, arc: &Arc, color: Rgba) {
        self.push(format!("<path d=\"{}\" {}/>", wedge_path(arc), fill_attrs(color)));
    }

    fn stroke_wedge(&mut self, arc: &Arc, width: f64, color: Rgba) {
        self.push(format!(
            "<path d=\"{}\" fill=\"none\" {}/>",
            wedge_path(arc),
            stroke_attrs(width, color, false),
        ));
    }

    fn stroke_arc(&mut self, arc: &Arc, width: f64, color: Rgba, round_caps: bool) {
        let start = arc.start_point();
        self.push(format!(
            "<path d=\"M {} {} {}\" fill=\"none\" {}/>",
            num(start.x),
            num(start.y),
            arc_segments(arc),
            stroke_attrs(width, color, round_caps),
        ));
    }
}

fn wedge_path(arc: &Arc) -> String {
    let start = arc.start_point();
    format!(
        "M {} {} L {} {} {} Z",
        num(arc.center.x),
        num(arc.center.y),
        num(start.x),
        num(start.y),
        arc_segments(arc),
    )
}

/// `A` commands continuing from the arc's start point.
///
/// An SVG arc cannot end where it starts, so a full turn is split in two.
fn arc_segments(arc: &Arc) -> String {
    if arc.sweep >= TAU - FULL_TURN_EPSILON {
        let half = Arc {
            sweep: PI,
            ..*arc
        };
        let end = arc.start_point();
        format!(
            "{} {}",
            arc_command(arc.radius, false, half.end_point()),
            arc_command(arc.radius, false, end)
        )
    } else {
        arc_command(arc.radius, arc.is_large(), arc.end_point())
    }
}

fn arc_command(radius: f64, large: bool, end: Point) -> String {
    format!(
        "A {r} {r} 0 {} 1 {} {}",
        u8::from(large),
        num(end.x),
        num(end.y),
        r = num(radius),
    )
}

fn fill_attrs(color: Rgba) -> String {
    format!(
        "fill=\"{}\" fill-opacity=\"{}\"",
        color.css_rgb(),
        num(color.alpha as f64)
    )
}

fn stroke_attrs(width: f64, color: Rgba, round_caps: bool) -> String {
    let cap = if round_caps { " stroke-linecap=\"round\"" } else { "" };
    format!(
        "stroke=\"{}\" stroke-opacity=\"{}\" stroke-width=\"{}\"{}",
        color.css_rgb(),
        num(color.alpha as f64),
        num(width),
        cap
    )
}

/// Format with at most two decimals and no trailing zeros
fn num(value: f64) -> String {
    let formatted = format!("{:.2}", value);
    let trimmed = formatted.trim_end_matches('0').trim_end_matches('.');
    match trimmed {
        "-0" | "" => "0".to_string(),
        other => other.to_string(),
    }
}
