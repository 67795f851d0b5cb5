//! Dial module
//!
//! Pointer interaction, geometry and rendering of the circular dial.

pub mod canvas;
pub mod geometry;
pub mod interaction;
pub mod render;
pub mod style;
pub mod svg;

// Re-export main types
pub use canvas::{DialCanvas, DrawOp, Scene};
pub use geometry::{ArcMode, DialGeometry, Point};
pub use interaction::DialInteraction;
pub use render::{draw, render};
pub use style::{DialStyle, Rgba};
pub use svg::SvgCanvas;

/// Render the dial straight to an SVG document
pub fn render_svg(
    state: &crate::state::TimerState,
    width: f64,
    height: f64,
    style: &DialStyle,
) -> String {
    let mut canvas = SvgCanvas::new(width, height);
    draw(state, width, height, style, &mut canvas);
    canvas.finish()
}
