//! Dial palette

use serde::{Deserialize, Serialize};

/// RGBA color with components in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    pub red: f32,
    pub green: f32,
    pub blue: f32,
    pub alpha: f32,
}

impl Rgba {
    pub const fn new(red: f32, green: f32, blue: f32, alpha: f32) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    pub const fn opaque(self) -> Self {
        self.with_alpha(1.0)
    }

    pub const fn with_alpha(self, alpha: f32) -> Self {
        Self { alpha, ..self }
    }

    /// `rgb(r, g, b)` with 8-bit channels, alpha dropped
    pub fn css_rgb(&self) -> String {
        let channel = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!(
            "rgb({}, {}, {})",
            channel(self.red),
            channel(self.green),
            channel(self.blue)
        )
    }
}

/// Colors and switches the renderer reads
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DialStyle {
    /// Arc color while configuring
    pub accent: Rgba,
    /// Arc color while counting down
    pub alert: Rgba,
    /// Background ring
    pub track: Rgba,
    /// Wedge fill while configuring
    pub idle_fill: Rgba,
    /// Outline color used in high-contrast mode
    pub outline: Rgba,
    pub high_contrast: bool,
}

impl DialStyle {
    pub fn high_contrast(mut self, enabled: bool) -> Self {
        self.high_contrast = enabled;
        self
    }
}

impl Default for DialStyle {
    fn default() -> Self {
        Self {
            accent: Rgba::new(0.208, 0.518, 0.894, 1.0),
            alert: Rgba::new(0.878, 0.106, 0.141, 1.0),
            track: Rgba::new(0.7, 0.7, 0.7, 1.0),
            idle_fill: Rgba::new(0.6, 0.6, 0.6, 0.2),
            outline: Rgba::new(0.0, 0.0, 0.0, 0.5),
            high_contrast: false,
        }
    }
}
