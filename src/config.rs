//! Configuration and CLI argument handling

use clap::Parser;

use crate::dial::DialStyle;
use crate::state::clamp_total_seconds;

/// CLI argument parsing structure
#[derive(Parser, Debug)]
#[command(name = "dial-timer")]
#[command(about = "A single-session countdown timer driven by a circular dial")]
#[command(version = "1.0.0")]
pub struct Config {
    /// Port to bind the server to
    #[arg(short, long, default_value = "20554")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Initial timer duration in seconds, rounded to 30 second steps
    #[arg(short, long, default_value = "300")]
    pub duration: i64,

    /// Dial widget size in pixels (square)
    #[arg(long, default_value = "300")]
    pub dial_size: u32,

    /// Outline the dial for high contrast
    #[arg(long)]
    pub high_contrast: bool,

    /// Log the alarm and notification instead of using desktop services
    #[arg(short, long)]
    pub quiet: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the server address as a formatted string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }

    /// Initial duration after rounding and clamping
    pub fn total_seconds(&self) -> u32 {
        clamp_total_seconds(self.duration)
    }

    pub fn dial_dimensions(&self) -> (f64, f64) {
        let size = self.dial_size.max(1) as f64;
        (size, size)
    }

    pub fn dial_style(&self) -> DialStyle {
        DialStyle::default().high_contrast(self.high_contrast)
    }
}
