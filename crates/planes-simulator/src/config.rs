//! # Simulator Configuration
//!
//! Environment-based configuration, overridable from the command line.
//! Autopilot tuning is not configurable; it lives in `autopilot` constants.

use crate::error::{Result, SimError};
use planes_domain::Viewport;
use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

/// Simulation and render-loop configuration
#[derive(Debug, Clone, PartialEq)]
pub struct SimConfig {
    /// Visible view size; also sets the autopilot's speed zones
    pub viewport: Viewport,

    /// Number of planes spawned at startup
    pub plane_count: u32,

    /// Sleep between simulation ticks
    pub tick_interval: Duration,

    /// Distance the view scrolls right every tick
    pub scroll_step: f32,

    /// Render collaborator polling interval; the driver publishes at the same pace
    pub frame_interval: Duration,

    /// Frames to render before closing; 0 runs until interrupted
    pub max_frames: u64,

    /// Emit a per-plane report every this many frames
    pub report_every: u64,

    /// Sprite image required at startup
    pub sprite_path: PathBuf,

    /// Fixed RNG seed; the wall clock is used when absent
    pub seed: Option<u64>,
}

impl SimConfig {
    /// Load configuration from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            viewport: Viewport::new(
                parse_var("PLANES_VIEW_WIDTH").unwrap_or(defaults.viewport.width),
                parse_var("PLANES_VIEW_HEIGHT").unwrap_or(defaults.viewport.height),
            ),
            plane_count: parse_var("PLANES_COUNT").unwrap_or(defaults.plane_count),
            tick_interval: parse_var("PLANES_TICK_MS")
                .map(Duration::from_millis)
                .unwrap_or(defaults.tick_interval),
            scroll_step: parse_var("PLANES_SCROLL_STEP").unwrap_or(defaults.scroll_step),
            frame_interval: parse_var("PLANES_FRAME_MS")
                .map(Duration::from_millis)
                .unwrap_or(defaults.frame_interval),
            max_frames: parse_var("PLANES_MAX_FRAMES").unwrap_or(defaults.max_frames),
            report_every: parse_var("PLANES_REPORT_EVERY").unwrap_or(defaults.report_every),
            sprite_path: env::var("PLANES_SPRITE")
                .map(PathBuf::from)
                .unwrap_or(defaults.sprite_path),
            seed: parse_var("PLANES_SEED"),
        }
    }

    /// Reject values the simulation cannot run with.
    pub fn validate(&self) -> Result<()> {
        self.viewport.validate()?;

        if self.plane_count == 0 {
            return Err(SimError::InvalidConfig("plane count must be at least 1".into()));
        }
        if self.tick_interval.is_zero() {
            return Err(SimError::InvalidConfig("tick interval must be non-zero".into()));
        }
        if self.frame_interval.is_zero() {
            return Err(SimError::InvalidConfig("frame interval must be non-zero".into()));
        }
        if !self.scroll_step.is_finite() {
            return Err(SimError::InvalidConfig(format!(
                "scroll step must be finite, got {}",
                self.scroll_step
            )));
        }
        if self.report_every == 0 {
            return Err(SimError::InvalidConfig("report interval must be non-zero".into()));
        }
        Ok(())
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            viewport: Viewport::default(),
            plane_count: 6,
            tick_interval: Duration::from_millis(1),
            scroll_step: 2.0,
            frame_interval: Duration::from_millis(16),
            max_frames: 0,
            report_every: 60,
            sprite_path: PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/assets/Plane.png")),
            seed: None,
        }
    }
}

fn parse_var<T: FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|v| v.trim().parse().ok())
}
