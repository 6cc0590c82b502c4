//! # Planes Simulator
//!
//! A flight of planes crossing a scrolling view, each steered by a
//! semi-random autopilot toward the view center and leaving a colored trail.
//!
//! ## Layout
//!
//! - [`autopilot`]: course and speed decisions on independent countdowns
//! - [`plane`] and [`trail`]: per-plane kinematics and position history
//! - [`world`]: the planes plus the scrolling viewpoint, one tick at a time
//! - [`driver`]: fixed-interval tick loop publishing snapshots
//! - [`render`]: headless render collaborator reading those snapshots

#![forbid(unsafe_code)]
#![warn(clippy::all)]

pub mod asset;
pub mod autopilot;
pub mod config;
pub mod driver;
pub mod error;
pub mod geometry;
pub mod plane;
pub mod render;
pub mod rng;
pub mod trail;
pub mod world;

pub use asset::SpriteAsset;
pub use config::SimConfig;
pub use driver::{DriverSettings, ViewHandle, run_driver};
pub use error::{Result, SimError};
pub use plane::Plane;
pub use render::{RenderSettings, RenderSummary, run_render_loop};
pub use rng::{Dice, SimRng};
pub use trail::{TRAIL_LEN, Trail};
pub use world::{Viewpoint, World};
