//! Shared world state: the flight of planes plus the scrolling viewpoint.

use crate::autopilot::{course_decision, speed_decision};
use crate::config::SimConfig;
use crate::plane::Plane;
use crate::rng::Dice;
use chrono::Utc;
use planes_domain::{Point, Viewport, WorldSnapshot, palette};
use tracing::trace;

/// Visible window into the world. Its center is also the point every plane
/// steers toward.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewpoint {
    pub center: Point,
    pub size: Viewport,
}

impl Viewpoint {
    /// Viewpoint centered on the unscrolled view.
    pub fn new(size: Viewport) -> Self {
        Self {
            center: size.center(),
            size,
        }
    }

    /// X coordinate of the left edge. Half the width is taken in whole units.
    pub fn left_edge(&self) -> f32 {
        self.center.x - (self.size.width / 2) as f32
    }

    pub fn target(&self) -> Point {
        self.center
    }

    /// Move the view rightward.
    pub fn scroll(&mut self, dx: f32) {
        self.center.x += dx;
    }
}

/// All simulated state, owned by the driver.
pub struct World<D: Dice> {
    planes: Vec<Plane>,
    viewpoint: Viewpoint,
    scroll_step: f32,
    tick: u64,
    dice: D,
}

impl<D: Dice> World<D> {
    /// Spawn `config.plane_count` planes in their starting column.
    pub fn new(config: &SimConfig, dice: D) -> Self {
        let planes = (0..config.plane_count)
            .map(|i| {
                let callsign = format!("PLANE-{:02}", i + 1);
                Plane::new(
                    &callsign,
                    palette::trail_color(i as usize),
                    Plane::spawn_position(config.viewport, i),
                )
            })
            .collect();

        Self {
            planes,
            viewpoint: Viewpoint::new(config.viewport),
            scroll_step: config.scroll_step,
            tick: 0,
            dice,
        }
    }

    /// Advance every plane by one tick, then scroll the view once.
    pub fn step(&mut self) {
        let target = self.viewpoint.target();

        for plane in &mut self.planes {
            if let Some(course) = course_decision(plane, target, &mut self.dice) {
                trace!(
                    callsign = %plane.callsign,
                    correction = ?course.correction,
                    difference = course.difference,
                    offset = course.offset,
                    next_check = course.next_check,
                    "course change"
                );
            }

            if let Some(speed) = speed_decision(plane, &self.viewpoint, &mut self.dice) {
                trace!(
                    callsign = %plane.callsign,
                    zone = ?speed.zone,
                    distance = speed.distance_from_left_edge,
                    delta = speed.delta,
                    speed = speed.speed,
                    next_check = speed.next_check,
                    "speed change"
                );
            }

            plane.turn();
            plane.advance();
            plane.tick_timers();
        }

        self.viewpoint.scroll(self.scroll_step);
        self.tick += 1;
    }

    /// Immutable copy of the current state for readers.
    pub fn snapshot(&self) -> WorldSnapshot {
        WorldSnapshot {
            tick: self.tick,
            published_at: Utc::now(),
            view_center: self.viewpoint.center,
            view_size: self.viewpoint.size,
            target: self.viewpoint.target(),
            planes: self.planes.iter().map(Plane::snapshot).collect(),
        }
    }

    pub fn planes(&self) -> &[Plane] {
        &self.planes
    }

    pub const fn viewpoint(&self) -> &Viewpoint {
        &self.viewpoint
    }

    pub const fn tick(&self) -> u64 {
        self.tick
    }
}
