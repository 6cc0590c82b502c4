//! Per-plane kinematic state and the motion step.

use crate::geometry::{degrees_to_radians, wrap_degrees};
use crate::trail::Trail;
use planes_domain::{PlaneSnapshot, Point, Rgb, Viewport};
use uuid::Uuid;

/// Heading every plane starts with; the sprite is rotated a quarter turn at creation.
pub const INITIAL_HEADING: f32 = 90.0;

/// Starting speed in units per tick.
pub const INITIAL_SPEED: f32 = 2.0;

/// Rotation between the sprite's rest orientation and the geometry convention.
pub const SPRITE_FACING_DEG: f32 = 90.0;

/// One autopiloted plane.
#[derive(Debug, Clone)]
pub struct Plane {
    pub plane_id: Uuid,
    pub callsign: String,
    pub color: Rgb,

    pub position: Point,
    /// Absolute heading in degrees, kept in `[0, 360)`.
    pub heading: f32,
    /// Degrees added to `heading` every tick.
    pub offset: f32,
    /// Units travelled per tick; never below the autopilot floor.
    pub speed: f32,

    /// Ticks until the course is re-evaluated.
    pub course_timer: i32,
    /// Ticks until the speed is re-evaluated.
    pub speed_timer: i32,

    pub trail: Trail,
}

impl Plane {
    /// Create a plane at `position`. Both timers start at zero so the first
    /// tick evaluates course and speed.
    pub fn new(callsign: &str, color: Rgb, position: Point) -> Self {
        Self {
            plane_id: Uuid::new_v4(),
            callsign: callsign.to_string(),
            color,
            position,
            heading: INITIAL_HEADING,
            offset: 0.0,
            speed: INITIAL_SPEED,
            course_timer: 0,
            speed_timer: 0,
            trail: Trail::new(Point::ORIGIN),
        }
    }

    /// Spawn point of the `index`-th plane: a column at a third of the view
    /// height, spaced an eighth of the view width apart.
    pub fn spawn_position(view: Viewport, index: u32) -> Point {
        let x = view.height / 3;
        let y = view.height / 8 + (view.width / 8) * index;
        Point::new(x as f32, y as f32)
    }

    /// Apply the current turning rate to the heading.
    pub fn turn(&mut self) {
        self.heading = wrap_degrees(self.heading + self.offset);
    }

    /// Move forward by `speed` along `heading` and record the new position.
    pub fn advance(&mut self) {
        let radians = degrees_to_radians(self.heading - SPRITE_FACING_DEG);
        self.position = self
            .position
            .offset_by(radians.cos() * self.speed, radians.sin() * self.speed);
        self.trail.record(self.position);
    }

    /// Count both timers down by one tick.
    pub fn tick_timers(&mut self) {
        self.course_timer -= 1;
        self.speed_timer -= 1;
    }

    pub fn snapshot(&self) -> PlaneSnapshot {
        PlaneSnapshot {
            plane_id: self.plane_id,
            callsign: self.callsign.clone(),
            color: self.color,
            position: self.position,
            heading_deg: self.heading,
            speed: self.speed,
            trail: self.trail.iter_recent().collect(),
            trail_cursor: self.trail.cursor(),
        }
    }
}
