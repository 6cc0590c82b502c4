//! # Planes Autopilot Simulation - Domain Model
//!
//! Value objects shared between the simulation driver and whatever renders
//! it. The driver produces [`WorldSnapshot`]s; a render collaborator only
//! ever reads them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// =============================================================================
// VALUE OBJECTS
// =============================================================================

/// 2D position in world units (screen pixels at zoom 1).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const ORIGIN: Self = Self { x: 0.0, y: 0.0 };

    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Translate by a displacement.
    #[must_use]
    pub fn offset_by(self, dx: f32, dy: f32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Euclidean distance to another point
    #[must_use]
    pub fn distance_to(&self, other: &Self) -> f32 {
        (other.x - self.x).hypot(other.y - self.y)
    }
}

/// Size of the visible view, fixed at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Center of the view before any scrolling happened.
    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(self.width as f32 * 0.5, self.height as f32 * 0.5)
    }

    /// Reject degenerate sizes.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.width == 0 || self.height == 0 {
            return Err(DomainError::InvalidViewport {
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1100,
            height: 900,
        }
    }
}

/// Trail color. Planes themselves are always drawn white.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Hex form, e.g. `#ab2929`.
    #[must_use]
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

// =============================================================================
// PALETTE
// =============================================================================

/// Dark palette used for trails and the background.
pub mod palette {
    use super::Rgb;

    pub const RED: Rgb = Rgb::new(171, 41, 41);
    pub const GREEN: Rgb = Rgb::new(0, 153, 36);
    pub const YELLOW: Rgb = Rgb::new(236, 247, 27);
    pub const GREY: Rgb = Rgb::new(100, 100, 100);
    pub const PURPLE: Rgb = Rgb::new(255, 0, 255);
    pub const CYAN: Rgb = Rgb::new(0, 255, 255);

    /// Clear color behind everything.
    pub const BACKGROUND: Rgb = Rgb::new(51, 51, 51);

    /// Trail colors in spawn order.
    pub const TRAILS: [Rgb; 6] = [RED, YELLOW, PURPLE, GREEN, CYAN, GREY];

    /// Color for the plane spawned at `index`; cycles past the palette end.
    #[must_use]
    pub const fn trail_color(index: usize) -> Rgb {
        TRAILS[index % TRAILS.len()]
    }
}

// =============================================================================
// SNAPSHOTS
// =============================================================================

/// Render-facing state of one plane at one tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaneSnapshot {
    pub plane_id: Uuid,
    pub callsign: String,
    pub color: Rgb,
    pub position: Point,
    pub heading_deg: f32,
    pub speed: f32,

    /// Recorded trail, oldest first.
    pub trail: Vec<Point>,
    /// Next write slot in the ring buffer.
    pub trail_cursor: usize,
}

/// Immutable world state published by the driver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldSnapshot {
    /// Generation counter; strictly increasing across publishes.
    pub tick: u64,
    pub published_at: DateTime<Utc>,

    pub view_center: Point,
    pub view_size: Viewport,
    pub target: Point,

    pub planes: Vec<PlaneSnapshot>,
}

impl WorldSnapshot {
    /// Snapshot of a world that has not ticked yet.
    #[must_use]
    pub fn empty(view_size: Viewport) -> Self {
        let center = view_size.center();
        Self {
            tick: 0,
            published_at: Utc::now(),
            view_center: center,
            view_size,
            target: center,
            planes: Vec::new(),
        }
    }

    /// Planes whose position lies inside the visible view.
    pub fn visible_planes(&self) -> impl Iterator<Item = &PlaneSnapshot> {
        let half_w = self.view_size.width as f32 * 0.5;
        let half_h = self.view_size.height as f32 * 0.5;
        let center = self.view_center;
        self.planes.iter().filter(move |p| {
            (p.position.x - center.x).abs() <= half_w && (p.position.y - center.y).abs() <= half_h
        })
    }
}

// =============================================================================
// ERRORS
// =============================================================================

/// Domain-level errors
#[derive(Debug, thiserror::Error)]
pub enum DomainError {
    #[error("Invalid viewport: {width}x{height}")]
    InvalidViewport { width: u32, height: u32 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_viewport_center() {
        let view = Viewport::default();
        assert_eq!(view.center(), Point::new(550.0, 450.0));
    }

    #[test]
    fn test_viewport_rejects_zero_size() {
        assert!(Viewport::new(0, 900).validate().is_err());
        assert!(Viewport::new(1100, 0).validate().is_err());
        assert!(Viewport::default().validate().is_ok());
    }

    #[test]
    fn test_trail_color_cycles() {
        assert_eq!(palette::trail_color(0), palette::RED);
        assert_eq!(palette::trail_color(5), palette::GREY);
        assert_eq!(palette::trail_color(6), palette::RED);
    }

    #[test]
    fn test_rgb_hex() {
        assert_eq!(palette::RED.to_hex(), "#ab2929");
    }

    #[test]
    fn test_visible_planes() {
        let mut snapshot = WorldSnapshot::empty(Viewport::default());
        let plane = |x: f32| PlaneSnapshot {
            plane_id: Uuid::new_v4(),
            callsign: "PLANE-01".to_string(),
            color: palette::RED,
            position: Point::new(x, 450.0),
            heading_deg: 90.0,
            speed: 2.0,
            trail: Vec::new(),
            trail_cursor: 0,
        };
        snapshot.planes = vec![plane(10.0), plane(-10.0), plane(1100.0)];
        assert_eq!(snapshot.visible_planes().count(), 2);
    }

    #[test]
    fn test_snapshot_serializes() {
        let snapshot = WorldSnapshot::empty(Viewport::default());
        let json = serde_json::to_string(&snapshot).unwrap();
        let back: WorldSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back.view_size, snapshot.view_size);
        assert_eq!(back.tick, 0);
    }
}
