//! Bearings and angle conversions.
//!
//! Bearings are measured from the Y axis, matching the sprite's facing
//! convention, so they are not the usual mathematical angle.

use planes_domain::Point;

/// Bearing in degrees between `from` and `to`, in `(-180, 180]`.
///
/// Computed as `atan2(from.x - to.x, from.y - to.y)` in double precision,
/// so axis-aligned bearings come out as exact multiples of 90. Coincident
/// points yield `0.0`.
pub fn heading_to(from: Point, to: Point) -> f32 {
    let dx = f64::from(from.x) - f64::from(to.x);
    let dy = f64::from(from.y) - f64::from(to.y);
    if dx == 0.0 && dy == 0.0 {
        return 0.0;
    }
    dx.atan2(dy).to_degrees() as f32
}

pub fn degrees_to_radians(degrees: f32) -> f32 {
    degrees.to_radians()
}

/// Wrap an absolute heading into `[0, 360)`.
pub fn wrap_degrees(degrees: f32) -> f32 {
    let wrapped = degrees.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}
