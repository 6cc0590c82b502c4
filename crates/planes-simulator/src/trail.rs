//! Fixed-capacity ring buffer of recent plane positions.

use planes_domain::Point;

/// Slots per trail.
pub const TRAIL_LEN: usize = 600;

/// Position history written once per tick.
///
/// Storage is allocated once at construction and never resized. Slots that
/// were never written keep the fill point given to [`Trail::new`].
#[derive(Debug, Clone)]
pub struct Trail {
    slots: Box<[Point; TRAIL_LEN]>,
    cursor: usize,
    written: usize,
}

impl Trail {
    pub fn new(fill: Point) -> Self {
        Self {
            slots: Box::new([fill; TRAIL_LEN]),
            cursor: 0,
            written: 0,
        }
    }

    /// Overwrite the slot under the cursor and advance it.
    pub fn record(&mut self, point: Point) {
        self.slots[self.cursor] = point;
        self.cursor = (self.cursor + 1) % TRAIL_LEN;
        self.written = (self.written + 1).min(TRAIL_LEN);
    }

    /// Next slot to be written, always in `[0, TRAIL_LEN)`.
    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    /// Number of slots holding recorded points.
    pub const fn len(&self) -> usize {
        self.written
    }

    pub const fn is_empty(&self) -> bool {
        self.written == 0
    }

    /// Raw storage in slot order, including unwritten slots.
    pub fn slots(&self) -> &[Point] {
        &self.slots[..]
    }

    /// Most recently recorded point.
    pub fn latest(&self) -> Option<Point> {
        if self.is_empty() {
            return None;
        }
        Some(self.slots[(self.cursor + TRAIL_LEN - 1) % TRAIL_LEN])
    }

    /// Recorded points, oldest first.
    pub fn iter_recent(&self) -> impl Iterator<Item = Point> + '_ {
        let start = (self.cursor + TRAIL_LEN - self.written) % TRAIL_LEN;
        (0..self.written).map(move |i| self.slots[(start + i) % TRAIL_LEN])
    }
}
