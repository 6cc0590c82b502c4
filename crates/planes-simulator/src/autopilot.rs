//! Semi-random autopilot.
//!
//! Each plane re-evaluates two things on independent countdowns:
//!
//! 1. Course. Far off the bearing to the target: turn back sharply. A bit
//!    off: turn back gently. On course: veer off at random and hold that
//!    bank for a long while.
//! 2. Speed. Falling behind the left third of the view: speed up. Middle
//!    third: jitter. Running into the right third: slow down.
//!
//! The mix keeps the flight paths wandering instead of homing in straight.

use crate::geometry::heading_to;
use crate::plane::Plane;
use crate::rng::Dice;
use crate::world::Viewpoint;
use planes_domain::Point;

/// Course timer reset range, in ticks.
pub const COURSE_TIMER_RANGE: (i32, i32) = (5, 20);
/// Course timer after deliberately veering off course.
pub const COURSE_HOLD_TICKS: i32 = 30;
/// Speed timer reset range, in ticks.
pub const SPEED_TIMER_RANGE: (i32, i32) = (25, 50);

/// Deviation above which the plane turns sharply.
pub const SHARP_THRESHOLD_DEG: f32 = 60.0;
/// Deviation above which the plane turns gently.
pub const SOFT_THRESHOLD_DEG: f32 = 30.0;

/// Speed floor, enforced after every adjustment.
pub const MIN_SPEED: f32 = 1.0;

/// Course branch taken for a given deviation from the target bearing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CourseCorrection {
    /// Deviation above 60 degrees.
    Sharp,
    /// Deviation in `(30, 60]`.
    Soft,
    /// Deviation of at most 30 degrees.
    OnCourse,
}

impl CourseCorrection {
    /// Classify a signed heading difference by its magnitude.
    pub fn classify(difference: f32) -> Self {
        let magnitude = difference.abs();
        if magnitude > SHARP_THRESHOLD_DEG {
            Self::Sharp
        } else if magnitude > SOFT_THRESHOLD_DEG {
            Self::Soft
        } else {
            Self::OnCourse
        }
    }
}

/// Band of the view a plane is flying in, split into thirds of the width.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpeedZone {
    /// Left third, or behind the left edge.
    Behind,
    Middle,
    /// Right third, or past the right edge.
    Ahead,
}

impl SpeedZone {
    /// Classify a distance measured from the view's left edge.
    ///
    /// The thirds are whole units: `W/3` and `2*(W/3)` with integer division.
    pub fn classify(distance_from_left_edge: f32, view_width: u32) -> Self {
        let third = view_width / 3;
        if distance_from_left_edge < third as f32 {
            Self::Behind
        } else if distance_from_left_edge < (2 * third) as f32 {
            Self::Middle
        } else {
            Self::Ahead
        }
    }

    /// Draw a speed change for this zone, in units per tick.
    fn draw_delta(self, dice: &mut impl Dice) -> f32 {
        match self {
            Self::Behind => dice.random_int(1, 10) as f32 / 10.0,
            Self::Middle => dice.random_int(-3, 3) as f32 / 10.0,
            Self::Ahead => -(dice.random_int(1, 10) as f32) / 10.0,
        }
    }
}

/// Outcome of a course re-evaluation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CourseDecision {
    pub correction: CourseCorrection,
    /// Heading minus bearing to the target, not normalized.
    pub difference: f32,
    pub offset: f32,
    pub next_check: i32,
}

/// Outcome of a speed re-evaluation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpeedDecision {
    pub zone: SpeedZone,
    pub distance_from_left_edge: f32,
    pub delta: f32,
    pub speed: f32,
    pub next_check: i32,
}

/// Bearing the plane would need to fly straight into `target`.
pub fn crash_course(position: Point, target: Point) -> f32 {
    -heading_to(position, target)
}

/// Re-evaluate the plane's turning rate if its course timer ran out.
///
/// The difference between heading and target bearing is a raw subtraction;
/// near the wrap point a small real deviation can read as a large one and
/// trigger a sharp turn.
pub fn course_decision(
    plane: &mut Plane,
    target: Point,
    dice: &mut impl Dice,
) -> Option<CourseDecision> {
    if plane.course_timer != 0 {
        return None;
    }

    plane.course_timer = dice.random_int(COURSE_TIMER_RANGE.0, COURSE_TIMER_RANGE.1);

    let difference = plane.heading - crash_course(plane.position, target);
    let correction = CourseCorrection::classify(difference);

    plane.offset = match correction {
        CourseCorrection::Sharp => turn_back(difference, 10.0, dice),
        CourseCorrection::Soft => turn_back(difference, 20.0, dice),
        CourseCorrection::OnCourse => {
            plane.course_timer = COURSE_HOLD_TICKS;
            dice.random_int(-2, 2) as f32 / 5.0
        }
    };

    Some(CourseDecision {
        correction,
        difference,
        offset: plane.offset,
        next_check: plane.course_timer,
    })
}

/// Turning rate toward the target: positive when the heading lags behind
/// the bearing, negative otherwise.
fn turn_back(difference: f32, divisor: f32, dice: &mut impl Dice) -> f32 {
    if difference < 0.0 {
        dice.random_int(1, 4) as f32 / divisor
    } else {
        dice.random_int(-1, -4) as f32 / divisor
    }
}

/// Re-evaluate the plane's speed if its speed timer ran out.
pub fn speed_decision(
    plane: &mut Plane,
    viewpoint: &Viewpoint,
    dice: &mut impl Dice,
) -> Option<SpeedDecision> {
    if plane.speed_timer != 0 {
        return None;
    }

    plane.speed_timer = dice.random_int(SPEED_TIMER_RANGE.0, SPEED_TIMER_RANGE.1);

    let distance = plane.position.x - viewpoint.left_edge();
    let zone = SpeedZone::classify(distance, viewpoint.size.width);
    let delta = zone.draw_delta(dice);

    plane.speed += delta;
    if plane.speed < MIN_SPEED {
        plane.speed = MIN_SPEED;
    }

    Some(SpeedDecision {
        zone,
        distance_from_left_edge: distance,
        delta,
        speed: plane.speed,
        next_check: plane.speed_timer,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::SimRng;
    use crate::rng::testing::ScriptedDice;
    use planes_domain::{Viewport, palette};

    fn plane_at(position: Point, heading: f32) -> Plane {
        let mut plane = Plane::new("PLANE-01", palette::RED, position);
        plane.heading = heading;
        plane
    }

    fn viewpoint() -> Viewpoint {
        Viewpoint::new(Viewport::default())
    }

    #[test]
    fn test_classify_boundaries() {
        let cases = [
            (0.0, CourseCorrection::OnCourse),
            (29.9, CourseCorrection::OnCourse),
            (30.0, CourseCorrection::OnCourse),
            (30.1, CourseCorrection::Soft),
            (59.9, CourseCorrection::Soft),
            (60.0, CourseCorrection::Soft),
            (60.1, CourseCorrection::Sharp),
            (-30.0, CourseCorrection::OnCourse),
            (-30.1, CourseCorrection::Soft),
            (-60.1, CourseCorrection::Sharp),
        ];
        for (difference, expected) in cases {
            assert_eq!(CourseCorrection::classify(difference), expected, "{difference}");
        }
    }

    #[test]
    fn test_crash_course_to_the_right() {
        let bearing = crash_course(Point::ORIGIN, Point::new(100.0, 0.0));
        assert_eq!(bearing, 90.0);
    }

    #[test]
    fn test_scenario_heading_zero_target_right() {
        // bearing 90, heading 0: difference -90, sharp turn with positive offset
        let mut plane = plane_at(Point::ORIGIN, 0.0);
        let mut dice = ScriptedDice::new([12, 3]);
        let decision = course_decision(&mut plane, Point::new(100.0, 0.0), &mut dice).unwrap();

        assert_eq!(decision.correction, CourseCorrection::Sharp);
        assert_eq!(decision.difference, -90.0);
        assert!((plane.offset - 0.3).abs() < 1e-6);
        assert_eq!(plane.course_timer, 12);
        assert_eq!(dice.calls, vec![(5, 20), (1, 4)]);
    }

    #[test]
    fn test_scenario_boundary_deviations() {
        let target = Point::new(100.0, 0.0);
        let cases = [
            (29.9, CourseCorrection::OnCourse),
            (30.0, CourseCorrection::OnCourse),
            (30.1, CourseCorrection::Soft),
            (59.9, CourseCorrection::Soft),
            (60.0, CourseCorrection::Soft),
            (60.1, CourseCorrection::Sharp),
        ];
        for (deviation, expected) in cases {
            let mut plane = plane_at(Point::ORIGIN, 90.0 + deviation);
            let mut dice = ScriptedDice::new([10, 2]);
            let decision = course_decision(&mut plane, target, &mut dice).unwrap();
            assert_eq!(decision.correction, expected, "deviation {deviation}");
        }
    }

    #[test]
    fn test_perfect_course_veers_off_and_holds() {
        let mut plane = plane_at(Point::ORIGIN, 90.0);
        let mut dice = ScriptedDice::new([7, -2]);
        let decision = course_decision(&mut plane, Point::new(100.0, 0.0), &mut dice).unwrap();

        assert_eq!(decision.difference, 0.0);
        assert_eq!(decision.correction, CourseCorrection::OnCourse);
        assert_eq!(plane.course_timer, COURSE_HOLD_TICKS);
        assert!((plane.offset + 0.4).abs() < 1e-6);
        assert_eq!(dice.calls, vec![(5, 20), (-2, 2)]);
    }

    #[test]
    fn test_positive_difference_turns_negative() {
        // heading 200 against bearing 90: difference 110
        let mut plane = plane_at(Point::ORIGIN, 200.0);
        let mut dice = ScriptedDice::new([5, -4]);
        let decision = course_decision(&mut plane, Point::new(100.0, 0.0), &mut dice).unwrap();
        assert_eq!(decision.correction, CourseCorrection::Sharp);
        assert!((plane.offset + 0.4).abs() < 1e-6);
        assert_eq!(dice.calls[1], (-1, -4));
    }

    #[test]
    fn test_wrap_boundary_misclassified_as_sharp() {
        // bearing -10 and heading 350 point the same way, but the raw
        // difference reads 360 and takes the sharp branch
        let bearing = 10f32.to_radians();
        let target = Point::new(-100.0 * bearing.sin(), -100.0 * bearing.cos());
        assert!((crash_course(Point::ORIGIN, target) + 10.0).abs() < 1e-3);

        let mut plane = plane_at(Point::ORIGIN, 350.0);
        let mut dice = ScriptedDice::new([8, -2]);
        let decision = course_decision(&mut plane, target, &mut dice).unwrap();

        assert!((decision.difference - 360.0).abs() < 1e-3);
        assert_eq!(decision.correction, CourseCorrection::Sharp);
        assert!((plane.offset + 0.2).abs() < 1e-6);
        assert_eq!(dice.calls, vec![(5, 20), (-1, -4)]);
    }

    #[test]
    fn test_soft_turn_is_halved() {
        // heading 45 against bearing 90: difference -45
        let mut plane = plane_at(Point::ORIGIN, 45.0);
        let mut dice = ScriptedDice::new([5, 4]);
        course_decision(&mut plane, Point::new(100.0, 0.0), &mut dice).unwrap();
        assert!((plane.offset - 0.2).abs() < 1e-6);
    }

    #[test]
    fn test_course_gated_on_timer() {
        let mut plane = plane_at(Point::ORIGIN, 0.0);
        plane.course_timer = 3;
        plane.offset = 0.25;
        let mut dice = ScriptedDice::new([]);
        assert!(course_decision(&mut plane, Point::new(100.0, 0.0), &mut dice).is_none());
        assert_eq!(plane.offset, 0.25);
        assert!(dice.calls.is_empty());
    }

    #[test]
    fn test_offsets_stay_in_range() {
        let mut dice = SimRng::seeded(1234);
        for i in 0..2000 {
            let heading = (i % 360) as f32;
            let mut plane = plane_at(Point::new(i as f32, 40.0), heading);
            let decision = course_decision(&mut plane, Point::new(550.0, 450.0), &mut dice).unwrap();
            let bound = match decision.correction {
                CourseCorrection::Sharp | CourseCorrection::OnCourse => 0.4,
                CourseCorrection::Soft => 0.2,
            };
            assert!(plane.offset.abs() <= bound + 1e-6);
            assert!((5..=COURSE_HOLD_TICKS).contains(&plane.course_timer));
        }
    }

    #[test]
    fn test_speed_zone_thirds() {
        assert_eq!(SpeedZone::classify(-50.0, 1100), SpeedZone::Behind);
        assert_eq!(SpeedZone::classify(365.9, 1100), SpeedZone::Behind);
        assert_eq!(SpeedZone::classify(366.0, 1100), SpeedZone::Middle);
        assert_eq!(SpeedZone::classify(731.9, 1100), SpeedZone::Middle);
        assert_eq!(SpeedZone::classify(732.0, 1100), SpeedZone::Ahead);
        assert_eq!(SpeedZone::classify(5000.0, 1100), SpeedZone::Ahead);
    }

    #[test]
    fn test_speed_clamped_at_floor() {
        let mut plane = plane_at(Point::new(900.0, 450.0), 90.0);
        plane.speed = 1.05;
        let mut dice = ScriptedDice::new([30, 10]);
        let decision = speed_decision(&mut plane, &viewpoint(), &mut dice).unwrap();

        assert_eq!(decision.zone, SpeedZone::Ahead);
        assert!((decision.delta + 1.0).abs() < 1e-6);
        assert_eq!(plane.speed, MIN_SPEED);
        assert_eq!(plane.speed_timer, 30);
    }

    #[test]
    fn test_speed_behind_accelerates() {
        let mut plane = plane_at(Point::new(100.0, 450.0), 90.0);
        let mut dice = ScriptedDice::new([40, 10]);
        speed_decision(&mut plane, &viewpoint(), &mut dice).unwrap();
        assert!((plane.speed - 3.0).abs() < 1e-6);
        assert_eq!(dice.calls, vec![(25, 50), (1, 10)]);
    }

    #[test]
    fn test_speed_middle_jitters() {
        let mut plane = plane_at(Point::new(550.0, 450.0), 90.0);
        let mut dice = ScriptedDice::new([40, -3]);
        let decision = speed_decision(&mut plane, &viewpoint(), &mut dice).unwrap();
        assert_eq!(decision.zone, SpeedZone::Middle);
        assert!((plane.speed - 1.7).abs() < 1e-6);
    }

    #[test]
    fn test_speed_measured_from_scrolled_edge() {
        let mut view = viewpoint();
        view.scroll(1000.0);
        // left edge is now at 1000, so x=1100 is behind
        let mut plane = plane_at(Point::new(1100.0, 450.0), 90.0);
        let mut dice = ScriptedDice::new([40, 1]);
        let decision = speed_decision(&mut plane, &view, &mut dice).unwrap();
        assert_eq!(decision.zone, SpeedZone::Behind);
        assert!((decision.distance_from_left_edge - 100.0).abs() < 1e-3);
    }

    #[test]
    fn test_speed_never_below_floor() {
        let mut dice = SimRng::seeded(99);
        let mut plane = plane_at(Point::new(5000.0, 450.0), 90.0);
        for _ in 0..500 {
            plane.speed_timer = 0;
            speed_decision(&mut plane, &viewpoint(), &mut dice).unwrap();
            assert!(plane.speed >= MIN_SPEED);
            assert!((25..=50).contains(&plane.speed_timer));
        }
    }
}
