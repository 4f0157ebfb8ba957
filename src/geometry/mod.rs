//! Geometry kernel.
//!
//! Segment and circle helpers used by the wallshot search and the reference
//! hook physics. Intersection maths runs in `f64` so that near-tangent
//! crossings do not flip between frames on rounding noise.

pub mod trace;

use glam::Vec2;

use crate::constants::{DEGENERATE_SEGMENT_EPSILON, POINT_ON_SEGMENT_EPSILON};

pub use trace::{trace_bounce, BounceModel};

/// Directed line segment; one leg of a laser trajectory.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Segment {
    /// Where the leg begins.
    pub start: Vec2,
    /// Where the leg ends.
    pub end: Vec2,
}

impl Segment {
    /// Builds a segment from `start` to `end`.
    #[must_use]
    pub const fn new(start: Vec2, end: Vec2) -> Self {
        Self { start, end }
    }

    /// Length of the segment.
    #[must_use]
    pub fn length(&self) -> f32 {
        self.start.distance(self.end)
    }

    /// Vector from `start` to `end`.
    #[must_use]
    pub fn delta(&self) -> Vec2 {
        self.end - self.start
    }
}

/// How the infinite line through a segment meets a circle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CircleCrossing {
    /// The line touches the circle at a single point.
    Tangent(Vec2),
    /// The line passes through the circle.
    Secant {
        /// Crossing nearer the segment start.
        entry: Vec2,
        /// Crossing farther along the segment direction.
        exit: Vec2,
    },
}

impl CircleCrossing {
    /// Point where the line first meets the circle.
    #[must_use]
    pub const fn entry(&self) -> Vec2 {
        match *self {
            Self::Tangent(point) | Self::Secant { entry: point, .. } => point,
        }
    }
}

/// Intersects the infinite line through `segment` with a circle.
///
/// Solves `A t^2 + B t + C = 0` for the line `start + t (end - start)`.
/// Crossings are reported even when `t` falls outside `[0, 1]`; callers
/// check containment with [`point_on_segment`]. Returns `None` for a
/// degenerate segment or a line that misses the circle.
///
/// # Examples
///
/// ```
/// use glam::Vec2;
/// use foresight::geometry::{line_circle_intersection, CircleCrossing, Segment};
///
/// let segment = Segment::new(Vec2::ZERO, Vec2::new(10.0, 0.0));
/// let crossing = line_circle_intersection(Vec2::new(5.0, 0.0), 2.0, &segment);
/// assert_eq!(
///     crossing,
///     Some(CircleCrossing::Secant {
///         entry: Vec2::new(3.0, 0.0),
///         exit: Vec2::new(7.0, 0.0),
///     })
/// );
/// ```
#[must_use]
pub fn line_circle_intersection(
    center: Vec2,
    radius: f32,
    segment: &Segment,
) -> Option<CircleCrossing> {
    let start = segment.start.as_dvec2();
    let delta = segment.end.as_dvec2() - start;
    let offset = start - center.as_dvec2();

    let a = delta.length_squared();
    if a <= DEGENERATE_SEGMENT_EPSILON {
        return None;
    }
    let b = 2.0 * offset.dot(delta);
    let c = offset.length_squared() - f64::from(radius) * f64::from(radius);
    let discriminant = b.mul_add(b, -4.0 * a * c);

    if discriminant < 0.0 {
        return None;
    }
    let at = |t: f64| -> Vec2 { (start + delta * t).as_vec2() };
    if discriminant <= 0.0 {
        return Some(CircleCrossing::Tangent(at(-b / (2.0 * a))));
    }
    let root = discriminant.sqrt();
    Some(CircleCrossing::Secant {
        entry: at((-b - root) / (2.0 * a)),
        exit: at((-b + root) / (2.0 * a)),
    })
}

/// Whether `point` lies on `segment`, within a small tolerance.
///
/// Uses the sum of distances from each end, so points on the extension of
/// the segment beyond either end are rejected.
#[must_use]
pub fn point_on_segment(segment: &Segment, point: Vec2) -> bool {
    let start = segment.start.as_dvec2();
    let end = segment.end.as_dvec2();
    let p = point.as_dvec2();
    (start.distance(p) + p.distance(end) - start.distance(end)).abs() < POINT_ON_SEGMENT_EPSILON
}

/// Point of the segment `a`..`b` nearest to `p`.
///
/// A degenerate segment yields `a`.
#[must_use]
pub fn closest_point_on_segment(a: Vec2, b: Vec2, p: Vec2) -> Vec2 {
    let ab = b.as_dvec2() - a.as_dvec2();
    let len_sq = ab.length_squared();
    if len_sq <= DEGENERATE_SEGMENT_EPSILON {
        return a;
    }
    let t = ((p.as_dvec2() - a.as_dvec2()).dot(ab) / len_sq).clamp(0.0, 1.0);
    (a.as_dvec2() + ab * t).as_vec2()
}

/// Angle in radians of `v`, measured like `atan2(y, x)`.
#[must_use]
pub fn bearing(v: Vec2) -> f32 {
    v.y.atan2(v.x)
}

/// Where the line through `segment` enters the circle, if that point lies
/// on the segment itself.
///
/// The entry is the crossing nearer the segment start (the minus root), so
/// a segment that starts inside the circle and leaves it has no entry.
#[must_use]
pub fn segment_circle_entry(center: Vec2, radius: f32, segment: &Segment) -> Option<Vec2> {
    line_circle_intersection(center, radius, segment)
        .map(|crossing| crossing.entry())
        .filter(|entry| point_on_segment(segment, *entry))
}
