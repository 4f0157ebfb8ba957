//! Basic vector math helper functions.
//! Guarded normalisation so callers cannot divide by a zero length.
use glam::Vec2;

/// Lengths at or below this are treated as zero.
const MIN_LENGTH: f32 = 1e-6;

/// Returns the unit vector pointing along `vector`.
///
/// Returns `None` when any component is not finite or the length is
/// effectively zero, so every caller has to decide what an undefined
/// direction means for it.
///
/// # Examples
///
/// ```
/// use glam::Vec2;
/// use foresight::vector_math::try_normalize;
///
/// let unit = try_normalize(Vec2::new(3.0, 4.0)).unwrap();
/// assert!((unit.x - 0.6).abs() < 1e-6);
/// assert!((unit.y - 0.8).abs() < 1e-6);
///
/// assert_eq!(try_normalize(Vec2::ZERO), None);
/// ```
#[must_use]
pub fn try_normalize(vector: Vec2) -> Option<Vec2> {
    if !vector.is_finite() {
        return None;
    }
    let length = vector.length();
    if length <= MIN_LENGTH {
        return None;
    }
    Some(vector / length)
}

/// Normalises `vector`, returning [`Vec2::ZERO`] when it has no direction.
///
/// Aim vectors use this form: a zero aim stays zero rather than producing
/// NaN components that would be transmitted to the server.
#[must_use]
pub fn normalize_or_zero(vector: Vec2) -> Vec2 {
    try_normalize(vector).unwrap_or(Vec2::ZERO)
}

/// Adds `modifier` to `current` without leaving `[min, max]`.
///
/// A value already outside the range on the side being pushed towards is
/// returned unchanged, so external impulses are never clipped by control
/// acceleration.
#[must_use]
pub fn saturated_add(min: f32, max: f32, current: f32, modifier: f32) -> f32 {
    if modifier < 0.0 {
        if current < min {
            return current;
        }
        (current + modifier).max(min)
    } else {
        if current > max {
            return current;
        }
        (current + modifier).min(max)
    }
}
