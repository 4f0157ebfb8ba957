//! Numeric conversion helpers used across the project.
//!
//! These utilities guard conversions between floating-point and integer
//! domains: aim vectors are quantised before transmission and world
//! positions are floored onto the tile grid.

use glam::{IVec2, Vec2};

use crate::constants::TILE_SIZE;

/// Round a finite `f32` to the nearest `i32`, clamping to the `i32` domain.
///
/// Non-finite input maps to zero.
#[expect(
    clippy::cast_possible_truncation,
    reason = "The value is clamped to the i32 bounds before casting."
)]
#[must_use]
pub fn round_to_i32(value: f32) -> i32 {
    if !value.is_finite() {
        return 0;
    }
    let clamped = f64::from(value)
        .round()
        .clamp(f64::from(i32::MIN), f64::from(i32::MAX));
    clamped as i32
}

/// Floor a finite `f32` into the `i32` domain; non-finite input maps to zero.
#[expect(
    clippy::cast_possible_truncation,
    reason = "The value is clamped to the i32 bounds before casting."
)]
#[must_use]
pub fn floor_to_i32(value: f32) -> i32 {
    if !value.is_finite() {
        return 0;
    }
    let clamped = f64::from(value)
        .floor()
        .clamp(f64::from(i32::MIN), f64::from(i32::MAX));
    clamped as i32
}

/// Quantise a floating aim vector into the integer vector sent to the server.
///
/// # Examples
///
/// ```
/// use glam::{IVec2, Vec2};
/// use foresight::numeric::quantize_aim;
///
/// assert_eq!(quantize_aim(Vec2::new(99.6, -0.4)), IVec2::new(100, 0));
/// ```
#[must_use]
pub fn quantize_aim(aim: Vec2) -> IVec2 {
    IVec2::new(round_to_i32(aim.x), round_to_i32(aim.y))
}

/// Tile column and row containing `pos`.
#[must_use]
pub fn tile_coords(pos: Vec2) -> IVec2 {
    IVec2::new(floor_to_i32(pos.x / TILE_SIZE), floor_to_i32(pos.y / TILE_SIZE))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0.4, 0)]
    #[case(-0.6, -1)]
    #[case(2.5, 3)]
    #[case(f32::NAN, 0)]
    #[case(1e12, i32::MAX)]
    fn rounds_into_range(#[case] value: f32, #[case] expected: i32) {
        assert_eq!(round_to_i32(value), expected);
    }

    #[rstest]
    #[case(Vec2::new(0.0, 0.0), IVec2::new(0, 0))]
    #[case(Vec2::new(31.9, 32.0), IVec2::new(0, 1))]
    #[case(Vec2::new(-0.1, 64.5), IVec2::new(-1, 2))]
    fn tile_coords_floor(#[case] pos: Vec2, #[case] expected: IVec2) {
        assert_eq!(tile_coords(pos), expected);
    }
}
