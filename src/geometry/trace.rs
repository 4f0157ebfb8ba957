//! Bounced ray tracing against a collision map.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::Segment;
use crate::collision::CollisionMap;
use crate::constants::BOUNCE_PROBE_DISTANCE;
use crate::vector_math::try_normalize;

/// How a traced ray continues after it hits a solid tile.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BounceModel {
    /// The ray stops at the first wall; one leg at most.
    #[default]
    Truncate,
    /// The ray mirrors off the wall per axis and keeps travelling.
    Specular,
}

/// Traces a ray from `start` along `direction` for at most `reach` units.
///
/// The map is queried at most `bounces + 1` times. Each leg ends at the last
/// free point before a wall, or where the remaining reach runs out. A leg of
/// zero length ends the trace without being recorded, and a `direction`
/// with no length yields no legs at all.
#[must_use]
pub fn trace_bounce<M: CollisionMap + ?Sized>(
    map: &M,
    start: Vec2,
    direction: Vec2,
    reach: f32,
    bounces: u32,
    model: BounceModel,
) -> Vec<Segment> {
    let Some(mut dir) = try_normalize(direction) else {
        return Vec::new();
    };
    let mut legs = Vec::new();
    let mut from = start;
    let mut remaining = reach;

    for _ in 0..=bounces {
        if remaining <= 0.0 {
            break;
        }
        let to = from + dir * remaining;
        let (end, next_dir) = match map.intersect_line(from, to) {
            Some(hit) => {
                let next = match model {
                    BounceModel::Truncate => Vec2::ZERO,
                    BounceModel::Specular => reflect_off(map, hit.before, dir),
                };
                (hit.before, next)
            }
            None => (to, dir),
        };
        let travelled = from.distance(end);
        if travelled <= 0.0 {
            break;
        }
        legs.push(Segment::new(from, end));
        remaining -= travelled;
        from = end;
        dir = next_dir;
    }
    legs
}

/// Mirrors `dir` off whatever solid surface lies just ahead of `at`.
///
/// Each axis is probed separately [`BOUNCE_PROBE_DISTANCE`] units ahead. A
/// corner hit where neither axis probe is solid sends the ray straight back.
#[must_use]
pub fn reflect_off<M: CollisionMap + ?Sized>(map: &M, at: Vec2, dir: Vec2) -> Vec2 {
    let step = dir * BOUNCE_PROBE_DISTANCE;
    if !map.is_solid(at + step) {
        return dir;
    }
    let flip_x = map.is_solid(Vec2::new(at.x + step.x, at.y));
    let flip_y = map.is_solid(Vec2::new(at.x, at.y + step.y));
    match (flip_x, flip_y) {
        (false, false) => -dir,
        (fx, fy) => Vec2::new(
            if fx { -dir.x } else { dir.x },
            if fy { -dir.y } else { dir.y },
        ),
    }
}
