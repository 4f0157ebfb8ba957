use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::collision::{CollisionMap, Tile};
use crate::constants::{FALL_LOOKAHEAD_DIVISOR, TILE_SIZE};
use crate::input::{ControlInput, Direction};
use crate::world::CharacterState;

/// Reaction to a freeze tile next to the character.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AntiGoingMode {
    /// Disabled.
    #[default]
    Off,
    /// Walk away from the freeze.
    Steer,
    /// Only cancel movement into the freeze.
    Block,
}

fn grid_pos(pos: Vec2) -> Vec2 {
    pos.floor()
}

/// Jumps when the character is about to fall into freeze.
///
/// The probe sits below the character at a distance proportional to its
/// vertical speed. Returns `true` when jump was pressed, in which case the
/// caller must release it on the next frame.
pub fn anti_falling_freeze<M: CollisionMap + ?Sized>(
    map: &M,
    local: &CharacterState,
    input: &mut ControlInput,
) -> bool {
    let base = grid_pos(local.pos);
    let probe = Vec2::new(base.x, base.y + TILE_SIZE * local.vel.y / FALL_LOOKAHEAD_DIVISOR);
    let falling_into = map.tile_at(probe) == Tile::Freeze;
    let already_in = map.tile_at(local.pos) == Tile::Freeze;
    if falling_into && !already_in {
        log::debug!("freeze below {}; jumping", local.id);
        input.jump = true;
        true
    } else {
        false
    }
}

/// Keeps the character from walking into a freeze tile `range` units to
/// either side.
///
/// Returns whether the direction changed.
pub fn anti_going_freeze<M: CollisionMap + ?Sized>(
    map: &M,
    local: &CharacterState,
    range: f32,
    mode: AntiGoingMode,
    input: &mut ControlInput,
) -> bool {
    let base = grid_pos(local.pos);
    let freeze_right = map.tile_at(base + Vec2::new(range, 0.0)) == Tile::Freeze;
    let freeze_left = map.tile_at(base - Vec2::new(range, 0.0)) == Tile::Freeze;
    let before = input.direction;

    match mode {
        AntiGoingMode::Off => {}
        AntiGoingMode::Steer => {
            if freeze_right {
                input.direction = Direction::Left;
            }
            if freeze_left {
                input.direction = Direction::Right;
            }
        }
        AntiGoingMode::Block => {
            if freeze_right && input.direction == Direction::Right {
                input.direction = Direction::Stop;
            }
            if freeze_left && input.direction == Direction::Left {
                input.direction = Direction::Stop;
            }
        }
    }
    input.direction != before
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collision::TileMap;
    use crate::sim::Character;
    use crate::world::ClientId;
    use rstest::rstest;

    fn state(pos: Vec2, vel: Vec2) -> CharacterState {
        let mut character = Character::new(ClientId(0), pos);
        character.vel = vel;
        character.state()
    }

    fn falling_map() -> TileMap {
        TileMap::from_rows(&[
            "..........",
            "..........",
            "..........",
            "..........",
            "..........",
            "..........",
            "..........",
            "xxxxxxxxxx",
            "##########",
        ])
        .expect("map")
    }

    #[rstest]
    #[case::falling_fast(Vec2::new(160.0, 200.0), 20.0, true)]
    #[case::hovering(Vec2::new(160.0, 200.0), 0.0, false)]
    #[case::already_inside(Vec2::new(160.0, 240.0), 5.0, false)]
    fn jumps_before_freeze(#[case] pos: Vec2, #[case] vy: f32, #[case] expected: bool) {
        let mut input = ControlInput::default();
        let pressed = anti_falling_freeze(&falling_map(), &state(pos, Vec2::new(0.0, vy)), &mut input);
        assert_eq!(pressed, expected);
        assert_eq!(input.jump, expected);
    }

    #[rstest]
    #[case::steer_away_right("....x.....", AntiGoingMode::Steer, Direction::Right, Direction::Left)]
    #[case::steer_away_left("..x.......", AntiGoingMode::Steer, Direction::Stop, Direction::Right)]
    #[case::steer_left_check_last("..x.x.....", AntiGoingMode::Steer, Direction::Stop, Direction::Right)]
    #[case::block_into_freeze("....x.....", AntiGoingMode::Block, Direction::Right, Direction::Stop)]
    #[case::block_allows_away("....x.....", AntiGoingMode::Block, Direction::Left, Direction::Left)]
    #[case::off("....x.....", AntiGoingMode::Off, Direction::Right, Direction::Right)]
    #[case::clear("..........", AntiGoingMode::Steer, Direction::Right, Direction::Right)]
    fn avoids_walking_into_freeze(
        #[case] row: &str,
        #[case] mode: AntiGoingMode,
        #[case] start: Direction,
        #[case] expected: Direction,
    ) {
        let map = TileMap::from_rows(&["..........", row, "##########"]).expect("map");
        let mut input = ControlInput {
            direction: start,
            ..ControlInput::default()
        };
        let changed =
            anti_going_freeze(&map, &state(Vec2::new(100.0, 48.0), Vec2::ZERO), 32.0, mode, &mut input);
        assert_eq!(input.direction, expected);
        assert_eq!(changed, start != expected);
    }
}
