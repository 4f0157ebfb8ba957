//! Utility helpers for tests.
//!
//! Map layouts and world builders shared by the integration tests.

pub mod maps;

use std::sync::Arc;

use foresight::collision::TileMap;
use foresight::constants::{PHYSICAL_HALF, TILE_SIZE};
use foresight::input::{ControlInput, Direction};
use foresight::sim::{Character, TeeWorld};
use foresight::world::ClientId;
use glam::Vec2;

/// Centre height of a character resting on the solid row `floor_row`.
///
/// # Examples
/// ```
/// assert_eq!(test_utils::standing_y(10), 305.5);
/// ```
pub fn standing_y(floor_row: u16) -> f32 {
    f32::from(floor_row) * TILE_SIZE - PHYSICAL_HALF - 0.5
}

/// Parse `rows` into a shared map.
///
/// # Panics
/// Panics if the rows do not form a valid map.
pub fn map_from_rows(rows: &[&str]) -> Arc<TileMap> {
    Arc::new(TileMap::from_rows(rows).expect("test map rows must be valid"))
}

/// A world on `map` holding `characters`.
pub fn world_with(map: Arc<TileMap>, characters: impl IntoIterator<Item = Character>) -> TeeWorld {
    let mut world = TeeWorld::new(map);
    for character in characters {
        world.spawn(character);
    }
    world
}

/// A character at `pos` that keeps sending `input`.
pub fn character(id: u16, pos: Vec2, input: ControlInput) -> Character {
    let mut character = Character::new(ClientId(id), pos);
    character.input = input;
    character
}

/// Input with only movement set.
pub fn movement(direction: Direction, hook: bool) -> ControlInput {
    ControlInput::default().with_movement(direction, hook)
}
