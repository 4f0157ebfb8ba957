//! Reference tick-based physics world.
//!
//! [`TeeWorld`] implements [`Simulation`] over a [`TileMap`] with a small
//! but faithful model of the platformer: ground and air control, jumping,
//! a grappling hook that grabs ground or players, box collision and freeze
//! tiles. The map lives behind an [`Arc`] so every clone shares it.

mod character;

use std::collections::BTreeMap;
use std::sync::Arc;

use glam::Vec2;
use serde::Deserialize;

use crate::collision::TileMap;
use crate::constants::TICK_SPEED;
use crate::input::ControlInput;
use crate::target::{LiveSnapshot, PlayerSnapshot};
use crate::world::{CharacterState, ClientId, Simulation};

pub use character::{is_grounded, move_box, test_box, Character};

/// Physics tuning values.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Downward acceleration per tick.
    pub gravity: f32,
    /// Top walking speed on the ground.
    pub ground_control_speed: f32,
    /// Walking acceleration on the ground.
    pub ground_control_accel: f32,
    /// Horizontal speed kept per tick on the ground without input.
    pub ground_friction: f32,
    /// Top steering speed in the air.
    pub air_control_speed: f32,
    /// Steering acceleration in the air.
    pub air_control_accel: f32,
    /// Horizontal speed kept per tick in the air without input.
    pub air_friction: f32,
    /// Upward speed set by a ground jump.
    pub ground_jump_impulse: f32,
    /// Maximum hook length.
    pub hook_length: f32,
    /// Distance a flying hook travels per tick.
    pub hook_fire_speed: f32,
    /// Pull applied by a grabbed hook per tick.
    pub hook_drag_accel: f32,
    /// Speed above which hook pull no longer accelerates.
    pub hook_drag_speed: f32,
    /// Ticks a player can be held before the hook lets go.
    pub hook_duration_ticks: u32,
    /// Laser travel distance.
    pub laser_reach: f32,
    /// Ticks a freeze tile freezes for.
    pub freeze_ticks: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: 0.5,
            ground_control_speed: 10.0,
            ground_control_accel: 2.0,
            ground_friction: 0.5,
            air_control_speed: 5.0,
            air_control_accel: 1.5,
            air_friction: 0.95,
            ground_jump_impulse: 13.2,
            hook_length: 380.0,
            hook_fire_speed: 80.0,
            hook_drag_accel: 3.0,
            hook_drag_speed: 15.0,
            hook_duration_ticks: TICK_SPEED + TICK_SPEED / 5,
            laser_reach: 800.0,
            freeze_ticks: 3 * TICK_SPEED,
        }
    }
}

/// A deterministic world of characters on a shared tile map.
#[derive(Clone, Debug, PartialEq)]
pub struct TeeWorld {
    collision: Arc<TileMap>,
    game_tick: u64,
    tuning: Tuning,
    characters: BTreeMap<ClientId, Character>,
}

impl TeeWorld {
    /// An empty world on `collision` with default tuning.
    #[must_use]
    pub fn new(collision: Arc<TileMap>) -> Self {
        Self {
            collision,
            game_tick: 0,
            tuning: Tuning::default(),
            characters: BTreeMap::new(),
        }
    }

    /// Replaces the physics tuning.
    #[must_use]
    pub const fn with_tuning(mut self, tuning: Tuning) -> Self {
        self.tuning = tuning;
        self
    }

    /// Physics tuning in use.
    #[must_use]
    pub const fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    /// Shared handle to the collision map.
    #[must_use]
    pub const fn collision_handle(&self) -> &Arc<TileMap> {
        &self.collision
    }

    /// Adds `character`, replacing any character in the same slot.
    pub fn spawn(&mut self, character: Character) {
        self.characters.insert(character.id, character);
    }

    /// Removes the character in slot `id`.
    pub fn remove(&mut self, id: ClientId) -> Option<Character> {
        self.characters.remove(&id)
    }

    /// Character in slot `id`.
    #[must_use]
    pub fn get(&self, id: ClientId) -> Option<&Character> {
        self.characters.get(&id)
    }

    /// Mutable character in slot `id`.
    pub fn get_mut(&mut self, id: ClientId) -> Option<&mut Character> {
        self.characters.get_mut(&id)
    }

    /// Characters ordered by slot.
    pub fn characters(&self) -> impl Iterator<Item = &Character> {
        self.characters.values()
    }

    /// Snapshot of the world as the client would see it, from `local`'s
    /// point of view. Predicted and rendered positions coincide here.
    #[must_use]
    pub fn snapshot(&self, local: Option<ClientId>) -> LiveSnapshot {
        let local_character = local.and_then(|id| self.get(id));
        LiveSnapshot {
            local_id: local,
            local_race_team: local_character.map_or(0, |c| c.race_team),
            players: self
                .characters()
                .map(|c| PlayerSnapshot {
                    id: c.id,
                    team: c.team,
                    spectating: c.spectating,
                    active: true,
                    frozen: c.freeze_ticks > 0,
                    deep_frozen: c.deep_frozen,
                    predicted_pos: c.pos,
                    render_pos: c.pos,
                    vel: c.vel,
                    hook: c.state().hook,
                })
                .collect(),
            local_weapon: local_character.map(|c| c.weapon).unwrap_or_default(),
            laser_reach: self.tuning.laser_reach,
        }
    }
}

impl Simulation for TeeWorld {
    type Map = TileMap;

    fn game_tick(&self) -> u64 {
        self.game_tick
    }

    fn tick_speed(&self) -> u32 {
        TICK_SPEED
    }

    fn collision(&self) -> &TileMap {
        &self.collision
    }

    fn character(&self, id: ClientId) -> Option<CharacterState> {
        self.get(id).map(Character::state)
    }

    fn apply_input(&mut self, id: ClientId, input: &ControlInput) -> bool {
        self.get_mut(id).map(|c| c.set_input(input)).is_some()
    }

    fn begin_tick(&mut self) {
        self.game_tick += 1;
    }

    fn tick(&mut self) {
        let players: Vec<(ClientId, Vec2)> = self.characters().map(|c| (c.id, c.pos)).collect();
        for character in self.characters.values_mut() {
            character.tick_controls(self.collision.as_ref(), &self.tuning, &players);
        }
        for character in self.characters.values_mut() {
            character.tick_movement(self.collision.as_ref(), &self.tuning);
        }
        log::trace!("tick {} simulated {} characters", self.game_tick, players.len());
    }
}
