//! World abstraction consumed by the engine.
//!
//! The engine never owns physics. It reads the live world through
//! [`Simulation`] and only ever advances [`Fork`]s of it, so a search can
//! never disturb the state the client renders and sends to the server.

mod fork;

use std::fmt;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::collision::CollisionMap;
use crate::input::ControlInput;

pub use fork::Fork;

/// Player slot index.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct ClientId(pub u16);

impl fmt::Display for ClientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// State of a character's grappling hook.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HookState {
    /// Not in use.
    #[default]
    Idle,
    /// Pulled back after missing or hitting an unhookable surface.
    Retracted,
    /// Travelling outwards.
    Flying,
    /// Attached to ground or to a player.
    Grabbed,
}

/// Observation of one character at the end of a tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CharacterState {
    /// Owning player slot.
    pub id: ClientId,
    /// Centre position.
    pub pos: Vec2,
    /// Velocity in units per tick.
    pub vel: Vec2,
    /// Remaining freeze ticks; zero when not frozen by a timer.
    pub freeze_ticks: u32,
    /// Whether the centre is inside a freeze tile.
    pub in_freeze_tile: bool,
    /// Frozen until a deep-unfreeze tile is reached.
    pub deep_frozen: bool,
    /// Hook state.
    pub hook: HookState,
    /// Hook head position.
    pub hook_pos: Vec2,
    /// Player the hook is attached to.
    pub hooked_player: Option<ClientId>,
}

impl CharacterState {
    /// Whether the character currently cannot act.
    #[must_use]
    pub const fn is_frozen(&self) -> bool {
        self.freeze_ticks > 0 || self.deep_frozen
    }

    /// Whether the hook holds another player.
    #[must_use]
    pub const fn is_attached(&self) -> bool {
        matches!(self.hook, HookState::Grabbed) && self.hooked_player.is_some()
    }
}

/// Deterministic game physics.
///
/// Implementations must produce identical results for identical state and
/// inputs, and `clone` must share the collision map rather than copy it.
pub trait Simulation: Clone {
    /// Static map collision.
    type Map: CollisionMap + ?Sized;

    /// Tick counter.
    fn game_tick(&self) -> u64;

    /// Ticks per second.
    fn tick_speed(&self) -> u32;

    /// Collision map shared by every copy of this world.
    fn collision(&self) -> &Self::Map;

    /// Observation of character `id`, or `None` when absent.
    fn character(&self, id: ClientId) -> Option<CharacterState>;

    /// Sets the input `id` uses on the next tick. Returns `false` when the
    /// character does not exist.
    fn apply_input(&mut self, id: ClientId, input: &ControlInput) -> bool;

    /// Increments the tick counter before a tick runs.
    fn begin_tick(&mut self);

    /// Runs one physics step for every character.
    fn tick(&mut self);
}
