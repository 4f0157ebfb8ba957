//! Per-frame player snapshot and the nearest-target query.

use glam::Vec2;
use ordered_float::OrderedFloat;

use crate::input::Weapon;
use crate::world::{ClientId, HookState};

/// One player as seen by the client this frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlayerSnapshot {
    /// Player slot.
    pub id: ClientId,
    /// Red/blue game team.
    pub team: i32,
    /// Watching instead of playing.
    pub spectating: bool,
    /// Has a live character this frame.
    pub active: bool,
    /// Frozen by a timer.
    pub frozen: bool,
    /// Frozen until a deep-unfreeze tile.
    pub deep_frozen: bool,
    /// Position in the client's predicted world.
    pub predicted_pos: Vec2,
    /// Position as rendered this frame.
    pub render_pos: Vec2,
    /// Velocity in units per tick.
    pub vel: Vec2,
    /// Hook state.
    pub hook: HookState,
}

impl PlayerSnapshot {
    /// Whether this player may be chosen as an assist target.
    #[must_use]
    pub const fn is_targetable(&self) -> bool {
        !self.spectating && self.active && !self.frozen && !self.deep_frozen
    }
}

/// Everything the engine reads about the live game in one frame.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LiveSnapshot {
    /// Slot of the locally controlled character, if connected.
    pub local_id: Option<ClientId>,
    /// Race team of the local player; assistance is off outside team zero.
    pub local_race_team: i32,
    /// Every connected player, including the local one.
    pub players: Vec<PlayerSnapshot>,
    /// Weapon the local character holds.
    pub local_weapon: Weapon,
    /// Laser reach from the current tuning.
    pub laser_reach: f32,
}

impl LiveSnapshot {
    /// Snapshot of player `id`.
    #[must_use]
    pub fn player(&self, id: ClientId) -> Option<&PlayerSnapshot> {
        self.players.iter().find(|player| player.id == id)
    }

    /// Snapshot of the local player.
    #[must_use]
    pub fn local(&self) -> Option<&PlayerSnapshot> {
        self.local_id.and_then(|id| self.player(id))
    }
}

/// Closest eligible player to the local one within `max_distance`.
///
/// Eligible players share the local player's game team, are playing, alive
/// and not frozen. Distance is measured between predicted positions and must
/// be strictly below `max_distance`; the lowest slot wins ties.
///
/// # Examples
///
/// ```
/// use glam::Vec2;
/// use foresight::target::{nearest, LiveSnapshot, PlayerSnapshot};
/// use foresight::world::{ClientId, HookState};
///
/// let player = |id, x| PlayerSnapshot {
///     id: ClientId(id),
///     team: 0,
///     spectating: false,
///     active: true,
///     frozen: false,
///     deep_frozen: false,
///     predicted_pos: Vec2::new(x, 0.0),
///     render_pos: Vec2::new(x, 0.0),
///     vel: Vec2::ZERO,
///     hook: HookState::Idle,
/// };
/// let snapshot = LiveSnapshot {
///     local_id: Some(ClientId(0)),
///     players: vec![player(0, 0.0), player(1, 300.0), player(2, 120.0)],
///     ..LiveSnapshot::default()
/// };
/// assert_eq!(nearest(&snapshot, 500.0), Some(ClientId(2)));
/// assert_eq!(nearest(&snapshot, 100.0), None);
/// ```
#[must_use]
pub fn nearest(snapshot: &LiveSnapshot, max_distance: f32) -> Option<ClientId> {
    if snapshot.local_race_team != 0 {
        return None;
    }
    let local = snapshot.local()?;
    snapshot
        .players
        .iter()
        .filter(|player| player.id != local.id)
        .filter(|player| player.team == local.team && player.is_targetable())
        .map(|player| {
            (
                OrderedFloat(local.predicted_pos.distance(player.predicted_pos)),
                player.id,
            )
        })
        .filter(|(distance, _)| distance.0 < max_distance)
        .min()
        .map(|(_, id)| id)
}
