//! Per-character physics: control, hook, box movement and freeze tiles.
//!
//! The step is split in two phases so that every hook in a tick sees the
//! same player positions regardless of iteration order.

use glam::Vec2;
use serde::Deserialize;

use super::Tuning;
use crate::collision::{CollisionMap, Tile};
use crate::constants::{
    GROUND_PROBE, HOOK_DRAG_MIN_DISTANCE, HOOK_PLAYER_SLACK, MAX_VELOCITY, PHYSICAL_HALF,
    PHYSICAL_SIZE,
};
use crate::geometry::closest_point_on_segment;
use crate::input::{ControlInput, Direction, Weapon};
use crate::numeric::floor_to_i32;
use crate::vector_math::{normalize_or_zero, saturated_add, try_normalize};
use crate::world::{CharacterState, ClientId, HookState};

/// Fraction of downward hook drag that is kept.
const HOOK_DRAG_DOWN_FACTOR: f32 = 0.3;
/// Horizontal drag kept when pulling the way the player walks.
const HOOK_DRAG_ALONG_FACTOR: f32 = 0.95;
/// Horizontal drag kept otherwise.
const HOOK_DRAG_AGAINST_FACTOR: f32 = 0.75;
/// Distance in front of the character where a fired hook appears.
const HOOK_SPAWN_FACTOR: f32 = 1.5;

/// A simulated player character.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct Character {
    /// Player slot.
    pub id: ClientId,
    /// Centre position.
    pub pos: Vec2,
    /// Velocity in units per tick.
    pub vel: Vec2,
    /// Input used on every following tick until replaced.
    pub input: ControlInput,
    /// Remaining timed freeze.
    pub freeze_ticks: u32,
    /// Frozen until a deep-unfreeze tile is reached.
    pub deep_frozen: bool,
    /// Armed weapon.
    pub weapon: Weapon,
    /// Red/blue game team.
    pub team: i32,
    /// Cooperative race team; zero when not in one.
    pub race_team: i32,
    /// Watching instead of playing.
    pub spectating: bool,
    #[serde(skip)]
    in_freeze_tile: bool,
    #[serde(skip)]
    hook: HookState,
    #[serde(skip)]
    hook_pos: Vec2,
    #[serde(skip)]
    hook_dir: Vec2,
    #[serde(skip)]
    hooked_player: Option<ClientId>,
    #[serde(skip)]
    hook_ticks: u32,
    #[serde(skip)]
    jump_held: bool,
}

impl Default for Character {
    fn default() -> Self {
        Self::new(ClientId::default(), Vec2::ZERO)
    }
}

impl Character {
    /// A standing, unfrozen character at `pos`.
    #[must_use]
    pub fn new(id: ClientId, pos: Vec2) -> Self {
        Self {
            id,
            pos,
            vel: Vec2::ZERO,
            input: ControlInput::default(),
            freeze_ticks: 0,
            deep_frozen: false,
            weapon: Weapon::default(),
            team: 0,
            race_team: 0,
            spectating: false,
            in_freeze_tile: false,
            hook: HookState::Idle,
            hook_pos: pos,
            hook_dir: Vec2::ZERO,
            hooked_player: None,
            hook_ticks: 0,
            jump_held: false,
        }
    }

    /// Observable state of this character.
    #[must_use]
    pub const fn state(&self) -> CharacterState {
        CharacterState {
            id: self.id,
            pos: self.pos,
            vel: self.vel,
            freeze_ticks: self.freeze_ticks,
            in_freeze_tile: self.in_freeze_tile,
            deep_frozen: self.deep_frozen,
            hook: self.hook,
            hook_pos: self.hook_pos,
            hooked_player: self.hooked_player,
        }
    }

    const fn is_frozen(&self) -> bool {
        self.freeze_ticks > 0 || self.deep_frozen
    }

    /// Stores `input` for the following ticks and applies weapon switches.
    pub fn set_input(&mut self, input: &ControlInput) {
        self.input = *input;
        if let Some(weapon) = input.wanted_weapon {
            self.weapon = weapon;
        }
    }

    /// Control and hook phase. `players` holds every character's position
    /// at the start of the tick.
    pub(super) fn tick_controls<M: CollisionMap + ?Sized>(
        &mut self,
        map: &M,
        tuning: &Tuning,
        players: &[(ClientId, Vec2)],
    ) {
        let input = if self.is_frozen() {
            ControlInput {
                direction: Direction::Stop,
                jump: false,
                hook: false,
                ..self.input
            }
        } else {
            self.input
        };
        let grounded = is_grounded(map, self.pos);

        self.vel.y += tuning.gravity;
        let (max_speed, accel, friction) = if grounded {
            (tuning.ground_control_speed, tuning.ground_control_accel, tuning.ground_friction)
        } else {
            (tuning.air_control_speed, tuning.air_control_accel, tuning.air_friction)
        };
        self.vel.x = match input.direction {
            Direction::Left => saturated_add(-max_speed, max_speed, self.vel.x, -accel),
            Direction::Right => saturated_add(-max_speed, max_speed, self.vel.x, accel),
            Direction::Stop => self.vel.x * friction,
        };

        if input.jump {
            if !self.jump_held && grounded {
                self.vel.y = -tuning.ground_jump_impulse;
            }
            self.jump_held = true;
        } else {
            self.jump_held = false;
        }

        if !input.hook {
            self.release_hook(HookState::Idle);
        } else if self.hook == HookState::Idle {
            if let Some(dir) = try_normalize(input.target.as_vec2()) {
                self.hook = HookState::Flying;
                self.hook_dir = dir;
                self.hook_pos = self.pos + dir * PHYSICAL_SIZE * HOOK_SPAWN_FACTOR;
                self.hook_ticks = 0;
            }
        }

        match self.hook {
            HookState::Flying => self.fly_hook(map, tuning, players),
            HookState::Grabbed => self.hold_hook(tuning, players, input.direction),
            HookState::Idle | HookState::Retracted => {}
        }
    }

    fn release_hook(&mut self, next: HookState) {
        self.hook = next;
        self.hook_pos = self.pos;
        self.hooked_player = None;
        self.hook_ticks = 0;
    }

    fn fly_hook<M: CollisionMap + ?Sized>(
        &mut self,
        map: &M,
        tuning: &Tuning,
        players: &[(ClientId, Vec2)],
    ) {
        let mut next = self.hook_pos + self.hook_dir * tuning.hook_fire_speed;
        let mut exhausted = false;
        if self.pos.distance(next) > tuning.hook_length {
            exhausted = true;
            next = self.pos + normalize_or_zero(next - self.pos) * tuning.hook_length;
        }

        let mut ground = None;
        if let Some(hit) = map.intersect_line(self.hook_pos, next) {
            next = hit.point;
            ground = Some(hit.tile);
        }

        let reach = PHYSICAL_SIZE + HOOK_PLAYER_SLACK;
        let grabbed = players
            .iter()
            .filter(|(id, _)| *id != self.id)
            .filter(|(_, pos)| {
                closest_point_on_segment(self.hook_pos, next, *pos).distance(*pos) < reach
            })
            .min_by(|(a_id, a), (b_id, b)| {
                self.hook_pos
                    .distance(*a)
                    .total_cmp(&self.hook_pos.distance(*b))
                    .then(a_id.cmp(b_id))
            })
            .copied();

        if let Some((id, pos)) = grabbed {
            self.hook = HookState::Grabbed;
            self.hooked_player = Some(id);
            self.hook_pos = pos;
            return;
        }
        match ground {
            Some(tile) if tile.is_hookable() => self.hook = HookState::Grabbed,
            Some(_) => self.hook = HookState::Retracted,
            None if exhausted => self.hook = HookState::Retracted,
            None => {}
        }
        self.hook_pos = next;
    }

    fn hold_hook(&mut self, tuning: &Tuning, players: &[(ClientId, Vec2)], direction: Direction) {
        if let Some(target) = self.hooked_player {
            match players.iter().find(|(id, _)| *id == target) {
                Some((_, pos)) => self.hook_pos = *pos,
                None => {
                    self.release_hook(HookState::Retracted);
                    return;
                }
            }
            self.hook_ticks += 1;
            if self.hook_ticks > tuning.hook_duration_ticks {
                self.release_hook(HookState::Retracted);
                return;
            }
        }

        if self.hook_pos.distance(self.pos) <= HOOK_DRAG_MIN_DISTANCE {
            return;
        }
        let Some(pull) = try_normalize(self.hook_pos - self.pos) else {
            return;
        };
        let mut hook_vel = pull * tuning.hook_drag_accel;
        if hook_vel.y > 0.0 {
            hook_vel.y *= HOOK_DRAG_DOWN_FACTOR;
        }
        let along = (hook_vel.x < 0.0 && direction == Direction::Left)
            || (hook_vel.x > 0.0 && direction == Direction::Right);
        hook_vel.x *= if along {
            HOOK_DRAG_ALONG_FACTOR
        } else {
            HOOK_DRAG_AGAINST_FACTOR
        };
        let new_vel = self.vel + hook_vel;
        if new_vel.length() < tuning.hook_drag_speed || new_vel.length() < self.vel.length() {
            self.vel = new_vel;
        }
    }

    /// Movement and tile phase.
    pub(super) fn tick_movement<M: CollisionMap + ?Sized>(&mut self, map: &M, tuning: &Tuning) {
        move_box(map, &mut self.pos, &mut self.vel);

        self.freeze_ticks = self.freeze_ticks.saturating_sub(1);
        let tile = map.tile_at(self.pos);
        match tile {
            Tile::Freeze => self.freeze_ticks = tuning.freeze_ticks,
            Tile::Unfreeze => self.freeze_ticks = 0,
            Tile::DeepFreeze => self.deep_frozen = true,
            Tile::DeepUnfreeze => self.deep_frozen = false,
            Tile::Empty | Tile::Solid | Tile::NoHook => {}
        }
        self.in_freeze_tile = matches!(tile, Tile::Freeze | Tile::DeepFreeze);
        if self.is_frozen() && self.hook != HookState::Idle {
            self.release_hook(HookState::Idle);
        }
    }
}

/// Whether a character at `pos` stands on solid ground.
#[must_use]
pub fn is_grounded<M: CollisionMap + ?Sized>(map: &M, pos: Vec2) -> bool {
    let feet = pos.y + PHYSICAL_HALF + GROUND_PROBE;
    map.is_solid(Vec2::new(pos.x + PHYSICAL_HALF, feet))
        || map.is_solid(Vec2::new(pos.x - PHYSICAL_HALF, feet))
}

/// Whether a character box centred on `pos` overlaps solid tiles.
#[must_use]
pub fn test_box<M: CollisionMap + ?Sized>(map: &M, pos: Vec2) -> bool {
    [
        Vec2::new(-PHYSICAL_HALF, -PHYSICAL_HALF),
        Vec2::new(PHYSICAL_HALF, -PHYSICAL_HALF),
        Vec2::new(-PHYSICAL_HALF, PHYSICAL_HALF),
        Vec2::new(PHYSICAL_HALF, PHYSICAL_HALF),
    ]
    .into_iter()
    .any(|corner| map.is_solid(pos + corner))
}

/// Moves a character box by `vel` in unit-sized steps, sliding along walls.
///
/// A blocked axis has its velocity zeroed. When neither axis alone is
/// blocked but the diagonal is, the box stops entirely. Speeds above
/// [`MAX_VELOCITY`] are clamped first.
pub fn move_box<M: CollisionMap + ?Sized>(map: &M, pos: &mut Vec2, vel: &mut Vec2) {
    let mut distance = vel.length();
    if !distance.is_finite() || distance <= 1e-5 {
        return;
    }
    if distance > MAX_VELOCITY {
        *vel *= MAX_VELOCITY / distance;
        distance = MAX_VELOCITY;
    }
    let steps = floor_to_i32(distance).max(0).saturating_add(1);
    #[expect(
        clippy::cast_precision_loss,
        reason = "Step counts are bounded by MAX_VELOCITY."
    )]
    let fraction = 1.0 / steps as f32;
    for _ in 0..steps {
        let mut next = *pos + *vel * fraction;
        if test_box(map, next) {
            let mut blocked = false;
            if test_box(map, Vec2::new(pos.x, next.y)) {
                next.y = pos.y;
                vel.y = 0.0;
                blocked = true;
            }
            if test_box(map, Vec2::new(next.x, pos.y)) {
                next.x = pos.x;
                vel.x = 0.0;
                blocked = true;
            }
            if !blocked {
                next = *pos;
                *vel = Vec2::ZERO;
            }
        }
        *pos = next;
    }
}
