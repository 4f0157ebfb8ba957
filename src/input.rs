//! Outgoing control input.
//!
//! [`ControlInput`] is the per-tick command sent to the server. Each
//! [`ControlSlot`] owns one input plus the cursor position used when aiming
//! is not silent, and [`Controls`] selects which slot the assists write to.

use glam::{IVec2, Vec2};
use serde::{Deserialize, Serialize};

use crate::constants::FIRE_COUNTER_MODULO;

/// Horizontal movement intent.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Walk left.
    Left,
    /// No horizontal input.
    #[default]
    Stop,
    /// Walk right.
    Right,
}

impl Direction {
    /// Search enumeration order: stop first, then left, then right.
    pub const ALL: [Self; 3] = [Self::Stop, Self::Left, Self::Right];

    /// Signed axis value: `-1`, `0` or `1`.
    #[must_use]
    pub const fn sign(self) -> i8 {
        match self {
            Self::Left => -1,
            Self::Stop => 0,
            Self::Right => 1,
        }
    }

    /// Direction that moves from `from` towards `to` along one axis.
    ///
    /// Equal coordinates yield `None` so callers can keep their input.
    #[must_use]
    pub fn towards(from: f32, to: f32) -> Option<Self> {
        if to > from {
            Some(Self::Right)
        } else if to < from {
            Some(Self::Left)
        } else {
            None
        }
    }
}

/// Weapons a character can hold.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Weapon {
    /// Melee hammer.
    #[default]
    Hammer,
    /// Pistol.
    Gun,
    /// Spread shot.
    Shotgun,
    /// Explosive launcher.
    Grenade,
    /// Bouncing laser rifle.
    Laser,
}

/// Fire press counter.
///
/// The server detects presses by watching the counter change; only its low
/// six bits are transmitted, so it wraps at [`FIRE_COUNTER_MODULO`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "u8")]
pub struct FireCounter(u8);

impl From<u8> for FireCounter {
    fn from(value: u8) -> Self {
        Self::new(value)
    }
}

impl FireCounter {
    /// Creates a counter, wrapping `value` into range.
    #[must_use]
    pub const fn new(value: u8) -> Self {
        Self(value % FIRE_COUNTER_MODULO)
    }

    /// Current counter value.
    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }

    /// Advances the counter by `presses` edges, wrapping.
    ///
    /// ```
    /// use foresight::input::FireCounter;
    ///
    /// let mut fire = FireCounter::new(63);
    /// fire.bump(2);
    /// assert_eq!(fire.get(), 1);
    /// ```
    pub const fn bump(&mut self, presses: u8) {
        self.0 = self.0.wrapping_add(presses) % FIRE_COUNTER_MODULO;
    }
}

/// One tick of player input.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlInput {
    /// Horizontal movement.
    pub direction: Direction,
    /// Jump button held.
    pub jump: bool,
    /// Hook button held.
    pub hook: bool,
    /// Fire press counter.
    pub fire: FireCounter,
    /// Aim vector relative to the character, as sent to the server.
    pub target: IVec2,
    /// Requested weapon switch, if any.
    pub wanted_weapon: Option<Weapon>,
}

impl ControlInput {
    /// Copy of `self` with movement and hook replaced.
    #[must_use]
    pub const fn with_movement(self, direction: Direction, hook: bool) -> Self {
        Self {
            direction,
            hook,
            ..self
        }
    }
}

/// Which of the two locally controlled characters an input belongs to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Slot {
    /// The main character.
    #[default]
    Primary,
    /// The secondary ("dummy") character.
    Dummy,
}

/// Outgoing input buffer for one slot.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ControlSlot {
    /// Input sent with the next tick.
    pub input: ControlInput,
    /// Cursor position relative to the character, used for visible aiming.
    pub mouse: Vec2,
}

/// Input buffers for both slots plus the active selector.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Controls {
    /// Buffer of the main character.
    pub primary: ControlSlot,
    /// Buffer of the dummy character.
    pub dummy: ControlSlot,
    /// Slot the assists operate on.
    pub active: Slot,
}

impl Controls {
    /// Controls with `input` loaded into the primary slot.
    #[must_use]
    pub fn with_primary(input: ControlInput) -> Self {
        Self {
            primary: ControlSlot {
                input,
                mouse: Vec2::ZERO,
            },
            ..Self::default()
        }
    }

    /// Buffer of the active slot.
    #[must_use]
    pub const fn active(&self) -> &ControlSlot {
        match self.active {
            Slot::Primary => &self.primary,
            Slot::Dummy => &self.dummy,
        }
    }

    /// Mutable buffer of the active slot.
    pub const fn active_mut(&mut self) -> &mut ControlSlot {
        match self.active {
            Slot::Primary => &mut self.primary,
            Slot::Dummy => &mut self.dummy,
        }
    }
}
