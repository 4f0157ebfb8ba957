//! Game and search constants shared across the engine.
//!
//! Physics tuning lives in [`crate::sim::Tuning`]; the values here are fixed
//! properties of the game protocol and the defaults of the search policies.

/// Side length of a map tile in world units.
pub const TILE_SIZE: f32 = 32.0;
/// Diameter of a character's collision circle.
pub const PHYSICAL_SIZE: f32 = 28.0;
/// Half of [`PHYSICAL_SIZE`], used for box collision.
pub const PHYSICAL_HALF: f32 = PHYSICAL_SIZE / 2.0;
/// Extra slack added to [`PHYSICAL_SIZE`] when a flying hook tests players.
pub const HOOK_PLAYER_SLACK: f32 = 2.0;
/// Distance under which a grabbed hook stops dragging its owner.
pub const HOOK_DRAG_MIN_DISTANCE: f32 = 46.0;
/// Depth below the feet probed when checking whether a character stands.
pub const GROUND_PROBE: f32 = 5.0;
/// Speed a character's velocity is clamped to before it moves.
pub const MAX_VELOCITY: f32 = 6000.0;
/// Server ticks per second.
pub const TICK_SPEED: u32 = 50;
/// Number of addressable player slots.
pub const MAX_CLIENTS: u16 = 64;
/// The fire counter wraps at this value.
pub const FIRE_COUNTER_MODULO: u8 = 64;

/// Ticks the survival pre-check replays the live input.
pub const SURVIVAL_PRECHECK_TICKS: u32 = 15;
/// Ticks each survival candidate is replayed.
pub const SURVIVAL_HORIZON_TICKS: u32 = 20;
/// Ticks a hook-reachability candidate is given to attach.
pub const HOOK_REACH_TICKS: u32 = 10;
/// Angular step of the hook-reachability scan (a hundredth of a half turn).
pub const HOOK_SCAN_STEP: f32 = std::f32::consts::PI / 100.0;
/// Angular step of the wallshot scan.
pub const WALLSHOT_ANGLE_STEP: f32 = 0.02;
/// Length the integer aim vector is scaled to before quantisation.
pub const AIM_DISTANCE: f32 = 256.0;

/// Ticks ahead at which an imminent freeze triggers a laser switch.
pub const UNFREEZE_SWITCH_TICKS: u32 = 9;
/// Ticks ahead at which an imminent freeze triggers the wallshot.
pub const UNFREEZE_FIRE_TICKS: u32 = 1;
/// Ticks ahead used as the wallshot target position.
pub const UNFREEZE_TARGET_TICKS: u32 = 6;

/// Leading coefficients at or below this are treated as a degenerate segment.
pub const DEGENERATE_SEGMENT_EPSILON: f64 = 1e-7;
/// Tolerance of the sum-of-distances point-on-segment test.
pub const POINT_ON_SEGMENT_EPSILON: f64 = 1e-4;
/// Distance ahead of a hit point probed to find the reflecting surface.
pub const BOUNCE_PROBE_DISTANCE: f32 = 4.0;
/// Anchor distance beyond which the fly bot re-anchors.
pub const FLY_ANCHOR_RESET_DISTANCE: f32 = 50.0;
/// Divisor turning vertical speed into a look-ahead distance in tiles.
pub const FALL_LOOKAHEAD_DIVISOR: f32 = 15.0;
