//! Predictive action engine for a tick-based 2D platformer client.
//!
//! The engine forks the client's predicted world, replays candidate inputs
//! on the forks and rewrites the outgoing input with the best one. The live
//! world is only ever read. Searches cover survival (avoid freezing), hook
//! reachability (auto-aim) and bounced laser shots (self-unfreeze); simpler
//! movement assists rewrite the input straight from the current frame.
//! [`engine::AssistEngine`] runs them all in a fixed order each frame.
pub mod assist;
pub mod collision;
pub mod config;
pub mod constants;
pub mod engine;
pub mod geometry;
pub mod input;
pub mod logging;
pub mod numeric;
pub mod replay;
pub mod scenario;
pub mod search;
pub mod sim;
pub mod target;
pub mod vector_math;
pub mod world;

// Re-export commonly used items
pub use config::AssistConfig;
pub use engine::{AssistEngine, Frame, FrameReport};
pub use logging::init as init_logging;
pub use world::{ClientId, Fork, Simulation};

pub mod prelude {
    //! Prelude exports used in documentation examples.
    //!
    //! ```rust,no_run
    //! use foresight::prelude::*;
    //! ```

    pub use crate::collision::{CollisionMap, Tile, TileMap};
    pub use crate::config::AssistConfig;
    pub use crate::engine::{AssistEngine, Frame, FrameReport};
    pub use crate::input::{ControlInput, Controls, Direction, Weapon};
    pub use crate::replay::{advance, advance_until, predict, Fixed, InputPolicy};
    pub use crate::sim::{Character, TeeWorld, Tuning};
    pub use crate::target::LiveSnapshot;
    pub use crate::world::{CharacterState, ClientId, Fork, HookState, Simulation};
    pub use glam::{IVec2, Vec2};
}
