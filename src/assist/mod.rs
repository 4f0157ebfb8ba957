//! Movement assists.
//!
//! Unlike the searches these never replay the world: each one reads the
//! current frame and rewrites the outgoing input directly.

mod anti_freeze;
mod fly;
mod spinbot;
mod stabilizer;

pub use anti_freeze::{anti_falling_freeze, anti_going_freeze, AntiGoingMode};
pub use fly::{ungrab_fast_hook, FlyBot, FlyKeys};
pub use spinbot::spinbot;
pub use stabilizer::stabilizer;
