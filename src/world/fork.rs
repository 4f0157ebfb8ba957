use super::Simulation;

/// Disposable copy of a live world.
///
/// Only forks can be advanced by the replay driver. The live world is
/// borrowed immutably for the copy and never touched again.
#[derive(Clone, Debug)]
pub struct Fork<W> {
    world: W,
    origin_tick: u64,
}

impl<W: Simulation> Fork<W> {
    /// Copies `live` into a new fork.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::sync::Arc;
    /// use foresight::collision::TileMap;
    /// use foresight::sim::TeeWorld;
    /// use foresight::world::{Fork, Simulation};
    ///
    /// let live = TeeWorld::new(Arc::new(TileMap::new(4, 4)));
    /// let fork = Fork::of(&live);
    /// assert_eq!(fork.world().game_tick(), live.game_tick());
    /// assert_eq!(fork.ticks_advanced(), 0);
    /// ```
    #[must_use]
    pub fn of(live: &W) -> Self {
        Self {
            world: live.clone(),
            origin_tick: live.game_tick(),
        }
    }

    /// Read access to the forked world.
    #[must_use]
    pub const fn world(&self) -> &W {
        &self.world
    }

    pub(crate) const fn world_mut(&mut self) -> &mut W {
        &mut self.world
    }

    /// Ticks this fork has moved past the world it was copied from.
    #[must_use]
    pub fn ticks_advanced(&self) -> u64 {
        self.world.game_tick().saturating_sub(self.origin_tick)
    }
}
