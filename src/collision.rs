//! Map collision provider.
//!
//! [`CollisionMap`] is the read-only view of static map geometry the engine
//! consumes: line intersection, tile lookup and flat tile indices.
//! [`TileMap`] is the grid implementation used by the reference physics and
//! by scenario files. Positions outside the grid are empty.

use glam::{IVec2, Vec2};
use serde::Deserialize;
use thiserror::Error;

use crate::constants::TILE_SIZE;
use crate::numeric::{floor_to_i32, tile_coords};

/// Kind of a single map tile.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Tile {
    /// Free space.
    #[default]
    Empty,
    /// Solid, hookable ground.
    Solid,
    /// Solid ground that a hook cannot grab.
    NoHook,
    /// Freezes any character whose centre enters it.
    Freeze,
    /// Clears a regular freeze.
    Unfreeze,
    /// Freezes until a deep-unfreeze tile is reached.
    DeepFreeze,
    /// Clears a deep freeze.
    DeepUnfreeze,
}

impl Tile {
    /// Whether characters, hooks and lasers collide with this tile.
    #[must_use]
    pub const fn is_solid(self) -> bool {
        matches!(self, Self::Solid | Self::NoHook)
    }

    /// Whether a flying hook attaches when it reaches this tile.
    #[must_use]
    pub const fn is_hookable(self) -> bool {
        matches!(self, Self::Solid)
    }

    /// Parses the single-character tile notation used by scenario maps.
    #[must_use]
    pub const fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            '.' | ' ' => Some(Self::Empty),
            '#' => Some(Self::Solid),
            '-' => Some(Self::NoHook),
            'x' => Some(Self::Freeze),
            'u' => Some(Self::Unfreeze),
            'X' => Some(Self::DeepFreeze),
            'U' => Some(Self::DeepUnfreeze),
            _ => None,
        }
    }
}

/// First solid point found along a line.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LineHit {
    /// Sample point inside the solid tile.
    pub point: Vec2,
    /// Last free sample point before [`LineHit::point`].
    pub before: Vec2,
    /// Tile that was hit.
    pub tile: Tile,
}

/// Read-only access to static map collision.
///
/// Implementations are shared between the live world and every fork, so
/// they must never change while a replay is running.
pub trait CollisionMap {
    /// Flat index of the tile containing `pos`, or `None` outside the map.
    fn pure_map_index(&self, pos: Vec2) -> Option<usize>;

    /// Tile stored at a flat index.
    fn tile_at_index(&self, index: usize) -> Tile;

    /// First solid tile crossed by the line from `from` to `to`.
    fn intersect_line(&self, from: Vec2, to: Vec2) -> Option<LineHit>;

    /// Tile containing `pos`; empty outside the map.
    fn tile_at(&self, pos: Vec2) -> Tile {
        self.pure_map_index(pos)
            .map_or(Tile::Empty, |index| self.tile_at_index(index))
    }

    /// Whether `pos` lies inside a solid tile.
    fn is_solid(&self, pos: Vec2) -> bool {
        self.tile_at(pos).is_solid()
    }
}

/// Errors raised while building a [`TileMap`] from text rows.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MapParseError {
    /// The map has no rows or no columns.
    #[error("map has no tiles")]
    Empty,
    /// A row's width differs from the first row.
    #[error("row {row} has {found} tiles, expected {expected}")]
    Ragged {
        /// Zero-based row index.
        row: usize,
        /// Width of the offending row.
        found: usize,
        /// Width of the first row.
        expected: usize,
    },
    /// A character does not name a tile.
    #[error("unknown tile symbol {symbol:?} at row {row}, column {column}")]
    UnknownTile {
        /// The unrecognised character.
        symbol: char,
        /// Zero-based row index.
        row: usize,
        /// Zero-based column index.
        column: usize,
    },
}

/// Rectangular grid of tiles.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(try_from = "TileMapRows")]
pub struct TileMap {
    width: usize,
    height: usize,
    tiles: Vec<Tile>,
}

#[derive(Deserialize)]
struct TileMapRows {
    rows: Vec<String>,
}

impl TryFrom<TileMapRows> for TileMap {
    type Error = MapParseError;

    fn try_from(value: TileMapRows) -> Result<Self, Self::Error> {
        Self::from_rows(&value.rows)
    }
}

impl TileMap {
    /// Creates a map of `width` x `height` empty tiles.
    #[must_use]
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            tiles: vec![Tile::Empty; width * height],
        }
    }

    /// Parses rows of tile symbols (see [`Tile::from_symbol`]).
    ///
    /// # Errors
    ///
    /// Returns [`MapParseError`] for an empty map, rows of differing width
    /// or an unknown symbol.
    ///
    /// # Examples
    ///
    /// ```
    /// use glam::Vec2;
    /// use foresight::collision::{CollisionMap, Tile, TileMap};
    ///
    /// let map = TileMap::from_rows(&["..x", "###"]).unwrap();
    /// assert_eq!(map.tile_at(Vec2::new(70.0, 10.0)), Tile::Freeze);
    /// assert!(map.is_solid(Vec2::new(10.0, 40.0)));
    /// ```
    pub fn from_rows<S: AsRef<str>>(rows: &[S]) -> Result<Self, MapParseError> {
        let width = rows.first().map_or(0, |row| row.as_ref().chars().count());
        if width == 0 {
            return Err(MapParseError::Empty);
        }
        let mut tiles = Vec::with_capacity(width * rows.len());
        for (row, text) in rows.iter().enumerate() {
            let found = text.as_ref().chars().count();
            if found != width {
                return Err(MapParseError::Ragged {
                    row,
                    found,
                    expected: width,
                });
            }
            for (column, symbol) in text.as_ref().chars().enumerate() {
                let tile = Tile::from_symbol(symbol).ok_or(MapParseError::UnknownTile {
                    symbol,
                    row,
                    column,
                })?;
                tiles.push(tile);
            }
        }
        Ok(Self {
            width,
            height: rows.len(),
            tiles,
        })
    }

    /// Number of tile columns.
    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Number of tile rows.
    #[must_use]
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Overwrites the tile at `column`, `row`; out-of-range writes are ignored.
    pub fn set(&mut self, column: usize, row: usize, tile: Tile) {
        if column >= self.width {
            return;
        }
        if let Some(slot) = self.tiles.get_mut(row * self.width + column) {
            *slot = tile;
        }
    }

    fn index_of(&self, cell: IVec2) -> Option<usize> {
        let column = usize::try_from(cell.x).ok()?;
        let row = usize::try_from(cell.y).ok()?;
        (column < self.width && row < self.height).then_some(row * self.width + column)
    }

    /// World-space size of the grid.
    #[expect(
        clippy::cast_precision_loss,
        reason = "Map dimensions are far below f32's integer precision limit."
    )]
    fn extent(&self) -> Vec2 {
        Vec2::new(self.width as f32, self.height as f32) * TILE_SIZE
    }

    /// Clips `from..to` to the grid rectangle; `None` when the line misses it
    /// or is not finite. Computed in `f64` so far-away endpoints stay exact.
    fn clip_to_grid(&self, from: Vec2, to: Vec2) -> Option<(Vec2, Vec2)> {
        if !from.is_finite() || !to.is_finite() {
            return None;
        }
        let extent = self.extent().as_dvec2();
        let origin = from.as_dvec2();
        let delta = to.as_dvec2() - origin;
        let mut enter = 0.0_f64;
        let mut leave = 1.0_f64;
        for (step, start, limit) in [(delta.x, origin.x, extent.x), (delta.y, origin.y, extent.y)] {
            if step.abs() <= f64::EPSILON {
                if start < 0.0 || start > limit {
                    return None;
                }
                continue;
            }
            let near = -start / step;
            let far = (limit - start) / step;
            enter = enter.max(near.min(far));
            leave = leave.min(near.max(far));
        }
        (enter <= leave).then(|| {
            (
                (origin + delta * enter).as_vec2(),
                (origin + delta * leave).as_vec2(),
            )
        })
    }
}

impl CollisionMap for TileMap {
    fn pure_map_index(&self, pos: Vec2) -> Option<usize> {
        self.index_of(tile_coords(pos))
    }

    fn tile_at_index(&self, index: usize) -> Tile {
        self.tiles.get(index).copied().unwrap_or_default()
    }

    /// Samples the line roughly once per world unit, like the server does.
    ///
    /// Only the part of the line inside the grid is sampled.
    fn intersect_line(&self, from: Vec2, to: Vec2) -> Option<LineHit> {
        let (start, end) = self.clip_to_grid(from, to)?;
        let steps = floor_to_i32(start.distance(end)).max(0).saturating_add(1);
        #[expect(
            clippy::cast_precision_loss,
            reason = "Step counts are bounded by the grid diagonal."
        )]
        let steps_f = steps as f32;
        let mut last = start;
        for step in 0..=steps {
            #[expect(
                clippy::cast_precision_loss,
                reason = "Step counts are bounded by the grid diagonal."
            )]
            let sample = start.lerp(end, step as f32 / steps_f);
            let tile = self.tile_at(sample);
            if tile.is_solid() {
                return Some(LineHit {
                    point: sample,
                    before: last,
                    tile,
                });
            }
            last = sample;
        }
        None
    }
}

/// World-space centre of the tile at `column`, `row`.
#[expect(
    clippy::cast_precision_loss,
    reason = "Tile coordinates are far below f32's integer precision limit."
)]
#[must_use]
pub fn tile_center(column: usize, row: usize) -> Vec2 {
    Vec2::new(
        (column as f32 + 0.5) * TILE_SIZE,
        (row as f32 + 0.5) * TILE_SIZE,
    )
}
