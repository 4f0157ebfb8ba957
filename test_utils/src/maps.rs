//! Map layouts used across the integration tests.
//!
//! Rows use the scenario symbols: `#` solid, `x` freeze, `.` empty.

use std::sync::Arc;

use foresight::collision::TileMap;

use crate::map_from_rows;

/// Ten columns, solid floor on row 10 and a freeze tile on row 9, column 4.
///
/// A character walking right from x = 48 freezes after about ten ticks.
pub fn freeze_lane() -> Arc<TileMap> {
    map_from_rows(&[
        "..........",
        "..........",
        "..........",
        "..........",
        "..........",
        "..........",
        "..........",
        "..........",
        "..........",
        "....x.....",
        "##########",
    ])
}

/// Twenty columns with a full freeze row 8 above a solid row 9.
///
/// Anything above the freeze row eventually falls into it.
pub fn freeze_pit() -> Arc<TileMap> {
    map_from_rows(&[
        "....................",
        "....................",
        "....................",
        "....................",
        "....................",
        "....................",
        "....................",
        "....................",
        "xxxxxxxxxxxxxxxxxxxx",
        "####################",
    ])
}

/// `width` columns of open space above a solid floor on row 10.
pub fn open_floor(width: usize) -> Arc<TileMap> {
    let mut map = TileMap::new(width, 11);
    for column in 0..width {
        map.set(column, 10, foresight::collision::Tile::Solid);
    }
    Arc::new(map)
}

/// Open floor on row 10 split by a full-height wall in column 5.
pub fn walled_floor() -> Arc<TileMap> {
    map_from_rows(&[
        ".....#....",
        ".....#....",
        ".....#....",
        ".....#....",
        ".....#....",
        ".....#....",
        ".....#....",
        ".....#....",
        ".....#....",
        ".....#....",
        "##########",
    ])
}

/// A 16 x 12 room with a pillar in column 6 between rows 5 and 9.
///
/// A laser from (100, 300) cannot see (300, 300) directly but reaches it
/// off the ceiling.
pub fn pillar_room() -> Arc<TileMap> {
    map_from_rows(&[
        "################",
        "################",
        "#..............#",
        "#..............#",
        "#..............#",
        "#.....#........#",
        "#.....#........#",
        "#.....#........#",
        "#.....#........#",
        "#.....#........#",
        "################",
        "################",
    ])
}

/// Sixteen columns between a ceiling and a floor, freeze in column 8 of row 3.
///
/// A character on row 3 at x = 250 moving right enters the freeze next tick.
pub fn ceiling_lane() -> Arc<TileMap> {
    map_from_rows(&[
        "################",
        "................",
        "................",
        "........x.......",
        "################",
    ])
}
