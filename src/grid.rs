use std::fmt::{self, Debug, Display, Formatter};

use crate::data::{Pos, Tile};
use crate::map_formatter::MapFormatter;
use crate::vec2d::Vec2d;

/// The static part of a level - never changes during a solve.
///
/// Everything outside the grid is considered a wall
/// so levels without a complete border are still well formed.
#[derive(Clone, PartialEq, Eq)]
pub struct Grid {
    tiles: Vec2d<Tile>,
    targets: Vec<Pos>,
}

impl Grid {
    /// Builds a grid from rows of tiles, shorter rows are padded with floor.
    pub fn new(rows: Vec<Vec<Tile>>) -> Self {
        Self::from_vec2d(Vec2d::from_rows(rows, Tile::Floor))
    }

    pub(crate) fn from_vec2d(tiles: Vec2d<Tile>) -> Self {
        // positions() is row-major so targets end up sorted the same way as boxes
        let targets = tiles
            .positions()
            .filter(|&pos| tiles[pos] == Tile::Target)
            .collect();
        Grid { tiles, targets }
    }

    pub fn width(&self) -> usize {
        self.tiles.width()
    }

    pub fn height(&self) -> usize {
        self.tiles.height()
    }

    pub fn cell_cnt(&self) -> usize {
        self.tiles.len()
    }

    pub fn in_bounds(&self, pos: Pos) -> bool {
        self.tiles.in_bounds(pos)
    }

    /// Linear index, panics when out of bounds.
    pub fn idx(&self, pos: Pos) -> usize {
        self.tiles.index_of(pos)
    }

    pub fn tile_at(&self, pos: Pos) -> Tile {
        self.tiles.get(pos).cloned().unwrap_or(Tile::Wall)
    }

    pub fn is_wall(&self, pos: Pos) -> bool {
        self.tile_at(pos) == Tile::Wall
    }

    pub fn is_target(&self, pos: Pos) -> bool {
        self.tile_at(pos) == Tile::Target
    }

    /// Sorted.
    pub fn targets(&self) -> &[Pos] {
        &self.targets
    }

    pub(crate) fn tiles(&self) -> &Vec2d<Tile> {
        &self.tiles
    }

    pub fn format_with<'a>(&'a self, agent: Option<Pos>, boxes: &'a [Pos]) -> MapFormatter<'a> {
        MapFormatter::new(self, agent, boxes)
    }
}

impl Display for Grid {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_with(None, &[]))
    }
}

impl Debug for Grid {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}
