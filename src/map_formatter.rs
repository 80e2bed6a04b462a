use std::fmt::{self, Debug, Display, Formatter};

use crate::data::{Contents, Pos, Tile};
use crate::grid::Grid;

/// Writes a grid, optionally with the dynamic part of a state, in XSB format.
pub struct MapFormatter<'a> {
    grid: &'a Grid,
    agent: Option<Pos>,
    boxes: &'a [Pos],
}

impl<'a> MapFormatter<'a> {
    pub(crate) fn new(grid: &'a Grid, agent: Option<Pos>, boxes: &'a [Pos]) -> Self {
        Self { grid, agent, boxes }
    }

    fn write_to_formatter(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let tiles = self.grid.tiles();

        // positions outside the grid are simply not drawn
        let mut contents = tiles.scratchpad();
        for &b in self.boxes {
            if tiles.in_bounds(b) {
                contents[b] = Contents::Box;
            }
        }
        if let Some(agent) = self.agent {
            if tiles.in_bounds(agent) {
                contents[agent] = Contents::Agent;
            }
        }

        for (y, row) in tiles.rows().enumerate() {
            // don't print trailing empty cells to match the input level strings
            let last_non_empty = row
                .iter()
                .enumerate()
                .filter(|&(x, &tile)| {
                    tile != Tile::Floor
                        || contents[Pos::new(x as i32, y as i32)] != Contents::Empty
                })
                .map(|(x, _)| x + 1)
                .last()
                .unwrap_or(0);

            for (x, &tile) in row.iter().enumerate().take(last_non_empty) {
                let pos = Pos::new(x as i32, y as i32);
                Self::write_cell_xsb(tile, contents[pos], f)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }

    fn write_cell_xsb(tile: Tile, contents: Contents, f: &mut Formatter<'_>) -> fmt::Result {
        match (tile, contents) {
            (Tile::Floor, Contents::Empty) => write!(f, " "),
            (Tile::Floor, Contents::Box) => write!(f, "$"),
            (Tile::Floor, Contents::Agent) => write!(f, "@"),
            // a box or agent in a wall is a malformed level, the solver refuses those
            (Tile::Wall, _) => write!(f, "#"),
            (Tile::Target, Contents::Empty) => write!(f, "."),
            (Tile::Target, Contents::Box) => write!(f, "*"),
            (Tile::Target, Contents::Agent) => write!(f, "+"),
        }
    }
}

impl<'a> Display for MapFormatter<'a> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        self.write_to_formatter(f)
    }
}

impl<'a> Debug for MapFormatter<'a> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}
