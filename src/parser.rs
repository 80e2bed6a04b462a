use std::error::Error;
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use crate::data::{Pos, Tile};
use crate::grid::Grid;
use crate::level::Level;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParserErr {
    Pos(usize, usize),
    MultipleAgents,
    NoAgent,
}

impl Display for ParserErr {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match *self {
            ParserErr::Pos(x, y) => write!(f, "Invalid cell at pos: [{}, {}]", x, y),
            ParserErr::MultipleAgents => write!(f, "More than one agent"),
            ParserErr::NoAgent => write!(f, "No agent"),
        }
    }
}

impl Error for ParserErr {}

impl FromStr for Level {
    type Err = ParserErr;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s)
    }
}

/// Parses (a subset of) the format described [here](http://www.sokobano.de/wiki/index.php?title=Level_format)
pub(crate) fn parse(level: &str) -> Result<Level, ParserErr> {
    // trim so we can specify levels using raw strings more easily
    let level = level.trim_matches('\n').trim_end();

    let mut rows = Vec::new();
    let mut boxes = Vec::new();
    let mut agent = None;

    for (y, line) in level.lines().enumerate() {
        let mut row = Vec::new();
        for (x, cur_char) in line.chars().enumerate() {
            let pos = Pos::new(x as i32, y as i32);

            let mut place_agent = || {
                if agent.is_some() {
                    return Err(ParserErr::MultipleAgents);
                }
                agent = Some(pos);
                Ok(())
            };

            let tile = match cur_char {
                '#' => Tile::Wall,
                'p' | '@' => {
                    place_agent()?;
                    Tile::Floor
                }
                'P' | '+' => {
                    place_agent()?;
                    Tile::Target
                }
                'b' | '$' => {
                    boxes.push(pos);
                    Tile::Floor
                }
                'B' | '*' => {
                    boxes.push(pos);
                    Tile::Target
                }
                '.' => Tile::Target,
                ' ' | '-' | '_' => Tile::Floor,
                _ => return Err(ParserErr::Pos(x, y)),
            };
            row.push(tile);
        }
        rows.push(row);
    }

    let agent = agent.ok_or(ParserErr::NoAgent)?;
    Ok(Level::new(Grid::new(rows), agent, boxes))
}
