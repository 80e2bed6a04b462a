use std::error::Error;
use std::fmt::{self, Debug, Display, Formatter};

use crate::actions::{Action, ActionKind, Actions};
use crate::data::Pos;
use crate::grid::Grid;
use crate::map_formatter::MapFormatter;
use crate::solution_formatter::SolutionFormatter;

/// A board snapshot - what the solver gets as input.
///
/// Not validated on construction, the solver checks it before searching.
#[derive(Clone)]
pub struct Level {
    pub grid: Grid,
    pub agent: Pos,
    pub boxes: Vec<Pos>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReplayErr {
    pub index: usize,
    pub action: Action,
}

impl Display for ReplayErr {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Illegal action {} at index {}", self.action, self.index)
    }
}

impl Error for ReplayErr {}

impl Level {
    pub fn new(grid: Grid, agent: Pos, boxes: Vec<Pos>) -> Self {
        Level { grid, agent, boxes }
    }

    pub fn xsb(&self) -> MapFormatter<'_> {
        self.grid.format_with(Some(self.agent), &self.boxes)
    }

    pub fn format_solution<'a>(
        &'a self,
        actions: &'a Actions,
        include_steps: bool,
    ) -> SolutionFormatter<'a> {
        SolutionFormatter::new(self, actions, include_steps)
    }

    /// Applies `actions` one by one, returns the final agent and box positions.
    ///
    /// Boxes keep their original order.
    pub fn replay(&self, actions: &Actions) -> Result<(Pos, Vec<Pos>), ReplayErr> {
        let mut agent = self.agent;
        let mut boxes = self.boxes.clone();
        for (index, &action) in actions.iter().enumerate() {
            let err = ReplayErr { index, action };
            Self::apply(&self.grid, &mut agent, &mut boxes, action).ok_or(err)?;
        }
        Ok((agent, boxes))
    }

    pub(crate) fn apply(
        grid: &Grid,
        agent: &mut Pos,
        boxes: &mut [Pos],
        action: Action,
    ) -> Option<()> {
        let dest = *agent + action.dir;
        if grid.is_wall(dest) {
            return None;
        }

        let box_index = boxes.iter().position(|&b| b == dest);
        match (action.kind, box_index) {
            (ActionKind::Move, None) => {}
            (ActionKind::Push, Some(i)) => {
                let box_dest = dest + action.dir;
                if grid.is_wall(box_dest) || boxes.contains(&box_dest) {
                    return None;
                }
                boxes[i] = box_dest;
            }
            _ => return None,
        }
        *agent = dest;
        Some(())
    }

    /// Every box ends up on a target.
    pub fn is_solved_by(&self, actions: &Actions) -> bool {
        match self.replay(actions) {
            Ok((_, boxes)) => boxes.iter().all(|&b| self.grid.is_target(b)),
            Err(_) => false,
        }
    }
}

impl Display for Level {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.xsb())
    }
}

impl Debug for Level {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.xsb())
    }
}
