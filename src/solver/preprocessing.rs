use std::collections::VecDeque;
use std::fmt::{self, Debug, Display, Formatter};

use fnv::FnvHashSet;

use crate::data::{Pos, DIRECTIONS};
use crate::grid::Grid;
use crate::level::Level;
use crate::solver::SolverErr;
use crate::vec2d::Vec2d;

/// Cells where a box can never be part of a solution.
///
/// Walls and everything outside the grid are dead too
/// so pushes only need to check this one table.
#[derive(Clone, PartialEq, Eq)]
pub struct DeadMask(Vec2d<bool>);

impl DeadMask {
    pub fn is_dead(&self, pos: Pos) -> bool {
        self.0.get(pos).cloned().unwrap_or(true)
    }
}

/// One row per line, `1` is dead.
impl Display for DeadMask {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for row in self.0.rows() {
            for &dead in row {
                write!(f, "{}", if dead { 1 } else { 0 })?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl Debug for DeadMask {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}

/// Rejects levels the search can't handle before any work is done.
pub(crate) fn check_level(level: &Level) -> Result<(), SolverErr> {
    let grid = &level.grid;

    if !grid.in_bounds(level.agent) {
        return Err(SolverErr::AgentOutOfBounds);
    }
    if grid.is_wall(level.agent) {
        return Err(SolverErr::AgentOnWall);
    }

    let mut seen = FnvHashSet::default();
    for &b in &level.boxes {
        if !grid.in_bounds(b) {
            return Err(SolverErr::BoxOutOfBounds);
        }
        if grid.is_wall(b) {
            return Err(SolverErr::BoxOnWall);
        }
        if !seen.insert(b) {
            return Err(SolverErr::DuplicateBoxes);
        }
    }
    if seen.contains(&level.agent) {
        return Err(SolverErr::AgentOnBox);
    }

    if level.boxes.len() != grid.targets().len() {
        return Err(SolverErr::BoxesTargets);
    }

    // boxes don't block here - the agent might be able to move them out of the way
    let reachable = reachable_cells(grid, level.agent);
    for &b in &level.boxes {
        if !reachable[b] && !grid.is_target(b) {
            return Err(SolverErr::UnreachableBoxes);
        }
    }
    for &target in grid.targets() {
        if !reachable[target] && !seen.contains(&target) {
            return Err(SolverErr::UnreachableTargets);
        }
    }

    Ok(())
}

fn reachable_cells(grid: &Grid, start: Pos) -> Vec2d<bool> {
    let mut visited = grid.tiles().scratchpad();
    visited[start] = true;

    let mut to_visit = vec![start];
    while let Some(cur) = to_visit.pop() {
        for &next in &cur.neighbors() {
            // is_wall is also true outside the grid
            if !grid.is_wall(next) && !visited[next] {
                visited[next] = true;
                to_visit.push(next);
            }
        }
    }

    visited
}

/// Marks every cell dead, then grows the live area from targets and initial box positions.
/// Without targets only the initial box positions are alive.
///
/// A cell becomes alive if a box on it could be pushed onto a cell which is already alive:
/// the neighbor in some direction is alive and the agent can stand on the opposite side.
/// Each cell turns alive at most once so this is linear in the number of cells.
#[inline(never)] // this is called only once and this way it's easier to see in callgrind
pub(crate) fn find_dead_squares(grid: &Grid, boxes: &[Pos]) -> DeadMask {
    let mut dead = grid.tiles().scratchpad_with_default(true);

    // nothing to push towards - boxes can stay where they are but never move
    if grid.targets().is_empty() {
        for &b in boxes {
            if !grid.is_wall(b) {
                dead[b] = false;
            }
        }
        return DeadMask(dead);
    }

    let mut to_visit = VecDeque::new();

    for &pos in grid.targets().iter().chain(boxes) {
        if !grid.is_wall(pos) && dead[pos] {
            dead[pos] = false;
            to_visit.extend(pos.neighbors().iter().cloned());
        }
    }

    while let Some(pos) = to_visit.pop_front() {
        if grid.is_wall(pos) || !dead[pos] {
            continue;
        }

        let can_reach_live = DIRECTIONS.iter().any(|&dir| {
            let box_dest = pos + dir;
            let agent_pos = pos - dir;
            grid.in_bounds(box_dest) && !dead[box_dest] && !grid.is_wall(agent_pos)
        });
        if can_reach_live {
            dead[pos] = false;
            to_visit.extend(pos.neighbors().iter().cloned());
        }
    }

    DeadMask(dead)
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::data::Tile;

    fn dead_squares(level: &str) -> DeadMask {
        let level: Level = level.parse().unwrap();
        find_dead_squares(&level.grid, &level.boxes)
    }

    #[test]
    fn corridor_under_box() {
        let mask = dead_squares(
            r"
#####
##@##
##$##
#  .#
#####",
        );
        let expected = r"
11111
11111
11011
11001
11111
"
        .trim_start_matches('\n');
        assert_eq!(mask.to_string(), expected);
    }

    #[test]
    fn targets_and_boxes_alive() {
        let level: Level = r"
#######
#     #
# $$  #
#  ..@#
#######
"
        .parse()
        .unwrap();
        let mask = find_dead_squares(&level.grid, &level.boxes);

        for &pos in level.grid.targets().iter().chain(&level.boxes) {
            assert!(!mask.is_dead(pos));
        }
        let expected = r"
1111111
1111111
1100011
1100011
1111111
"
        .trim_start_matches('\n');
        assert_eq!(mask.to_string(), expected);
    }

    #[test]
    fn box_in_corner_stays_alive() {
        // the initial box position is always alive even though it can never move
        let mask = dead_squares(
            r"
####
#+ #
# $#
####",
        );
        assert!(!mask.is_dead(Pos::new(2, 2)));
        assert!(!mask.is_dead(Pos::new(1, 1)));
        assert!(mask.is_dead(Pos::new(2, 1)));
        assert!(mask.is_dead(Pos::new(1, 2)));
    }

    #[test]
    fn enclosed_cells_dead() {
        let mask = dead_squares(
            r"
#########
#@$ .#  #
#    #  #
#########",
        );
        // the room on the right has no path to any live cell
        for &pos in &[Pos::new(6, 1), Pos::new(7, 1), Pos::new(6, 2), Pos::new(7, 2)] {
            assert!(mask.is_dead(pos));
        }
        assert!(!mask.is_dead(Pos::new(3, 1)));
        assert!(mask.is_dead(Pos::new(0, 0)));
        assert!(mask.is_dead(Pos::new(-1, 0)));
        assert!(mask.is_dead(Pos::new(100, 100)));
    }

    #[test]
    fn no_targets() {
        let mask = dead_squares(
            r"
#####
#@$ #
#####",
        );
        assert_eq!(mask.to_string(), "11111\n11011\n11111\n");

        // even where the box could be pushed around
        let level = Level::new(
            Grid::new(vec![vec![Tile::Floor; 5]; 3]),
            Pos::new(0, 0),
            vec![Pos::new(2, 1)],
        );
        let mask = find_dead_squares(&level.grid, &level.boxes);
        assert_eq!(mask.to_string(), "11111\n11011\n11111\n");
    }

    #[test]
    fn open_floor_without_walls() {
        // outside the grid counts as wall so the agent can't push from there
        let mut rows = vec![vec![Tile::Floor; 5]; 3];
        rows[1][2] = Tile::Target;
        let level = Level::new(Grid::new(rows), Pos::new(0, 0), vec![Pos::new(2, 1)]);
        let mask = find_dead_squares(&level.grid, &level.boxes);
        assert_eq!(mask.to_string(), "11111\n10001\n11111\n");
    }

    #[test]
    fn reachability() {
        let level: Level = r"
#######
#@ #  #
#  #  #
#######
"
        .parse()
        .unwrap();
        let reachable = reachable_cells(&level.grid, level.agent);
        assert!(reachable[Pos::new(2, 2)]);
        assert!(!reachable[Pos::new(4, 1)]);
        assert!(!reachable[Pos::new(3, 1)]);
    }

    #[test]
    fn level_errors() {
        fn check(level: &str) -> Result<(), SolverErr> {
            check_level(&level.parse().unwrap())
        }

        assert_eq!(check("#@$ #"), Err(SolverErr::BoxesTargets));
        assert_eq!(check("#@$.#$.#"), Err(SolverErr::UnreachableBoxes));
        assert_eq!(
            check(
                r"
#######
#@$.#.#
#$  ###
#######
"
            ),
            Err(SolverErr::UnreachableTargets)
        );
        // boxes already on unreachable targets are fine
        assert_eq!(check("#@$.#*#"), Ok(()));
    }
}
