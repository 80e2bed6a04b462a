mod a_star;
mod backtracking;
mod heuristics;
mod preprocessing;
pub(crate) mod zobrist;

use std::collections::BinaryHeap;
use std::error::Error;
use std::fmt::{self, Debug, Display, Formatter};
use std::time::Instant;

use log::{debug, info};
use typed_arena::Arena;

use crate::actions::{Action, ActionKind, Actions};
use crate::config::{Heuristic, SolverConfig};
use crate::data::{Pos, DIRECTIONS};
use crate::grid::Grid;
use crate::level::Level;
use crate::state::State;
use crate::Solve;

use self::a_star::{ClosedSet, SearchNode};
use self::preprocessing::{check_level, find_dead_squares};
use self::zobrist::ZobristKeys;

pub use self::a_star::Stats;
pub use self::preprocessing::DeadMask;

/// Problems with the level found before searching.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolverErr {
    AgentOutOfBounds,
    AgentOnWall,
    BoxOutOfBounds,
    BoxOnWall,
    DuplicateBoxes,
    AgentOnBox,
    UnreachableBoxes,
    UnreachableTargets,
    BoxesTargets,
}

impl Display for SolverErr {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match *self {
            SolverErr::AgentOutOfBounds => write!(f, "Agent is outside the grid"),
            SolverErr::AgentOnWall => write!(f, "Agent is on a wall"),
            SolverErr::BoxOutOfBounds => write!(f, "Box is outside the grid"),
            SolverErr::BoxOnWall => write!(f, "Box is on a wall"),
            SolverErr::DuplicateBoxes => write!(f, "More than one box on the same cell"),
            SolverErr::AgentOnBox => write!(f, "Agent is on a box"),
            SolverErr::UnreachableBoxes => write!(
                f,
                "Unreachable boxes - some boxes are not on target but can't be reached"
            ),
            SolverErr::UnreachableTargets => write!(
                f,
                "Unreachable targets - some targets don't have a box but can't be reached"
            ),
            SolverErr::BoxesTargets => write!(f, "Different number of boxes and targets"),
        }
    }
}

impl Error for SolverErr {}

/// Why the search stopped before the frontier was exhausted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Limit {
    Nodes,
    Time,
}

impl Display for Limit {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match *self {
            Limit::Nodes => write!(f, "node limit"),
            Limit::Time => write!(f, "time limit"),
        }
    }
}

/// Result of a search that ran.
///
/// `actions` is `None` when there's no solution or a limit was hit first.
pub struct SolverOk {
    pub actions: Option<Actions>,
    pub stats: Stats,
    pub heuristic: Heuristic,
    pub limit_hit: Option<Limit>,
}

impl SolverOk {
    fn new(
        actions: Option<Actions>,
        stats: Stats,
        heuristic: Heuristic,
        limit_hit: Option<Limit>,
    ) -> Self {
        Self {
            actions,
            stats,
            heuristic,
            limit_hit,
        }
    }
}

impl Debug for SolverOk {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match (&self.actions, self.limit_hit) {
            (Some(actions), _) => writeln!(
                f,
                "{}: {} moves, {} pushes",
                self.heuristic,
                actions.move_cnt(),
                actions.push_cnt()
            )?,
            (None, Some(limit)) => writeln!(f, "Stopped by {}", limit)?,
            (None, None) => writeln!(f, "No solution")?,
        }
        write!(f, "{:?}", self.stats)
    }
}

impl Solve for Level {
    fn solve(&self, config: &SolverConfig) -> Result<SolverOk, SolverErr> {
        solve(self, config)
    }
}

/// Cells a box can't be pushed onto without making the level unsolvable.
pub fn dead_squares(level: &Level) -> Result<DeadMask, SolverErr> {
    check_level(level)?;
    Ok(find_dead_squares(&level.grid, &level.boxes))
}

fn solve(level: &Level, config: &SolverConfig) -> Result<SolverOk, SolverErr> {
    debug!("Processing level...");
    let solver = Solver::new(level, config.seed)?;
    debug!("Processed level");

    let solver_ok = match config.heuristic {
        Heuristic::NearestTarget => solver.search(config, heuristics::nearest_target),
        Heuristic::CyclicMatching => solver.search(config, heuristics::cyclic_matching),
        Heuristic::MinMatching => solver.search(config, heuristics::min_matching),
    };
    Ok(solver_ok)
}

/// Everything that stays the same for the whole search.
struct Solver<'a> {
    grid: &'a Grid,
    dead_squares: DeadMask,
    keys: ZobristKeys,
    initial_state: State,
}

impl<'a> Solver<'a> {
    fn new(level: &'a Level, seed: Option<u64>) -> Result<Self, SolverErr> {
        check_level(level)?;

        let grid = &level.grid;
        let dead_squares = find_dead_squares(grid, &level.boxes);
        debug!("Dead squares:\n{}", dead_squares);

        let keys = match seed {
            Some(seed) => ZobristKeys::new(grid.width(), grid.height(), seed),
            None => ZobristKeys::from_entropy(grid.width(), grid.height()),
        };
        let initial_state = State::new(&keys, level.agent, level.boxes.clone());

        Ok(Self {
            grid,
            dead_squares,
            keys,
            initial_state,
        })
    }

    fn search<H>(&self, config: &SolverConfig, heuristic: H) -> SolverOk
    where
        H: Fn(&[Pos], &[Pos]) -> u32,
    {
        debug!("Search called with {} heuristic", config.heuristic);

        let start = Instant::now();
        let targets = self.grid.targets();

        // declared first so it outlives everything that borrows from it
        let arena = Arena::new();
        let mut stats = Stats::new();
        let mut to_visit = BinaryHeap::new();
        let mut closed = ClosedSet::new(config.dedup);
        let mut created_cnt = 0;

        let h = heuristic(targets, &self.initial_state.boxes);
        let root: &SearchNode<'_> =
            arena.alloc(SearchNode::new(self.initial_state.clone(), None, None, 0, h, 0));
        stats.add_created(root);
        to_visit.push(root);

        let mut visited_cnt = 0;
        let mut actions = None;
        let mut limit_hit = None;
        while let Some(cur_node) = to_visit.pop() {
            if closed.contains(&cur_node.state) {
                stats.add_reached_duplicate(cur_node);
                continue;
            }
            closed.insert(&cur_node.state);
            visited_cnt += 1;

            let new_depth = stats.add_unique_visited(cur_node);
            if new_depth {
                info!("Visited new depth: {}", cur_node.dist);
                debug!("{:?}", stats);
            }

            if self.solved(&cur_node.state) {
                debug!("Solved, backtracking path");
                actions = Some(backtracking::reconstruct_actions(cur_node));
                break;
            }

            if let Some(max_visited) = config.max_visited {
                if visited_cnt >= max_visited {
                    limit_hit = Some(Limit::Nodes);
                    break;
                }
            }
            if let Some(timeout) = config.timeout {
                if (new_depth || visited_cnt % 1024 == 0) && start.elapsed() >= timeout {
                    limit_hit = Some(Limit::Time);
                    break;
                }
            }

            for (action, new_state) in self.expand(&cur_node.state) {
                if closed.contains(&new_state) {
                    continue;
                }

                created_cnt += 1;
                let h = heuristic(targets, &new_state.boxes);
                let next_node: &SearchNode<'_> = arena.alloc(SearchNode::new(
                    new_state,
                    Some(cur_node),
                    Some(action),
                    cur_node.dist + 1,
                    h,
                    created_cnt,
                ));
                stats.add_created(next_node);
                to_visit.push(next_node);
            }
        }

        stats.set_elapsed(start.elapsed());
        match (&actions, limit_hit) {
            (Some(_), _) => debug!("Found solution"),
            (None, Some(limit)) => debug!("Stopped by {}", limit),
            (None, None) => debug!("No solution, visited {} states", closed.len()),
        }
        SolverOk::new(actions, stats, config.heuristic, limit_hit)
    }

    fn expand(&self, state: &State) -> Vec<(Action, State)> {
        let mut new_states = Vec::with_capacity(DIRECTIONS.len());

        for &dir in &DIRECTIONS {
            let new_agent = state.agent + dir;
            if self.grid.is_wall(new_agent) {
                continue;
            }

            match state.box_index(new_agent) {
                None => new_states.push((
                    Action::new(dir, ActionKind::Move),
                    state.with_step(&self.keys, new_agent),
                )),
                Some(box_index) => {
                    let push_dest = new_agent + dir;
                    // walls and cells outside are dead too
                    if !self.dead_squares.is_dead(push_dest) && !state.has_box(push_dest) {
                        new_states.push((
                            Action::new(dir, ActionKind::Push),
                            state.with_push(&self.keys, box_index, push_dest),
                        ));
                    }
                }
            }
        }

        new_states
    }

    fn solved(&self, state: &State) -> bool {
        // both are sorted and there's the same number of them
        state.boxes.as_slice() == self.grid.targets()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    use crate::config::Dedup;
    use crate::data::Tile;

    const ONE_PUSH: &str = r"
#####
#@  #
# $.#
#   #
#####
";

    const TWO_BOXES: &str = r"
#######
#     #
# $$  #
#  ..@#
#######
";

    fn solve_str(level: &str, config: &SolverConfig) -> (Level, SolverOk) {
        let level: Level = level.parse().unwrap();
        let solver_ok = level.solve(config).unwrap();
        (level, solver_ok)
    }

    #[test]
    fn config_errors() {
        let grid = Grid::new(vec![vec![Tile::Wall, Tile::Floor, Tile::Target, Tile::Target]]);
        let err = |agent, boxes| {
            Level::new(grid.clone(), agent, boxes)
                .solve(&SolverConfig::default())
                .err()
        };

        let boxes = vec![Pos::new(2, 0), Pos::new(3, 0)];
        assert_eq!(
            err(Pos::new(4, 0), boxes.clone()),
            Some(SolverErr::AgentOutOfBounds)
        );
        assert_eq!(err(Pos::new(0, 0), boxes.clone()), Some(SolverErr::AgentOnWall));
        assert_eq!(
            err(Pos::new(1, 0), vec![Pos::new(2, 0), Pos::new(3, 1)]),
            Some(SolverErr::BoxOutOfBounds)
        );
        assert_eq!(
            err(Pos::new(1, 0), vec![Pos::new(2, 0), Pos::new(0, 0)]),
            Some(SolverErr::BoxOnWall)
        );
        assert_eq!(
            err(Pos::new(1, 0), vec![Pos::new(2, 0), Pos::new(2, 0)]),
            Some(SolverErr::DuplicateBoxes)
        );
        assert_eq!(err(Pos::new(2, 0), boxes.clone()), Some(SolverErr::AgentOnBox));
        assert_eq!(
            err(Pos::new(1, 0), vec![Pos::new(2, 0)]),
            Some(SolverErr::BoxesTargets)
        );
        assert_eq!(err(Pos::new(1, 0), boxes), None);
    }

    #[test]
    fn no_boxes() {
        let (_, solver_ok) = solve_str("#@ #", &SolverConfig::default());
        assert_eq!(solver_ok.actions, Some(Actions::default()));
        assert_eq!(solver_ok.stats.total_unique_visited(), 1);
    }

    #[test]
    fn single_push() {
        let level = r"
#@ #
#$ #
#. #
####
";
        let (_, solver_ok) = solve_str(level, &SolverConfig::default());
        assert_eq!(solver_ok.actions.unwrap().to_string(), "D");
        assert_eq!(solver_ok.limit_hit, None);
    }

    #[test]
    fn exhausted() {
        let level = r"
####
#+ #
# $#
####
";
        let (_, solver_ok) = solve_str(level, &SolverConfig::default());
        assert_eq!(solver_ok.actions, None);
        assert_eq!(solver_ok.limit_hit, None);
        // the agent can walk around but never push
        assert_eq!(solver_ok.stats.total_unique_visited(), 3);
    }

    #[test]
    fn one_push_walled() {
        let (level, solver_ok) = solve_str(ONE_PUSH, &SolverConfig::default());
        let actions = solver_ok.actions.unwrap();
        assert_eq!(actions.to_string(), "dR");
        assert_eq!(actions.push_cnt(), 1);
        assert_eq!(actions.move_cnt(), 2);

        let (_, boxes) = level.replay(&actions).unwrap();
        assert_eq!(boxes, vec![Pos::new(3, 2)]);
    }

    #[test]
    fn different_seeds() {
        for &seed in &[1, 2] {
            let config = SolverConfig::default().with_seed(seed);
            let (level, solver_ok) = solve_str(TWO_BOXES, &config);
            assert!(level.is_solved_by(&solver_ok.actions.unwrap()));
        }
    }

    #[test]
    fn hash_only() {
        let config = SolverConfig::default()
            .with_dedup(Dedup::HashOnly)
            .with_seed(5);
        let (level, solver_ok) = solve_str(TWO_BOXES, &config);
        assert!(level.is_solved_by(&solver_ok.actions.unwrap()));
    }

    #[test]
    fn all_heuristics() {
        for &heuristic in &[
            Heuristic::NearestTarget,
            Heuristic::CyclicMatching,
            Heuristic::MinMatching,
        ] {
            let config = SolverConfig::default().with_heuristic(heuristic);
            let (level, solver_ok) = solve_str(TWO_BOXES, &config);
            assert_eq!(solver_ok.heuristic, heuristic);
            assert!(level.is_solved_by(&solver_ok.actions.unwrap()));
        }
    }

    #[test]
    fn node_limit() {
        let config = SolverConfig::default().with_max_visited(1);
        let (_, solver_ok) = solve_str(ONE_PUSH, &config);
        assert_eq!(solver_ok.actions, None);
        assert_eq!(solver_ok.limit_hit, Some(Limit::Nodes));
        assert_eq!(solver_ok.stats.total_unique_visited(), 1);
    }

    #[test]
    fn time_limit() {
        let config = SolverConfig::default().with_timeout(Duration::from_secs(0));
        let (_, solver_ok) = solve_str(TWO_BOXES, &config);
        assert_eq!(solver_ok.actions, None);
        assert_eq!(solver_ok.limit_hit, Some(Limit::Time));
    }

    #[test]
    fn expand_pushes_and_moves() {
        fn expand_cnt(level: &str) -> (usize, usize) {
            let level: Level = level.parse().unwrap();
            let solver = Solver::new(&level, Some(0)).unwrap();
            let new_states = solver.expand(&solver.initial_state);
            let pushes = new_states.iter().filter(|(a, _)| a.is_push()).count();
            (new_states.len() - pushes, pushes)
        }

        // blocked by a wall and by another box
        let level = r"
 ####
# $  #
# @$*#
# $  #
# ...#
 ####
";
        assert_eq!(expand_cnt(level), (1, 1));

        let level = r"
 ####
#    #
# @ *#
# $  #
#   .#
 ####
";
        assert_eq!(expand_cnt(level), (3, 1));
    }

    #[test]
    fn expand_skips_dead_squares() {
        let level: Level = r"
#####
#@$ #
# . #
#####
"
        .parse()
        .unwrap();
        let solver = Solver::new(&level, Some(0)).unwrap();
        // (3, 1) is a corner
        let new_states = solver.expand(&solver.initial_state);
        assert!(new_states.iter().all(|(a, _)| !a.is_push()));
    }

    #[test]
    fn dead_squares_checks_level() {
        let level: Level = "#@$ #".parse().unwrap();
        assert_eq!(dead_squares(&level).unwrap_err(), SolverErr::BoxesTargets);

        let level: Level = ONE_PUSH.parse().unwrap();
        let mask = dead_squares(&level).unwrap();
        assert!(!mask.is_dead(Pos::new(3, 2)));
        assert!(mask.is_dead(Pos::new(1, 1)));
    }
}
