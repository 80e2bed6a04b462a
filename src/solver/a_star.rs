use std::cmp::Ordering;
use std::fmt::{self, Debug, Display, Formatter};
use std::time::Duration;

use fnv::FnvHashSet;
use prettytable::{format, Cell, Row, Table};
use separator::Separatable;

use crate::actions::Action;
use crate::config::Dedup;
use crate::state::State;

#[derive(Clone, PartialEq, Eq, Default)]
pub struct Stats {
    created_states: Vec<u64>,
    duplicate_states: Vec<u64>,
    visited_states: Vec<u64>,
    elapsed: Duration,
}

impl Stats {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub fn total_created(&self) -> u64 {
        self.created_states.iter().sum()
    }

    pub fn total_unique_visited(&self) -> u64 {
        self.visited_states.iter().sum()
    }

    pub fn total_reached_duplicates(&self) -> u64 {
        self.duplicate_states.iter().sum()
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub(crate) fn set_elapsed(&mut self, elapsed: Duration) {
        self.elapsed = elapsed;
    }

    pub(crate) fn add_created(&mut self, node: &SearchNode<'_>) -> bool {
        Self::add(&mut self.created_states, node)
    }

    pub(crate) fn add_unique_visited(&mut self, node: &SearchNode<'_>) -> bool {
        Self::add(&mut self.visited_states, node)
    }

    pub(crate) fn add_reached_duplicate(&mut self, node: &SearchNode<'_>) -> bool {
        Self::add(&mut self.duplicate_states, node)
    }

    fn add(counts: &mut Vec<u64>, node: &SearchNode<'_>) -> bool {
        let mut ret = false;

        // while because some depths might be skipped
        while node.dist as usize >= counts.len() {
            counts.push(0);
            ret = true;
        }
        counts[node.dist as usize] += 1;
        ret
    }

    fn depth_table(&self) -> Table {
        let get = |counts: &[u64], depth: usize| counts.get(depth).cloned().unwrap_or(0);

        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_CLEAN);
        table.set_titles(Row::new(vec![
            Cell::new("Depth"),
            Cell::new("Created"),
            Cell::new("Duplicates"),
            Cell::new("Visited"),
            Cell::new("Left"),
        ]));
        // created_states is the longest vec - nothing is visited before it's created
        for depth in 0..self.created_states.len() {
            let created = get(&self.created_states, depth);
            let duplicates = get(&self.duplicate_states, depth);
            let visited = get(&self.visited_states, depth);
            let left = created.saturating_sub(duplicates + visited);
            table.add_row(Row::new(vec![
                Cell::new(&depth.to_string()),
                Cell::new(&created.separated_string()),
                Cell::new(&duplicates.separated_string()),
                Cell::new(&visited.separated_string()),
                Cell::new(&left.separated_string()),
            ]));
        }
        table
    }
}

impl Debug for Stats {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "created by depth: {:?}", self.created_states)?;
        writeln!(f, "reached duplicates by depth: {:?}", self.duplicate_states)?;
        writeln!(f, "unique visited by depth: {:?}", self.visited_states)?;
        writeln!(f, "total created: {}", self.total_created().separated_string())?;
        writeln!(
            f,
            "total reached duplicates: {}",
            self.total_reached_duplicates().separated_string()
        )?;
        writeln!(
            f,
            "total unique visited: {}",
            self.total_unique_visited().separated_string()
        )
    }
}

impl Display for Stats {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let created = self.total_created();
        let duplicates = self.total_reached_duplicates();
        let visited = self.total_unique_visited();
        let left = created.saturating_sub(duplicates + visited);
        writeln!(f, "States created total: {}", created.separated_string())?;
        writeln!(f, "Unique states visited total: {}", visited.separated_string())?;
        writeln!(f, "Reached duplicates total: {}", duplicates.separated_string())?;
        writeln!(f, "Created but not reached total: {}", left.separated_string())?;
        writeln!(f, "Time: {:.3} s", self.elapsed.as_secs_f64())?;
        writeln!(f)?;
        write!(f, "{}", self.depth_table())
    }
}

/// A state in the search tree.
///
/// Nodes live in an arena for the duration of one search,
/// `prev` links lead back to the root and are followed to reconstruct the actions.
pub(crate) struct SearchNode<'a> {
    pub(crate) state: State,
    pub(crate) prev: Option<&'a SearchNode<'a>>,
    /// The action which led from `prev` to this node.
    pub(crate) action: Option<Action>,
    /// Actions taken from the root (g).
    pub(crate) dist: u32,
    /// g + h
    pub(crate) cost: u32,
    /// Creation order, breaks remaining ties.
    seq: u64,
}

impl<'a> SearchNode<'a> {
    pub(crate) fn new(
        state: State,
        prev: Option<&'a SearchNode<'a>>,
        action: Option<Action>,
        dist: u32,
        h: u32,
        seq: u64,
    ) -> Self {
        Self {
            state,
            prev,
            action,
            dist,
            cost: dist + h,
            seq,
        }
    }
}

impl Debug for SearchNode<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "SearchNode {{ state: {:?}, action: {:?}, dist: {}, cost: {} }}",
            self.state, self.action, self.dist, self.cost
        )
    }
}

impl Ord for SearchNode<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        // reversed for BinaryHeap: lowest cost first,
        // then prefer nodes further from the start, then older nodes
        other
            .cost
            .cmp(&self.cost)
            .then(self.dist.cmp(&other.dist))
            .then(other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for SearchNode<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for SearchNode<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for SearchNode<'_> {}

/// Already visited states.
pub(crate) enum ClosedSet<'a> {
    /// Hash to find candidates, equality to confirm.
    Strict(FnvHashSet<&'a State>),
    /// Hashes only, different states with the same hash are treated as one.
    HashOnly(FnvHashSet<u64>),
}

impl<'a> ClosedSet<'a> {
    pub(crate) fn new(dedup: Dedup) -> Self {
        match dedup {
            Dedup::Strict => ClosedSet::Strict(FnvHashSet::default()),
            Dedup::HashOnly => ClosedSet::HashOnly(FnvHashSet::default()),
        }
    }

    pub(crate) fn contains(&self, state: &State) -> bool {
        match self {
            ClosedSet::Strict(set) => set.contains(state),
            ClosedSet::HashOnly(set) => set.contains(&state.hash),
        }
    }

    pub(crate) fn insert(&mut self, state: &'a State) {
        match self {
            ClosedSet::Strict(set) => {
                set.insert(state);
            }
            ClosedSet::HashOnly(set) => {
                set.insert(state.hash);
            }
        }
    }

    pub(crate) fn len(&self) -> usize {
        match self {
            ClosedSet::Strict(set) => set.len(),
            ClosedSet::HashOnly(set) => set.len(),
        }
    }
}
