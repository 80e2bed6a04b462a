use std::fmt::{self, Display, Formatter};
use std::str::FromStr;
use std::time::Duration;

/// How the remaining cost of a box configuration is estimated.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Heuristic {
    /// Sum of distances from every box to its closest target.
    /// Several boxes can count the same target.
    NearestTarget,
    /// Pairs sorted boxes with sorted targets for every rotation and takes the cheapest rotation.
    /// Cheap approximation of a matching - not guaranteed admissible.
    CyclicMatching,
    /// Exact minimum cost perfect matching (Hungarian algorithm) - admissible but O(n^3).
    MinMatching,
}

impl Default for Heuristic {
    fn default() -> Self {
        Heuristic::CyclicMatching
    }
}

impl Display for Heuristic {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match *self {
            Heuristic::NearestTarget => write!(f, "nearest"),
            Heuristic::CyclicMatching => write!(f, "cyclic"),
            Heuristic::MinMatching => write!(f, "matching"),
        }
    }
}

impl FromStr for Heuristic {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "nearest" => Ok(Heuristic::NearestTarget),
            "cyclic" => Ok(Heuristic::CyclicMatching),
            "matching" => Ok(Heuristic::MinMatching),
            _ => Err(format!("Unknown heuristic: {}", s)),
        }
    }
}

/// How visited states are recognized.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Dedup {
    /// Zobrist hash to find candidates, full comparison to confirm.
    Strict,
    /// Zobrist hash only - a collision silently prunes a different state.
    HashOnly,
}

impl Default for Dedup {
    fn default() -> Self {
        Dedup::Strict
    }
}

impl Display for Dedup {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match *self {
            Dedup::Strict => write!(f, "strict"),
            Dedup::HashOnly => write!(f, "hash-only"),
        }
    }
}

impl FromStr for Dedup {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "strict" => Ok(Dedup::Strict),
            "hash-only" => Ok(Dedup::HashOnly),
            _ => Err(format!("Unknown dedup mode: {}", s)),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SolverConfig {
    pub heuristic: Heuristic,
    pub dedup: Dedup,
    /// Stop after visiting this many unique states.
    pub max_visited: Option<u64>,
    pub timeout: Option<Duration>,
    /// Seed for the Zobrist keys, random when `None`.
    pub seed: Option<u64>,
}

impl SolverConfig {
    pub fn with_heuristic(mut self, heuristic: Heuristic) -> Self {
        self.heuristic = heuristic;
        self
    }

    pub fn with_dedup(mut self, dedup: Dedup) -> Self {
        self.dedup = dedup;
        self
    }

    pub fn with_max_visited(mut self, max_visited: u64) -> Self {
        self.max_visited = Some(max_visited);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}
