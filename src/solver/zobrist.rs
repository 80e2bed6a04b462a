use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::data::Pos;

/// Per-cell random keys for Zobrist hashing.
///
/// A state's hash is the XOR of the agent key of the agent's cell and the box keys
/// of all cells with a box. XOR is commutative so box order doesn't matter
/// and every transition is a constant number of XORs.
///
/// Keys are drawn fresh for every solve so independent solves never share them.
#[derive(Debug, Clone)]
pub(crate) struct ZobristKeys {
    width: usize,
    box_keys: Vec<u64>,
    agent_keys: Vec<u64>,
}

impl ZobristKeys {
    pub(crate) fn new(width: usize, height: usize, seed: u64) -> Self {
        Self::with_rng(width, height, &mut SmallRng::seed_from_u64(seed))
    }

    pub(crate) fn from_entropy(width: usize, height: usize) -> Self {
        Self::with_rng(width, height, &mut SmallRng::from_entropy())
    }

    fn with_rng<R: Rng>(width: usize, height: usize, rng: &mut R) -> Self {
        let cells = width * height;
        let box_keys = (0..cells).map(|_| rng.gen()).collect();
        let agent_keys = (0..cells).map(|_| rng.gen()).collect();
        ZobristKeys {
            width,
            box_keys,
            agent_keys,
        }
    }

    fn idx(&self, pos: Pos) -> usize {
        debug_assert!(pos.x >= 0 && pos.y >= 0 && (pos.x as usize) < self.width);
        pos.x as usize + pos.y as usize * self.width
    }

    pub(crate) fn hash(&self, agent: Pos, boxes: &[Pos]) -> u64 {
        boxes
            .iter()
            .fold(self.agent_keys[self.idx(agent)], |hash, &b| {
                hash ^ self.box_keys[self.idx(b)]
            })
    }

    pub(crate) fn moved_agent(&self, hash: u64, from: Pos, to: Pos) -> u64 {
        hash ^ self.agent_keys[self.idx(from)] ^ self.agent_keys[self.idx(to)]
    }

    pub(crate) fn moved_box(&self, hash: u64, from: Pos, to: Pos) -> u64 {
        hash ^ self.box_keys[self.idx(from)] ^ self.box_keys[self.idx(to)]
    }
}
