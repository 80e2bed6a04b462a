use std::hash::{Hash, Hasher};

use crate::data::Pos;
use crate::solver::zobrist::ZobristKeys;

/// The dynamic part of a level.
///
/// Boxes are kept sorted so equal configurations compare equal no matter
/// in which order the boxes were moved.
/// `hash` is the incrementally maintained Zobrist hash - it's only an accelerator,
/// equality always compares the positions.
#[derive(Debug, Clone)]
pub(crate) struct State {
    pub(crate) agent: Pos,
    pub(crate) boxes: Vec<Pos>,
    pub(crate) hash: u64,
}

impl State {
    pub(crate) fn new(keys: &ZobristKeys, agent: Pos, mut boxes: Vec<Pos>) -> State {
        boxes.sort();
        let hash = keys.hash(agent, &boxes);
        State { agent, boxes, hash }
    }

    pub(crate) fn box_index(&self, pos: Pos) -> Option<usize> {
        self.boxes.binary_search(&pos).ok()
    }

    pub(crate) fn has_box(&self, pos: Pos) -> bool {
        self.box_index(pos).is_some()
    }

    /// New state with the agent moved to an adjacent empty cell.
    pub(crate) fn with_step(&self, keys: &ZobristKeys, new_agent: Pos) -> State {
        State {
            agent: new_agent,
            boxes: self.boxes.clone(),
            hash: keys.moved_agent(self.hash, self.agent, new_agent),
        }
    }

    /// New state with the agent moved onto the box at `box_index` and the box moved to `box_dest`.
    pub(crate) fn with_push(&self, keys: &ZobristKeys, box_index: usize, box_dest: Pos) -> State {
        let box_src = self.boxes[box_index];

        let mut boxes = self.boxes.clone();
        boxes.remove(box_index);
        let insert_at = boxes
            .binary_search(&box_dest)
            .expect_err("Pushed a box onto another box");
        boxes.insert(insert_at, box_dest);

        let hash = keys.moved_agent(self.hash, self.agent, box_src);
        let hash = keys.moved_box(hash, box_src, box_dest);
        State {
            agent: box_src,
            boxes,
            hash,
        }
    }
}

impl PartialEq for State {
    fn eq(&self, other: &Self) -> bool {
        self.agent == other.agent && self.boxes == other.boxes
    }
}

impl Eq for State {}

impl Hash for State {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // equal states always have equal zobrist hashes so this is consistent with Eq
        state.write_u64(self.hash);
    }
}
