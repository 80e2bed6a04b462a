//! Estimates of how many pushes are left. Less is better.
//!
//! All of them take targets and boxes sorted the same way and assume there's
//! the same number of each - the solver rejects other levels up front.

use crate::data::Pos;

pub(crate) fn nearest_target(targets: &[Pos], boxes: &[Pos]) -> u32 {
    boxes
        .iter()
        .map(|&b| targets.iter().map(|&t| b.dist(t)).min().unwrap_or(0))
        .sum()
}

/// Pairs the i-th target with the (i + start)-th box for every `start`
/// and returns the cheapest of these pairings.
///
/// Only n out of n! assignments are considered so this can overestimate
/// and A* with it doesn't always find the shortest solution.
pub(crate) fn cyclic_matching(targets: &[Pos], boxes: &[Pos]) -> u32 {
    debug_assert_eq!(targets.len(), boxes.len());

    let n = boxes.len();
    (0..n)
        .map(|start| {
            targets
                .iter()
                .enumerate()
                .map(|(i, &t)| t.dist(boxes[(i + start) % n]))
                .sum()
        })
        .min()
        .unwrap_or(0)
}

/// Cost of the minimum perfect matching between boxes and targets using manhattan distances.
///
/// Hungarian algorithm with potentials, O(n^3). Never overestimates.
pub(crate) fn min_matching(targets: &[Pos], boxes: &[Pos]) -> u32 {
    debug_assert_eq!(targets.len(), boxes.len());

    let n = boxes.len();
    if n == 0 {
        return 0;
    }

    // 1-based, row/column 0 is a sentinel
    let cost = |b: usize, t: usize| i64::from(boxes[b - 1].dist(targets[t - 1]));
    let mut box_pot = vec![0i64; n + 1];
    let mut target_pot = vec![0i64; n + 1];
    // box matched to each target
    let mut matched = vec![0usize; n + 1];
    let mut way = vec![0usize; n + 1];

    for b in 1..=n {
        matched[0] = b;
        let mut t0 = 0;
        let mut min_slack = vec![i64::max_value(); n + 1];
        let mut used = vec![false; n + 1];

        loop {
            used[t0] = true;
            let b0 = matched[t0];
            let mut delta = i64::max_value();
            let mut t1 = 0;
            for t in 1..=n {
                if used[t] {
                    continue;
                }
                let slack = cost(b0, t) - box_pot[b0] - target_pot[t];
                if slack < min_slack[t] {
                    min_slack[t] = slack;
                    way[t] = t0;
                }
                if min_slack[t] < delta {
                    delta = min_slack[t];
                    t1 = t;
                }
            }
            for t in 0..=n {
                if used[t] {
                    box_pot[matched[t]] += delta;
                    target_pot[t] -= delta;
                } else {
                    min_slack[t] -= delta;
                }
            }
            t0 = t1;
            if matched[t0] == 0 {
                break;
            }
        }

        // augment along the alternating path
        while t0 != 0 {
            let t1 = way[t0];
            matched[t0] = matched[t1];
            t0 = t1;
        }
    }

    (1..=n)
        .map(|t| boxes[matched[t] - 1].dist(targets[t - 1]))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all(targets: &[Pos], boxes: &[Pos]) -> (u32, u32, u32) {
        (
            nearest_target(targets, boxes),
            cyclic_matching(targets, boxes),
            min_matching(targets, boxes),
        )
    }

    #[test]
    fn solved_is_zero() {
        let targets = [Pos::new(2, 1), Pos::new(5, 1), Pos::new(1, 4)];
        assert_eq!(all(&targets, &targets), (0, 0, 0));
        assert_eq!(all(&[], &[]), (0, 0, 0));
    }

    #[test]
    fn one_box() {
        let targets = [Pos::new(1, 1)];
        let boxes = [Pos::new(4, 3)];
        assert_eq!(all(&targets, &boxes), (5, 5, 5));
    }

    #[test]
    fn shared_nearest_target() {
        // both boxes are closest to the target at x = 3
        let targets = [Pos::new(3, 1), Pos::new(9, 1)];
        let boxes = [Pos::new(1, 1), Pos::new(2, 1)];
        assert_eq!(all(&targets, &boxes), (3, 9, 9));
    }

    #[test]
    fn rotations_miss_the_best_pairing() {
        // the best assignment swaps the first two boxes which no rotation does
        let targets = [Pos::new(0, 0), Pos::new(10, 0), Pos::new(20, 0)];
        let boxes = [Pos::new(10, 1), Pos::new(0, 2), Pos::new(20, 3)];
        assert_eq!(all(&targets, &boxes), (6, 26, 6));
    }

    #[test]
    fn matching_is_minimal() {
        // compare with brute force over all permutations
        fn brute_force(targets: &[Pos], boxes: &[Pos]) -> u32 {
            fn permute(boxes: &mut Vec<Pos>, k: usize, targets: &[Pos], best: &mut u32) {
                if k == boxes.len() {
                    let cost = targets.iter().zip(boxes.iter()).map(|(t, b)| t.dist(*b)).sum();
                    *best = (*best).min(cost);
                    return;
                }
                for i in k..boxes.len() {
                    boxes.swap(k, i);
                    permute(boxes, k + 1, targets, best);
                    boxes.swap(k, i);
                }
            }
            let mut best = u32::max_value();
            permute(&mut boxes.to_vec(), 0, targets, &mut best);
            best
        }

        let targets = [
            Pos::new(1, 1),
            Pos::new(7, 2),
            Pos::new(3, 3),
            Pos::new(6, 5),
            Pos::new(2, 6),
        ];
        let boxes = [
            Pos::new(5, 1),
            Pos::new(2, 2),
            Pos::new(6, 3),
            Pos::new(1, 5),
            Pos::new(4, 6),
        ];
        let (nearest, cyclic, matching) = all(&targets, &boxes);
        assert_eq!(matching, brute_force(&targets, &boxes));
        assert!(nearest <= matching);
        assert!(matching <= cyclic);
    }
}
