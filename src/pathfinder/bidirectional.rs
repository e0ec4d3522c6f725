//! Two searches growing from both ends until their visited sets touch.
//!
//! The result is not guaranteed shortest; the first contact wins.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};

use crate::grid::{OccupancyGrid, Pos};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Priority {
    /// Insertion order, giving breadth-first growth.
    Fifo,
    /// Steps from the root.
    Distance,
    /// Steps from the root plus the remaining Manhattan distance.
    Estimate,
    /// Remaining Manhattan distance only.
    Heuristic,
}

struct Frontier {
    target: Pos,
    open: BinaryHeap<Reverse<(usize, usize, Pos)>>,
    parents: HashMap<Pos, (Option<Pos>, usize)>,
    pushed: usize,
}

enum Step {
    Met(Pos),
    Exhausted,
    Continue,
}

impl Frontier {
    fn new(root: Pos, target: Pos) -> Self {
        let mut parents = HashMap::new();
        parents.insert(root, (None, 0));
        let mut open = BinaryHeap::new();
        open.push(Reverse((0, 0, root)));
        Self {
            target,
            open,
            parents,
            pushed: 1,
        }
    }

    fn rank(&self, priority: Priority, pos: Pos, cost: usize) -> usize {
        match priority {
            Priority::Fifo => self.pushed,
            Priority::Distance => cost,
            Priority::Estimate => cost + pos.manhattan(self.target),
            Priority::Heuristic => pos.manhattan(self.target),
        }
    }

    fn expand(&mut self, other: &Frontier, grid: &OccupancyGrid, priority: Priority) -> Step {
        let Some(Reverse((_, _, pos))) = self.open.pop() else {
            return Step::Exhausted;
        };
        let cost = self.parents.get(&pos).map_or(0, |&(_, cost)| cost) + 1;

        for next in grid.open_neighbours(pos) {
            let known = self.parents.get(&next).map(|&(_, c)| c);
            if known.map_or(true, |c| cost < c) {
                self.parents.insert(next, (Some(pos), cost));
                if other.parents.contains_key(&next) {
                    return Step::Met(next);
                }
                let rank = self.rank(priority, next, cost);
                self.open.push(Reverse((rank, self.pushed, next)));
                self.pushed += 1;
            }
        }
        Step::Continue
    }

    /// Cells from `pos` back to this frontier's root.
    fn chain(&self, pos: Pos) -> Vec<Pos> {
        let mut cells = vec![pos];
        let mut cursor = pos;
        while let Some(&(Some(parent), _)) = self.parents.get(&cursor) {
            cells.push(parent);
            cursor = parent;
        }
        cells
    }
}

pub(super) fn search(
    start: Pos,
    goal: Pos,
    grid: &OccupancyGrid,
    priority: Priority,
) -> Option<Vec<Pos>> {
    let mut forward = Frontier::new(start, goal);
    let mut backward = Frontier::new(goal, start);

    loop {
        let meet = match forward.expand(&backward, grid, priority) {
            Step::Met(pos) => pos,
            Step::Exhausted => return None,
            Step::Continue => match backward.expand(&forward, grid, priority) {
                Step::Met(pos) => pos,
                Step::Exhausted => return None,
                Step::Continue => continue,
            },
        };

        let mut path = forward.chain(meet);
        path.reverse();
        path.extend(backward.chain(meet).into_iter().skip(1));
        return Some(path);
    }
}
