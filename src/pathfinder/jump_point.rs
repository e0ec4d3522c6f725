//! Orthogonal jump-point search.
//!
//! Straight corridors are skipped in one hop: a jump only stops on the goal
//! or on a cell with an opening to either side. Dead-end corridors produce
//! no successor at all.

use pathfinding::prelude::astar;

use crate::grid::{OccupancyGrid, Pos};
use crate::maze::Side;

pub(super) fn search(start: Pos, goal: Pos, grid: &OccupancyGrid) -> Option<Vec<Pos>> {
    let (jumps, _) = astar(
        &start,
        |pos| successors(*pos, goal, grid),
        |pos| pos.manhattan(goal),
        |pos| *pos == goal,
    )?;
    Some(fill(&jumps))
}

fn successors(from: Pos, goal: Pos, grid: &OccupancyGrid) -> Vec<(Pos, usize)> {
    Side::ALL
        .into_iter()
        .filter_map(|side| jump(from, side.delta(), goal, grid))
        .map(|to| (to, to.manhattan(from)))
        .collect()
}

fn jump(from: Pos, (dx, dz): (isize, isize), goal: Pos, grid: &OccupancyGrid) -> Option<Pos> {
    let mut pos = from;
    loop {
        pos = pos.offset(dx, dz)?;
        if grid.is_blocked(pos) {
            return None;
        }
        if pos == goal || opens_sideways(pos, (dx, dz), grid) {
            return Some(pos);
        }
    }
}

fn opens_sideways(pos: Pos, (dx, _): (isize, isize), grid: &OccupancyGrid) -> bool {
    let (x, z) = (pos.x as isize, pos.z as isize);
    if dx != 0 {
        !grid.is_blocked_at(x, z - 1) || !grid.is_blocked_at(x, z + 1)
    } else {
        !grid.is_blocked_at(x - 1, z) || !grid.is_blocked_at(x + 1, z)
    }
}

/// Expands jump points into every cell walked between them.
fn fill(jumps: &[Pos]) -> Vec<Pos> {
    let mut cells = Vec::with_capacity(jumps.len());
    let Some(&first) = jumps.first() else {
        return cells;
    };
    cells.push(first);
    for pair in jumps.windows(2) {
        let (from, to) = (pair[0], pair[1]);
        let dx = (to.x as isize - from.x as isize).signum();
        let dz = (to.z as isize - from.z as isize).signum();
        let mut pos = from;
        while pos != to {
            match pos.offset(dx, dz) {
                Some(next) => pos = next,
                None => break,
            }
            cells.push(pos);
        }
    }
    cells
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fill_walks_each_leg() {
        let jumps = [Pos::new(1, 1), Pos::new(4, 1), Pos::new(4, 3)];
        assert_eq!(
            fill(&jumps),
            vec![
                Pos::new(1, 1),
                Pos::new(2, 1),
                Pos::new(3, 1),
                Pos::new(4, 1),
                Pos::new(4, 2),
                Pos::new(4, 3),
            ]
        );
    }

    #[test]
    fn corridor_is_a_single_jump() {
        let rows = vec![vec![true; 7], {
            let mut row = vec![false; 7];
            row[0] = true;
            row[6] = true;
            row
        }, vec![true; 7]];
        let grid = OccupancyGrid::from_rows(&rows).unwrap();
        let succ = successors(Pos::new(1, 1), Pos::new(5, 1), &grid);
        assert_eq!(succ, vec![(Pos::new(5, 1), 4)]);
    }

    #[test]
    fn side_openings_follow_the_travel_axis() {
        let rows: Vec<Vec<bool>> = ["##.##", "#...#", "##.##"]
            .iter()
            .map(|row| row.chars().map(|c| c == '#').collect())
            .collect();
        let grid = OccupancyGrid::from_rows(&rows).unwrap();
        assert!(opens_sideways(Pos::new(2, 1), (1, 0), &grid));
        assert!(opens_sideways(Pos::new(2, 1), (0, 1), &grid));
        assert!(!opens_sideways(Pos::new(1, 1), (-1, 0), &grid));
        assert!(!opens_sideways(Pos::new(2, 2), (0, 1), &grid));
    }
}
