//! Grid search strategies the zombies chase with.
//!
//! Every strategy walks the 4-connected open cells of an [`OccupancyGrid`] and
//! returns the full cell sequence from start to goal. Which one a zombie uses
//! only changes how it tends to route, never what it is allowed to do.

mod bidirectional;
mod jump_point;

use pathfinding::prelude::{astar, bfs, dijkstra};
use rand::Rng;

use crate::grid::{OccupancyGrid, Pos};

use self::bidirectional::Priority;

pub trait PathFinder {
    /// Ordered cells from `start` to `goal` inclusive. `[start]` when the two
    /// coincide, empty when the goal cannot be reached.
    fn find_path(&self, start: Pos, goal: Pos, grid: &OccupancyGrid) -> Vec<Pos>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Finder {
    AStar,
    BestFirst,
    BreadthFirst,
    Dijkstra,
    JumpPoint,
    BiAStar,
    BiBestFirst,
    BiBreadthFirst,
    BiDijkstra,
}

impl Finder {
    pub const ALL: [Finder; 9] = [
        Finder::AStar,
        Finder::BestFirst,
        Finder::BreadthFirst,
        Finder::Dijkstra,
        Finder::JumpPoint,
        Finder::BiAStar,
        Finder::BiBestFirst,
        Finder::BiBreadthFirst,
        Finder::BiDijkstra,
    ];

    pub fn random(rng: &mut impl Rng) -> Self {
        Self::ALL[rng.gen_range(0..Self::ALL.len())]
    }

    pub fn name(self) -> &'static str {
        match self {
            Finder::AStar => "a-star",
            Finder::BestFirst => "best-first",
            Finder::BreadthFirst => "breadth-first",
            Finder::Dijkstra => "dijkstra",
            Finder::JumpPoint => "jump-point",
            Finder::BiAStar => "bi-a-star",
            Finder::BiBestFirst => "bi-best-first",
            Finder::BiBreadthFirst => "bi-breadth-first",
            Finder::BiDijkstra => "bi-dijkstra",
        }
    }
}

impl PathFinder for Finder {
    fn find_path(&self, start: Pos, goal: Pos, grid: &OccupancyGrid) -> Vec<Pos> {
        if start == goal {
            return vec![start];
        }
        let heuristic = |pos: &Pos| pos.manhattan(goal);
        let success = |pos: &Pos| *pos == goal;

        let path = match self {
            Finder::AStar => astar(
                &start,
                |pos| grid.open_neighbours(*pos).map(|next| (next, 1)),
                heuristic,
                success,
            )
            .map(|(path, _)| path),
            // Zero step cost leaves only the heuristic to order the open set.
            Finder::BestFirst => astar(
                &start,
                |pos| grid.open_neighbours(*pos).map(|next| (next, 0)),
                heuristic,
                success,
            )
            .map(|(path, _)| path),
            Finder::BreadthFirst => bfs(&start, |pos| grid.open_neighbours(*pos), success),
            Finder::Dijkstra => dijkstra(
                &start,
                |pos| grid.open_neighbours(*pos).map(|next| (next, 1usize)),
                success,
            )
            .map(|(path, _)| path),
            Finder::JumpPoint => jump_point::search(start, goal, grid),
            Finder::BiAStar => bidirectional::search(start, goal, grid, Priority::Estimate),
            Finder::BiBestFirst => bidirectional::search(start, goal, grid, Priority::Heuristic),
            Finder::BiBreadthFirst => bidirectional::search(start, goal, grid, Priority::Fifo),
            Finder::BiDijkstra => bidirectional::search(start, goal, grid, Priority::Distance),
        };
        path.unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MazeParams;
    use crate::maze::generate_maze;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn grid(rows: &[&str]) -> OccupancyGrid {
        let rows: Vec<Vec<bool>> = rows
            .iter()
            .map(|row| row.chars().map(|c| c == '#').collect())
            .collect();
        OccupancyGrid::from_rows(&rows).unwrap()
    }

    fn assert_walkable(path: &[Pos], start: Pos, goal: Pos, grid: &OccupancyGrid) {
        assert_eq!(path.first(), Some(&start));
        assert_eq!(path.last(), Some(&goal));
        for pair in path.windows(2) {
            assert_eq!(pair[0].manhattan(pair[1]), 1, "{:?} skips a cell", pair);
        }
        assert!(path[1..].iter().all(|pos| grid.is_open(*pos)));
    }

    const ROOMS: [&str; 7] = [
        "#########",
        "#...#...#",
        "#.#.#.#.#",
        "#.#...#.#",
        "#.#####.#",
        "#.......#",
        "#########",
    ];

    #[test]
    fn every_strategy_reaches_the_goal() {
        let grid = grid(&ROOMS);
        let start = Pos::new(1, 1);
        let goal = Pos::new(7, 1);
        for finder in Finder::ALL {
            let path = finder.find_path(start, goal, &grid);
            assert!(!path.is_empty(), "{} found nothing", finder.name());
            assert_walkable(&path, start, goal, &grid);
        }
    }

    #[test]
    fn optimal_strategies_agree_on_length() {
        let grid = grid(&ROOMS);
        let start = Pos::new(1, 1);
        let goal = Pos::new(7, 1);
        for finder in [
            Finder::AStar,
            Finder::BreadthFirst,
            Finder::Dijkstra,
            Finder::JumpPoint,
        ] {
            assert_eq!(finder.find_path(start, goal, &grid).len(), 11, "{}", finder.name());
        }
    }

    #[test]
    fn coincident_start_and_goal() {
        let grid = grid(&ROOMS);
        for finder in Finder::ALL {
            assert_eq!(
                finder.find_path(Pos::new(3, 3), Pos::new(3, 3), &grid),
                vec![Pos::new(3, 3)]
            );
        }
    }

    #[test]
    fn walled_off_goal_gives_empty_path() {
        let grid = grid(&["#####", "#.#.#", "#####"]);
        for finder in Finder::ALL {
            assert!(finder.find_path(Pos::new(1, 1), Pos::new(3, 1), &grid).is_empty());
        }
    }

    #[test]
    fn starting_inside_a_block_still_routes() {
        let grid = grid(&ROOMS);
        let start = Pos::new(2, 2);
        let goal = Pos::new(5, 5);
        for finder in Finder::ALL {
            let path = finder.find_path(start, goal, &grid);
            assert_walkable(&path, start, goal, &grid);
        }
    }

    #[test]
    fn strategies_cover_generated_mazes() {
        let params = MazeParams {
            width: 8,
            height: 8,
            braid_probability: 0.1,
            ..MazeParams::default()
        };
        let maze = generate_maze(&mut StdRng::seed_from_u64(17), &params, (0, 0)).unwrap();
        let grid = OccupancyGrid::from_maze(&maze);
        let start = Pos::new(1, 1);
        let goal = Pos::new(15, 15);
        for finder in Finder::ALL {
            let path = finder.find_path(start, goal, &grid);
            assert_walkable(&path, start, goal, &grid);
        }
    }

    #[test]
    fn random_choice_spans_all_strategies() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..500 {
            seen.insert(Finder::random(&mut rng));
        }
        assert_eq!(seen.len(), Finder::ALL.len());
    }
}
