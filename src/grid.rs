//! City-block occupancy grid derived from a [`Maze`].
//!
//! Maze cell `(x, y)` becomes grid cell `(2x + 1, 2y + 1)`. Even/even cells and
//! the outer ring are always building blocks; the cell between two rooms is
//! open only when the maze wall between them has been knocked down.

use crate::error::GridError;
use crate::maze::{Maze, Side};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Pos {
    pub x: usize,
    pub z: usize,
}

impl Pos {
    pub const fn new(x: usize, z: usize) -> Self {
        Self { x, z }
    }

    pub fn offset(self, dx: isize, dz: isize) -> Option<Pos> {
        Some(Pos {
            x: self.x.checked_add_signed(dx)?,
            z: self.z.checked_add_signed(dz)?,
        })
    }

    pub fn manhattan(self, other: Pos) -> usize {
        self.x.abs_diff(other.x) + self.z.abs_diff(other.z)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OccupancyGrid {
    width: usize,
    height: usize,
    blocked: Vec<bool>,
}

impl OccupancyGrid {
    /// Pure and total: the same maze always yields the same grid.
    pub fn from_maze(maze: &Maze) -> Self {
        let width = 2 * maze.width() + 1;
        let height = 2 * maze.height() + 1;
        let mut grid = Self {
            width,
            height,
            blocked: vec![true; width * height],
        };

        for y in 0..maze.height() {
            for x in 0..maze.width() {
                let room = Pos::new(2 * x + 1, 2 * y + 1);
                grid.set_open(room);
                for side in Side::ALL {
                    if !maze.is_open(x, y, side) {
                        continue;
                    }
                    let (dx, dz) = side.delta();
                    if let Some(connector) = room.offset(dx, dz) {
                        grid.set_open(connector);
                    }
                }
            }
        }
        grid
    }

    /// Builds a grid from rows of `blocked` flags, indexed `rows[z][x]`.
    pub fn from_rows(rows: &[Vec<bool>]) -> Result<Self, GridError> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        if width == 0 {
            return Err(GridError::Empty);
        }
        let mut blocked = Vec::with_capacity(width * height);
        for (row, cells) in rows.iter().enumerate() {
            if cells.len() != width {
                return Err(GridError::Ragged {
                    row,
                    expected: width,
                    found: cells.len(),
                });
            }
            blocked.extend_from_slice(cells);
        }
        Ok(Self {
            width,
            height,
            blocked,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn contains(&self, pos: Pos) -> bool {
        pos.x < self.width && pos.z < self.height
    }

    /// Off-grid positions count as blocked.
    pub fn is_blocked(&self, pos: Pos) -> bool {
        !self.contains(pos) || self.blocked[pos.z * self.width + pos.x]
    }

    pub fn is_open(&self, pos: Pos) -> bool {
        !self.is_blocked(pos)
    }

    /// Signed lookup for neighbour probing; negative coordinates are blocked.
    pub fn is_blocked_at(&self, x: isize, z: isize) -> bool {
        if x < 0 || z < 0 {
            return true;
        }
        self.is_blocked(Pos::new(x as usize, z as usize))
    }

    /// Open orthogonal neighbours, in top, right, bottom, left order.
    pub fn open_neighbours(&self, pos: Pos) -> impl Iterator<Item = Pos> + '_ {
        Side::ALL.into_iter().filter_map(move |side| {
            let (dx, dz) = side.delta();
            pos.offset(dx, dz).filter(|next| self.is_open(*next))
        })
    }

    pub fn open_cells(&self) -> impl Iterator<Item = Pos> + '_ {
        (0..self.height)
            .flat_map(move |z| (0..self.width).map(move |x| Pos::new(x, z)))
            .filter(move |pos| self.is_open(*pos))
    }

    fn set_open(&mut self, pos: Pos) {
        self.blocked[pos.z * self.width + pos.x] = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MazeParams;
    use crate::maze::generate_maze;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn maze(width: usize, height: usize, seed: u64) -> Maze {
        let params = MazeParams {
            width,
            height,
            ..MazeParams::default()
        };
        generate_maze(&mut StdRng::seed_from_u64(seed), &params, (0, 0)).unwrap()
    }

    #[test]
    fn five_by_five_from_seed_42() {
        let grid = OccupancyGrid::from_maze(&maze(5, 5, 42));
        assert_eq!((grid.width(), grid.height()), (11, 11));
        assert!(grid.is_blocked(Pos::new(0, 0)));
        assert!(grid.is_blocked(Pos::new(10, 10)));
        assert!(grid.is_open(Pos::new(5, 5)));
    }

    #[test]
    fn structural_cells_fixed() {
        let grid = OccupancyGrid::from_maze(&maze(7, 4, 9));
        for z in 0..grid.height() {
            for x in 0..grid.width() {
                let pos = Pos::new(x, z);
                let border = x == 0 || z == 0 || x == grid.width() - 1 || z == grid.height() - 1;
                if border || (x % 2 == 0 && z % 2 == 0) {
                    assert!(grid.is_blocked(pos), "{pos:?} should be blocked");
                }
                if x % 2 == 1 && z % 2 == 1 {
                    assert!(grid.is_open(pos), "{pos:?} should be open");
                }
            }
        }
    }

    #[test]
    fn connectors_follow_walls() {
        let maze = maze(6, 6, 1);
        let grid = OccupancyGrid::from_maze(&maze);
        for y in 0..6 {
            for x in 0..6 {
                let right = Pos::new(2 * x + 2, 2 * y + 1);
                let bottom = Pos::new(2 * x + 1, 2 * y + 2);
                assert_eq!(grid.is_open(right), maze.is_open(x, y, Side::Right));
                assert_eq!(grid.is_open(bottom), maze.is_open(x, y, Side::Bottom));
            }
        }
    }

    #[test]
    fn derivation_is_repeatable() {
        let maze = maze(8, 3, 21);
        assert_eq!(OccupancyGrid::from_maze(&maze), OccupancyGrid::from_maze(&maze));
    }

    #[test]
    fn off_grid_is_blocked() {
        let grid = OccupancyGrid::from_maze(&maze(2, 2, 0));
        assert!(grid.is_blocked(Pos::new(5, 1)));
        assert!(grid.is_blocked_at(-1, 1));
        assert!(!grid.is_blocked_at(1, 1));
    }

    #[test]
    fn from_rows_rejects_bad_shapes() {
        assert_eq!(OccupancyGrid::from_rows(&[]), Err(GridError::Empty));
        assert_eq!(
            OccupancyGrid::from_rows(&[vec![true, false], vec![true]]),
            Err(GridError::Ragged {
                row: 1,
                expected: 2,
                found: 1
            })
        );
    }

    #[test]
    fn open_neighbours_in_side_order() {
        let grid = OccupancyGrid::from_rows(&[
            vec![true, false, true],
            vec![false, false, false],
            vec![true, true, true],
        ])
        .unwrap();
        let found: Vec<_> = grid.open_neighbours(Pos::new(1, 1)).collect();
        assert_eq!(found, vec![Pos::new(1, 0), Pos::new(2, 1), Pos::new(0, 1)]);
    }
}
