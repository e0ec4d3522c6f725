//! Logical maze over a `width x height` cell grid.
//!
//! Cells are grown from a frontier list: every iteration picks a random
//! frontier cell (not the newest one), then tries to knock down one of its
//! walls. Carving into an already visited neighbour is allowed with the braid
//! probability, which adds loops to an otherwise perfect maze.

use log::debug;
use rand::Rng;

use crate::config::MazeParams;
use crate::error::MazeError;

const SIDE_ATTEMPTS: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Top,
    Right,
    Bottom,
    Left,
}

impl Side {
    pub const ALL: [Side; 4] = [Side::Top, Side::Right, Side::Bottom, Side::Left];

    pub fn index(self) -> usize {
        match self {
            Side::Top => 0,
            Side::Right => 1,
            Side::Bottom => 2,
            Side::Left => 3,
        }
    }

    pub fn opposite(self) -> Side {
        match self {
            Side::Top => Side::Bottom,
            Side::Right => Side::Left,
            Side::Bottom => Side::Top,
            Side::Left => Side::Right,
        }
    }

    pub fn delta(self) -> (isize, isize) {
        match self {
            Side::Top => (0, -1),
            Side::Right => (1, 0),
            Side::Bottom => (0, 1),
            Side::Left => (-1, 0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MazeCell {
    pub visited: bool,
    /// Indexed by [`Side::index`]; `true` means the wall blocks passage.
    pub walls: [bool; 4],
}

impl MazeCell {
    fn closed() -> Self {
        Self {
            visited: false,
            walls: [true; 4],
        }
    }

    pub fn has_wall(&self, side: Side) -> bool {
        self.walls[side.index()]
    }

    fn is_exhausted(&self) -> bool {
        self.walls.iter().all(|wall| !wall)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Maze {
    width: usize,
    height: usize,
    cells: Vec<MazeCell>,
    start: (usize, usize),
    frontier: Vec<(usize, usize)>,
}

impl Maze {
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn start(&self) -> (usize, usize) {
        self.start
    }

    /// Every cell in the order it joined the maze.
    pub fn frontier(&self) -> &[(usize, usize)] {
        &self.frontier
    }

    /// Panics when `(x, y)` is outside the maze.
    pub fn cell(&self, x: usize, y: usize) -> &MazeCell {
        &self.cells[y * self.width + x]
    }

    pub fn get(&self, x: usize, y: usize) -> Option<&MazeCell> {
        if x < self.width && y < self.height {
            Some(self.cell(x, y))
        } else {
            None
        }
    }

    pub fn neighbour(&self, x: usize, y: usize, side: Side) -> Option<(usize, usize)> {
        let (dx, dy) = side.delta();
        let nx = x.checked_add_signed(dx)?;
        let ny = y.checked_add_signed(dy)?;
        if nx < self.width && ny < self.height {
            Some((nx, ny))
        } else {
            None
        }
    }

    /// True when a passage leads from `(x, y)` through `side`.
    pub fn is_open(&self, x: usize, y: usize, side: Side) -> bool {
        self.neighbour(x, y, side).is_some() && !self.cell(x, y).has_wall(side)
    }

    /// Cleared walls between adjacent cells, each listed once as the cell and
    /// the side it opens towards (right or bottom).
    pub fn passages(&self) -> impl Iterator<Item = ((usize, usize), Side)> + '_ {
        (0..self.height)
            .flat_map(move |y| (0..self.width).map(move |x| (x, y)))
            .flat_map(move |(x, y)| {
                [Side::Right, Side::Bottom]
                    .into_iter()
                    .filter(move |&side| self.is_open(x, y, side))
                    .map(move |side| ((x, y), side))
            })
    }

    pub fn passage_count(&self) -> usize {
        self.passages().count()
    }

    fn cell_mut(&mut self, x: usize, y: usize) -> &mut MazeCell {
        &mut self.cells[y * self.width + x]
    }

    fn carve(&mut self, x: usize, y: usize, side: Side, nx: usize, ny: usize) {
        self.cell_mut(x, y).walls[side.index()] = false;
        self.cell_mut(nx, ny).walls[side.opposite().index()] = false;
    }
}

/// Grows a maze from `start`. Deterministic for a seeded `rng`.
pub fn generate_maze(
    rng: &mut impl Rng,
    params: &MazeParams,
    start: (usize, usize),
) -> Result<Maze, MazeError> {
    let (width, height) = (params.width, params.height);
    if width == 0 || height == 0 {
        return Err(MazeError::InvalidDimensions { width, height });
    }
    if start.0 >= width || start.1 >= height {
        return Err(MazeError::StartOutOfRange {
            x: start.0,
            y: start.1,
            width,
            height,
        });
    }

    let total = width * height;
    let mut maze = Maze {
        width,
        height,
        cells: vec![MazeCell::closed(); total],
        start,
        frontier: Vec::with_capacity(total),
    };
    maze.cell_mut(start.0, start.1).visited = true;
    maze.frontier.push(start);

    let budget = params.max_attempts();
    let mut visited = 1;
    let mut attempts = 0;

    while visited < total {
        if attempts >= budget {
            return Err(MazeError::Stalled {
                attempts,
                visited,
                total,
            });
        }
        attempts += 1;

        let (x, y) = maze.frontier[rng.gen_range(0..maze.frontier.len())];
        let cell = *maze.cell(x, y);
        if cell.is_exhausted() {
            continue;
        }
        let Some(side) = pick_closed_side(&cell, rng) else {
            continue;
        };
        let Some((nx, ny)) = maze.neighbour(x, y, side) else {
            continue;
        };

        let fresh = !maze.cell(nx, ny).visited;
        if !fresh && rng.gen::<f64>() >= params.braid_probability {
            continue;
        }

        maze.carve(x, y, side, nx, ny);
        if fresh {
            maze.cell_mut(nx, ny).visited = true;
            maze.frontier.push((nx, ny));
            visited += 1;
        }
    }

    debug!(
        "generated {}x{} maze from {:?} in {} attempts ({} passages)",
        width,
        height,
        start,
        attempts,
        maze.passage_count()
    );
    Ok(maze)
}

fn pick_closed_side(cell: &MazeCell, rng: &mut impl Rng) -> Option<Side> {
    for _ in 0..SIDE_ATTEMPTS {
        let side = Side::ALL[rng.gen_range(0..Side::ALL.len())];
        if cell.has_wall(side) {
            return Some(side);
        }
    }
    None
}
