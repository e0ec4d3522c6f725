//! Continuous world space laid over the occupancy grid.
//!
//! The world is centred on the origin. Positions are `Vec2` with `x` along the
//! grid columns and `y` holding the world `z` axis (grid rows).

use glam::Vec2;

use crate::grid::{OccupancyGrid, Pos};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldFrame {
    block: f32,
    cols: usize,
    rows: usize,
}

impl WorldFrame {
    pub fn new(grid: &OccupancyGrid, block: f32) -> Self {
        Self {
            block,
            cols: grid.width(),
            rows: grid.height(),
        }
    }

    pub fn block(&self) -> f32 {
        self.block
    }

    /// Full world size along both axes.
    pub fn extent(&self) -> Vec2 {
        Vec2::new(self.cols as f32, self.rows as f32) * self.block
    }

    /// Unclamped grid indices of the cell containing `position`.
    pub fn cell_index(&self, position: Vec2) -> (isize, isize) {
        let local = (position + self.extent() / 2.0) / self.block;
        (local.x.floor() as isize, local.y.floor() as isize)
    }

    /// Containing cell, clamped into the grid for positions outside the world.
    pub fn cell_of(&self, position: Vec2) -> Pos {
        let (x, z) = self.cell_index(position);
        Pos::new(
            x.clamp(0, self.cols as isize - 1) as usize,
            z.clamp(0, self.rows as isize - 1) as usize,
        )
    }

    pub fn cell_center(&self, pos: Pos) -> Vec2 {
        Vec2::new(
            (pos.x as f32 + 0.5) * self.block,
            (pos.z as f32 + 0.5) * self.block,
        ) - self.extent() / 2.0
    }

    /// Centre of the room belonging to maze cell `(x, y)`.
    pub fn room_center(&self, cell: (usize, usize)) -> Vec2 {
        self.cell_center(Pos::new(2 * cell.0 + 1, 2 * cell.1 + 1))
    }

    /// World `x` of the western edge of grid column `column`.
    pub fn edge_x(&self, column: isize) -> f32 {
        column as f32 * self.block - self.extent().x / 2.0
    }

    /// World `z` of the northern edge of grid row `row`.
    pub fn edge_z(&self, row: isize) -> f32 {
        row as f32 * self.block - self.extent().y / 2.0
    }

    /// Scales a world position into a `width x height` minimap.
    pub fn to_minimap(&self, position: Vec2, width: f32, height: f32) -> Vec2 {
        let extent = self.extent();
        (position + extent / 2.0) / extent * Vec2::new(width, height)
    }
}
