//! Push-out-of-wall resolution for an entity that walked into a building block.

use glam::Vec2;

use crate::grid::{OccupancyGrid, Pos};
use crate::world::WorldFrame;

/// Probe order: top, top-right, right, bottom-right, bottom, bottom-left,
/// left, top-left. The first of several equally near cells wins.
const NEIGHBOURS: [(isize, isize); 8] = [
    (0, -1),
    (1, -1),
    (1, 0),
    (1, 1),
    (0, 1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
];

/// Fraction of a block the snapped position sits past the shared edge, so the
/// next lookup lands inside the open cell rather than on the boundary.
const SNAP_EPSILON: f32 = 1e-4;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Resolved {
    pub position: Vec2,
    pub cell: Pos,
}

/// Moves `position` out of a blocked cell onto the edge of the nearest open
/// neighbour. Positions in open cells come back untouched, as do positions
/// in blocked cells with no open neighbour at all.
pub fn resolve(position: Vec2, grid: &OccupancyGrid, frame: &WorldFrame) -> Resolved {
    let cell = frame.cell_of(position);
    let unchanged = Resolved { position, cell };
    if grid.is_open(cell) {
        return unchanged;
    }

    let mut best: Option<(Pos, (isize, isize), f32)> = None;
    for (dx, dz) in NEIGHBOURS {
        let Some(next) = cell.offset(dx, dz) else {
            continue;
        };
        if grid.is_blocked(next) {
            continue;
        }
        let dist = position.distance_squared(frame.cell_center(next));
        if best.map_or(true, |(_, _, closest)| dist < closest) {
            best = Some((next, (dx, dz), dist));
        }
    }

    let Some((next, (dx, dz), _)) = best else {
        return unchanged;
    };

    let nudge = frame.block() * SNAP_EPSILON;
    let mut snapped = position;
    match dx {
        1 => snapped.x = frame.edge_x(cell.x as isize + 1) + nudge,
        -1 => snapped.x = frame.edge_x(cell.x as isize) - nudge,
        _ => {}
    }
    match dz {
        1 => snapped.y = frame.edge_z(cell.z as isize + 1) + nudge,
        -1 => snapped.y = frame.edge_z(cell.z as isize) - nudge,
        _ => {}
    }

    Resolved {
        position: snapped,
        cell: next,
    }
}
