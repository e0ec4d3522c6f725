//! Zombies re-plan a route to the player every tick and shuffle along it.

use glam::Vec2;
use log::debug;

use crate::config::PursuitParams;
use crate::grid::{OccupancyGrid, Pos};
use crate::pathfinder::{Finder, PathFinder};
use crate::world::WorldFrame;

/// Per-zombie lifecycle. [`Zombie::spawn`] always starts a zombie in
/// `Pursuing`; `IdleSpawn` is for callers that place a zombie by hand and
/// want it parked, and [`pursue`] leaves such zombies where they stand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZombieState {
    IdleSpawn,
    Pursuing,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Zombie {
    pub state: ZombieState,
    pub position: Vec2,
    pub cell: Pos,
    pub speed: f32,
    pub finder: Finder,
    /// Route planned on the latest tick, from the zombie's cell to the player's.
    pub path: Vec<Pos>,
}

impl Zombie {
    /// Places a zombie at the centre of maze cell `room`.
    pub fn spawn(frame: &WorldFrame, room: (usize, usize), speed: f32, finder: Finder) -> Self {
        let position = frame.room_center(room);
        Self {
            state: ZombieState::Pursuing,
            position,
            cell: frame.cell_of(position),
            speed,
            finder,
            path: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PursuitReport {
    /// Distance from the player to the closest zombie after moving.
    pub min_distance: Option<f32>,
    pub caught: bool,
    /// Zombies that found no route and walked straight at the player.
    pub fallbacks: usize,
}

/// `clamp(numerator / distance, 1, max)`: zombies hurry as they close in.
pub fn speed_multiplier(params: &PursuitParams, distance: f32) -> f32 {
    (params.speedup_numerator / distance).clamp(1.0, params.max_speedup)
}

/// Advances every zombie by `delta` seconds towards the player.
pub fn pursue(
    zombies: &mut [Zombie],
    player: Vec2,
    player_cell: Pos,
    grid: &OccupancyGrid,
    frame: &WorldFrame,
    params: &PursuitParams,
    delta: f32,
) -> PursuitReport {
    let mut report = PursuitReport::default();

    for zombie in zombies.iter_mut() {
        if zombie.state != ZombieState::Pursuing {
            continue;
        }
        zombie.path = zombie.finder.find_path(zombie.cell, player_cell, grid);

        let target = if zombie.path.len() >= 2 && zombie.cell != player_cell {
            frame.cell_center(zombie.path[1])
        } else {
            if zombie.path.is_empty() {
                report.fallbacks += 1;
                debug!(
                    "{} found no route from {:?} to {:?}; heading straight for the player",
                    zombie.finder.name(),
                    zombie.cell,
                    player_cell
                );
            }
            player
        };

        let distance = zombie.position.distance(player);
        let step = zombie.speed * speed_multiplier(params, distance) * delta;
        zombie.position += (target - zombie.position).normalize_or_zero() * step;
        zombie.cell = frame.cell_of(zombie.position);

        let distance = zombie.position.distance(player);
        if distance < params.capture_distance {
            report.caught = true;
        }
        report.min_distance = Some(report.min_distance.map_or(distance, |d| d.min(distance)));
    }

    report
}
