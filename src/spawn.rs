//! Zombie wave schedule and spawn placement.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::config::SpawnParams;

/// Waves arrive at session time 0, then after `first_interval` seconds, with
/// every later gap `interval_growth` times the previous one.
#[derive(Debug, Clone, PartialEq)]
pub struct Spawner {
    params: SpawnParams,
    next_wave_at: f32,
    interval: f32,
    waves: usize,
    halted: bool,
}

impl Spawner {
    pub fn new(params: SpawnParams) -> Self {
        let interval = params.first_interval;
        Self {
            params,
            next_wave_at: 0.0,
            interval,
            waves: 0,
            halted: false,
        }
    }

    /// Zombies owed at `elapsed` seconds. Advances the schedule by at most
    /// one wave per call.
    pub fn due(&mut self, elapsed: f32) -> usize {
        if self.halted || elapsed < self.next_wave_at {
            return 0;
        }
        let count = if self.waves == 0 {
            self.params.initial_wave
        } else {
            self.params.wave_size
        };
        self.waves += 1;
        self.next_wave_at = elapsed + self.interval;
        self.interval *= self.params.interval_growth;
        count
    }

    /// Stops the schedule for good.
    pub fn halt(&mut self) {
        self.halted = true;
    }

    pub fn is_halted(&self) -> bool {
        self.halted
    }

    pub fn waves(&self) -> usize {
        self.waves
    }

    pub fn next_wave_at(&self) -> f32 {
        self.next_wave_at
    }
}

/// Maze cell for a new zombie: its column and row each sit more than one
/// away from the player's start, so nobody spawns on top of the player.
pub fn spawn_cell(
    width: usize,
    height: usize,
    start: (usize, usize),
    rng: &mut impl Rng,
) -> Option<(usize, usize)> {
    let columns = far_from(width, start.0);
    let rows = far_from(height, start.1);
    Some((*columns.choose(rng)?, *rows.choose(rng)?))
}

/// Player start drawn only from cells that leave [`spawn_cell`] somewhere to
/// put a zombie. `None` when the maze is two or fewer cells across either way.
pub fn start_cell(width: usize, height: usize, rng: &mut impl Rng) -> Option<(usize, usize)> {
    let columns = spawnable_origins(width);
    let rows = spawnable_origins(height);
    Some((*columns.choose(rng)?, *rows.choose(rng)?))
}

fn spawnable_origins(len: usize) -> Vec<usize> {
    (0..len).filter(|&i| !far_from(len, i).is_empty()).collect()
}

fn far_from(len: usize, origin: usize) -> Vec<usize> {
    (0..len).filter(|&i| i.abs_diff(origin) > 1).collect()
}
