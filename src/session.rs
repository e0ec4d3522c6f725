//! One play session: the maze, the player, the horde, and the frame tick that
//! moves them all.

use glam::Vec2;
use log::{debug, info, warn};
use rand::Rng;

use crate::collision;
use crate::config::SessionConfig;
use crate::error::{Result, SessionError};
use crate::fog::Fog;
use crate::grid::{OccupancyGrid, Pos};
use crate::maze::{generate_maze, Maze};
use crate::pathfinder::Finder;
use crate::pursuit::{pursue, Zombie};
use crate::spawn::{spawn_cell, start_cell, Spawner};
use crate::world::WorldFrame;

#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub position: Vec2,
    pub cell: Pos,
    pub speed: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Running,
    Paused,
    /// Terminal: a zombie reached the player.
    Caught,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TickReport {
    pub spawned: usize,
    pub min_distance: Option<f32>,
    /// Set on the single tick that ended the session.
    pub caught: bool,
}

#[derive(Debug, Clone)]
pub struct SessionState {
    config: SessionConfig,
    maze: Maze,
    grid: OccupancyGrid,
    frame: WorldFrame,
    start: (usize, usize),
    player: Player,
    zombies: Vec<Zombie>,
    fog: Fog,
    spawner: Spawner,
    elapsed: f32,
    phase: Phase,
}

impl SessionState {
    /// Builds the maze and city grid, drops the player in a random room and
    /// lets the first wave loose.
    pub fn new(config: SessionConfig, rng: &mut impl Rng) -> Result<Self> {
        config.validate()?;
        let (width, height) = (config.maze.width, config.maze.height);
        let Some(start) = start_cell(width, height, rng) else {
            return Err(SessionError::NoSpawnCell { width, height });
        };

        let maze = generate_maze(rng, &config.maze, start)?;
        let grid = OccupancyGrid::from_maze(&maze);
        let frame = WorldFrame::new(&grid, config.block_size);
        let position = frame.room_center(start);
        let player = Player {
            position,
            cell: frame.cell_of(position),
            speed: config.pursuit.player_speed,
        };

        info!(
            "session started: {}x{} maze, {}x{} city grid, player in room {:?}",
            width,
            height,
            grid.width(),
            grid.height(),
            start
        );

        let mut session = Self {
            fog: Fog::new(config.fog.clone()),
            spawner: Spawner::new(config.spawn.clone()),
            config,
            maze,
            grid,
            frame,
            start,
            player,
            zombies: Vec::new(),
            elapsed: 0.0,
            phase: Phase::Running,
        };
        session.spawn_due(rng);
        Ok(session)
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn maze(&self) -> &Maze {
        &self.maze
    }

    pub fn grid(&self) -> &OccupancyGrid {
        &self.grid
    }

    pub fn frame(&self) -> &WorldFrame {
        &self.frame
    }

    pub fn start(&self) -> (usize, usize) {
        self.start
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn zombies(&self) -> &[Zombie] {
        &self.zombies
    }

    pub fn fog(&self) -> &Fog {
        &self.fog
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_over(&self) -> bool {
        self.phase == Phase::Caught
    }

    /// Freezes the simulation. Wave spawning stops for the rest of the
    /// session, even after [`SessionState::resume`].
    pub fn pause(&mut self) {
        if self.phase == Phase::Running {
            self.phase = Phase::Paused;
            self.spawner.halt();
            info!("session paused at {:.1}s", self.elapsed);
        }
    }

    pub fn resume(&mut self) {
        if self.phase == Phase::Paused {
            self.phase = Phase::Running;
        }
    }

    /// One frame of simulation. `heading` is the player's desired direction
    /// of travel; anything longer than a unit vector is shortened.
    pub fn tick(&mut self, heading: Vec2, delta: f32, rng: &mut impl Rng) -> TickReport {
        if self.phase != Phase::Running {
            return TickReport::default();
        }
        let delta = delta.clamp(0.0, self.config.max_delta);
        self.elapsed += delta;
        self.fog.creep(delta);

        self.player.position += heading.clamp_length_max(1.0) * self.player.speed * delta;
        let resolved = collision::resolve(self.player.position, &self.grid, &self.frame);
        self.player.position = resolved.position;
        self.player.cell = resolved.cell;

        let spawned = self.spawn_due(rng);

        let report = pursue(
            &mut self.zombies,
            self.player.position,
            self.player.cell,
            &self.grid,
            &self.frame,
            &self.config.pursuit,
            delta,
        );
        self.fog.update(report.min_distance);

        if report.caught {
            self.phase = Phase::Caught;
            self.spawner.halt();
            self.fog.close_in();
            info!(
                "player caught after {} by one of {} zombies",
                survival_label(self.elapsed),
                self.zombies.len()
            );
        }

        TickReport {
            spawned,
            min_distance: report.min_distance,
            caught: report.caught,
        }
    }

    fn spawn_due(&mut self, rng: &mut impl Rng) -> usize {
        let due = self.spawner.due(self.elapsed);
        let (width, height) = (self.maze.width(), self.maze.height());
        let mut spawned = 0;
        for _ in 0..due {
            let Some(room) = spawn_cell(width, height, self.start, rng) else {
                warn!("no room far enough from {:?} to spawn a zombie", self.start);
                break;
            };
            let finder = Finder::random(rng);
            debug!("zombie {} spawns in room {:?} using {}", self.zombies.len(), room, finder.name());
            self.zombies.push(Zombie::spawn(
                &self.frame,
                room,
                self.config.pursuit.zombie_speed,
                finder,
            ));
            spawned += 1;
        }
        if spawned > 0 {
            info!(
                "wave {} at {:.1}s: {} zombies roaming, next wave at {:.1}s",
                self.spawner.waves(),
                self.elapsed,
                self.zombies.len(),
                self.spawner.next_wave_at()
            );
        }
        spawned
    }
}

/// "Stayed alive 1 hours, 2 mins, 3 s", skipping leading zero units.
pub fn survival_label(elapsed: f32) -> String {
    let total = elapsed.max(0.0) as u64;
    let (hours, minutes, seconds) = (total / 3600, total / 60 % 60, total % 60);
    let mut label = String::from("Stayed alive");
    if hours > 0 {
        label.push_str(&format!(" {hours} hours,"));
    }
    if minutes > 0 {
        label.push_str(&format!(" {minutes} mins,"));
    }
    label.push_str(&format!(" {seconds} s"));
    label
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MazeParams;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn config() -> SessionConfig {
        SessionConfig {
            maze: MazeParams {
                width: 8,
                height: 8,
                ..MazeParams::default()
            },
            ..SessionConfig::default()
        }
    }

    #[test]
    fn starts_with_first_wave_and_player_in_start_room() {
        let mut rng = StdRng::seed_from_u64(42);
        let session = SessionState::new(config(), &mut rng).unwrap();
        assert_eq!(session.zombies().len(), 6);
        let (sx, sy) = session.start();
        assert_eq!(session.player().cell, Pos::new(2 * sx + 1, 2 * sy + 1));
        assert!(session.grid().is_open(session.player().cell));
        assert_eq!(session.phase(), Phase::Running);
    }

    #[test]
    fn zombies_spawn_away_from_player() {
        let mut rng = StdRng::seed_from_u64(8);
        let session = SessionState::new(config(), &mut rng).unwrap();
        let (sx, sy) = session.start();
        for zombie in session.zombies() {
            let room = ((zombie.cell.x - 1) / 2, (zombie.cell.z - 1) / 2);
            assert!(room.0.abs_diff(sx) > 1 && room.1.abs_diff(sy) > 1);
        }
    }

    #[test]
    fn same_seed_same_session() {
        let a = SessionState::new(config(), &mut StdRng::seed_from_u64(5)).unwrap();
        let b = SessionState::new(config(), &mut StdRng::seed_from_u64(5)).unwrap();
        assert_eq!(a.maze(), b.maze());
        assert_eq!(a.zombies(), b.zombies());
    }

    #[test]
    fn delta_is_clamped() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut session = SessionState::new(config(), &mut rng).unwrap();
        session.tick(Vec2::ZERO, 5.0, &mut rng);
        assert!((session.elapsed() - 0.2).abs() < 1e-6);
    }

    #[test]
    fn walking_into_a_wall_is_pushed_back() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut session = SessionState::new(config(), &mut rng).unwrap();
        for _ in 0..200 {
            session.tick(Vec2::new(0.0, -1.0), 0.2, &mut rng);
            if session.is_over() {
                break;
            }
            assert!(session.grid().is_open(session.player().cell));
            assert_eq!(
                session.frame().cell_of(session.player().position),
                session.player().cell
            );
        }
    }

    #[test]
    fn paused_session_stands_still_and_stops_spawning() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut session = SessionState::new(config(), &mut rng).unwrap();
        session.pause();
        let before = session.zombies().to_vec();
        let report = session.tick(Vec2::X, 0.1, &mut rng);
        assert_eq!(report, TickReport::default());
        assert_eq!(session.zombies(), &before[..]);
        assert_eq!(session.elapsed(), 0.0);

        session.resume();
        for _ in 0..100 {
            session.tick(Vec2::ZERO, 0.2, &mut rng);
        }
        assert_eq!(session.zombies().len(), 6);
    }

    #[test]
    fn capture_fires_once_and_ends_the_session() {
        let mut rng = StdRng::seed_from_u64(9);
        let mut session = SessionState::new(config(), &mut rng).unwrap();
        let player = session.player().position;
        session.zombies[0].position = player + Vec2::new(0.5, 0.0);
        session.zombies[0].cell = session.player().cell;

        let report = session.tick(Vec2::ZERO, 0.01, &mut rng);
        assert!(report.caught);
        assert!(session.is_over());
        assert_eq!(session.fog().density(), 0.2);

        let report = session.tick(Vec2::ZERO, 0.01, &mut rng);
        assert!(!report.caught);
        session.resume();
        assert!(session.is_over());
    }

    #[test]
    fn fog_thickens_as_zombies_close_in() {
        let mut rng = StdRng::seed_from_u64(6);
        let mut session = SessionState::new(config(), &mut rng).unwrap();
        session.tick(Vec2::ZERO, 0.01, &mut rng);
        let far = session.fog().density();

        let player = session.player().position;
        session.zombies[0].position = player + Vec2::new(3.0, 0.0);
        session.zombies[0].cell = session.player().cell;
        session.tick(Vec2::ZERO, 0.01, &mut rng);
        assert!(session.fog().density() > far);
        assert!((session.fog().density() - 0.25).abs() < 1e-6);
    }

    #[test]
    fn rejects_invalid_config() {
        let mut bad = config();
        bad.block_size = 0.0;
        assert!(matches!(
            SessionState::new(bad, &mut StdRng::seed_from_u64(0)),
            Err(SessionError::Config(_))
        ));
    }

    #[test]
    fn rejects_maze_without_spawn_room() {
        let mut narrow = config();
        narrow.maze.width = 2;
        assert!(matches!(
            SessionState::new(narrow, &mut StdRng::seed_from_u64(0)),
            Err(SessionError::NoSpawnCell { width: 2, height: 8 })
        ));
    }

    #[test]
    fn three_wide_maze_builds_for_every_seed() {
        let mut narrow = config();
        narrow.maze.width = 3;
        for seed in 0..60 {
            let session = SessionState::new(narrow.clone(), &mut StdRng::seed_from_u64(seed))
                .unwrap_or_else(|err| panic!("seed {seed}: {err}"));
            assert_ne!(session.start().0, 1);
            assert_eq!(session.zombies().len(), 6);
        }
    }

    #[test]
    fn survival_labels() {
        assert_eq!(survival_label(0.4), "Stayed alive 0 s");
        assert_eq!(survival_label(64.9), "Stayed alive 1 mins, 4 s");
        assert_eq!(survival_label(3_725.0), "Stayed alive 1 hours, 2 mins, 5 s");
    }
}
