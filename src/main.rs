use std::fs::{self, File};
use std::io::{self, Stdout};
use std::path::PathBuf;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::cursor::{Hide, Show};
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::ExecutableCommand;
use glam::Vec2;
use log::info;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use zombie_maze::session::{Phase, SessionState};
use zombie_maze::SessionConfig;

mod tui;

use crate::tui::{render, render_caught, Choice, Renderer};

const DEFAULT_RENDER_FPS: u64 = 120;
const INPUT_HOLD_MS: u64 = 160;

#[derive(Parser, Debug)]
#[command(author, version, about = "Outrun the zombies in a procedurally generated city maze")]
struct Args {
    /// JSON session config; flags below override its fields
    #[arg(short, long, env = "ZOMBIE_MAZE_CONFIG")]
    config: Option<PathBuf>,

    /// Maze width in rooms
    #[arg(short = 'W', long, env = "ZOMBIE_MAZE_WIDTH")]
    width: Option<usize>,

    /// Maze height in rooms
    #[arg(short = 'H', long, env = "ZOMBIE_MAZE_HEIGHT")]
    height: Option<usize>,

    /// Chance of carving an extra loop into the maze
    #[arg(long, env = "ZOMBIE_MAZE_BRAID")]
    braid: Option<f64>,

    /// Player speed in world units per second
    #[arg(long, env = "ZOMBIE_MAZE_PLAYER_SPEED")]
    player_speed: Option<f32>,

    /// Zombie base speed in world units per second
    #[arg(long, env = "ZOMBIE_MAZE_ZOMBIE_SPEED")]
    zombie_speed: Option<f32>,

    /// Seed for a reproducible city and horde
    #[arg(short, long, env = "ZOMBIE_MAZE_SEED")]
    seed: Option<u64>,

    /// Frames per second
    #[arg(long, env = "ZOMBIE_MAZE_FPS", default_value_t = DEFAULT_RENDER_FPS)]
    fps: u64,

    /// Write logs here; the terminal itself is taken by the game
    #[arg(long, env = "ZOMBIE_MAZE_LOG_FILE")]
    log_file: Option<PathBuf>,
}

impl Args {
    fn session_config(&self) -> Result<SessionConfig> {
        let mut config = match &self.config {
            Some(path) => {
                let text = fs::read_to_string(path)
                    .with_context(|| format!("reading config {}", path.display()))?;
                serde_json::from_str(&text)
                    .with_context(|| format!("parsing config {}", path.display()))?
            }
            None => SessionConfig::default(),
        };
        if let Some(width) = self.width {
            config.maze.width = width;
        }
        if let Some(height) = self.height {
            config.maze.height = height;
        }
        if let Some(braid) = self.braid {
            config.maze.braid_probability = braid;
        }
        if let Some(speed) = self.player_speed {
            config.pursuit.player_speed = speed;
        }
        if let Some(speed) = self.zombie_speed {
            config.pursuit.zombie_speed = speed;
        }
        config.validate().context("invalid session config")?;
        Ok(config)
    }
}

fn init_logging(log_file: Option<&PathBuf>) -> Result<()> {
    let default_filter = if log_file.is_some() { "info" } else { "off" };
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter));
    if let Some(path) = log_file {
        let file = File::create(path)
            .with_context(|| format!("creating log file {}", path.display()))?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }
    builder.init();
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.log_file.as_ref())?;
    let config = args.session_config()?;
    let seed = args.seed.unwrap_or_else(|| rand::thread_rng().gen());
    info!("seed {seed}");

    let mut stdout = io::stdout();
    terminal::enable_raw_mode()?;
    stdout.execute(EnterAlternateScreen)?;
    stdout.execute(Hide)?;

    let result = run(&mut stdout, config, seed, args.fps);

    stdout.execute(Show)?;
    stdout.execute(LeaveAlternateScreen)?;
    terminal::disable_raw_mode()?;
    result
}

fn run(stdout: &mut Stdout, config: SessionConfig, seed: u64, fps: u64) -> Result<()> {
    let mut rng = StdRng::seed_from_u64(seed);
    let frame_time = Duration::from_micros(1_000_000 / fps.max(1));

    loop {
        let mut session =
            SessionState::new(config.clone(), &mut rng).context("could not build a city")?;
        let mut renderer = Renderer::new(session.grid().width(), session.grid().height());
        let mut last_seen: [Option<Instant>; 4] = [None; 4];
        let mut last_frame = Instant::now();

        loop {
            let frame_start = Instant::now();
            while event::poll(Duration::from_millis(0))? {
                if let Event::Key(key) = event::read()? {
                    if !matches!(key.kind, KeyEventKind::Press | KeyEventKind::Repeat) {
                        continue;
                    }
                    match key.code {
                        KeyCode::Char('q') => return Ok(()),
                        KeyCode::Char('p') if key.kind == KeyEventKind::Press => {
                            match session.phase() {
                                Phase::Running => session.pause(),
                                Phase::Paused => session.resume(),
                                Phase::Caught => {}
                            }
                        }
                        KeyCode::Char('w') | KeyCode::Char('k') | KeyCode::Up => {
                            last_seen[0] = Some(Instant::now());
                        }
                        KeyCode::Char('s') | KeyCode::Char('j') | KeyCode::Down => {
                            last_seen[1] = Some(Instant::now());
                        }
                        KeyCode::Char('a') | KeyCode::Char('h') | KeyCode::Left => {
                            last_seen[2] = Some(Instant::now());
                        }
                        KeyCode::Char('d') | KeyCode::Char('l') | KeyCode::Right => {
                            last_seen[3] = Some(Instant::now());
                        }
                        _ => {}
                    }
                }
            }

            let delta = last_frame.elapsed().as_secs_f32();
            last_frame = Instant::now();
            session.tick(held_heading(&last_seen), delta, &mut rng);
            render(stdout, &session, &mut renderer)?;

            if session.is_over() {
                match render_caught(stdout, &session)? {
                    Choice::Restart => break,
                    Choice::Quit => return Ok(()),
                }
            }

            let elapsed = frame_start.elapsed();
            if elapsed < frame_time {
                thread::sleep(frame_time - elapsed);
            }
        }
    }
}

/// Unit heading from every direction key seen within the hold window.
/// Screen up is world -z.
fn held_heading(last_seen: &[Option<Instant>; 4]) -> Vec2 {
    let now = Instant::now();
    let axes = [
        Vec2::new(0.0, -1.0),
        Vec2::new(0.0, 1.0),
        Vec2::new(-1.0, 0.0),
        Vec2::new(1.0, 0.0),
    ];
    last_seen
        .iter()
        .zip(axes)
        .filter(|(seen, _)| {
            seen.map_or(false, |t| {
                now.duration_since(t) <= Duration::from_millis(INPUT_HOLD_MS)
            })
        })
        .map(|(_, axis)| axis)
        .sum::<Vec2>()
        .normalize_or_zero()
}
