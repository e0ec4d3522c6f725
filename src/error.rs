use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MazeError {
    #[error("maze dimensions must be positive, got {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },

    #[error("start cell ({x}, {y}) lies outside a {width}x{height} maze")]
    StartOutOfRange {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    },

    #[error("could not complete maze: {visited}/{total} cells visited after {attempts} attempts")]
    Stalled {
        attempts: usize,
        visited: usize,
        total: usize,
    },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    #[error("occupancy grid has no cells")]
    Empty,

    #[error("row {row} has {found} cells, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("{field} must be positive, got {value}")]
    NotPositive { field: &'static str, value: f64 },

    #[error("{field} must lie in [0, 1], got {value}")]
    NotAProbability { field: &'static str, value: f64 },

    #[error("{field} must be at least 1, got {value}")]
    BelowOne { field: &'static str, value: f64 },

    #[error("maze must be at least 1x1, got {width}x{height}")]
    MazeTooSmall { width: usize, height: usize },
}

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("maze generation failed: {0}")]
    Maze(#[from] MazeError),

    #[error("no cell is far enough from the player start to spawn a zombie in a {width}x{height} maze")]
    NoSpawnCell { width: usize, height: usize },
}

pub type Result<T> = std::result::Result<T, SessionError>;
