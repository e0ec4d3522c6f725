//! Procedural city-block maze with pathfinding zombies.
//!
//! [`maze`] grows a braided maze, [`grid`] turns it into city blocks and
//! streets, and [`session`] runs the frame tick: player movement, wall
//! [`collision`], zombie [`pursuit`] and the threat [`fog`].

pub mod collision;
pub mod config;
pub mod error;
pub mod fog;
pub mod grid;
pub mod maze;
pub mod pathfinder;
pub mod pursuit;
pub mod session;
pub mod spawn;
pub mod world;

pub use config::SessionConfig;
pub use error::{MazeError, SessionError};
pub use grid::{OccupancyGrid, Pos};
pub use maze::{generate_maze, Maze};
pub use pathfinder::{Finder, PathFinder};
pub use session::{Phase, SessionState};
