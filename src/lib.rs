pub mod board;
pub mod config;
pub mod engine;
pub mod error;
pub mod food;
pub mod game;
pub mod input;
pub mod logging;
pub mod render;
pub mod scheduler;
pub mod snake;
pub mod term;

pub type TermInt = u16;
pub type Coords = (u16, u16);

/// Grid coordinates are signed so a step off the edge is representable.
pub type GridInt = i32;

pub use config::GameConfig;
pub use engine::{GameEngine, GameInput, GameState, Phase, TickOutcome};
pub use error::GameError;
pub use render::{Cell, CellRole, Frontend, Recorder, Renderer, Snapshot, Status, StatusSink};
pub use snake::{Direction, Position, Snake};
