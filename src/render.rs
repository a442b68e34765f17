use std::fmt;

use crate::snake::{Direction, Position};
use crate::GridInt;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CellRole {
    Head,
    Body,
    Apple,
    Gift,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Cell {
    pub pos: Position,
    pub role: CellRole,
}

/// Everything a display needs to draw one frame. Cells are listed in paint
/// order: food first, then the body, the head last.
#[derive(Clone, Debug, PartialEq)]
pub struct Snapshot {
    pub grid_size: GridInt,
    pub score: u32,
    pub heading: Direction,
    pub cells: Vec<Cell>,
}

impl Snapshot {
    pub fn role_at(&self, pos: Position) -> Option<CellRole> {
        self.cells.iter().rev().find(|c| c.pos == pos).map(|c| c.role)
    }

    pub fn positions_of(&self, role: CellRole) -> impl Iterator<Item = Position> + '_ {
        self.cells.iter().filter(move |c| c.role == role).map(|c| c.pos)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Status {
    Idle,
    Running,
    Paused,
    GameOver { score: u32 },
    Ended,
}

impl Status {
    /// Extra lines shown under the headline, if any.
    pub fn detail(&self) -> Option<String> {
        match self {
            Status::GameOver { score } => Some(format!("Your score: {score}")),
            _ => None,
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Status::Idle => "Press arrow or W/A/S/D to start",
            Status::Running => "Press SPACE to stop",
            Status::Paused => "Paused (Press SPACE to resume)",
            Status::GameOver { .. } => "Game Over!",
            Status::Ended => "Game ended. Restart to play again.",
        };
        f.write_str(s)
    }
}

pub trait Renderer {
    fn render(&mut self, snapshot: &Snapshot);
}

pub trait StatusSink {
    fn status(&mut self, status: &Status);
}

/// A display that both draws the board and shows status lines.
pub trait Frontend: Renderer + StatusSink {}

impl<T: Renderer + StatusSink> Frontend for T {}

/// Keeps everything it is given. Handy for tests and headless runs.
#[derive(Debug, Default)]
pub struct Recorder {
    pub frames: Vec<Snapshot>,
    pub statuses: Vec<Status>,
}

impl Recorder {
    pub fn last_frame(&self) -> Option<&Snapshot> {
        self.frames.last()
    }

    pub fn last_status(&self) -> Option<&Status> {
        self.statuses.last()
    }
}

impl Renderer for Recorder {
    fn render(&mut self, snapshot: &Snapshot) {
        self.frames.push(snapshot.clone());
    }
}

impl StatusSink for Recorder {
    fn status(&mut self, status: &Status) {
        self.statuses.push(status.clone());
    }
}
