use crate::snake::Position;

#[derive(thiserror::Error, Debug)]
pub enum GameError {
    #[error("Invalid configuration: {0}.")]
    InvalidConfig(String),
    #[error("Cell {pos} is outside the {grid_size}x{grid_size} grid.")]
    OutOfBounds { pos: Position, grid_size: crate::GridInt },
    #[error("Cell {pos} is already occupied.")]
    Occupied { pos: Position },
    #[error("The terminal is {have_w}x{have_h}, the board needs at least {need_w}x{need_h}.")]
    TerminalTooSmall { need_w: u16, need_h: u16, have_w: u16, have_h: u16 },
    #[error("Terminal error: {0}")]
    Terminal(#[from] crossterm::ErrorKind),
}
