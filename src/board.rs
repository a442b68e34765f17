use crate::error::GameError;
use crate::render::{CellRole, Renderer, Snapshot, Status, StatusSink};
use crate::snake::Position;
use crate::term::TermManager;
use crate::{Coords, GridInt, TermInt};

use tracing::error;

const SNAKE_BODY_CHAR: char = '█';
const APPLE_CHAR: char = 'O';
const GIFT_CHAR: char = '$';
const DEAD_SNAKE_CHAR: char = 'X';

/// Each grid cell is two columns wide so the board looks square.
const CELL_WIDTH: TermInt = 2;

/// Where the board sits on screen: a border, a score line above and a status
/// line below.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Layout {
    grid_size: TermInt,
    /// Top-left of the border box.
    origin: Coords,
}

impl Layout {
    /// Centers the board in a terminal of the given size.
    pub fn centered(grid_size: GridInt, term_size: Coords) -> Result<Self, GameError> {
        let (have_w, have_h) = term_size;
        let too_small = |need_w, need_h| GameError::TerminalTooSmall { need_w, need_h, have_w, have_h };

        let grid_size = TermInt::try_from(grid_size).map_err(|_| too_small(TermInt::MAX, TermInt::MAX))?;
        let (need_w, need_h) =
            Layout::required_size(grid_size).ok_or_else(|| too_small(TermInt::MAX, TermInt::MAX))?;

        if have_w < need_w || have_h < need_h {
            return Err(too_small(need_w, need_h));
        }

        // One row above the box for the score
        let origin = ((have_w - need_w) / 2, (have_h - need_h) / 2 + 1);
        Ok(Layout { grid_size, origin })
    }

    /// Terminal size needed for the board, or `None` if it can't be addressed.
    pub fn required_size(grid_size: TermInt) -> Option<Coords> {
        let width = grid_size.checked_mul(CELL_WIDTH)?.checked_add(2)?;
        let height = grid_size.checked_add(4)?;
        Some((width, height))
    }

    pub fn box_size(&self) -> Coords {
        (self.grid_size * CELL_WIDTH + 2, self.grid_size + 2)
    }

    /// Screen column/row of the left half of a grid cell.
    pub fn cell_origin(&self, pos: Position) -> Coords {
        (
            self.origin.0 + 1 + pos.x as TermInt * CELL_WIDTH,
            self.origin.1 + 1 + pos.y as TermInt,
        )
    }

    pub fn score_line(&self) -> Coords {
        (self.origin.0, self.origin.1 - 1)
    }

    pub fn status_line(&self) -> Coords {
        (self.origin.0, self.origin.1 + self.box_size().1)
    }
}

/// Terminal display for the engine. Draws only the cells that changed since
/// the previous frame.
pub struct TermBoard {
    term: TermManager,
    layout: Layout,
    drawn: Vec<(Position, char)>,
}

impl TermBoard {
    pub fn new(term: TermManager, grid_size: GridInt) -> Result<Self, GameError> {
        let layout = Layout::centered(grid_size, term.get_terminal_size())?;
        Ok(TermBoard { term, layout, drawn: vec![] })
    }

    pub fn setup(&mut self) -> Result<(), GameError> {
        self.term.setup()?;
        self.term.clear()?;
        let (w, h) = self.layout.box_size();
        self.term.draw_box(self.layout.origin, w, h)?;
        Ok(())
    }

    pub fn restore(&mut self) -> Result<(), GameError> {
        self.term.restore()?;
        Ok(())
    }

    fn draw(&mut self, snapshot: &Snapshot) -> crossterm::Result<()> {
        let mut frame: Vec<(Position, char)> = vec![];
        for cell in &snapshot.cells {
            let ch = match cell.role {
                CellRole::Head => snapshot.heading.head_char(),
                CellRole::Body => SNAKE_BODY_CHAR,
                CellRole::Apple => APPLE_CHAR,
                CellRole::Gift => GIFT_CHAR,
            };
            // Later cells paint over earlier ones
            frame.retain(|(pos, _)| *pos != cell.pos);
            frame.push((cell.pos, ch));
        }

        let stale: Vec<Position> = self
            .drawn
            .iter()
            .filter(|(pos, _)| !frame.iter().any(|(p, _)| p == pos))
            .map(|(pos, _)| *pos)
            .collect();
        for pos in stale {
            self.put_cell(pos, ' ')?;
        }

        for &(pos, ch) in &frame {
            if !self.drawn.contains(&(pos, ch)) {
                self.put_cell(pos, ch)?;
            }
        }
        self.drawn = frame;

        let (w, _) = self.layout.box_size();
        self.term.print_line(self.layout.score_line(), w, &format!("Score: {}", snapshot.score))?;
        self.term.flush()
    }

    fn show_status(&mut self, status: &Status) -> crossterm::Result<()> {
        let (w, _) = self.layout.box_size();
        self.term.print_line(self.layout.status_line(), w, &status.to_string())?;

        match status {
            Status::Idle | Status::Running => self.term.hide_message()?,
            Status::Paused => {
                self.term.show_message(&["Paused", "Press SPACE to resume", "or CTRL+C to quit"])?
            }
            Status::GameOver { .. } => {
                self.mark_dead()?;
                let detail = status.detail().unwrap_or_default();
                self.term.show_message(&[
                    "Game Over!",
                    detail.as_str(),
                    "",
                    "Press R to play again,",
                    "E to end the game.",
                ])?;
            }
            Status::Ended => {
                self.term.show_message(&["Game ended.", "", "Press any key to quit."])?
            }
        }

        self.term.flush()
    }

    fn mark_dead(&mut self) -> crossterm::Result<()> {
        let mut dead = vec![];
        for (pos, ch) in self.drawn.iter_mut() {
            if *ch == SNAKE_BODY_CHAR || is_head_char(*ch) {
                *ch = DEAD_SNAKE_CHAR;
                dead.push(*pos);
            }
        }
        for pos in dead {
            self.put_cell(pos, DEAD_SNAKE_CHAR)?;
        }
        Ok(())
    }

    fn put_cell(&mut self, pos: Position, ch: char) -> crossterm::Result<()> {
        let (x, y) = self.layout.cell_origin(pos);
        self.term.print_at((x, y), ch)?;
        // Fill the second column so body segments join up
        let fill = if ch == SNAKE_BODY_CHAR || ch == DEAD_SNAKE_CHAR {ch} else {' '};
        self.term.print_at((x + 1, y), fill)
    }
}

fn is_head_char(ch: char) -> bool {
    matches!(ch, '@' | '^' | 'v' | '<' | '>')
}

impl Renderer for TermBoard {
    fn render(&mut self, snapshot: &Snapshot) {
        if let Err(e) = self.draw(snapshot) {
            error!("failed to draw frame: {e}");
        }
    }
}

impl StatusSink for TermBoard {
    fn status(&mut self, status: &Status) {
        if let Err(e) = self.show_status(status) {
            error!("failed to show status: {e}");
        }
    }
}
