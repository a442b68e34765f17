use std::time::{Duration, Instant};

use tracing::info;

use crate::board::TermBoard;
use crate::config::GameConfig;
use crate::engine::GameEngine;
use crate::error::GameError;
use crate::input::{map_key, read_key_events_queue, KeyAction};
use crate::term::TermManager;

const INPUT_POLL_MS: u64 = 5;

/// Real-time driver: feeds key presses and wall-clock time into the engine.
pub struct SnakeGame {
    engine: GameEngine<TermBoard>,
}

impl SnakeGame {
    /// Takes over the terminal. Call [`SnakeGame::restore`] when done.
    pub fn new(config: GameConfig) -> Result<Self, GameError> {
        config.validate()?;

        let term = TermManager::new()?;
        let mut board = TermBoard::new(term, config.grid_size)?;
        board.setup()?;

        let engine = GameEngine::new(config, board)?;
        Ok(SnakeGame { engine })
    }

    /// Runs until CTRL+C, or until a key is pressed after the game was ended.
    pub fn play(&mut self) -> Result<(), GameError> {
        let mut last = Instant::now();

        loop {
            for key_ev in read_key_events_queue(Duration::from_millis(INPUT_POLL_MS))? {
                let action = map_key(&key_ev);

                if action == Some(KeyAction::Quit) || self.engine.state().ended {
                    info!(score = self.engine.state().score, "quitting");
                    return Ok(());
                }
                if let Some(KeyAction::Game(input)) = action {
                    self.engine.handle_input(input);
                }
            }

            let now = Instant::now();
            let elapsed = now.duration_since(last);
            last = now;
            self.engine.advance(elapsed.as_secs_f64() * 1000.0);
        }
    }

    pub fn restore(&mut self) -> Result<(), GameError> {
        self.engine.ui_mut().restore()
    }
}
