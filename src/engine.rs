use rand::{rngs::StdRng, SeedableRng};
use tracing::{debug, info, trace};

use crate::config::GameConfig;
use crate::error::GameError;
use crate::food::random_empty_cell;
use crate::render::{Cell, CellRole, Frontend, Snapshot, Status};
use crate::scheduler::{Scheduler, TaskHandle, TaskKind};
use crate::snake::{Direction, MoveResult, Position, Snake};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Running,
    Paused,
    GameOver,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum GameInput {
    Direction(Direction),
    TogglePause,
    Reset,
    End,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// The engine was not running.
    Ignored,
    Moved,
    AteApple,
    AteGift,
    Crashed,
}

#[derive(Clone, Debug)]
pub struct GameState {
    pub snake: Snake,
    pub direction: Direction,
    pub apple: Position,
    pub gift: Option<Position>,
    pub score: u32,
    pub tick_interval_ms: f64,
    pub apples_eaten: u32,
    pub phase: Phase,
    /// Set by the end command once the game is over.
    pub ended: bool,
}

impl GameState {
    pub fn paused(&self) -> bool {
        self.phase != Phase::Running
    }

    pub fn game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }
}

/// Owns one game: its state, its timers and the display it reports to.
///
/// Time only moves through [`GameEngine::advance`]; the periodic tick and the
/// gift expiry are tasks on an internal [`Scheduler`]. Every timer change is
/// cancel-then-start, so a superseded timer can never touch the state.
pub struct GameEngine<U: Frontend> {
    config: GameConfig,
    state: GameState,
    scheduler: Scheduler,
    tick_task: Option<TaskHandle>,
    gift_task: Option<TaskHandle>,
    rng: StdRng,
    ui: U,
}

impl<U: Frontend> GameEngine<U> {
    pub fn new(config: GameConfig, ui: U) -> Result<Self, GameError> {
        config.validate()?;

        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let state = fresh_state(&config, &mut rng);

        let mut engine = GameEngine {
            config,
            state,
            scheduler: Scheduler::new(),
            tick_task: None,
            gift_task: None,
            rng,
            ui,
        };
        engine.reset();
        Ok(engine)
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    pub fn ui(&self) -> &U {
        &self.ui
    }

    pub fn ui_mut(&mut self) -> &mut U {
        &mut self.ui
    }

    pub fn now_ms(&self) -> f64 {
        self.scheduler.now_ms()
    }

    pub fn is_ticking(&self) -> bool {
        self.tick_task.as_ref().map_or(false, |h| self.scheduler.is_pending(h))
    }

    pub fn gift_timer_pending(&self) -> bool {
        self.gift_task.as_ref().map_or(false, |h| self.scheduler.is_pending(h))
    }

    /// When the next scheduled task (tick or gift expiry) is due.
    pub fn next_due_ms(&self) -> Option<f64> {
        self.scheduler.next_due()
    }

    pub fn reset(&mut self) {
        self.stop_ticking();
        self.cancel_gift_timer();
        self.state = fresh_state(&self.config, &mut self.rng);

        info!(apple = %self.state.apple, "game reset");
        self.render();
        self.ui.status(&Status::Idle);
    }

    /// Returns whether the input was accepted.
    pub fn handle_input(&mut self, input: GameInput) -> bool {
        match input {
            GameInput::Direction(direction) => self.set_direction(direction),
            GameInput::TogglePause => self.toggle_pause(),
            GameInput::Reset if self.state.game_over() => {
                self.reset();
                true
            }
            GameInput::Reset => false,
            GameInput::End => self.end(),
        }
    }

    /// Only an idle game starts moving on a direction; a paused one stays paused.
    pub fn set_direction(&mut self, direction: Direction) -> bool {
        if direction == Direction::Still || self.state.game_over() {
            return false;
        }
        // Turning straight back would run the head into the neck.
        if self.state.snake.len() > 1 && direction == self.state.direction.opposite() {
            return false;
        }

        self.state.direction = direction;

        if self.state.phase == Phase::Idle {
            self.state.phase = Phase::Running;
            self.start_ticking();
            info!(?direction, "game started");
            self.ui.status(&Status::Running);
        }

        true
    }

    pub fn toggle_pause(&mut self) -> bool {
        match self.state.phase {
            Phase::Running => {
                self.state.phase = Phase::Paused;
                self.stop_ticking();
                info!("paused");
                self.ui.status(&Status::Paused);
            }
            Phase::Paused => {
                self.state.phase = Phase::Running;
                self.start_ticking();
                info!("resumed");
                self.ui.status(&Status::Running);
            }
            Phase::Idle | Phase::GameOver => return false,
        }

        true
    }

    pub fn end(&mut self) -> bool {
        if !self.state.game_over() {
            return false;
        }

        self.state.ended = true;
        info!(score = self.state.score, "game ended");
        self.ui.status(&Status::Ended);
        true
    }

    /// Moves simulated time forward, firing every task that comes due on the
    /// way, earliest first.
    pub fn advance(&mut self, elapsed_ms: f64) {
        let until = self.scheduler.now_ms() + elapsed_ms.max(0.0);

        while let Some(kind) = self.scheduler.pop_due(until) {
            match kind {
                TaskKind::Tick => {
                    self.tick();
                }
                TaskKind::GiftExpiry => self.expire_gift(),
            }
        }

        self.scheduler.advance_to(until);
    }

    pub fn tick(&mut self) -> TickOutcome {
        if self.state.phase != Phase::Running {
            return TickOutcome::Ignored;
        }

        let new_head = match self.state.snake.advance_head(self.state.direction, self.config.grid_size) {
            MoveResult::Crashed { at } => {
                self.game_over(at);
                return TickOutcome::Crashed;
            }
            MoveResult::Moved { new_head } => new_head,
        };
        trace!(head = %new_head, "tick");

        let outcome = if new_head == self.state.apple {
            self.eat_apple();
            TickOutcome::AteApple
        } else if self.state.gift == Some(new_head) {
            self.eat_gift();
            TickOutcome::AteGift
        } else {
            self.state.snake.drop_tail();
            TickOutcome::Moved
        };

        self.render();
        outcome
    }

    pub fn spawn_gift(&mut self) {
        let pos = random_empty_cell(
            &mut self.rng,
            self.config.grid_size,
            &self.state.snake,
            Some(self.state.apple),
        );
        self.put_gift(pos);
    }

    /// Moves the apple to a chosen free cell.
    pub fn place_apple(&mut self, pos: Position) -> Result<(), GameError> {
        self.check_free(pos, self.state.gift)?;
        self.state.apple = pos;
        self.render();
        Ok(())
    }

    /// Puts a gift on a chosen free cell, with the usual expiry.
    pub fn place_gift(&mut self, pos: Position) -> Result<(), GameError> {
        self.check_free(pos, Some(self.state.apple))?;
        self.put_gift(pos);
        Ok(())
    }

    pub fn snapshot(&self) -> Snapshot {
        let mut cells = vec![Cell { pos: self.state.apple, role: CellRole::Apple }];

        if let Some(pos) = self.state.gift {
            cells.push(Cell { pos, role: CellRole::Gift });
        }

        cells.extend(self.state.snake.body().skip(1).map(|&pos| Cell { pos, role: CellRole::Body }));
        cells.push(Cell { pos: self.state.snake.head(), role: CellRole::Head });

        Snapshot {
            grid_size: self.config.grid_size,
            score: self.state.score,
            heading: self.state.direction,
            cells,
        }
    }

    ///////////////////////////////////////////////////////////////////////////

    fn eat_apple(&mut self) {
        let state = &mut self.state;
        state.score += self.config.apple_score;
        state.apples_eaten += 1;
        state.tick_interval_ms = (state.tick_interval_ms * self.config.speedup_factor).max(f64::MIN_POSITIVE);
        state.apple = random_empty_cell(&mut self.rng, self.config.grid_size, &state.snake, state.gift);

        debug!(
            score = state.score,
            apples = state.apples_eaten,
            interval_ms = state.tick_interval_ms,
            "apple eaten"
        );

        // New cadence applies from the next tick on.
        self.start_ticking();

        if self.state.apples_eaten % self.config.gift_every == 0 {
            self.spawn_gift();
        }
    }

    fn eat_gift(&mut self) {
        self.state.score += self.config.gift_score;
        self.state.gift = None;
        self.cancel_gift_timer();
        debug!(score = self.state.score, "gift eaten");
    }

    fn put_gift(&mut self, pos: Position) {
        self.cancel_gift_timer();
        self.state.gift = Some(pos);
        self.gift_task = Some(self.scheduler.start_once(TaskKind::GiftExpiry, self.config.gift_lifetime_ms));
        debug!(gift = %pos, "gift spawned");
        self.render();
    }

    fn expire_gift(&mut self) {
        // The one-shot is gone from the scheduler once it fires.
        self.gift_task = None;
        if self.state.gift.take().is_some() {
            debug!("gift expired");
            self.render();
        }
    }

    fn game_over(&mut self, crash_at: Position) {
        self.state.phase = Phase::GameOver;
        self.stop_ticking();
        self.cancel_gift_timer();

        info!(score = self.state.score, at = %crash_at, "game over");
        self.ui.status(&Status::GameOver { score: self.state.score });
    }

    fn start_ticking(&mut self) {
        self.stop_ticking();
        self.tick_task = Some(self.scheduler.start_repeating(TaskKind::Tick, self.state.tick_interval_ms));
    }

    fn stop_ticking(&mut self) {
        if let Some(handle) = self.tick_task.take() {
            self.scheduler.cancel(handle);
        }
    }

    fn cancel_gift_timer(&mut self) {
        if let Some(handle) = self.gift_task.take() {
            self.scheduler.cancel(handle);
        }
    }

    fn check_free(&self, pos: Position, other: Option<Position>) -> Result<(), GameError> {
        if !pos.in_bounds(self.config.grid_size) {
            return Err(GameError::OutOfBounds { pos, grid_size: self.config.grid_size });
        }
        if self.state.snake.contains(&pos) || other == Some(pos) {
            return Err(GameError::Occupied { pos });
        }
        Ok(())
    }

    fn render(&mut self) {
        let snapshot = self.snapshot();
        self.ui.render(&snapshot);
    }
}

fn fresh_state(config: &GameConfig, rng: &mut StdRng) -> GameState {
    let snake = Snake::seed(config.grid_size);
    let apple = random_empty_cell(rng, config.grid_size, &snake, None);

    GameState {
        snake,
        direction: Direction::Still,
        apple,
        gift: None,
        score: 0,
        tick_interval_ms: config.base_interval_ms,
        apples_eaten: 0,
        phase: Phase::Idle,
        ended: false,
    }
}
