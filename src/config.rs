use crate::error::GameError;
use crate::GridInt;

/// Smallest board that still fits the seed snake with room to turn.
pub const MIN_GRID_SIZE: GridInt = 4;

/// Largest board the terminal layout can address.
pub const MAX_GRID_SIZE: GridInt = 1000;

#[derive(Clone, Debug, PartialEq)]
pub struct GameConfig {
    pub grid_size: GridInt,
    pub base_interval_ms: f64,
    /// Interval multiplier applied on every apple.
    pub speedup_factor: f64,
    pub apple_score: u32,
    pub gift_score: u32,
    /// A gift spawns whenever the apple count hits a multiple of this.
    pub gift_every: u32,
    pub gift_lifetime_ms: f64,
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            grid_size: 20,
            base_interval_ms: 250.0,
            speedup_factor: 0.95,
            apple_score: 5,
            gift_score: 20,
            gift_every: 3,
            gift_lifetime_ms: 5000.0,
            seed: None,
        }
    }
}

impl GameConfig {
    pub fn validate(&self) -> Result<(), GameError> {
        let invalid = |msg: String| Err(GameError::InvalidConfig(msg));

        if self.grid_size < MIN_GRID_SIZE {
            return invalid(format!("grid size must be at least {MIN_GRID_SIZE}, got {}", self.grid_size));
        }
        if self.grid_size > MAX_GRID_SIZE {
            return invalid(format!("grid size must be at most {MAX_GRID_SIZE}, got {}", self.grid_size));
        }
        if !(self.base_interval_ms.is_finite() && self.base_interval_ms > 0.0) {
            return invalid(format!("tick interval must be positive, got {}", self.base_interval_ms));
        }
        if !(self.speedup_factor > 0.0 && self.speedup_factor < 1.0) {
            return invalid(format!("speed-up factor must be in (0, 1), got {}", self.speedup_factor));
        }
        if self.gift_every == 0 {
            return invalid("gift period must be at least one apple".to_string());
        }
        if !(self.gift_lifetime_ms.is_finite() && self.gift_lifetime_ms > 0.0) {
            return invalid(format!("gift lifetime must be positive, got {}", self.gift_lifetime_ms));
        }

        Ok(())
    }
}
