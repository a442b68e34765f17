use std::collections::HashSet;

use gift_snake::{Direction, GameConfig, GameEngine, GameInput, Phase, Recorder};
use rand::{rngs::StdRng, Rng, SeedableRng};

fn check(engine: &GameEngine<Recorder>) {
    let state = engine.state();
    let grid = engine.config().grid_size;

    let mut seen = HashSet::new();
    for cell in state.snake.body() {
        assert!(cell.in_bounds(grid), "{cell} is off the grid");
        assert!(seen.insert(*cell), "{cell} appears twice in the snake");
    }

    assert!(!state.snake.contains(&state.apple), "apple under the snake");
    if let Some(gift) = state.gift {
        assert!(!state.snake.contains(&gift), "gift under the snake");
        assert_ne!(gift, state.apple, "gift on the apple");
    }
    assert!(state.tick_interval_ms > 0.0);
}

fn random_input(rng: &mut StdRng) -> GameInput {
    match rng.gen_range(0..10) {
        0 => GameInput::TogglePause,
        1 => GameInput::Reset,
        2 => GameInput::End,
        3 | 4 => GameInput::Direction(Direction::Up),
        5 | 6 => GameInput::Direction(Direction::Down),
        7 => GameInput::Direction(Direction::Left),
        _ => GameInput::Direction(Direction::Right),
    }
}

#[test]
fn random_play_keeps_the_board_consistent() {
    for seed in 0..20 {
        let config = GameConfig { grid_size: 12, seed: Some(seed), ..Default::default() };
        let mut engine = GameEngine::new(config, Recorder::default()).unwrap();
        let mut rng = StdRng::seed_from_u64(seed + 1000);

        let mut last_score = 0;
        let mut last_apples = 0;
        let mut last_interval = engine.state().tick_interval_ms;

        for _ in 0..2000 {
            if rng.gen_bool(0.3) {
                engine.handle_input(random_input(&mut rng));
            }
            // Sometimes drop apples right in front of the snake to exercise growth and gifts
            if engine.phase() == Phase::Running && rng.gen_bool(0.2) {
                let ahead = engine.state().snake.head().offset(engine.state().direction);
                let _ = engine.place_apple(ahead);
            }
            engine.advance(rng.gen_range(0.0..400.0));
            check(&engine);

            let state = engine.state();
            if state.phase == Phase::Idle && state.score == 0 && state.apples_eaten == 0 {
                // A reset starts the counters over.
                last_score = 0;
                last_apples = 0;
                last_interval = state.tick_interval_ms;
                continue;
            }

            assert!(state.score >= last_score, "score went down");
            if state.apples_eaten > last_apples {
                assert!(state.tick_interval_ms < last_interval, "no speed-up after an apple");
            } else {
                assert_eq!(state.tick_interval_ms, last_interval);
            }
            last_score = state.score;
            last_apples = state.apples_eaten;
            last_interval = state.tick_interval_ms;
        }
    }
}

#[test]
fn reversal_never_changes_direction() {
    let config = GameConfig { seed: Some(5), ..Default::default() };
    let mut engine = GameEngine::new(config, Recorder::default()).unwrap();

    for dir in [Direction::Up, Direction::Left, Direction::Down, Direction::Right] {
        assert!(engine.set_direction(dir));
        assert!(!engine.set_direction(dir.opposite()));
        assert_eq!(engine.state().direction, dir);
        engine.tick();
        if engine.phase() != Phase::Running {
            break;
        }
    }
}
