use gift_snake::{
    CellRole, Direction::*, GameConfig, GameEngine, GameInput, Phase, Position, Recorder, Status, TickOutcome,
};

fn engine() -> GameEngine<Recorder> {
    let config = GameConfig { seed: Some(2024), ..Default::default() };
    GameEngine::new(config, Recorder::default()).unwrap()
}

fn cells(engine: &GameEngine<Recorder>) -> Vec<Position> {
    engine.state().snake.body().copied().collect()
}

#[test]
fn first_direction_starts_the_game() {
    let mut engine = engine();
    assert_eq!(cells(&engine), vec![Position::new(10, 10), Position::new(9, 10)]);
    assert_eq!(engine.state().direction, Still);

    assert!(engine.handle_input(GameInput::Direction(Right)));
    assert_eq!(engine.state().direction, Right);
    assert_eq!(engine.phase(), Phase::Running);
    assert!(engine.is_ticking());
    assert_eq!(engine.ui().last_status(), Some(&Status::Running));
}

#[test]
fn apple_grows_scores_and_speeds_up() {
    let mut engine = engine();
    engine.place_apple(Position::new(11, 10)).unwrap();
    engine.set_direction(Right);

    // First tick is due one base interval after starting.
    engine.advance(249.0);
    assert_eq!(engine.state().score, 0);
    engine.advance(1.0);

    let state = engine.state();
    assert_eq!(state.score, 5);
    assert_eq!(state.apples_eaten, 1);
    assert_eq!(state.snake.len(), 3);
    assert_eq!(state.snake.head(), Position::new(11, 10));
    assert_ne!(state.apple, Position::new(11, 10));
    assert!(!state.snake.contains(&state.apple));
    assert_eq!(state.tick_interval_ms, 237.5);

    // The faster cadence applies from the tick that ate the apple.
    assert_eq!(engine.next_due_ms(), Some(487.5));
    assert_eq!(engine.ui().last_frame().map(|f| f.score), Some(5));
}

#[test]
fn third_apple_spawns_a_gift_that_expires() {
    let mut engine = engine();
    engine.set_direction(Right);

    for x in 11..=13 {
        engine.place_apple(Position::new(x, 10)).unwrap();
        assert_eq!(engine.tick(), TickOutcome::AteApple);
        if x < 13 {
            assert_eq!(engine.state().gift, None);
        }
    }

    let state = engine.state();
    assert_eq!(state.apples_eaten, 3);
    let gift = state.gift.expect("a gift after the third apple");
    assert!(!state.snake.contains(&gift));
    assert_ne!(gift, state.apple);
    assert!(engine.gift_timer_pending());

    // The gift clock keeps running while paused.
    assert!(engine.toggle_pause());
    engine.advance(4999.0);
    assert_eq!(engine.state().gift, Some(gift));
    engine.advance(1.0);
    assert_eq!(engine.state().gift, None);
    assert!(!engine.gift_timer_pending());
    let frame = engine.ui().last_frame().unwrap();
    assert!(frame.positions_of(CellRole::Gift).next().is_none());
}

#[test]
fn leaving_the_grid_ends_the_game() {
    let mut engine = engine();
    engine.place_apple(Position::new(11, 10)).unwrap();
    engine.set_direction(Right);
    assert_eq!(engine.tick(), TickOutcome::AteApple);
    engine.place_apple(Position::new(0, 0)).unwrap();

    let mut ticks = 0;
    while engine.phase() == Phase::Running {
        engine.advance(100.0);
        ticks += 1;
        assert!(ticks < 1000, "snake never hit the wall");
    }

    assert_eq!(engine.phase(), Phase::GameOver);
    assert_eq!(engine.state().snake.head(), Position::new(19, 10));
    assert!(!engine.is_ticking());
    assert_eq!(engine.ui().last_status(), Some(&Status::GameOver { score: 5 }));

    // Nothing moves any more.
    let before = cells(&engine);
    engine.advance(10_000.0);
    assert_eq!(cells(&engine), before);
}

#[test]
fn eating_the_gift() {
    let mut engine = engine();
    engine.place_apple(Position::new(0, 0)).unwrap();
    engine.place_gift(Position::new(11, 10)).unwrap();
    assert!(engine.gift_timer_pending());

    engine.set_direction(Right);
    assert_eq!(engine.tick(), TickOutcome::AteGift);

    let state = engine.state();
    assert_eq!(state.score, 20);
    assert_eq!(state.gift, None);
    assert_eq!(state.snake.len(), 3);
    assert!(!engine.gift_timer_pending());
}

#[test]
fn game_over_cancels_the_gift_timer() {
    let mut engine = engine();
    engine.place_apple(Position::new(0, 0)).unwrap();
    engine.place_gift(Position::new(5, 5)).unwrap();

    engine.set_direction(Up);
    engine.set_direction(Left);
    engine.set_direction(Down);
    assert_eq!(engine.state().direction, Down);

    while engine.phase() == Phase::Running {
        engine.tick();
    }

    assert_eq!(engine.phase(), Phase::GameOver);
    assert!(!engine.gift_timer_pending());
    assert_eq!(engine.next_due_ms(), None);
    assert_eq!(engine.state().gift, Some(Position::new(5, 5)));
}

#[test]
fn new_gift_replaces_the_old_expiry() {
    let mut engine = engine();
    engine.place_apple(Position::new(0, 0)).unwrap();
    engine.place_gift(Position::new(5, 5)).unwrap();

    engine.advance(3000.0);
    engine.spawn_gift();
    assert!(engine.state().gift.is_some());

    engine.advance(2500.0);
    assert!(engine.state().gift.is_some(), "old expiry must not fire");
    engine.advance(2500.0);
    assert_eq!(engine.state().gift, None);
}

#[test]
fn reset_restores_the_seed_state() {
    let mut engine = engine();
    engine.place_apple(Position::new(11, 10)).unwrap();
    engine.set_direction(Right);
    engine.tick();
    engine.place_apple(Position::new(0, 0)).unwrap();
    engine.place_gift(Position::new(3, 3)).unwrap();

    engine.set_direction(Up);
    while engine.phase() == Phase::Running {
        engine.tick();
    }
    assert!(engine.handle_input(GameInput::Reset));

    let state = engine.state();
    assert_eq!(state.phase, Phase::Idle);
    assert_eq!(cells(&engine), vec![Position::new(10, 10), Position::new(9, 10)]);
    assert_eq!(state.direction, Still);
    assert_eq!(state.score, 0);
    assert_eq!(state.apples_eaten, 0);
    assert_eq!(state.tick_interval_ms, 250.0);
    assert_eq!(state.gift, None);
    assert!(!state.snake.contains(&state.apple));
    assert_eq!(engine.next_due_ms(), None);
    assert_eq!(engine.ui().last_status(), Some(&Status::Idle));
}

#[test]
fn end_keeps_the_board() {
    let mut engine = engine();
    engine.set_direction(Left);
    assert_eq!(engine.tick(), TickOutcome::Crashed);
    let before = cells(&engine);

    assert!(engine.handle_input(GameInput::End));
    assert_eq!(engine.phase(), Phase::GameOver);
    assert_eq!(cells(&engine), before);
    assert_eq!(
        engine.ui().last_status().map(|s| s.to_string()).as_deref(),
        Some("Game ended. Restart to play again.")
    );
}
