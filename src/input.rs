use std::time::Duration;

use crossterm::event::{poll, read, Event, KeyCode, KeyEvent, KeyModifiers};

use crate::engine::GameInput;
use crate::snake::Direction::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum KeyAction {
    Game(GameInput),
    Quit,
}

/// Arrows or WASD steer, space pauses, R retries, E ends, CTRL+C quits.
/// Anything else maps to nothing.
pub fn map_key(ev: &KeyEvent) -> Option<KeyAction> {
    if is_ctrl_c(ev) {
        return Some(KeyAction::Quit);
    }

    let input = match ev.code {
        KeyCode::Up => GameInput::Direction(Up),
        KeyCode::Down => GameInput::Direction(Down),
        KeyCode::Left => GameInput::Direction(Left),
        KeyCode::Right => GameInput::Direction(Right),
        KeyCode::Char(c) => match c.to_ascii_lowercase() {
            'w' => GameInput::Direction(Up),
            'a' => GameInput::Direction(Left),
            's' => GameInput::Direction(Down),
            'd' => GameInput::Direction(Right),
            ' ' => GameInput::TogglePause,
            'r' => GameInput::Reset,
            'e' => GameInput::End,
            _ => return None,
        },
        _ => return None,
    };

    Some(KeyAction::Game(input))
}

/// Drains every key event that arrives within `wait`.
pub fn read_key_events_queue(wait: Duration) -> crossterm::Result<Vec<KeyEvent>> {
    let mut events = vec![];
    let mut timeout = wait;

    while poll(timeout)? {
        if let Event::Key(ev) = read()? {
            events.push(ev);
        }
        // Only the first poll waits, the rest just empty the queue
        timeout = Duration::from_millis(0);
    }

    Ok(events)
}

pub fn is_ctrl_c(ev: &KeyEvent) -> bool {
    matches!(ev, KeyEvent { code: KeyCode::Char('c'), modifiers: KeyModifiers::CONTROL })
}
