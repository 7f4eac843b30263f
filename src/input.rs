use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use serde::Serialize;

use crate::error::AppError;

/// Canonical movement directions for snake input.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Self; 4] = [Self::Up, Self::Down, Self::Left, Self::Right];

    /// Returns the opposite direction.
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// Unit step in cell coordinates; rows grow downwards.
    #[must_use]
    pub fn delta(self) -> (i32, i32) {
        match self {
            Self::Up => (0, -1),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
        }
    }
}

/// High-level input events consumed by the game loop.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameInput {
    Direction(Direction),
    PauseToggle,
    Quit,
}

/// Returns whether a direction change is legal (no immediate 180° turns).
#[must_use]
pub fn direction_change_is_valid(current: Direction, next: Direction) -> bool {
    next != current.opposite()
}

/// Translates terminal key events into [`GameInput`].
#[derive(Debug, Default)]
pub struct InputRouter;

impl InputRouter {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Waits up to `timeout` for the next meaningful input event.
    ///
    /// Blocks inside crossterm's poll, so calling this in a loop does not spin.
    pub fn poll_input(&mut self, timeout: Duration) -> io::Result<Option<GameInput>> {
        if !event::poll(timeout)? {
            return Ok(None);
        }

        match event::read()? {
            Event::Key(key) => Ok(self.route_key(key)),
            _ => Ok(None),
        }
    }

    /// Maps one key event; key releases and unbound keys yield `None`.
    #[must_use]
    pub fn route_key(&self, key: KeyEvent) -> Option<GameInput> {
        if key.kind == KeyEventKind::Release {
            return None;
        }

        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Some(GameInput::Quit);
        }

        match key.code {
            KeyCode::Up | KeyCode::Char('w' | 'W') => Some(GameInput::Direction(Direction::Up)),
            KeyCode::Down | KeyCode::Char('s' | 'S') => {
                Some(GameInput::Direction(Direction::Down))
            }
            KeyCode::Left | KeyCode::Char('a' | 'A') => {
                Some(GameInput::Direction(Direction::Left))
            }
            KeyCode::Right | KeyCode::Char('d' | 'D') => {
                Some(GameInput::Direction(Direction::Right))
            }
            KeyCode::Char(' ' | 'p' | 'P') => Some(GameInput::PauseToggle),
            KeyCode::Esc | KeyCode::Char('q' | 'Q') => Some(GameInput::Quit),
            _ => None,
        }
    }
}

/// Parses a headless input script into one optional input per tick.
///
/// Symbols: `u d l r` steer, `p` toggles pause, `q` quits, `.` is an idle
/// tick. Whitespace is ignored.
pub fn parse_script(script: &str) -> Result<Vec<Option<GameInput>>, AppError> {
    script
        .chars()
        .enumerate()
        .filter(|(_, symbol)| !symbol.is_whitespace())
        .map(|(index, symbol)| match symbol.to_ascii_lowercase() {
            'u' => Ok(Some(GameInput::Direction(Direction::Up))),
            'd' => Ok(Some(GameInput::Direction(Direction::Down))),
            'l' => Ok(Some(GameInput::Direction(Direction::Left))),
            'r' => Ok(Some(GameInput::Direction(Direction::Right))),
            'p' => Ok(Some(GameInput::PauseToggle)),
            'q' => Ok(Some(GameInput::Quit)),
            '.' => Ok(None),
            _ => Err(AppError::InvalidScript { index, symbol }),
        })
        .collect()
}
