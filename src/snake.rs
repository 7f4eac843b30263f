use std::collections::VecDeque;

use rand::Rng;
use rand::seq::SliceRandom;

use crate::config::Rgb;
use crate::entity::Entity;
use crate::grid::{GridModel, Position};
use crate::input::{Direction, direction_change_is_valid};

/// Result of one [`Snake::advance`] call.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Step {
    Moved,
    /// The head would enter the body; nothing moved and the caller must
    /// [`Snake::reset`].
    SelfCollision,
}

/// Mutable snake state and direction buffering behavior.
#[derive(Debug, Clone)]
pub struct Snake {
    body: VecDeque<Position>,
    direction: Direction,
    pending_direction: Option<Direction>,
    target_length: usize,
    last_vacated: Option<Position>,
    color: Rgb,
}

impl Snake {
    /// Creates a one-cell snake at `start` with the provided direction.
    #[must_use]
    pub fn new(start: Position, direction: Direction, color: Rgb) -> Self {
        Self::from_segments(vec![start], direction, color)
    }

    /// Creates a snake from explicit body segments (front is head).
    ///
    /// The target length matches the number of segments. `segments` must not
    /// be empty; debug builds panic on an empty body.
    #[must_use]
    pub fn from_segments(segments: Vec<Position>, direction: Direction, color: Rgb) -> Self {
        debug_assert!(!segments.is_empty(), "snake needs at least one segment");

        Self {
            target_length: segments.len(),
            body: VecDeque::from(segments),
            direction,
            pending_direction: None,
            last_vacated: None,
            color,
        }
    }

    /// Buffers a turn for the next tick. Reversals of the current heading are
    /// ignored; a later valid request replaces an earlier one.
    pub fn queue_direction(&mut self, direction: Direction) {
        if direction_change_is_valid(self.direction, direction) {
            self.pending_direction = Some(direction);
        }
    }

    /// Promotes the buffered turn, if any, to the current heading.
    pub fn apply_queued_direction(&mut self) {
        if let Some(direction) = self.pending_direction.take() {
            self.direction = direction;
        }
    }

    /// Moves one cell along the current heading.
    ///
    /// The tail cell that leaves this tick does not count as body, so chasing
    /// the tail is legal. While growing the tail stays and does count.
    pub fn advance(&mut self, grid: GridModel) -> Step {
        let next_head = grid.step(self.head(), self.direction);

        let drops_tail = self.body.len() >= self.target_length;
        let solid = if drops_tail {
            self.body.len() - 1
        } else {
            self.body.len()
        };
        if self.body.iter().take(solid).skip(1).any(|cell| *cell == next_head) {
            return Step::SelfCollision;
        }

        self.body.push_front(next_head);
        self.last_vacated = if self.body.len() > self.target_length {
            self.body.pop_back()
        } else {
            None
        };

        Step::Moved
    }

    /// Lengthens the snake by one cell, realised on the next advance.
    pub fn grow(&mut self) {
        self.target_length += 1;
    }

    /// Shrinks back to a single cell at the grid center facing a random way.
    pub fn reset<R: Rng + ?Sized>(&mut self, rng: &mut R, grid: GridModel) {
        self.body.clear();
        self.body.push_front(grid.center());
        self.target_length = 1;
        self.pending_direction = None;
        self.last_vacated = None;
        self.direction = *Direction::ALL
            .choose(rng)
            .unwrap_or(&Direction::Right);
    }

    /// Returns the current head position.
    #[must_use]
    pub fn head(&self) -> Position {
        *self
            .body
            .front()
            .expect("snake body must always contain at least one segment")
    }

    /// Returns current segment count.
    #[must_use]
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Returns true when there are no segments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    #[must_use]
    pub fn target_length(&self) -> usize {
        self.target_length
    }

    /// Returns the current movement direction.
    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    #[must_use]
    pub fn pending_direction(&self) -> Option<Direction> {
        self.pending_direction
    }

    /// The cell dropped from the tail by the latest advance.
    #[must_use]
    pub fn last_vacated(&self) -> Option<Position> {
        self.last_vacated
    }
}

impl Entity for Snake {
    fn position(&self) -> Position {
        self.head()
    }

    fn color(&self) -> Rgb {
        self.color
    }

    fn cells(&self) -> impl Iterator<Item = Position> + '_ {
        self.body.iter().copied()
    }
}
