//! Read-only view of the board handed to renderers.
//!
//! A feed is a snapshot: building one never mutates the game, and it carries
//! everything a renderer needs to paint fixed-size filled cells on a fixed
//! canvas, including the cell to erase for incremental redraws.

use serde::Serialize;

use crate::config::{Palette, Rgb};
use crate::entity::Entity;
use crate::grid::{GridModel, Position};

/// One cell to paint.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize)]
pub struct FeedCell {
    pub position: Position,
    /// Top-left canvas pixel.
    pub origin: (i64, i64),
    pub color: Rgb,
}

impl FeedCell {
    #[must_use]
    pub fn new(grid: GridModel, position: Position, color: Rgb) -> Self {
        Self {
            position,
            origin: grid.to_pixels(position),
            color,
        }
    }
}

/// Everything a renderer needs for one frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderFeed {
    pub tick: u64,
    pub paused: bool,
    /// Self-collision restarts so far. When this changes between two feeds
    /// the old body vanished at once and the whole board must be repainted.
    pub resets: u64,
    pub grid_width: u16,
    pub grid_height: u16,
    pub cell_size: u32,
    /// Snake cells, head first.
    pub snake: Vec<FeedCell>,
    pub head_index: usize,
    pub apple: FeedCell,
    /// Cell left by the tail on the latest tick, painted in the background color.
    ///
    /// `None` on a growth tick and after a restart. A restart clears the whole
    /// old body, not one cell, so incremental renderers must redraw everything
    /// when `resets` moves.
    pub vacated: Option<FeedCell>,
    pub outline: Rgb,
    pub background: Rgb,
}

impl RenderFeed {
    /// Returns the snake head cell.
    #[must_use]
    pub fn head(&self) -> Option<&FeedCell> {
        self.snake.get(self.head_index)
    }
}

/// Collects the cells of any entity in its own color.
pub fn entity_cells<E: Entity>(grid: GridModel, entity: &E) -> Vec<FeedCell> {
    let color = entity.color();
    entity
        .cells()
        .map(|position| FeedCell::new(grid, position, color))
        .collect()
}

/// Paints a vacated cell in the background color.
#[must_use]
pub fn erase_cell(grid: GridModel, palette: &Palette, position: Position) -> FeedCell {
    FeedCell::new(grid, position, palette.background)
}
