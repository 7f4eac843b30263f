use serde::Serialize;

use crate::input::Direction;

/// Grid position in logical cell coordinates (column, row).
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Fixed-size toroidal grid.
///
/// All movement arithmetic goes through [`GridModel::step`] so that every
/// caller wraps the same way.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct GridModel {
    width: u16,
    height: u16,
    cell_size: u32,
}

impl GridModel {
    /// Creates a grid of `width` x `height` cells.
    #[must_use]
    pub fn new(width: u16, height: u16, cell_size: u32) -> Self {
        debug_assert!(width > 0 && height > 0 && cell_size > 0);
        Self {
            width,
            height,
            cell_size,
        }
    }

    /// Derives the cell grid that tiles a pixel canvas.
    #[must_use]
    pub fn from_canvas(canvas_width: u32, canvas_height: u32, cell_size: u32) -> Self {
        let cells = |pixels: u32| u16::try_from(pixels / cell_size).unwrap_or(u16::MAX);
        Self::new(cells(canvas_width), cells(canvas_height), cell_size)
    }

    #[must_use]
    pub fn width(self) -> u16 {
        self.width
    }

    #[must_use]
    pub fn height(self) -> u16 {
        self.height
    }

    #[must_use]
    pub fn cell_size(self) -> u32 {
        self.cell_size
    }

    /// Returns the total number of cells in the grid.
    #[must_use]
    pub fn total_cells(self) -> usize {
        usize::from(self.width) * usize::from(self.height)
    }

    /// Returns the cell the snake starts on and resets to.
    #[must_use]
    pub fn center(self) -> Position {
        Position {
            x: i32::from(self.width / 2),
            y: i32::from(self.height / 2),
        }
    }

    /// Returns true when the position lies inside the grid.
    #[must_use]
    pub fn contains(self, position: Position) -> bool {
        position.x >= 0
            && position.y >= 0
            && position.x < i32::from(self.width)
            && position.y < i32::from(self.height)
    }

    /// Moves `dx`, `dy` cells from `position`, wrapping on both axes.
    #[must_use]
    pub fn offset(self, position: Position, dx: i32, dy: i32) -> Position {
        Position {
            x: wrap_axis(position.x + dx, i32::from(self.width)),
            y: wrap_axis(position.y + dy, i32::from(self.height)),
        }
    }

    /// Returns the neighbouring cell in `direction`, wrapping at the edges.
    #[must_use]
    pub fn step(self, position: Position, direction: Direction) -> Position {
        let (dx, dy) = direction.delta();
        self.offset(position, dx, dy)
    }

    /// Returns the top-left canvas pixel of a cell.
    #[must_use]
    pub fn to_pixels(self, position: Position) -> (i64, i64) {
        let cell = i64::from(self.cell_size);
        (i64::from(position.x) * cell, i64::from(position.y) * cell)
    }

    /// Iterates over every cell in row-major order.
    pub fn cells(self) -> impl Iterator<Item = Position> {
        let width = i32::from(self.width);
        (0..i32::from(self.height)).flat_map(move |y| (0..width).map(move |x| Position { x, y }))
    }

    /// Returns the `index`-th cell in row-major order.
    #[must_use]
    pub fn cell_at(self, index: usize) -> Position {
        let width = usize::from(self.width);
        Position {
            x: (index % width) as i32,
            y: (index / width) as i32,
        }
    }
}

fn wrap_axis(value: i32, upper_bound: i32) -> i32 {
    value.rem_euclid(upper_bound)
}
