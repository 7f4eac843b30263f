use std::collections::HashSet;
use std::iter;

use log::warn;
use rand::Rng;

use crate::config::Rgb;
use crate::entity::Entity;
use crate::grid::{GridModel, Position};

/// Rejection-sampling attempts before falling back to the free-cell list.
pub const MAX_REJECTION_SAMPLES: usize = 64;

/// Occupancy (percent of the grid) above which only free cells are sampled.
pub const DENSE_OCCUPANCY_PERCENT: usize = 90;

/// The single collectible item on the board.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Apple {
    position: Position,
    color: Rgb,
}

impl Apple {
    /// Creates an apple at a fixed `position`.
    #[must_use]
    pub fn at(position: Position, color: Rgb) -> Self {
        Self { position, color }
    }

    /// Creates an apple on a random cell outside `occupied`, or at the grid
    /// center when no free cell exists.
    #[must_use]
    pub fn spawn<R: Rng + ?Sized>(
        rng: &mut R,
        grid: GridModel,
        occupied: &HashSet<Position>,
        color: Rgb,
    ) -> Self {
        let mut apple = Self::at(grid.center(), color);
        if !apple.relocate(rng, grid, occupied) {
            warn!("no free cell for a new apple, placing it at {:?}", apple.position);
        }
        apple
    }

    /// Moves the apple to a uniformly random cell not in `occupied`.
    ///
    /// Returns `false`, leaving the apple where it was, when every cell is
    /// occupied.
    pub fn relocate<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        grid: GridModel,
        occupied: &HashSet<Position>,
    ) -> bool {
        match free_position(rng, grid, occupied) {
            Some(position) => {
                self.position = position;
                true
            }
            None => false,
        }
    }
}

impl Entity for Apple {
    fn position(&self) -> Position {
        self.position
    }

    fn color(&self) -> Rgb {
        self.color
    }

    fn cells(&self) -> impl Iterator<Item = Position> + '_ {
        iter::once(self.position)
    }
}

/// Draws a free cell: cheap re-rolls on a sparse board, the explicit
/// complement on a dense one.
fn free_position<R: Rng + ?Sized>(
    rng: &mut R,
    grid: GridModel,
    occupied: &HashSet<Position>,
) -> Option<Position> {
    let total = grid.total_cells();
    let occupied_in_grid = occupied.iter().filter(|cell| grid.contains(**cell)).count();
    if occupied_in_grid >= total {
        return None;
    }

    if occupied_in_grid * 100 <= total * DENSE_OCCUPANCY_PERCENT {
        for _ in 0..MAX_REJECTION_SAMPLES {
            let candidate = grid.cell_at(rng.gen_range(0..total));
            if !occupied.contains(&candidate) {
                return Some(candidate);
            }
        }
    }

    let candidates: Vec<Position> = grid
        .cells()
        .filter(|cell| !occupied.contains(cell))
        .collect();
    let index = rng.gen_range(0..candidates.len());
    Some(candidates[index])
}
