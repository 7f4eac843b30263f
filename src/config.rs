use std::time::Duration;

use serde::Serialize;

use crate::grid::GridModel;

/// Canvas width in pixels.
pub const CANVAS_WIDTH: u32 = 640;

/// Canvas height in pixels.
pub const CANVAS_HEIGHT: u32 = 480;

/// Edge length of one grid cell in pixels.
pub const CELL_SIZE: u32 = 20;

/// Simulation ticks per second.
pub const TICK_RATE: u32 = 20;

/// How long the host blocks on input while paused before redrawing.
pub const PAUSED_POLL_INTERVAL_MS: u64 = 500;

/// Plain 24-bit color, independent of any rendering backend.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// The four fixed display colors.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Palette {
    /// Fill color for snake segments.
    pub body: Rgb,
    /// Fill color for the apple.
    pub apple: Rgb,
    /// Cell outline and board border color.
    pub outline: Rgb,
    /// Empty cell color.
    pub background: Rgb,
}

pub const PALETTE_CLASSIC: Palette = Palette {
    body: Rgb::new(0, 255, 0),
    apple: Rgb::new(255, 0, 0),
    outline: Rgb::new(93, 216, 228),
    background: Rgb::new(0, 0, 0),
};

/// Startup context shared by the simulation and its host collaborators.
///
/// Built once in `main` and passed by reference; nothing here is global.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Settings {
    pub grid: GridModel,
    pub palette: Palette,
    pub tick_rate: u32,
}

impl Settings {
    /// The fixed 640x480 canvas with 20px cells ticking 20 times per second.
    #[must_use]
    pub fn classic() -> Self {
        Self {
            grid: GridModel::from_canvas(CANVAS_WIDTH, CANVAS_HEIGHT, CELL_SIZE),
            palette: PALETTE_CLASSIC,
            tick_rate: TICK_RATE,
        }
    }

    /// Wall-clock time between two simulation ticks.
    #[must_use]
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(1000 / u64::from(self.tick_rate.max(1)))
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::classic()
    }
}
