//! Display-free driver that replays an input script against a seeded game
//! and streams one JSON render feed per tick.

use std::io::Write;

use log::info;

use crate::config::Settings;
use crate::error::AppError;
use crate::game::{Flow, GameState};
use crate::input::GameInput;

/// How a headless run ended.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct RunSummary {
    /// Ticks requested by the host, including those skipped while paused.
    pub steps: u64,
    pub quit: bool,
    pub final_length: usize,
}

/// Runs `steps` host steps, feeding `inputs[i]` before step `i`.
///
/// Every step emits a feed line, paused or not, so consumers see one line
/// per step. A quit input stops the run before its step is taken.
pub fn run<W: Write>(
    settings: &Settings,
    seed: u64,
    steps: u64,
    inputs: &[Option<GameInput>],
    out: &mut W,
) -> Result<RunSummary, AppError> {
    let mut state = GameState::new_with_seed(settings, seed);
    info!("headless run: seed {seed}, {steps} steps, {} scripted inputs", inputs.len());

    let mut taken = 0;
    let mut quit = false;
    for step in 0..steps {
        let scripted = usize::try_from(step)
            .ok()
            .and_then(|index| inputs.get(index))
            .copied()
            .flatten();
        if let Some(input) = scripted
            && state.apply_input(input) == Flow::Quit
        {
            quit = true;
            break;
        }

        state.tick();
        taken += 1;

        serde_json::to_writer(&mut *out, &state.render_feed())?;
        out.write_all(b"\n")?;
    }
    out.flush()?;

    Ok(RunSummary {
        steps: taken,
        quit,
        final_length: state.snake.len(),
    })
}
