//! Interactive host: owns the terminal for one game and paces ticks against
//! wall-clock time.

use std::io;
use std::panic;
use std::time::{Duration, Instant};

use crossterm::cursor::{Hide, Show};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use log::{debug, info, warn};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::config::{PAUSED_POLL_INTERVAL_MS, Settings};
use crate::error::AppError;
use crate::game::{Flow, GameState, RunMode};
use crate::input::InputRouter;
use crate::renderer;

type SnakeTerminal = Terminal<CrosstermBackend<io::Stdout>>;

/// Decides how long to wait for input and when the next tick is due.
///
/// While paused the clock is held at "now", so resuming waits a full tick
/// interval instead of firing a backlog of ticks.
#[derive(Debug, Clone, Copy)]
pub struct FramePacer {
    tick_interval: Duration,
    paused_poll: Duration,
    last_tick: Instant,
}

impl FramePacer {
    #[must_use]
    pub fn new(settings: &Settings, now: Instant) -> Self {
        Self {
            tick_interval: settings.tick_interval(),
            paused_poll: Duration::from_millis(PAUSED_POLL_INTERVAL_MS),
            last_tick: now,
        }
    }

    /// Longest input wait that does not delay the next tick.
    #[must_use]
    pub fn poll_timeout(&self, mode: RunMode, now: Instant) -> Duration {
        match mode {
            RunMode::Paused => self.paused_poll,
            RunMode::Running => self
                .tick_interval
                .saturating_sub(now.saturating_duration_since(self.last_tick)),
        }
    }

    /// Returns whether the game should tick at `now`, restarting the interval
    /// if so.
    pub fn tick_due(&mut self, mode: RunMode, now: Instant) -> bool {
        if mode == RunMode::Paused {
            self.last_tick = now;
            return false;
        }

        if now.saturating_duration_since(self.last_tick) < self.tick_interval {
            return false;
        }
        self.last_tick = now;
        true
    }
}

/// Raw mode plus alternate screen for the lifetime of one game.
///
/// Dropping the session, or panicking while it is alive, restores the
/// terminal best-effort and logs anything that fails on the way out.
pub struct TerminalSession {
    terminal: SnakeTerminal,
    input: InputRouter,
}

impl TerminalSession {
    pub fn enter() -> io::Result<Self> {
        install_panic_hook();
        enable_raw_mode()?;

        let mut stdout = io::stdout();
        if let Err(error) = execute!(stdout, EnterAlternateScreen, Hide) {
            if let Err(raw) = disable_raw_mode() {
                warn!("could not leave raw mode: {raw}");
            }
            return Err(error);
        }

        match Terminal::new(CrosstermBackend::new(stdout)) {
            Ok(terminal) => {
                debug!("terminal session entered");
                Ok(Self {
                    terminal,
                    input: InputRouter::new(),
                })
            }
            Err(error) => {
                restore_terminal();
                Err(error)
            }
        }
    }

    /// Draws, waits for input and ticks until the player quits.
    pub fn play(&mut self, settings: &Settings, state: &mut GameState) -> Result<(), AppError> {
        let mut pacer = FramePacer::new(settings, Instant::now());
        info!("session started on a {}x{} grid", state.grid().width(), state.grid().height());

        loop {
            let feed = state.render_feed();
            self.terminal.draw(|frame| renderer::render(frame, &feed))?;

            let timeout = pacer.poll_timeout(state.mode, Instant::now());
            if let Some(game_input) = self.input.poll_input(timeout)?
                && state.apply_input(game_input) == Flow::Quit
            {
                break;
            }

            if pacer.tick_due(state.mode, Instant::now()) {
                state.tick();
            }
        }

        info!(
            "session ended after {} ticks and {} restarts",
            state.tick_count, state.resets
        );
        Ok(())
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        restore_terminal();
        debug!("terminal session restored");
    }
}

fn install_panic_hook() {
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |panic_info| {
        restore_terminal();
        default_hook(panic_info);
    }));
}

fn restore_terminal() {
    if let Err(error) = disable_raw_mode() {
        warn!("could not leave raw mode: {error}");
    }
    let mut stdout = io::stdout();
    if let Err(error) = execute!(stdout, Show, LeaveAlternateScreen) {
        warn!("could not leave the alternate screen: {error}");
    }
}
