use std::io;
use std::path::PathBuf;

use clap::Parser;
use log::{LevelFilter, info};
use wrap_snake::config::Settings;
use wrap_snake::error::AppError;
use wrap_snake::game::GameState;
use wrap_snake::input::parse_script;
use wrap_snake::terminal_runtime::TerminalSession;
use wrap_snake::{headless, logging};

#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Seed for apple placement and restart directions.
    #[arg(long)]
    seed: Option<u64>,

    /// Run without a terminal for this many ticks, printing JSON feeds.
    #[arg(long, value_name = "TICKS")]
    headless: Option<u64>,

    /// Headless input script: u/d/l/r steer, p pause, q quit, '.' idle.
    #[arg(long, default_value = "", requires = "headless")]
    inputs: String,

    /// Write logs to this file during interactive play.
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    #[arg(long, default_value = "info")]
    log_level: LevelFilter,
}

fn main() -> Result<(), AppError> {
    let cli = Cli::parse();
    let settings = Settings::classic();

    if let Some(steps) = cli.headless {
        logging::init_stderr_logger(cli.log_level)?;
        let inputs = parse_script(&cli.inputs)?;
        let seed = cli.seed.unwrap_or_default();
        let summary = headless::run(&settings, seed, steps, &inputs, &mut io::stdout().lock())?;
        info!(
            "headless run finished after {} steps, length {}",
            summary.steps, summary.final_length
        );
        return Ok(());
    }

    if let Some(path) = &cli.log_file {
        logging::init_file_logger(path, cli.log_level)?;
    }

    let state = match cli.seed {
        Some(seed) => GameState::new_with_seed(&settings, seed),
        None => GameState::new(&settings),
    };
    run(&settings, state)
}

fn run(settings: &Settings, mut state: GameState) -> Result<(), AppError> {
    let mut session = TerminalSession::enter()?;
    session.play(settings, &mut state)
}
