use std::fs::File;
use std::path::Path;

use log::LevelFilter;
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode, WriteLogger};

use crate::error::AppError;

/// Logs to `path`; the interactive screen owns stdout so nothing goes there.
pub fn init_file_logger(path: &Path, level: LevelFilter) -> Result<(), AppError> {
    WriteLogger::init(level, Config::default(), File::create(path)?)?;
    Ok(())
}

/// Logs to stderr, keeping stdout free for the feed stream.
pub fn init_stderr_logger(level: LevelFilter) -> Result<(), AppError> {
    TermLogger::init(
        level,
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )?;
    Ok(())
}
