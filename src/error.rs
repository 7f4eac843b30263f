use std::io;

use thiserror::Error;

/// Failures of the host around the simulation core.
///
/// The core itself never fails; these cover the terminal, output encoding,
/// logger setup and user-supplied input scripts.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("terminal I/O failed: {0}")]
    Io(#[from] io::Error),

    #[error("failed to encode render feed: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("failed to install logger: {0}")]
    Logger(#[from] log::SetLoggerError),

    #[error("invalid input script symbol {symbol:?} at offset {index}")]
    InvalidScript { index: usize, symbol: char },
}
