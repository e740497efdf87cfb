//! Error types for the terminal host

use std::io;
use thiserror::Error;

/// Result type alias for host operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while driving the show in a terminal.
///
/// The simulation itself never fails; only its host can.
#[derive(Error, Debug)]
pub enum Error {
    /// Terminal I/O failed
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A colour argument was not six hex digits
    #[error("invalid hex color {0:?}, expected RRGGBB (e.g. 1a1b26)")]
    InvalidColor(String),
}
