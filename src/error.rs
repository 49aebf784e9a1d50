//! Error types for the simulation.
//!
//! Game results (won, off grid, hit a planet) are not errors; they are
//! reported through [`crate::sim::Status`].

use thiserror::Error;

pub type Result<T> = std::result::Result<T, SimError>;

#[derive(Error, Debug)]
pub enum SimError {
    #[error("coordinate ({x}, {y}) is outside the {side}x{side} board")]
    OutOfBounds { x: i32, y: i32, side: u32 },

    #[error("cell ({x}, {y}) is not a mirror")]
    InvalidOperation { x: i32, y: i32 },

    #[error("mirror rotation {0} is out of range (expected 0..4)")]
    InvalidRotation(u8),

    #[error("invalid level config: {0}")]
    InvalidConfig(String),

    #[error("invalid board: {0}")]
    InvalidBoard(String),

    #[error("settings parse error: {0}")]
    Settings(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
