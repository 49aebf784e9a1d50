//! Mirror Laser - steer a laser across a grid of rotatable mirrors
//!
//! Core modules:
//! - `sim`: Deterministic simulation (board, beam stepping, levels, session)
//! - `settings`: Level generation parameters and tick speed
//! - `error`: Error taxonomy for the engine
//!
//! Rendering, input and the tick clock live outside this crate; they read
//! [`sim::Session`] and call its commands.

pub mod error;
pub mod settings;
pub mod sim;

pub use error::{Result, SimError};
pub use settings::{LevelConfig, Settings, SpeedPreset};

/// Game configuration constants
pub mod consts {
    /// Default board side length
    pub const GRID_SIZE: u32 = 10;
    /// Largest board side accepted from settings or snapshots
    pub const MAX_SIDE_LENGTH: u32 = 256;
    /// Random placement attempts per level
    pub const PLACEMENT_ATTEMPTS: u32 = 5;
    /// Chance a placement is a mirror (otherwise a planet)
    pub const MIRROR_PROBABILITY: f64 = 0.7;
    /// Tick interval of the classic game
    pub const DEFAULT_TICK_INTERVAL_MS: u64 = 500;
}
