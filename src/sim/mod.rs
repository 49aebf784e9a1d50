//! Deterministic simulation module
//!
//! All gameplay rules live here. This module must stay pure and deterministic:
//! - Discrete ticks only, driven from outside
//! - Seeded RNG only (per-level streams)
//! - No rendering or platform dependencies

pub mod beam;
pub mod board;
pub mod level;
pub mod state;

pub use beam::{BeamState, Direction, Outcome, Terminal, advance, reflect};
pub use board::{Board, Cell, MIRROR_ROTATIONS};
pub use level::{end_pos, generate_level, level_rng, start_pos};
pub use state::{Command, Session, Status};
