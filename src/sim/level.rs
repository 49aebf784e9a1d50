//! Procedural level generation
//!
//! Levels are a function of the RNG stream only. [`level_rng`] derives that
//! stream from the run seed and the level number, so a given level always
//! lays out the same way within a run.

use glam::IVec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::beam::{BeamState, Direction};
use super::board::{Board, Cell, MIRROR_ROTATIONS};
use crate::error::Result;
use crate::settings::LevelConfig;

/// Deterministic RNG for one level of a run
pub fn level_rng(seed: u64, level: u32) -> Pcg32 {
    let level_seed = (level as u64)
        .wrapping_mul(2654435761)
        .wrapping_add(seed);
    Pcg32::seed_from_u64(level_seed)
}

/// Start corner (top-left)
#[inline]
pub fn start_pos() -> IVec2 {
    IVec2::ZERO
}

/// End corner (bottom-right)
#[inline]
pub fn end_pos(side: u32) -> IVec2 {
    IVec2::splat(side as i32 - 1)
}

/// Build a fresh board and the beam that starts on it.
///
/// Each placement attempt picks a uniform cell; an empty one gets a mirror
/// (random rotation) with `mirror_probability`, otherwise a planet. Occupied
/// cells and the two corners are skipped without retry, so a level holds at
/// most `placement_attempts` pieces. On a 1x1 board the single cell is `End`.
pub fn generate_level<R: Rng>(
    config: &LevelConfig,
    rng: &mut R,
) -> Result<(Board, BeamState)> {
    config.validate()?;

    let side = config.side_length;
    let start = start_pos();
    let end = end_pos(side);
    let mut board = Board::new(side);

    for _ in 0..config.placement_attempts {
        let pos = IVec2::new(
            rng.random_range(0..side as i32),
            rng.random_range(0..side as i32),
        );
        if pos == start || pos == end || !board.get(pos).is_some_and(|c| c.is_empty()) {
            continue;
        }
        let cell = if rng.random_bool(config.mirror_probability) {
            Cell::mirror(rng.random_range(0..MIRROR_ROTATIONS))?
        } else {
            Cell::Obstacle
        };
        board.set_cell(pos.x, pos.y, cell)?;
    }

    board.set_cell(start.x, start.y, Cell::Start)?;
    board.set_cell(end.x, end.y, Cell::End)?;

    log::debug!(
        "Generated {side}x{side} level: {} mirrors, {} planets from {} attempts",
        board.mirror_count(),
        board.obstacle_count(),
        config.placement_attempts
    );

    Ok((board, BeamState::new(start, Direction::Right)))
}
