//! Beam stepping
//!
//! [`advance`] moves the beam one cell and decides what happens there. It is
//! a pure function of the board and the beam: no RNG, no hidden state.

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::board::{Board, Cell, MIRROR_ROTATIONS};

/// Heading of the beam. Ordinals match mirror rotations (Up = 0 .. Left = 3).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Direction {
    Up,
    #[default]
    Right,
    Down,
    Left,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Right,
        Direction::Down,
        Direction::Left,
    ];

    #[inline]
    pub fn ordinal(self) -> u8 {
        self as u8
    }

    /// Direction for an ordinal, wrapping modulo 4
    #[inline]
    pub fn from_ordinal(n: u8) -> Self {
        Self::ALL[(n % 4) as usize]
    }

    /// One-cell step (screen coordinates, `y` grows downward)
    #[inline]
    pub fn delta(self) -> IVec2 {
        match self {
            Direction::Up => IVec2::NEG_Y,
            Direction::Right => IVec2::X,
            Direction::Down => IVec2::Y,
            Direction::Left => IVec2::NEG_X,
        }
    }
}

/// Outgoing heading after entering a mirror: `(rotation + incoming + 1) mod 4`.
///
/// | rotation | Up    | Right | Down  | Left  |
/// |----------|-------|-------|-------|-------|
/// | 0        | Right | Down  | Left  | Up    |
/// | 1        | Down  | Left  | Up    | Right |
/// | 2        | Left  | Up    | Right | Down  |
/// | 3        | Up    | Right | Down  | Left  |
#[inline]
pub fn reflect(rotation: u8, incoming: Direction) -> Direction {
    Direction::from_ordinal((rotation % MIRROR_ROTATIONS) + incoming.ordinal() + 1)
}

/// Position and heading of the laser
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BeamState {
    pub pos: IVec2,
    pub dir: Direction,
}

impl BeamState {
    pub fn new(pos: IVec2, dir: Direction) -> Self {
        Self { pos, dir }
    }
}

/// How a run ends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Terminal {
    Won,
    LostOffGrid,
    LostObstacle,
}

/// Result of one beam step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Continue(BeamState),
    Terminal(Terminal),
}

/// Step the beam one cell along its heading
pub fn advance(board: &Board, beam: &BeamState) -> Outcome {
    let next = beam.pos + beam.dir.delta();

    let Some(cell) = board.get(next) else {
        return Outcome::Terminal(Terminal::LostOffGrid);
    };

    match cell {
        Cell::Obstacle => Outcome::Terminal(Terminal::LostObstacle),
        Cell::End => Outcome::Terminal(Terminal::Won),
        Cell::Mirror { rotation } => {
            Outcome::Continue(BeamState::new(next, reflect(rotation, beam.dir)))
        }
        Cell::Empty | Cell::Start => Outcome::Continue(BeamState::new(next, beam.dir)),
    }
}
