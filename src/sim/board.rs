//! Square board of cells
//!
//! Coordinates are `(x, y)` with `(0, 0)` in the top-left corner and `y`
//! growing downward. Cells are stored row-major.

use std::fmt;

use glam::IVec2;
use serde::{Deserialize, Serialize};

use crate::consts::MAX_SIDE_LENGTH;
use crate::error::{Result, SimError};

/// Number of discrete mirror orientations (45° steps)
pub const MIRROR_ROTATIONS: u8 = 4;

/// Contents of one board square
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Cell {
    #[default]
    Empty,
    /// Beam origin
    Start,
    /// Beam target
    End,
    /// Planet - ends the run when the beam enters it
    Obstacle,
    /// Rotatable mirror, `rotation` in `0..4`
    Mirror { rotation: u8 },
}

impl Cell {
    /// Build a mirror, rejecting rotations outside `0..4`
    pub fn mirror(rotation: u8) -> Result<Self> {
        if rotation >= MIRROR_ROTATIONS {
            return Err(SimError::InvalidRotation(rotation));
        }
        Ok(Cell::Mirror { rotation })
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    pub fn is_mirror(&self) -> bool {
        matches!(self, Cell::Mirror { .. })
    }

    /// Single-character glyph used by the ASCII board dump (mirrors show their rotation)
    pub fn glyph(&self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::Start => 'S',
            Cell::End => 'E',
            Cell::Obstacle => 'O',
            Cell::Mirror { rotation } => char::from(b'0' + rotation % MIRROR_ROTATIONS),
        }
    }
}

/// Fixed-size square grid
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "BoardData")]
pub struct Board {
    side: u32,
    cells: Vec<Cell>,
}

/// Unchecked wire form of a [`Board`]
#[derive(Deserialize)]
struct BoardData {
    side: u32,
    cells: Vec<Cell>,
}

impl TryFrom<BoardData> for Board {
    type Error = SimError;

    fn try_from(data: BoardData) -> Result<Self> {
        if data.side > MAX_SIDE_LENGTH {
            return Err(SimError::InvalidBoard(format!(
                "side {} exceeds the maximum of {MAX_SIDE_LENGTH}",
                data.side
            )));
        }
        let expected = data.side as usize * data.side as usize;
        if data.cells.len() != expected {
            return Err(SimError::InvalidBoard(format!(
                "{} cells for a {}x{} board (expected {expected})",
                data.cells.len(),
                data.side,
                data.side
            )));
        }
        for cell in &data.cells {
            if let Cell::Mirror { rotation } = *cell {
                Cell::mirror(rotation)?;
            }
        }
        Ok(Board {
            side: data.side,
            cells: data.cells,
        })
    }
}

impl Board {
    /// Create an all-empty board with the given side length
    pub fn new(side: u32) -> Self {
        let len = side as usize * side as usize;
        Self {
            side,
            cells: vec![Cell::Empty; len],
        }
    }

    #[inline]
    pub fn side(&self) -> u32 {
        self.side
    }

    /// Whether `pos` lies on the board
    #[inline]
    pub fn contains(&self, pos: IVec2) -> bool {
        let side = self.side as i32;
        (0..side).contains(&pos.x) && (0..side).contains(&pos.y)
    }

    #[inline]
    fn index(&self, pos: IVec2) -> Option<usize> {
        self.contains(pos)
            .then(|| pos.y as usize * self.side as usize + pos.x as usize)
    }

    fn checked_index(&self, x: i32, y: i32) -> Result<usize> {
        self.index(IVec2::new(x, y)).ok_or(SimError::OutOfBounds {
            x,
            y,
            side: self.side,
        })
    }

    /// Cell at `pos`, or `None` off the board
    #[inline]
    pub fn get(&self, pos: IVec2) -> Option<Cell> {
        self.index(pos).map(|i| self.cells[i])
    }

    /// Read the cell at `(x, y)`
    pub fn cell_at(&self, x: i32, y: i32) -> Result<Cell> {
        let i = self.checked_index(x, y)?;
        Ok(self.cells[i])
    }

    /// Overwrite the cell at `(x, y)`
    pub fn set_cell(&mut self, x: i32, y: i32, cell: Cell) -> Result<()> {
        if let Cell::Mirror { rotation } = cell {
            Cell::mirror(rotation)?;
        }
        let i = self.checked_index(x, y)?;
        self.cells[i] = cell;
        Ok(())
    }

    /// Turn the mirror at `(x, y)` one step and return its new rotation.
    ///
    /// Fails with [`SimError::InvalidOperation`] if the cell holds anything
    /// other than a mirror; the board is left untouched in that case.
    pub fn rotate_mirror(&mut self, x: i32, y: i32) -> Result<u8> {
        let i = self.checked_index(x, y)?;
        match &mut self.cells[i] {
            Cell::Mirror { rotation } => {
                *rotation = (*rotation + 1) % MIRROR_ROTATIONS;
                Ok(*rotation)
            }
            _ => Err(SimError::InvalidOperation { x, y }),
        }
    }

    /// All cells with their coordinates, row by row
    pub fn iter(&self) -> impl Iterator<Item = (IVec2, Cell)> + '_ {
        let side = self.side as usize;
        self.cells.iter().enumerate().map(move |(i, cell)| {
            let pos = IVec2::new((i % side) as i32, (i / side) as i32);
            (pos, *cell)
        })
    }

    /// Check the level invariant: one `End`, and one `Start` unless the
    /// board is a single cell (where `End` covers it)
    pub fn check_endpoints(&self) -> Result<()> {
        let starts = self.cells.iter().filter(|c| matches!(c, Cell::Start)).count();
        let ends = self.cells.iter().filter(|c| matches!(c, Cell::End)).count();
        let expected_starts = if self.side == 1 { 0 } else { 1 };
        if starts != expected_starts || ends != 1 {
            return Err(SimError::InvalidBoard(format!(
                "{starts} start and {ends} end cells (expected {expected_starts} and 1)"
            )));
        }
        Ok(())
    }

    pub fn mirror_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_mirror()).count()
    }

    pub fn obstacle_count(&self) -> usize {
        self.cells
            .iter()
            .filter(|c| matches!(c, Cell::Obstacle))
            .count()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.side.max(1) as usize) {
            let line: String = row.iter().map(Cell::glyph).collect();
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_new_board_is_empty() {
        let board = Board::new(4);
        assert_eq!(board.side(), 4);
        assert_eq!(board.iter().count(), 16);
        assert!(board.iter().all(|(_, c)| c == Cell::Empty));
    }

    #[test]
    fn test_set_and_read_cell() {
        let mut board = Board::new(3);
        board.set_cell(2, 1, Cell::Obstacle).unwrap();
        assert_eq!(board.cell_at(2, 1).unwrap(), Cell::Obstacle);
        assert_eq!(board.get(IVec2::new(2, 1)), Some(Cell::Obstacle));
        assert_eq!(board.cell_at(1, 2).unwrap(), Cell::Empty);
    }

    #[test]
    fn test_out_of_bounds() {
        let mut board = Board::new(3);
        for (x, y) in [(-1, 0), (0, -1), (3, 0), (0, 3)] {
            assert!(matches!(
                board.cell_at(x, y),
                Err(SimError::OutOfBounds { side: 3, .. })
            ));
            assert!(board.set_cell(x, y, Cell::Obstacle).is_err());
            assert!(board.rotate_mirror(x, y).is_err());
            assert_eq!(board.get(IVec2::new(x, y)), None);
        }
    }

    #[test]
    fn test_rotate_mirror_wraps() {
        let mut board = Board::new(2);
        board.set_cell(1, 0, Cell::mirror(3).unwrap()).unwrap();
        assert_eq!(board.rotate_mirror(1, 0).unwrap(), 0);
        assert_eq!(board.cell_at(1, 0).unwrap(), Cell::Mirror { rotation: 0 });
    }

    #[test]
    fn test_rotate_non_mirror_fails_without_change() {
        let mut board = Board::new(2);
        board.set_cell(0, 0, Cell::Start).unwrap();
        let before = board.clone();
        assert!(matches!(
            board.rotate_mirror(0, 0),
            Err(SimError::InvalidOperation { x: 0, y: 0 })
        ));
        assert!(board.rotate_mirror(1, 1).is_err());
        assert_eq!(board, before);
    }

    #[test]
    fn test_invalid_rotation_rejected() {
        assert!(matches!(Cell::mirror(4), Err(SimError::InvalidRotation(4))));
        let mut board = Board::new(2);
        assert!(board.set_cell(0, 0, Cell::Mirror { rotation: 7 }).is_err());
        assert_eq!(board.cell_at(0, 0).unwrap(), Cell::Empty);
    }

    #[test]
    fn test_display() {
        let mut board = Board::new(3);
        board.set_cell(0, 0, Cell::Start).unwrap();
        board.set_cell(2, 2, Cell::End).unwrap();
        board.set_cell(1, 0, Cell::mirror(1).unwrap()).unwrap();
        board.set_cell(0, 2, Cell::Obstacle).unwrap();
        assert_eq!(board.to_string(), "S1.\n...\nO.E\n");
    }

    #[test]
    fn test_deserialize_rejects_malformed_boards() {
        for json in [
            r#"{"side":3,"cells":[]}"#,
            r#"{"side":2,"cells":["Empty","Empty","Empty","Empty","Empty"]}"#,
            r#"{"side":1,"cells":[{"Mirror":{"rotation":9}}]}"#,
            r#"{"side":3000000000,"cells":[]}"#,
        ] {
            assert!(serde_json::from_str::<Board>(json).is_err(), "{json}");
        }
    }

    #[test]
    fn test_deserialize_round_trips_valid_board() {
        let mut board = Board::new(3);
        board.set_cell(0, 0, Cell::Start).unwrap();
        board.set_cell(1, 1, Cell::mirror(2).unwrap()).unwrap();
        board.set_cell(2, 2, Cell::End).unwrap();
        let json = serde_json::to_string(&board).unwrap();
        let restored: Board = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, board);
        assert_eq!(restored.cell_at(2, 2).unwrap(), Cell::End);
    }

    #[test]
    fn test_check_endpoints() {
        let mut board = Board::new(3);
        assert!(matches!(board.check_endpoints(), Err(SimError::InvalidBoard(_))));
        board.set_cell(0, 0, Cell::Start).unwrap();
        board.set_cell(2, 2, Cell::End).unwrap();
        assert!(board.check_endpoints().is_ok());
        board.set_cell(1, 1, Cell::End).unwrap();
        assert!(board.check_endpoints().is_err());

        let mut single = Board::new(1);
        single.set_cell(0, 0, Cell::End).unwrap();
        assert!(single.check_endpoints().is_ok());
    }

    #[test]
    fn test_counts() {
        let mut board = Board::new(4);
        board.set_cell(1, 1, Cell::mirror(0).unwrap()).unwrap();
        board.set_cell(2, 1, Cell::mirror(2).unwrap()).unwrap();
        board.set_cell(3, 3, Cell::Obstacle).unwrap();
        assert_eq!(board.mirror_count(), 2);
        assert_eq!(board.obstacle_count(), 1);
    }

    proptest! {
        #[test]
        fn prop_four_rotations_is_identity(r in 0u8..4, x in 0i32..5, y in 0i32..5) {
            let mut board = Board::new(5);
            board.set_cell(x, y, Cell::mirror(r).unwrap()).unwrap();
            for _ in 0..4 {
                board.rotate_mirror(x, y).unwrap();
            }
            prop_assert_eq!(board.cell_at(x, y).unwrap(), Cell::Mirror { rotation: r });
        }
    }
}
