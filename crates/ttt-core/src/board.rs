//! The 3x3 board.
//!
//! - Rows are `A`..`C` (index 0..2), columns `1`..`3` (index 0..2).
//! - A cell can only go from empty to taken, never back.
//! - Win and draw detection both work over the same 8 [`LINES`].

use crate::error::MoveError;
use crate::marker::{Cell, Marker};
use crate::moves::Move;

/// All winning lines as `(row, col)` triples: 3 rows, 3 columns, 2 diagonals.
pub const LINES: [[(usize, usize); 3]; 8] = [
    // Rows
    [(0, 0), (0, 1), (0, 2)],
    [(1, 0), (1, 1), (1, 2)],
    [(2, 0), (2, 1), (2, 2)],
    // Columns
    [(0, 0), (1, 0), (2, 0)],
    [(0, 1), (1, 1), (2, 1)],
    [(0, 2), (1, 2), (2, 2)],
    // Diagonals
    [(0, 0), (1, 1), (2, 2)],
    [(0, 2), (1, 1), (2, 0)],
];

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Board {
    cells: [[Cell; 3]; 3],
}

impl Board {
    /// Create an empty board.
    pub fn new() -> Self {
        Board::default()
    }

    /// Build a board from three row strings, e.g. `["XOX", "XOO", "OX."]`.
    ///
    /// `X` and `O` are markers; `.`, `_` and space are empty cells.
    /// Returns `None` on any other character or a row that isn't 3 wide.
    pub fn from_rows(rows: [&str; 3]) -> Option<Self> {
        let mut board = Board::new();
        for (r, row) in rows.iter().enumerate() {
            let chars: Vec<char> = row.chars().collect();
            if chars.len() != 3 {
                return None;
            }
            for (c, ch) in chars.into_iter().enumerate() {
                board.cells[r][c] = match ch {
                    '.' | '_' | ' ' => Cell::Empty,
                    other => Cell::Taken(Marker::from_char(other)?),
                };
            }
        }
        Some(board)
    }

    pub fn get(&self, mv: Move) -> Cell {
        self.cells[mv.row][mv.col]
    }

    /// Rows of cells, top (`A`) to bottom (`C`).
    pub fn rows(&self) -> &[[Cell; 3]; 3] {
        &self.cells
    }

    /// Put `marker` on an empty cell.
    pub fn place(&mut self, mv: Move, marker: Marker) -> Result<(), MoveError> {
        if !self.get(mv).is_empty() {
            return Err(MoveError::Occupied);
        }
        self.cells[mv.row][mv.col] = Cell::Taken(marker);
        Ok(())
    }

    pub fn is_full(&self) -> bool {
        self.cells
            .iter()
            .all(|row| row.iter().all(|cell| !cell.is_empty()))
    }

    /// Returns `true` if `marker` holds a complete line.
    pub fn has_won(&self, marker: Marker) -> bool {
        LINES.iter().any(|line| {
            line.iter()
                .all(|&(r, c)| self.cells[r][c] == Cell::Taken(marker))
        })
    }

    /// The marker holding a complete line, if any.
    pub fn winner(&self) -> Option<Marker> {
        [Marker::X, Marker::O]
            .into_iter()
            .find(|&m| self.has_won(m))
    }

    /// Returns `true` while at least one line contains no opponent marker,
    /// i.e. `marker` could still fill it.
    pub fn can_still_win(&self, marker: Marker) -> bool {
        let blocker = Cell::Taken(marker.opponent());
        LINES
            .iter()
            .any(|line| line.iter().all(|&(r, c)| self.cells[r][c] != blocker))
    }

    /// No winner, and neither marker can complete any line any more.
    ///
    /// A full board without a winner always satisfies this; so can a board
    /// with empty cells left if every line is already blocked.
    pub fn is_draw(&self) -> bool {
        self.winner().is_none()
            && !self.can_still_win(Marker::X)
            && !self.can_still_win(Marker::O)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(rows: [&str; 3]) -> Board {
        Board::from_rows(rows).expect("valid fixture")
    }

    #[test]
    fn every_line_wins_for_its_owner_only() {
        for marker in [Marker::X, Marker::O] {
            for line in LINES {
                let mut b = Board::new();
                for (r, c) in line {
                    b.place(Move::new(r, c).unwrap(), marker).unwrap();
                }
                assert!(b.has_won(marker), "{line:?} should win for {marker}");
                assert!(!b.has_won(marker.opponent()));
                assert_eq!(b.winner(), Some(marker));
                assert!(!b.is_draw());
            }
        }
    }

    #[test]
    fn full_board_without_line_is_draw() {
        let b = board(["XOX", "XOO", "OXX"]);
        assert!(b.is_full());
        assert_eq!(b.winner(), None);
        assert!(b.is_draw());
    }

    #[test]
    fn blocked_board_is_draw_before_it_fills() {
        let b = board(["XOX", "XOO", "OX."]);
        assert!(!b.is_full());
        assert!(b.is_draw());
    }

    #[test]
    fn open_line_is_not_a_draw() {
        let b = board(["XO.", "...", "..."]);
        assert!(b.can_still_win(Marker::X));
        assert!(b.can_still_win(Marker::O));
        assert!(!b.is_draw());
        assert!(!Board::new().is_draw());
    }

    #[test]
    fn place_rejects_occupied_cell() {
        let mut b = Board::new();
        let mv = Move::new(1, 1).unwrap();
        b.place(mv, Marker::X).unwrap();
        assert_eq!(b.place(mv, Marker::O), Err(MoveError::Occupied));
        assert_eq!(b.get(mv), Cell::Taken(Marker::X));
    }

    #[test]
    fn from_rows_rejects_bad_fixtures() {
        assert!(Board::from_rows(["XO", "...", "..."]).is_none());
        assert!(Board::from_rows(["XOZ", "...", "..."]).is_none());
    }
}
