//! Move parsing.
//!
//! Wire format is exactly two characters:
//! - row letter `A`..`C` (case-sensitive)
//! - column digit `1`..`3`
//!
//! Whether the target cell is free is checked by the board, not here.

use std::fmt;
use std::str::FromStr;

use crate::error::MoveError;

/// A board coordinate, zero-based.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Move {
    pub row: usize,
    pub col: usize,
}

impl Move {
    /// Build a move from zero-based coordinates.
    ///
    /// Returns `None` when either coordinate is outside the board.
    pub fn new(row: usize, col: usize) -> Option<Self> {
        if row < 3 && col < 3 {
            Some(Move { row, col })
        } else {
            None
        }
    }
}

impl FromStr for Move {
    type Err = MoveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let (row, col) = match (chars.next(), chars.next(), chars.next()) {
            (Some(r), Some(c), None) => (r, c),
            _ => return Err(MoveError::Length),
        };

        let row = match row {
            'A'..='C' => row as usize - 'A' as usize,
            _ => return Err(MoveError::RowOutOfBounds),
        };
        let col = match col {
            '1'..='3' => col as usize - '1' as usize,
            _ => return Err(MoveError::ColumnOutOfBounds),
        };

        Ok(Move { row, col })
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let row = (b'A' + self.row as u8) as char;
        write!(f, "{}{}", row, self.col + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_corners_and_center() {
        assert_eq!("A1".parse(), Ok(Move { row: 0, col: 0 }));
        assert_eq!("B2".parse(), Ok(Move { row: 1, col: 1 }));
        assert_eq!("C3".parse(), Ok(Move { row: 2, col: 2 }));
    }

    #[test]
    fn rejects_wrong_length() {
        assert_eq!("".parse::<Move>(), Err(MoveError::Length));
        assert_eq!("A".parse::<Move>(), Err(MoveError::Length));
        assert_eq!("A12".parse::<Move>(), Err(MoveError::Length));
    }

    #[test]
    fn rejects_rows_outside_a_to_c() {
        assert_eq!("D1".parse::<Move>(), Err(MoveError::RowOutOfBounds));
        assert_eq!("a1".parse::<Move>(), Err(MoveError::RowOutOfBounds));
        assert_eq!("11".parse::<Move>(), Err(MoveError::RowOutOfBounds));
    }

    #[test]
    fn rejects_columns_outside_1_to_3() {
        assert_eq!("A0".parse::<Move>(), Err(MoveError::ColumnOutOfBounds));
        assert_eq!("B4".parse::<Move>(), Err(MoveError::ColumnOutOfBounds));
        assert_eq!("CC".parse::<Move>(), Err(MoveError::ColumnOutOfBounds));
    }

    #[test]
    fn display_matches_wire_format() {
        let mv = Move::new(2, 0).unwrap();
        assert_eq!(mv.to_string(), "C1");
        assert_eq!(Move::new(3, 0), None);
    }
}
