//! Markers (X / O) and board cells.

use std::fmt;

/// The symbol a player places on the board.
///
/// `X` always belongs to the player who was queued first and moves first.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Marker {
    X,
    O,
}

impl Marker {
    /// The other player's marker.
    pub fn opponent(self) -> Self {
        match self {
            Marker::X => Marker::O,
            Marker::O => Marker::X,
        }
    }

    /// Character used when rendering the board.
    pub fn as_char(self) -> char {
        match self {
            Marker::X => 'X',
            Marker::O => 'O',
        }
    }

    /// Try to parse from a char (`'X'` / `'O'`, case-sensitive).
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'X' => Some(Marker::X),
            'O' => Some(Marker::O),
            _ => None,
        }
    }
}

impl fmt::Display for Marker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Content of a single square.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum Cell {
    #[default]
    Empty,
    Taken(Marker),
}

impl Cell {
    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }
}
