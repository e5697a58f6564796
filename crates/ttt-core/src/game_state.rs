//! Single-game turn machine.
//!
//! Owns the board and whose turn it is. The server drives exactly one
//! `GameState` per game task; nothing else holds a mutable reference.
//!
//! Per accepted move:
//! - place the current marker,
//! - check whether the mover completed a line (win),
//! - otherwise check whether any line is still winnable (draw),
//! - otherwise swap current / waiting.
//!
//! A rejected move changes nothing, so the caller simply re-prompts.

use crate::board::Board;
use crate::error::MoveError;
use crate::marker::Marker;
use crate::moves::Move;

/// Where the game stands after a move.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Status {
    InProgress,
    Won(Marker),
    Draw,
}

impl Status {
    pub fn is_over(self) -> bool {
        self != Status::InProgress
    }
}

#[derive(Debug, Clone)]
pub struct GameState {
    board: Board,
    current: Marker,
    status: Status,
}

impl Default for GameState {
    fn default() -> Self {
        GameState {
            board: Board::new(),
            current: Marker::X,
            status: Status::InProgress,
        }
    }
}

impl GameState {
    /// Fresh game, `X` to move.
    pub fn new() -> Self {
        GameState::default()
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Marker whose turn it is. After the game ends this is the last mover.
    pub fn current(&self) -> Marker {
        self.current
    }

    pub fn waiting(&self) -> Marker {
        self.current.opponent()
    }

    pub fn status(&self) -> Status {
        self.status
    }

    /// Apply a move for the current marker.
    pub fn play(&mut self, mv: Move) -> Result<Status, MoveError> {
        if self.status.is_over() {
            return Err(MoveError::GameOver);
        }

        self.board.place(mv, self.current)?;

        self.status = if self.board.has_won(self.current) {
            Status::Won(self.current)
        } else if self.board.is_draw() {
            Status::Draw
        } else {
            self.current = self.current.opponent();
            Status::InProgress
        };

        Ok(self.status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mv(s: &str) -> Move {
        s.parse().unwrap()
    }

    #[test]
    fn accepted_move_swaps_turn() {
        let mut game = GameState::new();
        assert_eq!(game.current(), Marker::X);

        assert_eq!(game.play(mv("B2")), Ok(Status::InProgress));
        assert_eq!(game.current(), Marker::O);
        assert_eq!(game.waiting(), Marker::X);

        assert_eq!(game.play(mv("A1")), Ok(Status::InProgress));
        assert_eq!(game.current(), Marker::X);
    }

    #[test]
    fn rejected_move_keeps_board_and_turn() {
        let mut game = GameState::new();
        game.play(mv("A1")).unwrap();
        let before = game.board().clone();

        assert_eq!(game.play(mv("A1")), Err(MoveError::Occupied));
        assert_eq!(game.board(), &before);
        assert_eq!(game.current(), Marker::O);
    }

    #[test]
    fn win_freezes_the_game() {
        let mut game = GameState::new();
        for m in ["A1", "A2", "B1", "B2"] {
            game.play(mv(m)).unwrap();
        }
        assert_eq!(game.play(mv("C1")), Ok(Status::Won(Marker::X)));
        assert_eq!(game.current(), Marker::X);
        assert_eq!(game.play(mv("C3")), Err(MoveError::GameOver));
    }
}
