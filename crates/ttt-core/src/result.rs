//! Outcome record handed from a finished game to persistence.
//!
//! Exactly one `GameResult` is produced per game, on every exit path.
//! `winner`/`loser` are both set or both unset; `failure` tells a draw
//! apart from a game that was cut short by an I/O error.

/// Immutable snapshot of how a game ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameResult {
    pub game_id: String,

    /// Identity that played `X` (moved first).
    pub first: String,

    /// Identity that played `O`.
    pub second: String,

    pub winner: Option<String>,
    pub loser: Option<String>,

    /// Set when the game ended abnormally (disconnect, write failure).
    pub failure: Option<String>,
}

impl GameResult {
    /// Win for `winner`; the other participant lost.
    pub fn won(
        game_id: impl Into<String>,
        first: impl Into<String>,
        second: impl Into<String>,
        winner: &str,
    ) -> Self {
        let (first, second) = (first.into(), second.into());
        let loser = if winner == first { second.clone() } else { first.clone() };
        GameResult {
            game_id: game_id.into(),
            winner: Some(winner.to_string()),
            loser: Some(loser),
            first,
            second,
            failure: None,
        }
    }

    pub fn draw(
        game_id: impl Into<String>,
        first: impl Into<String>,
        second: impl Into<String>,
    ) -> Self {
        GameResult {
            game_id: game_id.into(),
            first: first.into(),
            second: second.into(),
            winner: None,
            loser: None,
            failure: None,
        }
    }

    /// Abnormal termination; counts for nobody.
    pub fn aborted(
        game_id: impl Into<String>,
        first: impl Into<String>,
        second: impl Into<String>,
        cause: impl Into<String>,
    ) -> Self {
        GameResult {
            failure: Some(cause.into()),
            ..GameResult::draw(game_id, first, second)
        }
    }

    pub fn is_draw(&self) -> bool {
        self.winner.is_none() && self.failure.is_none()
    }

    /// Returns `true` if the game was aborted and must not touch statistics.
    pub fn is_void(&self) -> bool {
        self.failure.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn winner_determines_loser() {
        let r = GameResult::won("g1", "alice", "bob", "bob");
        assert_eq!(r.winner.as_deref(), Some("bob"));
        assert_eq!(r.loser.as_deref(), Some("alice"));
        assert!(!r.is_draw());
        assert!(!r.is_void());
    }

    #[test]
    fn draw_and_abort_are_distinct() {
        let draw = GameResult::draw("g1", "alice", "bob");
        let abort = GameResult::aborted("g2", "alice", "bob", "connection reset");
        assert!(draw.is_draw() && !draw.is_void());
        assert!(!abort.is_draw() && abort.is_void());
        assert_eq!(abort.winner, None);
        assert_eq!(abort.loser, None);
    }
}
