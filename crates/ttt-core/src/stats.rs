//! Statistics records returned by the persistence collaborator.

/// Lifetime record of one identity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlayerStats {
    pub games: u32,
    pub wins: u32,
    pub losses: u32,
    pub draws: u32,
}

impl PlayerStats {
    /// Wins over games played, in `0.0..=1.0`. Zero games gives `0.0`.
    pub fn win_rate(&self) -> f64 {
        if self.games == 0 {
            0.0
        } else {
            f64::from(self.wins) / f64::from(self.games)
        }
    }
}

/// One leaderboard row.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedPlayer {
    pub name: String,
    /// In `0.0..=1.0`.
    pub win_rate: f64,
}
