//! Prompts and status lines.
//!
//! Constants are sent verbatim. Functions format lines that carry names,
//! counts or ids. Prompts (ending in `": "`) have no trailing newline.

use ttt_core::{Marker, MoveError, PlayerStats, RankedPlayer};

// -----------------------------------------------------------------------------
// Connection / login
// -----------------------------------------------------------------------------

pub const MAIN_MENU: &str = "\r\nEnter: 'login' to authenticate,\r\n       'spectate' to watch or\r\n       'quit' to quit: ";
pub const INVALID_MAIN_CHOICE: &str = "Invalid choice. Disconnecting.\r\n";
pub const GOODBYE: &str = "Goodbye!\r\n";
pub const SERVER_FULL: &str = "Server is full. Try again later.\r\n";

pub const NICKNAME_PROMPT: &str = "Enter your nickname: ";
pub const EMPTY_NICKNAME: &str = "Nickname cannot be empty. Disconnecting.\r\n";
pub const ALREADY_LOGGED_IN: &str = "User already logged in. Disconnecting.\r\n";
pub const PASSWORD_PROMPT: &str = "Enter your password: ";
pub const REGISTER_PROMPT: &str = "Enter your password to register: ";
pub const REGISTERED: &str = "You have now registered into the game.\r\n";
pub const WELCOME_BACK: &str = "\r\nWelcome back!\r\n";
pub const INVALID_PASSWORD: &str = "Invalid password. Disconnecting.\r\n";
pub const LOGIN_FAILED: &str = "Error processing nickname. Disconnecting.\r\n";

pub fn attempts_left(left: u32) -> String {
    format!("Invalid password. Try again. {left} attempt(s) left.\r\n")
}

// -----------------------------------------------------------------------------
// Lobby
// -----------------------------------------------------------------------------

pub const LOBBY_MENU: &str = "\r\nEnter: 'play' to join a game,\r\n       'stats' to view your statistics,\r\n       'top10' to view top 10 players or\r\n       'quit' to quit: ";
pub const INVALID_LOBBY_CHOICE: &str =
    "Invalid choice. Please enter 'play', 'stats', 'top10' or 'quit': \r\n";
pub const WAITING_FOR_OPPONENT: &str = "Waiting for an opponent...\r\n";
pub const STILL_WAITING: &str = "Still waiting for an opponent...\r\n";
pub const STATS_FAILED: &str = "Error retrieving statistics. Disconnecting.\r\n";
pub const TOP_FAILED: &str = "Error printing top10 players. Disconnecting.\r\n";

/// Personal statistics block.
pub fn stats(name: &str, s: &PlayerStats) -> String {
    format!(
        "{name}'s stats:\r\nAll games: {:2}\r\nWins: {:7}\r\nLosses: {:5}\r\nDraws: {:6}\r\nWinrate: {:7.1}%\r\n",
        s.games,
        s.wins,
        s.losses,
        s.draws,
        s.win_rate() * 100.0
    )
}

/// Leaderboard table, best first.
pub fn top_players(players: &[RankedPlayer]) -> String {
    let mut out = format!(
        "\r\nTop {} Players:\r\n    {:<20} {:<10}\r\n",
        players.len(),
        "Nickname",
        "Winrate"
    );
    for (i, p) in players.iter().enumerate() {
        out.push_str(&format!("{:2}. {:<20} {:6.1}%\r\n", i + 1, p.name, p.win_rate * 100.0));
    }
    out
}

// -----------------------------------------------------------------------------
// Spectating
// -----------------------------------------------------------------------------

pub const NO_ACTIVE_GAMES: &str = "No games are currently active. Disconnecting.\r\n";
pub const AVAILABLE_GAMES: &str = "Available games:\r\n";
pub const GAME_ID_PROMPT: &str = "Enter the ID of the game you want to spectate: ";
pub const INVALID_GAME_ID: &str =
    "Invalid game ID or the game has finished in the meantime. Disconnecting.\r\n";

pub fn game_listing(id: &str, first: &str, second: &str) -> String {
    format!("Game ID: {id} (Players: {first} vs {second})\r\n")
}

pub fn now_spectating(id: &str) -> String {
    format!("You are now spectating game {id}.\r\n")
}

pub fn turn_notice(name: &str) -> String {
    format!("{name}'s turn:\r\n")
}

// -----------------------------------------------------------------------------
// Game
// -----------------------------------------------------------------------------

pub const WAITING_FOR_TURN: &str = "Waiting for your opponent's turn...\r\n";
pub const MOVE_PROMPT: &str = "Your move (format: A1, B3, etc.): ";
pub const DRAW: &str = "Game Over. It's a draw!\r\n";

pub fn game_starting(marker: Marker, opponent: &str) -> String {
    format!("The game is starting against {opponent}... you're player '{marker}'\r\n")
}

pub fn invalid_move(err: MoveError) -> String {
    format!("Invalid move: {err}. Try again.\r\n")
}

pub fn winner(name: &str) -> String {
    format!("Game Over. {name} wins!\r\n")
}

pub fn aborted(cause: &str) -> String {
    format!("Game Over due to an error: {cause}\r\n")
}
