//! Menu commands.
//!
//! Input is trimmed and compared case-insensitively:
//!
//! - before login: `login`, `spectate`, `quit`
//! - after login:  `play`, `stats`, `top10`, `quit`

/// Commands accepted right after connecting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MainCommand {
    Login,
    Spectate,
    Quit,
}

impl MainCommand {
    /// Returns `None` for anything unrecognised.
    pub fn parse(line: &str) -> Option<Self> {
        match normalize(line).as_str() {
            "login" => Some(MainCommand::Login),
            "spectate" => Some(MainCommand::Spectate),
            "quit" => Some(MainCommand::Quit),
            _ => None,
        }
    }
}

/// Commands accepted in the lobby after a successful login.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LobbyCommand {
    Play,
    Stats,
    Top10,
    Quit,
}

impl LobbyCommand {
    pub fn parse(line: &str) -> Option<Self> {
        match normalize(line).as_str() {
            "play" => Some(LobbyCommand::Play),
            "stats" => Some(LobbyCommand::Stats),
            "top10" => Some(LobbyCommand::Top10),
            "quit" => Some(LobbyCommand::Quit),
            _ => None,
        }
    }
}

fn normalize(line: &str) -> String {
    line.trim().to_ascii_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn main_commands_ignore_case_and_whitespace() {
        assert_eq!(MainCommand::parse("login"), Some(MainCommand::Login));
        assert_eq!(MainCommand::parse("  SpEcTaTe \r"), Some(MainCommand::Spectate));
        assert_eq!(MainCommand::parse("QUIT"), Some(MainCommand::Quit));
        assert_eq!(MainCommand::parse("play"), None);
        assert_eq!(MainCommand::parse(""), None);
    }

    #[test]
    fn lobby_commands() {
        assert_eq!(LobbyCommand::parse("Play\n"), Some(LobbyCommand::Play));
        assert_eq!(LobbyCommand::parse("stats"), Some(LobbyCommand::Stats));
        assert_eq!(LobbyCommand::parse("TOP10"), Some(LobbyCommand::Top10));
        assert_eq!(LobbyCommand::parse("quit"), Some(LobbyCommand::Quit));
        assert_eq!(LobbyCommand::parse("top 10"), None);
        assert_eq!(LobbyCommand::parse("login"), None);
    }
}
