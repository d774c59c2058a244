//! Match start request and validation

use hashbrown::HashSet;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::game::mode::Mode;
use crate::game::state::Team;

/// Reasons a match cannot start
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatchError {
    #[error("at least 2 players are required, got {0}")]
    TooFewPlayers(usize),
    #[error("player names must not be empty")]
    EmptyName,
    #[error("duplicate player name: {0}")]
    DuplicateName(String),
    #[error("invalid team count {teams} for {players} players")]
    InvalidTeamCount { teams: usize, players: usize },
    #[error("unknown game mode: {0}")]
    UnknownMode(String),
    #[error("round of {seconds}s does not fit in a tick counter at {tick_rate} ticks/s")]
    RoundTooLong { seconds: u32, tick_rate: u32 },
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Everything needed to start one match
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchRequest {
    /// Participants in entry order
    pub names: Vec<String>,
    pub mode: Mode,
    /// Only used by team modes
    pub team_count: usize,
    /// Round length for timed modes (seconds)
    pub round_seconds: Option<u32>,
    pub seed: u64,
}

impl MatchRequest {
    pub fn new(names: Vec<String>, mode: Mode) -> Self {
        Self {
            names,
            mode,
            team_count: 2,
            round_seconds: None,
            seed: 0,
        }
    }

    /// Split a comma-separated name list, trimming and dropping blanks
    pub fn parse_names(input: &str) -> Vec<String> {
        input
            .split(',')
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// Effective round length in seconds; unset or zero falls back to `default`
    pub fn round_seconds_or(&self, default: u32) -> u32 {
        match self.round_seconds {
            Some(seconds) if seconds > 0 => seconds,
            _ => default,
        }
    }

    pub fn validate(&self) -> Result<(), MatchError> {
        if self.names.len() < 2 {
            return Err(MatchError::TooFewPlayers(self.names.len()));
        }

        let mut seen = HashSet::with_capacity(self.names.len());
        for name in &self.names {
            if name.trim().is_empty() {
                return Err(MatchError::EmptyName);
            }
            if !seen.insert(name.as_str()) {
                return Err(MatchError::DuplicateName(name.clone()));
            }
        }

        let teams_fit = (2..=Team::MAX.min(self.names.len())).contains(&self.team_count);
        if self.mode.is_team_mode() && !teams_fit {
            return Err(MatchError::InvalidTeamCount {
                teams: self.team_count,
                players: self.names.len(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::constants::roles::DEFAULT_ROUND_SECONDS;

    fn request(names: &str, mode: Mode) -> MatchRequest {
        MatchRequest::new(MatchRequest::parse_names(names), mode)
    }

    #[test]
    fn test_parse_names() {
        assert_eq!(
            MatchRequest::parse_names(" Ada, Bob,,  ,Cy "),
            vec!["Ada".to_string(), "Bob".to_string(), "Cy".to_string()]
        );
        assert!(MatchRequest::parse_names("").is_empty());
    }

    #[test]
    fn test_too_few_players() {
        assert_eq!(
            request("Ada", Mode::FreeForAll).validate(),
            Err(MatchError::TooFewPlayers(1))
        );
        assert!(request("Ada, Bob", Mode::FreeForAll).validate().is_ok());
    }

    #[test]
    fn test_duplicate_and_empty_names() {
        assert_eq!(
            request("Ada, Bob, Ada", Mode::Crown).validate(),
            Err(MatchError::DuplicateName("Ada".into()))
        );
        let blank = MatchRequest::new(vec!["Ada".into(), " ".into()], Mode::Potato);
        assert_eq!(blank.validate(), Err(MatchError::EmptyName));
    }

    #[test]
    fn test_team_count_checked_only_in_team_modes() {
        let mut req = request("Ada, Bob, Cy", Mode::TeamDeathmatch);
        req.team_count = 1;
        assert_eq!(
            req.validate(),
            Err(MatchError::InvalidTeamCount { teams: 1, players: 3 })
        );
        req.team_count = 4;
        assert!(req.validate().is_err());
        req.team_count = 3;
        assert!(req.validate().is_ok());

        req.mode = Mode::FreeForAll;
        req.team_count = 0;
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_round_seconds_default() {
        let mut req = request("Ada, Bob", Mode::Potato);
        assert_eq!(req.round_seconds_or(DEFAULT_ROUND_SECONDS), DEFAULT_ROUND_SECONDS);
        req.round_seconds = Some(0);
        assert_eq!(req.round_seconds_or(45), 45);
        req.round_seconds = Some(15);
        assert_eq!(req.round_seconds_or(DEFAULT_ROUND_SECONDS), 15);
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            MatchError::InvalidTeamCount { teams: 9, players: 3 }.to_string(),
            "invalid team count 9 for 3 players"
        );
        assert_eq!(MatchError::UnknownMode("x".into()).to_string(), "unknown game mode: x");
    }
}
