//! Match result and ranking system
//!
//! Computes the terminal outcome banner and final rankings.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::game::mode::Mode;
use crate::game::state::{GameState, Player, Team};

/// Terminal outcome of a match
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// Last entity standing, or crown holder at time-out
    Winner(String),
    Team(Team),
    /// Only potato holders remain
    Potatoes,
    /// Juggernaut eliminated with hunters left
    Hunters,
    Juggernaut(String),
    /// Nobody left
    Draw,
}

impl Outcome {
    /// Banner text shown on the final frame
    pub fn banner(&self) -> String {
        match self {
            Outcome::Winner(name) | Outcome::Juggernaut(name) => format!("{name} wins!"),
            Outcome::Team(team) => format!("{team} wins!"),
            Outcome::Potatoes => "The potatoes win!".to_string(),
            Outcome::Hunters => "The hunters win!".to_string(),
            Outcome::Draw => "No one wins!".to_string(),
        }
    }

    /// Whether `player` is on the winning side
    pub fn includes(&self, player: &Player) -> bool {
        match self {
            Outcome::Winner(name) | Outcome::Juggernaut(name) => player.name == *name,
            Outcome::Team(team) => player.team == Some(*team),
            Outcome::Potatoes => player.alive && player.is_potato,
            Outcome::Hunters => !player.is_juggernaut,
            Outcome::Draw => false,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.banner())
    }
}

/// Match result information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchResult {
    pub mode: Mode,
    pub outcome: Option<Outcome>,
    pub banner: String,
    pub ticks: u64,
    /// Ended by tick limit or cancellation rather than a win condition
    pub unfinished: bool,
    pub rankings: Vec<PlayerRanking>,
}

/// Player ranking in match results
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerRanking {
    pub name: String,
    pub rank: u32,
    pub won: bool,
    pub survived: bool,
    pub team: Option<Team>,
    /// Seconds spent holding the crown
    pub crown_seconds: f32,
}

/// Determine match result from game state
pub fn determine_result(state: &GameState) -> MatchResult {
    let rate = state.tick_rate.max(1) as f32;
    let mut ranked: Vec<(u64, PlayerRanking)> = state
        .players
        .iter()
        .map(|p| {
            let ranking = PlayerRanking {
                name: p.name.clone(),
                rank: 0,
                won: state.outcome.as_ref().is_some_and(|o| o.includes(p)),
                survived: p.alive,
                team: p.team,
                crown_seconds: p.crown_time as f32 / rate,
            };
            (p.crown_time, ranking)
        })
        .collect();

    // Sort by: won (desc), survived (desc), crown time (desc); ties keep entry order
    ranked.sort_by(|(ta, a), (tb, b)| {
        b.won
            .cmp(&a.won)
            .then_with(|| b.survived.cmp(&a.survived))
            .then_with(|| tb.cmp(ta))
    });

    let rankings: Vec<PlayerRanking> = ranked
        .into_iter()
        .enumerate()
        .map(|(i, (_, mut ranking))| {
            ranking.rank = (i + 1) as u32;
            ranking
        })
        .collect();

    let banner = match &state.outcome {
        Some(outcome) => outcome.banner(),
        None => "No result".to_string(),
    };

    MatchResult {
        mode: state.mode,
        outcome: state.outcome.clone(),
        banner,
        ticks: state.tick,
        unfinished: state.outcome.is_none(),
        rankings,
    }
}
