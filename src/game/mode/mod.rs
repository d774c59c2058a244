//! Game modes
//!
//! Each mode is a `ModeRules` implementation chosen once at match start. The shared
//! tick pipeline asks the rules which entities chase or flee each other, how a hit
//! is modified, what happens at the arena edge, and when the match is over.

mod crown;
mod free_for_all;
mod juggernaut;
mod potato;
mod teams;

pub use crown::CrownRules;
pub use free_for_all::FreeForAllRules;
pub use juggernaut::JuggernautRules;
pub use potato::PotatoRules;
pub use teams::{TeamDeathmatchRules, TeamSwapRules};

use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::game::match_result::Outcome;
use crate::game::request::MatchError;
use crate::game::state::{Color, EntityIndex, GameState, OrbKind, Player};
use crate::game::systems::combat::Hit;
use crate::game::systems::targeting::{self, Target};

/// Active game mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mode {
    FreeForAll,
    TeamDeathmatch,
    TeamSwap,
    Potato,
    Crown,
    Juggernaut,
}

impl Mode {
    pub const ALL: [Mode; 6] = [
        Mode::FreeForAll,
        Mode::TeamDeathmatch,
        Mode::TeamSwap,
        Mode::Potato,
        Mode::Crown,
        Mode::Juggernaut,
    ];

    /// Modes that split players into teams
    pub fn is_team_mode(&self) -> bool {
        matches!(self, Mode::TeamDeathmatch | Mode::TeamSwap)
    }

    pub fn rules(&self) -> Box<dyn ModeRules> {
        match self {
            Mode::FreeForAll => Box::new(FreeForAllRules),
            Mode::TeamDeathmatch => Box::new(TeamDeathmatchRules),
            Mode::TeamSwap => Box::new(TeamSwapRules),
            Mode::Potato => Box::new(PotatoRules),
            Mode::Crown => Box::new(CrownRules),
            Mode::Juggernaut => Box::new(JuggernautRules),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Mode::FreeForAll => "free-for-all",
            Mode::TeamDeathmatch => "team-deathmatch",
            Mode::TeamSwap => "team-swap",
            Mode::Potato => "potato",
            Mode::Crown => "crown",
            Mode::Juggernaut => "juggernaut",
        };
        f.write_str(name)
    }
}

impl FromStr for Mode {
    type Err = MatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ffa" | "free-for-all" | "freeforall" => Ok(Mode::FreeForAll),
            "teams" | "team-deathmatch" | "tdm" => Ok(Mode::TeamDeathmatch),
            "swap" | "team-swap" | "teamswap" => Ok(Mode::TeamSwap),
            "potato" | "hot-potato" => Ok(Mode::Potato),
            "crown" | "crown-keeper" => Ok(Mode::Crown),
            "juggernaut" | "jugg" => Ok(Mode::Juggernaut),
            other => Err(MatchError::UnknownMode(other.to_string())),
        }
    }
}

/// Mode strategy consulted by the shared tick pipeline
pub trait ModeRules: Send + Sync {
    fn mode(&self) -> Mode;

    /// Assign teams, roles and round timers on a freshly populated state
    fn setup(&self, state: &mut GameState);

    fn orbs_enabled(&self) -> bool {
        false
    }

    fn orb_catalog(&self) -> &'static [OrbKind] {
        &OrbKind::ALL
    }

    /// Critical hits only exist in modes without role tagging
    fn crits_enabled(&self) -> bool {
        false
    }

    fn lunge_enabled(&self) -> bool {
        false
    }

    /// Whether `a` and `b` fight each other (chase candidacy, clone shoves)
    fn is_enemy(&self, state: &GameState, a: EntityIndex, b: EntityIndex) -> bool {
        a != b && !same_team(&state.players[a], &state.players[b])
    }

    /// Whether an immune `seeker` runs from danger at all
    fn evades_when_immune(&self, _state: &GameState, _seeker: EntityIndex) -> bool {
        true
    }

    /// Whether `other` counts as a threat for an immune `seeker`
    fn is_threat(&self, state: &GameState, seeker: EntityIndex, other: EntityIndex) -> bool {
        self.is_enemy(state, seeker, other)
    }

    /// Role-based flee: the entity to run from, if any
    fn flee_from(&self, _state: &GameState, _seeker: EntityIndex) -> Option<EntityIndex> {
        None
    }

    /// Role pairing or nearest-enemy fallback
    fn chase_target(&self, state: &GameState, seeker: EntityIndex) -> Option<Target> {
        targeting::nearest_enemy_target(state, seeker, |a, b| self.is_enemy(state, a, b))
    }

    /// Movement multiplier from roles
    fn role_speed(&self, _player: &Player) -> f32 {
        1.0
    }

    /// Mode-specific changes to a landed hit
    fn resolve_combat_extras(&self, _state: &mut GameState, _hit: &mut Hit) {}

    /// Called when an entity ends its step outside the arena
    fn resolve_boundary(&self, state: &mut GameState, index: EntityIndex) {
        state.eliminate(index);
    }

    /// Round timers and role re-derivation, once per tick before entities move
    fn advance_round(&self, _state: &mut GameState) {}

    fn check_victory(&self, state: &GameState) -> Option<Outcome>;
}

pub(crate) fn same_team(a: &Player, b: &Player) -> bool {
    matches!((a.team, b.team), (Some(x), Some(y)) if x == y)
}

/// Give every entity its own random color (modes without teams)
pub(crate) fn assign_random_colors(state: &mut GameState) {
    for i in 0..state.players.len() {
        let color = Color::random(&mut state.rng);
        let player = &mut state.players[i];
        player.base_color = color;
        player.refresh_color();
    }
}

/// Last entity standing, or a draw when nobody is left
pub(crate) fn last_standing(state: &GameState) -> Option<Outcome> {
    let mut alive = state.alive_players();
    match (alive.next(), alive.next()) {
        (None, _) => Some(Outcome::Draw),
        (Some((_, p)), None) => Some(Outcome::Winner(p.name.clone())),
        _ => None,
    }
}

/// Pick up to `count` distinct live entities matching `filter`, uniformly at random
pub(crate) fn pick_random(
    state: &mut GameState,
    count: usize,
    filter: impl Fn(&Player) -> bool,
) -> Vec<EntityIndex> {
    let candidates: Vec<EntityIndex> = state
        .alive_players()
        .filter(|(_, p)| filter(p))
        .map(|(i, _)| i)
        .collect();
    candidates
        .choose_multiple(&mut state.rng, count)
        .copied()
        .collect()
}

/// Nearest live entity matching `filter` within `radius` of `seeker`
pub(crate) fn nearest_within(
    state: &GameState,
    seeker: EntityIndex,
    radius: f32,
    filter: impl Fn(&Player) -> bool,
) -> Option<EntityIndex> {
    let origin = state.players[seeker].position;
    targeting::nearest_entity(state, origin, |i, p| i != seeker && filter(p))
        .filter(|(_, dist)| *dist < radius)
        .map(|(i, _)| i)
}
