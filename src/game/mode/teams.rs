//! Team modes: plain deathmatch and team-swap, where hard hits recruit the target

use hashbrown::HashSet;
use tracing::debug;

use crate::game::constants::combat;
use crate::game::game_loop::GameLoopEvent;
use crate::game::match_result::Outcome;
use crate::game::mode::{Mode, ModeRules};
use crate::game::state::{GameState, OrbKind, Team};
use crate::game::systems::combat::Hit;

/// Team-swap catalog: every orb except clone
const SWAP_CATALOG: [OrbKind; 7] = [
    OrbKind::Strength,
    OrbKind::Speed,
    OrbKind::Lucky,
    OrbKind::Freeze,
    OrbKind::Invisible,
    OrbKind::Shield,
    OrbKind::Blast,
];

/// Deal entities round-robin into `team_count` teams
fn assign_teams(state: &mut GameState) {
    let teams = state.team_count.clamp(2, Team::MAX);
    state.team_count = teams;
    for (i, player) in state.players.iter_mut().enumerate() {
        player.join_team(Team((i % teams) as u8));
    }
}

/// One team with live members left wins; none left is a draw
fn last_team(state: &GameState) -> Option<Outcome> {
    let live: HashSet<Team> = state.alive_players().filter_map(|(_, p)| p.team).collect();
    match live.len() {
        0 => Some(Outcome::Draw),
        1 => live.into_iter().next().map(Outcome::Team),
        _ => None,
    }
}

pub struct TeamDeathmatchRules;

impl ModeRules for TeamDeathmatchRules {
    fn mode(&self) -> Mode {
        Mode::TeamDeathmatch
    }

    fn setup(&self, state: &mut GameState) {
        assign_teams(state);
    }

    fn orbs_enabled(&self) -> bool {
        true
    }

    fn crits_enabled(&self) -> bool {
        true
    }

    fn check_victory(&self, state: &GameState) -> Option<Outcome> {
        last_team(state)
    }
}

pub struct TeamSwapRules;

impl ModeRules for TeamSwapRules {
    fn mode(&self) -> Mode {
        Mode::TeamSwap
    }

    fn setup(&self, state: &mut GameState) {
        assign_teams(state);
    }

    fn orbs_enabled(&self) -> bool {
        true
    }

    fn orb_catalog(&self) -> &'static [OrbKind] {
        &SWAP_CATALOG
    }

    fn resolve_combat_extras(&self, state: &mut GameState, hit: &mut Hit) {
        if hit.knockback <= combat::SWAP_THRESHOLD {
            return;
        }
        let Some(team) = state.players[hit.attacker].team else {
            return;
        };
        let target = &mut state.players[hit.target];
        if target.team == Some(team) {
            return;
        }

        target.join_team(team);
        hit.knockback = combat::SWAP_KNOCKBACK;
        debug!("{} switched to {}", target.name, team);
        state.events.push(GameLoopEvent::TeamSwapped { index: hit.target, team });
    }

    fn check_victory(&self, state: &GameState) -> Option<Outcome> {
        last_team(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::state::{Color, Player};
    use crate::util::vec2::Vec2;

    fn create_team_state(mode: Mode, count: usize, teams: usize) -> GameState {
        let mut state = GameState::new(mode, 13);
        state.team_count = teams;
        for i in 0..count {
            state.add_player(Player::new(format!("P{i}"), Vec2::ZERO, Color(0)));
        }
        mode.rules().setup(&mut state);
        state
    }

    #[test]
    fn test_round_robin_teams() {
        let state = create_team_state(Mode::TeamDeathmatch, 5, 2);
        let teams: Vec<u8> = state.players.iter().map(|p| p.team.map_or(99, |t| t.0)).collect();
        assert_eq!(teams, vec![0, 1, 0, 1, 0]);
        assert_eq!(state.players[1].color, Team(1).color());
    }

    #[test]
    fn test_teammates_are_not_enemies() {
        let state = create_team_state(Mode::TeamDeathmatch, 4, 2);
        assert!(!TeamDeathmatchRules.is_enemy(&state, 0, 2));
        assert!(TeamDeathmatchRules.is_enemy(&state, 0, 1));
    }

    #[test]
    fn test_last_team_wins() {
        let mut state = create_team_state(Mode::TeamDeathmatch, 4, 2);
        assert_eq!(TeamDeathmatchRules.check_victory(&state), None);

        state.eliminate(1);
        state.eliminate(3);
        assert_eq!(
            TeamDeathmatchRules.check_victory(&state),
            Some(Outcome::Team(Team(0)))
        );
    }

    #[test]
    fn test_swap_ends_when_everyone_recruited() {
        let mut state = create_team_state(Mode::TeamSwap, 3, 3);
        assert_eq!(TeamSwapRules.check_victory(&state), None);
        state.players[1].join_team(Team(0));
        state.players[2].join_team(Team(0));
        assert_eq!(TeamSwapRules.check_victory(&state), Some(Outcome::Team(Team(0))));
    }

    #[test]
    fn test_swap_below_threshold_keeps_team() {
        let mut state = create_team_state(Mode::TeamSwap, 2, 2);
        let mut hit = Hit {
            attacker: 0,
            target: 1,
            knockback: combat::SWAP_THRESHOLD,
            damage: 0.0,
            crit: false,
        };
        TeamSwapRules.resolve_combat_extras(&mut state, &mut hit);

        assert_eq!(state.players[1].team, Some(Team(1)));
        assert_eq!(hit.knockback, combat::SWAP_THRESHOLD);
        assert!(state.events.is_empty());
    }

    #[test]
    fn test_swap_above_threshold_recruits() {
        let mut state = create_team_state(Mode::TeamSwap, 2, 2);
        let mut hit = Hit { attacker: 0, target: 1, knockback: 7.5, damage: 0.0, crit: false };
        TeamSwapRules.resolve_combat_extras(&mut state, &mut hit);

        assert_eq!(state.players[1].team, Some(Team(0)));
        assert_eq!(hit.knockback, combat::SWAP_KNOCKBACK);
        assert_eq!(state.events, vec![GameLoopEvent::TeamSwapped { index: 1, team: Team(0) }]);
    }

    #[test]
    fn test_swap_catalog_excludes_clone() {
        assert!(!TeamSwapRules.orb_catalog().contains(&OrbKind::Clone));
        assert_eq!(TeamDeathmatchRules.orb_catalog().len(), OrbKind::ALL.len());
    }
}
