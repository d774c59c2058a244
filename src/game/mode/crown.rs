//! Crown keeper
//!
//! One holder runs from everyone, everyone else chases and lunges at the holder.
//! Touching the holder steals the crown. Whoever holds it when the timer runs out wins.

use tracing::{debug, info, warn};

use crate::game::constants::{combat, movement, roles};
use crate::game::effects::Effect;
use crate::game::game_loop::GameLoopEvent;
use crate::game::match_result::Outcome;
use crate::game::mode::{
    assign_random_colors, last_standing, nearest_within, pick_random, Mode, ModeRules,
};
use crate::game::state::{EntityIndex, GameState, Player};
use crate::game::systems::combat::Hit;
use crate::game::systems::targeting::Target;

pub struct CrownRules;

/// Crown a random live entity and protect it briefly. Returns the new holder.
fn crown_random(state: &mut GameState) -> Option<EntityIndex> {
    let holder = pick_random(state, 1, |p| !p.is_crown).into_iter().next()?;
    let player = &mut state.players[holder];
    player.is_crown = true;
    player.grant_immunity(combat::TAG_IMMUNITY);
    Some(holder)
}

impl ModeRules for CrownRules {
    fn mode(&self) -> Mode {
        Mode::Crown
    }

    fn setup(&self, state: &mut GameState) {
        assign_random_colors(state);
        if let Some(holder) = crown_random(state) {
            info!("{} starts with the crown", state.players[holder].name);
        }
        state.round_remaining = Some(state.round_ticks);
    }

    fn lunge_enabled(&self) -> bool {
        true
    }

    /// Only the holder runs while immune
    fn evades_when_immune(&self, state: &GameState, seeker: EntityIndex) -> bool {
        state.players[seeker].is_crown
    }

    fn is_threat(&self, state: &GameState, _seeker: EntityIndex, other: EntityIndex) -> bool {
        !state.players[other].is_crown
    }

    fn flee_from(&self, state: &GameState, seeker: EntityIndex) -> Option<EntityIndex> {
        if !state.players[seeker].is_crown {
            return None;
        }
        nearest_within(state, seeker, roles::FLEE_RADIUS, |p| !p.is_crown)
    }

    fn chase_target(&self, state: &GameState, seeker: EntityIndex) -> Option<Target> {
        if state.players[seeker].is_crown {
            return None;
        }
        let holder = state.crown_holder()?;
        if state.players[holder].is_invisible() {
            return None;
        }
        Some(Target::Entity(holder))
    }

    fn role_speed(&self, player: &Player) -> f32 {
        if !player.is_crown {
            1.0
        } else if player.effects.is_active(Effect::Speed) {
            movement::CROWN_SPEED_MULT
        } else {
            movement::CROWN_MULT
        }
    }

    fn resolve_combat_extras(&self, state: &mut GameState, hit: &mut Hit) {
        if state.players[hit.attacker].is_crown || !state.players[hit.target].is_crown {
            return;
        }

        let victim = &mut state.players[hit.target];
        victim.is_crown = false;
        victim.refresh_color();

        let thief = &mut state.players[hit.attacker];
        thief.is_crown = true;
        thief.grant_immunity(combat::TAG_IMMUNITY);
        hit.knockback = 0.0;

        debug!(
            "{} stole the crown from {}",
            state.players[hit.attacker].name, state.players[hit.target].name
        );
        state.events.push(GameLoopEvent::CrownStolen { from: hit.target, to: hit.attacker });
    }

    fn resolve_boundary(&self, state: &mut GameState, index: EntityIndex) {
        let was_holder = state.players[index].is_crown;
        state.eliminate(index);
        if !was_holder {
            return;
        }

        let fallen = &mut state.players[index];
        fallen.is_crown = false;
        fallen.refresh_color();
        if let Some(heir) = crown_random(state) {
            let name = state.players[heir].name.clone();
            debug!("Crown passes to {}", name);
            state.announce(format!("{} takes the crown!", name));
            state.events.push(GameLoopEvent::CrownReassigned { to: heir });
        }
    }

    fn advance_round(&self, state: &mut GameState) {
        if state.crown_holder().is_none() && state.alive_count() > 0 {
            warn!("No live crown holder at tick {}, crowning a new one", state.tick);
            for player in state.players.iter_mut() {
                player.is_crown = false;
            }
            if let Some(heir) = crown_random(state) {
                state.events.push(GameLoopEvent::CrownReassigned { to: heir });
            }
        }

        if let Some(holder) = state.crown_holder() {
            state.players[holder].crown_time += 1;
        }
        if let Some(remaining) = state.round_remaining.as_mut() {
            *remaining = remaining.saturating_sub(1);
        }
    }

    fn check_victory(&self, state: &GameState) -> Option<Outcome> {
        if let Some(outcome) = last_standing(state) {
            return Some(outcome);
        }
        if state.round_remaining == Some(0) {
            let holder = state.crown_holder()?;
            return Some(Outcome::Winner(state.players[holder].name.clone()));
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::state::Color;
    use crate::game::systems::arena;
    use crate::util::vec2::Vec2;

    fn create_crown_state(positions: &[(f32, f32)]) -> GameState {
        let mut state = GameState::new(Mode::Crown, 19);
        state.round_ticks = 300;
        for (i, &(x, y)) in positions.iter().enumerate() {
            state.add_player(Player::new(format!("P{i}"), Vec2::new(x, y), Color(0x555555)));
        }
        state
    }

    #[test]
    fn test_setup_crowns_exactly_one() {
        let mut state = create_crown_state(&[(0.0, 0.0), (10.0, 0.0), (20.0, 0.0)]);
        CrownRules.setup(&mut state);

        assert_eq!(state.players.iter().filter(|p| p.is_crown).count(), 1);
        let holder = state.crown_holder().unwrap();
        assert!(state.players[holder].is_immune());
        assert_eq!(state.players[holder].color, Color::CROWN);
        assert_eq!(state.round_remaining, Some(300));
    }

    #[test]
    fn test_non_holders_chase_visible_holder() {
        let mut state = create_crown_state(&[(0.0, 0.0), (200.0, 0.0), (20.0, 0.0)]);
        state.players[1].is_crown = true;
        assert_eq!(CrownRules.chase_target(&state, 0), Some(Target::Entity(1)));
        assert_eq!(CrownRules.chase_target(&state, 1), None);

        state.players[1].effects.grant(Effect::Invisible, 5);
        assert_eq!(CrownRules.chase_target(&state, 0), None);
    }

    #[test]
    fn test_holder_flees_nearest_within_range() {
        let mut state = create_crown_state(&[(0.0, 0.0), (200.0, 0.0), (20.0, 0.0)]);
        state.players[0].is_crown = true;
        assert_eq!(CrownRules.flee_from(&state, 0), Some(2));
        assert_eq!(CrownRules.flee_from(&state, 1), None);
    }

    #[test]
    fn test_only_holder_evades_when_immune() {
        let mut state = create_crown_state(&[(0.0, 0.0), (50.0, 0.0)]);
        state.players[0].is_crown = true;
        assert!(CrownRules.evades_when_immune(&state, 0));
        assert!(!CrownRules.evades_when_immune(&state, 1));
    }

    #[test]
    fn test_holder_elimination_reassigns_crown() {
        let mut state = create_crown_state(&[(360.0, 0.0), (0.0, 0.0), (20.0, 0.0)]);
        state.players[0].is_crown = true;
        let rules = Mode::Crown.rules();

        assert!(arena::check_boundary(&mut state, 0, rules.as_ref()));
        assert!(!state.players[0].alive);
        assert!(!state.players[0].is_crown);

        let heir = state.crown_holder().unwrap();
        assert!(heir == 1 || heir == 2);
        assert!(state.players[heir].is_immune());
        assert_eq!(state.players.iter().filter(|p| p.is_crown).count(), 1);
        assert!(state.events.contains(&GameLoopEvent::CrownReassigned { to: heir }));
    }

    #[test]
    fn test_missing_holder_is_rederived() {
        let mut state = create_crown_state(&[(0.0, 0.0), (20.0, 0.0)]);
        state.round_remaining = Some(10);
        CrownRules.advance_round(&mut state);

        let holder = state.crown_holder().unwrap();
        assert_eq!(state.players[holder].crown_time, 1);
        assert_eq!(state.round_remaining, Some(9));
    }

    #[test]
    fn test_holder_wins_when_time_runs_out() {
        let mut state = create_crown_state(&[(0.0, 0.0), (20.0, 0.0), (40.0, 0.0)]);
        state.players[2].is_crown = true;
        state.round_remaining = Some(1);
        assert_eq!(CrownRules.check_victory(&state), None);

        CrownRules.advance_round(&mut state);
        assert_eq!(CrownRules.check_victory(&state), Some(Outcome::Winner("P2".into())));
    }

    #[test]
    fn test_crown_speed_bonus() {
        let mut player = Player::new("P".into(), Vec2::ZERO, Color(0));
        player.is_crown = true;
        assert_eq!(CrownRules.role_speed(&player), movement::CROWN_MULT);
        player.effects.grant(Effect::Speed, 5);
        assert_eq!(CrownRules.role_speed(&player), movement::CROWN_SPEED_MULT);
    }
}
