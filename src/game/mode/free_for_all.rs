use crate::game::match_result::Outcome;
use crate::game::mode::{assign_random_colors, last_standing, Mode, ModeRules};
use crate::game::state::GameState;

/// Everyone against everyone, last one inside the arena wins
pub struct FreeForAllRules;

impl ModeRules for FreeForAllRules {
    fn mode(&self) -> Mode {
        Mode::FreeForAll
    }

    fn setup(&self, state: &mut GameState) {
        assign_random_colors(state);
    }

    fn orbs_enabled(&self) -> bool {
        true
    }

    fn crits_enabled(&self) -> bool {
        true
    }

    fn check_victory(&self, state: &GameState) -> Option<Outcome> {
        last_standing(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::state::{Color, Player};
    use crate::util::vec2::Vec2;

    fn create_test_state(count: usize) -> GameState {
        let mut state = GameState::new(Mode::FreeForAll, 21);
        for i in 0..count {
            state.add_player(Player::new(format!("P{i}"), Vec2::ZERO, Color(0)));
        }
        state
    }

    #[test]
    fn test_no_winner_while_two_alive() {
        let state = create_test_state(3);
        assert_eq!(FreeForAllRules.check_victory(&state), None);
    }

    #[test]
    fn test_last_standing_wins() {
        let mut state = create_test_state(3);
        state.eliminate(0);
        state.eliminate(2);
        assert_eq!(
            FreeForAllRules.check_victory(&state),
            Some(Outcome::Winner("P1".into()))
        );
    }

    #[test]
    fn test_nobody_left_is_draw() {
        let mut state = create_test_state(2);
        state.eliminate(0);
        state.eliminate(1);
        assert_eq!(FreeForAllRules.check_victory(&state), Some(Outcome::Draw));
    }

    #[test]
    fn test_everyone_is_an_enemy() {
        let mut state = create_test_state(3);
        FreeForAllRules.setup(&mut state);
        assert!(FreeForAllRules.is_enemy(&state, 0, 1));
        assert!(!FreeForAllRules.is_enemy(&state, 1, 1));
        assert!(state.players.iter().all(|p| p.team.is_none()));
    }
}
