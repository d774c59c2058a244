use crate::game::constants::{clone, physics::FRICTION};
use crate::game::effects::Effect;
use crate::game::mode::ModeRules;
use crate::game::state::{EntityIndex, GameState};
use crate::game::systems::arena;
use crate::game::systems::targeting;

/// Advance every clone owned by `owner`.
///
/// The whole set is dropped once the clone effect runs out. Live clones chase the
/// nearest visible enemy of their owner and shove it on contact unless it is immune.
pub fn update(state: &mut GameState, owner: EntityIndex, rules: &dyn ModeRules) {
    if !state.players[owner].effects.is_active(Effect::Clone) {
        state.players[owner].clones.clear();
        return;
    }

    for slot in 0..state.players[owner].clones.len() {
        let clone_agent = state.players[owner].clones[slot];
        if !clone_agent.alive {
            continue;
        }

        let mut velocity = clone_agent.velocity;
        let target = targeting::nearest_entity(state, clone_agent.position, |i, p| {
            rules.is_enemy(state, owner, i) && !p.is_invisible()
        });
        if let Some((target, dist)) = target {
            let (direction, _) = clone_agent.position.direction_to(state.players[target].position);
            velocity += direction * clone::SPEED;

            let victim = &mut state.players[target];
            if dist < clone::HIT_RANGE && !victim.is_immune() {
                victim.velocity += direction * clone::KNOCKBACK;
            }
        }

        let position = clone_agent.position + velocity;
        let arena_radius = state.arena_radius;
        let agent = &mut state.players[owner].clones[slot];
        agent.position = position;
        agent.velocity = velocity * FRICTION;
        if arena::outside_arena(position, arena_radius) {
            agent.alive = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::mode::Mode;
    use crate::game::state::{CloneAgent, Color, Player, Team};
    use crate::util::vec2::Vec2;

    fn state_with_clone(mode: Mode, enemy_at: Vec2) -> GameState {
        let mut state = GameState::new(mode, 5);
        state.add_player(Player::new("Owner".into(), Vec2::ZERO, Color(0)));
        state.add_player(Player::new("Enemy".into(), enemy_at, Color(0)));
        state.players[0].effects.grant(Effect::Clone, 100);
        state.players[0].clones.push(CloneAgent::new(Vec2::new(20.0, 0.0)));
        state
    }

    #[test]
    fn test_clones_cleared_when_effect_inert() {
        let mut state = state_with_clone(Mode::FreeForAll, Vec2::new(100.0, 0.0));
        state.players[0].effects.clear(Effect::Clone);
        let rules = Mode::FreeForAll.rules();
        update(&mut state, 0, rules.as_ref());
        assert!(state.players[0].clones.is_empty());
    }

    #[test]
    fn test_clone_chases_enemy() {
        let mut state = state_with_clone(Mode::FreeForAll, Vec2::new(100.0, 0.0));
        let rules = Mode::FreeForAll.rules();
        update(&mut state, 0, rules.as_ref());

        let c = state.players[0].clones[0];
        assert!((c.position.x - (20.0 + clone::SPEED)).abs() < 1e-5);
        assert!((c.velocity.x - clone::SPEED * FRICTION).abs() < 1e-5);
        assert_eq!(state.players[1].velocity, Vec2::ZERO);
    }

    #[test]
    fn test_clone_shoves_on_contact() {
        let mut state = state_with_clone(Mode::FreeForAll, Vec2::new(35.0, 0.0));
        let rules = Mode::FreeForAll.rules();
        update(&mut state, 0, rules.as_ref());
        assert!((state.players[1].velocity.x - clone::KNOCKBACK).abs() < 1e-5);
    }

    #[test]
    fn test_clone_spares_immune_target() {
        let mut state = state_with_clone(Mode::FreeForAll, Vec2::new(35.0, 0.0));
        state.players[1].grant_immunity(10);
        let rules = Mode::FreeForAll.rules();
        update(&mut state, 0, rules.as_ref());
        assert_eq!(state.players[1].velocity, Vec2::ZERO);
    }

    #[test]
    fn test_clone_ignores_teammates() {
        let mut state = state_with_clone(Mode::TeamDeathmatch, Vec2::new(35.0, 0.0));
        state.players[0].join_team(Team(0));
        state.players[1].join_team(Team(0));
        let rules = Mode::TeamDeathmatch.rules();
        update(&mut state, 0, rules.as_ref());

        assert_eq!(state.players[1].velocity, Vec2::ZERO);
        assert_eq!(state.players[0].clones[0].position, Vec2::new(20.0, 0.0));
    }

    #[test]
    fn test_clone_dies_outside_arena() {
        let mut state = state_with_clone(Mode::FreeForAll, Vec2::new(-100.0, 0.0));
        state.players[0].clones[0].position = Vec2::new(349.0, 0.0);
        state.players[0].clones[0].velocity = Vec2::new(5.0, 0.0);
        let rules = Mode::FreeForAll.rules();
        update(&mut state, 0, rules.as_ref());

        assert!(!state.players[0].clones[0].alive);
        assert_eq!(state.players[0].clones.len(), 1);
    }
}
