//! Arena boundary checks
//!
//! Crossing the boundary is strict: sitting exactly on the circle is still inside.

use crate::game::mode::ModeRules;
use crate::game::state::{EntityIndex, GameState};
use crate::util::vec2::Vec2;

/// Spawn position for an entity: a uniform offset around the arena center
pub fn spawn_position(rng: &mut impl rand::Rng) -> Vec2 {
    use crate::game::constants::arena::SPAWN_SCATTER;

    Vec2::new(
        rng.gen_range(-SPAWN_SCATTER..SPAWN_SCATTER),
        rng.gen_range(-SPAWN_SCATTER..SPAWN_SCATTER),
    )
}

#[inline]
pub fn outside_arena(position: Vec2, arena_radius: f32) -> bool {
    position.length() > arena_radius
}

/// Hand an entity that ended its step outside the arena to the mode's boundary
/// policy. Returns true if the policy ran.
pub fn check_boundary(state: &mut GameState, index: EntityIndex, rules: &dyn ModeRules) -> bool {
    let player = &state.players[index];
    if !player.alive || !outside_arena(player.position, state.arena_radius) {
        return false;
    }
    rules.resolve_boundary(state, index);
    true
}
