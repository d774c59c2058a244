//! Hot potato
//!
//! Holders chase everyone else and pass the potato on contact. When the round timer
//! runs out every holder explodes and a fresh set is drawn from the survivors.

use tracing::{debug, info};

use crate::game::constants::{combat, movement, roles};
use crate::game::game_loop::GameLoopEvent;
use crate::game::match_result::Outcome;
use crate::game::mode::{
    assign_random_colors, last_standing, nearest_within, pick_random, Mode, ModeRules,
};
use crate::game::state::{EntityIndex, GameState, Player};
use crate::game::systems::combat::Hit;
use crate::game::systems::physics;
use crate::game::systems::targeting::{self, Target};

pub struct PotatoRules;

/// Holders for a round: one per `PLAYERS_PER_POTATO` live entities, at least one,
/// at most `MAX_POTATO_HOLDERS`, and never everyone.
pub fn holder_count(alive: usize) -> usize {
    alive
        .div_ceil(roles::PLAYERS_PER_POTATO)
        .clamp(1, roles::MAX_POTATO_HOLDERS)
        .min(alive.saturating_sub(1))
}

fn deal_potatoes(state: &mut GameState) -> Vec<EntityIndex> {
    for player in state.players.iter_mut() {
        player.is_potato = false;
    }
    let count = holder_count(state.alive_count());
    let holders = pick_random(state, count, |_| true);
    for &index in &holders {
        state.players[index].is_potato = true;
    }
    for player in state.players.iter_mut() {
        player.refresh_color();
    }
    holders
}

fn detonate(state: &mut GameState) {
    let holders: Vec<EntityIndex> = state
        .alive_players()
        .filter(|(_, p)| p.is_potato)
        .map(|(i, _)| i)
        .collect();
    let names: Vec<String> = holders.iter().map(|&i| state.players[i].name.clone()).collect();

    for &index in &holders {
        state.players[index].is_potato = false;
        state.eliminate(index);
    }
    state.events.push(GameLoopEvent::PotatoesDetonated { holders: holders.clone() });
    state.announce(format!("BOOM! {} exploded", names.join(", ")));
    info!("Potatoes detonated: {}", names.join(", "));

    if state.alive_count() > 1 {
        let dealt = deal_potatoes(state);
        state.round_remaining = Some(state.round_ticks);
        info!("New round with {} potato holder(s)", dealt.len());
    }
}

impl ModeRules for PotatoRules {
    fn mode(&self) -> Mode {
        Mode::Potato
    }

    fn setup(&self, state: &mut GameState) {
        assign_random_colors(state);
        deal_potatoes(state);
        state.round_remaining = Some(state.round_ticks);
    }

    fn is_threat(&self, state: &GameState, _seeker: EntityIndex, other: EntityIndex) -> bool {
        state.players[other].is_potato
    }

    fn flee_from(&self, state: &GameState, seeker: EntityIndex) -> Option<EntityIndex> {
        if state.players[seeker].is_potato {
            return None;
        }
        nearest_within(state, seeker, roles::FLEE_RADIUS, |p| p.is_potato)
    }

    fn chase_target(&self, state: &GameState, seeker: EntityIndex) -> Option<Target> {
        let player = &state.players[seeker];
        if !player.is_potato {
            return None;
        }
        targeting::nearest_entity(state, player.position, |i, p| {
            i != seeker && !p.is_potato && !p.is_invisible()
        })
        .map(|(i, _)| Target::Entity(i))
    }

    fn role_speed(&self, player: &Player) -> f32 {
        if player.is_potato {
            movement::POTATO_MULT
        } else {
            1.0
        }
    }

    fn resolve_combat_extras(&self, state: &mut GameState, hit: &mut Hit) {
        if !state.players[hit.attacker].is_potato || state.players[hit.target].is_potato {
            return;
        }

        let holder = &mut state.players[hit.attacker];
        holder.is_potato = false;
        holder.grant_immunity(combat::TAG_IMMUNITY);

        let target = &mut state.players[hit.target];
        target.is_potato = true;
        target.refresh_color();
        hit.knockback = 0.0;

        debug!(
            "{} passed the potato to {}",
            state.players[hit.attacker].name, state.players[hit.target].name
        );
        state.events.push(GameLoopEvent::PotatoPassed { from: hit.attacker, to: hit.target });
    }

    fn resolve_boundary(&self, state: &mut GameState, index: EntityIndex) {
        let arena_radius = state.arena_radius;
        let player = &mut state.players[index];
        if player.is_potato {
            physics::bounce(&mut player.position, &mut player.velocity, arena_radius);
        } else {
            state.eliminate(index);
        }
    }

    fn advance_round(&self, state: &mut GameState) {
        let Some(remaining) = state.round_remaining else {
            return;
        };
        if remaining == 0 {
            return;
        }
        state.round_remaining = Some(remaining - 1);
        if remaining == 1 {
            detonate(state);
        }
    }

    fn check_victory(&self, state: &GameState) -> Option<Outcome> {
        if let Some(outcome) = last_standing(state) {
            return Some(outcome);
        }
        let time_left = state.round_remaining.is_some_and(|t| t > 0);
        if time_left && state.potato_count() == state.alive_count() {
            return Some(Outcome::Potatoes);
        }
        None
    }
}
