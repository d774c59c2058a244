//! Orb (power-up) spawning and pickup
//!
//! Spawning is gated on the wall clock, not on ticks.

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;

use crate::game::constants::{clone, orb};
use crate::game::effects::Effect;
use crate::game::game_loop::GameLoopEvent;
use crate::game::mode::ModeRules;
use crate::game::state::{CloneAgent, EntityIndex, GameState, Orb, OrbKind, Player};
use crate::util::vec2::Vec2;

/// Spawn one orb if more than `interval_ms` has passed since the last spawn.
/// Returns the kind spawned.
pub fn try_spawn(
    state: &mut GameState,
    now_ms: u64,
    interval_ms: u64,
    rules: &dyn ModeRules,
) -> Option<OrbKind> {
    if !rules.orbs_enabled() {
        return None;
    }
    if now_ms.saturating_sub(state.last_orb_spawn_ms) <= interval_ms {
        return None;
    }

    let kind = *rules.orb_catalog().choose(&mut state.rng)?;
    let angle = state.rng.gen_range(0.0..std::f32::consts::TAU);
    let reach = (state.arena_radius - orb::RADIUS).max(0.0);
    let radius = state.rng.gen::<f32>() * reach;
    let position = Vec2::from_angle(angle) * radius;

    state.orbs.push(Orb { position, kind });
    state.last_orb_spawn_ms = now_ms;
    state.events.push(GameLoopEvent::OrbSpawned { kind });
    Some(kind)
}

/// First orb within `radius` of `position`, in arena order (not necessarily closest)
pub fn nearby_orb(state: &GameState, position: Vec2, radius: f32) -> Option<usize> {
    state
        .orbs
        .iter()
        .position(|o| position.distance_to(o.position) <= radius)
}

/// Pick up every orb touching the entity. Returns how many were collected.
pub fn collect_near(state: &mut GameState, index: EntityIndex) -> usize {
    let (position, reach) = {
        let player = &state.players[index];
        (player.position, player.radius() + orb::RADIUS)
    };

    let mut collected = 0;
    for i in (0..state.orbs.len()).rev() {
        if position.distance_to(state.orbs[i].position) < reach {
            let kind = state.orbs.remove(i).kind;
            apply(&mut state.players[index], kind);
            debug!("{} collected {:?}", state.players[index].name, kind);
            state.events.push(GameLoopEvent::OrbCollected { index, kind });
            collected += 1;
        }
    }
    collected
}

/// Grant an orb's effect to its collector
pub fn apply(player: &mut Player, kind: OrbKind) {
    match kind {
        OrbKind::Blast => player.effects.grant(Effect::Blast, orb::BLAST_DURATION),
        OrbKind::Clone => {
            player.effects.grant(Effect::Clone, orb::EFFECT_DURATION);
            spawn_clone_ring(player);
        }
        // Freeze orbs arm the collector's hits rather than freezing the collector
        OrbKind::Freeze => player.effects.grant(Effect::Freezing, orb::EFFECT_DURATION),
        OrbKind::Strength => player.effects.grant(Effect::Strength, orb::EFFECT_DURATION),
        OrbKind::Speed => player.effects.grant(Effect::Speed, orb::EFFECT_DURATION),
        OrbKind::Lucky => player.effects.grant(Effect::Lucky, orb::EFFECT_DURATION),
        OrbKind::Invisible => player.effects.grant(Effect::Invisible, orb::EFFECT_DURATION),
        OrbKind::Shield => player.effects.grant(Effect::Shield, orb::EFFECT_DURATION),
    }
}

/// Replace the owner's clones with a fresh ring, 90 degrees apart
fn spawn_clone_ring(player: &mut Player) {
    let distance = player.radius() * clone::RING_RADII;
    let step = std::f32::consts::TAU / clone::COUNT as f32;
    player.clones.clear();
    for c in 0..clone::COUNT {
        let offset = Vec2::from_angle(step * c as f32) * distance;
        player.clones.push(CloneAgent::new(player.position + offset));
    }
}
