//! AI target selection
//!
//! Priority per entity: immune evasion, role flee, orb seeking, then the mode's
//! chase pairing (or nearest enemy). Lunging entities skip selection entirely.

use tracing::debug;

use crate::game::constants::{lunge, orb};
use crate::game::game_loop::GameLoopEvent;
use crate::game::mode::ModeRules;
use crate::game::state::{EntityIndex, GameState, Player};
use crate::game::systems::orbs;
use crate::util::vec2::Vec2;

/// What an entity is steering relative to this tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Target {
    /// Another player: chase and attack on contact
    Entity(EntityIndex),
    /// An enemy's clone: chase and shove on contact
    Clone { owner: EntityIndex, slot: usize },
    /// Orb pickup: chase only
    Orb(usize),
    /// Position to run away from
    EvasionPoint(Vec2),
}

impl Target {
    pub fn position(&self, state: &GameState) -> Option<Vec2> {
        match *self {
            Target::Entity(index) => state.players.get(index).map(|p| p.position),
            Target::Clone { owner, slot } => state
                .players
                .get(owner)
                .and_then(|p| p.clones.get(slot))
                .map(|c| c.position),
            Target::Orb(index) => state.orbs.get(index).map(|o| o.position),
            Target::EvasionPoint(point) => Some(point),
        }
    }

    /// Evasion subtracts the steering force instead of adding it
    pub fn is_evasion(&self) -> bool {
        matches!(self, Target::EvasionPoint(_))
    }
}

/// Nearest live entity passing `filter`. Ties keep the first one found.
pub fn nearest_entity(
    state: &GameState,
    origin: Vec2,
    filter: impl Fn(EntityIndex, &Player) -> bool,
) -> Option<(EntityIndex, f32)> {
    let mut nearest: Option<(EntityIndex, f32)> = None;
    for (index, other) in state.alive_players() {
        if !filter(index, other) {
            continue;
        }
        let dist = origin.distance_to(other.position);
        if nearest.map_or(true, |(_, best)| dist < best) {
            nearest = Some((index, dist));
        }
    }
    nearest
}

/// Nearest visible enemy entity or enemy clone. Entities are scanned first, so a
/// clone only wins when strictly closer.
pub fn nearest_enemy_target(
    state: &GameState,
    seeker: EntityIndex,
    is_enemy: impl Fn(EntityIndex, EntityIndex) -> bool,
) -> Option<Target> {
    let origin = state.players[seeker].position;
    let mut best = nearest_entity(state, origin, |i, p| is_enemy(seeker, i) && !p.is_invisible())
        .map(|(i, d)| (Target::Entity(i), d));

    for (owner, player) in state.alive_players() {
        if !is_enemy(seeker, owner) {
            continue;
        }
        for (slot, clone) in player.clones.iter().enumerate() {
            if !clone.alive {
                continue;
            }
            let dist = origin.distance_to(clone.position);
            if best.map_or(true, |(_, d)| dist < d) {
                best = Some((Target::Clone { owner, slot }, dist));
            }
        }
    }

    best.map(|(target, _)| target)
}

/// Choose this tick's target for a live, non-lunging entity
pub fn select(state: &GameState, seeker: EntityIndex, rules: &dyn ModeRules) -> Option<Target> {
    let player = &state.players[seeker];

    if player.is_immune() && rules.evades_when_immune(state, seeker) {
        let threat = nearest_entity(state, player.position, |i, _| {
            i != seeker && rules.is_threat(state, seeker, i)
        });
        if let Some((threat, _)) = threat {
            return Some(Target::EvasionPoint(state.players[threat].position));
        }
    }

    if let Some(threat) = rules.flee_from(state, seeker) {
        return Some(Target::EvasionPoint(state.players[threat].position));
    }

    if rules.orbs_enabled() {
        if let Some(index) = orbs::nearby_orb(state, player.position, orb::DETECTION_RADIUS) {
            return Some(Target::Orb(index));
        }
    }

    rules.chase_target(state, seeker)
}

/// Start a crown lunge when a ready non-holder targets the holder from far enough away.
/// Returns true if a lunge started.
pub fn try_start_lunge(
    state: &mut GameState,
    seeker: EntityIndex,
    target: Target,
    rules: &dyn ModeRules,
) -> bool {
    if !rules.lunge_enabled() {
        return false;
    }
    let Target::Entity(holder) = target else {
        return false;
    };

    let (origin, destination) = {
        let player = &state.players[seeker];
        let victim = &state.players[holder];
        if player.is_crown || !victim.is_crown || !player.lunge.ready() {
            return false;
        }
        (player.position, victim.position)
    };
    if origin.distance_to(destination) <= lunge::MIN_DISTANCE {
        return false;
    }

    let angle = origin.bearing_to(destination);
    let player = &mut state.players[seeker];
    player.lunge.angle = angle;
    player.lunge.active = lunge::DURATION;
    player.lunge.cooldown = lunge::COOLDOWN;
    player.lunge.target = Some(holder);
    debug!("{} lunges at {:.2} rad", player.name, angle);
    state.events.push(GameLoopEvent::LungeStarted { index: seeker, angle });
    true
}
