use crate::game::constants::arena::{BORDER_FORCE, BORDER_MARGIN_RADII};
use crate::game::constants::orb::{BLAST_FORCE, BLAST_RADIUS};
use crate::game::constants::physics::{FRICTION, SEPARATION_STIFFNESS};
use crate::game::state::{EntityIndex, GameState};
use crate::util::vec2::Vec2;

/// Push apart every overlapping pair of live entities, teammates included.
/// Each pair gets equal and opposite velocity changes proportional to the overlap.
pub fn separate_pairs(state: &mut GameState) {
    let count = state.players.len();
    for i in 0..count {
        if !state.players[i].alive {
            continue;
        }
        for j in (i + 1)..count {
            if !state.players[j].alive {
                continue;
            }
            let a = &state.players[i];
            let b = &state.players[j];
            let overlap = a.radius() + b.radius() - a.position.distance_to(b.position);
            if overlap <= 0.0 {
                continue;
            }
            let impulse = separation_normal(a.position, b.position) * (overlap * SEPARATION_STIFFNESS);
            state.players[i].velocity -= impulse;
            state.players[j].velocity += impulse;
        }
    }
}

/// Unit vector from `a` to `b`; coincident bodies are split along +x
fn separation_normal(a: Vec2, b: Vec2) -> Vec2 {
    let (normal, dist) = a.direction_to(b);
    if dist > 0.0 {
        normal
    } else {
        Vec2::new(1.0, 0.0)
    }
}

/// Steering force toward (or away from, when evading) a point
pub fn steering_force(position: Vec2, toward: Vec2, speed: f32, evade: bool) -> Vec2 {
    use crate::game::constants::movement::MIN_STEER_DISTANCE;

    let (direction, dist) = position.direction_to(toward);
    if dist <= MIN_STEER_DISTANCE {
        return Vec2::ZERO;
    }
    if evade {
        -direction * speed
    } else {
        direction * speed
    }
}

/// Inward force once within `BORDER_MARGIN_RADII` body radii of the boundary,
/// growing linearly to `BORDER_FORCE` at the edge
pub fn border_force(position: Vec2, radius: f32, arena_radius: f32) -> Vec2 {
    let margin = radius * BORDER_MARGIN_RADII;
    let dist = position.length();
    let edge = arena_radius - margin;
    if dist <= edge || dist <= 0.0 || margin <= 0.0 {
        return Vec2::ZERO;
    }
    let depth = ((dist - edge) / margin).min(1.0);
    -position.normalize() * (BORDER_FORCE * depth)
}

/// Active blast pulse: shove every other live entity within reach
pub fn apply_blast(state: &mut GameState, source: EntityIndex) {
    let origin = state.players[source].position;
    for (index, other) in state.players.iter_mut().enumerate() {
        if index == source || !other.alive {
            continue;
        }
        let (direction, dist) = origin.direction_to(other.position);
        if dist > 0.0 && dist <= BLAST_RADIUS {
            other.velocity += direction * BLAST_FORCE;
        }
    }
}

/// Move by velocity, then apply friction exactly once
#[inline]
pub fn integrate(position: &mut Vec2, velocity: &mut Vec2) {
    *position += *velocity;
    *velocity *= FRICTION;
}

/// Elastic bounce off the arena wall: reflect velocity about the wall normal
/// and clamp back onto the boundary
pub fn bounce(position: &mut Vec2, velocity: &mut Vec2, arena_radius: f32) {
    let normal = position.normalize();
    if normal == Vec2::ZERO {
        return;
    }
    if velocity.dot(normal) > 0.0 {
        *velocity = velocity.reflect(normal);
    }
    *position = normal * arena_radius;
}
