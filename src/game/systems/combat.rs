//! Contact combat resolution
//!
//! A hit rolls for a crit, computes a knockback magnitude from the attacker's and
//! target's effects, then hands the result to the mode so role rules (tags, steals,
//! team swaps, juggernaut damage) can rewrite it before it is applied.

use rand::Rng;
use tracing::debug;

use crate::game::constants::combat;
use crate::game::effects::Effect;
use crate::game::game_loop::GameLoopEvent;
use crate::game::mode::ModeRules;
use crate::game::state::{Announcement, EntityIndex, GameState};
use crate::util::vec2::Vec2;

/// A hit in flight. Mode rules may rewrite `knockback` and `damage`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    pub attacker: EntityIndex,
    pub target: EntityIndex,
    pub knockback: f32,
    /// HP removed from the target (juggernaut mode only)
    pub damage: f32,
    pub crit: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HitOutcome {
    /// Target was immune: separation physics only
    Blocked,
    Landed { knockback: f32, damage: f32, crit: bool },
}

/// Roll the attack magnitude: crits are fixed, normal hits are uniform and
/// scaled by strength and shield.
fn roll_knockback(
    state: &mut GameState,
    attacker: EntityIndex,
    target: EntityIndex,
    crits: bool,
) -> (f32, bool) {
    let lucky = state.players[attacker].effects.is_active(Effect::Lucky);
    let chance = combat::BASE_CRIT_CHANCE + if lucky { combat::LUCKY_CRIT_BONUS } else { 0.0 };
    let crit = crits && state.rng.gen_bool(chance);

    let mut knockback = if crit {
        combat::CRIT_KNOCKBACK
    } else {
        state.rng.gen_range(combat::MIN_KNOCKBACK..combat::MAX_KNOCKBACK)
    };
    if !crit && state.players[attacker].effects.is_active(Effect::Strength) {
        knockback *= combat::STRENGTH_MULT;
    }
    if state.players[target].effects.is_active(Effect::Shield) {
        knockback *= combat::SHIELD_MULT;
    }
    (knockback, crit)
}

/// Resolve `attacker` making contact with `target`
pub fn resolve(
    state: &mut GameState,
    attacker: EntityIndex,
    target: EntityIndex,
    rules: &dyn ModeRules,
) -> HitOutcome {
    if state.players[target].is_immune() {
        return HitOutcome::Blocked;
    }

    let (knockback, crit) = roll_knockback(state, attacker, target, rules.crits_enabled());
    let mut hit = Hit { attacker, target, knockback, damage: 0.0, crit };
    rules.resolve_combat_extras(state, &mut hit);

    if state.players[attacker].effects.is_active(Effect::Freezing) {
        state.players[target].effects.grant(Effect::Freeze, combat::FREEZE_DURATION);
    }

    let origin = state.players[attacker].position;
    let victim = &mut state.players[target];
    if hit.knockback > 0.0 {
        victim.velocity += Vec2::from_angle(origin.bearing_to(victim.position)) * hit.knockback;
    }

    if hit.crit {
        let victim = &state.players[target];
        let message = Announcement::crit(&state.players[attacker].name, &victim.name, victim.position);
        debug!("{}", message.text);
        state.announcements.push(message);
        state.events.push(GameLoopEvent::CritLanded { attacker, target });
    }

    HitOutcome::Landed {
        knockback: hit.knockback,
        damage: hit.damage,
        crit: hit.crit,
    }
}

/// Shove an enemy clone on contact. Clones carry no effects, so only the
/// attacker's strength matters.
pub fn strike_clone(
    state: &mut GameState,
    attacker: EntityIndex,
    owner: EntityIndex,
    slot: usize,
) -> f32 {
    let mut knockback = state.rng.gen_range(combat::MIN_KNOCKBACK..combat::MAX_KNOCKBACK);
    if state.players[attacker].effects.is_active(Effect::Strength) {
        knockback *= combat::STRENGTH_MULT;
    }

    let origin = state.players[attacker].position;
    if let Some(clone) = state.players[owner].clones.get_mut(slot) {
        if clone.alive {
            clone.velocity += Vec2::from_angle(origin.bearing_to(clone.position)) * knockback;
        }
    }
    knockback
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::constants::body;
    use crate::game::mode::Mode;
    use crate::game::state::{CloneAgent, Color, Player, Team};
    use rand::rngs::StdRng;

    fn duel(mode: Mode, seed: u64) -> GameState {
        let mut state = GameState::new(mode, seed);
        state.add_player(Player::new("Ada".into(), Vec2::new(0.0, 0.0), Color(0x111111)));
        state.add_player(Player::new("Bob".into(), Vec2::new(15.0, 0.0), Color(0x222222)));
        state
    }

    fn next_knockback(rng: &StdRng) -> f32 {
        let mut rng = rng.clone();
        rng.gen_range(combat::MIN_KNOCKBACK..combat::MAX_KNOCKBACK)
    }

    #[test]
    fn test_immune_target_blocks() {
        let mut state = duel(Mode::FreeForAll, 1);
        state.players[1].grant_immunity(10);
        state.players[0].effects.grant(Effect::Freezing, 10);
        let rules = Mode::FreeForAll.rules();

        assert_eq!(resolve(&mut state, 0, 1, rules.as_ref()), HitOutcome::Blocked);
        assert_eq!(state.players[1].velocity, Vec2::ZERO);
        assert!(!state.players[1].is_frozen());
    }

    #[test]
    fn test_knockback_in_range_and_away_from_attacker() {
        let rules = Mode::Potato.rules();
        for seed in 0..50 {
            let mut state = duel(Mode::Potato, seed);
            let HitOutcome::Landed { knockback, crit, .. } = resolve(&mut state, 0, 1, rules.as_ref()) else {
                panic!("hit should land");
            };
            assert!(!crit);
            assert!((combat::MIN_KNOCKBACK..combat::MAX_KNOCKBACK).contains(&knockback));
            assert!(state.players[1].velocity.x > 0.0);
        }
    }

    #[test]
    fn test_strength_and_shield_scale_knockback() {
        let rules = Mode::Juggernaut.rules();
        let mut state = duel(Mode::Juggernaut, 9);
        state.players[0].effects.grant(Effect::Strength, 10);
        state.players[1].effects.grant(Effect::Shield, 10);
        let expected = next_knockback(&state.rng) * combat::STRENGTH_MULT * combat::SHIELD_MULT;

        let HitOutcome::Landed { knockback, .. } = resolve(&mut state, 0, 1, rules.as_ref()) else {
            panic!("hit should land");
        };
        assert!((knockback - expected).abs() < 1e-5);
    }

    #[test]
    fn test_freezing_attacker_freezes_target() {
        let mut state = duel(Mode::FreeForAll, 2);
        state.players[0].effects.grant(Effect::Freezing, 10);
        let rules = Mode::FreeForAll.rules();
        resolve(&mut state, 0, 1, rules.as_ref());
        assert_eq!(state.players[1].effects.remaining(Effect::Freeze), combat::FREEZE_DURATION);
    }

    #[test]
    fn test_lucky_crits_announce() {
        let rules = Mode::FreeForAll.rules();
        let mut crits = 0;
        for seed in 0..400 {
            let mut state = duel(Mode::FreeForAll, seed);
            state.players[0].effects.grant(Effect::Lucky, 10);
            if let HitOutcome::Landed { crit: true, knockback, .. } = resolve(&mut state, 0, 1, rules.as_ref()) {
                crits += 1;
                assert_eq!(knockback, combat::CRIT_KNOCKBACK);
                assert_eq!(state.announcements.len(), 1);
                assert_eq!(state.announcements[0].text, "ADA JUST CRIT BOB");
                assert!(matches!(state.events[0], GameLoopEvent::CritLanded { attacker: 0, target: 1 }));
            }
        }
        // 10% chance over 400 seeded trials
        assert!(crits > 10 && crits < 100, "{crits}");
    }

    #[test]
    fn test_no_crits_in_role_modes() {
        for mode in [Mode::TeamSwap, Mode::Potato, Mode::Crown, Mode::Juggernaut] {
            let rules = mode.rules();
            for seed in 0..200 {
                let mut state = duel(mode, seed);
                state.players[0].effects.grant(Effect::Lucky, 10);
                if let HitOutcome::Landed { crit, .. } = resolve(&mut state, 0, 1, rules.as_ref()) {
                    assert!(!crit);
                }
                assert!(state.announcements.is_empty());
            }
        }
    }

    #[test]
    fn test_hunter_hit_damages_juggernaut_without_knockback() {
        let mut state = duel(Mode::Juggernaut, 4);
        state.players[1].is_juggernaut = true;
        state.players[1].hp = 150.0;
        state.players[1].max_hp = 150.0;
        let rules = Mode::Juggernaut.rules();
        let k = next_knockback(&state.rng);

        let outcome = resolve(&mut state, 0, 1, rules.as_ref());
        assert_eq!(outcome, HitOutcome::Landed { knockback: 0.0, damage: k, crit: false });
        assert!((state.players[1].hp - (150.0 - k)).abs() < 1e-5);
        assert_eq!(state.players[1].velocity, Vec2::ZERO);
        assert!(state.players[1].alive);
    }

    #[test]
    fn test_juggernaut_dies_at_zero_hp() {
        let mut state = duel(Mode::Juggernaut, 5);
        state.players[1].is_juggernaut = true;
        state.players[1].hp = 0.05;
        let rules = Mode::Juggernaut.rules();
        resolve(&mut state, 0, 1, rules.as_ref());
        assert!(!state.players[1].alive);
    }

    #[test]
    fn test_juggernaut_hits_triple() {
        let mut state = duel(Mode::Juggernaut, 6);
        state.players[0].is_juggernaut = true;
        let rules = Mode::Juggernaut.rules();
        let k = next_knockback(&state.rng) * combat::JUGGERNAUT_HIT_MULT;

        let HitOutcome::Landed { knockback, .. } = resolve(&mut state, 0, 1, rules.as_ref()) else {
            panic!("hit should land");
        };
        assert!((knockback - k).abs() < 1e-4);
        assert!((state.players[1].velocity.x - k).abs() < 1e-3);
    }

    #[test]
    fn test_team_swap_threshold() {
        let rules = Mode::TeamSwap.rules();
        let (mut swapped, mut kept) = (0, 0);
        for seed in 0..60 {
            let mut state = duel(Mode::TeamSwap, seed);
            state.players[0].join_team(Team(0));
            state.players[1].join_team(Team(1));
            let k = next_knockback(&state.rng);

            let HitOutcome::Landed { knockback, .. } = resolve(&mut state, 0, 1, rules.as_ref()) else {
                panic!("hit should land");
            };
            if k > combat::SWAP_THRESHOLD {
                swapped += 1;
                assert_eq!(state.players[1].team, Some(Team(0)));
                assert_eq!(state.players[1].color, Team(0).color());
                assert_eq!(knockback, combat::SWAP_KNOCKBACK);
            } else {
                kept += 1;
                assert_eq!(state.players[1].team, Some(Team(1)));
                assert!((knockback - k).abs() < 1e-6);
            }
        }
        assert!(swapped > 0 && kept > 0);
    }

    #[test]
    fn test_potato_pass() {
        let mut state = duel(Mode::Potato, 7);
        state.players[0].is_potato = true;
        let rules = Mode::Potato.rules();

        let outcome = resolve(&mut state, 0, 1, rules.as_ref());
        assert!(matches!(outcome, HitOutcome::Landed { knockback, .. } if knockback == 0.0));
        assert!(!state.players[0].is_potato);
        assert!(state.players[1].is_potato);
        assert_eq!(state.players[0].effects.remaining(Effect::Immunity), combat::TAG_IMMUNITY);
        assert_eq!(state.players[1].color, Color::POTATO);
        assert_eq!(state.players[0].color, Color::IMMUNITY);
        assert_eq!(state.players[1].velocity, Vec2::ZERO);
        assert!(state.events.contains(&GameLoopEvent::PotatoPassed { from: 0, to: 1 }));
    }

    #[test]
    fn test_crown_steal() {
        let mut state = duel(Mode::Crown, 8);
        state.players[1].is_crown = true;
        let rules = Mode::Crown.rules();

        resolve(&mut state, 0, 1, rules.as_ref());
        assert!(state.players[0].is_crown);
        assert!(!state.players[1].is_crown);
        assert!(state.players[0].is_immune());
        assert_eq!(state.players[0].radius(), body::CROWN_RADIUS);
        assert_eq!(state.players[1].color, Color(0x222222));
        assert_eq!(state.players[1].velocity, Vec2::ZERO);
        assert!(state.events.contains(&GameLoopEvent::CrownStolen { from: 1, to: 0 }));
    }

    #[test]
    fn test_tagback_blocked_in_potato() {
        let mut state = duel(Mode::Potato, 7);
        let rules = Mode::Potato.rules();
        state.players[0].is_potato = true;
        resolve(&mut state, 0, 1, rules.as_ref());
        state.events.clear();

        // Fresh holder tags straight back at the immune passer
        let outcome = resolve(&mut state, 1, 0, rules.as_ref());
        assert_eq!(outcome, HitOutcome::Blocked);
        assert!(state.players[1].is_potato);
        assert!(!state.players[0].is_potato);
        assert!(state.events.is_empty());
    }

    #[test]
    fn test_tagback_blocked_in_crown() {
        let mut state = duel(Mode::Crown, 8);
        let rules = Mode::Crown.rules();
        state.players[1].is_crown = true;
        resolve(&mut state, 0, 1, rules.as_ref());
        state.events.clear();

        let outcome = resolve(&mut state, 1, 0, rules.as_ref());
        assert_eq!(outcome, HitOutcome::Blocked);
        assert!(state.players[0].is_crown);
        assert!(!state.players[1].is_crown);
        assert_eq!(state.players[0].velocity, Vec2::ZERO);
        assert!(state.events.is_empty());
    }

    #[test]
    fn test_strike_clone_moves_clone_only() {
        let mut state = duel(Mode::FreeForAll, 3);
        state.players[1].clones.push(CloneAgent::new(Vec2::new(5.0, 0.0)));
        let k = strike_clone(&mut state, 0, 1, 0);

        assert!((state.players[1].clones[0].velocity.x - k).abs() < 1e-5);
        assert_eq!(state.players[1].velocity, Vec2::ZERO);
    }
}
