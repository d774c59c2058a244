//! Juggernaut versus hunters
//!
//! The juggernaut is big, slow and hits three times as hard. Hunters cannot knock it
//! around; their hits drain its HP instead.

use tracing::{debug, info};

use crate::game::constants::{combat, movement, roles};
use crate::game::game_loop::GameLoopEvent;
use crate::game::match_result::Outcome;
use crate::game::mode::{assign_random_colors, pick_random, Mode, ModeRules};
use crate::game::state::{EntityIndex, GameState, Player};
use crate::game::systems::combat::Hit;

pub struct JuggernautRules;

impl ModeRules for JuggernautRules {
    fn mode(&self) -> Mode {
        Mode::Juggernaut
    }

    fn setup(&self, state: &mut GameState) {
        assign_random_colors(state);
        let Some(index) = pick_random(state, 1, |_| true).into_iter().next() else {
            return;
        };
        let hunters = state.alive_count().saturating_sub(1);
        let player = &mut state.players[index];
        player.is_juggernaut = true;
        player.max_hp = roles::JUGGERNAUT_HP_PER_HUNTER * hunters as f32;
        player.hp = player.max_hp;
        player.refresh_color();
        info!("{} is the juggernaut ({} HP)", player.name, player.max_hp);
    }

    /// Hunters never fight each other
    fn is_enemy(&self, state: &GameState, a: EntityIndex, b: EntityIndex) -> bool {
        a != b && state.players[a].is_juggernaut != state.players[b].is_juggernaut
    }

    fn evades_when_immune(&self, state: &GameState, seeker: EntityIndex) -> bool {
        !state.players[seeker].is_juggernaut
    }

    fn is_threat(&self, state: &GameState, _seeker: EntityIndex, other: EntityIndex) -> bool {
        state.players[other].is_juggernaut
    }

    fn role_speed(&self, player: &Player) -> f32 {
        if player.is_juggernaut {
            movement::JUGGERNAUT_MULT
        } else {
            1.0
        }
    }

    fn resolve_combat_extras(&self, state: &mut GameState, hit: &mut Hit) {
        let attacker_is_juggernaut = state.players[hit.attacker].is_juggernaut;
        let target = &mut state.players[hit.target];

        if attacker_is_juggernaut && !target.is_juggernaut {
            hit.knockback *= combat::JUGGERNAUT_HIT_MULT;
            return;
        }
        if attacker_is_juggernaut || !target.is_juggernaut {
            return;
        }

        hit.damage = hit.knockback;
        hit.knockback = 0.0;
        target.hp -= hit.damage;
        let hp = target.hp;
        debug!("Juggernaut took {:.2} damage, {:.1} HP left", hit.damage, hp);
        state.events.push(GameLoopEvent::JuggernautDamaged { hp });
        if hp <= 0.0 {
            state.eliminate(hit.target);
        }
    }

    fn check_victory(&self, state: &GameState) -> Option<Outcome> {
        let juggernaut = state.juggernaut()?;
        let hunters_alive = state.alive_players().any(|(_, p)| !p.is_juggernaut);
        let player = &state.players[juggernaut];
        match (player.alive, hunters_alive) {
            (false, true) => Some(Outcome::Hunters),
            (true, false) => Some(Outcome::Juggernaut(player.name.clone())),
            (false, false) => Some(Outcome::Draw),
            (true, true) => None,
        }
    }
}
