//! Match lifecycle and the per-tick pipeline
//!
//! Per tick: round timers, orb spawn, pairwise separation, then every live entity in
//! index order (effects, clones, orb pickup, targeting, forces, combat, integration,
//! boundary), announcements, and finally the victory check.

use serde::Serialize;
use tracing::info;

use crate::config::SimConfig;
use crate::game::clock::WallClock;
use crate::game::constants::{lunge, movement};
use crate::game::effects::Effect;
use crate::game::match_result::{determine_result, MatchResult, Outcome};
use crate::game::mode::ModeRules;
use crate::game::request::{MatchError, MatchRequest};
use crate::game::snapshot::FrameSnapshot;
use crate::game::state::{CloneAgent, Color, EntityIndex, GameState, OrbKind, Player, Team};
use crate::game::systems::targeting::{self, Target};
use crate::game::systems::{arena, clones, combat, orbs, physics};
use crate::util::vec2::Vec2;

/// Events emitted by the game loop
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum GameLoopEvent {
    Eliminated { index: EntityIndex },
    CritLanded { attacker: EntityIndex, target: EntityIndex },
    TeamSwapped { index: EntityIndex, team: Team },
    PotatoPassed { from: EntityIndex, to: EntityIndex },
    CrownStolen { from: EntityIndex, to: EntityIndex },
    CrownReassigned { to: EntityIndex },
    PotatoesDetonated { holders: Vec<EntityIndex> },
    JuggernautDamaged { hp: f32 },
    LungeStarted { index: EntityIndex, angle: f32 },
    OrbSpawned { kind: OrbKind },
    OrbCollected { index: EntityIndex, kind: OrbKind },
    MatchEnded { outcome: Outcome },
}

/// Steering force for this tick, from effects and role
pub fn movement_speed(player: &Player, rules: &dyn ModeRules) -> f32 {
    let mut speed = movement::BASE_SPEED;
    if player.effects.is_active(Effect::Speed) {
        speed *= movement::SPEED_EFFECT_MULT;
    }
    speed * rules.role_speed(player)
}

/// Main game loop
pub struct GameLoop {
    state: GameState,
    rules: Box<dyn ModeRules>,
    clock: Box<dyn WallClock>,
    config: SimConfig,
    running: bool,
}

impl GameLoop {
    /// Validate the request and build a ready-to-run match. Nothing is created when
    /// validation fails.
    pub fn start(
        request: &MatchRequest,
        config: SimConfig,
        clock: impl WallClock + 'static,
    ) -> Result<Self, MatchError> {
        request.validate()?;
        config.validate().map_err(MatchError::InvalidConfig)?;

        let seconds = request.round_seconds_or(config.round_seconds);
        let round_ticks = seconds
            .checked_mul(config.tick_rate)
            .ok_or(MatchError::RoundTooLong {
                seconds,
                tick_rate: config.tick_rate,
            })?;

        let rules = request.mode.rules();
        let mut state = GameState::new(request.mode, request.seed);
        state.arena_radius = config.arena_radius;
        state.tick_rate = config.tick_rate;
        state.team_count = request.team_count;
        state.round_ticks = round_ticks;
        state.last_orb_spawn_ms = clock.now_ms();

        for name in &request.names {
            let position = arena::spawn_position(&mut state.rng);
            state.add_player(Player::new(name.clone(), position, Color(0)));
        }
        rules.setup(&mut state);

        info!(
            "Match started: {} with {} players (seed {})",
            request.mode,
            state.players.len(),
            request.seed
        );

        Ok(Self {
            state,
            rules,
            clock: Box::new(clock),
            config,
            running: true,
        })
    }

    /// Run a single game tick. A no-op once the match is over or stopped.
    pub fn tick(&mut self) -> Vec<GameLoopEvent> {
        if !self.running || self.state.outcome.is_some() {
            return Vec::new();
        }
        let rules = self.rules.as_ref();
        let state = &mut self.state;
        state.tick += 1;

        rules.advance_round(state);
        orbs::try_spawn(state, self.clock.now_ms(), self.config.orb_spawn_interval_ms, rules);
        physics::separate_pairs(state);

        for index in 0..state.players.len() {
            if state.players[index].alive {
                step_entity(state, index, rules);
            }
        }

        state.announcements.retain_mut(|a| a.tick());

        if let Some(outcome) = rules.check_victory(state) {
            info!("Match over after {} ticks: {}", state.tick, outcome);
            state.outcome = Some(outcome.clone());
            state.events.push(GameLoopEvent::MatchEnded { outcome });
            self.running = false;
        }

        std::mem::take(&mut state.events)
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn outcome(&self) -> Option<&Outcome> {
        self.state.outcome.as_ref()
    }

    /// Drawable view of the current frame
    pub fn snapshot(&self) -> FrameSnapshot {
        FrameSnapshot::capture(&self.state)
    }

    pub fn result(&self) -> MatchResult {
        determine_result(&self.state)
    }

    /// Cancel at the tick boundary. The match state is dropped; only the result survives.
    pub fn stop(self) -> MatchResult {
        let result = determine_result(&self.state);
        if result.unfinished {
            info!("Match stopped at tick {}", self.state.tick);
        }
        result
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }
}

/// Advance one live entity through the tick pipeline
fn step_entity(state: &mut GameState, index: EntityIndex, rules: &dyn ModeRules) {
    let player = &mut state.players[index];
    if player.effects.tick().contains(&Effect::Immunity) {
        player.refresh_color();
    }
    player.lunge.cooldown = player.lunge.cooldown.saturating_sub(1);

    clones::update(state, index, rules);
    orbs::collect_near(state, index);

    if state.players[index].is_frozen() {
        finish_step(state, index, Vec2::ZERO, rules);
        return;
    }

    if state.players[index].effects.is_active(Effect::Blast) {
        physics::apply_blast(state, index);
    }

    let mut target = None;
    if !state.players[index].lunge.is_active() {
        target = targeting::select(state, index, rules);
        if let Some(t) = target {
            targeting::try_start_lunge(state, index, t, rules);
        }
    }

    let speed = movement_speed(&state.players[index], rules);
    let mut force = if state.players[index].lunge.is_active() {
        lunge_step(state, index, speed, rules)
    } else if let Some(target) = target {
        pursue(state, index, target, speed, rules)
    } else {
        Vec2::ZERO
    };

    let player = &state.players[index];
    force += physics::border_force(player.position, player.radius(), state.arena_radius);
    finish_step(state, index, force, rules);
}

/// Locked-direction burst toward the lunge target, attacking on contact
fn lunge_step(
    state: &mut GameState,
    index: EntityIndex,
    speed: f32,
    rules: &dyn ModeRules,
) -> Vec2 {
    let lunge_state = state.players[index].lunge;
    let force = Vec2::from_angle(lunge_state.angle) * (speed * lunge::SPEED_MULT);

    if let Some(victim) = lunge_state.target {
        if in_contact(state, index, victim) {
            combat::resolve(state, index, victim, rules);
        }
    }

    let remaining = &mut state.players[index].lunge.active;
    *remaining = remaining.saturating_sub(1);
    force
}

/// Chase or evade the selected target, attacking on contact
fn pursue(
    state: &mut GameState,
    index: EntityIndex,
    target: Target,
    speed: f32,
    rules: &dyn ModeRules,
) -> Vec2 {
    let position = state.players[index].position;
    let Some(goal) = target.position(state) else {
        return Vec2::ZERO;
    };
    let force = physics::steering_force(position, goal, speed, target.is_evasion());

    match target {
        Target::Entity(victim) => {
            if in_contact(state, index, victim) {
                combat::resolve(state, index, victim, rules);
            }
        }
        Target::Clone { owner, slot } => {
            let reach = state.players[index].radius() + CloneAgent::radius();
            if position.distance_to(goal) < reach {
                combat::strike_clone(state, index, owner, slot);
            }
        }
        Target::Orb(_) | Target::EvasionPoint(_) => {}
    }
    force
}

/// Touching a live, visible entity
fn in_contact(state: &GameState, attacker: EntityIndex, target: EntityIndex) -> bool {
    let a = &state.players[attacker];
    let Some(b) = state.players.get(target) else {
        return false;
    };
    b.alive && !b.is_invisible() && a.position.distance_to(b.position) < a.radius() + b.radius()
}

/// Apply the accumulated force, integrate, then run the boundary policy
fn finish_step(state: &mut GameState, index: EntityIndex, force: Vec2, rules: &dyn ModeRules) {
    let player = &mut state.players[index];
    player.velocity += force;
    physics::integrate(&mut player.position, &mut player.velocity);
    arena::check_boundary(state, index, rules);
}
