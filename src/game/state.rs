//! Game state definitions and structures
//!
//! Contains all entities (players, clones, orbs, announcements) and the match state.

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;
use tracing::debug;

use crate::game::constants::{announcement, arena, body, physics};
use crate::game::effects::{Effect, EffectStore};
use crate::game::game_loop::GameLoopEvent;
use crate::game::match_result::Outcome;
use crate::game::mode::Mode;
use crate::util::vec2::Vec2;

/// Index into `GameState::players`. Entities are never removed, so indices are stable.
pub type EntityIndex = usize;

/// 24-bit RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color(pub u32);

impl Color {
    pub const CROWN: Color = Color(0xFFD700);
    pub const POTATO: Color = Color(0xD2691E);
    pub const JUGGERNAUT: Color = Color(0x8B0000);
    pub const IMMUNITY: Color = Color(0xFFFFFF);
    pub const FROZEN: Color = Color(0xADD8E6);

    pub fn random(rng: &mut impl rand::Rng) -> Self {
        Color(rng.gen_range(0..0x00FF_FFFF))
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:06x}", self.0 & 0x00FF_FFFF)
    }
}

/// Team identifier (0-based)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Team(pub u8);

impl Team {
    pub const PALETTE: [Color; 8] = [
        Color(0xE74C3C),
        Color(0x3498DB),
        Color(0x2ECC71),
        Color(0xF1C40F),
        Color(0x9B59B6),
        Color(0xE67E22),
        Color(0x1ABC9C),
        Color(0xFF69B4),
    ];

    pub const MAX: usize = Team::PALETTE.len();

    pub fn color(&self) -> Color {
        Team::PALETTE[self.0 as usize % Team::MAX]
    }
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Team {}", self.0 + 1)
    }
}

/// Crown-mode lunge bookkeeping
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct LungeState {
    /// Ticks until another lunge may start
    pub cooldown: u32,
    /// Ticks of lunge left
    pub active: u32,
    /// Locked direction (radians)
    pub angle: f32,
    /// Entity the lunge was aimed at
    pub target: Option<EntityIndex>,
}

impl LungeState {
    #[inline]
    pub fn is_active(&self) -> bool {
        self.active > 0
    }

    pub fn ready(&self) -> bool {
        self.cooldown == 0 && self.active == 0
    }
}

/// Ephemeral proxy spawned by the clone effect. Owned by exactly one player.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CloneAgent {
    pub position: Vec2,
    pub velocity: Vec2,
    pub alive: bool,
}

impl CloneAgent {
    pub fn new(position: Vec2) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
            alive: true,
        }
    }

    pub fn radius() -> f32 {
        body::PLAYER_RADIUS * body::CLONE_RADIUS_SCALE
    }
}

/// Player (autonomous combatant)
///
/// Hot fields touched by physics every tick come first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Position relative to the arena center
    pub position: Vec2,
    pub velocity: Vec2,
    pub alive: bool,
    pub effects: EffectStore,
    pub lunge: LungeState,

    // Roles
    pub team: Option<Team>,
    pub is_potato: bool,
    pub is_crown: bool,
    pub is_juggernaut: bool,
    /// Only meaningful for the juggernaut
    pub hp: f32,
    pub max_hp: f32,
    /// Ticks spent holding the crown
    pub crown_time: u64,

    pub clones: SmallVec<[CloneAgent; 4]>,

    /// Color currently drawn
    pub color: Color,
    /// Color without any effect or role tint
    pub base_color: Color,
    pub name: String,
}

impl Player {
    pub fn new(name: String, position: Vec2, color: Color) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
            alive: true,
            effects: EffectStore::new(),
            lunge: LungeState::default(),
            team: None,
            is_potato: false,
            is_crown: false,
            is_juggernaut: false,
            hp: 0.0,
            max_hp: 0.0,
            crown_time: 0,
            clones: SmallVec::new(),
            color,
            base_color: color,
            name,
        }
    }

    /// Collision radius, depends on role
    pub fn radius(&self) -> f32 {
        if self.is_juggernaut {
            body::JUGGERNAUT_RADIUS
        } else if self.is_crown {
            body::CROWN_RADIUS
        } else {
            body::PLAYER_RADIUS
        }
    }

    #[inline]
    pub fn is_frozen(&self) -> bool {
        self.effects.is_active(Effect::Freeze)
    }

    #[inline]
    pub fn is_invisible(&self) -> bool {
        self.effects.is_active(Effect::Invisible)
    }

    #[inline]
    pub fn is_immune(&self) -> bool {
        self.effects.is_active(Effect::Immunity)
    }

    pub fn role_color(&self) -> Option<Color> {
        if self.is_crown {
            Some(Color::CROWN)
        } else if self.is_potato {
            Some(Color::POTATO)
        } else if self.is_juggernaut {
            Some(Color::JUGGERNAUT)
        } else {
            None
        }
    }

    /// Recompute the drawn color: role tint wins over the immunity tint,
    /// which wins over the base color.
    pub fn refresh_color(&mut self) {
        self.color = match self.role_color() {
            Some(color) => color,
            None if self.is_immune() => Color::IMMUNITY,
            None => self.base_color,
        };
    }

    pub fn grant_immunity(&mut self, ticks: u32) {
        self.effects.grant(Effect::Immunity, ticks);
        self.refresh_color();
    }

    /// Change team and adopt its color
    pub fn join_team(&mut self, team: Team) {
        self.team = Some(team);
        self.base_color = team.color();
        self.refresh_color();
    }
}

/// Orb catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrbKind {
    Strength,
    Speed,
    Lucky,
    Freeze,
    Invisible,
    Clone,
    Shield,
    Blast,
}

impl OrbKind {
    pub const ALL: [OrbKind; 8] = [
        OrbKind::Strength,
        OrbKind::Speed,
        OrbKind::Lucky,
        OrbKind::Freeze,
        OrbKind::Invisible,
        OrbKind::Clone,
        OrbKind::Shield,
        OrbKind::Blast,
    ];

    /// Letter printed on the orb
    pub fn label(&self) -> char {
        match self {
            OrbKind::Strength => 'S',
            OrbKind::Speed => 'S',
            OrbKind::Lucky => 'L',
            OrbKind::Freeze => 'F',
            OrbKind::Invisible => 'I',
            OrbKind::Clone => 'C',
            OrbKind::Shield => 'S',
            OrbKind::Blast => 'B',
        }
    }
}

/// Power-up pickup
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Orb {
    pub position: Vec2,
    pub kind: OrbKind,
}

/// Floating text for the renderer (crits, round transitions)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Announcement {
    pub text: String,
    pub position: Vec2,
    pub alpha: f32,
    pub life: u32,
}

impl Announcement {
    pub fn new(text: String, position: Vec2) -> Self {
        Self {
            text,
            position,
            alpha: 1.0,
            life: announcement::LIFE,
        }
    }

    pub fn crit(attacker: &str, target: &str, position: Vec2) -> Self {
        Self::new(
            format!("{} JUST CRIT {}", attacker.to_uppercase(), target.to_uppercase()),
            position,
        )
    }

    /// Drift upward and fade. Returns false once expired.
    pub fn tick(&mut self) -> bool {
        self.position.y -= announcement::DRIFT;
        self.life = self.life.saturating_sub(1);
        self.alpha = self.life as f32 / announcement::LIFE as f32;
        self.life > 0
    }
}

/// Complete match state
#[derive(Debug, Clone)]
pub struct GameState {
    pub tick: u64,
    pub mode: Mode,
    pub arena_radius: f32,
    pub tick_rate: u32,
    /// Number of teams in team modes
    pub team_count: usize,
    pub players: Vec<Player>,
    pub orbs: Vec<Orb>,
    pub announcements: Vec<Announcement>,
    /// Configured round length (ticks), for modes with a round timer
    pub round_ticks: u32,
    /// Ticks left in the current round
    pub round_remaining: Option<u32>,
    /// Wall-clock timestamp of the last orb spawn (ms)
    pub last_orb_spawn_ms: u64,
    pub outcome: Option<Outcome>,
    /// Events produced during the current tick
    pub events: Vec<GameLoopEvent>,
    pub rng: StdRng,
}

impl GameState {
    pub fn new(mode: Mode, seed: u64) -> Self {
        Self {
            tick: 0,
            mode,
            arena_radius: arena::RADIUS,
            tick_rate: physics::TICK_RATE,
            team_count: 0,
            players: Vec::new(),
            orbs: Vec::new(),
            announcements: Vec::new(),
            round_ticks: 0,
            round_remaining: None,
            last_orb_spawn_ms: 0,
            outcome: None,
            events: Vec::new(),
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn add_player(&mut self, player: Player) -> EntityIndex {
        self.players.push(player);
        self.players.len() - 1
    }

    pub fn alive_players(&self) -> impl Iterator<Item = (EntityIndex, &Player)> {
        self.players.iter().enumerate().filter(|(_, p)| p.alive)
    }

    pub fn alive_count(&self) -> usize {
        self.players.iter().filter(|p| p.alive).count()
    }

    pub fn crown_holder(&self) -> Option<EntityIndex> {
        self.players.iter().position(|p| p.alive && p.is_crown)
    }

    pub fn juggernaut(&self) -> Option<EntityIndex> {
        self.players.iter().position(|p| p.is_juggernaut)
    }

    pub fn potato_count(&self) -> usize {
        self.players.iter().filter(|p| p.alive && p.is_potato).count()
    }

    /// Remaining round time in whole seconds (rounded up)
    pub fn round_seconds_left(&self) -> Option<u32> {
        let rate = self.tick_rate.max(1);
        self.round_remaining.map(|ticks| ticks.div_ceil(rate))
    }

    /// Mark an entity dead. The record stays in `players`.
    pub fn eliminate(&mut self, index: EntityIndex) {
        let Some(player) = self.players.get_mut(index) else {
            return;
        };
        if !player.alive {
            return;
        }
        player.alive = false;
        player.clones.clear();
        player.lunge = LungeState::default();
        debug!("{} eliminated at tick {}", player.name, self.tick);
        self.events.push(GameLoopEvent::Eliminated { index });
    }

    pub fn announce(&mut self, text: String) {
        let position = Vec2::new(0.0, -self.arena_radius * 0.5);
        self.announcements.push(Announcement::new(text, position));
    }
}
