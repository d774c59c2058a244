/// Arena geometry. The arena is a circle centered at the origin.
pub mod arena {
    /// Radius of the arena boundary (strict `>` eliminates)
    pub const RADIUS: f32 = 350.0;
    /// Smallest configurable arena radius
    pub const MIN_RADIUS: f32 = 50.0;
    /// Half-width of the square around the center that entities spawn in
    pub const SPAWN_SCATTER: f32 = 50.0;
    /// Border avoidance kicks in within this many own radii of the boundary
    pub const BORDER_MARGIN_RADII: f32 = 3.0;
    /// Maximum inward force applied at the boundary itself
    pub const BORDER_FORCE: f32 = 0.3;
}

/// Entity sizing
pub mod body {
    /// Default entity collision radius
    pub const PLAYER_RADIUS: f32 = 10.0;
    /// Crown holder radius
    pub const CROWN_RADIUS: f32 = 12.0;
    /// Juggernaut radius
    pub const JUGGERNAUT_RADIUS: f32 = 20.0;
    /// Clone radius as fraction of player radius
    pub const CLONE_RADIUS_SCALE: f32 = 0.7;
}

/// Physics constants - friction is multiplicative per tick
pub mod physics {
    /// Velocity multiplier applied once per tick after integration
    pub const FRICTION: f32 = 0.9;
    /// Fraction of pair overlap converted into separation velocity per body
    pub const SEPARATION_STIFFNESS: f32 = 0.1;
    /// Simulation ticks per second (display-refresh cadence)
    pub const TICK_RATE: u32 = 60;
}

/// Movement tuning
pub mod movement {
    /// Base steering force per tick
    pub const BASE_SPEED: f32 = 0.5;
    /// Speed effect multiplier
    pub const SPEED_EFFECT_MULT: f32 = 2.0;
    /// Potato holders move faster to chase
    pub const POTATO_MULT: f32 = 1.3;
    /// Juggernaut is slow
    pub const JUGGERNAUT_MULT: f32 = 0.7;
    /// Crown holder bonus
    pub const CROWN_MULT: f32 = 1.1;
    /// Crown holder bonus when the speed effect is active as well
    pub const CROWN_SPEED_MULT: f32 = 1.25;
    /// Chase force is skipped when closer than this
    pub const MIN_STEER_DISTANCE: f32 = 0.1;
}

/// Orb (power-up) constants
pub mod orb {
    /// Orb pickup radius
    pub const RADIUS: f32 = 8.0;
    /// Wall-clock interval between spawns in milliseconds
    pub const SPAWN_INTERVAL_MS: u64 = 5000;
    /// Duration granted by most orbs (ticks)
    pub const EFFECT_DURATION: u32 = 600;
    /// Duration of the blast pulse (ticks)
    pub const BLAST_DURATION: u32 = 60;
    /// AI orb detection radius (inclusive)
    pub const DETECTION_RADIUS: f32 = 200.0;
    /// Blast pulse reach
    pub const BLAST_RADIUS: f32 = 100.0;
    /// Blast pulse force per tick
    pub const BLAST_FORCE: f32 = 10.0;
}

/// Clone sub-agent constants
pub mod clone {
    /// Clones spawned per pickup
    pub const COUNT: usize = 4;
    /// Ring distance from owner in owner radii
    pub const RING_RADII: f32 = 2.0;
    /// Clone steering force per tick
    pub const SPEED: f32 = 0.7;
    /// Distance at which a clone shoves its target
    pub const HIT_RANGE: f32 = 20.0;
    /// Shove applied by a clone
    pub const KNOCKBACK: f32 = 10.0;
}

/// Combat constants
pub mod combat {
    /// Base probability of a critical hit
    pub const BASE_CRIT_CHANCE: f64 = 0.01;
    /// Extra crit probability with the lucky effect
    pub const LUCKY_CRIT_BONUS: f64 = 0.09;
    /// Knockback of a critical hit
    pub const CRIT_KNOCKBACK: f32 = 100.0;
    /// Normal knockback range (half-open)
    pub const MIN_KNOCKBACK: f32 = 0.1;
    pub const MAX_KNOCKBACK: f32 = 10.0;
    /// Strength effect multiplier (non-crit only)
    pub const STRENGTH_MULT: f32 = 2.0;
    /// Shield effect multiplier
    pub const SHIELD_MULT: f32 = 0.5;
    /// Freeze debuff applied by a freezing attacker (ticks)
    pub const FREEZE_DURATION: u32 = 300;
    /// Juggernaut-on-hunter knockback multiplier
    pub const JUGGERNAUT_HIT_MULT: f32 = 3.0;
    /// Team swap requires strictly more knockback than this
    pub const SWAP_THRESHOLD: f32 = 5.0;
    /// Knockback applied after a successful team swap
    pub const SWAP_KNOCKBACK: f32 = 2.0;
    /// Immunity granted on potato pass / crown steal (ticks)
    pub const TAG_IMMUNITY: u32 = 120;
}

/// Role-based mode constants
pub mod roles {
    /// Distance under which non-holders flee a potato / holder flees hunters
    pub const FLEE_RADIUS: f32 = 300.0;
    /// Default round length in seconds
    pub const DEFAULT_ROUND_SECONDS: u32 = 60;
    /// Upper bound on simultaneous potato holders
    pub const MAX_POTATO_HOLDERS: usize = 10;
    /// One potato per this many live entities (rounded up)
    pub const PLAYERS_PER_POTATO: usize = 4;
    /// Juggernaut hit points per hunter at match start
    pub const JUGGERNAUT_HP_PER_HUNTER: f32 = 150.0;
}

/// Crown-mode lunge
pub mod lunge {
    /// Lunge only triggers beyond this distance to the crown holder
    pub const MIN_DISTANCE: f32 = 100.0;
    /// Active duration (ticks)
    pub const DURATION: u32 = 120;
    /// Cooldown started at lunge start (ticks)
    pub const COOLDOWN: u32 = 420;
    /// Speed amplification while lunging
    pub const SPEED_MULT: f32 = 3.0;
}

/// Announcement (crit / round message) constants
pub mod announcement {
    /// Lifetime in ticks
    pub const LIFE: u32 = 60;
    /// Upward drift per tick
    pub const DRIFT: f32 = 0.5;
}
