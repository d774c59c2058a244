use crate::game::constants::{arena, orb, physics, roles};

/// Simulation configuration
#[derive(Debug, Clone, PartialEq)]
pub struct SimConfig {
    /// Radius of the arena boundary
    pub arena_radius: f32,
    /// Ticks per second (round timers are seconds times this)
    pub tick_rate: u32,
    /// Wall-clock gap between orb spawns
    pub orb_spawn_interval_ms: u64,
    /// Default round length for timed modes when the request has none
    pub round_seconds: u32,
    /// Stop a headless match after this many ticks (0 = no limit)
    pub max_ticks: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            arena_radius: arena::RADIUS,
            tick_rate: physics::TICK_RATE,
            orb_spawn_interval_ms: orb::SPAWN_INTERVAL_MS,
            round_seconds: roles::DEFAULT_ROUND_SECONDS,
            max_ticks: 0,
        }
    }
}

/// Parse `key` from `lookup`, keeping `current` when missing, malformed or rejected
fn read_var<T, F>(lookup: &F, key: &str, current: T, accept: impl Fn(&T) -> bool) -> T
where
    T: std::str::FromStr,
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(key) else {
        return current;
    };
    match raw.trim().parse::<T>() {
        Ok(parsed) if accept(&parsed) => parsed,
        Ok(_) => {
            tracing::warn!("{} out of range, using default", key);
            current
        }
        Err(_) => {
            tracing::warn!("Invalid {} '{}', using default", key, raw);
            current
        }
    }
}

impl SimConfig {
    /// Load config from environment or use defaults
    pub fn load_or_default() -> Self {
        Self::load_from(|key| std::env::var(key).ok())
    }

    /// Load config from an arbitrary key lookup
    pub fn load_from(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            arena_radius: read_var(&lookup, "ARENA_RADIUS", defaults.arena_radius, |r| {
                r.is_finite() && *r >= arena::MIN_RADIUS
            }),
            tick_rate: read_var(&lookup, "TICK_RATE", defaults.tick_rate, |r| {
                (1..=1000).contains(r)
            }),
            orb_spawn_interval_ms: read_var(
                &lookup,
                "ORB_SPAWN_INTERVAL_MS",
                defaults.orb_spawn_interval_ms,
                |ms| *ms > 0,
            ),
            round_seconds: read_var(&lookup, "ROUND_SECONDS", defaults.round_seconds, |s| *s > 0),
            max_ticks: read_var(&lookup, "MAX_TICKS", defaults.max_ticks, |_| true),
        }
    }

    /// Milliseconds per tick at the configured rate
    pub fn tick_duration_ms(&self) -> u64 {
        (1000 / self.tick_rate.max(1)) as u64
    }

    /// Validate configuration after loading
    pub fn validate(&self) -> Result<(), String> {
        if !self.arena_radius.is_finite() || self.arena_radius < arena::MIN_RADIUS {
            return Err(format!("arena_radius must be at least {}", arena::MIN_RADIUS));
        }
        if self.tick_rate == 0 {
            return Err("tick_rate must be at least 1".to_string());
        }
        if self.round_seconds == 0 {
            return Err("round_seconds must be at least 1".to_string());
        }
        Ok(())
    }
}
