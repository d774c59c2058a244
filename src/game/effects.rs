//! Timed status effects
//!
//! Every entity carries one countdown per effect kind. Counters only ever go down
//! by one per tick, and a grant overwrites whatever was left.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Effect kinds. `Immunity` and `Freezing` are attacker-side markers, the rest
/// are granted by orbs or applied by attackers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Effect {
    Strength,
    Speed,
    Lucky,
    /// Debuff: entity drifts without steering or attacking
    Freeze,
    Invisible,
    Clone,
    Shield,
    /// Area knockback pulse
    Blast,
    /// Tag-back protection
    Immunity,
    /// Hits apply the freeze debuff to their target
    Freezing,
}

impl Effect {
    pub const COUNT: usize = 10;

    pub const ALL: [Effect; Effect::COUNT] = [
        Effect::Strength,
        Effect::Speed,
        Effect::Lucky,
        Effect::Freeze,
        Effect::Invisible,
        Effect::Clone,
        Effect::Shield,
        Effect::Blast,
        Effect::Immunity,
        Effect::Freezing,
    ];

    #[inline]
    fn index(self) -> usize {
        self as usize
    }

    /// Single-letter badge shown above the entity
    pub fn badge(self) -> char {
        match self {
            Effect::Strength => 'S',
            Effect::Speed => 'P',
            Effect::Lucky => 'L',
            Effect::Freeze => 'Z',
            Effect::Invisible => 'I',
            Effect::Clone => 'C',
            Effect::Shield => 'H',
            Effect::Blast => 'B',
            Effect::Immunity => 'M',
            Effect::Freezing => 'F',
        }
    }
}

/// Per-entity effect counters (remaining ticks)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectStore {
    counters: [u32; Effect::COUNT],
}

impl EffectStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the remaining duration, replacing any previous value
    pub fn grant(&mut self, effect: Effect, ticks: u32) {
        self.counters[effect.index()] = ticks;
    }

    pub fn clear(&mut self, effect: Effect) {
        self.counters[effect.index()] = 0;
    }

    #[inline]
    pub fn remaining(&self, effect: Effect) -> u32 {
        self.counters[effect.index()]
    }

    #[inline]
    pub fn is_active(&self, effect: Effect) -> bool {
        self.remaining(effect) > 0
    }

    /// Decrement every positive counter by one.
    /// Returns the effects that reached zero on this tick.
    pub fn tick(&mut self) -> SmallVec<[Effect; 4]> {
        let mut expired = SmallVec::new();
        for effect in Effect::ALL {
            let counter = &mut self.counters[effect.index()];
            if *counter > 0 {
                *counter -= 1;
                if *counter == 0 {
                    expired.push(effect);
                }
            }
        }
        expired
    }

    /// Active effects in declaration order
    pub fn active(&self) -> impl Iterator<Item = Effect> + '_ {
        Effect::ALL.into_iter().filter(|e| self.is_active(*e))
    }

    pub fn badges(&self) -> SmallVec<[char; 8]> {
        self.active().map(Effect::badge).collect()
    }
}
