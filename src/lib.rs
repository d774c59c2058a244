//! Fightpit
//!
//! A deterministic, tick-driven arena brawl between autonomous circular combatants.
//! Six modes share one pipeline: free-for-all, team deathmatch, team-swap,
//! hot potato, crown keeper and juggernaut.

pub mod batch;
pub mod config;
pub mod game;
pub mod session;
pub mod util;
