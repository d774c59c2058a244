//! Read-only drawable view of a frame, plus the wire codec for out-of-process renderers

use serde::{Deserialize, Serialize};

use crate::game::effects::Effect;
use crate::game::state::{CloneAgent, Color, EntityIndex, GameState, OrbKind, Team};
use crate::util::vec2::Vec2;

/// Juggernaut health bar
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HpBar {
    pub current: f32,
    pub max: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityView {
    pub name: String,
    pub position: Vec2,
    pub radius: f32,
    pub color: Color,
    pub alive: bool,
    pub effects: Vec<Effect>,
    /// One letter per active effect, drawn above the entity
    pub badges: String,
    pub team: Option<Team>,
    pub is_potato: bool,
    pub is_crown: bool,
    pub is_juggernaut: bool,
    pub lunging: bool,
    pub hp: Option<HpBar>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CloneView {
    pub owner: EntityIndex,
    pub position: Vec2,
    pub radius: f32,
    /// Drawn in the owner's color
    pub color: Color,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrbView {
    pub position: Vec2,
    pub kind: OrbKind,
    pub label: char,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnouncementView {
    pub text: String,
    pub position: Vec2,
    pub alpha: f32,
}

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameSnapshot {
    pub tick: u64,
    pub arena_radius: f32,
    pub entities: Vec<EntityView>,
    pub clones: Vec<CloneView>,
    pub orbs: Vec<OrbView>,
    pub announcements: Vec<AnnouncementView>,
    /// Whole seconds left in the round, for timed modes
    pub round_seconds: Option<u32>,
    /// Set once the match has ended
    pub banner: Option<String>,
}

impl FrameSnapshot {
    pub fn capture(state: &GameState) -> Self {
        let entities = state
            .players
            .iter()
            .map(|p| EntityView {
                name: p.name.clone(),
                position: p.position,
                radius: p.radius(),
                color: if p.is_frozen() { Color::FROZEN } else { p.color },
                alive: p.alive,
                effects: p.effects.active().collect(),
                badges: p.effects.badges().into_iter().collect(),
                team: p.team,
                is_potato: p.is_potato,
                is_crown: p.is_crown,
                is_juggernaut: p.is_juggernaut,
                lunging: p.lunge.is_active(),
                hp: p.is_juggernaut.then_some(HpBar {
                    current: p.hp.max(0.0),
                    max: p.max_hp,
                }),
            })
            .collect();

        let clones = state
            .players
            .iter()
            .enumerate()
            .flat_map(|(owner, p)| {
                p.clones.iter().filter(|c| c.alive).map(move |c| CloneView {
                    owner,
                    position: c.position,
                    radius: CloneAgent::radius(),
                    color: p.color,
                })
            })
            .collect();

        Self {
            tick: state.tick,
            arena_radius: state.arena_radius,
            entities,
            clones,
            orbs: state
                .orbs
                .iter()
                .map(|o| OrbView {
                    position: o.position,
                    kind: o.kind,
                    label: o.kind.label(),
                })
                .collect(),
            announcements: state
                .announcements
                .iter()
                .map(|a| AnnouncementView {
                    text: a.text.clone(),
                    position: a.position,
                    alpha: a.alpha,
                })
                .collect(),
            round_seconds: state.round_seconds_left(),
            banner: state.outcome.as_ref().map(|o| o.banner()),
        }
    }
}

/// Encode a frame using bincode
/// Uses legacy config for fixed-size integers
pub fn encode<T: Serialize>(message: &T) -> Result<Vec<u8>, EncodeError> {
    bincode::serde::encode_to_vec(message, bincode::config::legacy())
        .map_err(|e| EncodeError(e.to_string()))
}

/// Decode a frame using bincode
pub fn decode<T: for<'de> Deserialize<'de>>(data: &[u8]) -> Result<T, DecodeError> {
    bincode::serde::decode_from_slice(data, bincode::config::legacy())
        .map(|(msg, _)| msg)
        .map_err(|e| DecodeError(e.to_string()))
}

#[derive(Debug, thiserror::Error)]
#[error("Encode error: {0}")]
pub struct EncodeError(String);

#[derive(Debug, thiserror::Error)]
#[error("Decode error: {0}")]
pub struct DecodeError(String);
