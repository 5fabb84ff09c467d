//! Render snapshot
//!
//! A read-only picture of the arena after a tick. The presentation layer
//! draws from this and never touches `SimulationState` directly.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entity::{Color, EntityKind, Sprite};
use super::state::{GamePhase, SimulationState};
use crate::consts::*;

/// Health meter color band
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HealthBand {
    /// Below 30%
    Critical,
    /// Below 70%
    Damaged,
    Healthy,
}

impl HealthBand {
    pub fn from_ratio(ratio: f32) -> Self {
        if ratio < 0.3 {
            HealthBand::Critical
        } else if ratio < 0.7 {
            HealthBand::Damaged
        } else {
            HealthBand::Healthy
        }
    }

    pub fn color(self) -> Color {
        match self {
            HealthBand::Critical => Color::Red,
            HealthBand::Damaged => Color::Yellow,
            HealthBand::Healthy => Color::Green,
        }
    }
}

/// One visible entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityView {
    /// Draw-order index within this snapshot; not stable across levels
    pub id: u32,
    pub kind: EntityKind,
    pub pos: Vec2,
    pub heading: f32,
    pub color: Color,
    pub size: Vec2,
    pub health_ratio: f32,
    /// Only ships and power-ups carry a health meter
    pub health_band: Option<HealthBand>,
}

/// Info panel contents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hud {
    pub score: u64,
    pub high_score: u64,
    pub enemies: u32,
    pub lives: u32,
    pub level: u32,
    pub multishot: u32,
    pub bombs: u32,
}

/// Radar contact, offset from the player scaled to [-1, 1]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RadarBlip {
    pub offset: Vec2,
    pub color: Color,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderSnapshot {
    pub phase: GamePhase,
    pub tick: u64,
    /// World point at the center of the view
    pub camera: Vec2,
    pub entities: Vec<EntityView>,
    pub hud: Hud,
    pub radar: Vec<RadarBlip>,
    /// Exhaust flame length behind the player (0 when coasting)
    pub flame_length: f32,
}

impl RenderSnapshot {
    pub fn capture(state: &SimulationState) -> Self {
        let player = &state.player;

        // Draw order; explosions go last so they cover what they hit
        let sprites: Vec<&dyn Sprite> = state
            .enemy_missiles
            .iter()
            .map(|m| m as &dyn Sprite)
            .chain(std::iter::once(player as &dyn Sprite))
            .chain(state.missiles.iter().map(|m| m as &dyn Sprite))
            .chain(std::iter::once(&state.bomb as &dyn Sprite))
            .chain(state.enemies.iter().map(|e| e as &dyn Sprite))
            .chain(state.powerups.iter().map(|p| p as &dyn Sprite))
            .collect();
        let blasts = state
            .explosions
            .iter()
            .map(|e| e as &dyn Sprite)
            .chain(std::iter::once(&state.bomb_explosion as &dyn Sprite));

        let entities = sprites
            .iter()
            .copied()
            .chain(blasts)
            .enumerate()
            .filter(|(_, sprite)| sprite.is_active())
            .map(|(id, sprite)| entity_view(id as u32, sprite))
            .collect();

        let radar = sprites
            .iter()
            .filter(|sprite| sprite.is_active())
            .filter_map(|sprite| {
                let offset = sprite.body().pos - player.body.pos;
                (offset.length() < RADAR_RANGE).then(|| RadarBlip {
                    offset: offset / RADAR_RANGE,
                    color: sprite.color(),
                })
            })
            .collect();

        Self {
            phase: state.phase,
            tick: state.time_ticks,
            camera: player.body.pos + Vec2::new(CAMERA_OFFSET, 0.0),
            entities,
            hud: Hud {
                score: player.score,
                high_score: state.high_score,
                enemies: state.active_enemies,
                lives: player.lives,
                level: state.level,
                multishot: player.multishot,
                bombs: player.bombs,
            },
            radar,
            flame_length: player.flame_length(),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

fn entity_view(id: u32, sprite: &dyn Sprite) -> EntityView {
    let body = sprite.body();
    let health_ratio = body.health_ratio();
    let metered = matches!(
        sprite.kind(),
        EntityKind::Player | EntityKind::Drone(_) | EntityKind::Powerup(_)
    );

    EntityView {
        id,
        kind: sprite.kind(),
        pos: body.pos,
        heading: body.heading,
        color: sprite.color(),
        size: Vec2::new(body.width, body.height),
        health_ratio,
        health_band: metered.then(|| HealthBand::from_ratio(health_ratio)),
    }
}
