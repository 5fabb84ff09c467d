//! Collectible power-ups
//!
//! Power-ups drift around the arena and are never destroyed: picking one up
//! applies its effect and teleports it somewhere else.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::entity::{ArenaBounds, Body, Color, EntityKind, Sprite};
use super::player::Player;
use crate::consts::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerupKind {
    /// +20 multishot charges (max 50)
    Multishot,
    /// +50 health (max 100)
    Heal,
    /// +1 bomb (max 1)
    Bomb,
}

impl PowerupKind {
    pub const ALL: [PowerupKind; 3] = [PowerupKind::Multishot, PowerupKind::Heal, PowerupKind::Bomb];

    pub fn color(self) -> Color {
        match self {
            PowerupKind::Multishot => Color::White,
            PowerupKind::Heal => Color::Green,
            PowerupKind::Bomb => Color::Yellow,
        }
    }

    /// Grant the effect, respecting each counter's cap
    pub fn apply(self, player: &mut Player) {
        match self {
            PowerupKind::Multishot => {
                player.multishot = (player.multishot + 20).min(MAX_MULTISHOT);
            }
            PowerupKind::Heal => {
                let body = &mut player.body;
                body.health = (body.health + 50).min(body.max_health);
            }
            PowerupKind::Bomb => {
                player.bombs = (player.bombs + 1).min(MAX_BOMBS);
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Powerup {
    pub body: Body,
    pub kind: PowerupKind,
}

impl Powerup {
    pub fn new(kind: PowerupKind, pos: Vec2, vel: Vec2, game_speed: f32) -> Self {
        Self {
            body: Body::new(pos, vel, game_speed),
            kind,
        }
    }

    /// Drift and bounce
    pub fn update(&mut self, bounds: &ArenaBounds) {
        self.body.integrate(bounds);
    }

    /// Give the effect to `player` and respawn elsewhere
    pub fn collect<R: Rng>(&mut self, player: &mut Player, bounds: &ArenaBounds, rng: &mut R) {
        self.kind.apply(player);
        self.body.pos = bounds.random_point(rng);
    }
}

impl Sprite for Powerup {
    fn body(&self) -> &Body {
        &self.body
    }

    fn kind(&self) -> EntityKind {
        EntityKind::Powerup(self.kind)
    }

    fn color(&self) -> Color {
        self.kind.color()
    }
}
