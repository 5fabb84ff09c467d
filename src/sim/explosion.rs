//! Expanding explosion effects
//!
//! Generic explosions are purely visual and pooled. The bomb blast uses the
//! same type with a larger footprint, and it damages whatever it overlaps.

use glam::Vec2;

use super::entity::{Body, Color, EntityKind, LifeState, Sprite};
use super::pool::Poolable;
use crate::consts::*;

/// Color ramp from fresh to fading
const EXPLOSION_COLORS: [Color; 4] = [Color::Yellow, Color::Orange, Color::Red, Color::DarkRed];

#[derive(Debug, Clone, PartialEq)]
pub struct Explosion {
    pub body: Body,
    /// Ticks since the explosion was (re)started
    pub age: u32,
    pub max_age: u32,
    pub max_size: f32,
    /// Bomb blast rather than a generic burst
    pub is_bomb: bool,
}

impl Explosion {
    /// A generic explosion, already running at `pos`
    pub fn new(pos: Vec2, game_speed: f32) -> Self {
        let mut explosion = Self {
            body: Body::new(pos, Vec2::ZERO, game_speed),
            age: 0,
            max_age: EXPLOSION_MAX_AGE,
            max_size: EXPLOSION_MAX_SIZE,
            is_bomb: false,
        };
        explosion.reset(pos);
        explosion
    }

    /// The bomb blast, parked until the bomb goes off
    pub fn bomb_blast(game_speed: f32) -> Self {
        let mut explosion = Self::new(Vec2::ZERO, game_speed);
        explosion.max_size = BOMB_EXPLOSION_MAX_SIZE;
        explosion.is_bomb = true;
        explosion.body.life = LifeState::Ready;
        explosion
    }

    /// Restart at `pos`
    pub fn reset(&mut self, pos: Vec2) {
        self.body.pos = pos;
        self.age = 0;
        self.body.width = EXPLOSION_START_SIZE;
        self.body.height = EXPLOSION_START_SIZE;
        self.body.life = LifeState::Active;
    }

    /// Grow with age; parks itself once `max_age` is reached
    pub fn update(&mut self) {
        if !self.body.is_active() {
            return;
        }

        self.age += 1;
        let t = self.age as f32 / self.max_age as f32;
        let size = EXPLOSION_START_SIZE + (self.max_size - EXPLOSION_START_SIZE) * t;
        self.body.width = size;
        self.body.height = size;

        if self.age >= self.max_age {
            self.body.life = LifeState::Ready;
        }
    }

    /// Current color bucket for the age
    pub fn current_color(&self) -> Color {
        let idx = EXPLOSION_COLORS.len() * self.age as usize / (self.max_age as usize + 1);
        EXPLOSION_COLORS[idx.min(EXPLOSION_COLORS.len() - 1)]
    }
}

impl Sprite for Explosion {
    fn body(&self) -> &Body {
        &self.body
    }

    fn kind(&self) -> EntityKind {
        if self.is_bomb {
            EntityKind::BombExplosion
        } else {
            EntityKind::Explosion
        }
    }

    fn color(&self) -> Color {
        self.current_color()
    }
}

impl Poolable for Explosion {
    fn is_ready(&self) -> bool {
        self.body.life == LifeState::Ready
    }

    fn recycle(&mut self) {
        self.body.life = LifeState::Ready;
    }
}
