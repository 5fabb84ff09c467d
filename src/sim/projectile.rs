//! Missiles and the bomb
//!
//! Both are pooled: they wait in `Ready`, go `Active` when fired, and come
//! back to `Ready` when their fuel or fuse runs out or they hit something.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entity::{ArenaBounds, Body, Color, EntityKind, LifeState, Sprite};
use super::pool::Poolable;
use crate::consts::*;
use crate::wrap_heading;

/// Which side fired a missile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MissileOwner {
    Player,
    Enemy,
}

/// A fuel-limited missile
#[derive(Debug, Clone, PartialEq)]
pub struct Missile {
    pub body: Body,
    pub owner: MissileOwner,
    /// Burned by `thrust` every active tick
    pub fuel: f32,
}

impl Missile {
    pub fn new(owner: MissileOwner, game_speed: f32) -> Self {
        let mut body = Body::new(Vec2::ZERO, Vec2::ZERO, game_speed)
            .with_size(MISSILE_SIZE, MISSILE_SIZE)
            .with_life(LifeState::Ready);
        body.thrust = MISSILE_THRUST;
        Self {
            body,
            owner,
            fuel: MISSILE_MAX_FUEL,
        }
    }

    /// Launch from `pos` along `heading`, on top of the shooter's velocity.
    /// Returns false if the missile is already in flight.
    pub fn fire(&mut self, pos: Vec2, heading: f32, inherited_vel: Vec2) -> bool {
        if self.body.life != LifeState::Ready {
            return false;
        }
        self.body.life = LifeState::Active;
        self.body.pos = pos;
        self.body.heading = wrap_heading(heading);
        self.body.vel = inherited_vel;
        self.body.apply_thrust();
        true
    }

    /// Burn fuel and coast; expires back into the pool when the tank is dry
    pub fn update(&mut self, bounds: &ArenaBounds) {
        if !self.body.is_active() {
            return;
        }

        self.fuel -= self.body.thrust;
        if self.fuel <= 0.0 {
            self.reset();
            return;
        }

        self.body.turn();
        self.body.advance(bounds);
    }

    pub fn reset(&mut self) {
        self.fuel = MISSILE_MAX_FUEL;
        self.body.vel = Vec2::ZERO;
        self.body.life = LifeState::Ready;
    }
}

impl Sprite for Missile {
    fn body(&self) -> &Body {
        &self.body
    }

    fn kind(&self) -> EntityKind {
        match self.owner {
            MissileOwner::Player => EntityKind::PlayerMissile,
            MissileOwner::Enemy => EntityKind::EnemyMissile,
        }
    }

    fn color(&self) -> Color {
        match self.owner {
            MissileOwner::Player => Color::Yellow,
            MissileOwner::Enemy => Color::Red,
        }
    }
}

impl Poolable for Missile {
    fn is_ready(&self) -> bool {
        self.body.life == LifeState::Ready
    }

    fn recycle(&mut self) {
        self.reset();
    }
}

/// The player's single bomb
#[derive(Debug, Clone, PartialEq)]
pub struct Bomb {
    pub body: Body,
    /// Ticks left before detonation
    pub fuse: u32,
}

impl Bomb {
    pub fn new(game_speed: f32) -> Self {
        Self {
            body: Body::new(Vec2::ZERO, Vec2::ZERO, game_speed)
                .with_size(BOMB_SIZE, BOMB_SIZE)
                .with_life(LifeState::Ready),
            fuse: BOMB_MAX_FUSE,
        }
    }

    /// Arm the bomb at `pos`. Returns false if it is already armed.
    pub fn fire(&mut self, pos: Vec2) -> bool {
        if self.body.life != LifeState::Ready {
            return false;
        }
        self.body.life = LifeState::Active;
        self.body.pos = pos;
        true
    }

    /// Detonate on the next update
    pub fn trip(&mut self) {
        self.fuse = 0;
    }

    /// Count the fuse down; returns the blast position when it goes off
    pub fn update(&mut self) -> Option<Vec2> {
        if !self.body.is_active() {
            return None;
        }

        self.fuse = self.fuse.saturating_sub(1);
        if self.fuse == 0 {
            self.reset();
            return Some(self.body.pos);
        }
        None
    }

    pub fn reset(&mut self) {
        self.fuse = BOMB_MAX_FUSE;
        self.body.life = LifeState::Ready;
    }
}

impl Sprite for Bomb {
    fn body(&self) -> &Body {
        &self.body
    }

    fn kind(&self) -> EntityKind {
        EntityKind::Bomb
    }

    fn color(&self) -> Color {
        Color::Yellow
    }
}

impl Poolable for Bomb {
    fn is_ready(&self) -> bool {
        self.body.life == LifeState::Ready
    }

    fn recycle(&mut self) {
        self.reset();
    }
}
