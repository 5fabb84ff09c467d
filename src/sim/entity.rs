//! Shared sprite record and movement rules
//!
//! Every entity in the arena (ship, drones, missiles, bomb, explosions,
//! power-ups) carries a `Body`. Variant structs wrap it and expose it through
//! the `Sprite` trait so collision and rendering can treat them uniformly.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::enemy::DroneKind;
use super::powerup::PowerupKind;
use crate::consts::*;
use crate::{heading_to_vec, wrap_heading};

/// Lifecycle of an entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LifeState {
    /// Simulated, collidable and rendered
    #[default]
    Active,
    /// Destroyed for the rest of the wave
    Inactive,
    /// Parked in a pool, available for reuse
    Ready,
}

/// Category tag used by the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityKind {
    Player,
    PlayerMissile,
    EnemyMissile,
    Bomb,
    Explosion,
    BombExplosion,
    Drone(DroneKind),
    Powerup(PowerupKind),
}

/// Palette shared with the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Color {
    White,
    Yellow,
    Orange,
    Red,
    DarkRed,
    Pink,
    Green,
    Grey,
}

/// Playable area, centered on the origin
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ArenaBounds {
    pub width: f32,
    pub height: f32,
}

impl Default for ArenaBounds {
    fn default() -> Self {
        Self::new(ARENA_WIDTH, ARENA_HEIGHT)
    }
}

impl ArenaBounds {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Largest |x| an entity center may reach
    pub fn max_x(&self) -> f32 {
        (self.width / 2.0 - BORDER_MARGIN).max(0.0)
    }

    /// Largest |y| an entity center may reach
    pub fn max_y(&self) -> f32 {
        (self.height / 2.0 - BORDER_MARGIN).max(0.0)
    }

    pub fn contains(&self, pos: Vec2) -> bool {
        pos.x.abs() <= self.max_x() && pos.y.abs() <= self.max_y()
    }

    /// Uniform random point inside the clamped area, snapped to whole units
    pub fn random_point<R: Rng>(&self, rng: &mut R) -> Vec2 {
        let max_x = self.max_x().floor() as i32;
        let max_y = self.max_y().floor() as i32;
        Vec2::new(
            rng.random_range(-max_x..=max_x) as f32,
            rng.random_range(-max_y..=max_y) as f32,
        )
    }

    /// The four clamped corners
    pub fn corners(&self) -> [Vec2; 4] {
        let (x, y) = (self.max_x(), self.max_y());
        [
            Vec2::new(x, y),
            Vec2::new(-x, y),
            Vec2::new(x, -y),
            Vec2::new(-x, -y),
        ]
    }
}

/// Shared data record for every sprite
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Degrees, always in [0, 360)
    pub heading: f32,
    /// Angular velocity in degrees per tick
    pub spin: f32,
    /// Forward acceleration applied along the heading each tick
    pub thrust: f32,
    /// Thrust granted while accelerating
    pub acceleration: f32,
    pub health: i32,
    pub max_health: i32,
    pub width: f32,
    pub height: f32,
    /// Per-axis velocity cap (only enforced by capped movers)
    pub max_speed: Vec2,
    pub life: LifeState,
}

impl Body {
    pub fn new(pos: Vec2, vel: Vec2, game_speed: f32) -> Self {
        Self {
            pos,
            vel,
            heading: 0.0,
            spin: 0.0,
            thrust: 0.0,
            acceleration: 0.2 * game_speed,
            health: 100,
            max_health: 100,
            width: 20.0,
            height: 20.0,
            max_speed: Vec2::splat(5.0 * game_speed),
            life: LifeState::Active,
        }
    }

    pub fn with_size(mut self, width: f32, height: f32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_health(mut self, health: i32) -> Self {
        self.health = health;
        self.max_health = health;
        self
    }

    pub fn with_life(mut self, life: LifeState) -> Self {
        self.life = life;
        self
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.life == LifeState::Active
    }

    /// Advance heading by spin, wrapped to [0, 360)
    pub fn turn(&mut self) {
        self.heading = wrap_heading(self.heading + self.spin);
    }

    /// Add thrust along the current heading to velocity
    pub fn apply_thrust(&mut self) {
        self.vel += heading_to_vec(self.heading) * self.thrust;
    }

    /// Clamp each velocity component to the per-axis cap
    pub fn clamp_speed(&mut self) {
        self.vel = self.vel.clamp(-self.max_speed, self.max_speed);
    }

    /// Move by velocity, then bounce off the arena walls
    pub fn advance(&mut self, bounds: &ArenaBounds) {
        self.pos += self.vel;
        self.border_check(bounds);
    }

    /// Uncapped movement: turn, thrust, move, bounce
    pub fn integrate(&mut self, bounds: &ArenaBounds) {
        self.turn();
        self.apply_thrust();
        self.advance(bounds);
    }

    /// Capped movement: turn, thrust, clamp, move, bounce
    pub fn integrate_capped(&mut self, bounds: &ArenaBounds) {
        self.turn();
        self.apply_thrust();
        self.clamp_speed();
        self.advance(bounds);
    }

    /// Clamp position into the arena; the velocity component on a clamped
    /// axis is turned to point back inside
    pub fn border_check(&mut self, bounds: &ArenaBounds) {
        let (max_x, max_y) = (bounds.max_x(), bounds.max_y());

        if self.pos.x > max_x {
            self.pos.x = max_x;
            self.vel.x = -self.vel.x.abs();
        } else if self.pos.x < -max_x {
            self.pos.x = -max_x;
            self.vel.x = self.vel.x.abs();
        }

        if self.pos.y > max_y {
            self.pos.y = max_y;
            self.vel.y = -self.vel.y.abs();
        } else if self.pos.y < -max_y {
            self.pos.y = -max_y;
            self.vel.y = self.vel.y.abs();
        }
    }

    /// Axis-aligned overlap test; only an active body can collide
    pub fn is_collision(&self, other: &Body) -> bool {
        self.is_active()
            && self.pos.x - self.width / 2.0 < other.pos.x + other.width / 2.0
            && self.pos.x + self.width / 2.0 > other.pos.x - other.width / 2.0
            && self.pos.y - self.height / 2.0 < other.pos.y + other.height / 2.0
            && self.pos.y + self.height / 2.0 > other.pos.y - other.height / 2.0
    }

    /// Swap velocities with another body
    pub fn bounce(&mut self, other: &mut Body) {
        std::mem::swap(&mut self.vel, &mut other.vel);
    }

    /// Subtract health; returns true once health is depleted
    pub fn take_damage(&mut self, amount: i32) -> bool {
        self.health -= amount;
        self.health <= 0
    }

    pub fn health_ratio(&self) -> f32 {
        if self.max_health <= 0 {
            return 0.0;
        }
        (self.health as f32 / self.max_health as f32).clamp(0.0, 1.0)
    }

    /// max(|dx|, |dy|) between centers
    pub fn chebyshev_distance(&self, other: &Body) -> f32 {
        let d = (self.pos - other.pos).abs();
        d.x.max(d.y)
    }

    /// Within the window where combat against the player is resolved
    pub fn in_combat_range(&self, other: &Body) -> bool {
        self.chebyshev_distance(other) < COLLISION_CHECK_RANGE
    }
}

/// Capabilities shared by every entity variant
pub trait Sprite {
    fn body(&self) -> &Body;
    fn kind(&self) -> EntityKind;
    fn color(&self) -> Color;

    fn is_active(&self) -> bool {
        self.body().is_active()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn body_at(x: f32, y: f32) -> Body {
        Body::new(Vec2::new(x, y), Vec2::ZERO, GAME_SPEED)
    }

    #[test]
    fn test_thrust_at_ninety_degrees() {
        let bounds = ArenaBounds::default();
        let mut body = body_at(0.0, 0.0);
        body.heading = 90.0;
        body.thrust = body.acceleration;
        body.integrate_capped(&bounds);

        assert!((body.vel.y - 0.2 * GAME_SPEED).abs() < 1e-6);
        assert!(body.vel.x.abs() < 1e-6);
    }

    #[test]
    fn test_border_bounce_flips_outward_component() {
        let bounds = ArenaBounds::new(100.0, 100.0);
        let mut body = body_at(39.0, 0.0);
        body.vel = Vec2::new(3.0, 1.0);
        body.integrate(&bounds);

        assert_eq!(body.pos.x, 40.0);
        assert_eq!(body.vel.x, -3.0);
        assert_eq!(body.vel.y, 1.0);

        let mut body = body_at(0.0, -39.0);
        body.vel = Vec2::new(0.0, -2.0);
        body.integrate(&bounds);
        assert_eq!(body.pos.y, -40.0);
        assert_eq!(body.vel.y, 2.0);
    }

    #[test]
    fn test_collision_requires_active_self() {
        let a = body_at(0.0, 0.0);
        let mut b = body_at(5.0, 5.0);
        assert!(a.is_collision(&b));
        assert!(b.is_collision(&a));

        b.life = LifeState::Ready;
        assert!(!b.is_collision(&a));
        // Inactive `other` is still tested; callers gate on its state
        assert!(a.is_collision(&b));
    }

    #[test]
    fn test_collision_is_symmetric_for_mixed_extents() {
        let wide = body_at(0.0, 0.0).with_size(40.0, 4.0);
        let tall = body_at(0.0, 9.0).with_size(4.0, 16.0);
        assert_eq!(wide.is_collision(&tall), tall.is_collision(&wide));
        assert!(wide.is_collision(&tall));
    }

    #[test]
    fn test_bounce_swaps_velocities() {
        let mut a = body_at(0.0, 0.0);
        let mut b = body_at(1.0, 1.0);
        a.vel = Vec2::new(1.0, 2.0);
        b.vel = Vec2::new(-3.0, 0.5);
        a.bounce(&mut b);
        assert_eq!(a.vel, Vec2::new(-3.0, 0.5));
        assert_eq!(b.vel, Vec2::new(1.0, 2.0));
    }

    #[test]
    fn test_chebyshev_range() {
        let a = body_at(0.0, 0.0);
        assert!(a.in_combat_range(&body_at(299.0, -299.0)));
        assert!(!a.in_combat_range(&body_at(10.0, 300.0)));
    }

    proptest! {
        #[test]
        fn prop_heading_stays_wrapped(start in 0.0f32..360.0, spin in -720.0f32..720.0, ticks in 1usize..50) {
            let bounds = ArenaBounds::default();
            let mut body = body_at(0.0, 0.0);
            body.heading = start;
            body.spin = spin;
            for _ in 0..ticks {
                body.integrate(&bounds);
                prop_assert!((0.0..360.0).contains(&body.heading));
            }
        }

        #[test]
        fn prop_capped_speed_and_bounds(
            heading in 0.0f32..360.0,
            thrust in 0.0f32..5.0,
            vx in -50.0f32..50.0,
            vy in -50.0f32..50.0,
            ticks in 1usize..200,
        ) {
            let bounds = ArenaBounds::new(400.0, 300.0);
            let mut body = body_at(0.0, 0.0);
            body.heading = heading;
            body.thrust = thrust;
            body.vel = Vec2::new(vx, vy);
            for _ in 0..ticks {
                body.integrate_capped(&bounds);
                prop_assert!(body.vel.x.abs() <= body.max_speed.x + 1e-5);
                prop_assert!(body.vel.y.abs() <= body.max_speed.y + 1e-5);
                prop_assert!(bounds.contains(body.pos));
            }
        }
    }
}
