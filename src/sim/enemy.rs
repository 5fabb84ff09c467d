//! Enemy drones
//!
//! Each drone picks a behavior at spawn. The behavior is a steering rule
//! re-applied every tick against the player's position.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::entity::{ArenaBounds, Body, Color, EntityKind, LifeState, Sprite};
use crate::consts::*;

/// Drone behavior, fixed for the drone's lifetime
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DroneKind {
    /// Closes in on the player
    Hunter,
    /// Sits still where it was placed
    Mine,
    /// Keeps its distance from the player
    Surveillance,
}

impl DroneKind {
    pub const ALL: [DroneKind; 3] = [DroneKind::Hunter, DroneKind::Mine, DroneKind::Surveillance];

    pub fn random<R: Rng>(rng: &mut R) -> Self {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }

    /// Points awarded for destroying this drone
    pub fn score_value(self) -> u64 {
        match self {
            DroneKind::Hunter => HUNTER_SCORE,
            DroneKind::Mine | DroneKind::Surveillance => DRONE_SCORE,
        }
    }

    pub fn color(self) -> Color {
        match self {
            DroneKind::Hunter => Color::Red,
            DroneKind::Mine => Color::Orange,
            DroneKind::Surveillance => Color::Pink,
        }
    }
}

/// -1, 0 or +1: direction along one axis from `own` toward `target`,
/// or 0 when the gap is not below `range`
#[inline]
fn axis_toward(own: f32, target: f32, range: f32) -> f32 {
    if own < target && target - own < range {
        1.0
    } else if own > target && own - target < range {
        -1.0
    } else {
        0.0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Enemy {
    pub body: Body,
    pub kind: DroneKind,
}

impl Enemy {
    pub fn new(kind: DroneKind, pos: Vec2, vel: Vec2, game_speed: f32) -> Self {
        Self {
            body: Body::new(pos, vel, game_speed).with_health(ENEMY_MAX_HEALTH),
            kind,
        }
    }

    pub fn score_value(&self) -> u64 {
        self.kind.score_value()
    }

    /// Apply this drone's steering rule against `target`
    pub fn steer<R: Rng>(&mut self, target: Vec2, rng: &mut R) {
        let pos = self.body.pos;
        match self.kind {
            DroneKind::Hunter => {
                if rng.random::<f32>() < HUNTER_PURSUIT_CHANCE {
                    let dir = Vec2::new(
                        axis_toward(pos.x, target.x, HUNTER_SENSE_RANGE),
                        axis_toward(pos.y, target.y, HUNTER_SENSE_RANGE),
                    );
                    self.body.vel += dir * STEERING_NUDGE;
                }
            }
            DroneKind::Mine => {
                self.body.vel = Vec2::ZERO;
            }
            DroneKind::Surveillance => {
                let dir = Vec2::new(
                    axis_toward(pos.x, target.x, SURVEILLANCE_SENSE_RANGE),
                    axis_toward(pos.y, target.y, SURVEILLANCE_SENSE_RANGE),
                );
                self.body.vel -= dir * STEERING_NUDGE;
            }
        }
    }

    /// Steer, cap speed, move and bounce
    pub fn update<R: Rng>(&mut self, target: Vec2, bounds: &ArenaBounds, rng: &mut R) {
        if !self.body.is_active() {
            return;
        }

        self.body.turn();
        self.body.apply_thrust();
        self.steer(target, rng);
        self.body.clamp_speed();
        self.body.advance(bounds);
    }

    /// Take the drone out of the wave
    pub fn deactivate(&mut self) {
        self.body.life = LifeState::Inactive;
    }
}

impl Sprite for Enemy {
    fn body(&self) -> &Body {
        &self.body
    }

    fn kind(&self) -> EntityKind {
        EntityKind::Drone(self.kind)
    }

    fn color(&self) -> Color {
        self.kind.color()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_mine_stays_put() {
        let bounds = ArenaBounds::default();
        let mut rng = Pcg32::seed_from_u64(1);
        let mut mine = Enemy::new(DroneKind::Mine, Vec2::new(50.0, 50.0), Vec2::new(0.6, -0.6), GAME_SPEED);
        mine.update(Vec2::ZERO, &bounds, &mut rng);
        mine.update(Vec2::ZERO, &bounds, &mut rng);
        assert_eq!(mine.body.vel, Vec2::ZERO);
        assert_eq!(mine.body.pos, Vec2::new(50.0, 50.0));
    }

    #[test]
    fn test_surveillance_backs_off_only_when_close() {
        let mut rng = Pcg32::seed_from_u64(2);
        let mut drone = Enemy::new(DroneKind::Surveillance, Vec2::new(50.0, 500.0), Vec2::ZERO, GAME_SPEED);
        drone.steer(Vec2::ZERO, &mut rng);
        // Close on x (moves further right), far on y (untouched)
        assert!((drone.body.vel.x - STEERING_NUDGE).abs() < 1e-6);
        assert_eq!(drone.body.vel.y, 0.0);
    }

    #[test]
    fn test_hunter_only_closes_in() {
        let mut rng = Pcg32::seed_from_u64(3);
        let mut hunter = Enemy::new(DroneKind::Hunter, Vec2::new(-150.0, 150.0), Vec2::ZERO, GAME_SPEED);
        for _ in 0..100 {
            hunter.steer(Vec2::ZERO, &mut rng);
        }
        assert!(hunter.body.vel.x > 0.0);
        assert!(hunter.body.vel.y < 0.0);
        assert!((hunter.body.vel.x + hunter.body.vel.y).abs() < 1e-4);
    }

    #[test]
    fn test_scores_and_health() {
        let hunter = Enemy::new(DroneKind::Hunter, Vec2::ZERO, Vec2::ZERO, GAME_SPEED);
        let mine = Enemy::new(DroneKind::Mine, Vec2::ZERO, Vec2::ZERO, GAME_SPEED);
        assert_eq!(hunter.score_value(), 10);
        assert_eq!(mine.score_value(), 5);
        assert_eq!(hunter.body.health, ENEMY_MAX_HEALTH);
        assert_eq!(hunter.body.max_health, ENEMY_MAX_HEALTH);
    }

    proptest! {
        #[test]
        fn prop_drone_speed_capped(
            kind_idx in 0usize..3,
            x in -900.0f32..900.0,
            y in -900.0f32..900.0,
            seed in any::<u64>(),
            ticks in 1usize..300,
        ) {
            let bounds = ArenaBounds::default();
            let mut rng = Pcg32::seed_from_u64(seed);
            let mut drone = Enemy::new(DroneKind::ALL[kind_idx], Vec2::new(x, y), Vec2::new(0.6, -0.6), GAME_SPEED);
            for _ in 0..ticks {
                drone.update(Vec2::ZERO, &bounds, &mut rng);
                prop_assert!(drone.body.vel.x.abs() <= drone.body.max_speed.x + 1e-5);
                prop_assert!(drone.body.vel.y.abs() <= drone.body.max_speed.y + 1e-5);
                prop_assert!((0.0..360.0).contains(&drone.body.heading));
            }
        }
    }
}
