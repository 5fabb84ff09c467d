//! The player's ship

use glam::Vec2;

use super::entity::{ArenaBounds, Body, Color, EntityKind, Sprite};
use super::pool::{Pool, Poolable};
use super::projectile::{Bomb, Missile};
use crate::consts::*;

/// Heading offsets for a volley, by number of missiles launched
fn volley_offsets(count: usize) -> &'static [f32] {
    match count {
        0 => &[],
        1 => &[0.0],
        2 => &[3.0, -3.0],
        _ => &[5.0, -5.0, 0.0],
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub body: Body,
    pub lives: u32,
    /// Never decreases during a run
    pub score: u64,
    /// Remaining multishot volleys (0..=50)
    pub multishot: u32,
    /// Bombs in stock (0..=1)
    pub bombs: u32,
}

impl Player {
    pub fn new(game_speed: f32, lives: u32) -> Self {
        let mut body = Body::new(Vec2::ZERO, Vec2::ZERO, game_speed).with_health(PLAYER_MAX_HEALTH);
        body.heading = PLAYER_START_HEADING;
        body.max_speed = Vec2::splat(10.0 * game_speed);
        Self {
            body,
            lives,
            score: 0,
            multishot: 0,
            bombs: 0,
        }
    }

    pub fn rotate_left(&mut self) {
        self.body.spin = PLAYER_TURN_RATE;
    }

    pub fn rotate_right(&mut self) {
        self.body.spin = -PLAYER_TURN_RATE;
    }

    pub fn stop_rotation(&mut self) {
        self.body.spin = 0.0;
    }

    pub fn accelerate(&mut self) {
        self.body.thrust = self.body.acceleration;
    }

    pub fn decelerate(&mut self) {
        self.body.thrust = 0.0;
    }

    /// Capped flight
    pub fn update(&mut self, bounds: &ArenaBounds) {
        if self.body.is_active() {
            self.body.integrate_capped(bounds);
        }
    }

    /// Launch a volley from the ready missiles. A multishot charge fires
    /// every ready missile in a spread; otherwise a single missile goes out.
    /// Returns how many missiles left the pool.
    pub fn fire(&mut self, missiles: &mut Pool<Missile>) -> usize {
        let ready = missiles.ready_count();
        if ready == 0 {
            return 0;
        }

        let volley = if self.multishot > 0 {
            self.multishot -= 1;
            ready
        } else {
            1
        };

        let (pos, heading, vel) = (self.body.pos, self.body.heading, self.body.vel);
        let mut fired = 0;
        let ready_slots = missiles.iter_mut().filter(|m| m.is_ready());
        for (missile, offset) in ready_slots.zip(volley_offsets(volley)) {
            if missile.fire(pos, heading + offset, vel) {
                fired += 1;
            }
        }
        fired
    }

    /// Arm the bomb under the ship if one is in stock and the bomb is idle
    pub fn drop_bomb(&mut self, bomb: &mut Bomb) -> bool {
        if self.bombs == 0 || !bomb.is_ready() {
            return false;
        }
        if bomb.fire(self.body.pos) {
            self.bombs -= 1;
            return true;
        }
        false
    }

    /// Spend a life. Respawns at the center and returns true while lives
    /// remain; returns false when the last life is gone.
    pub fn lose_life(&mut self) -> bool {
        self.lives = self.lives.saturating_sub(1);
        if self.lives == 0 {
            return false;
        }
        self.body.pos = Vec2::ZERO;
        self.body.vel = Vec2::ZERO;
        self.body.health = self.body.max_health;
        self.body.heading = PLAYER_START_HEADING;
        true
    }

    /// Exhaust flame length for rendering (0 when coasting)
    pub fn flame_length(&self) -> f32 {
        if self.body.thrust > 0.0 {
            (self.body.thrust / 2.0).min(0.5)
        } else {
            0.0
        }
    }
}

impl Sprite for Player {
    fn body(&self) -> &Body {
        &self.body
    }

    fn kind(&self) -> EntityKind {
        EntityKind::Player
    }

    fn color(&self) -> Color {
        Color::White
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::projectile::MissileOwner;

    fn missile_pool() -> Pool<Missile> {
        Pool::fixed(
            (0..MISSILE_POOL_SIZE)
                .map(|_| Missile::new(MissileOwner::Player, GAME_SPEED))
                .collect(),
        )
    }

    #[test]
    fn test_single_shot_without_multishot() {
        let mut player = Player::new(GAME_SPEED, STARTING_LIVES);
        let mut missiles = missile_pool();
        assert_eq!(player.fire(&mut missiles), 1);
        assert_eq!(missiles.ready_count(), 2);
        let fired = missiles.iter().find(|m| m.is_active());
        assert_eq!(fired.map(|m| m.body.heading), Some(PLAYER_START_HEADING));
    }

    #[test]
    fn test_multishot_spread() {
        let mut player = Player::new(GAME_SPEED, STARTING_LIVES);
        player.multishot = 2;
        let mut missiles = missile_pool();

        assert_eq!(player.fire(&mut missiles), 3);
        assert_eq!(player.multishot, 1);
        let mut headings: Vec<f32> = missiles.iter().map(|m| m.body.heading).collect();
        headings.sort_by(|a, b| a.partial_cmp(b).unwrap());
        assert_eq!(headings, vec![85.0, 90.0, 95.0]);

        // Empty pool: nothing fires, no charge spent
        assert_eq!(player.fire(&mut missiles), 0);
        assert_eq!(player.multishot, 1);
    }

    #[test]
    fn test_two_missile_spread() {
        let mut player = Player::new(GAME_SPEED, STARTING_LIVES);
        player.multishot = 1;
        let mut missiles = missile_pool();
        if let Some(missile) = missiles.get_mut(0) {
            missile.fire(Vec2::ZERO, 0.0, Vec2::ZERO);
        }

        assert_eq!(player.fire(&mut missiles), 2);
        let headings: Vec<f32> = missiles.iter().skip(1).map(|m| m.body.heading).collect();
        assert_eq!(headings, vec![93.0, 87.0]);
    }

    #[test]
    fn test_drop_bomb_needs_stock() {
        let mut player = Player::new(GAME_SPEED, STARTING_LIVES);
        let mut bomb = Bomb::new(GAME_SPEED);
        assert!(!player.drop_bomb(&mut bomb));

        player.bombs = 1;
        assert!(player.drop_bomb(&mut bomb));
        assert_eq!(player.bombs, 0);
        assert!(bomb.is_active());

        player.bombs = 1;
        assert!(!player.drop_bomb(&mut bomb));
        assert_eq!(player.bombs, 1);
    }

    #[test]
    fn test_lose_life_respawns_until_last() {
        let mut player = Player::new(GAME_SPEED, 2);
        player.body.pos = Vec2::new(100.0, 50.0);
        player.body.vel = Vec2::new(1.0, 1.0);
        player.body.heading = 10.0;
        player.body.health = -5;

        assert!(player.lose_life());
        assert_eq!(player.lives, 1);
        assert_eq!(player.body.pos, Vec2::ZERO);
        assert_eq!(player.body.vel, Vec2::ZERO);
        assert_eq!(player.body.health, PLAYER_MAX_HEALTH);
        assert_eq!(player.body.heading, PLAYER_START_HEADING);

        assert!(!player.lose_life());
        assert_eq!(player.lives, 0);
    }

    #[test]
    fn test_thrust_one_tick() {
        let bounds = ArenaBounds::default();
        let mut player = Player::new(GAME_SPEED, STARTING_LIVES);
        player.accelerate();
        player.update(&bounds);
        assert!((player.body.vel.y - 0.2 * GAME_SPEED).abs() < 1e-6);
        assert!(player.body.vel.x.abs() < 1e-6);
        assert!(player.flame_length() > 0.0);

        player.decelerate();
        assert_eq!(player.flame_length(), 0.0);
    }
}
