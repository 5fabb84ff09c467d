//! Simulation state and wave management
//!
//! `SimulationState` is the single owner of everything in the arena. It is
//! passed by `&mut` through each tick; nothing lives in globals.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::enemy::{DroneKind, Enemy};
use super::entity::{ArenaBounds, LifeState};
use super::explosion::Explosion;
use super::player::Player;
use super::pool::Pool;
use super::powerup::{Powerup, PowerupKind};
use super::projectile::{Bomb, Missile, MissileOwner};
use crate::consts::*;

/// Tunables fixed for the lifetime of a run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimConfig {
    /// Multiplier on every speed and acceleration
    pub game_speed: f32,
    pub arena: ArenaBounds,
    pub starting_lives: u32,
    /// RNG seed (same seed + same inputs = same run)
    pub seed: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            game_speed: GAME_SPEED,
            arena: ArenaBounds::default(),
            starting_lives: STARTING_LIVES,
            seed: 0,
        }
    }
}

/// Current phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen, waiting for the start key
    Splash,
    /// Active gameplay
    Playing,
    /// Out of lives
    GameOver,
}

/// Something that happened during a tick, for sound and UI collaborators
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    MissileFired { count: usize },
    EnemyMissileFired { pos: Vec2 },
    BombDropped { pos: Vec2 },
    BombDetonated { pos: Vec2 },
    EnemyDestroyed { kind: DroneKind, pos: Vec2, score: u64 },
    PlayerHit { health: i32 },
    LifeLost { lives_left: u32 },
    PowerupCollected { kind: PowerupKind },
    LevelCleared { level: u32 },
    NewHighScore { score: u64 },
    GameOver { score: u64 },
}

/// Number of drones in the wave for `level`: doubles every level up to
/// `MAX_WAVE_SIZE`
pub fn wave_size(level: u32) -> u32 {
    1u32.checked_shl(level)
        .unwrap_or(u32::MAX)
        .min(MAX_WAVE_SIZE)
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct SimulationState {
    pub config: SimConfig,
    pub phase: GamePhase,
    /// Current level, starting at 1
    pub level: u32,
    /// Drones still alive in this wave
    pub active_enemies: u32,
    /// Best score seen, including previous sessions
    pub high_score: u64,
    /// Simulated ticks while playing
    pub time_ticks: u64,
    pub player: Player,
    pub missiles: Pool<Missile>,
    pub enemy_missiles: Pool<Missile>,
    pub bomb: Bomb,
    pub bomb_explosion: Explosion,
    pub explosions: Pool<Explosion>,
    pub enemies: Vec<Enemy>,
    pub powerups: Vec<Powerup>,
    /// Events raised since the last `take_events`
    pub events: Vec<GameEvent>,
    pub(crate) rng: Pcg32,
}

impl SimulationState {
    /// Fresh run on the splash screen with the first wave laid out
    pub fn new(config: SimConfig, high_score: u64) -> Self {
        let speed = config.game_speed;
        let pooled = |owner: MissileOwner, size: usize| {
            Pool::fixed((0..size).map(|_| Missile::new(owner, speed)).collect())
        };

        let mut state = Self {
            config,
            phase: GamePhase::Splash,
            level: 1,
            active_enemies: 0,
            high_score,
            time_ticks: 0,
            player: Player::new(speed, config.starting_lives),
            missiles: pooled(MissileOwner::Player, MISSILE_POOL_SIZE),
            enemy_missiles: pooled(MissileOwner::Enemy, ENEMY_MISSILE_POOL_SIZE),
            bomb: Bomb::new(speed),
            bomb_explosion: Explosion::bomb_blast(speed),
            explosions: Pool::growable(),
            enemies: Vec::new(),
            powerups: Vec::new(),
            events: Vec::new(),
            rng: Pcg32::seed_from_u64(config.seed),
        };

        state.start_level();
        state
    }

    /// Leave the splash screen
    pub fn start(&mut self) {
        if self.phase == GamePhase::Splash {
            log::info!("Game started at level {}", self.level);
            self.phase = GamePhase::Playing;
        }
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    pub fn arena(&self) -> &ArenaBounds {
        &self.config.arena
    }

    /// Lay out the wave for the current level. Projectiles in flight are
    /// recalled; explosions keep playing out.
    pub fn start_level(&mut self) {
        self.enemies.clear();
        self.powerups.clear();
        self.missiles.recycle_all();
        self.enemy_missiles.recycle_all();
        self.bomb.reset();

        let count = wave_size(self.level);
        self.active_enemies = count;
        self.enemies.reserve(count as usize);
        for _ in 0..count {
            let pos = self.enemy_spawn_point();
            let vel = self.random_drift();
            let kind = DroneKind::random(&mut self.rng);
            self.enemies.push(Enemy::new(kind, pos, vel, self.config.game_speed));
        }

        for kind in PowerupKind::ALL {
            let pos = self.config.arena.random_point(&mut self.rng);
            let vel = self.random_drift();
            self.powerups.push(Powerup::new(kind, pos, vel, self.config.game_speed));
        }

        log::info!("Level {} started with {} drones", self.level, count);
    }

    /// Advance to the next level once the wave is wiped out.
    /// Returns true when a new wave was started.
    pub fn check_level_complete(&mut self) -> bool {
        if self.active_enemies > 0 {
            return false;
        }
        self.events.push(GameEvent::LevelCleared { level: self.level });
        self.level += 1;
        self.start_level();
        true
    }

    /// Spawn velocity: whole steps of game speed in [-2, 2] per axis
    fn random_drift(&mut self) -> Vec2 {
        let speed = self.config.game_speed;
        Vec2::new(
            self.rng.random_range(-2..=2) as f32 * speed,
            self.rng.random_range(-2..=2) as f32 * speed,
        )
    }

    /// Random point outside the player's combat window. Gives up after
    /// `MAX_SPAWN_ATTEMPTS` and uses the arena corner farthest from the player.
    fn enemy_spawn_point(&mut self) -> Vec2 {
        let player_pos = self.player.body.pos;
        for _ in 0..MAX_SPAWN_ATTEMPTS {
            let pos = self.config.arena.random_point(&mut self.rng);
            let gap = (pos - player_pos).abs();
            if gap.x > COLLISION_CHECK_RANGE || gap.y > COLLISION_CHECK_RANGE {
                return pos;
            }
        }

        let corner = self
            .config
            .arena
            .corners()
            .into_iter()
            .max_by(|a, b| {
                a.distance_squared(player_pos)
                    .total_cmp(&b.distance_squared(player_pos))
            })
            .unwrap_or(Vec2::ZERO);
        log::debug!("Spawn sampling exhausted, placing drone at {:?}", corner);
        corner
    }

    /// Start a generic explosion, reusing an idle one when possible
    pub fn spawn_explosion(&mut self, pos: Vec2) {
        let speed = self.config.game_speed;
        if let Some(explosion) = self.explosions.acquire_or_grow(|| Explosion::new(pos, speed)) {
            explosion.reset(pos);
        }
    }

    /// Set off the bomb blast at `pos`
    pub fn detonate_bomb(&mut self, pos: Vec2) {
        self.bomb_explosion.reset(pos);
        self.events.push(GameEvent::BombDetonated { pos });
    }

    /// Add points and persist a new record through the event stream
    pub fn award(&mut self, points: u64) {
        self.player.score += points;
        if self.player.score > self.high_score {
            self.high_score = self.player.score;
            self.events.push(GameEvent::NewHighScore {
                score: self.high_score,
            });
        }
    }

    /// Remove a drone from the wave: explosion, score, counter
    pub fn destroy_enemy(&mut self, idx: usize) {
        let Some(enemy) = self.enemies.get_mut(idx) else {
            return;
        };
        if enemy.body.life != LifeState::Active {
            return;
        }
        enemy.deactivate();
        let (kind, pos, score) = (enemy.kind, enemy.body.pos, enemy.score_value());

        self.active_enemies = self.active_enemies.saturating_sub(1);
        self.spawn_explosion(pos);
        self.award(score);
        self.events.push(GameEvent::EnemyDestroyed { kind, pos, score });
        log::debug!("{:?} destroyed, {} left", kind, self.active_enemies);
    }

    /// Handle a depleted player: respawn or end the game
    pub fn settle_player(&mut self) {
        if self.player.body.health > 0 || self.is_game_over() {
            return;
        }
        if self.player.lose_life() {
            self.events.push(GameEvent::LifeLost {
                lives_left: self.player.lives,
            });
            log::info!("Life lost, {} remaining", self.player.lives);
        } else {
            self.phase = GamePhase::GameOver;
            self.events.push(GameEvent::GameOver {
                score: self.player.score,
            });
            log::info!("Game over with score {}", self.player.score);
        }
    }

    /// Drones currently marked active (should always equal `active_enemies`)
    pub fn live_enemy_count(&self) -> usize {
        self.enemies.iter().filter(|e| e.body.is_active()).count()
    }

    /// Drain events raised since the last call
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
