//! Space Arena - a 2D arena space-combat arcade game
//!
//! Core modules:
//! - `sim`: Fixed-step simulation (entities, combat, waves, scoring)
//! - `clock`: Frame pacing and frame-time diagnostics
//! - `game`: Driver tying simulation, pacing and persistence together
//! - `highscores`: Persisted high score
//! - `settings`: JSON configuration

pub mod clock;
pub mod game;
pub mod highscores;
pub mod settings;
pub mod sim;

pub use clock::{FrameClock, FrameStats};
pub use game::{Game, Presenter};
pub use highscores::HighScoreFile;
pub use settings::Settings;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Target frame time (60 Hz)
    pub const TARGET_FRAME_TIME: f64 = 1.0 / 60.0;
    /// Pacing delay never drops below this, even when a frame overruns
    pub const MIN_FRAME_DELAY: f64 = 0.0001;
    /// Rolling window size for frame-time statistics
    pub const NUM_FRAME_TIMES: usize = 500;

    /// Default speed multiplier applied to all movement tuning
    pub const GAME_SPEED: f32 = 0.3;

    /// Arena dimensions
    pub const ARENA_WIDTH: f32 = 2000.0;
    pub const ARENA_HEIGHT: f32 = 2000.0;
    /// Entities are kept this far inside the arena edge
    pub const BORDER_MARGIN: f32 = 10.0;

    /// Chebyshev radius around the player inside which combat is resolved
    pub const COLLISION_CHECK_RANGE: f32 = 300.0;
    /// Radar pickup range around the player
    pub const RADAR_RANGE: f32 = 1000.0;
    /// Horizontal camera shift that leaves room for the info panel
    pub const CAMERA_OFFSET: f32 = 100.0;

    /// Damage dealt by every hit (ship contact, missile, blast tick)
    pub const HIT_DAMAGE: i32 = 10;
    /// Per-tick chance an in-range drone fires at the player
    pub const ENEMY_FIRE_CHANCE: f32 = 0.01;

    /// Pool sizes
    pub const MISSILE_POOL_SIZE: usize = 3;
    pub const ENEMY_MISSILE_POOL_SIZE: usize = 3;

    /// Player defaults
    pub const STARTING_LIVES: u32 = 3;
    pub const PLAYER_MAX_HEALTH: i32 = 100;
    pub const PLAYER_START_HEADING: f32 = 90.0;
    /// Degrees per tick while a rotate key is held
    pub const PLAYER_TURN_RATE: f32 = 5.0;
    pub const MAX_MULTISHOT: u32 = 50;
    pub const MAX_BOMBS: u32 = 1;

    /// Missile tuning
    pub const MISSILE_THRUST: f32 = 8.0;
    pub const MISSILE_MAX_FUEL: f32 = 200.0;
    pub const MISSILE_SIZE: f32 = 4.0;

    /// Bomb tuning
    pub const BOMB_MAX_FUSE: u32 = 50;
    pub const BOMB_SIZE: f32 = 10.0;

    /// Explosion tuning
    pub const EXPLOSION_START_SIZE: f32 = 20.0;
    pub const EXPLOSION_MAX_AGE: u32 = 10;
    pub const EXPLOSION_MAX_SIZE: f32 = 60.0;
    pub const BOMB_EXPLOSION_MAX_SIZE: f32 = 200.0;

    /// Drone tuning
    pub const ENEMY_MAX_HEALTH: i32 = 20;
    pub const HUNTER_SCORE: u64 = 10;
    pub const DRONE_SCORE: u64 = 5;
    pub const HUNTER_PURSUIT_CHANCE: f32 = 0.75;
    pub const HUNTER_SENSE_RANGE: f32 = 200.0;
    pub const SURVEILLANCE_SENSE_RANGE: f32 = 100.0;
    pub const STEERING_NUDGE: f32 = 0.05;

    /// Largest wave ever spawned (reached at level 12)
    pub const MAX_WAVE_SIZE: u32 = 4096;

    /// Rejection-sampling cap for enemy placement
    pub const MAX_SPAWN_ATTEMPTS: u32 = 1000;
}

/// Wrap a heading in degrees to [0, 360)
#[inline]
pub fn wrap_heading(heading: f32) -> f32 {
    let wrapped = heading.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

/// Unit vector for a heading in degrees (0° = +x, 90° = +y)
#[inline]
pub fn heading_to_vec(heading: f32) -> Vec2 {
    let rad = heading.to_radians();
    Vec2::new(rad.cos(), rad.sin())
}

/// Heading in degrees from `from` toward `to`, in [0, 360)
#[inline]
pub fn heading_toward(from: Vec2, to: Vec2) -> f32 {
    let delta = to - from;
    wrap_heading(delta.y.atan2(delta.x).to_degrees())
}
