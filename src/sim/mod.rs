//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (pool slots never move)
//! - No rendering or platform dependencies

pub mod collision;
pub mod enemy;
pub mod entity;
pub mod explosion;
pub mod player;
pub mod pool;
pub mod powerup;
pub mod projectile;
pub mod snapshot;
pub mod state;
pub mod tick;

pub use collision::resolve_combat;
pub use enemy::{DroneKind, Enemy};
pub use entity::{ArenaBounds, Body, Color, EntityKind, LifeState, Sprite};
pub use explosion::Explosion;
pub use player::Player;
pub use pool::{Pool, Poolable};
pub use powerup::{Powerup, PowerupKind};
pub use projectile::{Bomb, Missile, MissileOwner};
pub use snapshot::{EntityView, HealthBand, Hud, RadarBlip, RenderSnapshot};
pub use state::{GameEvent, GamePhase, SimConfig, SimulationState, wave_size};
pub use tick::{InputEvent, Key, TickInput, TickOutcome, apply_input, tick};
