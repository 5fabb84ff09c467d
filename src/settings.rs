//! Game settings
//!
//! Read from a JSON file at startup. Every field has a default, so a
//! partial file only overrides what it names.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::highscores::DEFAULT_HIGH_SCORE_PATH;
use crate::sim::{ArenaBounds, SimConfig};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Simulation ===
    /// Multiplier on every speed and acceleration
    pub game_speed: f32,
    pub arena_width: f32,
    pub arena_height: f32,
    pub starting_lives: u32,
    /// Fixed RNG seed; a fresh one is drawn when absent
    pub seed: Option<u64>,

    // === Loop ===
    pub target_fps: f64,
    /// Stop after this many frames even if the game is not over
    pub max_frames: Option<u64>,

    // === Persistence ===
    pub high_score_path: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            game_speed: GAME_SPEED,
            arena_width: ARENA_WIDTH,
            arena_height: ARENA_HEIGHT,
            starting_lives: STARTING_LIVES,
            seed: None,

            target_fps: 1.0 / TARGET_FRAME_TIME,
            max_frames: None,

            high_score_path: PathBuf::from(DEFAULT_HIGH_SCORE_PATH),
        }
    }
}

impl Settings {
    /// Load settings from `path`, falling back to defaults when the file is
    /// missing or malformed
    pub fn load(path: &Path) -> Self {
        if !path.exists() {
            log::info!("No settings file at {:?}, using defaults", path);
            return Self::default();
        }

        match fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str::<Settings>(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {:?}", path);
                    settings.sanitized()
                }
                Err(e) => {
                    log::warn!("Failed to parse settings: {}", e);
                    Self::default()
                }
            },
            Err(e) => {
                log::warn!("Failed to read settings file: {}", e);
                Self::default()
            }
        }
    }

    pub fn save(&self, path: &Path) -> io::Result<()> {
        let json = serde_json::to_string_pretty(self).map_err(io::Error::other)?;
        fs::write(path, json)?;
        log::info!("Settings saved to {:?}", path);
        Ok(())
    }

    /// Replace values the simulation cannot run with
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        if !(self.game_speed.is_finite() && self.game_speed > 0.0) {
            log::warn!("Ignoring game speed {}", self.game_speed);
            self.game_speed = defaults.game_speed;
        }
        if !(self.arena_width.is_finite() && self.arena_width > 2.0 * BORDER_MARGIN) {
            log::warn!("Ignoring arena width {}", self.arena_width);
            self.arena_width = defaults.arena_width;
        }
        if !(self.arena_height.is_finite() && self.arena_height > 2.0 * BORDER_MARGIN) {
            log::warn!("Ignoring arena height {}", self.arena_height);
            self.arena_height = defaults.arena_height;
        }
        if self.starting_lives == 0 {
            log::warn!("Starting lives must be at least 1");
            self.starting_lives = defaults.starting_lives;
        }
        self
    }

    /// Simulation config for a run; `fallback_seed` is used when no seed
    /// is configured
    pub fn sim_config(&self, fallback_seed: u64) -> SimConfig {
        SimConfig {
            game_speed: self.game_speed,
            arena: ArenaBounds::new(self.arena_width, self.arena_height),
            starting_lives: self.starting_lives,
            seed: self.seed.unwrap_or(fallback_seed),
        }
    }
}
