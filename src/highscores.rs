//! Persisted high score
//!
//! The file holds a single integer in plain text. It is read once at
//! startup and rewritten whenever a new record is set.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Default file name, next to the working directory
pub const DEFAULT_HIGH_SCORE_PATH: &str = "highscore.txt";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighScoreFile {
    path: PathBuf,
}

impl Default for HighScoreFile {
    fn default() -> Self {
        Self::new(DEFAULT_HIGH_SCORE_PATH)
    }
}

impl HighScoreFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the stored record. A missing or unreadable file counts as 0.
    pub fn load(&self) -> u64 {
        if !self.path.exists() {
            log::info!("No high score file at {:?}, starting from 0", self.path);
            return 0;
        }

        match fs::read_to_string(&self.path) {
            Ok(contents) => match contents.trim().parse::<u64>() {
                Ok(score) => {
                    log::info!("Loaded high score {} from {:?}", score, self.path);
                    score
                }
                Err(e) => {
                    log::warn!("Malformed high score in {:?}: {}", self.path, e);
                    0
                }
            },
            Err(e) => {
                log::warn!("Failed to read high score file: {}", e);
                0
            }
        }
    }

    /// Overwrite the file with `score`
    pub fn save(&self, score: u64) -> io::Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, score.to_string())?;
        log::debug!("Saved high score {} to {:?}", score, self.path);
        Ok(())
    }
}
