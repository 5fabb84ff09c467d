//! Game driver
//!
//! Owns the simulation, the frame clock and the high-score file, and runs
//! one frame at a time: input, tick, persistence, presentation, pacing.

use crate::clock::{FrameClock, FrameStats};
use crate::highscores::HighScoreFile;
use crate::settings::Settings;
use crate::sim::{GameEvent, InputEvent, RenderSnapshot, SimulationState, TickInput, tick};

/// The outside world: draws snapshots, plays sounds, feeds input
pub trait Presenter {
    /// Queue input for the coming tick
    fn poll_input(&mut self, _input: &mut TickInput) {}

    /// Events raised by the last tick, in order
    fn handle_events(&mut self, _events: &[GameEvent]) {}

    fn present(&mut self, snapshot: &RenderSnapshot);
}

pub struct Game {
    state: SimulationState,
    input: TickInput,
    clock: FrameClock,
    high_scores: HighScoreFile,
    max_frames: Option<u64>,
    frames: u64,
    /// Sleep between frames; off for headless batch runs
    paced: bool,
}

impl Game {
    /// Build a game from settings, reading the stored high score
    pub fn new(settings: &Settings, fallback_seed: u64) -> Self {
        let high_scores = HighScoreFile::new(settings.high_score_path.clone());
        let config = settings.sim_config(fallback_seed);
        log::info!("Seed {}, arena {:?}", config.seed, config.arena);

        let state = SimulationState::new(config, high_scores.load());
        Self {
            state,
            input: TickInput::new(),
            clock: FrameClock::from_fps(settings.target_fps),
            high_scores,
            max_frames: settings.max_frames,
            frames: 0,
            paced: true,
        }
    }

    pub fn set_paced(&mut self, paced: bool) {
        self.paced = paced;
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut SimulationState {
        &mut self.state
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn frame_stats(&self) -> FrameStats {
        self.clock.stats()
    }

    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Game over, or the frame limit was hit
    pub fn is_finished(&self) -> bool {
        self.state.is_game_over() || self.max_frames.is_some_and(|max| self.frames >= max)
    }

    /// Run a single frame. Returns false once the game is finished.
    pub fn run_frame(&mut self, presenter: &mut impl Presenter) -> bool {
        presenter.poll_input(&mut self.input);
        let outcome = tick(&mut self.state, &mut self.input);
        let events = self.state.take_events();

        // Only the newest record of the frame needs writing
        let record = events.iter().rev().find_map(|event| match event {
            GameEvent::NewHighScore { score } => Some(*score),
            _ => None,
        });
        if let Some(score) = record
            && let Err(e) = self.high_scores.save(score)
        {
            log::error!("Failed to save high score {}: {}", score, e);
        }

        if outcome.level_advanced {
            log::info!("Advanced to level {}", self.state.level);
        }
        if outcome.stats_requested {
            log::info!("Frame stats: {}", self.clock.stats());
        }

        presenter.handle_events(&events);
        presenter.present(&RenderSnapshot::capture(&self.state));

        if self.paced {
            self.clock.pace();
        }
        self.frames += 1;
        !self.is_finished()
    }

    /// Run frames until the game is finished; returns the final score
    pub fn run(&mut self, presenter: &mut impl Presenter) -> u64 {
        while self.run_frame(presenter) {}
        log::info!(
            "Finished after {} frames: score {}, high score {}",
            self.frames,
            self.state.player.score,
            self.state.high_score
        );
        self.state.player.score
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{GamePhase, Key};
    use std::path::PathBuf;

    #[derive(Default)]
    struct Recorder {
        snapshots: Vec<RenderSnapshot>,
        events: Vec<GameEvent>,
        script: Vec<InputEvent>,
    }

    impl Presenter for Recorder {
        fn poll_input(&mut self, input: &mut TickInput) {
            for event in self.script.drain(..) {
                input.push(event);
            }
        }

        fn handle_events(&mut self, events: &[GameEvent]) {
            self.events.extend_from_slice(events);
        }

        fn present(&mut self, snapshot: &RenderSnapshot) {
            self.snapshots.push(snapshot.clone());
        }
    }

    fn settings(name: &str) -> Settings {
        let dir: PathBuf =
            std::env::temp_dir().join(format!("space-arena-game-{}-{}", name, std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        Settings {
            seed: Some(2024),
            high_score_path: dir.join("highscore.txt"),
            ..Default::default()
        }
    }

    #[test]
    fn test_frame_limit_stops_run() {
        let settings = Settings {
            max_frames: Some(30),
            ..settings("limit")
        };
        let mut game = Game::new(&settings, 0);
        game.set_paced(false);
        let mut recorder = Recorder {
            script: vec![InputEvent::Pressed(Key::Start)],
            ..Default::default()
        };

        game.run(&mut recorder);
        assert_eq!(game.frames(), 30);
        assert_eq!(recorder.snapshots.len(), 30);
        assert_eq!(game.state().phase, GamePhase::Playing);
        assert_eq!(game.state().time_ticks, 30);
    }

    #[test]
    fn test_new_record_is_written() {
        let settings = settings("record");
        let mut game = Game::new(&settings, 0);
        game.set_paced(false);
        let mut recorder = Recorder::default();

        game.push_input(InputEvent::Pressed(Key::Start));
        assert!(game.run_frame(&mut recorder));

        game.state_mut().award(50);
        game.run_frame(&mut recorder);
        assert!(recorder.events.contains(&GameEvent::NewHighScore { score: 50 }));
        assert_eq!(HighScoreFile::new(settings.high_score_path.clone()).load(), 50);

        // A later game starts from the stored record
        let next = Game::new(&settings, 1);
        assert_eq!(next.state().high_score, 50);
    }

    #[test]
    fn test_game_over_ends_run() {
        let mut game = Game::new(&settings("over"), 0);
        game.set_paced(false);
        let mut recorder = Recorder::default();

        game.push_input(InputEvent::Pressed(Key::Start));
        game.run_frame(&mut recorder);

        let state = game.state_mut();
        state.player.lives = 1;
        state.player.body.health = 0;
        assert!(!game.run_frame(&mut recorder));
        assert!(game.is_finished());
        assert!(recorder.events.iter().any(|e| matches!(e, GameEvent::GameOver { .. })));
        assert_eq!(recorder.snapshots.last().map(|s| s.phase), Some(GamePhase::GameOver));
    }
}
