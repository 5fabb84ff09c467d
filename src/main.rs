//! Space Arena entry point
//!
//! Runs the simulation headless with an autopilot at the controls. Usage:
//! `space-arena [settings.json]`

use std::path::PathBuf;

use space_arena::sim::{EntityKind, GameEvent, GamePhase, Key, RenderSnapshot, TickInput};
use space_arena::{Game, Presenter, Settings, heading_toward, wrap_heading};

const DEFAULT_SETTINGS_PATH: &str = "settings.json";

/// Close enough to the target bearing to stop turning (degrees)
const AIM_TOLERANCE: f32 = 5.0;
/// Thrust toward targets farther than this
const CHASE_DISTANCE: f32 = 150.0;
/// Frames between trigger pulls
const FIRE_INTERVAL: u64 = 20;

/// Flies the ship toward the nearest drone and keeps shooting
#[derive(Default)]
struct Autopilot {
    last: Option<RenderSnapshot>,
    turning: Option<Key>,
    thrusting: bool,
    frame: u64,
}

impl Autopilot {
    fn steer(&mut self, input: &mut TickInput, snapshot: &RenderSnapshot) {
        let Some(ship) = snapshot.entities.iter().find(|e| e.kind == EntityKind::Player) else {
            return;
        };
        let target = snapshot
            .entities
            .iter()
            .filter(|e| matches!(e.kind, EntityKind::Drone(_)))
            .min_by(|a, b| {
                a.pos
                    .distance_squared(ship.pos)
                    .total_cmp(&b.pos.distance_squared(ship.pos))
            });
        let Some(target) = target else {
            self.set_turn(input, None);
            self.set_thrust(input, false);
            return;
        };

        let bearing = wrap_heading(heading_toward(ship.pos, target.pos) - ship.heading);
        let turn = if bearing < AIM_TOLERANCE || bearing > 360.0 - AIM_TOLERANCE {
            None
        } else if bearing < 180.0 {
            Some(Key::RotateLeft)
        } else {
            Some(Key::RotateRight)
        };
        self.set_turn(input, turn);
        self.set_thrust(input, ship.pos.distance(target.pos) > CHASE_DISTANCE);

        if self.frame % FIRE_INTERVAL == 0 {
            input.press(Key::Fire);
            if snapshot.hud.bombs > 0 && ship.pos.distance(target.pos) < CHASE_DISTANCE {
                input.press(Key::Bomb);
            }
        }
    }

    fn set_turn(&mut self, input: &mut TickInput, turn: Option<Key>) {
        if self.turning == turn {
            return;
        }
        if let Some(key) = self.turning {
            input.release(key);
        }
        if let Some(key) = turn {
            input.press(key);
        }
        self.turning = turn;
    }

    fn set_thrust(&mut self, input: &mut TickInput, on: bool) {
        if self.thrusting == on {
            return;
        }
        if on {
            input.press(Key::Thrust);
        } else {
            input.release(Key::Thrust);
        }
        self.thrusting = on;
    }
}

impl Presenter for Autopilot {
    fn poll_input(&mut self, input: &mut TickInput) {
        self.frame += 1;
        let Some(snapshot) = self.last.take() else {
            return;
        };
        match snapshot.phase {
            GamePhase::Splash => input.press(Key::Start),
            GamePhase::Playing => self.steer(input, &snapshot),
            GamePhase::GameOver => {}
        }
        if self.frame % 600 == 0 {
            input.press(Key::FrameStats);
        }
    }

    fn handle_events(&mut self, events: &[GameEvent]) {
        for event in events {
            log::debug!("{:?}", event);
        }
    }

    fn present(&mut self, snapshot: &RenderSnapshot) {
        self.last = Some(snapshot.clone());
    }
}

fn main() {
    env_logger::init();
    log::info!("Space Arena (headless) starting...");

    let settings_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_SETTINGS_PATH));
    let settings = Settings::load(&settings_path);

    let mut game = Game::new(&settings, rand::random());
    let mut autopilot = Autopilot::default();
    let score = game.run(&mut autopilot);

    let state = game.state();
    println!("Final score:  {}", score);
    println!("High score:   {}", state.high_score);
    println!("Level:        {}", state.level);
    println!("Frame stats:  {}", game.frame_stats());
}
