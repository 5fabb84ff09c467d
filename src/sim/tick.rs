//! Fixed timestep simulation tick
//!
//! Input arrives as press/release events queued between ticks. Each tick
//! drains the queue, moves everything, resolves combat and checks whether
//! the wave is cleared.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use super::collision::resolve_combat;
use super::state::{GameEvent, GamePhase, SimulationState};

/// Logical keys the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    RotateLeft,
    RotateRight,
    Thrust,
    Fire,
    Bomb,
    Start,
    /// Ask the driver for a frame-time report
    FrameStats,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputEvent {
    Pressed(Key),
    Released(Key),
}

/// Input events collected since the previous tick, in arrival order
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    events: VecDeque<InputEvent>,
}

impl TickInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: InputEvent) {
        self.events.push_back(event);
    }

    pub fn press(&mut self, key: Key) {
        self.push(InputEvent::Pressed(key));
    }

    pub fn release(&mut self, key: Key) {
        self.push(InputEvent::Released(key));
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn drain(&mut self) -> std::collections::vec_deque::Drain<'_, InputEvent> {
        self.events.drain(..)
    }
}

/// What a tick asks of its host
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickOutcome {
    /// A `FrameStats` key was pressed
    pub stats_requested: bool,
    /// The wave was cleared and the next level started
    pub level_advanced: bool,
}

/// Apply one input event. Ship controls only respond while playing.
/// Returns true when the event asks for frame statistics.
pub fn apply_input(state: &mut SimulationState, event: InputEvent) -> bool {
    match event {
        InputEvent::Pressed(Key::Start) => state.start(),
        InputEvent::Pressed(Key::FrameStats) => return true,
        _ if state.phase != GamePhase::Playing => {}
        InputEvent::Pressed(key) => match key {
            Key::RotateLeft => state.player.rotate_left(),
            Key::RotateRight => state.player.rotate_right(),
            Key::Thrust => state.player.accelerate(),
            Key::Fire => {
                let count = state.player.fire(&mut state.missiles);
                if count > 0 {
                    state.events.push(GameEvent::MissileFired { count });
                } else {
                    log::trace!("Fire ignored, no missile ready");
                }
            }
            Key::Bomb => {
                if state.player.drop_bomb(&mut state.bomb) {
                    state.events.push(GameEvent::BombDropped {
                        pos: state.bomb.body.pos,
                    });
                }
            }
            Key::Start | Key::FrameStats => {}
        },
        InputEvent::Released(key) => match key {
            Key::RotateLeft | Key::RotateRight => state.player.stop_rotation(),
            Key::Thrust => state.player.decelerate(),
            _ => {}
        },
    }
    false
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut SimulationState, input: &mut TickInput) -> TickOutcome {
    let mut outcome = TickOutcome::default();
    for event in input.drain() {
        outcome.stats_requested |= apply_input(state, event);
    }

    // Splash and game over are frozen
    if state.phase != GamePhase::Playing {
        return outcome;
    }

    update_entities(state);
    resolve_combat(state);

    if !state.is_game_over() {
        outcome.level_advanced = state.check_level_complete();
    }

    state.time_ticks += 1;
    outcome
}

/// Movement pass, in draw order
fn update_entities(state: &mut SimulationState) {
    let arena = state.config.arena;

    for shot in state.enemy_missiles.iter_mut() {
        shot.update(&arena);
    }

    state.player.update(&arena);

    for missile in state.missiles.iter_mut() {
        missile.update(&arena);
    }

    if let Some(pos) = state.bomb.update() {
        state.detonate_bomb(pos);
    }

    let target = state.player.body.pos;
    for enemy in state.enemies.iter_mut() {
        enemy.update(target, &arena, &mut state.rng);
    }

    for powerup in state.powerups.iter_mut() {
        powerup.update(&arena);
    }

    for explosion in state.explosions.iter_mut() {
        explosion.update();
    }
    state.bomb_explosion.update();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::entity::Sprite;
    use crate::sim::pool::Poolable;
    use crate::sim::state::SimConfig;
    use glam::Vec2;
    use proptest::prelude::*;

    fn playing(seed: u64) -> SimulationState {
        let mut state = SimulationState::new(
            SimConfig {
                seed,
                ..Default::default()
            },
            0,
        );
        let mut input = TickInput::new();
        input.press(Key::Start);
        tick(&mut state, &mut input);
        state
    }

    #[test]
    fn test_splash_waits_for_start() {
        let mut state = SimulationState::new(SimConfig::default(), 0);
        let mut input = TickInput::new();
        input.press(Key::Thrust);
        input.press(Key::Fire);
        tick(&mut state, &mut input);

        assert_eq!(state.phase, GamePhase::Splash);
        assert_eq!(state.time_ticks, 0);
        assert_eq!(state.player.body.thrust, 0.0);
        assert_eq!(state.missiles.ready_count(), MISSILE_POOL_SIZE);
        assert!(input.is_empty());

        input.press(Key::Start);
        tick(&mut state, &mut input);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.time_ticks, 1);
    }

    #[test]
    fn test_controls_follow_press_and_release() {
        let mut state = playing(3);
        let mut input = TickInput::new();

        input.press(Key::RotateLeft);
        tick(&mut state, &mut input);
        assert_eq!(state.player.body.spin, PLAYER_TURN_RATE);
        assert_eq!(state.player.body.heading, PLAYER_START_HEADING + PLAYER_TURN_RATE);

        input.press(Key::RotateRight);
        input.release(Key::RotateRight);
        input.press(Key::Thrust);
        tick(&mut state, &mut input);
        assert_eq!(state.player.body.spin, 0.0);
        assert!(state.player.body.thrust > 0.0);

        input.release(Key::Thrust);
        tick(&mut state, &mut input);
        assert_eq!(state.player.body.thrust, 0.0);
    }

    #[test]
    fn test_fire_raises_event() {
        let mut state = playing(4);
        state.take_events();
        let mut input = TickInput::new();
        input.press(Key::Fire);
        tick(&mut state, &mut input);

        let events = state.take_events();
        assert!(events.contains(&GameEvent::MissileFired { count: 1 }));
    }

    #[test]
    fn test_frame_stats_request_passes_through() {
        let mut state = SimulationState::new(SimConfig::default(), 0);
        let mut input = TickInput::new();
        input.press(Key::FrameStats);
        assert!(tick(&mut state, &mut input).stats_requested);
        assert!(!tick(&mut state, &mut input).stats_requested);
    }

    #[test]
    fn test_bomb_detonates_after_fuse() {
        let mut state = playing(8);
        // Keep drones out of the way so nothing trips the fuse early
        for enemy in state.enemies.iter_mut() {
            enemy.body.pos = Vec2::splat(900.0);
            enemy.body.vel = Vec2::ZERO;
        }
        state.player.body.pos = Vec2::new(-400.0, 250.0);
        state.player.bombs = 1;

        let mut input = TickInput::new();
        input.press(Key::Bomb);
        tick(&mut state, &mut input);
        assert!(state.bomb.is_active());
        assert_eq!(state.bomb.fuse, BOMB_MAX_FUSE - 1);
        let drop_pos = state.bomb.body.pos;

        for _ in 1..BOMB_MAX_FUSE {
            tick(&mut state, &mut input);
        }
        assert!(state.bomb.is_ready());
        assert_eq!(state.bomb.fuse, BOMB_MAX_FUSE);
        assert!(state.bomb_explosion.is_active());
        assert_eq!(state.bomb_explosion.body.pos, drop_pos);
        assert!(state
            .take_events()
            .contains(&GameEvent::BombDetonated { pos: drop_pos }));
    }

    #[test]
    fn test_determinism() {
        let script = [Key::Thrust, Key::Fire, Key::RotateLeft, Key::Fire, Key::Bomb];
        let mut a = playing(99999);
        let mut b = playing(99999);

        for step in 0..600 {
            let mut input_a = TickInput::new();
            let mut input_b = TickInput::new();
            let key = script[step % script.len()];
            input_a.press(key);
            input_b.press(key);
            if step % 7 == 0 {
                input_a.release(Key::RotateLeft);
                input_b.release(Key::RotateLeft);
            }
            tick(&mut a, &mut input_a);
            tick(&mut b, &mut input_b);
        }

        assert_eq!(a.time_ticks, b.time_ticks);
        assert_eq!(a.player, b.player);
        assert_eq!(a.level, b.level);
        assert_eq!(a.enemies, b.enemies);
        assert_eq!(a.powerups, b.powerups);
    }

    proptest! {
        #[test]
        fn prop_counters_stay_consistent(
            seed in 0u64..1000,
            keys in prop::collection::vec(0usize..5, 1..300),
        ) {
            let script = [Key::Thrust, Key::Fire, Key::RotateLeft, Key::RotateRight, Key::Bomb];
            let mut state = playing(seed);
            let mut best = state.high_score;
            let mut input = TickInput::new();

            for k in keys {
                input.press(script[k]);
                tick(&mut state, &mut input);

                prop_assert_eq!(state.active_enemies as usize, state.live_enemy_count());
                prop_assert!(state.high_score >= best);
                prop_assert!(state.high_score >= state.player.score);
                prop_assert!((0.0..360.0).contains(&state.player.body.heading));
                prop_assert!(state.player.multishot <= MAX_MULTISHOT);
                prop_assert!(state.player.bombs <= MAX_BOMBS);
                best = state.high_score;
            }
        }
    }
}
