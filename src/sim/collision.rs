//! Per-tick combat resolution
//!
//! Fine collision tests are only run for entities inside the Chebyshev
//! window around the player (`COLLISION_CHECK_RANGE`). Everything outside
//! keeps flying untouched.

use rand::Rng;

use super::state::{GameEvent, SimulationState};
use crate::consts::*;
use crate::heading_toward;

/// Apply every hit for this tick, then settle destroyed drones and the
/// player's health
pub fn resolve_combat(state: &mut SimulationState) {
    let SimulationState {
        config,
        player,
        missiles,
        enemy_missiles,
        bomb,
        bomb_explosion,
        enemies,
        powerups,
        events,
        rng,
        ..
    } = state;

    for enemy in enemies.iter_mut() {
        if !enemy.body.is_active() || !enemy.body.in_combat_range(&player.body) {
            continue;
        }

        // Take a shot at the player
        if enemy_missiles.ready_index().is_some() && rng.random::<f32>() < ENEMY_FIRE_CHANCE {
            if let Some(shot) = enemy_missiles.acquire() {
                let heading = heading_toward(enemy.body.pos, player.body.pos);
                shot.fire(enemy.body.pos, heading, enemy.body.vel);
                events.push(GameEvent::EnemyMissileFired { pos: enemy.body.pos });
            }
        }

        // Ramming hurts both ships
        if player.body.is_collision(&enemy.body) {
            enemy.body.take_damage(HIT_DAMAGE);
            player.body.take_damage(HIT_DAMAGE);
            player.body.bounce(&mut enemy.body);
            events.push(GameEvent::PlayerHit {
                health: player.body.health,
            });
        }

        for missile in missiles.iter_mut() {
            if missile.body.is_collision(&enemy.body) {
                enemy.body.take_damage(HIT_DAMAGE);
                missile.reset();
            }
        }

        if bomb.body.is_collision(&enemy.body) {
            bomb.trip();
        }

        // The blast keeps hurting for as long as it overlaps
        if bomb_explosion.body.is_collision(&enemy.body) {
            enemy.body.take_damage(HIT_DAMAGE);
        }
    }

    for powerup in powerups.iter_mut() {
        if !powerup.body.in_combat_range(&player.body) {
            continue;
        }

        let picked_up = if player.body.is_collision(&powerup.body) {
            true
        } else if let Some(missile) = missiles
            .iter_mut()
            .find(|m| m.body.is_collision(&powerup.body))
        {
            missile.reset();
            true
        } else {
            false
        };

        if picked_up {
            let kind = powerup.kind;
            powerup.collect(player, &config.arena, rng);
            events.push(GameEvent::PowerupCollected { kind });
        }
    }

    for shot in enemy_missiles.iter_mut() {
        if shot.body.in_combat_range(&player.body) && shot.body.is_collision(&player.body) {
            shot.reset();
            player.body.take_damage(HIT_DAMAGE);
            events.push(GameEvent::PlayerHit {
                health: player.body.health,
            });
        }
    }

    if bomb_explosion.body.is_collision(&player.body) {
        player.body.take_damage(HIT_DAMAGE);
        events.push(GameEvent::PlayerHit {
            health: player.body.health,
        });
    }

    let destroyed: Vec<usize> = state
        .enemies
        .iter()
        .enumerate()
        .filter(|(_, e)| e.body.is_active() && e.body.health <= 0)
        .map(|(idx, _)| idx)
        .collect();
    for idx in destroyed {
        state.destroy_enemy(idx);
    }

    state.settle_player();
}
