//! Per-frame simulation tick
//!
//! Advances the session by the measured wall-clock delta: wave timer, player
//! movement, bullets, enemies, spawning and power-ups, then the collision
//! pass. Nothing advances while paused or after game over.

use glam::Vec2;
use rand::Rng;
use rand::seq::IndexedRandom;

use super::collision::{CollisionReport, resolve_collisions};
use super::state::{Enemy, EnemyBullet, FieldPowerUp, GameState, PlayerBullet};
use crate::consts::*;
use crate::tuning::{Effect, EffectKind, PowerUpKind, wave_config};
use crate::{aim_angle, direction, in_window};

/// Advance the game state by `dt` seconds.
///
/// Returns the collision report, or `None` if the state did not advance.
pub fn tick(state: &mut GameState, dt: f32) -> Option<CollisionReport> {
    if state.paused || state.game_over {
        return None;
    }
    let dt = dt.max(0.0);

    advance_wave_timer(state, dt);
    if state.game_over {
        return None;
    }

    move_player(state, dt);
    advance_bullets(state, dt);
    advance_enemies(state, dt);
    spawn_enemies(state, dt);
    update_powerups(state, dt);

    Some(resolve_collisions(state))
}

/// Count down the wave; after the last wave the session ends
pub fn advance_wave_timer(state: &mut GameState, dt: f32) {
    state.wave_timer -= dt;
    if state.wave_timer > 0.0 {
        return;
    }

    state.wave += 1;
    if state.wave > WAVE_COUNT {
        log::info!("All {} waves survived", WAVE_COUNT);
        state.end_game();
    } else {
        state.wave_timer = WAVE_DURATION;
        log::info!("Starting wave {}", state.wave);
    }
}

/// Axis-separated movement: each axis is rejected independently if any
/// probe corner would land in a wall
pub fn move_player(state: &mut GameState, dt: f32) {
    let boost = state.effect_multiplier(EffectKind::SpeedBoost);
    let delta = state.movement.axis() * state.player.speed * dt * boost;
    let half = state.player.half_extents();
    let mut pos = state.player.pos;

    let next_x = Vec2::new(pos.x + delta.x, pos.y);
    if !hits_wall(state, next_x) {
        pos.x = next_x.x.clamp(half.x, WINDOW_WIDTH - half.x);
    }

    let next_y = Vec2::new(pos.x, pos.y + delta.y);
    if !hits_wall(state, next_y) {
        pos.y = next_y.y.clamp(half.y, WINDOW_HEIGHT - half.y);
    }

    state.player.pos = pos;
}

fn hits_wall(state: &GameState, pos: Vec2) -> bool {
    state
        .player
        .probe_corners(pos)
        .iter()
        .any(|corner| state.map.is_wall(corner.x, corner.y))
}

/// Move every bullet along its heading; drop the ones that left the window
pub fn advance_bullets(state: &mut GameState, dt: f32) {
    for bullet in &mut state.player_bullets {
        bullet.pos += direction(bullet.direction) * bullet.speed * dt;
    }
    state.player_bullets.retain(|b| in_window(b.pos));

    for bullet in &mut state.enemy_bullets {
        bullet.pos += direction(bullet.direction) * bullet.speed * dt;
    }
    state.enemy_bullets.retain(|b| in_window(b.pos));
}

/// Chase the player and fire when the attack cooldown runs out
pub fn advance_enemies(state: &mut GameState, dt: f32) {
    let Some(wave) = wave_config(state.wave) else {
        return;
    };
    let target = state.player.pos;

    for enemy in &mut state.enemies {
        let stats = enemy.kind.stats();

        let to_player = target - enemy.pos;
        let distance = to_player.length();
        if distance > 0.0 {
            let speed = stats.speed * wave.speed_multiplier;
            enemy.pos += to_player / distance * speed * dt;
        }

        enemy.attack_cooldown -= dt;
        if enemy.attack_cooldown <= 0.0 {
            let volley = stats.attack.bullet_angles();
            if !volley.is_empty() {
                log::debug!("{} fires {} bullets", enemy.kind.as_str(), volley.len());
            }
            state
                .enemy_bullets
                .extend(volley.iter().map(|&angle| EnemyBullet {
                    pos: enemy.pos,
                    direction: angle,
                    speed: stats.bullet_speed,
                    source: enemy.kind,
                }));
            enemy.attack_cooldown = stats.attack_cooldown;
        }
    }
}

/// Spawn one enemy from the current wave's pool each time the timer expires
pub fn spawn_enemies(state: &mut GameState, dt: f32) {
    state.enemy_spawn_timer -= dt;
    if state.enemy_spawn_timer > 0.0 {
        return;
    }
    let Some(wave) = wave_config(state.wave) else {
        return;
    };
    state.enemy_spawn_timer = wave.spawn_rate;

    let Some(&kind) = wave.enemies.choose(&mut state.rng) else {
        return;
    };
    match state.map.random_floor_position(&mut state.rng) {
        Some(pos) => {
            log::debug!("Spawned {} at ({:.0}, {:.0})", kind.as_str(), pos.x, pos.y);
            state.enemies.push(Enemy::spawn(kind, pos));
        }
        None => log::warn!("No floor tile for {}, spawn skipped", kind.as_str()),
    }
}

/// Expire active effects and drop new field power-ups on a random timer
pub fn update_powerups(state: &mut GameState, dt: f32) {
    for effect in &mut state.active_effects {
        effect.remaining -= dt;
    }
    state.active_effects.retain(|effect| {
        let alive = effect.remaining > 0.0;
        if !alive {
            log::debug!("{} expired", effect.source.as_str());
        }
        alive
    });

    state.powerup_spawn_timer -= dt;
    if state.powerup_spawn_timer > 0.0 {
        return;
    }
    state.powerup_spawn_timer = state
        .rng
        .random_range(POWERUP_SPAWN_MIN..=POWERUP_SPAWN_MAX);

    if state.field_powerups.len() >= MAX_FIELD_POWERUPS {
        return;
    }
    let Some(&kind) = PowerUpKind::ALL.choose(&mut state.rng) else {
        return;
    };
    if let Some(pos) = state.map.random_floor_position(&mut state.rng) {
        log::debug!("Power-up {} dropped at ({:.0}, {:.0})", kind.as_str(), pos.x, pos.y);
        state.field_powerups.push(FieldPowerUp { kind, pos });
    }
}

/// Headings of a volley of `count` bullets fanned across the spread arc,
/// centered on `center`
pub fn spread_angles(center: f32, count: u32) -> Vec<f32> {
    if count <= 1 {
        return vec![center];
    }
    let step = SPREAD_ARC / (count - 1) as f32;
    let start = center - SPREAD_ARC / 2.0;
    (0..count).map(|i| start + i as f32 * step).collect()
}

/// Fire from the player toward `target` (world coordinates).
///
/// Returns the number of bullets created; aiming at the player's own
/// position fires nothing.
pub fn fire(state: &mut GameState, target: Vec2) -> usize {
    let Some(angle) = aim_angle(state.player.pos, target) else {
        return 0;
    };

    let speed = PLAYER_BULLET_SPEED * state.effect_multiplier(EffectKind::BulletSpeed);
    let count = match state.active_effect(EffectKind::SpreadShot).map(|e| e.effect) {
        Some(Effect::SpreadShot { bullets }) => bullets,
        _ => 1,
    };

    let origin = state.player.pos;
    let headings = spread_angles(angle, count);
    state
        .player_bullets
        .extend(headings.iter().map(|&heading| PlayerBullet {
            pos: origin,
            direction: heading,
            speed,
        }));
    headings.len()
}
