//! Collision detection and resolution
//!
//! Runs once per tick, after movement, in a fixed order. Each pass scans one
//! collection, flags what it consumed and filters it afterwards; the other
//! side of the pair is mutated in place.

use glam::Vec2;

use super::state::{GameState, Rect};
use crate::consts::{ENEMY_BULLET_RADIUS, PLAYER_BULLET_RADIUS};
use crate::tuning::AttackKind;

/// Strict circle-circle overlap (touching circles do not collide)
#[inline]
pub fn circles_overlap(a: Vec2, ra: f32, b: Vec2, rb: f32) -> bool {
    let reach = ra + rb;
    a.distance_squared(b) < reach * reach
}

/// Circle vs axis-aligned rectangle.
///
/// Clamps the center onto the rectangle and compares squared distances,
/// so a zero-radius circle never collides.
#[inline]
pub fn circle_rect_overlap(center: Vec2, radius: f32, rect: &Rect) -> bool {
    let closest = center.clamp(rect.min, rect.max());
    center.distance_squared(closest) < radius * radius
}

/// Counts of what one collision pass resolved
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CollisionReport {
    pub enemies_hit: u32,
    pub enemies_defeated: u32,
    pub player_hits: u32,
    pub powerups_collected: u32,
}

/// Resolve all interactions for this tick
pub fn resolve_collisions(state: &mut GameState) -> CollisionReport {
    let mut report = CollisionReport::default();
    player_bullets_vs_enemies(state, &mut report);
    enemy_bullets_vs_player(state, &mut report);
    melee_vs_player(state, &mut report);
    powerups_vs_player(state, &mut report);
    report
}

/// Each bullet damages at most the first overlapping enemy in list order
fn player_bullets_vs_enemies(state: &mut GameState, report: &mut CollisionReport) {
    let mut spent = vec![false; state.player_bullets.len()];

    for (i, bullet) in state.player_bullets.iter().enumerate() {
        let Some(idx) = state.enemies.iter().position(|enemy| {
            circles_overlap(bullet.pos, PLAYER_BULLET_RADIUS, enemy.pos, enemy.kind.stats().size)
        }) else {
            continue;
        };

        spent[i] = true;
        report.enemies_hit += 1;

        let enemy = &mut state.enemies[idx];
        enemy.hp = enemy.hp.saturating_sub(1);
        if enemy.hp == 0 {
            let defeated = state.enemies.remove(idx);
            state.score += defeated.kind.stats().points;
            report.enemies_defeated += 1;
            log::info!("Defeated {}! Score: {}", defeated.kind.as_str(), state.score);
        }
    }

    let mut flags = spent.into_iter();
    state
        .player_bullets
        .retain(|_| !flags.next().unwrap_or(false));
}

fn enemy_bullets_vs_player(state: &mut GameState, report: &mut CollisionReport) {
    let hitbox = state.player.hitbox();
    let mut hits = 0;
    state.enemy_bullets.retain(|bullet| {
        let hit = circle_rect_overlap(bullet.pos, ENEMY_BULLET_RADIUS, &hitbox);
        if hit {
            hits += 1;
        }
        !hit
    });

    for _ in 0..hits {
        state.hit_player();
    }
    report.player_hits += hits;
}

/// Melee enemies in reach hit the player every tick (no cooldown gating)
fn melee_vs_player(state: &mut GameState, report: &mut CollisionReport) {
    let hitbox = state.player.hitbox();
    let hits = state
        .enemies
        .iter()
        .filter(|enemy| {
            let stats = enemy.kind.stats();
            stats.attack == AttackKind::Melee
                && circle_rect_overlap(enemy.pos, stats.attack_range, &hitbox)
        })
        .count() as u32;

    for _ in 0..hits {
        state.hit_player();
    }
    report.player_hits += hits;
}

fn powerups_vs_player(state: &mut GameState, report: &mut CollisionReport) {
    let hitbox = state.player.hitbox();
    let mut collected = Vec::new();
    state.field_powerups.retain(|powerup| {
        let hit = circle_rect_overlap(powerup.pos, powerup.kind.stats().size, &hitbox);
        if hit {
            collected.push(powerup.kind);
        }
        !hit
    });

    for kind in collected {
        state.activate_powerup(kind);
        report.powerups_collected += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::map::TileMap;
    use crate::sim::state::{Enemy, EnemyBullet, FieldPowerUp, PlayerBullet};
    use crate::tuning::{EffectKind, EnemyKind, PowerUpKind};

    fn state() -> GameState {
        GameState::with_map(7, TileMap::open())
    }

    fn bullet_at(pos: Vec2) -> PlayerBullet {
        PlayerBullet {
            pos,
            direction: 0.0,
            speed: 300.0,
        }
    }

    fn enemy_bullet_at(pos: Vec2) -> EnemyBullet {
        EnemyBullet {
            pos,
            direction: 0.0,
            speed: 150.0,
            source: EnemyKind::Assignment,
        }
    }

    #[test]
    fn test_circle_rect_corner() {
        let rect = Rect {
            min: Vec2::new(10.0, 10.0),
            size: Vec2::new(20.0, 30.0),
        };
        assert!(!circle_rect_overlap(Vec2::new(10.0, 10.0), 0.0, &rect));
        assert!(circle_rect_overlap(Vec2::new(10.0, 10.0), 0.5, &rect));
        assert!(circle_rect_overlap(Vec2::new(30.0, 40.0), 0.01, &rect));
    }

    #[test]
    fn test_circle_rect_outside() {
        let rect = Rect {
            min: Vec2::ZERO,
            size: Vec2::new(10.0, 10.0),
        };
        // Exactly touching the edge is not an overlap
        assert!(!circle_rect_overlap(Vec2::new(15.0, 5.0), 5.0, &rect));
        assert!(circle_rect_overlap(Vec2::new(14.9, 5.0), 5.0, &rect));
        // Diagonal from the corner: distance sqrt(2) ~ 1.414
        assert!(!circle_rect_overlap(Vec2::new(11.0, 11.0), 1.4, &rect));
        assert!(circle_rect_overlap(Vec2::new(11.0, 11.0), 1.5, &rect));
    }

    #[test]
    fn test_circles_overlap() {
        assert!(circles_overlap(Vec2::ZERO, 3.0, Vec2::new(22.0, 0.0), 20.0));
        assert!(!circles_overlap(Vec2::ZERO, 3.0, Vec2::new(23.0, 0.0), 20.0));
        assert!(circles_overlap(Vec2::ZERO, 0.0, Vec2::ZERO, 0.1));
    }

    #[test]
    fn test_bullet_kills_quiz_once() {
        let mut state = state();
        let pos = Vec2::new(200.0, 200.0);
        state.enemies.push(Enemy::spawn(EnemyKind::Quiz, pos));
        state.player_bullets.push(bullet_at(pos));

        let report = resolve_collisions(&mut state);
        assert!(state.enemies.is_empty());
        assert!(state.player_bullets.is_empty());
        assert_eq!(state.score, 1);
        assert_eq!(report.enemies_defeated, 1);

        resolve_collisions(&mut state);
        assert_eq!(state.score, 1);
    }

    #[test]
    fn test_bullet_hits_only_first_enemy() {
        let mut state = state();
        let pos = Vec2::new(200.0, 200.0);
        state.enemies.push(Enemy::spawn(EnemyKind::Midterm, pos));
        state.enemies.push(Enemy::spawn(EnemyKind::Midterm, pos));
        state.player_bullets.push(bullet_at(pos));

        resolve_collisions(&mut state);
        assert_eq!(state.enemies[0].hp, 2);
        assert_eq!(state.enemies[1].hp, 3);
        assert!(state.player_bullets.is_empty());
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_second_bullet_moves_on_after_kill() {
        let mut state = state();
        let pos = Vec2::new(200.0, 200.0);
        state.enemies.push(Enemy::spawn(EnemyKind::Quiz, pos));
        state.enemies.push(Enemy::spawn(EnemyKind::Assignment, pos));
        state.player_bullets.push(bullet_at(pos));
        state.player_bullets.push(bullet_at(pos));
        state.player_bullets.push(bullet_at(Vec2::new(900.0, 600.0)));

        resolve_collisions(&mut state);
        assert_eq!(state.enemies.len(), 1);
        assert_eq!(state.enemies[0].kind, EnemyKind::Assignment);
        assert_eq!(state.enemies[0].hp, 1);
        assert_eq!(state.player_bullets.len(), 1);
        assert_eq!(state.player_bullets[0].pos, Vec2::new(900.0, 600.0));
        assert_eq!(state.score, 1);
    }

    #[test]
    fn test_enemy_bullet_hits_player() {
        let mut state = state();
        let hitbox_center = state.player.hitbox().min + state.player.hitbox().size / 2.0;
        state.enemy_bullets.push(enemy_bullet_at(hitbox_center));
        state.enemy_bullets.push(enemy_bullet_at(Vec2::new(50.0, 50.0)));

        let report = resolve_collisions(&mut state);
        assert_eq!(report.player_hits, 1);
        assert_eq!(state.lives, 2);
        assert_eq!(state.enemy_bullets.len(), 1);
    }

    #[test]
    fn test_melee_hits_every_pass() {
        let mut state = state();
        let pos = state.player.pos;
        // Quiz standing on the player, plus a shooter that has no melee
        state.enemies.push(Enemy::spawn(EnemyKind::Quiz, pos));
        state.enemies.push(Enemy::spawn(EnemyKind::Final, pos));

        resolve_collisions(&mut state);
        assert_eq!(state.lives, 2);
        resolve_collisions(&mut state);
        assert_eq!(state.lives, 1);
        resolve_collisions(&mut state);
        assert_eq!(state.lives, 0);
        assert!(state.game_over);
    }

    #[test]
    fn test_melee_out_of_range() {
        let mut state = state();
        let pos = state.player.pos + Vec2::new(45.0, 0.0);
        state.enemies.push(Enemy::spawn(EnemyKind::Quiz, pos));
        resolve_collisions(&mut state);
        assert_eq!(state.lives, 3);
    }

    #[test]
    fn test_powerup_pickup_activates_effect() {
        let mut state = state();
        let pos = state.player.pos;
        state.field_powerups.push(FieldPowerUp {
            kind: PowerUpKind::Quillbot,
            pos,
        });
        state.field_powerups.push(FieldPowerUp {
            kind: PowerUpKind::Chegg,
            pos: Vec2::new(1000.0, 100.0),
        });

        let report = resolve_collisions(&mut state);
        assert_eq!(report.powerups_collected, 1);
        assert_eq!(state.field_powerups.len(), 1);
        let effect = state
            .active_effect(EffectKind::BulletSpeed)
            .expect("bullet speed active");
        assert_eq!(effect.remaining, 4.0);
    }
}
