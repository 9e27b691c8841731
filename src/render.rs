//! Renderer boundary and frame composition
//!
//! The actual rasterizer lives outside the crate. A backend implements
//! [`Renderer`] (three primitives, no return values) and [`draw_frame`]
//! walks a read-only [`GameState`] to issue one frame's worth of calls.

use glam::Vec2;
use serde::Serialize;

use crate::Rgb;
use crate::consts::{ENEMY_BULLET_RADIUS, PLAYER_BULLET_RADIUS, TILE_SIZE};
use crate::sim::{GameState, Player, Tile};
use crate::tuning::{BLUE, EffectKind, WHITE};
use crate::ui::{BUTTON_SIZE, BUTTONS, Button, ButtonKind};

/// Wall outline color
pub const WALL_COLOR: Rgb = [0.3, 0.3, 0.3];
pub const PLAYER_COLOR: Rgb = WHITE;
pub const PLAYER_BULLET_COLOR: Rgb = BLUE;

/// Primitive drawing surface
pub trait Renderer {
    /// Color used by subsequent primitives
    fn set_color(&mut self, color: Rgb);
    fn draw_line(&mut self, from: Vec2, to: Vec2);
    /// Circle outline
    fn draw_circle(&mut self, center: Vec2, radius: f32);
}

/// A recorded drawing call
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum DrawCommand {
    Color(Rgb),
    Line { from: Vec2, to: Vec2 },
    Circle { center: Vec2, radius: f32 },
}

/// Renderer that records calls instead of drawing them
#[derive(Debug, Clone, Default)]
pub struct CommandBuffer {
    pub commands: Vec<DrawCommand>,
}

impl CommandBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    pub fn lines(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Line { .. }))
            .count()
    }

    pub fn circles(&self) -> impl Iterator<Item = (Vec2, f32)> + '_ {
        self.commands.iter().filter_map(|c| match *c {
            DrawCommand::Circle { center, radius } => Some((center, radius)),
            _ => None,
        })
    }
}

impl Renderer for CommandBuffer {
    fn set_color(&mut self, color: Rgb) {
        self.commands.push(DrawCommand::Color(color));
    }

    fn draw_line(&mut self, from: Vec2, to: Vec2) {
        self.commands.push(DrawCommand::Line { from, to });
    }

    fn draw_circle(&mut self, center: Vec2, radius: f32) {
        self.commands.push(DrawCommand::Circle { center, radius });
    }
}

/// Compose one frame. Entities are hidden once the game is over; the map
/// and the UI icons are always drawn.
pub fn draw_frame<R: Renderer + ?Sized>(state: &GameState, out: &mut R) {
    draw_walls(state, out);

    if !state.game_over {
        draw_player(&state.player, out);

        let bullet_radius =
            PLAYER_BULLET_RADIUS * state.effect_multiplier(EffectKind::BulletSize);
        out.set_color(PLAYER_BULLET_COLOR);
        for bullet in &state.player_bullets {
            out.draw_circle(bullet.pos, bullet_radius);
        }

        for enemy in &state.enemies {
            let stats = enemy.kind.stats();
            out.set_color(stats.color);
            out.draw_circle(enemy.pos, stats.size);
        }

        for bullet in &state.enemy_bullets {
            out.set_color(bullet.source.stats().color);
            out.draw_circle(bullet.pos, ENEMY_BULLET_RADIUS);
        }

        for powerup in &state.field_powerups {
            let stats = powerup.kind.stats();
            out.set_color(stats.color);
            out.draw_circle(powerup.pos, stats.size);
        }
    }

    for button in &BUTTONS {
        draw_button(button, state.paused, out);
    }
}

fn draw_walls<R: Renderer + ?Sized>(state: &GameState, out: &mut R) {
    out.set_color(WALL_COLOR);
    for y in 0..state.map.height() {
        for x in 0..state.map.width() {
            if state.map.tile(x, y) != Some(Tile::Wall) {
                continue;
            }
            let min = Vec2::new(x as f32, y as f32) * TILE_SIZE;
            let max = min + Vec2::splat(TILE_SIZE);
            out.draw_line(min, Vec2::new(max.x, min.y));
            out.draw_line(Vec2::new(max.x, min.y), max);
            out.draw_line(max, Vec2::new(min.x, max.y));
            out.draw_line(Vec2::new(min.x, max.y), min);
        }
    }
}

/// Stick figure standing on `player.pos` (feet at the position)
fn draw_player<R: Renderer + ?Sized>(player: &Player, out: &mut R) {
    let Vec2 { x, y } = player.pos;
    let size = player.size as f32;
    let head = (player.size / 4) as f32;
    let arm = (player.size / 3) as f32;
    let leg = (size / 2.5).floor();

    out.set_color(PLAYER_COLOR);
    out.draw_circle(Vec2::new(x, y + size - head), head);

    let neck = Vec2::new(x, y + size - head * 2.0);
    let hip = Vec2::new(x, y + (player.size / 2) as f32);
    out.draw_line(neck, hip);

    let shoulder = y + size - head * 2.5;
    out.draw_line(Vec2::new(x - arm, shoulder), Vec2::new(x, shoulder));
    out.draw_line(Vec2::new(x, shoulder), Vec2::new(x + arm, shoulder));

    out.draw_line(hip, Vec2::new(x - leg, y));
    out.draw_line(hip, Vec2::new(x + leg, y));
}

fn draw_button<R: Renderer + ?Sized>(button: &Button, paused: bool, out: &mut R) {
    let Vec2 { x, y } = button.anchor;
    let size = BUTTON_SIZE;
    let half = size / 2.0;
    let at = Vec2::new;

    out.set_color(button.color());
    match button.kind {
        ButtonKind::Restart => {
            out.draw_line(at(x, y), at(x + half, y + half));
            out.draw_line(at(x, y), at(x + half, y - half));
            out.draw_line(at(x + half, y + half), at(x + half, y - half));
            out.draw_line(at(x + half - 1.0, y), at(x + size, y));
        }
        // Play triangle while paused, two bars otherwise
        ButtonKind::PauseResume if paused => {
            out.draw_line(at(x, y - half), at(x + size, y));
            out.draw_line(at(x + size, y), at(x, y + half));
            out.draw_line(at(x, y + half), at(x, y - half));
        }
        ButtonKind::PauseResume => {
            out.draw_line(at(x, y - half), at(x, y + half));
            out.draw_line(at(x + half, y - half), at(x + half, y + half));
        }
        ButtonKind::Quit => {
            out.draw_line(at(x, y - half), at(x + size, y + half));
            out.draw_line(at(x, y + half), at(x + size, y - half));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{Enemy, PlayerBullet, TileMap};
    use crate::tuning::{EnemyKind, PowerUpKind};

    fn state() -> GameState {
        GameState::with_map(5, TileMap::open())
    }

    fn wall_count(state: &GameState) -> usize {
        let mut count = 0;
        for y in 0..state.map.height() {
            for x in 0..state.map.width() {
                if state.map.tile(x, y) == Some(Tile::Wall) {
                    count += 1;
                }
            }
        }
        count
    }

    #[test]
    fn test_frame_contents() {
        let mut state = state();
        state.enemies.push(Enemy::spawn(EnemyKind::Presentation, Vec2::new(300.0, 300.0)));
        state.player_bullets.push(PlayerBullet {
            pos: Vec2::new(500.0, 400.0),
            direction: 0.0,
            speed: 300.0,
        });

        let mut buf = CommandBuffer::new();
        draw_frame(&state, &mut buf);

        // 4 lines per wall tile, 5 for the player, 4 + 2 + 2 for the icons
        assert_eq!(buf.lines(), wall_count(&state) * 4 + 5 + 8);
        let circles: Vec<_> = buf.circles().collect();
        assert_eq!(circles.len(), 3);
        // Head, then bullet, then enemy
        assert_eq!(circles[0], (Vec2::new(640.0, 383.0), 7.0));
        assert_eq!(circles[1], (Vec2::new(500.0, 400.0), 3.0));
        assert_eq!(circles[2], (Vec2::new(300.0, 300.0), 35.0));
    }

    #[test]
    fn test_bullet_size_effect_scales_drawn_radius() {
        let mut state = state();
        state.activate_powerup(PowerUpKind::Grammarly);
        state.player_bullets.push(PlayerBullet {
            pos: Vec2::new(500.0, 400.0),
            direction: 0.0,
            speed: 300.0,
        });

        let mut buf = CommandBuffer::new();
        draw_frame(&state, &mut buf);
        assert!(buf.circles().any(|c| c == (Vec2::new(500.0, 400.0), 4.5)));
    }

    #[test]
    fn test_game_over_hides_entities() {
        let mut state = state();
        state.enemies.push(Enemy::spawn(EnemyKind::Quiz, Vec2::new(300.0, 300.0)));
        state.end_game();

        let mut buf = CommandBuffer::new();
        draw_frame(&state, &mut buf);
        assert_eq!(buf.circles().count(), 0);
        assert_eq!(buf.lines(), wall_count(&state) * 4 + 8);
    }

    #[test]
    fn test_paused_shows_play_icon() {
        let mut state = state();
        state.paused = true;
        let mut buf = CommandBuffer::new();
        draw_frame(&state, &mut buf);
        // Play triangle has one more line than the pause bars
        assert_eq!(buf.lines(), wall_count(&state) * 4 + 5 + 9);
    }
}
