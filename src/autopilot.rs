//! Demo pilot for headless runs
//!
//! Produces the same input events a player would: aims at the nearest
//! enemy on a fixed frame interval and backs away from anything that gets
//! too close.

use glam::Vec2;

use crate::consts::WINDOW_HEIGHT;
use crate::controls::{Direction, InputEvent};
use crate::sim::GameState;
use crate::ui::button_at;

/// Enemies closer than this push the pilot away
pub const RETREAT_DISTANCE: f32 = 150.0;
/// Axis offsets smaller than this do not trigger a key
const STEER_DEADZONE: f32 = 8.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Autopilot {
    /// Frames between shots
    pub fire_every: u64,
}

impl Default for Autopilot {
    fn default() -> Self {
        Self { fire_every: 10 }
    }
}

impl Autopilot {
    /// Input events for this frame
    pub fn plan(&self, state: &GameState, frame: u64) -> Vec<InputEvent> {
        let mut events = Vec::with_capacity(5);
        if state.paused || state.game_over {
            return events;
        }

        let player = state.player.pos;
        let nearest = state
            .enemies
            .iter()
            .map(|e| e.pos)
            .min_by(|a, b| {
                a.distance_squared(player)
                    .partial_cmp(&b.distance_squared(player))
                    .unwrap_or(std::cmp::Ordering::Equal)
            });

        let away = match nearest {
            Some(target) if target.distance(player) < RETREAT_DISTANCE => player - target,
            _ => Vec2::ZERO,
        };
        let held = [
            (Direction::Right, away.x > STEER_DEADZONE),
            (Direction::Left, away.x < -STEER_DEADZONE),
            (Direction::Up, away.y > STEER_DEADZONE),
            (Direction::Down, away.y < -STEER_DEADZONE),
        ];
        events.extend(held.iter().map(|&(dir, on)| {
            if on {
                InputEvent::KeyDown(dir)
            } else {
                InputEvent::KeyUp(dir)
            }
        }));

        if let Some(target) = nearest {
            // Never click through a UI button by accident
            if frame % self.fire_every.max(1) == 0 && button_at(target).is_none() {
                events.push(InputEvent::Click {
                    x: target.x,
                    y: WINDOW_HEIGHT - target.y,
                });
            }
        }
        events
    }
}
