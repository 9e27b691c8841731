//! Input translation
//!
//! Turns discrete window events into movement-intent updates, UI actions
//! and shots. Click coordinates arrive with a top-left origin and are
//! flipped into the y-up world before anything else looks at them.

use glam::Vec2;

use crate::consts::WINDOW_HEIGHT;
use crate::sim::{GameState, fire};
use crate::tuning::Grade;
use crate::ui::{ButtonKind, button_at};

/// A movement key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// WASD mapping, case-insensitive
    pub fn from_key(key: char) -> Option<Self> {
        match key.to_ascii_lowercase() {
            'w' => Some(Direction::Up),
            's' => Some(Direction::Down),
            'a' => Some(Direction::Left),
            'd' => Some(Direction::Right),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    KeyDown(Direction),
    KeyUp(Direction),
    /// Primary button press in window coordinates (origin top-left)
    Click { x: f32, y: f32 },
}

impl InputEvent {
    /// Key event from a raw character; `None` for unmapped keys
    pub fn key(key: char, pressed: bool) -> Option<Self> {
        let dir = Direction::from_key(key)?;
        Some(if pressed {
            InputEvent::KeyDown(dir)
        } else {
            InputEvent::KeyUp(dir)
        })
    }
}

/// What an input event did to the session
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ControlOutcome {
    Moved,
    Restarted,
    PauseToggled { paused: bool },
    /// The player dropped out; carries the grade for the current score
    Quit(Grade),
    /// Number of bullets spawned
    Fired(usize),
    Ignored,
}

/// Convert window coordinates to world space (y axis up)
#[inline]
pub fn window_to_world(x: f32, y: f32) -> Vec2 {
    Vec2::new(x, WINDOW_HEIGHT - y)
}

/// Apply one input event to the game state
pub fn handle_event(state: &mut GameState, event: InputEvent) -> ControlOutcome {
    match event {
        InputEvent::KeyDown(dir) => {
            if state.paused || state.game_over {
                return ControlOutcome::Ignored;
            }
            set_held(state, dir, true);
            ControlOutcome::Moved
        }
        InputEvent::KeyUp(dir) => {
            set_held(state, dir, false);
            ControlOutcome::Moved
        }
        InputEvent::Click { x, y } => click(state, window_to_world(x, y)),
    }
}

fn set_held(state: &mut GameState, dir: Direction, held: bool) {
    let movement = &mut state.movement;
    match dir {
        Direction::Up => movement.up = held,
        Direction::Down => movement.down = held,
        Direction::Left => movement.left = held,
        Direction::Right => movement.right = held,
    }
}

/// UI buttons take the click first; otherwise it is a shot
fn click(state: &mut GameState, point: Vec2) -> ControlOutcome {
    match button_at(point) {
        Some(ButtonKind::Restart) => {
            state.reset();
            log::info!("Retaking the semester!");
            ControlOutcome::Restarted
        }
        Some(ButtonKind::PauseResume) => {
            state.paused = !state.paused;
            log::info!("Game {}", if state.paused { "paused" } else { "resumed" });
            ControlOutcome::PauseToggled {
                paused: state.paused,
            }
        }
        Some(ButtonKind::Quit) => {
            let grade = state.grade();
            log::info!("Semester dropped! Final grade {}", grade);
            ControlOutcome::Quit(grade)
        }
        None if state.paused || state.game_over => ControlOutcome::Ignored,
        None => match fire(state, point) {
            0 => ControlOutcome::Ignored,
            n => {
                log::debug!("Fired {} bullet(s) at {:?}", n, point);
                ControlOutcome::Fired(n)
            }
        },
    }
}
