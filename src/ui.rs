//! On-screen click targets
//!
//! Three fixed buttons along the top edge, checked before a click falls
//! through to shooting.

use glam::Vec2;

use crate::Rgb;
use crate::consts::{WINDOW_HEIGHT, WINDOW_WIDTH};
use crate::tuning::{GREEN, RED, YELLOW};

/// Button edge length in pixels
pub const BUTTON_SIZE: f32 = 20.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonKind {
    Restart,
    PauseResume,
    Quit,
}

/// A click target anchored at its left-middle point
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Button {
    pub kind: ButtonKind,
    pub anchor: Vec2,
}

impl Button {
    pub fn contains(&self, point: Vec2) -> bool {
        let half = BUTTON_SIZE / 2.0;
        point.x >= self.anchor.x
            && point.x <= self.anchor.x + BUTTON_SIZE
            && point.y >= self.anchor.y - half
            && point.y <= self.anchor.y + half
    }

    pub fn color(&self) -> Rgb {
        match self.kind {
            ButtonKind::Restart => GREEN,
            ButtonKind::PauseResume => YELLOW,
            ButtonKind::Quit => RED,
        }
    }
}

pub const BUTTONS: [Button; 3] = [
    Button {
        kind: ButtonKind::Restart,
        anchor: Vec2::new(30.0, WINDOW_HEIGHT - 30.0),
    },
    Button {
        kind: ButtonKind::PauseResume,
        anchor: Vec2::new(WINDOW_WIDTH / 2.0 - 10.0, WINDOW_HEIGHT - 30.0),
    },
    Button {
        kind: ButtonKind::Quit,
        anchor: Vec2::new(WINDOW_WIDTH - 50.0, WINDOW_HEIGHT - 30.0),
    },
];

/// The button under a world-space point, if any
pub fn button_at(point: Vec2) -> Option<ButtonKind> {
    BUTTONS.iter().find(|b| b.contains(point)).map(|b| b.kind)
}
