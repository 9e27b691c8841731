//! Tick-loop driver
//!
//! Owns the [`GameState`] and feeds it wall-clock deltas, one call per
//! frame. The elapsed-time reference is rebased on every frame that does
//! not advance the game, so resuming never produces a time spike.

use std::time::Instant;

use crate::controls::{ControlOutcome, InputEvent, handle_event};
use crate::render::{Renderer, draw_frame};
use crate::sim::{CollisionReport, GameState, tick};
use crate::status::StatusReport;

pub struct Session {
    pub state: GameState,
    last_frame: Option<Instant>,
    frames: u64,
}

impl Session {
    pub fn new(seed: u64) -> Self {
        Self::from_state(GameState::new(seed))
    }

    pub fn from_state(state: GameState) -> Self {
        log::info!("Session started (seed {})", state.seed);
        Self {
            state,
            last_frame: None,
            frames: 0,
        }
    }

    /// Frames driven so far
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Advance by the time elapsed since the previous frame
    pub fn frame(&mut self, now: Instant) -> Option<CollisionReport> {
        self.frames += 1;
        let last = self.last_frame.replace(now);

        if self.state.paused || self.state.game_over {
            return None;
        }
        // First frame only establishes the reference point
        let dt = last.map(|t| now.saturating_duration_since(t).as_secs_f32())?;
        tick(&mut self.state, dt)
    }

    /// Apply an input event. A pause toggle rebases the frame clock.
    pub fn handle(&mut self, event: InputEvent, now: Instant) -> ControlOutcome {
        let outcome = handle_event(&mut self.state, event);
        if matches!(
            outcome,
            ControlOutcome::PauseToggled { .. } | ControlOutcome::Restarted
        ) {
            self.last_frame = Some(now);
        }
        outcome
    }

    pub fn status(&self) -> StatusReport {
        StatusReport::from_state(&self.state)
    }

    pub fn draw<R: Renderer + ?Sized>(&self, out: &mut R) {
        draw_frame(&self.state, out);
    }
}
