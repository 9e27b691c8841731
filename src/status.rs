//! Per-tick status report
//!
//! A plain snapshot of the fields a terminal or HUD shows; `Display` gives
//! the textual form.

use std::fmt;

use serde::Serialize;

use crate::consts::WAVE_COUNT;
use crate::sim::GameState;
use crate::tuning::{Grade, PowerUpKind};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EffectStatus {
    pub source: PowerUpKind,
    pub remaining: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusReport {
    pub lives: u32,
    pub score: u32,
    pub wave: u32,
    /// Whole seconds left in the current wave
    pub time_remaining: u32,
    pub paused: bool,
    pub effects: Vec<EffectStatus>,
    /// Present once the session has ended
    pub final_grade: Option<Grade>,
}

impl StatusReport {
    pub fn from_state(state: &GameState) -> Self {
        Self {
            lives: state.lives,
            score: state.score,
            wave: state.wave,
            time_remaining: state.wave_timer.max(0.0) as u32,
            paused: state.paused,
            effects: state
                .active_effects
                .iter()
                .map(|e| EffectStatus {
                    source: e.source,
                    remaining: e.remaining,
                })
                .collect(),
            final_grade: state.game_over.then(|| state.grade()),
        }
    }
}

impl fmt::Display for StatusReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Academic Status:")?;
        writeln!(f, "================")?;
        writeln!(f, "Academic Comebacks (Lives): {}", self.lives)?;
        writeln!(f, "Current Score: {}", self.score)?;
        writeln!(f, "Current Month: {}/{}", self.wave, WAVE_COUNT)?;
        writeln!(f, "Days Remaining: {} days", self.time_remaining)?;
        writeln!(
            f,
            "Game Status: {}",
            if self.paused { "PAUSED" } else { "ACTIVE" }
        )?;
        writeln!(f, "Active Power-ups:")?;
        if self.effects.is_empty() {
            writeln!(f, "- None")?;
        }
        for effect in &self.effects {
            writeln!(
                f,
                "- {}: {:.1}s remaining",
                effect.source.as_str(),
                effect.remaining
            )?;
        }

        if let Some(grade) = self.final_grade {
            writeln!(f)?;
            writeln!(f, "GAME OVER!")?;
            writeln!(f, "Final Grade: {} (GPA: {:.1})", grade.letter(), grade.gpa())?;
            writeln!(f, "Performance: {}", grade.description())?;
        }
        Ok(())
    }
}
