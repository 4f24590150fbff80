// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! # Mesocycle Phase Engine
//!
//! A training block cycles through four phases, each scaling the program's
//! set counts by its volume multiplier:
//!
//! ```text
//! intro (0.7) -> accumulation (1.0) -> intensification (1.2) -> deload (0.6)
//!                     ^                                           |
//!                     +-------------------------------------------+
//! ```
//!
//! ## Design Principles
//! - **Explicit state machine**: transitions only happen through [`MesocycleState::advance`]
//! - **Injected cadence**: *when* to advance is a [`PhaseScheduler`] supplied by the caller
//! - **Derived programs**: scaling returns a new program and never touches the template

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::constants::mesocycle::{
    ACCUMULATION_MULTIPLIER, DELOAD_MULTIPLIER, INTENSIFICATION_MULTIPLIER, INTRO_MULTIPLIER,
    MIN_PHASE_SETS,
};
use crate::models::TrainingProgram;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MesocyclePhase {
    Intro,
    Accumulation,
    Intensification,
    Deload,
}

impl MesocyclePhase {
    pub fn default_multiplier(&self) -> f64 {
        match self {
            Self::Intro => INTRO_MULTIPLIER,
            Self::Accumulation => ACCUMULATION_MULTIPLIER,
            Self::Intensification => INTENSIFICATION_MULTIPLIER,
            Self::Deload => DELOAD_MULTIPLIER,
        }
    }

    /// Following phase; deload loops back to accumulation, intro is never re-entered
    pub fn next(&self) -> Self {
        match self {
            Self::Intro => Self::Accumulation,
            Self::Accumulation => Self::Intensification,
            Self::Intensification => Self::Deload,
            Self::Deload => Self::Accumulation,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Intro => "Intro",
            Self::Accumulation => "Accumulation",
            Self::Intensification => "Intensification",
            Self::Deload => "Deload",
        }
    }
}

impl std::fmt::Display for MesocyclePhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Intro => write!(f, "intro"),
            Self::Accumulation => write!(f, "accumulation"),
            Self::Intensification => write!(f, "intensification"),
            Self::Deload => write!(f, "deload"),
        }
    }
}

impl std::str::FromStr for MesocyclePhase {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "intro" => Ok(Self::Intro),
            "accumulation" => Ok(Self::Accumulation),
            "intensification" => Ok(Self::Intensification),
            "deload" => Ok(Self::Deload),
            other => Err(format!("Unknown mesocycle phase: {other}")),
        }
    }
}

/// Current position within a mesocycle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MesocycleState {
    pub phase: MesocyclePhase,
    pub volume_multiplier: f64,
    /// 1-based week within the current phase
    pub week: u32,
}

impl MesocycleState {
    /// Every block starts in intro
    pub fn initialize() -> Self {
        Self::in_phase(MesocyclePhase::Intro)
    }

    pub fn in_phase(phase: MesocyclePhase) -> Self {
        Self {
            phase,
            volume_multiplier: phase.default_multiplier(),
            week: 1,
        }
    }

    /// Move to the next phase with its default multiplier
    pub fn advance(&self) -> Self {
        Self::in_phase(self.phase.next())
    }

    pub fn advance_if(&self, scheduler: &dyn PhaseScheduler) -> Self {
        if scheduler.should_advance(self) {
            self.advance()
        } else {
            self.clone()
        }
    }

    /// Close out the current week: advance when the scheduler says so,
    /// otherwise stay in phase one week further along
    pub fn end_week(&self, scheduler: &dyn PhaseScheduler) -> Self {
        if scheduler.should_advance(self) {
            self.advance()
        } else {
            Self {
                week: self.week.saturating_add(1),
                ..self.clone()
            }
        }
    }

    /// Multiplier used for scaling; unusable values fall back to 1.0
    pub fn effective_multiplier(&self) -> f64 {
        if self.volume_multiplier.is_finite() && self.volume_multiplier > 0.0 {
            self.volume_multiplier
        } else {
            1.0
        }
    }
}

impl Default for MesocycleState {
    fn default() -> Self {
        Self::initialize()
    }
}

/// Cadence policy deciding when a phase is complete
pub trait PhaseScheduler {
    fn should_advance(&self, state: &MesocycleState) -> bool;
}

/// Fixed number of weeks per phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeksPerPhase {
    pub intro: u32,
    pub accumulation: u32,
    pub intensification: u32,
    pub deload: u32,
}

impl WeeksPerPhase {
    pub fn weeks_for(&self, phase: MesocyclePhase) -> u32 {
        match phase {
            MesocyclePhase::Intro => self.intro,
            MesocyclePhase::Accumulation => self.accumulation,
            MesocyclePhase::Intensification => self.intensification,
            MesocyclePhase::Deload => self.deload,
        }
    }
}

impl Default for WeeksPerPhase {
    fn default() -> Self {
        Self {
            intro: 1,
            accumulation: 3,
            intensification: 2,
            deload: 1,
        }
    }
}

impl PhaseScheduler for WeeksPerPhase {
    fn should_advance(&self, state: &MesocycleState) -> bool {
        state.week >= self.weeks_for(state.phase)
    }
}

/// Program with every exercise's sets scaled by the phase multiplier
///
/// `sets = max(1, round(sets * multiplier))`; all other fields are copied as-is.
pub fn get_program_for_current_phase(
    program: &TrainingProgram,
    state: &MesocycleState,
) -> TrainingProgram {
    let multiplier = state.effective_multiplier();
    let mut scaled = program.clone();

    for exercise in scaled
        .sessions
        .iter_mut()
        .flat_map(|session| session.exercises.iter_mut())
    {
        let sets = (f64::from(exercise.sets) * multiplier).round();
        exercise.sets = (sets as u32).max(MIN_PHASE_SETS);
    }

    debug!(
        phase = %state.phase,
        week = state.week,
        multiplier,
        sessions = scaled.sessions.len(),
        "Program scaled for mesocycle phase"
    );

    scaled
}
