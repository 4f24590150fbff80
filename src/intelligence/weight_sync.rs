// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Program weight synchronization from workout history

use tracing::debug;

use crate::config::FitnessConfig;
use crate::models::{TrainingProgram, WorkoutLog};

/// Overwrites program weights with what the athlete actually lifted
pub trait WeightSync: Send + Sync {
    /// Program copy with weights replaced wherever history has a match
    fn sync_weights(&self, program: &TrainingProgram, logs: &[WorkoutLog]) -> TrainingProgram;
}

/// Uses the heaviest working set from the most recent matching workout
pub struct HistoryWeightSync {
    config: FitnessConfig,
}

impl HistoryWeightSync {
    pub fn new() -> Self {
        Self {
            config: FitnessConfig::default(),
        }
    }

    pub fn with_config(config: FitnessConfig) -> Self {
        Self { config }
    }

    fn latest_weight(&self, canonical: &str, logs: &[WorkoutLog]) -> Option<f64> {
        let mut matching: Vec<(&WorkoutLog, f64)> = logs
            .iter()
            .filter_map(|log| {
                let heaviest = log
                    .completed_exercises
                    .iter()
                    .filter(|e| self.config.canonical_exercise_name(&e.name) == canonical)
                    .flat_map(|e| e.working_sets())
                    .filter_map(|set| set.weight)
                    .filter(|weight| weight.is_finite() && *weight > 0.0)
                    .max_by(f64::total_cmp)?;
                Some((log, heaviest))
            })
            .collect();

        matching.sort_by(|a, b| b.0.date.cmp(&a.0.date));
        matching.first().map(|(_, weight)| *weight)
    }
}

impl Default for HistoryWeightSync {
    fn default() -> Self {
        Self::new()
    }
}

impl WeightSync for HistoryWeightSync {
    fn sync_weights(&self, program: &TrainingProgram, logs: &[WorkoutLog]) -> TrainingProgram {
        let mut synced = program.clone();
        let mut updated = 0usize;

        for exercise in synced
            .sessions
            .iter_mut()
            .flat_map(|session| session.exercises.iter_mut())
        {
            let canonical = self.config.canonical_exercise_name(&exercise.name);
            if let Some(weight) = self.latest_weight(&canonical, logs) {
                exercise.weight = Some(weight);
                updated += 1;
            }
        }

        debug!(logs = logs.len(), updated, "Program weights synced from history");
        synced
    }
}
