// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Weekly per-muscle training volume against experience-scaled targets

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

use super::muscle_map::{self, MuscleGroup};
use crate::config::FitnessConfig;
use crate::models::{ExperienceLevel, WorkoutLog};

/// Volume classification relative to the optimal target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VolumeStatus {
    Under,
    Optimal,
    Over,
}

/// Volume accumulated for one muscle group
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MuscleVolume {
    pub muscle_id: MuscleGroup,
    pub muscle_name_ru: String,
    /// Primary sets plus weighted secondary sets
    pub total_sets: f64,
    /// Sets where this muscle was a primary mover
    pub direct_sets: u32,
    pub percent_of_optimal: u32,
    pub status: VolumeStatus,
}

/// Weekly volume report, recomputed per request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyVolumeReport {
    pub muscles: Vec<MuscleVolume>,
    pub undertrained_muscles: Vec<MuscleGroup>,
    pub overtrained_muscles: Vec<MuscleGroup>,
}

impl WeeklyVolumeReport {
    pub fn muscle(&self, muscle: MuscleGroup) -> Option<&MuscleVolume> {
        self.muscles.iter().find(|volume| volume.muscle_id == muscle)
    }
}

#[derive(Default)]
struct Tally {
    total: f64,
    direct: u32,
}

/// Aggregates completed working sets into a weekly volume report
pub struct VolumeTracker {
    config: FitnessConfig,
}

impl VolumeTracker {
    pub fn new() -> Self {
        Self {
            config: FitnessConfig::default(),
        }
    }

    pub fn with_config(config: FitnessConfig) -> Self {
        Self { config }
    }

    /// Build the weekly report for the given logs
    ///
    /// The logs are treated as one training week. Unmapped exercises add
    /// nothing; an empty history yields an all-zero, all-`under` report.
    pub fn calculate_weekly_volume(
        &self,
        logs: &[WorkoutLog],
        experience_level: ExperienceLevel,
    ) -> WeeklyVolumeReport {
        let volume = &self.config.intelligence.volume;
        let mut tallies: HashMap<MuscleGroup, Tally> = HashMap::new();
        let mut unmapped = 0usize;

        for exercise in logs.iter().flat_map(|log| log.completed_exercises.iter()) {
            let working_sets = exercise.working_sets().count() as u32;
            if working_sets == 0 {
                continue;
            }

            let Some(profile) = muscle_map::resolve(&self.config, &exercise.name) else {
                unmapped += 1;
                continue;
            };

            for muscle in &profile.primary {
                let tally = tallies.entry(*muscle).or_default();
                tally.direct += working_sets;
                tally.total += f64::from(working_sets) * volume.primary_credit;
            }
            for muscle in &profile.secondary {
                tallies.entry(*muscle).or_default().total +=
                    f64::from(working_sets) * volume.secondary_credit;
            }
        }

        let optimal = volume.optimal_for(experience_level);
        let mut report = WeeklyVolumeReport {
            muscles: Vec::with_capacity(MuscleGroup::ALL.len()),
            undertrained_muscles: Vec::new(),
            overtrained_muscles: Vec::new(),
        };

        for muscle in MuscleGroup::ALL {
            let tally = tallies.remove(&muscle).unwrap_or_default();
            let percent = if optimal > 0.0 {
                (tally.total / optimal * 100.0).round()
            } else {
                0.0
            };

            let status = if percent < volume.under_percent {
                report.undertrained_muscles.push(muscle);
                VolumeStatus::Under
            } else if percent > volume.over_percent {
                report.overtrained_muscles.push(muscle);
                VolumeStatus::Over
            } else {
                VolumeStatus::Optimal
            };

            report.muscles.push(MuscleVolume {
                muscle_id: muscle,
                muscle_name_ru: muscle.name_ru().to_string(),
                total_sets: tally.total,
                direct_sets: tally.direct,
                percent_of_optimal: percent as u32,
                status,
            });
        }

        debug!(
            logs = logs.len(),
            level = %experience_level,
            unmapped_exercises = unmapped,
            undertrained = report.undertrained_muscles.len(),
            overtrained = report.overtrained_muscles.len(),
            "Weekly volume calculated"
        );

        report
    }
}

impl Default for VolumeTracker {
    fn default() -> Self {
        Self::new()
    }
}

/// Weekly volume with the default policy
pub fn calculate_weekly_volume(
    logs: &[WorkoutLog],
    experience_level: ExperienceLevel,
) -> WeeklyVolumeReport {
    VolumeTracker::new().calculate_weekly_volume(logs, experience_level)
}
