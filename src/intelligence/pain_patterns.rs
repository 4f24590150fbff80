// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Recurring pain locations mined from post-workout feedback

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use tracing::debug;

use super::muscle_map::normalize_name;
use crate::config::fitness_config::PainConfig;
use crate::models::WorkoutLog;

/// A body location that keeps showing up in pain reports
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PainPattern {
    /// Normalized body location
    pub location: String,
    /// Number of reports naming this location
    pub frequency: usize,
    /// Most frequently co-reported exercises, highest count first
    pub associated_exercises: Vec<String>,
    /// Mean reported intensity, when any report carried one
    pub average_intensity: Option<f64>,
}

#[derive(Default)]
struct LocationTally {
    frequency: usize,
    intensity_sum: u32,
    intensity_count: u32,
    exercises: HashMap<String, usize>,
}

/// Group pain reports by location and keep the ones reported often enough
///
/// A report names its exercise directly when the athlete picked one; otherwise
/// every working exercise in that workout is counted as associated.
pub fn analyze_pain_patterns(logs: &[WorkoutLog], config: &PainConfig) -> Vec<PainPattern> {
    // BTreeMap keeps equal-frequency locations in a stable order
    let mut tallies: BTreeMap<String, LocationTally> = BTreeMap::new();

    for log in logs {
        let Some(feedback) = &log.feedback else {
            continue;
        };

        for report in &feedback.pain {
            let location = normalize_name(&report.location);
            if location.is_empty() {
                continue;
            }

            let tally = tallies.entry(location).or_default();
            tally.frequency += 1;
            if let Some(intensity) = report.intensity {
                tally.intensity_sum += u32::from(intensity);
                tally.intensity_count += 1;
            }

            match report.exercise_name.as_deref().map(str::trim).filter(|n| !n.is_empty()) {
                Some(name) => *tally.exercises.entry(name.to_string()).or_default() += 1,
                None => {
                    for exercise in log.completed_exercises.iter().filter(|e| !e.is_warmup) {
                        *tally.exercises.entry(exercise.name.clone()).or_default() += 1;
                    }
                }
            }
        }
    }

    let mut patterns: Vec<PainPattern> = tallies
        .into_iter()
        .filter(|(_, tally)| tally.frequency >= config.min_frequency)
        .map(|(location, tally)| {
            let mut exercises: Vec<(String, usize)> = tally.exercises.into_iter().collect();
            exercises.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

            PainPattern {
                location,
                frequency: tally.frequency,
                associated_exercises: exercises
                    .into_iter()
                    .take(config.max_associated_exercises)
                    .map(|(name, _)| name)
                    .collect(),
                average_intensity: (tally.intensity_count > 0)
                    .then(|| f64::from(tally.intensity_sum) / f64::from(tally.intensity_count)),
            }
        })
        .collect();

    patterns.sort_by(|a, b| b.frequency.cmp(&a.frequency));

    debug!(logs = logs.len(), patterns = patterns.len(), "Pain patterns analyzed");
    patterns
}
