// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Strength progression: E1RM, best lifts, strength tiers and imbalances

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashMap;
use tracing::debug;

use super::muscle_map::{self, MovementPattern, MuscleGroup};
use super::pain_patterns::{self, PainPattern};
use crate::config::fitness_config::RatioBand;
use crate::config::FitnessConfig;
use crate::constants::strength::{EPLEY_DIVISOR, SINGLE_REP};
use crate::models::{Gender, WorkoutLog};

/// Estimated one-rep max using the Epley formula
///
/// A single is returned as-is; anything else is rounded to the nearest whole
/// unit. Non-positive or non-finite loads and zero reps estimate to `0.0`.
pub fn calculate_e1rm(weight: f64, reps: u32) -> f64 {
    if !weight.is_finite() || weight <= 0.0 || reps == 0 {
        return 0.0;
    }
    if reps == SINGLE_REP {
        return weight;
    }
    (weight * (1.0 + f64::from(reps) / EPLEY_DIVISOR)).round()
}

/// Best recorded set for an exercise
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BestLift {
    pub exercise_name: String,
    pub weight: f64,
    pub reps: u32,
    pub e1rm: f64,
    pub date: DateTime<Utc>,
}

impl BestLift {
    /// Ranking: higher E1RM, then heavier weight, then more recent
    fn rank(&self, other: &Self) -> Ordering {
        self.e1rm
            .total_cmp(&other.e1rm)
            .then_with(|| self.weight.total_cmp(&other.weight))
            .then_with(|| self.date.cmp(&other.date))
    }
}

/// Strength tier relative to bodyweight
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrengthLevel {
    Untrained,
    Beginner,
    Novice,
    Intermediate,
    Advanced,
    Elite,
}

impl StrengthLevel {
    const TIERS: [StrengthLevel; 6] = [
        Self::Untrained,
        Self::Beginner,
        Self::Novice,
        Self::Intermediate,
        Self::Advanced,
        Self::Elite,
    ];

    /// Highest tier whose minimum ratio has been reached
    pub fn classify(ratio: f64, thresholds: &[f64; 5]) -> Self {
        let reached = thresholds.iter().filter(|min| ratio >= **min).count();
        Self::TIERS[reached]
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Untrained => "untrained",
            Self::Beginner => "beginner",
            Self::Novice => "novice",
            Self::Intermediate => "intermediate",
            Self::Advanced => "advanced",
            Self::Elite => "elite",
        }
    }
}

/// Strength assessment for one lift
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LiftStrength {
    pub best: BestLift,
    pub pattern: Option<MovementPattern>,
    /// E1RM / bodyweight; absent when bodyweight is unknown
    pub bodyweight_ratio: Option<f64>,
    pub level: Option<StrengthLevel>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StrengthAnalysis {
    pub bodyweight: f64,
    pub gender: Gender,
    /// Sorted by E1RM, strongest first
    pub lifts: Vec<LiftStrength>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImbalanceSeverity {
    Mild,
    Moderate,
    Severe,
}

impl ImbalanceSeverity {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Mild => "mild",
            Self::Moderate => "moderate",
            Self::Severe => "severe",
        }
    }
}

/// Antagonist ratio outside its healthy band
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Imbalance {
    pub first: MovementPattern,
    pub second: MovementPattern,
    pub first_e1rm: f64,
    pub second_e1rm: f64,
    pub ratio: f64,
    pub expected: RatioBand,
    pub severity: ImbalanceSeverity,
    pub description: String,
}

/// Strength analyzer over a workout history
pub struct StrengthAnalyzer {
    config: FitnessConfig,
}

impl StrengthAnalyzer {
    pub fn new() -> Self {
        Self {
            config: FitnessConfig::default(),
        }
    }

    pub fn with_config(config: FitnessConfig) -> Self {
        Self { config }
    }

    /// Every scorable working set as a candidate, keyed by canonical name
    fn candidates<'a>(
        &'a self,
        logs: &'a [WorkoutLog],
    ) -> impl Iterator<Item = (String, BestLift)> + 'a {
        logs.iter().flat_map(move |log| {
            log.completed_exercises.iter().flat_map(move |exercise| {
                let canonical = self.config.canonical_exercise_name(&exercise.name);
                exercise.working_sets().filter_map(move |set| {
                    let (weight, reps) = set.load()?;
                    Some((
                        canonical.clone(),
                        BestLift {
                            exercise_name: exercise.name.clone(),
                            weight,
                            reps,
                            e1rm: calculate_e1rm(weight, reps),
                            date: log.date,
                        },
                    ))
                })
            })
        })
    }

    /// Best historical set whose exercise name contains `name`, case-insensitively
    pub fn get_best_lift_for_exercise(&self, name: &str, logs: &[WorkoutLog]) -> Option<BestLift> {
        let query = self.config.canonical_exercise_name(name);
        if query.is_empty() {
            return None;
        }

        self.candidates(logs)
            .filter(|(canonical, _)| canonical.contains(&query))
            .map(|(_, lift)| lift)
            .max_by(|a, b| a.rank(b))
    }

    /// Best lift and strength tier for every exercise with a scorable set
    pub fn analyze_strength(
        &self,
        logs: &[WorkoutLog],
        bodyweight: f64,
        gender: Gender,
    ) -> StrengthAnalysis {
        let mut best: HashMap<String, BestLift> = HashMap::new();
        for (canonical, lift) in self.candidates(logs) {
            let replace = best
                .get(&canonical)
                .map_or(true, |current| current.rank(&lift) == Ordering::Less);
            if replace {
                best.insert(canonical, lift);
            }
        }

        let known_bodyweight = bodyweight.is_finite() && bodyweight > 0.0;
        let mut lifts: Vec<LiftStrength> = best
            .into_iter()
            .map(|(canonical, lift)| {
                let profile = muscle_map::lookup(&canonical);
                let pattern = profile.and_then(|p| p.pattern);
                let lower_body = match (pattern, profile) {
                    (Some(pattern), _) => pattern.is_lower_body(),
                    (None, Some(profile)) => profile.primary.iter().any(|m| {
                        matches!(m, MuscleGroup::Quads | MuscleGroup::Hamstrings | MuscleGroup::Glutes)
                    }),
                    (None, None) => false,
                };

                let bodyweight_ratio = known_bodyweight.then(|| lift.e1rm / bodyweight);
                let level = bodyweight_ratio.map(|ratio| {
                    StrengthLevel::classify(
                        ratio,
                        self.config.intelligence.strength.thresholds(gender, lower_body),
                    )
                });

                LiftStrength {
                    best: lift,
                    pattern,
                    bodyweight_ratio,
                    level,
                }
            })
            .collect();

        lifts.sort_by(|a, b| {
            b.best
                .e1rm
                .total_cmp(&a.best.e1rm)
                .then_with(|| a.best.exercise_name.cmp(&b.best.exercise_name))
        });

        debug!(
            logs = logs.len(),
            lifts = lifts.len(),
            bodyweight_known = known_bodyweight,
            "Strength analysis complete"
        );

        StrengthAnalysis {
            bodyweight,
            gender,
            lifts,
        }
    }

    /// Compare antagonist movement patterns against their healthy bands
    pub fn detect_imbalances(&self, analysis: &StrengthAnalysis) -> Vec<Imbalance> {
        let bands = &self.config.intelligence.imbalance;

        let mut strongest: HashMap<MovementPattern, f64> = HashMap::new();
        for lift in &analysis.lifts {
            if let Some(pattern) = lift.pattern {
                let entry = strongest.entry(pattern).or_insert(0.0);
                *entry = entry.max(lift.best.e1rm);
            }
        }

        let pairs = [
            (MovementPattern::HorizontalPush, MovementPattern::HorizontalPull, bands.horizontal_push_pull),
            (MovementPattern::VerticalPush, MovementPattern::VerticalPull, bands.vertical_push_pull),
            (MovementPattern::KneeDominant, MovementPattern::HipDominant, bands.knee_hip),
        ];

        let mut imbalances = Vec::new();
        for (first, second, band) in pairs {
            let (Some(&first_e1rm), Some(&second_e1rm)) = (strongest.get(&first), strongest.get(&second))
            else {
                continue;
            };
            if first_e1rm <= 0.0 || second_e1rm <= 0.0 {
                continue;
            }

            let ratio = first_e1rm / second_e1rm;
            let deviation = if ratio < band.min {
                (band.min - ratio) / band.min
            } else if ratio > band.max {
                (ratio - band.max) / band.max
            } else {
                continue;
            };

            let severity = if deviation <= bands.mild_max_deviation {
                ImbalanceSeverity::Mild
            } else if deviation <= bands.moderate_max_deviation {
                ImbalanceSeverity::Moderate
            } else {
                ImbalanceSeverity::Severe
            };

            let (strong, weak) = if ratio > band.max { (first, second) } else { (second, first) };
            let description = format!(
                "{} strength outpaces {} (ratio {:.2}, expected {:.2}-{:.2})",
                strong.label(),
                weak.label(),
                ratio,
                band.min,
                band.max
            );

            imbalances.push(Imbalance {
                first,
                second,
                first_e1rm,
                second_e1rm,
                ratio,
                expected: band,
                severity,
                description,
            });
        }

        imbalances
    }

    /// Recurring pain locations and the exercises reported alongside them
    pub fn analyze_pain_patterns(&self, logs: &[WorkoutLog]) -> Vec<PainPattern> {
        pain_patterns::analyze_pain_patterns(logs, &self.config.intelligence.pain)
    }
}

impl Default for StrengthAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}
