// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! # Capability Snapshot
//!
//! One read-model that composes every engine over an athlete's history:
//! volume over the recent window, strength over the full history, best lifts
//! for each programmed exercise and a program with weights synced from logs.
//!
//! A snapshot is a value. Nothing is cached globally; callers that want
//! memoization own a [`SnapshotCache`] and decide when it is stale.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::muscle_map::{normalize_name, MuscleGroup};
use super::pain_patterns::PainPattern;
use super::round_to_increment;
use super::strength_analyzer::{BestLift, Imbalance, StrengthAnalysis, StrengthAnalyzer};
use super::volume_tracker::{VolumeTracker, WeeklyVolumeReport};
use super::weight_sync::{HistoryWeightSync, WeightSync};
use crate::config::FitnessConfig;
use crate::logging::AppLogger;
use crate::models::{OnboardingProfile, TrainingProgram, WorkoutLog};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CapabilitySnapshot {
    pub profile: OnboardingProfile,
    pub program: TrainingProgram,
    /// Newest first, bounded by the configured window
    pub recent_logs: Vec<WorkoutLog>,
    pub volume_report: WeeklyVolumeReport,
    pub strength_analysis: StrengthAnalysis,
    pub imbalances: Vec<Imbalance>,
    pub pain_patterns: Vec<PainPattern>,
    /// Keyed by normalized (lowercase) program exercise name
    pub best_lifts: BTreeMap<String, BestLift>,
    pub synced_program: TrainingProgram,
    pub has_insufficient_data: bool,
    pub needs_more_volume: Vec<MuscleGroup>,
    pub has_overtraining: Vec<MuscleGroup>,
    pub has_pain_concerns: bool,
}

/// Builds capability snapshots with a fixed configuration
pub struct CapabilitySnapshotBuilder {
    config: FitnessConfig,
    weight_sync: Box<dyn WeightSync>,
}

impl CapabilitySnapshotBuilder {
    pub fn new() -> Self {
        Self::with_config(FitnessConfig::default())
    }

    pub fn with_config(config: FitnessConfig) -> Self {
        Self {
            weight_sync: Box::new(HistoryWeightSync::with_config(config.clone())),
            config,
        }
    }

    /// Replace the weight-sync collaborator
    pub fn with_weight_sync(mut self, weight_sync: Box<dyn WeightSync>) -> Self {
        self.weight_sync = weight_sync;
        self
    }

    pub fn config(&self) -> &FitnessConfig {
        &self.config
    }

    pub fn build(
        &self,
        profile: &OnboardingProfile,
        program: &TrainingProgram,
        logs: &[WorkoutLog],
    ) -> CapabilitySnapshot {
        let settings = &self.config.intelligence.snapshot;

        let mut recent_logs = logs.to_vec();
        recent_logs.sort_by(|a, b| b.date.cmp(&a.date));
        recent_logs.truncate(settings.recent_log_window);

        let volume_report = VolumeTracker::with_config(self.config.clone())
            .calculate_weekly_volume(&recent_logs, profile.experience_level);

        // Strength records never expire: analyze the full history
        let strength = StrengthAnalyzer::with_config(self.config.clone());
        let strength_analysis = strength.analyze_strength(logs, profile.weight, profile.gender);
        let imbalances = strength.detect_imbalances(&strength_analysis);
        let pain_patterns = strength.analyze_pain_patterns(logs);

        let mut best_lifts = BTreeMap::new();
        for exercise in program.exercises() {
            let key = normalize_name(&exercise.name);
            if key.is_empty() || best_lifts.contains_key(&key) {
                continue;
            }
            if let Some(best) = strength.get_best_lift_for_exercise(&exercise.name, logs) {
                best_lifts.insert(key, best);
            }
        }

        let synced_program = self.weight_sync.sync_weights(program, logs);
        let has_insufficient_data = recent_logs.len() < settings.min_recent_logs;

        AppLogger::log_snapshot_built(logs.len(), recent_logs.len(), best_lifts.len(), has_insufficient_data);

        CapabilitySnapshot {
            profile: profile.clone(),
            program: program.clone(),
            needs_more_volume: volume_report.undertrained_muscles.clone(),
            has_overtraining: volume_report.overtrained_muscles.clone(),
            has_pain_concerns: !pain_patterns.is_empty(),
            recent_logs,
            volume_report,
            strength_analysis,
            imbalances,
            pain_patterns,
            best_lifts,
            synced_program,
            has_insufficient_data,
        }
    }

    /// Starting weight suggestion: a fraction of the best E1RM, rounded to
    /// the plate increment. `None` when there is no usable best lift.
    pub fn get_suggested_weight(&self, snapshot: &CapabilitySnapshot, exercise_name: &str) -> Option<f64> {
        let best = snapshot.best_lifts.get(&normalize_name(exercise_name))?;
        self.suggested_weight_for(best)
    }

    /// Suggested working weight for a single best lift
    pub fn suggested_weight_for(&self, best: &BestLift) -> Option<f64> {
        if !best.e1rm.is_finite() || best.e1rm <= 0.0 {
            return None;
        }
        let settings = &self.config.intelligence.snapshot;
        Some(round_to_increment(
            best.e1rm * settings.suggested_weight_fraction,
            settings.weight_increment_kg,
        ))
    }
}

impl Default for CapabilitySnapshotBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Snapshot with the default configuration and weight sync
pub fn create_capabilities_snapshot(
    profile: &OnboardingProfile,
    program: &TrainingProgram,
    logs: &[WorkoutLog],
) -> CapabilitySnapshot {
    CapabilitySnapshotBuilder::new().build(profile, program, logs)
}

pub fn get_suggested_weight(snapshot: &CapabilitySnapshot, exercise_name: &str) -> Option<f64> {
    CapabilitySnapshotBuilder::new().get_suggested_weight(snapshot, exercise_name)
}

/// Identity of the inputs a snapshot was built from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SnapshotKey {
    pub profile_version: u64,
    pub program_version: u64,
    pub log_count: usize,
}

/// Caller-owned memo holding the last snapshot and the key it was built for
#[derive(Debug, Default)]
pub struct SnapshotCache {
    entry: Option<(SnapshotKey, CapabilitySnapshot)>,
}

impl SnapshotCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached snapshot for `key`, rebuilding when the key changed
    pub fn get_or_build<F>(&mut self, key: SnapshotKey, build: F) -> &CapabilitySnapshot
    where
        F: FnOnce() -> CapabilitySnapshot,
    {
        if self.entry.as_ref().is_some_and(|(cached, _)| *cached != key) {
            self.entry = None;
        }
        let (_, snapshot) = self.entry.get_or_insert_with(|| (key, build()));
        snapshot
    }

    pub fn get(&self, key: &SnapshotKey) -> Option<&CapabilitySnapshot> {
        self.entry
            .as_ref()
            .filter(|(cached, _)| cached == key)
            .map(|(_, snapshot)| snapshot)
    }

    pub fn invalidate(&mut self) {
        self.entry = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        CompletedExercise, CompletedSet, ExerciseType, ExperienceLevel, Gender, ProgramExercise, ProgramSession,
    };
    use chrono::{Duration, TimeZone, Utc};

    fn profile() -> OnboardingProfile {
        OnboardingProfile {
            gender: Gender::Male,
            age: Some(30),
            weight: 80.0,
            height: Some(180.0),
            experience_level: ExperienceLevel::Intermediate,
            goals: vec!["strength".to_string()],
            training_days_per_week: Some(3),
            preferred_days: Vec::new(),
        }
    }

    fn program() -> TrainingProgram {
        TrainingProgram {
            name: None,
            sessions: vec![ProgramSession {
                name: "Full Body".to_string(),
                exercises: vec![ProgramExercise {
                    name: "Bench Press".to_string(),
                    exercise_type: ExerciseType::Strength,
                    sets: 3,
                    reps: "8".to_string(),
                    rest: "120s".to_string(),
                    weight: None,
                    is_warmup: false,
                }],
            }],
        }
    }

    fn log(days: i64, name: &str, weight: f64, reps: u32) -> WorkoutLog {
        WorkoutLog {
            date: Utc.with_ymd_and_hms(2024, 1, 1, 7, 0, 0).unwrap() + Duration::days(days),
            completed_exercises: vec![CompletedExercise::working(name, vec![CompletedSet::done(weight, reps)])],
            duration_minutes: None,
            feedback: None,
        }
    }

    #[test]
    fn test_suggested_weight_from_best_lift() {
        let snapshot = create_capabilities_snapshot(&profile(), &program(), &[log(0, "Bench Press", 80.0, 8)]);

        assert_eq!(snapshot.best_lifts["bench press"].e1rm, 101.0);
        assert_eq!(get_suggested_weight(&snapshot, "Bench Press"), Some(80.0));
        assert_eq!(get_suggested_weight(&snapshot, "Squat"), None);
        assert!(snapshot.has_insufficient_data);
        assert_eq!(snapshot.synced_program.sessions[0].exercises[0].weight, Some(80.0));
    }

    #[test]
    fn test_recent_window_is_newest_first() {
        let logs: Vec<WorkoutLog> = (0..10).map(|day| log(day, "Squat", 100.0, 5)).collect();
        let snapshot = create_capabilities_snapshot(&profile(), &program(), &logs);

        assert_eq!(snapshot.recent_logs.len(), 6);
        assert_eq!(snapshot.recent_logs[0].date, logs[9].date);
        assert_eq!(snapshot.recent_logs[5].date, logs[4].date);
        assert!(!snapshot.has_insufficient_data);
    }

    #[test]
    fn test_zero_e1rm_suggests_nothing() {
        let mut snapshot = create_capabilities_snapshot(&profile(), &program(), &[log(0, "Bench Press", 80.0, 8)]);
        if let Some(best) = snapshot.best_lifts.get_mut("bench press") {
            best.e1rm = 0.0;
        }
        assert_eq!(get_suggested_weight(&snapshot, "bench press"), None);
    }

    #[test]
    fn test_suggested_weight_for_lift_uses_config() {
        let best = StrengthAnalyzer::new()
            .get_best_lift_for_exercise("bench", &[log(0, "Bench Press", 80.0, 8)])
            .unwrap();
        assert_eq!(CapabilitySnapshotBuilder::new().suggested_weight_for(&best), Some(80.0));

        let mut config = FitnessConfig::default();
        config.intelligence.snapshot.suggested_weight_fraction = 0.7;
        config.intelligence.snapshot.weight_increment_kg = 5.0;
        // 101 * 0.7 = 70.7 -> 70
        assert_eq!(CapabilitySnapshotBuilder::with_config(config).suggested_weight_for(&best), Some(70.0));

        let unusable = BestLift { e1rm: f64::NAN, ..best };
        assert_eq!(CapabilitySnapshotBuilder::new().suggested_weight_for(&unusable), None);
    }

    #[test]
    fn test_snapshot_cache_rebuilds_on_key_change() {
        let mut cache = SnapshotCache::new();
        let logs = vec![log(0, "Bench Press", 80.0, 8)];
        let key = SnapshotKey {
            profile_version: 1,
            program_version: 1,
            log_count: logs.len(),
        };

        let mut builds = 0;
        cache.get_or_build(key, || {
            builds += 1;
            create_capabilities_snapshot(&profile(), &program(), &logs)
        });
        cache.get_or_build(key, || {
            builds += 1;
            create_capabilities_snapshot(&profile(), &program(), &logs)
        });
        assert_eq!(builds, 1);

        let next = SnapshotKey { log_count: 2, ..key };
        assert!(cache.get(&next).is_none());
        cache.get_or_build(next, || {
            builds += 1;
            create_capabilities_snapshot(&profile(), &program(), &logs)
        });
        assert_eq!(builds, 2);

        cache.invalidate();
        assert!(cache.get(&next).is_none());
    }
}
