// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! # Data Models
//!
//! In-process data contracts consumed and produced by the capability engine.
//! None of these types own a wire format; they derive serde so callers can
//! feed them from whatever capture flow or program generator they use.
//!
//! ## Design Principles
//!
//! - **Immutable templates**: [`TrainingProgram`] is never mutated by the
//!   engines, they always return derived copies
//! - **Tolerant inputs**: set entries may be missing weight or reps and are
//!   skipped rather than rejected
//! - **Serializable**: everything round-trips through JSON for the CLI
//!
//! ## Core Models
//!
//! - [`WorkoutLog`]: one completed workout with its exercises and feedback
//! - [`TrainingProgram`]: static program template made of sessions
//! - [`OnboardingProfile`]: athlete profile captured during onboarding
//! - [`ReadinessData`]: daily wearable/survey readiness snapshot

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A single completed workout
///
/// # Examples
///
/// ```rust
/// use strength_capabilities::models::{WorkoutLog, CompletedExercise, CompletedSet};
/// use chrono::Utc;
///
/// let log = WorkoutLog {
///     date: Utc::now(),
///     completed_exercises: vec![CompletedExercise::working(
///         "Bench Press",
///         vec![CompletedSet::done(80.0, 8)],
///     )],
///     duration_minutes: Some(55),
///     feedback: None,
/// };
/// assert_eq!(log.completed_exercises.len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutLog {
    /// When the workout was performed
    pub date: DateTime<Utc>,
    /// Exercises performed, in order
    #[serde(default)]
    pub completed_exercises: Vec<CompletedExercise>,
    /// Total workout duration in minutes
    #[serde(default, alias = "duration")]
    pub duration_minutes: Option<u32>,
    /// Post-workout feedback, including pain reports
    #[serde(default)]
    pub feedback: Option<WorkoutFeedback>,
}

/// Exercise as it was performed in a workout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletedExercise {
    pub name: String,
    #[serde(default)]
    pub exercise_type: ExerciseType,
    /// Planned set count
    #[serde(default)]
    pub sets: u32,
    /// Planned rep scheme, e.g. "8-10"
    #[serde(default)]
    pub reps: String,
    #[serde(default)]
    pub completed_sets: Vec<CompletedSet>,
    #[serde(default)]
    pub is_warmup: bool,
}

impl CompletedExercise {
    /// Working (non-warmup) strength exercise with the given sets
    pub fn working(name: impl Into<String>, completed_sets: Vec<CompletedSet>) -> Self {
        Self {
            name: name.into(),
            exercise_type: ExerciseType::Strength,
            sets: completed_sets.len() as u32,
            reps: String::new(),
            completed_sets,
            is_warmup: false,
        }
    }

    /// Completed sets that count toward volume and strength
    ///
    /// Warmup exercises yield nothing; unfinished sets are dropped.
    pub fn working_sets(&self) -> impl Iterator<Item = &CompletedSet> {
        let warmup = self.is_warmup;
        self.completed_sets
            .iter()
            .filter(move |set| !warmup && set.is_completed)
    }
}

/// One recorded set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletedSet {
    /// Load in kilograms; missing for malformed or bodyweight entries
    #[serde(default)]
    pub weight: Option<f64>,
    #[serde(default)]
    pub reps: Option<u32>,
    #[serde(default)]
    pub is_completed: bool,
}

impl CompletedSet {
    /// A completed set with both weight and reps recorded
    pub fn done(weight: f64, reps: u32) -> Self {
        Self {
            weight: Some(weight),
            reps: Some(reps),
            is_completed: true,
        }
    }

    /// Weight and reps when both are present and usable for E1RM
    pub fn load(&self) -> Option<(f64, u32)> {
        match (self.weight, self.reps) {
            (Some(weight), Some(reps)) if weight.is_finite() && weight > 0.0 && reps > 0 => {
                Some((weight, reps))
            }
            _ => None,
        }
    }
}

/// Broad exercise category
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExerciseType {
    #[default]
    Strength,
    Bodyweight,
    Cardio,
    Mobility,
}

/// Post-workout feedback
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutFeedback {
    /// Perceived session difficulty (1-10)
    #[serde(default)]
    pub difficulty: Option<u8>,
    #[serde(default)]
    pub pain: Vec<PainReport>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// A pain or discomfort report tied to a body location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PainReport {
    /// Body location, e.g. "lower back", "left knee"
    pub location: String,
    /// Pain intensity (1-10)
    #[serde(default)]
    pub intensity: Option<u8>,
    /// Exercise the athlete associated with the pain, if any
    #[serde(default)]
    pub exercise_name: Option<String>,
}

/// Static training program produced by an external program generator
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainingProgram {
    #[serde(default)]
    pub name: Option<String>,
    pub sessions: Vec<ProgramSession>,
}

impl TrainingProgram {
    /// Every exercise across all sessions, in program order
    pub fn exercises(&self) -> impl Iterator<Item = &ProgramExercise> {
        self.sessions.iter().flat_map(|session| session.exercises.iter())
    }

    /// Session lookup by case-insensitive name
    pub fn session(&self, name: &str) -> Option<&ProgramSession> {
        self.sessions
            .iter()
            .find(|session| session.name.eq_ignore_ascii_case(name.trim()))
    }
}

/// One session (training day) of a program
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgramSession {
    pub name: String,
    pub exercises: Vec<ProgramExercise>,
}

/// Prescribed exercise within a session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgramExercise {
    pub name: String,
    #[serde(default)]
    pub exercise_type: ExerciseType,
    pub sets: u32,
    /// Rep scheme, e.g. "8-10"
    pub reps: String,
    /// Rest between sets, e.g. "90s"
    #[serde(default)]
    pub rest: String,
    /// Working weight in kilograms
    #[serde(default)]
    pub weight: Option<f64>,
    #[serde(default)]
    pub is_warmup: bool,
}

/// Athlete profile captured at onboarding
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OnboardingProfile {
    pub gender: Gender,
    pub age: Option<u32>,
    /// Bodyweight in kilograms
    pub weight: f64,
    /// Height in centimeters
    pub height: Option<f64>,
    pub experience_level: ExperienceLevel,
    #[serde(default)]
    pub goals: Vec<String>,
    #[serde(default)]
    pub training_days_per_week: Option<u8>,
    #[serde(default)]
    pub preferred_days: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Male,
    Female,
}

/// Self-reported training experience
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExperienceLevel {
    Beginner,
    Intermediate,
    Advanced,
}

impl std::fmt::Display for ExperienceLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Beginner => write!(f, "beginner"),
            Self::Intermediate => write!(f, "intermediate"),
            Self::Advanced => write!(f, "advanced"),
        }
    }
}

impl std::str::FromStr for ExperienceLevel {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "beginner" => Ok(Self::Beginner),
            "intermediate" => Ok(Self::Intermediate),
            "advanced" => Ok(Self::Advanced),
            other => Err(format!("Unknown experience level: {other}")),
        }
    }
}

/// Daily readiness snapshot from a wearable or morning survey
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadinessData {
    pub date: NaiveDate,
    pub sleep_hours: f64,
    /// Subjective sleep quality (1-5)
    pub sleep_score: u8,
    /// Wearable recovery score (0-100)
    pub recovery_score: f64,
    #[serde(default)]
    pub hrv_ms: Option<f64>,
    #[serde(default)]
    pub resting_heart_rate: Option<u32>,
}
