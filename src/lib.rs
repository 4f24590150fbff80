// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! # Strength Capabilities
//!
//! Training-capability analytics and periodization for strength athletes.
//! Turns a history of completed workouts into a weekly per-muscle volume
//! report, strength progression with imbalance and pain-pattern detection,
//! mesocycle-scaled programs and readiness-adapted sessions, all composed
//! into one capability snapshot that can be rendered for an AI prompt.
//!
//! ## Features
//!
//! - **Volume tracking**: primary and secondary muscle credit per working set
//! - **Strength analysis**: Epley E1RM, best lifts, bodyweight-relative tiers
//! - **Periodization**: explicit mesocycle phase state machine
//! - **Recovery adaptation**: readiness-driven weight and set reductions
//! - **Configurable policy**: every threshold lives in TOML configuration
//!
//! ## Architecture
//!
//! - **Models**: input documents (workout logs, programs, profile, readiness)
//! - **Intelligence**: the synchronous, pure analytics engines
//! - **Config**: TOML policy thresholds and exercise aliases
//! - **Media cache**: opaque storage for approved exercise media
//!
//! ## Example Usage
//!
//! ```rust
//! use strength_capabilities::intelligence::{create_capabilities_snapshot, get_suggested_weight};
//! use strength_capabilities::models::{
//!     CompletedExercise, CompletedSet, ExperienceLevel, Gender, OnboardingProfile, TrainingProgram,
//!     WorkoutLog,
//! };
//!
//! let profile = OnboardingProfile {
//!     gender: Gender::Female,
//!     age: Some(28),
//!     weight: 62.0,
//!     height: Some(168.0),
//!     experience_level: ExperienceLevel::Beginner,
//!     goals: vec![],
//!     training_days_per_week: Some(3),
//!     preferred_days: vec![],
//! };
//! let logs = vec![WorkoutLog {
//!     date: chrono::Utc::now(),
//!     completed_exercises: vec![CompletedExercise::working(
//!         "Squat",
//!         vec![CompletedSet::done(60.0, 5)],
//!     )],
//!     duration_minutes: Some(45),
//!     feedback: None,
//! }];
//!
//! let snapshot = create_capabilities_snapshot(&profile, &TrainingProgram::default(), &logs);
//! assert!(snapshot.has_insufficient_data);
//! assert_eq!(snapshot.strength_analysis.lifts.len(), 1);
//! assert_eq!(get_suggested_weight(&snapshot, "Squat"), None);
//! ```

pub mod config;
pub mod constants;
pub mod errors;
pub mod intelligence;
pub mod logging;
pub mod media_cache;
pub mod models;
