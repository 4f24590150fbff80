// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! # Intelligence Module
//!
//! Training-capability analytics over a workout history.
//!
//! This module includes:
//! - Weekly per-muscle volume tracking
//! - Strength analysis (E1RM, best lifts, tiers, imbalances, pain patterns)
//! - Mesocycle phase scaling of a static program
//! - Readiness-driven workout adaptation
//! - The capability snapshot aggregator and its prompt formatter
//!
//! Every engine is synchronous and pure over borrowed inputs. Derived
//! programs and sessions are always new values; inputs are never mutated.

pub mod capabilities;
pub mod mesocycle;
pub mod muscle_map;
pub mod pain_patterns;
pub mod prompt_formatter;
pub mod recovery_adaptation;
pub mod strength_analyzer;
pub mod volume_tracker;
pub mod weight_sync;

pub use capabilities::{
    create_capabilities_snapshot, get_suggested_weight, CapabilitySnapshot, CapabilitySnapshotBuilder,
    SnapshotCache, SnapshotKey,
};
pub use mesocycle::{get_program_for_current_phase, MesocyclePhase, MesocycleState, PhaseScheduler, WeeksPerPhase};
pub use muscle_map::{MovementPattern, MuscleGroup};
pub use pain_patterns::PainPattern;
pub use prompt_formatter::{format_capabilities_for_ai, PromptFormatter};
pub use recovery_adaptation::{Adaptation, AdaptationReason, InsightType, RecoveryAdaptationEngine, RecoveryInsight};
pub use strength_analyzer::{
    calculate_e1rm, BestLift, Imbalance, ImbalanceSeverity, LiftStrength, StrengthAnalysis, StrengthAnalyzer,
    StrengthLevel,
};
pub use volume_tracker::{calculate_weekly_volume, MuscleVolume, VolumeStatus, VolumeTracker, WeeklyVolumeReport};
pub use weight_sync::{HistoryWeightSync, WeightSync};

/// Round to the nearest multiple of `increment` (e.g. the smallest plate pair)
///
/// A non-positive or non-finite increment leaves the value unrounded.
pub fn round_to_increment(value: f64, increment: f64) -> f64 {
    if !increment.is_finite() || increment <= 0.0 {
        return value;
    }
    (value / increment).round() * increment
}
