// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Day-of workout adaptation driven by readiness data

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::round_to_increment;
use crate::config::FitnessConfig;
use crate::constants::recovery::{
    LOW_RECOVERY_SETS_TO_REMOVE, LOW_RECOVERY_WEIGHT_MULTIPLIER, MIN_ADAPTED_SETS,
    MODERATE_RECOVERY_SETS_TO_REMOVE, MODERATE_RECOVERY_WEIGHT_MULTIPLIER,
};
use crate::models::{ProgramSession, ReadinessData};

/// Severity of a readiness insight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InsightType {
    /// Train light or rest
    Warning,
    /// Trim the session
    Caution,
    /// Train as planned
    Good,
    /// Well recovered
    Excellent,
}

/// Human-readable readiness summary shown before a session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecoveryInsight {
    #[serde(rename = "type")]
    pub insight_type: InsightType,
    pub title: String,
    pub subtitle: Option<String>,
    /// Concrete changes applied to today's session
    pub adaptations: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdaptationReason {
    LowRecovery,
    ModerateRecovery,
    GoodRecovery,
}

impl AdaptationReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::LowRecovery => "low_recovery",
            Self::ModerateRecovery => "moderate_recovery",
            Self::GoodRecovery => "good_recovery",
        }
    }
}

/// Session adjustment derived from readiness
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Adaptation {
    pub weight_multiplier: f64,
    pub sets_to_remove: u32,
    pub reason: AdaptationReason,
}

impl Adaptation {
    pub fn identity() -> Self {
        Self {
            weight_multiplier: 1.0,
            sets_to_remove: 0,
            reason: AdaptationReason::GoodRecovery,
        }
    }

    pub fn is_identity(&self) -> bool {
        self.sets_to_remove == 0 && (self.weight_multiplier - 1.0).abs() < f64::EPSILON
    }

    /// Short descriptions of what this adaptation changes
    pub fn describe(&self) -> Vec<String> {
        let mut changes = Vec::new();
        if (self.weight_multiplier - 1.0).abs() >= f64::EPSILON {
            let percent = ((1.0 - self.weight_multiplier) * 100.0).round();
            changes.push(format!("Reduce working weights by {percent}%"));
        }
        if self.sets_to_remove > 0 {
            let noun = if self.sets_to_remove == 1 { "set" } else { "sets" };
            changes.push(format!(
                "Remove {} {} per exercise (minimum {})",
                self.sets_to_remove, noun, MIN_ADAPTED_SETS
            ));
        }
        changes
    }
}

/// Maps readiness to insights and session adjustments
pub struct RecoveryAdaptationEngine {
    config: FitnessConfig,
}

impl RecoveryAdaptationEngine {
    pub fn new() -> Self {
        Self {
            config: FitnessConfig::default(),
        }
    }

    pub fn with_config(config: FitnessConfig) -> Self {
        Self { config }
    }

    /// Readiness insight; the first matching rule wins
    pub fn generate_insight(&self, readiness: &ReadinessData) -> RecoveryInsight {
        let thresholds = &self.config.intelligence.recovery;
        let adaptations = self.calculate_adaptation(readiness).describe();

        let (insight_type, title, subtitle) = if readiness.sleep_hours < thresholds.severe_sleep_hours {
            (
                InsightType::Warning,
                "Short on sleep".to_string(),
                Some(format!(
                    "Only {:.1} h of sleep. Keep today's session light.",
                    readiness.sleep_hours
                )),
            )
        } else if readiness.recovery_score < thresholds.low_recovery_score {
            (
                InsightType::Warning,
                "Low recovery".to_string(),
                Some(format!(
                    "Recovery at {:.0}%. Your body needs a lighter day.",
                    readiness.recovery_score
                )),
            )
        } else if readiness.recovery_score > thresholds.excellent_recovery_score {
            (
                InsightType::Excellent,
                "Fully recovered".to_string(),
                Some("Great day to push for a personal best.".to_string()),
            )
        } else if readiness.recovery_score >= thresholds.moderate_recovery_score {
            (
                InsightType::Good,
                "Ready to train".to_string(),
                Some("Train as planned.".to_string()),
            )
        } else {
            let rested = readiness.sleep_hours >= thresholds.rested_sleep_hours
                && readiness.sleep_score >= thresholds.rested_sleep_score;
            let subtitle = if rested {
                "You slept well, but your body is still recovering. Volume is trimmed slightly."
            } else {
                "Recovery is moderate and sleep was not great. Volume is trimmed slightly."
            };
            (
                InsightType::Caution,
                "Partially recovered".to_string(),
                Some(subtitle.to_string()),
            )
        };

        RecoveryInsight {
            insight_type,
            title,
            subtitle,
            adaptations,
        }
    }

    /// Three-tier adjustment, independent of insight messaging
    pub fn calculate_adaptation(&self, readiness: &ReadinessData) -> Adaptation {
        let thresholds = &self.config.intelligence.recovery;

        if readiness.sleep_hours < thresholds.severe_sleep_hours
            || readiness.recovery_score < thresholds.low_recovery_score
        {
            Adaptation {
                weight_multiplier: LOW_RECOVERY_WEIGHT_MULTIPLIER,
                sets_to_remove: LOW_RECOVERY_SETS_TO_REMOVE,
                reason: AdaptationReason::LowRecovery,
            }
        } else if readiness.recovery_score < thresholds.moderate_recovery_score {
            Adaptation {
                weight_multiplier: MODERATE_RECOVERY_WEIGHT_MULTIPLIER,
                sets_to_remove: MODERATE_RECOVERY_SETS_TO_REMOVE,
                reason: AdaptationReason::ModerateRecovery,
            }
        } else {
            Adaptation::identity()
        }
    }

    /// Apply today's adaptation to a session; warmups pass through untouched
    pub fn adapt_workout(&self, session: &ProgramSession, readiness: &ReadinessData) -> ProgramSession {
        let adaptation = self.calculate_adaptation(readiness);
        if adaptation.is_identity() {
            return session.clone();
        }

        let increment = self.config.intelligence.snapshot.weight_increment_kg;
        let mut adapted = session.clone();

        for exercise in adapted.exercises.iter_mut().filter(|e| !e.is_warmup) {
            exercise.weight = exercise
                .weight
                .map(|weight| round_to_increment(weight * adaptation.weight_multiplier, increment));

            let floor = MIN_ADAPTED_SETS.min(exercise.sets);
            exercise.sets = exercise.sets.saturating_sub(adaptation.sets_to_remove).max(floor);
        }

        debug!(
            session = %session.name,
            reason = adaptation.reason.as_str(),
            weight_multiplier = adaptation.weight_multiplier,
            sets_removed = adaptation.sets_to_remove,
            "Session adapted to readiness"
        );

        adapted
    }

    pub fn needs_adaptation(&self, readiness: &ReadinessData) -> bool {
        let thresholds = &self.config.intelligence.recovery;
        readiness.sleep_hours < thresholds.severe_sleep_hours
            || readiness.recovery_score < thresholds.moderate_recovery_score
    }
}

impl Default for RecoveryAdaptationEngine {
    fn default() -> Self {
        Self::new()
    }
}
