// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Fitness-specific configuration: exercise aliases and intelligence thresholds

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::constants;
use crate::errors::{CapabilityError, CapabilityResult};
use crate::intelligence::muscle_map::normalize_name;
use crate::intelligence::prompt_formatter::VOLUME_HEADER;
use crate::models::{ExperienceLevel, Gender};

/// Main fitness configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FitnessConfig {
    /// Alias → canonical exercise name, applied before every name join
    pub exercise_aliases: HashMap<String, String>,
    pub intelligence: IntelligenceConfig,
}

/// Intelligence analysis configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct IntelligenceConfig {
    pub volume: VolumeConfig,
    pub strength: StrengthStandards,
    pub imbalance: ImbalanceConfig,
    pub pain: PainConfig,
    pub recovery: RecoveryThresholds,
    pub snapshot: SnapshotConfig,
    pub prompt: PromptConfig,
}

/// Weekly volume targets and status boundaries
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VolumeConfig {
    pub primary_credit: f64,
    pub secondary_credit: f64,
    pub optimal_sets: OptimalSets,
    /// Below this percent of optimal a muscle is undertrained
    pub under_percent: f64,
    /// Above this percent of optimal a muscle is overtrained
    pub over_percent: f64,
}

/// Optimal weekly hard sets per muscle, by experience
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptimalSets {
    pub beginner: f64,
    pub intermediate: f64,
    pub advanced: f64,
}

impl VolumeConfig {
    pub fn optimal_for(&self, level: ExperienceLevel) -> f64 {
        match level {
            ExperienceLevel::Beginner => self.optimal_sets.beginner,
            ExperienceLevel::Intermediate => self.optimal_sets.intermediate,
            ExperienceLevel::Advanced => self.optimal_sets.advanced,
        }
    }
}

/// Strength tier thresholds (E1RM / bodyweight) per gender
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StrengthStandards {
    pub male: TierThresholds,
    pub female: TierThresholds,
}

/// Minimum ratios for beginner, novice, intermediate, advanced, elite
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TierThresholds {
    pub upper: [f64; 5],
    pub lower: [f64; 5],
}

impl StrengthStandards {
    pub fn thresholds(&self, gender: Gender, lower_body: bool) -> &[f64; 5] {
        let tiers = match gender {
            Gender::Male => &self.male,
            Gender::Female => &self.female,
        };
        if lower_body {
            &tiers.lower
        } else {
            &tiers.upper
        }
    }
}

/// Healthy ratio band between two movement patterns
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RatioBand {
    pub min: f64,
    pub max: f64,
}

impl From<(f64, f64)> for RatioBand {
    fn from((min, max): (f64, f64)) -> Self {
        Self { min, max }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ImbalanceConfig {
    pub horizontal_push_pull: RatioBand,
    pub vertical_push_pull: RatioBand,
    pub knee_hip: RatioBand,
    pub mild_max_deviation: f64,
    pub moderate_max_deviation: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PainConfig {
    pub min_frequency: usize,
    pub max_associated_exercises: usize,
}

/// Readiness thresholds used by recovery adaptation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RecoveryThresholds {
    pub severe_sleep_hours: f64,
    pub rested_sleep_hours: f64,
    pub rested_sleep_score: u8,
    pub low_recovery_score: f64,
    pub moderate_recovery_score: f64,
    pub excellent_recovery_score: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SnapshotConfig {
    pub recent_log_window: usize,
    pub min_recent_logs: usize,
    pub suggested_weight_fraction: f64,
    pub weight_increment_kg: f64,
}

/// Per-section item caps for the prompt formatter
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PromptConfig {
    pub max_volume_muscles: usize,
    pub max_strength_lifts: usize,
    pub max_best_lifts: usize,
    pub max_pain_patterns: usize,
    pub max_imbalances: usize,
    pub max_chars: usize,
}

impl FitnessConfig {
    /// Load fitness configuration from file or use defaults
    pub fn load(path: Option<String>) -> Result<Self> {
        // Try explicit path first
        if let Some(config_path) = path {
            return Self::load_from_file(&config_path);
        }

        if Path::new("fitness_config.toml").exists() {
            return Self::load_from_file("fitness_config.toml");
        }

        // Fall back to embedded defaults
        Ok(Self::default())
    }

    /// Load configuration from a specific file
    pub fn load_from_file(path: &str) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read fitness config file: {}", path))?;

        let config: FitnessConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse fitness config file: {}", path))?;

        config
            .validate()
            .with_context(|| format!("Invalid fitness config file: {}", path))?;

        Ok(config)
    }

    /// Normalize an exercise name and resolve configured aliases
    pub fn canonical_exercise_name(&self, name: &str) -> String {
        let normalized = normalize_name(name);
        self.exercise_aliases
            .iter()
            .filter(|(alias, _)| normalize_name(alias) == normalized)
            .map(|(_, canonical)| normalize_name(canonical))
            .min()
            .unwrap_or(normalized)
    }

    /// Reject thresholds that would make classification ambiguous
    pub fn validate(&self) -> CapabilityResult<()> {
        let intel = &self.intelligence;

        let sets = &intel.volume.optimal_sets;
        if sets.beginner <= 0.0 || sets.intermediate <= 0.0 || sets.advanced <= 0.0 {
            return Err(CapabilityError::InvalidConfig(
                "optimal weekly sets must be positive".to_string(),
            ));
        }
        if intel.volume.under_percent >= intel.volume.over_percent {
            return Err(CapabilityError::InvalidConfig(format!(
                "under_percent ({}) must be below over_percent ({})",
                intel.volume.under_percent, intel.volume.over_percent
            )));
        }

        for tiers in [
            &intel.strength.male.upper,
            &intel.strength.male.lower,
            &intel.strength.female.upper,
            &intel.strength.female.lower,
        ] {
            if !tiers.windows(2).all(|pair| pair[0] < pair[1]) {
                return Err(CapabilityError::InvalidConfig(format!(
                    "strength tiers must be strictly ascending: {:?}",
                    tiers
                )));
            }
        }

        for band in [
            intel.imbalance.horizontal_push_pull,
            intel.imbalance.vertical_push_pull,
            intel.imbalance.knee_hip,
        ] {
            if band.min <= 0.0 || band.min >= band.max {
                return Err(CapabilityError::InvalidConfig(format!(
                    "invalid ratio band {}..{}",
                    band.min, band.max
                )));
            }
        }

        let imbalance = &intel.imbalance;
        if imbalance.mild_max_deviation <= 0.0 || imbalance.mild_max_deviation > imbalance.moderate_max_deviation {
            return Err(CapabilityError::InvalidConfig(format!(
                "mild_max_deviation ({}) must be positive and at most moderate_max_deviation ({})",
                imbalance.mild_max_deviation, imbalance.moderate_max_deviation
            )));
        }

        let recovery = &intel.recovery;
        if recovery.low_recovery_score >= recovery.moderate_recovery_score
            || recovery.moderate_recovery_score > recovery.excellent_recovery_score
        {
            return Err(CapabilityError::InvalidConfig(format!(
                "recovery scores must satisfy low ({}) < moderate ({}) <= excellent ({})",
                recovery.low_recovery_score, recovery.moderate_recovery_score, recovery.excellent_recovery_score
            )));
        }

        let min_chars = VOLUME_HEADER.chars().count();
        if intel.prompt.max_chars < min_chars {
            return Err(CapabilityError::InvalidConfig(format!(
                "prompt max_chars ({}) must fit the volume header ({} chars)",
                intel.prompt.max_chars, min_chars
            )));
        }

        let mut aliases: HashMap<String, String> = HashMap::new();
        for (alias, canonical) in &self.exercise_aliases {
            let canonical = normalize_name(canonical);
            if let Some(existing) = aliases.insert(normalize_name(alias), canonical.clone()) {
                if existing != canonical {
                    return Err(CapabilityError::InvalidConfig(format!(
                        "alias '{}' resolves to both '{}' and '{}'",
                        alias, existing, canonical
                    )));
                }
            }
        }

        if intel.snapshot.weight_increment_kg <= 0.0 {
            return Err(CapabilityError::InvalidConfig(
                "weight_increment_kg must be positive".to_string(),
            ));
        }

        Ok(())
    }
}

impl Default for FitnessConfig {
    fn default() -> Self {
        let mut exercise_aliases = HashMap::new();

        exercise_aliases.insert("bb bench".to_string(), "bench press".to_string());
        exercise_aliases.insert("barbell bench press".to_string(), "bench press".to_string());
        exercise_aliases.insert("жим лежа".to_string(), "bench press".to_string());
        exercise_aliases.insert("back squat".to_string(), "squat".to_string());
        exercise_aliases.insert("приседания".to_string(), "squat".to_string());
        exercise_aliases.insert("становая тяга".to_string(), "deadlift".to_string());
        exercise_aliases.insert("rdl".to_string(), "romanian deadlift".to_string());
        exercise_aliases.insert("ohp".to_string(), "overhead press".to_string());
        exercise_aliases.insert("military press".to_string(), "overhead press".to_string());
        exercise_aliases.insert("подтягивания".to_string(), "pull-up".to_string());
        exercise_aliases.insert("chin-up".to_string(), "pull-up".to_string());

        Self {
            exercise_aliases,
            intelligence: IntelligenceConfig::default(),
        }
    }
}

impl Default for VolumeConfig {
    fn default() -> Self {
        Self {
            primary_credit: constants::volume::PRIMARY_CREDIT,
            secondary_credit: constants::volume::SECONDARY_CREDIT,
            optimal_sets: OptimalSets {
                beginner: constants::volume::OPTIMAL_SETS_BEGINNER,
                intermediate: constants::volume::OPTIMAL_SETS_INTERMEDIATE,
                advanced: constants::volume::OPTIMAL_SETS_ADVANCED,
            },
            under_percent: constants::volume::UNDER_PERCENT,
            over_percent: constants::volume::OVER_PERCENT,
        }
    }
}

impl Default for StrengthStandards {
    fn default() -> Self {
        Self {
            male: TierThresholds {
                upper: constants::strength::MALE_UPPER,
                lower: constants::strength::MALE_LOWER,
            },
            female: TierThresholds {
                upper: constants::strength::FEMALE_UPPER,
                lower: constants::strength::FEMALE_LOWER,
            },
        }
    }
}

impl Default for ImbalanceConfig {
    fn default() -> Self {
        Self {
            horizontal_push_pull: constants::imbalance::HORIZONTAL_PUSH_PULL.into(),
            vertical_push_pull: constants::imbalance::VERTICAL_PUSH_PULL.into(),
            knee_hip: constants::imbalance::KNEE_HIP.into(),
            mild_max_deviation: constants::imbalance::MILD_MAX_DEVIATION,
            moderate_max_deviation: constants::imbalance::MODERATE_MAX_DEVIATION,
        }
    }
}

impl Default for PainConfig {
    fn default() -> Self {
        Self {
            min_frequency: constants::pain::MIN_FREQUENCY,
            max_associated_exercises: constants::pain::MAX_ASSOCIATED_EXERCISES,
        }
    }
}

impl Default for RecoveryThresholds {
    fn default() -> Self {
        Self {
            severe_sleep_hours: constants::recovery::SEVERE_SLEEP_HOURS,
            rested_sleep_hours: constants::recovery::RESTED_SLEEP_HOURS,
            rested_sleep_score: constants::recovery::RESTED_SLEEP_SCORE,
            low_recovery_score: constants::recovery::LOW_RECOVERY_SCORE,
            moderate_recovery_score: constants::recovery::MODERATE_RECOVERY_SCORE,
            excellent_recovery_score: constants::recovery::EXCELLENT_RECOVERY_SCORE,
        }
    }
}

impl Default for SnapshotConfig {
    fn default() -> Self {
        Self {
            recent_log_window: constants::snapshot::RECENT_LOG_WINDOW,
            min_recent_logs: constants::snapshot::MIN_RECENT_LOGS,
            suggested_weight_fraction: constants::snapshot::SUGGESTED_WEIGHT_FRACTION,
            weight_increment_kg: constants::snapshot::WEIGHT_INCREMENT_KG,
        }
    }
}

impl Default for PromptConfig {
    fn default() -> Self {
        Self {
            max_volume_muscles: constants::prompt::MAX_VOLUME_MUSCLES,
            max_strength_lifts: constants::prompt::MAX_STRENGTH_LIFTS,
            max_best_lifts: constants::prompt::MAX_BEST_LIFTS,
            max_pain_patterns: constants::prompt::MAX_PAIN_PATTERNS,
            max_imbalances: constants::prompt::MAX_IMBALANCES,
            max_chars: constants::prompt::MAX_CHARS,
        }
    }
}
