// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! # Constants Module
//!
//! Policy constants used as configuration defaults, plus environment-based
//! lookups for the application edges. The analytics read these values through
//! [`crate::config::FitnessConfig`] so every threshold can be overridden.

/// Service identity
pub mod service {
    pub const SERVICE_NAME: &str = "strength-capabilities";
    pub const SERVICE_VERSION: &str = env!("CARGO_PKG_VERSION");
}

/// Environment-based configuration
pub mod env_config {
    use std::env;

    /// Path to a standalone fitness config file
    pub fn fitness_config_path() -> Option<String> {
        env::var("CAPABILITIES_FITNESS_CONFIG").ok()
    }

    /// Media cache database URL from environment or default
    pub fn media_cache_database_url() -> String {
        env::var("MEDIA_CACHE_DATABASE_URL")
            .unwrap_or_else(|_| super::media::DEFAULT_DATABASE_URL.to_string())
    }

    /// Get log level from environment or default
    pub fn log_level() -> String {
        env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string())
    }
}

/// Weekly volume policy
pub mod volume {
    /// Credit a primary muscle receives per working set
    pub const PRIMARY_CREDIT: f64 = 1.0;
    /// Credit a secondary muscle receives per working set
    pub const SECONDARY_CREDIT: f64 = 0.5;

    /// Optimal hard sets per muscle per week
    pub const OPTIMAL_SETS_BEGINNER: f64 = 10.0;
    pub const OPTIMAL_SETS_INTERMEDIATE: f64 = 14.0;
    pub const OPTIMAL_SETS_ADVANCED: f64 = 18.0;

    /// Percent-of-optimal boundaries
    pub const UNDER_PERCENT: f64 = 70.0;
    pub const OVER_PERCENT: f64 = 130.0;
}

/// Strength tiers expressed as E1RM / bodyweight minimums for
/// beginner, novice, intermediate, advanced and elite
pub mod strength {
    pub const MALE_UPPER: [f64; 5] = [0.5, 0.75, 1.0, 1.25, 1.5];
    pub const MALE_LOWER: [f64; 5] = [0.75, 1.0, 1.5, 2.0, 2.5];
    pub const FEMALE_UPPER: [f64; 5] = [0.25, 0.4, 0.6, 0.8, 1.0];
    pub const FEMALE_LOWER: [f64; 5] = [0.5, 0.75, 1.0, 1.5, 1.9];

    /// Reps at or below which Epley is not applied
    pub const SINGLE_REP: u32 = 1;
    /// Epley denominator
    pub const EPLEY_DIVISOR: f64 = 30.0;
}

/// Antagonist ratio bands
pub mod imbalance {
    pub const HORIZONTAL_PUSH_PULL: (f64, f64) = (0.8, 1.25);
    pub const VERTICAL_PUSH_PULL: (f64, f64) = (0.5, 1.0);
    pub const KNEE_HIP: (f64, f64) = (0.7, 1.0);

    /// Relative deviation cut-offs beyond a band bound
    pub const MILD_MAX_DEVIATION: f64 = 0.15;
    pub const MODERATE_MAX_DEVIATION: f64 = 0.30;
}

/// Pain pattern mining
pub mod pain {
    pub const MIN_FREQUENCY: usize = 2;
    pub const MAX_ASSOCIATED_EXERCISES: usize = 3;
}

/// Readiness thresholds
pub mod recovery {
    pub const SEVERE_SLEEP_HOURS: f64 = 5.0;
    pub const RESTED_SLEEP_HOURS: f64 = 7.0;
    pub const RESTED_SLEEP_SCORE: u8 = 4;
    pub const LOW_RECOVERY_SCORE: f64 = 40.0;
    pub const MODERATE_RECOVERY_SCORE: f64 = 65.0;
    pub const EXCELLENT_RECOVERY_SCORE: f64 = 80.0;

    pub const LOW_RECOVERY_WEIGHT_MULTIPLIER: f64 = 0.85;
    pub const LOW_RECOVERY_SETS_TO_REMOVE: u32 = 2;
    pub const MODERATE_RECOVERY_WEIGHT_MULTIPLIER: f64 = 0.95;
    pub const MODERATE_RECOVERY_SETS_TO_REMOVE: u32 = 1;

    /// Adapted sessions never drop below this many sets
    pub const MIN_ADAPTED_SETS: u32 = 2;
}

/// Mesocycle phase multipliers
pub mod mesocycle {
    pub const INTRO_MULTIPLIER: f64 = 0.7;
    pub const ACCUMULATION_MULTIPLIER: f64 = 1.0;
    pub const INTENSIFICATION_MULTIPLIER: f64 = 1.2;
    pub const DELOAD_MULTIPLIER: f64 = 0.6;

    /// Phase scaling never drops below this many sets
    pub const MIN_PHASE_SETS: u32 = 1;
}

/// Capability snapshot limits
pub mod snapshot {
    pub const RECENT_LOG_WINDOW: usize = 6;
    pub const MIN_RECENT_LOGS: usize = 3;
    pub const SUGGESTED_WEIGHT_FRACTION: f64 = 0.8;
    pub const WEIGHT_INCREMENT_KG: f64 = 2.5;
}

/// Prompt formatter caps
pub mod prompt {
    pub const MAX_VOLUME_MUSCLES: usize = 6;
    pub const MAX_STRENGTH_LIFTS: usize = 5;
    pub const MAX_BEST_LIFTS: usize = 8;
    pub const MAX_PAIN_PATTERNS: usize = 3;
    pub const MAX_IMBALANCES: usize = 3;
    pub const MAX_CHARS: usize = 4000;
}

/// Approved media cache
pub mod media {
    pub const KEY_PREFIX: &str = "exercise-media:";
    pub const DEFAULT_DATABASE_URL: &str = "sqlite:./data/media_cache.db";
    pub const TABLE_APPROVED_MEDIA: &str = "approved_media";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_thresholds_are_ascending() {
        for tiers in [
            strength::MALE_UPPER,
            strength::MALE_LOWER,
            strength::FEMALE_UPPER,
            strength::FEMALE_LOWER,
        ] {
            assert!(tiers.windows(2).all(|pair| pair[0] < pair[1]));
        }
    }

    #[test]
    fn test_volume_targets_scale_with_experience() {
        assert!(volume::OPTIMAL_SETS_BEGINNER < volume::OPTIMAL_SETS_INTERMEDIATE);
        assert!(volume::OPTIMAL_SETS_INTERMEDIATE < volume::OPTIMAL_SETS_ADVANCED);
        assert!(volume::UNDER_PERCENT < volume::OVER_PERCENT);
    }
}
