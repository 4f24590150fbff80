// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Static exercise → muscle group lookup

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::config::FitnessConfig;

/// Muscle groups tracked for weekly volume
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MuscleGroup {
    Chest,
    Back,
    Shoulders,
    Biceps,
    Triceps,
    Quads,
    Hamstrings,
    Glutes,
    Calves,
    Core,
}

impl MuscleGroup {
    pub const ALL: [MuscleGroup; 10] = [
        Self::Chest,
        Self::Back,
        Self::Shoulders,
        Self::Biceps,
        Self::Triceps,
        Self::Quads,
        Self::Hamstrings,
        Self::Glutes,
        Self::Calves,
        Self::Core,
    ];

    /// Stable identifier used in reports
    pub fn id(&self) -> &'static str {
        match self {
            Self::Chest => "chest",
            Self::Back => "back",
            Self::Shoulders => "shoulders",
            Self::Biceps => "biceps",
            Self::Triceps => "triceps",
            Self::Quads => "quads",
            Self::Hamstrings => "hamstrings",
            Self::Glutes => "glutes",
            Self::Calves => "calves",
            Self::Core => "core",
        }
    }

    /// Russian display name shown in the app
    pub fn name_ru(&self) -> &'static str {
        match self {
            Self::Chest => "Грудь",
            Self::Back => "Спина",
            Self::Shoulders => "Плечи",
            Self::Biceps => "Бицепс",
            Self::Triceps => "Трицепс",
            Self::Quads => "Квадрицепсы",
            Self::Hamstrings => "Бицепс бедра",
            Self::Glutes => "Ягодицы",
            Self::Calves => "Икры",
            Self::Core => "Кор",
        }
    }
}

impl std::fmt::Display for MuscleGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.id())
    }
}

/// Movement pattern, used to pair antagonists and pick strength tiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MovementPattern {
    HorizontalPush,
    HorizontalPull,
    VerticalPush,
    VerticalPull,
    KneeDominant,
    HipDominant,
}

impl MovementPattern {
    pub fn is_lower_body(&self) -> bool {
        matches!(self, Self::KneeDominant | Self::HipDominant)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::HorizontalPush => "horizontal push",
            Self::HorizontalPull => "horizontal pull",
            Self::VerticalPush => "vertical push",
            Self::VerticalPull => "vertical pull",
            Self::KneeDominant => "knee-dominant",
            Self::HipDominant => "hip-dominant",
        }
    }
}

/// Muscles an exercise trains
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExerciseProfile {
    pub primary: Vec<MuscleGroup>,
    pub secondary: Vec<MuscleGroup>,
    pub pattern: Option<MovementPattern>,
}

use MovementPattern as P;
use MuscleGroup as M;

fn entry(
    primary: &[MuscleGroup],
    secondary: &[MuscleGroup],
    pattern: Option<MovementPattern>,
) -> ExerciseProfile {
    ExerciseProfile {
        primary: primary.to_vec(),
        secondary: secondary.to_vec(),
        pattern,
    }
}

static EXERCISE_MAP: Lazy<HashMap<&'static str, ExerciseProfile>> = Lazy::new(|| {
    HashMap::from([
        // Horizontal push
        ("bench press", entry(&[M::Chest], &[M::Triceps, M::Shoulders], Some(P::HorizontalPush))),
        ("incline bench press", entry(&[M::Chest], &[M::Shoulders, M::Triceps], Some(P::HorizontalPush))),
        ("dumbbell press", entry(&[M::Chest], &[M::Triceps, M::Shoulders], Some(P::HorizontalPush))),
        ("push-up", entry(&[M::Chest], &[M::Triceps, M::Shoulders], Some(P::HorizontalPush))),
        ("dips", entry(&[M::Triceps, M::Chest], &[M::Shoulders], Some(P::HorizontalPush))),
        ("chest fly", entry(&[M::Chest], &[], None)),
        // Horizontal pull
        ("barbell row", entry(&[M::Back], &[M::Biceps], Some(P::HorizontalPull))),
        ("dumbbell row", entry(&[M::Back], &[M::Biceps], Some(P::HorizontalPull))),
        ("cable row", entry(&[M::Back], &[M::Biceps], Some(P::HorizontalPull))),
        ("seated row", entry(&[M::Back], &[M::Biceps], Some(P::HorizontalPull))),
        ("face pull", entry(&[M::Shoulders], &[M::Back], None)),
        // Vertical push
        ("overhead press", entry(&[M::Shoulders], &[M::Triceps], Some(P::VerticalPush))),
        ("shoulder press", entry(&[M::Shoulders], &[M::Triceps], Some(P::VerticalPush))),
        ("lateral raise", entry(&[M::Shoulders], &[], None)),
        // Vertical pull
        ("pull-up", entry(&[M::Back], &[M::Biceps], Some(P::VerticalPull))),
        ("lat pulldown", entry(&[M::Back], &[M::Biceps], Some(P::VerticalPull))),
        // Arms
        ("bicep curl", entry(&[M::Biceps], &[], None)),
        ("hammer curl", entry(&[M::Biceps], &[], None)),
        ("triceps extension", entry(&[M::Triceps], &[], None)),
        ("triceps pushdown", entry(&[M::Triceps], &[], None)),
        // Knee dominant
        ("squat", entry(&[M::Quads, M::Glutes], &[M::Hamstrings, M::Core], Some(P::KneeDominant))),
        ("front squat", entry(&[M::Quads], &[M::Glutes, M::Core], Some(P::KneeDominant))),
        ("leg press", entry(&[M::Quads], &[M::Glutes], Some(P::KneeDominant))),
        ("lunge", entry(&[M::Quads, M::Glutes], &[M::Hamstrings], Some(P::KneeDominant))),
        ("leg extension", entry(&[M::Quads], &[], None)),
        // Hip dominant
        ("deadlift", entry(&[M::Hamstrings, M::Glutes, M::Back], &[M::Quads, M::Core], Some(P::HipDominant))),
        ("romanian deadlift", entry(&[M::Hamstrings, M::Glutes], &[M::Back], Some(P::HipDominant))),
        ("hip thrust", entry(&[M::Glutes], &[M::Hamstrings], Some(P::HipDominant))),
        ("leg curl", entry(&[M::Hamstrings], &[], None)),
        // Accessories
        ("calf raise", entry(&[M::Calves], &[], None)),
        ("plank", entry(&[M::Core], &[], None)),
        ("crunch", entry(&[M::Core], &[], None)),
        ("hanging leg raise", entry(&[M::Core], &[], None)),
    ])
});

/// Trim, lowercase and collapse inner whitespace
pub fn normalize_name(name: &str) -> String {
    name.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Resolve an already-canonical exercise name
///
/// Exact match wins; otherwise the longest known name contained in the input
/// ("paused bench press" → "bench press"). Unknown names resolve to `None`.
pub fn lookup(canonical_name: &str) -> Option<&'static ExerciseProfile> {
    if let Some(profile) = EXERCISE_MAP.get(canonical_name) {
        return Some(profile);
    }

    EXERCISE_MAP
        .iter()
        .filter(|(key, _)| canonical_name.contains(*key))
        .max_by(|(a, _), (b, _)| a.len().cmp(&b.len()).then_with(|| b.cmp(a)))
        .map(|(_, profile)| profile)
}

/// Normalize a raw name through the configured aliases, then resolve it
pub fn resolve(config: &FitnessConfig, name: &str) -> Option<&'static ExerciseProfile> {
    lookup(&config.canonical_exercise_name(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_name() {
        assert_eq!(normalize_name("  Bench   Press "), "bench press");
        assert_eq!(normalize_name("ЖИМ ЛЕЖА"), "жим лежа");
    }

    #[test]
    fn test_exact_lookup() {
        let profile = lookup("bench press").unwrap();
        assert_eq!(profile.primary, vec![MuscleGroup::Chest]);
        assert!(profile.secondary.contains(&MuscleGroup::Triceps));
        assert_eq!(profile.pattern, Some(MovementPattern::HorizontalPush));
    }

    #[test]
    fn test_longest_substring_wins() {
        // Both "squat" and "front squat" are contained
        let profile = lookup("paused front squat").unwrap();
        assert_eq!(profile.primary, vec![MuscleGroup::Quads]);

        let profile = lookup("romanian deadlift with straps").unwrap();
        assert_eq!(profile.primary, vec![MuscleGroup::Hamstrings, MuscleGroup::Glutes]);
    }

    #[test]
    fn test_unknown_exercise_is_none() {
        assert!(lookup("underwater basket weaving").is_none());
    }

    #[test]
    fn test_resolve_uses_aliases() {
        let config = FitnessConfig::default();
        let profile = resolve(&config, "Жим лежа").unwrap();
        assert_eq!(profile.pattern, Some(MovementPattern::HorizontalPush));
    }

    #[test]
    fn test_muscle_names() {
        assert_eq!(MuscleGroup::Quads.id(), "quads");
        assert_eq!(MuscleGroup::Chest.name_ru(), "Грудь");
        assert_eq!(MuscleGroup::ALL.len(), 10);
    }
}
