// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! End-to-end capability snapshot workflows
//!
//! These tests go from raw workout history through every engine to the
//! suggested weights and the rendered prompt text.

use chrono::{DateTime, Duration, TimeZone, Utc};
use strength_capabilities::config::FitnessConfig;
use strength_capabilities::intelligence::prompt_formatter::{
    BEST_LIFTS_HEADER, IMBALANCE_HEADER, PAIN_HEADER, STRENGTH_HEADER, VOLUME_HEADER,
};
use strength_capabilities::intelligence::{
    create_capabilities_snapshot, format_capabilities_for_ai, get_suggested_weight, CapabilitySnapshotBuilder,
    MuscleGroup, PromptFormatter, WeightSync,
};
use strength_capabilities::models::{
    CompletedExercise, CompletedSet, ExerciseType, ExperienceLevel, Gender, OnboardingProfile, PainReport,
    ProgramExercise, ProgramSession, TrainingProgram, WorkoutFeedback, WorkoutLog,
};

fn intermediate_profile() -> OnboardingProfile {
    OnboardingProfile {
        gender: Gender::Male,
        age: Some(32),
        weight: 82.0,
        height: Some(178.0),
        experience_level: ExperienceLevel::Intermediate,
        goals: vec!["hypertrophy".to_string()],
        training_days_per_week: Some(4),
        preferred_days: vec!["mon".to_string(), "thu".to_string()],
    }
}

fn program_exercise(name: &str, sets: u32) -> ProgramExercise {
    ProgramExercise {
        name: name.to_string(),
        exercise_type: ExerciseType::Strength,
        sets,
        reps: "8-10".to_string(),
        rest: "120s".to_string(),
        weight: None,
        is_warmup: false,
    }
}

fn bench_program() -> TrainingProgram {
    TrainingProgram {
        name: Some("Push/Pull".to_string()),
        sessions: vec![
            ProgramSession {
                name: "Push".to_string(),
                exercises: vec![program_exercise("Bench Press", 3), program_exercise("Overhead Press", 3)],
            },
            ProgramSession {
                name: "Pull".to_string(),
                exercises: vec![program_exercise("Barbell Row", 3)],
            },
        ],
    }
}

fn day(n: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, 18, 30, 0).unwrap() + Duration::days(n)
}

fn workout(n: i64, exercises: Vec<CompletedExercise>) -> WorkoutLog {
    WorkoutLog {
        date: day(n),
        completed_exercises: exercises,
        duration_minutes: Some(60),
        feedback: None,
    }
}

fn sets(weight: f64, reps: u32, count: usize) -> Vec<CompletedSet> {
    (0..count).map(|_| CompletedSet::done(weight, reps)).collect()
}

#[test]
fn test_bench_press_scenario() {
    let logs = vec![workout(0, vec![CompletedExercise::working("Bench Press", sets(80.0, 8, 1))])];

    let snapshot = create_capabilities_snapshot(&intermediate_profile(), &bench_program(), &logs);

    let best = &snapshot.best_lifts["bench press"];
    assert_eq!(best.e1rm, 101.0);
    assert_eq!(get_suggested_weight(&snapshot, "Bench Press"), Some(80.0));
    assert_eq!(get_suggested_weight(&snapshot, "Overhead Press"), None);
    assert!(snapshot.has_insufficient_data);
}

#[test]
fn test_recent_window_bounds_volume_but_not_strength() {
    // A heavy squat long ago, then eight bench-only sessions
    let mut logs = vec![workout(0, vec![CompletedExercise::working("Squat", sets(140.0, 3, 3))])];
    for n in 1..=8 {
        logs.push(workout(
            n * 2,
            vec![CompletedExercise::working("Bench Press", sets(70.0, 8, 3))],
        ));
    }

    let snapshot = create_capabilities_snapshot(&intermediate_profile(), &bench_program(), &logs);

    assert_eq!(snapshot.recent_logs.len(), 6);
    assert!(!snapshot.has_insufficient_data);
    assert!(snapshot.recent_logs.windows(2).all(|w| w[0].date >= w[1].date));

    // Squat is outside the volume window
    let quads = snapshot.volume_report.muscle(MuscleGroup::Quads).unwrap();
    assert_eq!(quads.total_sets, 0.0);
    let chest = snapshot.volume_report.muscle(MuscleGroup::Chest).unwrap();
    assert_eq!(chest.direct_sets, 18);

    // but still counts for strength
    assert!(snapshot
        .strength_analysis
        .lifts
        .iter()
        .any(|lift| lift.best.exercise_name == "Squat" && lift.best.weight == 140.0));
}

#[test]
fn test_suggested_weights_are_plate_multiples() {
    let mut logs = Vec::new();
    for (n, (weight, reps)) in [(62.5, 7), (71.0, 5), (83.0, 3), (57.5, 12)].into_iter().enumerate() {
        logs.push(workout(
            n as i64,
            vec![
                CompletedExercise::working("Bench Press", sets(weight, reps, 1)),
                CompletedExercise::working("Barbell Row", sets(weight - 7.5, reps + 1, 1)),
            ],
        ));
    }

    let snapshot = create_capabilities_snapshot(&intermediate_profile(), &bench_program(), &logs);
    for name in ["Bench Press", "Barbell Row"] {
        let suggested = get_suggested_weight(&snapshot, name).unwrap();
        let plates = suggested / 2.5;
        assert_eq!(plates, plates.round(), "{name} suggested {suggested}");
    }
}

#[test]
fn test_synced_program_uses_latest_weights() {
    let logs = vec![
        workout(0, vec![CompletedExercise::working("Bench Press", sets(75.0, 8, 3))]),
        workout(3, vec![CompletedExercise::working("bench press", sets(77.5, 8, 3))]),
    ];

    let program = bench_program();
    let snapshot = create_capabilities_snapshot(&intermediate_profile(), &program, &logs);

    assert_eq!(snapshot.synced_program.sessions[0].exercises[0].weight, Some(77.5));
    assert_eq!(snapshot.synced_program.sessions[0].exercises[1].weight, None);
    assert_eq!(snapshot.program, program);
}

#[test]
fn test_custom_weight_sync_collaborator() {
    struct FixedWeights;
    impl WeightSync for FixedWeights {
        fn sync_weights(&self, program: &TrainingProgram, _logs: &[WorkoutLog]) -> TrainingProgram {
            let mut synced = program.clone();
            for exercise in synced.sessions.iter_mut().flat_map(|s| s.exercises.iter_mut()) {
                exercise.weight = Some(20.0);
            }
            synced
        }
    }

    let builder = CapabilitySnapshotBuilder::new().with_weight_sync(Box::new(FixedWeights));
    let snapshot = builder.build(&intermediate_profile(), &bench_program(), &[]);

    assert!(snapshot
        .synced_program
        .exercises()
        .all(|exercise| exercise.weight == Some(20.0)));
}

#[test]
fn test_pain_and_overtraining_flags() {
    let sore_knee = WorkoutFeedback {
        difficulty: Some(8),
        pain: vec![PainReport {
            location: "knee".to_string(),
            intensity: Some(5),
            exercise_name: Some("Squat".to_string()),
        }],
        notes: None,
    };

    let logs: Vec<WorkoutLog> = (0..3)
        .map(|n| WorkoutLog {
            feedback: Some(sore_knee.clone()),
            ..workout(n, vec![CompletedExercise::working("Bicep Curl", sets(15.0, 12, 8))])
        })
        .collect();

    let snapshot = create_capabilities_snapshot(&intermediate_profile(), &bench_program(), &logs);

    assert!(snapshot.has_pain_concerns);
    assert_eq!(snapshot.pain_patterns[0].location, "knee");
    assert_eq!(snapshot.has_overtraining, vec![MuscleGroup::Biceps]);
    assert!(snapshot.needs_more_volume.contains(&MuscleGroup::Chest));
}

#[test]
fn test_prompt_for_empty_snapshot() {
    let snapshot = create_capabilities_snapshot(&intermediate_profile(), &TrainingProgram::default(), &[]);
    let prompt = format_capabilities_for_ai(&snapshot);

    assert!(prompt.starts_with(VOLUME_HEADER));
    assert!(prompt.contains("insufficient recent data"));

    let positions: Vec<usize> = [VOLUME_HEADER, STRENGTH_HEADER, BEST_LIFTS_HEADER, PAIN_HEADER, IMBALANCE_HEADER]
        .iter()
        .map(|header| prompt.find(header).unwrap())
        .collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn test_prompt_sections_are_capped() {
    let names = [
        "Bench Press", "Squat", "Deadlift", "Overhead Press", "Barbell Row", "Pull-Up", "Leg Press", "Hip Thrust",
    ];
    let logs: Vec<WorkoutLog> = (0..6)
        .map(|n| {
            workout(
                n,
                names
                    .iter()
                    .map(|name| CompletedExercise::working(*name, sets(50.0 + n as f64, 5, 1)))
                    .collect(),
            )
        })
        .collect();

    let snapshot = create_capabilities_snapshot(&intermediate_profile(), &bench_program(), &logs);
    assert_eq!(snapshot.strength_analysis.lifts.len(), names.len());

    let prompt = format_capabilities_for_ai(&snapshot);
    let strength_section = &prompt[prompt.find(STRENGTH_HEADER).unwrap()..prompt.find(BEST_LIFTS_HEADER).unwrap()];
    assert_eq!(strength_section.lines().filter(|line| line.starts_with("- ")).count(), 5);
}

#[test]
fn test_prompt_respects_max_length() {
    let mut config = FitnessConfig::default();
    config.intelligence.prompt.max_chars = 120;

    let logs = vec![workout(0, vec![CompletedExercise::working("Bench Press", sets(80.0, 8, 3))])];
    let snapshot = CapabilitySnapshotBuilder::with_config(config.clone()).build(
        &intermediate_profile(),
        &bench_program(),
        &logs,
    );

    let prompt = PromptFormatter::with_config(config).format(&snapshot);
    assert!(prompt.chars().count() <= 120);
    assert!(prompt.starts_with(VOLUME_HEADER));
}
