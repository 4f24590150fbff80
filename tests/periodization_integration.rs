// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Mesocycle scaling and readiness adaptation applied to a real program

use chrono::NaiveDate;
use serde_json::json;
use strength_capabilities::intelligence::{
    get_program_for_current_phase, AdaptationReason, InsightType, MesocyclePhase, MesocycleState,
    RecoveryAdaptationEngine, WeeksPerPhase,
};
use strength_capabilities::models::{ReadinessData, TrainingProgram};

fn program() -> TrainingProgram {
    serde_json::from_value(json!({
        "name": "Upper/Lower",
        "sessions": [
            {
                "name": "Upper",
                "exercises": [
                    { "name": "Band Pull-Apart", "sets": 2, "reps": "15", "isWarmup": true },
                    { "name": "Bench Press", "sets": 3, "reps": "6-8", "rest": "180s", "weight": 80.0 },
                    { "name": "Barbell Row", "sets": 4, "reps": "8", "rest": "120s", "weight": 70.0 },
                    { "name": "Push-Up", "exerciseType": "bodyweight", "sets": 2, "reps": "AMRAP" }
                ]
            },
            {
                "name": "Lower",
                "exercises": [
                    { "name": "Squat", "sets": 5, "reps": "5", "rest": "240s", "weight": 120.0 }
                ]
            }
        ]
    }))
    .expect("program fixture should deserialize")
}

fn readiness(sleep_hours: f64, sleep_score: u8, recovery_score: f64) -> ReadinessData {
    ReadinessData {
        date: NaiveDate::from_ymd_opt(2024, 6, 3).unwrap(),
        sleep_hours,
        sleep_score,
        recovery_score,
        hrv_ms: Some(48.0),
        resting_heart_rate: Some(56),
    }
}

#[test]
fn test_full_mesocycle_rescales_sets() {
    let program = program();
    let scheduler = WeeksPerPhase::default();
    let mut state = MesocycleState::initialize();
    let mut bench_sets = Vec::new();

    // intro 1 + accumulation 3 + intensification 2 + deload 1 weeks
    for _ in 0..7 {
        let scaled = get_program_for_current_phase(&program, &state);
        bench_sets.push((state.phase, scaled.sessions[0].exercises[1].sets));
        state = state.end_week(&scheduler);
    }

    assert_eq!(
        bench_sets,
        vec![
            (MesocyclePhase::Intro, 2),
            (MesocyclePhase::Accumulation, 3),
            (MesocyclePhase::Accumulation, 3),
            (MesocyclePhase::Accumulation, 3),
            (MesocyclePhase::Intensification, 4),
            (MesocyclePhase::Intensification, 4),
            (MesocyclePhase::Deload, 2),
        ]
    );
    assert_eq!(state.phase, MesocyclePhase::Accumulation);
    assert_eq!(program.sessions[0].exercises[1].sets, 3);
}

#[test]
fn test_deload_keeps_at_least_one_set() {
    let scaled = get_program_for_current_phase(&program(), &MesocycleState::in_phase(MesocyclePhase::Deload));
    assert!(scaled.exercises().all(|exercise| exercise.sets >= 1));
    // 5 * 0.6 = 3
    assert_eq!(scaled.sessions[1].exercises[0].sets, 3);
}

#[test]
fn test_poor_sleep_adapts_session() {
    let engine = RecoveryAdaptationEngine::new();
    let data = readiness(4.5, 2, 70.0);
    let program = program();
    let upper = program.session("upper").unwrap();

    let adaptation = engine.calculate_adaptation(&data);
    assert_eq!(adaptation.weight_multiplier, 0.85);
    assert_eq!(adaptation.sets_to_remove, 2);
    assert_eq!(adaptation.reason, AdaptationReason::LowRecovery);

    let insight = engine.generate_insight(&data);
    assert_eq!(insight.insight_type, InsightType::Warning);
    assert_eq!(insight.adaptations.len(), 2);

    let adapted = engine.adapt_workout(upper, &data);
    // Warmup untouched
    assert_eq!(adapted.exercises[0], upper.exercises[0]);
    // 80 * 0.85 = 68 -> 67.5
    assert_eq!(adapted.exercises[1].weight, Some(67.5));
    assert_eq!(adapted.exercises[1].sets, 2);
    // 70 * 0.85 = 59.5 -> 60
    assert_eq!(adapted.exercises[2].weight, Some(60.0));
    assert_eq!(adapted.exercises[2].sets, 2);
    // Bodyweight stays unweighted
    assert_eq!(adapted.exercises[3].weight, None);
    assert_eq!(adapted.exercises[3].sets, 2);
}

#[test]
fn test_insight_serializes_with_type_tag() {
    let engine = RecoveryAdaptationEngine::new();
    let value = serde_json::to_value(engine.generate_insight(&readiness(8.0, 5, 92.0))).unwrap();

    assert_eq!(value["type"], "excellent");
    assert_eq!(value["adaptations"], json!([]));

    let adaptation = serde_json::to_value(engine.calculate_adaptation(&readiness(7.0, 3, 55.0))).unwrap();
    assert_eq!(adaptation["reason"], "moderate_recovery");
    assert_eq!(adaptation["setsToRemove"], 1);
}
