// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use strength_capabilities::config::Config;
use strength_capabilities::intelligence::{
    get_program_for_current_phase, CapabilitySnapshot, CapabilitySnapshotBuilder,
    MesocyclePhase, MesocycleState, PromptFormatter, RecoveryAdaptationEngine, StrengthAnalyzer, VolumeTracker,
};
use strength_capabilities::logging::{self, AppLogger};
use strength_capabilities::media_cache::{media_cache_key, MediaCache, SqliteMediaCache};
use strength_capabilities::models::{ExperienceLevel, OnboardingProfile, ReadinessData, TrainingProgram, WorkoutLog};

#[derive(Parser, Debug)]
#[command(name = "strength-capabilities", author, version, about, long_about = None)]
struct Args {
    /// Path to a TOML config file
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Build a capability snapshot
    Snapshot {
        #[arg(long)]
        profile: PathBuf,
        #[arg(long)]
        program: PathBuf,
        #[arg(long)]
        logs: PathBuf,
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Weekly per-muscle volume over the given logs
    Volume {
        #[arg(long)]
        logs: PathBuf,
        #[arg(long, default_value = "intermediate")]
        level: ExperienceLevel,
    },
    /// Best recorded set for one exercise
    BestLift {
        #[arg(long)]
        logs: PathBuf,
        #[arg(long)]
        exercise: String,
    },
    /// Program scaled for a mesocycle phase
    Phase {
        #[arg(long)]
        program: PathBuf,
        #[arg(long)]
        phase: MesocyclePhase,
        /// Override the phase's default volume multiplier
        #[arg(long)]
        multiplier: Option<f64>,
        /// Advance to the following phase before scaling
        #[arg(long)]
        advance: bool,
    },
    /// Adapt one program session to today's readiness
    Adapt {
        #[arg(long)]
        program: PathBuf,
        #[arg(long)]
        session: String,
        #[arg(long)]
        readiness: PathBuf,
    },
    /// Approved exercise media cache
    Media {
        #[command(subcommand)]
        action: MediaAction,
    },
}

#[derive(Subcommand, Debug)]
enum MediaAction {
    Get {
        #[arg(long)]
        exercise: String,
    },
    Put {
        #[arg(long)]
        exercise: String,
        #[arg(long)]
        value: String,
    },
    Remove {
        #[arg(long)]
        exercise: String,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum OutputFormat {
    Text,
    Json,
    Prompt,
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content =
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("Failed to parse {}", path.display()))
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_snapshot_summary(snapshot: &CapabilitySnapshot) {
    println!(
        "Recent workouts: {}{}",
        snapshot.recent_logs.len(),
        if snapshot.has_insufficient_data { " (insufficient data)" } else { "" }
    );
    let ids = |muscles: &[strength_capabilities::intelligence::MuscleGroup]| {
        muscles.iter().map(|m| m.id()).collect::<Vec<_>>().join(", ")
    };
    println!("Needs more volume: {}", ids(&snapshot.needs_more_volume));
    println!("Overtraining: {}", ids(&snapshot.has_overtraining));
    for (name, best) in &snapshot.best_lifts {
        println!("Best {name}: {} kg x {} (E1RM {})", best.weight, best.reps, best.e1rm);
    }
    for imbalance in &snapshot.imbalances {
        println!("Imbalance [{}]: {}", imbalance.severity.label(), imbalance.description);
    }
    if snapshot.has_pain_concerns {
        for pattern in &snapshot.pain_patterns {
            println!("Pain: {} ({} reports)", pattern.location, pattern.frequency);
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    logging::init_from_env()?;

    let args = Args::parse();
    let config = Config::load(args.config.clone())?;
    AppLogger::log_config_loaded(
        args.config.as_deref().unwrap_or("default"),
        config.fitness.exercise_aliases.len(),
    );
    let fitness = config.fitness.clone();

    match args.command {
        Command::Snapshot {
            profile,
            program,
            logs,
            format,
        } => {
            let profile: OnboardingProfile = read_json(&profile)?;
            let program: TrainingProgram = read_json(&program)?;
            let logs: Vec<WorkoutLog> = read_json(&logs)?;

            let snapshot = CapabilitySnapshotBuilder::with_config(fitness.clone()).build(&profile, &program, &logs);
            match format {
                OutputFormat::Json => print_json(&snapshot)?,
                OutputFormat::Prompt => println!("{}", PromptFormatter::with_config(fitness).format(&snapshot)),
                OutputFormat::Text => print_snapshot_summary(&snapshot),
            }
        }
        Command::Volume { logs, level } => {
            let logs: Vec<WorkoutLog> = read_json(&logs)?;
            let report = VolumeTracker::with_config(fitness).calculate_weekly_volume(&logs, level);
            for muscle in &report.muscles {
                println!(
                    "{:<11} {:>5.1} sets ({:>2} direct) {:>4}% {:?}",
                    muscle.muscle_id.id(), muscle.total_sets, muscle.direct_sets, muscle.percent_of_optimal, muscle.status
                );
            }
        }
        Command::BestLift { logs, exercise } => {
            let logs: Vec<WorkoutLog> = read_json(&logs)?;
            let builder = CapabilitySnapshotBuilder::with_config(fitness.clone());
            match StrengthAnalyzer::with_config(fitness).get_best_lift_for_exercise(&exercise, &logs) {
                Some(best) => {
                    let suggested = builder
                        .suggested_weight_for(&best)
                        .map_or_else(|| "n/a".to_string(), |kg| format!("{kg} kg"));
                    println!(
                        "{}: {} kg x {} on {} (E1RM {}), suggested working weight {}",
                        best.exercise_name,
                        best.weight,
                        best.reps,
                        best.date.format("%Y-%m-%d"),
                        best.e1rm,
                        suggested
                    );
                }
                None => println!("No recorded sets for {exercise}"),
            }
        }
        Command::Phase {
            program,
            phase,
            multiplier,
            advance,
        } => {
            let program: TrainingProgram = read_json(&program)?;
            let mut state = MesocycleState::in_phase(phase);
            if advance {
                let next = state.advance();
                AppLogger::log_phase_transition(
                    state.phase.display_name(),
                    next.phase.display_name(),
                    next.volume_multiplier,
                );
                state = next;
            }
            if let Some(multiplier) = multiplier {
                state.volume_multiplier = multiplier;
            }
            info!(phase = %state.phase, multiplier = state.volume_multiplier, "Scaling program");
            print_json(&get_program_for_current_phase(&program, &state))?;
        }
        Command::Adapt {
            program,
            session,
            readiness,
        } => {
            let program: TrainingProgram = read_json(&program)?;
            let readiness: ReadinessData = read_json(&readiness)?;
            let session = program
                .session(&session)
                .with_context(|| format!("Session '{session}' not found in program"))?;

            let engine = RecoveryAdaptationEngine::with_config(fitness);
            let insight = engine.generate_insight(&readiness);
            let adaptation = engine.calculate_adaptation(&readiness);
            let adapted = engine.adapt_workout(session, &readiness);
            if !adaptation.is_identity() {
                AppLogger::log_workout_adapted(
                    &session.name,
                    adaptation.reason.as_str(),
                    adaptation.weight_multiplier,
                    adaptation.sets_to_remove,
                );
            }

            print_json(&serde_json::json!({
                "insight": insight,
                "adaptation": adaptation,
                "session": adapted,
            }))?;
        }
        Command::Media { action } => {
            let cache = SqliteMediaCache::new(&config.media_cache.database_url)
                .await
                .context("Failed to open media cache")?;
            match action {
                MediaAction::Get { exercise } => match cache.get(&media_cache_key(&exercise)).await? {
                    Some(value) => println!("{value}"),
                    None => println!("No approved media for {exercise}"),
                },
                MediaAction::Put { exercise, value } => {
                    let key = media_cache_key(&exercise);
                    cache.put(&key, &value).await?;
                    println!("Stored {key}");
                }
                MediaAction::Remove { exercise } => {
                    let key = media_cache_key(&exercise);
                    if cache.remove(&key).await? {
                        println!("Removed {key}");
                    } else {
                        println!("Nothing cached under {key}");
                    }
                }
            }
        }
    }

    Ok(())
}
