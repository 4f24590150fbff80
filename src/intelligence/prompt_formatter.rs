// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Plain-text rendering of a capability snapshot for prompt injection

use std::fmt::Write;

use super::capabilities::CapabilitySnapshot;
use super::muscle_map::MuscleGroup;
use super::volume_tracker::WeeklyVolumeReport;
use crate::config::fitness_config::PromptConfig;
use crate::config::FitnessConfig;

pub const VOLUME_HEADER: &str = "## Training volume";
pub const STRENGTH_HEADER: &str = "## Strength";
pub const BEST_LIFTS_HEADER: &str = "## Best lifts";
pub const PAIN_HEADER: &str = "## Pain reports";
pub const IMBALANCE_HEADER: &str = "## Muscle imbalances";

pub struct PromptFormatter {
    config: FitnessConfig,
}

impl PromptFormatter {
    pub fn new() -> Self {
        Self {
            config: FitnessConfig::default(),
        }
    }

    pub fn with_config(config: FitnessConfig) -> Self {
        Self { config }
    }

    fn caps(&self) -> &PromptConfig {
        &self.config.intelligence.prompt
    }

    /// Sections in fixed order, each capped, whole text bounded in length
    pub fn format(&self, snapshot: &CapabilitySnapshot) -> String {
        let mut out = String::new();
        self.write_volume(&mut out, snapshot);
        self.write_strength(&mut out, snapshot);
        self.write_best_lifts(&mut out, snapshot);
        self.write_pain(&mut out, snapshot);
        self.write_imbalances(&mut out, snapshot);

        truncate_chars(out.trim_end(), self.caps().max_chars)
    }

    fn write_volume(&self, out: &mut String, snapshot: &CapabilitySnapshot) {
        let report = &snapshot.volume_report;
        let _ = writeln!(out, "{VOLUME_HEADER}");
        let _ = writeln!(
            out,
            "Experience: {}, recent workouts analyzed: {}",
            snapshot.profile.experience_level,
            snapshot.recent_logs.len()
        );
        if snapshot.has_insufficient_data {
            let _ = writeln!(
                out,
                "Warning: insufficient recent data ({} workouts), treat volume figures as rough",
                snapshot.recent_logs.len()
            );
        }

        if report.muscles.iter().all(|m| m.total_sets == 0.0) {
            let _ = writeln!(out, "No training volume recorded");
        } else {
            self.write_muscle_list(out, "Undertrained", &report.undertrained_muscles, report);
            self.write_muscle_list(out, "Overtrained", &report.overtrained_muscles, report);
            if report.undertrained_muscles.is_empty() && report.overtrained_muscles.is_empty() {
                let _ = writeln!(out, "All muscle groups within optimal range");
            }
        }
        out.push('\n');
    }

    fn write_muscle_list(&self, out: &mut String, label: &str, muscles: &[MuscleGroup], report: &WeeklyVolumeReport) {
        if muscles.is_empty() {
            return;
        }
        let items: Vec<String> = muscles
            .iter()
            .take(self.caps().max_volume_muscles)
            .filter_map(|muscle| report.muscle(*muscle))
            .map(|volume| {
                format!(
                    "{} ({:.1} sets, {}%)",
                    volume.muscle_id, volume.total_sets, volume.percent_of_optimal
                )
            })
            .collect();
        let _ = writeln!(out, "{label}: {}", items.join(", "));
    }

    fn write_strength(&self, out: &mut String, snapshot: &CapabilitySnapshot) {
        let _ = writeln!(out, "{STRENGTH_HEADER}");
        let lifts = &snapshot.strength_analysis.lifts;
        if lifts.is_empty() {
            let _ = writeln!(out, "No strength data");
        }
        for lift in lifts.iter().take(self.caps().max_strength_lifts) {
            let mut line = format!("- {}: E1RM {}", lift.best.exercise_name, format_kg(lift.best.e1rm));
            if let (Some(ratio), Some(level)) = (lift.bodyweight_ratio, lift.level) {
                let _ = write!(line, " ({ratio:.2}x bodyweight, {})", level.label());
            }
            let _ = writeln!(out, "{line}");
        }
        out.push('\n');
    }

    fn write_best_lifts(&self, out: &mut String, snapshot: &CapabilitySnapshot) {
        let _ = writeln!(out, "{BEST_LIFTS_HEADER}");
        if snapshot.best_lifts.is_empty() {
            let _ = writeln!(out, "No best lifts recorded for programmed exercises");
        }
        for (name, best) in snapshot.best_lifts.iter().take(self.caps().max_best_lifts) {
            let _ = writeln!(
                out,
                "- {name}: {} x {} (E1RM {}, {})",
                format_kg(best.weight),
                best.reps,
                format_kg(best.e1rm),
                best.date.format("%Y-%m-%d")
            );
        }
        out.push('\n');
    }

    fn write_pain(&self, out: &mut String, snapshot: &CapabilitySnapshot) {
        let _ = writeln!(out, "{PAIN_HEADER}");
        if snapshot.pain_patterns.is_empty() {
            let _ = writeln!(out, "No recurring pain reported");
        }
        for pattern in snapshot.pain_patterns.iter().take(self.caps().max_pain_patterns) {
            let mut line = format!("- {}: reported {} times", pattern.location, pattern.frequency);
            if !pattern.associated_exercises.is_empty() {
                let _ = write!(line, ", during {}", pattern.associated_exercises.join(", "));
            }
            let _ = writeln!(out, "{line}");
        }
        out.push('\n');
    }

    fn write_imbalances(&self, out: &mut String, snapshot: &CapabilitySnapshot) {
        let _ = writeln!(out, "{IMBALANCE_HEADER}");
        if snapshot.imbalances.is_empty() {
            let _ = writeln!(out, "No imbalances detected");
        }
        for imbalance in snapshot.imbalances.iter().take(self.caps().max_imbalances) {
            let _ = writeln!(out, "- [{}] {}", imbalance.severity.label(), imbalance.description);
        }
    }
}

impl Default for PromptFormatter {
    fn default() -> Self {
        Self::new()
    }
}

/// Render a snapshot with the default caps
pub fn format_capabilities_for_ai(snapshot: &CapabilitySnapshot) -> String {
    PromptFormatter::new().format(snapshot)
}

fn format_kg(value: f64) -> String {
    if value.fract().abs() > f64::EPSILON {
        format!("{value:.1} kg")
    } else {
        format!("{value:.0} kg")
    }
}

fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_index, _)) => text[..byte_index].to_string(),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_respects_char_boundaries() {
        assert_eq!(truncate_chars("Грудь", 3), "Гру");
        assert_eq!(truncate_chars("short", 10), "short");
        assert_eq!(truncate_chars("", 0), "");
    }

    #[test]
    fn test_format_kg() {
        assert_eq!(format_kg(80.0), "80 kg");
        assert_eq!(format_kg(82.5), "82.5 kg");
    }
}
