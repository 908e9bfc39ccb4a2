// ABOUTME: Core data models for workout generation - preferences in, workouts out
// ABOUTME: Defines FitnessLevel, DurationBucket, Goal, Exercise and Workout structures
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitGPT

//! # Data Models
//!
//! This module contains the data structures flowing through the generation
//! pipeline: a validated [`WorkoutPreferences`] on the way in, a
//! [`Workout`] on the way out.
//!
//! ## Design Principles
//!
//! - **Validated at the boundary**: preference enums reject malformed input
//!   during deserialization instead of propagating loose maps through the
//!   pipeline. Equipment and focus-area tags stay free-form strings so new
//!   tags work without a code change.
//! - **Ids belong to storage**: the pipeline never assigns a workout id;
//!   `Workout::id` stays `None` until a store persists it.
//! - **Serializable**: wire format is camelCase JSON, matching what the
//!   model is instructed to produce.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// User fitness level driving intensity tuning
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FitnessLevel {
    /// Fewer sets and reps, more rest, simpler movements
    Beginner,
    /// Moderate volume mixing compound and isolation work
    Intermediate,
    /// Higher volume, complex movements, shorter rest
    Advanced,
}

impl FitnessLevel {
    /// All levels, in ascending order of intensity
    pub const ALL: [Self; 3] = [Self::Beginner, Self::Intermediate, Self::Advanced];

    /// Wire identifier
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Beginner => "beginner",
            Self::Intermediate => "intermediate",
            Self::Advanced => "advanced",
        }
    }

    /// Capitalized label for display and workout naming
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Beginner => "Beginner",
            Self::Intermediate => "Intermediate",
            Self::Advanced => "Advanced",
        }
    }
}

impl fmt::Display for FitnessLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FitnessLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "beginner" => Ok(Self::Beginner),
            "intermediate" => Ok(Self::Intermediate),
            "advanced" => Ok(Self::Advanced),
            other => Err(format!("unknown fitness level: {other}")),
        }
    }
}

/// Requested workout length, each bucket pinned to a fixed
/// minutes/calories pair used by both the prompt and the fallback
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DurationBucket {
    /// ~25 minutes, ~200 kcal
    Short,
    /// ~45 minutes, ~350 kcal
    Medium,
    /// ~65 minutes, ~500 kcal
    Long,
}

impl DurationBucket {
    /// All buckets
    pub const ALL: [Self; 3] = [Self::Short, Self::Medium, Self::Long];

    /// Wire identifier
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Short => "short",
            Self::Medium => "medium",
            Self::Long => "long",
        }
    }

    /// Total workout length in minutes
    #[must_use]
    pub const fn minutes(&self) -> u32 {
        match self {
            Self::Short => 25,
            Self::Medium => 45,
            Self::Long => 65,
        }
    }

    /// Calorie burn estimate for the bucket
    #[must_use]
    pub const fn calories(&self) -> u32 {
        match self {
            Self::Short => 200,
            Self::Medium => 350,
            Self::Long => 500,
        }
    }

    /// Display string, e.g. "45 min"
    #[must_use]
    pub fn display(&self) -> String {
        format!("{} min", self.minutes())
    }

    /// Natural-language phrase for prompt text, e.g. "45 minutes"
    #[must_use]
    pub fn phrase(&self) -> String {
        format!("{} minutes", self.minutes())
    }
}

impl fmt::Display for DurationBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Primary training goal driving exercise selection and rep schemes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Goal {
    /// Heavy loads, low reps, long rest
    Strength,
    /// Moderate volume, time under tension
    Hypertrophy,
    /// High reps, short rest
    Endurance,
    /// High intensity, compound movements, minimal rest
    WeightLoss,
    /// Mixed strength and endurance work
    Toning,
}

impl Goal {
    /// All goals
    pub const ALL: [Self; 5] = [
        Self::Strength,
        Self::Hypertrophy,
        Self::Endurance,
        Self::WeightLoss,
        Self::Toning,
    ];

    /// Wire identifier
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Strength => "strength",
            Self::Hypertrophy => "hypertrophy",
            Self::Endurance => "endurance",
            Self::WeightLoss => "weight-loss",
            Self::Toning => "toning",
        }
    }

    /// Natural-language phrase for prompt text
    #[must_use]
    pub const fn phrase(&self) -> &'static str {
        match self {
            Self::Strength => "strength development",
            Self::Hypertrophy => "muscle mass gain (hypertrophy)",
            Self::Endurance => "muscular endurance",
            Self::WeightLoss => "weight loss and fat burning",
            Self::Toning => "muscle toning and definition",
        }
    }
}

impl fmt::Display for Goal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Optional profile data used only to enrich the prompt, never required
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    /// Age in years
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    /// Height in centimeters
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    /// Weight in kilograms
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<u32>,
    /// Self-reported fitness level, free text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fitness_level: Option<String>,
    /// Stated training goals
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub goals: Vec<String>,
}

impl UserProfile {
    /// Whether the profile carries anything worth mentioning in a prompt
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.age.is_none()
            && self.height.is_none()
            && self.weight.is_none()
            && self.fitness_level.is_none()
            && self.goals.is_empty()
    }
}

/// Validated generation request, immutable for the duration of a request
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutPreferences {
    /// Fitness level
    pub fitness_level: FitnessLevel,
    /// Duration bucket
    pub duration: DurationBucket,
    /// Training goal
    pub goal: Goal,
    /// Available equipment tags; empty means bodyweight only
    #[serde(default)]
    pub equipment: Vec<String>,
    /// Body-region tags in priority order; the first drives fallback selection
    #[serde(default)]
    pub focus_areas: Vec<String>,
    /// Optional profile enrichment for the prompt
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_profile: Option<UserProfile>,
}

impl WorkoutPreferences {
    /// Primary focus area tag, defaulting to full-body when none was chosen
    #[must_use]
    pub fn primary_focus(&self) -> &str {
        self.focus_areas
            .first()
            .map_or("full-body", String::as_str)
    }
}

/// A single exercise within a workout
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Exercise {
    /// Exercise name
    #[serde(default)]
    pub name: String,
    /// Number of sets
    #[serde(default)]
    pub sets: u32,
    /// Repetitions - numeric range ("10-12") or time-based ("30 sec")
    #[serde(default)]
    pub reps: String,
    /// Rest between sets, free-form ("60 sec")
    #[serde(default)]
    pub rest_time: String,
    /// Execution instructions
    #[serde(default)]
    pub instructions: String,
    /// Illustration URL, validated for well-formedness when present
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

/// Where a workout came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkoutSource {
    /// Generated by the remote LLM
    Ai,
    /// Synthesized offline from the template catalog
    Template,
}

impl Default for WorkoutSource {
    fn default() -> Self {
        Self::Ai
    }
}

/// A complete workout plan, the pipeline's output contract
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Workout {
    /// Durable id, assigned by the persistence layer on insert
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    /// Workout name
    #[serde(default)]
    pub name: String,
    /// Difficulty label, e.g. "Beginner"
    #[serde(default)]
    pub difficulty: String,
    /// Targeted muscle groups, humanized
    #[serde(default)]
    pub muscle_groups: Vec<String>,
    /// Display duration, e.g. "45 min"
    #[serde(default)]
    pub duration: String,
    /// Duration in minutes
    #[serde(default)]
    pub duration_minutes: u32,
    /// Calorie burn estimate
    #[serde(default)]
    pub calories: u32,
    /// Equipment used, humanized
    #[serde(default)]
    pub equipment: Vec<String>,
    /// Ordered exercise list, non-empty on every successful generation
    #[serde(default)]
    pub exercises: Vec<Exercise>,
    /// General workout instructions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
    /// Provenance tag - AI output and template output are otherwise
    /// structurally identical by design
    #[serde(default)]
    pub source: WorkoutSource,
}

/// Humanize a kebab-case tag: "full-body" becomes "Full Body"
///
/// Unknown tags pass through this same transform rather than erroring, so
/// forward-compatible input degrades gracefully.
#[must_use]
pub fn humanize_tag(tag: &str) -> String {
    tag.split('-')
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().collect::<String>() + chars.as_str()
            })
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duration_bucket_table() {
        assert_eq!(DurationBucket::Short.minutes(), 25);
        assert_eq!(DurationBucket::Short.calories(), 200);
        assert_eq!(DurationBucket::Medium.minutes(), 45);
        assert_eq!(DurationBucket::Medium.calories(), 350);
        assert_eq!(DurationBucket::Long.minutes(), 65);
        assert_eq!(DurationBucket::Long.calories(), 500);
    }

    #[test]
    fn test_humanize_tag() {
        assert_eq!(humanize_tag("full-body"), "Full Body");
        assert_eq!(humanize_tag("core"), "Core");
        assert_eq!(humanize_tag("pull-up-bar"), "Pull Up Bar");
        assert_eq!(humanize_tag(""), "");
    }

    #[test]
    fn test_preferences_deserialization() {
        let prefs: WorkoutPreferences = serde_json::from_str(
            r#"{
                "fitnessLevel": "beginner",
                "duration": "medium",
                "goal": "weight-loss",
                "equipment": [],
                "focusAreas": ["core"]
            }"#,
        )
        .unwrap();
        assert_eq!(prefs.fitness_level, FitnessLevel::Beginner);
        assert_eq!(prefs.goal, Goal::WeightLoss);
        assert_eq!(prefs.primary_focus(), "core");
        assert!(prefs.user_profile.is_none());
    }

    #[test]
    fn test_malformed_level_rejected_at_boundary() {
        let result: Result<WorkoutPreferences, _> = serde_json::from_str(
            r#"{"fitnessLevel": "superhuman", "duration": "short", "goal": "strength"}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_primary_focus_defaults_to_full_body() {
        let prefs: WorkoutPreferences = serde_json::from_str(
            r#"{"fitnessLevel": "intermediate", "duration": "short", "goal": "strength"}"#,
        )
        .unwrap();
        assert_eq!(prefs.primary_focus(), "full-body");
    }
}
