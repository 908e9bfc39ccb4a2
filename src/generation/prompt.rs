// ABOUTME: Prompt construction for LLM-backed workout generation
// ABOUTME: Pure deterministic transform from preferences to a natural-language prompt
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitGPT

//! # Prompt Builder
//!
//! [`build_workout_prompt`] turns a [`WorkoutPreferences`] into the user
//! prompt sent to the model. It is a pure, total function: unknown
//! equipment or focus tags pass through humanized instead of erroring, so
//! forward-compatible input still produces a usable prompt.
//!
//! The prompt ends with a strict JSON-only output directive. The
//! downstream parser is intentionally simple and relies on the model
//! honoring that instruction; the validator exists precisely because it
//! is not always honored.

use crate::models::{humanize_tag, FitnessLevel, Goal, UserProfile, WorkoutPreferences};

/// System instruction establishing persona and the JSON-only constraint
pub const SYSTEM_PROMPT: &str = "You are a certified personal trainer who designs personalized \
    workout plans. Always respond with a single valid JSON object and nothing else.";

/// Natural-language phrase for an equipment tag
///
/// Unknown tags fall through to [`humanize_tag`].
fn equipment_phrase(tag: &str) -> String {
    match tag {
        "none" | "bodyweight" => "bodyweight only".to_owned(),
        "dumbbells" => "dumbbells".to_owned(),
        "barbell" => "a barbell".to_owned(),
        "kettlebell" => "a kettlebell".to_owned(),
        "resistance-bands" => "resistance bands".to_owned(),
        "machines" => "gym machines".to_owned(),
        "pull-up-bar" => "a pull-up bar".to_owned(),
        other => humanize_tag(other).to_lowercase(),
    }
}

/// Natural-language phrase for a focus-area tag
fn focus_phrase(tag: &str) -> String {
    match tag {
        "full-body" => "the full body".to_owned(),
        "upper-body" => "the upper body".to_owned(),
        "lower-body" => "the lower body".to_owned(),
        "core" => "core and abs".to_owned(),
        "chest" => "the chest".to_owned(),
        "back" => "the back".to_owned(),
        "legs" => "the legs".to_owned(),
        "arms" => "the arms".to_owned(),
        "shoulders" => "the shoulders".to_owned(),
        other => humanize_tag(other).to_lowercase(),
    }
}

/// Intensity tuning notes keyed by fitness level
const fn level_notes(level: FitnessLevel) -> &'static str {
    match level {
        FitnessLevel::Beginner => {
            "- Use fewer sets and repetitions\n   - Include more rest time\n   - Prefer simpler exercises"
        }
        FitnessLevel::Intermediate => {
            "- Use moderate sets and repetitions\n   - Combine compound and isolation exercises"
        }
        FitnessLevel::Advanced => {
            "- Use more sets and repetitions\n   - Include more complex exercises\n   - Reduce rest time"
        }
    }
}

/// Training-style notes keyed by goal
const fn goal_notes(goal: Goal) -> &'static str {
    match goal {
        Goal::Strength => {
            "- Use heavier loads (6-8 reps)\n   - Longer rest between sets (90-120 sec)"
        }
        Goal::Hypertrophy => "- Use moderate volume (8-12 reps)\n   - Longer time under tension",
        Goal::Endurance => {
            "- Use higher repetitions (15-20 reps)\n   - Less rest between sets (30-45 sec)"
        }
        Goal::WeightLoss => {
            "- Include high-intensity elements\n   - Minimize rest\n   - Focus on compound exercises"
        }
        Goal::Toning => "- Combine strength and endurance (10-15 reps)\n   - Varied exercises",
    }
}

/// Profile enrichment section, empty when nothing is known about the user
fn profile_section(profile: Option<&UserProfile>) -> String {
    let Some(profile) = profile else {
        return String::new();
    };
    if profile.is_empty() {
        return String::new();
    }

    let mut lines = Vec::new();
    if let Some(age) = profile.age {
        lines.push(format!("- Age: {age}"));
    }
    if let Some(height) = profile.height {
        lines.push(format!("- Height: {height} cm"));
    }
    if let Some(weight) = profile.weight {
        lines.push(format!("- Weight: {weight} kg"));
    }
    if let Some(level) = &profile.fitness_level {
        lines.push(format!("- Self-reported fitness level: {level}"));
    }
    if !profile.goals.is_empty() {
        lines.push(format!("- Stated goals: {}", profile.goals.join(", ")));
    }

    format!("\nADDITIONAL PROFILE DATA:\n{}\n", lines.join("\n"))
}

/// Build the workout-generation prompt for the given preferences
///
/// Deterministic: repeated calls with equal preferences produce
/// byte-identical output.
#[must_use]
pub fn build_workout_prompt(preferences: &WorkoutPreferences) -> String {
    let level = preferences.fitness_level;
    let goal = preferences.goal;
    let duration_phrase = preferences.duration.phrase();

    let equipment_list = if preferences.equipment.is_empty() {
        "bodyweight only".to_owned()
    } else {
        preferences
            .equipment
            .iter()
            .map(|tag| equipment_phrase(tag))
            .collect::<Vec<_>>()
            .join(", ")
    };

    let focus_list = if preferences.focus_areas.is_empty() {
        "the full body".to_owned()
    } else {
        preferences
            .focus_areas
            .iter()
            .map(|tag| focus_phrase(tag))
            .collect::<Vec<_>>()
            .join(", ")
    };

    let equipment_json = preferences
        .equipment
        .iter()
        .map(|tag| format!("\"{}\"", humanize_tag(tag)))
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        r#"Create a personalized workout plan with the following characteristics:

TRAINEE PROFILE:
- Fitness level: {level}
- Primary goal: {goal_phrase}
{profile}
WORKOUT SPECIFICATIONS:
- Total duration: {duration_phrase}
- Available equipment: {equipment_list}
- Focus areas: {focus_list}

REQUIREMENTS:
1. Create a complete, balanced workout
2. Include 4-6 different exercises
3. For each exercise, specify:
   - Exercise name (name)
   - Number of sets (sets)
   - Number of repetitions or time (reps)
   - Rest time (restTime)
   - Detailed execution instructions (instructions)
   - A related Pexels image URL (imageUrl), using valid URLs like: https://images.pexels.com/photos/[ID]/pexels-photo-[ID].jpeg?auto=compress&cs=tinysrgb&w=600

4. Tune the intensity for the {level} level:
   {level_notes}

5. Focus on the goal of {goal_phrase}:
   {goal_notes}

RESPONSE FORMAT (JSON):
Return ONLY a valid JSON object (no additional text) with this exact structure:

{{
  "name": "Creative workout name",
  "difficulty": "{difficulty}",
  "muscleGroups": ["Group1", "Group2"],
  "duration": "{duration_phrase}",
  "durationMinutes": {minutes},
  "calories": {calories},
  "equipment": [{equipment_json}],
  "exercises": [
    {{
      "name": "Exercise name",
      "sets": 3,
      "reps": "10-12",
      "restTime": "60 sec",
      "instructions": "Detailed execution instructions",
      "imageUrl": "https://images.pexels.com/photos/4164761/pexels-photo-4164761.jpeg?auto=compress&cs=tinysrgb&w=600"
    }}
  ],
  "instructions": "General instructions for the complete workout"
}}

IMPORTANT:
- Return ONLY the JSON, with no text before or after it
- Use real, valid Pexels URLs
- Be creative with the workout name
- Instructions must be clear and motivating"#,
        level = level.as_str(),
        goal_phrase = goal.phrase(),
        profile = profile_section(preferences.user_profile.as_ref()),
        duration_phrase = duration_phrase,
        equipment_list = equipment_list,
        focus_list = focus_list,
        level_notes = level_notes(level),
        goal_notes = goal_notes(goal),
        difficulty = level.label(),
        minutes = preferences.duration.minutes(),
        calories = preferences.duration.calories(),
        equipment_json = equipment_json,
    )
}
