// ABOUTME: Deterministic offline workout generator from a fixed template catalog
// ABOUTME: Guarantees a structurally valid workout when the LLM quota is exhausted
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitGPT

//! # Template Fallback Generator
//!
//! [`generate_fallback_workout`] is pure, deterministic, total, and
//! offline: it never fails. It exists so that billing exhaustion on the
//! remote path still produces a usable workout for the user.
//!
//! The generator draws from a small fixed catalog keyed by the primary
//! focus area rather than composing exercises combinatorially.
//! Correctness here means "always structurally valid and plausible", not
//! "creative".

use crate::models::{humanize_tag, Exercise, FitnessLevel, Workout, WorkoutPreferences, WorkoutSource};

/// One catalog entry, scaled per fitness level before emission
struct ExerciseTemplate {
    name: &'static str,
    sets: u32,
    reps: &'static str,
    rest_time: &'static str,
    instructions: &'static str,
    image_url: &'static str,
}

const FULL_BODY: &[ExerciseTemplate] = &[
    ExerciseTemplate {
        name: "Burpees",
        sets: 3,
        reps: "10-12",
        rest_time: "60 sec",
        instructions: "Perform the full movement: squat, plank, push-up, jump.",
        image_url: "https://images.pexels.com/photos/4162582/pexels-photo-4162582.jpeg?auto=compress&cs=tinysrgb&w=600",
    },
    ExerciseTemplate {
        name: "Squats",
        sets: 3,
        reps: "12-15",
        rest_time: "45 sec",
        instructions: "Keep your chest up and lower until your hips are parallel to the floor.",
        image_url: "https://images.pexels.com/photos/4162498/pexels-photo-4162498.jpeg?auto=compress&cs=tinysrgb&w=600",
    },
    ExerciseTemplate {
        name: "Push-ups",
        sets: 3,
        reps: "8-12",
        rest_time: "45 sec",
        instructions: "Keep your body in a straight line and lower your chest close to the floor.",
        image_url: "https://images.pexels.com/photos/4162589/pexels-photo-4162589.jpeg?auto=compress&cs=tinysrgb&w=600",
    },
    ExerciseTemplate {
        name: "Plank",
        sets: 3,
        reps: "30-45 sec",
        rest_time: "30 sec",
        instructions: "Hold a straight line from head to heels.",
        image_url: "https://images.pexels.com/photos/3823189/pexels-photo-3823189.jpeg?auto=compress&cs=tinysrgb&w=600",
    },
];

const UPPER_BODY: &[ExerciseTemplate] = &[
    ExerciseTemplate {
        name: "Push-ups",
        sets: 3,
        reps: "10-15",
        rest_time: "60 sec",
        instructions: "Focus on contracting the chest and triceps.",
        image_url: "https://images.pexels.com/photos/4162582/pexels-photo-4162582.jpeg?auto=compress&cs=tinysrgb&w=600",
    },
    ExerciseTemplate {
        name: "Triceps Dips",
        sets: 3,
        reps: "8-12",
        rest_time: "45 sec",
        instructions: "Use a chair or bench, focusing on the triceps.",
        image_url: "https://images.pexels.com/photos/4162498/pexels-photo-4162498.jpeg?auto=compress&cs=tinysrgb&w=600",
    },
    ExerciseTemplate {
        name: "Pike Push-ups",
        sets: 3,
        reps: "8-10",
        rest_time: "60 sec",
        instructions: "Inverted V position, focusing on the shoulders.",
        image_url: "https://images.pexels.com/photos/4162589/pexels-photo-4162589.jpeg?auto=compress&cs=tinysrgb&w=600",
    },
];

const LOWER_BODY: &[ExerciseTemplate] = &[
    ExerciseTemplate {
        name: "Squats",
        sets: 4,
        reps: "12-15",
        rest_time: "60 sec",
        instructions: "Focus on the quadriceps and glutes.",
        image_url: "https://images.pexels.com/photos/4162582/pexels-photo-4162582.jpeg?auto=compress&cs=tinysrgb&w=600",
    },
    ExerciseTemplate {
        name: "Lunges",
        sets: 3,
        reps: "10 each leg",
        rest_time: "45 sec",
        instructions: "Alternate legs while keeping your balance.",
        image_url: "https://images.pexels.com/photos/4162498/pexels-photo-4162498.jpeg?auto=compress&cs=tinysrgb&w=600",
    },
    ExerciseTemplate {
        name: "Glute Bridge",
        sets: 3,
        reps: "15-20",
        rest_time: "30 sec",
        instructions: "Squeeze the glutes at the top of the movement.",
        image_url: "https://images.pexels.com/photos/4162589/pexels-photo-4162589.jpeg?auto=compress&cs=tinysrgb&w=600",
    },
    ExerciseTemplate {
        name: "Calf Raises",
        sets: 3,
        reps: "15-20",
        rest_time: "30 sec",
        instructions: "Rise onto your toes and lower with control.",
        image_url: "https://images.pexels.com/photos/3823189/pexels-photo-3823189.jpeg?auto=compress&cs=tinysrgb&w=600",
    },
];

const CORE: &[ExerciseTemplate] = &[
    ExerciseTemplate {
        name: "Plank",
        sets: 3,
        reps: "30-60 sec",
        rest_time: "30 sec",
        instructions: "Keep the core braced and your breathing controlled.",
        image_url: "https://images.pexels.com/photos/4162582/pexels-photo-4162582.jpeg?auto=compress&cs=tinysrgb&w=600",
    },
    ExerciseTemplate {
        name: "Bicycle Crunches",
        sets: 3,
        reps: "20 total",
        rest_time: "30 sec",
        instructions: "Bring the opposite elbow to the opposite knee.",
        image_url: "https://images.pexels.com/photos/4162498/pexels-photo-4162498.jpeg?auto=compress&cs=tinysrgb&w=600",
    },
    ExerciseTemplate {
        name: "Russian Twists",
        sets: 3,
        reps: "15-20",
        rest_time: "30 sec",
        instructions: "Rotate the torso from side to side.",
        image_url: "https://images.pexels.com/photos/4162589/pexels-photo-4162589.jpeg?auto=compress&cs=tinysrgb&w=600",
    },
    ExerciseTemplate {
        name: "Mountain Climbers",
        sets: 3,
        reps: "30 sec",
        rest_time: "30 sec",
        instructions: "Alternate legs quickly while holding a plank position.",
        image_url: "https://images.pexels.com/photos/3823189/pexels-photo-3823189.jpeg?auto=compress&cs=tinysrgb&w=600",
    },
];

/// Template set for a focus-area tag, with a full-body default for any
/// tag that has no dedicated catalog
fn templates_for(focus: &str) -> &'static [ExerciseTemplate] {
    match focus {
        "upper-body" => UPPER_BODY,
        "lower-body" => LOWER_BODY,
        "core" => CORE,
        _ => FULL_BODY,
    }
}

/// Scale a rep specification for the fitness level
///
/// Only numeric ranges ("10-12", "30-45 sec") are scaled; plain values
/// ("30 sec", "10 each leg") pass through unchanged. Beginner lowers the
/// upper bound by 2; advanced raises the bounds by 2 and 3.
fn scale_reps(reps: &str, level: FitnessLevel) -> String {
    let Some((low_part, high_part)) = reps.split_once('-') else {
        return reps.to_owned();
    };

    let digits = |s: &str| -> String { s.chars().take_while(char::is_ascii_digit).collect() };
    let low_digits = digits(low_part.trim());
    let high_trimmed = high_part.trim();
    let high_digits = digits(high_trimmed);
    let suffix = high_trimmed[high_digits.len()..].to_owned();

    let (Ok(low), Ok(high)) = (low_digits.parse::<i64>(), high_digits.parse::<i64>()) else {
        return reps.to_owned();
    };

    match level {
        FitnessLevel::Beginner => format!("{}-{}{suffix}", low, high - 2),
        FitnessLevel::Intermediate => reps.to_owned(),
        FitnessLevel::Advanced => format!("{}-{}{suffix}", low + 2, high + 3),
    }
}

/// Scale a set count for the fitness level
const fn scale_sets(sets: u32, level: FitnessLevel) -> u32 {
    match level {
        FitnessLevel::Beginner => {
            let reduced = sets.saturating_sub(1);
            if reduced < 2 {
                2
            } else {
                reduced
            }
        }
        FitnessLevel::Intermediate => sets,
        FitnessLevel::Advanced => sets + 1,
    }
}

fn humanized_focus_areas(preferences: &WorkoutPreferences) -> Vec<String> {
    if preferences.focus_areas.is_empty() {
        vec!["Full Body".to_owned()]
    } else {
        preferences
            .focus_areas
            .iter()
            .map(|tag| humanize_tag(tag))
            .collect()
    }
}

/// Generate a workout offline from the template catalog
///
/// Pure and total: every valid preference combination yields a workout
/// satisfying the output invariants (non-empty exercises, positive
/// duration and calories, complete exercise fields).
#[must_use]
pub fn generate_fallback_workout(preferences: &WorkoutPreferences) -> Workout {
    let level = preferences.fitness_level;
    let focus_labels = humanized_focus_areas(preferences);

    let exercises: Vec<Exercise> = templates_for(preferences.primary_focus())
        .iter()
        .map(|template| Exercise {
            name: template.name.to_owned(),
            sets: scale_sets(template.sets, level),
            reps: scale_reps(template.reps, level),
            rest_time: template.rest_time.to_owned(),
            instructions: template.instructions.to_owned(),
            image_url: Some(template.image_url.to_owned()),
        })
        .collect();

    Workout {
        id: None,
        name: format!("{} Workout - {}", focus_labels.join(" and "), level.label()),
        difficulty: level.label().to_owned(),
        muscle_groups: focus_labels,
        duration: preferences.duration.display(),
        duration_minutes: preferences.duration.minutes(),
        calories: preferences.duration.calories(),
        equipment: preferences
            .equipment
            .iter()
            .map(|tag| humanize_tag(tag))
            .collect(),
        exercises,
        instructions: Some(format!(
            "Workout generated for the {} level focusing on {}. Perform each exercise \
             with proper form and respect the rest periods.",
            level.as_str(),
            if preferences.focus_areas.is_empty() {
                "the full body".to_owned()
            } else {
                preferences.focus_areas.join(", ")
            },
        )),
        source: WorkoutSource::Template,
    }
}
