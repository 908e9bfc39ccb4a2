// Integration tests for prompt construction
// The prompt is a pure function of the preferences and pins bucket values

use fitgpt_core::generation::{build_workout_prompt, SYSTEM_PROMPT};
use fitgpt_core::models::{
    DurationBucket, FitnessLevel, Goal, UserProfile, WorkoutPreferences,
};

fn preferences() -> WorkoutPreferences {
    WorkoutPreferences {
        fitness_level: FitnessLevel::Intermediate,
        duration: DurationBucket::Medium,
        goal: Goal::Strength,
        equipment: vec!["dumbbells".to_owned(), "pull-up-bar".to_owned()],
        focus_areas: vec!["upper-body".to_owned()],
        user_profile: None,
    }
}

#[test]
fn test_prompt_is_deterministic() {
    let prefs = preferences();
    assert_eq!(build_workout_prompt(&prefs), build_workout_prompt(&prefs));
}

#[test]
fn test_prompt_pins_bucket_duration_and_calories() {
    let prompt = build_workout_prompt(&preferences());
    assert!(prompt.contains("Total duration: 45 minutes"));
    assert!(prompt.contains("\"durationMinutes\": 45"));
    assert!(prompt.contains("\"calories\": 350"));

    let long = WorkoutPreferences {
        duration: DurationBucket::Long,
        ..preferences()
    };
    let prompt = build_workout_prompt(&long);
    assert!(prompt.contains("Total duration: 65 minutes"));
    assert!(prompt.contains("\"durationMinutes\": 65"));
    assert!(prompt.contains("\"calories\": 500"));
}

#[test]
fn test_prompt_contains_json_only_directives() {
    let prompt = build_workout_prompt(&preferences());
    assert!(prompt.contains("Return ONLY a valid JSON object"));
    assert!(prompt.contains("with no text before or after it"));
    assert!(SYSTEM_PROMPT.contains("single valid JSON object"));
}

#[test]
fn test_prompt_names_equipment_and_focus() {
    let prompt = build_workout_prompt(&preferences());
    assert!(prompt.contains("dumbbells, a pull-up bar"));
    assert!(prompt.contains("Focus areas: the upper body"));
    assert!(prompt.contains("Fitness level: intermediate"));
    assert!(prompt.contains("strength development"));
}

#[test]
fn test_empty_equipment_means_bodyweight_only() {
    let prefs = WorkoutPreferences {
        equipment: vec![],
        ..preferences()
    };
    let prompt = build_workout_prompt(&prefs);
    assert!(prompt.contains("Available equipment: bodyweight only"));
}

#[test]
fn test_empty_focus_means_full_body() {
    let prefs = WorkoutPreferences {
        focus_areas: vec![],
        ..preferences()
    };
    let prompt = build_workout_prompt(&prefs);
    assert!(prompt.contains("Focus areas: the full body"));
}

#[test]
fn test_unknown_tags_pass_through_humanized() {
    let prefs = WorkoutPreferences {
        equipment: vec!["trx-straps".to_owned()],
        focus_areas: vec!["neck".to_owned()],
        ..preferences()
    };
    let prompt = build_workout_prompt(&prefs);
    assert!(prompt.contains("trx straps"));
    assert!(prompt.contains("Focus areas: neck"));
}

#[test]
fn test_profile_section_rendered_when_present() {
    let prefs = WorkoutPreferences {
        user_profile: Some(UserProfile {
            age: Some(30),
            height: Some(180),
            weight: Some(82),
            fitness_level: Some("intermediate".to_owned()),
            goals: vec!["Build Muscle".to_owned()],
        }),
        ..preferences()
    };
    let prompt = build_workout_prompt(&prefs);
    assert!(prompt.contains("ADDITIONAL PROFILE DATA:"));
    assert!(prompt.contains("- Age: 30"));
    assert!(prompt.contains("- Height: 180 cm"));
    assert!(prompt.contains("- Weight: 82 kg"));
    assert!(prompt.contains("- Stated goals: Build Muscle"));
}

#[test]
fn test_empty_profile_adds_no_section() {
    let prefs = WorkoutPreferences {
        user_profile: Some(UserProfile::default()),
        ..preferences()
    };
    let prompt = build_workout_prompt(&prefs);
    assert!(!prompt.contains("ADDITIONAL PROFILE DATA:"));
}
