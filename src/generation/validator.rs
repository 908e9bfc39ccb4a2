// ABOUTME: Parses and structurally validates raw LLM output into a Workout
// ABOUTME: Recovers JSON wrapped in prose or markdown fences before giving up
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitGPT

//! # Response Validator
//!
//! Models reliably wrap valid JSON in prose or markdown fences despite
//! instructions forbidding it, so parsing is an ordered repair pipeline:
//!
//! 1. Parse the raw text directly as a workout JSON object.
//! 2. Strip markdown code fences and retry.
//! 3. Take the greedy brace span - first `{` to last `}` - and retry.
//! 4. Fail with `unparseable`.
//!
//! The brace-span extraction is a deliberate simplification, not a general
//! JSON-in-text scanner: it assumes exactly one JSON object appears in the
//! response and takes the widest span. Multiple objects or unbalanced
//! braces in the surrounding prose will defeat it.
//!
//! A successful parse is then structurally validated: the workout needs a
//! name and at least one exercise, and every exercise needs a name and
//! instructions.

use tracing::{debug, warn};
use url::Url;

use crate::errors::{GenerationError, GenerationResult};
use crate::models::Workout;

/// Strip markdown code fences (```json ... ```) from raw model output
fn strip_code_fences(raw: &str) -> String {
    raw.replace("```json", "").replace("```", "").trim().to_owned()
}

/// Greedy brace span: first `{` to last `}`, inclusive
fn brace_span(raw: &str) -> Option<&str> {
    let start = raw.find('{')?;
    let end = raw.rfind('}')?;
    (end > start).then(|| &raw[start..=end])
}

/// Structural validation of a parsed workout
fn check_structure(workout: &Workout) -> GenerationResult<()> {
    if workout.name.trim().is_empty() {
        return Err(GenerationError::schema_violation("workout name is missing"));
    }
    if workout.exercises.is_empty() {
        return Err(GenerationError::schema_violation(
            "exercises is missing or empty",
        ));
    }
    for (index, exercise) in workout.exercises.iter().enumerate() {
        if exercise.name.trim().is_empty() {
            return Err(GenerationError::schema_violation(format!(
                "exercise {} has no name",
                index + 1
            )));
        }
        if exercise.instructions.trim().is_empty() {
            return Err(GenerationError::schema_violation(format!(
                "exercise {} ({}) has no instructions",
                index + 1,
                exercise.name
            )));
        }
        if exercise.sets == 0 {
            return Err(GenerationError::schema_violation(format!(
                "exercise {} ({}) has zero sets",
                index + 1,
                exercise.name
            )));
        }
    }
    Ok(())
}

/// Drop malformed image URLs instead of rejecting the whole response
fn sanitize_image_urls(workout: &mut Workout) {
    for exercise in &mut workout.exercises {
        if let Some(image_url) = &exercise.image_url {
            if Url::parse(image_url).is_err() {
                warn!(
                    exercise = %exercise.name,
                    "Dropping malformed image URL: {}",
                    image_url
                );
                exercise.image_url = None;
            }
        }
    }
}

/// Parse raw model output into a structurally valid [`Workout`]
///
/// # Errors
///
/// Returns [`GenerationError::InvalidResponse`] with reason `unparseable`
/// when no JSON object can be recovered, or `schema-violation` when the
/// JSON parses but the workout structure is incomplete.
pub fn validate_workout_response(raw: &str) -> GenerationResult<Workout> {
    let mut workout = parse_with_repair(raw)?;

    check_structure(&workout)?;
    sanitize_image_urls(&mut workout);

    debug!(
        name = %workout.name,
        exercises = workout.exercises.len(),
        "Model response validated"
    );

    Ok(workout)
}

/// The ordered parse/repair pipeline, separated from structural checks
fn parse_with_repair(raw: &str) -> GenerationResult<Workout> {
    let trimmed = raw.trim();

    if let Ok(workout) = serde_json::from_str::<Workout>(trimmed) {
        return Ok(workout);
    }

    let unfenced = strip_code_fences(trimmed);
    if let Ok(workout) = serde_json::from_str::<Workout>(&unfenced) {
        debug!("Recovered workout JSON by stripping markdown fences");
        return Ok(workout);
    }

    if let Some(span) = brace_span(&unfenced) {
        if let Ok(workout) = serde_json::from_str::<Workout>(span) {
            debug!("Recovered workout JSON via brace-span extraction");
            return Ok(workout);
        }
    }

    Err(GenerationError::unparseable(format!(
        "no JSON object found in model response ({} chars)",
        raw.len()
    )))
}
