// ABOUTME: Top-level workout generation contract tying prompt, LLM call, validation and fallback together
// ABOUTME: Quota exhaustion falls back to templates; every other failure propagates typed
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitGPT

//! # Generation Orchestrator
//!
//! [`GenerationOrchestrator::generate_workout`] is the pipeline's sole
//! entry point. The flow is a linear state machine with no loops and no
//! retries:
//!
//! ```text
//! preferences -> prompt -> remote call -> validate -> Ok(workout)
//!                              |              |
//!                   QuotaExceeded only        +-> Err(InvalidResponse)
//!                              v
//!                     template fallback -> Ok(workout)
//! ```
//!
//! The fallback policy is deliberately asymmetric: only billing
//! exhaustion is recoverable. Rate limits, auth failures, transport
//! failures, and malformed responses all propagate, because those
//! indicate problems a canned workout would mask rather than solve. The
//! swallow on the quota path is total - the caller sees an ordinary
//! successful workout, distinguishable only by its `source` tag.
//!
//! Each call is independent: the orchestrator holds no cross-request
//! state and concurrent calls need no coordination.

use std::sync::Arc;
use tracing::{info, instrument, warn};

use super::fallback::generate_fallback_workout;
use super::prompt::{build_workout_prompt, SYSTEM_PROMPT};
use super::validator::validate_workout_response;
use crate::errors::{GenerationError, GenerationResult};
use crate::llm::{ChatMessage, ChatRequest, LlmProvider, OpenAiProvider};
use crate::models::{humanize_tag, Workout, WorkoutPreferences, WorkoutSource};

/// Sampling temperature: low-moderate, favoring determinism over
/// creativity - a workout generator must not hallucinate unsafe
/// instructions
const TEMPERATURE: f32 = 0.7;

/// Token ceiling, generous enough for 6 exercises with full instructions
const MAX_OUTPUT_TOKENS: u32 = 2000;

/// Orchestrates the generation pipeline
pub struct GenerationOrchestrator {
    provider: Option<Arc<dyn LlmProvider>>,
}

impl GenerationOrchestrator {
    /// Create an orchestrator backed by the given provider
    #[must_use]
    pub fn new(provider: Arc<dyn LlmProvider>) -> Self {
        Self {
            provider: Some(provider),
        }
    }

    /// Create an orchestrator with no provider
    ///
    /// Every `generate_workout` call will fail with `Unconfigured`. Used
    /// when the server starts without an API key: the rest of the
    /// application keeps working, only AI generation is unavailable.
    #[must_use]
    pub const fn disabled() -> Self {
        Self { provider: None }
    }

    /// Create an orchestrator from environment configuration
    ///
    /// A missing `OPENAI_API_KEY` yields a disabled orchestrator rather
    /// than an error, mirroring the degraded-mode startup of the original
    /// backend.
    #[must_use]
    pub fn from_env() -> Self {
        match OpenAiProvider::from_env() {
            Ok(provider) => {
                info!(
                    model = provider.default_model(),
                    "AI workout generation enabled"
                );
                Self::new(Arc::new(provider))
            }
            Err(e) => {
                warn!("AI workout generation disabled: {e}");
                Self::disabled()
            }
        }
    }

    /// Whether a provider credential is available
    #[must_use]
    pub const fn is_configured(&self) -> bool {
        self.provider.is_some()
    }

    /// Generate a workout for the given preferences
    ///
    /// # Errors
    ///
    /// - [`GenerationError::Unconfigured`] when no credential is available
    ///   (checked before any network attempt).
    /// - [`GenerationError::Remote`] for rate-limit, auth, transport, and
    ///   unknown provider failures. Quota exhaustion never surfaces here;
    ///   it is replaced by a template workout.
    /// - [`GenerationError::InvalidResponse`] when the model's output
    ///   cannot be parsed or fails structural validation.
    #[instrument(skip(self, preferences), fields(
        level = %preferences.fitness_level,
        goal = %preferences.goal,
        focus = preferences.primary_focus(),
    ))]
    pub async fn generate_workout(
        &self,
        preferences: &WorkoutPreferences,
    ) -> GenerationResult<Workout> {
        let Some(provider) = &self.provider else {
            return Err(GenerationError::unconfigured(
                "no LLM credential available; set OPENAI_API_KEY",
            ));
        };

        let prompt = build_workout_prompt(preferences);
        let request = ChatRequest::new(vec![
            ChatMessage::system(SYSTEM_PROMPT),
            ChatMessage::user(prompt),
        ])
        .with_temperature(TEMPERATURE)
        .with_max_tokens(MAX_OUTPUT_TOKENS)
        .with_json_output();

        match provider.complete(&request).await {
            Ok(response) => {
                let workout = validate_workout_response(&response.content)?;
                info!(name = %workout.name, "AI workout generated");
                Ok(Self::finalize(workout, preferences))
            }
            Err(error) if error.triggers_fallback() => {
                warn!("LLM quota exhausted, generating workout from templates: {error}");
                Ok(generate_fallback_workout(preferences))
            }
            Err(error) => Err(error),
        }
    }

    /// Stamp request-derived fields onto a validated AI workout
    ///
    /// The prompt pins the duration/calorie pair for the requested bucket
    /// but the model is not trusted to honor it, so the fixed values are
    /// applied here. Muscle groups are derived from the focus areas only
    /// when the model returned none.
    fn finalize(mut workout: Workout, preferences: &WorkoutPreferences) -> Workout {
        workout.source = WorkoutSource::Ai;
        workout.duration = preferences.duration.display();
        workout.duration_minutes = preferences.duration.minutes();
        workout.calories = preferences.duration.calories();

        if workout.difficulty.trim().is_empty() {
            workout.difficulty = preferences.fitness_level.label().to_owned();
        }
        if workout.muscle_groups.is_empty() {
            workout.muscle_groups = if preferences.focus_areas.is_empty() {
                vec!["Full Body".to_owned()]
            } else {
                preferences
                    .focus_areas
                    .iter()
                    .map(|tag| humanize_tag(tag))
                    .collect()
            };
        }

        workout
    }
}

impl Default for GenerationOrchestrator {
    fn default() -> Self {
        Self::disabled()
    }
}
