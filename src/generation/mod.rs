// ABOUTME: The workout generation pipeline - prompt, validation, fallback, orchestration
// ABOUTME: Re-exports the pipeline's public surface
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitGPT

//! # Workout Generation
//!
//! Everything between a [`WorkoutPreferences`](crate::models::WorkoutPreferences)
//! and a [`Workout`](crate::models::Workout):
//!
//! - [`prompt`] builds the natural-language prompt.
//! - [`validator`] parses and repairs raw model output.
//! - [`fallback`] synthesizes a workout offline from templates.
//! - [`orchestrator`] ties the stages together and owns the failure policy.

pub mod fallback;
pub mod orchestrator;
pub mod prompt;
pub mod validator;

pub use fallback::generate_fallback_workout;
pub use orchestrator::GenerationOrchestrator;
pub use prompt::{build_workout_prompt, SYSTEM_PROMPT};
pub use validator::validate_workout_response;
