// ABOUTME: Main library entry point for the FitGPT workout generation engine
// ABOUTME: LLM-backed workout plans with a deterministic template fallback
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitGPT

#![deny(unsafe_code)]

//! # FitGPT Core
//!
//! The workout-generation engine behind the FitGPT app. A request with the
//! user's preferences flows through a fixed pipeline:
//!
//! 1. **Prompt construction**: preferences and an optional fitness profile
//!    are rendered into a deterministic instruction prompt
//! 2. **LLM call**: the prompt goes to an OpenAI-compatible chat endpoint
//! 3. **Validation and repair**: the raw reply is parsed as JSON, with
//!    fence stripping and brace-span extraction for chatty models, then
//!    checked for structural completeness
//! 4. **Template fallback**: when the provider reports quota exhaustion,
//!    a hand-built workout from the exercise catalogs is returned instead
//!
//! All other failures propagate as typed [`errors::GenerationError`]
//! values so HTTP callers can map them onto accurate status codes.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use fitgpt_core::generation::GenerationOrchestrator;
//! use fitgpt_core::models::{DurationBucket, FitnessLevel, Goal, WorkoutPreferences};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let orchestrator = GenerationOrchestrator::from_env();
//!     let preferences = WorkoutPreferences {
//!         fitness_level: FitnessLevel::Intermediate,
//!         duration: DurationBucket::Medium,
//!         goal: Goal::Hypertrophy,
//!         equipment: vec!["dumbbells".to_owned()],
//!         focus_areas: vec!["upper-body".to_owned()],
//!         user_profile: None,
//!     };
//!     let workout = orchestrator.generate_workout(&preferences).await?;
//!     println!("{}: {} exercises", workout.name, workout.exercises.len());
//!     Ok(())
//! }
//! ```

/// HTTP server configuration from environment variables
pub mod config;

/// Typed errors for the generation pipeline and their HTTP mapping
pub mod errors;

/// Prompt construction, response validation, fallback and orchestration
pub mod generation;

/// LLM provider abstraction and the OpenAI-compatible implementation
pub mod llm;

/// Structured logging setup built on `tracing`
pub mod logging;

/// Preference, profile and workout data models
pub mod models;

/// Axum router and HTTP handlers
pub mod routes;

/// Repository traits and in-memory stores
pub mod store;
