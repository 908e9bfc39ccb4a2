// ABOUTME: HTTP surface for workout generation - axum router, handlers, error mapping
// ABOUTME: Maps GenerationError variants onto status codes via http_status()
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitGPT

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::Utc;
use serde::Serialize;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info};
use uuid::Uuid;

use crate::errors::{ErrorResponse, GenerationError};
use crate::generation::GenerationOrchestrator;
use crate::models::{Workout, WorkoutPreferences};
use crate::store::{UserAccount, UserStore, WorkoutStore};

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    /// Generation pipeline entry point
    pub orchestrator: Arc<GenerationOrchestrator>,
    /// User account backend, chosen at startup
    pub users: Arc<dyn UserStore>,
    /// Workout persistence backend, chosen at startup
    pub workouts: Arc<dyn WorkoutStore>,
}

impl AppState {
    /// Bundle the orchestrator with the stores selected at startup
    #[must_use]
    pub fn new(
        orchestrator: GenerationOrchestrator,
        users: Arc<dyn UserStore>,
        workouts: Arc<dyn WorkoutStore>,
    ) -> Self {
        Self {
            orchestrator: Arc::new(orchestrator),
            users,
            workouts,
        }
    }
}

/// Health check payload
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct HealthResponse {
    message: &'static str,
    ai_configured: bool,
    timestamp: String,
}

impl IntoResponse for GenerationError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.http_status())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let body = ErrorResponse::from(&self);
        (status, Json(body)).into_response()
    }
}

fn internal_error(err: &anyhow::Error) -> Response {
    error!("store operation failed: {err:#}");
    let body = ErrorResponse {
        code: "internal".to_owned(),
        error: "Internal server error.".to_owned(),
        detail: None,
    };
    (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
}

/// Build the API router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health))
        .route("/api/generate-workout", post(generate_workout))
        .route("/api/workouts", get(list_workouts))
        .route("/api/workouts/:id", get(get_workout))
        .route("/api/users/:email", get(get_user))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        message: "FitGPT API is running",
        ai_configured: state.orchestrator.is_configured(),
        timestamp: Utc::now().to_rfc3339(),
    })
}

async fn generate_workout(
    State(state): State<AppState>,
    Json(preferences): Json<WorkoutPreferences>,
) -> Result<Json<Workout>, Response> {
    info!(
        level = %preferences.fitness_level,
        duration = %preferences.duration,
        goal = %preferences.goal,
        "workout generation requested"
    );

    let workout = state
        .orchestrator
        .generate_workout(&preferences)
        .await
        .map_err(IntoResponse::into_response)?;

    let stored = state
        .workouts
        .insert(workout)
        .await
        .map_err(|err| internal_error(&err))?;

    Ok(Json(stored))
}

async fn list_workouts(State(state): State<AppState>) -> Result<Json<Vec<Workout>>, Response> {
    let workouts = state
        .workouts
        .list()
        .await
        .map_err(|err| internal_error(&err))?;
    Ok(Json(workouts))
}

async fn get_workout(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Workout>, Response> {
    let workout = state
        .workouts
        .get(id)
        .await
        .map_err(|err| internal_error(&err))?;

    workout.map(Json).ok_or_else(|| {
        let body = ErrorResponse {
            code: "not-found".to_owned(),
            error: "Workout not found.".to_owned(),
            detail: Some(format!("no workout with id {id}")),
        };
        (StatusCode::NOT_FOUND, Json(body)).into_response()
    })
}

/// Account lookup backing the client's profile screen; the profile it
/// returns is what callers pass back as `userProfile` to enrich prompts
async fn get_user(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> Result<Json<UserAccount>, Response> {
    let account = state
        .users
        .find_by_email(&email)
        .await
        .map_err(|err| internal_error(&err))?;

    account.map(Json).ok_or_else(|| {
        let body = ErrorResponse {
            code: "not-found".to_owned(),
            error: "User not found.".to_owned(),
            detail: Some(format!("no account for {email}")),
        };
        (StatusCode::NOT_FOUND, Json(body)).into_response()
    })
}
