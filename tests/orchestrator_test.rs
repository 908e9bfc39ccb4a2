// Integration tests for the generation orchestrator
// Covers the fallback policy: only quota exhaustion is replaced by templates

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;

use fitgpt_core::errors::{GenerationError, GenerationResult, RemoteErrorKind};
use fitgpt_core::generation::{generate_fallback_workout, GenerationOrchestrator};
use fitgpt_core::llm::{ChatRequest, ChatResponse, LlmProvider};
use fitgpt_core::models::{
    DurationBucket, FitnessLevel, Goal, WorkoutPreferences, WorkoutSource,
};

/// Scripted provider: returns a cloned canned result and counts calls
struct StubProvider {
    script: GenerationResult<String>,
    calls: AtomicUsize,
}

impl StubProvider {
    fn replying(content: &str) -> Self {
        Self {
            script: Ok(content.to_owned()),
            calls: AtomicUsize::new(0),
        }
    }

    fn failing(error: GenerationError) -> Self {
        Self {
            script: Err(error),
            calls: AtomicUsize::new(0),
        }
    }

    fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LlmProvider for StubProvider {
    fn name(&self) -> &'static str {
        "stub"
    }

    fn display_name(&self) -> &'static str {
        "Stub"
    }

    fn default_model(&self) -> &str {
        "stub-model"
    }

    async fn complete(&self, _request: &ChatRequest) -> GenerationResult<ChatResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.script {
            Ok(content) => Ok(ChatResponse {
                content: content.clone(),
                model: "stub-model".to_owned(),
                usage: None,
                finish_reason: Some("stop".to_owned()),
            }),
            Err(error) => Err(error.clone()),
        }
    }
}

fn preferences() -> WorkoutPreferences {
    WorkoutPreferences {
        fitness_level: FitnessLevel::Intermediate,
        duration: DurationBucket::Medium,
        goal: Goal::Hypertrophy,
        equipment: vec!["dumbbells".to_owned()],
        focus_areas: vec!["upper-body".to_owned()],
        user_profile: None,
    }
}

const VALID_REPLY: &str = r#"{
    "name": "Upper Body Power",
    "difficulty": "Intermediate",
    "muscleGroups": ["Chest", "Back"],
    "duration": "40 min",
    "durationMinutes": 40,
    "calories": 300,
    "equipment": ["Dumbbells"],
    "exercises": [
        {
            "name": "Dumbbell Bench Press",
            "sets": 4,
            "reps": "8-10",
            "restTime": "90 sec",
            "instructions": "Press the dumbbells from chest level to full extension."
        }
    ]
}"#;

#[tokio::test]
async fn test_success_path_stamps_bucket_and_source() {
    let orchestrator = GenerationOrchestrator::new(Arc::new(StubProvider::replying(VALID_REPLY)));

    let workout = orchestrator.generate_workout(&preferences()).await.unwrap();

    assert_eq!(workout.source, WorkoutSource::Ai);
    assert_eq!(workout.name, "Upper Body Power");
    // Bucket values override whatever the model claimed
    assert_eq!(workout.duration_minutes, 45);
    assert_eq!(workout.calories, 350);
    assert_eq!(workout.duration, "45 min");
    // Model-provided muscle groups are kept
    assert_eq!(workout.muscle_groups, vec!["Chest", "Back"]);
    assert!(workout.id.is_none());
}

#[tokio::test]
async fn test_quota_exhaustion_swallowed_into_template_fallback() {
    let orchestrator = GenerationOrchestrator::new(Arc::new(StubProvider::failing(
        GenerationError::quota_exceeded("You exceeded your current quota"),
    )));

    let prefs = preferences();
    let workout = orchestrator.generate_workout(&prefs).await.unwrap();

    assert_eq!(workout.source, WorkoutSource::Template);
    let expected = generate_fallback_workout(&prefs);
    assert_eq!(workout.name, expected.name);
    assert_eq!(workout.exercises.len(), expected.exercises.len());
    assert_eq!(workout.duration_minutes, 45);
    assert_eq!(workout.calories, 350);
}

#[tokio::test]
async fn test_rate_limit_propagates_without_fallback() {
    let orchestrator = GenerationOrchestrator::new(Arc::new(StubProvider::failing(
        GenerationError::rate_limited("Too many requests"),
    )));

    let error = orchestrator
        .generate_workout(&preferences())
        .await
        .unwrap_err();
    assert_eq!(error.remote_kind(), Some(RemoteErrorKind::RateLimited));
}

#[tokio::test]
async fn test_auth_failure_propagates_without_fallback() {
    let orchestrator = GenerationOrchestrator::new(Arc::new(StubProvider::failing(
        GenerationError::auth_invalid("Incorrect API key provided"),
    )));

    let error = orchestrator
        .generate_workout(&preferences())
        .await
        .unwrap_err();
    assert_eq!(error.remote_kind(), Some(RemoteErrorKind::AuthInvalid));
}

#[tokio::test]
async fn test_unreachable_propagates_without_fallback() {
    let orchestrator = GenerationOrchestrator::new(Arc::new(StubProvider::failing(
        GenerationError::unreachable("connection refused"),
    )));

    let error = orchestrator
        .generate_workout(&preferences())
        .await
        .unwrap_err();
    assert_eq!(error.remote_kind(), Some(RemoteErrorKind::Unreachable));
}

#[tokio::test]
async fn test_unparseable_reply_propagates_without_fallback() {
    let orchestrator = GenerationOrchestrator::new(Arc::new(StubProvider::replying(
        "I'm sorry, I cannot create a workout for that request.",
    )));

    let error = orchestrator
        .generate_workout(&preferences())
        .await
        .unwrap_err();
    assert!(matches!(error, GenerationError::InvalidResponse { .. }));
}

#[tokio::test]
async fn test_fenced_reply_is_repaired() {
    let fenced = format!("```json\n{VALID_REPLY}\n```");
    let orchestrator = GenerationOrchestrator::new(Arc::new(StubProvider::replying(&fenced)));

    let workout = orchestrator.generate_workout(&preferences()).await.unwrap();
    assert_eq!(workout.name, "Upper Body Power");
    assert_eq!(workout.source, WorkoutSource::Ai);
}

#[tokio::test]
async fn test_unconfigured_short_circuits_before_any_call() {
    let orchestrator = GenerationOrchestrator::disabled();
    assert!(!orchestrator.is_configured());

    let error = orchestrator
        .generate_workout(&preferences())
        .await
        .unwrap_err();
    assert!(matches!(error, GenerationError::Unconfigured { .. }));
    assert_eq!(error.http_status(), 503);
}

#[tokio::test]
async fn test_exactly_one_provider_call_per_generation() {
    let provider = Arc::new(StubProvider::failing(GenerationError::rate_limited(
        "slow down",
    )));
    let orchestrator = GenerationOrchestrator::new(provider.clone());

    let _ = orchestrator.generate_workout(&preferences()).await;
    assert_eq!(provider.call_count(), 1);
}

#[tokio::test]
async fn test_empty_model_muscle_groups_derived_from_focus() {
    let reply = r#"{
        "name": "Core Blast",
        "exercises": [
            {"name": "Plank", "sets": 3, "reps": "30 sec", "restTime": "30 sec",
             "instructions": "Hold a straight line from head to heels."}
        ]
    }"#;
    let orchestrator = GenerationOrchestrator::new(Arc::new(StubProvider::replying(reply)));

    let prefs = WorkoutPreferences {
        focus_areas: vec!["core".to_owned(), "lower-body".to_owned()],
        ..preferences()
    };
    let workout = orchestrator.generate_workout(&prefs).await.unwrap();
    assert_eq!(workout.muscle_groups, vec!["Core", "Lower Body"]);
    assert_eq!(workout.difficulty, "Intermediate");
}
