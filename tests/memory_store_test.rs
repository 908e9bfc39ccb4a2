// Integration tests for the in-memory stores
// Verifies id assignment, listing order, favorites and history

use chrono::Utc;
use uuid::Uuid;

use fitgpt_core::generation::generate_fallback_workout;
use fitgpt_core::models::{DurationBucket, FitnessLevel, Goal, WorkoutPreferences};
use fitgpt_core::store::{
    HistoryEntry, MemoryUserStore, MemoryWorkoutStore, UserStore, WorkoutStore,
};

fn sample_workout(focus: &str) -> fitgpt_core::models::Workout {
    generate_fallback_workout(&WorkoutPreferences {
        fitness_level: FitnessLevel::Intermediate,
        duration: DurationBucket::Medium,
        goal: Goal::Endurance,
        equipment: vec![],
        focus_areas: vec![focus.to_owned()],
        user_profile: None,
    })
}

#[tokio::test]
async fn test_insert_assigns_id() {
    let store = MemoryWorkoutStore::new();
    let workout = sample_workout("core");
    assert!(workout.id.is_none());

    let stored = store.insert(workout).await.unwrap();
    let id = stored.id.expect("insert must assign an id");

    let fetched = store.get(id).await.unwrap().expect("stored workout");
    assert_eq!(fetched.name, stored.name);
}

#[tokio::test]
async fn test_get_unknown_id_is_none() {
    let store = MemoryWorkoutStore::new();
    assert!(store.get(Uuid::new_v4()).await.unwrap().is_none());
}

#[tokio::test]
async fn test_list_returns_newest_first() {
    let store = MemoryWorkoutStore::new();
    let first = store.insert(sample_workout("core")).await.unwrap();
    let second = store.insert(sample_workout("upper-body")).await.unwrap();

    let listed = store.list().await.unwrap();
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0].id, second.id);
    assert_eq!(listed[1].id, first.id);
}

#[tokio::test]
async fn test_favorite_toggling_round_trips() {
    let store = MemoryWorkoutStore::new();
    let user_id = Uuid::new_v4();
    let workout = store.insert(sample_workout("core")).await.unwrap();
    let workout_id = workout.id.unwrap();

    assert!(store.toggle_favorite(user_id, workout_id).await.unwrap());
    assert_eq!(store.favorites(user_id).await.unwrap(), vec![workout_id]);

    assert!(!store.toggle_favorite(user_id, workout_id).await.unwrap());
    assert!(store.favorites(user_id).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_favorites_are_per_user() {
    let store = MemoryWorkoutStore::new();
    let alice = Uuid::new_v4();
    let bob = Uuid::new_v4();
    let workout = store.insert(sample_workout("core")).await.unwrap();
    let workout_id = workout.id.unwrap();

    store.toggle_favorite(alice, workout_id).await.unwrap();
    assert!(store.favorites(bob).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_history_newest_first() {
    let store = MemoryWorkoutStore::new();
    let user_id = Uuid::new_v4();
    let workout = store.insert(sample_workout("core")).await.unwrap();
    let workout_id = workout.id.unwrap();

    let older = HistoryEntry {
        id: Uuid::new_v4(),
        workout_id,
        completed_at: Utc::now() - chrono::Duration::days(2),
        duration_minutes: Some(40),
        notes: None,
    };
    let newer = HistoryEntry {
        id: Uuid::new_v4(),
        workout_id,
        completed_at: Utc::now(),
        duration_minutes: Some(45),
        notes: Some("felt strong".to_owned()),
    };

    store.record_history(user_id, older.clone()).await.unwrap();
    store.record_history(user_id, newer.clone()).await.unwrap();

    let history = store.history(user_id).await.unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].id, newer.id);
    assert_eq!(history[1].id, older.id);
}

#[tokio::test]
async fn test_demo_account_seeded() {
    let store = MemoryUserStore::with_demo_account();

    let demo = store
        .find_by_email("demo@fitgpt.app")
        .await
        .unwrap()
        .expect("demo account");
    assert_eq!(demo.profile.age, Some(25));
    assert_eq!(demo.profile.fitness_level.as_deref(), Some("intermediate"));
}

#[tokio::test]
async fn test_upsert_replaces_account() {
    let store = MemoryUserStore::with_demo_account();
    let mut demo = store
        .find_by_email("demo@fitgpt.app")
        .await
        .unwrap()
        .unwrap();

    demo.profile.weight = Some(72);
    store.upsert(demo).await.unwrap();

    let updated = store
        .find_by_email("demo@fitgpt.app")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.profile.weight, Some(72));
}
