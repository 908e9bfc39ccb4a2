// ABOUTME: Repository traits and in-memory implementations for offline/demo mode
// ABOUTME: Assigns workout ids on insert - the generation pipeline never does
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitGPT

//! # Stores
//!
//! Persistence is an external collaborator: the generation pipeline
//! returns a [`Workout`] without an id and something else durably stores
//! it. That something is a [`WorkoutStore`], selected once at startup -
//! never branched on ad hoc at call sites. This module ships the
//! in-memory implementations used in offline/demo mode; a deployment with
//! a real backend provides its own implementations of the same traits.
//!
//! [`UserStore`] replaces the original frontend's global mutable
//! test-account list with the same demo seed data behind a proper
//! repository interface.

use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::{DashMap, DashSet};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{UserProfile, Workout};

/// A registered user account
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserAccount {
    /// Account id
    pub id: Uuid,
    /// Login email
    pub email: String,
    /// Display name
    pub name: String,
    /// Profile data used to enrich generation prompts
    pub profile: UserProfile,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

/// One completed-workout history entry
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    /// Entry id
    pub id: Uuid,
    /// Workout that was completed
    pub workout_id: Uuid,
    /// Completion timestamp
    pub completed_at: DateTime<Utc>,
    /// Actual duration, when the user tracked it
    pub duration_minutes: Option<u32>,
    /// Free-form notes
    pub notes: Option<String>,
}

/// User account repository
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Look up an account by email
    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<UserAccount>>;

    /// Insert or update an account
    async fn upsert(&self, account: UserAccount) -> anyhow::Result<()>;
}

/// Workout repository: owns id assignment, favorites and history
#[async_trait]
pub trait WorkoutStore: Send + Sync {
    /// Persist a freshly generated workout, assigning its durable id
    async fn insert(&self, workout: Workout) -> anyhow::Result<Workout>;

    /// Fetch a workout by id
    async fn get(&self, id: Uuid) -> anyhow::Result<Option<Workout>>;

    /// List all stored workouts, newest first
    async fn list(&self) -> anyhow::Result<Vec<Workout>>;

    /// Toggle a favorite; returns whether the workout is now a favorite
    async fn toggle_favorite(&self, user_id: Uuid, workout_id: Uuid) -> anyhow::Result<bool>;

    /// Favorite workout ids for a user
    async fn favorites(&self, user_id: Uuid) -> anyhow::Result<Vec<Uuid>>;

    /// Record a completed workout
    async fn record_history(&self, user_id: Uuid, entry: HistoryEntry) -> anyhow::Result<()>;

    /// Completed-workout history for a user, newest first
    async fn history(&self, user_id: Uuid) -> anyhow::Result<Vec<HistoryEntry>>;
}

// ============================================================================
// In-Memory Implementations
// ============================================================================

/// In-memory user store for offline/demo mode
#[derive(Default)]
pub struct MemoryUserStore {
    accounts: DashMap<String, UserAccount>,
}

impl MemoryUserStore {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store seeded with the demo account
    #[must_use]
    pub fn with_demo_account() -> Self {
        let store = Self::new();
        let demo = UserAccount {
            id: Uuid::new_v4(),
            email: "demo@fitgpt.app".to_owned(),
            name: "Demo User".to_owned(),
            profile: UserProfile {
                age: Some(25),
                height: Some(175),
                weight: Some(70),
                fitness_level: Some("intermediate".to_owned()),
                goals: vec!["Build Muscle".to_owned(), "Improve Strength".to_owned()],
            },
            created_at: Utc::now(),
        };
        store.accounts.insert(demo.email.clone(), demo);
        store
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<UserAccount>> {
        Ok(self.accounts.get(email).map(|entry| entry.clone()))
    }

    async fn upsert(&self, account: UserAccount) -> anyhow::Result<()> {
        self.accounts.insert(account.email.clone(), account);
        Ok(())
    }
}

/// In-memory workout store for offline/demo mode
#[derive(Default)]
pub struct MemoryWorkoutStore {
    workouts: DashMap<Uuid, Workout>,
    // Monotonic insert sequence; wall-clock timestamps can tie
    insert_seq: AtomicU64,
    inserted_order: DashMap<Uuid, u64>,
    favorites: DashMap<Uuid, DashSet<Uuid>>,
    history: DashMap<Uuid, Vec<HistoryEntry>>,
}

impl MemoryWorkoutStore {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl WorkoutStore for MemoryWorkoutStore {
    async fn insert(&self, mut workout: Workout) -> anyhow::Result<Workout> {
        let id = Uuid::new_v4();
        workout.id = Some(id);
        let seq = self.insert_seq.fetch_add(1, Ordering::SeqCst);
        self.inserted_order.insert(id, seq);
        self.workouts.insert(id, workout.clone());
        Ok(workout)
    }

    async fn get(&self, id: Uuid) -> anyhow::Result<Option<Workout>> {
        Ok(self.workouts.get(&id).map(|entry| entry.clone()))
    }

    async fn list(&self) -> anyhow::Result<Vec<Workout>> {
        let mut entries: Vec<(u64, Workout)> = self
            .workouts
            .iter()
            .map(|entry| {
                let seq = self.inserted_order.get(entry.key()).map_or(0, |s| *s);
                (seq, entry.value().clone())
            })
            .collect();
        entries.sort_by(|a, b| b.0.cmp(&a.0));
        Ok(entries.into_iter().map(|(_, workout)| workout).collect())
    }

    async fn toggle_favorite(&self, user_id: Uuid, workout_id: Uuid) -> anyhow::Result<bool> {
        let set = self.favorites.entry(user_id).or_default();
        if set.remove(&workout_id).is_some() {
            Ok(false)
        } else {
            set.insert(workout_id);
            Ok(true)
        }
    }

    async fn favorites(&self, user_id: Uuid) -> anyhow::Result<Vec<Uuid>> {
        Ok(self
            .favorites
            .get(&user_id)
            .map(|set| set.iter().map(|id| *id).collect())
            .unwrap_or_default())
    }

    async fn record_history(&self, user_id: Uuid, entry: HistoryEntry) -> anyhow::Result<()> {
        self.history.entry(user_id).or_default().push(entry);
        Ok(())
    }

    async fn history(&self, user_id: Uuid) -> anyhow::Result<Vec<HistoryEntry>> {
        let mut entries = self
            .history
            .get(&user_id)
            .map(|list| list.clone())
            .unwrap_or_default();
        entries.sort_by(|a, b| b.completed_at.cmp(&a.completed_at));
        Ok(entries)
    }
}
