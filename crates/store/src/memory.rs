//! In-memory store implementation.
//!
//! `MemoryEvalStore` keeps all collections in memory behind an `RwLock`.
//! It is the backing store for tests and for the server when pointed at
//! a JSON seed file; data does not persist across restarts.

use crate::{EvalStore, StoreResult};
use async_trait::async_trait;
use eval_model::{Category, Grade, GradeSelection, Phase, PhaseId, User, UserId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::sync::RwLock;

/// Seed document for the in-memory store.
///
/// Matches the JSON layout of the fixture files: flat arrays of records
/// plus a token → user session map.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SeedData {
    #[serde(default)]
    pub users: Vec<User>,
    #[serde(default)]
    pub phases: Vec<Phase>,
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub grades: Vec<Grade>,
    /// Opaque session tokens mapped to user identities
    #[serde(default)]
    pub sessions: HashMap<String, UserId>,
}

struct Collections {
    users: HashMap<UserId, User>,
    phases: Vec<Phase>,
    categories: Vec<Category>,
    grades: Vec<Grade>,
    sessions: HashMap<String, UserId>,
}

/// In-memory implementation of `EvalStore`.
///
/// Thread-safe and shareable behind an `Arc`; reads take a read lock so
/// concurrent export requests never block each other.
pub struct MemoryEvalStore {
    inner: RwLock<Collections>,
}

impl MemoryEvalStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::from_seed(SeedData::default())
    }

    /// Create a store populated from a seed document
    pub fn from_seed(seed: SeedData) -> Self {
        Self {
            inner: RwLock::new(Collections {
                users: seed.users.into_iter().map(|u| (u.id, u)).collect(),
                phases: seed.phases,
                categories: seed.categories,
                grades: seed.grades,
                sessions: seed.sessions,
            }),
        }
    }

    /// Load a store from a JSON seed file
    pub async fn from_json_file(path: impl AsRef<Path>) -> StoreResult<Self> {
        let data = tokio::fs::read(path.as_ref()).await?;
        let seed: SeedData = serde_json::from_slice(&data)?;
        tracing::info!(
            users = seed.users.len(),
            phases = seed.phases.len(),
            categories = seed.categories.len(),
            grades = seed.grades.len(),
            "Loaded seed data from {}",
            path.as_ref().display()
        );
        Ok(Self::from_seed(seed))
    }

    /// Insert a user record
    pub fn insert_user(&self, user: User) {
        self.inner.write().unwrap().users.insert(user.id, user);
    }

    /// Insert a phase record
    pub fn insert_phase(&self, phase: Phase) {
        self.inner.write().unwrap().phases.push(phase);
    }

    /// Insert a category record
    pub fn insert_category(&self, category: Category) {
        self.inner.write().unwrap().categories.push(category);
    }

    /// Insert a grade record
    pub fn insert_grade(&self, grade: Grade) {
        self.inner.write().unwrap().grades.push(grade);
    }

    /// Associate a session token with a user
    pub fn insert_session(&self, token: impl Into<String>, user_id: UserId) {
        self.inner
            .write()
            .unwrap()
            .sessions
            .insert(token.into(), user_id);
    }
}

impl Default for MemoryEvalStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EvalStore for MemoryEvalStore {
    async fn find_phases(&self) -> StoreResult<Vec<Phase>> {
        let inner = self.inner.read().unwrap();
        let mut phases = inner.phases.clone();
        phases.sort_by_key(|p| p.order);
        Ok(phases)
    }

    async fn find_categories(&self, phase_id: PhaseId) -> StoreResult<Vec<Category>> {
        let inner = self.inner.read().unwrap();
        let mut categories: Vec<Category> = inner
            .categories
            .iter()
            .filter(|c| c.phase_id == phase_id)
            .cloned()
            .collect();
        categories.sort_by_key(|c| c.order);
        Ok(categories)
    }

    async fn find_grades(
        &self,
        subject: UserId,
        selection: GradeSelection,
    ) -> StoreResult<Vec<Grade>> {
        let inner = self.inner.read().unwrap();
        let mut grades: Vec<Grade> = inner
            .grades
            .iter()
            .filter(|g| g.user_id == subject)
            .filter(|g| match selection {
                GradeSelection::Both => true,
                GradeSelection::UserEval => g.user_eval.is_some(),
                GradeSelection::ValidatorEval => g.validator_eval.is_some(),
            })
            .cloned()
            .map(|mut g| {
                // Field projection: the unselected channel is not returned
                match selection {
                    GradeSelection::Both => {}
                    GradeSelection::UserEval => g.validator_eval = None,
                    GradeSelection::ValidatorEval => g.user_eval = None,
                }
                g
            })
            .collect();
        grades.sort_by_key(|g| g.order);
        Ok(grades)
    }

    async fn find_user(&self, id: UserId) -> StoreResult<Option<User>> {
        let inner = self.inner.read().unwrap();
        Ok(inner.users.get(&id).cloned())
    }

    async fn find_user_by_token(&self, token: &str) -> StoreResult<Option<User>> {
        let inner = self.inner.read().unwrap();
        Ok(inner
            .sessions
            .get(token)
            .and_then(|id| inner.users.get(id))
            .cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded_store() -> (MemoryEvalStore, UserId, PhaseId) {
        let store = MemoryEvalStore::new();
        let user = User::new("Ada", "Lovelace", "ada@example.org");
        let user_id = user.id;
        store.insert_user(user);

        let phase = Phase::new("Core", 0);
        let phase_id = phase.id;
        store.insert_phase(phase);
        store.insert_phase(Phase::new("Advanced", 1));

        let cat = Category::new(
            phase_id,
            "Algorithms",
            vec!["Recursion".to_string(), "Sorting".to_string()],
            0,
        );
        let cat_id = cat.id;
        store.insert_category(cat);

        store.insert_grade(Grade::new(user_id, cat_id, 0).with_user_eval("B"));

        (store, user_id, phase_id)
    }

    #[tokio::test]
    async fn test_phases_ordered() {
        let store = MemoryEvalStore::new();
        store.insert_phase(Phase::new("Second", 5));
        store.insert_phase(Phase::new("First", 1));

        let phases = store.find_phases().await.unwrap();
        assert_eq!(phases[0].title, "First");
        assert_eq!(phases[1].title, "Second");
    }

    #[tokio::test]
    async fn test_categories_scoped_to_phase() {
        let (store, _, phase_id) = seeded_store();
        let other = Phase::new("Other", 9);
        let other_id = other.id;
        store.insert_phase(other);

        assert_eq!(store.find_categories(phase_id).await.unwrap().len(), 1);
        assert!(store.find_categories(other_id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_self_selection_restricts_and_projects() {
        let (store, user_id, phase_id) = seeded_store();
        let validated = Category::new(phase_id, "Databases", vec![], 1);
        let validated_id = validated.id;
        store.insert_category(validated);
        store.insert_grade(Grade::new(user_id, validated_id, 1).with_validator_eval("A"));

        let grades = store
            .find_grades(user_id, GradeSelection::UserEval)
            .await
            .unwrap();
        // Only the self-evaluated grade survives, validator channel cleared
        assert_eq!(grades.len(), 1);
        assert_eq!(grades[0].user_eval.as_deref(), Some("B"));
        assert_eq!(grades[0].validator_eval, None);

        let grades = store
            .find_grades(user_id, GradeSelection::ValidatorEval)
            .await
            .unwrap();
        assert_eq!(grades.len(), 1);
        assert_eq!(grades[0].category_id, validated_id);
        assert_eq!(grades[0].user_eval, None);

        let grades = store
            .find_grades(user_id, GradeSelection::Both)
            .await
            .unwrap();
        assert_eq!(grades.len(), 2);
    }

    #[tokio::test]
    async fn test_grades_scoped_to_subject() {
        let (store, _, phase_id) = seeded_store();
        let stranger = User::new("Grace", "Hopper", "grace@example.org");
        let stranger_id = stranger.id;
        store.insert_user(stranger);

        let cat = Category::new(phase_id, "Compilers", vec![], 2);
        let cat_id = cat.id;
        store.insert_category(cat);
        store.insert_grade(Grade::new(stranger_id, cat_id, 0).with_user_eval("A"));

        let grades = store
            .find_grades(stranger_id, GradeSelection::Both)
            .await
            .unwrap();
        assert_eq!(grades.len(), 1);
        assert_eq!(grades[0].category_id, cat_id);
    }

    #[tokio::test]
    async fn test_token_lookup() {
        let (store, user_id, _) = seeded_store();
        store.insert_session("tok-1", user_id);

        let user = store.find_user_by_token("tok-1").await.unwrap();
        assert_eq!(user.map(|u| u.id), Some(user_id));
        assert!(store.find_user_by_token("unknown").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_from_json_file() {
        let seed = SeedData {
            users: vec![User::new("Ada", "Lovelace", "ada@example.org")],
            phases: vec![Phase::new("Core", 0)],
            ..Default::default()
        };
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("seed.json");
        std::fs::write(&path, serde_json::to_vec(&seed).unwrap()).unwrap();

        let store = MemoryEvalStore::from_json_file(&path).await.unwrap();
        assert_eq!(store.find_phases().await.unwrap().len(), 1);
    }
}
