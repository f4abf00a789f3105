//! The `EvalStore` query trait

use crate::StoreResult;
use async_trait::async_trait;
use eval_model::{Category, Grade, GradeSelection, Phase, PhaseId, User, UserId};

/// Query interface over the evaluation-record collections.
///
/// Implementations back onto whatever storage holds the normalized
/// phase/category/grade collections. Every method is an atomic query:
/// it either returns the full result set or fails with a `StoreError`.
/// Ordering guarantees are part of the contract — callers rely on
/// display order and never re-sort.
///
/// Methods take `&self` so implementations can use interior mutability
/// (locks, pools) and be shared behind an `Arc`.
#[async_trait]
pub trait EvalStore: Send + Sync {
    /// All phases, ordered by display order
    async fn find_phases(&self) -> StoreResult<Vec<Phase>>;

    /// The categories belonging to one phase, ordered by display order
    async fn find_categories(&self, phase_id: PhaseId) -> StoreResult<Vec<Category>>;

    /// The subject's grade records, ordered by display order, with
    /// field selection applied.
    ///
    /// `GradeSelection::UserEval` restricts to grades whose self-evaluation
    /// is non-null and clears the validator channel in the returned
    /// records; `ValidatorEval` is symmetric; `Both` returns every grade
    /// with both channels intact.
    async fn find_grades(
        &self,
        subject: UserId,
        selection: GradeSelection,
    ) -> StoreResult<Vec<Grade>>;

    /// Look up a user by identity
    async fn find_user(&self, id: UserId) -> StoreResult<Option<User>>;

    /// Look up the user behind an opaque session token
    async fn find_user_by_token(&self, token: &str) -> StoreResult<Option<User>>;
}
