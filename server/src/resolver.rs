//! Subject resolution for export requests.
//!
//! The subject of an export is either a caller-identified user (path
//! parameter) or the authenticated requester behind the session token.
//! Resolution is the only place identity is touched; the rest of the
//! pipeline works with the resolved `User` record.

use async_trait::async_trait;
use eval_model::{User, UserId};
use std::sync::Arc;
use store::{EvalStore, StoreError};
use thiserror::Error;

/// Errors that can occur while resolving the export subject
#[derive(Debug, Error)]
pub enum ResolveError {
    /// The identified user does not exist
    #[error("User not found")]
    NotFound,

    /// No subject id and no usable session token
    #[error("Not authenticated")]
    Unauthenticated,

    /// The subject identifier is not a valid user id
    #[error("Invalid subject identifier: {0}")]
    InvalidSubject(String),

    /// Lookup failed in the backing store
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Yields the subject user for an export request.
#[async_trait]
pub trait SubjectResolver: Send + Sync {
    /// Resolve the export subject.
    ///
    /// An explicit subject id wins over the session token; the token is
    /// only consulted when no id is given.
    async fn resolve(
        &self,
        subject: Option<&str>,
        token: Option<&str>,
    ) -> Result<User, ResolveError>;
}

/// Resolver backed by the evaluation store's user collection.
pub struct StoreResolver {
    store: Arc<dyn EvalStore>,
}

impl StoreResolver {
    pub fn new(store: Arc<dyn EvalStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl SubjectResolver for StoreResolver {
    async fn resolve(
        &self,
        subject: Option<&str>,
        token: Option<&str>,
    ) -> Result<User, ResolveError> {
        if let Some(raw) = subject {
            let id = UserId::parse(raw)
                .ok_or_else(|| ResolveError::InvalidSubject(raw.to_string()))?;
            return self
                .store
                .find_user(id)
                .await?
                .ok_or(ResolveError::NotFound);
        }

        let token = token.ok_or(ResolveError::Unauthenticated)?;
        self.store
            .find_user_by_token(token)
            .await?
            .ok_or(ResolveError::Unauthenticated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use store::MemoryEvalStore;

    fn setup() -> (Arc<MemoryEvalStore>, User) {
        let store = Arc::new(MemoryEvalStore::new());
        let user = User::new("Ada", "Lovelace", "ada@example.org");
        store.insert_user(user.clone());
        store.insert_session("tok-1", user.id);
        (store, user)
    }

    #[tokio::test]
    async fn test_explicit_subject_wins_over_token() {
        let (store, user) = setup();
        let other = User::new("Grace", "Hopper", "grace@example.org");
        store.insert_user(other.clone());

        let resolver = StoreResolver::new(store);
        let resolved = resolver
            .resolve(Some(&other.id.to_string()), Some("tok-1"))
            .await
            .unwrap();
        assert_eq!(resolved.id, other.id);
        let _ = user;
    }

    #[tokio::test]
    async fn test_token_fallback() {
        let (store, user) = setup();
        let resolver = StoreResolver::new(store);
        let resolved = resolver.resolve(None, Some("tok-1")).await.unwrap();
        assert_eq!(resolved.id, user.id);
    }

    #[tokio::test]
    async fn test_no_subject_no_token() {
        let (store, _) = setup();
        let resolver = StoreResolver::new(store);
        let err = resolver.resolve(None, None).await.unwrap_err();
        assert!(matches!(err, ResolveError::Unauthenticated));
    }

    #[tokio::test]
    async fn test_unknown_subject_id() {
        let (store, _) = setup();
        let resolver = StoreResolver::new(store);
        let err = resolver
            .resolve(Some(&UserId::new().to_string()), None)
            .await
            .unwrap_err();
        assert!(matches!(err, ResolveError::NotFound));
    }

    #[tokio::test]
    async fn test_malformed_subject_id() {
        let (store, _) = setup();
        let resolver = StoreResolver::new(store);
        let err = resolver.resolve(Some("not-a-uuid"), None).await.unwrap_err();
        assert!(matches!(err, ResolveError::InvalidSubject(_)));
    }
}
