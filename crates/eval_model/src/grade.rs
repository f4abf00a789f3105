//! Grade records

use crate::{CategoryId, UserId};
use serde::{Deserialize, Serialize};

/// A subject's recorded evaluation outcome for one category.
///
/// At most one grade exists per (subject, category) pair. The two
/// evaluation channels are independently nullable: a grade may carry a
/// self-evaluation, a validator evaluation, both, or neither.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Grade {
    /// The evaluated user
    pub user_id: UserId,
    /// The evaluated category
    pub category_id: CategoryId,
    /// Self-evaluation value, if recorded
    pub user_eval: Option<String>,
    /// Validator evaluation value, if recorded
    pub validator_eval: Option<String>,
    /// Display order among the subject's grades
    pub order: u32,
}

impl Grade {
    /// Create a grade with both channels empty
    pub fn new(user_id: UserId, category_id: CategoryId, order: u32) -> Self {
        Self {
            user_id,
            category_id,
            user_eval: None,
            validator_eval: None,
            order,
        }
    }

    /// Set the self-evaluation channel
    pub fn with_user_eval(mut self, value: impl Into<String>) -> Self {
        self.user_eval = Some(value.into());
        self
    }

    /// Set the validator-evaluation channel
    pub fn with_validator_eval(mut self, value: impl Into<String>) -> Self {
        self.validator_eval = Some(value.into());
        self
    }
}
