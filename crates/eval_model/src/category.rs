//! Category records

use crate::{CategoryId, PhaseId};
use serde::{Deserialize, Serialize};

/// A named skill group within a phase.
///
/// A category belongs to exactly one phase and lists its skills as plain
/// labels, in display order. Evaluation data is never stored on the
/// category record itself; it is attached to the per-request export tree
/// during aggregation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    /// Category identity
    pub id: CategoryId,
    /// Owning phase
    pub phase_id: PhaseId,
    /// Category title
    pub title: String,
    /// Skill labels, in display order
    pub skills: Vec<String>,
    /// Display order within the phase
    pub order: u32,
}

impl Category {
    /// Create a new category with a fresh identity
    pub fn new(
        phase_id: PhaseId,
        title: impl Into<String>,
        skills: Vec<String>,
        order: u32,
    ) -> Self {
        Self {
            id: CategoryId::new(),
            phase_id,
            title: title.into(),
            skills,
            order,
        }
    }
}
