//! Phase records

use crate::PhaseId;
use serde::{Deserialize, Serialize};

/// A top-level ordered section of the evaluation record.
///
/// Phases are created and ordered upstream; the export pipeline only
/// reads them. Each phase owns an ordered sequence of categories,
/// fetched separately by phase identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Phase {
    /// Phase identity
    pub id: PhaseId,
    /// Phase title as shown in the rendered document
    pub title: String,
    /// Display order among phases
    pub order: u32,
}

impl Phase {
    /// Create a new phase with a fresh identity
    pub fn new(title: impl Into<String>, order: u32) -> Self {
        Self {
            id: PhaseId::new(),
            title: title.into(),
            order,
        }
    }
}
