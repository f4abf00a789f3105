//! The transient export tree

use crate::CategoryId;
use serde::{Deserialize, Serialize};

/// The merged, annotated phase/category structure that drives rendering.
///
/// An `ExportTree` is request-scoped: aggregation builds a fresh one from
/// the fetched hierarchy and grade records, the visibility filter prunes
/// it, and the renderer walks it. It is never persisted or shared across
/// requests, so the filter is free to take it by value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExportTree {
    /// Phases in display order, each carrying its surviving categories
    pub phases: Vec<PhaseNode>,
}

impl ExportTree {
    /// A tree with no phases (renders as a title-only document)
    pub fn empty() -> Self {
        Self::default()
    }

    /// Whether the tree contains no phases
    pub fn is_empty(&self) -> bool {
        self.phases.is_empty()
    }

    /// Total number of categories across all phases
    pub fn category_count(&self) -> usize {
        self.phases.iter().map(|p| p.categories.len()).sum()
    }
}

/// One phase in the export tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhaseNode {
    /// Phase title
    pub title: String,
    /// Categories in display order
    pub categories: Vec<CategoryNode>,
}

/// One category in the export tree, annotated with the subject's
/// evaluation data where a grade record was merged in.
///
/// Both evaluation fields are absent until aggregation attaches them; at
/// most one grade record per (subject, category) contributes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryNode {
    /// Identity of the source category record
    pub id: CategoryId,
    /// Category title
    pub title: String,
    /// Skill labels, in display order
    pub skills: Vec<String>,
    /// Self-evaluation value, attached during aggregation
    pub user_eval: Option<String>,
    /// Validator evaluation value, attached during aggregation
    pub validator_eval: Option<String>,
}

impl CategoryNode {
    /// Build an unannotated node from category data
    pub fn new(id: CategoryId, title: impl Into<String>, skills: Vec<String>) -> Self {
        Self {
            id,
            title: title.into(),
            skills,
            user_eval: None,
            validator_eval: None,
        }
    }
}
