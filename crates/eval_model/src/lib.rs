//! Evaluation Model - Core types for the skills-evaluation record
//!
//! This crate provides the domain types shared by the export pipeline:
//! the phase/category hierarchy, per-user grade records, visibility modes,
//! and the transient `ExportTree` that aggregation produces and the
//! renderer consumes.

mod category;
mod grade;
mod ids;
mod phase;
mod tree;
mod user;
mod visibility;

pub use category::*;
pub use grade::*;
pub use ids::*;
pub use phase::*;
pub use tree::*;
pub use user::*;
pub use visibility::*;
