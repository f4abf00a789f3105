//! Export Engine - Aggregation and visibility filtering
//!
//! This crate turns the normalized phase/category/grade collections into
//! the per-request `ExportTree`:
//!
//! - `aggregate`: fetches the hierarchy and the subject's grades
//!   concurrently and merges them by category identity.
//! - `filter_tree`: prunes the tree down to what the requested
//!   visibility mode allows.

mod aggregate;
mod filter;

pub use aggregate::*;
pub use filter::*;
