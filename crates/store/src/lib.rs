//! Store - Persistence query interface for evaluation records
//!
//! This crate defines the `EvalStore` trait the export pipeline queries
//! for phases, categories, grades, and users, along with an in-memory
//! implementation seeded from a JSON document.

mod error;
mod memory;
mod query;

pub use error::*;
pub use memory::*;
pub use query::*;
