//! Profile export service library.
//!
//! The HTTP surface of the export pipeline: routes, subject resolution,
//! and the orchestrator that streams the rendered PDF.

pub mod export;
pub mod resolver;
pub mod routes;
