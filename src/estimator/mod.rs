//! File property estimation module.

mod size_heuristic;

pub use size_heuristic::{estimate, estimate_all, DOCUMENT_ESTIMATE};
