//! Request validation module.

mod validate;

pub use validate::{review_file, review_files, review_request, validate_options, ValidationResult};
