//! partquote-rs - Instant quotes for uploaded manufacturing files.
//!
//! This library estimates rough part properties from uploaded design files,
//! prices them with a chosen material and options, and projects a delivery
//! date on a working-day calendar. Storage, authentication and file hosting
//! are left to the caller.
//!
//! # Example
//!
//! ```no_run
//! use partquote_rs::{quote_files, FileDescriptor, OptionSet};
//!
//! let files = vec![FileDescriptor::new("bracket.stl", 250 * 1024)];
//! let outcome = quote_files(&files, &OptionSet::new("PETG", 5)).unwrap();
//! println!("${:.2}", outcome.quote().estimated_price);
//! ```

pub mod config;
pub mod delivery;
pub mod engine;
pub mod error;
pub mod estimator;
pub mod model;
pub mod order;
pub mod pricing;
pub mod validation;

// Re-exports for convenience
pub use config::{MaterialPolicy, PricingConfig};
pub use delivery::{project_delivery, project_delivery_at};
pub use engine::{QuoteEngine, QuoteRequest};
pub use error::{QuoteError, Result};
pub use estimator::estimate;
pub use model::{
    CostBreakdown, CostRange, FileDescriptor, FileKind, MaterialProfile, MaterialSource, OptionSet,
    PhysicalEstimate, PointQuote, PriceQuote, QuoteOutcome, ResolvedMaterial,
};
pub use order::{submit_order, OrderRecord, OrderStore, RetryPolicy};
pub use pricing::{price, price_one, MaterialCatalog};
pub use validation::{validate_options, ValidationResult};

/// Quote files with the built-in catalog and default pricing, starting today.
///
/// This is the high-level entry point:
/// 1. Validate the options
/// 2. Estimate each file
/// 3. Resolve the material (strictly)
/// 4. Price the order and project delivery
pub fn quote_files(files: &[FileDescriptor], options: &OptionSet) -> Result<QuoteOutcome> {
    QuoteEngine::default().quote_now(files, options)
}
