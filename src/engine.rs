//! End-to-end quoting: validate, estimate, resolve, price, project.

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::config::PricingConfig;
use crate::error::Result;
use crate::estimator::{estimate, estimate_all};
use crate::model::{FileDescriptor, OptionSet, PointQuote, PriceQuote, QuoteOutcome};
use crate::pricing::{self, MaterialCatalog};
use crate::validation::{review_files, validate_options};

/// Files plus options, as submitted by the upload form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuoteRequest {
    #[serde(default)]
    pub files: Vec<FileDescriptor>,
    #[serde(default)]
    pub options: OptionSet,
}

impl QuoteRequest {
    /// Load a request from a JSON file.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }
}

/// Pricing configuration and material catalog bundled for quoting.
#[derive(Debug, Clone, Default)]
pub struct QuoteEngine {
    config: PricingConfig,
    catalog: MaterialCatalog,
}

impl QuoteEngine {
    /// Create an engine after validating the configuration.
    pub fn new(config: PricingConfig, catalog: MaterialCatalog) -> Result<Self> {
        config.validate()?;
        Ok(Self { config, catalog })
    }

    pub fn config(&self) -> &PricingConfig {
        &self.config
    }

    pub fn catalog(&self) -> &MaterialCatalog {
        &self.catalog
    }

    /// Quote an order with production starting on `today`.
    ///
    /// An empty file list is not an error: it yields
    /// [`QuoteOutcome::NoInput`] with an all-zero quote dated `today`.
    pub fn quote(
        &self,
        files: &[FileDescriptor],
        options: &OptionSet,
        today: NaiveDate,
    ) -> Result<QuoteOutcome> {
        validate_options(options)?;

        if files.is_empty() {
            return Ok(QuoteOutcome::NoInput(PriceQuote::empty(today)));
        }

        for warning in review_files(files).warnings {
            tracing::warn!("{}", warning);
        }

        let material = self
            .catalog
            .resolve_for(options, self.config.material_policy)?;
        let estimates = estimate_all(files);
        let quote = pricing::price(&estimates, &material, options, &self.config, today)?;

        Ok(QuoteOutcome::Quoted(quote))
    }

    /// Quote an order starting today on the local clock.
    pub fn quote_now(&self, files: &[FileDescriptor], options: &OptionSet) -> Result<QuoteOutcome> {
        self.quote(files, options, Local::now().date_naive())
    }

    /// Quote a whole request.
    pub fn quote_request(&self, request: &QuoteRequest, today: NaiveDate) -> Result<QuoteOutcome> {
        self.quote(&request.files, &request.options, today)
    }

    /// Instant point price for a single file.
    pub fn quote_one(&self, file: &FileDescriptor, options: &OptionSet) -> Result<PointQuote> {
        validate_options(options)?;
        let material = self
            .catalog
            .resolve_for(options, self.config.material_policy)?;
        Ok(pricing::price_one(
            &estimate(file),
            &material.profile,
            options,
            &self.config,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{float_cmp::approx_eq, MaterialPolicy};
    use crate::error::QuoteError;

    fn monday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 3).unwrap()
    }

    #[test]
    fn test_empty_files_is_no_input() {
        let engine = QuoteEngine::default();
        let outcome = engine.quote(&[], &OptionSet::default(), monday()).unwrap();
        assert!(!outcome.is_quoted());
        assert_eq!(outcome.quote(), &PriceQuote::empty(monday()));
    }

    #[test]
    fn test_malformed_options_rejected_before_files_checked() {
        let engine = QuoteEngine::default();
        let err = engine
            .quote(&[], &OptionSet::new("PLA", 0), monday())
            .unwrap_err();
        assert!(matches!(err, QuoteError::MalformedOption { .. }));
    }

    #[test]
    fn test_unknown_material_strict_by_default() {
        let engine = QuoteEngine::default();
        let files = [FileDescriptor::new("part.stl", 100 * 1024)];
        let err = engine
            .quote(&files, &OptionSet::new("Unobtainium", 1), monday())
            .unwrap_err();
        assert!(matches!(err, QuoteError::UnknownMaterial { .. }));
    }

    #[test]
    fn test_unknown_material_fallback_policy() {
        let engine = QuoteEngine::new(
            PricingConfig::new(MaterialPolicy::FallbackToDefault),
            MaterialCatalog::builtin(),
        )
        .unwrap();
        let files = [FileDescriptor::new("part.stl", 100 * 1024)];
        let quote = engine
            .quote(&files, &OptionSet::new("Unobtainium", 1), monday())
            .unwrap()
            .into_quote()
            .unwrap();
        let material = quote.material.unwrap();
        assert_eq!(material.name, "PLA");
        assert!(material.source.is_fallback());
        assert!(approx_eq(quote.estimated_price, 42.562));
    }

    #[test]
    fn test_huge_order_is_an_error_not_a_panic() {
        let engine = QuoteEngine::default();
        let files = [FileDescriptor::new("big.stl", 1_000_000_000)];
        let err = engine
            .quote(&files, &OptionSet::new("PLA", 1_000_000), monday())
            .unwrap_err();
        assert!(matches!(err, QuoteError::DeliveryOutOfRange { .. }));
        assert_eq!(err.code_value(), 201);
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let config = PricingConfig {
            hours_per_working_day: 0.0,
            ..Default::default()
        };
        assert!(QuoteEngine::new(config, MaterialCatalog::builtin()).is_err());
    }

    #[test]
    fn test_quote_one() {
        let engine = QuoteEngine::default();
        let point = engine
            .quote_one(&FileDescriptor::new("part.stl", 100 * 1024), &OptionSet::default())
            .unwrap();
        assert!(approx_eq(point.total_price, 42.562));
        assert!(approx_eq(point.time_hours_per_unit, 2.5));
    }

    #[test]
    fn test_request_deserializes() {
        let request: QuoteRequest = serde_json::from_str(
            r#"{"files": [{"name": "part.stl", "size_bytes": 102400}], "options": {"quantity": 10}}"#,
        )
        .unwrap();
        assert_eq!(request.files[0].extension, "");
        assert_eq!(request.options.material, "PLA");

        let quote = QuoteEngine::default()
            .quote_request(&request, monday())
            .unwrap()
            .into_quote()
            .unwrap();
        assert_eq!(quote.quantity, 10);
        assert_eq!(quote.quantity_multiplier, 0.85);
    }
}
