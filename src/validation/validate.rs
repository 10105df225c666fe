//! Boundary validation for quote requests.

use crate::error::{QuoteError, Result};
use crate::model::{FileDescriptor, MultiplierPricing, OptionSet};

/// Validation result with warnings.
#[derive(Debug, Default)]
pub struct ValidationResult {
    /// Whether validation passed.
    pub passed: bool,
    /// Warning messages.
    pub warnings: Vec<String>,
    /// Error messages.
    pub errors: Vec<String>,
}

impl ValidationResult {
    /// Create a passing result.
    pub fn ok() -> Self {
        Self {
            passed: true,
            ..Default::default()
        }
    }

    /// Add a warning.
    pub fn add_warning(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }

    /// Add an error.
    pub fn add_error(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
        self.passed = false;
    }

    /// Merge another result into this one.
    pub fn merge(&mut self, other: ValidationResult) {
        self.warnings.extend(other.warnings);
        self.errors.extend(other.errors);
        if !other.passed {
            self.passed = false;
        }
    }
}

/// Reject options the cost model cannot price.
pub fn validate_options(options: &OptionSet) -> Result<()> {
    if options.quantity < 1 {
        return Err(QuoteError::malformed(
            "quantity",
            "an integer >= 1",
            options.quantity,
        ));
    }
    if options.quantity > u32::MAX as i64 {
        return Err(QuoteError::malformed(
            "quantity",
            format!("an integer <= {}", u32::MAX),
            options.quantity,
        ));
    }

    if let Some(infill) = options.infill_percentage {
        if !(0.0..=100.0).contains(&infill) {
            return Err(QuoteError::malformed(
                "infill_percentage",
                "a percentage within [0, 100]",
                infill,
            ));
        }
    }

    if let Some(profile) = &options.material_override {
        profile.validate("material_override")?;
    }

    if let Some(finish) = &options.surface_finish {
        validate_multiplier("surface_finish.pricing.multiplier", finish.pricing)?;
    }
    if let Some(marking) = &options.part_marking {
        validate_multiplier("part_marking.pricing.multiplier", marking.pricing)?;
    }

    Ok(())
}

fn validate_multiplier(field: &str, pricing: Option<MultiplierPricing>) -> Result<()> {
    match pricing {
        Some(MultiplierPricing { multiplier }) if !multiplier.is_finite() || multiplier <= 0.0 => {
            Err(QuoteError::malformed(field, "a positive number", multiplier))
        }
        _ => Ok(()),
    }
}

/// Check a whole request before quoting.
///
/// Option problems are errors and fail the result; file findings are
/// warnings only.
pub fn review_request(files: &[FileDescriptor], options: &OptionSet) -> ValidationResult {
    let mut result = ValidationResult::ok();

    if let Err(err) = validate_options(options) {
        result.add_error(format!("[E{}] {}", err.code_value(), err));
    }
    result.merge(review_files(files));

    result
}

/// Review uploaded files for things worth telling the customer.
///
/// Nothing here blocks a quote: unrecognized files are priced with the
/// document defaults.
pub fn review_files(files: &[FileDescriptor]) -> ValidationResult {
    let mut result = ValidationResult::ok();

    for (idx, file) in files.iter().enumerate() {
        result.merge(review_file(file, idx + 1));
    }

    result
}

/// Review a single file.
pub fn review_file(file: &FileDescriptor, file_num: usize) -> ValidationResult {
    let mut result = ValidationResult::ok();

    if file.name.trim().is_empty() {
        result.add_warning(format!("File {}: Missing file name", file_num));
    }

    if file.size_bytes == 0 {
        result.add_warning(format!(
            "File {} ({}): Empty file, minimum part size assumed",
            file_num, file.name
        ));
    }

    let extension = file.extension();
    if extension.is_empty() {
        result.add_warning(format!(
            "File {} ({}): No file extension, priced as a document",
            file_num, file.name
        ));
    } else if !file.kind().is_model() {
        result.add_warning(format!(
            "File {} ({}): '.{}' is not a 3D model, default part size assumed",
            file_num, file.name, extension
        ));
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{MaterialProfile, SurfaceFinish};

    // ==================== ValidationResult tests ====================

    #[test]
    fn test_validation_result_ok() {
        let result = ValidationResult::ok();
        assert!(result.passed);
        assert!(result.errors.is_empty());
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_validation_result_merge() {
        let mut result = ValidationResult::ok();
        let mut other = ValidationResult::ok();
        other.add_warning("heads up");
        other.add_error("broken");
        result.merge(other);
        assert!(!result.passed);
        assert_eq!(result.warnings, vec!["heads up"]);
        assert_eq!(result.errors, vec!["broken"]);
    }

    // ==================== Option tests ====================

    #[test]
    fn test_default_options_valid() {
        assert!(validate_options(&OptionSet::default()).is_ok());
    }

    #[test]
    fn test_rejects_non_positive_quantity() {
        for quantity in [0, -1, -100] {
            let err = validate_options(&OptionSet::new("PLA", quantity)).unwrap_err();
            assert!(matches!(err, QuoteError::MalformedOption { ref field, .. } if field == "quantity"));
        }
    }

    #[test]
    fn test_rejects_infill_out_of_range() {
        for infill in [-5.0, 100.5, f64::NAN] {
            let options = OptionSet {
                infill_percentage: Some(infill),
                ..Default::default()
            };
            assert!(validate_options(&options).is_err(), "infill {} accepted", infill);
        }

        let options = OptionSet {
            infill_percentage: Some(100.0),
            ..Default::default()
        };
        assert!(validate_options(&options).is_ok());
    }

    #[test]
    fn test_rejects_bad_multiplier() {
        let options = OptionSet {
            surface_finish: Some(SurfaceFinish {
                name: "anodized".to_string(),
                pricing: Some(MultiplierPricing { multiplier: 0.0 }),
            }),
            ..Default::default()
        };
        let err = validate_options(&options).unwrap_err();
        assert!(err.to_string().contains("surface_finish.pricing.multiplier"));
    }

    #[test]
    fn test_rejects_bad_material_override() {
        let options = OptionSet {
            material_override: Some(MaterialProfile::new(0.05, 1.2, 0.0, 1.0)),
            ..Default::default()
        };
        let err = validate_options(&options).unwrap_err();
        assert!(err.to_string().contains("material_override.setup_cost"));
    }

    // ==================== Request review tests ====================

    #[test]
    fn test_review_request_bad_quantity_fails() {
        let files = [FileDescriptor::new("drawing.pdf", 1000)];
        let result = review_request(&files, &OptionSet::new("PLA", 0));
        assert!(!result.passed);
        assert_eq!(result.errors.len(), 1);
        assert!(result.errors[0].starts_with("[E101]"));
        assert!(result.errors[0].contains("quantity"));
        // File findings are still reported alongside
        assert_eq!(result.warnings.len(), 1);
    }

    #[test]
    fn test_review_request_valid_passes() {
        let files = [FileDescriptor::new("bracket.stl", 1000)];
        let result = review_request(&files, &OptionSet::new("PETG", 3));
        assert!(result.passed);
        assert!(result.errors.is_empty());
        assert!(result.warnings.is_empty());
    }

    // ==================== File review tests ====================

    #[test]
    fn test_review_clean_files() {
        let result = review_files(&[
            FileDescriptor::new("a.stl", 1000),
            FileDescriptor::new("b.3mf", 1000),
        ]);
        assert!(result.passed);
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_review_warns_but_passes() {
        let result = review_files(&[
            FileDescriptor::new("drawing.pdf", 1000),
            FileDescriptor::new("empty.stl", 0),
            FileDescriptor::new("Makefile", 10),
        ]);
        assert!(result.passed);
        assert_eq!(result.warnings.len(), 3);
        assert!(result.warnings[0].contains("'.pdf' is not a 3D model"));
        assert!(result.warnings[1].contains("Empty file"));
        assert!(result.warnings[2].contains("No file extension"));
    }
}
