//! Error types for quoting and order submission.

use thiserror::Error;

/// Error codes for quote processing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Material not in the catalog and no override supplied (E100)
    UnknownMaterial = 100,
    /// Option value outside its accepted range (E101)
    MalformedOption = 101,
    /// Pricing configuration rejected (E102)
    InvalidConfig = 102,
    /// Production time is negative or not a number (E200)
    InvalidProductionTime = 200,
    /// Delivery date would fall past the end of the calendar (E201)
    DeliveryOutOfRange = 201,
    /// Order store refused or kept failing the write (E300)
    StoreFailure = 300,
    /// File or serialization problem (-1)
    Io = -1,
}

/// Main error type for the quoting core.
#[derive(Debug, Error)]
pub enum QuoteError {
    #[error("Unknown material '{name}': not in catalog and no override supplied")]
    UnknownMaterial { name: String },

    #[error("Invalid value for '{field}': expected {expected}, got '{value}'")]
    MalformedOption {
        field: String,
        expected: String,
        value: String,
    },

    #[error("Invalid pricing configuration '{field}': {message}")]
    InvalidConfig { field: String, message: String },

    #[error("Invalid production time: {hours} hours")]
    InvalidProductionTime { hours: f64 },

    #[error("Production time of {hours} hours puts delivery beyond the supported calendar")]
    DeliveryOutOfRange { hours: f64 },

    #[error("Order store error: {message}")]
    Store { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl QuoteError {
    /// Shorthand for a [`QuoteError::MalformedOption`].
    pub fn malformed(
        field: impl Into<String>,
        expected: impl Into<String>,
        value: impl ToString,
    ) -> Self {
        QuoteError::MalformedOption {
            field: field.into(),
            expected: expected.into(),
            value: value.to_string(),
        }
    }

    /// Get the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            QuoteError::UnknownMaterial { .. } => ErrorCode::UnknownMaterial,
            QuoteError::MalformedOption { .. } => ErrorCode::MalformedOption,
            QuoteError::InvalidConfig { .. } => ErrorCode::InvalidConfig,
            QuoteError::InvalidProductionTime { .. } => ErrorCode::InvalidProductionTime,
            QuoteError::DeliveryOutOfRange { .. } => ErrorCode::DeliveryOutOfRange,
            QuoteError::Store { .. } => ErrorCode::StoreFailure,
            QuoteError::Io(_) => ErrorCode::Io,
            QuoteError::Json(_) => ErrorCode::Io,
        }
    }

    /// Get the numeric error code value.
    pub fn code_value(&self) -> i32 {
        self.code() as i32
    }
}

/// Result type alias for quoting operations.
pub type Result<T> = std::result::Result<T, QuoteError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        let err = QuoteError::UnknownMaterial {
            name: "Unobtainium".to_string(),
        };
        assert_eq!(err.code(), ErrorCode::UnknownMaterial);
        assert_eq!(err.code_value(), 100);

        let err = QuoteError::malformed("quantity", "an integer >= 1", -3);
        assert_eq!(err.code_value(), 101);
        assert_eq!(
            err.to_string(),
            "Invalid value for 'quantity': expected an integer >= 1, got '-3'"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: QuoteError = io.into();
        assert_eq!(err.code(), ErrorCode::Io);
    }
}
