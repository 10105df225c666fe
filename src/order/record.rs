//! OrderRecord - The row written to the external order store.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{QuoteError, Result};
use crate::model::{FileDescriptor, ManufacturingProcess, OptionSet, QuoteOutcome};

/// One uploaded file attached to an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLineItem {
    pub file_name: String,
    pub size_bytes: u64,
}

/// Order as stored externally. Field names follow the store's schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderRecord {
    pub user_id: String,
    /// Comma-separated names of all files in the order.
    pub file_name: String,
    pub material: String,
    pub process: ManufacturingProcess,
    pub quantity: u32,
    /// Estimated order price.
    pub price: f64,
    /// Serialized as an ISO date without time.
    pub estimated_delivery: NaiveDate,
    pub estimated_time_hours: f64,
    /// Weight of one set of parts in grams.
    pub weight: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub line_items: Vec<OrderLineItem>,
}

impl OrderRecord {
    /// Build the record for a computed quote.
    ///
    /// The submitting user is passed in explicitly. A [`QuoteOutcome::NoInput`]
    /// cannot be ordered.
    pub fn from_quote(
        user_id: &str,
        files: &[FileDescriptor],
        options: &OptionSet,
        outcome: &QuoteOutcome,
        notes: Option<String>,
    ) -> Result<Self> {
        let user_id = user_id.trim();
        if user_id.is_empty() {
            return Err(QuoteError::malformed("user_id", "a non-empty user id", ""));
        }

        let QuoteOutcome::Quoted(quote) = outcome else {
            return Err(QuoteError::malformed("files", "at least one file", 0));
        };

        let material = quote
            .material
            .as_ref()
            .map(|m| m.name.clone())
            .unwrap_or_else(|| options.material.clone());

        let file_name = files
            .iter()
            .map(|f| f.name.as_str())
            .collect::<Vec<_>>()
            .join(", ");

        Ok(Self {
            user_id: user_id.to_string(),
            file_name,
            material,
            process: options.process,
            quantity: quote.quantity,
            price: quote.estimated_price,
            estimated_delivery: quote.estimated_delivery_date,
            estimated_time_hours: quote.estimated_time_hours,
            weight: quote.weight_grams,
            notes: notes.filter(|n| !n.trim().is_empty()),
            line_items: files
                .iter()
                .map(|f| OrderLineItem {
                    file_name: f.name.clone(),
                    size_bytes: f.size_bytes,
                })
                .collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PriceQuote;

    fn quoted() -> QuoteOutcome {
        let mut quote = PriceQuote::empty(NaiveDate::from_ymd_opt(2025, 3, 5).unwrap());
        quote.estimated_price = 42.5;
        quote.quantity = 3;
        quote.weight_grams = 1.24;
        QuoteOutcome::Quoted(quote)
    }

    #[test]
    fn test_record_fields() {
        let files = vec![
            FileDescriptor::new("a.stl", 10),
            FileDescriptor::new("b.pdf", 20),
        ];
        let record = OrderRecord::from_quote(
            "user-42",
            &files,
            &OptionSet::new("PETG", 3),
            &quoted(),
            Some("rush please".to_string()),
        )
        .unwrap();

        assert_eq!(record.file_name, "a.stl, b.pdf");
        assert_eq!(record.material, "PETG");
        assert_eq!(record.line_items.len(), 2);

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["price"], 42.5);
        assert_eq!(json["estimated_delivery"], "2025-03-05");
        assert_eq!(json["quantity"], 3);
        assert_eq!(json["file_name"], "a.stl, b.pdf");
        assert_eq!(json["process"], "3d_printing");
        assert_eq!(json["notes"], "rush please");
    }

    #[test]
    fn test_blank_notes_dropped() {
        let record = OrderRecord::from_quote(
            "user-42",
            &[FileDescriptor::new("a.stl", 10)],
            &OptionSet::default(),
            &quoted(),
            Some("  ".to_string()),
        )
        .unwrap();
        assert!(record.notes.is_none());
        assert!(serde_json::to_value(&record).unwrap().get("notes").is_none());
    }

    #[test]
    fn test_requires_user() {
        let err = OrderRecord::from_quote(" ", &[], &OptionSet::default(), &quoted(), None)
            .unwrap_err();
        assert!(err.to_string().contains("user_id"));
    }

    #[test]
    fn test_no_input_cannot_be_ordered() {
        let outcome = QuoteOutcome::NoInput(PriceQuote::empty(
            NaiveDate::from_ymd_opt(2025, 3, 3).unwrap(),
        ));
        let err = OrderRecord::from_quote("user-42", &[], &OptionSet::default(), &outcome, None)
            .unwrap_err();
        assert!(err.to_string().contains("files"));
    }
}
