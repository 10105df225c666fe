//! Quote values produced by the pricing core.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::ops::Add;

use super::ResolvedMaterial;
use crate::config::{Fee, Spread};

/// A ranged cost: lower bound, point estimate, upper bound.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CostRange {
    pub min: f64,
    pub estimated: f64,
    pub max: f64,
}

impl CostRange {
    pub const ZERO: CostRange = CostRange {
        min: 0.0,
        estimated: 0.0,
        max: 0.0,
    };

    pub fn new(min: f64, estimated: f64, max: f64) -> Self {
        Self { min, estimated, max }
    }

    /// A range with no uncertainty.
    pub fn point(value: f64) -> Self {
        Self::new(value, value, value)
    }

    /// Spread a non-negative point estimate by the given fractions.
    pub fn widened(point: f64, spread: Spread) -> Self {
        Self::new(point * (1.0 - spread.down), point, point * (1.0 + spread.up))
    }

    /// Multiply every bound by a non-negative factor.
    pub fn scaled(&self, factor: f64) -> Self {
        Self::new(self.min * factor, self.estimated * factor, self.max * factor)
    }

    /// Raise every bound to at least zero.
    pub fn clamped_non_negative(&self) -> Self {
        Self::new(self.min.max(0.0), self.estimated.max(0.0), self.max.max(0.0))
    }

    /// Check min <= estimated <= max.
    pub fn is_ordered(&self) -> bool {
        self.min <= self.estimated && self.estimated <= self.max
    }
}

impl Add for CostRange {
    type Output = CostRange;

    fn add(self, other: CostRange) -> CostRange {
        CostRange::new(
            self.min + other.min,
            self.estimated + other.estimated,
            self.max + other.max,
        )
    }
}

impl std::iter::Sum for CostRange {
    fn sum<I: Iterator<Item = CostRange>>(iter: I) -> Self {
        iter.fold(CostRange::ZERO, Add::add)
    }
}

impl From<Fee> for CostRange {
    fn from(fee: Fee) -> Self {
        CostRange::new(fee.min, fee.amount, fee.max)
    }
}

/// How an add-on charge was priced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChargeBasis {
    /// Fixed fee table.
    Fixed,
    /// Percentage of the per-item price times a database multiplier.
    Multiplier,
    /// Database extra-fee flag.
    FeeFlag,
}

/// One priced add-on, per unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddOnCharge {
    /// Option name, e.g. "tighter_tolerance".
    pub name: String,
    pub per_unit: CostRange,
    pub basis: ChargeBasis,
}

impl AddOnCharge {
    pub fn new(name: impl Into<String>, per_unit: CostRange, basis: ChargeBasis) -> Self {
        Self {
            name: name.into(),
            per_unit,
            basis,
        }
    }
}

/// Order-level cost breakdown.
///
/// Material, labor and add-on totals already include quantity and the
/// quantity discount; setup is flat.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CostBreakdown {
    pub material_cost: CostRange,
    pub labor_cost: CostRange,
    pub setup_cost: f64,
    pub additional_costs: CostRange,
    /// Itemized add-ons, per unit and before discount.
    pub add_ons: Vec<AddOnCharge>,
}

/// A full quote for a set of files and options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceQuote {
    pub min_price: f64,
    pub max_price: f64,
    pub estimated_price: f64,
    pub breakdown: CostBreakdown,
    /// Production hours for the whole order.
    pub estimated_time_hours: f64,
    pub estimated_delivery_date: NaiveDate,
    /// Weight of one set of parts in grams.
    pub weight_grams: f64,
    pub quantity: u32,
    pub quantity_multiplier: f64,
    /// Material actually priced; absent on an empty quote.
    pub material: Option<ResolvedMaterial>,
}

impl PriceQuote {
    /// All-zero quote used when there is nothing to price.
    pub fn empty(today: NaiveDate) -> Self {
        Self {
            min_price: 0.0,
            max_price: 0.0,
            estimated_price: 0.0,
            breakdown: CostBreakdown::default(),
            estimated_time_hours: 0.0,
            estimated_delivery_date: today,
            weight_grams: 0.0,
            quantity: 0,
            quantity_multiplier: 1.0,
            material: None,
        }
    }

    /// Price range as a [`CostRange`].
    pub fn price_range(&self) -> CostRange {
        CostRange::new(self.min_price, self.estimated_price, self.max_price)
    }
}

/// Non-ranged quote for one part, used for instant single-item pricing.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PointQuote {
    pub weight_grams: f64,
    /// Per-unit material cost.
    pub material_cost: f64,
    /// Per-unit labor cost.
    pub labor_cost: f64,
    pub setup_cost: f64,
    /// Per-unit add-on total.
    pub additional_costs: f64,
    /// Production hours per unit.
    pub time_hours_per_unit: f64,
    pub quantity: u32,
    pub quantity_multiplier: f64,
    /// Order total: discounted per-unit costs times quantity, plus setup.
    pub total_price: f64,
}

/// Result of a quote request that did not fail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", content = "quote", rename_all = "snake_case")]
pub enum QuoteOutcome {
    /// No files were given; the quote is the all-zero placeholder.
    NoInput(PriceQuote),
    /// A computed quote, possibly with a zero price.
    Quoted(PriceQuote),
}

impl QuoteOutcome {
    /// The quote, placeholder or computed.
    pub fn quote(&self) -> &PriceQuote {
        match self {
            QuoteOutcome::NoInput(quote) | QuoteOutcome::Quoted(quote) => quote,
        }
    }

    /// Check if a real quote was computed.
    pub fn is_quoted(&self) -> bool {
        matches!(self, QuoteOutcome::Quoted(_))
    }

    /// The computed quote, `None` when there was no input.
    pub fn into_quote(self) -> Option<PriceQuote> {
        match self {
            QuoteOutcome::Quoted(quote) => Some(quote),
            QuoteOutcome::NoInput(_) => None,
        }
    }
}
