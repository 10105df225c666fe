//! Pricing constants and the tunable pricing configuration.

use crate::error::{QuoteError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Floating-point comparison epsilon.
pub const EPS: f64 = 0.0001;

/// Bytes per kilobyte used by the size heuristic.
pub const BYTES_PER_KB: f64 = 1024.0;

/// Default infill assumed for every estimated part (percent).
pub const DEFAULT_INFILL_PERCENTAGE: f64 = 20.0;

/// Shop labor rate in dollars per hour.
pub const LABOR_RATE_PER_HOUR: f64 = 15.0;

/// Machine hours per cubic centimeter of part volume.
pub const HOURS_PER_CM3: f64 = 0.5;

/// Extra time per complexity level above 1.
pub const COMPLEXITY_TIME_STEP: f64 = 0.3;

/// Time multiplier when support structures are needed.
pub const SUPPORT_TIME_MULTIPLIER: f64 = 1.5;

/// Working hours in one production day.
pub const HOURS_PER_WORKING_DAY: f64 = 8.0;

/// Safety buffer as a fraction of production days.
pub const BUFFER_RATIO: f64 = 0.5;

/// Minimum buffer in working days.
pub const MIN_BUFFER_DAYS: u32 = 1;

/// Share of the per-item price used for multiplier-priced surface finishes.
pub const SURFACE_FINISH_PERCENTAGE: f64 = 0.05;

/// Share of the per-item price used for multiplier-priced part marking.
pub const PART_MARKING_PERCENTAGE: f64 = 0.03;

/// Name of the material substituted under [`MaterialPolicy::FallbackToDefault`].
pub const DEFAULT_MATERIAL: &str = "PLA";

/// What to do when a requested material cannot be resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaterialPolicy {
    /// Fail with [`QuoteError::UnknownMaterial`].
    #[default]
    Strict,
    /// Price with [`DEFAULT_MATERIAL`] and flag the substitution.
    FallbackToDefault,
}

impl std::fmt::Display for MaterialPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MaterialPolicy::Strict => write!(f, "strict"),
            MaterialPolicy::FallbackToDefault => write!(f, "fallback_to_default"),
        }
    }
}

/// Relative downward/upward spread of a ranged estimate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Spread {
    /// Fraction removed for the lower bound (0.2 = -20%).
    pub down: f64,
    /// Fraction added for the upper bound (0.3 = +30%).
    pub up: f64,
}

impl Spread {
    pub const fn new(down: f64, up: f64) -> Self {
        Self { down, up }
    }
}

/// A quantity threshold and the multiplier applied from it upwards.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DiscountTier {
    pub min_quantity: u32,
    pub multiplier: f64,
}

/// A fixed add-on charge per unit: point amount plus its uncertainty bounds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Fee {
    pub amount: f64,
    pub min: f64,
    pub max: f64,
}

impl Fee {
    pub const fn new(amount: f64, min: f64, max: f64) -> Self {
        Self { amount, min, max }
    }
}

/// Fixed per-unit fees used when no database-sourced pricing is supplied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AddOnFees {
    pub tighter_tolerance: Fee,
    pub threads: Fee,
    pub inserts: Fee,
    pub assembly_test: Fee,
    pub ship_in_assembly: Fee,
    pub premium_appearance: Fee,
    pub surface_finish: Fee,
    pub part_marking: Fee,
    pub inspection: Fee,
    pub inspection_with_extra_fee: Fee,
    pub inspection_without_extra_fee: Fee,
    pub itar: Fee,
}

impl Default for AddOnFees {
    fn default() -> Self {
        Self {
            tighter_tolerance: Fee::new(10.0, 7.0, 15.0),
            threads: Fee::new(8.0, 5.0, 12.0),
            inserts: Fee::new(12.0, 8.0, 18.0),
            assembly_test: Fee::new(20.0, 15.0, 30.0),
            ship_in_assembly: Fee::new(30.0, 20.0, 45.0),
            premium_appearance: Fee::new(15.0, 10.0, 25.0),
            surface_finish: Fee::new(5.0, 3.0, 8.0),
            part_marking: Fee::new(5.0, 3.0, 8.0),
            inspection: Fee::new(10.0, 7.0, 15.0),
            inspection_with_extra_fee: Fee::new(15.0, 10.0, 25.0),
            inspection_without_extra_fee: Fee::new(5.0, 3.0, 8.0),
            itar: Fee::new(20.0, 15.0, 30.0),
        }
    }
}

impl AddOnFees {
    fn named(&self) -> [(&'static str, &Fee); 12] {
        [
            ("tighter_tolerance", &self.tighter_tolerance),
            ("threads", &self.threads),
            ("inserts", &self.inserts),
            ("assembly_test", &self.assembly_test),
            ("ship_in_assembly", &self.ship_in_assembly),
            ("premium_appearance", &self.premium_appearance),
            ("surface_finish", &self.surface_finish),
            ("part_marking", &self.part_marking),
            ("inspection", &self.inspection),
            ("inspection_with_extra_fee", &self.inspection_with_extra_fee),
            ("inspection_without_extra_fee", &self.inspection_without_extra_fee),
            ("itar", &self.itar),
        ]
    }
}

/// Pricing configuration.
///
/// Every field has a default, so a JSON file only needs the keys it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PricingConfig {
    /// Labor rate in dollars per hour.
    pub labor_rate_per_hour: f64,
    /// Machine hours per cm³ of volume.
    pub hours_per_cm3: f64,
    /// Extra time fraction per complexity level above 1.
    pub complexity_time_step: f64,
    /// Time multiplier for parts needing supports.
    pub support_time_multiplier: f64,
    /// Uncertainty spread on material cost.
    pub material_spread: Spread,
    /// Uncertainty spread on labor cost.
    pub labor_spread: Spread,
    /// Quantity discount tiers, any order.
    pub discount_tiers: Vec<DiscountTier>,
    /// Percentage of the per-item price used for multiplier-priced finishes.
    pub surface_finish_percentage: f64,
    /// Percentage of the per-item price used for multiplier-priced marking.
    pub part_marking_percentage: f64,
    /// Fixed add-on fees.
    pub fees: AddOnFees,
    /// Working hours per production day.
    pub hours_per_working_day: f64,
    /// Buffer as a fraction of production days.
    pub buffer_ratio: f64,
    /// Minimum buffer in working days.
    pub min_buffer_days: u32,
    /// Unknown material handling.
    pub material_policy: MaterialPolicy,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            labor_rate_per_hour: LABOR_RATE_PER_HOUR,
            hours_per_cm3: HOURS_PER_CM3,
            complexity_time_step: COMPLEXITY_TIME_STEP,
            support_time_multiplier: SUPPORT_TIME_MULTIPLIER,
            material_spread: Spread::new(0.2, 0.3),
            labor_spread: Spread::new(0.3, 0.4),
            discount_tiers: vec![
                DiscountTier {
                    min_quantity: 10,
                    multiplier: 0.85,
                },
                DiscountTier {
                    min_quantity: 5,
                    multiplier: 0.90,
                },
            ],
            surface_finish_percentage: SURFACE_FINISH_PERCENTAGE,
            part_marking_percentage: PART_MARKING_PERCENTAGE,
            fees: AddOnFees::default(),
            hours_per_working_day: HOURS_PER_WORKING_DAY,
            buffer_ratio: BUFFER_RATIO,
            min_buffer_days: MIN_BUFFER_DAYS,
            material_policy: MaterialPolicy::default(),
        }
    }
}

impl PricingConfig {
    /// Create a default configuration with the given material policy.
    pub fn new(material_policy: MaterialPolicy) -> Self {
        Self {
            material_policy,
            ..Default::default()
        }
    }

    /// Load a configuration from a JSON file and validate it.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: PricingConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations that would break the pricing invariants.
    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("labor_rate_per_hour", self.labor_rate_per_hour),
            ("hours_per_cm3", self.hours_per_cm3),
            ("support_time_multiplier", self.support_time_multiplier),
            ("hours_per_working_day", self.hours_per_working_day),
        ];
        for (field, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(invalid(field, format!("must be > 0, got {}", value)));
            }
        }

        let fractions = [
            ("complexity_time_step", self.complexity_time_step),
            ("surface_finish_percentage", self.surface_finish_percentage),
            ("part_marking_percentage", self.part_marking_percentage),
            ("buffer_ratio", self.buffer_ratio),
            ("material_spread.down", self.material_spread.down),
            ("labor_spread.down", self.labor_spread.down),
        ];
        for (field, value) in fractions {
            if !float_cmp::in_range(value, 0.0, 1.0) {
                return Err(invalid(field, format!("must be within [0, 1], got {}", value)));
            }
        }

        for (field, value) in [
            ("material_spread.up", self.material_spread.up),
            ("labor_spread.up", self.labor_spread.up),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(invalid(field, format!("must be >= 0, got {}", value)));
            }
        }

        for tier in &self.discount_tiers {
            if tier.min_quantity == 0 || !(tier.multiplier > 0.0 && tier.multiplier <= 1.0) {
                return Err(invalid(
                    "discount_tiers",
                    format!(
                        "tier {}+ has multiplier {}, expected (0, 1]",
                        tier.min_quantity, tier.multiplier
                    ),
                ));
            }
        }

        for (name, fee) in self.fees.named() {
            if !(fee.min <= fee.amount && fee.amount <= fee.max) {
                return Err(invalid(
                    format!("fees.{}", name),
                    format!("expected min <= amount <= max, got {:?}", fee),
                ));
            }
        }

        Ok(())
    }

    /// Multiplier for an order of `quantity` units.
    pub fn quantity_multiplier(&self, quantity: u32) -> f64 {
        self.discount_tiers
            .iter()
            .filter(|tier| quantity >= tier.min_quantity)
            .max_by_key(|tier| tier.min_quantity)
            .map(|tier| tier.multiplier)
            .unwrap_or(1.0)
    }
}

fn invalid(field: impl Into<String>, message: String) -> QuoteError {
    QuoteError::InvalidConfig {
        field: field.into(),
        message,
    }
}

/// Utility functions for floating-point comparisons.
pub mod float_cmp {
    use super::EPS;

    /// Check if two floats are approximately equal.
    #[inline]
    pub fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < EPS
    }

    /// Check if a is in range [min, max] with epsilon tolerance.
    #[inline]
    pub fn in_range(a: f64, min: f64, max: f64) -> bool {
        a >= min - EPS && a <= max + EPS
    }
}
