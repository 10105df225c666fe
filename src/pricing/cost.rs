//! Cost model: physical estimate + material + options → price.

use chrono::NaiveDate;

use super::add_ons::price_add_ons;
use crate::config::PricingConfig;
use crate::delivery::project_delivery;
use crate::error::Result;
use crate::model::{
    CostBreakdown, CostRange, MaterialProfile, OptionSet, PhysicalEstimate, PointQuote,
    PriceQuote, ResolvedMaterial,
};

/// Point costs for one unit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnitCosts {
    pub weight_grams: f64,
    pub material_cost: f64,
    pub labor_cost: f64,
    pub time_hours: f64,
    pub setup_cost: f64,
}

impl UnitCosts {
    /// Material + labor + setup for a single unit.
    pub fn base_per_item(&self) -> f64 {
        self.material_cost + self.labor_cost + self.setup_cost
    }
}

/// Compute the point costs of one unit.
pub fn unit_costs(
    estimate: &PhysicalEstimate,
    infill_percentage: f64,
    material: &MaterialProfile,
    config: &PricingConfig,
) -> UnitCosts {
    let volume_cm3 = estimate.volume_cm3();
    let weight_grams = volume_cm3 * (infill_percentage / 100.0) * material.density_g_per_cm3;

    let complexity_factor =
        1.0 + (estimate.complexity.saturating_sub(1)) as f64 * config.complexity_time_step;
    let support_factor = if estimate.support_required {
        config.support_time_multiplier
    } else {
        1.0
    };
    let time_hours = volume_cm3 * config.hours_per_cm3 * complexity_factor * support_factor;

    UnitCosts {
        weight_grams,
        material_cost: weight_grams * material.cost_per_gram,
        labor_cost: time_hours * config.labor_rate_per_hour,
        time_hours,
        setup_cost: material.setup_cost,
    }
}

/// Price an order of one or more files.
///
/// The files are priced as a single part: summed volume, worst-case
/// complexity. Material, labor and add-ons scale with quantity and the
/// quantity discount; setup is charged once and never discounted. An empty
/// `estimates` slice yields [`PriceQuote::empty`].
pub fn price(
    estimates: &[PhysicalEstimate],
    material: &ResolvedMaterial,
    options: &OptionSet,
    config: &PricingConfig,
    start: NaiveDate,
) -> Result<PriceQuote> {
    let Some(aggregate) = PhysicalEstimate::aggregate(estimates) else {
        return Ok(PriceQuote::empty(start));
    };

    let quantity = options.units();
    let infill = options
        .infill_percentage
        .unwrap_or(aggregate.infill_percentage);
    let unit = unit_costs(&aggregate, infill, &material.profile, config);

    let add_ons = price_add_ons(options, unit.base_per_item(), config);
    let add_ons_per_unit: CostRange = add_ons.iter().map(|c| c.per_unit).sum();

    let quantity_multiplier = config.quantity_multiplier(quantity);
    let order_factor = quantity as f64 * quantity_multiplier;

    let material_cost =
        CostRange::widened(unit.material_cost, config.material_spread).scaled(order_factor);
    let labor_cost = CostRange::widened(unit.labor_cost, config.labor_spread).scaled(order_factor);
    let additional_costs = add_ons_per_unit.scaled(order_factor);
    let setup_cost = unit.setup_cost;

    // Per-unit subtotal is floored at zero before quantity scaling; a
    // discount finish can make it negative.
    let per_unit = (CostRange::widened(unit.material_cost, config.material_spread)
        + CostRange::widened(unit.labor_cost, config.labor_spread)
        + add_ons_per_unit)
        .clamped_non_negative();
    let total = (per_unit.scaled(order_factor) + CostRange::point(setup_cost))
        .clamped_non_negative();

    let estimated_time_hours = unit.time_hours * quantity as f64;
    let estimated_delivery_date = project_delivery(estimated_time_hours, start, config)?;

    tracing::debug!(
        "Priced {} file(s) in {} x{}: weight={:.2}g, time={:.2}h, multiplier={}, total={:.2} [{:.2}, {:.2}]",
        estimates.len(),
        material.name,
        quantity,
        unit.weight_grams,
        estimated_time_hours,
        quantity_multiplier,
        total.estimated,
        total.min,
        total.max
    );

    Ok(PriceQuote {
        min_price: total.min,
        max_price: total.max,
        estimated_price: total.estimated,
        breakdown: CostBreakdown {
            material_cost,
            labor_cost,
            setup_cost,
            additional_costs,
            add_ons,
        },
        estimated_time_hours,
        estimated_delivery_date,
        weight_grams: unit.weight_grams,
        quantity,
        quantity_multiplier,
        material: Some(material.clone()),
    })
}

/// Point-price a single part for instant quoting.
pub fn price_one(
    estimate: &PhysicalEstimate,
    material: &MaterialProfile,
    options: &OptionSet,
    config: &PricingConfig,
) -> PointQuote {
    let quantity = options.units();
    let infill = options
        .infill_percentage
        .unwrap_or(estimate.infill_percentage);
    let unit = unit_costs(estimate, infill, material, config);

    let additional_costs: f64 = price_add_ons(options, unit.base_per_item(), config)
        .iter()
        .map(|c| c.per_unit.estimated)
        .sum();

    let quantity_multiplier = config.quantity_multiplier(quantity);
    let per_unit = (unit.material_cost + unit.labor_cost + additional_costs).max(0.0);
    let total_price = per_unit * quantity as f64 * quantity_multiplier + unit.setup_cost;

    PointQuote {
        weight_grams: unit.weight_grams,
        material_cost: unit.material_cost,
        labor_cost: unit.labor_cost,
        setup_cost: unit.setup_cost,
        additional_costs,
        time_hours_per_unit: unit.time_hours,
        quantity,
        quantity_multiplier,
        total_price,
    }
}
