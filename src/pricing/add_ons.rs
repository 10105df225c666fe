//! Per-unit surcharges for optional services.

use crate::config::{Fee, PricingConfig};
use crate::model::{
    AddOnCharge, AssemblyOption, ChargeBasis, CostRange, FinishedAppearance, MultiplierPricing,
    OptionSet,
};

/// Price every selected add-on for one unit.
///
/// `base_per_item` is material + labor + setup for a single unit; it feeds
/// the multiplier-priced finishes.
pub fn price_add_ons(
    options: &OptionSet,
    base_per_item: f64,
    config: &PricingConfig,
) -> Vec<AddOnCharge> {
    let fees = &config.fees;
    let mut charges = Vec::new();

    let mut fixed = |name: &str, fee: Fee| {
        charges.push(AddOnCharge::new(name, fee.into(), ChargeBasis::Fixed));
    };

    if options.tighter_tolerance {
        fixed("tighter_tolerance", fees.tighter_tolerance);
    }
    if options.threads {
        fixed("threads", fees.threads);
    }
    if options.inserts {
        fixed("inserts", fees.inserts);
    }
    match options.assembly {
        AssemblyOption::NoAssembly => {}
        AssemblyOption::AssemblyTest => fixed("assembly_test", fees.assembly_test),
        AssemblyOption::ShipInAssembly => fixed("ship_in_assembly", fees.ship_in_assembly),
    }
    if options.appearance == FinishedAppearance::Premium {
        fixed("premium_appearance", fees.premium_appearance);
    }

    if let Some(finish) = &options.surface_finish {
        charges.push(multiplier_or_fixed(
            "surface_finish",
            finish.pricing,
            base_per_item * config.surface_finish_percentage,
            fees.surface_finish,
        ));
    }

    if let Some(marking) = &options.part_marking {
        charges.push(multiplier_or_fixed(
            "part_marking",
            marking.pricing,
            base_per_item * config.part_marking_percentage,
            fees.part_marking,
        ));
    }

    if let Some(inspection) = &options.inspection {
        let charge = match inspection.pricing {
            Some(pricing) if pricing.extra_fee => AddOnCharge::new(
                "inspection",
                fees.inspection_with_extra_fee.into(),
                ChargeBasis::FeeFlag,
            ),
            Some(_) => AddOnCharge::new(
                "inspection",
                fees.inspection_without_extra_fee.into(),
                ChargeBasis::FeeFlag,
            ),
            None => AddOnCharge::new("inspection", fees.inspection.into(), ChargeBasis::Fixed),
        };
        charges.push(charge);
    }

    if options.itar {
        charges.push(AddOnCharge::new("itar", fees.itar.into(), ChargeBasis::Fixed));
    }

    charges
}

/// `share × (multiplier − 1)` when a database multiplier is known, else the fixed fee.
///
/// A multiplier below 1 yields a negative amount (a discount finish).
fn multiplier_or_fixed(
    name: &str,
    pricing: Option<MultiplierPricing>,
    share: f64,
    fallback: Fee,
) -> AddOnCharge {
    match pricing {
        Some(MultiplierPricing { multiplier }) => AddOnCharge::new(
            name,
            CostRange::point(share * (multiplier - 1.0)),
            ChargeBasis::Multiplier,
        ),
        None => AddOnCharge::new(name, fallback.into(), ChargeBasis::Fixed),
    }
}
