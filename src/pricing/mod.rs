//! Cost model and material resolution.

mod add_ons;
mod catalog;
mod cost;

pub use add_ons::price_add_ons;
pub use catalog::{MaterialCatalog, PLA};
pub use cost::{price, price_one, unit_costs, UnitCosts};
