//! Data model types for file estimation and pricing.

mod estimate;
mod file;
mod material;
mod options;
mod quote;

pub use estimate::{PhysicalEstimate, MAX_COMPLEXITY, MIN_COMPLEXITY};
pub use file::{FileDescriptor, FileKind};
pub use material::{MaterialProfile, MaterialSource, ResolvedMaterial};
pub use options::{
    AssemblyOption, FinishedAppearance, Inspection, InspectionPricing, ManufacturingProcess,
    MultiplierPricing, OptionSet, PartMarking, SurfaceFinish,
};
pub use quote::{
    AddOnCharge, ChargeBasis, CostBreakdown, CostRange, PointQuote, PriceQuote, QuoteOutcome,
};
