//! OptionSet - Everything the customer chose for one order.

use serde::{Deserialize, Serialize};

use super::MaterialProfile;
use crate::config::DEFAULT_MATERIAL;

/// Manufacturing process requested for the parts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ManufacturingProcess {
    #[default]
    #[serde(rename = "3d_printing")]
    ThreeDPrinting,
    #[serde(rename = "cnc_machining")]
    CncMachining,
    #[serde(rename = "sheet_metal")]
    SheetMetal,
    #[serde(rename = "injection_molding")]
    InjectionMolding,
}

impl std::fmt::Display for ManufacturingProcess {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ManufacturingProcess::ThreeDPrinting => write!(f, "3d_printing"),
            ManufacturingProcess::CncMachining => write!(f, "cnc_machining"),
            ManufacturingProcess::SheetMetal => write!(f, "sheet_metal"),
            ManufacturingProcess::InjectionMolding => write!(f, "injection_molding"),
        }
    }
}

/// Assembly service level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssemblyOption {
    #[default]
    NoAssembly,
    /// Parts are test-assembled, then shipped loose.
    AssemblyTest,
    /// Parts are shipped assembled.
    ShipInAssembly,
}

/// Cosmetic grade of the finished parts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FinishedAppearance {
    #[default]
    Standard,
    Premium,
}

/// Database-sourced price multiplier for a finishing option.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MultiplierPricing {
    pub multiplier: f64,
}

/// Database-sourced pricing for inspection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InspectionPricing {
    /// Whether the chosen inspection level carries an extra fee.
    pub extra_fee: bool,
}

/// Selected surface finish.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurfaceFinish {
    /// Finish name, e.g. "bead blasted".
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub pricing: Option<MultiplierPricing>,
}

/// Selected part marking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartMarking {
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub pricing: Option<MultiplierPricing>,
}

/// Selected inspection service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Inspection {
    /// Inspection level name, e.g. "first article".
    #[serde(default)]
    pub level: Option<String>,
    #[serde(default)]
    pub pricing: Option<InspectionPricing>,
}

/// The options chosen for one order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OptionSet {
    pub process: ManufacturingProcess,
    /// Material name, looked up in the catalog.
    pub material: String,
    /// Database-sourced profile that replaces the catalog lookup.
    pub material_override: Option<MaterialProfile>,
    /// Units ordered. Signed so that bad input can be rejected, not wrapped.
    pub quantity: i64,
    /// Infill override in percent; the estimator default is used when absent.
    pub infill_percentage: Option<f64>,
    pub tighter_tolerance: bool,
    pub threads: bool,
    pub inserts: bool,
    /// Free-text thread/insert specification.
    pub threads_notes: Option<String>,
    pub assembly: AssemblyOption,
    pub appearance: FinishedAppearance,
    pub surface_finish: Option<SurfaceFinish>,
    pub part_marking: Option<PartMarking>,
    pub inspection: Option<Inspection>,
    /// Export-controlled (ITAR) handling.
    pub itar: bool,
}

impl Default for OptionSet {
    fn default() -> Self {
        Self {
            process: ManufacturingProcess::default(),
            material: DEFAULT_MATERIAL.to_string(),
            material_override: None,
            quantity: 1,
            infill_percentage: None,
            tighter_tolerance: false,
            threads: false,
            inserts: false,
            threads_notes: None,
            assembly: AssemblyOption::default(),
            appearance: FinishedAppearance::default(),
            surface_finish: None,
            part_marking: None,
            inspection: None,
            itar: false,
        }
    }
}

impl OptionSet {
    /// Create options for `quantity` units of `material`.
    pub fn new(material: impl Into<String>, quantity: i64) -> Self {
        Self {
            material: material.into(),
            quantity,
            ..Default::default()
        }
    }

    /// Quantity as an unsigned unit count; values below 1 become 1.
    ///
    /// Validation rejects such values before pricing, this only keeps the
    /// arithmetic total.
    pub fn units(&self) -> u32 {
        self.quantity.clamp(1, u32::MAX as i64) as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = OptionSet::default();
        assert_eq!(options.material, "PLA");
        assert_eq!(options.quantity, 1);
        assert_eq!(options.assembly, AssemblyOption::NoAssembly);
        assert_eq!(options.appearance, FinishedAppearance::Standard);
        assert!(options.surface_finish.is_none());
    }

    #[test]
    fn test_deserialize_partial() {
        let options: OptionSet = serde_json::from_str(
            r#"{
                "process": "cnc_machining",
                "material": "Aluminum 6061",
                "quantity": 12,
                "assembly": "ship_in_assembly",
                "appearance": "premium",
                "surface_finish": {"name": "anodized", "pricing": {"multiplier": 1.4}},
                "inspection": {"pricing": {"extra_fee": true}}
            }"#,
        )
        .unwrap();

        assert_eq!(options.process, ManufacturingProcess::CncMachining);
        assert_eq!(options.units(), 12);
        assert_eq!(options.assembly, AssemblyOption::ShipInAssembly);
        assert_eq!(
            options.surface_finish.unwrap().pricing,
            Some(MultiplierPricing { multiplier: 1.4 })
        );
        assert_eq!(
            options.inspection.unwrap().pricing,
            Some(InspectionPricing { extra_fee: true })
        );
        assert!(!options.itar);
    }

    #[test]
    fn test_units_never_zero() {
        assert_eq!(OptionSet::new("PLA", 0).units(), 1);
        assert_eq!(OptionSet::new("PLA", -4).units(), 1);
    }
}
