//! MaterialProfile - Cost and density data for one material.

use serde::{Deserialize, Serialize};

use crate::error::{QuoteError, Result};

/// Pricing data for one material.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MaterialProfile {
    /// Raw material cost in dollars per gram.
    pub cost_per_gram: f64,
    /// Density in g/cm³.
    pub density_g_per_cm3: f64,
    /// Flat machine preparation cost charged once per order.
    pub setup_cost: f64,
    /// Relative difficulty of the material; reported, not priced.
    pub complexity_multiplier: f64,
}

impl MaterialProfile {
    pub const fn new(
        cost_per_gram: f64,
        density_g_per_cm3: f64,
        setup_cost: f64,
        complexity_multiplier: f64,
    ) -> Self {
        Self {
            cost_per_gram,
            density_g_per_cm3,
            setup_cost,
            complexity_multiplier,
        }
    }

    /// Check that every numeric field is finite and positive.
    pub fn validate(&self, field: &str) -> Result<()> {
        let fields = [
            ("cost_per_gram", self.cost_per_gram),
            ("density_g_per_cm3", self.density_g_per_cm3),
            ("setup_cost", self.setup_cost),
            ("complexity_multiplier", self.complexity_multiplier),
        ];
        for (name, value) in fields {
            if !value.is_finite() || value <= 0.0 {
                return Err(QuoteError::malformed(
                    format!("{}.{}", field, name),
                    "a positive number",
                    value,
                ));
            }
        }
        Ok(())
    }
}

/// Where a resolved material profile came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum MaterialSource {
    /// Built-in catalog entry.
    Builtin,
    /// Database-sourced profile, either merged into the catalog or given with the order.
    Override,
    /// Requested material was unknown; the default material was substituted.
    Fallback { requested: String },
}

impl MaterialSource {
    /// Check if the profile is a stand-in for an unknown material.
    pub fn is_fallback(&self) -> bool {
        matches!(self, MaterialSource::Fallback { .. })
    }
}

/// A material name bound to the profile used to price it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedMaterial {
    /// Catalog name of the material actually priced.
    pub name: String,
    pub profile: MaterialProfile,
    #[serde(flatten)]
    pub source: MaterialSource,
}

impl ResolvedMaterial {
    pub fn new(name: impl Into<String>, profile: MaterialProfile, source: MaterialSource) -> Self {
        Self {
            name: name.into(),
            profile,
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_rejects_zero_density() {
        let profile = MaterialProfile::new(0.05, 0.0, 5.0, 1.0);
        let err = profile.validate("material_override").unwrap_err();
        assert!(err
            .to_string()
            .contains("material_override.density_g_per_cm3"));
    }

    #[test]
    fn test_validate_rejects_nan() {
        let profile = MaterialProfile::new(f64::NAN, 1.0, 5.0, 1.0);
        assert!(profile.validate("material").is_err());
    }

    #[test]
    fn test_source_serializes_tagged() {
        let resolved = ResolvedMaterial::new(
            "PLA",
            MaterialProfile::new(0.05, 1.24, 5.0, 1.0),
            MaterialSource::Fallback {
                requested: "Vibranium".to_string(),
            },
        );
        let json = serde_json::to_value(&resolved).unwrap();
        assert_eq!(json["source"], "fallback");
        assert_eq!(json["requested"], "Vibranium");
        assert!(resolved.source.is_fallback());
    }
}
