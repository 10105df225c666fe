//! Material catalog and name resolution.

use std::collections::BTreeMap;
use std::path::Path;

use crate::config::{MaterialPolicy, DEFAULT_MATERIAL};
use crate::error::{QuoteError, Result};
use crate::model::{MaterialProfile, MaterialSource, OptionSet, ResolvedMaterial};

/// Built-in PLA profile, also used as the fallback material.
pub const PLA: MaterialProfile = MaterialProfile::new(0.05, 1.24, 5.0, 1.0);

/// Built-in material table: name, $/g, g/cm³, setup $, complexity multiplier.
const BUILTIN_MATERIALS: &[(&str, MaterialProfile)] = &[
    ("PLA", PLA),
    ("ABS", MaterialProfile::new(0.06, 1.04, 5.0, 1.1)),
    ("PETG", MaterialProfile::new(0.07, 1.27, 5.0, 1.1)),
    ("TPU", MaterialProfile::new(0.10, 1.21, 8.0, 1.3)),
    ("Nylon", MaterialProfile::new(0.12, 1.14, 10.0, 1.2)),
    ("Resin", MaterialProfile::new(0.15, 1.10, 8.0, 1.2)),
    ("Polycarbonate", MaterialProfile::new(0.11, 1.20, 10.0, 1.3)),
    ("Aluminum 6061", MaterialProfile::new(0.03, 2.70, 25.0, 1.4)),
    ("Stainless Steel 316", MaterialProfile::new(0.05, 8.00, 40.0, 1.6)),
    ("Titanium", MaterialProfile::new(0.35, 4.43, 60.0, 1.8)),
];

#[derive(Debug, Clone, PartialEq)]
struct CatalogEntry {
    name: String,
    profile: MaterialProfile,
    source: MaterialSource,
}

/// Materials available for pricing, keyed case-insensitively by name.
#[derive(Debug, Clone, PartialEq)]
pub struct MaterialCatalog {
    entries: BTreeMap<String, CatalogEntry>,
}

impl Default for MaterialCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl MaterialCatalog {
    /// Catalog with only the built-in table.
    pub fn builtin() -> Self {
        let mut catalog = Self::empty();
        for (name, profile) in BUILTIN_MATERIALS {
            catalog.insert(name, *profile, MaterialSource::Builtin);
        }
        catalog
    }

    /// Catalog with no materials.
    pub fn empty() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    fn insert(&mut self, name: &str, profile: MaterialProfile, source: MaterialSource) {
        self.entries.insert(
            key(name),
            CatalogEntry {
                name: name.trim().to_string(),
                profile,
                source,
            },
        );
    }

    /// Add or replace a database-sourced material.
    pub fn add_override(&mut self, name: &str, profile: MaterialProfile) -> Result<()> {
        profile.validate(&format!("materials.{}", name))?;
        self.insert(name, profile, MaterialSource::Override);
        Ok(())
    }

    /// Merge a JSON object of `name -> profile` overrides.
    pub fn merge_json(&mut self, json: &str) -> Result<usize> {
        let overrides: BTreeMap<String, MaterialProfile> = serde_json::from_str(json)?;
        for (name, profile) in &overrides {
            self.add_override(name, *profile)?;
        }
        Ok(overrides.len())
    }

    /// Built-in catalog plus the overrides in a JSON file.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let mut catalog = Self::builtin();
        let count = catalog.merge_json(&content)?;
        tracing::debug!("Loaded {} material override(s) from {}", count, path.display());
        Ok(catalog)
    }

    /// Number of materials.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the catalog has no materials.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Material names in key order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.values().map(|e| e.name.as_str())
    }

    /// Exact, case-insensitive lookup.
    pub fn get(&self, name: &str) -> Option<&MaterialProfile> {
        self.entries.get(&key(name)).map(|e| &e.profile)
    }

    /// Resolve a material name to a profile.
    ///
    /// Tries an exact case-insensitive match, then a substring match in
    /// either direction ("pla" matches "PLA+", "Aluminum 6061-T6" matches
    /// "Aluminum 6061"). Among several substring matches the entry closest
    /// in length wins. What happens after that depends on `policy`.
    pub fn resolve(&self, name: &str, policy: MaterialPolicy) -> Result<ResolvedMaterial> {
        let wanted = key(name);

        if !wanted.is_empty() {
            if let Some(entry) = self.entries.get(&wanted) {
                return Ok(entry.resolved());
            }

            let mut candidates: Vec<_> = self
                .entries
                .iter()
                .filter(|(k, _)| k.contains(&wanted) || wanted.contains(k.as_str()))
                .collect();
            // Closest in length is the most specific; ties keep key order.
            candidates.sort_by_key(|(k, _)| k.len().abs_diff(wanted.len()));

            if let Some((matched, entry)) = candidates.first() {
                if candidates.len() > 1 {
                    tracing::warn!(
                        "Material '{}' matches {} catalog entries, using '{}'",
                        name,
                        candidates.len(),
                        matched
                    );
                } else {
                    tracing::debug!("Material '{}' matched catalog entry '{}'", name, matched);
                }
                return Ok(entry.resolved());
            }
        }

        match policy {
            MaterialPolicy::Strict => Err(QuoteError::UnknownMaterial {
                name: name.to_string(),
            }),
            MaterialPolicy::FallbackToDefault => {
                let profile = self.get(DEFAULT_MATERIAL).copied().unwrap_or(PLA);
                tracing::warn!(
                    "Unknown material '{}', pricing as {}",
                    name,
                    DEFAULT_MATERIAL
                );
                Ok(ResolvedMaterial::new(
                    DEFAULT_MATERIAL,
                    profile,
                    MaterialSource::Fallback {
                        requested: name.to_string(),
                    },
                ))
            }
        }
    }

    /// Resolve the material for an order, honoring a per-order override.
    pub fn resolve_for(&self, options: &OptionSet, policy: MaterialPolicy) -> Result<ResolvedMaterial> {
        match options.material_override {
            Some(profile) => Ok(ResolvedMaterial::new(
                options.material.trim(),
                profile,
                MaterialSource::Override,
            )),
            None => self.resolve(&options.material, policy),
        }
    }
}

impl CatalogEntry {
    fn resolved(&self) -> ResolvedMaterial {
        ResolvedMaterial::new(self.name.clone(), self.profile, self.source.clone())
    }
}

fn key(name: &str) -> String {
    name.trim().to_lowercase()
}
