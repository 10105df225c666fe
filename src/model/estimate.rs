//! PhysicalEstimate - Coarse physical properties derived from a file.

use serde::{Deserialize, Serialize};

/// Lowest complexity level.
pub const MIN_COMPLEXITY: u8 = 1;

/// Highest complexity level.
pub const MAX_COMPLEXITY: u8 = 5;

/// Estimated physical properties of one part.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhysicalEstimate {
    /// Part volume in mm³.
    pub volume_mm3: f64,
    /// Part surface area in mm².
    pub surface_area_mm2: f64,
    /// Complexity level, 1 (simple) to 5 (intricate).
    pub complexity: u8,
    /// Whether support structures are needed.
    pub support_required: bool,
    /// Solid fraction of the interior, 0-100.
    pub infill_percentage: f64,
}

impl PhysicalEstimate {
    /// Volume in cm³.
    pub fn volume_cm3(&self) -> f64 {
        self.volume_mm3 / 1000.0
    }

    /// Combine several parts into one order-level estimate.
    ///
    /// Volumes and surface areas add up, the most complex part sets the
    /// complexity, and supports are needed if any part needs them. Infill is
    /// the volume-weighted mean. Returns `None` for an empty slice.
    pub fn aggregate(estimates: &[PhysicalEstimate]) -> Option<PhysicalEstimate> {
        let first = estimates.first()?;

        let volume_mm3: f64 = estimates.iter().map(|e| e.volume_mm3).sum();
        let surface_area_mm2 = estimates.iter().map(|e| e.surface_area_mm2).sum();
        let complexity = estimates
            .iter()
            .map(|e| e.complexity)
            .max()
            .unwrap_or(MIN_COMPLEXITY);
        let support_required = estimates.iter().any(|e| e.support_required);

        let infill_percentage = if volume_mm3 > 0.0 {
            estimates
                .iter()
                .map(|e| e.infill_percentage * e.volume_mm3)
                .sum::<f64>()
                / volume_mm3
        } else {
            first.infill_percentage
        };

        Some(PhysicalEstimate {
            volume_mm3,
            surface_area_mm2,
            complexity,
            support_required,
            infill_percentage,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::float_cmp::approx_eq;

    fn part(volume: f64, complexity: u8, support: bool) -> PhysicalEstimate {
        PhysicalEstimate {
            volume_mm3: volume,
            surface_area_mm2: volume / 2.0,
            complexity,
            support_required: support,
            infill_percentage: 20.0,
        }
    }

    #[test]
    fn test_aggregate_empty() {
        assert!(PhysicalEstimate::aggregate(&[]).is_none());
    }

    #[test]
    fn test_aggregate_sums_and_worst_case() {
        let total = PhysicalEstimate::aggregate(&[
            part(5000.0, 1, false),
            part(150000.0, 5, true),
            part(5000.0, 2, false),
        ])
        .unwrap();

        assert!(approx_eq(total.volume_mm3, 160000.0));
        assert!(approx_eq(total.surface_area_mm2, 80000.0));
        assert_eq!(total.complexity, 5);
        assert!(total.support_required);
        assert!(approx_eq(total.infill_percentage, 20.0));
    }

    #[test]
    fn test_aggregate_weighted_infill() {
        let mut dense = part(1000.0, 1, false);
        dense.infill_percentage = 100.0;
        let total = PhysicalEstimate::aggregate(&[dense, part(3000.0, 1, false)]).unwrap();
        assert!(approx_eq(total.infill_percentage, 40.0));
    }
}
