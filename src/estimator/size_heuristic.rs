//! Physical property estimation from file size and type.
//!
//! The estimate is a heuristic on the byte size of the upload, not a mesh
//! analysis: bigger mesh files are assumed to describe bigger and more
//! detailed parts.

use crate::config::DEFAULT_INFILL_PERCENTAGE;
use crate::model::{FileDescriptor, PhysicalEstimate, MAX_COMPLEXITY, MIN_COMPLEXITY};

/// Volume per kilobyte of mesh file (mm³).
const VOLUME_PER_KB: f64 = 50.0;

/// Surface area per kilobyte of mesh file (mm²).
const SURFACE_PER_KB: f64 = 25.0;

/// Volume floor for mesh files (mm³).
const MIN_VOLUME_MM3: f64 = 1000.0;

/// Surface area floor for mesh files (mm²).
const MIN_SURFACE_MM2: f64 = 500.0;

/// Kilobytes per complexity level.
const KB_PER_COMPLEXITY_LEVEL: f64 = 500.0;

/// Mesh files above this size (KB) are assumed to need supports.
const SUPPORT_THRESHOLD_KB: f64 = 1000.0;

/// Fixed estimate for drawings and other non-mesh files.
pub const DOCUMENT_ESTIMATE: PhysicalEstimate = PhysicalEstimate {
    volume_mm3: 5000.0,
    surface_area_mm2: 1500.0,
    complexity: 2,
    support_required: false,
    infill_percentage: DEFAULT_INFILL_PERCENTAGE,
};

/// Estimate the physical properties of one file.
pub fn estimate(file: &FileDescriptor) -> PhysicalEstimate {
    if !file.kind().is_model() {
        return DOCUMENT_ESTIMATE;
    }

    let size_kb = file.size_kb();
    let levels = (size_kb / KB_PER_COMPLEXITY_LEVEL).ceil();
    let complexity = levels.clamp(MIN_COMPLEXITY as f64, MAX_COMPLEXITY as f64) as u8;

    PhysicalEstimate {
        volume_mm3: (size_kb * VOLUME_PER_KB).max(MIN_VOLUME_MM3),
        surface_area_mm2: (size_kb * SURFACE_PER_KB).max(MIN_SURFACE_MM2),
        complexity,
        support_required: size_kb > SUPPORT_THRESHOLD_KB,
        infill_percentage: DEFAULT_INFILL_PERCENTAGE,
    }
}

/// Estimate every file, preserving order.
pub fn estimate_all(files: &[FileDescriptor]) -> Vec<PhysicalEstimate> {
    files
        .iter()
        .map(|file| {
            let estimate = estimate(file);
            tracing::debug!(
                "{}: {:?}, volume={:.0}mm3, complexity={}, supports={}",
                file.name,
                file.kind(),
                estimate.volume_mm3,
                estimate.complexity,
                estimate.support_required
            );
            estimate
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::float_cmp::approx_eq;

    fn kb(name: &str, size_kb: u64) -> FileDescriptor {
        FileDescriptor::new(name, size_kb * 1024)
    }

    // ==================== Mesh file tests ====================

    #[test]
    fn test_small_stl() {
        let est = estimate(&kb("part.stl", 100));
        assert!(approx_eq(est.volume_mm3, 5000.0));
        assert!(approx_eq(est.surface_area_mm2, 2500.0));
        assert_eq!(est.complexity, 1);
        assert!(!est.support_required);
        assert_eq!(est.infill_percentage, 20.0);
    }

    #[test]
    fn test_large_stl_clamps_complexity() {
        let est = estimate(&kb("part.stl", 3000));
        assert!(approx_eq(est.volume_mm3, 150000.0));
        assert!(approx_eq(est.surface_area_mm2, 75000.0));
        assert_eq!(est.complexity, 5);
        assert!(est.support_required);
    }

    #[test]
    fn test_tiny_file_uses_floors() {
        let est = estimate(&FileDescriptor::new("bolt.obj", 0));
        assert_eq!(est.volume_mm3, 1000.0);
        assert_eq!(est.surface_area_mm2, 500.0);
        assert_eq!(est.complexity, 1);
        assert!(!est.support_required);
    }

    #[test]
    fn test_complexity_steps() {
        assert_eq!(estimate(&kb("a.3mf", 500)).complexity, 1);
        assert_eq!(estimate(&kb("a.3mf", 501)).complexity, 2);
        assert_eq!(estimate(&kb("a.3mf", 1500)).complexity, 3);
        assert_eq!(estimate(&kb("a.3mf", 2001)).complexity, 5);
    }

    #[test]
    fn test_support_threshold_is_exclusive() {
        assert!(!estimate(&kb("a.stl", 1000)).support_required);
        assert!(estimate(&kb("a.stl", 1001)).support_required);
    }

    #[test]
    fn test_uppercase_extension() {
        let est = estimate(&kb("PART.STL", 3000));
        assert_eq!(est.complexity, 5);
    }

    // ==================== Document tests ====================

    #[test]
    fn test_document_gets_fixed_estimate() {
        let est = estimate(&kb("drawing.pdf", 3000));
        assert_eq!(est, DOCUMENT_ESTIMATE);
        assert_eq!(est.volume_mm3, 5000.0);
        assert_eq!(est.surface_area_mm2, 1500.0);
        assert_eq!(est.complexity, 2);
        assert!(!est.support_required);
    }

    #[test]
    fn test_estimate_is_idempotent() {
        let file = kb("bracket.stl", 742);
        assert_eq!(estimate(&file), estimate(&file));
    }

    #[test]
    fn test_estimate_all_preserves_order() {
        let files = vec![kb("a.pdf", 1), kb("b.stl", 3000)];
        let all = estimate_all(&files);
        assert_eq!(all.len(), 2);
        assert_eq!(all[0], DOCUMENT_ESTIMATE);
        assert_eq!(all[1].complexity, 5);
    }
}
