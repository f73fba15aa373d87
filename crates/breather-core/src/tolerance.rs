/// Numeric tolerances shared by sampling and validation.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Tolerance {
    /// Smallest `|tu x tv| / (|tu| |tv|)` (the sine of the angle between the
    /// tangents) for which a sampled normal is still well defined
    pub degenerate_normal: f64,
    /// Allowed deviation from unit length for emitted normals
    pub unit_length: f64,
}

impl Tolerance {
    pub const DEGENERATE_NORMAL: f64 = 1e-12;
    pub const UNIT_LENGTH: f64 = 1e-4;

    pub fn default_precision() -> Self {
        Self {
            degenerate_normal: Self::DEGENERATE_NORMAL,
            unit_length: Self::UNIT_LENGTH,
        }
    }

    /// Check if a cross product of length `cross_length`, taken from tangents
    /// whose lengths multiply to `tangent_scale`, is too small (or not finite)
    /// to give a direction. Relative to the tangents, so small domains with
    /// short tangents still yield normals.
    pub fn is_degenerate(self, cross_length: f64, tangent_scale: f64) -> bool {
        !cross_length.is_finite() || cross_length <= self.degenerate_normal * tangent_scale
    }

    /// Check if a vector length is unit within tolerance
    pub fn is_unit(self, length: f64) -> bool {
        (length - 1.0).abs() <= self.unit_length
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Self::default_precision()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_degenerate_detection() {
        let tol = Tolerance::default();
        assert!(tol.is_degenerate(0.0, 0.0));
        assert!(tol.is_degenerate(0.0, 1.0));
        assert!(tol.is_degenerate(f64::NAN, 1.0));
        assert!(tol.is_degenerate(f64::INFINITY, 1.0));
        assert!(tol.is_degenerate(1e-14, 1.0));
        assert!(!tol.is_degenerate(1e-6, 1.0));
    }

    #[test]
    fn test_degenerate_is_relative_to_tangents() {
        let tol = Tolerance::default();
        // Perpendicular tangents of length 1e-7 each
        assert!(!tol.is_degenerate(1e-14, 1e-14));
        // Nearly parallel long tangents
        assert!(tol.is_degenerate(1e-10, 1e4));
    }

    #[test]
    fn test_unit_check() {
        let tol = Tolerance::default();
        assert!(tol.is_unit(1.00005));
        assert!(!tol.is_unit(1.001));
    }
}
