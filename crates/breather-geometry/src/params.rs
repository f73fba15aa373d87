//! Generation parameters for one sampled patch of the breather surface.

use breather_core::{BreatherError, Result, Validate};
use serde::{Deserialize, Serialize};

/// A closed parameter interval with `min < max`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParamRange {
    pub min: f64,
    pub max: f64,
}

impl ParamRange {
    pub fn new(min: f64, max: f64) -> Result<Self> {
        let range = Self { min, max };
        range.validate()?;
        Ok(range)
    }

    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    /// Parameter value of sample `index` out of `segments` subdivisions.
    ///
    /// Evaluated as `index / segments * span + min` so every sample is
    /// reproducible independently of its neighbours. With zero segments the
    /// axis collapses onto `min`.
    #[inline]
    pub fn sample(&self, index: usize, segments: usize) -> f64 {
        if segments == 0 {
            return self.min;
        }
        index as f64 / segments as f64 * self.span() + self.min
    }

    /// Forward-difference step for `segments` subdivisions (zero when the
    /// axis has no subdivisions).
    #[inline]
    pub fn step(&self, segments: usize) -> f64 {
        if segments == 0 {
            return 0.0;
        }
        self.span() / segments as f64
    }
}

impl Validate for ParamRange {
    fn validate(&self) -> Result<()> {
        if !self.min.is_finite() || !self.max.is_finite() {
            return Err(BreatherError::InvalidParameter(format!(
                "range bounds must be finite, got [{}, {}]",
                self.min, self.max
            )));
        }
        if self.min >= self.max {
            return Err(BreatherError::InvalidParameter(format!(
                "range minimum {} must be below maximum {}",
                self.min, self.max
            )));
        }
        Ok(())
    }
}

/// The full parameter tuple selecting a mesh.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SurfaceParameters {
    pub shape_coefficient: f64,
    pub u_range: ParamRange,
    pub v_range: ParamRange,
    pub u_segments: usize,
    pub v_segments: usize,
}

impl SurfaceParameters {
    pub const DEFAULT_SHAPE_COEFFICIENT: f64 = 0.4;
    pub const DEFAULT_U_RANGE: ParamRange = ParamRange { min: -14.0, max: 14.0 };
    pub const DEFAULT_V_RANGE: ParamRange = ParamRange { min: -37.0, max: 37.0 };
    pub const DEFAULT_U_SEGMENTS: usize = 30;
    pub const DEFAULT_V_SEGMENTS: usize = 30;

    /// Build and validate a parameter tuple.
    pub fn new(
        shape_coefficient: f64,
        u_range: ParamRange,
        v_range: ParamRange,
        u_segments: usize,
        v_segments: usize,
    ) -> Result<Self> {
        let params = Self {
            shape_coefficient,
            u_range,
            v_range,
            u_segments,
            v_segments,
        };
        params.validate()?;
        Ok(params)
    }

    /// The canonical defaults restored by a parameter reset.
    pub const fn canonical() -> Self {
        Self {
            shape_coefficient: Self::DEFAULT_SHAPE_COEFFICIENT,
            u_range: Self::DEFAULT_U_RANGE,
            v_range: Self::DEFAULT_V_RANGE,
            u_segments: Self::DEFAULT_U_SEGMENTS,
            v_segments: Self::DEFAULT_V_SEGMENTS,
        }
    }
}

impl Default for SurfaceParameters {
    fn default() -> Self {
        Self::canonical()
    }
}

impl Validate for SurfaceParameters {
    fn validate(&self) -> Result<()> {
        let a = self.shape_coefficient;
        if !(a > 0.0 && a < 1.0) {
            return Err(BreatherError::InvalidParameter(format!(
                "shape coefficient must lie in (0, 1), got {a}"
            )));
        }
        self.u_range.validate()?;
        self.v_range.validate()?;
        if self.u_segments == 0 || self.v_segments == 0 {
            return Err(BreatherError::InvalidParameter(format!(
                "segment counts must be at least 1, got {}x{}",
                self.u_segments, self.v_segments
            )));
        }
        Ok(())
    }
}
