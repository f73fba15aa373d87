//! Viewer configuration, loaded from JSON. Every field is optional and falls
//! back to the built-in defaults.

use std::path::Path;

use breather_core::{BreatherError, Result, Validate};
use breather_geometry::SurfaceParameters;
use breather_render::{CameraState, LightingUniforms, OrientationAccumulator, ShadingMode};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub z_distance: f64,
    pub fov_y_deg: f64,
    pub near: f64,
    pub far: f64,
    pub wheel_step: f64,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            z_distance: CameraState::DEFAULT_Z,
            fov_y_deg: 45.0,
            near: 0.1,
            far: 1000.0,
            wheel_step: CameraState::DEFAULT_WHEEL_STEP,
        }
    }
}

impl CameraConfig {
    /// Build a camera for a viewport with the given aspect ratio.
    pub fn build(&self, aspect: f64) -> CameraState {
        let mut camera = CameraState::new(
            self.z_distance,
            self.fov_y_deg.to_radians(),
            aspect,
            self.near,
            self.far,
        );
        camera.wheel_step = self.wheel_step;
        camera
    }
}

impl Validate for CameraConfig {
    fn validate(&self) -> Result<()> {
        if !(self.fov_y_deg > 0.0 && self.fov_y_deg < 180.0) {
            return Err(BreatherError::Config(format!(
                "camera.fov_y_deg must lie in (0, 180), got {}",
                self.fov_y_deg
            )));
        }
        if !(self.near > 0.0 && self.far > self.near) {
            return Err(BreatherError::Config(format!(
                "camera clip planes need 0 < near < far, got near={} far={}",
                self.near, self.far
            )));
        }
        if !(self.wheel_step.is_finite() && self.wheel_step >= 0.0) {
            return Err(BreatherError::Config(format!(
                "camera.wheel_step must be a non-negative number, got {}",
                self.wheel_step
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrientationConfig {
    pub pixels_per_degree: f64,
}

impl Default for OrientationConfig {
    fn default() -> Self {
        Self {
            pixels_per_degree: OrientationAccumulator::DEFAULT_PIXELS_PER_DEGREE,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub parameters: SurfaceParameters,
    pub camera: CameraConfig,
    pub orientation: OrientationConfig,
    pub lighting: LightingUniforms,
    pub shading: ShadingMode,
}

impl ViewerConfig {
    /// Read and validate a JSON configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> Result<Self> {
        let config: ViewerConfig =
            serde_json::from_str(text).map_err(|e| BreatherError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }
}

impl Validate for ViewerConfig {
    fn validate(&self) -> Result<()> {
        self.parameters.validate()?;
        self.camera.validate()?;
        let ppd = self.orientation.pixels_per_degree;
        if !(ppd.is_finite() && ppd > 0.0) {
            return Err(BreatherError::Config(format!(
                "orientation.pixels_per_degree must be positive, got {ppd}"
            )));
        }
        Ok(())
    }
}
