use breather_math::{DMat4, DVec3, Transform};
use tracing::trace;

/// Perspective camera looking down -Z from a clamped distance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraState {
    z_distance: f64,
    pub fov_y: f64,  // vertical FOV in radians
    pub aspect: f64, // width/height
    pub near: f64,
    pub far: f64,
    /// Distance moved per wheel notch
    pub wheel_step: f64,
}

impl CameraState {
    pub const Z_MIN: f64 = -100.0;
    pub const Z_MAX: f64 = -10.0;
    pub const DEFAULT_Z: f64 = -50.0;
    pub const DEFAULT_WHEEL_STEP: f64 = 2.0;

    /// Create a camera; `z_distance` is clamped into `[Z_MIN, Z_MAX]`.
    pub fn new(z_distance: f64, fov_y: f64, aspect: f64, near: f64, far: f64) -> Self {
        Self {
            z_distance: z_distance.clamp(Self::Z_MIN, Self::Z_MAX),
            fov_y,
            aspect,
            near,
            far,
            wheel_step: Self::DEFAULT_WHEEL_STEP,
        }
    }

    pub fn z_distance(&self) -> f64 {
        self.z_distance
    }

    /// Move the camera along Z by `delta`, saturating at the clamp bounds.
    pub fn zoom(&mut self, delta: f64) {
        if !delta.is_finite() {
            return;
        }
        self.z_distance = (self.z_distance + delta).clamp(Self::Z_MIN, Self::Z_MAX);
        trace!(z = self.z_distance, "camera zoom");
    }

    /// Apply one wheel event. Only the sign of `delta_y` matters: scrolling
    /// down (positive) pulls the camera back by `wheel_step`.
    pub fn wheel(&mut self, delta_y: f64) {
        if delta_y == 0.0 || delta_y.is_nan() {
            return;
        }
        self.zoom(-delta_y.signum() * self.wheel_step);
    }

    /// Refresh the aspect ratio after the viewport changed size.
    pub fn set_viewport(&mut self, width: f64, height: f64) {
        if width > 0.0 && height > 0.0 {
            self.aspect = width / height;
        }
    }

    /// OpenGL-style right-handed perspective projection.
    pub fn projection_matrix(&self) -> DMat4 {
        DMat4::perspective_rh_gl(self.fov_y, self.aspect, self.near, self.far)
    }

    /// Pure translation by `(0, 0, z_distance)`.
    pub fn view_transform(&self) -> Transform {
        Transform::from_translation(DVec3::new(0.0, 0.0, self.z_distance))
    }

    pub fn view_matrix(&self) -> DMat4 {
        self.view_transform().to_mat4()
    }
}

impl Default for CameraState {
    /// 45° FOV, 16:9 aspect, near 0.1, far 1000, 50 units back.
    fn default() -> Self {
        Self::new(
            Self::DEFAULT_Z,
            std::f64::consts::FRAC_PI_4,
            16.0 / 9.0,
            0.1,
            1000.0,
        )
    }
}
