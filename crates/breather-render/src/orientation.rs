//! Drag-driven model orientation.
//!
//! A two-state machine: `Idle` ignores moves; `Dragging` turns each pointer
//! delta into a rotation that is left-multiplied onto the accumulated one,
//! so successive drags rotate about world axes rather than the model's own.

use breather_math::Transform;
use tracing::trace;

/// Pointer-drag state.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging { last_x: f64, last_y: f64 },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrientationAccumulator {
    state: DragState,
    rotation: Transform,
    /// Pointer travel (in pixels) per degree of rotation
    pub pixels_per_degree: f64,
}

impl OrientationAccumulator {
    pub const DEFAULT_PIXELS_PER_DEGREE: f64 = 10.0;

    pub fn new(pixels_per_degree: f64) -> Self {
        Self {
            state: DragState::Idle,
            rotation: Transform::identity(),
            pixels_per_degree,
        }
    }

    pub fn state(&self) -> DragState {
        self.state
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }

    /// Accumulated rotation since the session started (or the last reset).
    pub fn rotation(&self) -> Transform {
        self.rotation
    }

    /// Start a drag at `(x, y)`. Calling it again mid-drag re-anchors.
    pub fn begin_drag(&mut self, x: f64, y: f64) {
        self.state = DragState::Dragging {
            last_x: x,
            last_y: y,
        };
    }

    /// Track the pointer to `(x, y)`; returns `true` if the orientation
    /// changed. Outside a drag this is a no-op.
    ///
    /// `dx` rotates about +Y, `dy` about +X, composed as `R_y * R_x` and
    /// applied on the left of the accumulated rotation.
    pub fn drag_to(&mut self, x: f64, y: f64) -> bool {
        let DragState::Dragging { last_x, last_y } = self.state else {
            return false;
        };
        self.state = DragState::Dragging {
            last_x: x,
            last_y: y,
        };

        let dx = x - last_x;
        let dy = y - last_y;
        if dx == 0.0 && dy == 0.0 {
            return false;
        }

        let yaw = (dx / self.pixels_per_degree).to_radians();
        let pitch = (dy / self.pixels_per_degree).to_radians();
        let incremental =
            Transform::from_rotation_y(yaw).compose(&Transform::from_rotation_x(pitch));
        self.rotation = incremental.compose(&self.rotation);

        trace!(dx, dy, "orientation drag");
        true
    }

    pub fn end_drag(&mut self) {
        self.state = DragState::Idle;
    }

    /// Restore the identity orientation; the drag state is left untouched.
    pub fn reset(&mut self) {
        self.rotation = Transform::identity();
    }
}

impl Default for OrientationAccumulator {
    fn default() -> Self {
        Self::new(Self::DEFAULT_PIXELS_PER_DEGREE)
    }
}
