//! Event-driven breather viewer session.
//!
//! [`Viewer`] owns the parameter store, the current mesh, the camera and the
//! accumulated orientation. A UI layer forwards raw input events to it and
//! pulls a [`Frame`] once per displayed frame.

pub mod config;
pub mod params;
pub mod viewer;

pub use config::{CameraConfig, OrientationConfig, ViewerConfig};
pub use params::{parse_field, ParameterField, ParameterStore, ParameterValue};
pub use viewer::{Frame, Viewer};
