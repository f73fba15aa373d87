pub mod camera;
pub mod gltf;
pub mod orientation;
pub mod pipeline;
pub mod shading;

// Re-export main types
pub use camera::CameraState;
pub use gltf::export_gltf_json;
pub use orientation::{DragState, OrientationAccumulator};
pub use pipeline::{prepare_mesh, FrameUniforms, GpuVertex, IndexBuffer, RenderMesh};
pub use shading::{LightingUniforms, ShadingMode, Topology};
