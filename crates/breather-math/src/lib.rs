pub mod aabb;
pub mod transform;

pub use glam::{DMat3, DMat4, DVec2, DVec3, DVec4};
pub use aabb::Aabb3;
pub use transform::Transform;

pub type Point3 = DVec3;
pub type Vector3 = DVec3;

/// Column-major 4x4 matrix as consumed by shader uniforms.
pub type Mat4Cols = [[f32; 4]; 4];
/// Column-major 3x3 matrix as consumed by shader uniforms.
pub type Mat3Cols = [[f32; 3]; 3];
