use breather_math::{Mat3Cols, Mat4Cols, Point3, Vector3};
use breather_mesh::TriangleMesh;
use bytemuck::{Pod, Zeroable};

use crate::camera::CameraState;
use crate::orientation::OrientationAccumulator;
use crate::shading::{LightingUniforms, Topology};

/// Vertex with f32 data packed for GPU.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct GpuVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

impl GpuVertex {
    pub fn from_mesh_vertex(pos: Point3, normal: Vector3) -> Self {
        Self {
            position: pos.as_vec3().to_array(),
            normal: normal.as_vec3().to_array(),
        }
    }
}

/// Index data in the narrowest width that can address every vertex.
#[derive(Debug, Clone, PartialEq)]
pub enum IndexBuffer {
    U16(Vec<u16>),
    U32(Vec<u32>),
}

impl IndexBuffer {
    /// Narrow to 16 bits when every index fits, otherwise keep 32 bits.
    pub fn from_indices(indices: &[u32]) -> Self {
        if indices.iter().all(|&i| i <= u16::MAX as u32) {
            IndexBuffer::U16(indices.iter().map(|&i| i as u16).collect())
        } else {
            IndexBuffer::U32(indices.to_vec())
        }
    }

    pub fn len(&self) -> usize {
        match self {
            IndexBuffer::U16(v) => v.len(),
            IndexBuffer::U32(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn as_bytes(&self) -> &[u8] {
        match self {
            IndexBuffer::U16(v) => bytemuck::cast_slice(v),
            IndexBuffer::U32(v) => bytemuck::cast_slice(v),
        }
    }
}

/// Prepared render data ready for GPU upload.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderMesh {
    pub vertices: Vec<GpuVertex>,
    pub indices: IndexBuffer,
    pub topology: Topology,
}

impl RenderMesh {
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    pub fn index_bytes(&self) -> &[u8] {
        self.indices.as_bytes()
    }
}

/// Convert a TriangleMesh to GPU-ready buffers for the given topology.
pub fn prepare_mesh(mesh: &TriangleMesh, topology: Topology) -> RenderMesh {
    let vertices = mesh
        .positions
        .iter()
        .zip(mesh.normals.iter())
        .map(|(&p, &n)| GpuVertex::from_mesh_vertex(p, n))
        .collect();

    let indices = match topology {
        Topology::TriangleList => IndexBuffer::from_indices(&mesh.indices),
        Topology::LineList => IndexBuffer::from_indices(&mesh.wireframe_indices()),
    };

    RenderMesh {
        vertices,
        indices,
        topology,
    }
}

/// Per-frame transform and lighting uniforms (column-major).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameUniforms {
    pub projection: Mat4Cols,
    /// Camera translation composed with the accumulated orientation
    pub view: Mat4Cols,
    pub normal_matrix: Mat3Cols,
    pub lighting: LightingUniforms,
}

impl FrameUniforms {
    pub fn from_state(
        camera: &CameraState,
        orientation: &OrientationAccumulator,
        lighting: LightingUniforms,
    ) -> Self {
        let model_view = camera.view_transform().compose(&orientation.rotation());
        Self {
            projection: camera.projection_matrix().as_mat4().to_cols_array_2d(),
            view: model_view.to_cols_f32(),
            normal_matrix: model_view.normal_matrix_f32(),
            lighting,
        }
    }
}
