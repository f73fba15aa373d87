use std::collections::HashSet;

use breather_core::{BreatherError, Result, Validate};
use breather_math::{Aabb3, Point3, Vector3};

/// Indexed triangle mesh with one normal per vertex.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TriangleMesh {
    pub positions: Vec<Point3>,
    pub normals: Vec<Vector3>,
    pub indices: Vec<u32>,
}

impl TriangleMesh {
    /// Number of vertices in the mesh.
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Number of triangles in the mesh.
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Positions flattened to `[x0, y0, z0, x1, ...]` in single precision.
    pub fn positions_f32(&self) -> Vec<f32> {
        flatten_f32(&self.positions)
    }

    /// Normals flattened to `[x0, y0, z0, x1, ...]` in single precision.
    pub fn normals_f32(&self) -> Vec<f32> {
        flatten_f32(&self.normals)
    }

    /// Largest index referenced by the mesh, if any.
    pub fn max_index(&self) -> Option<u32> {
        self.indices.iter().copied().max()
    }

    /// Line-list indices covering every triangle edge exactly once.
    ///
    /// Edges are emitted in first-seen order, so the result is deterministic.
    pub fn wireframe_indices(&self) -> Vec<u32> {
        let mut seen = HashSet::with_capacity(self.indices.len());
        let mut lines = Vec::with_capacity(self.indices.len() * 2);
        for tri in self.indices.chunks_exact(3) {
            for (a, b) in [(tri[0], tri[1]), (tri[1], tri[2]), (tri[2], tri[0])] {
                let key = if a < b { (a, b) } else { (b, a) };
                if seen.insert(key) {
                    lines.push(a);
                    lines.push(b);
                }
            }
        }
        lines
    }

    /// Compute the axis-aligned bounding box of all finite positions.
    pub fn bounding_box(&self) -> Aabb3 {
        Aabb3::from_points(&self.positions).unwrap_or(Aabb3::new(Point3::ZERO, Point3::ZERO))
    }
}

impl Validate for TriangleMesh {
    fn validate(&self) -> Result<()> {
        if self.normals.len() != self.positions.len() {
            return Err(BreatherError::InvalidParameter(format!(
                "mesh has {} positions but {} normals",
                self.positions.len(),
                self.normals.len()
            )));
        }
        if self.indices.len() % 3 != 0 {
            return Err(BreatherError::InvalidParameter(format!(
                "index count {} is not a multiple of 3",
                self.indices.len()
            )));
        }
        if let Some(max) = self.max_index() {
            if max as usize >= self.positions.len() {
                return Err(BreatherError::InvalidParameter(format!(
                    "index {} out of bounds for {} vertices",
                    max,
                    self.positions.len()
                )));
            }
        }
        Ok(())
    }
}

fn flatten_f32(points: &[Point3]) -> Vec<f32> {
    let mut out = Vec::with_capacity(points.len() * 3);
    for p in points {
        out.extend_from_slice(&[p.x as f32, p.y as f32, p.z as f32]);
    }
    out
}
