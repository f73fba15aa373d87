//! Uniform grid tessellation of parametric surfaces with forward-difference
//! normals.
//!
//! The sampling order is fixed: rows follow `u` (outer), columns follow `v`
//! (inner), so vertex `(i, j)` lives at `i * (v_segments + 1) + j`. Each cell
//! is split into the triangles `(a, b, a+1)` and `(a+1, b, b+1)` where
//! `a = idx(i, j)` and `b = idx(i+1, j)`.

use rayon::prelude::*;
use tracing::{debug, info, instrument};

use breather_core::{BreatherError, Result, Tolerance};
use breather_geometry::{BreatherSurface, ParamRange, Surface, SurfaceParameters};
use breather_math::{Point3, Vector3};

use crate::TriangleMesh;

/// Vertex count above which rows are sampled on the rayon pool under
/// [`Parallelism::Auto`].
const PARALLEL_VERTEX_THRESHOLD: usize = 16_384;

/// How rows of the grid are distributed while sampling.
///
/// Every sample depends only on its own `(i, j)`, so all modes produce
/// bit-identical meshes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Parallelism {
    #[default]
    Auto,
    Sequential,
    Parallel,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct GenerateOptions {
    pub tolerance: Tolerance,
    pub parallelism: Parallelism,
}

/// Counters describing one generation pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GenerationStats {
    pub vertex_count: usize,
    pub triangle_count: usize,
    /// Samples whose finite-difference cross product could not be
    /// normalized and received a substituted normal.
    pub degenerate_normals: usize,
}

/// A mesh together with the statistics of the pass that produced it.
#[derive(Debug, Clone, Default)]
pub struct GeneratedMesh {
    pub mesh: TriangleMesh,
    pub stats: GenerationStats,
}

/// Generate the breather mesh for a validated parameter tuple.
pub fn generate(params: &SurfaceParameters) -> Result<GeneratedMesh> {
    generate_with(params, &GenerateOptions::default())
}

/// [`generate`] with explicit tolerance and parallelism.
#[instrument(
    skip(options),
    fields(a = params.shape_coefficient, u = params.u_segments, v = params.v_segments)
)]
pub fn generate_with(
    params: &SurfaceParameters,
    options: &GenerateOptions,
) -> Result<GeneratedMesh> {
    use breather_core::Validate;
    params.validate()?;

    let surface = BreatherSurface::new(params.shape_coefficient, params.u_range, params.v_range)?;
    let generated = tessellate_grid(&surface, params.u_segments, params.v_segments, options)?;

    info!(
        vertices = generated.stats.vertex_count,
        triangles = generated.stats.triangle_count,
        degenerate = generated.stats.degenerate_normals,
        "generated breather mesh"
    );
    Ok(generated)
}

/// Sample `surface` on a `(u_segments+1) x (v_segments+1)` grid over its
/// domain and triangulate it.
///
/// Normals are forward differences: `n = normalize((f(u+du,v) - p) x
/// (f(u,v+dv) - p))`. The cross product is degenerate when it is not finite
/// or its length is at most `tolerance.degenerate_normal * |tu| * |tv|`
/// (zero or parallel tangents). A degenerate sample reuses the most recent
/// non-degenerate normal in generation order, or `+Z` if there is none yet.
///
/// A zero segment count collapses that axis onto its minimum: the mesh keeps
/// one row (or column) of vertices and has no triangles.
pub fn tessellate_grid(
    surface: &dyn Surface,
    u_segments: usize,
    v_segments: usize,
    options: &GenerateOptions,
) -> Result<GeneratedMesh> {
    let (vertex_count, index_count) = checked_counts(u_segments, v_segments)?;

    let (u_min, u_max) = surface.domain_u();
    let (v_min, v_max) = surface.domain_v();
    let u_range = ParamRange { min: u_min, max: u_max };
    let v_range = ParamRange { min: v_min, max: v_max };
    let du = u_range.step(u_segments);
    let dv = v_range.step(v_segments);
    let v_count = v_segments + 1;

    let sample_row = |i: usize| -> Vec<(Point3, Option<Vector3>)> {
        let u = u_range.sample(i, u_segments);
        (0..v_count)
            .map(|j| {
                let v = v_range.sample(j, v_segments);
                let p = surface.point_at(u, v);
                let tangent_u = surface.point_at(u + du, v) - p;
                let tangent_v = surface.point_at(u, v + dv) - p;
                let n = tangent_u.cross(tangent_v);
                let tangent_scale = tangent_u.length() * tangent_v.length();
                let normal = if options.tolerance.is_degenerate(n.length(), tangent_scale) {
                    None
                } else {
                    n.try_normalize()
                };
                (p, normal)
            })
            .collect()
    };

    let parallel = match options.parallelism {
        Parallelism::Sequential => false,
        Parallelism::Parallel => true,
        Parallelism::Auto => vertex_count >= PARALLEL_VERTEX_THRESHOLD,
    };
    let rows: Vec<Vec<(Point3, Option<Vector3>)>> = if parallel {
        (0..=u_segments).into_par_iter().map(sample_row).collect()
    } else {
        (0..=u_segments).map(sample_row).collect()
    };

    let mut positions = Vec::with_capacity(vertex_count);
    let mut normals = Vec::with_capacity(vertex_count);
    let mut last_good: Option<Vector3> = None;
    let mut degenerate_normals = 0;

    for (p, normal) in rows.into_iter().flatten() {
        positions.push(p);
        match normal {
            Some(n) => {
                last_good = Some(n);
                normals.push(n);
            }
            None => {
                degenerate_normals += 1;
                normals.push(last_good.unwrap_or(Vector3::Z));
            }
        }
    }

    if degenerate_normals > 0 {
        debug!(
            degenerate_normals,
            "substituted normals for degenerate finite-difference samples"
        );
    }

    let indices = grid_indices(u_segments, v_segments, index_count);
    let mesh = TriangleMesh {
        positions,
        normals,
        indices,
    };

    Ok(GeneratedMesh {
        stats: GenerationStats {
            vertex_count: mesh.vertex_count(),
            triangle_count: mesh.triangle_count(),
            degenerate_normals,
        },
        mesh,
    })
}

/// Vertex and index counts for the grid, rejecting grids whose vertices or
/// index buffer cannot be described with `u32`.
fn checked_counts(u_segments: usize, v_segments: usize) -> Result<(usize, usize)> {
    let overflow = || BreatherError::SegmentOverflow {
        u_segments,
        v_segments,
    };
    let vertex_count = u_segments
        .checked_add(1)
        .zip(v_segments.checked_add(1))
        .and_then(|(u, v)| u.checked_mul(v))
        .ok_or_else(overflow)?;
    if vertex_count - 1 > u32::MAX as usize {
        return Err(overflow());
    }
    let index_count = u_segments
        .checked_mul(v_segments)
        .and_then(|cells| cells.checked_mul(6))
        .ok_or_else(overflow)?;
    if index_count > u32::MAX as usize {
        return Err(overflow());
    }
    Ok((vertex_count, index_count))
}

fn grid_indices(u_segments: usize, v_segments: usize, index_count: usize) -> Vec<u32> {
    let v_count = v_segments + 1;
    let mut indices = Vec::with_capacity(index_count);
    for i in 0..u_segments {
        for j in 0..v_segments {
            // Bounded by the u32 check in `checked_counts`
            let a = (i * v_count + j) as u32;
            let b = a + v_count as u32;
            indices.extend_from_slice(&[a, b, a + 1, a + 1, b, b + 1]);
        }
    }
    indices
}
