//! The viewer session: parameter edits regenerate the mesh, pointer and
//! wheel input drive the view, and the renderer pulls one [`Frame`] per
//! displayed frame.

use breather_core::{Result, Validate};
use breather_geometry::SurfaceParameters;
use breather_math::{Mat3Cols, Mat4Cols};
use breather_mesh::{generate_with, GenerateOptions, GenerationStats, TriangleMesh};
use breather_render::{
    prepare_mesh, CameraState, FrameUniforms, LightingUniforms, OrientationAccumulator,
    RenderMesh, ShadingMode, Topology,
};
use tracing::{debug, warn};

use crate::config::ViewerConfig;
use crate::params::{ParameterField, ParameterStore, ParameterValue};

/// Everything the renderer needs for one frame. Matrices are column-major.
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a> {
    pub projection: Mat4Cols,
    /// Camera translation composed with the accumulated orientation
    pub view: Mat4Cols,
    pub normal_matrix: Mat3Cols,
    pub lighting: LightingUniforms,
    pub topology: Topology,
    pub shading: ShadingMode,
    pub mesh: &'a TriangleMesh,
}

#[derive(Debug)]
pub struct Viewer {
    params: ParameterStore,
    mesh: TriangleMesh,
    stats: GenerationStats,
    options: GenerateOptions,
    camera: CameraState,
    orientation: OrientationAccumulator,
    lighting: LightingUniforms,
    shading: ShadingMode,
}

impl Viewer {
    /// A viewer with default configuration, mesh already generated.
    pub fn new() -> Result<Self> {
        Self::with_config(&ViewerConfig::default())
    }

    /// A viewer built from a validated configuration.
    pub fn with_config(config: &ViewerConfig) -> Result<Self> {
        config.validate()?;
        let mut viewer = Self {
            params: ParameterStore::with_initial(config.parameters)?,
            mesh: TriangleMesh::default(),
            stats: GenerationStats::default(),
            options: GenerateOptions::default(),
            camera: config.camera.build(16.0 / 9.0),
            orientation: OrientationAccumulator::new(config.orientation.pixels_per_degree),
            lighting: config.lighting,
            shading: config.shading,
        };
        viewer.regenerate_if_dirty()?;
        Ok(viewer)
    }

    pub fn parameters(&self) -> &SurfaceParameters {
        self.params.current()
    }

    pub fn mesh(&self) -> &TriangleMesh {
        &self.mesh
    }

    pub fn stats(&self) -> GenerationStats {
        self.stats
    }

    pub fn camera(&self) -> &CameraState {
        &self.camera
    }

    pub fn orientation(&self) -> &OrientationAccumulator {
        &self.orientation
    }

    pub fn shading(&self) -> ShadingMode {
        self.shading
    }

    pub fn set_shading(&mut self, mode: ShadingMode) {
        self.shading = mode;
    }

    pub fn lighting(&self) -> LightingUniforms {
        self.lighting
    }

    pub fn set_lighting(&mut self, lighting: LightingUniforms) {
        self.lighting = lighting;
    }

    /// Replace the parameters wholesale and regenerate. On error the previous
    /// parameters and mesh stay in place.
    pub fn on_parameters_changed(&mut self, params: SurfaceParameters) -> Result<&TriangleMesh> {
        let previous = *self.params.current();
        self.params.replace(params)?;
        self.regenerate_or_restore(previous)?;
        Ok(&self.mesh)
    }

    /// Edit one field and regenerate.
    pub fn set_parameter(
        &mut self,
        field: ParameterField,
        value: ParameterValue,
    ) -> Result<&TriangleMesh> {
        let previous = *self.params.current();
        self.params.set(field, value)?;
        self.regenerate_or_restore(previous)?;
        Ok(&self.mesh)
    }

    /// Restore the canonical parameters and regenerate.
    pub fn reset_parameters(&mut self) -> Result<&TriangleMesh> {
        let previous = *self.params.current();
        self.params.reset_to_defaults();
        self.regenerate_or_restore(previous)?;
        Ok(&self.mesh)
    }

    pub fn on_pointer_down(&mut self, x: f64, y: f64) {
        self.orientation.begin_drag(x, y);
    }

    pub fn on_pointer_move(&mut self, x: f64, y: f64) {
        self.orientation.drag_to(x, y);
    }

    pub fn on_pointer_up(&mut self) {
        self.orientation.end_drag();
    }

    pub fn on_wheel(&mut self, delta_y: f64) {
        self.camera.wheel(delta_y);
    }

    pub fn on_resize(&mut self, width: f64, height: f64) {
        self.camera.set_viewport(width, height);
    }

    /// Current transforms, lighting, topology and mesh.
    pub fn on_frame(&self) -> Frame<'_> {
        let uniforms = FrameUniforms::from_state(&self.camera, &self.orientation, self.lighting);
        Frame {
            projection: uniforms.projection,
            view: uniforms.view,
            normal_matrix: uniforms.normal_matrix,
            lighting: uniforms.lighting,
            topology: self.shading.topology(),
            shading: self.shading,
            mesh: &self.mesh,
        }
    }

    /// Pack the current mesh for upload using the current topology.
    pub fn render_mesh(&self) -> RenderMesh {
        prepare_mesh(&self.mesh, self.shading.topology())
    }

    fn regenerate_or_restore(&mut self, previous: SurfaceParameters) -> Result<()> {
        if let Err(e) = self.regenerate_if_dirty() {
            warn!(error = %e, "mesh generation failed; keeping previous mesh");
            // `previous` produced the current mesh, so it is known to be valid
            self.params.replace(previous)?;
            self.params.take_dirty();
            return Err(e);
        }
        Ok(())
    }

    fn regenerate_if_dirty(&mut self) -> Result<()> {
        if !self.params.is_dirty() {
            return Ok(());
        }
        let generated = generate_with(self.params.current(), &self.options)?;
        // Swap only after the pass finished so readers never see a partial mesh
        self.mesh = generated.mesh;
        self.stats = generated.stats;
        self.params.take_dirty();
        debug!(vertices = self.stats.vertex_count, "mesh replaced");
        Ok(())
    }
}
