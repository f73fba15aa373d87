use serde::{Deserialize, Serialize};

/// Shading configuration selected by the user. The core only cares about the
/// primitive topology each mode implies; the rest is for the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShadingMode {
    #[default]
    Default,
    Wireframe,
    Gouraud,
    Phong,
}

/// Primitive topology of the index buffer handed to the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Topology {
    TriangleList,
    LineList,
}

impl ShadingMode {
    pub const ALL: [ShadingMode; 4] = [
        ShadingMode::Default,
        ShadingMode::Wireframe,
        ShadingMode::Gouraud,
        ShadingMode::Phong,
    ];

    pub fn topology(self) -> Topology {
        match self {
            ShadingMode::Wireframe => Topology::LineList,
            ShadingMode::Default | ShadingMode::Gouraud | ShadingMode::Phong => {
                Topology::TriangleList
            }
        }
    }

    /// Whether lighting is evaluated per fragment rather than per vertex.
    pub fn per_fragment_lighting(self) -> bool {
        matches!(self, ShadingMode::Phong)
    }
}

/// Directional + ambient lighting parameters for the shader.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LightingUniforms {
    pub ambient: [f32; 3],
    pub directional_color: [f32; 3],
    /// Direction towards the light; the shader normalizes it
    pub direction: [f32; 3],
    pub base_color: [f32; 3],
}

impl Default for LightingUniforms {
    fn default() -> Self {
        Self {
            ambient: [0.3, 0.3, 0.3],
            directional_color: [1.0, 1.0, 1.0],
            direction: [0.85, 0.8, 0.75],
            base_color: [0.0, 0.2, 0.6],
        }
    }
}
