pub mod generator;
pub mod triangle_mesh;

pub use generator::{
    generate, generate_with, tessellate_grid, GenerateOptions, GeneratedMesh, GenerationStats,
    Parallelism,
};
pub use triangle_mesh::TriangleMesh;
