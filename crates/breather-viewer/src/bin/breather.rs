//! Breather CLI - headless mesh generation
//!
//! Provides subcommands for:
//! - `summary`: Generate the mesh and print its statistics
//! - `gltf`: Generate the mesh and write it as a glTF 2.0 JSON file

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use breather_render::export_gltf_json;
use breather_viewer::{Viewer, ViewerConfig};

#[derive(Parser, Debug)]
#[command(name = "breather")]
#[command(about = "Generate and export the breather surface mesh", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print vertex, triangle and degenerate-normal counts plus bounds
    Summary(GenArgs),
    /// Write the mesh as a self-contained glTF 2.0 JSON file
    Gltf {
        /// Output .gltf file path
        output: PathBuf,

        #[command(flatten)]
        args: GenArgs,
    },
}

#[derive(Parser, Debug)]
struct GenArgs {
    /// JSON viewer configuration (missing fields use defaults)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Shape coefficient, strictly between 0 and 1
    #[arg(long)]
    a: Option<f64>,

    /// Grid subdivisions along u
    #[arg(long)]
    u_segments: Option<usize>,

    /// Grid subdivisions along v
    #[arg(long)]
    v_segments: Option<usize>,
}

impl GenArgs {
    /// Load the config file (if any) and apply command-line overrides.
    fn build_viewer(&self) -> Result<Viewer> {
        let mut config = match &self.config {
            Some(path) => ViewerConfig::load(path)
                .with_context(|| format!("Failed to load config {}", path.display()))?,
            None => ViewerConfig::default(),
        };
        if let Some(a) = self.a {
            config.parameters.shape_coefficient = a;
        }
        if let Some(n) = self.u_segments {
            config.parameters.u_segments = n;
        }
        if let Some(n) = self.v_segments {
            config.parameters.v_segments = n;
        }
        Viewer::with_config(&config).context("Failed to generate mesh")
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Summary(args) => run_summary(args),
        Commands::Gltf { output, args } => run_gltf(output, args),
    }
}

fn run_summary(args: GenArgs) -> Result<()> {
    let viewer = args.build_viewer()?;
    let params = viewer.parameters();
    let stats = viewer.stats();
    let bounds = viewer.mesh().bounding_box();

    println!("=== Breather Surface ===");
    println!("Shape coefficient: {}", params.shape_coefficient);
    println!(
        "Domain:            u [{}, {}], v [{}, {}]",
        params.u_range.min, params.u_range.max, params.v_range.min, params.v_range.max
    );
    println!("Segments:          {} x {}", params.u_segments, params.v_segments);
    println!("Vertices:          {}", stats.vertex_count);
    println!("Triangles:         {}", stats.triangle_count);
    println!("Degenerate normals: {}", stats.degenerate_normals);
    println!(
        "Bounds:            ({:.3}, {:.3}, {:.3}) to ({:.3}, {:.3}, {:.3})",
        bounds.min.x, bounds.min.y, bounds.min.z, bounds.max.x, bounds.max.y, bounds.max.z
    );
    let (center, extents) = (bounds.center(), bounds.extents());
    println!(
        "Center:            ({:.3}, {:.3}, {:.3}), extents ({:.3}, {:.3}, {:.3})",
        center.x, center.y, center.z, extents.x, extents.y, extents.z
    );
    Ok(())
}

fn run_gltf(output: PathBuf, args: GenArgs) -> Result<()> {
    let viewer = args.build_viewer()?;
    let json = export_gltf_json(viewer.mesh(), "Breather", viewer.lighting().base_color);
    std::fs::write(&output, json)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    println!(
        "Wrote {} vertices, {} triangles to {}",
        viewer.stats().vertex_count,
        viewer.stats().triangle_count,
        output.display()
    );
    Ok(())
}
