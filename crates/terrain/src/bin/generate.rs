//! Generates a terrain mesh and logs a summary.
//!
//! Run with:
//! ```
//! cargo run -p terrain --bin generate -- [config.json]
//! ```
//!
//! The config path may also be given through `TERRAIN_CONFIG`. Without one,
//! the default configuration is used.

use terrain::prelude::*;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config_path = std::env::args()
        .nth(1)
        .or_else(|| std::env::var("TERRAIN_CONFIG").ok());

    let config = match config_path {
        Some(path) => {
            tracing::info!("Loading config from {}", path);
            TerrainConfig::from_json_file(&path)?
        }
        None => {
            tracing::info!("No config given, using defaults");
            TerrainConfig::default()
        }
    };

    let pipeline = TerrainPipeline::new(config);
    let terrain = pipeline.generate()?;
    let (min, max) = terrain
        .mesh
        .positions()
        .iter()
        .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), p| {
            (lo.min(p[1]), hi.max(p[1]))
        });

    // Summary output
    tracing::info!("Terrain generated!");
    tracing::info!(
        "  Grid: {}x{}",
        terrain.heights.width(),
        terrain.heights.height()
    );
    tracing::info!("  Seed: {}", pipeline.config().noise.seed);
    tracing::info!(
        "  Level of detail: {}",
        pipeline.config().mesh.level_of_detail.level()
    );
    tracing::info!("  Vertices: {}", terrain.mesh.vertex_count());
    tracing::info!("  Triangles: {}", terrain.mesh.triangle_count());
    tracing::info!("  Elevation: {:.2} to {:.2}", min, max);

    Ok(())
}
