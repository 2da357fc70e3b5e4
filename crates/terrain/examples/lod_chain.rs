//! Example: Mesh one heightmap at several levels of detail.
//!
//! Uses a 241-sample grid, since 240 divides evenly by every increment up
//! to LOD 6 and no trailing samples are dropped.
//!
//! Run with:
//! ```
//! cargo run -p terrain --example lod_chain
//! ```

use terrain::prelude::*;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let pipeline = TerrainPipeline::new(TerrainConfig::mountains(2024));
    let (heights, meshes) = pipeline.build_lod_chain((0..=6).map(LevelOfDetail::new))?;

    tracing::info!("Heightmap: {}x{}", heights.width(), heights.height());
    for (lod, mesh) in &meshes {
        tracing::info!(
            "  LOD {}: step {:>2}, {:>6} vertices, {:>6} triangles",
            lod.level(),
            lod.increment(),
            mesh.vertex_count(),
            mesh.triangle_count()
        );
    }

    Ok(())
}
