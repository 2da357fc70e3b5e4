//! Noise-to-mesh pipeline.

use tracing::info;

use crate::config::TerrainConfig;
use crate::curve::KeyframeCurve;
use crate::error::Result;
use crate::grid::HeightGrid;
use crate::mesh::{LevelOfDetail, MeshBuffers, build_mesh};
use crate::noise_field::{NoiseField, NoiseSource, PerlinSource};

/// Output of a pipeline run.
#[derive(Debug, Clone)]
pub struct GeneratedTerrain {
    /// Normalized heights in `[0, 1]`.
    pub heights: HeightGrid,
    pub mesh: MeshBuffers,
}

/// Feeds a [`NoiseField`] into the mesher, shaping heights with the
/// configured curve and multiplier.
#[derive(Debug, Clone)]
pub struct TerrainPipeline<S = PerlinSource> {
    config: TerrainConfig,
    field: NoiseField<S>,
}

impl TerrainPipeline {
    /// Creates a pipeline sampling Perlin noise.
    pub fn new(config: TerrainConfig) -> Self {
        Self {
            config,
            field: NoiseField::new(),
        }
    }
}

impl<S: NoiseSource> TerrainPipeline<S> {
    /// Creates a pipeline sampling a custom noise source.
    pub fn with_source(config: TerrainConfig, source: S) -> Self {
        Self {
            config,
            field: NoiseField::with_source(source),
        }
    }

    pub fn config(&self) -> &TerrainConfig {
        &self.config
    }

    /// Sets the noise seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.config.noise.seed = seed;
        self
    }

    pub fn with_level_of_detail(mut self, lod: LevelOfDetail) -> Self {
        self.config.mesh.level_of_detail = lod;
        self
    }

    pub fn with_height_multiplier(mut self, multiplier: f32) -> Self {
        self.config.mesh.height_multiplier = multiplier;
        self
    }

    pub fn with_height_curve(mut self, curve: KeyframeCurve) -> Self {
        self.config.height_curve = curve;
        self
    }

    /// Generates a height grid and meshes it at the configured LOD.
    pub fn generate(&self) -> Result<GeneratedTerrain> {
        self.config.validate()?;
        let heights = self.field.generate(&self.config.noise)?;
        let mesh = self.mesh_heights(&heights, self.config.mesh.level_of_detail)?;

        info!(
            width = heights.width(),
            height = heights.height(),
            vertices = mesh.vertex_count(),
            triangles = mesh.triangle_count(),
            "generated terrain"
        );

        Ok(GeneratedTerrain { heights, mesh })
    }

    /// Meshes an existing height grid with this pipeline's curve and multiplier.
    pub fn mesh_heights(&self, heights: &HeightGrid, lod: LevelOfDetail) -> Result<MeshBuffers> {
        let curve = &self.config.height_curve;
        build_mesh(
            heights,
            self.config.mesh.height_multiplier,
            |h| curve.evaluate(h),
            lod,
        )
    }

    /// Generates one height grid and meshes it at each requested level.
    pub fn build_lod_chain(
        &self,
        levels: impl IntoIterator<Item = LevelOfDetail>,
    ) -> Result<(HeightGrid, Vec<(LevelOfDetail, MeshBuffers)>)> {
        self.config.validate()?;
        let heights = self.field.generate(&self.config.noise)?;
        let meshes = levels
            .into_iter()
            .map(|lod| Ok((lod, self.mesh_heights(&heights, lod)?)))
            .collect::<Result<Vec<_>>>()?;
        Ok((heights, meshes))
    }
}
