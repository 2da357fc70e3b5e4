//! Configuration types for terrain generation.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::curve::KeyframeCurve;
use crate::error::{Result, TerrainError};
use crate::mesh::LevelOfDetail;

/// Parameters for octave-summed noise generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NoiseSettings {
    /// Grid width in samples.
    pub width: usize,
    /// Grid height in samples.
    pub height: usize,
    /// Seed for the octave offset generator.
    pub seed: u64,
    /// Zoom factor. Non-positive values are clamped to a small epsilon.
    pub scale: f64,
    /// Number of noise layers to sum.
    pub octaves: u32,
    /// Amplitude multiplier applied after each octave.
    pub persistence: f64,
    /// Frequency multiplier applied after each octave.
    pub lacunarity: f64,
    /// Global pan added to every sample coordinate.
    pub offset: [f64; 2],
}

impl Default for NoiseSettings {
    fn default() -> Self {
        Self {
            width: 100,
            height: 100,
            seed: 0,
            scale: 25.0,
            octaves: 4,
            persistence: 0.5,
            lacunarity: 2.0,
            offset: [0.0, 0.0],
        }
    }
}

impl NoiseSettings {
    /// Sets the grid dimensions.
    pub fn with_size(mut self, width: usize, height: usize) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_octaves(mut self, octaves: u32) -> Self {
        self.octaves = octaves;
        self
    }

    pub fn with_persistence(mut self, persistence: f64) -> Self {
        self.persistence = persistence;
        self
    }

    pub fn with_lacunarity(mut self, lacunarity: f64) -> Self {
        self.lacunarity = lacunarity;
        self
    }

    /// Sets the global pan offset.
    pub fn with_offset(mut self, x: f64, y: f64) -> Self {
        self.offset = [x, y];
        self
    }

    /// Checks that the settings describe a computable grid.
    ///
    /// A non-positive `scale` is not an error; generation clamps it.
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(TerrainError::invalid(format!(
                "noise map dimensions must be positive, got {}x{}",
                self.width, self.height
            )));
        }
        if self.octaves == 0 {
            return Err(TerrainError::invalid("octave count must be at least 1"));
        }
        let floats = [
            ("scale", self.scale),
            ("persistence", self.persistence),
            ("lacunarity", self.lacunarity),
            ("offset.x", self.offset[0]),
            ("offset.y", self.offset[1]),
        ];
        if let Some((name, value)) = floats.iter().find(|(_, v)| !v.is_finite()) {
            return Err(TerrainError::invalid(format!("{name} must be finite, got {value}")));
        }
        Ok(())
    }
}

/// Parameters for turning a height grid into a mesh.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MeshSettings {
    /// Vertical scale applied after the height curve.
    pub height_multiplier: f32,
    /// Downsampling level; 0 is full resolution.
    pub level_of_detail: LevelOfDetail,
}

impl Default for MeshSettings {
    fn default() -> Self {
        Self {
            height_multiplier: 10.0,
            level_of_detail: LevelOfDetail::FULL,
        }
    }
}

/// Full configuration for a terrain pipeline run.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainConfig {
    pub noise: NoiseSettings,
    pub mesh: MeshSettings,
    /// Shaping curve applied to normalized heights before the multiplier.
    pub height_curve: KeyframeCurve,
}

impl TerrainConfig {
    /// Gentle, low-relief terrain.
    pub fn rolling_hills(seed: u64) -> Self {
        Self {
            noise: NoiseSettings {
                seed,
                scale: 60.0,
                octaves: 3,
                persistence: 0.4,
                ..Default::default()
            },
            mesh: MeshSettings {
                height_multiplier: 8.0,
                ..Default::default()
            },
            height_curve: KeyframeCurve::linear(),
        }
    }

    /// High-relief terrain with flattened lowlands.
    pub fn mountains(seed: u64) -> Self {
        Self {
            noise: NoiseSettings {
                width: 241,
                height: 241,
                seed,
                scale: 80.0,
                octaves: 5,
                persistence: 0.5,
                lacunarity: 2.2,
                ..Default::default()
            },
            mesh: MeshSettings {
                height_multiplier: 40.0,
                ..Default::default()
            },
            // Water level sits at 30% of the normalized range
            height_curve: KeyframeCurve::flatten_below(0.3),
        }
    }

    /// Nearly level ground.
    pub fn flat(seed: u64) -> Self {
        Self {
            noise: NoiseSettings {
                seed,
                scale: 120.0,
                octaves: 2,
                ..Default::default()
            },
            mesh: MeshSettings {
                height_multiplier: 1.5,
                ..Default::default()
            },
            height_curve: KeyframeCurve::linear(),
        }
    }

    /// Parses a config from JSON. Missing fields take their defaults.
    ///
    /// Out-of-range values, including a negative level of detail, are
    /// reported as [`TerrainError::InvalidParameter`].
    pub fn from_json_str(json: &str) -> Result<Self> {
        let file: TerrainConfigFile = serde_json::from_str(json)?;
        let config = Self::try_from(file)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and parses a JSON config file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    pub fn validate(&self) -> Result<()> {
        self.noise.validate()?;
        if !self.mesh.height_multiplier.is_finite() {
            return Err(TerrainError::invalid("height multiplier must be finite"));
        }
        Ok(())
    }
}

/// On-disk form of [`MeshSettings`], with the level of detail kept signed
/// so range errors surface through validation rather than the parser.
#[derive(Debug, Deserialize)]
#[serde(default)]
struct MeshSettingsFile {
    height_multiplier: f32,
    level_of_detail: i64,
}

impl Default for MeshSettingsFile {
    fn default() -> Self {
        let settings = MeshSettings::default();
        Self {
            height_multiplier: settings.height_multiplier,
            level_of_detail: i64::from(settings.level_of_detail.level()),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct TerrainConfigFile {
    noise: NoiseSettings,
    mesh: MeshSettingsFile,
    height_curve: KeyframeCurve,
}

impl TryFrom<TerrainConfigFile> for TerrainConfig {
    type Error = TerrainError;

    fn try_from(file: TerrainConfigFile) -> Result<Self> {
        Ok(Self {
            noise: file.noise,
            mesh: MeshSettings {
                height_multiplier: file.mesh.height_multiplier,
                level_of_detail: LevelOfDetail::try_from(file.mesh.level_of_detail)?,
            },
            height_curve: file.height_curve,
        })
    }
}
