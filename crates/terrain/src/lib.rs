//! Procedural terrain generation.
//!
//! This crate synthesizes heightfields from octave-summed coherent noise and
//! turns them into GPU-ready triangle meshes with level-of-detail
//! downsampling.
//!
//! # Quick Start
//!
//! ```rust
//! use terrain::prelude::*;
//!
//! let heights = NoiseField::new()
//!     .generate(&NoiseSettings::default().with_size(64, 64).with_seed(7))?;
//!
//! let mesh = build_mesh(&heights, 20.0, |h| h * h, LevelOfDetail::new(1))?;
//! assert_eq!(mesh.vertex_count(), 32 * 32);
//! # Ok::<(), terrain::TerrainError>(())
//! ```

pub mod config;
pub mod curve;
pub mod error;
pub mod grid;
pub mod mesh;
pub mod noise_field;
pub mod pipeline;

pub use error::{Result, TerrainError};

pub mod prelude {
    //! Convenient re-exports for common usage.

    pub use crate::config::{MeshSettings, NoiseSettings, TerrainConfig};
    pub use crate::curve::{Keyframe, KeyframeCurve};
    pub use crate::grid::HeightGrid;
    pub use crate::mesh::{LevelOfDetail, MeshBuffers, build_mesh};
    pub use crate::noise_field::{
        NoiseField, NoiseSource, PerlinSource, generate_noise_map, octave_offsets,
    };
    pub use crate::pipeline::{GeneratedTerrain, TerrainPipeline};
    pub use crate::{Result, TerrainError};
}
