//! Heightgrid to triangle mesh conversion.
//!
//! The grid is laid out on the XZ plane, centered on the origin, with one
//! world unit between neighbouring source samples. Row `y = 0` lies at the
//! largest Z. Higher levels of detail skip source samples but keep the same
//! footprint, anchor and UV mapping, so meshes for different LODs line up.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Result, TerrainError};
use crate::grid::HeightGrid;

/// Mesh downsampling level. Level 0 is full resolution; level `L > 0`
/// samples every `2 * L`-th grid point along each axis.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(try_from = "i64", into = "u32")]
pub struct LevelOfDetail(u32);

impl LevelOfDetail {
    pub const FULL: Self = Self(0);

    pub const fn new(level: u32) -> Self {
        Self(level)
    }

    pub const fn level(self) -> u32 {
        self.0
    }

    /// Distance between sampled grid points along each axis.
    pub fn increment(self) -> usize {
        if self.0 == 0 { 1 } else { 2 * self.0 as usize }
    }

    /// Number of vertices sampled along an axis of `len` source samples.
    ///
    /// A trailing partial step is not sampled.
    pub fn vertices_per_line(self, len: usize) -> usize {
        len.saturating_sub(1) / self.increment() + 1
    }
}

impl TryFrom<i64> for LevelOfDetail {
    type Error = TerrainError;

    fn try_from(level: i64) -> Result<Self> {
        u32::try_from(level).map(Self).map_err(|_| {
            TerrainError::invalid(format!(
                "level of detail must be in 0..={}, got {level}",
                u32::MAX
            ))
        })
    }
}

impl From<u32> for LevelOfDetail {
    fn from(level: u32) -> Self {
        Self(level)
    }
}

impl From<LevelOfDetail> for u32 {
    fn from(lod: LevelOfDetail) -> Self {
        lod.0
    }
}

/// GPU-ready mesh data.
///
/// `positions[i]` and `uvs[i]` describe vertex `i`. Every consecutive triple
/// in `triangle_indices` is one triangle, wound counter-clockwise when seen
/// from +Y.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MeshBuffers {
    positions: Vec<[f32; 3]>,
    uvs: Vec<[f32; 2]>,
    triangle_indices: Vec<u32>,
}

impl MeshBuffers {
    /// Preallocates buffers for a `verts_x × verts_y` vertex grid.
    fn with_grid_capacity(verts_x: usize, verts_y: usize) -> Self {
        let vertices = verts_x * verts_y;
        let indices = (verts_x - 1) * (verts_y - 1) * 6;
        Self {
            positions: Vec::with_capacity(vertices),
            uvs: Vec::with_capacity(vertices),
            triangle_indices: Vec::with_capacity(indices),
        }
    }

    fn push_vertex(&mut self, position: [f32; 3], uv: [f32; 2]) {
        self.positions.push(position);
        self.uvs.push(uv);
    }

    fn add_triangle(&mut self, a: u32, b: u32, c: u32) {
        self.triangle_indices.extend_from_slice(&[a, b, c]);
    }

    pub fn positions(&self) -> &[[f32; 3]] {
        &self.positions
    }

    pub fn uvs(&self) -> &[[f32; 2]] {
        &self.uvs
    }

    pub fn triangle_indices(&self) -> &[u32] {
        &self.triangle_indices
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.triangle_indices.len() / 3
    }

    /// Iterates over triangles as index triples.
    pub fn triangles(&self) -> impl Iterator<Item = [u32; 3]> + '_ {
        self.triangle_indices
            .chunks_exact(3)
            .map(|t| [t[0], t[1], t[2]])
    }

    /// Consumes the mesh, returning `(positions, uvs, triangle_indices)`.
    pub fn into_parts(self) -> (Vec<[f32; 3]>, Vec<[f32; 2]>, Vec<u32>) {
        (self.positions, self.uvs, self.triangle_indices)
    }
}

/// Builds a terrain mesh from `grid`.
///
/// Each vertex height is `height_curve(sample) * height_multiplier`. Positions
/// and UVs are computed against the full source dimensions, so the result
/// occupies the same footprint at every level of detail.
pub fn build_mesh(
    grid: &HeightGrid,
    height_multiplier: f32,
    height_curve: impl Fn(f32) -> f32,
    level_of_detail: LevelOfDetail,
) -> Result<MeshBuffers> {
    let (width, height) = grid.dimensions();
    let increment = level_of_detail.increment();
    let verts_x = level_of_detail.vertices_per_line(width);
    let verts_y = level_of_detail.vertices_per_line(height);

    let stride = u32::try_from(verts_x)
        .ok()
        .filter(|_| u32::try_from(verts_x * verts_y).is_ok())
        .ok_or_else(|| {
            TerrainError::invalid(format!(
                "{verts_x}x{verts_y} vertices exceed the 32-bit index range"
            ))
        })?;

    let top_left_x = (width as f32 - 1.0) / -2.0;
    let top_left_z = (height as f32 - 1.0) / 2.0;

    let mut mesh = MeshBuffers::with_grid_capacity(verts_x, verts_y);
    let mut vertex_index: u32 = 0;

    for (row, y) in (0..height).step_by(increment).enumerate() {
        for (col, x) in (0..width).step_by(increment).enumerate() {
            let h = height_curve(grid.get(x, y)) * height_multiplier;
            mesh.push_vertex(
                [top_left_x + x as f32, h, top_left_z - y as f32],
                [x as f32 / width as f32, y as f32 / height as f32],
            );

            // Last row and column have no quad below/right of them
            if col + 1 < verts_x && row + 1 < verts_y {
                let v = vertex_index;
                mesh.add_triangle(v, v + stride + 1, v + stride);
                mesh.add_triangle(v + stride + 1, v, v + 1);
            }

            vertex_index += 1;
        }
    }

    debug!(
        width,
        height,
        lod = level_of_detail.level(),
        vertices = mesh.vertex_count(),
        triangles = mesh.triangle_count(),
        "built terrain mesh"
    );

    Ok(mesh)
}
