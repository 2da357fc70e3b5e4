//! Rectangular grid of height samples.

use crate::error::{Result, TerrainError};

/// A `width × height` array of height samples.
///
/// Cells are addressed as `(x, y)` with `0 <= x < width` and
/// `0 <= y < height`. Storage is row-major: `values[y * width + x]`.
/// Row `y = 0` is the "top" edge of the terrain (largest Z once meshed).
#[derive(Debug, Clone, PartialEq)]
pub struct HeightGrid {
    width: usize,
    height: usize,
    values: Vec<f32>,
}

impl HeightGrid {
    /// Wraps a row-major buffer of samples.
    pub fn new(width: usize, height: usize, values: Vec<f32>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(TerrainError::invalid(format!(
                "grid dimensions must be positive, got {width}x{height}"
            )));
        }
        if values.len() != width * height {
            return Err(TerrainError::invalid(format!(
                "expected {} samples for a {width}x{height} grid, got {}",
                width * height,
                values.len()
            )));
        }
        if let Some(i) = values.iter().position(|v| !v.is_finite()) {
            return Err(TerrainError::invalid(format!(
                "sample ({}, {}) is not finite: {}",
                i % width,
                i / width,
                values[i]
            )));
        }
        Ok(Self {
            width,
            height,
            values,
        })
    }

    /// Builds a grid by evaluating `f(x, y)` for every cell.
    pub fn from_fn(
        width: usize,
        height: usize,
        mut f: impl FnMut(usize, usize) -> f32,
    ) -> Result<Self> {
        let mut values = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                values.push(f(x, y));
            }
        }
        Self::new(width, height, values)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns `(width, height)`.
    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Sample at `(x, y)`.
    ///
    /// # Panics
    /// Panics if the coordinate is outside the grid.
    pub fn get(&self, x: usize, y: usize) -> f32 {
        self.try_get(x, y).unwrap_or_else(|| {
            panic!("({x}, {y}) outside {}x{} grid", self.width, self.height)
        })
    }

    /// Sample at `(x, y)`, or `None` if the coordinate is outside the grid.
    pub fn try_get(&self, x: usize, y: usize) -> Option<f32> {
        (x < self.width && y < self.height).then(|| self.values[y * self.width + x])
    }

    /// Row-major view of all samples.
    pub fn values(&self) -> &[f32] {
        &self.values
    }

    /// Smallest and largest sample.
    pub fn min_max(&self) -> (f32, f32) {
        self.values
            .iter()
            .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            })
    }

    /// Returns a new grid with `f` applied to every sample.
    pub fn map(&self, f: impl Fn(f32) -> f32) -> Result<Self> {
        Self::new(
            self.width,
            self.height,
            self.values.iter().map(|&v| f(v)).collect(),
        )
    }
}
