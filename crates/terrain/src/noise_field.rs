//! Octave-summed coherent noise heightmaps.
//!
//! Each cell sums several layers ("octaves") of Perlin noise. Every octave
//! samples at a higher frequency and lower amplitude than the last, and is
//! shifted by its own seeded offset so the layers are decorrelated. The raw
//! sums are then normalized into `[0, 1]` against the observed range.

use noise::{NoiseFn, Perlin};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, warn};

use crate::config::NoiseSettings;
use crate::error::Result;
use crate::grid::HeightGrid;

/// Scale used in place of a non-positive scale.
pub const MIN_SCALE: f64 = 1e-4;

/// Octave offsets are drawn from `[-OFFSET_RANGE, OFFSET_RANGE)`.
pub const OFFSET_RANGE: i32 = 100_000;

/// Output level of every cell when all raw samples are equal.
pub const FLAT_LEVEL: f32 = 0.5;

/// A smooth, deterministic 2D noise primitive.
pub trait NoiseSource {
    /// Samples the noise at `(x, y)`. Returns a value in `[0, 1]`.
    fn sample(&self, x: f64, y: f64) -> f64;
}

/// [`NoiseSource`] backed by the `noise` crate's Perlin gradient noise.
#[derive(Debug, Clone)]
pub struct PerlinSource {
    perlin: Perlin,
}

impl PerlinSource {
    /// Creates a source with a specific permutation seed.
    pub fn new(seed: u32) -> Self {
        Self {
            perlin: Perlin::new(seed),
        }
    }
}

impl Default for PerlinSource {
    fn default() -> Self {
        Self::new(Perlin::DEFAULT_SEED)
    }
}

impl NoiseSource for PerlinSource {
    fn sample(&self, x: f64, y: f64) -> f64 {
        // Perlin output is in [-1, 1]
        ((self.perlin.get([x, y]) + 1.0) * 0.5).clamp(0.0, 1.0)
    }
}

/// Draws one sample offset per octave from a generator seeded with `seed`.
///
/// Octave 0 is drawn first, and within each octave the x offset is drawn
/// before the y offset. `offset` is added to every draw.
pub fn octave_offsets(seed: u64, octaves: u32, offset: [f64; 2]) -> Vec<[f64; 2]> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut offsets = Vec::with_capacity(octaves as usize);
    for _ in 0..octaves {
        let x = f64::from(rng.gen_range(-OFFSET_RANGE..OFFSET_RANGE)) + offset[0];
        let y = f64::from(rng.gen_range(-OFFSET_RANGE..OFFSET_RANGE)) + offset[1];
        offsets.push([x, y]);
    }
    offsets
}

/// Generates normalized heightmaps from a [`NoiseSource`].
#[derive(Debug, Clone, Default)]
pub struct NoiseField<S = PerlinSource> {
    source: S,
}

impl NoiseField {
    /// Creates a field sampling the default Perlin source.
    pub fn new() -> Self {
        Self::default()
    }
}

impl<S: NoiseSource> NoiseField<S> {
    /// Creates a field sampling a custom noise source.
    pub fn with_source(source: S) -> Self {
        Self { source }
    }

    /// Generates a `width × height` grid with every value in `[0, 1]`.
    ///
    /// Identical settings always produce identical grids.
    pub fn generate(&self, settings: &NoiseSettings) -> Result<HeightGrid> {
        settings.validate()?;

        let (width, height) = (settings.width, settings.height);
        let scale = if settings.scale <= 0.0 {
            warn!(
                scale = settings.scale,
                "non-positive noise scale, clamping to {MIN_SCALE}"
            );
            MIN_SCALE
        } else {
            settings.scale
        };

        let offsets = octave_offsets(settings.seed, settings.octaves, settings.offset);

        // Centering keeps zoom anchored on the middle of the map
        let half_width = width as f64 / 2.0;
        let half_height = height as f64 / 2.0;

        let mut raw = Vec::with_capacity(width * height);
        let mut min_height = f64::INFINITY;
        let mut max_height = f64::NEG_INFINITY;

        for y in 0..height {
            for x in 0..width {
                let centered_x = x as f64 - half_width;
                let centered_y = y as f64 - half_height;

                let mut amplitude = 1.0;
                let mut frequency = 1.0;
                let mut noise_height = 0.0;

                for octave in &offsets {
                    let sample_x = centered_x / scale * frequency + octave[0];
                    let sample_y = centered_y / scale * frequency + octave[1];

                    // Shift to [-1, 1] so octaves sum around zero
                    let value = self.source.sample(sample_x, sample_y) * 2.0 - 1.0;
                    noise_height += value * amplitude;

                    amplitude *= settings.persistence;
                    frequency *= settings.lacunarity;
                }

                min_height = min_height.min(noise_height);
                max_height = max_height.max(noise_height);
                raw.push(noise_height);
            }
        }

        let values = normalize(&raw, min_height, max_height);

        debug!(
            width,
            height,
            seed = settings.seed,
            octaves = settings.octaves,
            min_height,
            max_height,
            "generated noise map"
        );

        HeightGrid::new(width, height, values)
    }
}

/// Inverse-lerps every value from `[min, max]` into `[0, 1]`.
fn normalize(raw: &[f64], min: f64, max: f64) -> Vec<f32> {
    let range = max - min;
    if range <= 0.0 || !range.is_finite() {
        warn!(min, max, "flat noise range, using constant {FLAT_LEVEL}");
        return vec![FLAT_LEVEL; raw.len()];
    }
    raw.iter()
        .map(|&v| ((v - min) / range).clamp(0.0, 1.0) as f32)
        .collect()
}

/// Generates a normalized noise map with the default Perlin source.
#[allow(clippy::too_many_arguments)]
pub fn generate_noise_map(
    width: usize,
    height: usize,
    seed: u64,
    scale: f64,
    octaves: u32,
    persistence: f64,
    lacunarity: f64,
    offset: [f64; 2],
) -> Result<HeightGrid> {
    let settings = NoiseSettings {
        width,
        height,
        seed,
        scale,
        octaves,
        persistence,
        lacunarity,
        offset,
    };
    NoiseField::new().generate(&settings)
}
