//! Height shaping curves.
//!
//! The mesher accepts any `Fn(f32) -> f32` as its height curve. This module
//! provides a serializable piecewise-linear curve for configs and presets.

use serde::{Deserialize, Serialize};

use crate::error::{Result, TerrainError};

/// A single control point on a [`KeyframeCurve`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Keyframe {
    /// Input position, usually within `[0, 1]`.
    pub time: f32,
    /// Output at `time`.
    pub value: f32,
}

impl Keyframe {
    pub const fn new(time: f32, value: f32) -> Self {
        Self { time, value }
    }
}

/// Piecewise-linear curve through a sorted set of keyframes.
///
/// Inputs before the first key or after the last key take that key's value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Keyframe>", into = "Vec<Keyframe>")]
pub struct KeyframeCurve {
    keys: Vec<Keyframe>,
}

impl KeyframeCurve {
    /// Creates a curve from keys in any order.
    pub fn new(mut keys: Vec<Keyframe>) -> Result<Self> {
        if keys.is_empty() {
            return Err(TerrainError::invalid("curve needs at least one keyframe"));
        }
        if keys
            .iter()
            .any(|k| !k.time.is_finite() || !k.value.is_finite())
        {
            return Err(TerrainError::invalid("curve keyframes must be finite"));
        }
        keys.sort_by(|a, b| a.time.total_cmp(&b.time));
        Ok(Self { keys })
    }

    /// Creates a curve from `(time, value)` pairs.
    pub fn from_points(points: &[(f32, f32)]) -> Result<Self> {
        Self::new(points.iter().map(|&(t, v)| Keyframe::new(t, v)).collect())
    }

    /// Identity over `[0, 1]`.
    pub fn linear() -> Self {
        Self {
            keys: vec![Keyframe::new(0.0, 0.0), Keyframe::new(1.0, 1.0)],
        }
    }

    pub fn constant(value: f32) -> Self {
        Self {
            keys: vec![Keyframe::new(0.0, value)],
        }
    }

    /// Maps everything below `level` to 0 and ramps linearly to 1 above it.
    ///
    /// Useful for flat water surfaces under a height multiplier.
    pub fn flatten_below(level: f32) -> Self {
        let level = level.clamp(0.0, 1.0);
        Self {
            keys: vec![
                Keyframe::new(0.0, 0.0),
                Keyframe::new(level, 0.0),
                Keyframe::new(1.0, 1.0),
            ],
        }
    }

    pub fn keys(&self) -> &[Keyframe] {
        &self.keys
    }

    /// Evaluates the curve at `t`. NaN inputs evaluate to NaN.
    pub fn evaluate(&self, t: f32) -> f32 {
        if t.is_nan() {
            return t;
        }
        // Non-empty by construction
        let first = self.keys[0];
        let last = self.keys[self.keys.len() - 1];
        if t <= first.time {
            return first.value;
        }
        if t >= last.time {
            return last.value;
        }

        // first.time < t < last.time, so 1 <= i < len
        let i = self.keys.partition_point(|k| k.time <= t);
        let a = self.keys[i - 1];
        let b = self.keys[i];
        let f = (t - a.time) / (b.time - a.time);
        a.value + (b.value - a.value) * f
    }
}

impl Default for KeyframeCurve {
    fn default() -> Self {
        Self::linear()
    }
}

impl TryFrom<Vec<Keyframe>> for KeyframeCurve {
    type Error = TerrainError;

    fn try_from(keys: Vec<Keyframe>) -> Result<Self> {
        Self::new(keys)
    }
}

impl From<KeyframeCurve> for Vec<Keyframe> {
    fn from(curve: KeyframeCurve) -> Self {
        curve.keys
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_is_identity_inside_unit_range() {
        let curve = KeyframeCurve::linear();
        for t in [0.0, 0.1, 0.5, 0.75, 1.0] {
            assert!((curve.evaluate(t) - t).abs() < 1e-6);
        }
    }

    #[test]
    fn test_clamps_outside_keys() {
        let curve = KeyframeCurve::linear();
        assert_eq!(curve.evaluate(-2.0), 0.0);
        assert_eq!(curve.evaluate(3.0), 1.0);
    }

    #[test]
    fn test_unsorted_points_are_sorted() {
        let curve = KeyframeCurve::from_points(&[(1.0, 4.0), (0.0, 0.0), (0.5, 1.0)]).unwrap();
        assert_eq!(curve.keys()[0].time, 0.0);
        assert!((curve.evaluate(0.25) - 0.5).abs() < 1e-6);
        assert!((curve.evaluate(0.75) - 2.5).abs() < 1e-6);
    }

    #[test]
    fn test_flatten_below() {
        let curve = KeyframeCurve::flatten_below(0.4);
        assert_eq!(curve.evaluate(0.2), 0.0);
        assert_eq!(curve.evaluate(0.4), 0.0);
        assert!((curve.evaluate(0.7) - 0.5).abs() < 1e-6);
        assert_eq!(curve.evaluate(1.0), 1.0);
    }

    #[test]
    fn test_constant() {
        let curve = KeyframeCurve::constant(2.5);
        assert_eq!(curve.evaluate(0.0), 2.5);
        assert_eq!(curve.evaluate(0.9), 2.5);
    }

    #[test]
    fn test_nan_input_passes_through() {
        let curve = KeyframeCurve::flatten_below(0.3);
        assert!(curve.evaluate(f32::NAN).is_nan());
        assert!(KeyframeCurve::constant(1.0).evaluate(f32::NAN).is_nan());
    }

    #[test]
    fn test_rejects_empty_and_nan() {
        assert!(KeyframeCurve::new(vec![]).is_err());
        assert!(KeyframeCurve::from_points(&[(0.0, f32::NAN)]).is_err());
    }

    #[test]
    fn test_deserialize_rejects_empty_list() {
        let result: std::result::Result<KeyframeCurve, _> = serde_json::from_str("[]");
        assert!(result.is_err());
    }
}
