//! Property tests for noise generation and meshing through the public API.
//!
//! These cover:
//! - Determinism and value range of generated heightmaps
//! - Mesh buffer sizes across levels of detail
//! - Index validity and triangle winding
//! - Spatial anchor and UV invariance under LOD changes

use terrain::prelude::*;

fn settings(width: usize, height: usize, seed: u64) -> NoiseSettings {
    NoiseSettings::default()
        .with_size(width, height)
        .with_seed(seed)
        .with_scale(12.0)
        .with_octaves(4)
}

#[test]
fn test_generation_is_deterministic() {
    let field = NoiseField::new();
    let s = settings(33, 21, 77).with_offset(4.5, -13.0);
    let a = field.generate(&s).unwrap();
    let b = field.generate(&s).unwrap();
    assert_eq!(a.values(), b.values());
}

#[test]
fn test_values_in_unit_range() {
    let field = NoiseField::new();
    for seed in 0..5 {
        for (persistence, lacunarity) in [(0.5, 2.0), (1.0, 1.0), (0.25, 3.5)] {
            let s = settings(20, 20, seed)
                .with_persistence(persistence)
                .with_lacunarity(lacunarity);
            let grid = field.generate(&s).unwrap();
            assert!(
                grid.values().iter().all(|v| (0.0..=1.0).contains(v)),
                "out of range for seed {seed}"
            );
        }
    }
}

#[test]
fn test_dimensions_match_request() {
    for (w, h) in [(1, 1), (1, 7), (9, 2), (16, 16), (31, 5)] {
        let grid = NoiseField::new().generate(&settings(w, h, 1)).unwrap();
        assert_eq!(grid.dimensions(), (w, h));
        assert_eq!(grid.values().len(), w * h);
    }
}

#[test]
fn test_single_cell_is_flat() {
    let grid = generate_noise_map(1, 1, 5, 10.0, 3, 0.5, 2.0, [0.0, 0.0]).unwrap();
    assert_eq!(grid.values(), &[0.5]);
}

#[test]
fn test_lattice_sampling_is_flat() {
    // Unit scale on an even grid samples Perlin noise only at lattice
    // points, where it is zero
    let grid = generate_noise_map(4, 4, 1, 1.0, 1, 0.5, 2.0, [0.0, 0.0]).unwrap();
    assert!(grid.values().iter().all(|&v| v == 0.5));
}

#[test]
fn test_mesh_sizes_full_resolution() {
    for (w, h) in [(2, 2), (4, 4), (7, 3), (16, 9)] {
        let grid = NoiseField::new().generate(&settings(w, h, 2)).unwrap();
        let mesh = build_mesh(&grid, 1.0, |v| v, LevelOfDetail::FULL).unwrap();
        assert_eq!(mesh.vertex_count(), w * h);
        assert_eq!(mesh.uvs().len(), w * h);
        assert_eq!(mesh.triangle_indices().len(), (w - 1) * (h - 1) * 6);
    }
}

#[test]
fn test_mesh_sizes_downsampled() {
    let width = 25;
    let grid = NoiseField::new().generate(&settings(width, width, 3)).unwrap();
    for level in 1..=3u32 {
        let lod = LevelOfDetail::new(level);
        let mesh = build_mesh(&grid, 1.0, |v| v, lod).unwrap();
        let per_line = (width - 1) / (2 * level as usize) + 1;
        assert_eq!(mesh.vertex_count(), per_line * per_line);
        assert_eq!(
            mesh.triangle_indices().len(),
            (per_line - 1) * (per_line - 1) * 6
        );
    }
}

#[test]
fn test_indices_valid_for_all_lods() {
    for (w, h) in [(3, 3), (10, 10), (13, 8), (24, 17)] {
        let grid = NoiseField::new().generate(&settings(w, h, 4)).unwrap();
        for level in 0..=3 {
            let mesh = build_mesh(&grid, 5.0, |v| v, LevelOfDetail::new(level)).unwrap();
            let count = mesh.vertex_count() as u32;
            assert_eq!(mesh.triangle_indices().len() % 3, 0);
            assert!(
                mesh.triangle_indices().iter().all(|&i| i < count),
                "bad index for {w}x{h} at LOD {level}"
            );
        }
    }
}

#[test]
fn test_triangles_wind_counter_clockwise_from_above() {
    let grid = HeightGrid::new(6, 6, vec![0.0; 36]).unwrap();
    for level in 0..=2 {
        let mesh = build_mesh(&grid, 1.0, |v| v, LevelOfDetail::new(level)).unwrap();
        let p = mesh.positions();
        for [a, b, c] in mesh.triangles() {
            let (p0, p1, p2) = (p[a as usize], p[b as usize], p[c as usize]);
            // Y component of (p1 - p0) x (p2 - p0)
            let ny = (p1[2] - p0[2]) * (p2[0] - p0[0]) - (p1[0] - p0[0]) * (p2[2] - p0[2]);
            assert!(ny > 0.0);
        }
    }
}

#[test]
fn test_anchor_is_lod_invariant() {
    let grid = NoiseField::new().generate(&settings(21, 21, 5)).unwrap();
    let full = build_mesh(&grid, 1.0, |v| v, LevelOfDetail::FULL).unwrap();
    for level in 1..=3 {
        let mesh = build_mesh(&grid, 1.0, |v| v, LevelOfDetail::new(level)).unwrap();
        // Vertex 0 always samples source (0, 0)
        assert_eq!(mesh.positions()[0], full.positions()[0]);
        assert_eq!(mesh.positions()[0][0], -10.0);
        assert_eq!(mesh.positions()[0][2], 10.0);
    }
}

#[test]
fn test_uvs_are_lod_invariant() {
    let width = 13;
    let grid = NoiseField::new().generate(&settings(width, width, 6)).unwrap();
    let full = build_mesh(&grid, 1.0, |v| v, LevelOfDetail::FULL).unwrap();
    for level in 1..=3u32 {
        let lod = LevelOfDetail::new(level);
        let step = lod.increment();
        let per_line = lod.vertices_per_line(width);
        let mesh = build_mesh(&grid, 1.0, |v| v, lod).unwrap();
        for row in 0..per_line {
            for col in 0..per_line {
                let (x, y) = (col * step, row * step);
                let downsampled = row * per_line + col;
                let source = y * width + x;
                assert_eq!(mesh.uvs()[downsampled], full.uvs()[source]);
                assert_eq!(mesh.positions()[downsampled], full.positions()[source]);
            }
        }
    }
}

#[test]
fn test_four_by_four_example() {
    let grid = generate_noise_map(4, 4, 1, 10.0, 1, 0.5, 2.0, [0.0, 0.0]).unwrap();
    let mesh = build_mesh(&grid, 3.0, |v| v, LevelOfDetail::FULL).unwrap();
    assert_eq!(mesh.vertex_count(), 16);
    assert_eq!(mesh.triangle_indices().len(), 3 * 3 * 6);
    assert_eq!(mesh.positions()[0], [-1.5, grid.get(0, 0) * 3.0, 1.5]);
}

#[test]
fn test_negative_lod_rejected() {
    assert!(matches!(
        LevelOfDetail::try_from(-2i64),
        Err(TerrainError::InvalidParameter(_))
    ));
}
