//! Heightmap
//!
//! Square grid of 16-bit elevation samples. Heights are read back on a
//! coarser "patch grid": `scale = dim / patch_size` samples per patch step,
//! and `height(x, y)` returns the sample at patch coordinate `(x, y)`
//! normalized to [0, 1].

use std::path::Path;

use glam::Vec2;

use super::noise::fbm;
use crate::error::{EditorError, Result};

/// Octaves used for procedural heightmaps
const PROCEDURAL_OCTAVES: u32 = 5;

/// 16-bit square heightmap
#[derive(Debug, Clone)]
pub struct Heightmap {
    samples: Vec<u16>,
    dim: u32,
    patch_size: u32,
    scale: u32,
}

impl Heightmap {
    /// Wrap raw samples (row-major, `dim * dim` long).
    pub fn from_samples(dim: u32, samples: Vec<u16>, patch_size: u32) -> Result<Self> {
        if dim == 0 {
            return Err(EditorError::InvalidHeightmap("dimension is zero".into()));
        }
        if patch_size == 0 {
            return Err(EditorError::InvalidHeightmap("patch size is zero".into()));
        }
        let expected = dim as usize * dim as usize;
        if samples.len() != expected {
            return Err(EditorError::InvalidHeightmap(format!(
                "expected {} samples for a {}x{} map, got {}",
                expected,
                dim,
                dim,
                samples.len()
            )));
        }
        if dim < patch_size {
            return Err(EditorError::InvalidHeightmap(format!(
                "dimension {} is smaller than patch size {}",
                dim, patch_size
            )));
        }

        Ok(Self {
            samples,
            dim,
            patch_size,
            scale: dim / patch_size,
        })
    }

    /// Decode a square grayscale image. 8-bit images are widened to 16-bit.
    pub fn load(path: impl AsRef<Path>, patch_size: u32) -> Result<Self> {
        let path = path.as_ref();
        let image = image::open(path).map_err(|source| EditorError::Image {
            path: path.to_path_buf(),
            source,
        })?;
        let luma = image.to_luma16();
        let (width, height) = luma.dimensions();
        if width != height {
            return Err(EditorError::InvalidHeightmap(format!(
                "{} is {}x{}, heightmaps must be square",
                path.display(),
                width,
                height
            )));
        }

        log::info!(
            "Loaded heightmap {} ({}x{}, patch size {})",
            path.display(),
            width,
            height,
            patch_size
        );
        Self::from_samples(width, luma.into_raw(), patch_size)
    }

    /// Generate a fractal-noise heightmap.
    ///
    /// `frequency` is the noise step per sample; smaller values give broader hills.
    pub fn procedural(dim: u32, patch_size: u32, frequency: f32) -> Result<Self> {
        let max_amplitude = 1.0 - 0.5f32.powi(PROCEDURAL_OCTAVES as i32);
        let mut samples = Vec::with_capacity(dim as usize * dim as usize);
        for y in 0..dim {
            for x in 0..dim {
                let p = Vec2::new(x as f32, y as f32) * frequency;
                let h = (fbm(p, PROCEDURAL_OCTAVES) / max_amplitude).clamp(0.0, 1.0);
                samples.push((h * u16::MAX as f32).round() as u16);
            }
        }
        Self::from_samples(dim, samples, patch_size)
    }

    /// Samples per side
    #[inline]
    pub fn dimension(&self) -> u32 {
        self.dim
    }

    #[inline]
    pub fn patch_size(&self) -> u32 {
        self.patch_size
    }

    /// Samples per patch-grid step
    #[inline]
    pub fn scale(&self) -> u32 {
        self.scale
    }

    /// Raw samples, row-major
    pub fn samples(&self) -> &[u16] {
        &self.samples
    }

    /// Height at patch-grid coordinate `(x, y)` in [0, 1].
    ///
    /// Coordinates past the edge clamp to the last sample row/column,
    /// snapped down to the patch grid.
    pub fn height(&self, x: u32, y: u32) -> f32 {
        let scale = self.scale as u64;
        let last = (self.dim - 1) as u64;
        let px = ((x as u64 * scale).min(last) / scale) * scale;
        let py = ((y as u64 * scale).min(last) / scale) * scale;
        let index = (px + py * self.dim as u64) as usize;
        self.samples[index] as f32 / u16::MAX as f32
    }

    /// Number of distinct patch-grid coordinates per side.
    fn grid_extent(&self) -> u32 {
        (self.dim - 1) / self.scale + 1
    }

    /// Lowest height over the whole patch grid.
    pub fn lowest_height(&self) -> f32 {
        let extent = self.grid_extent();
        (0..extent)
            .flat_map(|y| (0..extent).map(move |x| (x, y)))
            .map(|(x, y)| self.height(x, y))
            .fold(f32::INFINITY, f32::min)
    }

    /// Highest height over the whole patch grid.
    pub fn highest_height(&self) -> f32 {
        let extent = self.grid_extent();
        (0..extent)
            .flat_map(|y| (0..extent).map(move |x| (x, y)))
            .map(|(x, y)| self.height(x, y))
            .fold(f32::NEG_INFINITY, f32::max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp(dim: u32, patch_size: u32) -> Heightmap {
        let samples = (0..dim * dim).map(|i| (i % dim) as u16 * 1000).collect();
        Heightmap::from_samples(dim, samples, patch_size).unwrap()
    }

    #[test]
    fn test_rejects_wrong_sample_count() {
        let err = Heightmap::from_samples(4, vec![0; 15], 2);
        assert!(matches!(err, Err(EditorError::InvalidHeightmap(_))));
    }

    #[test]
    fn test_rejects_zero_patch_size() {
        assert!(Heightmap::from_samples(4, vec![0; 16], 0).is_err());
    }

    #[test]
    fn test_rejects_patch_larger_than_map() {
        assert!(Heightmap::from_samples(4, vec![0; 16], 8).is_err());
    }

    #[test]
    fn test_scale() {
        let map = ramp(8, 4);
        assert_eq!(map.scale(), 2);
        assert_eq!(map.dimension(), 8);
    }

    #[test]
    fn test_height_samples_patch_grid() {
        let map = ramp(8, 4);
        // x = 1 on the patch grid reads sample column 2
        assert!((map.height(1, 0) - 2000.0 / 65535.0).abs() < 1e-6);
        assert!((map.height(3, 3) - 6000.0 / 65535.0).abs() < 1e-6);
    }

    #[test]
    fn test_height_clamps_past_edge() {
        let map = ramp(8, 4);
        // 100 * 2 clamps to column 7, snapped down to column 6
        assert_eq!(map.height(100, 0), map.height(3, 0));
    }

    #[test]
    fn test_lowest_and_highest() {
        let map = ramp(8, 4);
        assert_eq!(map.lowest_height(), 0.0);
        assert!((map.highest_height() - 6000.0 / 65535.0).abs() < 1e-6);
    }

    #[test]
    fn test_procedural_is_deterministic() {
        let a = Heightmap::procedural(32, 16, 0.05).unwrap();
        let b = Heightmap::procedural(32, 16, 0.05).unwrap();
        assert_eq!(a.samples(), b.samples());
        assert!(a.highest_height() > a.lowest_height());
    }
}
