//! Tileable 2-D lookup tables.
//!
//! Both the wave pattern and the general-purpose noise image are sampled
//! with wrapping addressing, so any `uv` (including huge or negative
//! coordinates produced by domain warping) maps back into the unit square.
//! Sampling is bilinear so the height field built on top stays continuous.

use bevy::math::{Vec2, Vec4};
use log::debug;
use noise::{NoiseFn, Perlin};
use std::f64::consts::TAU;

use crate::ShadingError;

/// Read-only, wrap-addressed texture lookup.
pub trait TileSampler {
    /// Samples the table at `uv mod 1`.
    fn sample(&self, uv: Vec2) -> Vec4;
}

impl<T: TileSampler + ?Sized> TileSampler for &T {
    fn sample(&self, uv: Vec2) -> Vec4 {
        (**self).sample(uv)
    }
}

/// A texture that returns the same value everywhere.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConstantTexture(pub Vec4);

impl TileSampler for ConstantTexture {
    fn sample(&self, _uv: Vec2) -> Vec4 {
        self.0
    }
}

/// An RGBA texture stored row-major, sampled bilinearly with wrapping.
#[derive(Debug, Clone)]
pub struct TileableTexture {
    width: usize,
    height: usize,
    texels: Vec<Vec4>,
}

impl TileableTexture {
    pub fn new(width: usize, height: usize, texels: Vec<Vec4>) -> Result<Self, ShadingError> {
        let expected = width * height;
        if expected == 0 || texels.len() != expected {
            return Err(ShadingError::TextureSize {
                width,
                height,
                expected,
                actual: texels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            texels,
        })
    }

    /// Builds a seamless `size`x`size` texture from four decorrelated Perlin
    /// channels.
    ///
    /// Each texel is mapped onto a 4-D torus (two circles, one per texture
    /// axis) before sampling, which makes the pattern wrap exactly at the
    /// edges. `frequency` is the number of noise features across one tile.
    pub fn from_perlin(size: usize, seed: u32, frequency: f64) -> Result<Self, ShadingError> {
        let channels: [Perlin; 4] = [
            Perlin::new(seed),
            Perlin::new(seed.wrapping_add(1)),
            Perlin::new(seed.wrapping_add(2)),
            Perlin::new(seed.wrapping_add(3)),
        ];
        let radius = frequency / TAU;

        let mut texels = Vec::with_capacity(size * size);
        for y in 0..size {
            let b = TAU * y as f64 / size as f64;
            for x in 0..size {
                let a = TAU * x as f64 / size as f64;
                let point = [
                    a.cos() * radius,
                    a.sin() * radius,
                    b.cos() * radius,
                    b.sin() * radius,
                ];
                let mut texel = [0.0f32; 4];
                for (value, perlin) in texel.iter_mut().zip(channels.iter()) {
                    *value = (perlin.get(point) * 0.5 + 0.5).clamp(0.0, 1.0) as f32;
                }
                texels.push(Vec4::from_array(texel));
            }
        }

        debug!(
            "Generated {size}x{size} tileable noise texture (seed {seed}, frequency {frequency})"
        );
        Self::new(size, size, texels)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    fn texel(&self, x: i64, y: i64) -> Vec4 {
        let x = x.rem_euclid(self.width as i64) as usize;
        let y = y.rem_euclid(self.height as i64) as usize;
        self.texels[y * self.width + x]
    }
}

impl TileSampler for TileableTexture {
    fn sample(&self, uv: Vec2) -> Vec4 {
        // Texel centres sit at (i + 0.5) / size.
        let x = uv.x.rem_euclid(1.0) * self.width as f32 - 0.5;
        let y = uv.y.rem_euclid(1.0) * self.height as f32 - 0.5;
        let x0 = x.floor();
        let y0 = y.floor();
        let fx = x - x0;
        let fy = y - y0;
        let (ix, iy) = (x0 as i64, y0 as i64);

        let top = self.texel(ix, iy).lerp(self.texel(ix + 1, iy), fx);
        let bottom = self.texel(ix, iy + 1).lerp(self.texel(ix + 1, iy + 1), fx);
        top.lerp(bottom, fy)
    }
}
