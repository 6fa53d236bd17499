//! Procedural wave height field.
//!
//! The height at a horizontal position is a weighted sum of lookups into two
//! tileable textures. Every lookup scrolls with time at its own rate and most
//! are displaced by a warp vector that itself comes from a coarser noise
//! lookup, which hides the repetition of the underlying tiles.
//!
//! ## Usage
//!
//! ```rust
//! use bevy::math::{Vec2, Vec4};
//! use shading::fluid::{WaveField, WaveFieldConfig};
//! use shading::texture::ConstantTexture;
//!
//! let flat = ConstantTexture(Vec4::splat(0.5));
//! let field = WaveField::new(flat, flat);
//! let height = field.height(Vec2::new(3.0, -2.0), 1.5, &WaveFieldConfig::default());
//! assert_eq!(height, 0.0);
//! ```

use bevy::math::{Vec2, Vec4};
use serde::{Deserialize, Serialize};

use crate::constants::{WAVE_HEIGHT_GAIN, WAVE_POSITION_SCALE, WAVE_TIME_SCALE};
use crate::texture::TileSampler;

/// Which texture a layer reads from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WaveSource {
    Waves,
    Noise,
}

/// Texture channel a layer uses as its scalar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Channel {
    R,
    G,
    B,
    A,
}

impl Channel {
    #[inline]
    pub fn pick(self, texel: Vec4) -> f32 {
        match self {
            Channel::R => texel.x,
            Channel::G => texel.y,
            Channel::B => texel.z,
            Channel::A => texel.w,
        }
    }
}

/// Component order applied to a 2-D coordinate before use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Swizzle {
    Xy,
    Yx,
}

impl Swizzle {
    #[inline]
    pub fn apply(self, v: Vec2) -> Vec2 {
        match self {
            Swizzle::Xy => v,
            Swizzle::Yx => Vec2::new(v.y, v.x),
        }
    }
}

/// Which warp vector displaces a layer's lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WarpSlot {
    None,
    Coarse,
    Fine,
}

/// One noise lookup contributing to a warp vector.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NoiseTap {
    pub swizzle: Swizzle,
    pub spatial_scale: f32,
    pub time_scale: f32,
    pub weight: f32,
}

impl NoiseTap {
    pub const fn new(swizzle: Swizzle, spatial_scale: f32, time_scale: f32, weight: f32) -> Self {
        Self {
            swizzle,
            spatial_scale,
            time_scale,
            weight,
        }
    }
}

/// One lookup contributing `(sample - 0.5) * weight` to the raw height.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WaveLayer {
    pub source: WaveSource,
    pub channel: Channel,
    pub swizzle: Swizzle,
    pub spatial_scale: f32,
    pub time_scale: f32,
    pub weight: f32,
    pub warp: WarpSlot,
    pub warp_swizzle: Swizzle,
    pub warp_strength: f32,
}

/// Data-driven description of the whole height field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaveFieldConfig {
    pub position_scale: f32,
    pub time_scale: f32,
    /// Gain applied after the signed square-root remap.
    pub height_gain: f32,
    pub coarse_warp: Vec<NoiseTap>,
    pub fine_warp: Vec<NoiseTap>,
    pub layers: Vec<WaveLayer>,
}

const fn layer(
    source: WaveSource,
    channel: Channel,
    swizzle: Swizzle,
    spatial_scale: f32,
    time_scale: f32,
    weight: f32,
    warp: WarpSlot,
    warp_swizzle: Swizzle,
    warp_strength: f32,
) -> WaveLayer {
    WaveLayer {
        source,
        channel,
        swizzle,
        spatial_scale,
        time_scale,
        weight,
        warp,
        warp_swizzle,
        warp_strength,
    }
}

/// Default layer table. Pairs of layers scroll in opposite directions with
/// mirrored coordinates, each at its own rate; weights fall as spatial
/// frequency rises.
pub const DEFAULT_WAVE_LAYERS: [WaveLayer; 8] = {
    use Channel::*;
    use Swizzle::*;
    use WarpSlot::*;
    use WaveSource::*;
    [
        layer(Waves, G, Xy, 0.03, 0.01, 0.6, Coarse, Xy, 1.0), // swell
        layer(Waves, G, Yx, 0.03, -0.013, 0.6, Coarse, Yx, 1.0),
        layer(Waves, R, Xy, 0.1, 0.08, 0.3, Fine, Xy, 1.0), // chop
        layer(Waves, R, Yx, 0.1, -0.1, 0.3, Fine, Yx, 1.0),
        layer(Waves, R, Yx, 0.3, 0.12, 0.15, Fine, Xy, 0.5),
        layer(Waves, R, Xy, 0.3, -0.14, 0.15, Fine, Yx, 0.5),
        layer(Noise, R, Yx, 0.5, 0.17, 0.07, Fine, Xy, 0.5), // ripples
        layer(Noise, R, Xy, 0.5, -0.2, 0.07, Fine, Yx, 0.5),
    ]
};

pub const DEFAULT_COARSE_WARP: [NoiseTap; 2] = [
    NoiseTap::new(Swizzle::Xy, 0.03, 0.01, 0.5),
    NoiseTap::new(Swizzle::Yx, 0.03, -0.01, 0.5),
];

pub const DEFAULT_FINE_WARP: [NoiseTap; 2] = [
    NoiseTap::new(Swizzle::Yx, 0.1, 0.02, 0.3),
    NoiseTap::new(Swizzle::Yx, 0.1, -0.02, 0.3),
];

impl Default for WaveFieldConfig {
    fn default() -> Self {
        Self {
            position_scale: WAVE_POSITION_SCALE,
            time_scale: WAVE_TIME_SCALE,
            height_gain: WAVE_HEIGHT_GAIN,
            coarse_warp: DEFAULT_COARSE_WARP.to_vec(),
            fine_warp: DEFAULT_FINE_WARP.to_vec(),
            layers: DEFAULT_WAVE_LAYERS.to_vec(),
        }
    }
}

impl WaveFieldConfig {
    /// Upper bound of `|height|` for textures with values in `[0, 1]`.
    pub fn max_height(&self) -> f32 {
        let raw: f32 = self.layers.iter().map(|l| l.weight.abs() * 0.5).sum();
        raw.sqrt() * self.height_gain.abs()
    }
}

/// Signed square-root remap: sharpens crests while keeping `0 -> 0`.
#[inline]
pub fn remap_height(raw: f32, gain: f32) -> f32 {
    if raw == 0.0 {
        return 0.0;
    }
    raw.signum() * raw.abs().sqrt() * gain
}

/// The pair of tileable textures waves are synthesised from.
#[derive(Debug, Clone)]
pub struct WaveField<T> {
    pub waves: T,
    pub noise: T,
}

impl<T: TileSampler> WaveField<T> {
    pub fn new(waves: T, noise: T) -> Self {
        Self { waves, noise }
    }

    fn warp(&self, taps: &[NoiseTap], pos: Vec2, time: f32) -> Vec2 {
        taps.iter()
            .map(|tap| {
                let uv = tap.swizzle.apply(pos) * tap.spatial_scale
                    + Vec2::splat(time * tap.time_scale);
                self.noise.sample(uv).truncate().truncate() * tap.weight
            })
            .sum()
    }

    /// Unremapped weighted sum of all layers.
    pub fn raw_height(&self, pos: Vec2, time: f32, config: &WaveFieldConfig) -> f32 {
        let pos = pos * config.position_scale;
        let time = time * config.time_scale;
        let coarse = self.warp(&config.coarse_warp, pos, time);
        let fine = self.warp(&config.fine_warp, pos, time);

        config
            .layers
            .iter()
            .map(|layer| {
                let warp = match layer.warp {
                    WarpSlot::None => Vec2::ZERO,
                    WarpSlot::Coarse => coarse,
                    WarpSlot::Fine => fine,
                };
                let uv = layer.swizzle.apply(pos) * layer.spatial_scale
                    + layer.warp_swizzle.apply(warp) * layer.warp_strength
                    + Vec2::splat(time * layer.time_scale);
                let texel = match layer.source {
                    WaveSource::Waves => self.waves.sample(uv),
                    WaveSource::Noise => self.noise.sample(uv),
                };
                (layer.channel.pick(texel) - 0.5) * layer.weight
            })
            .sum()
    }

    /// Wave elevation at a horizontal world position.
    pub fn height(&self, pos: Vec2, time: f32, config: &WaveFieldConfig) -> f32 {
        remap_height(self.raw_height(pos, time, config), config.height_gain)
    }
}
